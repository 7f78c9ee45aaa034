//! Vote classification.
//!
//! A vote arrives as a raw path segment. Integers greater than zero are likes,
//! every other integer is a dislike, and anything that is not an integer is
//! rejected.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vote {
    Like,
    Dislike,
}

impl Vote {
    /// Column incremented by this vote.
    pub(crate) fn column(self) -> &'static str {
        match self {
            Self::Like => "likes",
            Self::Dislike => "dislikes",
        }
    }
}

/// Raised when a vote value is not an integer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidVote(pub String);

impl Display for InvalidVote {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid vote value `{}`; expected an integer", self.0)
    }
}

impl Error for InvalidVote {}

impl FromStr for Vote {
    type Err = InvalidVote;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let value: i64 = raw
            .trim()
            .parse()
            .map_err(|_| InvalidVote(raw.to_string()))?;
        if value > 0 {
            Ok(Self::Like)
        } else {
            Ok(Self::Dislike)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{InvalidVote, Vote};

    #[test]
    fn positive_integers_are_likes() {
        assert_eq!("1".parse::<Vote>().unwrap(), Vote::Like);
        assert_eq!(" 42 ".parse::<Vote>().unwrap(), Vote::Like);
        assert_eq!("+7".parse::<Vote>().unwrap(), Vote::Like);
    }

    #[test]
    fn zero_and_negative_integers_are_dislikes() {
        assert_eq!("0".parse::<Vote>().unwrap(), Vote::Dislike);
        assert_eq!("-1".parse::<Vote>().unwrap(), Vote::Dislike);
    }

    #[test]
    fn non_integers_are_rejected() {
        for raw in ["", "like", "1.5", "1e3", "0x1", "9223372036854775808"] {
            assert_eq!(raw.parse::<Vote>(), Err(InvalidVote(raw.to_string())));
        }
    }
}
