//! Joke domain model.
//!
//! # Invariants
//! - `id` is storage-assigned and stable.
//! - `likes` and `dislikes` start at zero and only ever grow.

use crate::model::validation::ValidationError;
use serde::{Deserialize, Serialize};

/// Storage-assigned joke identifier.
pub type JokeId = i64;

/// A joke with its vote tallies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Joke {
    pub id: JokeId,
    pub content: String,
    pub likes: i64,
    pub dislikes: i64,
}

impl Joke {
    /// Checks invariants of a loaded record.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.content.trim().is_empty() {
            return Err(ValidationError::EmptyContent);
        }
        if self.likes < 0 {
            return Err(ValidationError::NegativeCounter {
                field: "likes",
                value: self.likes,
            });
        }
        if self.dislikes < 0 {
            return Err(ValidationError::NegativeCounter {
                field: "dislikes",
                value: self.dislikes,
            });
        }
        Ok(())
    }
}
