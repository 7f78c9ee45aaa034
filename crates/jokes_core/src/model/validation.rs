//! Input normalization for joke content and category names.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Maximum joke content length, in characters.
pub const MAX_CONTENT_CHARS: usize = 4096;
/// Maximum category name length, in characters.
pub const MAX_CATEGORY_NAME_CHARS: usize = 64;

/// Validation failures for joke/category input and persisted state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    EmptyContent,
    ContentTooLong { max: usize, actual: usize },
    EmptyCategoryName,
    CategoryNameTooLong { max: usize, actual: usize },
    NegativeCounter { field: &'static str, value: i64 },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyContent => write!(f, "joke content cannot be empty"),
            Self::ContentTooLong { max, actual } => {
                write!(f, "joke content is {actual} characters long; max is {max}")
            }
            Self::EmptyCategoryName => write!(f, "category name cannot be empty"),
            Self::CategoryNameTooLong { max, actual } => {
                write!(f, "category name is {actual} characters long; max is {max}")
            }
            Self::NegativeCounter { field, value } => {
                write!(f, "`{field}` must be non-negative, got {value}")
            }
        }
    }
}

impl Error for ValidationError {}

/// Trims joke content and checks it is non-empty and within bounds.
pub fn normalize_content(content: &str) -> Result<String, ValidationError> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyContent);
    }
    let actual = trimmed.chars().count();
    if actual > MAX_CONTENT_CHARS {
        return Err(ValidationError::ContentTooLong {
            max: MAX_CONTENT_CHARS,
            actual,
        });
    }
    Ok(trimmed.to_string())
}

/// Trims a category name and checks it is non-empty and within bounds.
///
/// Names are case-sensitive; `Puns` and `puns` are distinct categories.
pub fn normalize_category_name(name: &str) -> Result<String, ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyCategoryName);
    }
    let actual = trimmed.chars().count();
    if actual > MAX_CATEGORY_NAME_CHARS {
        return Err(ValidationError::CategoryNameTooLong {
            max: MAX_CATEGORY_NAME_CHARS,
            actual,
        });
    }
    Ok(trimmed.to_string())
}
