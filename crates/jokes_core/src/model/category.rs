//! Category domain model.
//!
//! # Invariants
//! - `name` is unique across categories.
//! - `joke_ids` keeps attach order and holds each id at most once.
//! - Ids in `joke_ids` are not guaranteed to resolve (dangling references).

use crate::model::joke::JokeId;
use serde::{Deserialize, Serialize};

/// Storage-assigned category identifier.
pub type CategoryId = i64;

/// A named group of joke references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    /// Serialized as `category` to match the request body field.
    #[serde(rename = "category")]
    pub name: String,
    #[serde(rename = "jokes")]
    pub joke_ids: Vec<JokeId>,
}

impl Category {
    pub fn is_empty(&self) -> bool {
        self.joke_ids.is_empty()
    }
}
