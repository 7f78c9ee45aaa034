//! Domain model for jokes, categories and votes.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Own input normalization shared by every write path.
//!
//! # Invariants
//! - Identifiers are assigned by storage and never reused.
//! - Jokes are never deleted; categories only reference jokes by id.

pub mod category;
pub mod joke;
pub mod validation;
pub mod vote;
