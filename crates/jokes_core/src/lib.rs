//! Core domain logic for the jokes service.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging};
pub use model::category::{Category, CategoryId};
pub use model::joke::{Joke, JokeId};
pub use model::validation::ValidationError;
pub use model::vote::{InvalidVote, Vote};
pub use repo::category_repo::{CategoryRepository, SqliteCategoryRepository};
pub use repo::joke_repo::{JokeRepository, SqliteJokeRepository};
pub use repo::{RepoError, RepoResult};
pub use service::joke_service::{JokeService, ServiceError, ServiceResult, SqliteJokeService};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
