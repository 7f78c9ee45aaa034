//! Joke and category use-case service.
//!
//! # Responsibility
//! - Provide the use-case entry points called by the HTTP router.
//! - Turn repository absence (`None`) into typed not-found errors.
//! - Parse raw vote values and resolve random selections.
//!
//! # Invariants
//! - Service APIs never bypass repository normalization/persistence contracts.
//! - The service is storage-agnostic; storage arrives through the traits.
//! - A dangling reference hit by random selection is reported, not skipped.

use crate::model::category::Category;
use crate::model::joke::{Joke, JokeId};
use crate::model::validation::ValidationError;
use crate::model::vote::{InvalidVote, Vote};
use crate::repo::category_repo::{CategoryRepository, SqliteCategoryRepository};
use crate::repo::joke_repo::{JokeRepository, SqliteJokeRepository};
use crate::repo::RepoError;
use log::warn;
use rand::Rng;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service wired to the SQLite repositories of one connection.
pub type SqliteJokeService<'conn> =
    JokeService<SqliteJokeRepository<'conn>, SqliteCategoryRepository<'conn>>;

/// Service error for joke/category use-cases.
#[derive(Debug)]
pub enum ServiceError {
    JokeNotFound(JokeId),
    CategoryNotFound(String),
    /// Random selection over a collection with no jokes.
    EmptyCollection,
    /// The category exists but references no jokes.
    EmptyCategory(String),
    /// The category references a joke id that does not resolve.
    DanglingJoke { category: String, joke_id: JokeId },
    InvalidVote(InvalidVote),
    Validation(ValidationError),
    Conflict(String),
    Repo(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::JokeNotFound(id) => write!(f, "joke not found: {id}"),
            Self::CategoryNotFound(name) => write!(f, "category not found: `{name}`"),
            Self::EmptyCollection => write!(f, "no jokes exist yet"),
            Self::EmptyCategory(name) => write!(f, "category `{name}` has no jokes"),
            Self::DanglingJoke { category, joke_id } => write!(
                f,
                "category `{category}` references missing joke {joke_id}"
            ),
            Self::InvalidVote(err) => write!(f, "{err}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::Conflict(message) => write!(f, "{message}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidVote(err) => Some(err),
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::JokeNotFound(id) => Self::JokeNotFound(id),
            RepoError::CategoryNotFound(name) => Self::CategoryNotFound(name),
            RepoError::Validation(err) => Self::Validation(err),
            RepoError::Conflict(message) => Self::Conflict(message),
            other => Self::Repo(other),
        }
    }
}

impl From<InvalidVote> for ServiceError {
    fn from(value: InvalidVote) -> Self {
        Self::InvalidVote(value)
    }
}

/// Use-case service over a joke and a category repository.
pub struct JokeService<J: JokeRepository, C: CategoryRepository> {
    jokes: J,
    categories: C,
}

impl<'conn> SqliteJokeService<'conn> {
    /// Builds a service over the SQLite repositories of `conn`.
    pub fn for_connection(conn: &'conn rusqlite::Connection) -> Self {
        JokeService::new(
            SqliteJokeRepository::new(conn),
            SqliteCategoryRepository::new(conn),
        )
    }
}

impl<J: JokeRepository, C: CategoryRepository> JokeService<J, C> {
    pub fn new(jokes: J, categories: C) -> Self {
        Self { jokes, categories }
    }

    pub fn list_jokes(&self) -> ServiceResult<Vec<Joke>> {
        Ok(self.jokes.list_jokes()?)
    }

    pub fn get_joke(&self, id: JokeId) -> ServiceResult<Joke> {
        self.jokes
            .get_joke(id)?
            .ok_or(ServiceError::JokeNotFound(id))
    }

    /// Returns a uniformly chosen joke, or `EmptyCollection`.
    pub fn random_joke(&self) -> ServiceResult<Joke> {
        self.jokes
            .random_joke()?
            .ok_or(ServiceError::EmptyCollection)
    }

    /// Picks one of the category's joke ids uniformly and loads it.
    ///
    /// # Errors
    /// - `CategoryNotFound` when no category has this name.
    /// - `EmptyCategory` when the category references no jokes.
    /// - `DanglingJoke` when the chosen id does not resolve.
    pub fn random_joke_for_category(&self, name: &str) -> ServiceResult<Joke> {
        let category = self.get_category(name)?;
        if category.is_empty() {
            return Err(ServiceError::EmptyCategory(category.name));
        }

        let index = rand::rng().random_range(0..category.joke_ids.len());
        let joke_id = category.joke_ids[index];
        match self.jokes.get_joke(joke_id)? {
            Some(joke) => Ok(joke),
            None => {
                warn!(
                    "event=dangling_reference module=service status=warn category_id={} joke_id={}",
                    category.id, joke_id
                );
                Err(ServiceError::DanglingJoke {
                    category: category.name,
                    joke_id,
                })
            }
        }
    }

    /// Creates a joke inside an existing category.
    pub fn create_joke_into(&self, category: &str, content: &str) -> ServiceResult<Joke> {
        Ok(self.categories.create_joke_into(category, content)?)
    }

    /// Classifies `raw_vote` and records it against joke `id`.
    ///
    /// A malformed vote is rejected before storage is touched.
    pub fn vote(&self, id: JokeId, raw_vote: &str) -> ServiceResult<Vote> {
        let vote: Vote = raw_vote.parse()?;
        self.jokes.record_vote(id, vote)?;
        Ok(vote)
    }

    pub fn list_categories(&self) -> ServiceResult<Vec<Category>> {
        Ok(self.categories.list_categories()?)
    }

    pub fn get_category(&self, name: &str) -> ServiceResult<Category> {
        self.categories
            .get_category(name)?
            .ok_or_else(|| ServiceError::CategoryNotFound(name.trim().to_string()))
    }

    pub fn create_category(&self, name: &str) -> ServiceResult<Category> {
        Ok(self.categories.create_category(name)?)
    }

    pub fn jokes_for_category(&self, name: &str) -> ServiceResult<Vec<Joke>> {
        Ok(self.categories.list_jokes_for(name)?)
    }

    /// Attaches an existing joke id to a category without checking the joke.
    pub fn attach_joke(&self, category: &str, joke_id: JokeId) -> ServiceResult<()> {
        Ok(self.categories.attach_joke(category, joke_id)?)
    }
}
