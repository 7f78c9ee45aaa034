//! Joke repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide create/read APIs over the `jokes` table.
//! - Apply vote increments as single-statement updates.
//!
//! # Invariants
//! - Ids come from `AUTOINCREMENT`, so concurrent creates never collide.
//! - Vote updates never read-modify-write in Rust; the tally moves in SQL.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::model::joke::{Joke, JokeId};
use crate::model::validation::normalize_content;
use crate::model::vote::Vote;
use crate::repo::{ensure_connection_ready, RepoError, RepoResult};
use rand::Rng;
use rusqlite::{params, params_from_iter, Connection, Row};
use std::collections::HashMap;

const JOKE_SELECT_SQL: &str = "SELECT
    id,
    content,
    likes,
    dislikes
FROM jokes";

/// Repository interface for joke persistence.
pub trait JokeRepository {
    /// Persists a new joke with zeroed counters and returns it.
    fn create_joke(&self, content: &str) -> RepoResult<Joke>;
    fn get_joke(&self, id: JokeId) -> RepoResult<Option<Joke>>;
    /// Loads all jokes whose id appears in `ids` with one query.
    ///
    /// Results follow the order of `ids`; unknown ids are skipped.
    fn get_jokes(&self, ids: &[JokeId]) -> RepoResult<Vec<Joke>>;
    fn list_jokes(&self) -> RepoResult<Vec<Joke>>;
    /// Adds one like or dislike to the joke.
    ///
    /// Returns `JokeNotFound` when no joke has this id.
    fn record_vote(&self, id: JokeId, vote: Vote) -> RepoResult<()>;

    /// Picks one joke uniformly from `list_jokes`.
    ///
    /// Returns `None` when the collection is empty.
    fn random_joke(&self) -> RepoResult<Option<Joke>> {
        let mut jokes = self.list_jokes()?;
        if jokes.is_empty() {
            return Ok(None);
        }
        let index = rand::rng().random_range(0..jokes.len());
        Ok(Some(jokes.swap_remove(index)))
    }
}

/// SQLite-backed joke repository.
pub struct SqliteJokeRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteJokeRepository<'conn> {
    /// Wraps a connection returned by `db::open_db*`.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Wraps a connection after checking schema version and tables.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &["jokes"])?;
        Ok(Self::new(conn))
    }
}

impl JokeRepository for SqliteJokeRepository<'_> {
    fn create_joke(&self, content: &str) -> RepoResult<Joke> {
        let content = normalize_content(content)?;
        insert_joke(self.conn, content)
    }

    fn get_joke(&self, id: JokeId) -> RepoResult<Option<Joke>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{JOKE_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_joke_row(row)?));
        }

        Ok(None)
    }

    fn get_jokes(&self, ids: &[JokeId]) -> RepoResult<Vec<Joke>> {
        load_jokes_by_ids(self.conn, ids)
    }

    fn list_jokes(&self) -> RepoResult<Vec<Joke>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{JOKE_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut jokes = Vec::new();
        while let Some(row) = rows.next()? {
            jokes.push(parse_joke_row(row)?);
        }

        Ok(jokes)
    }

    fn record_vote(&self, id: JokeId, vote: Vote) -> RepoResult<()> {
        let column = vote.column();
        let changed = self.conn.execute(
            &format!("UPDATE jokes SET {column} = {column} + 1 WHERE id = ?1;"),
            [id],
        )?;

        if changed == 0 {
            return Err(RepoError::JokeNotFound(id));
        }

        Ok(())
    }
}

/// Inserts already-normalized content; also used inside category transactions.
pub(crate) fn insert_joke(conn: &Connection, content: String) -> RepoResult<Joke> {
    conn.execute(
        "INSERT INTO jokes (content, likes, dislikes) VALUES (?1, 0, 0);",
        params![content.as_str()],
    )?;

    Ok(Joke {
        id: conn.last_insert_rowid(),
        content,
        likes: 0,
        dislikes: 0,
    })
}

pub(crate) fn load_jokes_by_ids(conn: &Connection, ids: &[JokeId]) -> RepoResult<Vec<Joke>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let placeholders = vec!["?"; ids.len()].join(", ");
    let mut stmt = conn.prepare(&format!(
        "{JOKE_SELECT_SQL} WHERE id IN ({placeholders});"
    ))?;
    let mut rows = stmt.query(params_from_iter(ids.iter()))?;
    let mut by_id = HashMap::with_capacity(ids.len());
    while let Some(row) = rows.next()? {
        let joke = parse_joke_row(row)?;
        by_id.insert(joke.id, joke);
    }

    Ok(ids.iter().filter_map(|id| by_id.remove(id)).collect())
}

fn parse_joke_row(row: &Row<'_>) -> RepoResult<Joke> {
    let joke = Joke {
        id: row.get("id")?,
        content: row.get("content")?,
        likes: row.get("likes")?,
        dislikes: row.get("dislikes")?,
    };
    joke.validate().map_err(|err| {
        RepoError::InvalidData(format!("jokes row {} is invalid: {err}", joke.id))
    })?;
    Ok(joke)
}
