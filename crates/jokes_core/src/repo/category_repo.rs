//! Category repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide create/read APIs over `categories`.
//! - Own category membership (`category_jokes`) and the joke-into-category
//!   composite write.
//!
//! # Invariants
//! - Category names are unique; duplicates surface `RepoError::Conflict`.
//! - Membership keeps attach order (`rowid`) and holds each joke once.
//! - Attaching does not check that the joke exists.
//! - `create_joke_into` writes the joke and its membership in one
//!   IMMEDIATE transaction, after the category lookup succeeded.

use crate::model::category::{Category, CategoryId};
use crate::model::joke::{Joke, JokeId};
use crate::model::validation::{normalize_category_name, normalize_content};
use crate::repo::joke_repo::{insert_joke, load_jokes_by_ids};
use crate::repo::{ensure_connection_ready, is_unique_violation, RepoError, RepoResult};
use log::warn;
use rusqlite::{params, Connection, OptionalExtension, Transaction, TransactionBehavior};
use std::collections::HashMap;

/// Repository interface for categories and their joke membership.
pub trait CategoryRepository {
    /// Persists a new, empty category and returns it.
    fn create_category(&self, name: &str) -> RepoResult<Category>;
    fn get_category(&self, name: &str) -> RepoResult<Option<Category>>;
    fn list_categories(&self) -> RepoResult<Vec<Category>>;
    /// Batch-loads every joke referenced by the category, in attach order.
    ///
    /// Dangling references are left out.
    fn list_jokes_for(&self, name: &str) -> RepoResult<Vec<Joke>>;
    /// Appends `joke_id` to the category. Re-attaching is a no-op.
    fn attach_joke(&self, name: &str, joke_id: JokeId) -> RepoResult<()>;
    /// Creates a joke and attaches it to an existing category atomically.
    ///
    /// Creates nothing when the category does not exist.
    fn create_joke_into(&self, name: &str, content: &str) -> RepoResult<Joke>;
}

/// SQLite-backed category repository.
pub struct SqliteCategoryRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCategoryRepository<'conn> {
    /// Wraps a connection returned by `db::open_db*`.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Wraps a connection after checking schema version and tables.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &["jokes", "categories", "category_jokes"])?;
        Ok(Self::new(conn))
    }
}

impl CategoryRepository for SqliteCategoryRepository<'_> {
    fn create_category(&self, name: &str) -> RepoResult<Category> {
        let name = normalize_category_name(name)?;
        match self
            .conn
            .execute("INSERT INTO categories (name) VALUES (?1);", [name.as_str()])
        {
            Ok(_) => {}
            Err(err) if is_unique_violation(&err) => {
                return Err(RepoError::Conflict(format!(
                    "category `{name}` already exists"
                )));
            }
            Err(err) => return Err(err.into()),
        }

        Ok(Category {
            id: self.conn.last_insert_rowid(),
            name,
            joke_ids: Vec::new(),
        })
    }

    fn get_category(&self, name: &str) -> RepoResult<Option<Category>> {
        let Some(id) = find_category_id(self.conn, name.trim())? else {
            return Ok(None);
        };

        Ok(Some(Category {
            id,
            name: name.trim().to_string(),
            joke_ids: load_joke_ids(self.conn, id)?,
        }))
    }

    fn list_categories(&self) -> RepoResult<Vec<Category>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name FROM categories ORDER BY id ASC;")?;
        let mut rows = stmt.query([])?;
        let mut categories = Vec::new();
        while let Some(row) = rows.next()? {
            categories.push(Category {
                id: row.get("id")?,
                name: row.get("name")?,
                joke_ids: Vec::new(),
            });
        }

        let mut members = load_all_memberships(self.conn)?;
        for category in &mut categories {
            category.joke_ids = members.remove(&category.id).unwrap_or_default();
        }

        Ok(categories)
    }

    fn list_jokes_for(&self, name: &str) -> RepoResult<Vec<Joke>> {
        let name = name.trim();
        let id = find_category_id(self.conn, name)?
            .ok_or_else(|| RepoError::CategoryNotFound(name.to_string()))?;
        let joke_ids = load_joke_ids(self.conn, id)?;
        let jokes = load_jokes_by_ids(self.conn, &joke_ids)?;

        if jokes.len() < joke_ids.len() {
            warn!(
                "event=dangling_reference module=repo status=warn category_id={} referenced={} resolved={}",
                id,
                joke_ids.len(),
                jokes.len()
            );
        }

        Ok(jokes)
    }

    fn attach_joke(&self, name: &str, joke_id: JokeId) -> RepoResult<()> {
        let name = name.trim();
        let id = find_category_id(self.conn, name)?
            .ok_or_else(|| RepoError::CategoryNotFound(name.to_string()))?;
        insert_membership(self.conn, id, joke_id)
    }

    fn create_joke_into(&self, name: &str, content: &str) -> RepoResult<Joke> {
        let name = name.trim();
        let content = normalize_content(content)?;

        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let id = find_category_id(&tx, name)?
            .ok_or_else(|| RepoError::CategoryNotFound(name.to_string()))?;
        let joke = insert_joke(&tx, content)?;
        insert_membership(&tx, id, joke.id)?;
        tx.commit()?;

        Ok(joke)
    }
}

fn find_category_id(conn: &Connection, name: &str) -> RepoResult<Option<CategoryId>> {
    let id = conn
        .query_row(
            "SELECT id FROM categories WHERE name = ?1;",
            [name],
            |row| row.get(0),
        )
        .optional()?;
    Ok(id)
}

fn insert_membership(conn: &Connection, category_id: CategoryId, joke_id: JokeId) -> RepoResult<()> {
    conn.execute(
        "INSERT OR IGNORE INTO category_jokes (category_id, joke_id) VALUES (?1, ?2);",
        params![category_id, joke_id],
    )?;
    Ok(())
}

fn load_joke_ids(conn: &Connection, category_id: CategoryId) -> RepoResult<Vec<JokeId>> {
    let mut stmt = conn.prepare(
        "SELECT joke_id
         FROM category_jokes
         WHERE category_id = ?1
         ORDER BY rowid ASC;",
    )?;
    let mut rows = stmt.query([category_id])?;
    let mut ids = Vec::new();
    while let Some(row) = rows.next()? {
        ids.push(row.get(0)?);
    }
    Ok(ids)
}

fn load_all_memberships(conn: &Connection) -> RepoResult<HashMap<CategoryId, Vec<JokeId>>> {
    let mut stmt = conn.prepare(
        "SELECT category_id, joke_id
         FROM category_jokes
         ORDER BY rowid ASC;",
    )?;
    let mut rows = stmt.query([])?;
    let mut members: HashMap<CategoryId, Vec<JokeId>> = HashMap::new();
    while let Some(row) = rows.next()? {
        let category_id: CategoryId = row.get(0)?;
        members.entry(category_id).or_default().push(row.get(1)?);
    }
    Ok(members)
}
