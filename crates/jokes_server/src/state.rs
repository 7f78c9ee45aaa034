use std::sync::Arc;

use jokes_core::{ServiceResult, SqliteJokeService};
use parking_lot::Mutex;
use rusqlite::Connection;

use crate::error::ApiError;

/// Shared handler state: one migrated SQLite connection.
#[derive(Clone)]
pub struct AppState {
    db: Arc<Mutex<Connection>>,
}

impl AppState {
    /// `conn` must come from `jokes_core::db::open_db*`.
    pub fn new(conn: Connection) -> Self {
        Self {
            db: Arc::new(Mutex::new(conn)),
        }
    }

    /// Runs `op` against the service on the blocking pool.
    ///
    /// The connection stays locked for the whole call, so every operation,
    /// composite writes included, sees a consistent store.
    pub async fn run<T, F>(&self, op: F) -> Result<T, ApiError>
    where
        T: Send + 'static,
        F: for<'conn> FnOnce(&SqliteJokeService<'conn>) -> ServiceResult<T> + Send + 'static,
    {
        let db = Arc::clone(&self.db);
        let result = tokio::task::spawn_blocking(move || {
            let conn = db.lock();
            let service = SqliteJokeService::for_connection(&conn);
            op(&service)
        })
        .await?;

        Ok(result?)
    }
}
