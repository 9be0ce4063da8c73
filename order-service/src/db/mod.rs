//! Local order store (SQLite)

pub mod orders;

use std::str::FromStr;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

/// Default page size for list queries
pub const DEFAULT_LIMIT: i64 = 100;
/// Hard cap on a single page
pub const MAX_LIMIT: i64 = 1000;

/// Offset pagination over local rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub skip: i64,
    pub limit: i64,
}

impl Page {
    pub fn new(skip: Option<i64>, limit: Option<i64>) -> Self {
        let (skip, limit) = shared::util::page_bounds(skip, limit, DEFAULT_LIMIT, MAX_LIMIT);
        Self { skip, limit }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// Open the pool and apply embedded migrations.
///
/// In-memory databases live inside a single connection, so those get a
/// one-connection pool that never recycles it.
pub async fn connect(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    let pool = if database_url.contains(":memory:") {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?
    } else {
        SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?
    };

    sqlx::migrate!("./migrations").run(&pool).await?;
    Ok(pool)
}

#[cfg(test)]
pub(crate) async fn test_pool() -> SqlitePool {
    connect("sqlite::memory:").await.unwrap()
}
