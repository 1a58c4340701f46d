use std::{str::FromStr, time::Duration};

use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions},
    Sqlite, Transaction,
};

use crate::error::AppResult;

/// A unit of work handed to service calls.
///
/// Writes become visible only after `commit`; dropping the handle rolls back.
pub type UnitOfWork = Transaction<'static, Sqlite>;

/// How long a unit of work waits for another writer before giving up
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Creates a SQLite connection pool
///
/// Establishes a pool of database connections for efficient reuse.
/// The pool automatically manages connection lifecycle and limits.
pub async fn create_pool(database_url: &str, max_connections: u32) -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)?.busy_timeout(BUSY_TIMEOUT);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    Ok(pool)
}

/// Applies the embedded schema migrations
pub async fn run_migrations(pool: &SqlitePool) -> AppResult<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    tracing::info!("Database migrations applied");
    Ok(())
}

/// Opens a new unit of work on the pool
///
/// The write lock is taken up front (`BEGIN IMMEDIATE`), so units of work run one at a time
/// and every check made inside one still holds at commit.
pub async fn begin(pool: &SqlitePool) -> AppResult<UnitOfWork> {
    Ok(pool.begin_with("BEGIN IMMEDIATE").await?)
}

/// Single-connection in-memory database with the schema applied
#[cfg(test)]
pub(crate) async fn test_pool() -> SqlitePool {
    // Every in-memory connection is its own database, so the pool must hold exactly one.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    run_migrations(&pool).await.unwrap();
    pool
}
