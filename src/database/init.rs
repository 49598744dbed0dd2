//! Connection-pool setup and schema creation for the SQLite store.

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;

/// A type alias for the database connection pool (`Pool<Sqlite>`).
/// Used throughout the application as the single name for shared storage.
pub type DbPool = Pool<Sqlite>;

/// Opens (creating if missing) the database behind `url`,
/// e.g. `sqlite://user_data.db`.
pub async fn connect(url: &str) -> Result<DbPool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
    SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
}

/// Creates the account table if it does not exist yet. One row per user;
/// timestamps are stored as RFC 3339 text.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS user_balance (
            user_id INTEGER PRIMARY KEY,
            balance INTEGER NOT NULL DEFAULT 0,
            daily_last_claimed TEXT NOT NULL,
            hourly_last_claimed TEXT NOT NULL
        )",
    )
    .execute(pool)
    .await?;
    Ok(())
}
