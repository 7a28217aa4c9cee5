use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::info;

use crate::config::DbConfig;
use crate::error::AppError;

const SCHEMA: [&str; 3] = [
    r#"
    CREATE TABLE IF NOT EXISTS Property (
        Id INTEGER PRIMARY KEY AUTOINCREMENT,
        PropertyType INTEGER NOT NULL,
        Country TEXT NOT NULL,
        IngestRunId DATETIME NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS Bedroom (
        BedroomId INTEGER PRIMARY KEY AUTOINCREMENT,
        PropertyId INTEGER NOT NULL,
        Available INTEGER NOT NULL,
        RoomSize TEXT NOT NULL,
        BedSize TEXT NOT NULL,
        Rent INTEGER NOT NULL,
        Deposit INTEGER NOT NULL,
        FOREIGN KEY (PropertyId) REFERENCES Property(Id)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS Photo (
        PhotoId INTEGER PRIMARY KEY AUTOINCREMENT,
        PropertyId INTEGER NOT NULL,
        Uri TEXT NOT NULL,
        FOREIGN KEY (PropertyId) REFERENCES Property(Id),
        CONSTRAINT UC_PhotoUri UNIQUE (PropertyId, Uri)
    )
    "#,
];

/// Opens a SQLite pool with foreign keys enforced and makes sure the
/// tables exist.
pub async fn connect(config: &DbConfig) -> Result<SqlitePool, AppError> {
    let options = SqliteConnectOptions::from_str(&config.database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(options)
        .await?;

    bootstrap(&pool).await?;
    info!(database_url = %config.database_url, "Database ready");

    Ok(pool)
}

/// Creates the `Property`, `Bedroom` and `Photo` tables if missing.
pub async fn bootstrap(pool: &SqlitePool) -> Result<(), AppError> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }
    Ok(())
}

/// Single-connection in-memory database for tests.
#[cfg(test)]
pub(crate) async fn memory_pool() -> SqlitePool {
    connect(&DbConfig {
        database_url: "sqlite::memory:".to_string(),
        max_connections: 1,
    })
    .await
    .expect("in-memory database")
}
