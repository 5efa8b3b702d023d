use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::info;

use crate::store::StoreError;

pub type DbPool = SqlitePool;

/// Application state holding the database connection pool
pub struct AppState {
  pub db: DbPool,
}

impl AppState {
  pub fn new(db: DbPool) -> Self {
    Self { db }
  }
}

/// Open the database connection pool and run migrations
///
/// The database file is created on first use.
pub async fn initialize_db(database_url: &str) -> Result<DbPool, StoreError> {
  info!("Initializing database at: {}", database_url);

  let options = SqliteConnectOptions::from_str(database_url)?
    .create_if_missing(true)
    .foreign_keys(true);

  let pool = SqlitePoolOptions::new()
    .max_connections(5)
    .connect_with(options)
    .await?;

  sqlx::migrate!("./migrations").run(&pool).await?;

  info!("Database initialized successfully");

  Ok(pool)
}
