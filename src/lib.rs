pub mod commands;
pub mod config;
pub mod db;
pub mod error;
pub mod history;
pub mod models;
pub mod records;
pub mod store;

#[cfg(test)]
mod test_utils;

use config::Config;
use db::AppState;
use error::AppError;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Load configuration, open the database and print the configured user's
/// personal records as JSON.
pub fn run() -> Result<(), AppError> {
  let config = Config::from_env()?;

  tracing_subscriber::registry()
    .with(tracing_subscriber::EnvFilter::new(&config.log_filter))
    .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
    .init();

  let runtime = tokio::runtime::Builder::new_multi_thread()
    .enable_all()
    .build()?;

  runtime.block_on(async move {
    let pool = db::initialize_db(&config.database_url).await?;
    let state = AppState::new(pool);
    info!("Database ready");

    match config.user_id {
      Some(user_id) => {
        let records = commands::records::get_personal_records(&state, user_id).await?;
        println!("{}", serde_json::to_string_pretty(&records)?);
      }
      None => warn!("LIFT_LOG_USER_ID is not set, no records to report"),
    }

    state.db.close().await;
    Ok::<(), AppError>(())
  })
}
