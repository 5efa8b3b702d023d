//! Runtime configuration loaded from the environment
//!
//! A `.env` file in the working directory is honoured outside of tests.

use tracing_subscriber::EnvFilter;

const DEFAULT_DATABASE_URL: &str = "sqlite://lift-log.db?mode=rwc";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  #[error("Missing the environment variable {0}")]
  MissingVar(String),

  #[error("Invalid value for the environment variable {0}: {1}")]
  InvalidValue(String, String),
}

#[derive(Debug, Clone)]
pub struct Config {
  pub database_url: String,
  /// `EnvFilter` directives, e.g. `info` or `lift_log_lib=debug,sqlx=warn`
  pub log_filter: String,
  /// User whose personal records the binary reports
  pub user_id: Option<i64>,
}

impl Config {
  pub fn from_env() -> Result<Self, ConfigError> {
    if !cfg!(test) {
      dotenvy::dotenv().ok();
    }

    let database_url =
      std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());
    if database_url.trim().is_empty() {
      return Err(ConfigError::MissingVar("DATABASE_URL".to_string()));
    }

    let log_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    EnvFilter::try_new(&log_filter).map_err(|e| {
      ConfigError::InvalidValue(
        "RUST_LOG".to_string(),
        format!("'{}' is not a valid filter: {}", log_filter, e),
      )
    })?;

    let user_id = match std::env::var("LIFT_LOG_USER_ID") {
      Ok(raw) => Some(raw.trim().parse::<i64>().map_err(|e| {
        ConfigError::InvalidValue("LIFT_LOG_USER_ID".to_string(), e.to_string())
      })?),
      Err(_) => None,
    };

    Ok(Self {
      database_url,
      log_filter,
      user_id,
    })
  }
}
