//! Top-level error for the `lift-log` binary

use crate::commands::CommandError;
use crate::config::ConfigError;
use crate::store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
  #[error("Configuration error: {0}")]
  Config(#[from] ConfigError),

  #[error("Store error: {0}")]
  Store(#[from] StoreError),

  #[error("Command failed: {0}")]
  Command(#[from] CommandError),

  #[error("Runtime error: {0}")]
  Runtime(#[from] std::io::Error),

  #[error("Serialization error: {0}")]
  Json(#[from] serde_json::Error),
}
