use std::result::Result as StdResult;

use alpha_config::ConfigError;
use alpha_core::CoreError;
use thiserror::Error;

/// Unified error type for core/domain/storage layers.
#[derive(Error, Debug)]
pub enum PointsError {
    #[error("Account not found: {0}")]
    AccountNotFound(String),
    #[error("Persistence error: {0}")]
    StorageError(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = StdResult<T, PointsError>;

/// User-facing CLI error wrapper.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] PointsError),
    #[error("Invalid input: {0}")]
    Input(String),
    #[error("Command failed: {0}")]
    Command(String),
}

impl From<CoreError> for PointsError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::AccountNotFound(key) => PointsError::AccountNotFound(key),
            CoreError::InvalidOperation(message) | CoreError::Validation(message) => {
                PointsError::InvalidInput(message)
            }
            CoreError::Storage(message) | CoreError::Serde(message) => {
                PointsError::StorageError(message)
            }
            CoreError::Io(err) => PointsError::StorageError(err.to_string()),
        }
    }
}

impl From<ConfigError> for PointsError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Io(io) => PointsError::StorageError(io.to_string()),
            ConfigError::Serde(message) => PointsError::ConfigError(message),
        }
    }
}

impl From<std::io::Error> for PointsError {
    fn from(err: std::io::Error) -> Self {
        PointsError::StorageError(err.to_string())
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        CliError::from(PointsError::from(err))
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        CliError::from(PointsError::from(err))
    }
}
