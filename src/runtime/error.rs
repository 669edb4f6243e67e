//! Error types for the runtime.

use crate::config::ConfigError;
use crate::model::BarberId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Unknown barber: {0}")]
    UnknownBarber(BarberId),

    /// A client or barber task panicked or was aborted.
    #[error("Task failed: {0}")]
    TaskFailed(String),
}
