//! Application-level errors (wraps domain errors)

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::DomainError;
use crate::infrastructure::store::StoreError;

/// Application errors wrap domain errors and add application-level context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("config error: {message}")]
    Config { message: String },

    #[error("input file not found: {0}")]
    InputNotFound(PathBuf),

    #[error("malformed import data: {context}")]
    Parse {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{context}")]
    Store {
        context: String,
        #[source]
        source: StoreError,
    },

    #[error("operation failed: {context}")]
    OperationFailed {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
