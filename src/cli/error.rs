//! CLI-level errors (wraps infrastructure errors)

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;
use crate::infrastructure::{InfraError, StoreError};

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Infra(#[from] InfraError),
}

impl From<ApplicationError> for CliError {
    fn from(e: ApplicationError) -> Self {
        CliError::Infra(InfraError::Application(e))
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Infra(e) => match e {
                InfraError::Io { .. } => crate::exitcode::IOERR,
                InfraError::Store(StoreError::Constraint { .. }) => crate::exitcode::DATAERR,
                InfraError::Store(_) => crate::exitcode::UNAVAILABLE,
                InfraError::Application(e) => match e {
                    ApplicationError::Domain(DomainError::InvalidNode { .. })
                    | ApplicationError::Domain(DomainError::CycleDetected(_))
                    | ApplicationError::Parse { .. } => crate::exitcode::DATAERR,
                    ApplicationError::InputNotFound(_) => crate::exitcode::NOINPUT,
                    ApplicationError::Config { .. } => crate::exitcode::CONFIG,
                    ApplicationError::Store {
                        source: StoreError::Constraint { .. },
                        ..
                    } => crate::exitcode::DATAERR,
                    ApplicationError::Store { .. } => crate::exitcode::UNAVAILABLE,
                    ApplicationError::OperationFailed { .. } => crate::exitcode::IOERR,
                },
            },
        }
    }
}
