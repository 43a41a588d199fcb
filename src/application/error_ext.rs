//! Error conversion helpers for common I/O and store operations
//!
//! Provides extension traits for cleaner error handling with context.

use std::io;
use std::path::Path;

use crate::application::{ApplicationError, ApplicationResult};
use crate::infrastructure::store::StoreResult;

/// Extension trait for converting `io::Result` to `ApplicationResult` with context.
pub trait IoResultExt<T> {
    /// Add path context to an I/O error.
    ///
    /// # Example
    /// ```ignore
    /// fs.read_to_string(&path)
    ///     .with_path_context("read import file", &path)?;
    /// ```
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T> {
        self.map_err(|e| ApplicationError::OperationFailed {
            context: format!("{}: {}", action, path.display()),
            source: Box::new(e),
        })
    }
}

/// Extension trait for converting `StoreResult` to `ApplicationResult` with context.
pub trait StoreResultExt<T> {
    fn with_store_context(self, action: impl FnOnce() -> String) -> ApplicationResult<T>;
}

impl<T> StoreResultExt<T> for StoreResult<T> {
    fn with_store_context(self, action: impl FnOnce() -> String) -> ApplicationResult<T> {
        self.map_err(|source| ApplicationError::Store {
            context: action(),
            source,
        })
    }
}
