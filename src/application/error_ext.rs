//! Error conversion helpers for document I/O
//!
//! Provides extension traits for cleaner error handling with path or document context.

use std::io;
use std::path::Path;

use crate::application::{ApplicationError, ApplicationResult};

/// Extension trait for converting `io::Result` to `ApplicationResult` with context.
pub trait IoResultExt<T> {
    /// Add path context to an I/O error.
    ///
    /// # Example
    /// ```ignore
    /// fs.read_to_string(&path)
    ///     .with_path_context("read document", &path)?;
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

/// Extension trait for turning JSON (de)serialization failures into
/// `InvalidDocument` errors naming the document.
pub trait JsonResultExt<T> {
    fn with_document(self, name: &str) -> ApplicationResult<T>;
}

impl<T> JsonResultExt<T> for serde_json::Result<T> {
    fn with_document(self, name: &str) -> ApplicationResult<T> {
        self.map_err(|e| ApplicationError::InvalidDocument {
            name: name.to_string(),
            message: e.to_string(),
        })
    }
}
