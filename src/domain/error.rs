//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent failed lookups in a forest.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("item not found: {0}")]
    NotFound(String),
}

impl DomainError {
    pub(crate) fn not_found(id: &str) -> Self {
        Self::NotFound(id.to_string())
    }
}

/// Result type for forest lookups.
pub type DomainResult<T> = Result<T, DomainError>;
