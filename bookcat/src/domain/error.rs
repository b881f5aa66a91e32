//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent violations of the catalog tree invariants.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("duplicate ISBN in catalog: {0}")]
    DuplicateIsbn(String),

    #[error("invalid book '{isbn}': {message}")]
    InvalidBook { isbn: String, message: String },
}
