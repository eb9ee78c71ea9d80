//! Domain errors

use thiserror::Error;

use crate::domain::view::ViewId;

/// Recoverable error taxonomy for the roster core.
///
/// Directory-level errors (`NotFound`, `DuplicateUsername`, `InvalidLevel`)
/// surface unchanged through the controller; controller-level errors
/// (`Unauthenticated`, `InsufficientLevel`, `Forbidden`) never leak
/// directory internals. None of these terminate the process.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Not authenticated")]
    Unauthenticated,

    #[error("Insufficient level for view: {0}")]
    InsufficientLevel(ViewId),

    #[error("Forbidden: {0}")]
    Forbidden(&'static str),

    #[error("Username already taken: {0}")]
    DuplicateUsername(String),

    #[error("Privilege level out of range: {0}")]
    InvalidLevel(u8),

    #[error("Registration is disabled")]
    RegistrationDisabled,
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
