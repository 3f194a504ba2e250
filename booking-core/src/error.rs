//! Error types for the booking engine

use thiserror::Error;

/// Main error type for booking operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookingError {
    /// No presented credential matched the configured secret
    #[error("Unauthorized")]
    Unauthorized,

    /// Input that cannot be coerced to a default
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for booking operations
pub type Result<T> = std::result::Result<T, BookingError>;
