//! Error types for the relata referral engine.

use thiserror::Error;

/// Result type alias using relata's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for relata operations.
///
/// Every variant is recoverable by the caller; none is fatal to the process.
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed or unresolvable input (unknown contact, archived job, empty
    /// response content, invariant-violating analytics input).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Referral request not found
    #[error("Referral request not found: {0}")]
    RequestNotFound(uuid::Uuid),

    /// Resource not found (template, contact, job)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Attempted mutation of a received request
    #[error("Immutable state: {0}")]
    ImmutableState(String),

    /// State machine transition attempted from a state that does not permit it
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    /// Message personalization backend failed
    #[error("Personalization error: {0}")]
    Personalization(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// HTTP/network request failed
    #[error("Request error: {0}")]
    Request(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Request(e.to_string())
    }
}
