// models/src/errors.rs

pub use thiserror::Error;

/// Error taxonomy shared across the clinic API crates.
///
/// `Validation` and `NotFound` are surfaced to the caller as-is and never
/// retried. `StorageUnavailable` marks a transient store failure; the only
/// component that retries on it is the sequence allocator, and only once.
#[derive(Debug, Error)]
pub enum ClinicError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),
    #[error("storage error: {0}")]
    Storage(String),
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl ClinicError {
    /// Malformed identifier in a path segment or payload.
    pub fn invalid_id(entity: &str) -> Self {
        ClinicError::Validation(format!("Invalid {} ID format", entity))
    }

    /// Referenced record absent from its collection.
    pub fn not_found(entity: &str, id: impl std::fmt::Display) -> Self {
        ClinicError::NotFound(format!("{} with ID {} not found", entity, id))
    }
}

impl From<serde_json::Error> for ClinicError {
    fn from(err: serde_json::Error) -> Self {
        ClinicError::Serialization(format!("JSON processing error: {}", err))
    }
}

/// A type alias for a `Result` that returns a `ClinicError` on failure.
pub type ClinicResult<T> = Result<T, ClinicError>;
