//! Custom error types for the application.
//!
//! - [`FetchError`] - Network/fetch-related errors for HTTP requests
//! - [`StorageError`] - localStorage operations for the home info cache
//! - [`HomeInfoError`] - What the provider publishes through its `error` signal

use thiserror::Error;

/// Network/fetch-related errors for HTTP requests.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    /// Browser window not available
    #[error("Browser window not available")]
    NoWindow,
    /// Failed to create HTTP request
    #[error("Failed to create request")]
    RequestCreationFailed,
    /// Network request failed (CORS, offline, etc.)
    #[error("Network error: {0}")]
    NetworkError(String),
    /// HTTP error response (non-2xx status)
    #[error("HTTP error: {0}")]
    HttpError(u16),
    /// Failed to read response body
    #[error("Failed to read response")]
    ResponseReadFailed,
    /// Invalid response content (not text)
    #[error("Invalid response content")]
    InvalidContent,
    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonParseError(String),
    /// Request timed out
    #[error("Request timed out")]
    Timeout,
}

/// Key/value store errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StorageError {
    /// localStorage not available.
    #[error("localStorage not available")]
    StorageUnavailable,
    /// Failed to serialize data to JSON.
    #[error("failed to serialize cache entry")]
    SerializationFailed,
    /// Failed to write to storage.
    #[error("failed to write to localStorage")]
    WriteFailed,
}

/// Error surfaced to home info consumers.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HomeInfoError {
    /// The fetch collaborator failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),
    /// The fetch succeeded but produced no payload.
    #[error("No results found")]
    NotFound,
}
