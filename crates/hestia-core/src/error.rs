use thiserror::Error;

/// Application-wide error types for Hestia.
#[derive(Error, Debug)]
pub enum AppError {
    /// HTTP request failed (non-success status or transport error).
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// Request timed out.
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    /// Network/connection error.
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Fetch target is outside the allowed-domain list.
    #[error("Domain not allowed: {0}")]
    DomainNotAllowed(String),

    /// Fetch target could not be parsed as a URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A CSS selector failed to compile.
    #[error("Selector error: {0}")]
    SelectorError(String),

    /// JSON serialization failed.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Generic error.
    #[error("{0}")]
    Generic(String),
}

impl AppError {
    /// Returns true if this error fails a single fetch rather than the run.
    ///
    /// The crawl continues past recoverable errors: the affected listing
    /// simply stays unenriched (or is never created). Only configuration
    /// and output errors abort.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            AppError::HttpError(_)
                | AppError::Timeout(_)
                | AppError::NetworkError(_)
                | AppError::DomainNotAllowed(_)
                | AppError::InvalidUrl(_)
        )
    }
}
