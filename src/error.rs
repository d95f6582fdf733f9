//! Error types for the sitesearch library

use thiserror::Error;

/// Result type alias for sitesearch operations
pub type SiteSearchResult<T> = std::result::Result<T, SiteSearchError>;

/// Error types for search-launch and site maintenance operations
#[derive(Error, Debug, Clone)]
pub enum SiteSearchError {
    /// Invalid input parameters
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Parsing error (HTML, JSON, dates)
    #[error("Parsing error: {0}")]
    ParseError(String),

    /// Filesystem or terminal IO failed
    #[error("IO error: {0}")]
    Io(String),

    /// Generic error for unhandled cases
    #[error("Site search error: {0}")]
    Other(String),
}

impl From<serde_json::Error> for SiteSearchError {
    fn from(error: serde_json::Error) -> Self {
        SiteSearchError::ParseError(format!("JSON parsing failed: {error}"))
    }
}

impl From<url::ParseError> for SiteSearchError {
    fn from(error: url::ParseError) -> Self {
        SiteSearchError::InvalidInput(format!("Invalid URL: {error}"))
    }
}

impl From<chrono::ParseError> for SiteSearchError {
    fn from(error: chrono::ParseError) -> Self {
        SiteSearchError::ParseError(format!("Date parsing failed: {error}"))
    }
}

impl From<std::io::Error> for SiteSearchError {
    fn from(error: std::io::Error) -> Self {
        SiteSearchError::Io(error.to_string())
    }
}
