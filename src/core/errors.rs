//! Custom error types for translation operations

use thiserror::Error;

/// Translation-related errors
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Source data could not be retrieved
    #[error("Fetch error: {message}")]
    Fetch {
        /// What went wrong while retrieving the records
        message: String,
    },

    /// Batch request returned a non-success status
    #[error("Translation API error: {status} - {message}")]
    Service {
        /// HTTP status code returned by the endpoint
        status: u16,
        /// Response body text
        message: String,
    },

    /// Success response body did not match the expected shape
    #[error("Invalid translation response: {message}")]
    Protocol {
        /// Description of the malformed payload
        message: String,
    },

    /// File operation error
    #[error("File error: {path} - {message}")]
    File {
        /// Path involved in the failed operation
        path: String,
        /// Underlying error text
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// What is wrong with the configuration
        message: String,
    },

    /// HTTP client error
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<anyhow::Error> for TranslationError {
    fn from(err: anyhow::Error) -> Self {
        TranslationError::Config {
            message: err.to_string(),
        }
    }
}

/// Result type for translation operations
pub type Result<T> = std::result::Result<T, TranslationError>;
