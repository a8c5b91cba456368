//! Configuration error types for the n8n API client.
//!
//! All configuration constructors return `Result<T, ConfigError>` so that a
//! misconfigured client fails at startup rather than on the first request.
//!
//! # Example
//!
//! ```rust
//! use n8n_api::{ApiKey, ConfigError};
//!
//! let result = ApiKey::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyApiKey)));
//! ```

use thiserror::Error;

/// Errors that can occur while building client configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// API key cannot be empty.
    #[error("API key cannot be empty. Please provide a valid n8n API key.")]
    EmptyApiKey,

    /// Base URL is invalid.
    #[error("Invalid base URL '{url}'. Please provide a URL with scheme and host (e.g., 'https://n8n.example.com/api/v1').")]
    InvalidBaseUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// The client version string is empty.
    #[error("Client version cannot be empty.")]
    EmptyClientVersion,

    /// The underlying HTTP transport could not be created.
    #[error("Failed to create HTTP transport: {reason}")]
    HttpClientBuild {
        /// Why the transport failed to build.
        reason: String,
    },
}
