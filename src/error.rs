//! Client error types.

use thiserror::Error;

/// Client error type.
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// URL parsing failed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Login was rejected by the server.
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Caller addressed a namespace-only node, an unknown access path, or
    /// supplied the wrong number of positional arguments.
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// Server response carried an `error` envelope.
    #[error("API error ({error_type}): {error}")]
    Api {
        /// `errorType` field from the response, `"unknown"` when absent.
        error_type: String,
        /// `error` message from the response.
        error: String,
    },

    /// Response body was not valid JSON.
    #[error("Malformed response (HTTP {status}): {body}")]
    MalformedResponse {
        /// HTTP status code of the response.
        status: u16,
        /// Raw body text, for diagnosis.
        body: String,
    },

    /// Successful response was missing the descriptor's result key.
    #[error("Response missing result key `{key}`")]
    MissingResultKey {
        /// Key the descriptor expected to extract.
        key: &'static str,
    },

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Check if this is an authentication error.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Error::Authentication(_))
    }

    /// Check if this is a usage error against the registry.
    pub fn is_invalid_endpoint(&self) -> bool {
        matches!(self, Error::InvalidEndpoint(_))
    }

    /// Check if this is an error envelope returned by the service.
    pub fn is_api_error(&self) -> bool {
        matches!(self, Error::Api { .. })
    }

    /// Check if this is an undecodable or incomplete response.
    pub fn is_malformed_response(&self) -> bool {
        matches!(
            self,
            Error::MalformedResponse { .. } | Error::MissingResultKey { .. }
        )
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, Error>;
