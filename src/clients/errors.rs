//! HTTP-specific error types for the n8n API client.
//!
//! - [`ApiError`]: the service answered with a non-2xx status (or a 204 when
//!   content was required)
//! - [`TransportError`]: the request never produced a response
//! - [`InvalidHttpRequestError`]: the request could not be built
//! - [`HttpError`]: unified error type returned by [`HttpClient`](super::HttpClient)
//!
//! # Example
//!
//! ```rust,ignore
//! use n8n_api::clients::HttpError;
//!
//! match client.request(&ctx, request).await {
//!     Ok(()) => println!("deleted"),
//!     Err(err) if err.is_not_found() => println!("already gone"),
//!     Err(HttpError::Api(e)) => println!("API error {}: {}", e.status, e),
//!     Err(other) => return Err(other.into()),
//! }
//! ```

use std::borrow::Cow;
use std::time::Duration;

use thiserror::Error;

/// Status code used for "not found" responses.
pub const STATUS_NOT_FOUND: u16 = 404;
/// Status code used for "no content" responses.
pub const STATUS_NO_CONTENT: u16 = 204;
/// Status code used for rate-limited responses.
pub const STATUS_TOO_MANY_REQUESTS: u16 = 429;

/// Error returned when the n8n API answers with a non-successful status.
///
/// `code` and `message` come from the `{"error":{"code":..,"message":..}}`
/// envelope when the body has one; otherwise they stay empty and `raw` is
/// the only payload.
///
/// # Example
///
/// ```rust
/// use n8n_api::clients::ApiError;
///
/// let error = ApiError::from_response(
///     404,
///     br#"{"error":{"code":"not_found","message":"workflow not found"}}"#.to_vec(),
/// );
///
/// assert_eq!(error.status, 404);
/// assert_eq!(error.to_string(), "not_found - workflow not found");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Error)]
#[error("{code} - {message}")]
pub struct ApiError {
    /// Machine-readable error code from the envelope.
    pub code: String,
    /// Human-readable error message from the envelope.
    pub message: String,
    /// The HTTP status code of the response.
    pub status: u16,
    /// The raw response body.
    pub raw: Vec<u8>,
    /// Delay suggested by the server before retrying (429 only).
    pub retry_after: Option<Duration>,
}

impl ApiError {
    /// Builds an error from a response status and body.
    ///
    /// The envelope is parsed best-effort. A malformed or missing envelope
    /// leaves `code` and `message` empty.
    #[must_use]
    pub fn from_response(status: u16, raw: Vec<u8>) -> Self {
        let mut error = Self {
            status,
            raw,
            ..Self::default()
        };

        match serde_json::from_slice::<serde_json::Value>(&error.raw) {
            Ok(body) => {
                if let Some(envelope) = body.get("error") {
                    error.code = envelope_field(envelope, "code");
                    error.message = envelope_field(envelope, "message");
                }
            }
            Err(e) => {
                tracing::debug!(status, error = %e, "error body is not a JSON envelope");
            }
        }

        error
    }

    /// The error returned for a 204 response when content was required.
    #[must_use]
    pub fn no_content() -> Self {
        Self {
            code: "no_content".to_string(),
            message: "no content".to_string(),
            status: STATUS_NO_CONTENT,
            ..Self::default()
        }
    }

    /// Returns the raw body as text, replacing invalid UTF-8.
    #[must_use]
    pub fn raw_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.raw)
    }
}

/// Reads a string field from the error envelope.
///
/// Non-string scalars (e.g. numeric codes) are rendered as JSON text.
fn envelope_field(envelope: &serde_json::Value, key: &str) -> String {
    match envelope.get(key) {
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(serde_json::Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

/// Error returned when a request could not be delivered or answered.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network or connection error reported by reqwest.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Failure reported by a custom transport.
    #[error("Transport error: {message}")]
    Other {
        /// Description of the failure.
        message: String,
    },
}

/// Error returned when a request cannot be built before sending.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// The request body could not be serialized to JSON.
    #[error("Failed to serialize request body: {message}")]
    BodySerialization {
        /// The serializer's error message.
        message: String,
    },
}

/// Unified error type for all request failures.
///
/// Rate-limited responses within the retry budget never surface here; the
/// caller only sees the final outcome.
#[derive(Debug, Error)]
pub enum HttpError {
    /// The service returned a non-2xx status, or 204 when content was required.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The request could not be delivered.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The request could not be built.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// A 2xx body could not be decoded into the requested type.
    #[error("decoding response: {source}; raw: {}", String::from_utf8_lossy(.raw))]
    Decode {
        /// The JSON decoding error.
        source: serde_json::Error,
        /// The raw response body.
        raw: Vec<u8>,
    },

    /// The request context was cancelled.
    #[error("request cancelled")]
    Cancelled,

    /// The request context deadline passed.
    #[error("request deadline exceeded")]
    DeadlineExceeded,
}

impl HttpError {
    /// Returns the HTTP status for service errors.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api(e) => Some(e.status),
            _ => None,
        }
    }

    /// Returns the service error, if this is one.
    #[must_use]
    pub const fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api(e) => Some(e),
            _ => None,
        }
    }

    /// Returns `true` for a service error with status 404.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(STATUS_NOT_FOUND)
    }

    /// Returns `true` for a service error with status 204.
    #[must_use]
    pub fn is_no_content(&self) -> bool {
        self.status() == Some(STATUS_NO_CONTENT)
    }

    /// Returns `true` for a service error with status 429.
    #[must_use]
    pub fn is_rate_limited(&self) -> bool {
        self.status() == Some(STATUS_TOO_MANY_REQUESTS)
    }
}

/// Returns `true` if `err` is a 404 service error.
///
/// Resource helpers use this to treat a missing resource as absence.
#[must_use]
pub fn is_not_found(err: &HttpError) -> bool {
    err.is_not_found()
}

/// Returns `true` if `err` is a 204 service error.
#[must_use]
pub fn is_no_content(err: &HttpError) -> bool {
    err.is_no_content()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_parses_envelope() {
        let error = ApiError::from_response(
            400,
            br#"{"error":{"code":"bad_request","message":"name is required"}}"#.to_vec(),
        );

        assert_eq!(error.status, 400);
        assert_eq!(error.code, "bad_request");
        assert_eq!(error.message, "name is required");
        assert!(error.retry_after.is_none());
    }

    #[test]
    fn test_api_error_keeps_raw_body_when_envelope_is_malformed() {
        let error = ApiError::from_response(502, b"<html>Bad Gateway</html>".to_vec());

        assert_eq!(error.status, 502);
        assert!(error.code.is_empty());
        assert!(error.message.is_empty());
        assert_eq!(error.raw_text(), "<html>Bad Gateway</html>");
    }

    #[test]
    fn test_api_error_ignores_json_without_error_key() {
        let error = ApiError::from_response(500, br#"{"message":"boom"}"#.to_vec());

        assert!(error.code.is_empty());
        assert!(error.message.is_empty());
        assert_eq!(error.raw, br#"{"message":"boom"}"#.to_vec());
    }

    #[test]
    fn test_api_error_renders_numeric_code() {
        let error = ApiError::from_response(
            409,
            br#"{"error":{"code":409,"message":"conflict"}}"#.to_vec(),
        );

        assert_eq!(error.code, "409");
        assert_eq!(error.message, "conflict");
    }

    #[test]
    fn test_api_error_display_format() {
        let error = ApiError {
            code: "rate_limit".to_string(),
            message: "too many requests".to_string(),
            status: 429,
            ..ApiError::default()
        };
        assert_eq!(error.to_string(), "rate_limit - too many requests");
    }

    #[test]
    fn test_no_content_error() {
        let error = ApiError::no_content();
        assert_eq!(error.status, 204);
        assert_eq!(error.code, "no_content");
        assert_eq!(error.message, "no content");
        assert!(error.raw.is_empty());
    }

    #[test]
    fn test_not_found_predicate_only_matches_404_service_errors() {
        let not_found = HttpError::Api(ApiError::from_response(404, Vec::new()));
        let forbidden = HttpError::Api(ApiError::from_response(403, Vec::new()));
        let transport = HttpError::Transport(TransportError::Other {
            message: "connection refused".to_string(),
        });

        assert!(is_not_found(&not_found));
        assert!(!is_not_found(&forbidden));
        assert!(!is_not_found(&transport));
        assert!(!is_not_found(&HttpError::Cancelled));
    }

    #[test]
    fn test_status_accessor() {
        let error = HttpError::Api(ApiError::no_content());
        assert_eq!(error.status(), Some(204));
        assert!(is_no_content(&error));
        assert!(HttpError::DeadlineExceeded.status().is_none());
    }

    #[test]
    fn test_decode_error_includes_raw_body() {
        let source = serde_json::from_slice::<serde_json::Value>(b"not json").unwrap_err();
        let error = HttpError::Decode {
            source,
            raw: b"not json".to_vec(),
        };

        assert!(error.to_string().contains("raw: not json"));
    }

    #[test]
    fn test_error_types_implement_std_error() {
        let api_error: &dyn std::error::Error = &ApiError::no_content();
        let _ = api_error;

        let invalid: &dyn std::error::Error = &InvalidHttpRequestError::BodySerialization {
            message: "key must be a string".to_string(),
        };
        let _ = invalid;
    }
}
