//! HTTP request types for the n8n API client.
//!
//! This module provides the [`HttpRequest`] descriptor and its builder.

use std::fmt;

use serde::Serialize;

use crate::clients::errors::InvalidHttpRequestError;

/// HTTP methods used by the n8n API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    /// HTTP GET method for retrieving resources.
    Get,
    /// HTTP POST method for creating resources and triggering actions.
    Post,
    /// HTTP PUT method for replacing resources.
    Put,
    /// HTTP PATCH method for partial updates.
    Patch,
    /// HTTP DELETE method for removing resources.
    Delete,
}

impl HttpMethod {
    /// Returns the method as it appears on the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request to be sent to the n8n API.
///
/// Created per call and consumed by [`HttpClient`](super::HttpClient).
///
/// # Example
///
/// ```rust
/// use n8n_api::clients::{HttpRequest, HttpMethod};
/// use serde_json::json;
///
/// let list = HttpRequest::builder(HttpMethod::Get, "/workflows").build();
///
/// let create = HttpRequest::builder(HttpMethod::Post, "/workflows")
///     .body(json!({"name": "Nightly sync", "nodes": [], "connections": {}}))
///     .error_on_empty_body(true)
///     .build();
///
/// assert!(list.body.is_none());
/// assert!(create.error_on_empty_body);
/// ```
#[derive(Clone, Debug)]
pub struct HttpRequest {
    /// The HTTP method for this request.
    pub http_method: HttpMethod,
    /// The path appended to the base URL (e.g., "/workflows/123").
    pub path: String,
    /// The JSON request body, if any.
    pub body: Option<serde_json::Value>,
    /// Treat a 204 response as an error instead of an empty success.
    pub error_on_empty_body: bool,
}

impl HttpRequest {
    /// Creates a new builder for constructing an `HttpRequest`.
    #[must_use]
    pub fn builder(method: HttpMethod, path: impl Into<String>) -> HttpRequestBuilder {
        HttpRequestBuilder::new(method, path)
    }
}

/// Builder for constructing [`HttpRequest`] instances.
#[derive(Debug)]
pub struct HttpRequestBuilder {
    http_method: HttpMethod,
    path: String,
    body: Option<serde_json::Value>,
    error_on_empty_body: bool,
}

impl HttpRequestBuilder {
    fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            http_method: method,
            path: path.into(),
            body: None,
            error_on_empty_body: false,
        }
    }

    /// Sets the request body from a JSON value.
    #[must_use]
    pub fn body(mut self, body: impl Into<serde_json::Value>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Serializes `payload` and uses it as the request body.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError::BodySerialization`] if the payload
    /// cannot be represented as JSON.
    pub fn json<T: Serialize + ?Sized>(
        mut self,
        payload: &T,
    ) -> Result<Self, InvalidHttpRequestError> {
        let value = serde_json::to_value(payload).map_err(|e| {
            InvalidHttpRequestError::BodySerialization {
                message: e.to_string(),
            }
        })?;
        self.body = Some(value);
        Ok(self)
    }

    /// Treat a 204 response as an error.
    ///
    /// Default is `false`, where 204 is an empty success.
    #[must_use]
    pub const fn error_on_empty_body(mut self, enabled: bool) -> Self {
        self.error_on_empty_body = enabled;
        self
    }

    /// Builds the [`HttpRequest`].
    #[must_use]
    pub fn build(self) -> HttpRequest {
        HttpRequest {
            http_method: self.http_method,
            path: self.path,
            body: self.body,
            error_on_empty_body: self.error_on_empty_body,
        }
    }
}
