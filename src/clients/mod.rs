//! HTTP client types for n8n API communication.
//!
//! # Overview
//!
//! - [`HttpClient`]: the async client that executes requests
//! - [`HttpRequest`]: a request descriptor built with [`HttpRequest::builder`]
//! - [`HttpResponse`]: a buffered response
//! - [`RequestContext`]: cancellation and deadline for one call
//! - [`Transport`] / [`ReqwestTransport`]: the network boundary
//! - [`Timer`] / [`TokioTimer`]: the backoff boundary
//! - [`HttpError`] / [`ApiError`]: what a call can fail with
//!
//! # Retry Behavior
//!
//! - **429 (Rate Limited)**: retried after the `Retry-After` seconds, or 1
//!   second when the header is missing or unusable, up to [`MAX_RETRIES`]
//!   retries
//! - **Everything else non-2xx**: returned immediately
//! - **Transport failures**: returned immediately
//!
//! # Example
//!
//! ```rust,ignore
//! use n8n_api::clients::{HttpClient, HttpMethod, HttpRequest, RequestContext};
//!
//! let client = HttpClient::new(&config)?;
//! let ctx = RequestContext::background().with_timeout(Duration::from_secs(30));
//!
//! let request = HttpRequest::builder(HttpMethod::Delete, "/workflows/42").build();
//! match client.request(&ctx, request).await {
//!     Ok(()) => {}
//!     Err(e) if e.is_not_found() => {}
//!     Err(e) => return Err(e.into()),
//! }
//! ```

mod context;
mod errors;
mod http_client;
mod http_request;
mod http_response;
mod retry;
mod transport;

pub use context::{CancelHandle, RequestContext};
pub use errors::{
    is_no_content, is_not_found, ApiError, HttpError, InvalidHttpRequestError, TransportError,
    STATUS_NOT_FOUND, STATUS_NO_CONTENT, STATUS_TOO_MANY_REQUESTS,
};
pub use http_client::{HttpClient, API_KEY_HEADER, CLIENT_NAME};
pub use http_request::{HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::HttpResponse;
pub use retry::{evaluate, RetryState, Timer, TokioTimer, DEFAULT_RETRY_AFTER, MAX_RETRIES};
pub use transport::{ReqwestTransport, Transport, TransportRequest};
