//! # n8n API Rust Client
//!
//! An async client for the n8n REST API: authenticated requests, JSON
//! decoding, the `{"error":{...}}` envelope, and transparent retries for
//! rate-limited responses.
//!
//! ## Quick Start
//!
//! ```rust
//! use n8n_api::{ApiKey, BaseUrl, N8nConfig};
//!
//! let config = N8nConfig::builder()
//!     .api_key(ApiKey::new("your-api-key").unwrap())
//!     .base_url(BaseUrl::new("https://n8n.example.com/api/v1").unwrap())
//!     .build()
//!     .unwrap();
//! ```
//!
//! ## Making API Requests
//!
//! ```rust,ignore
//! use n8n_api::{HttpClient, HttpMethod, HttpRequest, RequestContext};
//!
//! let client = HttpClient::new(&config)?;
//!
//! let request = HttpRequest::builder(HttpMethod::Get, "/workflows").build();
//! let workflows: Option<serde_json::Value> = client
//!     .request_json(&RequestContext::background(), request)
//!     .await?;
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: the client version is injected through [`N8nConfig`]
//! - **Fail-fast validation**: newtypes validate on construction
//! - **Thread-safe**: [`HttpClient`] is `Send + Sync` and can be shared
//! - **Async-first**: designed for the Tokio runtime
//!
//! The crate emits `tracing` events (rate-limit retries at `warn`, request
//! attempts at `debug`); installing a subscriber is left to the application.

pub mod clients;
pub mod config;
pub mod error;

pub use config::{ApiKey, BaseUrl, N8nConfig, N8nConfigBuilder};
pub use error::ConfigError;

pub use clients::{
    is_no_content, is_not_found, ApiError, HttpClient, HttpError, HttpMethod, HttpRequest,
    HttpRequestBuilder, HttpResponse, RequestContext, Transport,
};
