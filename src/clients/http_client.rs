//! HTTP client for n8n API communication.
//!
//! This module provides the [`HttpClient`] type for making authenticated
//! requests to the n8n API with automatic rate-limit retry handling.

use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::clients::context::RequestContext;
use crate::clients::errors::{HttpError, InvalidHttpRequestError};
use crate::clients::http_request::HttpRequest;
use crate::clients::http_response::HttpResponse;
use crate::clients::retry::{self, RetryState, Timer, TokioTimer, MAX_RETRIES};
use crate::clients::transport::{ReqwestTransport, Transport, TransportRequest};
use crate::config::{BaseUrl, N8nConfig};
use crate::error::ConfigError;

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "X-N8N-API-KEY";

/// Client name reported in the `User-Agent` header.
pub const CLIENT_NAME: &str = "n8n-rust";

/// HTTP client for making requests to the n8n API.
///
/// The client handles:
/// - URL construction from the normalized base URL
/// - Default headers including `User-Agent` and the API key
/// - Retrying 429 responses, honoring `Retry-After`
/// - Decoding the `{"error":{...}}` envelope into [`ApiError`](super::ApiError)
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync` and holds no per-request state, so one
/// instance can serve many concurrent calls.
///
/// # Example
///
/// ```rust,ignore
/// use n8n_api::{ApiKey, BaseUrl, N8nConfig};
/// use n8n_api::clients::{HttpClient, HttpMethod, HttpRequest, RequestContext};
///
/// let config = N8nConfig::builder()
///     .api_key(ApiKey::new("my-key")?)
///     .base_url(BaseUrl::new("https://n8n.example.com/api/v1")?)
///     .build()?;
/// let client = HttpClient::new(&config)?;
///
/// let request = HttpRequest::builder(HttpMethod::Get, "/workflows/42").build();
/// let workflow: Option<Workflow> = client
///     .request_json(&RequestContext::background(), request)
///     .await?;
/// ```
#[derive(Debug)]
pub struct HttpClient {
    transport: Arc<dyn Transport>,
    timer: Arc<dyn Timer>,
    base_url: BaseUrl,
    default_headers: Vec<(String, String)>,
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a client using a reqwest transport with the configured timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::HttpClientBuild`] if the transport cannot be created.
    pub fn new(config: &N8nConfig) -> Result<Self, ConfigError> {
        let transport = ReqwestTransport::new(config.timeout())?;
        Ok(Self::with_transport(config, transport))
    }

    /// Creates a client that sends through `transport`.
    #[must_use]
    pub fn with_transport(config: &N8nConfig, transport: impl Transport + 'static) -> Self {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let user_agent = format!(
            "{user_agent_prefix}{CLIENT_NAME}/{}",
            config.client_version()
        );

        let default_headers = vec![
            ("User-Agent".to_string(), user_agent),
            ("Accept".to_string(), "application/json".to_string()),
            (
                API_KEY_HEADER.to_string(),
                config.api_key().as_ref().to_string(),
            ),
        ];

        Self {
            transport: Arc::new(transport),
            timer: Arc::new(TokioTimer),
            base_url: config.base_url().clone(),
            default_headers,
        }
    }

    /// Replaces the timer used for rate-limit backoff.
    #[must_use]
    pub fn with_timer(mut self, timer: impl Timer + 'static) -> Self {
        self.timer = Arc::new(timer);
        self
    }

    /// Returns the normalized base URL.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the headers sent with every request.
    #[must_use]
    pub fn default_headers(&self) -> &[(String, String)] {
        &self.default_headers
    }

    /// Sends a request and discards any response body.
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub async fn request(
        &self,
        ctx: &RequestContext,
        request: HttpRequest,
    ) -> Result<(), HttpError> {
        self.execute(ctx, &request).await.map(|_| ())
    }

    /// Sends a request and decodes a 2xx body into `T`.
    ///
    /// Returns `Ok(None)` for a 204 when the request tolerates empty bodies.
    ///
    /// # Errors
    ///
    /// Everything [`execute`](Self::execute) returns, plus
    /// [`HttpError::Decode`] with the raw bytes if the body is not valid JSON
    /// for `T`.
    pub async fn request_json<T: DeserializeOwned>(
        &self,
        ctx: &RequestContext,
        request: HttpRequest,
    ) -> Result<Option<T>, HttpError> {
        let Some(response) = self.execute(ctx, &request).await? else {
            return Ok(None);
        };

        match serde_json::from_slice(&response.body) {
            Ok(value) => Ok(Some(value)),
            Err(source) => Err(HttpError::Decode {
                source,
                raw: response.body,
            }),
        }
    }

    /// Sends a request, retrying rate-limited responses.
    ///
    /// Returns the raw 2xx response, or `None` for a tolerated 204.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - The body cannot be serialized (`InvalidRequest`)
    /// - The transport fails (`Transport`), never retried
    /// - The context is cancelled or expires (`Cancelled`, `DeadlineExceeded`)
    /// - A non-2xx response is received, or a 429 persists past
    ///   [`MAX_RETRIES`] retries (`Api`)
    #[tracing::instrument(
        skip(self, ctx, request),
        fields(method = %request.http_method, path = %request.path)
    )]
    pub async fn execute(
        &self,
        ctx: &RequestContext,
        request: &HttpRequest,
    ) -> Result<Option<HttpResponse>, HttpError> {
        let outgoing = self.build_request(request)?;

        let mut state = RetryState::Sending { attempt: 0 };
        loop {
            state = match state {
                RetryState::Sending { attempt } => {
                    tracing::debug!(url = %outgoing.url, attempt, "sending request");
                    let response = ctx.run(self.transport.send(&outgoing)).await??;
                    RetryState::Evaluating { attempt, response }
                }
                RetryState::Evaluating { attempt, response } => {
                    retry::evaluate(attempt, response, request.error_on_empty_body)
                }
                RetryState::Backoff {
                    attempt,
                    delay,
                    error,
                } => {
                    tracing::warn!(
                        retry_after = ?delay,
                        attempt = attempt + 1,
                        max_retries = MAX_RETRIES,
                        code = %error.code,
                        "rate limit hit, retrying"
                    );
                    ctx.run(self.timer.sleep(delay)).await?;
                    RetryState::Sending {
                        attempt: attempt + 1,
                    }
                }
                RetryState::Done(response) => return Ok(response),
                RetryState::Failed(error) => return Err(HttpError::Api(error)),
            };
        }
    }

    fn build_request(&self, request: &HttpRequest) -> Result<TransportRequest, HttpError> {
        let mut headers = self.default_headers.clone();

        let body = match &request.body {
            Some(value) => {
                headers.push(("Content-Type".to_string(), "application/json".to_string()));
                let bytes = serde_json::to_vec(value).map_err(|e| {
                    InvalidHttpRequestError::BodySerialization {
                        message: e.to_string(),
                    }
                })?;
                Some(bytes)
            }
            None => None,
        };

        Ok(TransportRequest {
            method: request.http_method,
            url: self.base_url.join(&request.path),
            headers,
            body,
        })
    }
}
