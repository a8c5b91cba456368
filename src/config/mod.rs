//! Configuration types for the n8n API client.
//!
//! # Overview
//!
//! - [`N8nConfig`]: immutable settings shared by every request
//! - [`N8nConfigBuilder`]: a builder for constructing [`N8nConfig`] instances
//! - [`ApiKey`]: a validated credential with masked debug output
//! - [`BaseUrl`]: a validated base URL with trailing separators removed
//!
//! # Example
//!
//! ```rust
//! use n8n_api::{N8nConfig, ApiKey, BaseUrl};
//! use std::time::Duration;
//!
//! let config = N8nConfig::builder()
//!     .api_key(ApiKey::new("my-api-key").unwrap())
//!     .base_url(BaseUrl::new("https://n8n.example.com/api/v1/").unwrap())
//!     .timeout(Duration::from_secs(30))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.base_url().as_ref(), "https://n8n.example.com/api/v1");
//! ```

mod newtypes;

pub use newtypes::{ApiKey, BaseUrl};

use std::time::Duration;

use crate::error::ConfigError;

/// Default transport timeout applied to every request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5 * 60);

/// Client version from Cargo.toml, used when no version is injected.
pub const CLIENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Configuration for the n8n API client.
///
/// Built once at startup and never mutated afterwards. `N8nConfig` is
/// `Clone`, `Send` and `Sync`.
#[derive(Clone, Debug)]
pub struct N8nConfig {
    api_key: ApiKey,
    base_url: BaseUrl,
    timeout: Duration,
    client_version: String,
    user_agent_prefix: Option<String>,
}

impl N8nConfig {
    /// Creates a new builder for constructing an `N8nConfig`.
    #[must_use]
    pub fn builder() -> N8nConfigBuilder {
        N8nConfigBuilder::new()
    }

    /// Returns the API key.
    #[must_use]
    pub const fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    /// Returns the normalized base URL.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the transport timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the version embedded in the `User-Agent` header.
    #[must_use]
    pub fn client_version(&self) -> &str {
        &self.client_version
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<N8nConfig>();
};

/// Builder for constructing [`N8nConfig`] instances.
///
/// `api_key` and `base_url` are required.
///
/// # Defaults
///
/// - `timeout`: [`DEFAULT_TIMEOUT`] (5 minutes)
/// - `client_version`: [`CLIENT_VERSION`]
/// - `user_agent_prefix`: `None`
#[derive(Debug, Default)]
pub struct N8nConfigBuilder {
    api_key: Option<ApiKey>,
    base_url: Option<BaseUrl>,
    timeout: Option<Duration>,
    client_version: Option<String>,
    user_agent_prefix: Option<String>,
}

impl N8nConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API key (required).
    #[must_use]
    pub fn api_key(mut self, key: ApiKey) -> Self {
        self.api_key = Some(key);
        self
    }

    /// Sets the base URL (required).
    #[must_use]
    pub fn base_url(mut self, url: BaseUrl) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the transport timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the version reported in the `User-Agent` header.
    ///
    /// Packaging steps use this to stamp a release tag or commit id.
    #[must_use]
    pub fn client_version(mut self, version: impl Into<String>) -> Self {
        self.client_version = Some(version.into());
        self
    }

    /// Sets a prefix prepended to the `User-Agent` header.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`N8nConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `api_key` or
    /// `base_url` are not set, and [`ConfigError::EmptyClientVersion`] if an
    /// empty version was injected.
    pub fn build(self) -> Result<N8nConfig, ConfigError> {
        let api_key = self
            .api_key
            .ok_or(ConfigError::MissingRequiredField { field: "api_key" })?;
        let base_url = self
            .base_url
            .ok_or(ConfigError::MissingRequiredField { field: "base_url" })?;

        let client_version = self
            .client_version
            .unwrap_or_else(|| CLIENT_VERSION.to_string());
        if client_version.trim().is_empty() {
            return Err(ConfigError::EmptyClientVersion);
        }

        Ok(N8nConfig {
            api_key,
            base_url,
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
            client_version,
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}
