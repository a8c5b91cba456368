//! Validated newtype wrappers for configuration values.
//!
//! Values are checked on construction so that the HTTP client never has to
//! deal with an empty credential or a malformed base URL.

use crate::error::ConfigError;
use std::fmt;

/// A validated n8n API key.
///
/// The key is sent verbatim in the `X-N8N-API-KEY` header. Its `Debug`
/// output is masked so it never ends up in logs.
///
/// # Example
///
/// ```rust
/// use n8n_api::ApiKey;
///
/// let key = ApiKey::new("my-api-key").unwrap();
/// assert_eq!(key.as_ref(), "my-api-key");
/// assert_eq!(format!("{:?}", key), "ApiKey(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Creates a new validated API key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyApiKey`] if the key is empty or whitespace.
    pub fn new(key: impl Into<String>) -> Result<Self, ConfigError> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(ConfigError::EmptyApiKey);
        }
        Ok(Self(key))
    }
}

impl AsRef<str> for ApiKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(*****)")
    }
}

/// A validated base URL for the n8n API.
///
/// Trailing `/` separators are stripped once at construction, so request
/// paths (which start with `/`) can be appended directly.
///
/// # Example
///
/// ```rust
/// use n8n_api::BaseUrl;
///
/// let url = BaseUrl::new("https://n8n.example.com/api/v1//").unwrap();
/// assert_eq!(url.as_ref(), "https://n8n.example.com/api/v1");
/// assert_eq!(url.join("/workflows"), "https://n8n.example.com/api/v1/workflows");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseUrl {
    url: String,
    scheme_end: usize,
}

impl BaseUrl {
    /// Creates a new validated base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if the URL has no scheme or host.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let url = url.trim().trim_end_matches('/').to_string();

        let scheme_end = url
            .find("://")
            .ok_or_else(|| ConfigError::InvalidBaseUrl { url: url.clone() })?;

        let scheme = &url[..scheme_end];
        if scheme.is_empty() || !scheme.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ConfigError::InvalidBaseUrl { url });
        }

        let remainder = &url[scheme_end + 3..];
        let host_end = remainder.find([':', '/', '?', '#']).unwrap_or(remainder.len());
        if host_end == 0 {
            return Err(ConfigError::InvalidBaseUrl { url });
        }

        Ok(Self { url, scheme_end })
    }

    /// Returns the URL scheme (e.g., "https").
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.url[..self.scheme_end]
    }

    /// Appends `path` to the base URL.
    ///
    /// A missing leading `/` on `path` is added; a doubled one is not produced.
    #[must_use]
    pub fn join(&self, path: &str) -> String {
        if path.is_empty() || path.starts_with('/') {
            format!("{}{path}", self.url)
        } else {
            format!("{}/{path}", self.url)
        }
    }
}

impl AsRef<str> for BaseUrl {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_key_rejects_empty_string() {
        assert!(matches!(ApiKey::new(""), Err(ConfigError::EmptyApiKey)));
        assert!(matches!(ApiKey::new("   "), Err(ConfigError::EmptyApiKey)));
    }

    #[test]
    fn test_api_key_masks_value_in_debug() {
        let key = ApiKey::new("super-secret-key").unwrap();
        let debug_output = format!("{key:?}");
        assert_eq!(debug_output, "ApiKey(*****)");
        assert!(!debug_output.contains("super-secret-key"));
    }

    #[test]
    fn test_base_url_strips_single_trailing_slash() {
        let url = BaseUrl::new("https://api.n8n.io/").unwrap();
        assert_eq!(url.as_ref(), "https://api.n8n.io");
    }

    #[test]
    fn test_base_url_strips_repeated_trailing_slashes() {
        let url = BaseUrl::new("https://x///").unwrap();
        assert_eq!(url.as_ref(), "https://x");
        assert_eq!(url.join("/y"), "https://x/y");
    }

    #[test]
    fn test_base_url_keeps_path_and_port() {
        let url = BaseUrl::new("http://localhost:5678/api/v1").unwrap();
        assert_eq!(url.scheme(), "http");
        assert_eq!(url.join("/workflows"), "http://localhost:5678/api/v1/workflows");
    }

    #[test]
    fn test_base_url_join_adds_missing_separator() {
        let url = BaseUrl::new("https://x").unwrap();
        assert_eq!(url.join("y"), "https://x/y");
        assert_eq!(url.join(""), "https://x");
    }

    #[test]
    fn test_base_url_rejects_invalid_urls() {
        for bad in ["", "n8n.example.com", "://host", "https://", "ht tp://host", "https:///path"] {
            assert!(
                matches!(BaseUrl::new(bad), Err(ConfigError::InvalidBaseUrl { .. })),
                "expected {bad:?} to be rejected"
            );
        }
    }
}
