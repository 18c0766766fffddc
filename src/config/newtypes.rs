//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use std::fmt;

/// A validated Frame API key.
///
/// The key is sent as a bearer token on every request. Its `Debug` output
/// is masked so keys do not end up in logs.
///
/// # Example
///
/// ```rust
/// use frame_api::ApiKey;
///
/// let key = ApiKey::new("sk_test_123").unwrap();
/// assert_eq!(key.as_ref(), "sk_test_123");
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

    /// Returns the `Authorization` header value for this key.
    #[must_use]
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
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

/// A validated API base URL.
///
/// Only `http` and `https` URLs are accepted. Trailing slashes are removed
/// so request paths (which always start with `/`) can be appended directly.
///
/// # Example
///
/// ```rust
/// use frame_api::ApiBase;
///
/// let base = ApiBase::new("https://api.framepayments.com/").unwrap();
/// assert_eq!(base.as_ref(), "https://api.framepayments.com");
///
/// assert!(ApiBase::new("not a url").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiBase(String);

impl ApiBase {
    /// Creates a new validated base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidApiBase`] if the value does not parse as
    /// an `http` or `https` URL with a host.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let trimmed = url.trim().trim_end_matches('/');

        let parsed = reqwest::Url::parse(trimmed)
            .map_err(|_| ConfigError::InvalidApiBase { url: url.clone() })?;
        if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
            return Err(ConfigError::InvalidApiBase { url });
        }

        Ok(Self(trimmed.to_string()))
    }
}

impl Default for ApiBase {
    fn default() -> Self {
        Self(super::DEFAULT_API_BASE.to_string())
    }
}

impl AsRef<str> for ApiBase {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ApiBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
