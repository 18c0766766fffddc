//! Configuration types for the Frame API client.
//!
//! # Overview
//!
//! - [`FrameConfig`]: all settings a client needs (credentials, base URL, timeouts, TLS)
//! - [`FrameConfigBuilder`]: builder for [`FrameConfig`]
//! - [`ApiKey`] and [`ApiBase`]: validated newtypes
//! - [`configure`] / [`global_config`]: process-wide defaults, installed once
//!
//! Process-wide defaults are immutable once installed. Clients that need
//! different credentials are built with their own configuration instead of
//! mutating shared state.
//!
//! # Example
//!
//! ```rust
//! use frame_api::{ApiKey, FrameConfig};
//! use std::time::Duration;
//!
//! let config = FrameConfig::builder()
//!     .api_key(ApiKey::new("sk_test_123").unwrap())
//!     .read_timeout(Duration::from_secs(20))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.api_base().as_ref(), "https://api.framepayments.com");
//! assert_eq!(config.read_timeout(), Duration::from_secs(20));
//! ```

mod newtypes;

pub use newtypes::{ApiBase, ApiKey};

use std::sync::OnceLock;
use std::time::Duration;

use tracing::Level;

use crate::error::ConfigError;

/// Default base URL of the Frame API.
pub const DEFAULT_API_BASE: &str = "https://api.framepayments.com";

/// Default connection establishment timeout.
pub const DEFAULT_OPEN_TIMEOUT: Duration = Duration::from_secs(30);

/// Default timeout for a complete response.
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(80);

/// TLS certificates are verified unless explicitly disabled.
pub const DEFAULT_VERIFY_SSL_CERTS: bool = true;

static GLOBAL_CONFIG: OnceLock<FrameConfig> = OnceLock::new();

/// Configuration for a [`FrameClient`](crate::FrameClient).
///
/// # Thread Safety
///
/// `FrameConfig` is `Clone`, `Send`, and `Sync`.
#[derive(Clone, Debug)]
pub struct FrameConfig {
    api_key: Option<ApiKey>,
    api_base: ApiBase,
    open_timeout: Duration,
    read_timeout: Duration,
    verify_ssl_certs: bool,
    log_level: Option<Level>,
    user_agent_prefix: Option<String>,
}

impl FrameConfig {
    /// Creates a new builder for constructing a `FrameConfig`.
    #[must_use]
    pub fn builder() -> FrameConfigBuilder {
        FrameConfigBuilder::new()
    }

    /// Returns the API key, if configured.
    #[must_use]
    pub const fn api_key(&self) -> Option<&ApiKey> {
        self.api_key.as_ref()
    }

    /// Returns the API base URL.
    #[must_use]
    pub const fn api_base(&self) -> &ApiBase {
        &self.api_base
    }

    /// Returns the connection establishment timeout.
    #[must_use]
    pub const fn open_timeout(&self) -> Duration {
        self.open_timeout
    }

    /// Returns the response completion timeout.
    #[must_use]
    pub const fn read_timeout(&self) -> Duration {
        self.read_timeout
    }

    /// Returns whether TLS certificates are verified.
    #[must_use]
    pub const fn verify_ssl_certs(&self) -> bool {
        self.verify_ssl_certs
    }

    /// Returns the level request summaries are logged at, if configured.
    #[must_use]
    pub const fn log_level(&self) -> Option<Level> {
        self.log_level
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: ApiBase::default(),
            open_timeout: DEFAULT_OPEN_TIMEOUT,
            read_timeout: DEFAULT_READ_TIMEOUT,
            verify_ssl_certs: DEFAULT_VERIFY_SSL_CERTS,
            log_level: None,
            user_agent_prefix: None,
        }
    }
}

// Verify FrameConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<FrameConfig>();
};

/// Installs the process-wide default configuration.
///
/// The default client and every [`FrameClientBuilder`](crate::FrameClientBuilder)
/// fall back to these values for settings they do not override.
///
/// # Errors
///
/// Returns [`ConfigError::AlreadyConfigured`] if defaults were already
/// installed, or already read through [`global_config`].
pub fn configure(config: FrameConfig) -> Result<(), ConfigError> {
    GLOBAL_CONFIG
        .set(config)
        .map_err(|_| ConfigError::AlreadyConfigured)?;
    tracing::debug!("Installed process-wide Frame API configuration");
    Ok(())
}

/// Returns the process-wide default configuration.
///
/// If [`configure`] was never called, the built-in defaults are installed
/// on first use.
pub fn global_config() -> &'static FrameConfig {
    GLOBAL_CONFIG.get_or_init(FrameConfig::default)
}

/// Builder for constructing [`FrameConfig`] instances.
///
/// Every field is optional. Unset fields take their value from the defaults
/// passed to [`build_with_defaults`](Self::build_with_defaults), or from the
/// built-in defaults when using [`build`](Self::build).
#[derive(Debug, Default, Clone)]
pub struct FrameConfigBuilder {
    api_key: Option<ApiKey>,
    api_base: Option<ApiBase>,
    open_timeout: Option<Duration>,
    read_timeout: Option<Duration>,
    verify_ssl_certs: Option<bool>,
    log_level: Option<Level>,
    user_agent_prefix: Option<String>,
}

impl FrameConfigBuilder {
    /// Creates a new builder with no fields set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API key.
    #[must_use]
    pub fn api_key(mut self, key: ApiKey) -> Self {
        self.api_key = Some(key);
        self
    }

    /// Sets the API base URL.
    #[must_use]
    pub fn api_base(mut self, base: ApiBase) -> Self {
        self.api_base = Some(base);
        self
    }

    /// Sets the connection establishment timeout.
    #[must_use]
    pub const fn open_timeout(mut self, timeout: Duration) -> Self {
        self.open_timeout = Some(timeout);
        self
    }

    /// Sets the response completion timeout.
    #[must_use]
    pub const fn read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = Some(timeout);
        self
    }

    /// Sets whether TLS certificates are verified.
    #[must_use]
    pub const fn verify_ssl_certs(mut self, verify: bool) -> Self {
        self.verify_ssl_certs = Some(verify);
        self
    }

    /// Sets the level request summaries are logged at.
    #[must_use]
    pub const fn log_level(mut self, level: Level) -> Self {
        self.log_level = Some(level);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`FrameConfig`] on top of the built-in defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidTimeout`] if a timeout is zero.
    pub fn build(self) -> Result<FrameConfig, ConfigError> {
        self.build_with_defaults(&FrameConfig::default())
    }

    /// Builds the [`FrameConfig`], taking unset fields from `defaults`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidTimeout`] if a timeout is zero.
    pub fn build_with_defaults(self, defaults: &FrameConfig) -> Result<FrameConfig, ConfigError> {
        let open_timeout = self.open_timeout.unwrap_or(defaults.open_timeout);
        if open_timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout {
                field: "open_timeout",
            });
        }
        let read_timeout = self.read_timeout.unwrap_or(defaults.read_timeout);
        if read_timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout {
                field: "read_timeout",
            });
        }

        Ok(FrameConfig {
            api_key: self.api_key.or_else(|| defaults.api_key.clone()),
            api_base: self.api_base.unwrap_or_else(|| defaults.api_base.clone()),
            open_timeout,
            read_timeout,
            verify_ssl_certs: self.verify_ssl_certs.unwrap_or(defaults.verify_ssl_certs),
            log_level: self.log_level.or(defaults.log_level),
            user_agent_prefix: self
                .user_agent_prefix
                .or_else(|| defaults.user_agent_prefix.clone()),
        })
    }
}
