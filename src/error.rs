//! Configuration error types for the Frame API client.
//!
//! Errors returned by the API itself live in [`crate::clients::FrameError`].
//! This module only covers problems detected while building configuration.
//!
//! # Example
//!
//! ```rust
//! use frame_api::{ApiKey, ConfigError};
//!
//! let result = ApiKey::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyApiKey)));
//! ```

use thiserror::Error;

/// Errors that can occur while configuring the client.
///
/// Each variant provides a clear, actionable error message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// API key cannot be empty.
    #[error("API key cannot be empty. Please provide a valid Frame API key.")]
    EmptyApiKey,

    /// API base URL is invalid.
    #[error("Invalid API base URL '{url}'. Please provide an http(s) URL such as 'https://api.framepayments.com'.")]
    InvalidApiBase {
        /// The invalid URL that was provided.
        url: String,
    },

    /// A timeout was set to zero.
    #[error("Invalid timeout for '{field}'. Timeouts must be greater than zero.")]
    InvalidTimeout {
        /// The name of the timeout setting.
        field: &'static str,
    },

    /// Process-wide defaults were already installed or already read.
    #[error("Process-wide configuration has already been initialized. Call `configure` once, before creating any client.")]
    AlreadyConfigured,
}
