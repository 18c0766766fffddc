//! Error types for the Frame API client.
//!
//! Every failure surfaced by a request, a resource operation, or pagination
//! is a [`FrameError`]. Each variant carries the same [`ErrorDetails`]
//! payload, so callers can inspect the HTTP status, raw body, decoded body,
//! and API error code without matching on the kind first.
//!
//! | Variant | Raised for |
//! |---------|------------|
//! | [`FrameError::Authentication`] | HTTP 401 |
//! | [`FrameError::InvalidRequest`] | HTTP 400 and 404 |
//! | [`FrameError::RateLimit`] | HTTP 429 |
//! | [`FrameError::ApiConnection`] | transport failures, unknown HTTP methods |
//! | [`FrameError::Api`] | any other non-success status |
//! | [`FrameError::InvalidParameter`] | requests that cannot be built locally |
//! | [`FrameError::ResourceNotFound`] | unknown item types |
//!
//! # Example
//!
//! ```rust,ignore
//! use frame_api::{Customer, FrameError};
//! use frame_api::rest::ApiResource;
//!
//! match Customer::retrieve(&client, "cus_123").await {
//!     Ok(customer) => println!("{:?}", customer.name()),
//!     Err(FrameError::InvalidRequest(details)) => {
//!         println!("Not found: {}", details.message);
//!     }
//!     Err(e) => println!("Request failed: {e}"),
//! }
//! ```

use std::fmt;

use serde_json::Value;
use thiserror::Error;

use crate::error::ConfigError;

/// Fallback message when an error payload carries none.
pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error";

/// Context attached to every [`FrameError`].
///
/// Displays as `(Status 404) (Code resource_missing) Customer not found`,
/// with the status and code prefixes omitted when absent.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ErrorDetails {
    /// Human readable message.
    pub message: String,
    /// HTTP status code, absent for transport and local failures.
    pub http_status: Option<u16>,
    /// Raw response body.
    pub http_body: Option<String>,
    /// Decoded response body.
    pub json_body: Option<Value>,
    /// Error code reported by the API.
    pub code: Option<String>,
}

impl ErrorDetails {
    /// Creates details carrying only a message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }

    /// Builds details from an HTTP error response.
    ///
    /// The message is taken from an `error` string, from `error.message`
    /// when `error` is an object, or from a top-level `message`. The code is
    /// taken from `code` or `error.code`.
    #[must_use]
    pub fn from_response(status: u16, body: &str, json_body: Option<Value>) -> Self {
        let message = json_body
            .as_ref()
            .and_then(extract_message)
            .unwrap_or_else(|| UNKNOWN_ERROR_MESSAGE.to_string());
        let code = json_body.as_ref().and_then(extract_code);

        Self {
            message,
            http_status: Some(status),
            http_body: if body.is_empty() {
                None
            } else {
                Some(body.to_string())
            },
            json_body,
            code,
        }
    }
}

fn extract_message(body: &Value) -> Option<String> {
    match body.get("error") {
        Some(Value::String(message)) => return Some(message.clone()),
        Some(Value::Object(error)) => {
            if let Some(Value::String(message)) = error.get("message") {
                return Some(message.clone());
            }
        }
        _ => {}
    }
    body.get("message")
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn extract_code(body: &Value) -> Option<String> {
    body.get("code")
        .or_else(|| body.get("error").and_then(|error| error.get("code")))
        .and_then(|code| match code {
            Value::String(code) => Some(code.clone()),
            Value::Number(code) => Some(code.to_string()),
            _ => None,
        })
}

impl fmt::Display for ErrorDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(status) = self.http_status {
            write!(f, "(Status {status}) ")?;
        }
        if let Some(code) = &self.code {
            write!(f, "(Code {code}) ")?;
        }
        f.write_str(&self.message)
    }
}

/// Unified error type for Frame API operations.
#[derive(Debug, Error)]
pub enum FrameError {
    /// The API key was missing or rejected (HTTP 401).
    #[error("{0}")]
    Authentication(ErrorDetails),

    /// The request was malformed or referenced a missing resource (HTTP 400/404).
    #[error("{0}")]
    InvalidRequest(ErrorDetails),

    /// Too many requests (HTTP 429).
    #[error("{0}")]
    RateLimit(ErrorDetails),

    /// The API could not be reached, or the request could not be dispatched.
    #[error("{0}")]
    ApiConnection(ErrorDetails),

    /// Any other unsuccessful response.
    #[error("{0}")]
    Api(ErrorDetails),

    /// A request could not be built from local state.
    #[error("{0}")]
    InvalidParameter(ErrorDetails),

    /// The requested resource type could not be determined.
    #[error("{0}")]
    ResourceNotFound(ErrorDetails),

    /// The client configuration was invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl FrameError {
    /// Translates an unsuccessful HTTP status into the matching error kind.
    #[must_use]
    pub fn from_status(details: ErrorDetails) -> Self {
        match details.http_status {
            Some(400 | 404) => Self::InvalidRequest(details),
            Some(401) => Self::Authentication(details),
            Some(429) => Self::RateLimit(details),
            _ => Self::Api(details),
        }
    }

    /// Shorthand for an [`ApiConnection`](Self::ApiConnection) error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::ApiConnection(ErrorDetails::new(message))
    }

    /// Shorthand for an [`InvalidParameter`](Self::InvalidParameter) error.
    #[must_use]
    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::InvalidParameter(ErrorDetails::new(message))
    }

    /// Returns the details, unless this is a configuration error.
    #[must_use]
    pub const fn details(&self) -> Option<&ErrorDetails> {
        match self {
            Self::Authentication(details)
            | Self::InvalidRequest(details)
            | Self::RateLimit(details)
            | Self::ApiConnection(details)
            | Self::Api(details)
            | Self::InvalidParameter(details)
            | Self::ResourceNotFound(details) => Some(details),
            Self::Config(_) => None,
        }
    }

    /// Returns the HTTP status, if the error came from a response.
    #[must_use]
    pub fn http_status(&self) -> Option<u16> {
        self.details().and_then(|details| details.http_status)
    }

    /// Returns the message without status or code prefixes.
    #[must_use]
    pub fn message(&self) -> String {
        self.details()
            .map_or_else(|| self.to_string(), |details| details.message.clone())
    }

    /// Returns the decoded error payload, if any.
    #[must_use]
    pub fn json_body(&self) -> Option<&Value> {
        self.details().and_then(|details| details.json_body.as_ref())
    }

    /// Returns the API error code, if any.
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        self.details().and_then(|details| details.code.as_deref())
    }
}

/// Error returned when an HTTP request fails validation before it is sent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// The HTTP method is not one of the supported methods.
    #[error("Unrecognized HTTP method: {method}")]
    InvalidMethod {
        /// The method that was provided.
        method: String,
    },

    /// A POST or PATCH request was built without a body.
    #[error("Cannot use {method} without specifying data.")]
    MissingBody {
        /// The HTTP method that requires a body.
        method: String,
    },

    /// A GET or DELETE request was built with a body.
    #[error("Cannot send a body with {method}; use query parameters instead.")]
    UnexpectedBody {
        /// The HTTP method that does not take a body.
        method: String,
    },
}

impl From<InvalidHttpRequestError> for FrameError {
    fn from(error: InvalidHttpRequestError) -> Self {
        match error {
            InvalidHttpRequestError::InvalidMethod { .. } => Self::connection(error.to_string()),
            _ => Self::invalid_parameter(error.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_display_includes_status_and_code() {
        let details = ErrorDetails {
            message: "Customer not found".to_string(),
            http_status: Some(404),
            code: Some("resource_missing".to_string()),
            ..ErrorDetails::default()
        };
        assert_eq!(
            FrameError::InvalidRequest(details).to_string(),
            "(Status 404) (Code resource_missing) Customer not found"
        );
    }

    #[test]
    fn test_display_without_status_is_plain_message() {
        let error = FrameError::connection("Connection failed: refused");
        assert_eq!(error.to_string(), "Connection failed: refused");
        assert_eq!(error.http_status(), None);
    }

    #[test]
    fn test_from_response_reads_string_error() {
        let body = json!({"error": "Invalid API Key provided.", "status": 401});
        let details = ErrorDetails::from_response(401, &body.to_string(), Some(body));
        assert_eq!(details.message, "Invalid API Key provided.");
        assert_eq!(details.http_status, Some(401));
        assert!(details.http_body.is_some());
    }

    #[test]
    fn test_from_response_reads_nested_error_object() {
        let body = json!({"error": {"message": "No such customer", "code": "resource_missing"}});
        let details = ErrorDetails::from_response(404, &body.to_string(), Some(body));
        assert_eq!(details.message, "No such customer");
        assert_eq!(details.code.as_deref(), Some("resource_missing"));
    }

    #[test]
    fn test_from_response_reads_top_level_message_and_code() {
        let body = json!({"message": "Bad email", "code": "invalid_email"});
        let details = ErrorDetails::from_response(400, &body.to_string(), Some(body));
        assert_eq!(details.message, "Bad email");
        assert_eq!(details.code.as_deref(), Some("invalid_email"));
    }

    #[test]
    fn test_from_response_defaults_to_unknown_error() {
        let details = ErrorDetails::from_response(500, "", None);
        assert_eq!(details.message, "Unknown error");
        assert!(details.http_body.is_none());
        assert!(details.json_body.is_none());
    }

    #[test]
    fn test_from_status_maps_error_kinds() {
        let kind = |status| FrameError::from_status(ErrorDetails::from_response(status, "", None));

        assert!(matches!(kind(400), FrameError::InvalidRequest(_)));
        assert!(matches!(kind(404), FrameError::InvalidRequest(_)));
        assert!(matches!(kind(401), FrameError::Authentication(_)));
        assert!(matches!(kind(429), FrameError::RateLimit(_)));
        assert!(matches!(kind(500), FrameError::Api(_)));
        assert!(matches!(kind(403), FrameError::Api(_)));
    }

    #[test]
    fn test_invalid_method_becomes_connection_error() {
        let error: FrameError = InvalidHttpRequestError::InvalidMethod {
            method: "put".to_string(),
        }
        .into();
        assert!(matches!(error, FrameError::ApiConnection(_)));
        assert_eq!(error.message(), "Unrecognized HTTP method: put");
    }

    #[test]
    fn test_missing_body_becomes_invalid_parameter() {
        let error: FrameError = InvalidHttpRequestError::MissingBody {
            method: "post".to_string(),
        }
        .into();
        assert!(matches!(error, FrameError::InvalidParameter(_)));
    }

    #[test]
    fn test_config_error_has_no_details() {
        let error: FrameError = ConfigError::EmptyApiKey.into();
        assert!(error.details().is_none());
        assert!(error.message().contains("API key cannot be empty"));
    }

    #[test]
    fn test_error_types_implement_std_error() {
        let error: &dyn std::error::Error = &FrameError::connection("x");
        let _ = error;
        let invalid: &dyn std::error::Error = &InvalidHttpRequestError::MissingBody {
            method: "patch".to_string(),
        };
        let _ = invalid;
    }
}
