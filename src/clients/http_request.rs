//! HTTP request types for the Frame API client.
//!
//! This module provides the [`HttpRequest`] type and its builder, plus the
//! per-call [`RequestOptions`] every operation accepts.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::clients::errors::{FrameError, InvalidHttpRequestError};
use crate::config::ApiKey;

/// HTTP methods supported by the Frame API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// HTTP GET method for retrieving resources.
    Get,
    /// HTTP POST method for creating resources and triggering actions.
    Post,
    /// HTTP PATCH method for updating resources.
    Patch,
    /// HTTP DELETE method for removing resources.
    Delete,
}

impl HttpMethod {
    /// Returns `true` if requests with this method carry a JSON body.
    #[must_use]
    pub const fn has_body(self) -> bool {
        matches!(self, Self::Post | Self::Patch)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "get"),
            Self::Post => write!(f, "post"),
            Self::Patch => write!(f, "patch"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

/// Parses a method name case-insensitively.
///
/// Any method outside GET/POST/PATCH/DELETE is rejected with
/// [`FrameError::ApiConnection`] before a request is ever built.
///
/// ```rust
/// use frame_api::{FrameError, HttpMethod};
///
/// assert_eq!("PATCH".parse::<HttpMethod>().unwrap(), HttpMethod::Patch);
/// assert!(matches!("put".parse::<HttpMethod>(), Err(FrameError::ApiConnection(_))));
/// ```
impl FromStr for HttpMethod {
    type Err = FrameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "get" => Ok(Self::Get),
            "post" => Ok(Self::Post),
            "patch" => Ok(Self::Patch),
            "delete" => Ok(Self::Delete),
            _ => Err(InvalidHttpRequestError::InvalidMethod {
                method: s.to_string(),
            }
            .into()),
        }
    }
}

/// Per-call options accepted by every operation.
///
/// # Example
///
/// ```rust
/// use frame_api::{ApiKey, RequestOptions};
///
/// let opts = RequestOptions::new()
///     .with_api_key(ApiKey::new("sk_other_account").unwrap())
///     .with_header("Idempotency-Key", "abc-123");
/// assert!(opts.api_key().is_some());
/// ```
#[derive(Clone, Debug, Default)]
pub struct RequestOptions {
    api_key: Option<ApiKey>,
    headers: HashMap<String, String>,
}

impl RequestOptions {
    /// Creates empty options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the client's API key for this call.
    #[must_use]
    pub fn with_api_key(mut self, api_key: ApiKey) -> Self {
        self.api_key = Some(api_key);
        self
    }

    /// Adds an extra header for this call.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Returns the overriding API key, if any.
    #[must_use]
    pub const fn api_key(&self) -> Option<&ApiKey> {
        self.api_key.as_ref()
    }

    /// Returns the extra headers.
    #[must_use]
    pub const fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }
}

/// An HTTP request to be sent to the Frame API.
///
/// Use [`HttpRequest::builder`] to construct requests with the builder pattern.
///
/// # Example
///
/// ```rust
/// use frame_api::clients::{HttpMethod, HttpRequest};
/// use serde_json::json;
///
/// let get_request = HttpRequest::builder(HttpMethod::Get, "/v1/customers")
///     .query_param("page", "2")
///     .build()
///     .unwrap();
///
/// let post_request = HttpRequest::builder(HttpMethod::Post, "/v1/customers")
///     .body(json!({"name": "John"}))
///     .build()
///     .unwrap();
/// ```
#[derive(Clone, Debug)]
pub struct HttpRequest {
    /// The HTTP method for this request.
    pub http_method: HttpMethod,
    /// The absolute path (e.g. `/v1/customers`) for this request.
    pub path: String,
    /// The JSON request body, if any.
    pub body: Option<Value>,
    /// Query parameters, in the order they were added.
    pub query: Vec<(String, String)>,
    /// Additional headers to include in the request.
    pub extra_headers: HashMap<String, String>,
}

impl HttpRequest {
    /// Creates a new builder for constructing an `HttpRequest`.
    #[must_use]
    pub fn builder(method: HttpMethod, path: impl Into<String>) -> HttpRequestBuilder {
        HttpRequestBuilder::new(method, path)
    }

    /// Validates the request.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if a POST or PATCH has no body,
    /// or a GET or DELETE has one.
    pub fn verify(&self) -> Result<(), InvalidHttpRequestError> {
        match (self.http_method.has_body(), self.body.is_some()) {
            (true, false) => Err(InvalidHttpRequestError::MissingBody {
                method: self.http_method.to_string(),
            }),
            (false, true) => Err(InvalidHttpRequestError::UnexpectedBody {
                method: self.http_method.to_string(),
            }),
            _ => Ok(()),
        }
    }
}

/// Builder for constructing [`HttpRequest`] instances.
#[derive(Debug)]
pub struct HttpRequestBuilder {
    http_method: HttpMethod,
    path: String,
    body: Option<Value>,
    query: Vec<(String, String)>,
    extra_headers: HashMap<String, String>,
}

impl HttpRequestBuilder {
    fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            http_method: method,
            path: path.into(),
            body: None,
            query: Vec::new(),
            extra_headers: HashMap::new(),
        }
    }

    /// Sets the JSON request body.
    #[must_use]
    pub fn body(mut self, body: impl Into<Value>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Sets all query parameters at once.
    #[must_use]
    pub fn query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    /// Adds a single query parameter.
    #[must_use]
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Adds every header in `headers`.
    #[must_use]
    pub fn extra_headers(self, headers: &HashMap<String, String>) -> Self {
        headers
            .iter()
            .fold(self, |builder, (k, v)| builder.header(k.clone(), v.clone()))
    }

    /// Adds a single extra header, replacing any header with the same name
    /// regardless of case.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        self.extra_headers
            .retain(|existing, _| !existing.eq_ignore_ascii_case(&key));
        self.extra_headers.insert(key, value.into());
        self
    }

    /// Builds the [`HttpRequest`], validating it in the process.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if the request fails validation.
    pub fn build(self) -> Result<HttpRequest, InvalidHttpRequestError> {
        let request = HttpRequest {
            http_method: self.http_method,
            path: self.path,
            body: self.body,
            query: self.query,
            extra_headers: self.extra_headers,
        };
        request.verify()?;
        Ok(request)
    }
}
