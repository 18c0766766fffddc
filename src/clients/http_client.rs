//! HTTP transport for Frame API communication.
//!
//! This module provides the [`HttpClient`] type, a thin wrapper over
//! `reqwest` that applies the configured base URL, timeouts, TLS policy and
//! default headers. It does not interpret status codes; that is left to
//! [`FrameClient`](crate::FrameClient).

use std::collections::HashMap;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::clients::errors::FrameError;
use crate::clients::http_request::{HttpMethod, HttpRequest};
use crate::clients::http_response::HttpResponse;
use crate::config::{ApiBase, ApiKey, FrameConfig};

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP client for making requests to the Frame API.
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async tasks.
#[derive(Debug)]
pub struct HttpClient {
    client: reqwest::Client,
    api_base: ApiBase,
    default_headers: HeaderMap,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::InvalidParameter`] if the user agent prefix or
    /// API key cannot be sent as a header value, and
    /// [`FrameError::ApiConnection`] if the TLS backend cannot be initialized.
    pub fn new(config: &FrameConfig) -> Result<Self, FrameError> {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let user_agent = format!("{user_agent_prefix}FrameRust/{SDK_VERSION}");

        let authorization = config
            .api_key()
            .map_or_else(|| "Bearer ".to_string(), ApiKey::bearer);

        let mut default_headers = HeaderMap::new();
        for (name, value) in [
            ("User-Agent", user_agent.as_str()),
            ("Accept", "application/json"),
            ("Content-Type", "application/json"),
            ("Authorization", authorization.as_str()),
        ] {
            let (name, value) = Self::header_pair(name, value)?;
            default_headers.insert(name, value);
        }

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .connect_timeout(config.open_timeout())
            .timeout(config.read_timeout())
            .danger_accept_invalid_certs(!config.verify_ssl_certs())
            .build()
            .map_err(|e| FrameError::connection(format!("Client error: {e}")))?;

        Ok(Self {
            client,
            api_base: config.api_base().clone(),
            default_headers,
        })
    }

    /// Returns the base URL requests are sent to.
    #[must_use]
    pub const fn api_base(&self) -> &ApiBase {
        &self.api_base
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HeaderMap {
        &self.default_headers
    }

    /// Sends a request and returns the raw response, whatever its status.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::InvalidParameter`] if the request fails
    /// validation or carries a malformed header, and
    /// [`FrameError::ApiConnection`] for every transport failure.
    pub async fn request(&self, request: HttpRequest) -> Result<HttpResponse, FrameError> {
        request.verify()?;

        let url = format!("{}{}", self.api_base, request.path);

        // Header names are case-insensitive; extras replace defaults.
        let mut headers = self.default_headers.clone();
        for (key, value) in &request.extra_headers {
            let (name, value) = Self::header_pair(key, value)?;
            headers.insert(name, value);
        }

        let mut req_builder = match request.http_method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
            HttpMethod::Patch => self.client.patch(&url),
            HttpMethod::Delete => self.client.delete(&url),
        };

        req_builder = req_builder.headers(headers);

        if !request.query.is_empty() {
            req_builder = req_builder.query(&request.query);
        }

        if let Some(body) = &request.body {
            req_builder = req_builder.body(body.to_string());
        }

        let res = req_builder.send().await.map_err(Self::transport_error)?;

        let code = res.status().as_u16();
        let res_headers = Self::parse_response_headers(res.headers());
        let body = res.text().await.map_err(Self::transport_error)?;

        Ok(HttpResponse::new(code, res_headers, body))
    }

    fn header_pair(name: &str, value: &str) -> Result<(HeaderName, HeaderValue), FrameError> {
        let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
            FrameError::invalid_parameter(format!("Invalid header name {name:?}: {e}"))
        })?;
        let header_value = HeaderValue::from_str(value).map_err(|e| {
            FrameError::invalid_parameter(format!("Invalid value for header {name}: {e}"))
        })?;
        Ok((header_name, header_value))
    }

    fn transport_error(error: reqwest::Error) -> FrameError {
        let message = if error.is_timeout() {
            format!("Request timed out: {error}")
        } else if error.is_connect() {
            format!("Connection failed: {error}")
        } else {
            format!("Client error: {error}")
        };
        tracing::debug!("Frame API transport failure: {}", message);
        FrameError::connection(message)
    }

    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }
}
