//! Request dispatch and error translation for the Frame API.
//!
//! [`FrameClient`] turns a method, path and parameters into an HTTP call,
//! and turns the response into either decoded JSON or a [`FrameError`].
//!
//! # Active client
//!
//! Operations take the client explicitly. Code that cannot thread a client
//! through (middleware, callbacks) can bind one to the current task with
//! [`FrameClient::scope`] and read it back with [`FrameClient::active`].
//! Outside any scope, `active` returns the default client, built once from
//! the process-wide configuration.
//!
//! # Example
//!
//! ```rust,ignore
//! use frame_api::{ApiKey, FrameClient, HttpMethod, RequestOptions};
//! use serde_json::Map;
//!
//! let client = FrameClient::builder()
//!     .api_key(ApiKey::new("sk_test_123")?)
//!     .build()?;
//!
//! let body = client
//!     .execute(HttpMethod::Get, "/v1/customers", &Map::new(), &RequestOptions::default())
//!     .await?;
//! ```

use std::future::Future;
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use serde_json::{Map, Value};
use tracing::Level;

use crate::clients::errors::{ErrorDetails, FrameError};
use crate::clients::http_client::HttpClient;
use crate::clients::http_request::{HttpMethod, HttpRequest, RequestOptions};
use crate::clients::http_response::HttpResponse;
use crate::config::{global_config, ApiBase, ApiKey, FrameConfig, FrameConfigBuilder};
use crate::object::ObjectRegistry;

/// Request parameters: a query string for GET/DELETE, a JSON body for POST/PATCH.
pub type Params = Map<String, Value>;

static DEFAULT_CLIENT: OnceLock<Arc<FrameClient>> = OnceLock::new();

tokio::task_local! {
    static ACTIVE_CLIENT: Arc<FrameClient>;
}

/// Client for the Frame API.
///
/// # Thread Safety
///
/// `FrameClient` is `Send + Sync`. Share it through an [`Arc`] rather than
/// building one per request.
#[derive(Debug)]
pub struct FrameClient {
    http_client: HttpClient,
    config: FrameConfig,
    registry: Arc<ObjectRegistry>,
}

// Verify FrameClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<FrameClient>();
};

impl FrameClient {
    /// Creates a client from a complete configuration.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::ApiConnection`] if the HTTP client cannot be built,
    /// or [`FrameError::InvalidParameter`] if a default header value is malformed.
    pub fn new(config: FrameConfig) -> Result<Self, FrameError> {
        let http_client = HttpClient::new(&config)?;
        Ok(Self {
            http_client,
            config,
            registry: Arc::new(ObjectRegistry::new()),
        })
    }

    /// Returns a builder whose unset fields fall back to the process-wide
    /// configuration.
    #[must_use]
    pub fn builder() -> FrameClientBuilder {
        FrameClientBuilder::default()
    }

    /// Replaces the discriminator registry used to convert responses.
    #[must_use]
    pub fn with_registry(mut self, registry: ObjectRegistry) -> Self {
        self.registry = Arc::new(registry);
        self
    }

    /// Returns the client's configuration.
    #[must_use]
    pub const fn config(&self) -> &FrameConfig {
        &self.config
    }

    /// Returns the registry used to convert responses.
    #[must_use]
    pub fn registry(&self) -> &ObjectRegistry {
        &self.registry
    }

    /// Returns the default client, building it on first use from
    /// [`global_config`].
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::ApiConnection`] if the HTTP client cannot be built.
    pub fn default_client() -> Result<Arc<Self>, FrameError> {
        if let Some(client) = DEFAULT_CLIENT.get() {
            return Ok(Arc::clone(client));
        }
        let client = Arc::new(Self::new(global_config().clone())?);
        Ok(Arc::clone(DEFAULT_CLIENT.get_or_init(|| client)))
    }

    /// Returns the client bound to the current task by [`scope`](Self::scope),
    /// or the default client.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::ApiConnection`] if the default client is needed
    /// and cannot be built.
    pub fn active() -> Result<Arc<Self>, FrameError> {
        ACTIVE_CLIENT
            .try_with(Arc::clone)
            .or_else(|_| Self::default_client())
    }

    /// Runs `future` with `client` as the active client.
    ///
    /// Scopes nest; the innermost client wins. Tasks spawned inside the
    /// future do not inherit the binding.
    pub async fn scope<F: Future>(client: Arc<Self>, future: F) -> F::Output {
        ACTIVE_CLIENT.scope(client, future).await
    }

    /// Parses `method` and executes the request.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::ApiConnection`] for an unrecognized method,
    /// before any I/O. Otherwise see [`execute`](Self::execute).
    pub async fn execute_raw(
        &self,
        method: &str,
        path: &str,
        params: &Params,
        opts: &RequestOptions,
    ) -> Result<Value, FrameError> {
        let method: HttpMethod = method.parse()?;
        self.execute(method, path, params, opts).await
    }

    /// Executes a request and returns the decoded body.
    ///
    /// GET and DELETE send `params` as query parameters; POST and PATCH send
    /// them as a JSON body.
    ///
    /// # Errors
    ///
    /// | Outcome | Error |
    /// |---------|-------|
    /// | 400, 404 | [`FrameError::InvalidRequest`] |
    /// | 401 | [`FrameError::Authentication`] |
    /// | 429 | [`FrameError::RateLimit`] |
    /// | other statuses | [`FrameError::Api`] |
    /// | transport failure | [`FrameError::ApiConnection`] |
    pub async fn execute(
        &self,
        method: HttpMethod,
        path: &str,
        params: &Params,
        opts: &RequestOptions,
    ) -> Result<Value, FrameError> {
        let mut builder = HttpRequest::builder(method, path).extra_headers(opts.headers());
        if let Some(api_key) = opts.api_key() {
            builder = builder.header("Authorization", api_key.bearer());
        }
        builder = if method.has_body() {
            builder.body(Value::Object(params.clone()))
        } else {
            builder.query(serialize_to_query(params))
        };
        let request = builder.build()?;

        tracing::debug!("Frame API request: {} {}", method, path);
        self.log_summary(&format!("Request: {method} {path}"));

        let response = self.http_client.request(request).await?;

        tracing::debug!(
            "Frame API response: {} {} -> {}",
            method,
            path,
            response.code
        );
        self.log_summary(&format!("Response: {method} {path} -> {}", response.code));

        Self::handle_response(method, path, &response)
    }

    fn handle_response(
        method: HttpMethod,
        path: &str,
        response: &HttpResponse,
    ) -> Result<Value, FrameError> {
        match response.code {
            200 | 201 | 202 => response.json().map_err(|e| {
                tracing::warn!(
                    "Frame API returned a non-JSON body for {} {}: {}",
                    method,
                    path,
                    e
                );
                FrameError::Api(ErrorDetails {
                    message: format!("Invalid response body from API: {e}"),
                    http_status: Some(response.code),
                    http_body: Some(response.body.clone()),
                    json_body: None,
                    code: None,
                })
            }),
            204 => Ok(Value::Object(Map::new())),
            code => {
                let json_body = response.json().ok();
                let details = ErrorDetails::from_response(code, &response.body, json_body);
                if let Some(request_id) = response.request_id() {
                    tracing::debug!("Frame API error for request id {}", request_id);
                }
                Err(FrameError::from_status(details))
            }
        }
    }

    fn log_summary(&self, message: &str) {
        match self.config.log_level() {
            Some(Level::ERROR) => tracing::error!("{}", message),
            Some(Level::WARN) => tracing::warn!("{}", message),
            Some(Level::INFO) => tracing::info!("{}", message),
            Some(Level::DEBUG) => tracing::debug!("{}", message),
            Some(Level::TRACE) => tracing::trace!("{}", message),
            None => {}
        }
    }
}

/// Serializes params into query pairs using bracket notation.
///
/// Nested objects become `key[sub]=value`, arrays repeat `key[]=value`, and
/// objects inside arrays become `key[][sub]=value`. Nulls are skipped; an
/// empty array is sent as a bare `key[]`.
fn serialize_to_query(params: &Params) -> Vec<(String, String)> {
    let mut query = Vec::with_capacity(params.len());
    for (key, value) in params {
        append_query_pairs(key.clone(), value, &mut query);
    }
    query
}

fn append_query_pairs(key: String, value: &Value, query: &mut Vec<(String, String)>) {
    match value {
        Value::Null => {}
        Value::String(s) => query.push((key, s.clone())),
        Value::Number(n) => query.push((key, n.to_string())),
        Value::Bool(b) => query.push((key, b.to_string())),
        Value::Array(items) => {
            let item_key = format!("{key}[]");
            if items.is_empty() {
                query.push((item_key.clone(), String::new()));
            }
            for item in items {
                append_query_pairs(item_key.clone(), item, query);
            }
        }
        Value::Object(map) => {
            for (sub, nested) in map {
                append_query_pairs(format!("{key}[{sub}]"), nested, query);
            }
        }
    }
}

/// Builder for [`FrameClient`].
///
/// # Example
///
/// ```rust
/// use frame_api::{ApiBase, ApiKey, FrameClient};
/// use std::time::Duration;
///
/// let client = FrameClient::builder()
///     .api_key(ApiKey::new("sk_test_123").unwrap())
///     .api_base(ApiBase::new("http://localhost:8080").unwrap())
///     .read_timeout(Duration::from_secs(5))
///     .build()
///     .unwrap();
///
/// assert_eq!(client.config().api_base().as_ref(), "http://localhost:8080");
/// ```
#[derive(Debug, Default)]
pub struct FrameClientBuilder {
    config: FrameConfigBuilder,
    registry: Option<ObjectRegistry>,
}

impl FrameClientBuilder {
    #[must_use]
    pub fn api_key(mut self, key: ApiKey) -> Self {
        self.config = self.config.api_key(key);
        self
    }

    #[must_use]
    pub fn api_base(mut self, base: ApiBase) -> Self {
        self.config = self.config.api_base(base);
        self
    }

    #[must_use]
    pub fn open_timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.open_timeout(timeout);
        self
    }

    #[must_use]
    pub fn read_timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.read_timeout(timeout);
        self
    }

    #[must_use]
    pub fn verify_ssl_certs(mut self, verify: bool) -> Self {
        self.config = self.config.verify_ssl_certs(verify);
        self
    }

    #[must_use]
    pub fn log_level(mut self, level: Level) -> Self {
        self.config = self.config.log_level(level);
        self
    }

    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config = self.config.user_agent_prefix(prefix);
        self
    }

    /// Uses a custom discriminator registry.
    #[must_use]
    pub fn registry(mut self, registry: ObjectRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::Config`] for invalid settings and
    /// [`FrameError::ApiConnection`] if the HTTP client cannot be built.
    pub fn build(self) -> Result<FrameClient, FrameError> {
        let config = self.config.build_with_defaults(global_config())?;
        let client = FrameClient::new(config)?;
        Ok(match self.registry {
            Some(registry) => client.with_registry(registry),
            None => client,
        })
    }
}
