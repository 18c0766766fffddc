//! HTTP response types for the Frame API client.

use std::collections::HashMap;

use serde_json::Value;

/// A raw response from the Frame API.
///
/// The body is kept undecoded so error translation can report it verbatim.
///
/// # Example
///
/// ```rust
/// use frame_api::clients::HttpResponse;
/// use std::collections::HashMap;
///
/// let response = HttpResponse::new(200, HashMap::new(), r#"{"id":"cus_1"}"#.to_string());
/// assert!(response.is_ok());
/// assert_eq!(response.json().unwrap()["id"], "cus_1");
/// ```
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// HTTP status code.
    pub code: u16,
    /// Response headers, lowercased names mapped to every value received.
    pub headers: HashMap<String, Vec<String>>,
    /// Raw response body.
    pub body: String,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`.
    #[must_use]
    pub const fn new(code: u16, headers: HashMap<String, Vec<String>>, body: String) -> Self {
        Self {
            code,
            headers,
            body,
        }
    }

    /// Returns `true` if the response status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns the `X-Request-Id` header value, if present.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.headers
            .get("x-request-id")
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Decodes the body as JSON.
    ///
    /// An empty (or whitespace only) body decodes to an empty object.
    ///
    /// # Errors
    ///
    /// Returns the decoding error if the body is not valid JSON.
    pub fn json(&self) -> Result<Value, serde_json::Error> {
        if self.body.trim().is_empty() {
            return Ok(Value::Object(serde_json::Map::new()));
        }
        serde_json::from_str(&self.body)
    }
}
