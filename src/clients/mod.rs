//! HTTP client types for Frame API communication.
//!
//! # Overview
//!
//! - [`FrameClient`]: executes requests and translates failures into [`FrameError`]
//! - [`HttpClient`]: the `reqwest` transport underneath it
//! - [`HttpRequest`] / [`HttpResponse`]: a single exchange
//! - [`HttpMethod`]: GET, POST, PATCH, DELETE
//! - [`RequestOptions`]: per-call API key override and extra headers
//!
//! # Status handling
//!
//! - **200, 201, 202**: body decoded as JSON (an empty body is `{}`)
//! - **204**: `{}`
//! - **400, 404**: [`FrameError::InvalidRequest`]
//! - **401**: [`FrameError::Authentication`]
//! - **429**: [`FrameError::RateLimit`]
//! - **anything else**: [`FrameError::Api`]
//!
//! Nothing is retried. Transport failures (refused connections, timeouts)
//! surface as [`FrameError::ApiConnection`].

mod errors;
mod frame_client;
mod http_client;
mod http_request;
mod http_response;

pub use errors::{ErrorDetails, FrameError, InvalidHttpRequestError, UNKNOWN_ERROR_MESSAGE};
pub use frame_client::{FrameClient, FrameClientBuilder, Params};
pub use http_client::{HttpClient, SDK_VERSION};
pub use http_request::{HttpMethod, HttpRequest, HttpRequestBuilder, RequestOptions};
pub use http_response::HttpResponse;
