//! Request helpers shared by the resource capabilities.

use serde::Serialize;
use serde_json::Value;

use crate::clients::{FrameClient, FrameError, HttpMethod, Params, RequestOptions};
use crate::object::{ConvertContext, FrameValue};

/// Serializes request parameters into a [`Params`] map.
///
/// `null` (including `()` and `None`) becomes an empty map.
///
/// # Errors
///
/// Returns [`FrameError::InvalidParameter`] if `params` does not serialize
/// to a JSON object.
pub fn to_params<P: Serialize + ?Sized>(params: &P) -> Result<Params, FrameError> {
    match serde_json::to_value(params) {
        Ok(Value::Null) => Ok(Params::new()),
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(FrameError::invalid_parameter(format!(
            "Failed to serialize params: expected an object, got {other}"
        ))),
        Err(e) => Err(FrameError::invalid_parameter(format!(
            "Failed to serialize params: {e}"
        ))),
    }
}

/// Sends a request and returns the decoded body.
///
/// # Errors
///
/// Returns any parameter, transport, or API error.
pub async fn request<P: Serialize + ?Sized>(
    client: &FrameClient,
    method: HttpMethod,
    path: &str,
    params: &P,
    opts: &RequestOptions,
) -> Result<Value, FrameError> {
    let params = to_params(params)?;
    client.execute(method, path, &params, opts).await
}

/// Sends a request and converts the body through the client's registry.
///
/// # Errors
///
/// Returns any parameter, transport, or API error.
pub async fn request_object<P: Serialize + ?Sized>(
    client: &FrameClient,
    method: HttpMethod,
    path: &str,
    params: &P,
    opts: &RequestOptions,
) -> Result<FrameValue, FrameError> {
    let response = request(client, method, path, params, opts).await?;
    Ok(client
        .registry()
        .convert(response, &ConvertContext::for_url(path)))
}
