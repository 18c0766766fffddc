use serde::Serialize;

use crate::clients::{ErrorDetails, FrameClient, FrameError, HttpMethod, RequestOptions};
use crate::object::{FrameValue, ListObject};
use crate::rest::operations::{request_object, to_params};
use crate::rest::ApiResource;

/// Resources that can be listed with `GET {resource_url}`.
#[allow(async_fn_in_trait)]
pub trait Listable: ApiResource {
    /// Lists resources matching `params`.
    ///
    /// The returned list remembers the endpoint and the filters so that
    /// [`ListObject::next_page`] can continue from it.
    ///
    /// # Errors
    ///
    /// Returns any parameter, transport, or API error, and
    /// [`FrameError::Api`] if the response is not a list.
    async fn list<P: Serialize + ?Sized + Sync>(
        client: &FrameClient,
        params: &P,
        opts: &RequestOptions,
    ) -> Result<ListObject, FrameError> {
        list_at(client, &Self::resource_url(), params, opts).await
    }
}

/// Fetches a list from `url` and records its pagination state.
///
/// `page` and `per_page` are not kept as filters; they are tracked by the
/// list itself.
///
/// # Errors
///
/// Returns any parameter, transport, or API error, and [`FrameError::Api`]
/// if the response is not a list.
pub async fn list_at<P: Serialize + ?Sized>(
    client: &FrameClient,
    url: &str,
    params: &P,
    opts: &RequestOptions,
) -> Result<ListObject, FrameError> {
    let mut filters = to_params(params)?;
    let response = request_object(client, HttpMethod::Get, url, &filters, opts).await?;

    match response {
        FrameValue::List(mut list) => {
            filters.remove("page");
            filters.remove("per_page");
            list.set_filters(filters);
            list.set_resource_url(url);
            Ok(*list)
        }
        other => Err(FrameError::Api(ErrorDetails::new(format!(
            "Expected a list from {url}, got {}",
            other.kind_name()
        )))),
    }
}
