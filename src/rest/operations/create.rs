use serde::Serialize;

use crate::clients::{FrameClient, FrameError, HttpMethod, RequestOptions};
use crate::rest::operations::request_object;
use crate::rest::ApiResource;

/// Resources that can be created with `POST {resource_url}`.
#[allow(async_fn_in_trait)]
pub trait Creatable: ApiResource {
    /// Creates a new resource.
    ///
    /// # Errors
    ///
    /// Returns any parameter, transport, or API error, and
    /// [`FrameError::Api`] if the response is not a record.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let params = CustomerCreateParams {
    ///     name: Some("John Doe".into()),
    ///     ..Default::default()
    /// };
    /// let customer = Customer::create(&client, &params, &RequestOptions::default()).await?;
    /// ```
    async fn create<P: Serialize + ?Sized + Sync>(
        client: &FrameClient,
        params: &P,
        opts: &RequestOptions,
    ) -> Result<Self, FrameError> {
        let url = Self::resource_url();
        let response = request_object(client, HttpMethod::Post, &url, params, opts).await?;
        Self::try_from_value(response)
    }
}
