use serde::Serialize;

use crate::clients::{FrameClient, FrameError, HttpMethod, RequestOptions};
use crate::rest::operations::request_object;
use crate::rest::ApiResource;

/// Resources that can be deleted with `DELETE {instance_url}`.
#[allow(async_fn_in_trait)]
pub trait Deletable: ApiResource {
    /// Deletes this resource, returning the server's final representation.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::InvalidParameter`] if the resource has no id,
    /// and any transport or API error.
    async fn delete<P: Serialize + ?Sized + Sync>(
        &self,
        client: &FrameClient,
        params: &P,
        opts: &RequestOptions,
    ) -> Result<Self, FrameError> {
        let url = self.instance_url()?;
        let response = request_object(client, HttpMethod::Delete, &url, params, opts).await?;
        Self::try_from_value(response)
    }

    /// Deletes the resource with the given id.
    ///
    /// # Errors
    ///
    /// Returns any parameter, transport, or API error.
    async fn delete_by_id<P: Serialize + ?Sized + Sync>(
        client: &FrameClient,
        id: &str,
        params: &P,
        opts: &RequestOptions,
    ) -> Result<Self, FrameError> {
        let url = Self::url_for_id(id);
        let response = request_object(client, HttpMethod::Delete, &url, params, opts).await?;
        Self::try_from_value(response)
    }
}
