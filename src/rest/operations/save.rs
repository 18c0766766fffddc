use serde::Serialize;

use crate::clients::{FrameClient, FrameError, HttpMethod, RequestOptions};
use crate::rest::operations::{request_object, to_params};
use crate::rest::ApiResource;

/// Resources whose local changes can be sent with `PATCH {instance_url}`.
#[allow(async_fn_in_trait)]
pub trait Savable: ApiResource {
    /// Sends the fields changed since the last refresh, merged with
    /// `params`, and refreshes from the response.
    ///
    /// When there is nothing to send, no request is made.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::InvalidParameter`] if the resource has no id,
    /// and any transport or API error.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let mut customer = Customer::retrieve(&client, "cus_123", &opts).await?;
    /// customer.set_name("John Updated");
    /// customer.save(&client, &(), &opts).await?;
    /// ```
    async fn save<P: Serialize + ?Sized + Sync>(
        &mut self,
        client: &FrameClient,
        params: &P,
        opts: &RequestOptions,
    ) -> Result<&mut Self, FrameError> {
        let mut body = self.as_object().diff();
        body.extend(to_params(params)?);

        if body.is_empty() {
            tracing::debug!("{} has no changes to save", Self::CLASS_NAME);
            return Ok(self);
        }

        let url = self.instance_url()?;
        let response = request_object(client, HttpMethod::Patch, &url, &body, opts).await?;
        self.as_object_mut().refresh_from(response)?;
        Ok(self)
    }
}
