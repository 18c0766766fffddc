//! The base trait for Frame API resources.
//!
//! A resource is a thin typed wrapper around a [`FrameObject`]. Implementors
//! supply the wire name and the conversions to and from the record; URL
//! building, retrieval and refresh come as default methods.
//!
//! # Implementing a Resource
//!
//! ```rust,ignore
//! use frame_api::rest::{ApiResource, Creatable, Listable};
//! use frame_api::FrameObject;
//!
//! #[derive(Clone, Debug, Default)]
//! pub struct Invoice {
//!     object: FrameObject,
//! }
//!
//! impl ApiResource for Invoice {
//!     const OBJECT_NAME: &'static str = "invoice";
//!     const CLASS_NAME: &'static str = "Invoice";
//!
//!     fn from_object(object: FrameObject) -> Self { Self { object } }
//!     fn as_object(&self) -> &FrameObject { &self.object }
//!     fn as_object_mut(&mut self) -> &mut FrameObject { &mut self.object }
//!     fn into_object(self) -> FrameObject { self.object }
//! }
//!
//! // Capabilities are opted into one by one.
//! impl Creatable for Invoice {}
//! impl Listable for Invoice {}
//! ```

use crate::clients::{ErrorDetails, FrameClient, FrameError, HttpMethod, Params, RequestOptions};
use crate::object::{FrameObject, FrameValue, ObjectClass};
use crate::rest::operations::request_object;

/// A Frame API resource backed by a [`FrameObject`].
#[allow(async_fn_in_trait)]
pub trait ApiResource: Sized + Send + Sync {
    /// The `object` discriminator (e.g. `"customer"`).
    const OBJECT_NAME: &'static str;

    /// The type name used in messages (e.g. `"Customer"`).
    const CLASS_NAME: &'static str;

    /// Wraps a record.
    fn from_object(object: FrameObject) -> Self;

    /// Returns the underlying record.
    fn as_object(&self) -> &FrameObject;

    /// Returns the underlying record mutably.
    fn as_object_mut(&mut self) -> &mut FrameObject;

    /// Unwraps the record.
    fn into_object(self) -> FrameObject;

    /// The registry entry for this resource.
    #[must_use]
    fn object_class() -> ObjectClass {
        ObjectClass::Resource(Self::CLASS_NAME)
    }

    /// Collection URL, e.g. `/v1/customers`.
    #[must_use]
    fn resource_url() -> String {
        format!("/v1/{}s", Self::OBJECT_NAME.to_lowercase())
    }

    /// Instance URL for `id`, with the id URL-escaped.
    #[must_use]
    fn url_for_id(id: &str) -> String {
        format!("{}/{}", Self::resource_url(), urlencoding::encode(id))
    }

    /// Instance URL of this resource.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::InvalidParameter`] if the resource has no id.
    fn instance_url(&self) -> Result<String, FrameError> {
        match self.as_object().id() {
            Some(id) if !id.is_empty() => Ok(Self::url_for_id(id)),
            id => Err(FrameError::invalid_parameter(format!(
                "Could not determine which URL to request: {} instance has invalid ID: {id:?}",
                Self::CLASS_NAME
            ))),
        }
    }

    /// Returns the resource id.
    #[must_use]
    fn id(&self) -> Option<&str> {
        self.as_object().id()
    }

    /// Wraps a converted response.
    ///
    /// Generic records are accepted as this resource; records registered as
    /// a different variant, and non-records, are rejected.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::Api`] if the response has the wrong shape.
    fn try_from_value(value: FrameValue) -> Result<Self, FrameError> {
        match value {
            FrameValue::Object(object) => match object.class() {
                Some(class) if class != Self::object_class() => {
                    Err(FrameError::Api(ErrorDetails::new(format!(
                        "Expected a {} in the response, got a {}",
                        Self::CLASS_NAME,
                        class.name()
                    ))))
                }
                _ => Ok(Self::from_object(object)),
            },
            other => Err(FrameError::Api(ErrorDetails::new(format!(
                "Expected a {} in the response, got {}",
                Self::CLASS_NAME,
                other.kind_name()
            )))),
        }
    }

    /// Fetches a resource by id.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::InvalidRequest`] if the resource does not
    /// exist, and any other request error.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let customer = Customer::retrieve(&client, "cus_123", &RequestOptions::default()).await?;
    /// println!("{:?}", customer.name());
    /// ```
    async fn retrieve(
        client: &FrameClient,
        id: &str,
        opts: &RequestOptions,
    ) -> Result<Self, FrameError> {
        let mut resource = Self::from_object(FrameObject::with_id(id));
        resource.refresh(client, opts).await?;
        Ok(resource)
    }

    /// Re-fetches the resource, discarding local changes.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::InvalidParameter`] if the resource has no id,
    /// and any request error.
    async fn refresh(&mut self, client: &FrameClient, opts: &RequestOptions) -> Result<(), FrameError> {
        let url = self.instance_url()?;
        let response = request_object(client, HttpMethod::Get, &url, &Params::new(), opts).await?;
        self.as_object_mut().refresh_from(response)
    }
}
