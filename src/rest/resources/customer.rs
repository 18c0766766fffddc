//! Customer resource implementation.

use std::ops::{Deref, DerefMut};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::clients::{FrameClient, FrameError, HttpMethod, RequestOptions};
use crate::object::{FrameObject, ListObject};
use crate::rest::operations::{list_at, request_object};
use crate::rest::{ApiResource, Creatable, Deletable, Listable, Savable};

/// Account state reported in a customer's `status` field.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CustomerStatus {
    /// The customer can be charged.
    Active,
    /// The customer was blocked with [`Customer::block`].
    Blocked,
    /// A status this version of the crate does not know about.
    #[serde(other)]
    Other,
}

impl CustomerStatus {
    /// Parses the wire value; unrecognized values map to [`Self::Other`].
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value {
            "active" => Self::Active,
            "blocked" => Self::Blocked,
            _ => Self::Other,
        }
    }
}

/// A Frame customer.
///
/// Field access goes through the typed accessors below, or through the
/// underlying [`FrameObject`] (via `Deref`) for anything else.
///
/// # Example
///
/// ```rust,ignore
/// use frame_api::{ApiResource, Customer, RequestOptions, Savable};
///
/// let opts = RequestOptions::default();
/// let mut customer = Customer::retrieve(&client, "cus_123", &opts).await?;
/// customer.set_name("John Updated");
/// customer.save(&client, &(), &opts).await?;
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Customer {
    object: FrameObject,
}

impl Customer {
    /// Creates an empty, unsaved customer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            object: FrameObject::with_class(Self::object_class()),
        }
    }

    /// Searches customers with `GET /v1/customers/search`.
    ///
    /// # Errors
    ///
    /// Returns any parameter, transport, or API error, and
    /// [`FrameError::Api`] if the response is not a list.
    pub async fn search<P: Serialize + ?Sized + Sync>(
        client: &FrameClient,
        params: &P,
        opts: &RequestOptions,
    ) -> Result<ListObject, FrameError> {
        list_at(client, &format!("{}/search", Self::resource_url()), params, opts).await
    }

    /// Updates the customer with the given id using `PATCH`.
    ///
    /// # Errors
    ///
    /// Returns any parameter, transport, or API error.
    pub async fn update<P: Serialize + ?Sized + Sync>(
        client: &FrameClient,
        id: &str,
        params: &P,
        opts: &RequestOptions,
    ) -> Result<Self, FrameError> {
        let url = Self::url_for_id(id);
        let response = request_object(client, HttpMethod::Patch, &url, params, opts).await?;
        Self::try_from_value(response)
    }

    /// Blocks this customer, returning the updated customer.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::InvalidParameter`] if the customer has no id,
    /// and any transport or API error.
    pub async fn block<P: Serialize + ?Sized + Sync>(
        &self,
        client: &FrameClient,
        params: &P,
        opts: &RequestOptions,
    ) -> Result<Self, FrameError> {
        Self::action(client, &self.instance_url()?, "block", params, opts).await
    }

    /// Unblocks this customer, returning the updated customer.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::InvalidParameter`] if the customer has no id,
    /// and any transport or API error.
    pub async fn unblock<P: Serialize + ?Sized + Sync>(
        &self,
        client: &FrameClient,
        params: &P,
        opts: &RequestOptions,
    ) -> Result<Self, FrameError> {
        Self::action(client, &self.instance_url()?, "unblock", params, opts).await
    }

    /// Blocks the customer with the given id.
    ///
    /// # Errors
    ///
    /// Returns any transport or API error.
    pub async fn block_by_id<P: Serialize + ?Sized + Sync>(
        client: &FrameClient,
        id: &str,
        params: &P,
        opts: &RequestOptions,
    ) -> Result<Self, FrameError> {
        Self::action(client, &Self::url_for_id(id), "block", params, opts).await
    }

    /// Unblocks the customer with the given id.
    ///
    /// # Errors
    ///
    /// Returns any transport or API error.
    pub async fn unblock_by_id<P: Serialize + ?Sized + Sync>(
        client: &FrameClient,
        id: &str,
        params: &P,
        opts: &RequestOptions,
    ) -> Result<Self, FrameError> {
        Self::action(client, &Self::url_for_id(id), "unblock", params, opts).await
    }

    async fn action<P: Serialize + ?Sized + Sync>(
        client: &FrameClient,
        instance_url: &str,
        action: &str,
        params: &P,
        opts: &RequestOptions,
    ) -> Result<Self, FrameError> {
        let url = format!("{instance_url}/{action}");
        let response = request_object(client, HttpMethod::Post, &url, params, opts).await?;
        Self::try_from_value(response)
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.object.get_str("name")
    }

    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.object.get_str("email")
    }

    #[must_use]
    pub fn phone(&self) -> Option<&str> {
        self.object.get_str("phone")
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.object.get_str("description")
    }

    /// Parsed `status`; unknown values become [`CustomerStatus::Other`].
    #[must_use]
    pub fn status(&self) -> Option<CustomerStatus> {
        self.object.get_str("status").map(CustomerStatus::parse)
    }

    /// Whether the customer belongs to live rather than test data.
    #[must_use]
    pub fn livemode(&self) -> Option<bool> {
        self.object.get_bool("livemode")
    }

    /// Whether this is the representation of a deleted customer.
    #[must_use]
    pub fn deleted(&self) -> bool {
        self.object.get_bool("deleted").unwrap_or(false)
    }

    /// Creation time, from unix seconds.
    #[must_use]
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.timestamp("created")
    }

    /// Last update time, from unix seconds.
    #[must_use]
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.timestamp("updated")
    }

    fn timestamp(&self, field: &str) -> Option<DateTime<Utc>> {
        self.object
            .get_i64(field)
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
    }

    /// Free-form key/value pairs attached to the customer.
    #[must_use]
    pub fn metadata(&self) -> Option<&FrameObject> {
        self.object.get_object("metadata")
    }

    /// Billing address record (`line_1`, `city`, `state`, `postal_code`, `country`).
    #[must_use]
    pub fn billing_address(&self) -> Option<&FrameObject> {
        self.object.get_object("billing_address")
    }

    /// Shipping address record, same shape as the billing address.
    #[must_use]
    pub fn shipping_address(&self) -> Option<&FrameObject> {
        self.object.get_object("shipping_address")
    }

    /// Sets `name`; sent on the next [`save`](Savable::save).
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.object.set("name", name.into());
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.object.set("email", email.into());
    }

    pub fn set_phone(&mut self, phone: impl Into<String>) {
        self.object.set("phone", phone.into());
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.object.set("description", description.into());
    }
}

impl ApiResource for Customer {
    const OBJECT_NAME: &'static str = "customer";
    const CLASS_NAME: &'static str = "Customer";

    fn from_object(object: FrameObject) -> Self {
        Self { object }
    }

    fn as_object(&self) -> &FrameObject {
        &self.object
    }

    fn as_object_mut(&mut self) -> &mut FrameObject {
        &mut self.object
    }

    fn into_object(self) -> FrameObject {
        self.object
    }
}

impl Creatable for Customer {}
impl Listable for Customer {}
impl Deletable for Customer {}
impl Savable for Customer {}

impl Deref for Customer {
    type Target = FrameObject;

    fn deref(&self) -> &Self::Target {
        &self.object
    }
}

impl DerefMut for Customer {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.object
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AddressParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
}

#[derive(Debug, Clone, Serialize, Default, PartialEq)]
pub struct CustomerCreateParams {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_address: Option<AddressParams>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_address: Option<AddressParams>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Map<String, Value>>,
}

#[derive(Debug, Clone, Serialize, Default, PartialEq)]
pub struct CustomerUpdateParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_address: Option<AddressParams>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_address: Option<AddressParams>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Map<String, Value>>,
}

#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
pub struct CustomerListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
pub struct CustomerSearchParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<CustomerStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_before: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_after: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
}
