//! Paginated collections returned by list endpoints.
//!
//! Frame list endpoints respond with an envelope:
//!
//! ```json
//! {"data": [...], "meta": {"has_more": true, "page": 1, "url": "/v1/customers?per_page=25"}}
//! ```
//!
//! A [`ListObject`] keeps the converted items along with the page state it
//! needs to fetch the following page: the endpoint it came from, the filters
//! used, the current page and the page size.

use std::fmt;
use std::ops::Index;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Serialize, Serializer};
use serde_json::{json, Map, Value};

use crate::clients::{ErrorDetails, FrameClient, FrameError, HttpMethod, Params, RequestOptions};
use crate::object::convert::{convert_fields, convert_to_frame_object, ConvertContext};
use crate::object::{FrameObject, FrameValue, ObjectClass, ObjectRegistry};

/// Page number assumed when the envelope carries none.
pub const DEFAULT_PAGE: u32 = 1;

/// Page size assumed when the envelope carries none.
pub const DEFAULT_PER_PAGE: u32 = 10;

static PER_PAGE_PATTERN: OnceLock<Option<Regex>> = OnceLock::new();

fn per_page_from_url(url: &str) -> Option<u32> {
    PER_PAGE_PATTERN
        .get_or_init(|| Regex::new(r"[?&]per_page=(\d+)").ok())
        .as_ref()?
        .captures(url)?
        .get(1)?
        .as_str()
        .parse()
        .ok()
        .filter(|n| *n >= 1)
}

fn positive_u32(value: Option<&Value>) -> Option<u32> {
    value
        .and_then(Value::as_u64)
        .and_then(|n| u32::try_from(n).ok())
        .filter(|n| *n >= 1)
}

/// Page size stated by an envelope's `meta`, either directly or through the
/// `per_page` query parameter of its `url`.
fn meta_per_page(meta: Option<&Value>) -> Option<u32> {
    positive_u32(meta.and_then(|m| m.get("per_page"))).or_else(|| {
        meta.and_then(|m| m.get("url"))
            .and_then(Value::as_str)
            .and_then(per_page_from_url)
    })
}

/// A page of results from a list endpoint.
///
/// # Example
///
/// ```rust
/// use frame_api::{FrameValue, ListObject};
/// use serde_json::json;
///
/// let value = FrameValue::from(json!({
///     "data": [{"id": "cus_1", "object": "customer"}],
///     "meta": {"has_more": false, "page": 1, "url": "/v1/customers?per_page=25"},
/// }));
/// let list = value.as_list().unwrap();
///
/// assert_eq!(list.len(), 1);
/// assert_eq!(list.per_page(), 25);
/// assert_eq!(list[0].as_object().unwrap().id(), Some("cus_1"));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ListObject {
    object: FrameObject,
    data: Vec<FrameValue>,
    has_more: bool,
    page: u32,
    per_page: u32,
    filters: Params,
    resource_url: Option<String>,
}

impl ListObject {
    /// Builds a list from a decoded envelope.
    ///
    /// Items in `data` are converted individually. Every other field of the
    /// envelope stays readable through [`fields`](Self::fields).
    #[must_use]
    pub fn construct_from(
        mut map: Map<String, Value>,
        registry: &ObjectRegistry,
        ctx: &ConvertContext<'_>,
    ) -> Self {
        let data = match map.remove("data") {
            Some(Value::Array(items)) => items
                .into_iter()
                .map(|item| convert_to_frame_object(item, registry, &ConvertContext::default()))
                .collect(),
            Some(other) => {
                map.insert("data".to_string(), other);
                Vec::new()
            }
            None => Vec::new(),
        };

        let meta = map.get("meta");
        let has_more = meta
            .and_then(|m| m.get("has_more"))
            .and_then(Value::as_bool)
            .unwrap_or(false);
        let page = positive_u32(meta.and_then(|m| m.get("page"))).unwrap_or(DEFAULT_PAGE);
        let per_page = meta_per_page(meta).unwrap_or(DEFAULT_PER_PAGE);

        Self {
            object: FrameObject::construct_from(
                convert_fields(map, registry),
                Some(ObjectClass::List),
            ),
            data,
            has_more,
            page,
            per_page,
            filters: Params::new(),
            resource_url: ctx.resource_url.map(str::to_string),
        }
    }

    /// Returns an empty last page.
    #[must_use]
    pub fn empty() -> Self {
        let mut meta = Map::new();
        meta.insert("has_more".to_string(), Value::Bool(false));
        meta.insert("page".to_string(), DEFAULT_PAGE.into());

        let mut envelope = Map::new();
        envelope.insert("data".to_string(), Value::Array(Vec::new()));
        envelope.insert("meta".to_string(), Value::Object(meta));

        Self::construct_from(envelope, ObjectRegistry::builtin(), &ConvertContext::default())
    }

    /// The items on this page.
    #[must_use]
    pub fn data(&self) -> &[FrameValue] {
        &self.data
    }

    /// Consumes the list, returning its items.
    #[must_use]
    pub fn into_data(self) -> Vec<FrameValue> {
        self.data
    }

    /// Items that are records, skipping scalars.
    pub fn objects(&self) -> impl Iterator<Item = &FrameObject> {
        self.data.iter().filter_map(FrameValue::as_object)
    }

    /// The envelope fields other than `data` (e.g. `meta`).
    #[must_use]
    pub const fn fields(&self) -> &FrameObject {
        &self.object
    }

    #[must_use]
    pub const fn has_more(&self) -> bool {
        self.has_more
    }

    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    #[must_use]
    pub const fn per_page(&self) -> u32 {
        self.per_page
    }

    /// Query parameters reapplied when fetching further pages.
    #[must_use]
    pub const fn filters(&self) -> &Params {
        &self.filters
    }

    pub fn set_filters(&mut self, filters: Params) {
        self.filters = filters;
    }

    /// The endpoint this page was fetched from.
    #[must_use]
    pub fn resource_url(&self) -> Option<&str> {
        self.resource_url.as_deref()
    }

    pub fn set_resource_url(&mut self, resource_url: impl Into<String>) {
        self.resource_url = Some(resource_url.into());
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FrameValue> {
        self.data.iter()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&FrameValue> {
        self.data.get(index)
    }

    #[must_use]
    pub fn first(&self) -> Option<&FrameValue> {
        self.data.first()
    }

    #[must_use]
    pub fn last(&self) -> Option<&FrameValue> {
        self.data.last()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Number of items on this page.
    #[must_use]
    pub fn total_count(&self) -> usize {
        self.data.len()
    }

    fn first_object_name(&self) -> Option<&str> {
        self.first()
            .and_then(FrameValue::as_object)
            .and_then(FrameObject::object_name)
    }

    fn pagination_url(&self) -> Result<String, FrameError> {
        if let Some(url) = &self.resource_url {
            return Ok(url.clone());
        }
        self.first_object_name()
            .map(|object| format!("/v1/{object}s"))
            .ok_or_else(|| {
                FrameError::InvalidRequest(ErrorDetails::new(
                    "Could not determine which URL to request for the next page",
                ))
            })
    }

    /// Fetches the page after this one.
    ///
    /// When there are no more pages, an empty list is returned without any
    /// request. Otherwise the list's filters, `extra_params`, the next page
    /// number and the page size are sent to the list's endpoint. A non-empty
    /// result replaces the items, envelope and page state of `self`; the page
    /// size is kept unless the new envelope states one.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::InvalidRequest`] if the endpoint is unknown,
    /// and any error from the request itself.
    pub async fn next_page(
        &mut self,
        client: &FrameClient,
        extra_params: Option<Params>,
        opts: &RequestOptions,
    ) -> Result<Self, FrameError> {
        if !self.has_more {
            return Ok(Self::empty());
        }

        let url = self.pagination_url()?;
        let next_page = self.page.saturating_add(1);

        let mut params = self.filters.clone();
        if let Some(extra) = extra_params {
            params.extend(extra);
        }
        params.insert("page".to_string(), next_page.into());
        params.insert("per_page".to_string(), self.per_page.into());

        let response = client.execute(HttpMethod::Get, &url, &params, opts).await?;
        let reported_per_page = meta_per_page(response.get("meta"));
        match client
            .registry()
            .convert(response, &ConvertContext::for_url(&url))
        {
            FrameValue::List(list) if !list.is_empty() => {
                let list = *list;
                self.object = list.object;
                self.data = list.data;
                self.has_more = list.has_more;
                self.page = next_page;
                if let Some(per_page) = reported_per_page {
                    self.per_page = per_page;
                }
                Ok(self.clone())
            }
            FrameValue::List(list) => Ok(*list),
            other => {
                tracing::warn!(
                    "Expected a list from {}, got {}; treating as the last page",
                    url,
                    other.kind_name()
                );
                Ok(Self::empty())
            }
        }
    }

    /// Retrieves a single item of the type held by this list.
    ///
    /// The item type comes from the first item's `object` field.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::ResourceNotFound`] if the item type cannot be
    /// determined, and any error from the request itself.
    pub async fn retrieve(
        &self,
        client: &FrameClient,
        id: &str,
        opts: &RequestOptions,
    ) -> Result<FrameObject, FrameError> {
        let (object_name, class) = self
            .first_object_name()
            .and_then(|name| client.registry().class_for(name).map(|class| (name, class)))
            .ok_or_else(|| {
                FrameError::ResourceNotFound(ErrorDetails::new(
                    "Could not determine the item type of this list",
                ))
            })?;

        let url = format!("/v1/{object_name}s/{}", urlencoding::encode(id));
        let response = client
            .execute(HttpMethod::Get, &url, &Params::new(), opts)
            .await?;

        let mut object = FrameObject::with_class(class);
        object.refresh_from(client.registry().convert(response, &ConvertContext::for_url(&url)))?;
        Ok(object)
    }

    /// Converts the list into `{data, meta: {has_more, page, per_page}}`.
    #[must_use]
    pub fn to_plain_value(&self) -> Value {
        json!({
            "data": self.data.iter().map(FrameValue::to_plain_value).collect::<Vec<_>>(),
            "meta": {
                "has_more": self.has_more,
                "page": self.page,
                "per_page": self.per_page,
            },
        })
    }
}

impl Index<usize> for ListObject {
    type Output = FrameValue;

    fn index(&self, index: usize) -> &Self::Output {
        &self.data[index]
    }
}

impl<'a> IntoIterator for &'a ListObject {
    type Item = &'a FrameValue;
    type IntoIter = std::slice::Iter<'a, FrameValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

impl IntoIterator for ListObject {
    type Item = FrameValue;
    type IntoIter = std::vec::IntoIter<FrameValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

impl Serialize for ListObject {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_plain_value().serialize(serializer)
    }
}

impl fmt::Display for ListObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#}", self.to_plain_value())
    }
}
