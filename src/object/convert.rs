//! Conversion of decoded responses into records and lists.
//!
//! Every response body passes through [`convert_to_frame_object`]. The
//! conversion is total: any JSON input produces a [`FrameValue`].
//!
//! 1. Arrays are converted element by element, keeping their order.
//! 2. Objects whose `object` field resolves in the registry become that
//!    variant (a [`ListObject`] for the list class).
//! 3. Other objects with a `data` array become a [`ListObject`].
//! 4. Remaining objects become a generic [`FrameObject`].
//! 5. Scalars pass through.

use serde_json::{Map, Value};

use crate::object::frame_object::Fields;
use crate::object::{FrameObject, FrameValue, ListObject, ObjectClass, ObjectRegistry};

/// Request context attached to converted values.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConvertContext<'a> {
    /// Path of the request that produced the value.
    pub resource_url: Option<&'a str>,
}

impl<'a> ConvertContext<'a> {
    /// Context for a response fetched from `resource_url`.
    #[must_use]
    pub const fn for_url(resource_url: &'a str) -> Self {
        Self {
            resource_url: Some(resource_url),
        }
    }
}

/// Converts a decoded JSON value into a [`FrameValue`].
///
/// `ctx` only applies to the top-level value: lists nested inside a record
/// do not know where they were fetched from.
///
/// # Example
///
/// ```rust
/// use frame_api::{convert_to_frame_object, ConvertContext, ObjectClass, ObjectRegistry};
/// use serde_json::json;
///
/// let value = convert_to_frame_object(
///     json!({"object": "customer", "id": "cus_1", "name": "John"}),
///     ObjectRegistry::builtin(),
///     &ConvertContext::default(),
/// );
/// let customer = value.as_object().unwrap();
/// assert_eq!(customer.class(), Some(ObjectClass::Resource("Customer")));
/// assert_eq!(customer.get_str("name"), Some("John"));
/// ```
#[must_use]
pub fn convert_to_frame_object(
    value: Value,
    registry: &ObjectRegistry,
    ctx: &ConvertContext<'_>,
) -> FrameValue {
    match value {
        Value::Array(items) => FrameValue::Array(
            items
                .into_iter()
                .map(|item| convert_to_frame_object(item, registry, &ConvertContext::default()))
                .collect(),
        ),
        Value::Object(map) => convert_map(map, registry, ctx),
        Value::Null => FrameValue::Null,
        Value::Bool(b) => FrameValue::Bool(b),
        Value::Number(n) => FrameValue::Number(n),
        Value::String(s) => FrameValue::String(s),
    }
}

fn convert_map(map: Map<String, Value>, registry: &ObjectRegistry, ctx: &ConvertContext<'_>) -> FrameValue {
    let class = map
        .get("object")
        .and_then(Value::as_str)
        .and_then(|discriminator| registry.class_for(discriminator));

    match class {
        Some(ObjectClass::List) => {
            FrameValue::from(ListObject::construct_from(map, registry, ctx))
        }
        Some(class) => FrameValue::Object(FrameObject::construct_from(
            convert_fields(map, registry),
            Some(class),
        )),
        None if map.get("data").is_some_and(Value::is_array) => {
            FrameValue::from(ListObject::construct_from(map, registry, ctx))
        }
        None => FrameValue::Object(FrameObject::construct_from(
            convert_fields(map, registry),
            None,
        )),
    }
}

/// Converts every field of a JSON object, keeping field order.
#[must_use]
pub fn convert_fields(map: Map<String, Value>, registry: &ObjectRegistry) -> Fields {
    map.into_iter()
        .map(|(key, value)| {
            let value = convert_to_frame_object(value, registry, &ConvertContext::default());
            (key, value)
        })
        .collect()
}
