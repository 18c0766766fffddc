//! Field values held by a [`FrameObject`].

use serde::{Serialize, Serializer};
use serde_json::{Number, Value};

use crate::object::convert::ConvertContext;
use crate::object::{FrameObject, ListObject, ObjectRegistry};

/// A single field value: a scalar, a sequence, a nested record, or a list.
///
/// Plain JSON converts into a `FrameValue` through the built-in
/// [`ObjectRegistry`], so nested objects with a known discriminator become
/// their registered variant.
///
/// ```rust
/// use frame_api::FrameValue;
/// use serde_json::json;
///
/// let value = FrameValue::from(json!({"object": "customer", "id": "cus_1"}));
/// assert_eq!(value.as_object().unwrap().id(), Some("cus_1"));
///
/// assert_eq!(FrameValue::from("hello").as_str(), Some("hello"));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub enum FrameValue {
    /// JSON `null`.
    #[default]
    Null,
    /// A boolean.
    Bool(bool),
    /// A number.
    Number(Number),
    /// A string.
    String(String),
    /// A sequence of values.
    Array(Vec<FrameValue>),
    /// A nested record.
    Object(FrameObject),
    /// A nested paginated list.
    List(Box<ListObject>),
}

impl FrameValue {
    /// Converts the value into plain JSON, recursively.
    #[must_use]
    pub fn to_plain_value(&self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Bool(b) => Value::Bool(*b),
            Self::Number(n) => Value::Number(n.clone()),
            Self::String(s) => Value::String(s.clone()),
            Self::Array(items) => Value::Array(items.iter().map(Self::to_plain_value).collect()),
            Self::Object(object) => object.to_plain_value(),
            Self::List(list) => list.to_plain_value(),
        }
    }

    /// Returns `true` for [`FrameValue::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_array(&self) -> Option<&[Self]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_object(&self) -> Option<&FrameObject> {
        match self {
            Self::Object(object) => Some(object),
            _ => None,
        }
    }

    pub fn as_object_mut(&mut self) -> Option<&mut FrameObject> {
        match self {
            Self::Object(object) => Some(object),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&ListObject> {
        match self {
            Self::List(list) => Some(list),
            _ => None,
        }
    }

    /// Short name of the variant, used in error messages.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Array(_) => "array",
            Self::Object(_) => "object",
            Self::List(_) => "list",
        }
    }
}

impl Serialize for FrameValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_plain_value().serialize(serializer)
    }
}

impl From<Value> for FrameValue {
    fn from(value: Value) -> Self {
        ObjectRegistry::builtin().convert(value, &ConvertContext::default())
    }
}

impl From<&str> for FrameValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for FrameValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<bool> for FrameValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for FrameValue {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

impl From<u64> for FrameValue {
    fn from(value: u64) -> Self {
        Self::Number(value.into())
    }
}

impl From<f64> for FrameValue {
    /// Non-finite floats have no JSON form and become `Null`.
    fn from(value: f64) -> Self {
        Number::from_f64(value).map_or(Self::Null, Self::Number)
    }
}

impl From<FrameObject> for FrameValue {
    fn from(value: FrameObject) -> Self {
        Self::Object(value)
    }
}

impl From<ListObject> for FrameValue {
    fn from(value: ListObject) -> Self {
        Self::List(Box::new(value))
    }
}

impl<T: Into<Self>> From<Vec<T>> for FrameValue {
    fn from(value: Vec<T>) -> Self {
        Self::Array(value.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Self>> From<Option<T>> for FrameValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}
