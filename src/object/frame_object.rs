//! The dynamic record underlying every API resource.
//!
//! A [`FrameObject`] holds an ordered map of field names to [`FrameValue`]s
//! plus a snapshot of the values it was last synchronized with. The
//! snapshot is the baseline for [`FrameObject::diff`], which produces the
//! minimal body for an update request.
//!
//! # How It Works
//!
//! [`initialize_from`](FrameObject::initialize_from) replaces both the
//! current values and the snapshot. This happens on construction, on
//! refresh, and after a successful save. Individual writes through
//! [`set`](FrameObject::set) only touch the current values, so they show up
//! in the diff until the next re-initialization.
//!
//! # Example
//!
//! ```rust
//! use frame_api::FrameObject;
//! use serde_json::json;
//!
//! let mut customer = FrameObject::from_json(json!({
//!     "id": "cus_123",
//!     "name": "John",
//!     "email": "john@example.com",
//! }));
//! assert!(!customer.is_dirty());
//!
//! customer.set("name", "John Updated");
//! assert_eq!(customer.diff(), json!({"name": "John Updated"}).as_object().unwrap().clone());
//! ```

use std::fmt;

use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::clients::{ErrorDetails, FrameError};
use crate::object::convert::convert_fields;
use crate::object::{FrameValue, ListObject, ObjectClass, ObjectRegistry};

/// Ordered field storage.
pub type Fields = IndexMap<String, FrameValue>;

/// A record with dynamic fields and change tracking.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameObject {
    id: Option<String>,
    class: Option<ObjectClass>,
    values: Fields,
    original_values: Fields,
}

impl FrameObject {
    /// Creates an empty generic record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty record with only an id.
    ///
    /// The id is not a field; it is used to build instance URLs before the
    /// record has been fetched.
    #[must_use]
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    /// Creates an empty record tagged with a variant.
    #[must_use]
    pub fn with_class(class: ObjectClass) -> Self {
        Self {
            class: Some(class),
            ..Self::default()
        }
    }

    /// Creates a record from already converted fields.
    #[must_use]
    pub fn construct_from(values: Fields, class: Option<ObjectClass>) -> Self {
        let mut object = Self {
            class,
            ..Self::default()
        };
        object.initialize_from(values);
        object
    }

    /// Creates a generic record from plain JSON.
    ///
    /// Nested values are converted with the built-in registry. Anything
    /// other than a JSON object yields an empty record.
    #[must_use]
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Object(map) => Self::construct_from(
                convert_fields(map, ObjectRegistry::builtin()),
                None,
            ),
            _ => Self::new(),
        }
    }

    /// Replaces the current values and the snapshot with `values`.
    ///
    /// The id is re-derived from the `id` field when present.
    pub fn initialize_from(&mut self, values: Fields) {
        if let Some(id) = values.get("id").and_then(id_from_value) {
            self.id = Some(id);
        }
        self.original_values.clone_from(&values);
        self.values = values;
    }

    /// Re-initializes the record from a converted response.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::Api`] if the response is not a record.
    pub fn refresh_from(&mut self, response: FrameValue) -> Result<(), FrameError> {
        match response {
            FrameValue::Object(object) => {
                self.initialize_from(object.values);
                Ok(())
            }
            other => Err(FrameError::Api(ErrorDetails::new(format!(
                "Expected an object in the response, got {}",
                other.kind_name()
            )))),
        }
    }

    /// Returns the record id.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Returns the variant this record was built as.
    #[must_use]
    pub const fn class(&self) -> Option<ObjectClass> {
        self.class
    }

    /// Returns the `object` discriminator field.
    #[must_use]
    pub fn object_name(&self) -> Option<&str> {
        self.get_str("object")
    }

    /// Returns a field, or `None` if it is not set.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&FrameValue> {
        self.values.get(field)
    }

    /// Returns a mutable reference to a field.
    ///
    /// Edits made through the reference are picked up by [`diff`](Self::diff).
    pub fn get_mut(&mut self, field: &str) -> Option<&mut FrameValue> {
        self.values.get_mut(field)
    }

    /// Returns a string field, or `None` if it is missing or not a string.
    #[must_use]
    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(FrameValue::as_str)
    }

    /// Returns a boolean field.
    #[must_use]
    pub fn get_bool(&self, field: &str) -> Option<bool> {
        self.get(field).and_then(FrameValue::as_bool)
    }

    /// Returns an integer field. Floats and out-of-range numbers yield `None`.
    #[must_use]
    pub fn get_i64(&self, field: &str) -> Option<i64> {
        self.get(field).and_then(FrameValue::as_i64)
    }

    /// Returns a numeric field as `f64`.
    #[must_use]
    pub fn get_f64(&self, field: &str) -> Option<f64> {
        self.get(field).and_then(FrameValue::as_f64)
    }

    /// Returns a nested record, or `None` if the field holds anything else.
    #[must_use]
    pub fn get_object(&self, field: &str) -> Option<&Self> {
        self.get(field).and_then(FrameValue::as_object)
    }

    /// Returns a nested paginated list.
    #[must_use]
    pub fn get_list(&self, field: &str) -> Option<&ListObject> {
        self.get(field).and_then(FrameValue::as_list)
    }

    /// Returns the items of a plain array field.
    #[must_use]
    pub fn get_array(&self, field: &str) -> Option<&[FrameValue]> {
        self.get(field).and_then(FrameValue::as_array)
    }

    /// Sets a field. The snapshot is left untouched.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<FrameValue>) {
        let field = field.into();
        let value = value.into();
        if field == "id" {
            self.id = id_from_value(&value);
        }
        self.values.insert(field, value);
    }

    /// Sets every field in `attributes`.
    pub fn update_attributes(&mut self, attributes: Map<String, Value>) {
        for (field, value) in attributes {
            self.set(field, FrameValue::from(value));
        }
    }

    /// Returns `true` if the field is set.
    #[must_use]
    pub fn contains_key(&self, field: &str) -> bool {
        self.values.contains_key(field)
    }

    /// Field names in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FrameValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Consumes the record, returning its current fields.
    #[must_use]
    pub fn into_values(self) -> Fields {
        self.values
    }

    /// Returns the fields changed since the last re-initialization.
    ///
    /// Fields only present in the current values are included. When a
    /// nested record or map exists on both sides, only its changed leaves
    /// are included under the parent key. Arrays and scalars are sent whole.
    /// Fields removed since the snapshot are not reported.
    #[must_use]
    pub fn diff(&self) -> Map<String, Value> {
        let mut diff = Map::new();
        for (field, current) in &self.values {
            let current = current.to_plain_value();
            match self.original_values.get(field) {
                Some(original) => {
                    if let Some(changed) = diff_values(&original.to_plain_value(), &current) {
                        diff.insert(field.clone(), changed);
                    }
                }
                None => {
                    diff.insert(field.clone(), current);
                }
            }
        }
        diff
    }

    /// Returns `true` if [`diff`](Self::diff) is non-empty.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        !self.diff().is_empty()
    }

    /// Converts the record into plain JSON, recursively.
    #[must_use]
    pub fn to_plain_value(&self) -> Value {
        Value::Object(
            self.values
                .iter()
                .map(|(k, v)| (k.clone(), v.to_plain_value()))
                .collect(),
        )
    }

    /// Returns `true` if both records carry the same non-empty id.
    #[must_use]
    pub fn same_entity(&self, other: &Self) -> bool {
        matches!((&self.id, &other.id), (Some(a), Some(b)) if a == b)
    }
}

// Returns `None` when nothing changed.
fn diff_values(original: &Value, current: &Value) -> Option<Value> {
    if original == current {
        return None;
    }
    match (original, current) {
        (Value::Object(orig_map), Value::Object(curr_map)) => {
            let mut nested = Map::new();
            for (key, curr_value) in curr_map {
                match orig_map.get(key) {
                    Some(orig_value) => {
                        if let Some(changed) = diff_values(orig_value, curr_value) {
                            nested.insert(key.clone(), changed);
                        }
                    }
                    None => {
                        nested.insert(key.clone(), curr_value.clone());
                    }
                }
            }
            if nested.is_empty() {
                None
            } else {
                Some(Value::Object(nested))
            }
        }
        _ => Some(current.clone()),
    }
}

fn id_from_value(value: &FrameValue) -> Option<String> {
    match value {
        FrameValue::String(s) => Some(s.clone()),
        FrameValue::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

impl<'a> IntoIterator for &'a FrameObject {
    type Item = (&'a String, &'a FrameValue);
    type IntoIter = indexmap::map::Iter<'a, String, FrameValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

impl Serialize for FrameObject {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_plain_value().serialize(serializer)
    }
}

impl fmt::Display for FrameObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#}", self.to_plain_value())
    }
}

impl From<Map<String, Value>> for FrameObject {
    fn from(map: Map<String, Value>) -> Self {
        Self::from_json(Value::Object(map))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn customer() -> FrameObject {
        FrameObject::from_json(json!({
            "id": "cus_123",
            "object": "customer",
            "name": "John",
            "email": "john@example.com",
            "billing_address": {"city": "Austin", "postal_code": "78701"},
            "tags": ["vip"],
        }))
    }

    #[test]
    fn test_fields_are_readable_by_name() {
        let object = customer();
        assert_eq!(object.id(), Some("cus_123"));
        assert_eq!(object.get_str("name"), Some("John"));
        assert_eq!(object.object_name(), Some("customer"));
        assert!(object.get("missing").is_none());
    }

    #[test]
    fn test_typed_getters_reject_other_kinds() {
        let object = FrameObject::from_json(json!({
            "name": "John",
            "count": 3,
            "ratio": 0.5,
            "tags": ["vip"],
        }));

        assert_eq!(object.get_i64("count"), Some(3));
        assert_eq!(object.get_f64("count"), Some(3.0));
        assert!(object.get_i64("ratio").is_none());
        assert!(object.get_str("count").is_none());
        assert!(object.get_bool("name").is_none());
        assert!(object.get_object("tags").is_none());
        assert!(object.get_list("tags").is_none());
        assert_eq!(object.get_array("tags").map(<[FrameValue]>::len), Some(1));
    }

    #[test]
    fn test_fresh_record_has_empty_diff() {
        assert!(customer().diff().is_empty());
        assert!(FrameObject::new().diff().is_empty());
    }

    #[test]
    fn test_set_shows_up_in_diff() {
        let mut object = customer();
        object.set("name", "John Updated");

        let diff = object.diff();
        assert_eq!(Value::Object(diff), json!({"name": "John Updated"}));
        assert!(object.is_dirty());
    }

    #[test]
    fn test_setting_same_value_is_not_a_change() {
        let mut object = customer();
        object.set("name", "John");
        assert!(!object.is_dirty());
    }

    #[test]
    fn test_new_fields_are_included() {
        let mut object = customer();
        object.set("phone", "+15555550100");
        assert_eq!(
            Value::Object(object.diff()),
            json!({"phone": "+15555550100"})
        );
    }

    #[test]
    fn test_nested_changes_send_only_changed_leaves() {
        let mut object = customer();
        object
            .get_mut("billing_address")
            .and_then(FrameValue::as_object_mut)
            .unwrap()
            .set("city", "Dallas");

        assert_eq!(
            Value::Object(object.diff()),
            json!({"billing_address": {"city": "Dallas"}})
        );
    }

    #[test]
    fn test_changed_arrays_are_sent_whole() {
        let mut object = customer();
        object.set("tags", vec!["vip", "new"]);
        assert_eq!(
            Value::Object(object.diff()),
            json!({"tags": ["vip", "new"]})
        );
    }

    #[test]
    fn test_initialize_from_resets_baseline() {
        let mut object = customer();
        object.set("name", "Jane");
        assert!(object.is_dirty());

        let values = object.clone().into_values();
        object.initialize_from(values);
        assert!(!object.is_dirty());
        assert_eq!(object.get_str("name"), Some("Jane"));
    }

    #[test]
    fn test_numeric_ids_become_strings() {
        let object = FrameObject::from_json(json!({"id": 42}));
        assert_eq!(object.id(), Some("42"));
    }

    #[test]
    fn test_setting_id_updates_identity() {
        let mut object = FrameObject::new();
        object.set("id", "cus_9");
        assert_eq!(object.id(), Some("cus_9"));
    }

    #[test]
    fn test_same_entity_requires_matching_ids() {
        let a = FrameObject::with_id("cus_1");
        let b = FrameObject::from_json(json!({"id": "cus_1", "name": "Other"}));
        assert!(a.same_entity(&b));
        assert!(!a.same_entity(&FrameObject::with_id("cus_2")));
        assert!(!FrameObject::new().same_entity(&FrameObject::new()));
    }

    #[test]
    fn test_plain_value_preserves_field_order() {
        let object = FrameObject::from_json(json!({"z": 1, "a": 2, "m": 3}));
        let keys: Vec<&str> = object.keys().collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
        assert_eq!(
            serde_json::to_string(&object).unwrap(),
            r#"{"z":1,"a":2,"m":3}"#
        );
    }

    #[test]
    fn test_refresh_from_rejects_non_objects() {
        let mut object = customer();
        let result = object.refresh_from(FrameValue::from("nope"));
        assert!(matches!(result, Err(FrameError::Api(_))));
        assert_eq!(object.get_str("name"), Some("John"));
    }

    #[test]
    fn test_update_attributes_sets_many_fields() {
        let mut object = customer();
        let attrs = json!({"name": "A", "description": "B"});
        object.update_attributes(attrs.as_object().unwrap().clone());
        assert_eq!(
            Value::Object(object.diff()),
            json!({"name": "A", "description": "B"})
        );
    }

    #[test]
    fn test_display_is_pretty_json() {
        let object = FrameObject::from_json(json!({"id": "cus_1"}));
        assert_eq!(object.to_string(), "{\n  \"id\": \"cus_1\"\n}");
    }
}
