//! Discriminator to record-variant lookup.
//!
//! Frame responses identify their type with an `object` field
//! (`"customer"`, `"list"`, ...). The [`ObjectRegistry`] maps those strings
//! to an [`ObjectClass`], which the converter uses to decide what to build.

use std::collections::HashMap;
use std::sync::OnceLock;

use serde_json::Value;

use crate::object::convert::{convert_to_frame_object, ConvertContext};
use crate::object::FrameValue;
use crate::rest::ApiResource;

static BUILTIN: OnceLock<ObjectRegistry> = OnceLock::new();

/// The record variant a discriminator resolves to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ObjectClass {
    /// A concrete API resource, identified by its class name (e.g. `"Customer"`).
    Resource(&'static str),
    /// A paginated list envelope.
    List,
}

impl ObjectClass {
    /// Returns the class name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Resource(name) => name,
            Self::List => "ListObject",
        }
    }
}

/// Table of known discriminators.
///
/// Lookups are exact and case-sensitive. Unknown discriminators resolve to
/// nothing, and the converter falls back to a generic
/// [`FrameObject`](crate::FrameObject).
///
/// # Example
///
/// ```rust
/// use frame_api::{ObjectClass, ObjectRegistry};
///
/// let registry = ObjectRegistry::builtin();
/// assert_eq!(registry.class_for("customer"), Some(ObjectClass::Resource("Customer")));
/// assert_eq!(registry.class_for("Customer"), None);
///
/// let custom = ObjectRegistry::builder()
///     .register("invoice", ObjectClass::Resource("Invoice"))
///     .build();
/// assert!(custom.class_for("invoice").is_some());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObjectRegistry {
    classes: HashMap<String, ObjectClass>,
}

impl ObjectRegistry {
    /// Creates a registry holding the built-in entries.
    #[must_use]
    pub fn new() -> Self {
        let mut classes = HashMap::new();
        classes.insert("customer".to_string(), ObjectClass::Resource("Customer"));
        classes.insert("list".to_string(), ObjectClass::List);
        Self { classes }
    }

    /// Creates a registry with no entries.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            classes: HashMap::new(),
        }
    }

    /// Returns a builder seeded with the built-in entries.
    #[must_use]
    pub fn builder() -> ObjectRegistryBuilder {
        ObjectRegistryBuilder {
            registry: Self::new(),
        }
    }

    /// Returns the shared built-in registry.
    pub fn builtin() -> &'static Self {
        BUILTIN.get_or_init(Self::new)
    }

    /// Resolves a discriminator.
    #[must_use]
    pub fn class_for(&self, discriminator: &str) -> Option<ObjectClass> {
        self.classes.get(discriminator).copied()
    }

    /// Returns the number of registered discriminators.
    #[must_use]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Converts a decoded response with this registry.
    ///
    /// See [`convert_to_frame_object`].
    #[must_use]
    pub fn convert(&self, value: Value, ctx: &ConvertContext<'_>) -> FrameValue {
        convert_to_frame_object(value, self, ctx)
    }
}

impl Default for ObjectRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for an extended [`ObjectRegistry`].
#[derive(Debug)]
pub struct ObjectRegistryBuilder {
    registry: ObjectRegistry,
}

impl ObjectRegistryBuilder {
    /// Registers `discriminator`, replacing any previous entry.
    #[must_use]
    pub fn register(mut self, discriminator: impl Into<String>, class: ObjectClass) -> Self {
        self.registry.classes.insert(discriminator.into(), class);
        self
    }

    /// Registers a resource type under its `OBJECT_NAME`.
    #[must_use]
    pub fn register_resource<T: ApiResource>(self) -> Self {
        self.register(T::OBJECT_NAME, T::object_class())
    }

    /// Finishes the registry.
    #[must_use]
    pub fn build(self) -> ObjectRegistry {
        self.registry
    }
}
