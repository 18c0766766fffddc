//! Dynamic records, paginated lists, and response conversion.
//!
//! # Overview
//!
//! - [`FrameObject`]: a record with ordered dynamic fields and change tracking
//! - [`FrameValue`]: a single field value
//! - [`ListObject`]: a page of results with everything needed to fetch the next one
//! - [`ObjectRegistry`]: the `object` discriminator table
//! - [`convert_to_frame_object`]: the single conversion point for response bodies

mod convert;
mod frame_object;
mod list_object;
mod registry;
mod value;

pub use convert::{convert_fields, convert_to_frame_object, ConvertContext};
pub use frame_object::{Fields, FrameObject};
pub use list_object::{ListObject, DEFAULT_PAGE, DEFAULT_PER_PAGE};
pub use registry::{ObjectClass, ObjectRegistry, ObjectRegistryBuilder};
pub use value::FrameValue;
