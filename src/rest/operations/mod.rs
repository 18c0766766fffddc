//! Opt-in capabilities for resources.
//!
//! Each capability is a trait with a default implementation; a resource
//! gains it with an empty `impl`:
//!
//! | Trait | Request |
//! |-------|---------|
//! | [`Creatable`] | `POST {resource_url}` |
//! | [`Listable`] | `GET {resource_url}` |
//! | [`Deletable`] | `DELETE {instance_url}` |
//! | [`Savable`] | `PATCH {instance_url}` with changed fields |

mod create;
mod delete;
mod list;
mod request;
mod save;

pub use create::Creatable;
pub use delete::Deletable;
pub use list::{list_at, Listable};
pub use request::{request, request_object, to_params};
pub use save::Savable;
