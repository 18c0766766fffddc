//! Typed resources built on [`FrameObject`](crate::FrameObject).
//!
//! [`ApiResource`] is the base trait; [`Creatable`], [`Listable`],
//! [`Deletable`] and [`Savable`] add the standard endpoints. Every operation
//! takes the [`FrameClient`](crate::FrameClient) to send through and a
//! [`RequestOptions`](crate::RequestOptions).

pub mod operations;
mod resource;
pub mod resources;

pub use operations::{list_at, request, request_object, to_params, Creatable, Deletable, Listable, Savable};
pub use resource::ApiResource;
pub use resources::{
    AddressParams, Customer, CustomerCreateParams, CustomerListParams, CustomerSearchParams,
    CustomerStatus, CustomerUpdateParams,
};
