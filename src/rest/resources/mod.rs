//! Concrete Frame API resources.
//!
//! ```rust,ignore
//! use frame_api::rest::resources::{Customer, CustomerSearchParams};
//! use frame_api::rest::{ApiResource, Listable};
//!
//! let customer = Customer::retrieve(&client, "cus_123", &opts).await?;
//!
//! let params = CustomerSearchParams {
//!     name: Some("John".into()),
//!     ..Default::default()
//! };
//! let matches = Customer::search(&client, &params, &opts).await?;
//! ```

mod customer;

pub use customer::{
    AddressParams, Customer, CustomerCreateParams, CustomerListParams, CustomerSearchParams,
    CustomerStatus, CustomerUpdateParams,
};
