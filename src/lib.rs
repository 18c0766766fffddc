//! # Frame API Rust SDK
//!
//! A Rust client for the Frame payments API.
//!
//! ## Overview
//!
//! This SDK provides:
//! - Type-safe configuration via [`FrameConfig`] and [`FrameConfigBuilder`]
//! - An async request client, [`FrameClient`], that maps HTTP failures to [`FrameError`]
//! - Dynamic records ([`FrameObject`]) with change tracking for partial updates
//! - Paginated collections ([`ListObject`]) that can fetch their next page
//! - A registry that turns `object` discriminators into typed records
//! - Capability traits ([`Creatable`], [`Listable`], [`Deletable`], [`Savable`])
//!   and the [`Customer`] resource built on them
//!
//! ## Quick Start
//!
//! ```rust
//! use frame_api::{ApiKey, FrameClient};
//!
//! let client = FrameClient::builder()
//!     .api_key(ApiKey::new("sk_test_123").unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(client.config().api_base().to_string(), "https://api.framepayments.com");
//! ```
//!
//! ## Working with Customers
//!
//! ```rust,ignore
//! use frame_api::{ApiResource, Customer, CustomerCreateParams, Listable, RequestOptions, Savable};
//!
//! let opts = RequestOptions::default();
//!
//! let params = CustomerCreateParams {
//!     name: "John Doe".into(),
//!     email: "john@example.com".into(),
//!     ..Default::default()
//! };
//! let mut customer = Customer::create(&client, &params, &opts).await?;
//!
//! // Only changed fields are sent.
//! customer.set_description("Preferred customer");
//! customer.save(&client, &(), &opts).await?;
//!
//! // Walk every page.
//! let mut page = Customer::list(&client, &(), &opts).await?;
//! loop {
//!     for item in page.objects() {
//!         println!("{:?}", item.get_str("name"));
//!     }
//!     if !page.has_more() {
//!         break;
//!     }
//!     page = page.next_page(&client, None, &opts).await?;
//! }
//! ```
//!
//! ## Process-wide Configuration
//!
//! ```rust,ignore
//! use frame_api::{configure, ApiKey, FrameClient, FrameConfig};
//!
//! configure(FrameConfig::builder().api_key(ApiKey::new("sk_live_123")?).build()?)?;
//!
//! // Clients built afterwards start from these settings.
//! let client = FrameClient::default_client()?;
//! ```
//!
//! ## Design Principles
//!
//! - **No global mutable state**: configuration is installed once; clients are passed explicitly
//! - **Fail-fast validation**: newtypes validate on construction
//! - **Nothing is retried**: every failure is returned to the caller as a [`FrameError`]
//! - **Thread-safe**: [`FrameClient`] is `Send + Sync`

pub mod clients;
pub mod config;
pub mod error;
pub mod object;
pub mod rest;

// Re-export public types at crate root for convenience
pub use config::{configure, global_config, ApiBase, ApiKey, FrameConfig, FrameConfigBuilder};
pub use error::ConfigError;

pub use clients::{
    ErrorDetails, FrameClient, FrameClientBuilder, FrameError, HttpMethod, Params, RequestOptions,
};

pub use object::{
    convert_to_frame_object, ConvertContext, FrameObject, FrameValue, ListObject, ObjectClass,
    ObjectRegistry,
};

pub use rest::{
    ApiResource, Creatable, Customer, CustomerCreateParams, CustomerListParams,
    CustomerSearchParams, CustomerStatus, CustomerUpdateParams, Deletable, Listable, Savable,
};
