//! Resource layer for the Moltin API.
//!
//! This module turns resource operations into HTTP requests and HTTP
//! responses into typed results:
//!
//! - **[`ResourceDefinition`]** and the built-in table ([`INTEGRATIONS`],
//!   [`PRODUCTS`], ...): which resources exist and what they support
//! - **[`ResourceClient`]**: One generic dispatcher for every resource
//! - **Path building**: [`ResourceOperation`], [`ResourcePath`], [`build_path`]
//! - **Request building**: [`RequestParams`], [`ListParams`], [`build_request`]
//! - **[`ResourceResponse<T>`]** and **[`Envelope<T>`]**: The `{ data, meta, links }` shape
//! - **[`ResourceError`]**: The error every call returns
//!
//! # Example
//!
//! ```rust,ignore
//! use moltin_api::{Gateway, MoltinConfig, ClientId, ClientSecret};
//! use moltin_api::rest::ListParams;
//!
//! let gateway = Gateway::new(
//!     MoltinConfig::builder()
//!         .client_id(ClientId::new("client-id").unwrap())
//!         .client_secret(ClientSecret::new("client-secret").unwrap())
//!         .build()
//!         .unwrap(),
//! )?;
//!
//! // List with pagination
//! let products = gateway
//!     .products()
//!     .all_with(&ListParams::new().limit(25).sort("name"))
//!     .await?;
//! for product in products.iter() {
//!     println!("- {}", product["name"]);
//! }
//!
//! // Nested reads
//! let jobs = gateway.integrations().get_jobs("123").await?;
//!
//! // Delete yields `{}`
//! let deleted = gateway.integrations().delete("123").await?;
//! assert_eq!(deleted.to_string(), "{}");
//! ```

mod errors;
mod params;
mod path;
mod resource;
mod response;

pub use errors::{ResourceError, ValidationError};
pub use params::{build_request, ListParams, RequestParams};
pub use path::{build_path, ResourceOperation, ResourcePath};
pub use resource::{
    find_resource, CallStage, ResourceClient, ResourceDefinition, BRANDS, CATEGORIES,
    COLLECTIONS, CRUD_OPERATIONS, CURRENCIES, CUSTOMERS, FILES, FLOWS, INTEGRATIONS,
    INTEGRATION_OPERATIONS, ORDERS, ORDER_OPERATIONS, PRODUCTS, PROMOTIONS, RESOURCES,
};
pub use response::{Envelope, Links, Meta, PageMeta, ResourceResponse, ResultsMeta};
