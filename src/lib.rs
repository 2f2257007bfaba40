//! # Moltin API Rust SDK
//!
//! A Rust SDK for the Moltin (Elastic Path Commerce Cloud) v2 REST API,
//! providing type-safe configuration, automatic token handling, and one
//! generic client for every resource.
//!
//! ## Overview
//!
//! This SDK provides:
//! - Type-safe configuration via [`MoltinConfig`] and [`MoltinConfigBuilder`]
//! - Validated newtypes for credentials and the API host
//! - Token exchange with `client_credentials` or `implicit` grants, cached
//!   and refreshed on expiry by [`auth::TokenProvider`]
//! - A declarative resource table and one generic [`rest::ResourceClient`]
//! - Response normalization into `{ data, meta, links }` envelopes
//! - Layered error types with `thiserror`, logging with `tracing`
//!
//! ## Quick Start
//!
//! ```rust
//! use moltin_api::{ClientId, ClientSecret, Gateway, MoltinConfig};
//!
//! let config = MoltinConfig::builder()
//!     .client_id(ClientId::new("your-client-id").unwrap())
//!     .client_secret(ClientSecret::new("your-client-secret").unwrap())
//!     .build()
//!     .unwrap();
//!
//! let gateway = Gateway::new(config).unwrap();
//! assert_eq!(gateway.integrations().name(), "integrations");
//! ```
//!
//! ## Resource Operations
//!
//! ```rust,ignore
//! use moltin_api::rest::ListParams;
//! use serde_json::json;
//!
//! let integrations = gateway.integrations();
//!
//! let created = integrations.create(&json!({"name": "Order hook"})).await?;
//! let updated = integrations.update("123", &json!({"enabled": false})).await?;
//! let page = integrations.all_with(&ListParams::new().limit(10)).await?;
//! let one = integrations.get("123").await?;
//! let logs = integrations.get_logs("123").await?;
//! let jobs = integrations.get_jobs("123").await?;
//! let job_logs = integrations
//!     .get_all_logs_for_job("123", "integration-job-1")
//!     .await?;
//! let deleted = integrations.delete("123").await?; // `{}`
//! ```
//!
//! ## Typed Payloads
//!
//! ```rust,ignore
//! #[derive(serde::Deserialize)]
//! struct Product {
//!     id: String,
//!     name: String,
//!     sku: String,
//! }
//!
//! let products = gateway.products().typed::<Product>().all().await?;
//! for product in products.iter() {
//!     println!("{} ({})", product.name, product.sku);
//! }
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: Newtypes and parameters validate before any I/O
//! - **Thread-safe**: All public types are `Send + Sync`
//! - **Async-first**: Designed for use with the Tokio async runtime
//! - **Single attempt**: No retries, no rate limiting, no response caching

pub mod auth;
pub mod clients;
pub mod config;
pub mod error;
pub mod gateway;
pub mod rest;

// Re-export public types at crate root for convenience
pub use config::{ApiVersion, ClientId, ClientSecret, HostUrl, MoltinConfig, MoltinConfigBuilder};
pub use error::ConfigError;
pub use gateway::Gateway;

// Re-export auth types
pub use auth::{AccessToken, AuthError, GrantType, TokenProvider};

// Re-export HTTP client types
pub use clients::{
    ApiError, HttpClient, HttpError, HttpMethod, HttpRequest, HttpRequestBuilder, HttpResponse,
    InvalidHttpRequestError, NormalizedBody,
};

// Re-export resource types
pub use rest::{
    Envelope, ListParams, ResourceClient, ResourceDefinition, ResourceError, ResourceOperation,
    ResourceResponse, ValidationError,
};
