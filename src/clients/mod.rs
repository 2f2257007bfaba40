//! HTTP transport for Moltin API communication.
//!
//! This module is the low-level layer underneath the resource clients. It
//! sends one request per call and returns the raw response. Interpretation of
//! the response happens in [`HttpResponse::normalize`].
//!
//! # Overview
//!
//! - [`HttpClient`]: The async HTTP client for API communication
//! - [`HttpRequest`]: A request descriptor (method, path, query, JSON body)
//! - [`HttpResponse`]: A raw response from the API
//! - [`NormalizedBody`]: A successful body, either a document or empty
//! - [`HttpMethod`]: Supported HTTP methods (GET, POST, PUT, DELETE)
//! - [`ApiError`]: A non-2xx response
//!
//! # Example
//!
//! ```rust,ignore
//! use moltin_api::clients::{HttpClient, HttpMethod, HttpRequest};
//!
//! let client = HttpClient::new(&config, reqwest::Client::new());
//!
//! let request = HttpRequest::builder(HttpMethod::Get, "integrations")
//!     .query_param("page[limit]", "25")
//!     .build()
//!     .unwrap();
//!
//! let response = client.send(&request, token.as_str()).await?;
//! let body = response.normalize()?.into_value();
//! ```
//!
//! # Retry Behavior
//!
//! There is none. Every call is a single attempt and failures surface
//! immediately.

mod errors;
mod http_client;
mod http_request;
mod http_response;

pub use errors::{ApiError, HttpError, InvalidHttpRequestError};
pub use http_client::{HttpClient, SDK_LANGUAGE, SDK_VERSION};
pub use http_request::{HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::{HttpResponse, NormalizedBody};
