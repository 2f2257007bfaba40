//! Error types for resource operations.
//!
//! [`ResourceError`] is the single error returned by every
//! [`ResourceClient`](crate::rest::ResourceClient) method. Each call fails
//! with exactly one of its variants:
//!
//! - [`ResourceError::Validation`]: Rejected locally, no request was sent
//! - [`ResourceError::Auth`]: The credential exchange failed
//! - [`ResourceError::Api`]: The API answered with a non-2xx status
//! - [`ResourceError::Transport`]: No response was received
//! - [`ResourceError::Decode`]: A 2xx body did not match the requested type
//!
//! # Example
//!
//! ```rust,ignore
//! use moltin_api::rest::{ResourceError, ValidationError};
//!
//! match gateway.integrations().get("123").await {
//!     Ok(response) => println!("Found: {}", response.data()),
//!     Err(ResourceError::Api(e)) if e.status == 404 => println!("Not found"),
//!     Err(ResourceError::Validation(ValidationError::MissingIdentifier { field, .. })) => {
//!         println!("Missing {field}");
//!     }
//!     Err(e) => println!("Other error: {e}"),
//! }
//! ```

use thiserror::Error;

use crate::auth::AuthError;
use crate::clients::{ApiError, HttpError, InvalidHttpRequestError};

/// A request rejected before anything was sent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required identifier is missing or blank.
    #[error("{resource}::{operation} requires a non-empty `{field}`")]
    MissingIdentifier {
        /// The resource name (e.g., "integrations").
        resource: &'static str,
        /// The operation being attempted (e.g., "get").
        operation: &'static str,
        /// The missing identifier (e.g., "id", "job_id").
        field: &'static str,
    },

    /// `create` or `update` was called without a payload.
    #[error("{resource}::{operation} requires a payload")]
    MissingPayload {
        /// The resource name.
        resource: &'static str,
        /// The operation being attempted.
        operation: &'static str,
    },

    /// The payload could not be serialized to JSON.
    #[error("{resource} payload could not be serialized: {reason}")]
    InvalidPayload {
        /// The resource name.
        resource: &'static str,
        /// The serializer's message.
        reason: String,
    },

    /// The resource does not declare the operation.
    #[error("{resource} does not support {operation}")]
    UnsupportedOperation {
        /// The resource name.
        resource: &'static str,
        /// The operation being attempted.
        operation: &'static str,
    },

    /// The built request failed transport-level validation.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),
}

/// Error type for resource operations.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// Local parameter validation failed. No request was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The access token could not be obtained.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// The API answered with a non-2xx status, or an unreadable 2xx body.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The request could not be sent or its response could not be read.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A successful response did not match the requested type.
    #[error("Failed to decode {resource} response: {source}")]
    Decode {
        /// The resource name.
        resource: &'static str,
        /// The deserializer's error.
        source: serde_json::Error,
    },
}

impl From<HttpError> for ResourceError {
    fn from(error: HttpError) -> Self {
        match error {
            HttpError::InvalidRequest(e) => Self::Validation(e.into()),
            HttpError::Network(e) => Self::Transport(e),
        }
    }
}

impl ResourceError {
    /// Returns the HTTP status reported by the platform, if any.
    ///
    /// This covers API errors and rejected token exchanges.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api(e) => Some(e.status),
            Self::Auth(e) => e.status(),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            Self::Validation(_) | Self::Decode { .. } => None,
        }
    }

    /// Returns the request ID if available.
    ///
    /// Useful for debugging and error reports.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        match self {
            Self::Api(e) => e.request_id.as_deref(),
            _ => None,
        }
    }
}

// Verify ResourceError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceError>();
    assert_send_sync::<ValidationError>();
};
