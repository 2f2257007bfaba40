//! Error types for the Moltin API SDK.
//!
//! This module contains the configuration and validation errors raised while
//! building a [`MoltinConfig`](crate::MoltinConfig) and its newtypes.
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Error messages are designed to be clear and actionable.
//!
//! # Example
//!
//! ```rust
//! use moltin_api::{ClientId, ConfigError};
//!
//! let result = ClientId::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyClientId)));
//! ```

use thiserror::Error;

/// Errors that can occur during SDK configuration.
///
/// Each variant provides a clear, actionable error message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Client ID cannot be empty.
    #[error("Client ID cannot be empty. Please provide a valid Moltin client ID.")]
    EmptyClientId,

    /// Client secret cannot be empty when provided.
    #[error("Client secret cannot be empty. Omit it to use the implicit grant instead.")]
    EmptyClientSecret,

    /// A pre-supplied access token cannot be empty.
    #[error("Access token cannot be empty.")]
    EmptyAccessToken,

    /// API version segment is invalid.
    #[error("Invalid API version '{version}'. Expected a single path segment such as 'v2'.")]
    InvalidApiVersion {
        /// The invalid version string that was provided.
        version: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// Host URL is invalid.
    #[error("Invalid host URL '{url}'. Please provide a valid URL with scheme (e.g., 'https://api.moltin.com').")]
    InvalidHostUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// A header name or value cannot be sent over HTTP.
    #[error("Invalid header '{name}': header names and values must be visible ASCII.")]
    InvalidHeader {
        /// The offending header name.
        name: String,
    },

    /// A custom header collides with one the SDK sets itself.
    #[error("Header '{name}' is set by the SDK and cannot be overridden. Use the dedicated builder method instead.")]
    ReservedHeader {
        /// The reserved header name.
        name: String,
    },
}
