//! Authentication error types for the Moltin API SDK.
//!
//! # Error Types
//!
//! - [`AuthError::TokenRequestFailed`]: The token endpoint returned a non-success status
//! - [`AuthError::Network`]: The token request never got a response
//! - [`AuthError::InvalidTokenResponse`]: The token endpoint returned an unreadable body
//!
//! # Example
//!
//! ```rust
//! use moltin_api::auth::AuthError;
//!
//! let error = AuthError::TokenRequestFailed {
//!     status: 401,
//!     message: "invalid client".to_string(),
//! };
//! assert!(error.to_string().contains("401"));
//! ```

use thiserror::Error;

/// Errors that can occur while obtaining an access token.
///
/// None of these are retried internally: they surface to the caller of the
/// resource operation that triggered the exchange.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The token endpoint answered with a non-success HTTP status.
    #[error("Token request failed with status {status}: {message}")]
    TokenRequestFailed {
        /// The HTTP status code returned.
        status: u16,
        /// The response body, or a description of it.
        message: String,
    },

    /// The token request could not be sent or its response could not be read.
    #[error("Token request network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The token endpoint answered 2xx but the body is not a token response.
    #[error("Invalid token response: {reason}")]
    InvalidTokenResponse {
        /// Why the body was rejected.
        reason: String,
    },
}

impl AuthError {
    /// Returns the HTTP status of a rejected exchange, if any.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::TokenRequestFailed { status, .. } => Some(*status),
            Self::Network(_) | Self::InvalidTokenResponse { .. } => None,
        }
    }
}

// Verify AuthError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<AuthError>();
};
