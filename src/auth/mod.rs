//! Authentication for the Moltin API SDK.
//!
//! Every resource request carries `Authorization: Bearer {token}`. This module
//! owns the lifecycle of that token.
//!
//! # Overview
//!
//! - [`TokenProvider`]: Exchanges credentials for a token, caches it, and
//!   refreshes it on expiry
//! - [`AccessToken`]: An immutable bearer token with an optional expiry
//! - [`GrantType`]: `client_credentials` or `implicit`, chosen from the configuration
//! - [`AuthError`]: Failures of the credential exchange
//!
//! # Example
//!
//! ```rust
//! use moltin_api::auth::AccessToken;
//!
//! // Tokens without an expiry never expire
//! let token = AccessToken::new("token", None);
//! assert!(!token.expired());
//! ```

mod errors;
mod provider;
mod token;

pub use errors::AuthError;
pub use provider::{GrantType, TokenProvider};
pub use token::{AccessToken, AccessTokenResponse};
