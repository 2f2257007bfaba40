//! Access token types for Moltin API authentication.
//!
//! This module provides the [`AccessToken`] value cached by the
//! [`TokenProvider`](crate::auth::TokenProvider) and the wire shape of the
//! token endpoint's response.

use std::fmt;

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::Deserialize;

/// A bearer token plus the instant it stops being valid.
///
/// Tokens are immutable: a refresh produces a new `AccessToken` that replaces
/// the cached one. Tokens without an expiry (for example a token supplied
/// through [`MoltinConfigBuilder::access_token`](crate::MoltinConfigBuilder::access_token))
/// never expire.
///
/// The `Debug` implementation masks the token value.
///
/// # Example
///
/// ```rust
/// use moltin_api::auth::AccessToken;
/// use chrono::{Duration, Utc};
///
/// let token = AccessToken::new("abc", Some(Utc::now() + Duration::hours(1)));
/// assert!(!token.expired());
/// assert_eq!(token.as_str(), "abc");
/// assert!(!format!("{token:?}").contains("abc"));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
    value: String,
    expires: Option<DateTime<Utc>>,
}

impl AccessToken {
    /// Creates a token with the given value and expiry.
    #[must_use]
    pub fn new(value: impl Into<String>, expires: Option<DateTime<Utc>>) -> Self {
        Self {
            value: value.into(),
            expires,
        }
    }

    /// Returns the raw bearer token.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Returns the expiry instant, if any.
    #[must_use]
    pub const fn expires(&self) -> Option<DateTime<Utc>> {
        self.expires
    }

    /// Returns `true` once the expiry instant has been reached.
    #[must_use]
    pub fn expired(&self) -> bool {
        self.expires.is_some_and(|expires| Utc::now() >= expires)
    }

    /// Builds a token from the token endpoint's response.
    ///
    /// The absolute `expires` timestamp wins over the relative `expires_in`.
    pub(crate) fn from_response(response: &AccessTokenResponse) -> Self {
        let expires = response
            .expires
            .and_then(|secs| Utc.timestamp_opt(secs, 0).single())
            .or_else(|| {
                response
                    .expires_in
                    .and_then(Duration::try_seconds)
                    .and_then(|lifetime| Utc::now().checked_add_signed(lifetime))
            });

        Self::new(response.access_token.clone(), expires)
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("value", &"*****")
            .field("expires", &self.expires)
            .finish()
    }
}

/// Response body of `POST /oauth/access_token`.
#[derive(Clone, Debug, Deserialize)]
pub struct AccessTokenResponse {
    /// The bearer token.
    pub access_token: String,
    /// Token type, always `Bearer` in practice.
    #[serde(default)]
    pub token_type: Option<String>,
    /// Absolute expiry as a unix timestamp in seconds.
    #[serde(default)]
    pub expires: Option<i64>,
    /// Lifetime in seconds.
    #[serde(default)]
    pub expires_in: Option<i64>,
    /// Grant type the token was issued for.
    #[serde(default)]
    pub identifier: Option<String>,
}

// Verify AccessToken is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<AccessToken>();
};
