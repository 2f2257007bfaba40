//! Access token lifecycle for the Moltin API.
//!
//! The [`TokenProvider`] obtains a bearer token from `POST /oauth/access_token`,
//! caches it, and exchanges again once it expires.
//!
//! # Grant Types
//!
//! - `client_credentials` when a client secret is configured. This grants
//!   full access and must only be used server-side.
//! - `implicit` otherwise. This grants read-only, storefront-level access.
//!
//! # Concurrency
//!
//! The cache is a read-mostly `RwLock<Option<AccessToken>>`. The lock is never
//! held across the network exchange. Two callers that observe an expired
//! token at the same time may both exchange, and the last stored token wins.
//! Token exchange is idempotent, so this is harmless.
//!
//! # Example
//!
//! ```rust,ignore
//! use moltin_api::{MoltinConfig, ClientId};
//! use moltin_api::auth::TokenProvider;
//!
//! let config = MoltinConfig::builder()
//!     .client_id(ClientId::new("client-id").unwrap())
//!     .build()
//!     .unwrap();
//!
//! let provider = TokenProvider::new(&config, reqwest::Client::new());
//! let token = provider.token().await?;
//! println!("Bearer {}", token.as_str());
//! ```

use serde::Serialize;
use tokio::sync::RwLock;

use crate::auth::token::{AccessToken, AccessTokenResponse};
use crate::auth::AuthError;
use crate::config::{ClientId, ClientSecret, MoltinConfig};

/// The OAuth grant used for the credential exchange.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GrantType {
    /// Client ID plus secret.
    ClientCredentials,
    /// Client ID only.
    Implicit,
}

impl GrantType {
    /// Returns the wire value of the `grant_type` field.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ClientCredentials => "client_credentials",
            Self::Implicit => "implicit",
        }
    }
}

/// Form body for the token exchange.
#[derive(Debug, Serialize)]
struct TokenRequest<'a> {
    grant_type: &'a str,
    client_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    client_secret: Option<&'a str>,
}

/// Obtains and caches the bearer token shared by every resource call of a
/// [`Gateway`](crate::Gateway).
#[derive(Debug)]
pub struct TokenProvider {
    client: reqwest::Client,
    token_url: String,
    client_id: ClientId,
    client_secret: Option<ClientSecret>,
    cached: RwLock<Option<AccessToken>>,
}

// Verify TokenProvider is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<TokenProvider>();
};

impl TokenProvider {
    /// Creates a provider for the given configuration.
    ///
    /// A token pre-supplied in the configuration seeds the cache, so no
    /// exchange happens until it is invalidated.
    #[must_use]
    pub fn new(config: &MoltinConfig, client: reqwest::Client) -> Self {
        Self {
            client,
            token_url: config.token_url(),
            client_id: config.client_id().clone(),
            client_secret: config.client_secret().cloned(),
            cached: RwLock::new(config.access_token().cloned()),
        }
    }

    /// Returns the grant type this provider exchanges with.
    #[must_use]
    pub const fn grant_type(&self) -> GrantType {
        if self.client_secret.is_some() {
            GrantType::ClientCredentials
        } else {
            GrantType::Implicit
        }
    }

    /// Returns the URL of the token endpoint.
    #[must_use]
    pub fn token_url(&self) -> &str {
        &self.token_url
    }

    /// Returns a valid token, exchanging credentials if the cached one is
    /// missing or expired.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] if the exchange fails. Nothing is retried.
    pub async fn token(&self) -> Result<AccessToken, AuthError> {
        if let Some(token) = self.cached().await {
            if !token.expired() {
                return Ok(token);
            }
            tracing::debug!(expires = ?token.expires(), "Cached access token expired");
        }

        self.authenticate().await
    }

    /// Performs a credential exchange unconditionally and caches the result.
    ///
    /// # Errors
    ///
    /// - [`AuthError::Network`] if the request could not be sent
    /// - [`AuthError::TokenRequestFailed`] on a non-success status
    /// - [`AuthError::InvalidTokenResponse`] if the body is not a token response
    pub async fn authenticate(&self) -> Result<AccessToken, AuthError> {
        let grant_type = self.grant_type();
        tracing::debug!(
            grant_type = grant_type.as_str(),
            url = %self.token_url,
            "Requesting Moltin access token"
        );

        let request_body = TokenRequest {
            grant_type: grant_type.as_str(),
            client_id: self.client_id.as_ref(),
            client_secret: self.client_secret.as_ref().map(AsRef::as_ref),
        };

        let response = self
            .client
            .post(&self.token_url)
            .form(&request_body)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        if !(200..300).contains(&status) {
            tracing::warn!(status, "Moltin token request failed");
            return Err(AuthError::TokenRequestFailed {
                status,
                message: body,
            });
        }

        let token_response: AccessTokenResponse =
            serde_json::from_str(&body).map_err(|e| AuthError::InvalidTokenResponse {
                reason: e.to_string(),
            })?;

        let token = AccessToken::from_response(&token_response);
        *self.cached.write().await = Some(token.clone());

        Ok(token)
    }

    /// Returns the cached token without performing any I/O.
    pub async fn cached(&self) -> Option<AccessToken> {
        self.cached.read().await.clone()
    }

    /// Drops the cached token so the next call exchanges credentials again.
    pub async fn invalidate(&self) {
        *self.cached.write().await = None;
    }
}
