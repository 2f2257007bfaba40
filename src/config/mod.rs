//! Configuration types for the Moltin API SDK.
//!
//! This module provides the configuration used to construct a
//! [`Gateway`](crate::Gateway).
//!
//! # Overview
//!
//! - [`MoltinConfig`]: The immutable configuration holding all SDK settings
//! - [`MoltinConfigBuilder`]: A builder for constructing [`MoltinConfig`] instances
//! - [`ClientId`]: A validated client ID newtype
//! - [`ClientSecret`]: A validated client secret newtype with masked debug output
//! - [`HostUrl`]: A validated API host URL
//! - [`ApiVersion`]: The API version path segment
//!
//! # Example
//!
//! ```rust
//! use moltin_api::{MoltinConfig, ClientId, ClientSecret};
//!
//! let config = MoltinConfig::builder()
//!     .client_id(ClientId::new("my-client-id").unwrap())
//!     .client_secret(ClientSecret::new("my-secret").unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.base_url(), "https://api.moltin.com/v2");
//! ```

mod newtypes;
mod version;

pub use newtypes::{ClientId, ClientSecret, HostUrl};
pub use version::ApiVersion;

use std::collections::BTreeMap;

use crate::auth::AccessToken;
use crate::error::ConfigError;

/// Configuration for the Moltin API SDK.
///
/// Created once, read-only thereafter. A [`Gateway`](crate::Gateway) takes
/// ownership of its configuration at construction.
///
/// # Thread Safety
///
/// `MoltinConfig` is `Clone`, `Send`, and `Sync`.
///
/// # Authentication
///
/// When a client secret is set the SDK authenticates with the
/// `client_credentials` grant, otherwise with the `implicit` grant. A
/// pre-supplied access token skips the exchange entirely.
#[derive(Clone, Debug)]
pub struct MoltinConfig {
    client_id: ClientId,
    client_secret: Option<ClientSecret>,
    host: HostUrl,
    api_version: ApiVersion,
    access_token: Option<AccessToken>,
    currency: Option<String>,
    language: Option<String>,
    user_agent_prefix: Option<String>,
    custom_headers: BTreeMap<String, String>,
}

impl MoltinConfig {
    /// Creates a new builder for constructing a `MoltinConfig`.
    #[must_use]
    pub fn builder() -> MoltinConfigBuilder {
        MoltinConfigBuilder::new()
    }

    /// Returns the client ID.
    #[must_use]
    pub const fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    /// Returns the client secret, if configured.
    #[must_use]
    pub const fn client_secret(&self) -> Option<&ClientSecret> {
        self.client_secret.as_ref()
    }

    /// Returns the API host URL.
    #[must_use]
    pub const fn host(&self) -> &HostUrl {
        &self.host
    }

    /// Returns the API version.
    #[must_use]
    pub const fn api_version(&self) -> &ApiVersion {
        &self.api_version
    }

    /// Returns the pre-supplied access token, if any.
    #[must_use]
    pub const fn access_token(&self) -> Option<&AccessToken> {
        self.access_token.as_ref()
    }

    /// Returns the currency code sent with every request, if configured.
    #[must_use]
    pub fn currency(&self) -> Option<&str> {
        self.currency.as_deref()
    }

    /// Returns the language code sent with every request, if configured.
    #[must_use]
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns the extra headers attached to every resource request.
    #[must_use]
    pub const fn custom_headers(&self) -> &BTreeMap<String, String> {
        &self.custom_headers
    }

    /// Returns the versioned base URL, e.g. `https://api.moltin.com/v2`.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("{}/{}", self.host.as_ref(), self.api_version)
    }

    /// Returns the token endpoint URL, which is not version-prefixed.
    #[must_use]
    pub fn token_url(&self) -> String {
        format!("{}/oauth/access_token", self.host.as_ref())
    }
}

// Verify MoltinConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<MoltinConfig>();
};

/// Builder for constructing [`MoltinConfig`] instances.
///
/// `client_id` is the only required field.
///
/// # Defaults
///
/// - `host`: `https://api.moltin.com`
/// - `api_version`: `v2`
/// - everything else: unset
#[derive(Debug, Default)]
pub struct MoltinConfigBuilder {
    client_id: Option<ClientId>,
    client_secret: Option<ClientSecret>,
    host: Option<HostUrl>,
    api_version: Option<ApiVersion>,
    access_token: Option<String>,
    currency: Option<String>,
    language: Option<String>,
    user_agent_prefix: Option<String>,
    custom_headers: BTreeMap<String, String>,
}

impl MoltinConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the client ID (required).
    #[must_use]
    pub fn client_id(mut self, id: ClientId) -> Self {
        self.client_id = Some(id);
        self
    }

    /// Sets the client secret, switching authentication to `client_credentials`.
    #[must_use]
    pub fn client_secret(mut self, secret: ClientSecret) -> Self {
        self.client_secret = Some(secret);
        self
    }

    /// Sets the API host URL.
    #[must_use]
    pub fn host(mut self, host: HostUrl) -> Self {
        self.host = Some(host);
        self
    }

    /// Sets the API version.
    #[must_use]
    pub fn api_version(mut self, version: ApiVersion) -> Self {
        self.api_version = Some(version);
        self
    }

    /// Supplies an access token up front. No credential exchange is performed
    /// while this token is in use.
    #[must_use]
    pub fn access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Sets the currency code sent as `X-MOLTIN-CURRENCY`.
    #[must_use]
    pub fn currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    /// Sets the language code sent as `X-MOLTIN-LANGUAGE`.
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Adds a header attached to every resource request.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.custom_headers.insert(name.into(), value.into());
        self
    }

    /// Builds the [`MoltinConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::MissingRequiredField`] if `client_id` is not set
    /// - [`ConfigError::EmptyAccessToken`] if an empty access token was supplied
    /// - [`ConfigError::InvalidApiVersion`] if a custom version is not a single path segment
    /// - [`ConfigError::InvalidHeader`] if the currency, the language, the
    ///   user agent prefix or a custom header cannot be sent as an HTTP header
    /// - [`ConfigError::ReservedHeader`] if a custom header would replace one
    ///   the SDK sets itself
    pub fn build(self) -> Result<MoltinConfig, ConfigError> {
        let client_id = self
            .client_id
            .ok_or(ConfigError::MissingRequiredField { field: "client_id" })?;

        if self.access_token.as_deref().is_some_and(str::is_empty) {
            return Err(ConfigError::EmptyAccessToken);
        }

        let api_version = self.api_version.unwrap_or_else(ApiVersion::latest);
        api_version.validate()?;

        for (name, value) in [
            (CURRENCY_HEADER, self.currency.as_deref()),
            (LANGUAGE_HEADER, self.language.as_deref()),
        ] {
            if value.is_some_and(|value| value.is_empty() || !is_header_value(value)) {
                return Err(ConfigError::InvalidHeader {
                    name: name.to_string(),
                });
            }
        }

        if self
            .user_agent_prefix
            .as_deref()
            .is_some_and(|prefix| !is_header_value(prefix))
        {
            return Err(ConfigError::InvalidHeader {
                name: "User-Agent".to_string(),
            });
        }

        for (name, value) in &self.custom_headers {
            if !is_header_name(name) || !is_header_value(value) {
                return Err(ConfigError::InvalidHeader { name: name.clone() });
            }
            if RESERVED_HEADERS
                .iter()
                .any(|reserved| reserved.eq_ignore_ascii_case(name))
            {
                return Err(ConfigError::ReservedHeader { name: name.clone() });
            }
        }

        Ok(MoltinConfig {
            client_id,
            client_secret: self.client_secret,
            host: self.host.unwrap_or_default(),
            api_version,
            access_token: self.access_token.map(|token| AccessToken::new(token, None)),
            currency: self.currency,
            language: self.language,
            user_agent_prefix: self.user_agent_prefix,
            custom_headers: self.custom_headers,
        })
    }
}

/// Header carrying the configured currency.
pub const CURRENCY_HEADER: &str = "X-MOLTIN-CURRENCY";

/// Header carrying the configured language.
pub const LANGUAGE_HEADER: &str = "X-MOLTIN-LANGUAGE";

/// Headers the SDK sets on every request. Custom headers cannot use them.
pub const RESERVED_HEADERS: &[&str] = &[
    "Authorization",
    "Accept",
    "Content-Type",
    "User-Agent",
    "X-MOLTIN-SDK-LANGUAGE",
    "X-MOLTIN-SDK-VERSION",
    CURRENCY_HEADER,
    LANGUAGE_HEADER,
];

fn is_header_name(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(|b| b.is_ascii_graphic() && b != b':')
}

fn is_header_value(value: &str) -> bool {
    value
        .bytes()
        .all(|b| b == b'\t' || (b' '..=b'~').contains(&b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_id() -> ClientId {
        ClientId::new("XXX").unwrap()
    }

    #[test]
    fn test_builder_requires_client_id() {
        let result = MoltinConfigBuilder::new().build();

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField { field: "client_id" })
        ));
    }

    #[test]
    fn test_builder_provides_sensible_defaults() {
        let config = MoltinConfig::builder().client_id(client_id()).build().unwrap();

        assert_eq!(config.api_version(), &ApiVersion::latest());
        assert_eq!(config.host().as_ref(), "https://api.moltin.com");
        assert!(config.client_secret().is_none());
        assert!(config.access_token().is_none());
        assert!(config.currency().is_none());
        assert!(config.language().is_none());
        assert!(config.custom_headers().is_empty());
    }

    #[test]
    fn test_base_and_token_urls() {
        let config = MoltinConfig::builder()
            .client_id(client_id())
            .host(HostUrl::new("http://localhost:4000/").unwrap())
            .build()
            .unwrap();

        assert_eq!(config.base_url(), "http://localhost:4000/v2");
        assert_eq!(config.token_url(), "http://localhost:4000/oauth/access_token");
    }

    #[test]
    fn test_builder_with_all_optional_fields() {
        let config = MoltinConfig::builder()
            .client_id(client_id())
            .client_secret(ClientSecret::new("secret").unwrap())
            .api_version(ApiVersion::Custom("v3".to_string()))
            .access_token("preset-token")
            .currency("USD")
            .language("en")
            .user_agent_prefix("MyStore/1.0")
            .header("X-Trace", "on")
            .build()
            .unwrap();

        assert_eq!(config.client_secret().unwrap().as_ref(), "secret");
        assert_eq!(config.base_url(), "https://api.moltin.com/v3");
        assert_eq!(config.access_token().unwrap().as_str(), "preset-token");
        assert!(config.access_token().unwrap().expires().is_none());
        assert_eq!(config.currency(), Some("USD"));
        assert_eq!(config.language(), Some("en"));
        assert_eq!(config.user_agent_prefix(), Some("MyStore/1.0"));
        assert_eq!(
            config.custom_headers().get("X-Trace"),
            Some(&"on".to_string())
        );
    }

    #[test]
    fn test_builder_rejects_empty_access_token() {
        let result = MoltinConfig::builder()
            .client_id(client_id())
            .access_token("")
            .build();

        assert!(matches!(result, Err(ConfigError::EmptyAccessToken)));
    }

    #[test]
    fn test_builder_rejects_invalid_header_name() {
        let result = MoltinConfig::builder()
            .client_id(client_id())
            .header("Bad Header", "x")
            .build();

        assert!(matches!(result, Err(ConfigError::InvalidHeader { name }) if name == "Bad Header"));
    }

    #[test]
    fn test_builder_rejects_invalid_currency_and_language() {
        let result = MoltinConfig::builder()
            .client_id(client_id())
            .currency("E\nUR")
            .build();
        assert!(
            matches!(result, Err(ConfigError::InvalidHeader { name }) if name == "X-MOLTIN-CURRENCY")
        );

        let result = MoltinConfig::builder()
            .client_id(client_id())
            .language("")
            .build();
        assert!(
            matches!(result, Err(ConfigError::InvalidHeader { name }) if name == "X-MOLTIN-LANGUAGE")
        );

        let result = MoltinConfig::builder()
            .client_id(client_id())
            .user_agent_prefix("Store\r\n")
            .build();
        assert!(matches!(result, Err(ConfigError::InvalidHeader { name }) if name == "User-Agent"));
    }

    #[test]
    fn test_builder_rejects_reserved_custom_headers() {
        for name in ["Authorization", "accept", "x-moltin-currency"] {
            let result = MoltinConfig::builder()
                .client_id(client_id())
                .header(name, "value")
                .build();
            assert!(
                matches!(&result, Err(ConfigError::ReservedHeader { name: n }) if n.as_str() == name),
                "{name} should be reserved"
            );
        }
    }

    #[test]
    fn test_builder_rejects_malformed_custom_api_version() {
        for version in ["", "a/b"] {
            let result = MoltinConfig::builder()
                .client_id(client_id())
                .api_version(ApiVersion::Custom(version.to_string()))
                .build();
            assert!(matches!(result, Err(ConfigError::InvalidApiVersion { .. })));
        }
    }

    #[test]
    fn test_config_debug_masks_credentials() {
        let config = MoltinConfig::builder()
            .client_id(client_id())
            .client_secret(ClientSecret::new("very-secret").unwrap())
            .access_token("preset-token")
            .build()
            .unwrap();

        let debug_str = format!("{:?}", config);
        assert!(debug_str.contains("MoltinConfig"));
        assert!(!debug_str.contains("very-secret"));
        assert!(!debug_str.contains("preset-token"));
    }
}
