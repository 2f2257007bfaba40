//! The Moltin API gateway.
//!
//! A [`Gateway`] owns the configuration, one shared `reqwest::Client`, one
//! [`TokenProvider`] and one [`HttpClient`]. Resource clients borrow it, so
//! every resource shares the same token cache and connection pool.

use crate::auth::{AccessToken, AuthError, TokenProvider};
use crate::clients::HttpClient;
use crate::config::MoltinConfig;
use crate::rest::{
    ResourceClient, ResourceDefinition, ResourceError, BRANDS, CATEGORIES, COLLECTIONS,
    CURRENCIES, CUSTOMERS, FILES, FLOWS, INTEGRATIONS, ORDERS, PRODUCTS, PROMOTIONS,
};

/// Entry point for the Moltin API.
///
/// # Thread Safety
///
/// `Gateway` is `Send + Sync`. Share it behind an `Arc` to use it from
/// several tasks; concurrent calls share the cached token.
///
/// # Example
///
/// ```rust,ignore
/// use moltin_api::{ClientId, ClientSecret, Gateway, MoltinConfig};
/// use serde_json::json;
///
/// let config = MoltinConfig::builder()
///     .client_id(ClientId::new("client-id").unwrap())
///     .client_secret(ClientSecret::new("client-secret").unwrap())
///     .build()
///     .unwrap();
///
/// let gateway = Gateway::new(config)?;
///
/// let integration = gateway
///     .integrations()
///     .create(&json!({
///         "type": "integration",
///         "name": "Order created",
///         "integration_type": "webhook",
///         "enabled": true,
///         "observes": ["order.created"],
///         "configuration": {"url": "https://example.com/hooks"}
///     }))
///     .await?;
/// println!("Created {}", integration["id"]);
/// ```
#[derive(Debug)]
pub struct Gateway {
    config: MoltinConfig,
    token_provider: TokenProvider,
    http_client: HttpClient,
}

// Verify Gateway is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Gateway>();
};

impl Gateway {
    /// Creates a gateway for the given configuration.
    ///
    /// No network I/O happens here. The first resource call exchanges
    /// credentials unless the configuration carries a token.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Transport`] if the HTTP client cannot be
    /// initialized (e.g., TLS backend failure).
    pub fn new(config: MoltinConfig) -> Result<Self, ResourceError> {
        let client = reqwest::Client::builder().use_rustls_tls().build()?;

        let token_provider = TokenProvider::new(&config, client.clone());
        let http_client = HttpClient::new(&config, client);

        tracing::debug!(
            base_url = %http_client.base_url(),
            grant_type = token_provider.grant_type().as_str(),
            "Created Moltin gateway"
        );

        Ok(Self {
            config,
            token_provider,
            http_client,
        })
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &MoltinConfig {
        &self.config
    }

    /// Returns the token provider shared by every resource client.
    #[must_use]
    pub const fn token_provider(&self) -> &TokenProvider {
        &self.token_provider
    }

    /// Returns the HTTP client shared by every resource client.
    #[must_use]
    pub const fn http_client(&self) -> &HttpClient {
        &self.http_client
    }

    /// Exchanges credentials now instead of on the first call.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] if the exchange fails.
    pub async fn authenticate(&self) -> Result<AccessToken, AuthError> {
        self.token_provider.authenticate().await
    }

    /// Returns a client for any resource definition, built-in or custom.
    #[must_use]
    pub const fn resource(&self, definition: ResourceDefinition) -> ResourceClient<'_> {
        ResourceClient::new(self, definition)
    }

    /// Returns the `integrations` client.
    #[must_use]
    pub const fn integrations(&self) -> ResourceClient<'_> {
        self.resource(INTEGRATIONS)
    }

    /// Returns the `products` client.
    #[must_use]
    pub const fn products(&self) -> ResourceClient<'_> {
        self.resource(PRODUCTS)
    }

    /// Returns the `brands` client.
    #[must_use]
    pub const fn brands(&self) -> ResourceClient<'_> {
        self.resource(BRANDS)
    }

    /// Returns the `categories` client.
    #[must_use]
    pub const fn categories(&self) -> ResourceClient<'_> {
        self.resource(CATEGORIES)
    }

    /// Returns the `collections` client.
    #[must_use]
    pub const fn collections(&self) -> ResourceClient<'_> {
        self.resource(COLLECTIONS)
    }

    /// Returns the `currencies` client.
    #[must_use]
    pub const fn currencies(&self) -> ResourceClient<'_> {
        self.resource(CURRENCIES)
    }

    /// Returns the `customers` client.
    #[must_use]
    pub const fn customers(&self) -> ResourceClient<'_> {
        self.resource(CUSTOMERS)
    }

    /// Returns the `files` client.
    #[must_use]
    pub const fn files(&self) -> ResourceClient<'_> {
        self.resource(FILES)
    }

    /// Returns the `flows` client.
    #[must_use]
    pub const fn flows(&self) -> ResourceClient<'_> {
        self.resource(FLOWS)
    }

    /// Returns the `orders` client. Orders cannot be created through it.
    #[must_use]
    pub const fn orders(&self) -> ResourceClient<'_> {
        self.resource(ORDERS)
    }

    /// Returns the `promotions` client.
    #[must_use]
    pub const fn promotions(&self) -> ResourceClient<'_> {
        self.resource(PROMOTIONS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::GrantType;
    use crate::config::{ClientId, ClientSecret};

    fn gateway(secret: Option<&str>) -> Gateway {
        let mut builder = MoltinConfig::builder().client_id(ClientId::new("client").unwrap());
        if let Some(secret) = secret {
            builder = builder.client_secret(ClientSecret::new(secret).unwrap());
        }
        Gateway::new(builder.build().unwrap()).unwrap()
    }

    #[test]
    fn test_gateway_exposes_builtin_resources() {
        let gateway = gateway(None);
        assert_eq!(gateway.integrations().name(), "integrations");
        assert_eq!(gateway.products().name(), "products");
        assert_eq!(gateway.brands().name(), "brands");
        assert_eq!(gateway.categories().name(), "categories");
        assert_eq!(gateway.collections().name(), "collections");
        assert_eq!(gateway.currencies().name(), "currencies");
        assert_eq!(gateway.customers().name(), "customers");
        assert_eq!(gateway.files().name(), "files");
        assert_eq!(gateway.flows().name(), "flows");
        assert_eq!(gateway.orders().name(), "orders");
        assert_eq!(gateway.promotions().name(), "promotions");
    }

    #[test]
    fn test_gateway_grant_type_follows_secret() {
        assert_eq!(
            gateway(None).token_provider().grant_type(),
            GrantType::Implicit
        );
        assert_eq!(
            gateway(Some("secret")).token_provider().grant_type(),
            GrantType::ClientCredentials
        );
    }

    #[test]
    fn test_gateway_shares_base_url() {
        let gateway = gateway(None);
        assert_eq!(gateway.http_client().base_url(), "https://api.moltin.com/v2");
        assert_eq!(
            gateway.token_provider().token_url(),
            "https://api.moltin.com/oauth/access_token"
        );
    }

    #[test]
    fn test_custom_resource_definition() {
        const ADDRESSES: ResourceDefinition = ResourceDefinition::new(
            "flows/addresses/entries",
            crate::rest::CRUD_OPERATIONS,
        );
        let gateway = gateway(None);
        let client = gateway.resource(ADDRESSES);
        assert_eq!(client.definition(), &ADDRESSES);
    }
}
