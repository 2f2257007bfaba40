//! HTTP client for Moltin API communication.
//!
//! This module provides the [`HttpClient`] type, which performs a single
//! authenticated round trip per request.

use std::collections::HashMap;

use crate::clients::errors::HttpError;
use crate::clients::http_request::HttpRequest;
use crate::clients::http_response::HttpResponse;
use crate::config::{MoltinConfig, CURRENCY_HEADER, LANGUAGE_HEADER};

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Value of the `X-MOLTIN-SDK-LANGUAGE` header.
pub const SDK_LANGUAGE: &str = "rust";

/// HTTP client for making requests to the Moltin API.
///
/// The client handles:
/// - URL construction from the configured host and API version
/// - Default headers including User-Agent and SDK identification
/// - Per-request bearer authorization
///
/// It never retries and never interprets the response: status, headers and
/// body text are handed back as-is.
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use moltin_api::clients::{HttpClient, HttpMethod, HttpRequest};
///
/// let client = HttpClient::new(&config, reqwest::Client::new());
///
/// let request = HttpRequest::builder(HttpMethod::Get, "integrations")
///     .build()
///     .unwrap();
///
/// let response = client.send(&request, token.as_str()).await?;
/// ```
#[derive(Debug)]
pub struct HttpClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// Versioned base URL (e.g., `https://api.moltin.com/v2`).
    base_url: String,
    /// Default headers to include in all requests.
    default_headers: HashMap<String, String>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client for the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Supplies the base URL and the default headers
    /// * `client` - The reqwest client to send through, usually shared with
    ///   the token provider
    #[must_use]
    pub fn new(config: &MoltinConfig, client: reqwest::Client) -> Self {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}Moltin API Library v{SDK_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());
        default_headers.insert(
            "X-MOLTIN-SDK-LANGUAGE".to_string(),
            SDK_LANGUAGE.to_string(),
        );
        default_headers.insert("X-MOLTIN-SDK-VERSION".to_string(), SDK_VERSION.to_string());

        if let Some(currency) = config.currency() {
            default_headers.insert(CURRENCY_HEADER.to_string(), currency.to_string());
        }
        if let Some(language) = config.language() {
            default_headers.insert(LANGUAGE_HEADER.to_string(), language.to_string());
        }
        for (name, value) in config.custom_headers() {
            default_headers.insert(name.clone(), value.clone());
        }

        Self {
            client,
            base_url: config.base_url(),
            default_headers,
        }
    }

    /// Returns the versioned base URL for this client.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Returns the absolute URL for a request path.
    #[must_use]
    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Sends an HTTP request to the Moltin API.
    ///
    /// Exactly one round trip is made. A non-2xx status is not an error at
    /// this layer: see [`HttpResponse::normalize`].
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - Request validation fails (`InvalidRequest`)
    /// - A network error occurs or the body cannot be read (`Network`)
    pub async fn send(&self, request: &HttpRequest, token: &str) -> Result<HttpResponse, HttpError> {
        request.verify()?;

        let url = self.url_for(&request.path);
        tracing::debug!(
            method = %request.http_method,
            url = %url,
            "Sending Moltin API request"
        );

        let mut req_builder = self
            .client
            .request(request.http_method.as_reqwest(), &url)
            .bearer_auth(token);

        for (key, value) in &self.default_headers {
            req_builder = req_builder.header(key, value);
        }

        if !request.query.is_empty() {
            req_builder = req_builder.query(&request.query);
        }

        if let Some(body) = &request.body {
            req_builder = req_builder
                .header("Content-Type", "application/json")
                .body(body.to_string());
        }

        let res = req_builder.send().await?;

        let code = res.status().as_u16();
        let headers = Self::parse_response_headers(res.headers());
        let body = res.text().await?;

        let response = HttpResponse::new(code, headers, body);
        if !response.is_ok() {
            tracing::warn!(
                status = code,
                path = %request.path,
                request_id = ?response.request_id(),
                "Moltin API returned an error status"
            );
        }

        Ok(response)
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }
}
