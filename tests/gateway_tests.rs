//! Integration tests for the gateway.
//!
//! These tests verify the token lifecycle seen through resource calls, list
//! query parameters, configured headers, local validation of unsupported
//! operations, custom resource definitions and typed payloads.

use chrono::{Duration, Utc};
use moltin_api::rest::{
    ListParams, ResourceDefinition, ResourceError, ResourceOperation, ValidationError,
};
use moltin_api::{AuthError, ClientId, ClientSecret, Gateway, HostUrl, MoltinConfig};
use serde::Deserialize;
use serde_json::json;
use wiremock::matchers::{any, body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a gateway that must exchange client credentials.
fn create_gateway(server: &MockServer) -> Gateway {
    let config = MoltinConfig::builder()
        .client_id(ClientId::new("client-id").unwrap())
        .client_secret(ClientSecret::new("client-secret").unwrap())
        .host(HostUrl::new(server.uri()).unwrap())
        .build()
        .unwrap();
    Gateway::new(config).unwrap()
}

/// Creates a gateway with a pre-supplied token.
fn create_gateway_with_token(server: &MockServer) -> Gateway {
    let config = MoltinConfig::builder()
        .client_id(ClientId::new("client-id").unwrap())
        .host(HostUrl::new(server.uri()).unwrap())
        .access_token("preset-token")
        .build()
        .unwrap();
    Gateway::new(config).unwrap()
}

fn token_response(token: &str, expires: i64) -> serde_json::Value {
    json!({
        "access_token": token,
        "token_type": "Bearer",
        "expires": expires,
        "expires_in": 3600,
        "identifier": "client_credentials"
    })
}

// ============================================================================
// Token Lifecycle
// ============================================================================

#[tokio::test]
async fn test_first_call_exchanges_client_credentials() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth/access_token"))
        .and(body_string_contains("grant_type=client_credentials"))
        .and(body_string_contains("client_id=client-id"))
        .and(body_string_contains("client_secret=client-secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_response(
            "fresh-token",
            (Utc::now() + Duration::hours(1)).timestamp(),
        )))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v2/products"))
        .and(header("Authorization", "Bearer fresh-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .expect(2)
        .mount(&server)
        .await;

    let gateway = create_gateway(&server);
    gateway.products().all().await.unwrap();
    gateway.products().all().await.unwrap();
}

#[tokio::test]
async fn test_expired_token_triggers_one_exchange_per_call() {
    let server = MockServer::start().await;

    // Every issued token is already expired, so each call must exchange
    // exactly once before its request.
    Mock::given(method("POST"))
        .and(path("/oauth/access_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_response(
            "short-lived",
            (Utc::now() - Duration::seconds(5)).timestamp(),
        )))
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v2/integrations/123"))
        .and(header("Authorization", "Bearer short-lived"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"id": "123"}})))
        .expect(2)
        .mount(&server)
        .await;

    let gateway = create_gateway(&server);
    gateway.integrations().get("123").await.unwrap();
    gateway.integrations().get("123").await.unwrap();
}

#[tokio::test]
async fn test_pre_supplied_token_is_used_without_exchange() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth/access_token"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v2/brands"))
        .and(header("Authorization", "Bearer preset-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = create_gateway_with_token(&server);
    gateway.brands().all().await.unwrap();
}

#[tokio::test]
async fn test_failed_exchange_surfaces_auth_error_without_resource_request() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth/access_token"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "errors": [{"status": 401, "title": "Unauthorized"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v2/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .expect(0)
        .mount(&server)
        .await;

    let gateway = create_gateway(&server);
    let error = gateway.products().all().await.unwrap_err();

    assert_eq!(error.status(), Some(401));
    assert!(matches!(
        error,
        ResourceError::Auth(AuthError::TokenRequestFailed { status: 401, .. })
    ));
}

#[tokio::test]
async fn test_authenticate_eagerly_caches_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth/access_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_response(
            "eager",
            (Utc::now() + Duration::hours(1)).timestamp(),
        )))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = create_gateway(&server);
    let token = gateway.authenticate().await.unwrap();

    assert_eq!(token.as_str(), "eager");
    assert_eq!(
        gateway.token_provider().cached().await.unwrap().as_str(),
        "eager"
    );
}

// ============================================================================
// Requests
// ============================================================================

#[tokio::test]
async fn test_list_params_become_query_pairs() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/products"))
        .and(query_param("page[limit]", "10"))
        .and(query_param("page[offset]", "20"))
        .and(query_param("sort", "-created_at"))
        .and(query_param("filter", "eq(status,live)"))
        .and(query_param("include", "main_image"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": "p1"}],
            "links": {
                "current": "https://api.moltin.com/v2/products?page[offset]=20",
                "next": "https://api.moltin.com/v2/products?page[offset]=30"
            },
            "included": {"main_images": [{"id": "f1"}]}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = create_gateway_with_token(&server);
    let params = ListParams::new()
        .limit(10)
        .offset(20)
        .sort("-created_at")
        .filter("eq(status,live)")
        .include("main_image");
    let response = gateway.products().all_with(&params).await.unwrap();

    assert_eq!(response.len(), 1);
    assert!(response.has_next_page());
    assert!(response.included().is_some());
}

#[tokio::test]
async fn test_configured_headers_are_sent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/currencies"))
        .and(header("X-MOLTIN-CURRENCY", "EUR"))
        .and(header("X-MOLTIN-LANGUAGE", "fr"))
        .and(header("X-Custom-Channel", "store-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .expect(1)
        .mount(&server)
        .await;

    let config = MoltinConfig::builder()
        .client_id(ClientId::new("client-id").unwrap())
        .host(HostUrl::new(server.uri()).unwrap())
        .access_token("preset-token")
        .currency("EUR")
        .language("fr")
        .header("X-Custom-Channel", "store-1")
        .build()
        .unwrap();
    let gateway = Gateway::new(config).unwrap();

    gateway.currencies().all().await.unwrap();
}

#[tokio::test]
async fn test_identifiers_are_percent_encoded_in_path() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/customers/a%20b"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"id": "a b"}})))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = create_gateway_with_token(&server);
    let response = gateway.customers().get("a b").await.unwrap();
    assert_eq!(response["id"], "a b");
}

#[tokio::test]
async fn test_unsupported_operations_are_rejected_locally() {
    let server = MockServer::start().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let gateway = create_gateway(&server);

    let error = gateway
        .orders()
        .create(&json!({"customer": {"id": "c1"}}))
        .await
        .unwrap_err();
    assert!(matches!(
        error,
        ResourceError::Validation(ValidationError::UnsupportedOperation {
            resource: "orders",
            operation: "create",
        })
    ));

    let error = gateway.products().get_logs("p1").await.unwrap_err();
    assert!(matches!(
        error,
        ResourceError::Validation(ValidationError::UnsupportedOperation { .. })
    ));
}

#[tokio::test]
async fn test_custom_resource_definition_uses_nested_name() {
    const ADDRESSES: ResourceDefinition = ResourceDefinition::new(
        "flows/addresses/entries",
        &[ResourceOperation::All, ResourceOperation::Get],
    );

    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/flows/addresses/entries/e1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"id": "e1", "type": "entry"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = create_gateway_with_token(&server);
    let response = gateway.resource(ADDRESSES).get("e1").await.unwrap();
    assert_eq!(response["type"], "entry");
}

// ============================================================================
// Connection Failures
// ============================================================================

/// Port 1 on loopback has no listener, so every connection is refused.
const CLOSED_HOST: &str = "http://127.0.0.1:1";

#[tokio::test]
async fn test_unreachable_host_surfaces_transport_error() {
    let config = MoltinConfig::builder()
        .client_id(ClientId::new("client-id").unwrap())
        .host(HostUrl::new(CLOSED_HOST).unwrap())
        .access_token("preset-token")
        .build()
        .unwrap();
    let gateway = Gateway::new(config).unwrap();

    let error = gateway.integrations().get("1").await.unwrap_err();

    assert_eq!(error.status(), None);
    match error {
        ResourceError::Transport(source) => assert!(source.is_connect()),
        other => panic!("Expected Transport error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_unreachable_token_endpoint_surfaces_auth_network_error() {
    let config = MoltinConfig::builder()
        .client_id(ClientId::new("client-id").unwrap())
        .client_secret(ClientSecret::new("client-secret").unwrap())
        .host(HostUrl::new(CLOSED_HOST).unwrap())
        .build()
        .unwrap();
    let gateway = Gateway::new(config).unwrap();

    let error = gateway.products().all().await.unwrap_err();

    assert_eq!(error.status(), None);
    match error {
        ResourceError::Auth(AuthError::Network(source)) => assert!(source.is_connect()),
        other => panic!("Expected Auth network error, got: {other:?}"),
    }
    assert!(gateway.token_provider().cached().await.is_none());
}

// ============================================================================
// Typed Payloads
// ============================================================================

#[derive(Debug, Deserialize)]
struct Promotion {
    id: String,
    name: String,
    enabled: bool,
}

#[tokio::test]
async fn test_typed_client_decodes_payload() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/promotions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {"id": "promo-1", "type": "promotion", "name": "Summer", "enabled": true},
                {"id": "promo-2", "type": "promotion", "name": "Winter", "enabled": false}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = create_gateway_with_token(&server);
    let promotions = gateway
        .promotions()
        .typed::<Promotion>()
        .all()
        .await
        .unwrap();

    assert_eq!(promotions.len(), 2);
    assert_eq!(promotions[0].id, "promo-1");
    assert_eq!(promotions[1].name, "Winter");
    assert!(!promotions[1].enabled);
}

#[tokio::test]
async fn test_typed_client_reports_shape_mismatch() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/promotions/promo-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"id": "promo-1", "type": "promotion"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = create_gateway_with_token(&server);
    let error = gateway
        .promotions()
        .typed::<Promotion>()
        .get("promo-1")
        .await
        .unwrap_err();

    assert!(matches!(
        error,
        ResourceError::Decode {
            resource: "promotions",
            ..
        }
    ));
}
