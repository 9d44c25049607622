//! Request pipeline tests over the mock transport.

use serde_json::json;
use sicredi_pix::{
    AuthError, CreateCobRequest, DefaultTokenManager, HttpResponse, HttpTransport,
    MockHttpTransport, PixClient, PixConfig, PixError, TokenManager, TokenManagerConfig,
};
use secrecy::SecretString;
use std::sync::Arc;
use std::time::Duration;

const TXID: &str = "7978c0c97ea847e78e8849634473c1f1";

fn token_json(token: &str) -> serde_json::Value {
    json!({"access_token": token, "token_type": "Bearer", "expires_in": 3600})
}

fn cob_json() -> serde_json::Value {
    json!({
        "calendario": {"criacao": "2024-01-01T10:00:00Z", "expiracao": 3600},
        "txid": TXID,
        "revisao": 0,
        "status": "ATIVA",
        "valor": {"original": "10.50"},
        "chave": "pix@empresa.com.br"
    })
}

fn config(max_retries: u32) -> PixConfig {
    PixConfig::builder()
        .client_id("client")
        .client_secret("secret")
        .cert("cert.pem")
        .key("key.pem")
        .base_url("https://api.example")
        .max_retries(max_retries)
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_server_error_then_success_is_retried() {
    let transport = Arc::new(MockHttpTransport::new());
    transport
        .queue_json_response(200, &token_json("tok"))
        .queue_json_response(500, &json!({"title": "Internal Server Error", "status": 500}))
        .queue_json_response(200, &cob_json());

    let client = PixClient::with_transport(config(1), transport.clone());
    let request = CreateCobRequest::new(3600, "10.50", "pix@empresa.com.br");
    let cob = client.cob().create(TXID, &request).await.unwrap();

    assert_eq!(cob.txid, TXID);
    assert_eq!(transport.requests_matching("/oauth/token").len(), 1);
    assert_eq!(transport.requests_matching("/api/v2/cob/").len(), 2);
    assert_eq!(transport.request_count(), 3);
}

#[tokio::test]
async fn test_retries_exhausted_surface_last_error() {
    let transport = Arc::new(MockHttpTransport::new());
    transport
        .queue_json_response(200, &token_json("tok"))
        .set_default_response(HttpResponse::new(503, "Service Unavailable"));

    let client = PixClient::with_transport(config(1), transport.clone());
    let err = client.cob().get(TXID, None).await.unwrap_err();

    match err {
        PixError::Api(api) => {
            assert_eq!(api.status, 503);
            assert_eq!(api.title, "Unknown error");
            assert_eq!(api.detail.as_deref(), Some("Service Unavailable"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(transport.requests_matching("/api/v3/cob/").len(), 2);
}

#[tokio::test]
async fn test_unauthorized_invalidates_then_refetches() {
    let transport = Arc::new(MockHttpTransport::new());
    transport
        .queue_json_response(200, &token_json("first"))
        .queue_response(HttpResponse::new(401, ""))
        .queue_json_response(200, &token_json("second"))
        .queue_json_response(200, &cob_json());

    let client = PixClient::with_transport(config(3), transport.clone());

    let err = client.cob().get(TXID, None).await.unwrap_err();
    assert!(matches!(err, PixError::Auth(AuthError::TokenExpired)));
    assert!(err.needs_reauth());

    client.cob().get(TXID, None).await.unwrap();
    let last = transport.last_request().unwrap();
    assert_eq!(last.header_value("authorization"), Some("Bearer second"));
    assert_eq!(transport.requests_matching("/oauth/token").len(), 2);
}

#[tokio::test]
async fn test_concurrent_calls_share_one_token_fetch() {
    let transport = Arc::new(MockHttpTransport::new().with_latency(Duration::from_millis(30)));
    transport.queue_json_response(200, &token_json("shared"));
    transport.set_default_response(HttpResponse::new(200, cob_json().to_string()));

    let client = Arc::new(PixClient::with_transport(config(0), transport.clone()));

    let handles: Vec<_> = (0..6)
        .map(|_| {
            let client = Arc::clone(&client);
            tokio::spawn(async move { client.cob().get(TXID, None).await })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(transport.requests_matching("/oauth/token").len(), 1);
    assert_eq!(transport.requests_matching("/api/v3/cob/").len(), 6);
    for request in transport.requests_matching("/api/v3/cob/") {
        assert_eq!(request.header_value("authorization"), Some("Bearer shared"));
    }
}

#[tokio::test]
async fn test_token_manager_short_lived_token_is_always_stale() {
    let transport = Arc::new(MockHttpTransport::new());
    transport.set_default_response(HttpResponse::new(
        200,
        json!({"access_token": "brief", "expires_in": 1}).to_string(),
    ));
    let shared: Arc<dyn HttpTransport> = transport.clone();

    let manager = DefaultTokenManager::new(
        "client",
        SecretString::new("secret".to_string()),
        "https://api.example",
        shared,
        TokenManagerConfig::default(),
    );

    manager.get_access_token().await.unwrap();
    manager.get_access_token().await.unwrap();
    assert_eq!(transport.request_count(), 2);
}
