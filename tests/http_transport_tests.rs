//! reqwest transport and full client tests against a local HTTP server.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::json;
use sicredi_pix::{
    CertificateBundle, CertificateError, CertificateMaterial, ConnectionError, HttpMethod,
    HttpRequest, HttpTransport, ListCobParams, PixClient, PixConfig, PixError,
    ReqwestHttpTransport,
};
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TXID: &str = "7978c0c97ea847e78e8849634473c1f1";

fn plain_transport(timeout: Duration) -> ReqwestHttpTransport {
    ReqwestHttpTransport::with_client(reqwest::Client::new(), timeout, true)
}

fn config(base_url: &str) -> PixConfig {
    PixConfig::builder()
        .client_id("client")
        .client_secret("secret")
        .cert("cert.pem")
        .key("key.pem")
        .base_url(base_url)
        .max_retries(0)
        .build()
        .unwrap()
}

fn self_signed_bundle(with_ca: bool) -> CertificateBundle {
    let certified = rcgen::generate_simple_self_signed(vec!["localhost".to_string()]).unwrap();
    let cert_pem = certified.cert.pem();
    CertificateBundle {
        cert: CertificateMaterial::Pem(cert_pem.clone()),
        key: CertificateMaterial::Pem(certified.key_pair.serialize_pem()),
        ca: with_ca.then(|| CertificateMaterial::Pem(cert_pem)),
        passphrase: None,
    }
}

#[test]
fn test_mtls_transport_from_pem_identity() {
    ReqwestHttpTransport::new(&self_signed_bundle(false), Duration::from_secs(5), false).unwrap();
    ReqwestHttpTransport::new(&self_signed_bundle(true), Duration::from_secs(5), false).unwrap();
}

#[test]
fn test_mtls_transport_rejects_bad_key() {
    let mut bundle = self_signed_bundle(false);
    bundle.key = CertificateMaterial::Raw(b"not a private key".to_vec());

    let err = ReqwestHttpTransport::new(&bundle, Duration::from_secs(5), false)
        .err()
        .unwrap();
    match err {
        PixError::Certificate(CertificateError::InvalidFormat { detail }) => {
            assert!(detail.starts_with("client certificate or key rejected"))
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_tls_against_plain_http_server_is_connection_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let transport =
        ReqwestHttpTransport::new(&self_signed_bundle(true), Duration::from_secs(5), false)
            .unwrap();
    let url = server.uri().replacen("http://", "https://", 1);
    let err = transport
        .send(HttpRequest::new(HttpMethod::Get, format!("{}/api/v2/cob", url)))
        .await
        .unwrap_err();

    assert!(
        matches!(
            err,
            PixError::Connection(ConnectionError::TlsFailure { .. })
                | PixError::Connection(ConnectionError::Network { .. })
        ),
        "unexpected error: {err:?}"
    );
    assert!(err.is_retryable());
    assert_eq!(err.error_code(), "CONNECTION_ERROR");
}

#[tokio::test]
async fn test_transport_round_trip() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/api/v2/cob/abc"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"status": "REMOVIDA_PELO_USUARIO_RECEBEDOR"})))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("x-request-id", "r-1")
                .set_body_json(json!({"ok": true})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let transport = plain_transport(Duration::from_secs(5));
    let request = HttpRequest::new(HttpMethod::Patch, format!("{}/api/v2/cob/abc", server.uri()))
        .header("Content-Type", "application/json")
        .body(json!({"status": "REMOVIDA_PELO_USUARIO_RECEBEDOR"}).to_string());

    let response = transport.send(request).await.unwrap();
    assert_eq!(response.status, 200);
    assert_eq!(response.headers.get("x-request-id").map(String::as_str), Some("r-1"));
    assert_eq!(response.body, r#"{"ok":true}"#);
}

#[tokio::test]
async fn test_transport_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
        .mount(&server)
        .await;

    let transport = plain_transport(Duration::from_secs(5));
    let request = HttpRequest::new(HttpMethod::Get, format!("{}/slow", server.uri()))
        .timeout(Duration::from_millis(50));

    let err = transport.send(request).await.unwrap_err();
    match err {
        PixError::Connection(ConnectionError::Timeout { timeout }) => {
            assert_eq!(timeout, Duration::from_millis(50))
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_transport_connection_refused() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let transport = plain_transport(Duration::from_secs(5));
    let request = HttpRequest::new(HttpMethod::Get, format!("http://127.0.0.1:{}/", port));

    let err = transport.send(request).await.unwrap_err();
    match err {
        PixError::Connection(ConnectionError::Refused { host }) => assert_eq!(host, "127.0.0.1"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_client_pipeline_over_http() {
    let server = MockServer::start().await;
    let basic = format!("Basic {}", STANDARD.encode("client:secret"));

    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .and(query_param("grant_type", "client_credentials"))
        .and(header("authorization", basic.as_str()))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "live-token",
            "token_type": "Bearer",
            "expires_in": 3600,
            "scope": "cob.read cob.write"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v2/cob"))
        .and(query_param("inicio", "2024-01-01T00:00:00Z"))
        .and(query_param("fim", "2024-01-02T00:00:00Z"))
        .and(header("authorization", "Bearer live-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "parametros": {
                "inicio": "2024-01-01T00:00:00Z",
                "fim": "2024-01-02T00:00:00Z",
                "paginacao": {"paginaAtual": 0, "itensPorPagina": 100, "quantidadeDePaginas": 1, "quantidadeTotalDeItens": 0}
            },
            "cobs": []
        })))
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/api/v3/cob/{}", TXID)))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "type": "https://pix.bcb.gov.br/api/v2/error/CobNaoEncontrado",
            "title": "Cobrança não encontrada",
            "status": 404,
            "detail": "Nenhuma cobrança encontrada para o txid informado."
        })))
        .mount(&server)
        .await;

    let transport = Arc::new(plain_transport(Duration::from_secs(5)));
    let client = PixClient::with_transport(config(&server.uri()), transport);

    let params = ListCobParams::new("2024-01-01T00:00:00Z", "2024-01-02T00:00:00Z");
    let first = client.cob().list(&params).await.unwrap();
    assert!(first.cobs.is_empty());
    assert_eq!(first.parametros.paginacao.itens_por_pagina, 100);
    client.cob().list(&params).await.unwrap();

    let err = client.cob().get(TXID, None).await.unwrap_err();
    assert_eq!(err.status_code(), Some(404));
    assert!(!err.is_retryable());
}
