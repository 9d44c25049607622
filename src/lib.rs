//! Sicredi PIX API client.
//!
//! Typed async client for the Sicredi PIX REST API (BACEN PIX standard) over
//! mutual TLS with OAuth2 client-credentials authentication.
//!
//! # Features
//!
//! - Immediate charges (`cob`) and charges with due date (`cobv`)
//! - Received payments and returns (`pix`)
//! - Batches of charges with due date (`lotecobv`)
//! - Payload locations (`loc`) and webhook configuration
//! - Cached, deduplicated access tokens with proactive refresh
//! - Exponential backoff retry with jitter
//! - Webhook callback parsing, txid generation and CPF/CNPJ/PIX key validators
//! - QR code SVG and data URL rendering for `pixCopiaECola` payloads
//!
//! # Example
//!
//! ```rust,no_run
//! use sicredi_pix::{CreateCobRequest, PixClient, PixConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = PixConfig::builder()
//!         .client_id("my-client-id")
//!         .client_secret("my-client-secret")
//!         .cert("/etc/pix/cert.pem")
//!         .key("/etc/pix/key.pem")
//!         .sandbox()
//!         .build()?;
//!
//!     let client = PixClient::new(config);
//!     let txid = client.cob().generate_txid(None)?;
//!
//!     let request = CreateCobRequest::new(3600, "10.50", "pix@empresa.com.br")
//!         .with_solicitacao_pagador("Pedido 42");
//!     let cob = client.cob().create(&txid, &request).await?;
//!
//!     println!("Copia e cola: {:?}", cob.pix_copia_e_cola);
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - `types`: configuration and wire payload definitions
//! - `error`: error hierarchy with hints and retry classification
//! - `core`: certificate resolution and HTTP transport
//! - `token`: access token lifecycle
//! - `resilience`: retry policy
//! - `client`: request executor and the lazily initialized client
//! - `services`: one handle per API resource
//! - `webhook`: inbound callback parsing
//! - `utils`: txid, validators, dates, QR codes and constants

pub mod builders;
pub mod client;
pub mod core;
pub mod error;
pub mod resilience;
pub mod services;
pub mod token;
pub mod types;
pub mod utils;
pub mod webhook;

// Re-export main client
pub use client::{PixClient, QueryParams, RequestExecutor, ResponseBody};

// Re-export builders
pub use builders::PixConfigBuilder;

// Re-export errors
pub use error::{
    ApiError, AuthError, CertificateError, ConfigurationError, ConnectionError, PixError,
    PixResult, ValidationError,
};

// Re-export types
pub use types::*;

// Re-export core components
pub use core::{
    // Certificates
    CertificateBundle, CertificateMaterial, CertificateResolver,
    // Transport
    HttpMethod, HttpRequest, HttpResponse, HttpTransport, MockHttpTransport, ReqwestHttpTransport,
};

// Re-export token management
pub use token::{DefaultTokenManager, MockTokenManager, TokenManager, TokenManagerConfig};

// Re-export resilience
pub use resilience::{with_retry, RetryConfig, RetryExecutor, DEFAULT_RETRY_CONFIG};

// Re-export services
pub use services::{
    CobService, CobvService, LocService, LoteCobvService, PixService, WebhookService,
};

// Re-export webhook parsing
pub use webhook::{parse_webhook_payload, parse_webhook_value, WebhookParseResult};

// Re-export utilities
pub use utils::{
    detect_pix_key_type, generate_qr_code_data_url, generate_qr_code_svg, generate_txid,
    is_valid_cnpj, is_valid_cpf, is_valid_pix_key, is_valid_txid, PixKeyType, QrCodeOptions,
};
