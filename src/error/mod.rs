//! PIX Error Types
//!
//! Error hierarchy for the Sicredi PIX client. Every error carries a stable
//! code and an operator-facing remediation hint, and knows whether the retry
//! layer may re-attempt the call that produced it.

use std::fmt;
use std::time::Duration;
use thiserror::Error;

use crate::resilience::is_retryable_status;
use crate::types::{ProblemDetail, Violation};

/// Root error type for the PIX client.
///
/// All variants are `Clone` so that a single failed token refresh can be
/// handed to every caller that was waiting on it.
#[derive(Error, Debug, Clone)]
pub enum PixError {
    #[error("Certificate error: {0}")]
    Certificate(#[from] CertificateError),

    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    #[error("Connection error: {0}")]
    Connection(#[from] ConnectionError),

    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl PixError {
    /// Stable error code for telemetry and programmatic matching.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Certificate(_) => "CERTIFICATE_ERROR",
            Self::Auth(_) => "AUTH_ERROR",
            Self::Connection(_) => "CONNECTION_ERROR",
            Self::Api(_) => "API_ERROR",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Serialization { .. } => "SERIALIZATION_ERROR",
        }
    }

    /// Check if the error may be retried.
    ///
    /// Connection faults are always retryable. API errors are retryable only
    /// for 408, 429, 500, 502, 503 and 504.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Connection(_) => true,
            Self::Api(e) => is_retryable_status(e.status),
            _ => false,
        }
    }

    /// Check if the error means the cached token is no longer usable.
    pub fn needs_reauth(&self) -> bool {
        matches!(
            self,
            Self::Auth(AuthError::TokenExpired) | Self::Auth(AuthError::InsufficientScope { .. })
        )
    }

    /// HTTP status code reported by the API, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api(e) => Some(e.status),
            Self::Auth(AuthError::TokenExpired) => Some(401),
            Self::Auth(AuthError::InsufficientScope { .. }) => Some(403),
            _ => None,
        }
    }

    /// Remediation hint for operators, distinct from the error message.
    pub fn hint(&self) -> String {
        match self {
            Self::Certificate(e) => e.hint().to_string(),
            Self::Auth(e) => e.hint(),
            Self::Connection(e) => e.hint().to_string(),
            Self::Api(e) => e.hint().to_string(),
            Self::Validation(e) => e.hint(),
            Self::Configuration(e) => e.hint().to_string(),
            Self::Serialization { .. } => {
                "The payload did not match the expected shape. Check the request data or report the response body.".to_string()
            }
        }
    }

    pub(crate) fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }
}

/// mTLS certificate material error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CertificateError {
    #[error("Certificate file not found: {path}")]
    NotFound { path: String },

    #[error("Certificate file could not be read: {path} ({message})")]
    Unreadable { path: String, message: String },

    #[error("Invalid certificate format: {detail}")]
    InvalidFormat { detail: String },

    #[error("Private key does not match the certificate")]
    KeyMismatch,

    #[error("Certificate has expired")]
    Expired,
}

impl CertificateError {
    pub fn hint(&self) -> &'static str {
        match self {
            Self::NotFound { .. } | Self::Unreadable { .. } => {
                "Verify that the file exists at the specified path and that the process has read permissions."
            }
            Self::InvalidFormat { .. } => {
                "Certificate appears to be in DER format. Convert to PEM using: openssl x509 -inform der -in cert.cer -out cert.pem"
            }
            Self::KeyMismatch => {
                "Ensure the private key corresponds to the public key in the certificate. Compare: openssl x509 -noout -modulus -in cert.pem | openssl md5 and openssl rsa -noout -modulus -in key.pem | openssl md5"
            }
            Self::Expired => "Request a new certificate from Sicredi and update your configuration.",
        }
    }
}

/// OAuth2 authentication error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Access token has expired")]
    TokenExpired,

    #[error("Insufficient scope for this operation")]
    InsufficientScope { required: String },

    #[error("Invalid token response from server: {message}")]
    InvalidTokenResponse { message: String },
}

impl AuthError {
    pub fn hint(&self) -> String {
        match self {
            Self::InvalidCredentials => {
                "Check that your client_id and client_secret are correct and have not been revoked.".to_string()
            }
            Self::TokenExpired => {
                "The token will be automatically refreshed on the next request. If this persists, re-authenticate.".to_string()
            }
            Self::InsufficientScope { required } => format!(
                "This operation requires the following scope: {}. Ensure your credentials are provisioned with the necessary permissions.",
                required
            ),
            Self::InvalidTokenResponse { .. } => {
                "The identity endpoint answered with an unexpected body. Check the configured base URL.".to_string()
            }
        }
    }
}

/// Network/transport error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConnectionError {
    #[error("Request timed out after {}ms", .timeout.as_millis())]
    Timeout { timeout: Duration },

    #[error("Connection refused to host: {host}")]
    Refused { host: String },

    #[error("TLS/mTLS handshake failed: {message}")]
    TlsFailure { message: String },

    #[error("Network error: {message}")]
    Network { message: String },
}

impl ConnectionError {
    pub fn hint(&self) -> &'static str {
        match self {
            Self::Timeout { .. } => {
                "The API did not answer in time. Check connectivity or raise the configured timeout."
            }
            Self::Refused { .. } => {
                "The host refused the connection. Check the base URL, environment and any firewall in between."
            }
            Self::TlsFailure { .. } => {
                "Verify that your mTLS certificates are valid, not expired, and correctly configured. Ensure the CA chain is complete."
            }
            Self::Network { .. } => "A network fault interrupted the request. It is safe to retry.",
        }
    }
}

/// Error reported by the PIX API as a problem-detail document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// HTTP status code.
    pub status: u16,
    /// Problem title.
    pub title: String,
    /// Problem detail.
    pub detail: Option<String>,
    /// Problem type URI (Bacen error taxonomy).
    pub type_uri: Option<String>,
    /// Occurrence URI.
    pub instance: Option<String>,
    /// Field-level violations.
    pub violations: Vec<Violation>,
}

impl ApiError {
    /// Build an API error from a raw HTTP error body.
    ///
    /// A JSON object with a string `title` is taken as a problem document.
    /// Any other JSON value becomes an "Unknown API Error" carrying the
    /// serialized body; a body that is not JSON becomes "Unknown error"
    /// carrying the raw text.
    pub fn from_response(status: u16, body: &str) -> Self {
        let value = match serde_json::from_str::<serde_json::Value>(body) {
            Ok(value) => value,
            Err(_) => {
                return Self::from_problem(
                    status,
                    ProblemDetail {
                        title: "Unknown error".to_string(),
                        status,
                        detail: Some(body.to_string()),
                        ..Default::default()
                    },
                )
            }
        };

        match ProblemDetail::from_value(&value) {
            Some(problem) => Self::from_problem(status, problem),
            None => {
                let detail = match &value {
                    serde_json::Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                Self::from_problem(
                    status,
                    ProblemDetail {
                        title: "Unknown API Error".to_string(),
                        status,
                        detail: Some(detail),
                        ..Default::default()
                    },
                )
            }
        }
    }

    /// Build an API error from a parsed problem document.
    pub fn from_problem(status: u16, problem: ProblemDetail) -> Self {
        Self {
            status,
            title: problem.title,
            detail: problem.detail,
            type_uri: problem.type_uri,
            instance: problem.instance,
            violations: problem.violacoes,
        }
    }

    /// Human-readable message: `"{title}: {detail}"` or just the title.
    pub fn message(&self) -> String {
        match &self.detail {
            Some(detail) => format!("{}: {}", self.title, detail),
            None => self.title.clone(),
        }
    }

    pub fn hint(&self) -> &'static str {
        match self.status {
            400 => "The request was rejected. Inspect the violations for the offending fields.",
            404 => "The resource does not exist. Check the txid, e2eid or id used.",
            409 => "The resource is in a state that does not allow this operation.",
            429 => "Too many requests. Wait before trying again.",
            s if s >= 500 => "The PIX API failed to process the request. Retry later.",
            _ => "The PIX API rejected the request. See the problem detail for the cause.",
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

/// Local precondition failure, raised before any network call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Validation failed for field '{field}': {constraint}")]
pub struct ValidationError {
    pub field: String,
    pub constraint: String,
    pub hint: Option<String>,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, constraint: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            constraint: constraint.into(),
            hint: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn hint(&self) -> String {
        self.hint
            .clone()
            .unwrap_or_else(|| format!("Fix the value of '{}' and try again.", self.field))
    }
}

/// Client configuration error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl ConfigurationError {
    pub fn hint(&self) -> &'static str {
        match self {
            Self::MissingField { .. } => {
                "Provide the field through the config builder or the SICREDI_* environment variables."
            }
            Self::InvalidValue { .. } => "Correct the configuration value and rebuild the client.",
        }
    }
}

/// Result type for PIX operations.
pub type PixResult<T> = Result<T, PixError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_is_retryable() {
        assert!(PixError::Connection(ConnectionError::Timeout {
            timeout: Duration::from_secs(30)
        })
        .is_retryable());
        assert!(PixError::Connection(ConnectionError::Refused {
            host: "api".to_string()
        })
        .is_retryable());
        assert!(PixError::Api(ApiError::from_response(503, "")).is_retryable());
        assert!(!PixError::Api(ApiError::from_response(400, "")).is_retryable());
        assert!(!PixError::Auth(AuthError::TokenExpired).is_retryable());
        assert!(!PixError::Validation(ValidationError::new("txid", "bad")).is_retryable());
    }

    #[test]
    fn test_api_error_from_problem_body() {
        let body = r#"{
            "type": "https://pix.bcb.gov.br/api/v2/error/CobOperacaoInvalida",
            "title": "Cobranca invalida",
            "status": 400,
            "detail": "A requisicao possui campos invalidos",
            "violacoes": [{"razao": "valor deve ser positivo", "propriedade": "cob.valor.original"}]
        }"#;

        let error = ApiError::from_response(400, body);
        assert_eq!(error.status, 400);
        assert_eq!(error.title, "Cobranca invalida");
        assert_eq!(
            error.type_uri.as_deref(),
            Some("https://pix.bcb.gov.br/api/v2/error/CobOperacaoInvalida")
        );
        assert_eq!(error.violations.len(), 1);
        assert_eq!(error.violations[0].propriedade, "cob.valor.original");
        assert_eq!(
            error.to_string(),
            "Cobranca invalida: A requisicao possui campos invalidos"
        );
    }

    #[test]
    fn test_api_error_fallbacks() {
        let not_json = ApiError::from_response(502, "<html>Bad Gateway</html>");
        assert_eq!(not_json.title, "Unknown error");
        assert_eq!(not_json.detail.as_deref(), Some("<html>Bad Gateway</html>"));

        let no_title = ApiError::from_response(500, r#"{"error":"boom"}"#);
        assert_eq!(no_title.title, "Unknown API Error");
        assert_eq!(no_title.detail.as_deref(), Some(r#"{"error":"boom"}"#));
    }

    #[test]
    fn test_error_codes_and_hints() {
        let error = PixError::Certificate(CertificateError::InvalidFormat {
            detail: "DER".to_string(),
        });
        assert_eq!(error.error_code(), "CERTIFICATE_ERROR");
        assert!(error.hint().contains("openssl x509 -inform der"));

        let scope = PixError::Auth(AuthError::InsufficientScope {
            required: "cob.write".to_string(),
        });
        assert!(scope.hint().contains("cob.write"));
        assert_ne!(scope.hint(), scope.to_string());
        assert!(scope.needs_reauth());
    }

    #[test]
    fn test_timeout_message() {
        let error = ConnectionError::Timeout {
            timeout: Duration::from_millis(1500),
        };
        assert_eq!(error.to_string(), "Request timed out after 1500ms");
    }

    #[test]
    fn test_validation_message() {
        let error = ValidationError::new("txid", "Must be 26-35 alphanumeric characters");
        assert_eq!(
            error.to_string(),
            "Validation failed for field 'txid': Must be 26-35 alphanumeric characters"
        );
    }
}
