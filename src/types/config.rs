//! Configuration Types
//!
//! Client configuration for the Sicredi PIX API.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use url::Url;

use crate::builders::PixConfigBuilder;
use crate::error::{ConfigurationError, PixResult};
use crate::utils::constants::{PRODUCTION_BASE_URL, SANDBOX_BASE_URL};

/// Target API environment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Production,
    Sandbox,
}

impl Environment {
    pub fn base_url(&self) -> &'static str {
        match self {
            Self::Production => PRODUCTION_BASE_URL,
            Self::Sandbox => SANDBOX_BASE_URL,
        }
    }
}

impl FromStr for Environment {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "production" => Ok(Self::Production),
            "sandbox" => Ok(Self::Sandbox),
            other => Err(ConfigurationError::InvalidValue {
                field: "environment".to_string(),
                message: format!("expected 'production' or 'sandbox', got '{}'", other),
            }),
        }
    }
}

/// mTLS material. Each entry is either inline PEM text or a file path.
#[derive(Clone)]
pub struct CertificateOptions {
    /// Client certificate.
    pub cert: String,
    /// Private key.
    pub key: String,
    /// CA chain (Sicredi root CA).
    pub ca: Option<String>,
    /// Passphrase of an encrypted private key.
    pub passphrase: Option<SecretString>,
}

impl CertificateOptions {
    pub fn new(cert: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            cert: cert.into(),
            key: key.into(),
            ca: None,
            passphrase: None,
        }
    }

    pub fn with_ca(mut self, ca: impl Into<String>) -> Self {
        self.ca = Some(ca.into());
        self
    }

    pub fn with_passphrase(mut self, passphrase: impl Into<String>) -> Self {
        self.passphrase = Some(SecretString::new(passphrase.into()));
        self
    }
}

impl fmt::Debug for CertificateOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CertificateOptions")
            .field("cert", &describe_source(&self.cert))
            .field("key", &describe_source(&self.key))
            .field("ca", &self.ca.as_deref().map(describe_source))
            .field("passphrase", &self.passphrase.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

fn describe_source(source: &str) -> String {
    if source.contains("-----BEGIN") {
        "[inline PEM]".to_string()
    } else {
        source.to_string()
    }
}

/// Sicredi PIX client configuration.
#[derive(Clone)]
pub struct PixConfig {
    /// OAuth2 client id.
    pub client_id: String,
    /// OAuth2 client secret.
    pub client_secret: SecretString,
    /// Default PIX key of the account.
    pub pix_key: Option<String>,
    /// mTLS material.
    pub certificate: CertificateOptions,
    /// Target environment.
    pub environment: Environment,
    /// Explicit base URL, overriding the environment.
    pub base_url: Option<String>,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Retries after the first attempt.
    pub max_retries: u32,
    /// Log request/response lines at debug level.
    pub debug: bool,
}

impl PixConfig {
    /// Create a new configuration builder.
    pub fn builder() -> PixConfigBuilder {
        PixConfigBuilder::new()
    }

    /// Load configuration from `SICREDI_*` environment variables.
    ///
    /// Required: `SICREDI_CLIENT_ID`, `SICREDI_CLIENT_SECRET`, `SICREDI_CERT`,
    /// `SICREDI_KEY`. Optional: `SICREDI_CA`, `SICREDI_CERT_PASSPHRASE`,
    /// `SICREDI_PIX_KEY`, `SICREDI_ENVIRONMENT`, `SICREDI_BASE_URL`,
    /// `SICREDI_TIMEOUT_MS`, `SICREDI_MAX_RETRIES`, `SICREDI_DEBUG`.
    pub fn from_env() -> PixResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> PixResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = PixConfigBuilder::new();

        if let Some(client_id) = lookup("SICREDI_CLIENT_ID") {
            builder = builder.client_id(client_id);
        }
        if let Some(secret) = lookup("SICREDI_CLIENT_SECRET") {
            builder = builder.client_secret(secret);
        }
        if let Some(cert) = lookup("SICREDI_CERT") {
            builder = builder.cert(cert);
        }
        if let Some(key) = lookup("SICREDI_KEY") {
            builder = builder.key(key);
        }
        if let Some(ca) = lookup("SICREDI_CA") {
            builder = builder.ca(ca);
        }
        if let Some(passphrase) = lookup("SICREDI_CERT_PASSPHRASE") {
            builder = builder.passphrase(passphrase);
        }
        if let Some(pix_key) = lookup("SICREDI_PIX_KEY") {
            builder = builder.pix_key(pix_key);
        }
        if let Some(environment) = lookup("SICREDI_ENVIRONMENT") {
            builder = builder.environment(environment.parse()?);
        }
        if let Some(base_url) = lookup("SICREDI_BASE_URL") {
            builder = builder.base_url(base_url);
        }
        if let Some(timeout) = lookup("SICREDI_TIMEOUT_MS") {
            let millis = parse_number::<u64>("SICREDI_TIMEOUT_MS", &timeout)?;
            builder = builder.timeout(Duration::from_millis(millis));
        }
        if let Some(retries) = lookup("SICREDI_MAX_RETRIES") {
            builder = builder.max_retries(parse_number("SICREDI_MAX_RETRIES", &retries)?);
        }
        if let Some(debug) = lookup("SICREDI_DEBUG") {
            builder = builder.debug(matches!(
                debug.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            ));
        }

        builder.build()
    }

    /// Effective base URL: the explicit override, else the environment's.
    pub fn base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or_else(|| self.environment.base_url())
    }

    /// Effective base URL, parsed.
    pub fn parsed_base_url(&self) -> PixResult<Url> {
        parse_base_url(self.base_url())
    }
}

impl fmt::Debug for PixConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PixConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("pix_key", &self.pix_key)
            .field("certificate", &self.certificate)
            .field("environment", &self.environment)
            .field("base_url", &self.base_url())
            .field("timeout", &self.timeout)
            .field("max_retries", &self.max_retries)
            .field("debug", &self.debug)
            .finish()
    }
}

fn parse_number<T: FromStr>(field: &str, raw: &str) -> PixResult<T> {
    raw.trim().parse::<T>().map_err(|_| {
        ConfigurationError::InvalidValue {
            field: field.to_string(),
            message: format!("'{}' is not a valid number", raw),
        }
        .into()
    })
}

pub(crate) fn parse_base_url(raw: &str) -> PixResult<Url> {
    let url = Url::parse(raw).map_err(|e| ConfigurationError::InvalidValue {
        field: "base_url".to_string(),
        message: e.to_string(),
    })?;
    match url.scheme() {
        "https" | "http" => Ok(url),
        other => Err(ConfigurationError::InvalidValue {
            field: "base_url".to_string(),
            message: format!("unsupported scheme '{}'", other),
        }
        .into()),
    }
}
