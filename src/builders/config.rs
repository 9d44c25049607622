//! Configuration Builder
//!
//! Fluent builder for PIX client configuration.

use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;

use crate::error::{ConfigurationError, PixError, PixResult};
use crate::types::config::parse_base_url;
use crate::types::{CertificateOptions, Environment, PixConfig};
use crate::utils::constants::{DEFAULT_MAX_RETRIES, DEFAULT_TIMEOUT};

/// PIX configuration builder.
#[derive(Default)]
pub struct PixConfigBuilder {
    client_id: Option<String>,
    client_secret: Option<SecretString>,
    pix_key: Option<String>,
    cert: Option<String>,
    key: Option<String>,
    ca: Option<String>,
    passphrase: Option<SecretString>,
    environment: Environment,
    base_url: Option<String>,
    timeout: Duration,
    max_retries: u32,
    debug: bool,
}

impl PixConfigBuilder {
    /// Create new configuration builder.
    pub fn new() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            max_retries: DEFAULT_MAX_RETRIES,
            ..Default::default()
        }
    }

    /// Set client ID.
    pub fn client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    /// Set client secret.
    pub fn client_secret(mut self, client_secret: impl Into<String>) -> Self {
        self.client_secret = Some(SecretString::new(client_secret.into()));
        self
    }

    /// Set the account's default PIX key.
    pub fn pix_key(mut self, pix_key: impl Into<String>) -> Self {
        self.pix_key = Some(pix_key.into());
        self
    }

    /// Set the client certificate (PEM text or file path).
    pub fn cert(mut self, cert: impl Into<String>) -> Self {
        self.cert = Some(cert.into());
        self
    }

    /// Set the private key (PEM text or file path).
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Set the CA chain (PEM text or file path).
    pub fn ca(mut self, ca: impl Into<String>) -> Self {
        self.ca = Some(ca.into());
        self
    }

    /// Set the private key passphrase.
    pub fn passphrase(mut self, passphrase: impl Into<String>) -> Self {
        self.passphrase = Some(SecretString::new(passphrase.into()));
        self
    }

    /// Set all certificate options at once.
    pub fn certificate(mut self, options: CertificateOptions) -> Self {
        self.cert = Some(options.cert);
        self.key = Some(options.key);
        self.ca = options.ca;
        self.passphrase = options.passphrase;
        self
    }

    pub fn environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Shorthand for `environment(Environment::Sandbox)`.
    pub fn sandbox(self) -> Self {
        self.environment(Environment::Sandbox)
    }

    /// Override the base URL chosen by the environment.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the number of retries after the first attempt.
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Build the PIX configuration.
    pub fn build(self) -> PixResult<PixConfig> {
        let client_id = required("client_id", self.client_id)?;
        let client_secret = self
            .client_secret
            .filter(|s| !s.expose_secret().trim().is_empty())
            .ok_or_else(|| missing("client_secret"))?;
        let cert = required("cert", self.cert)?;
        let key = required("key", self.key)?;

        if self.timeout.is_zero() {
            return Err(ConfigurationError::InvalidValue {
                field: "timeout".to_string(),
                message: "must be greater than zero".to_string(),
            }
            .into());
        }

        let base_url = match self.base_url {
            Some(raw) => {
                parse_base_url(&raw)?;
                Some(raw.trim_end_matches('/').to_string())
            }
            None => None,
        };

        Ok(PixConfig {
            client_id,
            client_secret,
            pix_key: self.pix_key,
            certificate: CertificateOptions {
                cert,
                key,
                ca: self.ca,
                passphrase: self.passphrase,
            },
            environment: self.environment,
            base_url,
            timeout: self.timeout,
            max_retries: self.max_retries,
            debug: self.debug,
        })
    }
}

fn missing(field: &str) -> PixError {
    ConfigurationError::MissingField {
        field: field.to_string(),
    }
    .into()
}

fn required(field: &str, value: Option<String>) -> PixResult<String> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| missing(field))
}
