//! Certificate Resolution
//!
//! Turns the configured mTLS inputs (inline PEM or file paths) into loaded
//! material. DER files are rejected early with a conversion hint, since the
//! TLS stack only accepts PEM.

use parking_lot::Mutex;
use secrecy::SecretString;
use std::fmt;
use std::io::ErrorKind;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

use crate::error::{CertificateError, PixResult};
use crate::types::CertificateOptions;

/// ASN.1 SEQUENCE with a two-byte length, the usual start of a DER certificate.
const DER_SIGNATURE: [u8; 2] = [0x30, 0x82];

/// Loaded certificate material.
#[derive(Clone, PartialEq, Eq)]
pub enum CertificateMaterial {
    /// PEM text (inline or read from a file).
    Pem(String),
    /// File bytes that are neither PEM nor DER. Passed through to the TLS stack.
    Raw(Vec<u8>),
}

impl CertificateMaterial {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Pem(text) => text.as_bytes(),
            Self::Raw(bytes) => bytes,
        }
    }

    pub fn is_pem(&self) -> bool {
        matches!(self, Self::Pem(_))
    }
}

impl fmt::Debug for CertificateMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pem(text) => write!(f, "Pem({} bytes)", text.len()),
            Self::Raw(bytes) => write!(f, "Raw({} bytes)", bytes.len()),
        }
    }
}

/// Resolved mTLS material ready for the transport.
#[derive(Clone)]
pub struct CertificateBundle {
    pub cert: CertificateMaterial,
    pub key: CertificateMaterial,
    pub ca: Option<CertificateMaterial>,
    pub passphrase: Option<SecretString>,
}

impl fmt::Debug for CertificateBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CertificateBundle")
            .field("cert", &self.cert)
            .field("key", &"[REDACTED]")
            .field("ca", &self.ca)
            .field("passphrase", &self.passphrase.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Check for a PEM armor header such as `-----BEGIN CERTIFICATE-----`.
pub fn is_pem_content(content: &str) -> bool {
    const OPEN: &str = "-----BEGIN ";

    let mut rest = content;
    while let Some(idx) = rest.find(OPEN) {
        let after = &rest[idx + OPEN.len()..];
        let label_len = after
            .find(|c: char| !(c.is_ascii_uppercase() || c.is_whitespace()))
            .unwrap_or(after.len());
        if label_len > 0 && after[label_len..].starts_with("-----") {
            return true;
        }
        rest = after;
    }
    false
}

/// Check for the DER signature bytes.
pub fn is_der_content(bytes: &[u8]) -> bool {
    bytes.len() > 2 && bytes[..2] == DER_SIGNATURE
}

/// Load one input: inline PEM passes through, otherwise it is read as a path.
pub fn load_certificate_content(input: &str, label: &str) -> PixResult<CertificateMaterial> {
    if is_pem_content(input) {
        return Ok(CertificateMaterial::Pem(input.to_string()));
    }

    let path = Path::new(input);
    let raw = std::fs::read(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => CertificateError::NotFound {
            path: input.to_string(),
        },
        _ => CertificateError::Unreadable {
            path: input.to_string(),
            message: e.to_string(),
        },
    })?;

    if let Ok(text) = std::str::from_utf8(&raw) {
        if is_pem_content(text) {
            debug!(label, path = input, "loaded PEM material from file");
            return Ok(CertificateMaterial::Pem(text.to_string()));
        }
    }

    if is_der_content(&raw) {
        return Err(CertificateError::InvalidFormat {
            detail: format!("{} at \"{}\" appears to be in DER format", label, input),
        }
        .into());
    }

    debug!(label, path = input, "loaded non-PEM material from file");
    Ok(CertificateMaterial::Raw(raw))
}

/// Resolves certificate options once and memoizes the result.
pub struct CertificateResolver {
    options: CertificateOptions,
    resolved: Mutex<Option<Arc<CertificateBundle>>>,
}

impl CertificateResolver {
    /// Create new resolver.
    pub fn new(options: CertificateOptions) -> Self {
        Self {
            options,
            resolved: Mutex::new(None),
        }
    }

    /// Resolve the bundle. Later calls return the same bundle until `clear`.
    ///
    /// A failed resolution is not memoized.
    pub fn resolve(&self) -> PixResult<Arc<CertificateBundle>> {
        let mut resolved = self.resolved.lock();
        if let Some(bundle) = resolved.as_ref() {
            return Ok(Arc::clone(bundle));
        }

        let cert = load_certificate_content(&self.options.cert, "Certificate")?;
        let key = load_certificate_content(&self.options.key, "Private key")?;
        let ca = self
            .options
            .ca
            .as_deref()
            .map(|ca| load_certificate_content(ca, "CA certificate"))
            .transpose()?;

        let bundle = Arc::new(CertificateBundle {
            cert,
            key,
            ca,
            passphrase: self.options.passphrase.clone(),
        });
        *resolved = Some(Arc::clone(&bundle));
        Ok(bundle)
    }

    /// Drop the memoized bundle so the next `resolve` reloads from disk.
    pub fn clear(&self) {
        *self.resolved.lock() = None;
    }
}

impl fmt::Debug for CertificateResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CertificateResolver")
            .field("options", &self.options)
            .field("resolved", &self.resolved.lock().is_some())
            .finish()
    }
}
