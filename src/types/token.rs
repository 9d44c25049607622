//! Token Types
//!
//! Client-credentials token response and its cached form.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::fmt;
use std::time::Duration;

/// Token response from the Sicredi identity endpoint.
#[derive(Clone, Deserialize)]
pub struct TokenResponse {
    /// Access token (JWT).
    pub access_token: String,
    /// Token type (always "Bearer").
    #[serde(default = "default_token_type")]
    pub token_type: String,
    /// Validity in seconds.
    pub expires_in: u64,
    /// Granted scopes, space separated.
    #[serde(default)]
    pub scope: String,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

impl fmt::Debug for TokenResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenResponse")
            .field("access_token", &"[REDACTED]")
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .field("scope", &self.scope)
            .finish()
    }
}

/// Access token held by the token manager.
#[derive(Clone, Debug)]
pub struct CachedToken {
    /// Access token.
    pub access_token: SecretString,
    /// Absolute expiry, in milliseconds since the Unix epoch.
    pub expires_at: u64,
    /// Granted scopes.
    pub scope: String,
}

impl CachedToken {
    /// Build from a token response received at `now_ms`.
    pub fn from_response(response: TokenResponse, now_ms: u64) -> Self {
        Self {
            access_token: SecretString::new(response.access_token),
            expires_at: now_ms.saturating_add(response.expires_in.saturating_mul(1000)),
            scope: response.scope,
        }
    }

    /// A token is stale once `now >= expires_at - buffer`.
    pub fn is_stale(&self, now_ms: u64, buffer: Duration) -> bool {
        now_ms >= self.expires_at.saturating_sub(buffer.as_millis() as u64)
    }

    pub fn secret(&self) -> &str {
        self.access_token.expose_secret()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(expires_in: u64) -> TokenResponse {
        TokenResponse {
            access_token: "jwt".to_string(),
            token_type: "Bearer".to_string(),
            expires_in,
            scope: "cob.read".to_string(),
        }
    }

    #[test]
    fn test_staleness_uses_buffer() {
        let buffer = Duration::from_secs(300);
        let token = CachedToken::from_response(response(3600), 1_000_000);
        assert_eq!(token.expires_at, 1_000_000 + 3_600_000);

        assert!(!token.is_stale(1_000_000, buffer));
        assert!(!token.is_stale(token.expires_at - 300_001, buffer));
        assert!(token.is_stale(token.expires_at - 300_000, buffer));
    }

    #[test]
    fn test_short_lived_token_is_immediately_stale() {
        let token = CachedToken::from_response(response(1), 5_000);
        assert!(token.is_stale(5_000, Duration::from_secs(300)));
    }

    #[test]
    fn test_debug_redacts_token() {
        let rendered = format!("{:?}", response(60));
        assert!(!rendered.contains("jwt"));
        let cached = format!("{:?}", CachedToken::from_response(response(60), 0));
        assert!(!cached.contains("\"jwt\""));
    }
}
