//! Token Manager
//!
//! Client-credentials access token lifecycle: fetch, cache, proactive refresh
//! and invalidation. Concurrent callers that find the cache stale share one
//! in-flight fetch.

use async_trait::async_trait;
use base64::Engine;
use futures::future::{BoxFuture, FutureExt, Shared};
use parking_lot::Mutex;
use secrecy::{ExposeSecret, SecretString};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::{debug, info, warn};

use crate::core::{HttpMethod, HttpRequest, HttpTransport};
use crate::error::{ApiError, AuthError, PixResult};
use crate::types::{CachedToken, TokenResponse};
use crate::utils::constants::{OAUTH_SCOPES, TOKEN_ENDPOINT, TOKEN_REFRESH_BUFFER};

/// Token manager interface.
#[async_trait]
pub trait TokenManager: Send + Sync {
    /// Get a valid access token, fetching one if the cache is stale.
    async fn get_access_token(&self) -> PixResult<String>;

    /// Drop the cached token so the next call fetches a new one.
    fn invalidate_token(&self);
}

/// Token manager configuration.
#[derive(Debug, Clone)]
pub struct TokenManagerConfig {
    /// Tokens are refreshed this long before expiry (default: 5 minutes).
    pub refresh_buffer: Duration,
    /// Space separated scopes to request.
    pub scopes: String,
    /// Timeout for the token request.
    pub timeout: Option<Duration>,
}

impl Default for TokenManagerConfig {
    fn default() -> Self {
        Self {
            refresh_buffer: TOKEN_REFRESH_BUFFER,
            scopes: OAUTH_SCOPES.to_string(),
            timeout: None,
        }
    }
}

type PendingToken = Shared<BoxFuture<'static, PixResult<String>>>;

#[derive(Default)]
struct TokenState {
    cached: Option<CachedToken>,
    in_flight: Option<PendingToken>,
}

struct Inner {
    client_id: String,
    client_secret: SecretString,
    token_url: String,
    config: TokenManagerConfig,
    transport: Arc<dyn HttpTransport>,
    state: Mutex<TokenState>,
}

/// Default token manager implementation.
pub struct DefaultTokenManager {
    inner: Arc<Inner>,
}

impl DefaultTokenManager {
    /// Create new token manager.
    pub fn new(
        client_id: impl Into<String>,
        client_secret: SecretString,
        base_url: &str,
        transport: Arc<dyn HttpTransport>,
        config: TokenManagerConfig,
    ) -> Self {
        let token_url = format!(
            "{}{}?grant_type=client_credentials&scope={}",
            base_url.trim_end_matches('/'),
            TOKEN_ENDPOINT,
            urlencoding::encode(&config.scopes)
        );

        Self {
            inner: Arc::new(Inner {
                client_id: client_id.into(),
                client_secret,
                token_url,
                config,
                transport,
                state: Mutex::new(TokenState::default()),
            }),
        }
    }

    /// Full token endpoint URL, including the grant and scope query.
    pub fn token_url(&self) -> &str {
        &self.inner.token_url
    }

    /// Snapshot of the cached token, if any.
    pub fn cached_token(&self) -> Option<CachedToken> {
        self.inner.state.lock().cached.clone()
    }

    /// Check if a non-stale token is cached.
    pub fn has_valid_token(&self) -> bool {
        self.inner
            .state
            .lock()
            .cached
            .as_ref()
            .map(|t| !t.is_stale(now_ms(), self.inner.config.refresh_buffer))
            .unwrap_or(false)
    }
}

#[async_trait]
impl TokenManager for DefaultTokenManager {
    async fn get_access_token(&self) -> PixResult<String> {
        let pending = {
            let mut state = self.inner.state.lock();

            if let Some(token) = state.cached.as_ref() {
                if !token.is_stale(now_ms(), self.inner.config.refresh_buffer) {
                    return Ok(token.secret().to_string());
                }
            }

            match state.in_flight.as_ref() {
                Some(pending) => {
                    debug!("joining in-flight token request");
                    pending.clone()
                }
                None => {
                    let pending = Inner::refresh(&self.inner).boxed().shared();
                    state.in_flight = Some(pending.clone());
                    pending
                }
            }
        };

        pending.await
    }

    fn invalidate_token(&self) {
        debug!("invalidating cached access token");
        self.inner.state.lock().cached = None;
    }
}

impl Inner {
    /// Fetch a token, store it, and clear the in-flight marker either way.
    ///
    /// The returned future lives in `in_flight`, so it only holds a weak
    /// reference back to the state.
    fn refresh(this: &Arc<Self>) -> impl std::future::Future<Output = PixResult<String>> {
        let request = this.token_request();
        let transport = Arc::clone(&this.transport);
        let state = Arc::downgrade(this);

        async move {
            let result = fetch_token(transport.as_ref(), request).await;
            match state.upgrade() {
                Some(inner) => inner.store(result),
                None => result.map(|token| token.secret().to_string()),
            }
        }
    }

    fn store(&self, result: PixResult<CachedToken>) -> PixResult<String> {
        let mut state = self.state.lock();
        state.in_flight = None;
        let token = result?;
        let access_token = token.secret().to_string();
        state.cached = Some(token);
        Ok(access_token)
    }

    fn token_request(&self) -> HttpRequest {
        let credentials = base64::engine::general_purpose::STANDARD.encode(format!(
            "{}:{}",
            self.client_id,
            self.client_secret.expose_secret()
        ));

        let mut request = HttpRequest::new(HttpMethod::Post, self.token_url.clone())
            .header("Authorization", format!("Basic {}", credentials))
            .header("Content-Type", "application/x-www-form-urlencoded")
            .header("Accept", "application/json");
        request.timeout = self.config.timeout;
        request
    }
}

async fn fetch_token(transport: &dyn HttpTransport, request: HttpRequest) -> PixResult<CachedToken> {
    debug!("requesting access token");
    let response = transport.send(request).await?;

    if response.status != 200 {
        warn!(status = response.status, "token request rejected");
        if matches!(response.status, 401 | 403) {
            return Err(AuthError::InvalidCredentials.into());
        }
        return Err(ApiError::from_response(response.status, &response.body).into());
    }

    let parsed: TokenResponse = serde_json::from_str(&response.body).map_err(|e| {
        AuthError::InvalidTokenResponse {
            message: e.to_string(),
        }
    })?;

    info!(expires_in = parsed.expires_in, scope = %parsed.scope, "access token acquired");
    Ok(CachedToken::from_response(parsed, now_ms()))
}

pub(crate) fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

/// Mock token manager for testing.
///
/// Serves queued results in order, then a fixed token.
pub struct MockTokenManager {
    results: Mutex<VecDeque<PixResult<String>>>,
    default_token: String,
    calls: AtomicUsize,
    invalidations: AtomicUsize,
}

impl MockTokenManager {
    pub fn new(default_token: impl Into<String>) -> Self {
        Self {
            results: Mutex::new(VecDeque::new()),
            default_token: default_token.into(),
            calls: AtomicUsize::new(0),
            invalidations: AtomicUsize::new(0),
        }
    }

    pub fn queue_result(&self, result: PixResult<String>) -> &Self {
        self.results.lock().push_back(result);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn invalidation_count(&self) -> usize {
        self.invalidations.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TokenManager for MockTokenManager {
    async fn get_access_token(&self) -> PixResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let queued = self.results.lock().pop_front();
        queued.unwrap_or_else(|| Ok(self.default_token.clone()))
    }

    fn invalidate_token(&self) {
        self.invalidations.fetch_add(1, Ordering::SeqCst);
    }
}
