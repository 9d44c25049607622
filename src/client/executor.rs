//! Request executor with auth, retry, and error mapping.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use crate::client::query::QueryParams;
use crate::core::{HttpMethod, HttpRequest, HttpResponse, HttpTransport};
use crate::error::{ApiError, AuthError, PixError, PixResult, ValidationError};
use crate::resilience::{RetryConfig, RetryExecutor};
use crate::token::TokenManager;

/// Decoded body of a successful response.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    /// 204 or an empty body.
    Empty,
    /// Body parsed as JSON.
    Json(Value),
    /// Body that is not JSON, returned verbatim.
    Text(String),
}

impl ResponseBody {
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    pub fn into_json(self) -> Option<Value> {
        match self {
            Self::Json(value) => Some(value),
            _ => None,
        }
    }

    /// Deserialize into `T`. An empty body deserializes as JSON `null`.
    pub fn into_typed<T: DeserializeOwned>(self) -> PixResult<T> {
        match self {
            Self::Json(value) => serde_json::from_value(value).map_err(|e| {
                PixError::serialization(format!("Failed to deserialize response: {}", e))
            }),
            Self::Empty => serde_json::from_value(Value::Null).map_err(|_| {
                PixError::serialization("Expected a JSON body but the response was empty")
            }),
            Self::Text(text) => Err(PixError::serialization(format!(
                "Expected a JSON body, got text of {} bytes",
                text.len()
            ))),
        }
    }
}

/// Serialize a request payload into a JSON value.
pub fn to_body<B: Serialize>(body: &B) -> PixResult<Value> {
    serde_json::to_value(body)
        .map_err(|e| PixError::serialization(format!("Failed to serialize request: {}", e)))
}

/// Request executor that authenticates, sends and retries API calls.
///
/// Every attempt fetches the token anew, so a token invalidated by a 401 is
/// replaced on the caller's next request.
pub struct RequestExecutor {
    base_url: Url,
    transport: Arc<dyn HttpTransport>,
    tokens: Arc<dyn TokenManager>,
    retry: RetryExecutor,
    timeout: Option<Duration>,
}

impl RequestExecutor {
    /// Creates a new request executor.
    pub fn new(
        base_url: Url,
        transport: Arc<dyn HttpTransport>,
        tokens: Arc<dyn TokenManager>,
        retry: RetryConfig,
    ) -> Self {
        Self {
            base_url,
            transport,
            tokens,
            retry: RetryExecutor::new(retry),
            timeout: None,
        }
    }

    /// Per-request timeout passed down to the transport.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn retry_config(&self) -> &RetryConfig {
        self.retry.config()
    }

    /// Resolve `path` against the base URL and append the query.
    pub fn build_url(&self, path: &str, query: Option<&QueryParams>) -> PixResult<Url> {
        let mut url = self.base_url.join(path).map_err(|e| {
            PixError::from(ValidationError::new("path", format!("Invalid URL: {}", e)))
        })?;

        if let Some(query) = query.filter(|q| !q.is_empty()) {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query.iter() {
                pairs.append_pair(key, value);
            }
        }

        Ok(url)
    }

    /// Execute a request under the retry policy.
    pub async fn execute(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&Value>,
        query: Option<&QueryParams>,
    ) -> PixResult<ResponseBody> {
        let payload = body.map(Value::to_string);
        let payload = payload.as_deref();

        self.retry
            .execute(|| self.attempt(method, path, payload, query))
            .await
    }

    /// Execute and deserialize the JSON response.
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<Value>,
        query: Option<&QueryParams>,
    ) -> PixResult<T> {
        self.execute(method, path, body.as_ref(), query)
            .await?
            .into_typed()
    }

    /// Execute and discard the response body.
    pub async fn request_empty(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<Value>,
        query: Option<&QueryParams>,
    ) -> PixResult<()> {
        self.execute(method, path, body.as_ref(), query)
            .await
            .map(|_| ())
    }

    async fn attempt(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&str>,
        query: Option<&QueryParams>,
    ) -> PixResult<ResponseBody> {
        let token = self.tokens.get_access_token().await?;
        let url = self.build_url(path, query)?;

        let mut request = HttpRequest::new(method, url.as_str())
            .header("Authorization", format!("Bearer {}", token))
            .header("Content-Type", "application/json")
            .header("Accept", "application/json");
        if let Some(body) = body {
            request = request.body(body);
        }
        request.timeout = self.timeout;

        debug!(method = method.as_str(), path, "executing request");
        let response = self.transport.send(request).await?;
        self.handle_response(method, path, response)
    }

    fn handle_response(
        &self,
        method: HttpMethod,
        path: &str,
        response: HttpResponse,
    ) -> PixResult<ResponseBody> {
        match response.status {
            401 => {
                warn!(path, "access token rejected, invalidating cache");
                self.tokens.invalidate_token();
                Err(AuthError::TokenExpired.into())
            }
            403 => {
                self.tokens.invalidate_token();
                let required = required_scope(method, path);
                warn!(path, required = %required, "insufficient scope");
                Err(AuthError::InsufficientScope { required }.into())
            }
            status if status >= 400 => {
                let error = ApiError::from_response(status, &response.body);
                debug!(status, title = %error.title, "API error response");
                Err(error.into())
            }
            204 => Ok(ResponseBody::Empty),
            _ if response.body.is_empty() => Ok(ResponseBody::Empty),
            _ => Ok(match serde_json::from_str(&response.body) {
                Ok(value) => ResponseBody::Json(value),
                Err(_) => ResponseBody::Text(response.body),
            }),
        }
    }
}

/// Join `prefix` and percent-encoded path segments.
///
/// Ids such as PIX keys may contain `#`, `?` or `/`, which would otherwise
/// change the resolved URL.
pub fn resource_path(prefix: &str, segments: &[&str]) -> String {
    let mut path = prefix.trim_end_matches('/').to_string();
    for segment in segments {
        path.push('/');
        path.push_str(&urlencoding::encode(segment));
    }
    path
}

/// Scope an operation needs: `{resource}.read` for GET, `{resource}.write` otherwise.
pub fn required_scope(method: HttpMethod, path: &str) -> String {
    let is_version = |s: &str| {
        s.len() > 1 && s.starts_with('v') && s[1..].bytes().all(|b| b.is_ascii_digit())
    };

    let resource = path
        .split(['/', '?'])
        .filter(|s| !s.is_empty())
        .find(|s| *s != "api" && !is_version(s))
        .unwrap_or("pix");

    let access = if method == HttpMethod::Get {
        "read"
    } else {
        "write"
    };
    format!("{}.{}", resource, access)
}
