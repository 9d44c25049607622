//! HTTP Transport
//!
//! HTTP client interface, the mTLS reqwest implementation and a scripted mock.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::error::Error as StdError;
use std::io::ErrorKind;
use std::time::Duration;
use tracing::{debug, warn};

use crate::core::certificate::CertificateBundle;
use crate::error::{CertificateError, ConnectionError, PixError, PixResult};

/// HTTP request definition.
#[derive(Clone, Debug)]
pub struct HttpRequest {
    /// HTTP method.
    pub method: HttpMethod,
    /// Absolute request URL.
    pub url: String,
    /// Request headers.
    pub headers: HashMap<String, String>,
    /// Request body.
    pub body: Option<String>,
    /// Per-request timeout, overriding the transport default.
    pub timeout: Option<Duration>,
}

impl HttpRequest {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HashMap::new(),
            body: None,
            timeout: None,
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Case-insensitive header lookup.
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// HTTP method.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

/// HTTP response definition.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers, names lowercased.
    pub headers: HashMap<String, String>,
    /// Response body.
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: body.into(),
        }
    }

    /// JSON response with a `content-type` header.
    pub fn json<T: serde::Serialize>(status: u16, body: &T) -> PixResult<Self> {
        let body = serde_json::to_string(body).map_err(|e| PixError::serialization(e.to_string()))?;
        let mut response = Self::new(status, body);
        response
            .headers
            .insert("content-type".to_string(), "application/json".to_string());
        Ok(response)
    }
}

/// HTTP transport interface (for dependency injection).
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Send an HTTP request.
    ///
    /// Any status code is a successful send; only transport faults are errors.
    async fn send(&self, request: HttpRequest) -> PixResult<HttpResponse>;
}

/// reqwest transport presenting the client certificate on every connection.
pub struct ReqwestHttpTransport {
    client: reqwest::Client,
    default_timeout: Duration,
    debug: bool,
}

impl ReqwestHttpTransport {
    /// Create an mTLS transport from resolved certificate material.
    ///
    /// Redirects are not followed. Material the TLS stack rejects is reported
    /// as an invalid certificate format.
    pub fn new(bundle: &CertificateBundle, timeout: Duration, debug: bool) -> PixResult<Self> {
        let mut identity_pem = bundle.cert.as_bytes().to_vec();
        identity_pem.push(b'\n');
        identity_pem.extend_from_slice(bundle.key.as_bytes());

        let identity = reqwest::Identity::from_pem(&identity_pem).map_err(|e| {
            CertificateError::InvalidFormat {
                detail: format!("client certificate or key rejected: {}", e),
            }
        })?;

        if bundle.passphrase.is_some() {
            warn!("encrypted private keys are not supported by the TLS backend; supply a decrypted PEM key");
        }

        let mut builder = reqwest::Client::builder()
            .use_rustls_tls()
            .identity(identity)
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::none());

        if let Some(ca) = &bundle.ca {
            let roots = reqwest::Certificate::from_pem_bundle(ca.as_bytes()).map_err(|e| {
                CertificateError::InvalidFormat {
                    detail: format!("CA certificate rejected: {}", e),
                }
            })?;
            for root in roots {
                builder = builder.add_root_certificate(root);
            }
        }

        let client = builder.build().map_err(|e| ConnectionError::TlsFailure {
            message: e.to_string(),
        })?;

        Ok(Self::with_client(client, timeout, debug))
    }

    /// Wrap an already configured client.
    pub fn with_client(client: reqwest::Client, timeout: Duration, debug: bool) -> Self {
        Self {
            client,
            default_timeout: timeout,
            debug,
        }
    }
}

#[async_trait]
impl HttpTransport for ReqwestHttpTransport {
    async fn send(&self, request: HttpRequest) -> PixResult<HttpResponse> {
        let timeout = request.timeout.unwrap_or(self.default_timeout);
        let host = url::Url::parse(&request.url)
            .ok()
            .and_then(|u| u.host_str().map(str::to_string))
            .unwrap_or_default();

        if self.debug {
            debug!(method = request.method.as_str(), url = %request.url, "sending request");
        }

        let mut req_builder = match request.method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Post => self.client.post(&request.url),
            HttpMethod::Put => self.client.put(&request.url),
            HttpMethod::Patch => self.client.patch(&request.url),
            HttpMethod::Delete => self.client.delete(&request.url),
        };

        for (key, value) in &request.headers {
            req_builder = req_builder.header(key, value);
        }

        if let Some(body) = request.body {
            req_builder = req_builder.body(body);
        }

        let response = req_builder
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| classify_error(&e, &host, timeout))?;

        let status = response.status().as_u16();

        let mut headers = HashMap::new();
        for (key, value) in response.headers() {
            if let Ok(v) = value.to_str() {
                headers.insert(key.as_str().to_lowercase(), v.to_string());
            }
        }

        let body = response
            .text()
            .await
            .map_err(|e| classify_error(&e, &host, timeout))?;

        if self.debug {
            debug!(status, bytes = body.len(), "received response");
        }

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

/// Map a reqwest failure onto the connection error taxonomy.
fn classify_error(error: &reqwest::Error, host: &str, timeout: Duration) -> PixError {
    if error.is_timeout() {
        return ConnectionError::Timeout { timeout }.into();
    }

    let chain: Vec<&(dyn StdError + 'static)> =
        std::iter::successors(Some(error as &(dyn StdError + 'static)), |e| (*e).source()).collect();

    let refused = chain.iter().any(|e| {
        e.downcast_ref::<std::io::Error>()
            .map(|io| io.kind() == ErrorKind::ConnectionRefused)
            .unwrap_or(false)
    });

    let message = chain
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(": ");
    let lower = message.to_lowercase();

    if refused || lower.contains("connection refused") {
        return ConnectionError::Refused {
            host: host.to_string(),
        }
        .into();
    }

    if ["tls", "ssl", "certificate", "handshake", "corrupt message"]
        .iter()
        .any(|needle| lower.contains(needle))
    {
        return ConnectionError::TlsFailure { message }.into();
    }

    ConnectionError::Network { message }.into()
}

enum MockReply {
    Response(HttpResponse),
    Error(PixError),
}

/// Mock HTTP transport for testing.
///
/// Replies are served in the order they were queued, then the default
/// response if one is set.
#[derive(Default)]
pub struct MockHttpTransport {
    replies: Mutex<VecDeque<MockReply>>,
    request_history: Mutex<Vec<HttpRequest>>,
    default_response: Mutex<Option<HttpResponse>>,
    latency: Option<Duration>,
}

impl MockHttpTransport {
    /// Create new mock transport.
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay every reply by `latency`.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Queue a response to return.
    pub fn queue_response(&self, response: HttpResponse) -> &Self {
        self.replies.lock().push_back(MockReply::Response(response));
        self
    }

    /// Queue a JSON response.
    pub fn queue_json_response(&self, status: u16, body: &serde_json::Value) -> &Self {
        let mut response = HttpResponse::new(status, body.to_string());
        response
            .headers
            .insert("content-type".to_string(), "application/json".to_string());
        self.queue_response(response)
    }

    /// Queue a transport failure.
    pub fn queue_error(&self, error: impl Into<PixError>) -> &Self {
        self.replies.lock().push_back(MockReply::Error(error.into()));
        self
    }

    /// Set default response when queue is empty.
    pub fn set_default_response(&self, response: HttpResponse) -> &Self {
        *self.default_response.lock() = Some(response);
        self
    }

    /// Get request history.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.request_history.lock().clone()
    }

    /// Get last request.
    pub fn last_request(&self) -> Option<HttpRequest> {
        self.request_history.lock().last().cloned()
    }

    pub fn request_count(&self) -> usize {
        self.request_history.lock().len()
    }

    /// Requests whose URL contains `fragment`.
    pub fn requests_matching(&self, fragment: &str) -> Vec<HttpRequest> {
        self.request_history
            .lock()
            .iter()
            .filter(|r| r.url.contains(fragment))
            .cloned()
            .collect()
    }

    /// Clear request history.
    pub fn clear_history(&self) {
        self.request_history.lock().clear();
    }
}

#[async_trait]
impl HttpTransport for MockHttpTransport {
    async fn send(&self, request: HttpRequest) -> PixResult<HttpResponse> {
        self.request_history.lock().push(request);

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        let reply = self.replies.lock().pop_front();
        match reply {
            Some(MockReply::Response(response)) => Ok(response),
            Some(MockReply::Error(error)) => Err(error),
            None => self.default_response.lock().clone().ok_or_else(|| {
                ConnectionError::Network {
                    message: "No mock response available".to_string(),
                }
                .into()
            }),
        }
    }
}
