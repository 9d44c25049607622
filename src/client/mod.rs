//! Sicredi PIX API client.

use std::fmt;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::info;

use crate::core::{CertificateResolver, HttpTransport, ReqwestHttpTransport};
use crate::error::PixResult;
use crate::resilience::RetryConfig;
use crate::services::{
    CobService, CobvService, LoteCobvService, LocService, PixService, WebhookService,
};
use crate::token::{DefaultTokenManager, TokenManager, TokenManagerConfig};
use crate::types::PixConfig;

mod executor;
mod query;

pub use executor::{required_scope, resource_path, to_body, RequestExecutor, ResponseBody};
pub use query::QueryParams;

/// Fully built request pipeline.
struct Pipeline {
    executor: RequestExecutor,
    tokens: Arc<dyn TokenManager>,
}

/// Sicredi PIX API client.
///
/// Construction performs no I/O. The certificate resolver, transport, token
/// manager and request executor are built once, on the first API call. A
/// failed initialization is not cached, so the next call tries again.
///
/// # Example
///
/// ```no_run
/// use sicredi_pix::{PixClient, PixConfig};
///
/// # async fn example() -> Result<(), sicredi_pix::PixError> {
/// let config = PixConfig::builder()
///     .client_id("client-id")
///     .client_secret("client-secret")
///     .cert("/etc/pix/cert.pem")
///     .key("/etc/pix/key.pem")
///     .sandbox()
///     .build()?;
///
/// let client = PixClient::new(config);
/// let cob = client.cob().get("fc9a4366ff3d4964b5dbc6c91a8722d3", None).await?;
/// println!("{:?}", cob.status);
/// # Ok(())
/// # }
/// ```
pub struct PixClient {
    config: PixConfig,
    transport: Option<Arc<dyn HttpTransport>>,
    pipeline: OnceCell<Pipeline>,
}

impl PixClient {
    /// Create a client. Certificates are loaded lazily.
    pub fn new(config: PixConfig) -> Self {
        Self {
            config,
            transport: None,
            pipeline: OnceCell::new(),
        }
    }

    /// Create a client over an injected transport.
    ///
    /// Certificate resolution is skipped; the transport owns TLS.
    pub fn with_transport(config: PixConfig, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            config,
            transport: Some(transport),
            pipeline: OnceCell::new(),
        }
    }

    /// Create a client from `SICREDI_*` environment variables.
    pub fn from_env() -> PixResult<Self> {
        Ok(Self::new(PixConfig::from_env()?))
    }

    pub fn config(&self) -> &PixConfig {
        &self.config
    }

    /// Effective base URL.
    pub fn base_url(&self) -> &str {
        self.config.base_url()
    }

    /// Check if the pipeline has been built.
    pub fn is_initialized(&self) -> bool {
        self.pipeline.initialized()
    }

    /// Immediate charges (`cob`).
    pub fn cob(&self) -> CobService<'_> {
        CobService::new(self)
    }

    /// Charges with due date (`cobv`).
    pub fn cobv(&self) -> CobvService<'_> {
        CobvService::new(self)
    }

    /// Received payments and returns.
    pub fn pix(&self) -> PixService<'_> {
        PixService::new(self)
    }

    /// Batches of charges with due date.
    pub fn lotecobv(&self) -> LoteCobvService<'_> {
        LoteCobvService::new(self)
    }

    /// Payload locations.
    pub fn loc(&self) -> LocService<'_> {
        LocService::new(self)
    }

    /// Webhook configuration.
    pub fn webhook(&self) -> WebhookService<'_> {
        WebhookService::new(self)
    }

    /// Current access token, fetching one if needed.
    pub async fn access_token(&self) -> PixResult<String> {
        self.pipeline().await?.tokens.get_access_token().await
    }

    /// Drop the cached access token.
    pub fn invalidate_token(&self) {
        if let Some(pipeline) = self.pipeline.get() {
            pipeline.tokens.invalidate_token();
        }
    }

    pub(crate) async fn executor(&self) -> PixResult<&RequestExecutor> {
        Ok(&self.pipeline().await?.executor)
    }

    async fn pipeline(&self) -> PixResult<&Pipeline> {
        self.pipeline.get_or_try_init(|| self.initialize()).await
    }

    async fn initialize(&self) -> PixResult<Pipeline> {
        let base_url = self.config.parsed_base_url()?;

        let transport: Arc<dyn HttpTransport> = match &self.transport {
            Some(transport) => Arc::clone(transport),
            None => {
                let resolver = CertificateResolver::new(self.config.certificate.clone());
                let bundle = resolver.resolve()?;
                Arc::new(ReqwestHttpTransport::new(
                    &bundle,
                    self.config.timeout,
                    self.config.debug,
                )?)
            }
        };

        let tokens: Arc<dyn TokenManager> = Arc::new(DefaultTokenManager::new(
            self.config.client_id.clone(),
            self.config.client_secret.clone(),
            self.config.base_url(),
            Arc::clone(&transport),
            TokenManagerConfig {
                timeout: Some(self.config.timeout),
                ..TokenManagerConfig::default()
            },
        ));

        let executor = RequestExecutor::new(
            base_url,
            transport,
            Arc::clone(&tokens),
            RetryConfig::with_max_retries(self.config.max_retries),
        )
        .with_timeout(self.config.timeout);

        info!(
            base_url = self.config.base_url(),
            environment = ?self.config.environment,
            max_retries = self.config.max_retries,
            "PIX client initialized"
        );

        Ok(Pipeline { executor, tokens })
    }
}

impl fmt::Debug for PixClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PixClient")
            .field("config", &self.config)
            .field("custom_transport", &self.transport.is_some())
            .field("initialized", &self.is_initialized())
            .finish()
    }
}
