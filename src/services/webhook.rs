//! Webhook configuration operations.

use crate::client::{resource_path, to_body, PixClient, QueryParams};
use crate::core::HttpMethod;
use crate::error::PixResult;
use crate::types::{ListWebhookParams, ListWebhookResponse, WebhookConfigRequest, WebhookResponse};
use crate::utils::constants::endpoints::WEBHOOK;

/// Service for webhook configuration, keyed by PIX key.
pub struct WebhookService<'a> {
    client: &'a PixClient,
}

impl<'a> WebhookService<'a> {
    pub fn new(client: &'a PixClient) -> Self {
        Self { client }
    }

    /// Point callbacks for `chave` at `webhook_url`.
    pub async fn configure(&self, chave: &str, webhook_url: &str) -> PixResult<()> {
        let body = to_body(&WebhookConfigRequest {
            webhook_url: webhook_url.to_string(),
        })?;
        self.client
            .executor()
            .await?
            .request_empty(HttpMethod::Put, &resource_path(WEBHOOK, &[chave]), Some(body), None)
            .await
    }

    pub async fn get(&self, chave: &str) -> PixResult<WebhookResponse> {
        self.client
            .executor()
            .await?
            .request(HttpMethod::Get, &resource_path(WEBHOOK, &[chave]), None, None)
            .await
    }

    pub async fn delete(&self, chave: &str) -> PixResult<()> {
        self.client
            .executor()
            .await?
            .request_empty(HttpMethod::Delete, &resource_path(WEBHOOK, &[chave]), None, None)
            .await
    }

    pub async fn list(&self, params: &ListWebhookParams) -> PixResult<ListWebhookResponse> {
        let mut query = QueryParams::new();
        query
            .push_opt("inicio", params.inicio.as_deref())
            .push_opt("fim", params.fim.as_deref())
            .paginacao(params.paginacao.as_ref());

        self.client
            .executor()
            .await?
            .request(HttpMethod::Get, WEBHOOK, None, Some(&query))
            .await
    }
}
