//! Webhook configuration and callback types.

use serde::{Deserialize, Serialize};

use super::common::{
    ComponentesValor, DevolucaoNatureza, DevolucaoStatus, Horario, Pagador, PaginacaoParams,
    Parametros,
};

/// Body of `PUT /webhook/{chave}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookConfigRequest {
    pub webhook_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookResponse {
    pub webhook_url: String,
    pub chave: String,
    pub criacao: String,
}

/// Filters for `GET /webhook`. Unlike other lists, the dates are optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListWebhookParams {
    pub inicio: Option<String>,
    pub fim: Option<String>,
    pub paginacao: Option<PaginacaoParams>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListWebhookResponse {
    pub parametros: Parametros,
    #[serde(default)]
    pub webhooks: Vec<WebhookResponse>,
}

/// Refund inside a webhook callback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookDevolucao {
    pub id: String,
    pub rtr_id: String,
    pub valor: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub natureza: Option<DevolucaoNatureza>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descricao: Option<String>,
    pub horario: Horario,
    pub status: DevolucaoStatus,
}

/// One payment inside a webhook callback.
///
/// `horario` is a plain timestamp here, unlike `GET /pix`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookPixEntry {
    pub end_to_end_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub txid: Option<String>,
    pub chave: String,
    pub valor: String,
    pub horario: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info_pagador: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagador: Option<Pagador>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub componentes_valor: Option<ComponentesValor>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub devolucoes: Vec<WebhookDevolucao>,
}

/// Callback body POSTed by Sicredi to `{webhookUrl}/pix`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookCallbackPayload {
    pub pix: Vec<WebhookPixEntry>,
}
