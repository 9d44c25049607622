//! Batch of cobv charges (lotecobv) types.

use serde::{Deserialize, Serialize};

use super::cobv::{CobvResponse, CreateCobvRequest, UpdateCobvRequest};
use super::common::{PaginacaoParams, Parametros};

/// Charge inside a batch request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoteCobvItem {
    pub txid: String,
    #[serde(flatten)]
    pub cobv: CreateCobvRequest,
}

/// Body of `PUT /lotecobv/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoteCobvRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descricao: Option<String>,
    pub cobsv: Vec<LoteCobvItem>,
}

/// Partial update of one charge inside a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoteCobvPatchItem {
    pub txid: String,
    #[serde(flatten)]
    pub changes: UpdateCobvRequest,
}

/// Body of `PATCH /lotecobv/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoteCobvPatchRequest {
    pub cobsv: Vec<LoteCobvPatchItem>,
}

/// Processing status of a charge inside a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoteCobvItemStatus {
    EmProcessamento,
    Criada,
}

/// Failure reported for one charge of a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoteCobvProblema {
    #[serde(rename = "type")]
    pub type_uri: String,
    pub title: String,
    pub status: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoteCobvItemResult {
    pub txid: String,
    pub status: LoteCobvItemStatus,
    /// Present once the charge is `Criada`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub criacao: Option<Box<CobvResponse>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub problema: Option<LoteCobvProblema>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoteCobvResponse {
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descricao: Option<String>,
    pub criacao: String,
    #[serde(default)]
    pub cobsv: Vec<LoteCobvItemResult>,
}

/// Filters for `GET /lotecobv`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListLoteCobvParams {
    pub inicio: String,
    pub fim: String,
    pub paginacao: Option<PaginacaoParams>,
}

impl ListLoteCobvParams {
    pub fn new(inicio: impl Into<String>, fim: impl Into<String>) -> Self {
        Self {
            inicio: inicio.into(),
            fim: fim.into(),
            paginacao: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListLoteCobvResponse {
    pub parametros: Parametros,
    #[serde(default)]
    pub lotes: Vec<LoteCobvResponse>,
}
