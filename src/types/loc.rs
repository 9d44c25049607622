//! Payload location (loc) types.

use serde::{Deserialize, Serialize};

use super::common::{Loc, PaginacaoParams, Parametros, TipoCob};

/// Body of `POST /loc`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLocRequest {
    pub tipo_cob: TipoCob,
}

/// Location as returned by the API.
pub type LocResponse = Loc;

/// Filters for `GET /loc`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListLocParams {
    pub inicio: String,
    pub fim: String,
    pub tipo_cob: Option<TipoCob>,
    pub tx_id_presente: Option<bool>,
    pub paginacao: Option<PaginacaoParams>,
}

impl ListLocParams {
    pub fn new(inicio: impl Into<String>, fim: impl Into<String>) -> Self {
        Self {
            inicio: inicio.into(),
            fim: fim.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListLocResponse {
    pub parametros: Parametros,
    #[serde(default)]
    pub loc: Vec<LocResponse>,
}
