//! Charge with due date (cobv) types.

use serde::{Deserialize, Serialize};

use super::cob::PixPayment;
use super::common::{
    CalendarioVencimento, Devedor, InfoAdicional, Loc, LocRef, PaginacaoParams, Parametros,
    Recebedor,
};

/// Status of a charge with due date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CobvStatus {
    Ativa,
    Concluida,
    RemovidaPeloUsuarioRecebedor,
    RemovidaPeloPsp,
    Vencida,
}

impl CobvStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ativa => "ATIVA",
            Self::Concluida => "CONCLUIDA",
            Self::RemovidaPeloUsuarioRecebedor => "REMOVIDA_PELO_USUARIO_RECEBEDOR",
            Self::RemovidaPeloPsp => "REMOVIDA_PELO_PSP",
            Self::Vencida => "VENCIDA",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescontoDataFixa {
    /// `YYYY-MM-DD`.
    pub data: String,
    pub valor_perc: String,
}

/// Early payment discount. Modalities 1-2 use fixed dates, 3-6 a per-day value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Desconto {
    pub modalidade: u8,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub desconto_data_fixa: Vec<DescontoDataFixa>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valor_perc: Option<String>,
}

/// Value/percentage pair used by juros (1-8), multa (1-2) and abatimento (1-2).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Modalidade {
    pub modalidade: u8,
    pub valor_perc: String,
}

impl Modalidade {
    pub fn new(modalidade: u8, valor_perc: impl Into<String>) -> Self {
        Self {
            modalidade,
            valor_perc: valor_perc.into(),
        }
    }
}

/// Amount of a cobv with its financial components.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValorCobv {
    pub original: String,
    /// Computed by the server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r#final: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multa: Option<Modalidade>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub juros: Option<Modalidade>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abatimento: Option<Modalidade>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desconto: Option<Desconto>,
}

impl ValorCobv {
    pub fn new(original: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            ..Default::default()
        }
    }
}

/// Body of `PUT /cobv/{txid}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCobvRequest {
    pub calendario: CalendarioVencimento,
    pub devedor: Devedor,
    pub valor: ValorCobv,
    pub chave: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solicitacao_pagador: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub info_adicionais: Vec<InfoAdicional>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loc: Option<LocRef>,
}

impl CreateCobvRequest {
    pub fn new(
        data_de_vencimento: impl Into<String>,
        devedor: Devedor,
        valor: ValorCobv,
        chave: impl Into<String>,
    ) -> Self {
        Self {
            calendario: CalendarioVencimento::due_on(data_de_vencimento),
            devedor,
            valor,
            chave: chave.into(),
            solicitacao_pagador: None,
            info_adicionais: Vec::new(),
            loc: None,
        }
    }
}

/// Charge with due date as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CobvResponse {
    pub calendario: CalendarioVencimento,
    pub txid: String,
    #[serde(default)]
    pub revisao: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loc: Option<Loc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub status: CobvStatus,
    pub devedor: Devedor,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recebedor: Option<Recebedor>,
    pub valor: ValorCobv,
    pub chave: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solicitacao_pagador: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub info_adicionais: Vec<InfoAdicional>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pix_copia_e_cola: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brcode: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pix: Vec<PixPayment>,
}

/// Body of `PATCH /cobv/{txid}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCobvRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calendario: Option<CalendarioVencimento>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub devedor: Option<Devedor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valor: Option<ValorCobv>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chave: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solicitacao_pagador: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info_adicionais: Option<Vec<InfoAdicional>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loc: Option<LocRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<CobvStatus>,
}

impl UpdateCobvRequest {
    pub fn cancel() -> Self {
        Self {
            status: Some(CobvStatus::RemovidaPeloUsuarioRecebedor),
            ..Default::default()
        }
    }
}

/// Filters for `GET /cobv`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListCobvParams {
    pub inicio: String,
    pub fim: String,
    pub cpf: Option<String>,
    pub cnpj: Option<String>,
    pub location_presente: Option<bool>,
    pub status: Option<CobvStatus>,
    pub lote_cob_v_id: Option<u64>,
    pub paginacao: Option<PaginacaoParams>,
}

impl ListCobvParams {
    pub fn new(inicio: impl Into<String>, fim: impl Into<String>) -> Self {
        Self {
            inicio: inicio.into(),
            fim: fim.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListCobvResponse {
    pub parametros: Parametros,
    #[serde(default)]
    pub cobs: Vec<CobvResponse>,
}
