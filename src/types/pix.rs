//! Received PIX and refund types.

use serde::{Deserialize, Serialize};

use super::common::{
    ComponentesValor, Devolucao, DevolucaoNatureza, DevolucaoSolicitadaNatureza, DevolucaoStatus,
    Horario, Pagador, PaginacaoParams, Parametros, Recebedor,
};

/// PIX received by the account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PixRecebido {
    pub end_to_end_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub txid: Option<String>,
    pub valor: String,
    pub chave: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagador: Option<Pagador>,
    pub horario: Horario,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info_pagador: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recebedor: Option<Recebedor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub componentes_valor: Option<ComponentesValor>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub devolucoes: Vec<Devolucao>,
}

/// Body of `PUT /pix/{e2eid}/devolucao/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DevolucaoRequest {
    pub valor: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub natureza: Option<DevolucaoSolicitadaNatureza>,
    /// Up to 140 characters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descricao: Option<String>,
}

impl DevolucaoRequest {
    pub fn new(valor: impl Into<String>) -> Self {
        Self {
            valor: valor.into(),
            natureza: None,
            descricao: None,
        }
    }

    pub fn with_natureza(mut self, natureza: DevolucaoSolicitadaNatureza) -> Self {
        self.natureza = Some(natureza);
        self
    }

    pub fn with_descricao(mut self, descricao: impl Into<String>) -> Self {
        self.descricao = Some(descricao.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DevolucaoResponse {
    pub id: String,
    pub rtr_id: String,
    pub valor: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub natureza: Option<DevolucaoNatureza>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descricao: Option<String>,
    pub horario: Horario,
    pub status: DevolucaoStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub motivo: Option<String>,
}

/// Filters for `GET /pix`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListPixParams {
    pub inicio: String,
    pub fim: String,
    pub txid: Option<String>,
    pub tx_id_presente: Option<bool>,
    pub devolucao_presente: Option<bool>,
    pub cpf: Option<String>,
    pub cnpj: Option<String>,
    pub paginacao: Option<PaginacaoParams>,
}

impl ListPixParams {
    pub fn new(inicio: impl Into<String>, fim: impl Into<String>) -> Self {
        Self {
            inicio: inicio.into(),
            fim: fim.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListPixResponse {
    pub parametros: Parametros,
    #[serde(default)]
    pub pix: Vec<PixRecebido>,
}
