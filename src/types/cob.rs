//! Immediate charge (cob) types.

use serde::{Deserialize, Serialize};

use super::common::{
    Calendario, ComponentesValor, Devedor, Devolucao, Horario, InfoAdicional, Loc, LocRef, Pagador,
    PaginacaoParams, Parametros, SaqueTroco, Valor,
};

/// Status of an immediate charge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CobStatus {
    Ativa,
    Concluida,
    RemovidaPeloUsuarioRecebedor,
    RemovidaPeloPsp,
}

impl CobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ativa => "ATIVA",
            Self::Concluida => "CONCLUIDA",
            Self::RemovidaPeloUsuarioRecebedor => "REMOVIDA_PELO_USUARIO_RECEBEDOR",
            Self::RemovidaPeloPsp => "REMOVIDA_PELO_PSP",
        }
    }
}

/// Payment received against a charge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PixPayment {
    pub end_to_end_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub txid: Option<String>,
    pub valor: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chave: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagador: Option<Pagador>,
    pub horario: Horario,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info_pagador: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub componentes_valor: Option<ComponentesValor>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub devolucoes: Vec<Devolucao>,
}

/// Body of `PUT /cob/{txid}` and `POST /cob`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCobRequest {
    pub calendario: Calendario,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub devedor: Option<Devedor>,
    pub valor: Valor,
    pub chave: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solicitacao_pagador: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub info_adicionais: Vec<InfoAdicional>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loc: Option<LocRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saque: Option<SaqueTroco>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub troco: Option<SaqueTroco>,
}

impl CreateCobRequest {
    /// Minimal charge: expiration in seconds, amount and receiver key.
    pub fn new(expiracao: u64, original: impl Into<String>, chave: impl Into<String>) -> Self {
        Self {
            calendario: Calendario::expiring_in(expiracao),
            devedor: None,
            valor: Valor::new(original),
            chave: chave.into(),
            solicitacao_pagador: None,
            info_adicionais: Vec::new(),
            loc: None,
            saque: None,
            troco: None,
        }
    }

    pub fn with_devedor(mut self, devedor: Devedor) -> Self {
        self.devedor = Some(devedor);
        self
    }

    pub fn with_solicitacao_pagador(mut self, message: impl Into<String>) -> Self {
        self.solicitacao_pagador = Some(message.into());
        self
    }

    pub fn with_info_adicional(mut self, nome: impl Into<String>, valor: impl Into<String>) -> Self {
        self.info_adicionais.push(InfoAdicional {
            nome: nome.into(),
            valor: valor.into(),
        });
        self
    }
}

/// Immediate charge as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CobResponse {
    #[serde(default)]
    pub calendario: Calendario,
    pub txid: String,
    #[serde(default)]
    pub revisao: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loc: Option<Loc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub status: CobStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub devedor: Option<Devedor>,
    pub valor: Valor,
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
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saque: Option<SaqueTroco>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub troco: Option<SaqueTroco>,
}

/// Body of `PATCH /cob/{txid}`. Unset fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCobRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calendario: Option<Calendario>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub devedor: Option<Devedor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valor: Option<Valor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chave: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solicitacao_pagador: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info_adicionais: Option<Vec<InfoAdicional>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loc: Option<LocRef>,
    /// Only `RemovidaPeloUsuarioRecebedor` is accepted by the API.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<CobStatus>,
}

impl UpdateCobRequest {
    /// Patch that cancels the charge.
    pub fn cancel() -> Self {
        Self {
            status: Some(CobStatus::RemovidaPeloUsuarioRecebedor),
            ..Default::default()
        }
    }
}

/// Filters for `GET /cob`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListCobParams {
    pub inicio: String,
    pub fim: String,
    pub cpf: Option<String>,
    pub cnpj: Option<String>,
    pub location_presente: Option<bool>,
    pub status: Option<CobStatus>,
    pub paginacao: Option<PaginacaoParams>,
}

impl ListCobParams {
    pub fn new(inicio: impl Into<String>, fim: impl Into<String>) -> Self {
        Self {
            inicio: inicio.into(),
            fim: fim.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListCobResponse {
    pub parametros: Parametros,
    #[serde(default)]
    pub cobs: Vec<CobResponse>,
}
