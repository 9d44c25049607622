//! Shared PIX Types
//!
//! Building blocks reused across cob, cobv, pix, loc and webhook payloads.
//! Field names follow the Bacen wire contract (camelCase on the wire).

use serde::{Deserialize, Serialize};

use crate::error::{PixResult, ValidationError};
use crate::utils::validators::{is_valid_cnpj, is_valid_cpf};

/// Brazilian taxpayer document. Serialized inline as `"cpf"` or `"cnpj"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaxId {
    #[serde(rename = "cpf")]
    Cpf(String),
    #[serde(rename = "cnpj")]
    Cnpj(String),
}

impl TaxId {
    /// Classify a document by its digit count (11 = CPF, 14 = CNPJ).
    ///
    /// Punctuation is stripped. Check digits are not verified here.
    pub fn classify(document: &str) -> Option<Self> {
        let digits: String = document.chars().filter(char::is_ascii_digit).collect();
        match digits.len() {
            11 => Some(Self::Cpf(digits)),
            14 => Some(Self::Cnpj(digits)),
            _ => None,
        }
    }

    /// Classify and verify check digits.
    pub fn parse(document: &str) -> PixResult<Self> {
        match Self::classify(document) {
            Some(id) if id.is_valid() => Ok(id),
            _ => Err(ValidationError::new("documento", "Must be a valid CPF or CNPJ").into()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Cpf(v) | Self::Cnpj(v) => v,
        }
    }

    pub fn is_valid(&self) -> bool {
        match self {
            Self::Cpf(v) => is_valid_cpf(v),
            Self::Cnpj(v) => is_valid_cnpj(v),
        }
    }
}

/// Debtor of a charge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Devedor {
    #[serde(flatten)]
    pub documento: TaxId,
    pub nome: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logradouro: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cidade: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uf: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cep: Option<String>,
}

impl Devedor {
    pub fn new(documento: TaxId, nome: impl Into<String>) -> Self {
        Self {
            documento,
            nome: nome.into(),
            logradouro: None,
            cidade: None,
            uf: None,
            cep: None,
        }
    }

    pub fn with_address(
        mut self,
        logradouro: impl Into<String>,
        cidade: impl Into<String>,
        uf: impl Into<String>,
        cep: impl Into<String>,
    ) -> Self {
        self.logradouro = Some(logradouro.into());
        self.cidade = Some(cidade.into());
        self.uf = Some(uf.into());
        self.cep = Some(cep.into());
        self
    }
}

/// Payer of a received PIX.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagador {
    #[serde(flatten)]
    pub documento: TaxId,
    pub nome: String,
}

/// Receiver of a charge, filled by the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recebedor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpf: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cnpj: Option<String>,
    #[serde(default)]
    pub nome: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nome_fantasia: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logradouro: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cidade: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uf: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cep: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conta: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agencia: Option<String>,
}

impl Recebedor {
    pub fn documento(&self) -> Option<TaxId> {
        self.cpf
            .clone()
            .map(TaxId::Cpf)
            .or_else(|| self.cnpj.clone().map(TaxId::Cnpj))
    }
}

/// Amount of an immediate charge, as a decimal string (`"100.00"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Valor {
    pub original: String,
    /// 0 = fixed amount, 1 = payer may change it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modalidade_alteracao: Option<u8>,
}

impl Valor {
    pub fn new(original: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            modalidade_alteracao: None,
        }
    }
}

/// Calendar for immediate charges.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Calendario {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub criacao: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apresentacao: Option<String>,
    /// Seconds from creation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiracao: Option<u64>,
}

impl Calendario {
    pub fn expiring_in(seconds: u64) -> Self {
        Self {
            expiracao: Some(seconds),
            ..Default::default()
        }
    }
}

/// Calendar for charges with due date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarioVencimento {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub criacao: Option<String>,
    /// `YYYY-MM-DD`.
    pub data_de_vencimento: String,
    /// Days the charge stays payable after the due date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validade_apos_vencimento: Option<u32>,
}

impl CalendarioVencimento {
    pub fn due_on(data_de_vencimento: impl Into<String>) -> Self {
        Self {
            data_de_vencimento: data_de_vencimento.into(),
            ..Default::default()
        }
    }
}

/// Extra key/value shown to the payer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfoAdicional {
    pub nome: String,
    pub valor: String,
}

/// Pagination metadata returned by list endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paginacao {
    pub pagina_atual: u32,
    pub itens_por_pagina: u32,
    pub quantidade_de_paginas: u32,
    pub quantidade_total_de_itens: u32,
}

/// Pagination request for list endpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaginacaoParams {
    /// Zero based page.
    pub pagina_atual: Option<u32>,
    pub itens_por_pagina: Option<u32>,
}

impl PaginacaoParams {
    pub fn page(pagina_atual: u32, itens_por_pagina: u32) -> Self {
        Self {
            pagina_atual: Some(pagina_atual),
            itens_por_pagina: Some(itens_por_pagina),
        }
    }
}

/// Echo of the list query with pagination metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parametros {
    pub inicio: String,
    pub fim: String,
    #[serde(default)]
    pub paginacao: Paginacao,
}

/// Reference to an existing location by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocRef {
    pub id: u64,
}

/// Kind of charge a location serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TipoCob {
    Cob,
    Cobv,
}

impl TipoCob {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cob => "cob",
            Self::Cobv => "cobv",
        }
    }
}

/// Payload location used to render QR codes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Loc {
    pub id: u64,
    pub location: String,
    pub tipo_cob: TipoCob,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub criacao: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub txid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ativacao: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inativacao: Option<String>,
}

/// Cash agent modality for saque/troco.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModalidadeAgente {
    /// Commercial establishment.
    #[serde(rename = "AGTEC")]
    Agtec,
    /// Other legal entity.
    #[serde(rename = "AGTOT")]
    Agtot,
    /// Withdrawal facilitator.
    #[serde(rename = "AGPSS")]
    Agpss,
}

/// Saque (withdrawal) or troco (change) settings on a charge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaqueTroco {
    pub valor: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modalidade_alteracao: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prestador_de_servico_de_saque: Option<String>,
    pub modalidade_agente: ModalidadeAgente,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValorComponente {
    pub valor: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponenteSaqueTroco {
    pub valor: String,
    pub modalidade_agente: ModalidadeAgente,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prestador_de_servico_de_saque: Option<String>,
}

/// Breakdown of a received amount.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentesValor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original: Option<ValorComponente>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saque: Option<ComponenteSaqueTroco>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub troco: Option<ComponenteSaqueTroco>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub juros: Option<ValorComponente>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multa: Option<ValorComponente>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abatimento: Option<ValorComponente>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desconto: Option<ValorComponente>,
}

/// Request/settlement timestamps of a payment or refund.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Horario {
    pub solicitacao: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub liquidacao: Option<String>,
}

/// Refund status. Legacy and current names are both accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DevolucaoStatus {
    EmProcessamento,
    Devolvido,
    NaoRealizado,
    Pendente,
    Liquidado,
}

/// Refund nature as reported by the PSP. Absent means `Original`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DevolucaoNatureza {
    #[default]
    Original,
    Retirada,
    MedOperacional,
    MedFraude,
    MedPixAutomatico,
}

/// Refund nature a receiver may request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DevolucaoSolicitadaNatureza {
    #[default]
    Original,
    Retirada,
}

/// Refund attached to a payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Devolucao {
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

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tax_id_classify() {
        assert_eq!(
            TaxId::classify("529.982.247-25"),
            Some(TaxId::Cpf("52998224725".to_string()))
        );
        assert_eq!(
            TaxId::classify("11.222.333/0001-81"),
            Some(TaxId::Cnpj("11222333000181".to_string()))
        );
        assert_eq!(TaxId::classify("123"), None);
        assert!(TaxId::parse("52998224724").is_err());
    }

    #[test]
    fn test_devedor_wire_shape() {
        let devedor = Devedor::new(TaxId::Cpf("52998224725".to_string()), "Fulano");
        let value = serde_json::to_value(&devedor).unwrap();
        assert_eq!(value, json!({"cpf": "52998224725", "nome": "Fulano"}));

        let parsed: Devedor =
            serde_json::from_value(json!({"cnpj": "11222333000181", "nome": "Empresa", "uf": "RS"}))
                .unwrap();
        assert_eq!(parsed.documento, TaxId::Cnpj("11222333000181".to_string()));
        assert_eq!(parsed.uf.as_deref(), Some("RS"));
    }

    #[test]
    fn test_statuses_on_the_wire() {
        assert_eq!(
            serde_json::to_value(DevolucaoStatus::EmProcessamento).unwrap(),
            json!("EM_PROCESSAMENTO")
        );
        assert_eq!(
            serde_json::to_value(DevolucaoNatureza::MedPixAutomatico).unwrap(),
            json!("MED_PIX_AUTOMATICO")
        );
        assert_eq!(serde_json::to_value(TipoCob::Cobv).unwrap(), json!("cobv"));
    }
}
