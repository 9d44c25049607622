//! Charge with due date (`cobv`) operations.

use crate::client::{resource_path, to_body, PixClient, QueryParams};
use crate::core::HttpMethod;
use crate::error::PixResult;
use crate::types::{
    CobvResponse, CreateCobvRequest, ListCobvParams, ListCobvResponse, UpdateCobvRequest,
};
use crate::utils::constants::endpoints::COBV;
use crate::utils::ensure_txid;

/// Service for charges with due date (boleto híbrido).
pub struct CobvService<'a> {
    client: &'a PixClient,
}

impl<'a> CobvService<'a> {
    pub fn new(client: &'a PixClient) -> Self {
        Self { client }
    }

    /// Create or replace a charge (`PUT /api/v2/cobv/{txid}`).
    pub async fn create(&self, txid: &str, request: &CreateCobvRequest) -> PixResult<CobvResponse> {
        ensure_txid(txid)?;
        let body = to_body(request)?;
        self.client
            .executor()
            .await?
            .request(HttpMethod::Put, &resource_path(COBV, &[txid]), Some(body), None)
            .await
    }

    pub async fn get(&self, txid: &str, revisao: Option<u32>) -> PixResult<CobvResponse> {
        ensure_txid(txid)?;
        let mut query = QueryParams::new();
        query.push_opt("revisao", revisao);
        self.client
            .executor()
            .await?
            .request(HttpMethod::Get, &resource_path(COBV, &[txid]), None, Some(&query))
            .await
    }

    pub async fn update(&self, txid: &str, request: &UpdateCobvRequest) -> PixResult<CobvResponse> {
        ensure_txid(txid)?;
        let body = to_body(request)?;
        self.client
            .executor()
            .await?
            .request(HttpMethod::Patch, &resource_path(COBV, &[txid]), Some(body), None)
            .await
    }

    pub async fn cancel(&self, txid: &str) -> PixResult<CobvResponse> {
        self.update(txid, &UpdateCobvRequest::cancel()).await
    }

    pub async fn list(&self, params: &ListCobvParams) -> PixResult<ListCobvResponse> {
        let mut query = QueryParams::new();
        query
            .push("inicio", &params.inicio)
            .push("fim", &params.fim)
            .push_opt("cpf", params.cpf.as_deref())
            .push_opt("cnpj", params.cnpj.as_deref())
            .push_opt("locationPresente", params.location_presente)
            .push_opt("status", params.status.map(|s| s.as_str()))
            .push_opt("loteCobVId", params.lote_cob_v_id)
            .paginacao(params.paginacao.as_ref());

        self.client
            .executor()
            .await?
            .request(HttpMethod::Get, COBV, None, Some(&query))
            .await
    }
}
