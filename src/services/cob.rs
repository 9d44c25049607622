//! Immediate charge (`cob`) operations.

use crate::client::{resource_path, to_body, PixClient, QueryParams};
use crate::core::HttpMethod;
use crate::error::PixResult;
use crate::types::{CobResponse, CreateCobRequest, ListCobParams, ListCobResponse, UpdateCobRequest};
use crate::utils::constants::endpoints::{COB_CREATE, COB_GET, COB_LIST};
use crate::utils::{ensure_txid, generate_txid, generate_txid_with_length};

/// Service for immediate charges.
pub struct CobService<'a> {
    client: &'a PixClient,
}

impl<'a> CobService<'a> {
    pub fn new(client: &'a PixClient) -> Self {
        Self { client }
    }

    /// Create a charge under a caller-chosen txid (`PUT /api/v2/cob/{txid}`).
    pub async fn create(&self, txid: &str, request: &CreateCobRequest) -> PixResult<CobResponse> {
        ensure_txid(txid)?;
        let body = to_body(request)?;
        self.client
            .executor()
            .await?
            .request(HttpMethod::Put, &resource_path(COB_CREATE, &[txid]), Some(body), None)
            .await
    }

    /// Create a charge with a txid assigned by the bank (`POST /api/v2/cob`).
    pub async fn create_auto(&self, request: &CreateCobRequest) -> PixResult<CobResponse> {
        let body = to_body(request)?;
        self.client
            .executor()
            .await?
            .request(HttpMethod::Post, COB_CREATE, Some(body), None)
            .await
    }

    /// Fetch a charge, optionally at a given revision.
    ///
    /// Reads go through `/api/v3/cob`, unlike the other operations.
    pub async fn get(&self, txid: &str, revisao: Option<u32>) -> PixResult<CobResponse> {
        ensure_txid(txid)?;
        let mut query = QueryParams::new();
        query.push_opt("revisao", revisao);
        self.client
            .executor()
            .await?
            .request(HttpMethod::Get, &resource_path(COB_GET, &[txid]), None, Some(&query))
            .await
    }

    /// Patch a charge (`PATCH /api/v2/cob/{txid}`).
    pub async fn update(&self, txid: &str, request: &UpdateCobRequest) -> PixResult<CobResponse> {
        ensure_txid(txid)?;
        let body = to_body(request)?;
        self.client
            .executor()
            .await?
            .request(HttpMethod::Patch, &resource_path(COB_CREATE, &[txid]), Some(body), None)
            .await
    }

    /// Cancel a charge by setting `REMOVIDA_PELO_USUARIO_RECEBEDOR`.
    pub async fn cancel(&self, txid: &str) -> PixResult<CobResponse> {
        self.update(txid, &UpdateCobRequest::cancel()).await
    }

    /// List charges created within `[inicio, fim]`.
    pub async fn list(&self, params: &ListCobParams) -> PixResult<ListCobResponse> {
        let mut query = QueryParams::new();
        query
            .push("inicio", &params.inicio)
            .push("fim", &params.fim)
            .push_opt("cpf", params.cpf.as_deref())
            .push_opt("cnpj", params.cnpj.as_deref())
            .push_opt("locationPresente", params.location_presente)
            .push_opt("status", params.status.map(|s| s.as_str()))
            .paginacao(params.paginacao.as_ref());

        self.client
            .executor()
            .await?
            .request(HttpMethod::Get, COB_LIST, None, Some(&query))
            .await
    }

    /// Generate a txid of `length` characters (35 when `None`).
    pub fn generate_txid(&self, length: Option<usize>) -> PixResult<String> {
        match length {
            Some(length) => generate_txid_with_length(length),
            None => Ok(generate_txid()),
        }
    }
}
