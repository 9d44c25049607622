//! Payload location (`loc`) operations.

use crate::client::{to_body, PixClient, QueryParams};
use crate::core::HttpMethod;
use crate::error::PixResult;
use crate::types::{CreateLocRequest, ListLocParams, ListLocResponse, LocResponse};
use crate::utils::constants::endpoints::LOC;

/// Service for payload locations.
pub struct LocService<'a> {
    client: &'a PixClient,
}

impl<'a> LocService<'a> {
    pub fn new(client: &'a PixClient) -> Self {
        Self { client }
    }

    pub async fn create(&self, request: &CreateLocRequest) -> PixResult<LocResponse> {
        let body = to_body(request)?;
        self.client
            .executor()
            .await?
            .request(HttpMethod::Post, LOC, Some(body), None)
            .await
    }

    pub async fn get(&self, id: u64) -> PixResult<LocResponse> {
        self.client
            .executor()
            .await?
            .request(HttpMethod::Get, &format!("{}/{}", LOC, id), None, None)
            .await
    }

    pub async fn list(&self, params: &ListLocParams) -> PixResult<ListLocResponse> {
        let mut query = QueryParams::new();
        query
            .push("inicio", &params.inicio)
            .push("fim", &params.fim)
            .push_opt("tipoCob", params.tipo_cob.map(|t| t.as_str()))
            .push_opt("txIdPresente", params.tx_id_presente)
            .paginacao(params.paginacao.as_ref());

        self.client
            .executor()
            .await?
            .request(HttpMethod::Get, LOC, None, Some(&query))
            .await
    }

    /// Detach the charge bound to location `id` (`DELETE /api/v2/loc/{id}/txid`).
    pub async fn unlink(&self, id: u64) -> PixResult<LocResponse> {
        self.client
            .executor()
            .await?
            .request(HttpMethod::Delete, &format!("{}/{}/txid", LOC, id), None, None)
            .await
    }
}
