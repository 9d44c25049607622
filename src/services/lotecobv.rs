//! Batch (`lotecobv`) operations.

use crate::client::{to_body, PixClient, QueryParams};
use crate::core::HttpMethod;
use crate::error::PixResult;
use crate::types::{
    ListLoteCobvParams, ListLoteCobvResponse, LoteCobvPatchRequest, LoteCobvRequest,
    LoteCobvResponse,
};
use crate::utils::constants::endpoints::LOTECOBV;

/// Service for batches of charges with due date.
///
/// Batches are processed asynchronously by the bank: `create` and `update`
/// return nothing and the outcome of each charge is read back with `get`.
pub struct LoteCobvService<'a> {
    client: &'a PixClient,
}

impl<'a> LoteCobvService<'a> {
    pub fn new(client: &'a PixClient) -> Self {
        Self { client }
    }

    /// Create or replace batch `id`.
    pub async fn create(&self, id: u64, request: &LoteCobvRequest) -> PixResult<()> {
        let body = to_body(request)?;
        self.client
            .executor()
            .await?
            .request_empty(HttpMethod::Put, &format!("{}/{}", LOTECOBV, id), Some(body), None)
            .await
    }

    /// Revise charges inside batch `id`.
    pub async fn update(&self, id: u64, request: &LoteCobvPatchRequest) -> PixResult<()> {
        let body = to_body(request)?;
        self.client
            .executor()
            .await?
            .request_empty(HttpMethod::Patch, &format!("{}/{}", LOTECOBV, id), Some(body), None)
            .await
    }

    pub async fn get(&self, id: u64) -> PixResult<LoteCobvResponse> {
        self.client
            .executor()
            .await?
            .request(HttpMethod::Get, &format!("{}/{}", LOTECOBV, id), None, None)
            .await
    }

    pub async fn list(&self, params: &ListLoteCobvParams) -> PixResult<ListLoteCobvResponse> {
        let mut query = QueryParams::new();
        query
            .push("inicio", &params.inicio)
            .push("fim", &params.fim)
            .paginacao(params.paginacao.as_ref());

        self.client
            .executor()
            .await?
            .request(HttpMethod::Get, LOTECOBV, None, Some(&query))
            .await
    }
}

#[cfg(test)]
mod tests {
    use crate::core::{HttpMethod, HttpResponse};
    use crate::services::test_support::{body_json, last_api_request, mock_client, BASE, TXID};
    use crate::types::{
        CreateCobvRequest, Devedor, ListLoteCobvParams, LoteCobvItem, LoteCobvItemStatus,
        LoteCobvPatchItem, LoteCobvPatchRequest, LoteCobvRequest, PaginacaoParams, TaxId,
        UpdateCobvRequest, ValorCobv,
    };
    use serde_json::json;

    #[tokio::test]
    async fn test_create_sends_flattened_items() {
        let (client, transport) = mock_client();
        transport.queue_response(HttpResponse::new(202, ""));

        let request = LoteCobvRequest {
            descricao: Some("Mensalidades".to_string()),
            cobsv: vec![LoteCobvItem {
                txid: TXID.to_string(),
                cobv: CreateCobvRequest::new(
                    "2024-03-10",
                    Devedor::new(TaxId::Cpf("52998224725".to_string()), "Aluno"),
                    ValorCobv::new("300.00"),
                    "pix@escola.com.br",
                ),
            }],
        };
        client.lotecobv().create(12, &request).await.unwrap();

        let sent = last_api_request(&transport);
        assert_eq!(sent.method, HttpMethod::Put);
        assert_eq!(sent.url, format!("{}/api/v2/lotecobv/12", BASE));
        let body = body_json(&sent);
        assert_eq!(body["descricao"], "Mensalidades");
        assert_eq!(body["cobsv"][0]["txid"], TXID);
        assert_eq!(body["cobsv"][0]["valor"]["original"], "300.00");
    }

    #[tokio::test]
    async fn test_update_patches() {
        let (client, transport) = mock_client();
        transport.queue_response(HttpResponse::new(202, ""));

        let request = LoteCobvPatchRequest {
            cobsv: vec![LoteCobvPatchItem {
                txid: TXID.to_string(),
                changes: UpdateCobvRequest::cancel(),
            }],
        };
        client.lotecobv().update(12, &request).await.unwrap();

        let sent = last_api_request(&transport);
        assert_eq!(sent.method, HttpMethod::Patch);
        assert_eq!(
            body_json(&sent),
            json!({"cobsv": [{"txid": TXID, "status": "REMOVIDA_PELO_USUARIO_RECEBEDOR"}]})
        );
    }

    #[tokio::test]
    async fn test_get_and_list() {
        let (client, transport) = mock_client();
        transport
            .queue_json_response(
                200,
                &json!({
                    "id": 12,
                    "criacao": "2024-01-01T10:00:00Z",
                    "cobsv": [{"txid": TXID, "status": "EM_PROCESSAMENTO"}]
                }),
            )
            .queue_json_response(
                200,
                &json!({"parametros": {"inicio": "a", "fim": "b"}, "lotes": []}),
            );

        let lote = client.lotecobv().get(12).await.unwrap();
        assert_eq!(lote.cobsv[0].status, LoteCobvItemStatus::EmProcessamento);

        let mut params = ListLoteCobvParams::new("a", "b");
        params.paginacao = Some(PaginacaoParams {
            pagina_atual: None,
            itens_por_pagina: Some(50),
        });
        client.lotecobv().list(&params).await.unwrap();
        assert_eq!(
            last_api_request(&transport).url,
            format!("{}/api/v2/lotecobv?inicio=a&fim=b&paginacao.itensPorPagina=50", BASE)
        );
    }
}
