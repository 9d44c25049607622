//! Received payment (`pix`) and return operations.

use crate::client::{resource_path, to_body, PixClient, QueryParams};
use crate::core::HttpMethod;
use crate::error::PixResult;
use crate::types::{
    DevolucaoRequest, DevolucaoResponse, ListPixParams, ListPixResponse, PixRecebido,
};
use crate::utils::constants::endpoints::PIX;

/// Service for received payments.
pub struct PixService<'a> {
    client: &'a PixClient,
}

impl<'a> PixService<'a> {
    pub fn new(client: &'a PixClient) -> Self {
        Self { client }
    }

    /// Fetch a received payment by end-to-end id.
    pub async fn get(&self, e2eid: &str) -> PixResult<PixRecebido> {
        self.client
            .executor()
            .await?
            .request(HttpMethod::Get, &resource_path(PIX, &[e2eid]), None, None)
            .await
    }

    pub async fn list(&self, params: &ListPixParams) -> PixResult<ListPixResponse> {
        let mut query = QueryParams::new();
        query
            .push("inicio", &params.inicio)
            .push("fim", &params.fim)
            .push_opt("txid", params.txid.as_deref())
            .push_opt("txIdPresente", params.tx_id_presente)
            .push_opt("devolucaoPresente", params.devolucao_presente)
            .push_opt("cpf", params.cpf.as_deref())
            .push_opt("cnpj", params.cnpj.as_deref())
            .paginacao(params.paginacao.as_ref());

        self.client
            .executor()
            .await?
            .request(HttpMethod::Get, PIX, None, Some(&query))
            .await
    }

    /// Request a return (`PUT /api/v2/pix/{e2eid}/devolucao/{id}`).
    ///
    /// `id` is chosen by the caller and identifies the return for later queries.
    pub async fn request_return(
        &self,
        e2eid: &str,
        id: &str,
        request: &DevolucaoRequest,
    ) -> PixResult<DevolucaoResponse> {
        let body = to_body(request)?;
        self.client
            .executor()
            .await?
            .request(HttpMethod::Put, &devolucao_path(e2eid, id), Some(body), None)
            .await
    }

    pub async fn get_return(&self, e2eid: &str, id: &str) -> PixResult<DevolucaoResponse> {
        self.client
            .executor()
            .await?
            .request(HttpMethod::Get, &devolucao_path(e2eid, id), None, None)
            .await
    }
}

fn devolucao_path(e2eid: &str, id: &str) -> String {
    resource_path(PIX, &[e2eid, "devolucao", id])
}

#[cfg(test)]
mod tests {
    use crate::core::HttpMethod;
    use crate::error::PixError;
    use crate::services::test_support::{body_json, last_api_request, mock_client, BASE};
    use crate::types::{DevolucaoRequest, DevolucaoStatus, ListPixParams};
    use serde_json::json;

    const E2E: &str = "E12345678202401011000abcdefghijk";

    fn devolucao_body(status: &str) -> serde_json::Value {
        json!({
            "id": "D1",
            "rtrId": "D12345678202401011000abcdefghijk",
            "valor": "5.00",
            "horario": {"solicitacao": "2024-01-01T10:00:00Z"},
            "status": status
        })
    }

    #[tokio::test]
    async fn test_get_received_payment() {
        let (client, transport) = mock_client();
        transport.queue_json_response(
            200,
            &json!({
                "endToEndId": E2E,
                "txid": "fc9a4366ff3d4964b5dbc6c91a8722d3",
                "valor": "10.50",
                "chave": "pix@empresa.com.br",
                "horario": {"solicitacao": "2024-01-01T10:00:00Z", "liquidacao": "2024-01-01T10:00:01Z"}
            }),
        );

        let pix = client.pix().get(E2E).await.unwrap();
        assert_eq!(pix.end_to_end_id, E2E);
        assert_eq!(
            last_api_request(&transport).url,
            format!("{}/api/v2/pix/{}", BASE, E2E)
        );
    }

    #[tokio::test]
    async fn test_request_and_get_return() {
        let (client, transport) = mock_client();
        transport
            .queue_json_response(201, &devolucao_body("EM_PROCESSAMENTO"))
            .queue_json_response(200, &devolucao_body("DEVOLVIDO"));

        let request = DevolucaoRequest::new("5.00").with_descricao("Estorno");
        let created = client.pix().request_return(E2E, "D1", &request).await.unwrap();
        assert_eq!(created.status, DevolucaoStatus::EmProcessamento);

        let sent = last_api_request(&transport);
        assert_eq!(sent.method, HttpMethod::Put);
        assert_eq!(sent.url, format!("{}/api/v2/pix/{}/devolucao/D1", BASE, E2E));
        assert_eq!(body_json(&sent)["valor"], "5.00");

        let fetched = client.pix().get_return(E2E, "D1").await.unwrap();
        assert_eq!(fetched.status, DevolucaoStatus::Devolvido);
        assert_eq!(last_api_request(&transport).method, HttpMethod::Get);
    }

    #[tokio::test]
    async fn test_list_filters() {
        let (client, transport) = mock_client();
        transport.queue_json_response(
            200,
            &json!({"parametros": {"inicio": "a", "fim": "b"}, "pix": []}),
        );

        let mut params = ListPixParams::new("a", "b");
        params.tx_id_presente = Some(true);
        params.devolucao_presente = Some(false);
        client.pix().list(&params).await.unwrap();

        assert_eq!(
            last_api_request(&transport).url,
            format!(
                "{}/api/v2/pix?inicio=a&fim=b&txIdPresente=true&devolucaoPresente=false",
                BASE
            )
        );
    }

    #[tokio::test]
    async fn test_not_found_maps_problem_detail() {
        let (client, transport) = mock_client();
        transport.queue_json_response(
            404,
            &json!({
                "type": "https://pix.bcb.gov.br/api/v2/error/PixNaoEncontrado",
                "title": "Pix não encontrado",
                "status": 404,
                "detail": "Nenhum Pix encontrado para o e2eid informado."
            }),
        );

        match client.pix().get(E2E).await.unwrap_err() {
            PixError::Api(api) => {
                assert_eq!(api.status, 404);
                assert_eq!(
                    api.message(),
                    "Pix não encontrado: Nenhum Pix encontrado para o e2eid informado."
                );
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
