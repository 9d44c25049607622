//! Webhook callback parsing through the public API.

use sicredi_pix::{parse_webhook_payload, DevolucaoStatus};

#[test]
fn test_callback_with_returns() {
    let body = r#"{
        "pix": [
            {
                "endToEndId": "E12345678202401011000abcdefghijk",
                "txid": "7978c0c97ea847e78e8849634473c1f1",
                "chave": "pix@empresa.com.br",
                "valor": "110.00",
                "horario": "2024-01-01T10:00:00.000Z",
                "pagador": {"cpf": "52998224725", "nome": "Fulano de Tal"},
                "devolucoes": [
                    {
                        "id": "D1",
                        "rtrId": "D12345678202401011000abcdefghijk",
                        "valor": "10.00",
                        "horario": {"solicitacao": "2024-01-01T11:00:00.000Z"},
                        "status": "DEVOLVIDO"
                    }
                ]
            }
        ]
    }"#;

    let result = parse_webhook_payload(body);
    assert!(result.valid, "{:?}", result.error);

    let payload = result.payload.unwrap();
    let entry = &payload.pix[0];
    assert_eq!(entry.txid.as_deref(), Some("7978c0c97ea847e78e8849634473c1f1"));
    assert_eq!(entry.pagador.as_ref().unwrap().nome, "Fulano de Tal");
    assert_eq!(entry.devolucoes[0].status, DevolucaoStatus::Devolvido);
}

#[test]
fn test_second_entry_missing_horario() {
    let body = r#"{"pix": [
        {"endToEndId": "E1", "chave": "k", "valor": "1.00", "horario": "2024-01-01T10:00:00Z"},
        {"endToEndId": "E2", "chave": "k", "valor": "2.00"}
    ]}"#;

    let result = parse_webhook_payload(body);
    assert!(!result.valid);
    assert_eq!(result.error.as_deref(), Some("pix[1].horario is required"));
}
