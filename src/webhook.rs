//! Inbound webhook callback parsing.
//!
//! Sicredi appends `/pix` to the configured webhook URL, so a webhook
//! configured as `https://example.com/webhook` is called at
//! `https://example.com/webhook/pix`. The server receiving it is the
//! integrator's; this module only validates the body.

use serde_json::Value;
use tracing::debug;

use crate::types::WebhookCallbackPayload;

/// Outcome of parsing a callback body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookParseResult {
    pub valid: bool,
    pub payload: Option<WebhookCallbackPayload>,
    pub error: Option<String>,
}

impl WebhookParseResult {
    fn ok(payload: WebhookCallbackPayload) -> Self {
        Self {
            valid: true,
            payload: Some(payload),
            error: None,
        }
    }

    fn invalid(error: impl Into<String>) -> Self {
        let error = error.into();
        debug!(error = %error, "rejected webhook payload");
        Self {
            valid: false,
            payload: None,
            error: Some(error),
        }
    }

    /// Convert into a `Result`, keeping the error message.
    pub fn into_result(self) -> Result<WebhookCallbackPayload, String> {
        match (self.payload, self.error) {
            (Some(payload), _) => Ok(payload),
            (None, error) => Err(error.unwrap_or_default()),
        }
    }
}

/// Parse a raw callback body.
pub fn parse_webhook_payload(body: &str) -> WebhookParseResult {
    match serde_json::from_str::<Value>(body) {
        Ok(value) => parse_webhook_value(&value),
        Err(_) => WebhookParseResult::invalid("Invalid JSON body"),
    }
}

/// Parse a callback body already decoded as JSON.
///
/// Every `pix` entry must carry string `endToEndId`, `chave`, `valor` and
/// `horario` fields. The first violation is reported.
pub fn parse_webhook_value(value: &Value) -> WebhookParseResult {
    if !is_structured(value) {
        return WebhookParseResult::invalid("Body is not an object");
    }

    let entries = match value.get("pix").and_then(Value::as_array) {
        Some(entries) => entries,
        None => {
            return WebhookParseResult::invalid("Missing or invalid \"pix\" array in payload")
        }
    };

    for (i, entry) in entries.iter().enumerate() {
        if !is_structured(entry) {
            return WebhookParseResult::invalid(format!("pix[{}] is not an object", i));
        }
        for field in ["endToEndId", "chave", "valor", "horario"] {
            if !entry.get(field).map(Value::is_string).unwrap_or(false) {
                return WebhookParseResult::invalid(format!("pix[{}].{} is required", i, field));
            }
        }
    }

    match serde_json::from_value::<WebhookCallbackPayload>(value.clone()) {
        Ok(payload) => WebhookParseResult::ok(payload),
        Err(e) => WebhookParseResult::invalid(format!("Invalid payload: {}", e)),
    }
}

/// Objects and arrays both count as structured values.
fn is_structured(value: &Value) -> bool {
    value.is_object() || value.is_array()
}
