//! Bacen problem-detail document returned on 4xx/5xx.

use serde::{Deserialize, Serialize};

/// Field-level violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub razao: String,
    pub propriedade: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemDetail {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_uri: Option<String>,
    pub title: String,
    #[serde(default)]
    pub status: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub violacoes: Vec<Violation>,
}

impl ProblemDetail {
    /// Read a problem document from a JSON value.
    ///
    /// Only a JSON object with a string `title` qualifies. Malformed optional
    /// fields are dropped rather than rejecting the whole document.
    pub fn from_value(value: &serde_json::Value) -> Option<Self> {
        let object = value.as_object()?;
        let title = object.get("title")?.as_str()?.to_string();
        let text = |key: &str| object.get(key).and_then(|v| v.as_str()).map(str::to_string);

        let violacoes = object
            .get("violacoes")
            .and_then(|v| serde_json::from_value::<Vec<Violation>>(v.clone()).ok())
            .unwrap_or_default();

        Some(Self {
            type_uri: text("type"),
            title,
            status: object
                .get("status")
                .and_then(|v| v.as_u64())
                .and_then(|s| u16::try_from(s).ok())
                .unwrap_or_default(),
            detail: text("detail"),
            instance: text("instance"),
            violacoes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value_requires_string_title() {
        assert!(ProblemDetail::from_value(&json!({"title": 5})).is_none());
        assert!(ProblemDetail::from_value(&json!(["title"])).is_none());

        let problem =
            ProblemDetail::from_value(&json!({"title": "Nao encontrado", "status": 404, "violacoes": "x"}))
                .unwrap();
        assert_eq!(problem.status, 404);
        assert!(problem.violacoes.is_empty());
    }
}
