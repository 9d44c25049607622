//! Query string parameters for list endpoints.

use crate::types::PaginacaoParams;

/// Ordered query parameters. Absent values are simply never pushed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl ToString) -> &mut Self {
        self.pairs.push((key.into(), value.to_string()));
        self
    }

    /// Push only when `value` is present.
    pub fn push_opt<V: ToString>(&mut self, key: impl Into<String>, value: Option<V>) -> &mut Self {
        if let Some(value) = value {
            self.push(key, value);
        }
        self
    }

    /// Push `paginacao.paginaAtual` / `paginacao.itensPorPagina`.
    pub fn paginacao(&mut self, paginacao: Option<&PaginacaoParams>) -> &mut Self {
        if let Some(p) = paginacao {
            self.push_opt("paginacao.paginaAtual", p.pagina_atual);
            self.push_opt("paginacao.itensPorPagina", p.itens_por_pagina);
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_values_are_skipped() {
        let mut query = QueryParams::new();
        query
            .push("inicio", "2024-01-01T00:00:00Z")
            .push_opt("cpf", None::<String>)
            .push_opt("locationPresente", Some(true))
            .paginacao(Some(&PaginacaoParams {
                pagina_atual: Some(2),
                itens_por_pagina: None,
            }));

        let pairs: Vec<_> = query.iter().collect();
        assert_eq!(
            pairs,
            vec![
                ("inicio", "2024-01-01T00:00:00Z"),
                ("locationPresente", "true"),
                ("paginacao.paginaAtual", "2"),
            ]
        );
    }
}
