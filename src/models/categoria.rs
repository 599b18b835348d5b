//! Category data models and API request/response types.
//!
//! Categories are global (shared across users): there is no owner column and
//! no ownership filter. Transactions validate category existence on every
//! write.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::transacao::TipoTransacao;

/// Represents a category record from the database.
///
/// Maps to the `categorias` table. `nome` is unique, which is what makes the
/// default-category provisioning an idempotent upsert-by-name.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Categoria {
    /// Unique identifier for this category
    pub id: Uuid,

    /// Display name, unique across the table
    pub nome: String,

    /// Whether transactions under this category are income or expense
    pub tipo: TipoTransacao,

    /// Free-form sub-classification (e.g. "Essencial", "Fixo")
    pub subtipo: Option<String>,
}

/// Request body for creating a category.
#[derive(Debug, Deserialize)]
pub struct CriarCategoriaRequest {
    pub nome: String,
    pub tipo: TipoTransacao,
    pub subtipo: Option<String>,
}

/// Request body for patching a category. Omitted fields keep their values.
#[derive(Debug, Default, Deserialize)]
pub struct AtualizarCategoriaRequest {
    pub nome: Option<String>,
    pub tipo: Option<TipoTransacao>,
    pub subtipo: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categoria_serializes_with_portuguese_fields() {
        let categoria = Categoria {
            id: Uuid::nil(),
            nome: "Alimentação".to_string(),
            tipo: TipoTransacao::Despesa,
            subtipo: Some("Essencial".to_string()),
        };

        let json = serde_json::to_value(&categoria).unwrap();
        assert_eq!(json["nome"], "Alimentação");
        assert_eq!(json["tipo"], "despesa");
        assert_eq!(json["subtipo"], "Essencial");
    }
}
