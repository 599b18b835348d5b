//! Account data models and API request/response types.
//!
//! This module defines:
//! - `Conta`: database entity representing a financial account
//! - `CriarContaRequest` / `AtualizarContaRequest`: request bodies
//! - `ContaResponse`: response body returned to clients

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Account kind, a closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "tipo_conta", rename_all = "lowercase")]
pub enum TipoConta {
    /// Checking account
    Corrente,
    /// Savings account
    Poupanca,
    /// Investment account
    Investimento,
}

/// Represents an account record from the database.
///
/// # Database Table
///
/// Maps to the `contas` table. Each account:
/// - Belongs to one user (via `usuario_id`)
/// - Has a balance stored in integer centavos (to avoid floating-point errors)
///
/// # Balance Invariant
///
/// `saldo_centavos` tracks the sum of signed effects of every live
/// transaction targeting this account: receita contributes `+valor`, despesa
/// contributes `-valor`. The only legitimate writers are the transaction
/// service (atomic adjustments inside SQL transactions) and the account's own
/// PUT endpoint (direct replacement, which deliberately bypasses the
/// invariant).
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Conta {
    /// Unique identifier for this account
    pub id: Uuid,

    /// Owning user
    ///
    /// Every query on `contas` filters by this column so one user can never
    /// see or mutate another user's accounts.
    pub usuario_id: Uuid,

    /// Human-readable name, unique per user
    pub nome: String,

    /// Current balance in centavos (may be negative)
    pub saldo_centavos: i64,

    /// Account kind
    pub tipo: TipoConta,

    /// Reference date for the account (user-facing, defaults to creation)
    pub data: DateTime<Utc>,

    /// Timestamp when the account was created
    pub created_at: DateTime<Utc>,

    /// Timestamp of the last update (field edit or balance adjustment)
    pub updated_at: DateTime<Utc>,
}

/// Request body for creating a new account.
///
/// # JSON Example
///
/// ```json
/// {
///   "nome": "Carteira",
///   "tipo": "corrente",
///   "saldo_centavos": 0
/// }
/// ```
#[derive(Debug, Deserialize)]
pub struct CriarContaRequest {
    /// Name for the new account
    pub nome: String,

    /// Account kind
    pub tipo: TipoConta,

    /// Initial balance in centavos (defaults to 0 if not provided)
    #[serde(default)]
    pub saldo_centavos: i64,

    /// Reference date (defaults to now if not provided)
    pub data: Option<DateTime<Utc>>,
}

/// Request body for patching an account.
///
/// Partial-patch semantics: omitted fields keep their stored values.
///
/// Supplying `saldo_centavos` replaces the balance directly without going
/// through the transaction ledger; the invariant is then the caller's
/// responsibility.
#[derive(Debug, Default, Deserialize)]
pub struct AtualizarContaRequest {
    pub nome: Option<String>,
    pub tipo: Option<TipoConta>,
    pub saldo_centavos: Option<i64>,
    pub data: Option<DateTime<Utc>>,
}

/// Response body for account endpoints.
///
/// Strips the internal `usuario_id` field.
#[derive(Debug, Serialize)]
pub struct ContaResponse {
    pub id: Uuid,
    pub nome: String,
    pub saldo_centavos: i64,
    pub tipo: TipoConta,
    pub data: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Conta> for ContaResponse {
    fn from(conta: Conta) -> Self {
        Self {
            id: conta.id,
            nome: conta.nome,
            saldo_centavos: conta.saldo_centavos,
            tipo: conta.tipo,
            data: conta.data,
            created_at: conta.created_at,
            updated_at: conta.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tipo_conta_serializes_to_lowercase() {
        assert_eq!(
            serde_json::to_string(&TipoConta::Corrente).unwrap(),
            "\"corrente\""
        );
        assert_eq!(
            serde_json::to_string(&TipoConta::Poupanca).unwrap(),
            "\"poupanca\""
        );
        assert_eq!(
            serde_json::to_string(&TipoConta::Investimento).unwrap(),
            "\"investimento\""
        );
    }

    #[test]
    fn create_request_defaults_saldo_to_zero() {
        let req: CriarContaRequest =
            serde_json::from_str(r#"{"nome": "Carteira", "tipo": "corrente"}"#).unwrap();
        assert_eq!(req.saldo_centavos, 0);
        assert!(req.data.is_none());
    }

    #[test]
    fn unknown_tipo_conta_fails_deserialization() {
        assert!(serde_json::from_str::<TipoConta>("\"cripto\"").is_err());
    }
}
