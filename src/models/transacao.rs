//! Transaction data models and API request/response types.
//!
//! This module defines:
//! - `TipoTransacao`: the income/expense discriminator and the balance-delta
//!   rules derived from it
//! - `Transacao`: database entity representing a transaction
//! - Request types for creating and patching transactions
//! - `TransacaoDetalhada`: response body with the owning account and category
//!   resolved

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::conta::TipoConta;

/// Transaction kind: income (`receita`) or expense (`despesa`).
///
/// The sign of a transaction's effect on its account balance derives entirely
/// from this discriminator; `valor_centavos` itself is always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "tipo_transacao", rename_all = "lowercase")]
pub enum TipoTransacao {
    /// Income: contributes `+valor` to the account balance
    Receita,
    /// Expense: contributes `-valor` to the account balance
    Despesa,
}

impl TipoTransacao {
    /// Signed effect this transaction kind applies to an account balance.
    ///
    /// `receita` contributes `+valor`, `despesa` contributes `-valor`.
    pub fn delta_centavos(self, valor_centavos: i64) -> i64 {
        match self {
            TipoTransacao::Receita => valor_centavos,
            TipoTransacao::Despesa => -valor_centavos,
        }
    }
}

/// Represents a transaction record from the database.
///
/// # Database Table
///
/// Maps to the `transacoes` table. Each transaction:
/// - Belongs to one user (via `usuario_id`)
/// - References exactly one account and one category
/// - Stores its amount in integer centavos (never floats)
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Transacao {
    /// Unique identifier for this transaction
    pub id: Uuid,

    /// Owning user
    ///
    /// Every query on `transacoes` filters by this column, so one user can
    /// never read or mutate another user's transactions.
    pub usuario_id: Uuid,

    /// Account whose balance this transaction affects
    pub conta_id: Uuid,

    /// Category this transaction is classified under
    pub categoria_id: Uuid,

    /// Human-readable description
    pub descricao: String,

    /// Amount in centavos, always positive
    ///
    /// The sign of the balance effect comes from `tipo`, never from the
    /// stored amount (enforced by a database CHECK constraint).
    pub valor_centavos: i64,

    /// When the transaction happened (user-supplied, not the insert time)
    pub data: DateTime<Utc>,

    /// Income or expense
    pub tipo: TipoTransacao,

    /// Timestamp when the record was created
    pub created_at: DateTime<Utc>,

    /// Timestamp of the last update
    pub updated_at: DateTime<Utc>,
}

impl Transacao {
    /// Signed effect this transaction currently applies to its account.
    pub fn delta_centavos(&self) -> i64 {
        self.tipo.delta_centavos(self.valor_centavos)
    }
}

/// Request body for creating a transaction.
///
/// # JSON Example
///
/// ```json
/// {
///   "conta": "550e8400-e29b-41d4-a716-446655440000",
///   "categoria": "660e8400-e29b-41d4-a716-446655440001",
///   "descricao": "Supermercado",
///   "valor_centavos": 3000,
///   "data": "2026-08-01T12:00:00Z",
///   "tipo": "despesa"
/// }
/// ```
///
/// # Validation
///
/// - `valor_centavos` must be positive
/// - `conta` must reference an account owned by the authenticated user
/// - `categoria` must reference an existing category
#[derive(Debug, Deserialize)]
pub struct CriarTransacaoRequest {
    /// Account to apply the transaction to
    pub conta: Uuid,

    /// Category the transaction is classified under
    pub categoria: Uuid,

    /// Description shown on statements
    pub descricao: String,

    /// Amount in centavos (must be positive)
    pub valor_centavos: i64,

    /// When the transaction happened
    pub data: DateTime<Utc>,

    /// Income or expense
    pub tipo: TipoTransacao,
}

/// Request body for patching a transaction.
///
/// Partial-patch semantics: omitted fields keep their stored values. The
/// account reference itself may change, in which case both the old and the
/// new account balances are reconciled.
#[derive(Debug, Default, Deserialize)]
pub struct AtualizarTransacaoRequest {
    pub conta: Option<Uuid>,
    pub categoria: Option<Uuid>,
    pub descricao: Option<String>,
    pub valor_centavos: Option<i64>,
    pub data: Option<DateTime<Utc>>,
    pub tipo: Option<TipoTransacao>,
}

/// Account summary embedded in a detailed transaction.
#[derive(Debug, Clone, Serialize)]
pub struct ContaResumo {
    pub id: Uuid,
    pub nome: String,
    pub tipo: TipoConta,
    pub saldo_centavos: i64,
}

/// Category summary embedded in a detailed transaction.
#[derive(Debug, Clone, Serialize)]
pub struct CategoriaResumo {
    pub id: Uuid,
    pub nome: String,
    pub tipo: TipoTransacao,
    pub subtipo: Option<String>,
}

/// Flat row produced by the list query's JOIN over accounts and categories.
///
/// sqlx maps the aliased columns (`conta_nome`, `categoria_nome`, ...) onto
/// this struct; [`TransacaoDetalhada`] is the nested shape clients receive.
#[derive(Debug, sqlx::FromRow)]
pub struct TransacaoComVinculos {
    pub id: Uuid,
    pub descricao: String,
    pub valor_centavos: i64,
    pub data: DateTime<Utc>,
    pub tipo: TipoTransacao,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    pub conta_id: Uuid,
    pub conta_nome: String,
    pub conta_tipo: TipoConta,
    pub conta_saldo_centavos: i64,

    pub categoria_id: Uuid,
    pub categoria_nome: String,
    pub categoria_tipo: TipoTransacao,
    pub categoria_subtipo: Option<String>,
}

/// Response body for the transaction list endpoint.
///
/// The owning account and category are resolved into nested objects, the way
/// the dashboard consumes them.
#[derive(Debug, Serialize)]
pub struct TransacaoDetalhada {
    pub id: Uuid,
    pub descricao: String,
    pub valor_centavos: i64,
    pub data: DateTime<Utc>,
    pub tipo: TipoTransacao,
    pub conta: ContaResumo,
    pub categoria: CategoriaResumo,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<TransacaoComVinculos> for TransacaoDetalhada {
    fn from(row: TransacaoComVinculos) -> Self {
        Self {
            id: row.id,
            descricao: row.descricao,
            valor_centavos: row.valor_centavos,
            data: row.data,
            tipo: row.tipo,
            conta: ContaResumo {
                id: row.conta_id,
                nome: row.conta_nome,
                tipo: row.conta_tipo,
                saldo_centavos: row.conta_saldo_centavos,
            },
            categoria: CategoriaResumo {
                id: row.categoria_id,
                nome: row.categoria_nome,
                tipo: row.categoria_tipo,
                subtipo: row.categoria_subtipo,
            },
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(TipoTransacao::Receita, 5000, 5000)]
    #[case(TipoTransacao::Despesa, 3000, -3000)]
    #[case(TipoTransacao::Receita, 0, 0)]
    fn delta_sign_follows_tipo(
        #[case] tipo: TipoTransacao,
        #[case] valor: i64,
        #[case] esperado: i64,
    ) {
        assert_eq!(tipo.delta_centavos(valor), esperado);
    }

    #[test]
    fn creating_receita_adds_and_despesa_subtracts() {
        // Account with balance B: receita of V yields B+V, despesa yields B-V
        let saldo = 10_000;
        assert_eq!(saldo + TipoTransacao::Receita.delta_centavos(2_500), 12_500);
        assert_eq!(saldo + TipoTransacao::Despesa.delta_centavos(2_500), 7_500);
    }

    #[test]
    fn deleting_applies_the_inverse_delta() {
        // Deletion restores the balance to its value before creation
        let saldo_inicial = 10_000;
        let delta = TipoTransacao::Despesa.delta_centavos(3_000);
        let saldo_apos_criar = saldo_inicial + delta;
        assert_eq!(saldo_apos_criar - delta, saldo_inicial);
    }

    #[test]
    fn update_reconciles_net_effect_only() {
        // Changing an expense of 100 into an expense of 50 must move the
        // balance by +50, not by another -50
        let saldo = 0;
        let antigo = TipoTransacao::Despesa.delta_centavos(10_000);
        let saldo = saldo + antigo;
        assert_eq!(saldo, -10_000);

        let novo = TipoTransacao::Despesa.delta_centavos(5_000);
        let saldo = saldo + (novo - antigo);
        assert_eq!(saldo, -5_000);
    }

    #[test]
    fn update_flipping_tipo_swings_twice_the_valor() {
        let antigo = TipoTransacao::Despesa.delta_centavos(4_000);
        let novo = TipoTransacao::Receita.delta_centavos(4_000);
        assert_eq!(novo - antigo, 8_000);
    }

    #[test]
    fn balance_scenario_from_one_hundred() {
        // balance 100.00 -> despesa 30.00 -> 70.00 -> receita 50.00 -> 120.00
        // -> delete the despesa -> 150.00
        let mut saldo = 10_000;

        let despesa = TipoTransacao::Despesa.delta_centavos(3_000);
        saldo += despesa;
        assert_eq!(saldo, 7_000);

        saldo += TipoTransacao::Receita.delta_centavos(5_000);
        assert_eq!(saldo, 12_000);

        saldo -= despesa;
        assert_eq!(saldo, 15_000);
    }

    #[test]
    fn tipo_serializes_to_lowercase_portuguese() {
        assert_eq!(
            serde_json::to_string(&TipoTransacao::Receita).unwrap(),
            "\"receita\""
        );
        assert_eq!(
            serde_json::to_string(&TipoTransacao::Despesa).unwrap(),
            "\"despesa\""
        );
    }

    #[test]
    fn unknown_tipo_fails_deserialization() {
        assert!(serde_json::from_str::<TipoTransacao>("\"transferencia\"").is_err());
    }

    #[test]
    fn create_request_parses_the_documented_body() {
        let body = r#"{
            "conta": "550e8400-e29b-41d4-a716-446655440000",
            "categoria": "660e8400-e29b-41d4-a716-446655440001",
            "descricao": "Supermercado",
            "valor_centavos": 3000,
            "data": "2026-08-01T12:00:00Z",
            "tipo": "despesa"
        }"#;

        let req: CriarTransacaoRequest = serde_json::from_str(body).unwrap();
        assert_eq!(req.descricao, "Supermercado");
        assert_eq!(req.valor_centavos, 3000);
        assert_eq!(req.tipo, TipoTransacao::Despesa);
    }

    #[test]
    fn patch_request_fields_are_all_optional() {
        let req: AtualizarTransacaoRequest = serde_json::from_str("{}").unwrap();
        assert!(req.conta.is_none());
        assert!(req.valor_centavos.is_none());
        assert!(req.tipo.is_none());
    }
}
