//! Account service - persistence and the balance-adjustment primitive.
//!
//! Besides plain CRUD, this service owns `ajustar_saldo`: the single
//! legitimate way the transaction service mutates an account balance. The
//! adjustment is an atomic server-side increment
//! (`saldo_centavos = saldo_centavos + delta`), so concurrent adjustments on
//! the same account serialize at the row and never lose an update.

use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use crate::{
    db::DbPool,
    error::AppError,
    models::conta::{AtualizarContaRequest, Conta, CriarContaRequest, TipoConta},
};

/// Accounts provisioned for every new user.
pub const CONTAS_PADRAO: [(&str, TipoConta); 3] = [
    ("Conta Corrente", TipoConta::Corrente),
    ("Poupança", TipoConta::Poupanca),
    ("Investimentos", TipoConta::Investimento),
];

/// Provision the default accounts for a user.
///
/// Idempotent upsert-by-name: `(usuario_id, nome)` is unique, so re-running
/// (or a retried registration) never duplicates accounts nor resets balances.
/// Runs inside the caller's transaction so provisioning commits together with
/// the user row.
pub async fn inicializar_contas_padrao(
    tx: &mut Transaction<'_, Postgres>,
    usuario_id: Uuid,
) -> Result<(), AppError> {
    for (nome, tipo) in CONTAS_PADRAO {
        sqlx::query(
            r#"
            INSERT INTO contas (usuario_id, nome, tipo, saldo_centavos)
            VALUES ($1, $2, $3, 0)
            ON CONFLICT (usuario_id, nome) DO NOTHING
            "#,
        )
        .bind(usuario_id)
        .bind(nome)
        .bind(tipo)
        .execute(&mut **tx)
        .await?;
    }

    Ok(())
}

/// List all accounts belonging to a user, newest first.
pub async fn listar_contas(pool: &DbPool, usuario_id: Uuid) -> Result<Vec<Conta>, AppError> {
    let contas = sqlx::query_as::<_, Conta>(
        r#"
        SELECT id, usuario_id, nome, saldo_centavos, tipo, data, created_at, updated_at
        FROM contas
        WHERE usuario_id = $1
        ORDER BY created_at DESC, nome ASC
        "#,
    )
    .bind(usuario_id)
    .fetch_all(pool)
    .await?;

    Ok(contas)
}

/// Create an account for a user.
///
/// `saldo_centavos` defaults to 0 and `data` to now when the request omits
/// them.
pub async fn criar_conta(
    pool: &DbPool,
    usuario_id: Uuid,
    request: CriarContaRequest,
) -> Result<Conta, AppError> {
    let conta = sqlx::query_as::<_, Conta>(
        r#"
        INSERT INTO contas (usuario_id, nome, tipo, saldo_centavos, data)
        VALUES ($1, $2, $3, $4, COALESCE($5, NOW()))
        RETURNING id, usuario_id, nome, saldo_centavos, tipo, data, created_at, updated_at
        "#,
    )
    .bind(usuario_id)
    .bind(&request.nome)
    .bind(request.tipo)
    .bind(request.saldo_centavos)
    .bind(request.data)
    .fetch_one(pool)
    .await
    .map_err(|err| match err.as_database_error() {
        Some(db) if db.is_unique_violation() => {
            AppError::RequisicaoInvalida("Já existe uma conta com esse nome".to_string())
        }
        _ => AppError::Database(err),
    })?;

    Ok(conta)
}

/// Apply a signed delta to an account balance.
///
/// This is the only write path the transaction service uses against
/// `contas`. The increment happens server-side in a single statement, so two
/// concurrent adjustments can interleave arbitrarily and still both land.
///
/// Generic over the executor so it can join a caller's SQL transaction.
///
/// # Errors
///
/// `ContaNaoEncontrada` if no row matched (account deleted concurrently).
pub async fn ajustar_saldo<'e, E>(
    executor: E,
    conta_id: Uuid,
    delta_centavos: i64,
) -> Result<(), AppError>
where
    E: sqlx::PgExecutor<'e>,
{
    let updated = sqlx::query(
        r#"
        UPDATE contas
        SET saldo_centavos = saldo_centavos + $1,
            updated_at = NOW()
        WHERE id = $2
        "#,
    )
    .bind(delta_centavos)
    .bind(conta_id)
    .execute(executor)
    .await?
    .rows_affected();

    if updated == 0 {
        return Err(AppError::ContaNaoEncontrada);
    }

    Ok(())
}

/// Patch an account's fields, scoped to the owner.
///
/// Omitted fields keep their stored values. A supplied `saldo_centavos`
/// replaces the balance directly without going through `ajustar_saldo`; the
/// ledger invariant is then the caller's responsibility.
pub async fn atualizar_conta(
    pool: &DbPool,
    usuario_id: Uuid,
    conta_id: Uuid,
    request: AtualizarContaRequest,
) -> Result<Conta, AppError> {
    let conta = sqlx::query_as::<_, Conta>(
        r#"
        UPDATE contas
        SET nome = COALESCE($3, nome),
            tipo = COALESCE($4, tipo),
            saldo_centavos = COALESCE($5, saldo_centavos),
            data = COALESCE($6, data),
            updated_at = NOW()
        WHERE id = $1 AND usuario_id = $2
        RETURNING id, usuario_id, nome, saldo_centavos, tipo, data, created_at, updated_at
        "#,
    )
    .bind(conta_id)
    .bind(usuario_id)
    .bind(request.nome)
    .bind(request.tipo)
    .bind(request.saldo_centavos)
    .bind(request.data)
    .fetch_optional(pool)
    .await?
    .ok_or(AppError::ContaNaoEncontrada)?;

    Ok(conta)
}

/// Delete an account, scoped to the owner.
///
/// Rejected with `ContaEmUso` while transactions still reference the account;
/// deleting it would orphan them and silently break the balance invariant.
/// The `ON DELETE RESTRICT` foreign key backs this check against races.
pub async fn deletar_conta(
    pool: &DbPool,
    usuario_id: Uuid,
    conta_id: Uuid,
) -> Result<(), AppError> {
    let em_uso: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM transacoes WHERE conta_id = $1)")
            .bind(conta_id)
            .fetch_one(pool)
            .await?;

    if em_uso {
        return Err(AppError::ContaEmUso);
    }

    let deleted = sqlx::query("DELETE FROM contas WHERE id = $1 AND usuario_id = $2")
        .bind(conta_id)
        .bind(usuario_id)
        .execute(pool)
        .await
        .map_err(|err| match err.as_database_error() {
            // A transaction slipped in between the check and the delete
            Some(db) if db.is_foreign_key_violation() => AppError::ContaEmUso,
            _ => AppError::Database(err),
        })?
        .rows_affected();

    if deleted == 0 {
        return Err(AppError::ContaNaoEncontrada);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::CONTAS_PADRAO;
    use std::collections::HashSet;

    #[test]
    fn default_accounts_have_unique_names() {
        // Uniqueness is what makes provisioning an idempotent upsert-by-name
        let nomes: HashSet<_> = CONTAS_PADRAO.iter().map(|(nome, _)| *nome).collect();
        assert_eq!(nomes.len(), CONTAS_PADRAO.len());
    }

    #[test]
    fn three_default_accounts_are_provisioned() {
        assert_eq!(CONTAS_PADRAO.len(), 3);
    }
}
