//! Transaction service - the ledger enforcing the balance invariant.
//!
//! Every mutation here keeps one property true: an account's
//! `saldo_centavos` equals the sum of signed effects of all its live
//! transactions (receita `+valor`, despesa `-valor`).
//!
//! # Atomicity Guarantees
//!
//! The transaction row write and the balance adjustment always happen inside
//! the same PostgreSQL transaction: both commit or neither does. Balance
//! adjustments are server-side increments (`saldo = saldo + delta`), so
//! concurrent mutations against the same account serialize at the row and
//! never lose an update.
//!
//! # Ownership
//!
//! Every query carries `usuario_id`. A transaction or account that exists but
//! belongs to someone else is indistinguishable from one that doesn't exist.

use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use crate::{
    db::DbPool,
    error::AppError,
    models::Paginacao,
    models::transacao::{
        AtualizarTransacaoRequest, CriarTransacaoRequest, Transacao, TransacaoComVinculos,
        TransacaoDetalhada,
    },
    services::conta_service,
};

/// Reject non-positive amounts.
///
/// The sign of a transaction's effect comes from `tipo` alone; a zero or
/// negative `valor_centavos` has no meaning. Backed by a database CHECK
/// constraint.
fn validar_valor(valor_centavos: i64) -> Result<(), AppError> {
    if valor_centavos <= 0 {
        return Err(AppError::RequisicaoInvalida(
            "O valor da transação deve ser positivo".to_string(),
        ));
    }
    Ok(())
}

/// Lock an account row and verify it belongs to the user.
///
/// `FOR UPDATE` holds the row until the surrounding transaction commits, so
/// the account cannot be deleted out from under the pending balance
/// adjustment.
async fn travar_conta_do_usuario(
    tx: &mut Transaction<'_, Postgres>,
    conta_id: Uuid,
    usuario_id: Uuid,
) -> Result<(), AppError> {
    sqlx::query_scalar::<_, Uuid>(
        "SELECT id FROM contas WHERE id = $1 AND usuario_id = $2 FOR UPDATE",
    )
    .bind(conta_id)
    .bind(usuario_id)
    .fetch_optional(&mut **tx)
    .await?
    .ok_or(AppError::ContaNaoEncontrada)?;

    Ok(())
}

/// Verify a category exists.
///
/// Categories are global, so there is no ownership filter here.
async fn verificar_categoria(
    tx: &mut Transaction<'_, Postgres>,
    categoria_id: Uuid,
) -> Result<(), AppError> {
    let existe: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM categorias WHERE id = $1)")
            .bind(categoria_id)
            .fetch_one(&mut **tx)
            .await?;

    if !existe {
        return Err(AppError::CategoriaNaoEncontrada);
    }

    Ok(())
}

/// List a user's transactions, newest first, with account and category
/// resolved.
///
/// Ordering is `data DESC` with `id DESC` as a tiebreak so pagination is
/// deterministic even when several transactions share a date.
pub async fn listar_transacoes(
    pool: &DbPool,
    usuario_id: Uuid,
    paginacao: Paginacao,
) -> Result<Vec<TransacaoDetalhada>, AppError> {
    let linhas = sqlx::query_as::<_, TransacaoComVinculos>(
        r#"
        SELECT t.id, t.descricao, t.valor_centavos, t.data, t.tipo,
               t.created_at, t.updated_at,
               c.id   AS conta_id,
               c.nome AS conta_nome,
               c.tipo AS conta_tipo,
               c.saldo_centavos AS conta_saldo_centavos,
               cat.id   AS categoria_id,
               cat.nome AS categoria_nome,
               cat.tipo AS categoria_tipo,
               cat.subtipo AS categoria_subtipo
        FROM transacoes t
        JOIN contas c ON c.id = t.conta_id
        JOIN categorias cat ON cat.id = t.categoria_id
        WHERE t.usuario_id = $1
        ORDER BY t.data DESC, t.id DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(usuario_id)
    .bind(paginacao.limit())
    .bind(paginacao.offset())
    .fetch_all(pool)
    .await?;

    Ok(linhas.into_iter().map(Into::into).collect())
}

/// Create a transaction and apply its effect to the account balance.
///
/// # Process
///
/// 1. Validate the amount
/// 2. Start a database transaction
/// 3. Lock the account, verifying ownership
/// 4. Verify the category exists
/// 5. Insert the transaction row
/// 6. Apply `delta = tipo == receita ? +valor : -valor` to the balance
/// 7. Commit (or roll back on any error)
///
/// # Errors
///
/// - `RequisicaoInvalida`: amount is zero or negative
/// - `ContaNaoEncontrada`: account missing or owned by someone else
/// - `CategoriaNaoEncontrada`: category missing
pub async fn criar_transacao(
    pool: &DbPool,
    usuario_id: Uuid,
    request: CriarTransacaoRequest,
) -> Result<Transacao, AppError> {
    validar_valor(request.valor_centavos)?;

    let mut tx = pool.begin().await?;

    travar_conta_do_usuario(&mut tx, request.conta, usuario_id).await?;
    verificar_categoria(&mut tx, request.categoria).await?;

    let transacao = sqlx::query_as::<_, Transacao>(
        r#"
        INSERT INTO transacoes (usuario_id, conta_id, categoria_id, descricao,
                                valor_centavos, data, tipo)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id, usuario_id, conta_id, categoria_id, descricao,
                  valor_centavos, data, tipo, created_at, updated_at
        "#,
    )
    .bind(usuario_id)
    .bind(request.conta)
    .bind(request.categoria)
    .bind(&request.descricao)
    .bind(request.valor_centavos)
    .bind(request.data)
    .bind(request.tipo)
    .fetch_one(&mut *tx)
    .await?;

    conta_service::ajustar_saldo(&mut *tx, transacao.conta_id, transacao.delta_centavos()).await?;

    // Row write and balance adjustment commit together
    tx.commit().await?;

    Ok(transacao)
}

/// Patch a transaction and reconcile the balance effect.
///
/// Partial-patch semantics: omitted fields keep their stored values.
///
/// The stored row is read first (under `FOR UPDATE`, scoped to the owner) so
/// the *old* effect can be subtracted before the new one is applied. The net
/// adjustment is `new_delta - old_delta`; an update that changes an expense
/// of 100 into one of 50 therefore moves the balance by +50 rather than
/// applying another -50.
///
/// The account reference may change. In that case the old account receives
/// `-old_delta`, the new account (ownership re-verified) receives
/// `+new_delta`, all inside the same SQL transaction.
pub async fn atualizar_transacao(
    pool: &DbPool,
    usuario_id: Uuid,
    transacao_id: Uuid,
    request: AtualizarTransacaoRequest,
) -> Result<Transacao, AppError> {
    let mut tx = pool.begin().await?;

    let atual = sqlx::query_as::<_, Transacao>(
        r#"
        SELECT id, usuario_id, conta_id, categoria_id, descricao,
               valor_centavos, data, tipo, created_at, updated_at
        FROM transacoes
        WHERE id = $1 AND usuario_id = $2
        FOR UPDATE
        "#,
    )
    .bind(transacao_id)
    .bind(usuario_id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or(AppError::TransacaoNaoEncontrada)?;

    let delta_antigo = atual.delta_centavos();

    // Merge the patch over the stored values
    let conta_id = request.conta.unwrap_or(atual.conta_id);
    let categoria_id = request.categoria.unwrap_or(atual.categoria_id);
    let descricao = request.descricao.unwrap_or(atual.descricao);
    let valor_centavos = request.valor_centavos.unwrap_or(atual.valor_centavos);
    let data = request.data.unwrap_or(atual.data);
    let tipo = request.tipo.unwrap_or(atual.tipo);

    validar_valor(valor_centavos)?;

    if conta_id != atual.conta_id {
        travar_conta_do_usuario(&mut tx, conta_id, usuario_id).await?;
    }
    if categoria_id != atual.categoria_id {
        verificar_categoria(&mut tx, categoria_id).await?;
    }

    let transacao = sqlx::query_as::<_, Transacao>(
        r#"
        UPDATE transacoes
        SET conta_id = $2, categoria_id = $3, descricao = $4,
            valor_centavos = $5, data = $6, tipo = $7, updated_at = NOW()
        WHERE id = $1
        RETURNING id, usuario_id, conta_id, categoria_id, descricao,
                  valor_centavos, data, tipo, created_at, updated_at
        "#,
    )
    .bind(transacao_id)
    .bind(conta_id)
    .bind(categoria_id)
    .bind(&descricao)
    .bind(valor_centavos)
    .bind(data)
    .bind(tipo)
    .fetch_one(&mut *tx)
    .await?;

    let delta_novo = transacao.delta_centavos();

    if conta_id == atual.conta_id {
        let ajuste = delta_novo - delta_antigo;
        if ajuste != 0 {
            conta_service::ajustar_saldo(&mut *tx, conta_id, ajuste).await?;
        }
    } else {
        // Undo on the old account, apply on the new one
        conta_service::ajustar_saldo(&mut *tx, atual.conta_id, -delta_antigo).await?;
        conta_service::ajustar_saldo(&mut *tx, conta_id, delta_novo).await?;
    }

    tx.commit().await?;

    Ok(transacao)
}

/// Delete a transaction and undo its effect on the account balance.
///
/// After the commit, the balance is as if the transaction had never existed.
pub async fn deletar_transacao(
    pool: &DbPool,
    usuario_id: Uuid,
    transacao_id: Uuid,
) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;

    let transacao = sqlx::query_as::<_, Transacao>(
        r#"
        SELECT id, usuario_id, conta_id, categoria_id, descricao,
               valor_centavos, data, tipo, created_at, updated_at
        FROM transacoes
        WHERE id = $1 AND usuario_id = $2
        FOR UPDATE
        "#,
    )
    .bind(transacao_id)
    .bind(usuario_id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or(AppError::TransacaoNaoEncontrada)?;

    sqlx::query("DELETE FROM transacoes WHERE id = $1")
        .bind(transacao.id)
        .execute(&mut *tx)
        .await?;

    // Inverse of the original delta restores the pre-creation balance
    conta_service::ajustar_saldo(&mut *tx, transacao.conta_id, -transacao.delta_centavos())
        .await?;

    tx.commit().await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::validar_valor;
    use crate::error::AppError;
    use rstest::rstest;

    #[rstest]
    #[case(1)]
    #[case(3000)]
    #[case(i64::MAX)]
    fn positive_valores_pass(#[case] valor: i64) {
        assert!(validar_valor(valor).is_ok());
    }

    #[rstest]
    #[case(0)]
    #[case(-1)]
    #[case(i64::MIN)]
    fn non_positive_valores_are_rejected(#[case] valor: i64) {
        assert!(matches!(
            validar_valor(valor),
            Err(AppError::RequisicaoInvalida(_))
        ));
    }
}
