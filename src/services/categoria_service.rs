//! Category service - predefined-category provisioning and global CRUD.
//!
//! Categories are shared across users (no owner column). The predefined set
//! is provisioned by an idempotent upsert-by-name at user-registration time
//! rather than as ambient startup state.

use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use crate::{
    db::DbPool,
    error::AppError,
    models::Paginacao,
    models::categoria::{AtualizarCategoriaRequest, Categoria, CriarCategoriaRequest},
    models::transacao::TipoTransacao,
};

/// Predefined categories: `(nome, tipo, subtipo)`.
pub const CATEGORIAS_PREDEFINIDAS: [(&str, TipoTransacao, &str); 10] = [
    ("Alimentação", TipoTransacao::Despesa, "Essencial"),
    ("Moradia", TipoTransacao::Despesa, "Essencial"),
    ("Transporte", TipoTransacao::Despesa, "Essencial"),
    ("Saúde", TipoTransacao::Despesa, "Essencial"),
    ("Educação", TipoTransacao::Despesa, "Investimento"),
    ("Lazer", TipoTransacao::Despesa, "Não essencial"),
    ("Vestuário", TipoTransacao::Despesa, "Não essencial"),
    ("Salário", TipoTransacao::Receita, "Fixo"),
    ("Investimentos", TipoTransacao::Receita, "Variável"),
    ("Freelance", TipoTransacao::Receita, "Variável"),
];

/// Upsert the predefined categories by name.
///
/// Re-running re-applies the predefined `tipo`/`subtipo` to rows with the
/// same name and inserts any that are missing; it never duplicates. Runs
/// inside the caller's transaction (user provisioning).
pub async fn inicializar_categorias(tx: &mut Transaction<'_, Postgres>) -> Result<(), AppError> {
    for (nome, tipo, subtipo) in CATEGORIAS_PREDEFINIDAS {
        sqlx::query(
            r#"
            INSERT INTO categorias (nome, tipo, subtipo)
            VALUES ($1, $2, $3)
            ON CONFLICT (nome) DO UPDATE
            SET tipo = EXCLUDED.tipo, subtipo = EXCLUDED.subtipo
            "#,
        )
        .bind(nome)
        .bind(tipo)
        .bind(subtipo)
        .execute(&mut **tx)
        .await?;
    }

    Ok(())
}

/// List categories alphabetically, paginated.
pub async fn listar_categorias(
    pool: &DbPool,
    paginacao: Paginacao,
) -> Result<Vec<Categoria>, AppError> {
    let categorias = sqlx::query_as::<_, Categoria>(
        r#"
        SELECT id, nome, tipo, subtipo
        FROM categorias
        ORDER BY nome ASC
        LIMIT $1 OFFSET $2
        "#,
    )
    .bind(paginacao.limit())
    .bind(paginacao.offset())
    .fetch_all(pool)
    .await?;

    Ok(categorias)
}

/// Create a category.
pub async fn criar_categoria(
    pool: &DbPool,
    request: CriarCategoriaRequest,
) -> Result<Categoria, AppError> {
    let categoria = sqlx::query_as::<_, Categoria>(
        r#"
        INSERT INTO categorias (nome, tipo, subtipo)
        VALUES ($1, $2, $3)
        RETURNING id, nome, tipo, subtipo
        "#,
    )
    .bind(&request.nome)
    .bind(request.tipo)
    .bind(request.subtipo)
    .fetch_one(pool)
    .await
    .map_err(|err| match err.as_database_error() {
        Some(db) if db.is_unique_violation() => {
            AppError::RequisicaoInvalida("Já existe uma categoria com esse nome".to_string())
        }
        _ => AppError::Database(err),
    })?;

    Ok(categoria)
}

/// Patch a category. Omitted fields keep their stored values.
pub async fn atualizar_categoria(
    pool: &DbPool,
    categoria_id: Uuid,
    request: AtualizarCategoriaRequest,
) -> Result<Categoria, AppError> {
    let categoria = sqlx::query_as::<_, Categoria>(
        r#"
        UPDATE categorias
        SET nome = COALESCE($2, nome),
            tipo = COALESCE($3, tipo),
            subtipo = COALESCE($4, subtipo)
        WHERE id = $1
        RETURNING id, nome, tipo, subtipo
        "#,
    )
    .bind(categoria_id)
    .bind(request.nome)
    .bind(request.tipo)
    .bind(request.subtipo)
    .fetch_optional(pool)
    .await?
    .ok_or(AppError::CategoriaNaoEncontrada)?;

    Ok(categoria)
}

/// Delete a category.
///
/// Rejected with `CategoriaEmUso` while transactions reference it (same
/// referential-integrity policy as accounts).
pub async fn excluir_categoria(pool: &DbPool, categoria_id: Uuid) -> Result<(), AppError> {
    let em_uso: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM transacoes WHERE categoria_id = $1)")
            .bind(categoria_id)
            .fetch_one(pool)
            .await?;

    if em_uso {
        return Err(AppError::CategoriaEmUso);
    }

    let deleted = sqlx::query("DELETE FROM categorias WHERE id = $1")
        .bind(categoria_id)
        .execute(pool)
        .await
        .map_err(|err| match err.as_database_error() {
            Some(db) if db.is_foreign_key_violation() => AppError::CategoriaEmUso,
            _ => AppError::Database(err),
        })?
        .rows_affected();

    if deleted == 0 {
        return Err(AppError::CategoriaNaoEncontrada);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::CATEGORIAS_PREDEFINIDAS;
    use crate::models::transacao::TipoTransacao;
    use std::collections::HashSet;

    #[test]
    fn predefined_names_are_unique() {
        let nomes: HashSet<_> = CATEGORIAS_PREDEFINIDAS
            .iter()
            .map(|(nome, _, _)| *nome)
            .collect();
        assert_eq!(nomes.len(), CATEGORIAS_PREDEFINIDAS.len());
    }

    #[test]
    fn predefined_set_covers_both_tipos() {
        let receitas = CATEGORIAS_PREDEFINIDAS
            .iter()
            .filter(|(_, tipo, _)| *tipo == TipoTransacao::Receita)
            .count();
        assert_eq!(receitas, 3);
        assert_eq!(CATEGORIAS_PREDEFINIDAS.len() - receitas, 7);
    }
}
