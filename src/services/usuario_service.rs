//! User service - registration, login, and profile lookup.
//!
//! Registration provisions the user's default accounts and the predefined
//! categories in the same database transaction as the user row, so a user
//! never exists half-provisioned.

use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use crate::{
    auth,
    db::DbPool,
    error::AppError,
    models::usuario::{LoginRequest, LoginResponse, RegistrarRequest, Usuario, UsuarioResponse},
    services::{categoria_service, conta_service},
};

/// Register a new user.
///
/// # Process
///
/// 1. Validate required fields
/// 2. bcrypt-hash the password (outside the transaction; it is CPU work)
/// 3. Insert the user, provision default accounts and categories, commit
///
/// # Errors
///
/// - `RequisicaoInvalida`: missing nome/email/senha
/// - `EmailEmUso`: email already registered
pub async fn registrar(
    pool: &DbPool,
    request: RegistrarRequest,
) -> Result<UsuarioResponse, AppError> {
    if request.nome.trim().is_empty()
        || request.email.trim().is_empty()
        || request.senha.is_empty()
    {
        return Err(AppError::RequisicaoInvalida(
            "Campos obrigatórios: nome, email, senha".to_string(),
        ));
    }

    let senha_hash = auth::hash_senha(&request.senha)?;

    let mut tx = pool.begin().await?;

    let usuario = inserir_usuario(&mut tx, &request.nome, &request.email, &senha_hash).await?;

    conta_service::inicializar_contas_padrao(&mut tx, usuario.id).await?;
    categoria_service::inicializar_categorias(&mut tx).await?;

    tx.commit().await?;

    tracing::info!(usuario_id = %usuario.id, "new user registered, defaults provisioned");

    Ok(usuario.into())
}

async fn inserir_usuario(
    tx: &mut Transaction<'_, Postgres>,
    nome: &str,
    email: &str,
    senha_hash: &str,
) -> Result<Usuario, AppError> {
    sqlx::query_as::<_, Usuario>(
        r#"
        INSERT INTO usuarios (nome, email, senha_hash)
        VALUES ($1, $2, $3)
        RETURNING id, nome, email, senha_hash, created_at, updated_at
        "#,
    )
    .bind(nome)
    .bind(email)
    .bind(senha_hash)
    .fetch_one(&mut **tx)
    .await
    .map_err(|err| match err.as_database_error() {
        Some(db) if db.is_unique_violation() => AppError::EmailEmUso,
        _ => AppError::Database(err),
    })
}

/// Authenticate a user and issue an access token.
///
/// Unknown email and wrong password produce the same error so the endpoint
/// cannot be used to probe which emails are registered.
pub async fn login(
    pool: &DbPool,
    request: LoginRequest,
    jwt_secret: &str,
) -> Result<LoginResponse, AppError> {
    let usuario = sqlx::query_as::<_, Usuario>(
        r#"
        SELECT id, nome, email, senha_hash, created_at, updated_at
        FROM usuarios
        WHERE email = $1
        "#,
    )
    .bind(&request.email)
    .fetch_optional(pool)
    .await?
    .ok_or(AppError::CredenciaisInvalidas)?;

    if !auth::verificar_senha(&request.senha, &usuario.senha_hash)? {
        return Err(AppError::CredenciaisInvalidas);
    }

    let token = auth::gerar_token(usuario.id, &usuario.email, jwt_secret)?;

    Ok(LoginResponse {
        token,
        usuario: usuario.into(),
    })
}

/// Fetch the authenticated user's own profile.
pub async fn perfil(pool: &DbPool, usuario_id: Uuid) -> Result<UsuarioResponse, AppError> {
    let usuario = sqlx::query_as::<_, Usuario>(
        r#"
        SELECT id, nome, email, senha_hash, created_at, updated_at
        FROM usuarios
        WHERE id = $1
        "#,
    )
    .bind(usuario_id)
    .fetch_optional(pool)
    .await?
    .ok_or(AppError::UsuarioNaoEncontrado)?;

    Ok(usuario.into())
}
