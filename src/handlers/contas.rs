//! Account HTTP handlers.
//!
//! This module implements the account-related API endpoints:
//! - GET /api/contas - List the authenticated user's accounts
//! - POST /api/contas - Create a new account
//! - PUT /api/contas/{id} - Patch an account
//! - DELETE /api/contas/{id} - Delete an account (rejected while in use)

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{
    error::AppError,
    middleware::auth::AuthContext,
    models::conta::{AtualizarContaRequest, ContaResponse, CriarContaRequest},
    services::conta_service,
    state::AppState,
};

/// List all accounts belonging to the authenticated user.
///
/// # Endpoint
///
/// `GET /api/contas`
pub async fn listar_contas(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Json<Vec<ContaResponse>>, AppError> {
    let contas = conta_service::listar_contas(&state.pool, auth.usuario_id).await?;

    Ok(Json(contas.into_iter().map(Into::into).collect()))
}

/// Create a new account.
///
/// # Endpoint
///
/// `POST /api/contas`
///
/// # Request Body
///
/// ```json
/// {
///   "nome": "Carteira",
///   "tipo": "corrente",
///   "saldo_centavos": 0
/// }
/// ```
///
/// # Response
///
/// - **201 Created**: the new account (balance defaults to 0)
/// - **400**: duplicate name for this user
pub async fn criar_conta(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(request): Json<CriarContaRequest>,
) -> Result<(StatusCode, Json<ContaResponse>), AppError> {
    let conta = conta_service::criar_conta(&state.pool, auth.usuario_id, request).await?;

    Ok((StatusCode::CREATED, Json(conta.into())))
}

/// Patch an account.
///
/// # Endpoint
///
/// `PUT /api/contas/{id}`
///
/// Omitted fields keep their stored values. Supplying `saldo_centavos`
/// replaces the balance directly, bypassing the transaction ledger.
pub async fn atualizar_conta(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(conta_id): Path<Uuid>,
    Json(request): Json<AtualizarContaRequest>,
) -> Result<Json<ContaResponse>, AppError> {
    let conta =
        conta_service::atualizar_conta(&state.pool, auth.usuario_id, conta_id, request).await?;

    Ok(Json(conta.into()))
}

/// Delete an account.
///
/// # Endpoint
///
/// `DELETE /api/contas/{id}`
///
/// # Response
///
/// - **204 No Content**: deleted
/// - **404**: account not found (or not yours)
/// - **409**: account still has transactions referencing it
pub async fn deletar_conta(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(conta_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    conta_service::deletar_conta(&state.pool, auth.usuario_id, conta_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
