//! Transaction HTTP handlers.
//!
//! This module implements the transaction-related API endpoints:
//! - GET /api/transacoes - List transactions (account and category resolved)
//! - POST /api/transacoes - Create transaction and apply it to the balance
//! - PUT /api/transacoes/{id} - Patch transaction, reconciling the balance
//! - DELETE /api/transacoes/{id} - Delete transaction, undoing its effect

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{
    error::AppError,
    middleware::auth::AuthContext,
    models::Paginacao,
    models::transacao::{
        AtualizarTransacaoRequest, CriarTransacaoRequest, Transacao, TransacaoDetalhada,
    },
    services::transacao_service,
    state::AppState,
};

/// List the authenticated user's transactions.
///
/// # Endpoint
///
/// `GET /api/transacoes?page=1&limit=10`
///
/// Results are ordered by `data` descending and each entry carries its
/// resolved account and category:
///
/// ```json
/// [
///   {
///     "id": "770e8400-...",
///     "descricao": "Supermercado",
///     "valor_centavos": 3000,
///     "data": "2026-08-01T12:00:00Z",
///     "tipo": "despesa",
///     "conta": { "id": "550e8400-...", "nome": "Conta Corrente", "tipo": "corrente", "saldo_centavos": 7000 },
///     "categoria": { "id": "660e8400-...", "nome": "Alimentação", "tipo": "despesa", "subtipo": "Essencial" }
///   }
/// ]
/// ```
pub async fn listar_transacoes(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Query(paginacao): Query<Paginacao>,
) -> Result<Json<Vec<TransacaoDetalhada>>, AppError> {
    let transacoes =
        transacao_service::listar_transacoes(&state.pool, auth.usuario_id, paginacao).await?;

    Ok(Json(transacoes))
}

/// Create a transaction.
///
/// # Endpoint
///
/// `POST /api/transacoes`
///
/// # Validation
///
/// - `valor_centavos` must be positive
/// - `conta` must reference an account owned by the authenticated user
/// - `categoria` must reference an existing category
///
/// # Response
///
/// - **201 Created**: the transaction; the account balance already reflects it
/// - **400**: non-positive amount
/// - **404**: account or category not found (or not yours)
pub async fn criar_transacao(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(request): Json<CriarTransacaoRequest>,
) -> Result<(StatusCode, Json<Transacao>), AppError> {
    let transacao =
        transacao_service::criar_transacao(&state.pool, auth.usuario_id, request).await?;

    Ok((StatusCode::CREATED, Json(transacao)))
}

/// Patch a transaction.
///
/// # Endpoint
///
/// `PUT /api/transacoes/{id}`
///
/// Partial-patch semantics: omitted fields keep their stored values. The
/// account balance is reconciled by the net change (`new - old` effect),
/// including when the patch moves the transaction to another account.
pub async fn atualizar_transacao(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(transacao_id): Path<Uuid>,
    Json(request): Json<AtualizarTransacaoRequest>,
) -> Result<Json<Transacao>, AppError> {
    let transacao =
        transacao_service::atualizar_transacao(&state.pool, auth.usuario_id, transacao_id, request)
            .await?;

    Ok(Json(transacao))
}

/// Delete a transaction.
///
/// # Endpoint
///
/// `DELETE /api/transacoes/{id}`
///
/// # Response
///
/// - **204 No Content**: deleted; the account balance no longer reflects it
/// - **404**: transaction not found (or not yours)
pub async fn deletar_transacao(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(transacao_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    transacao_service::deletar_transacao(&state.pool, auth.usuario_id, transacao_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
