//! Category HTTP handlers.
//!
//! Categories are global: every authenticated user sees and manages the same
//! set.
//!
//! - GET /api/categorias?page&limit - List categories alphabetically
//! - POST /api/categorias - Create a category
//! - PUT /api/categorias/{id} - Patch a category
//! - DELETE /api/categorias/{id} - Delete a category (rejected while in use)

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{
    error::AppError,
    models::Paginacao,
    models::categoria::{AtualizarCategoriaRequest, Categoria, CriarCategoriaRequest},
    services::categoria_service,
    state::AppState,
};

/// List categories alphabetically, paginated.
///
/// # Endpoint
///
/// `GET /api/categorias?page=1&limit=10`
pub async fn listar_categorias(
    State(state): State<AppState>,
    Query(paginacao): Query<Paginacao>,
) -> Result<Json<Vec<Categoria>>, AppError> {
    let categorias = categoria_service::listar_categorias(&state.pool, paginacao).await?;

    Ok(Json(categorias))
}

/// Create a category.
///
/// # Endpoint
///
/// `POST /api/categorias`
///
/// # Response
///
/// - **201 Created**: the new category
/// - **400**: duplicate name
pub async fn criar_categoria(
    State(state): State<AppState>,
    Json(request): Json<CriarCategoriaRequest>,
) -> Result<(StatusCode, Json<Categoria>), AppError> {
    let categoria = categoria_service::criar_categoria(&state.pool, request).await?;

    Ok((StatusCode::CREATED, Json(categoria)))
}

/// Patch a category.
///
/// # Endpoint
///
/// `PUT /api/categorias/{id}`
pub async fn atualizar_categoria(
    State(state): State<AppState>,
    Path(categoria_id): Path<Uuid>,
    Json(request): Json<AtualizarCategoriaRequest>,
) -> Result<Json<Categoria>, AppError> {
    let categoria =
        categoria_service::atualizar_categoria(&state.pool, categoria_id, request).await?;

    Ok(Json(categoria))
}

/// Delete a category.
///
/// # Endpoint
///
/// `DELETE /api/categorias/{id}`
///
/// # Response
///
/// - **204 No Content**: deleted
/// - **404**: category not found
/// - **409**: category still has transactions referencing it
pub async fn excluir_categoria(
    State(state): State<AppState>,
    Path(categoria_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    categoria_service::excluir_categoria(&state.pool, categoria_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
