//! User HTTP handlers.
//!
//! - POST /api/usuarios/register - Register (public)
//! - POST /api/usuarios/login - Log in, returns an access token (public)
//! - GET /api/usuarios/profile - Authenticated self-lookup

use axum::{Extension, Json, extract::State, http::StatusCode};

use crate::{
    error::AppError,
    middleware::auth::AuthContext,
    models::usuario::{LoginRequest, LoginResponse, RegistrarRequest, UsuarioResponse},
    services::usuario_service,
    state::AppState,
};

/// Register a new user.
///
/// # Endpoint
///
/// `POST /api/usuarios/register`
///
/// # Request Body
///
/// ```json
/// { "nome": "Ana", "email": "ana@example.com", "senha": "segredo" }
/// ```
///
/// Registration also provisions the user's three default accounts and the
/// predefined categories.
///
/// # Response
///
/// - **201 Created**: the user (never the password hash)
/// - **400**: missing fields
/// - **409**: email already registered
pub async fn registrar(
    State(state): State<AppState>,
    Json(request): Json<RegistrarRequest>,
) -> Result<(StatusCode, Json<UsuarioResponse>), AppError> {
    let usuario = usuario_service::registrar(&state.pool, request).await?;

    Ok((StatusCode::CREATED, Json(usuario)))
}

/// Log in with email and password.
///
/// # Endpoint
///
/// `POST /api/usuarios/login`
///
/// # Response (200)
///
/// ```json
/// { "token": "eyJhbGciOiJIUzI1NiIs...", "usuario": { "id": "...", "nome": "Ana" } }
/// ```
///
/// - **401**: unknown email or wrong password (single message for both)
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let response =
        usuario_service::login(&state.pool, request, &state.config.jwt_secret).await?;

    Ok(Json(response))
}

/// Fetch the authenticated user's profile.
///
/// # Endpoint
///
/// `GET /api/usuarios/profile`
pub async fn perfil(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Json<UsuarioResponse>, AppError> {
    let usuario = usuario_service::perfil(&state.pool, auth.usuario_id).await?;

    Ok(Json(usuario))
}
