//! Bearer-token authentication middleware.
//!
//! This middleware intercepts every protected request to:
//! 1. Extract the access token from the Authorization header
//! 2. Verify its signature and expiry
//! 3. Inject authentication context into the request
//! 4. Reject unauthorized requests with HTTP 401

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::{auth, error::AppError, state::AppState};

/// Authentication context attached to authenticated requests.
///
/// This struct is inserted into the request's extension map and can be
/// extracted by route handlers to know who made the request.
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// ID of the authenticated user
    ///
    /// Used to filter database queries (e.g., only show accounts belonging to
    /// this user)
    pub usuario_id: Uuid,

    /// Email of the authenticated user
    pub email: String,
}

/// Extract the bearer token from an Authorization header value.
///
/// Expected format: `Bearer <token>`.
fn extrair_bearer(header: &str) -> Option<&str> {
    header.strip_prefix("Bearer ")
}

/// Token authentication middleware function.
///
/// # Flow
///
/// 1. Extract `Authorization: Bearer <token>` header from request
/// 2. Verify the token signature and expiry against the configured secret
/// 3. If valid: inject `AuthContext` into request, call next handler
/// 4. If missing/invalid: return 401 Unauthorized error
///
/// # Returns
///
/// - `Ok(Response)` if authenticated successfully (calls next handler)
/// - `Err(AppError::TokenInvalido)` when the header is missing or malformed
/// - `Err(AppError::TokenExpirado)` when the token is past its expiry
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    // Step 1: Extract Authorization header
    let auth_header = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or(AppError::TokenInvalido)?;

    // Step 2: Extract Bearer token
    let token = extrair_bearer(auth_header).ok_or(AppError::TokenInvalido)?;

    // Step 3: Verify the token and recover its claims
    let claims = auth::validar_token(token, &state.config.jwt_secret)?;

    // Step 4: Inject context into request extensions
    // Route handlers can now extract this using Extension<AuthContext>
    let auth_context = AuthContext {
        usuario_id: claims.sub,
        email: claims.email,
    };
    request.extensions_mut().insert(auth_context);

    // Step 5: Call the next middleware/handler
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::extrair_bearer;

    #[test]
    fn extracts_token_after_bearer_prefix() {
        assert_eq!(extrair_bearer("Bearer abc.def.ghi"), Some("abc.def.ghi"));
    }

    #[test]
    fn rejects_other_schemes() {
        assert_eq!(extrair_bearer("Basic abc"), None);
        assert_eq!(extrair_bearer("abc.def.ghi"), None);
    }
}
