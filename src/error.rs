//! Error types and HTTP error response handling.
//!
//! This module defines all application errors and how they are converted
//! into HTTP responses with appropriate status codes and JSON bodies.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Application-wide error type.
///
/// This enum represents all possible errors that can occur in the application.
/// Each variant maps to a specific HTTP status code and error message.
///
/// Human-readable messages are in Portuguese for compatibility with the
/// dashboard frontend; machine-readable codes are stable English identifiers.
///
/// # Error Categories
///
/// - **Database Errors**: Any sqlx::Error from database operations
/// - **Authentication Errors**: Missing, invalid, or expired tokens; bad credentials
/// - **Resource Errors**: Requested resources not found *for this user* — the
///   API never distinguishes "exists but belongs to someone else" from
///   "doesn't exist"
/// - **Business Logic Errors**: Operations that violate referential integrity
/// - **Validation Errors**: Invalid request data
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Database operation failed (e.g., connection error, query error).
    ///
    /// This wraps any sqlx::Error using the `#[from]` attribute, which
    /// automatically implements `From<sqlx::Error> for AppError`.
    #[error("Erro interno do servidor")]
    Database(#[from] sqlx::Error),

    /// Password hashing or verification failed.
    ///
    /// Returns HTTP 500; bcrypt failures are infrastructure problems, never
    /// caused by client input.
    #[error("Erro interno do servidor")]
    Bcrypt(#[from] bcrypt::BcryptError),

    /// Bearer token is missing or failed signature validation.
    ///
    /// Returns HTTP 401 Unauthorized.
    #[error("Token inválido")]
    TokenInvalido,

    /// Bearer token is well-formed but past its expiry.
    ///
    /// Returns HTTP 401 Unauthorized with a distinct code so the frontend can
    /// prompt for re-login instead of treating the session as corrupt.
    #[error("Token expirado")]
    TokenExpirado,

    /// Login failed: unknown email or wrong password.
    ///
    /// Returns HTTP 401 with a single message for both cases to avoid
    /// confirming which emails are registered.
    #[error("Credenciais inválidas")]
    CredenciaisInvalidas,

    /// Registration attempted with an email that already has an account.
    ///
    /// Returns HTTP 409 Conflict.
    #[error("E-mail já cadastrado")]
    EmailEmUso,

    /// Requested user does not exist.
    ///
    /// Returns HTTP 404 Not Found.
    #[error("Usuário não encontrado")]
    UsuarioNaoEncontrado,

    /// Referenced account does not exist or doesn't belong to the
    /// authenticated user.
    ///
    /// Returns HTTP 404 Not Found.
    #[error("Conta não encontrada")]
    ContaNaoEncontrada,

    /// Referenced category does not exist.
    ///
    /// Returns HTTP 404 Not Found.
    #[error("Categoria não encontrada")]
    CategoriaNaoEncontrada,

    /// Requested transaction does not exist or doesn't belong to the
    /// authenticated user.
    ///
    /// Returns HTTP 404 Not Found.
    #[error("Transação não encontrada")]
    TransacaoNaoEncontrada,

    /// Account still has transactions referencing it and cannot be deleted.
    ///
    /// Returns HTTP 409 Conflict.
    #[error("Conta possui transações vinculadas")]
    ContaEmUso,

    /// Category still has transactions referencing it and cannot be deleted.
    ///
    /// Returns HTTP 409 Conflict.
    #[error("Categoria possui transações vinculadas")]
    CategoriaEmUso,

    /// Request body or parameters are invalid.
    ///
    /// Returns HTTP 400 Bad Request.
    /// The String contains details about what was invalid.
    #[error("{0}")]
    RequisicaoInvalida(String),
}

impl AppError {
    /// Stable machine-readable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Database(_) | AppError::Bcrypt(_) => "internal_error",
            AppError::TokenInvalido => "invalid_token",
            AppError::TokenExpirado => "token_expired",
            AppError::CredenciaisInvalidas => "invalid_credentials",
            AppError::EmailEmUso => "email_in_use",
            AppError::UsuarioNaoEncontrado => "user_not_found",
            AppError::ContaNaoEncontrada => "account_not_found",
            AppError::CategoriaNaoEncontrada => "category_not_found",
            AppError::TransacaoNaoEncontrada => "transaction_not_found",
            AppError::ContaEmUso => "account_in_use",
            AppError::CategoriaEmUso => "category_in_use",
            AppError::RequisicaoInvalida(_) => "invalid_request",
        }
    }

    /// HTTP status this error surfaces as.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Database(_) | AppError::Bcrypt(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::TokenInvalido | AppError::TokenExpirado | AppError::CredenciaisInvalidas => {
                StatusCode::UNAUTHORIZED
            }
            AppError::EmailEmUso | AppError::ContaEmUso | AppError::CategoriaEmUso => {
                StatusCode::CONFLICT
            }
            AppError::UsuarioNaoEncontrado
            | AppError::ContaNaoEncontrada
            | AppError::CategoriaNaoEncontrada
            | AppError::TransacaoNaoEncontrada => StatusCode::NOT_FOUND,
            AppError::RequisicaoInvalida(_) => StatusCode::BAD_REQUEST,
        }
    }
}

/// Convert AppError into an HTTP response.
///
/// This implementation allows Axum handlers to return `Result<T, AppError>`
/// and have errors automatically converted to proper HTTP responses.
///
/// # Response Format
///
/// All errors return JSON in this format:
/// ```json
/// {
///   "error": {
///     "code": "error_type",
///     "message": "Mensagem legível"
///   }
/// }
/// ```
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();

        // Internal errors get logged with full detail but surfaced opaquely
        let message = match &self {
            AppError::Database(err) => {
                tracing::error!(error = %err, "database error");
                self.to_string()
            }
            AppError::Bcrypt(err) => {
                tracing::error!(error = %err, "password hashing error");
                self.to_string()
            }
            _ => self.to_string(),
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(AppError::TokenInvalido, StatusCode::UNAUTHORIZED, "invalid_token")]
    #[case(AppError::TokenExpirado, StatusCode::UNAUTHORIZED, "token_expired")]
    #[case(AppError::CredenciaisInvalidas, StatusCode::UNAUTHORIZED, "invalid_credentials")]
    #[case(AppError::EmailEmUso, StatusCode::CONFLICT, "email_in_use")]
    #[case(AppError::ContaNaoEncontrada, StatusCode::NOT_FOUND, "account_not_found")]
    #[case(AppError::CategoriaNaoEncontrada, StatusCode::NOT_FOUND, "category_not_found")]
    #[case(AppError::TransacaoNaoEncontrada, StatusCode::NOT_FOUND, "transaction_not_found")]
    #[case(AppError::ContaEmUso, StatusCode::CONFLICT, "account_in_use")]
    #[case(
        AppError::RequisicaoInvalida("valor deve ser positivo".into()),
        StatusCode::BAD_REQUEST,
        "invalid_request"
    )]
    fn status_and_code_mapping(
        #[case] error: AppError,
        #[case] status: StatusCode,
        #[case] code: &str,
    ) {
        assert_eq!(error.status(), status);
        assert_eq!(error.code(), code);
    }

    #[test]
    fn database_errors_are_opaque_500s() {
        let error = AppError::Database(sqlx::Error::PoolClosed);
        assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error.code(), "internal_error");
        // The sqlx detail must not leak into the client-facing message
        assert_eq!(error.to_string(), "Erro interno do servidor");
    }

    #[test]
    fn validation_message_passes_through() {
        let error = AppError::RequisicaoInvalida("valor deve ser positivo".into());
        assert_eq!(error.to_string(), "valor deve ser positivo");
    }
}
