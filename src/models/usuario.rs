//! User data models and API request/response types.
//!
//! This module defines:
//! - `Usuario`: database entity (never serialized — it carries the password hash)
//! - `RegistrarRequest` / `LoginRequest`: request bodies
//! - `UsuarioResponse` / `LoginResponse`: response bodies

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents a user record from the database.
///
/// Deliberately does not implement `Serialize`: the password hash must never
/// reach a response body. Convert to [`UsuarioResponse`] instead.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Usuario {
    /// Unique identifier for this user
    pub id: Uuid,

    /// Display name
    pub nome: String,

    /// Login email, unique across the table
    pub email: String,

    /// bcrypt hash of the password
    pub senha_hash: String,

    /// Timestamp when the user registered
    pub created_at: DateTime<Utc>,

    /// Timestamp of the last profile update
    pub updated_at: DateTime<Utc>,
}

/// Request body for `POST /api/usuarios/register`.
#[derive(Debug, Deserialize)]
pub struct RegistrarRequest {
    pub nome: String,
    pub email: String,
    pub senha: String,
}

/// Request body for `POST /api/usuarios/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub senha: String,
}

/// User shape returned to clients (no password hash).
#[derive(Debug, Serialize)]
pub struct UsuarioResponse {
    pub id: Uuid,
    pub nome: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Usuario> for UsuarioResponse {
    fn from(usuario: Usuario) -> Self {
        Self {
            id: usuario.id,
            nome: usuario.nome,
            email: usuario.email,
            created_at: usuario.created_at,
            updated_at: usuario.updated_at,
        }
    }
}

/// Response body for a successful login.
///
/// # JSON Example
///
/// ```json
/// {
///   "token": "eyJhbGciOiJIUzI1NiIs...",
///   "usuario": { "id": "...", "nome": "Ana", "email": "ana@example.com" }
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// Signed access token, sent back as `Authorization: Bearer <token>`
    pub token: String,

    /// The authenticated user
    pub usuario: UsuarioResponse,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_never_carries_the_password_hash() {
        let usuario = Usuario {
            id: Uuid::nil(),
            nome: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            senha_hash: "$2b$12$segredo".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_value(UsuarioResponse::from(usuario)).unwrap();
        assert!(json.get("senha_hash").is_none());
        assert!(json.get("senha").is_none());
        assert_eq!(json["email"], "ana@example.com");
    }
}
