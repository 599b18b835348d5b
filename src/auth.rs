//! Password hashing and access-token issuing/verification.
//!
//! Two small collaborators live here:
//! - bcrypt wrappers used by registration and login
//! - HS256 JWT issue/verify used by login and the auth middleware
//!
//! Tokens carry the user id as `sub` plus the email, and expire after 24
//! hours.

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;

/// Access-token lifetime: 24 hours.
const TOKEN_VALIDITY_HOURS: i64 = 24;

/// Claims embedded in every access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Authenticated user id
    pub sub: Uuid,

    /// Authenticated user email
    pub email: String,

    /// Expiry as a unix timestamp (seconds)
    pub exp: i64,

    /// Issued-at as a unix timestamp (seconds)
    pub iat: i64,
}

/// Hash a password with bcrypt.
///
/// Uses the bcrypt default cost. The resulting string embeds salt and cost,
/// so it is self-contained for later verification.
pub fn hash_senha(senha: &str) -> Result<String, AppError> {
    Ok(bcrypt::hash(senha, bcrypt::DEFAULT_COST)?)
}

/// Verify a password against a stored bcrypt hash.
pub fn verificar_senha(senha: &str, senha_hash: &str) -> Result<bool, AppError> {
    Ok(bcrypt::verify(senha, senha_hash)?)
}

/// Issue a signed access token for a user.
pub fn gerar_token(usuario_id: Uuid, email: &str, secret: &str) -> Result<String, AppError> {
    let agora = Utc::now();
    let claims = Claims {
        sub: usuario_id,
        email: email.to_string(),
        exp: (agora + Duration::hours(TOKEN_VALIDITY_HOURS)).timestamp(),
        iat: agora.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|_| AppError::TokenInvalido)
}

/// Verify a token's signature and expiry, returning its claims.
///
/// Expired tokens are reported distinctly (`TokenExpirado`) so the frontend
/// can redirect to login instead of treating the session as corrupt.
pub fn validar_token(token: &str, secret: &str) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|err| match err.kind() {
        ErrorKind::ExpiredSignature => AppError::TokenExpirado,
        _ => AppError::TokenInvalido,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "segredo-de-teste";

    #[test]
    fn token_round_trip_preserves_claims() {
        let usuario_id = Uuid::new_v4();
        let token = gerar_token(usuario_id, "ana@example.com", SECRET).unwrap();

        let claims = validar_token(&token, SECRET).unwrap();
        assert_eq!(claims.sub, usuario_id);
        assert_eq!(claims.email, "ana@example.com");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let token = gerar_token(Uuid::new_v4(), "ana@example.com", "outro-segredo").unwrap();

        let err = validar_token(&token, SECRET).unwrap_err();
        assert!(matches!(err, AppError::TokenInvalido));
    }

    #[test]
    fn expired_token_is_reported_as_expired() {
        // Hand-build claims already past expiry (beyond the default 60s leeway)
        let agora = Utc::now();
        let claims = Claims {
            sub: Uuid::new_v4(),
            email: "ana@example.com".to_string(),
            exp: (agora - Duration::hours(2)).timestamp(),
            iat: (agora - Duration::hours(26)).timestamp(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        let err = validar_token(&token, SECRET).unwrap_err();
        assert!(matches!(err, AppError::TokenExpirado));
    }

    #[test]
    fn garbage_token_is_invalid() {
        let err = validar_token("nao-e-um-jwt", SECRET).unwrap_err();
        assert!(matches!(err, AppError::TokenInvalido));
    }

    #[test]
    fn senha_hash_verifies_and_rejects() {
        let hash = hash_senha("senha-secreta").unwrap();
        assert!(verificar_senha("senha-secreta", &hash).unwrap());
        assert!(!verificar_senha("senha-errada", &hash).unwrap());
    }
}
