//! HTTP request handlers (route handlers).
//!
//! Each handler is an async function that:
//! 1. Receives HTTP request data (JSON body, URL params, etc.)
//! 2. Delegates to a service for business logic
//! 3. Returns HTTP response (JSON, status code)

/// Category endpoints
pub mod categorias;
/// Account endpoints
pub mod contas;
/// Health check endpoint
pub mod health;
/// Transaction endpoints
pub mod transacoes;
/// User registration/login/profile endpoints
pub mod usuarios;
