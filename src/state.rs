//! Shared application state.
//!
//! Handlers receive the database pool and configuration through Axum's
//! `State` extractor. The auth middleware also needs the JWT secret, so the
//! state carries the full [`Config`] alongside the pool.

use crate::{config::Config, db::DbPool};

/// State shared with every handler and middleware.
///
/// Cloning is cheap: `DbPool` is an `Arc` internally and `Config` is a small
/// owned struct.
#[derive(Debug, Clone)]
pub struct AppState {
    /// PostgreSQL connection pool
    pub pool: DbPool,

    /// Application configuration (JWT secret, ports)
    pub config: Config,
}

impl AppState {
    /// Bundle the pool and configuration into shared state.
    pub fn new(pool: DbPool, config: Config) -> Self {
        Self { pool, config }
    }
}
