//! Finanças API - Main Application Entry Point
//!
//! This is a REST API server for personal finance: accounts, transactions,
//! categories and users. Transactions are the correctness core: every
//! receita/despesa atomically reflects into its account's balance, and
//! updates/deletions reconcile or undo that effect.
//!
//! # Architecture
//!
//! - **Web Framework**: Axum (async HTTP server)
//! - **Database**: PostgreSQL with sqlx (async queries)
//! - **Authentication**: JWT bearer tokens, bcrypt password hashing
//! - **Format**: JSON requests/responses
//!
//! # Startup Flow
//!
//! 1. Load configuration from environment variables
//! 2. Create database connection pool
//! 3. Run database migrations
//! 4. Build HTTP router with routes and middleware
//! 5. Start server on configured port

mod auth;
mod config;
mod db;
mod error;
mod handlers;
mod middleware;
mod models;
mod services;
mod state;

use tracing_subscriber::EnvFilter;

use axum::{
    Router, middleware as axum_middleware,
    routing::{delete, get, post, put},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging with tracing subscriber. Reads RUST_LOG environment variable (defaults to "info" level)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // Load configuration
    let config = config::Config::from_env()?;
    tracing::info!("Configuration loaded");

    // Create database pool
    let pool = db::create_pool(&config.database_url).await?;
    tracing::info!("Database pool created");

    // Run migrations
    db::run_migrations(&pool).await?;
    tracing::info!("Database migrations complete");

    let server_port = config.server_port;
    let state = AppState::new(pool, config);

    // Create authenticated routes (API endpoints)
    let authenticated_routes = Router::new()
        // Profile
        .route("/api/usuarios/profile", get(handlers::usuarios::perfil))
        // Transaction ledger routes
        .route(
            "/api/transacoes",
            get(handlers::transacoes::listar_transacoes),
        )
        .route(
            "/api/transacoes",
            post(handlers::transacoes::criar_transacao),
        )
        .route(
            "/api/transacoes/{id}",
            put(handlers::transacoes::atualizar_transacao),
        )
        .route(
            "/api/transacoes/{id}",
            delete(handlers::transacoes::deletar_transacao),
        )
        // Account routes
        .route("/api/contas", get(handlers::contas::listar_contas))
        .route("/api/contas", post(handlers::contas::criar_conta))
        .route("/api/contas/{id}", put(handlers::contas::atualizar_conta))
        .route(
            "/api/contas/{id}",
            delete(handlers::contas::deletar_conta),
        )
        // Category routes
        .route(
            "/api/categorias",
            get(handlers::categorias::listar_categorias),
        )
        .route(
            "/api/categorias",
            post(handlers::categorias::criar_categoria),
        )
        .route(
            "/api/categorias/{id}",
            put(handlers::categorias::atualizar_categoria),
        )
        .route(
            "/api/categorias/{id}",
            delete(handlers::categorias::excluir_categoria),
        )
        // Apply authentication middleware to all routes in this group
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::auth_middleware,
        ));

    // Combine authenticated routes with public routes
    let app = Router::new()
        // Public routes (no authentication required)
        .route("/health", get(handlers::health::health_check))
        .route("/api/usuarios/register", post(handlers::usuarios::registrar))
        .route("/api/usuarios/login", post(handlers::usuarios::login))
        // Merge authenticated routes
        .merge(authenticated_routes)
        // The dashboard frontend is served from another origin
        .layer(CorsLayer::permissive())
        // Add distributed tracing middleware for observability
        .layer(TraceLayer::new_for_http())
        // Share state (pool + config) with all handlers via State extraction
        .with_state(state);

    // Bind to network address and start server
    let addr = format!("0.0.0.0:{}", server_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    // Start serving HTTP requests
    // This blocks forever, handling requests concurrently with tokio
    axum::serve(listener, app).await?;

    Ok(())
}
