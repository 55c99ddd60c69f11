//! Server crate for the movie watch predictor.
//!
//! Serves the interactive form (HTML) and a small JSON API. Each visitor
//! gets a session that owns its own trained model; handlers receive the
//! session explicitly through the [`SessionStore`].

use std::net::SocketAddr;

use anyhow::{Context, Result};
use axum::routing::{get, post};
use axum::Router;
use recommender::ForestConfig;
use tracing::info;

pub mod api;
pub mod error;
pub mod pages;
pub mod session;

pub use error::AppError;
pub use session::{Session, SessionStore};

/// Everything needed to run the server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub max_sessions: usize,
    pub forest: ForestConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            max_sessions: SessionStore::DEFAULT_MAX_SESSIONS,
            forest: ForestConfig::default(),
        }
    }
}

/// Build the application router around a session store.
pub fn router(store: SessionStore) -> Router {
    Router::new()
        .route("/", get(pages::index))
        .route("/health", get(health))
        .route("/sessions/:id", get(pages::show_session))
        .route("/sessions/:id/predict", get(pages::predict))
        .route("/api/options", get(api::options))
        .route("/api/sessions", post(api::create_session))
        .route("/api/sessions/:id/training", get(api::training))
        .route("/api/sessions/:id/model", get(api::model_info))
        .route("/api/sessions/:id/predict", post(api::predict))
        .with_state(store)
}

async fn health() -> &'static str {
    "ok"
}

/// Bind and serve until the process is stopped.
pub async fn serve(config: ServerConfig) -> Result<()> {
    let store = SessionStore::new(config.forest, config.max_sessions);
    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.addr))?;

    info!("Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router(store))
        .await
        .context("Server error")?;
    Ok(())
}
