pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, put},
    Router,
};
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::services::cache::DeckCache;
use crate::services::library::Library;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub library: Arc<Library>,
    pub cache: Arc<DeckCache>,
    /// Deck the card endpoints read from
    pub active: Arc<RwLock<Option<PathBuf>>>,
}

impl AppState {
    /// Open the upload library and activate the configured default deck.
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let library = Library::open(&config.upload_dir).await?;

        if let Some(deck) = &config.default_deck {
            if !deck.is_file() {
                tracing::warn!("Default deck {} does not exist", deck.display());
            }
        }

        Ok(Self {
            active: Arc::new(RwLock::new(config.default_deck.clone())),
            config: Arc::new(config),
            library: Arc::new(library),
            cache: Arc::new(DeckCache::new()),
        })
    }
}

/// Build the router with all routes.
pub fn router(state: AppState) -> Router {
    let max_upload_bytes = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health_check))
        // Card routes
        .route("/api/cards", get(routes::cards::list))
        .route("/api/cards/topics", get(routes::cards::topics))
        .route("/api/cards/random", get(routes::cards::random))
        // File routes
        .route(
            "/api/files",
            get(routes::files::list).post(routes::files::upload),
        )
        .route(
            "/api/files/active",
            put(routes::files::select).delete(routes::files::reset),
        )
        .route("/api/files/:name", delete(routes::files::remove))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .with_state(state)
}

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    tracing::info!("Opening deck library at {}...", config.upload_dir.display());
    let state = AppState::new(config).await?;
    let addr = state.config.bind_addr();

    let app = router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}
