//! Konversi API Server implementation
//!
//! HTTP REST API server using Axum. Serves the student records endpoints and
//! the convert/import/export endpoints.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use super::handlers;
use crate::siswa::SiswaStore;
use crate::types::ConversionRange;

/// Largest accepted request body (uploaded workbooks)
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// API Server configuration
#[derive(Clone, Debug)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    /// Range used when a request does not name one
    pub default_range: ConversionRange,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            default_range: ConversionRange::default(),
        }
    }
}

/// Shared application state
#[derive(Debug)]
pub struct AppState {
    pub version: String,
    pub default_range: ConversionRange,
    pub siswa: SiswaStore,
}

impl AppState {
    pub fn new(default_range: ConversionRange) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            default_range,
            siswa: SiswaStore::new(),
        }
    }
}

/// Build the application router
pub fn router(state: Arc<AppState>) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health and info endpoints
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/version", get(handlers::version))
        // Student records
        .route(
            "/siswa",
            get(handlers::list_siswa).post(handlers::create_siswa),
        )
        .route(
            "/siswa/:id",
            get(handlers::get_siswa)
                .put(handlers::update_siswa)
                .delete(handlers::delete_siswa),
        )
        // Conversion endpoints
        .route("/api/v1/convert", post(handlers::convert))
        .route("/api/v1/import", post(handlers::import_excel))
        .route("/api/v1/export", post(handlers::export))
        // State and middleware
        .with_state(state)
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Run the API server
pub async fn run_api_server(config: ApiConfig) -> anyhow::Result<()> {
    config.default_range.validate()?;

    let state = Arc::new(AppState::new(config.default_range));
    let app = router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("Konversi API Server starting on http://{}", addr);
    info!("   Endpoints: /siswa, /siswa/:id, /api/v1/convert, /api/v1/import, /api/v1/export");
    info!(
        "   Default range: [{}, {}]",
        config.default_range.min, config.default_range.max
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Konversi API Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, stopping server...");
}
