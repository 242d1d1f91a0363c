use std::net::SocketAddr;
use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

mod config;
mod error;
mod routes;
mod storage;

use config::Config;
use storage::DesignStorage;

#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<DesignStorage>,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::info))
        .route("/api/health", get(routes::health))
        .route(
            "/api/designs",
            get(routes::list_designs).post(routes::create_design),
        )
        .route(
            "/api/designs/{id}",
            get(routes::get_design)
                .put(routes::update_design)
                .delete(routes::delete_design),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,server=debug,tower_http=debug".into()),
        )
        .init();

    let config = Config::from_env();

    let storage = match &config.data_file {
        Some(path) => match DesignStorage::open(path).await {
            Ok(storage) => storage,
            Err(e) => {
                tracing::error!(path = %path.display(), "Failed to open design store: {e}");
                std::process::exit(1);
            }
        },
        None => {
            tracing::warn!("DATA_FILE not set, designs are kept in memory only");
            DesignStorage::in_memory()
        }
    };

    let app = build_router(AppState {
        storage: Arc::new(storage),
    });

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind {addr}: {e}");
            std::process::exit(1);
        }
    };
    tracing::info!("Server running on http://localhost:{}", config.port);

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("Server error: {e}");
    }
}
