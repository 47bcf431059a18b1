mod config;
mod errors;
mod export;
mod import;
mod models;
mod render;
mod routes;
mod state;
mod store;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::export::load_fonts;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::storage::FileStorage;
use crate::store::ResumeStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting resume builder v{}", env!("CARGO_PKG_VERSION"));

    // Load the persisted resume, or start a fresh one
    let storage = FileStorage::new(&config.data_dir);
    info!("Persisting resume under {}", storage.dir().display());
    let store = ResumeStore::load(Arc::new(storage)).await;
    if store.resume().is_blank() {
        info!("Starting from an empty resume {}", store.resume().id);
    } else {
        info!(
            "Loaded resume {} ({} template)",
            store.resume().id,
            store.resume().template.as_str()
        );
    }

    // Font discovery walks the filesystem; keep it off the runtime threads
    let font_dir = config.font_dir.clone();
    let fonts = tokio::task::spawn_blocking(move || load_fonts(font_dir.as_deref())).await?;
    info!("Loaded {} font faces for export", fonts.len());

    // Build app state
    let state = AppState {
        store: Arc::new(RwLock::new(store)),
        config: config.clone(),
        fonts: Arc::new(fonts),
    };

    // Build router
    let app = build_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()), // local single-user service
    );

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
