//! Entry point for the `artisan-gateway` HTTP server.

use std::sync::Arc;

use artisan_gateway::{
    config::Config, forward::Forwarder, routes::create_router, state::AppState,
};
use artisan_store::DocumentStore;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    let store = open_store(&config).await;

    let forwarder = match Forwarder::new(config.forward_url.clone()) {
        Ok(f) => f,
        Err(e) => {
            tracing::error!(error = %e, "failed to build webhook client");
            std::process::exit(1);
        }
    };
    if config.forward_url.is_none() {
        info!("GOOGLE_SHEETS_WEBHOOK_URL not set; registrations will not be forwarded");
    }

    let addr = config.listen_addr();
    let app = create_router(AppState::new(store, forwarder, config));

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!(addr = %addr, error = %e, "failed to bind");
            std::process::exit(1);
        }
    };

    info!(addr = %addr, "artisan-gateway listening");

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "server error");
        std::process::exit(1);
    }
}

/// Connect to the configured store, or run without one.
async fn open_store(config: &Config) -> Option<Arc<dyn DocumentStore>> {
    let (Some(url), Some(name)) = (&config.database_url, &config.database_name) else {
        warn!("DATABASE_URL or DATABASE_NAME not set; store-backed endpoints will fail");
        return None;
    };
    match artisan_store::connect(url, name).await {
        Ok(store) => Some(store),
        Err(e) => {
            warn!(error = %e, "document store unavailable; continuing without it");
            None
        }
    }
}
