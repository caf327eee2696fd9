use anyhow::Result;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

mod config;
mod error;
mod logging;
mod routes;
mod services;
pub mod models;

use services::session::SessionStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    logging::init_logging()?;

    // Load configuration
    let config = config::load_config()?;
    let addr = config.bind_addr;

    let app = routes::routes(config.max_file_size)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(AppState::new(config)));

    tracing::info!("listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// Application state
pub struct AppState {
    config: config::Config,
    sessions: SessionStore,
}

impl AppState {
    pub fn new(config: config::Config) -> Self {
        Self {
            config,
            sessions: SessionStore::default(),
        }
    }
}
