use axum::{routing::get, Router};
use std::sync::Arc;

use crate::AppState;

pub mod sheets;

pub fn routes(max_file_size: usize) -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health_check))
        .merge(sheets::routes(max_file_size))
}

async fn health_check() -> &'static str {
    "OK"
}
