//! Route definitions for the ridestats API.

pub mod health;
pub mod orders;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::AppState;

/// Maximum accepted upload size (bytes).
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Build the application router. Shared between `main` and the
/// integration tests.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/upload-csv", post(orders::upload_csv))
        .route("/order-stats", get(orders::order_stats))
        .route("/order-stats-all", get(orders::order_stats_all))
        .route("/health/live", get(health::live))
        .route("/health/ready", get(health::ready))
        .layer(TraceLayer::new_for_http())
        .layer(RequestBodyLimitLayer::new(MAX_UPLOAD_BYTES))
        .layer(cors)
        .with_state(state)
}
