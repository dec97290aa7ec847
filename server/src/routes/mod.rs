//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! One API endpoint (`/api/proxy`, POST only) plus a health check. When a
//! static directory is configured, the bundled front-end is served as the
//! fallback so the proxy and the page share an origin.

pub mod proxy;

use std::path::Path;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// API routes without static file serving.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(proto::PROXY_PATH, post(proxy::handle).fallback(proxy::method_not_allowed))
        .route("/healthz", get(healthz))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// API routes plus the front-end directory served at `/`.
pub fn app_with_static(state: AppState, static_dir: &Path) -> Router {
    let site = ServeDir::new(static_dir).append_index_html_on_directories(true);
    app(state).fallback_service(site)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
