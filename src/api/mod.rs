//! REST API module using Axum
//!
//! JSON endpoints under `/api` plus optional static file serving for the
//! chat front-end (any path not matched by the API).

pub mod envelope;
pub mod handlers;
pub mod middleware;
mod routes;

pub use handlers::ApiState;

use axum::http::{header, HeaderValue, Method};
use axum::extract::DefaultBodyLimit;
use axum::middleware as axum_mw;
use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

/// Build the CORS layer from `server.cors_origins`.
///
/// An empty list allows any origin, which is what the bundled front-end
/// expects when it is opened from a different host or port.
pub fn build_cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        let allowed: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|o| o.trim().parse().ok())
            .collect();
        tracing::info!(origins = ?origins, "CORS: allowing configured origins");
        AllowOrigin::list(allowed)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

/// Create the complete application router.
pub fn create_app(state: ApiState, server: &ServerConfig) -> Router {
    let mut app = Router::new().nest("/api", routes::api_routes(state));

    if let Some(dir) = &server.static_dir {
        tracing::info!(dir = %dir.display(), "Serving static files");
        app = app.fallback_service(ServeDir::new(dir));
    }

    // Checked by the body extractors; over-limit bodies reach handlers as a JsonRejection.
    app.layer(DefaultBodyLimit::max(server.max_body_bytes))
        .layer(axum_mw::from_fn(middleware::request_id))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(build_cors_layer(&server.cors_origins))
}
