//! HTTP server implementation using Axum.

use std::sync::Arc;
use std::time::Instant;

use axum::Router;
use axum::http::{HeaderValue, Method};
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use trailpass_core::TrailPassConfig;
use trailpass_scheduler::Scheduler;
use trailpass_store::CheckInStore;

use super::routes;

/// Shared state for the gateway. The store is behind its trait so tests
/// (or a future persistent backend) can swap the implementation.
pub struct AppState {
    pub config: TrailPassConfig,
    pub store: Arc<dyn CheckInStore>,
    pub scheduler: Arc<Scheduler>,
    pub start_time: Instant,
}

/// Build the Axum router with all routes.
pub fn build_router(state: AppState) -> Router {
    build_router_from_arc(Arc::new(state))
}

pub fn build_router_from_arc(shared: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/api/hello",
            get(routes::hello).fallback(routes::method_not_allowed),
        )
        .route(
            "/api/status",
            get(routes::status).fallback(routes::method_not_allowed),
        )
        .route(
            "/api/trails",
            get(routes::list_trails).fallback(routes::method_not_allowed),
        )
        .route(
            "/api/trails/checkin",
            post(routes::check_in).fallback(routes::method_not_allowed),
        )
        .route(
            "/api/trails/history",
            get(routes::history).fallback(routes::method_not_allowed),
        )
        .route(
            "/api/auth/signup",
            post(routes::sign_up).fallback(routes::method_not_allowed),
        )
        .route("/health", get(routes::health))
        .route("/server-status", get(routes::server_status))
        .fallback(routes::not_found)
        .layer({
            let cors = CorsLayer::new()
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers(Any)
                .max_age(std::time::Duration::from_secs(3600));

            // Restrict CORS origins in production via env var
            // Example: TRAILPASS_CORS_ORIGINS=https://trailpass.example.com
            if let Ok(origins_str) = std::env::var("TRAILPASS_CORS_ORIGINS") {
                let origins: Vec<_> = origins_str
                    .split(',')
                    .filter_map(|s| s.trim().parse::<HeaderValue>().ok())
                    .collect();
                cors.allow_origin(origins)
            } else {
                // Development fallback — allow all origins
                cors.allow_origin(Any)
            }
        })
        .layer(TraceLayer::new_for_http())
        .with_state(shared)
}

/// Start the HTTP server. Runs until the process exits.
pub async fn start(state: AppState) -> anyhow::Result<()> {
    let addr = format!("{}:{}", state.config.gateway.host, state.config.gateway.port);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("🌐 Gateway listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
