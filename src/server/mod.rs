pub mod handlers;
pub mod net_guard;
pub mod rate_limit;
pub mod state;

use crate::config::Config;
use axum::{
    Router,
    extract::Request,
    http::HeaderValue,
    middleware::{self, Next},
    response::Response,
    routing::get,
};
use state::AppState;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

/// Build the full router with middleware attached.
pub async fn build_router(config: Config) -> Router {
    build_router_with_state(AppState::new(config))
}

/// Router over a prepared state (tests inject stub catalogs this way).
pub fn build_router_with_state(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::health::health_check))
        .route("/health", get(handlers::health::health_check))
        .route("/playlist", get(handlers::playlist::serve_playlist))
        .route("/proxy", get(handlers::proxy::serve_proxy))
        .route("/catalog/movie/{id}", get(handlers::catalog::serve_movie))
        .route("/catalog/series/{id}", get(handlers::catalog::serve_series))
        .route(
            "/demo/channels.m3u",
            get(handlers::demo::serve_demo_channels),
        )
        .route("/metrics", get(handlers::health::serve_metrics))
        .layer(middleware::from_fn(version_header))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit::rate_limit_middleware,
        ))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Stamp every response with the service version.
async fn version_header(req: Request, next: Next) -> Response {
    let mut response = next.run(req).await;
    response.headers_mut().insert(
        "x-streamgate-version",
        HeaderValue::from_static(env!("CARGO_PKG_VERSION")),
    );
    response
}

/// Start the Axum HTTP server
pub async fn start(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = format!("0.0.0.0:{}", config.port);

    let app = build_router(config).await;

    let listener = match tokio::net::TcpListener::bind(addr.as_str()).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind to address {}: {}", addr, e);
            return Err(e.into());
        }
    };

    info!("🚀 Server listening on http://{}", addr);

    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
