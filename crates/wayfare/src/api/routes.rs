//! API route definitions.

use axum::http::{HeaderValue, Method, header};
use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::auth::route_interception;

use super::handlers;
use super::state::AppState;

/// Create the application router.
///
/// The interception layer wraps every route, pages and API alike; CORS and
/// request tracing sit outside it so preflights never reach the gate.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - use specific origins from config
    let cors = build_cors_layer(&state);

    // Tracing layer with request spans and timing
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_request(DefaultOnRequest::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    // Clone the gate for the interception middleware
    let gate = state.gate.clone();

    // JSON API, one subtree per track
    let api_routes = Router::new()
        .route("/consumer/login", post(handlers::consumer_login))
        .route("/consumer/logout", post(handlers::consumer_logout))
        .route("/consumer/me", get(handlers::consumer_me))
        .route("/consumer/register", post(handlers::consumer_register))
        .route("/admin/login", post(handlers::admin_login))
        .route("/admin/logout", post(handlers::admin_logout))
        .route("/admin/me", get(handlers::admin_me))
        .with_state(state.clone());

    // Server-rendered pages
    let page_routes = Router::new()
        .route("/", get(handlers::landing))
        .route("/consumer/login", get(handlers::consumer_login_page))
        .route("/consumer/register", get(handlers::consumer_register_page))
        .route("/consumer/dashboard", get(handlers::consumer_dashboard))
        .route("/admin/login", get(handlers::admin_login_page))
        .route("/admin/dashboard", get(handlers::admin_dashboard))
        .with_state(state);

    Router::new()
        .route("/health", get(handlers::health))
        .nest("/api", api_routes)
        .merge(page_routes)
        .layer(middleware::from_fn_with_state(gate, route_interception))
        .layer(cors)
        .layer(trace_layer)
}

/// Build the CORS layer based on configuration.
///
/// Credentials are always allowed, so origins must be listed explicitly;
/// a wildcard would make the browser drop the session cookie.
fn build_cors_layer(state: &AppState) -> CorsLayer {
    let mut origins: Vec<HeaderValue> = state
        .auth
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "CORS: invalid origin in config, skipping");
                None
            }
        })
        .collect();

    // Dev mode accepts the common localhost origins whether configured or not.
    if state.auth.dev_mode {
        for origin in [
            "http://localhost:3000",
            "http://localhost:8080",
            "http://127.0.0.1:3000",
            "http://127.0.0.1:8080",
        ] {
            if let Ok(value) = origin.parse::<HeaderValue>() {
                if !origins.contains(&value) {
                    origins.push(value);
                }
            }
        }
    }

    if origins.is_empty() {
        tracing::warn!("CORS: no valid origins configured, denying all cross-origin requests");
        return CorsLayer::new().allow_origin(AllowOrigin::exact(HeaderValue::from_static("null")));
    }

    tracing::info!(count = origins.len(), "CORS: allowing configured origins");
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::ORIGIN,
            header::COOKIE,
        ])
        .allow_credentials(true)
}
