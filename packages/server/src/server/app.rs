//! Application setup and server configuration.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::Extension,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        Method,
    },
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::kernel::ServerDeps;
use crate::server::middleware::{bearer_auth_middleware, ApiKey};
use crate::server::routes::{
    get_status_handler, health_handler, request_code_handler, send_message_handler,
    verify_code_handler,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub deps: ServerDeps,
}

/// Build the Axum application router
///
/// Every route except `/health` sits behind the bearer token gate.
pub fn build_app(deps: ServerDeps, api_secret_key: String, request_timeout: Duration) -> Router {
    let app_state = AppState { deps };
    let api_key = Arc::new(ApiKey::new(api_secret_key));

    // CORS configuration - allow any origin
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]);

    let authenticated = Router::new()
        .route("/request_code", post(request_code_handler))
        .route("/verify_code", post(verify_code_handler))
        .route("/send_message", post(send_message_handler))
        .route("/get_status", post(get_status_handler))
        // route_layer so unknown paths still 404 instead of 401
        .route_layer(middleware::from_fn(move |req, next| {
            bearer_auth_middleware(api_key.clone(), req, next)
        }));

    Router::new()
        .merge(authenticated)
        // Health check (no auth)
        .route("/health", get(health_handler))
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(Extension(app_state))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
