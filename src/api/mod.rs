//! HTTP API module
//! 
//! This module contains the countdown endpoint handlers and response structures.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    http::{
        header::{ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, CONTENT_TYPE},
        HeaderValue, Method,
    },
    routing::get,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

use crate::state::AppState;
use handlers::*;

/// Path of the countdown resource
pub const COUNTDOWN_PATH: &str = "/api/countdown";

/// Cross-origin policy: any origin, the three supported methods
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
}

/// Allowed methods and headers on every response, not only preflight
fn allow_methods_layer() -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::if_not_present(
        ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, OPTIONS"),
    )
}

fn allow_headers_layer() -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::if_not_present(
        ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type"),
    )
}

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            COUNTDOWN_PATH,
            get(query_handler)
                .post(start_handler)
                .head(method_not_allowed_handler)
                .options(preflight_handler)
                .fallback(method_not_allowed_handler),
        )
        .route("/health", get(health_handler))
        .layer(cors_layer())
        .layer(allow_methods_layer())
        .layer(allow_headers_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
