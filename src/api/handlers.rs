//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Json,
};
use chrono::Utc;
use tracing::{debug, info};

use crate::{
    error::ApiError,
    state::{AppState, CountdownStatus, StartOutcome},
};
use super::responses::{HealthResponse, StartRequest};

/// Handle GET /api/countdown - Report the current countdown
pub async fn query_handler(State(state): State<Arc<AppState>>) -> Json<CountdownStatus> {
    let status = state.countdown.query().await;
    debug!("Countdown query: {:?}", status);
    Json(status)
}

/// Handle POST /api/countdown - Start or clear the countdown
pub async fn start_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<StartRequest>, JsonRejection>,
) -> Result<Json<StartOutcome>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::InvalidRequest(e.body_text()))?;

    match request.action.as_deref() {
        Some("start") => {
            let outcome = state.countdown.start(request.end_time).await;
            state.record_action("start");
            info!("Start request handled, end time {:?}", outcome.end_time);
            Ok(Json(outcome))
        }
        other => {
            debug!("Unknown action: {:?}", other);
            Err(ApiError::InvalidAction)
        }
    }
}

/// Handle OPTIONS /api/countdown - Empty 200 for cross-origin preflight
pub async fn preflight_handler() -> StatusCode {
    StatusCode::OK
}

/// Any other method on /api/countdown
pub async fn method_not_allowed_handler() -> ApiError {
    ApiError::MethodNotAllowed
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let (last_action, last_action_time) = state.get_last_action();

    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime: state.get_uptime(),
        store_configured: state.countdown.store().is_configured(),
        last_action,
        last_action_time,
    })
}
