//! API request and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::countdown_state::deserialize_end_time;

/// Body of a POST to the countdown resource
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartRequest {
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default, deserialize_with = "deserialize_end_time")]
    pub end_time: Option<i64>,
}

impl StartRequest {
    /// A start request for the given end time
    pub fn start(end_time: Option<i64>) -> Self {
        Self {
            action: Some("start".to_string()),
            end_time,
        }
    }
}

/// Error body returned with every 4xx response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: String) -> Self {
        Self { error }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
    pub uptime: String,
    pub store_configured: bool,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}
