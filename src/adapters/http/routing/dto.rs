//! HTTP DTOs for routing endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::routing::RoutingDecision;

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Body of `POST /api/route`.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteMessageRequest {
    pub user_id: String,
    pub message: String,
    /// `field`, `hybrid`, `auto` or `user-choice`; anything else is ignored.
    #[serde(default)]
    pub preference: Option<String>,
    /// Opaque caller data echoed back unmodified.
    #[serde(default)]
    pub context: Option<serde_json::Value>,
}

/// Body of `POST /api/outcomes`.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordOutcomeRequest {
    pub user_id: String,
    pub mode: String,
    pub success: bool,
    #[serde(default)]
    pub response_time_ms: u64,
    #[serde(default)]
    pub engagement_depth: f64,
    #[serde(default)]
    pub silence_rate: f64,
    #[serde(default)]
    pub fallback_triggered: bool,
}

/// Body of `PUT /api/users/:user_id/preference`. A null mode clears it.
#[derive(Debug, Clone, Deserialize)]
pub struct SetPreferenceRequest {
    pub mode: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Response of `POST /api/route`.
#[derive(Debug, Clone, Serialize)]
pub struct RouteMessageResponse {
    pub decision: RoutingDecision,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<serde_json::Value>,
}

/// Standard error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: "INTERNAL_ERROR".to_string(),
            message: message.into(),
        }
    }
}
