//! HTTP handlers for routing endpoints.
//!
//! These handlers connect Axum routes to application layer handlers.

use std::sync::Arc;

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::{
    CompareModesHandler, ExportMetricsHandler, GetUserContextHandler, GetUserContextQuery,
    RecordOutcomeCommand, RecordOutcomeError, RecordOutcomeHandler, ResetUserContextCommand,
    ResetUserContextHandler, RouteMessageCommand, RouteMessageError, RouteMessageHandler,
    SetPreferredModeCommand, SetPreferredModeHandler,
};
use crate::domain::foundation::{UserId, ValidationError};
use crate::domain::routing::{InteractionOutcome, OutcomeMetrics, RoutingEngine, RoutingMode};
use crate::ports::{ContextStoreError, MetricsError, MetricsRecorder, UserContextStore};

use super::dto::{
    ErrorResponse, RecordOutcomeRequest, RouteMessageRequest, RouteMessageResponse,
    SetPreferenceRequest,
};

// ════════════════════════════════════════════════════════════════════════════════
// Error Type
// ════════════════════════════════════════════════════════════════════════════════

/// Routing API error that implements IntoResponse.
#[derive(Debug)]
pub enum RoutingApiError {
    BadRequest(String),
    Internal(String),
}

impl IntoResponse for RoutingApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            RoutingApiError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ErrorResponse::bad_request(msg))
            }
            RoutingApiError::Internal(msg) => {
                tracing::error!("Routing API internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorResponse::internal(msg))
            }
        };
        (status, Json(error)).into_response()
    }
}

impl From<ValidationError> for RoutingApiError {
    fn from(err: ValidationError) -> Self {
        RoutingApiError::BadRequest(err.to_string())
    }
}

impl From<ContextStoreError> for RoutingApiError {
    fn from(err: ContextStoreError) -> Self {
        RoutingApiError::Internal(err.to_string())
    }
}

impl From<MetricsError> for RoutingApiError {
    fn from(err: MetricsError) -> Self {
        RoutingApiError::Internal(err.to_string())
    }
}

impl From<RouteMessageError> for RoutingApiError {
    fn from(err: RouteMessageError) -> Self {
        RoutingApiError::Internal(err.to_string())
    }
}

impl From<RecordOutcomeError> for RoutingApiError {
    fn from(err: RecordOutcomeError) -> Self {
        RoutingApiError::Internal(err.to_string())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing routing dependencies.
#[derive(Clone)]
pub struct RoutingAppState {
    pub engine: Arc<RoutingEngine>,
    pub context_store: Arc<dyn UserContextStore>,
    pub metrics: Arc<dyn MetricsRecorder>,
}

impl RoutingAppState {
    pub fn new(
        engine: Arc<RoutingEngine>,
        context_store: Arc<dyn UserContextStore>,
        metrics: Arc<dyn MetricsRecorder>,
    ) -> Self {
        Self {
            engine,
            context_store,
            metrics,
        }
    }

    pub fn route_message_handler(&self) -> RouteMessageHandler {
        RouteMessageHandler::new(self.context_store.clone(), self.engine.clone())
    }

    pub fn record_outcome_handler(&self) -> RecordOutcomeHandler {
        RecordOutcomeHandler::new(self.context_store.clone(), self.metrics.clone())
    }

    pub fn get_user_context_handler(&self) -> GetUserContextHandler {
        GetUserContextHandler::new(self.context_store.clone())
    }

    pub fn reset_user_context_handler(&self) -> ResetUserContextHandler {
        ResetUserContextHandler::new(self.context_store.clone())
    }

    pub fn set_preferred_mode_handler(&self) -> SetPreferredModeHandler {
        SetPreferredModeHandler::new(self.context_store.clone())
    }

    pub fn export_metrics_handler(&self) -> ExportMetricsHandler {
        ExportMetricsHandler::new(self.metrics.clone())
    }

    pub fn compare_modes_handler(&self) -> CompareModesHandler {
        CompareModesHandler::new(self.metrics.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/route - Choose a pipeline for a message
pub async fn route_message(
    State(state): State<RoutingAppState>,
    Json(request): Json<RouteMessageRequest>,
) -> Result<impl IntoResponse, RoutingApiError> {
    let cmd = RouteMessageCommand {
        user_id: UserId::new(request.user_id)?,
        message: request.message,
        preference: request.preference,
        context: request.context,
    };

    let result = state.route_message_handler().handle(cmd).await?;

    Ok(Json(RouteMessageResponse {
        decision: result.decision,
        context: result.context,
    }))
}

/// POST /api/outcomes - Report how an interaction went
pub async fn record_outcome(
    State(state): State<RoutingAppState>,
    Json(request): Json<RecordOutcomeRequest>,
) -> Result<impl IntoResponse, RoutingApiError> {
    let mode: RoutingMode = request.mode.parse()?;
    let metrics = OutcomeMetrics::new(
        request.response_time_ms,
        request.engagement_depth,
        request.silence_rate,
        request.fallback_triggered,
    )?;
    let cmd = RecordOutcomeCommand {
        user_id: UserId::new(request.user_id)?,
        outcome: InteractionOutcome::new(mode, request.success, metrics),
    };

    let result = state.record_outcome_handler().handle(cmd).await?;

    Ok(Json(result.context))
}

/// GET /api/users/:user_id/context - Read a user's routing context
pub async fn get_user_context(
    State(state): State<RoutingAppState>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, RoutingApiError> {
    let query = GetUserContextQuery {
        user_id: UserId::new(user_id)?,
    };
    let context = state.get_user_context_handler().handle(query).await?;
    Ok(Json(context))
}

/// DELETE /api/users/:user_id/context - Reset a user's routing context
pub async fn reset_user_context(
    State(state): State<RoutingAppState>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, RoutingApiError> {
    let cmd = ResetUserContextCommand {
        user_id: UserId::new(user_id)?,
    };
    let context = state.reset_user_context_handler().handle(cmd).await?;
    Ok(Json(context))
}

/// PUT /api/users/:user_id/preference - Store a preferred mode
pub async fn set_preferred_mode(
    State(state): State<RoutingAppState>,
    Path(user_id): Path<String>,
    Json(request): Json<SetPreferenceRequest>,
) -> Result<impl IntoResponse, RoutingApiError> {
    let mode = request
        .mode
        .as_deref()
        .map(str::parse::<RoutingMode>)
        .transpose()?;
    let cmd = SetPreferredModeCommand {
        user_id: UserId::new(user_id)?,
        mode,
    };
    let context = state.set_preferred_mode_handler().handle(cmd).await?;
    Ok(Json(context))
}

/// GET /api/metrics - Export the outcome history
pub async fn export_metrics(
    State(state): State<RoutingAppState>,
) -> Result<impl IntoResponse, RoutingApiError> {
    let records = state.export_metrics_handler().handle().await?;
    Ok(Json(records))
}

/// GET /api/metrics/compare - Field vs hybrid aggregates
pub async fn compare_modes(
    State(state): State<RoutingAppState>,
) -> Result<impl IntoResponse, RoutingApiError> {
    let comparative = state.compare_modes_handler().handle().await?;
    Ok(Json(comparative))
}

/// GET /health - Liveness probe
pub async fn health() -> &'static str {
    "ok"
}
