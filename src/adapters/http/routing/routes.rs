//! HTTP routes for routing endpoints.

use axum::routing::{get, post, put};
use axum::Router;

use super::handlers::{
    compare_modes, export_metrics, get_user_context, health, record_outcome, reset_user_context,
    route_message, set_preferred_mode, RoutingAppState,
};

/// Creates the routing router with all routes.
///
/// # Routes
/// - `POST /api/route` - Route a message
/// - `POST /api/outcomes` - Record an interaction outcome
/// - `GET /api/users/:user_id/context` - Read user context
/// - `DELETE /api/users/:user_id/context` - Reset user context
/// - `PUT /api/users/:user_id/preference` - Store a preferred mode
/// - `GET /api/metrics` - Export outcome history
/// - `GET /api/metrics/compare` - Comparative aggregates
/// - `GET /health` - Liveness probe
pub fn routing_routes(state: RoutingAppState) -> Router {
    Router::new()
        .route("/api/route", post(route_message))
        .route("/api/outcomes", post(record_outcome))
        .route(
            "/api/users/:user_id/context",
            get(get_user_context).delete(reset_user_context),
        )
        .route("/api/users/:user_id/preference", put(set_preferred_mode))
        .route("/api/metrics", get(export_metrics))
        .route("/api/metrics/compare", get(compare_modes))
        .route("/health", get(health))
        .with_state(state)
}
