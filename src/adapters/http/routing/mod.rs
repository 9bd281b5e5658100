//! Routing HTTP adapter module.
//!
//! Provides REST API endpoints for routing decisions, outcome reporting,
//! user context management and metrics.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::ErrorResponse;
pub use handlers::RoutingAppState;
pub use routes::routing_routes;
