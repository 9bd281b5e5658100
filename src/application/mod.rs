//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Following CQRS, it separates command handlers (write) from query handlers (read).
//! Every handler receives its dependencies explicitly; there is no process-wide state.

pub mod handlers;

pub use handlers::{
    CompareModesHandler, ExportMetricsHandler, GetUserContextHandler, RecordOutcomeHandler,
    ResetUserContextHandler, RouteMessageHandler, SetPreferredModeHandler,
};
