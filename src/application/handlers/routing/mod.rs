//! Routing Command and Query Handlers
//!
//! ## Commands
//! - `RouteMessage` - Classify a message and choose a pipeline
//! - `RecordOutcome` - Update user context and metrics after an interaction
//! - `ResetUserContext` - Restore a user's context to defaults
//! - `SetPreferredMode` - Store a user's stated mode preference
//!
//! ## Queries
//! - `GetUserContext` - Read a user's adaptive context
//! - `ExportMetrics` - Snapshot of the outcome history
//! - `CompareModes` - Field vs hybrid aggregates

mod compare_modes;
mod export_metrics;
mod get_user_context;
mod record_outcome;
mod reset_user_context;
mod route_message;
mod set_preferred_mode;

pub use compare_modes::CompareModesHandler;
pub use export_metrics::ExportMetricsHandler;
pub use get_user_context::{GetUserContextHandler, GetUserContextQuery};
pub use record_outcome::{
    RecordOutcomeCommand, RecordOutcomeError, RecordOutcomeHandler, RecordOutcomeResult,
};
pub use reset_user_context::{ResetUserContextCommand, ResetUserContextHandler};
pub use route_message::{
    RouteMessageCommand, RouteMessageError, RouteMessageHandler, RouteMessageResult,
};
pub use set_preferred_mode::{SetPreferredModeCommand, SetPreferredModeHandler};
