//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod routing;

pub use routing::{
    // Commands and results
    RecordOutcomeCommand,
    RecordOutcomeError,
    RecordOutcomeResult,
    ResetUserContextCommand,
    RouteMessageCommand,
    RouteMessageError,
    RouteMessageResult,
    SetPreferredModeCommand,
    // Queries
    GetUserContextQuery,
    // Handlers
    CompareModesHandler,
    ExportMetricsHandler,
    GetUserContextHandler,
    RecordOutcomeHandler,
    ResetUserContextHandler,
    RouteMessageHandler,
    SetPreferredModeHandler,
};
