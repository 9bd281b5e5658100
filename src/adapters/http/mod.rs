//! HTTP adapters - REST API implementations.

pub mod routing;

pub use routing::{routing_routes, RoutingAppState};
