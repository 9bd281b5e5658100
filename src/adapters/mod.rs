//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `context_store` - User context storage (in-memory)
//! - `metrics` - Outcome metrics recording (in-memory)
//! - `http` - REST API built on axum

pub mod context_store;
pub mod http;
pub mod metrics;

pub use context_store::InMemoryUserContextStore;
pub use metrics::InMemoryMetricsRecorder;
