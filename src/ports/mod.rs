//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `UserContextStore` - Per-user adaptive routing state
//! - `MetricsRecorder` - Bounded outcome history and aggregates

mod metrics_recorder;
mod user_context_store;

pub use metrics_recorder::{MetricsError, MetricsRecorder};
pub use user_context_store::{ContextStoreError, UserContextStore};
