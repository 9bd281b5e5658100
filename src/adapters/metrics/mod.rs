//! Metrics recorder adapters.
//!
//! - `InMemoryMetricsRecorder` - Bounded in-process ring buffer

mod in_memory;

pub use in_memory::InMemoryMetricsRecorder;
