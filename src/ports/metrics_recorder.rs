//! Metrics Recorder Port - bounded history of interaction outcomes.
//!
//! Recording never fails on overflow: the oldest record is evicted.

use async_trait::async_trait;

use crate::domain::routing::{ComparativeMetrics, ModeMetrics};

/// Errors that can occur in a metrics backend.
#[derive(Debug, thiserror::Error)]
pub enum MetricsError {
    #[error("Metrics sink unavailable: {0}")]
    Unavailable(String),
}

/// Port for recording and reading outcome metrics
#[async_trait]
pub trait MetricsRecorder: Send + Sync {
    /// Append a record, evicting the oldest if the buffer is full.
    async fn record(&self, metrics: ModeMetrics) -> Result<(), MetricsError>;

    /// Oldest-first snapshot of the retained history.
    async fn export(&self) -> Result<Vec<ModeMetrics>, MetricsError>;

    /// Per-mode aggregates over the retained history.
    async fn comparative(&self) -> Result<ComparativeMetrics, MetricsError>;
}
