//! CompareModesHandler - Per-mode aggregates over the outcome history

use std::sync::Arc;

use crate::domain::routing::ComparativeMetrics;
use crate::ports::{MetricsError, MetricsRecorder};

/// Handler returning field vs hybrid aggregates
pub struct CompareModesHandler {
    metrics: Arc<dyn MetricsRecorder>,
}

impl CompareModesHandler {
    pub fn new(metrics: Arc<dyn MetricsRecorder>) -> Self {
        Self { metrics }
    }

    pub async fn handle(&self) -> Result<ComparativeMetrics, MetricsError> {
        self.metrics.comparative().await
    }
}
