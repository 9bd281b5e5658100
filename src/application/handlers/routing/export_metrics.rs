//! ExportMetricsHandler - Snapshot of the outcome history

use std::sync::Arc;

use crate::domain::routing::ModeMetrics;
use crate::ports::{MetricsError, MetricsRecorder};

/// Handler returning an oldest-first copy of the outcome history
pub struct ExportMetricsHandler {
    metrics: Arc<dyn MetricsRecorder>,
}

impl ExportMetricsHandler {
    pub fn new(metrics: Arc<dyn MetricsRecorder>) -> Self {
        Self { metrics }
    }

    pub async fn handle(&self) -> Result<Vec<ModeMetrics>, MetricsError> {
        self.metrics.export().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryMetricsRecorder;

    #[tokio::test]
    async fn empty_history_exports_empty_list() {
        let handler = ExportMetricsHandler::new(Arc::new(InMemoryMetricsRecorder::new()));

        assert!(handler.handle().await.unwrap().is_empty());
    }
}
