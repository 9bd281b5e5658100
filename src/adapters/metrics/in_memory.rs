//! In-memory metrics recorder implementation.
//!
//! Holds the outcome history in a bounded ring guarded by a single mutex,
//! which keeps FIFO order and the capacity cap intact under concurrent writers.
//! Does not persist data across restarts; a telemetry sink can drain it
//! through [`MetricsRecorder::export`].

use async_trait::async_trait;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::domain::routing::{ComparativeMetrics, MetricsHistory, ModeMetrics};
use crate::ports::{MetricsError, MetricsRecorder};

/// In-memory implementation of the MetricsRecorder port.
#[derive(Debug, Default)]
pub struct InMemoryMetricsRecorder {
    history: Mutex<MetricsHistory>,
}

impl InMemoryMetricsRecorder {
    /// Creates a recorder with the default capacity.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a recorder retaining at most `capacity` records.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            history: Mutex::new(MetricsHistory::with_capacity(capacity)),
        }
    }

    /// Returns the number of retained records.
    pub fn len(&self) -> usize {
        self.history().len()
    }

    /// Returns true if no records are retained.
    pub fn is_empty(&self) -> bool {
        self.history().is_empty()
    }

    /// Clears all records.
    pub fn clear(&self) {
        self.history().clear();
    }

    fn history(&self) -> MutexGuard<'_, MetricsHistory> {
        // The history is always left consistent, so a poisoned lock is still usable.
        self.history.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl MetricsRecorder for InMemoryMetricsRecorder {
    async fn record(&self, metrics: ModeMetrics) -> Result<(), MetricsError> {
        if let Some(evicted) = self.history().push(metrics) {
            tracing::trace!(mode = %evicted.mode, "Evicted oldest metrics record");
        }
        Ok(())
    }

    async fn export(&self) -> Result<Vec<ModeMetrics>, MetricsError> {
        Ok(self.history().snapshot())
    }

    async fn comparative(&self) -> Result<ComparativeMetrics, MetricsError> {
        Ok(self.history().comparative())
    }
}
