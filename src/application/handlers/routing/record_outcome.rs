//! RecordOutcomeHandler - Learn from what happened after a routing decision

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::domain::routing::{InteractionOutcome, UserContext};
use crate::ports::{ContextStoreError, MetricsError, MetricsRecorder, UserContextStore};

/// Command to record an interaction outcome
#[derive(Debug, Clone)]
pub struct RecordOutcomeCommand {
    pub user_id: UserId,
    pub outcome: InteractionOutcome,
}

/// Result of recording an outcome
#[derive(Debug, Clone)]
pub struct RecordOutcomeResult {
    pub context: UserContext,
}

/// Error type for recording an outcome
#[derive(Debug, thiserror::Error)]
pub enum RecordOutcomeError {
    #[error("Context store error: {0}")]
    Storage(#[from] ContextStoreError),

    #[error("Metrics error: {0}")]
    Metrics(#[from] MetricsError),
}

/// Handler that updates user context and appends to the metrics history
pub struct RecordOutcomeHandler {
    store: Arc<dyn UserContextStore>,
    metrics: Arc<dyn MetricsRecorder>,
}

impl RecordOutcomeHandler {
    pub fn new(store: Arc<dyn UserContextStore>, metrics: Arc<dyn MetricsRecorder>) -> Self {
        Self { store, metrics }
    }

    pub async fn handle(
        &self,
        cmd: RecordOutcomeCommand,
    ) -> Result<RecordOutcomeResult, RecordOutcomeError> {
        // 1. Fold the outcome into the user's context
        let context = self.store.update(&cmd.user_id, &cmd.outcome).await?;

        // 2. Append to the shared history
        self.metrics.record(cmd.outcome.to_mode_metrics()).await?;

        tracing::info!(
            user_id = %cmd.user_id,
            mode = %cmd.outcome.mode_used,
            success = cmd.outcome.success,
            session_count = context.session_count,
            streak = context.current_streak,
            field_success_rate = context.field_success_rate,
            "Recorded interaction outcome"
        );

        Ok(RecordOutcomeResult { context })
    }
}
