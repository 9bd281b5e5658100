//! RouteMessageHandler - Choose a pipeline for an incoming message

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::domain::routing::{ModePreference, RoutingDecision, RoutingEngine};
use crate::ports::{ContextStoreError, UserContextStore};

/// Command to route a message
#[derive(Debug, Clone)]
pub struct RouteMessageCommand {
    pub user_id: UserId,
    pub message: String,
    /// Raw preference string from the caller; unknown values are ignored.
    pub preference: Option<String>,
    /// Opaque caller data, returned untouched.
    pub context: Option<serde_json::Value>,
}

/// Result of routing a message
#[derive(Debug, Clone)]
pub struct RouteMessageResult {
    pub decision: RoutingDecision,
    pub context: Option<serde_json::Value>,
}

/// Error type for routing a message
#[derive(Debug, thiserror::Error)]
pub enum RouteMessageError {
    #[error("Context store error: {0}")]
    Storage(#[from] ContextStoreError),
}

/// Handler for routing messages
pub struct RouteMessageHandler {
    store: Arc<dyn UserContextStore>,
    engine: Arc<RoutingEngine>,
}

impl RouteMessageHandler {
    pub fn new(store: Arc<dyn UserContextStore>, engine: Arc<RoutingEngine>) -> Self {
        Self { store, engine }
    }

    pub async fn handle(
        &self,
        cmd: RouteMessageCommand,
    ) -> Result<RouteMessageResult, RouteMessageError> {
        let preference = cmd.preference.as_deref().and_then(|raw| {
            let parsed = ModePreference::parse(raw);
            if parsed.is_none() {
                tracing::debug!(preference = raw, "Ignoring unrecognized mode preference");
            }
            parsed
        });

        // 1. Load (or create) the user's adaptive context
        let user_context = self.store.get_or_create(&cmd.user_id).await?;

        // 2. Classify and decide
        let decision = self.engine.route(&cmd.message, &user_context, preference);

        tracing::info!(
            user_id = %cmd.user_id,
            decision_id = %decision.decision_id,
            mode = %decision.selected_mode,
            confidence = decision.confidence.value(),
            input_type = %decision.metadata.analysis.input_type,
            "Routed message"
        );

        Ok(RouteMessageResult {
            decision,
            context: cmd.context,
        })
    }
}
