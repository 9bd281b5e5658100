//! SetPreferredModeHandler - Remember which mode a user says they prefer

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::domain::routing::{RoutingMode, UserContext};
use crate::ports::{ContextStoreError, UserContextStore};

/// Command to store (or clear) a user's preferred mode
#[derive(Debug, Clone)]
pub struct SetPreferredModeCommand {
    pub user_id: UserId,
    pub mode: Option<RoutingMode>,
}

/// Handler for stored mode preferences.
///
/// The stored preference is informational; callers that want to force a mode
/// pass it as the explicit preference when routing.
pub struct SetPreferredModeHandler {
    store: Arc<dyn UserContextStore>,
}

impl SetPreferredModeHandler {
    pub fn new(store: Arc<dyn UserContextStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, cmd: SetPreferredModeCommand) -> Result<UserContext, ContextStoreError> {
        self.store.set_preferred_mode(&cmd.user_id, cmd.mode).await
    }
}
