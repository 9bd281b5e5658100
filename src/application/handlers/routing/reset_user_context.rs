//! ResetUserContextHandler - Restore a user's routing context to defaults

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::domain::routing::UserContext;
use crate::ports::{ContextStoreError, UserContextStore};

/// Command to reset a user's context
#[derive(Debug, Clone)]
pub struct ResetUserContextCommand {
    pub user_id: UserId,
}

/// Handler for user-initiated context resets
pub struct ResetUserContextHandler {
    store: Arc<dyn UserContextStore>,
}

impl ResetUserContextHandler {
    pub fn new(store: Arc<dyn UserContextStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, cmd: ResetUserContextCommand) -> Result<UserContext, ContextStoreError> {
        let context = self.store.reset(&cmd.user_id).await?;
        tracing::info!(user_id = %cmd.user_id, "Reset routing context");
        Ok(context)
    }
}
