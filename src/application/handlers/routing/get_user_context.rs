//! GetUserContextHandler - Read a user's routing context

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::domain::routing::UserContext;
use crate::ports::{ContextStoreError, UserContextStore};

/// Query for a user's context
#[derive(Debug, Clone)]
pub struct GetUserContextQuery {
    pub user_id: UserId,
}

/// Handler for reading user context
pub struct GetUserContextHandler {
    store: Arc<dyn UserContextStore>,
}

impl GetUserContextHandler {
    pub fn new(store: Arc<dyn UserContextStore>) -> Self {
        Self { store }
    }

    /// Missing contexts are created with defaults, never reported as absent.
    pub async fn handle(&self, query: GetUserContextQuery) -> Result<UserContext, ContextStoreError> {
        self.store.get_or_create(&query.user_id).await
    }
}
