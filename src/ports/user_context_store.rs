//! User Context Store Port - Interface for per-user adaptive routing state.
//!
//! The store owns every `UserContext`. Implementations must serialize
//! mutations per user id so concurrent outcome reports for the same user
//! are never lost; distinct users must not contend with each other.

use async_trait::async_trait;

use crate::domain::foundation::UserId;
use crate::domain::routing::{InteractionOutcome, RoutingMode, UserContext};

/// Errors that can occur in a context store backend.
///
/// The in-memory adapter never produces these; durable backends may.
#[derive(Debug, thiserror::Error)]
pub enum ContextStoreError {
    #[error("Storage backend unavailable: {0}")]
    Unavailable(String),

    #[error("Failed to serialize context: {0}")]
    SerializationFailed(String),
}

/// Port for reading and updating per-user routing context
#[async_trait]
pub trait UserContextStore: Send + Sync {
    /// Load the context for a user, creating defaults on first access.
    async fn get_or_create(&self, user_id: &UserId) -> Result<UserContext, ContextStoreError>;

    /// Fold an interaction outcome into the user's context.
    ///
    /// # Returns
    /// The context after the update
    async fn update(
        &self,
        user_id: &UserId,
        outcome: &InteractionOutcome,
    ) -> Result<UserContext, ContextStoreError>;

    /// Record (or clear) the user's stored mode preference.
    async fn set_preferred_mode(
        &self,
        user_id: &UserId,
        mode: Option<RoutingMode>,
    ) -> Result<UserContext, ContextStoreError>;

    /// Restore the user's context to defaults.
    async fn reset(&self, user_id: &UserId) -> Result<UserContext, ContextStoreError>;
}
