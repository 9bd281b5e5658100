//! In-Memory User Context Store Adapter
//!
//! Keeps per-user routing context in a process-local map.
//! Useful for testing, development and single-server deployments.
//!
//! Each user gets its own async mutex, so concurrent updates for one user
//! are applied one at a time while other users proceed independently. The
//! outer map lock is held only long enough to look up or insert a slot.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

use crate::domain::foundation::UserId;
use crate::domain::routing::{ContextTuning, InteractionOutcome, RoutingMode, UserContext};
use crate::ports::{ContextStoreError, UserContextStore};

type ContextSlot = Arc<Mutex<UserContext>>;

/// In-memory storage for user routing context
#[derive(Debug, Clone)]
pub struct InMemoryUserContextStore {
    contexts: Arc<RwLock<HashMap<UserId, ContextSlot>>>,
    tuning: ContextTuning,
}

impl InMemoryUserContextStore {
    /// Create a store with default learning rates
    pub fn new() -> Self {
        Self::with_tuning(ContextTuning::default())
    }

    /// Create a store with custom learning rates
    pub fn with_tuning(tuning: ContextTuning) -> Self {
        Self {
            contexts: Arc::new(RwLock::new(HashMap::new())),
            tuning,
        }
    }

    /// Number of users with a context
    pub async fn user_count(&self) -> usize {
        self.contexts.read().await.len()
    }

    /// Drop every context (useful for tests)
    pub async fn clear(&self) {
        self.contexts.write().await.clear();
    }

    async fn slot(&self, user_id: &UserId) -> ContextSlot {
        if let Some(slot) = self.contexts.read().await.get(user_id) {
            return slot.clone();
        }

        let mut contexts = self.contexts.write().await;
        contexts
            .entry(user_id.clone())
            .or_insert_with(|| {
                tracing::debug!(user_id = %user_id, "Creating default routing context");
                Arc::new(Mutex::new(UserContext::new(user_id.clone(), &self.tuning)))
            })
            .clone()
    }
}

impl Default for InMemoryUserContextStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserContextStore for InMemoryUserContextStore {
    async fn get_or_create(&self, user_id: &UserId) -> Result<UserContext, ContextStoreError> {
        let slot = self.slot(user_id).await;
        let context = slot.lock().await.clone();
        Ok(context)
    }

    async fn update(
        &self,
        user_id: &UserId,
        outcome: &InteractionOutcome,
    ) -> Result<UserContext, ContextStoreError> {
        let slot = self.slot(user_id).await;
        let mut context = slot.lock().await;
        context.apply_outcome(outcome, &self.tuning);
        Ok(context.clone())
    }

    async fn set_preferred_mode(
        &self,
        user_id: &UserId,
        mode: Option<RoutingMode>,
    ) -> Result<UserContext, ContextStoreError> {
        let slot = self.slot(user_id).await;
        let mut context = slot.lock().await;
        context.preferred_mode = mode;
        Ok(context.clone())
    }

    async fn reset(&self, user_id: &UserId) -> Result<UserContext, ContextStoreError> {
        let slot = self.slot(user_id).await;
        let mut context = slot.lock().await;
        context.reset(&self.tuning);
        Ok(context.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::routing::OutcomeMetrics;

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    fn outcome(mode: RoutingMode, success: bool) -> InteractionOutcome {
        InteractionOutcome::new(mode, success, OutcomeMetrics::new(200, 0.6, 0.1, false).unwrap())
    }

    #[tokio::test]
    async fn get_or_create_returns_defaults_on_first_access() {
        let store = InMemoryUserContextStore::new();

        let ctx = store.get_or_create(&user("alice")).await.unwrap();

        assert_eq!(ctx.user_id.as_str(), "alice");
        assert_eq!(ctx.session_count, 0);
        assert_eq!(ctx.field_success_rate, 0.5);
        assert_eq!(store.user_count().await, 1);
    }

    #[tokio::test]
    async fn get_or_create_is_idempotent() {
        let store = InMemoryUserContextStore::new();
        store.update(&user("alice"), &outcome(RoutingMode::Field, true)).await.unwrap();

        let ctx = store.get_or_create(&user("alice")).await.unwrap();

        assert_eq!(ctx.session_count, 1);
        assert_eq!(store.user_count().await, 1);
    }

    #[tokio::test]
    async fn update_applies_outcome() {
        let store = InMemoryUserContextStore::new();

        let ctx = store.update(&user("bob"), &outcome(RoutingMode::Field, false)).await.unwrap();

        assert_eq!(ctx.session_count, 1);
        assert!((ctx.field_experience - 0.05).abs() < 1e-12);
        assert!((ctx.field_success_rate - 0.4).abs() < 1e-12);
        assert_eq!(ctx.current_streak, 1);
        assert_eq!(ctx.last_mode_used, Some(RoutingMode::Field));
    }

    #[tokio::test]
    async fn users_are_isolated() {
        let store = InMemoryUserContextStore::new();
        store.update(&user("a"), &outcome(RoutingMode::Field, true)).await.unwrap();

        let other = store.get_or_create(&user("b")).await.unwrap();

        assert_eq!(other.session_count, 0);
    }

    #[tokio::test]
    async fn reset_restores_defaults() {
        let store = InMemoryUserContextStore::new();
        store.update(&user("a"), &outcome(RoutingMode::Field, true)).await.unwrap();
        store.set_preferred_mode(&user("a"), Some(RoutingMode::Field)).await.unwrap();

        let ctx = store.reset(&user("a")).await.unwrap();

        assert_eq!(ctx.session_count, 0);
        assert_eq!(ctx.preferred_mode, None);
        assert_eq!(ctx.last_mode_used, None);
    }

    #[tokio::test]
    async fn set_preferred_mode_is_stored() {
        let store = InMemoryUserContextStore::new();

        store.set_preferred_mode(&user("a"), Some(RoutingMode::Hybrid)).await.unwrap();
        let ctx = store.get_or_create(&user("a")).await.unwrap();

        assert_eq!(ctx.preferred_mode, Some(RoutingMode::Hybrid));
    }

    #[tokio::test]
    async fn custom_tuning_is_used() {
        let store = InMemoryUserContextStore::with_tuning(ContextTuning {
            experience_increment: 0.5,
            success_alpha: 0.5,
            success_prior: 0.0,
        });

        let ctx = store.update(&user("a"), &outcome(RoutingMode::Field, true)).await.unwrap();

        assert!((ctx.field_experience - 0.5).abs() < 1e-12);
        assert!((ctx.field_success_rate - 0.5).abs() < 1e-12);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_updates_for_one_user_are_not_lost() {
        let store = Arc::new(InMemoryUserContextStore::new());
        let id = user("busy");

        let mut handles = Vec::new();
        for _ in 0..64 {
            let store = store.clone();
            let id = id.clone();
            handles.push(tokio::spawn(async move {
                store.update(&id, &outcome(RoutingMode::Field, true)).await.unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let ctx = store.get_or_create(&id).await.unwrap();
        assert_eq!(ctx.session_count, 64);
        assert_eq!(ctx.current_streak, 64);
        assert_eq!(ctx.field_experience, 1.0);
    }
}
