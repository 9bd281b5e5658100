//! Routing engine configuration
//!
//! Decision cut-offs, factor weights, factor thresholds and the learning
//! rates used to update user context. All sections fall back to the
//! built-in defaults when absent.

use std::sync::Arc;

use serde::Deserialize;

use crate::domain::routing::{
    ContextTuning, DecisionThresholds, FactorThresholds, PatternClassifier, RoutingEngine,
    RuleBasedPolicy, WeightTable,
};

use super::error::ValidationError;

/// Routing configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RoutingConfig {
    /// Score cut-offs between field, uncertain and hybrid
    #[serde(default)]
    pub thresholds: DecisionThresholds,

    /// Per-factor weights of the rule-based policy
    #[serde(default)]
    pub weights: WeightTable,

    /// Cut-offs at which each factor fires
    #[serde(default)]
    pub factors: FactorThresholds,

    /// Learning rates for user context updates
    #[serde(default)]
    pub context: ContextTuning,
}

impl RoutingConfig {
    /// Validate routing configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.thresholds.validate()?;
        self.weights.validate()?;
        self.context.validate()?;
        Ok(())
    }

    /// Builds the engine with the pattern classifier and rule-based policy.
    pub fn build_engine(&self) -> RoutingEngine {
        RoutingEngine::new(
            Arc::new(PatternClassifier::new()),
            Arc::new(RuleBasedPolicy::new(
                self.weights.clone(),
                self.factors.clone(),
            )),
            self.thresholds.clone(),
        )
    }
}
