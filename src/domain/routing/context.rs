//! Per-user adaptive routing state.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Timestamp, UnitScore, UserId, ValidationError};

use super::metrics::ModeMetrics;
use super::mode::RoutingMode;

/// Learning rates applied when an interaction outcome is recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextTuning {
    /// Added to `field_experience` per field-mode interaction.
    #[serde(default = "default_experience_increment")]
    pub experience_increment: f64,

    /// Weight of the newest observation in the success-rate EMA.
    #[serde(default = "default_success_alpha")]
    pub success_alpha: f64,

    /// Starting value of the success-rate EMA.
    #[serde(default = "default_success_prior")]
    pub success_prior: f64,
}

impl Default for ContextTuning {
    fn default() -> Self {
        Self {
            experience_increment: default_experience_increment(),
            success_alpha: default_success_alpha(),
            success_prior: default_success_prior(),
        }
    }
}

impl ContextTuning {
    /// Every rate must lie in [0, 1].
    pub fn validate(&self) -> Result<(), ValidationError> {
        UnitScore::try_new("experience_increment", self.experience_increment)?;
        UnitScore::try_new("success_alpha", self.success_alpha)?;
        UnitScore::try_new("success_prior", self.success_prior)?;
        Ok(())
    }
}

fn default_experience_increment() -> f64 {
    0.05
}

fn default_success_alpha() -> f64 {
    0.2
}

fn default_success_prior() -> f64 {
    0.5
}

/// Adaptive state tracked for one user.
///
/// Only the context store mutates this; the routing engine reads snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserContext {
    pub user_id: UserId,
    pub session_count: u32,
    pub field_experience: f64,
    pub field_success_rate: f64,
    pub preferred_mode: Option<RoutingMode>,
    pub last_mode_used: Option<RoutingMode>,
    pub current_streak: u32,
    pub updated_at: Timestamp,
}

impl UserContext {
    /// Creates a context with default values.
    pub fn new(user_id: UserId, tuning: &ContextTuning) -> Self {
        Self {
            user_id,
            session_count: 0,
            field_experience: 0.0,
            field_success_rate: tuning.success_prior.clamp(0.0, 1.0),
            preferred_mode: None,
            last_mode_used: None,
            current_streak: 0,
            updated_at: Timestamp::now(),
        }
    }

    /// Fewer than three recorded sessions.
    pub fn is_new_user(&self) -> bool {
        self.session_count < 3
    }

    /// Folds one interaction outcome into the context.
    pub fn apply_outcome(&mut self, outcome: &InteractionOutcome, tuning: &ContextTuning) {
        self.session_count = self.session_count.saturating_add(1);

        if outcome.mode_used == RoutingMode::Field {
            self.field_experience =
                (self.field_experience + tuning.experience_increment).clamp(0.0, 1.0);
            let observed = if outcome.success { 1.0 } else { 0.0 };
            self.field_success_rate = (tuning.success_alpha * observed
                + (1.0 - tuning.success_alpha) * self.field_success_rate)
                .clamp(0.0, 1.0);
        }

        // Streak must be computed against the previous mode before it is overwritten.
        if self.last_mode_used == Some(outcome.mode_used) {
            self.current_streak = self.current_streak.saturating_add(1);
        } else {
            self.current_streak = 1;
        }
        self.last_mode_used = Some(outcome.mode_used);
        self.updated_at = Timestamp::now();
    }

    /// Restores default values, keeping the user id.
    pub fn reset(&mut self, tuning: &ContextTuning) {
        *self = Self::new(self.user_id.clone(), tuning);
    }
}

/// Quality signals reported for one interaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeMetrics {
    pub response_time_ms: u64,
    pub engagement_depth: f64,
    pub silence_rate: f64,
    pub fallback_triggered: bool,
}

impl OutcomeMetrics {
    /// Creates validated outcome metrics.
    ///
    /// `engagement_depth` and `silence_rate` must lie in [0, 1].
    pub fn new(
        response_time_ms: u64,
        engagement_depth: f64,
        silence_rate: f64,
        fallback_triggered: bool,
    ) -> Result<Self, ValidationError> {
        check_unit("engagement_depth", engagement_depth)?;
        check_unit("silence_rate", silence_rate)?;
        Ok(Self {
            response_time_ms,
            engagement_depth,
            silence_rate,
            fallback_triggered,
        })
    }
}

fn check_unit(field: &str, value: f64) -> Result<(), ValidationError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(ValidationError::out_of_range(field, 0.0, 1.0, value));
    }
    Ok(())
}

/// What happened after a routing decision was acted upon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionOutcome {
    pub mode_used: RoutingMode,
    pub success: bool,
    pub metrics: OutcomeMetrics,
}

impl InteractionOutcome {
    pub fn new(mode_used: RoutingMode, success: bool, metrics: OutcomeMetrics) -> Self {
        Self {
            mode_used,
            success,
            metrics,
        }
    }

    /// The history record for this outcome, stamped now.
    pub fn to_mode_metrics(&self) -> ModeMetrics {
        ModeMetrics {
            mode: self.mode_used,
            response_time_ms: self.metrics.response_time_ms,
            engagement_depth: self.metrics.engagement_depth,
            silence_rate: self.metrics.silence_rate,
            fallback_triggered: self.metrics.fallback_triggered,
            timestamp: Timestamp::now(),
        }
    }
}
