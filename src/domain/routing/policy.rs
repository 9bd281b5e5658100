//! Scoring policy.
//!
//! The engine turns an analysis and a user context into a [`FeatureVector`],
//! then asks a [`RoutingPolicy`] for a score. The rule-based default applies a
//! [`WeightTable`] of additive nudges around a neutral prior; a learned model
//! can implement the same trait without touching call sites.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{UnitScore, ValidationError};

use super::analysis::{InputAnalysis, InputType};
use super::context::UserContext;
use super::mode::RoutingMode;

/// Neutral starting score that favors neither mode.
pub const NEUTRAL_PRIOR: f64 = 0.5;

/// A named, weighted contribution to a routing score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutingFactor {
    pub name: String,
    pub weight: UnitScore,
    pub direction: RoutingMode,
    pub rationale: String,
}

impl RoutingFactor {
    pub fn new(
        name: impl Into<String>,
        weight: f64,
        direction: RoutingMode,
        rationale: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            weight: UnitScore::new(weight),
            direction,
            rationale: rationale.into(),
        }
    }

    /// Weight with sign: positive toward field, negative toward hybrid.
    pub fn signed_weight(&self) -> f64 {
        match self.direction {
            RoutingMode::Field => self.weight.value(),
            RoutingMode::Hybrid => -self.weight.value(),
        }
    }
}

/// Inputs to the scoring policy, flattened from analysis and context.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    pub input_type: InputType,
    pub complexity: f64,
    pub emotional_intensity: f64,
    pub silence_acceptable: bool,
    pub requires_reliable_response: bool,
    pub session_count: u32,
    pub field_experience: f64,
    pub field_success_rate: f64,
    pub current_streak: u32,
    pub last_mode_used: Option<RoutingMode>,
}

impl FeatureVector {
    pub fn from_inputs(analysis: &InputAnalysis, context: &UserContext) -> Self {
        Self {
            input_type: analysis.input_type,
            complexity: analysis.complexity,
            emotional_intensity: analysis.emotional_intensity,
            silence_acceptable: analysis.silence_acceptable,
            requires_reliable_response: analysis.requires_reliable_response,
            session_count: context.session_count,
            field_experience: context.field_experience,
            field_success_rate: context.field_success_rate,
            current_streak: context.current_streak,
            last_mode_used: context.last_mode_used,
        }
    }
}

/// Magnitudes of each rule's nudge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightTable {
    #[serde(default = "w_contemplative")]
    pub contemplative_type: f64,
    #[serde(default = "w_practical")]
    pub practical_type: f64,
    #[serde(default = "w_high_emotion")]
    pub high_emotion: f64,
    #[serde(default = "w_experienced")]
    pub experienced_user: f64,
    #[serde(default = "w_new_user")]
    pub new_user: f64,
    #[serde(default = "w_high_success")]
    pub high_success: f64,
    #[serde(default = "w_low_success")]
    pub low_success: f64,
    #[serde(default = "w_silence")]
    pub silence_acceptable: f64,
    #[serde(default = "w_reliable")]
    pub reliability_required: f64,
    #[serde(default = "w_complexity")]
    pub high_complexity: f64,
    #[serde(default = "w_streak")]
    pub streak_variety: f64,
}

fn w_contemplative() -> f64 {
    0.20
}
fn w_practical() -> f64 {
    0.20
}
fn w_high_emotion() -> f64 {
    0.15
}
fn w_experienced() -> f64 {
    0.20
}
fn w_new_user() -> f64 {
    0.25
}
fn w_high_success() -> f64 {
    0.15
}
fn w_low_success() -> f64 {
    0.20
}
fn w_silence() -> f64 {
    0.15
}
fn w_reliable() -> f64 {
    0.20
}
fn w_complexity() -> f64 {
    0.10
}
fn w_streak() -> f64 {
    0.10
}

impl Default for WeightTable {
    fn default() -> Self {
        Self {
            contemplative_type: w_contemplative(),
            practical_type: w_practical(),
            high_emotion: w_high_emotion(),
            experienced_user: w_experienced(),
            new_user: w_new_user(),
            high_success: w_high_success(),
            low_success: w_low_success(),
            silence_acceptable: w_silence(),
            reliability_required: w_reliable(),
            high_complexity: w_complexity(),
            streak_variety: w_streak(),
        }
    }
}

impl WeightTable {
    /// Every weight must lie in [0, 1].
    pub fn validate(&self) -> Result<(), ValidationError> {
        let entries = [
            ("contemplative_type", self.contemplative_type),
            ("practical_type", self.practical_type),
            ("high_emotion", self.high_emotion),
            ("experienced_user", self.experienced_user),
            ("new_user", self.new_user),
            ("high_success", self.high_success),
            ("low_success", self.low_success),
            ("silence_acceptable", self.silence_acceptable),
            ("reliability_required", self.reliability_required),
            ("high_complexity", self.high_complexity),
            ("streak_variety", self.streak_variety),
        ];
        for (field, value) in entries {
            UnitScore::try_new(field, value)?;
        }
        Ok(())
    }
}

/// Cut-offs at which each rule fires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorThresholds {
    /// Intensity strictly above this counts as high emotion.
    #[serde(default = "t_high")]
    pub high_emotion: f64,
    /// Experience strictly above this counts as an experienced user.
    #[serde(default = "t_high")]
    pub experienced_user: f64,
    /// Users with fewer sessions than this get the new-user bias.
    #[serde(default = "t_new_user_sessions")]
    pub new_user_sessions: u32,
    #[serde(default = "t_high_success")]
    pub high_success: f64,
    #[serde(default = "t_low_success")]
    pub low_success: f64,
    #[serde(default = "t_high")]
    pub high_complexity: f64,
    /// Streaks strictly longer than this trigger variety pressure.
    #[serde(default = "t_streak")]
    pub max_streak: u32,
}

fn t_high() -> f64 {
    0.7
}
fn t_new_user_sessions() -> u32 {
    3
}
fn t_high_success() -> f64 {
    0.75
}
fn t_low_success() -> f64 {
    0.4
}
fn t_streak() -> u32 {
    5
}

impl Default for FactorThresholds {
    fn default() -> Self {
        Self {
            high_emotion: t_high(),
            experienced_user: t_high(),
            new_user_sessions: t_new_user_sessions(),
            high_success: t_high_success(),
            low_success: t_low_success(),
            high_complexity: t_high(),
            max_streak: t_streak(),
        }
    }
}

/// Output of a scoring policy.
#[derive(Debug, Clone, PartialEq)]
pub struct PolicyScore {
    /// Unclamped sum of prior and nudges.
    pub raw: f64,
    /// `raw` clamped to [0, 1]; higher favors field.
    pub score: UnitScore,
    /// Applied factors in application order.
    pub factors: Vec<RoutingFactor>,
}

/// Scores a feature vector. Higher scores favor field mode.
pub trait RoutingPolicy: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    fn score(&self, features: &FeatureVector) -> PolicyScore;
}

/// Interpretable additive policy.
#[derive(Debug, Clone, Default)]
pub struct RuleBasedPolicy {
    weights: WeightTable,
    thresholds: FactorThresholds,
}

impl RuleBasedPolicy {
    pub fn new(weights: WeightTable, thresholds: FactorThresholds) -> Self {
        Self {
            weights,
            thresholds,
        }
    }

    pub fn weights(&self) -> &WeightTable {
        &self.weights
    }
}

impl RoutingPolicy for RuleBasedPolicy {
    fn name(&self) -> &'static str {
        "rule_based"
    }

    fn score(&self, f: &FeatureVector) -> PolicyScore {
        let w = &self.weights;
        let t = &self.thresholds;
        let mut factors = Vec::new();

        if f.input_type.is_contemplative() {
            factors.push(RoutingFactor::new(
                "input_type",
                w.contemplative_type,
                RoutingMode::Field,
                format!("{} input benefits from open-ended space", f.input_type),
            ));
        } else if f.input_type == InputType::Practical {
            factors.push(RoutingFactor::new(
                "input_type",
                w.practical_type,
                RoutingMode::Hybrid,
                "practical input needs a concrete answer",
            ));
        }

        if f.emotional_intensity > t.high_emotion {
            factors.push(RoutingFactor::new(
                "emotional_intensity",
                w.high_emotion,
                RoutingMode::Field,
                format!("high emotional intensity ({:.2})", f.emotional_intensity),
            ));
        }

        if f.field_experience > t.experienced_user {
            factors.push(RoutingFactor::new(
                "field_experience",
                w.experienced_user,
                RoutingMode::Field,
                format!("experienced with field mode ({:.2})", f.field_experience),
            ));
        } else if f.session_count < t.new_user_sessions {
            factors.push(RoutingFactor::new(
                "new_user",
                w.new_user,
                RoutingMode::Hybrid,
                format!("new user ({} sessions), start with reliable mode", f.session_count),
            ));
        }

        if f.field_success_rate > t.high_success {
            factors.push(RoutingFactor::new(
                "field_success_rate",
                w.high_success,
                RoutingMode::Field,
                format!("field mode has worked well ({:.2})", f.field_success_rate),
            ));
        } else if f.field_success_rate < t.low_success {
            factors.push(RoutingFactor::new(
                "field_success_rate",
                w.low_success,
                RoutingMode::Hybrid,
                format!("field mode has struggled ({:.2})", f.field_success_rate),
            ));
        }

        if f.silence_acceptable {
            factors.push(RoutingFactor::new(
                "silence_acceptable",
                w.silence_acceptable,
                RoutingMode::Field,
                "silence is an acceptable response",
            ));
        } else if f.requires_reliable_response {
            factors.push(RoutingFactor::new(
                "requires_reliable_response",
                w.reliability_required,
                RoutingMode::Hybrid,
                "a reliable response is expected",
            ));
        }

        if f.complexity > t.high_complexity {
            factors.push(RoutingFactor::new(
                "complexity",
                w.high_complexity,
                RoutingMode::Field,
                format!("high complexity ({:.2})", f.complexity),
            ));
        }

        if f.current_streak > t.max_streak {
            if let Some(last) = f.last_mode_used {
                factors.push(RoutingFactor::new(
                    "mode_streak",
                    w.streak_variety,
                    last.opposite(),
                    format!("{} consecutive {} sessions, encourage variety", f.current_streak, last),
                ));
            }
        }

        let raw = NEUTRAL_PRIOR + factors.iter().map(RoutingFactor::signed_weight).sum::<f64>();

        PolicyScore {
            raw,
            score: UnitScore::new(raw),
            factors,
        }
    }
}
