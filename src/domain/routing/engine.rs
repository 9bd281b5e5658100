//! Routing engine - the decision procedure.
//!
//! Precedence, highest first:
//!
//! 1. Crisis override: crisis input always goes to hybrid with no fallback.
//! 2. Explicit caller preference for `field` or `hybrid`.
//! 3. Weighted scoring through the configured [`RoutingPolicy`], then
//!    thresholding with an uncertain band that resolves to hybrid.
//!
//! The engine is pure: it never mutates user context and never fails.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::domain::foundation::{DecisionId, Timestamp, UnitScore, ValidationError};

use super::analysis::InputAnalysis;
use super::classifier::{Classifier, PatternClassifier};
use super::context::UserContext;
use super::mode::{ModePreference, RoutingMode};
use super::policy::{FeatureVector, RoutingFactor, RoutingPolicy, RuleBasedPolicy};

/// Scores at or above this select field mode.
pub const FIELD_THRESHOLD: f64 = 0.6;

/// Scores at or below this select hybrid mode.
pub const HYBRID_THRESHOLD: f64 = 0.4;

/// Confidence reported when the score lands between the two thresholds.
pub const UNCERTAIN_CONFIDENCE: f64 = 0.5;

pub const CRISIS_REASON: &str = "crisis detected — reliable response required";

/// Named, tunable cut-offs for turning a score into a mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionThresholds {
    #[serde(default = "default_field_threshold")]
    pub field_threshold: f64,
    #[serde(default = "default_hybrid_threshold")]
    pub hybrid_threshold: f64,
    #[serde(default = "default_uncertain_confidence")]
    pub uncertain_confidence: f64,
}

fn default_field_threshold() -> f64 {
    FIELD_THRESHOLD
}

fn default_hybrid_threshold() -> f64 {
    HYBRID_THRESHOLD
}

fn default_uncertain_confidence() -> f64 {
    UNCERTAIN_CONFIDENCE
}

impl Default for DecisionThresholds {
    fn default() -> Self {
        Self {
            field_threshold: FIELD_THRESHOLD,
            hybrid_threshold: HYBRID_THRESHOLD,
            uncertain_confidence: UNCERTAIN_CONFIDENCE,
        }
    }
}

impl DecisionThresholds {
    /// Thresholds must be ordered inside [0, 1].
    pub fn validate(&self) -> Result<(), ValidationError> {
        UnitScore::try_new("field_threshold", self.field_threshold)?;
        UnitScore::try_new("hybrid_threshold", self.hybrid_threshold)?;
        UnitScore::try_new("uncertain_confidence", self.uncertain_confidence)?;
        if self.hybrid_threshold >= self.field_threshold {
            return Err(ValidationError::invalid_format(
                "hybrid_threshold",
                "must be below field_threshold",
            ));
        }
        Ok(())
    }

    /// Maps a score to a mode and confidence.
    pub fn select(&self, score: UnitScore) -> (RoutingMode, UnitScore) {
        let s = score.value();
        if s >= self.field_threshold {
            (RoutingMode::Field, score)
        } else if s <= self.hybrid_threshold {
            (RoutingMode::Hybrid, score.complement())
        } else {
            // Ties lean toward the reliable pipeline.
            (RoutingMode::Hybrid, UnitScore::new(self.uncertain_confidence))
        }
    }
}

/// Which precedence rule produced a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionPath {
    CrisisOverride,
    ExplicitPreference,
    WeightedScore,
}

/// Explanation attached to every decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionMetadata {
    pub path: DecisionPath,
    pub analysis: InputAnalysis,
    pub context: UserContext,
    pub factors: Vec<RoutingFactor>,
    /// Clamped policy score; absent when scoring was bypassed.
    pub score: Option<UnitScore>,
}

/// The engine's answer for one message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutingDecision {
    pub decision_id: DecisionId,
    pub selected_mode: RoutingMode,
    pub reason: String,
    pub confidence: UnitScore,
    pub fallback_available: bool,
    pub metadata: DecisionMetadata,
    pub decided_at: Timestamp,
}

/// Combines classification, user context and preference into a decision.
#[derive(Clone)]
pub struct RoutingEngine {
    classifier: Arc<dyn Classifier>,
    policy: Arc<dyn RoutingPolicy>,
    thresholds: DecisionThresholds,
}

impl RoutingEngine {
    pub fn new(
        classifier: Arc<dyn Classifier>,
        policy: Arc<dyn RoutingPolicy>,
        thresholds: DecisionThresholds,
    ) -> Self {
        Self {
            classifier,
            policy,
            thresholds,
        }
    }

    pub fn thresholds(&self) -> &DecisionThresholds {
        &self.thresholds
    }

    /// Classifies a message with the configured classifier.
    pub fn analyze(&self, text: &str) -> InputAnalysis {
        self.classifier.analyze(text)
    }

    /// Classifies `text` and decides in one step.
    pub fn route(
        &self,
        text: &str,
        context: &UserContext,
        preference: Option<ModePreference>,
    ) -> RoutingDecision {
        let analysis = self.analyze(text);
        self.decide(analysis, context, preference)
    }

    /// Decides from an existing analysis.
    pub fn decide(
        &self,
        analysis: InputAnalysis,
        context: &UserContext,
        preference: Option<ModePreference>,
    ) -> RoutingDecision {
        if analysis.is_crisis() {
            tracing::warn!(
                user_id = %context.user_id,
                "Crisis indicators detected, forcing hybrid mode"
            );
            let factor = RoutingFactor::new(
                "crisis_override",
                1.0,
                RoutingMode::Hybrid,
                "safety lexicon matched",
            );
            return Self::decision(
                RoutingMode::Hybrid,
                CRISIS_REASON.to_string(),
                UnitScore::ONE,
                false,
                DecisionMetadata {
                    path: DecisionPath::CrisisOverride,
                    analysis,
                    context: context.clone(),
                    factors: vec![factor],
                    score: None,
                },
            );
        }

        if let Some(mode) = preference.and_then(|p| p.forced_mode()) {
            let factor = RoutingFactor::new(
                "explicit_preference",
                1.0,
                mode,
                "user explicit preference",
            );
            return Self::decision(
                mode,
                format!("user explicitly requested {} mode", mode),
                UnitScore::ONE,
                true,
                DecisionMetadata {
                    path: DecisionPath::ExplicitPreference,
                    analysis,
                    context: context.clone(),
                    factors: vec![factor],
                    score: None,
                },
            );
        }

        let features = FeatureVector::from_inputs(&analysis, context);
        let scored = self.policy.score(&features);
        let (mode, confidence) = self.thresholds.select(scored.score);

        tracing::debug!(
            user_id = %context.user_id,
            policy = self.policy.name(),
            raw_score = scored.raw,
            score = scored.score.value(),
            factors = scored.factors.len(),
            "Scored routing factors"
        );

        let reason = Self::summarize(mode, scored.score, &scored.factors, &self.thresholds);

        Self::decision(
            mode,
            reason,
            confidence,
            true,
            DecisionMetadata {
                path: DecisionPath::WeightedScore,
                analysis,
                context: context.clone(),
                factors: scored.factors,
                score: Some(scored.score),
            },
        )
    }

    fn decision(
        selected_mode: RoutingMode,
        reason: String,
        confidence: UnitScore,
        fallback_available: bool,
        metadata: DecisionMetadata,
    ) -> RoutingDecision {
        RoutingDecision {
            decision_id: DecisionId::new(),
            selected_mode,
            reason,
            confidence,
            fallback_available,
            metadata,
            decided_at: Timestamp::now(),
        }
    }

    fn summarize(
        mode: RoutingMode,
        score: UnitScore,
        factors: &[RoutingFactor],
        thresholds: &DecisionThresholds,
    ) -> String {
        let s = score.value();
        if s > thresholds.hybrid_threshold && s < thresholds.field_threshold {
            return format!("uncertain score {}, defaulting to {} mode", score, mode);
        }

        let strongest = factors
            .iter()
            .filter(|f| f.direction == mode)
            .max_by(|a, b| a.weight.value().total_cmp(&b.weight.value()));

        match strongest {
            Some(factor) => format!("{} mode (score {}): {}", mode, score, factor.rationale),
            None => format!("{} mode (score {})", mode, score),
        }
    }
}

impl Default for RoutingEngine {
    fn default() -> Self {
        Self::new(
            Arc::new(PatternClassifier::new()),
            Arc::new(RuleBasedPolicy::default()),
            DecisionThresholds::default(),
        )
    }
}

impl std::fmt::Debug for RoutingEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoutingEngine")
            .field("policy", &self.policy.name())
            .field("thresholds", &self.thresholds)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::UserId;
    use crate::domain::routing::analysis::InputType;
    use crate::domain::routing::context::ContextTuning;
    use crate::domain::routing::policy::{FactorThresholds, PolicyScore, WeightTable};
    use proptest::prelude::*;
    use std::collections::BTreeSet;

    fn new_user() -> UserContext {
        UserContext::new(UserId::new("new-user").unwrap(), &ContextTuning::default())
    }

    fn experienced_user() -> UserContext {
        let mut ctx = UserContext::new(UserId::new("veteran").unwrap(), &ContextTuning::default());
        ctx.session_count = 50;
        ctx.field_experience = 0.9;
        ctx.field_success_rate = 0.85;
        ctx
    }

    /// Policy that returns a fixed score, for exercising thresholds.
    struct FixedPolicy(f64);

    impl RoutingPolicy for FixedPolicy {
        fn name(&self) -> &'static str {
            "fixed"
        }

        fn score(&self, _features: &FeatureVector) -> PolicyScore {
            PolicyScore {
                raw: self.0,
                score: UnitScore::new(self.0),
                factors: Vec::new(),
            }
        }
    }

    fn fixed_engine(score: f64) -> RoutingEngine {
        RoutingEngine::new(
            Arc::new(PatternClassifier::new()),
            Arc::new(FixedPolicy(score)),
            DecisionThresholds::default(),
        )
    }

    #[test]
    fn explicit_preference_is_honored() {
        let engine = RoutingEngine::default();

        for (pref, mode) in [
            (ModePreference::Field, RoutingMode::Field),
            (ModePreference::Hybrid, RoutingMode::Hybrid),
        ] {
            let decision = engine.route("How to reset my password", &new_user(), Some(pref));

            assert_eq!(decision.selected_mode, mode);
            assert_eq!(decision.confidence, UnitScore::ONE);
            assert!(decision.fallback_available);
            assert_eq!(decision.metadata.path, DecisionPath::ExplicitPreference);
            assert_eq!(decision.metadata.factors.len(), 1);
            assert_eq!(decision.metadata.factors[0].rationale, "user explicit preference");
        }
    }

    #[test]
    fn auto_and_user_choice_fall_through_to_scoring() {
        let engine = RoutingEngine::default();

        for pref in [ModePreference::Auto, ModePreference::UserChoice] {
            let decision = engine.route("How to reset my password", &new_user(), Some(pref));
            assert_eq!(decision.metadata.path, DecisionPath::WeightedScore);
        }
    }

    #[test]
    fn crisis_overrides_everything() {
        let engine = RoutingEngine::default();

        for pref in [
            None,
            Some(ModePreference::Field),
            Some(ModePreference::Hybrid),
            Some(ModePreference::Auto),
        ] {
            for ctx in [new_user(), experienced_user()] {
                let decision = engine.route("I want to kill myself", &ctx, pref);

                assert_eq!(decision.selected_mode, RoutingMode::Hybrid);
                assert!(!decision.fallback_available);
                assert_eq!(decision.confidence, UnitScore::ONE);
                assert_eq!(decision.reason, CRISIS_REASON);
                assert_eq!(decision.metadata.path, DecisionPath::CrisisOverride);
                assert!(decision.metadata.score.is_none());
            }
        }
    }

    #[test]
    fn new_user_neutral_message_goes_hybrid() {
        let decision = RoutingEngine::default().route("Tell me about the weather today", &new_user(), None);

        assert_eq!(decision.selected_mode, RoutingMode::Hybrid);
        assert!(decision.fallback_available);
    }

    #[test]
    fn password_reset_for_new_user() {
        let decision = RoutingEngine::default().route("How to reset my password", &new_user(), None);

        assert_eq!(decision.metadata.analysis.input_type, InputType::Practical);
        assert!(decision.metadata.analysis.requires_reliable_response);
        assert_eq!(decision.selected_mode, RoutingMode::Hybrid);
        assert!(decision.confidence.value() > 0.9);
    }

    #[test]
    fn existential_question_for_experienced_user_goes_field() {
        let decision = RoutingEngine::default().route(
            "Why do I exist? What is my purpose?",
            &experienced_user(),
            None,
        );

        assert_eq!(decision.metadata.analysis.input_type, InputType::Deep);
        assert!(decision.metadata.analysis.silence_acceptable);
        assert_eq!(decision.selected_mode, RoutingMode::Field);
        assert_eq!(decision.confidence, UnitScore::ONE);
        let names: Vec<&str> = decision.metadata.factors.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["input_type", "field_experience", "field_success_rate", "silence_acceptable"]
        );
    }

    #[test]
    fn thresholds_select_modes() {
        let ctx = experienced_user();

        let field = fixed_engine(0.6).route("hello", &ctx, None);
        assert_eq!(field.selected_mode, RoutingMode::Field);
        assert!((field.confidence.value() - 0.6).abs() < 1e-12);

        let hybrid = fixed_engine(0.4).route("hello", &ctx, None);
        assert_eq!(hybrid.selected_mode, RoutingMode::Hybrid);
        assert!((hybrid.confidence.value() - 0.6).abs() < 1e-12);

        let uncertain = fixed_engine(0.55).route("hello", &ctx, None);
        assert_eq!(uncertain.selected_mode, RoutingMode::Hybrid);
        assert_eq!(uncertain.confidence, UnitScore::HALF);
        assert!(uncertain.reason.starts_with("uncertain score"));
    }

    #[test]
    fn uncertain_band_ignores_last_mode() {
        let mut ctx = experienced_user();
        ctx.last_mode_used = Some(RoutingMode::Field);

        let decision = fixed_engine(0.59).route("hello", &ctx, None);

        assert_eq!(decision.selected_mode, RoutingMode::Hybrid);
    }

    #[test]
    fn decision_is_serializable() {
        let decision = RoutingEngine::default().route("I wonder about stars", &new_user(), None);
        let json = serde_json::to_value(&decision).unwrap();

        assert!(json["selected_mode"].is_string());
        assert_eq!(json["metadata"]["path"], "weighted_score");
        assert!(json["metadata"]["factors"].is_array());
    }

    #[test]
    fn engine_never_mutates_context() {
        let ctx = experienced_user();
        let before = ctx.clone();
        let _ = RoutingEngine::default().route("Why am I here?", &ctx, None);

        assert_eq!(ctx, before);
    }

    #[test]
    fn threshold_validation_requires_ordering() {
        assert!(DecisionThresholds::default().validate().is_ok());

        let inverted = DecisionThresholds {
            field_threshold: 0.4,
            hybrid_threshold: 0.6,
            ..Default::default()
        };
        assert!(inverted.validate().is_err());
    }

    fn arb_input_type() -> impl Strategy<Value = InputType> {
        prop_oneof![
            Just(InputType::Deep),
            Just(InputType::Practical),
            Just(InputType::Emotional),
            Just(InputType::Exploratory),
        ]
    }

    fn arb_mode() -> impl Strategy<Value = Option<RoutingMode>> {
        prop_oneof![
            Just(None),
            Just(Some(RoutingMode::Field)),
            Just(Some(RoutingMode::Hybrid)),
        ]
    }

    proptest! {
        #[test]
        fn score_and_confidence_stay_in_unit_interval(
            input_type in arb_input_type(),
            complexity in 0.0f64..=1.0,
            emotional_intensity in 0.0f64..=1.0,
            silence_acceptable in any::<bool>(),
            requires_reliable_response in any::<bool>(),
            session_count in 0u32..200,
            field_experience in 0.0f64..=1.0,
            field_success_rate in 0.0f64..=1.0,
            current_streak in 0u32..20,
            last_mode_used in arb_mode(),
        ) {
            let analysis = InputAnalysis {
                input_type,
                complexity,
                emotional_intensity,
                requires_reliable_response,
                silence_acceptable,
                characteristics: BTreeSet::new(),
            };
            let mut ctx = new_user();
            ctx.session_count = session_count;
            ctx.field_experience = field_experience;
            ctx.field_success_rate = field_success_rate;
            ctx.current_streak = current_streak;
            ctx.last_mode_used = last_mode_used;

            let decision = RoutingEngine::default().decide(analysis, &ctx, None);

            let score = decision.metadata.score.expect("weighted path records a score");
            prop_assert!((0.0..=1.0).contains(&score.value()));
            prop_assert!((0.0..=1.0).contains(&decision.confidence.value()));
            prop_assert!(decision.confidence.value() >= 0.5);
            for factor in &decision.metadata.factors {
                prop_assert!((0.0..=1.0).contains(&factor.weight.value()));
            }
        }

        #[test]
        fn arbitrary_text_never_panics(text in ".{0,300}") {
            let decision = RoutingEngine::default().route(&text, &new_user(), None);
            prop_assert!((0.0..=1.0).contains(&decision.confidence.value()));
            if decision.metadata.analysis.is_crisis() {
                prop_assert!(!decision.fallback_available);
            }
        }
    }

    #[test]
    fn custom_weights_flow_through() {
        let engine = RoutingEngine::new(
            Arc::new(PatternClassifier::new()),
            Arc::new(RuleBasedPolicy::new(
                WeightTable {
                    new_user: 0.0,
                    practical_type: 0.0,
                    reliability_required: 0.0,
                    ..WeightTable::default()
                },
                FactorThresholds::default(),
            )),
            DecisionThresholds::default(),
        );

        let decision = engine.route("How to reset my password", &new_user(), None);

        assert_eq!(decision.metadata.score, Some(UnitScore::HALF));
        assert_eq!(decision.confidence, UnitScore::HALF);
    }
}
