//! Structured analysis of an incoming message.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Primary classification of a message, assigned by strict priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputType {
    Crisis,
    Deep,
    Practical,
    Emotional,
    Exploratory,
}

impl InputType {
    /// Deep and exploratory messages favor the open-ended pipeline.
    pub fn is_contemplative(&self) -> bool {
        matches!(self, InputType::Deep | InputType::Exploratory)
    }
}

impl fmt::Display for InputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            InputType::Crisis => "crisis",
            InputType::Deep => "deep",
            InputType::Practical => "practical",
            InputType::Emotional => "emotional",
            InputType::Exploratory => "exploratory",
        };
        write!(f, "{}", s)
    }
}

/// Descriptive tags attached to an analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Characteristic {
    Crisis,
    DeepInquiry,
    PracticalNeed,
    EmotionalContent,
    Exploratory,
    HighComplexity,
    HighEmotion,
    Question,
}

/// Result of classifying a message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputAnalysis {
    pub input_type: InputType,
    pub complexity: f64,
    pub emotional_intensity: f64,
    pub requires_reliable_response: bool,
    pub silence_acceptable: bool,
    pub characteristics: BTreeSet<Characteristic>,
}

impl InputAnalysis {
    /// The fixed analysis returned for crisis-indicative input.
    pub fn crisis() -> Self {
        Self {
            input_type: InputType::Crisis,
            complexity: 1.0,
            emotional_intensity: 1.0,
            requires_reliable_response: true,
            silence_acceptable: false,
            characteristics: BTreeSet::from([Characteristic::Crisis]),
        }
    }

    /// Returns true if the analysis flagged a crisis.
    pub fn is_crisis(&self) -> bool {
        self.input_type == InputType::Crisis
    }

    /// Returns true if the given tag is present.
    pub fn has(&self, characteristic: Characteristic) -> bool {
        self.characteristics.contains(&characteristic)
    }
}
