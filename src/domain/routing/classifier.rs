//! Message classification.
//!
//! [`Classifier`] is the seam where a learned model can replace the
//! pattern-based default. [`PatternClassifier`] works off keyword regexes and
//! a couple of additive scorers.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

use super::analysis::{Characteristic, InputAnalysis, InputType};

/// Classifies raw message text into a structured analysis.
///
/// Implementations must be pure and infallible: every input yields an analysis.
pub trait Classifier: Send + Sync {
    /// Analyze a single message.
    fn analyze(&self, text: &str) -> InputAnalysis;
}

// ---------------------------------------------------------------------------
// Lexicons
// ---------------------------------------------------------------------------

static CRISIS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(suicid\w*|kill(ing)? myself|end(ing)? (it all|my life)|want(ed)? to die|self[- ]?harm\w*|hurt(ing)? myself|no reason to live|better off dead|can'?t go on)\b",
    )
    .expect("crisis regex")
});

static DEEP_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(why (do|am|does|is|are|did) (i|we|people|life|anything)|meaning (of|in)|purpose|exist(ence|ential)?|who am i|conscious(ness)?|soul|philosoph\w*|what does it (all )?mean)\b",
    )
    .expect("deep regex")
});

static PRACTICAL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(how (to|do i|can i|should i|do you)|steps? (to|for)|fix|reset|install|configure|set ?up|troubleshoot|password|error|tutorial|instructions?|guide me)\b",
    )
    .expect("practical regex")
});

static EMOTIONAL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(feel(s|ing|ings)?|felt|sad|angry|anxious|anxiety|scared|afraid|lonely|hurt|upset|depressed|overwhelmed|grief|grieving|heartbroken|stressed|crying|happy|joy)\b",
    )
    .expect("emotional regex")
});

static EXPLORATORY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(what if|wonder(ing)?|curious|imagine|explore|exploring|possibilit(y|ies)|could it be|i'?ve been thinking)\b",
    )
    .expect("exploratory regex")
});

static SENTENCE_SPLIT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?]+").expect("sentence split regex"));

const ABSTRACT_CONCEPTS: &[&str] = &[
    "meaning",
    "purpose",
    "exist",
    "existence",
    "consciousness",
    "identity",
    "truth",
    "reality",
    "freedom",
    "death",
    "soul",
    "essence",
    "self",
    "universe",
    "infinity",
];

const STRONG_EMOTION_WORDS: &[&str] = &[
    "devastated",
    "furious",
    "terrified",
    "hopeless",
    "desperate",
    "heartbroken",
    "hate",
    "panic",
    "unbearable",
    "miserable",
];

const MODERATE_EMOTION_WORDS: &[&str] = &[
    "sad",
    "upset",
    "worried",
    "anxious",
    "frustrated",
    "stressed",
    "lonely",
    "angry",
    "scared",
    "nervous",
    "hurt",
];

// ---------------------------------------------------------------------------
// PatternClassifier
// ---------------------------------------------------------------------------

/// Keyword and heuristic classifier.
///
/// Regex state lives in `Lazy` statics, so the struct itself is zero-sized.
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternClassifier;

impl PatternClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Returns true if the text matches the safety lexicon.
    pub fn is_crisis(text: &str) -> bool {
        CRISIS_RE.is_match(text)
    }

    /// Additive complexity score in [0, 1].
    pub fn complexity(text: &str) -> f64 {
        let mut score: f64 = 0.0;

        let len = text.chars().count();
        if len > 50 {
            score += 0.1;
        }
        if len > 150 {
            score += 0.2;
        }
        if len > 300 {
            score += 0.2;
        }

        let sentences = SENTENCE_SPLIT_RE
            .split(text)
            .filter(|s| !s.trim().is_empty())
            .count();
        if sentences > 2 {
            score += 0.1;
        }
        if sentences > 5 {
            score += 0.1;
        }

        if text.matches('?').count() > 1 {
            score += 0.15;
        }

        let words = lowercase_words(text);
        let abstract_hits = ABSTRACT_CONCEPTS
            .iter()
            .filter(|concept| words.contains(**concept))
            .count();
        score += (abstract_hits as f64 * 0.1).min(0.3);

        score.clamp(0.0, 1.0)
    }

    /// Additive emotional intensity score in [0, 1].
    pub fn emotional_intensity(text: &str) -> f64 {
        let mut score: f64 = 0.0;

        let exclamations = text.matches('!').count();
        score += (exclamations as f64 * 0.1).min(0.3);

        let tokens: Vec<&str> = text.split_whitespace().collect();
        if !tokens.is_empty() {
            let caps = tokens.iter().filter(|t| is_shouted(t)).count();
            let ratio = caps as f64 / tokens.len() as f64;
            score += (ratio * 2.0).min(0.3);
        }

        let words = lowercase_words(text);
        if STRONG_EMOTION_WORDS.iter().any(|w| words.contains(*w)) {
            score += 0.3;
        } else if MODERATE_EMOTION_WORDS.iter().any(|w| words.contains(*w)) {
            score += 0.15;
        }

        if has_repeated_run(text, 3) {
            score += 0.1;
        }

        score.clamp(0.0, 1.0)
    }
}

impl Classifier for PatternClassifier {
    fn analyze(&self, text: &str) -> InputAnalysis {
        if Self::is_crisis(text) {
            return InputAnalysis::crisis();
        }

        let deep = DEEP_RE.is_match(text);
        let practical = PRACTICAL_RE.is_match(text);
        let emotional = EMOTIONAL_RE.is_match(text);
        let exploratory = EXPLORATORY_RE.is_match(text);
        let question = text.contains('?');

        let input_type = if deep {
            InputType::Deep
        } else if practical {
            InputType::Practical
        } else if emotional {
            InputType::Emotional
        } else if exploratory {
            InputType::Exploratory
        } else {
            InputType::Practical
        };

        let complexity = Self::complexity(text);
        let emotional_intensity = Self::emotional_intensity(text);

        let mut characteristics = BTreeSet::new();
        for (present, tag) in [
            (deep, Characteristic::DeepInquiry),
            (practical, Characteristic::PracticalNeed),
            (emotional, Characteristic::EmotionalContent),
            (exploratory, Characteristic::Exploratory),
            (complexity > 0.7, Characteristic::HighComplexity),
            (emotional_intensity > 0.7, Characteristic::HighEmotion),
            (question, Characteristic::Question),
        ] {
            if present {
                characteristics.insert(tag);
            }
        }

        let silence_acceptable = matches!(
            input_type,
            InputType::Deep | InputType::Exploratory | InputType::Emotional
        ) && !practical;

        InputAnalysis {
            input_type,
            complexity,
            emotional_intensity,
            requires_reliable_response: practical || question,
            silence_acceptable,
            characteristics,
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn lowercase_words(text: &str) -> BTreeSet<String> {
    text.split(|c: char| !c.is_alphanumeric() && c != '\'')
        .filter(|w| !w.is_empty())
        .map(|w| w.to_lowercase())
        .collect()
}

/// A token counts as shouted when it has at least two letters, all uppercase.
fn is_shouted(token: &str) -> bool {
    let letters: Vec<char> = token.chars().filter(|c| c.is_alphabetic()).collect();
    letters.len() >= 2 && letters.iter().all(|c| c.is_uppercase())
}

fn has_repeated_run(text: &str, run: usize) -> bool {
    let mut previous: Option<char> = None;
    let mut count = 0;
    for c in text.chars() {
        if c.is_whitespace() {
            previous = None;
            count = 0;
            continue;
        }
        if Some(c) == previous {
            count += 1;
        } else {
            previous = Some(c);
            count = 1;
        }
        if count >= run {
            return true;
        }
    }
    false
}
