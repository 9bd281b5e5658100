//! Routing modes and caller preferences.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// The two downstream response pipelines a message can be routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoutingMode {
    /// Open-ended pipeline that tolerates silence and exploration.
    Field,
    /// Reliable pipeline that always produces a structured answer.
    Hybrid,
}

impl RoutingMode {
    /// Returns the other mode.
    pub fn opposite(&self) -> Self {
        match self {
            RoutingMode::Field => RoutingMode::Hybrid,
            RoutingMode::Hybrid => RoutingMode::Field,
        }
    }

    /// Returns the string representation of the mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            RoutingMode::Field => "field",
            RoutingMode::Hybrid => "hybrid",
        }
    }
}

impl fmt::Display for RoutingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RoutingMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "field" => Ok(RoutingMode::Field),
            "hybrid" => Ok(RoutingMode::Hybrid),
            other => Err(ValidationError::invalid_format(
                "mode",
                format!("unknown mode '{}'", other),
            )),
        }
    }
}

/// Explicit routing preference supplied by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModePreference {
    Field,
    Hybrid,
    /// Let the engine decide.
    Auto,
    /// The UI asked the user to pick; behaves like `Auto` until they do.
    UserChoice,
}

impl ModePreference {
    /// Parses a caller-supplied preference string.
    ///
    /// Unrecognized values yield `None` and are treated as if no preference
    /// was given.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "field" => Some(ModePreference::Field),
            "hybrid" => Some(ModePreference::Hybrid),
            "auto" => Some(ModePreference::Auto),
            "user-choice" | "user_choice" => Some(ModePreference::UserChoice),
            _ => None,
        }
    }

    /// The mode this preference forces, if any.
    pub fn forced_mode(&self) -> Option<RoutingMode> {
        match self {
            ModePreference::Field => Some(RoutingMode::Field),
            ModePreference::Hybrid => Some(RoutingMode::Hybrid),
            ModePreference::Auto | ModePreference::UserChoice => None,
        }
    }
}
