//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers and error types
//! that form the vocabulary of the routing domain.

mod errors;
mod ids;
mod timestamp;
mod unit_score;

pub use errors::ValidationError;
pub use ids::{DecisionId, UserId};
pub use timestamp::Timestamp;
pub use unit_score::UnitScore;
