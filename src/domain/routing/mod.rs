//! Routing domain module
//!
//! Decides which downstream pipeline, field or hybrid, should answer a
//! message, and learns per-user routing tendencies from reported outcomes.
//!
//! # Architecture
//!
//! - **Classifier**: turns message text into an [`InputAnalysis`]
//! - **UserContext**: adaptive per-user state folded from outcomes
//! - **RoutingPolicy**: scores a [`FeatureVector`] with a [`WeightTable`]
//! - **RoutingEngine**: crisis override, explicit preference, then scoring
//! - **MetricsHistory**: bounded outcome history with comparative aggregates
//!
//! # Example
//!
//! ```ignore
//! use mode_router::domain::routing::{RoutingEngine, UserContext, ContextTuning};
//!
//! let engine = RoutingEngine::default();
//! let context = UserContext::new(user_id, &ContextTuning::default());
//! let decision = engine.route("How to reset my password", &context, None);
//! ```

pub mod analysis;
pub mod classifier;
pub mod context;
pub mod engine;
pub mod metrics;
pub mod mode;
pub mod policy;

pub use analysis::*;
pub use classifier::*;
pub use context::*;
pub use engine::*;
pub use metrics::*;
pub use mode::*;
pub use policy::*;
