//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `routing` - Message classification, adaptive user context, the routing
//!   decision procedure and outcome metrics

pub mod foundation;
pub mod routing;
