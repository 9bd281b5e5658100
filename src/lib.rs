//! Mode Router - Field/Hybrid Pipeline Selection
//!
//! This crate decides, per incoming message, whether a conversational
//! assistant should answer through the contemplative **field** pipeline or
//! the structured **hybrid** pipeline. Decisions combine a pattern-based
//! analysis of the message, the user's adaptive context and any explicit
//! preference. Crisis messages always route to hybrid.
//!
//! Layout follows a ports-and-adapters split:
//! - [`domain`] - pure routing logic (classifier, policy, engine, context, metrics)
//! - [`ports`] - async storage seams for user context and outcome metrics
//! - [`adapters`] - in-memory stores and the axum HTTP surface
//! - [`application`] - command and query handlers
//! - [`config`] - environment-driven configuration

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
