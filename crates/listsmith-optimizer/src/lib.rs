//! Multi-platform listing optimization
//!
//! The [`Orchestrator`] resolves the caller's model once, then generates
//! one listing per target platform concurrently. Provider failures never
//! surface here: clients fall back to synthesized content, so the only
//! errors are invalid input.

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

pub mod error;
#[cfg(feature = "http")]
pub mod http;
pub mod orchestrator;
pub mod warning;

pub use error::OptimizeError;
pub use orchestrator::{OptimizationOutcome, OptimizationRequest, Orchestrator, Regeneration};
pub use warning::{ModelSummary, SubscriptionWarning};
