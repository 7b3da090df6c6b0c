//! LLM provider clients for listing generation
//!
//! Every client turns an [`OptimizationContext`] into [`ListingContent`]
//! and fails open: transport errors, bad statuses and unparseable replies
//! are logged and replaced by a deterministic synthesized listing, so
//! callers always get content back.
//!
//! [`ListingContent`]: listsmith_core::ListingContent

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

pub mod context;
pub mod error;
pub mod extract;
pub mod factory;
pub mod fallback;
pub mod prompt;
pub mod protocol;
pub mod provider;

pub use context::OptimizationContext;
pub use error::LlmError;
pub use factory::{ProviderFactory, ProviderKind};
pub use provider::ProviderClient;
