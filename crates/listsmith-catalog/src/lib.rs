//! Subscription-gated model catalog for Listsmith
//!
//! The catalog is a fixed, ordered table of model descriptors. The
//! selector resolves a caller's requested model against their tier and
//! never fails: when the request cannot be honoured it falls back to the
//! best model the tier permits and reports the downgrade.

#![allow(clippy::must_use_candidate)]

mod builtin;
pub mod descriptor;
pub mod error;
pub mod registry;
pub mod selector;

pub use descriptor::{ApiConfig, ModelDescriptor};
pub use error::CatalogError;
pub use registry::ModelCatalog;
pub use selector::{DowngradeReason, ModelSelector, Selection};
