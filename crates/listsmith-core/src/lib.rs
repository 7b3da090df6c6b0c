//! Shared domain types for Listsmith
//!
//! Everything here is plain data plus the one ordering definition for
//! subscription tiers, so that every crate compares tiers the same way.

#![allow(clippy::must_use_candidate)]

mod caller;
mod error;
mod listing;
mod optimization;
mod platform;
mod product;
mod tier;

pub use caller::Caller;
pub use error::{HttpError, ParseError};
pub use listing::{ListingContent, OptimizedListing, SeoMetadata};
pub use optimization::OptimizationRecord;
pub use platform::{ImageRequirements, Platform, PlatformRequirements};
pub use product::{Product, ProductVariant};
pub use tier::SubscriptionTier;
