//! Core domain models for claimguard
//!
//! This crate contains:
//! - Claim categories and their static requirement profiles
//! - Policy context (retrieved passages or keyword fallback)
//! - The shared error type

pub mod category;
pub mod context;
pub mod error;

pub use category::{CategoryProfile, ClaimCategory};
pub use context::{ContextSource, FallbackReason, PolicyContext, RetrievedPassage};
pub use error::{Error, Result};
