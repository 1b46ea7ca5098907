//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `assessment` - Scoring, classification, subtypes and retake eligibility

pub mod assessment;
pub mod foundation;
