//! # needsplit-core
//! Foundation types and traits for the needsplit contribution engine.
//!
//! All monetary values are integer minor units (cents).

pub mod constants;
pub mod error;
pub mod money;
pub mod traits;
pub mod types;
