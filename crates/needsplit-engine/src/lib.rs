//! # needsplit-engine — Contribution splitting engine.
//!
//! All calculations use integer minor units for determinism.
//!
//! Given one contribution and a list of open needs, the engine produces an
//! allocation plan:
//! - **Even spread**: equal shares clipped to each need's gap, with freed funds
//!   redistributed over the needs that still have headroom.
//! - **Priority spread**: needs closest to completion are filled first, ties
//!   broken by need id.
//! - **Category-weighted spread**: the contribution is apportioned across
//!   categories by weight, then spread evenly inside each category.
//!
//! Equal shares differ by at most one minor unit, and the residual units land
//! on the first allocations in output order, so the plan always sums to what
//! was placed. Fees are rounded half-to-even. Money that no need can absorb is
//! reported as `unallocated`, never dropped.

pub mod config;
pub mod eligibility;
pub mod engine;
pub mod spread;

pub use config::EngineConfig;
pub use engine::SplitEngine;
