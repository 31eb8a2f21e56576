//! Engine constants. All monetary values in minor units (1 unit = 100 cents).

/// Minor units per major currency unit.
pub const CENTS_PER_UNIT: i64 = 100;

/// Basis-point denominator (100% = 10,000 bps).
pub const BPS_PRECISION: u64 = 10_000;

/// Default platform fee: 5% of the allocated total.
pub const DEFAULT_PLATFORM_FEE_BPS: u64 = 500;

/// Slack, in minor units, allowed when deciding whether a need reached its goal.
///
/// Amounts are exact integers once converted, so no slack is needed. The same
/// constant bounds both `will_complete` and the redistribution headroom check.
pub const COMPLETION_TOLERANCE: i64 = 0;

/// Maximum distance (as a fraction of one minor unit) a major-unit float may sit
/// from a whole number of cents and still be accepted.
pub const MINOR_UNIT_TOLERANCE: f64 = 0.005;

/// Largest contribution accepted, in minor units (10 billion units).
pub const MAX_CONTRIBUTION: i64 = 10_000_000_000 * CENTS_PER_UNIT;
