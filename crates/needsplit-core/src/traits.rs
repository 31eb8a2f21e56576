//! Trait interfaces between the core types and the split engine.
//!
//! - [`SplitCalculator`] — contribution splitting (needsplit-engine implements)

use crate::error::SplitError;
use crate::types::{Need, SplitMode, SplitOptions, SplitResult};

/// Pure computation of an allocation plan for one contribution.
///
/// Implementations hold no mutable state: identical inputs must always yield
/// an identical [`SplitResult`].
pub trait SplitCalculator: Send + Sync {
    /// Split `contribution` (minor units) across `needs` using `mode`.
    ///
    /// Fails only for a non-positive contribution or arithmetic overflow.
    /// Malformed needs are skipped and reported in [`SplitResult::rejected`].
    fn compute_split(
        &self,
        contribution: i64,
        needs: &[Need],
        mode: SplitMode,
        options: &SplitOptions,
    ) -> Result<SplitResult, SplitError>;

    /// Platform fee for an allocated total, in minor units.
    fn fee_for(&self, total: i64) -> Result<i64, SplitError>;

    /// Amount that reaches need owners after the fee.
    ///
    /// Default implementation subtracts [`fee_for`](Self::fee_for).
    fn net_for(&self, total: i64) -> Result<i64, SplitError> {
        Ok(total - self.fee_for(total)?)
    }
}
