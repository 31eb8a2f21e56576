//! Split engine implementing the [`SplitCalculator`] trait.
//!
//! Validates the contribution, filters the candidate needs, runs the selected
//! spread policy, and assembles the plan with its fee breakdown.
//! All arithmetic is integer-only with i128 intermediates for overflow safety.

use needsplit_core::constants::{BPS_PRECISION, MAX_CONTRIBUTION};
use needsplit_core::error::SplitError;
use needsplit_core::money::round_half_even_div;
use needsplit_core::traits::SplitCalculator;
use needsplit_core::types::{Need, SplitAllocation, SplitMode, SplitOptions, SplitResult};
use tracing::debug;

use crate::config::EngineConfig;
use crate::eligibility::{most_underfunded, prepare};
use crate::spread::{self, Slot};

/// The production split calculator.
///
/// Holds only the fee configuration, so one instance can be shared freely
/// between threads.
#[derive(Debug, Clone, Default)]
pub struct SplitEngine {
    config: EngineConfig,
}

impl SplitEngine {
    /// Create an engine with the default platform fee.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with a custom configuration.
    pub fn with_config(config: EngineConfig) -> Result<Self, SplitError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

impl SplitCalculator for SplitEngine {
    fn compute_split(
        &self,
        contribution: i64,
        needs: &[Need],
        mode: SplitMode,
        options: &SplitOptions,
    ) -> Result<SplitResult, SplitError> {
        if contribution <= 0 {
            return Err(SplitError::InvalidAmount(format!(
                "contribution must be positive, got {contribution}"
            )));
        }
        if contribution > MAX_CONTRIBUTION {
            return Err(SplitError::InvalidAmount(format!(
                "contribution {contribution} exceeds {MAX_CONTRIBUTION}"
            )));
        }

        let eligible = prepare(needs, options);
        let candidates = match mode {
            // Priority applies its own cap after ordering.
            SplitMode::Priority => eligible.needs,
            SplitMode::Even | SplitMode::CategoryWeighted => {
                most_underfunded(eligible.needs, options.max_recipients)
            }
        };
        if candidates.is_empty() {
            debug!(%mode, contribution, "no eligible needs");
            return Ok(SplitResult::empty(mode, contribution, eligible.rejected));
        }

        let mut slots: Vec<Slot<'_>> = candidates.into_iter().map(Slot::new).collect();
        let unallocated = match mode {
            SplitMode::Even => spread::even(contribution, &mut slots)?,
            SplitMode::Priority => {
                spread::priority(contribution, &mut slots, options.max_recipients)?
            }
            SplitMode::CategoryWeighted => {
                spread::category_weighted(contribution, &mut slots, &options.category_weights)?
            }
        };

        let allocations: Vec<SplitAllocation> = slots
            .iter()
            .filter(|s| s.allocated > 0)
            .map(|s| SplitAllocation::new(s.need, s.allocated))
            .collect();

        let total_amount: i64 = allocations.iter().map(|a| a.amount).sum();
        let goals_completed = allocations.iter().filter(|a| a.will_complete).count();
        let fee = self.fee_for(total_amount)?;

        debug!(
            %mode,
            contribution,
            total_amount,
            unallocated,
            recipients = allocations.len(),
            goals_completed,
            fee,
            "split computed"
        );

        Ok(SplitResult {
            mode,
            requested_amount: contribution,
            total_people: allocations.len(),
            allocations,
            total_amount,
            goals_completed,
            fee,
            net_amount: total_amount - fee,
            unallocated,
            rejected: eligible.rejected,
        })
    }

    fn fee_for(&self, total: i64) -> Result<i64, SplitError> {
        let scaled = (total as i128)
            .checked_mul(self.config.fee_bps as i128)
            .ok_or(SplitError::ArithmeticOverflow)?;
        let fee = round_half_even_div(scaled, BPS_PRECISION as i128);
        i64::try_from(fee).map_err(|_| SplitError::ArithmeticOverflow)
    }
}
