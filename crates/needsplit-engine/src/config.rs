//! Engine configuration.
//!
//! Provides [`EngineConfig`] with the platform fee rate. The fee is an
//! external policy input; the engine only applies it.

use needsplit_core::constants::{BPS_PRECISION, DEFAULT_PLATFORM_FEE_BPS};
use needsplit_core::error::SplitError;
use serde::{Deserialize, Serialize};

/// Configuration for a [`SplitEngine`](crate::SplitEngine).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Platform fee in basis points of the allocated total.
    pub fee_bps: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fee_bps: DEFAULT_PLATFORM_FEE_BPS,
        }
    }
}

impl EngineConfig {
    /// Reject fee rates above 100%.
    pub fn validate(&self) -> Result<(), SplitError> {
        if self.fee_bps > BPS_PRECISION {
            return Err(SplitError::InvalidConfig(format!(
                "fee_bps {} exceeds {}",
                self.fee_bps, BPS_PRECISION
            )));
        }
        Ok(())
    }
}
