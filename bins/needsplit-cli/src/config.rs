//! CLI defaults loaded from environment variables.

use anyhow::{Context, Result};
use needsplit_engine::EngineConfig;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnvDefaults {
    /// Platform fee in basis points.
    pub fee_bps: u64,
    /// Log level filter used when `--log-level` is not given.
    pub log_level: String,
}

impl EnvDefaults {
    /// Load defaults from `NEEDSPLIT_FEE_BPS` and `NEEDSPLIT_LOG_LEVEL`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let fee_bps = match lookup("NEEDSPLIT_FEE_BPS") {
            Some(raw) => raw
                .trim()
                .parse()
                .context("NEEDSPLIT_FEE_BPS must be a non-negative integer")?,
            None => EngineConfig::default().fee_bps,
        };
        let log_level = lookup("NEEDSPLIT_LOG_LEVEL").unwrap_or_else(|| "warn".to_string());
        Ok(Self { fee_bps, log_level })
    }
}
