//! Error types for the split engine.
use thiserror::Error;

/// Caller errors that abort a split computation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SplitError {
    #[error("invalid amount: {0}")] InvalidAmount(String),
    #[error("arithmetic overflow")] ArithmeticOverflow,
    #[error("invalid config: {0}")] InvalidConfig(String),
}

/// Per-need structural problems. Never fatal; reported in the result.
#[derive(Error, Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NeedError {
    #[error("goal amount must be positive, got {goal}")] NonPositiveGoal { goal: i64 },
    #[error("raised amount must be non-negative, got {raised}")] NegativeRaised { raised: i64 },
    #[error("duplicate need id")] DuplicateId,
}
