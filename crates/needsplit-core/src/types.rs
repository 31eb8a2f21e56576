//! Core data model: needs, distribution modes, allocations, and results.
//!
//! All monetary values are in minor units (cents).

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::COMPLETION_TOLERANCE;
use crate::error::NeedError;

/// Category tag of a need. Used by the engine purely as a grouping key.
///
/// Ordering follows declaration order and defines the output order of the
/// category-weighted spread.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum NeedCategory {
    Groceries,
    Utilities,
    Medical,
    Education,
    Other,
}

impl NeedCategory {
    /// Every category in declaration order.
    pub const ALL: [NeedCategory; 5] = [
        Self::Groceries,
        Self::Utilities,
        Self::Medical,
        Self::Education,
        Self::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Groceries => "groceries",
            Self::Utilities => "utilities",
            Self::Medical => "medical",
            Self::Education => "education",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for NeedCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for NeedCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown category: {s}"))
    }
}

/// An open funding request.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Need {
    /// Stable unique identifier.
    pub id: String,
    pub category: NeedCategory,
    /// Funding target in minor units.
    pub goal_amount: i64,
    /// Amount already collected in minor units.
    pub raised_amount: i64,
    pub owner_user_id: String,
    pub owner_name: String,
    #[serde(default)]
    pub owner_avatar_url: Option<String>,
    #[serde(default)]
    pub owner_city: Option<String>,
    pub title: String,
}

impl Need {
    /// Remaining gap to the goal, never negative.
    pub fn remaining(&self) -> i64 {
        self.goal_amount.saturating_sub(self.raised_amount).max(0)
    }

    /// Whether the need has already reached its goal.
    pub fn is_complete(&self) -> bool {
        reaches_goal(self.raised_amount, self.goal_amount)
    }

    /// Structural sanity check. Business eligibility is the caller's job.
    pub fn validate(&self) -> Result<(), NeedError> {
        if self.goal_amount <= 0 {
            return Err(NeedError::NonPositiveGoal {
                goal: self.goal_amount,
            });
        }
        if self.raised_amount < 0 {
            return Err(NeedError::NegativeRaised {
                raised: self.raised_amount,
            });
        }
        Ok(())
    }
}

/// Goal-completion test shared by needs and allocations.
pub fn reaches_goal(raised: i64, goal: i64) -> bool {
    raised.saturating_add(COMPLETION_TOLERANCE) >= goal
}

/// Distribution policy.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum SplitMode {
    /// Equal shares, clipped to each gap, with freed funds redistributed.
    #[default]
    Even,
    /// Closest-to-completion first, each filled up to its gap.
    Priority,
    /// Proportional across categories, then even within each category.
    CategoryWeighted,
}

impl fmt::Display for SplitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::Even => "even",
            Self::Priority => "priority",
            Self::CategoryWeighted => "category",
        })
    }
}

impl FromStr for SplitMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "even" => Ok(Self::Even),
            "priority" => Ok(Self::Priority),
            "category" | "category_weighted" | "category-weighted" => Ok(Self::CategoryWeighted),
            other => Err(format!("unknown split mode: {other}")),
        }
    }
}

/// Per-call options.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct SplitOptions {
    /// Only needs in this category are considered.
    #[serde(default)]
    pub category_filter: Option<NeedCategory>,
    /// Cap on how many needs are funded in one pass.
    #[serde(default)]
    pub max_recipients: Option<usize>,
    /// Category weights for [`SplitMode::CategoryWeighted`]. Empty means
    /// weight each category by its number of needs.
    #[serde(default)]
    pub category_weights: BTreeMap<NeedCategory, u32>,
}

impl SplitOptions {
    pub fn with_category_filter(mut self, category: NeedCategory) -> Self {
        self.category_filter = Some(category);
        self
    }

    pub fn with_max_recipients(mut self, max: usize) -> Self {
        self.max_recipients = Some(max);
        self
    }

    pub fn with_weight(mut self, category: NeedCategory, weight: u32) -> Self {
        self.category_weights.insert(category, weight);
        self
    }
}

/// The portion of one contribution assigned to one need.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct SplitAllocation {
    pub need_id: String,
    /// Allocated minor units, always positive.
    pub amount: i64,
    pub raised_before: i64,
    pub raised_after: i64,
    /// Goal snapshot taken at allocation time.
    pub goal_amount: i64,
    pub will_complete: bool,
    pub category: NeedCategory,
    pub title: String,
    pub owner_user_id: String,
    pub owner_name: String,
    pub owner_avatar_url: Option<String>,
    pub owner_city: Option<String>,
}

impl SplitAllocation {
    /// Build an allocation of `amount` to `need`.
    pub fn new(need: &Need, amount: i64) -> Self {
        let raised_after = need.raised_amount + amount;
        Self {
            need_id: need.id.clone(),
            amount,
            raised_before: need.raised_amount,
            raised_after,
            goal_amount: need.goal_amount,
            will_complete: reaches_goal(raised_after, need.goal_amount),
            category: need.category,
            title: need.title.clone(),
            owner_user_id: need.owner_user_id.clone(),
            owner_name: need.owner_name.clone(),
            owner_avatar_url: need.owner_avatar_url.clone(),
            owner_city: need.owner_city.clone(),
        }
    }
}

/// A need dropped from the eligible set, with the reason.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct RejectedNeed {
    pub need_id: String,
    pub reason: NeedError,
}

/// Allocation plan and fee breakdown for one contribution.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct SplitResult {
    pub mode: SplitMode,
    /// Contribution as requested by the caller.
    pub requested_amount: i64,
    /// Allocations in policy order.
    pub allocations: Vec<SplitAllocation>,
    /// Sum of all allocation amounts.
    pub total_amount: i64,
    pub total_people: usize,
    pub goals_completed: usize,
    pub fee: i64,
    /// `total_amount - fee`.
    pub net_amount: i64,
    /// Funds left over because every eligible need hit its goal.
    pub unallocated: i64,
    /// Structurally invalid needs that were skipped.
    pub rejected: Vec<RejectedNeed>,
}

impl SplitResult {
    /// An empty plan: nothing allocated, the whole contribution left over.
    pub fn empty(mode: SplitMode, requested_amount: i64, rejected: Vec<RejectedNeed>) -> Self {
        Self {
            mode,
            requested_amount,
            allocations: Vec::new(),
            total_amount: 0,
            total_people: 0,
            goals_completed: 0,
            fee: 0,
            net_amount: 0,
            unallocated: requested_amount,
            rejected,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.allocations.is_empty()
    }

    /// Look up the allocation for a need.
    pub fn allocation_for(&self, need_id: &str) -> Option<&SplitAllocation> {
        self.allocations.iter().find(|a| a.need_id == need_id)
    }
}
