//! Shared test helpers for scenario and property tests.

use needsplit_core::constants::CENTS_PER_UNIT;
use needsplit_core::types::{Need, NeedCategory, SplitResult};

/// Major units to minor units.
pub fn units(n: i64) -> i64 {
    n * CENTS_PER_UNIT
}

/// A need with the given goal and raised amounts (minor units).
pub fn make_need(id: &str, category: NeedCategory, goal: i64, raised: i64) -> Need {
    Need {
        id: id.to_string(),
        category,
        goal_amount: goal,
        raised_amount: raised,
        owner_user_id: format!("user-{id}"),
        owner_name: format!("Owner {id}"),
        owner_avatar_url: None,
        owner_city: Some("Nairobi".to_string()),
        title: format!("Need {id}"),
    }
}

/// A need whose remaining gap is `gap`, with nothing raised yet.
pub fn need_with_gap(id: &str, gap: i64) -> Need {
    make_need(id, NeedCategory::Other, gap, 0)
}

/// Need ids in allocation order.
pub fn allocation_ids(result: &SplitResult) -> Vec<&str> {
    result
        .allocations
        .iter()
        .map(|a| a.need_id.as_str())
        .collect()
}
