//! Structural filtering of the candidate needs.
//!
//! The caller has already applied business rules (visibility, ownership).
//! Here we only drop what the spread policies cannot reason about.

use std::collections::HashSet;

use needsplit_core::error::NeedError;
use needsplit_core::types::{Need, RejectedNeed, SplitOptions};
use tracing::{debug, warn};

/// Needs that survived filtering, in input order, plus diagnostics.
#[derive(Debug, Default)]
pub struct Eligible<'a> {
    pub needs: Vec<&'a Need>,
    pub rejected: Vec<RejectedNeed>,
}

/// Filter `needs` down to the set a spread policy may fund.
///
/// In order: structurally invalid needs are rejected, repeated ids are
/// rejected after their first occurrence, needs outside
/// `options.category_filter` are dropped, and needs already at goal are dropped.
pub fn prepare<'a>(needs: &'a [Need], options: &SplitOptions) -> Eligible<'a> {
    let mut out = Eligible::default();
    let mut seen: HashSet<&str> = HashSet::with_capacity(needs.len());

    for need in needs {
        if let Err(reason) = need.validate() {
            warn!(need_id = %need.id, %reason, "rejecting need");
            out.rejected.push(RejectedNeed {
                need_id: need.id.clone(),
                reason,
            });
            continue;
        }
        if !seen.insert(need.id.as_str()) {
            warn!(need_id = %need.id, "rejecting duplicate need");
            out.rejected.push(RejectedNeed {
                need_id: need.id.clone(),
                reason: NeedError::DuplicateId,
            });
            continue;
        }
        if options.category_filter.is_some_and(|c| c != need.category) {
            continue;
        }
        if need.is_complete() {
            continue;
        }
        out.needs.push(need);
    }

    debug!(
        candidates = needs.len(),
        eligible = out.needs.len(),
        rejected = out.rejected.len(),
        "prepared eligible needs"
    );
    out
}

/// Keep the `max` needs with the largest remaining gap (ties by id ascending),
/// preserving their input order. `None` keeps everything.
pub fn most_underfunded<'a>(needs: Vec<&'a Need>, max: Option<usize>) -> Vec<&'a Need> {
    let Some(max) = max else {
        return needs;
    };
    if max >= needs.len() {
        return needs;
    }

    let mut ranked: Vec<usize> = (0..needs.len()).collect();
    ranked.sort_by(|&a, &b| {
        needs[b]
            .remaining()
            .cmp(&needs[a].remaining())
            .then_with(|| needs[a].id.cmp(&needs[b].id))
    });
    ranked.truncate(max);
    ranked.sort_unstable();

    ranked.into_iter().map(|i| needs[i]).collect()
}
