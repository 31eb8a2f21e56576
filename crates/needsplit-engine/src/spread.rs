//! Spread policies.
//!
//! Each policy works on a slice of [`Slot`]s, one per eligible need, and fills
//! in `allocated`. Slot order is the output order of the final plan. Every
//! policy returns the part of the pool it could not place.

use std::collections::BTreeMap;

use needsplit_core::error::SplitError;
use needsplit_core::money::apportion;
use needsplit_core::types::{reaches_goal, Need, NeedCategory};
use tracing::debug;

/// Working state for one need during a split.
#[derive(Debug, Clone)]
pub struct Slot<'a> {
    pub need: &'a Need,
    /// Minor units assigned so far in this invocation.
    pub allocated: i64,
}

impl<'a> Slot<'a> {
    pub fn new(need: &'a Need) -> Self {
        Self { need, allocated: 0 }
    }

    /// How much more this need can take without passing its goal.
    pub fn headroom(&self) -> i64 {
        (self.need.remaining() - self.allocated).max(0)
    }

    /// Whether the need can still receive funds.
    pub fn is_open(&self) -> bool {
        self.headroom() > 0
            && !reaches_goal(
                self.need.raised_amount + self.allocated,
                self.need.goal_amount,
            )
    }
}

/// Even spread with redistribution, as a single water-filling sweep.
///
/// Open slots are visited by headroom ascending. A slot whose headroom fits
/// inside an equal share of what is left is filled to its goal and drops out;
/// the first slot that does not fit ends the sweep, and the remaining pool is
/// apportioned equally over it and every larger slot, extra units going to
/// the earliest of them in output order. Every level share fits its slot's
/// headroom, so nothing is clipped after the sweep.
pub fn even(pool: i64, slots: &mut [Slot<'_>]) -> Result<i64, SplitError> {
    if pool <= 0 {
        return Ok(pool);
    }

    let mut open: Vec<usize> = (0..slots.len()).filter(|&i| slots[i].is_open()).collect();
    open.sort_by_key(|&i| slots[i].headroom());

    let mut pool = pool;
    let mut capped = 0usize;
    for &i in &open {
        let sharing = (open.len() - capped) as i128;
        let room = slots[i].headroom();
        if room as i128 * sharing > pool as i128 {
            break;
        }
        slots[i].allocated += room;
        pool -= room;
        capped += 1;
    }

    let mut level = open[capped..].to_vec();
    level.sort_unstable();
    if !level.is_empty() {
        let shares = apportion(pool, &vec![1; level.len()])?;
        for (&i, share) in level.iter().zip(shares) {
            slots[i].allocated += share;
        }
        pool = 0;
    }

    debug!(
        open = open.len(),
        capped,
        level = level.len(),
        leftover = pool,
        "even spread"
    );
    Ok(pool)
}

/// Priority spread: closest to completion first.
///
/// Reorders `slots` by remaining gap ascending, ties by need id ascending, then
/// fills each slot up to its gap until the pool runs out. With `max_recipients`
/// only the first `max` slots in that order are eligible.
pub fn priority(
    pool: i64,
    slots: &mut Vec<Slot<'_>>,
    max_recipients: Option<usize>,
) -> Result<i64, SplitError> {
    slots.sort_by(|a, b| {
        a.need
            .remaining()
            .cmp(&b.need.remaining())
            .then_with(|| a.need.id.cmp(&b.need.id))
    });
    if let Some(max) = max_recipients {
        slots.truncate(max);
    }

    let mut pool = pool;
    for slot in slots.iter_mut() {
        if pool == 0 {
            break;
        }
        let give = pool.min(slot.headroom());
        slot.allocated += give;
        pool -= give;
    }

    debug!(recipients = slots.len(), leftover = pool, "priority spread");
    Ok(pool)
}

/// Category-weighted spread.
///
/// Reorders `slots` by category (stable, so input order holds inside each
/// category), apportions the pool across categories by `weights` (or by need
/// count when `weights` is empty), and runs an even spread inside each
/// category. Whatever a fully funded category cannot absorb is then spread
/// evenly across every slot that still has headroom.
pub fn category_weighted(
    pool: i64,
    slots: &mut Vec<Slot<'_>>,
    weights: &BTreeMap<NeedCategory, u32>,
) -> Result<i64, SplitError> {
    slots.sort_by_key(|s| s.need.category);

    let mut groups: Vec<(NeedCategory, usize, usize)> = Vec::new();
    for (i, slot) in slots.iter().enumerate() {
        let cat = slot.need.category;
        match groups.last() {
            Some(&(last, start, _)) if last == cat => {
                let n = groups.len();
                groups[n - 1] = (cat, start, i + 1);
            }
            _ => groups.push((cat, i, i + 1)),
        }
    }
    if groups.is_empty() {
        return Ok(pool);
    }

    let group_weights: Vec<u64> = groups
        .iter()
        .map(|&(cat, start, end)| {
            if weights.is_empty() {
                (end - start) as u64
            } else {
                weights.get(&cat).copied().unwrap_or(0) as u64
            }
        })
        .collect();
    let shares = apportion(pool, &group_weights)?;

    let mut spill = 0i64;
    for (&(cat, start, end), share) in groups.iter().zip(shares) {
        let left = even(share, &mut slots[start..end])?;
        debug!(category = %cat, share, left, "category spread");
        spill += left;
    }

    if spill > 0 {
        debug!(spill, "redistributing category spill");
        spill = even(spill, slots)?;
    }
    Ok(spill)
}
