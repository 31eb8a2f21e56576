//! End-to-end split scenarios.
//!
//! Each test drives the engine through the public [`SplitCalculator`] trait
//! the way a caller would: build needs, pick a mode, inspect the plan.

use needsplit_core::constants::CENTS_PER_UNIT;
use needsplit_core::error::{NeedError, SplitError};
use needsplit_core::money::to_minor_units;
use needsplit_core::traits::SplitCalculator;
use needsplit_core::types::{NeedCategory, SplitMode, SplitOptions};
use needsplit_engine::{EngineConfig, SplitEngine};
use needsplit_tests::helpers::{allocation_ids, make_need, need_with_gap, units};

fn engine() -> SplitEngine {
    SplitEngine::new()
}

// ---------------------------------------------------------------------------
// Empty input
// ---------------------------------------------------------------------------

#[test]
fn empty_input_returns_empty_plan() {
    let amount = to_minor_units(50.00).unwrap();
    for mode in [SplitMode::Even, SplitMode::Priority, SplitMode::CategoryWeighted] {
        let r = engine()
            .compute_split(amount, &[], mode, &SplitOptions::default())
            .unwrap();
        assert!(r.allocations.is_empty());
        assert_eq!(r.total_amount, 0);
        assert_eq!(r.fee, 0);
        assert_eq!(r.goals_completed, 0);
        assert_eq!(r.total_people, 0);
    }
}

#[test]
fn non_positive_contribution_is_rejected() {
    let needs = vec![need_with_gap("a", units(10))];
    let err = engine()
        .compute_split(0, &needs, SplitMode::Even, &SplitOptions::default())
        .unwrap_err();
    assert!(matches!(err, SplitError::InvalidAmount(_)));
}

// ---------------------------------------------------------------------------
// Even spread
// ---------------------------------------------------------------------------

#[test]
fn even_spread_exact_split() {
    let needs = vec![
        make_need("A", NeedCategory::Groceries, units(100), 0),
        make_need("B", NeedCategory::Groceries, units(100), 0),
    ];
    let r = engine()
        .compute_split(units(30), &needs, SplitMode::Even, &SplitOptions::default())
        .unwrap();

    assert_eq!(allocation_ids(&r), vec!["A", "B"]);
    for a in &r.allocations {
        assert_eq!(a.amount, units(15));
        assert!(!a.will_complete);
        assert_eq!(a.raised_after, units(15));
    }
    assert_eq!(r.total_amount, units(30));
}

#[test]
fn even_spread_redistributes_capped_share() {
    let needs = vec![need_with_gap("A", units(10)), need_with_gap("B", units(90))];
    let options = SplitOptions::default().with_max_recipients(2);
    let r = engine()
        .compute_split(units(100), &needs, SplitMode::Even, &options)
        .unwrap();

    let a = r.allocation_for("A").unwrap();
    let b = r.allocation_for("B").unwrap();
    assert_eq!(a.amount, units(10));
    assert!(a.will_complete);
    assert_eq!(b.amount, units(90));
    assert!(b.will_complete);
    assert_eq!(r.total_amount, units(100));
    assert_eq!(r.unallocated, 0);
    assert_eq!(r.goals_completed, 2);
}

#[test]
fn even_spread_reports_residual_when_every_goal_is_met() {
    let needs = vec![need_with_gap("A", units(10)), need_with_gap("B", units(20))];
    let r = engine()
        .compute_split(units(100), &needs, SplitMode::Even, &SplitOptions::default())
        .unwrap();

    assert_eq!(r.total_amount, units(30));
    assert_eq!(r.unallocated, units(70));
    assert_eq!(r.total_amount + r.unallocated, r.requested_amount);
    assert_eq!(r.goals_completed, 2);
}

#[test]
fn even_spread_rounding_residual_lands_on_first_allocation() {
    let needs = vec![
        need_with_gap("A", units(100)),
        need_with_gap("B", units(100)),
        need_with_gap("C", units(100)),
    ];
    let r = engine()
        .compute_split(units(10), &needs, SplitMode::Even, &SplitOptions::default())
        .unwrap();

    let amounts: Vec<i64> = r.allocations.iter().map(|a| a.amount).collect();
    assert_eq!(amounts, vec![334, 333, 333]);
    assert_eq!(r.total_amount, units(10));
}

#[test]
fn even_spread_residual_cents_are_spread_one_each() {
    let needs: Vec<_> = (0..10)
        .map(|i| need_with_gap(&format!("n{i}"), units(100)))
        .collect();
    let r = engine()
        .compute_split(25, &needs, SplitMode::Even, &SplitOptions::default())
        .unwrap();

    let amounts: Vec<i64> = r.allocations.iter().map(|a| a.amount).collect();
    assert_eq!(amounts, vec![3, 3, 3, 3, 3, 2, 2, 2, 2, 2]);
    assert_eq!(r.total_amount, 25);
}

#[test]
fn even_spread_tiny_contribution_reaches_many_needs() {
    let needs: Vec<_> = (0..1000)
        .map(|i| need_with_gap(&format!("n{i:04}"), units(100)))
        .collect();
    let r = engine()
        .compute_split(499, &needs, SplitMode::Even, &SplitOptions::default())
        .unwrap();

    assert_eq!(r.total_people, 499);
    assert!(r.allocations.iter().all(|a| a.amount == 1));
    assert_eq!(r.allocations[0].need_id, "n0000");
    assert_eq!(r.unallocated, 0);
}

// ---------------------------------------------------------------------------
// Priority spread
// ---------------------------------------------------------------------------

#[test]
fn priority_spread_tie_break_is_input_order_independent() {
    let forward = vec![need_with_gap("alpha", units(40)), need_with_gap("beta", units(40))];
    let reversed: Vec<_> = forward.iter().rev().cloned().collect();

    let r1 = engine()
        .compute_split(units(50), &forward, SplitMode::Priority, &SplitOptions::default())
        .unwrap();
    let r2 = engine()
        .compute_split(units(50), &reversed, SplitMode::Priority, &SplitOptions::default())
        .unwrap();

    assert_eq!(allocation_ids(&r1), vec!["alpha", "beta"]);
    assert_eq!(r1, r2);
    assert_eq!(r1.allocations[0].amount, units(40));
    assert_eq!(r1.allocations[1].amount, units(10));
}

#[test]
fn priority_spread_stops_when_funds_run_out() {
    let needs = vec![
        need_with_gap("big", units(500)),
        need_with_gap("small", units(5)),
        need_with_gap("medium", units(50)),
    ];
    let r = engine()
        .compute_split(units(30), &needs, SplitMode::Priority, &SplitOptions::default())
        .unwrap();

    assert_eq!(allocation_ids(&r), vec!["small", "medium"]);
    assert_eq!(r.allocation_for("small").unwrap().amount, units(5));
    assert!(r.allocation_for("small").unwrap().will_complete);
    assert_eq!(r.allocation_for("medium").unwrap().amount, units(25));
    assert!(r.allocation_for("big").is_none());
}

// ---------------------------------------------------------------------------
// Category-weighted spread
// ---------------------------------------------------------------------------

#[test]
fn category_spread_weights_by_need_count() {
    let needs = vec![
        make_need("m1", NeedCategory::Medical, units(1000), 0),
        make_need("e1", NeedCategory::Education, units(1000), 0),
        make_need("m2", NeedCategory::Medical, units(1000), 0),
        make_need("m3", NeedCategory::Medical, units(1000), 0),
    ];
    let r = engine()
        .compute_split(
            units(40),
            &needs,
            SplitMode::CategoryWeighted,
            &SplitOptions::default(),
        )
        .unwrap();

    assert_eq!(allocation_ids(&r), vec!["m1", "m2", "m3", "e1"]);
    assert!(r.allocations.iter().all(|a| a.amount == units(10)));
}

#[test]
fn category_spread_uses_configured_weights() {
    let needs = vec![
        make_need("g1", NeedCategory::Groceries, units(1000), 0),
        make_need("u1", NeedCategory::Utilities, units(1000), 0),
    ];
    let options = SplitOptions::default()
        .with_weight(NeedCategory::Groceries, 1)
        .with_weight(NeedCategory::Utilities, 4);
    let r = engine()
        .compute_split(units(50), &needs, SplitMode::CategoryWeighted, &options)
        .unwrap();

    assert_eq!(r.allocation_for("g1").unwrap().amount, units(10));
    assert_eq!(r.allocation_for("u1").unwrap().amount, units(40));
}

#[test]
fn category_filter_is_applied_defensively() {
    let needs = vec![
        make_need("g1", NeedCategory::Groceries, units(100), 0),
        make_need("m1", NeedCategory::Medical, units(100), 0),
    ];
    let options = SplitOptions::default().with_category_filter(NeedCategory::Medical);
    let r = engine()
        .compute_split(units(20), &needs, SplitMode::Even, &options)
        .unwrap();

    assert_eq!(allocation_ids(&r), vec!["m1"]);
    assert_eq!(r.total_amount, units(20));
}

// ---------------------------------------------------------------------------
// Invalid needs and fees
// ---------------------------------------------------------------------------

#[test]
fn malformed_needs_are_reported_and_skipped() {
    let needs = vec![
        make_need("neg", NeedCategory::Other, units(100), -1),
        make_need("zero", NeedCategory::Other, 0, 0),
        make_need("ok", NeedCategory::Other, units(100), 0),
        make_need("ok", NeedCategory::Other, units(100), 0),
    ];
    let r = engine()
        .compute_split(units(10), &needs, SplitMode::Even, &SplitOptions::default())
        .unwrap();

    assert_eq!(allocation_ids(&r), vec!["ok"]);
    let reasons: Vec<&NeedError> = r.rejected.iter().map(|x| &x.reason).collect();
    assert_eq!(
        reasons,
        vec![
            &NeedError::NegativeRaised { raised: -1 },
            &NeedError::NonPositiveGoal { goal: 0 },
            &NeedError::DuplicateId,
        ]
    );
}

#[test]
fn fee_and_net_follow_config() {
    let engine = SplitEngine::with_config(EngineConfig { fee_bps: 290 }).unwrap();
    let needs = vec![need_with_gap("a", units(1000))];
    let r = engine
        .compute_split(units(100), &needs, SplitMode::Even, &SplitOptions::default())
        .unwrap();

    // 2.9% of 100.00 = 2.90
    assert_eq!(r.fee, 290);
    assert_eq!(r.net_amount, units(100) - 290);
    assert_eq!(r.fee + r.net_amount, r.total_amount);
}

#[test]
fn fee_is_charged_on_allocated_total_only() {
    let needs = vec![need_with_gap("a", units(20))];
    let r = engine()
        .compute_split(units(100), &needs, SplitMode::Even, &SplitOptions::default())
        .unwrap();
    assert_eq!(r.total_amount, units(20));
    assert_eq!(r.fee, CENTS_PER_UNIT);
}

#[test]
fn result_serializes_for_downstream_consumers() {
    let needs = vec![need_with_gap("a", units(20))];
    let r = engine()
        .compute_split(units(5), &needs, SplitMode::Priority, &SplitOptions::default())
        .unwrap();
    let json = serde_json::to_value(&r).unwrap();
    assert_eq!(json["mode"], "priority");
    assert_eq!(json["allocations"][0]["need_id"], "a");
    assert_eq!(json["allocations"][0]["amount"], 500);
    assert_eq!(json["total_people"], 1);
}
