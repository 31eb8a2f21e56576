//! Minor-unit arithmetic: conversion, banker's rounding, and apportionment.
//!
//! Everything here is integer-only with `i128` intermediates so that a split is
//! bit-for-bit reproducible across platforms.

use crate::constants::{CENTS_PER_UNIT, MAX_CONTRIBUTION, MINOR_UNIT_TOLERANCE};
use crate::error::SplitError;

/// Divide `num` by `den`, rounding half-to-even.
///
/// `den` must be positive. Negative numerators round symmetrically.
///
/// # Examples
///
/// ```
/// use needsplit_core::money::round_half_even_div;
/// assert_eq!(round_half_even_div(5, 2), 2);  // 2.5 -> 2
/// assert_eq!(round_half_even_div(7, 2), 4);  // 3.5 -> 4
/// assert_eq!(round_half_even_div(10, 3), 3);
/// assert_eq!(round_half_even_div(-7, 2), -4);
/// ```
pub fn round_half_even_div(num: i128, den: i128) -> i128 {
    debug_assert!(den > 0, "denominator must be positive");
    if num < 0 {
        return -round_half_even_div(-num, den);
    }
    let q = num / den;
    let twice_rem = (num % den) * 2;
    if twice_rem > den || (twice_rem == den && q % 2 == 1) {
        q + 1
    } else {
        q
    }
}

/// Split `total` into shares proportional to `weights`.
///
/// Every share starts at its floor; the leftover units are then handed out one
/// each to the non-zero-weight shares in order, so the first such share takes
/// the residual unit. Each share is within one unit of its exact value, equal
/// weights give shares at most one unit apart, and the result always sums to
/// `total` exactly.
///
/// All-zero weights are treated as equal weights.
///
/// # Examples
///
/// ```
/// use needsplit_core::money::apportion;
/// assert_eq!(apportion(100, &[1, 1, 1]).unwrap(), vec![34, 33, 33]);
/// assert_eq!(apportion(1000, &[3, 1]).unwrap(), vec![750, 250]);
/// ```
pub fn apportion(total: i64, weights: &[u64]) -> Result<Vec<i64>, SplitError> {
    if weights.is_empty() {
        return Ok(Vec::new());
    }
    if total < 0 {
        return Err(SplitError::InvalidAmount(format!(
            "cannot apportion negative total {total}"
        )));
    }

    let equal;
    let weights = if weights.iter().all(|&w| w == 0) {
        equal = vec![1u64; weights.len()];
        &equal[..]
    } else {
        weights
    };

    let weight_sum: i128 = weights.iter().map(|&w| w as i128).sum();

    let mut shares = Vec::with_capacity(weights.len());
    for &w in weights {
        let scaled = (total as i128)
            .checked_mul(w as i128)
            .ok_or(SplitError::ArithmeticOverflow)?;
        shares.push(scaled / weight_sum);
    }

    // Each floor loses less than one unit, so the residual is smaller than the
    // number of non-zero weights.
    let mut residual = total as i128 - shares.iter().sum::<i128>();
    for (share, &w) in shares.iter_mut().zip(weights) {
        if residual == 0 {
            break;
        }
        if w > 0 {
            *share += 1;
            residual -= 1;
        }
    }

    shares
        .into_iter()
        .map(|s| i64::try_from(s).map_err(|_| SplitError::ArithmeticOverflow))
        .collect()
}

/// Convert a major-unit float (e.g. `12.34`) into minor units.
///
/// Fails when the value is non-finite, out of range, or further than
/// [`MINOR_UNIT_TOLERANCE`] of a cent from a whole number of cents.
///
/// # Examples
///
/// ```
/// use needsplit_core::money::to_minor_units;
/// assert_eq!(to_minor_units(30.0).unwrap(), 3000);
/// assert_eq!(to_minor_units(0.29).unwrap(), 29);
/// assert!(to_minor_units(1.234).is_err());
/// ```
pub fn to_minor_units(value: f64) -> Result<i64, SplitError> {
    if !value.is_finite() {
        return Err(SplitError::InvalidAmount(format!("{value} is not finite")));
    }
    let scaled = value * CENTS_PER_UNIT as f64;
    let rounded = scaled.round();
    if (scaled - rounded).abs() > MINOR_UNIT_TOLERANCE {
        return Err(SplitError::InvalidAmount(format!(
            "{value} is not a whole number of minor units"
        )));
    }
    if rounded.abs() > MAX_CONTRIBUTION as f64 {
        return Err(SplitError::InvalidAmount(format!("{value} is out of range")));
    }
    Ok(rounded as i64)
}

/// Parse a decimal string in major units into minor units.
pub fn parse_major(s: &str) -> Result<i64, SplitError> {
    let value: f64 = s
        .trim()
        .parse()
        .map_err(|_| SplitError::InvalidAmount(format!("cannot parse {s:?}")))?;
    to_minor_units(value)
}

/// Render minor units as a major-unit decimal string, e.g. `1505` -> `"15.05"`.
pub fn format_minor(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    let per = CENTS_PER_UNIT as u64;
    format!("{sign}{}.{:02}", abs / per, abs % per)
}
