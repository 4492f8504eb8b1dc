//! Rounding helpers, integer set complements and [`ByteSize`] formatting.

mod byte_size;

pub use byte_size::{BINARY_UNITS, ByteSize, DECIMAL_UNITS};

use std::collections::HashSet;
use std::hash::Hash;

/// Round to the nearest integer; halfway values round away from zero.
pub fn round(f: f64) -> f64 {
    f.round()
}

/// Round to `precision` decimal places.
///
/// # Examples
///
/// ```
/// assert_eq!(utilbelt::math::round_plus(7.258, 2), 7.26);
/// ```
pub fn round_plus(f: f64, precision: i32) -> f64 {
    let shift = 10f64.powi(precision);
    round(f * shift) / shift
}

/// Round towards positive infinity at `precision` decimal places.
pub fn ceil_plus(f: f64, precision: i32) -> f64 {
    let multiplier = 10f64.powi(precision);
    (f * multiplier).ceil() / multiplier
}

/// Clamp `v` between `lower` and `upper`. Unlike [`f64::clamp`] this never
/// panics; when the bounds are inverted `lower` wins.
pub fn limit(v: f64, lower: f64, upper: f64) -> f64 {
    v.min(upper).max(lower)
}

/// Integer division rounding towards positive infinity, e.g. the number of
/// pages needed for `count` items. `None` when `page_size` is zero.
pub fn divide_ceil(count: i64, page_size: i64) -> Option<i64> {
    let quotient = count.checked_div(page_size)?;
    let remainder = count.checked_rem(page_size)?;
    if remainder != 0 && (remainder > 0) == (page_size > 0) {
        Some(quotient + 1)
    } else {
        Some(quotient)
    }
}

/// Whether `f` is negative zero.
pub fn is_signed_zero(f: f64) -> bool {
    f == 0.0 && f.is_sign_negative()
}

/// Elements only in `a` and elements only in `b`, using hashing instead of
/// linear scans. Each value in `a` is reported at most once; `b` keeps its
/// duplicates.
pub fn complements<T: Eq + Hash + Clone>(a: &[T], b: &[T]) -> (Vec<T>, Vec<T>) {
    let mut remaining: HashSet<&T> = a.iter().collect();
    let mut only_b = Vec::new();

    for item in b {
        if !remaining.remove(item) {
            only_b.push(item.clone());
        }
    }

    let mut emitted = HashSet::new();
    let only_a = a
        .iter()
        .filter(|item| remaining.contains(*item) && emitted.insert(*item))
        .cloned()
        .collect();

    (only_a, only_b)
}
