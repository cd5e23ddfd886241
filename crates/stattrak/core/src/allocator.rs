//! Splitting one damage amount across several tracked objects.

use crate::value::StatValue;

/// Result of allocating a share to one target.
#[derive(Clone, Debug, PartialEq)]
pub struct Allocation<T> {
    pub target: T,
    /// Value supplied by the caller for this target.
    pub previous: StatValue,
    /// `previous + share`, rounded to one decimal place.
    pub updated: StatValue,
}

/// Splits `total` evenly across `targets` and adds each share to the target's
/// running value.
///
/// Results come back in input order, each paired with the value the caller
/// supplied, so targets never need to be looked up again. Every result is
/// rounded independently: the rounded deltas can drift from `total` by up to
/// `0.1` per target, and no remainder is redistributed.
///
/// An empty target list yields no allocations.
pub fn allocate<T>(
    total: f64,
    targets: impl IntoIterator<Item = (T, StatValue)>,
) -> Vec<Allocation<T>> {
    let targets: Vec<(T, StatValue)> = targets.into_iter().collect();
    if targets.is_empty() {
        return Vec::new();
    }

    let share = total / targets.len() as f64;

    targets
        .into_iter()
        .map(|(target, previous)| Allocation {
            target,
            previous,
            updated: StatValue::Fractional(round_tenths(previous.as_f64() + share)),
        })
        .collect()
}

/// Rounds to one decimal place, halves rounding up.
pub fn round_tenths(value: f64) -> f64 {
    (value * 10.0 + 0.5).floor() / 10.0
}
