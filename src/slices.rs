//! Set-style operations over slices.
//!
//! Functions that return "unique" results keep the first occurrence of each
//! element unless their name says they sort.

use std::collections::HashSet;
use std::fmt::Display;
use std::hash::Hash;
use std::str::FromStr;

use rand::seq::IndexedRandom;

use crate::error::SliceError;

/// Join any displayable items with `sep`.
pub fn join<T: Display>(items: &[T], sep: &str) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(sep)
}

/// Join integers as `1, 2, 3`.
pub fn join_int(ints: &[i64]) -> String {
    join(ints, ", ")
}

/// Remove duplicates, keeping first occurrences in their original order.
pub fn uniq<T: Eq + Hash + Clone>(list: &[T]) -> Vec<T> {
    let mut seen = HashSet::with_capacity(list.len());
    list.iter()
        .filter(|item| seen.insert(*item))
        .cloned()
        .collect()
}

/// Sort and remove duplicates.
pub fn uniq_sorted<T: Ord>(mut list: Vec<T>) -> Vec<T> {
    list.sort();
    list.dedup();
    list
}

/// Concatenate all lists and remove duplicates.
pub fn unique_merge<T: Eq + Hash + Clone>(lists: &[Vec<T>]) -> Vec<T> {
    let merged: Vec<T> = lists.iter().flatten().cloned().collect();
    uniq(&merged)
}

/// Parse a comma separated list of numbers such as `"1, 2,3"`. Blank input
/// gives an empty list; blank items are an error.
pub fn csv_to_ints<T>(csv: &str) -> Result<Vec<T>, SliceError>
where
    T: FromStr,
    T::Err: Display,
{
    let csv = csv.trim();
    if csv.is_empty() {
        return Ok(Vec::new());
    }

    csv.split(',')
        .map(|item| {
            let item = item.trim();
            item.parse().map_err(|e: T::Err| SliceError::InvalidNumber {
                value: item.to_string(),
                reason: e.to_string(),
            })
        })
        .collect()
}

/// Elements of `set` that appear in none of `others`.
pub fn difference<T: PartialEq + Clone>(set: &[T], others: &[&[T]]) -> Vec<T> {
    set.iter()
        .filter(|item| !others.iter().any(|other| other.contains(*item)))
        .cloned()
        .collect()
}

/// Elements only in `a` and elements only in `b`, duplicates included.
pub fn complement<T: PartialEq + Clone>(a: &[T], b: &[T]) -> (Vec<T>, Vec<T>) {
    let only_a = a.iter().filter(|x| !b.contains(*x)).cloned().collect();
    let only_b = b.iter().filter(|x| !a.contains(*x)).cloned().collect();
    (only_a, only_b)
}

/// Unique elements present in both slices, in the order they appear in `b`.
pub fn intersection<T: Eq + Hash + Clone>(a: &[T], b: &[T]) -> Vec<T> {
    let in_a: HashSet<&T> = a.iter().collect();
    let mut emitted = HashSet::new();
    b.iter()
        .filter(|item| in_a.contains(item) && emitted.insert(*item))
        .cloned()
        .collect()
}

/// Count from `start` up to and including `end`.
pub fn range(start: i64, end: i64) -> Vec<i64> {
    (start..=end).collect()
}

/// Drop every element equal to the type's default value.
pub fn filter_empty<T: Default + PartialEq>(list: Vec<T>) -> Vec<T> {
    let zero = T::default();
    list.into_iter().filter(|item| *item != zero).collect()
}

/// Pick a random element.
pub fn choose<T>(list: &[T]) -> Option<&T> {
    list.choose(&mut rand::rng())
}
