//! Missingness predicates over a series.
//!
//! A slot is missing when it holds [`Value::Null`], or a float `NaN` in a
//! `Float64` series. All replacement entry points share these predicates so
//! the two representations are never treated differently.

use crate::types::{Series, Value};

/// Per-slot missingness mask, aligned with the series values.
pub fn is_missing(series: &Series) -> Vec<bool> {
    series.values().iter().map(Value::is_missing).collect()
}

/// Indices of the missing slots, in ascending order.
pub fn missing_positions(series: &Series) -> Vec<usize> {
    series
        .values()
        .iter()
        .enumerate()
        .filter(|(_, v)| v.is_missing())
        .map(|(i, _)| i)
        .collect()
}

/// Number of missing slots.
pub fn missing_count(series: &Series) -> usize {
    series.values().iter().filter(|v| v.is_missing()).count()
}
