//! Replacement sources and their resolution into concrete values.
//!
//! A [`Replacement`] names where fill values come from; resolution turns it
//! into [`ReplacementValues`] aligned with the series: a single broadcast
//! value or one value per slot. Generators run at most once per call and
//! only when the series actually has missing slots.

use std::fmt;

use crate::coerce::coerce_value;
use crate::error::{ReplaceError, ReplaceResult};
use crate::types::{DataType, Series, Value};

use super::Reporter;
use super::observability::Advisory;

/// Callback that derives replacement values from the series being filled.
///
/// It receives the original series, missing slots included, so derived
/// statistics see the data exactly as the caller holds it.
pub type GeneratorFn = Box<dyn Fn(&Series) -> ReplacementValues>;

/// Where replacement values come from.
pub enum Replacement {
    /// One value broadcast to every missing slot.
    Scalar(Value),
    /// One value per slot, applied positionally. Length must be the series
    /// length or exactly 1; anything else is a cardinality error, never
    /// recycled.
    Vector(Vec<Value>),
    /// A callback evaluated against the original series.
    Generator(GeneratorFn),
}

impl Replacement {
    /// Broadcast `value` to every missing slot.
    pub fn scalar(value: impl Into<Value>) -> Self {
        Replacement::Scalar(value.into())
    }

    /// Positional replacement values.
    pub fn vector(values: Vec<Value>) -> Self {
        Replacement::Vector(values)
    }

    /// Derive replacement values from the series at call time.
    pub fn generator(generate: impl Fn(&Series) -> ReplacementValues + 'static) -> Self {
        Replacement::Generator(Box::new(generate))
    }
}

impl fmt::Debug for Replacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Replacement::Scalar(v) => f.debug_tuple("Scalar").field(v).finish(),
            Replacement::Vector(vs) => f.debug_tuple("Vector").field(vs).finish(),
            Replacement::Generator(_) => f.write_str("Generator(..)"),
        }
    }
}

/// Resolved replacement values, ready for coercion and writing.
#[derive(Debug, Clone, PartialEq)]
pub enum ReplacementValues {
    /// A single value broadcast to every missing slot.
    One(Value),
    /// One value per slot of the series.
    Many(Vec<Value>),
}

/// A replacement length is acceptable when it is 1 (broadcast) or the series
/// length (positional).
pub(crate) fn validate_cardinality(series_len: usize, actual: usize) -> ReplaceResult<()> {
    if actual == 1 || actual == series_len {
        return Ok(());
    }
    Err(ReplaceError::Cardinality {
        expected: series_len,
        actual,
    })
}

/// Normalize an owned value list against the series length. A single-element
/// list collapses to a broadcast value.
pub(crate) fn vector_values(
    series_len: usize,
    mut values: Vec<Value>,
) -> ReplaceResult<ReplacementValues> {
    if values.len() == 1 {
        return Ok(ReplacementValues::One(values.remove(0)));
    }
    validate_cardinality(series_len, values.len())?;
    Ok(ReplacementValues::Many(values))
}

/// Resolve `replacement` against `series` and coerce the result into the
/// series kind.
///
/// `positions` are the missing slots; callers only get here when it is
/// non-empty, so a generator never runs on clean input.
pub(crate) fn resolve_replacement(
    series: &Series,
    replacement: Replacement,
    positions: &[usize],
    reporter: &Reporter<'_>,
) -> ReplaceResult<ReplacementValues> {
    let raw = match replacement {
        Replacement::Scalar(v) => ReplacementValues::One(v),
        Replacement::Vector(values) => vector_values(series.len(), values)?,
        Replacement::Generator(generate) => {
            if positions.len() == series.len() {
                reporter.advisory(Advisory::GeneratorAllMissing {
                    missing: positions.len(),
                });
            }
            match generate(series) {
                ReplacementValues::One(v) => ReplacementValues::One(v),
                ReplacementValues::Many(values) => vector_values(series.len(), values)?,
            }
        }
    };
    coerce_values(raw, series.data_type(), reporter)
}

/// Coerce resolved values into `target`.
///
/// A broadcast value that fails is fatal. In a positional list, elements
/// fail independently: all failing is fatal, some failing degrades to an
/// advisory and the failed slots become missing.
pub(crate) fn coerce_values(
    values: ReplacementValues,
    target: &DataType,
    reporter: &Reporter<'_>,
) -> ReplaceResult<ReplacementValues> {
    match values {
        ReplacementValues::One(v) => Ok(ReplacementValues::One(coerce_value(&v, target)?)),
        ReplacementValues::Many(vs) => {
            let mut out = Vec::with_capacity(vs.len());
            let mut attempted = 0usize;
            let mut failed = 0usize;
            let mut first_err = None;
            for v in &vs {
                if v.is_missing() {
                    out.push(Value::Null);
                    continue;
                }
                attempted += 1;
                match coerce_value(v, target) {
                    Ok(coerced) => out.push(coerced),
                    Err(err) => {
                        failed += 1;
                        if first_err.is_none() {
                            first_err = Some(err);
                        }
                        out.push(Value::Null);
                    }
                }
            }
            if let Some(err) = first_err {
                if failed == attempted {
                    return Err(err);
                }
                reporter.advisory(Advisory::PartialCoercion {
                    coerced: attempted - failed,
                    failed,
                });
            }
            Ok(ReplacementValues::Many(out))
        }
    }
}
