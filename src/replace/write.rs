//! Masked writes of resolved replacement values into a series.
//!
//! Only the missing slots named by `positions` are ever touched; a
//! positional replacement may carry values for clean slots, and those are
//! ignored. Replacement values that are themselves missing leave their slot
//! as-is and are reported through an advisory instead of an error.

use crate::types::Series;

use super::Reporter;
use super::observability::Advisory;
use super::resolve::ReplacementValues;

/// Result of a masked write.
pub(crate) struct WriteOutcome {
    pub(crate) series: Series,
    pub(crate) replaced: usize,
}

/// Write `values` into `series` at `positions`.
///
/// `positions` is non-empty and `Many` values are series-aligned by the time
/// this runs.
pub(crate) fn write_masked(
    mut series: Series,
    positions: &[usize],
    values: ReplacementValues,
    reporter: &Reporter<'_>,
) -> WriteOutcome {
    match values {
        ReplacementValues::One(v) => {
            if v.is_missing() {
                reporter.advisory(Advisory::ReplacementAllMissing {
                    positions: positions.len(),
                });
                return WriteOutcome { series, replaced: 0 };
            }
            for &p in positions {
                series.values[p] = v.clone();
            }
            WriteOutcome {
                series,
                replaced: positions.len(),
            }
        }
        ReplacementValues::Many(vs) => {
            let available = positions.iter().filter(|&&p| !vs[p].is_missing()).count();
            if available == 0 {
                reporter.advisory(Advisory::ReplacementAllMissing {
                    positions: positions.len(),
                });
                return WriteOutcome { series, replaced: 0 };
            }
            if available < positions.len() {
                reporter.advisory(Advisory::ReplacementPartiallyMissing {
                    filled: available,
                    left_missing: positions.len() - available,
                });
            }
            for &p in positions {
                if !vs[p].is_missing() {
                    series.values[p] = vs[p].clone();
                }
            }
            WriteOutcome {
                series,
                replaced: available,
            }
        }
    }
}
