//! Replacement into categorical series, where every written label must be a
//! member of the level set.
//!
//! Unknown labels are not an error: the level set grows to admit them,
//! append-only and in first-seen order, so existing level indices stay
//! stable. Every non-missing resolved label contributes to growth, including
//! labels a positional replacement carries for slots that are not missing.

use crate::types::{Series, Value};

use super::Reporter;
use super::observability::Advisory;
use super::resolve::ReplacementValues;
use super::write::write_masked;

/// Result of a categorical masked write.
pub(crate) struct CategoricalOutcome {
    pub(crate) series: Series,
    pub(crate) replaced: usize,
    pub(crate) levels_added: Vec<String>,
}

/// Grow the level set to cover `values`, then write them at `positions`.
pub(crate) fn replace_resolved(
    mut series: Series,
    positions: &[usize],
    values: ReplacementValues,
    reporter: &Reporter<'_>,
) -> CategoricalOutcome {
    let mut added: Vec<String> = Vec::new();
    {
        let levels = series.levels.get_or_insert_with(Vec::new);
        match &values {
            ReplacementValues::One(v) => collect_new_label(levels, &mut added, v),
            ReplacementValues::Many(vs) => {
                for v in vs {
                    collect_new_label(levels, &mut added, v);
                }
            }
        }
        levels.extend(added.iter().cloned());
    }
    if !added.is_empty() {
        reporter.advisory(Advisory::LevelsAdded {
            levels: added.clone(),
        });
    }

    let out = write_masked(series, positions, values, reporter);
    CategoricalOutcome {
        series: out.series,
        replaced: out.replaced,
        levels_added: added,
    }
}

fn collect_new_label(levels: &[String], added: &mut Vec<String>, value: &Value) {
    if let Value::Utf8(label) = value {
        if !levels.iter().any(|l| l == label) && !added.iter().any(|l| l == label) {
            added.push(label.clone());
        }
    }
}
