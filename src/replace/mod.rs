//! Replacement entrypoints and implementations.
//!
//! Most callers should use [`replace_na`], which:
//!
//! - fills the missing slots of a [`crate::types::Series`] and returns it
//! - resolves the replacement source (scalar, vector, or generator) at most
//!   once per call
//! - optionally reports advisories, completion stats, and alerts to a
//!   [`ReplaceObserver`]
//!
//! [`replace_na_with_default`] is the no-replacement convenience: text and
//! categorical series are filled with the sentinel from
//! [`ReplaceOptions::na_level`]; other kinds have no safe default and fail.

use std::fmt;
use std::sync::Arc;

use crate::error::{ReplaceError, ReplaceResult};
use crate::missing::missing_positions;
use crate::types::{DataType, Series, Value};

pub mod observability;

mod categorical;
mod resolve;
mod write;

pub use observability::{
    Advisory, CompositeObserver, FileObserver, ReplaceContext, ReplaceObserver, ReplaceSeverity,
    ReplaceStats, StdErrObserver,
};
pub use resolve::{GeneratorFn, Replacement, ReplacementValues};

/// Sentinel label written into text and categorical series when no explicit
/// replacement is given.
pub const DEFAULT_NA_LEVEL: &str = "(NA)";

/// Options controlling replacement behavior.
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct ReplaceOptions {
    /// Sentinel label for text and categorical series filled without an
    /// explicit replacement.
    pub na_level: String,
    /// Deliver verbose-only advisories (currently just level growth).
    pub verbose: bool,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn ReplaceObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: ReplaceSeverity,
}

impl fmt::Debug for ReplaceOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReplaceOptions")
            .field("na_level", &self.na_level)
            .field("verbose", &self.verbose)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for ReplaceOptions {
    fn default() -> Self {
        Self {
            na_level: DEFAULT_NA_LEVEL.to_string(),
            verbose: false,
            observer: None,
            alert_at_or_above: ReplaceSeverity::Error,
        }
    }
}

/// Delivers observer callbacks for one replacement call.
///
/// Holds the context captured from the input series so callbacks keep
/// working after the series has been consumed.
pub(crate) struct Reporter<'a> {
    ctx: ReplaceContext,
    options: &'a ReplaceOptions,
}

impl<'a> Reporter<'a> {
    pub(crate) fn new(series: &Series, options: &'a ReplaceOptions) -> Self {
        Self {
            ctx: ReplaceContext {
                column: series.name().to_string(),
                data_type: series.data_type().clone(),
            },
            options,
        }
    }

    pub(crate) fn advisory(&self, advisory: Advisory) {
        if advisory.verbose_only() && !self.options.verbose {
            return;
        }
        if let Some(obs) = self.options.observer.as_ref() {
            obs.on_advisory(&self.ctx, &advisory);
            let severity = advisory.severity();
            if severity >= self.options.alert_at_or_above {
                obs.on_alert(&self.ctx, severity, &advisory.to_string());
            }
        }
    }

    fn complete(&self, stats: &ReplaceStats) {
        if let Some(obs) = self.options.observer.as_ref() {
            obs.on_complete(&self.ctx, stats);
        }
    }

    fn failure(&self, error: &ReplaceError) {
        if let Some(obs) = self.options.observer.as_ref() {
            obs.on_failure(&self.ctx, ReplaceSeverity::Error, error);
            if ReplaceSeverity::Error >= self.options.alert_at_or_above {
                obs.on_alert(&self.ctx, ReplaceSeverity::Error, &error.to_string());
            }
        }
    }
}

/// Fill the missing slots of `series` and return it.
///
/// The series is taken by value, mutated in place, and handed back; slots
/// holding non-missing values are never touched. `replacement` may be:
///
/// - `Some(Replacement::Scalar(..))`: one value broadcast to every missing slot
/// - `Some(Replacement::Vector(..))`: one value per slot, applied positionally;
///   the length must be the series length or exactly 1, never recycled
/// - `Some(Replacement::Generator(..))`: a callback receiving the original
///   series, evaluated at most once and only when something is missing
/// - `None`: text and categorical series fall back to the
///   [`ReplaceOptions::na_level`] sentinel; other kinds fail with
///   [`ReplaceError::MissingReplacement`]
///
/// Replacement values are coerced into the series kind exactly (see
/// [`crate::coerce::coerce_value`]); the returned series always keeps its
/// name, length, and kind.
///
/// When an observer is configured, this function reports:
///
/// - `on_advisory` for non-fatal conditions (unfillable slots, partial
///   coercion, level growth)
/// - `on_complete` on success, with [`ReplaceStats`]
/// - `on_failure` on failure
/// - `on_alert` whenever an advisory or failure reaches
///   [`ReplaceOptions::alert_at_or_above`]
///
/// # Examples
///
/// ## Broadcast a scalar
///
/// ```
/// use na_replace::replace::{replace_na, ReplaceOptions, Replacement};
/// use na_replace::types::{DataType, Series, Value};
///
/// # fn main() -> Result<(), na_replace::ReplaceError> {
/// let series = Series::new(
///     "score",
///     DataType::Float64,
///     vec![Value::Float64(1.5), Value::Null, Value::Float64(3.0)],
/// );
///
/// let filled = replace_na(series, Some(Replacement::scalar(0.0)), &ReplaceOptions::default())?;
/// assert_eq!(
///     filled.values(),
///     &[Value::Float64(1.5), Value::Float64(0.0), Value::Float64(3.0)]
/// );
/// # Ok(())
/// # }
/// ```
///
/// ## Derive the fill value from the series
///
/// ```
/// use na_replace::replace::{replace_na, ReplaceOptions, Replacement, ReplacementValues};
/// use na_replace::types::{DataType, Series, Value};
///
/// # fn main() -> Result<(), na_replace::ReplaceError> {
/// let series = Series::new(
///     "score",
///     DataType::Float64,
///     vec![Value::Float64(1.0), Value::Null, Value::Float64(3.0)],
/// );
///
/// // Mean of the observed values.
/// let mean = Replacement::generator(|s: &Series| {
///     let observed: Vec<f64> = s
///         .values()
///         .iter()
///         .filter_map(|v| match v {
///             Value::Float64(x) if !x.is_nan() => Some(*x),
///             _ => None,
///         })
///         .collect();
///     ReplacementValues::One(Value::Float64(
///         observed.iter().sum::<f64>() / observed.len() as f64,
///     ))
/// });
///
/// let filled = replace_na(series, Some(mean), &ReplaceOptions::default())?;
/// assert_eq!(filled.values()[1], Value::Float64(2.0));
/// # Ok(())
/// # }
/// ```
pub fn replace_na(
    series: Series,
    replacement: Option<Replacement>,
    options: &ReplaceOptions,
) -> ReplaceResult<Series> {
    let reporter = Reporter::new(&series, options);
    match replace_na_inner(series, replacement, options, &reporter) {
        Ok((series, stats)) => {
            reporter.complete(&stats);
            Ok(series)
        }
        Err(err) => {
            reporter.failure(&err);
            Err(err)
        }
    }
}

/// Fill the missing slots of `series` with the kind's default replacement.
///
/// Exactly `replace_na(series, None, options)`: text and categorical series
/// use the [`ReplaceOptions::na_level`] sentinel, growing the level set when
/// the sentinel is not yet a level; every other kind fails with
/// [`ReplaceError::MissingReplacement`].
///
/// # Examples
///
/// ```
/// use na_replace::replace::{replace_na_with_default, ReplaceOptions};
/// use na_replace::types::{Series, Value};
///
/// # fn main() -> Result<(), na_replace::ReplaceError> {
/// let series = Series::categorical(
///     "grade",
///     vec![Value::Utf8("b".to_string()), Value::Null],
///     vec!["a".to_string(), "b".to_string()],
/// );
///
/// let filled = replace_na_with_default(series, &ReplaceOptions::default())?;
/// assert_eq!(filled.values()[1], Value::Utf8("(NA)".to_string()));
/// assert_eq!(
///     filled.levels().unwrap(),
///     &["a".to_string(), "b".to_string(), "(NA)".to_string()]
/// );
/// # Ok(())
/// # }
/// ```
pub fn replace_na_with_default(series: Series, options: &ReplaceOptions) -> ReplaceResult<Series> {
    replace_na(series, None, options)
}

fn replace_na_inner(
    series: Series,
    replacement: Option<Replacement>,
    options: &ReplaceOptions,
    reporter: &Reporter<'_>,
) -> ReplaceResult<(Series, ReplaceStats)> {
    ensure_flat(&series)?;

    let replacement = match replacement {
        Some(r) => r,
        None => default_replacement(&series, options)?,
    };

    // Shape errors fire even when nothing is missing.
    if let Replacement::Vector(values) = &replacement {
        resolve::validate_cardinality(series.len(), values.len())?;
    }

    let length = series.len();
    let positions = missing_positions(&series);
    if positions.is_empty() {
        // Nothing to fill; generators are not evaluated and coercion is not
        // attempted.
        let stats = ReplaceStats {
            length,
            missing: 0,
            replaced: 0,
            levels_added: Vec::new(),
        };
        return Ok((series, stats));
    }

    let resolved = resolve::resolve_replacement(&series, replacement, &positions, reporter)?;

    if *series.data_type() == DataType::Categorical {
        let out = categorical::replace_resolved(series, &positions, resolved, reporter);
        let stats = ReplaceStats {
            length,
            missing: positions.len(),
            replaced: out.replaced,
            levels_added: out.levels_added,
        };
        Ok((out.series, stats))
    } else {
        let out = write::write_masked(series, &positions, resolved, reporter);
        let stats = ReplaceStats {
            length,
            missing: positions.len(),
            replaced: out.replaced,
            levels_added: Vec::new(),
        };
        Ok((out.series, stats))
    }
}

/// Nested data is rejected, never flattened.
fn ensure_flat(series: &Series) -> ReplaceResult<()> {
    if *series.data_type() == DataType::List {
        return Err(ReplaceError::UnsupportedStructure {
            message: format!("series '{}' holds nested lists", series.name()),
        });
    }
    if series.values().iter().any(|v| matches!(v, Value::List(_))) {
        return Err(ReplaceError::UnsupportedStructure {
            message: format!("series '{}' contains a nested value", series.name()),
        });
    }
    Ok(())
}

fn default_replacement(series: &Series, options: &ReplaceOptions) -> ReplaceResult<Replacement> {
    match series.data_type() {
        DataType::Utf8 | DataType::Categorical => {
            Ok(Replacement::Scalar(Value::Utf8(options.na_level.clone())))
        }
        other => Err(ReplaceError::MissingReplacement {
            data_type: other.clone(),
        }),
    }
}
