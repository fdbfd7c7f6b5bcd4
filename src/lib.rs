//! `na-replace` is a small library for filling the missing slots of an
//! in-memory typed [`types::Series`] with explicit, validated replacement
//! values.
//!
//! The primary entrypoint is [`replace::replace_na`], which takes the series
//! by value, writes replacements only where a slot is missing, and returns
//! the series with its name, length, and kind intact.
//!
//! ## What counts as missing
//!
//! - [`types::Value::Null`] in any series
//! - a float `NaN` in a [`types::DataType::Float64`] series
//!
//! Both are treated identically everywhere (see [`missing`]).
//!
//! ## Replacement sources
//!
//! A [`replace::Replacement`] names where fill values come from:
//!
//! - **Scalar**: one value broadcast to every missing slot
//! - **Vector**: one value per slot, applied positionally; the length must be
//!   the series length or exactly 1. Anything else is a
//!   [`ReplaceError::Cardinality`] error, never recycled.
//! - **Generator**: a callback receiving the original series, evaluated at
//!   most once and only when something is actually missing
//!
//! Passing no replacement fills text and categorical series with the
//! [`replace::ReplaceOptions::na_level`] sentinel (default `"(NA)"`); other
//! kinds fail with [`ReplaceError::MissingReplacement`].
//!
//! Replacement values are coerced into the series kind exactly (see
//! [`coerce::coerce_value`]): a series never changes kind mid-call, and a
//! lossy conversion is an error rather than a silent truncation.
//!
//! ## Quick examples
//!
//! ```rust
//! use na_replace::replace::{replace_na, ReplaceOptions, Replacement};
//! use na_replace::types::{DataType, Series, Value};
//!
//! # fn main() -> Result<(), na_replace::ReplaceError> {
//! let series = Series::new(
//!     "visits",
//!     DataType::Int64,
//!     vec![Value::Int64(4), Value::Null, Value::Int64(2), Value::Null],
//! );
//!
//! let filled = replace_na(series, Some(Replacement::scalar(0i64)), &ReplaceOptions::default())?;
//! assert_eq!(
//!     filled.values(),
//!     &[Value::Int64(4), Value::Int64(0), Value::Int64(2), Value::Int64(0)]
//! );
//! # Ok(())
//! # }
//! ```
//!
//! Categorical series admit labels outside their current level set by
//! growing it, append-only:
//!
//! ```rust
//! use na_replace::replace::{replace_na, ReplaceOptions, Replacement};
//! use na_replace::types::{Series, Value};
//!
//! # fn main() -> Result<(), na_replace::ReplaceError> {
//! let series = Series::categorical(
//!     "grade",
//!     vec![Value::Utf8("b".to_string()), Value::Null],
//!     vec!["a".to_string(), "b".to_string()],
//! );
//!
//! let filled = replace_na(series, Some(Replacement::scalar("unknown")), &ReplaceOptions::default())?;
//! assert_eq!(filled.values()[1], Value::Utf8("unknown".to_string()));
//! assert_eq!(
//!     filled.levels().unwrap(),
//!     &["a".to_string(), "b".to_string(), "unknown".to_string()]
//! );
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`replace`]: replacement entrypoints, options, and observability
//! - [`types`]: series and value types
//! - [`missing`]: missingness predicates
//! - [`coerce`]: exact value coercion between kinds
//! - [`error`]: error types used across replacement
//!
//! ## Observability
//!
//! Non-fatal conditions (a replacement value that is itself missing, partial
//! coercion, level growth) never abort a call; they are delivered as
//! [`replace::Advisory`] values to an optional [`replace::ReplaceObserver`],
//! with an alert threshold for severities the caller cares about. See
//! [`replace::StdErrObserver`] and [`replace::FileObserver`] for ready-made
//! implementations.

pub mod coerce;
pub mod error;
pub mod missing;
pub mod replace;
pub mod types;

pub use error::{ReplaceError, ReplaceResult};
