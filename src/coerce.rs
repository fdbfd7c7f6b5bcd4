//! Exact value coercion into a series' declared kind.
//!
//! Replacement values are coerced before writing so a series never changes
//! kind mid-call. Conversions are value-preserving only:
//! - `Int64 -> Float64` when the integer round-trips through `f64` exactly
//! - `Float64 -> Int64` for finite integral values in `i64` range
//! - `Bool <-> Int64/Float64` as `0`/`1` exactly
//! - any primitive into `Utf8`/`Categorical` via its canonical display string
//!
//! Text never parses back into numeric or boolean kinds, and nested values
//! never coerce at all. Missing input (`Null` or a float `NaN`) coerces to
//! `Null` for every target kind.

use crate::error::{ReplaceError, ReplaceResult};
use crate::types::{DataType, Value};

/// Coerce `value` into `target` without loss, or fail with
/// [`ReplaceError::TypeCoercion`].
pub fn coerce_value(value: &Value, target: &DataType) -> ReplaceResult<Value> {
    if value.is_missing() {
        return Ok(Value::Null);
    }

    match (value, target) {
        (Value::Int64(v), DataType::Int64) => Ok(Value::Int64(*v)),
        (Value::Int64(v), DataType::Float64) => {
            // `as` saturates, so the round-trip test alone would pass for
            // i64::MAX even though f64 cannot hold it exactly.
            if *v != i64::MAX && (*v as f64) as i64 == *v {
                Ok(Value::Float64(*v as f64))
            } else {
                Err(coercion_error(value, target))
            }
        }
        (Value::Int64(v), DataType::Bool) => match v {
            0 => Ok(Value::Bool(false)),
            1 => Ok(Value::Bool(true)),
            _ => Err(coercion_error(value, target)),
        },
        (Value::Int64(v), DataType::Utf8 | DataType::Categorical) => {
            Ok(Value::Utf8(v.to_string()))
        }

        (Value::Float64(v), DataType::Float64) => Ok(Value::Float64(*v)),
        (Value::Float64(v), DataType::Int64) => {
            // i64::MAX as f64 rounds up to 2^63, which is out of range, so
            // the upper bound must stay strict.
            if v.fract() == 0.0 && *v >= i64::MIN as f64 && *v < i64::MAX as f64 {
                Ok(Value::Int64(*v as i64))
            } else {
                Err(coercion_error(value, target))
            }
        }
        (Value::Float64(v), DataType::Bool) => {
            if *v == 0.0 {
                Ok(Value::Bool(false))
            } else if *v == 1.0 {
                Ok(Value::Bool(true))
            } else {
                Err(coercion_error(value, target))
            }
        }
        (Value::Float64(v), DataType::Utf8 | DataType::Categorical) => {
            Ok(Value::Utf8(v.to_string()))
        }

        (Value::Bool(v), DataType::Bool) => Ok(Value::Bool(*v)),
        (Value::Bool(v), DataType::Int64) => Ok(Value::Int64(i64::from(*v))),
        (Value::Bool(v), DataType::Float64) => {
            Ok(Value::Float64(if *v { 1.0 } else { 0.0 }))
        }
        (Value::Bool(v), DataType::Utf8 | DataType::Categorical) => {
            Ok(Value::Utf8(v.to_string()))
        }

        (Value::Utf8(v), DataType::Utf8 | DataType::Categorical) => {
            Ok(Value::Utf8(v.clone()))
        }

        _ => Err(coercion_error(value, target)),
    }
}

fn coercion_error(value: &Value, target: &DataType) -> ReplaceError {
    ReplaceError::TypeCoercion {
        value: format!("{value:?}"),
        target: target.clone(),
    }
}
