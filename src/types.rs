//! Core data model types for missing-value replacement.
//!
//! This crate operates on an in-memory [`Series`]: a named, fixed-length
//! sequence of typed [`Value`]s sharing one declared [`DataType`].

/// Logical element kind for a [`Series`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataType {
    /// 64-bit signed integer.
    Int64,
    /// 64-bit floating point number.
    Float64,
    /// Boolean.
    Bool,
    /// UTF-8 string.
    Utf8,
    /// Categorical: values drawn from an ordered, growable level set.
    Categorical,
    /// Nested sequences. Present in the data model so that replacement can
    /// reject nested input instead of silently flattening it.
    List,
}

/// A single typed value in a [`Series`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Missing/empty value.
    Null,
    /// 64-bit signed integer.
    Int64(i64),
    /// 64-bit float.
    Float64(f64),
    /// Boolean.
    Bool(bool),
    /// UTF-8 string. Categorical labels use this representation too.
    Utf8(String),
    /// Nested sequence of values.
    List(Vec<Value>),
}

impl Value {
    /// Returns `true` if this value marks "no data".
    ///
    /// [`Value::Null`] is missing for every kind; a NaN float is missing as
    /// well, matching the floating-point convention for absent data.
    pub fn is_missing(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Float64(v) => v.is_nan(),
            _ => false,
        }
    }

    /// Lowercase name of the value's kind, for messages and quick checks.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Int64(_) => "int64",
            Value::Float64(_) => "float64",
            Value::Bool(_) => "bool",
            Value::Utf8(_) => "utf8",
            Value::List(_) => "list",
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int64(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float64(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Utf8(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Utf8(v)
    }
}

/// In-memory typed series.
///
/// A series owns its values. The replacement entry points take it by value,
/// write missing positions in place, and hand it back with the same length
/// and declared kind.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub(crate) name: String,
    pub(crate) data_type: DataType,
    pub(crate) values: Vec<Value>,
    /// Present exactly when `data_type` is [`DataType::Categorical`].
    pub(crate) levels: Option<Vec<String>>,
}

impl Series {
    /// Create a series of a non-categorical kind.
    ///
    /// # Panics
    ///
    /// Panics if `data_type` is [`DataType::Categorical`]; categorical
    /// series carry a level set, use [`Series::categorical`] or
    /// [`Series::categorical_from_values`].
    pub fn new(name: impl Into<String>, data_type: DataType, values: Vec<Value>) -> Self {
        assert!(
            data_type != DataType::Categorical,
            "categorical series carry a level set; use Series::categorical"
        );
        Self {
            name: name.into(),
            data_type,
            values,
            levels: None,
        }
    }

    /// Create a categorical series with an explicit level set.
    ///
    /// Non-missing values that are not labels from `levels` become
    /// [`Value::Null`], the series' own missing convention for data outside
    /// its domain.
    pub fn categorical(name: impl Into<String>, values: Vec<Value>, levels: Vec<String>) -> Self {
        let values = values
            .into_iter()
            .map(|v| match v {
                Value::Utf8(s) if levels.iter().any(|l| l == &s) => Value::Utf8(s),
                _ => Value::Null,
            })
            .collect();

        Self {
            name: name.into(),
            data_type: DataType::Categorical,
            values,
            levels: Some(levels),
        }
    }

    /// Create a categorical series, deriving the level set from the
    /// distinct non-missing labels in first-seen order.
    pub fn categorical_from_values(name: impl Into<String>, values: Vec<Value>) -> Self {
        let mut levels: Vec<String> = Vec::new();
        for v in &values {
            if let Value::Utf8(s) = v {
                if !levels.iter().any(|l| l == s) {
                    levels.push(s.clone());
                }
            }
        }
        Self::categorical(name, values, levels)
    }

    /// Series name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared element kind.
    pub fn data_type(&self) -> &DataType {
        &self.data_type
    }

    /// All values in order.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// The ordered level set; `Some` exactly for categorical series.
    pub fn levels(&self) -> Option<&[String]> {
        self.levels.as_deref()
    }

    /// Value at `index`, if in bounds.
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// Number of values in the series.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the series has no values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Consume the series, returning its values.
    pub fn into_values(self) -> Vec<Value> {
        self.values
    }
}
