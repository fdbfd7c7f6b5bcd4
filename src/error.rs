use thiserror::Error;

use crate::types::DataType;

/// Convenience result type for replacement operations.
pub type ReplaceResult<T> = Result<T, ReplaceError>;

/// Error type returned by the replacement entry points.
///
/// Every variant is fatal and aborts the call before any value is written.
/// Non-fatal conditions are delivered as advisories through the configured
/// observer instead (see [`crate::replace::Advisory`]).
#[derive(Debug, Error)]
pub enum ReplaceError {
    /// The input is not a flat homogeneous series (nested element kind, or
    /// a nested value inside the series). Nested data is rejected, never
    /// flattened.
    #[error("unsupported structure: {message}")]
    UnsupportedStructure { message: String },

    /// Replacement length is neither 1 nor the series length. Recycling a
    /// shorter replacement to fit is never attempted.
    #[error("replacement length {actual} matches neither the series length {expected} nor 1")]
    Cardinality { expected: usize, actual: usize },

    /// A replacement value cannot be represented in the series' declared
    /// kind without loss.
    #[error("cannot coerce {value} into {target:?}")]
    TypeCoercion { value: String, target: DataType },

    /// No replacement value was given and the series kind has no safe
    /// default to fall back on.
    #[error("no replacement given and no default exists for {data_type:?} series")]
    MissingReplacement { data_type: DataType },
}
