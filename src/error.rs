//! Error types for metric preconditions and configuration.

use thiserror::Error;

/// Errors reported by the checked metric API.
///
/// Geometric degeneracies (zero-length segments, zero-norm vectors) are
/// never errors; they map to defined fallback values. Only malformed input is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MetricError {
    /// A point with zero coordinates was supplied.
    #[error("empty input: points must have at least one coordinate")]
    EmptyInput,

    /// Two buffers that must share a dimension do not.
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch {
        /// Dimension of the first buffer.
        expected: usize,
        /// Dimension of the offending buffer.
        found: usize,
    },

    /// A metric name that does not name one of the supported variants.
    #[error("unknown metric: {0:?}")]
    UnknownMetric(String),
}

/// Result alias for this crate.
pub type Result<T> = std::result::Result<T, MetricError>;

/// Validates that every buffer is non-empty and shares the first one's length.
///
/// `op` names the rejected operation in the log record.
#[inline]
pub(crate) fn check_dims(op: &'static str, buffers: &[&[f32]]) -> Result<usize> {
    let dim = buffers.first().map_or(0, |b| b.len());
    if dim == 0 {
        tracing::warn!(op, "rejected call on empty input");
        return Err(MetricError::EmptyInput);
    }
    if let Some(bad) = buffers.iter().find(|b| b.len() != dim) {
        tracing::warn!(
            op,
            expected = dim,
            found = bad.len(),
            "rejected call on dimension mismatch"
        );
        return Err(MetricError::DimensionMismatch {
            expected: dim,
            found: bad.len(),
        });
    }
    Ok(dim)
}
