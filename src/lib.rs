//! Distance and landmark-projection metrics for SOM-style embedding.
//!
//! `somdist` is the numeric core of a landmark-based embedding: for a
//! high-dimensional point it answers how far it is from another point, and
//! where it falls relative to the segment between two landmarks, so the
//! caller can interpolate its position in the low-dimensional embedding.
//!
//! | Metric | `compare` | `back` | `project` |
//! |--------|-----------|--------|-----------|
//! | [`SquaredEuclidean`] | `Σ(a-b)²` | `sqrt` | exact, O(dim) |
//! | [`Manhattan`] | `Σ\|a-b\|` | identity | dominant axis, O(dim) |
//! | [`Chebyshev`] | `max\|a-b\|` | identity | best axis pair, O(dim²) |
//! | [`Cosine`] | `1 - cos(a, b)` | identity | normalized-space approx, O(dim) |
//!
//! # Selecting a metric
//!
//! Metrics are zero-sized types implementing [`Metric`]. Pick one per run
//! and stay generic over it, or parse a [`MetricKind`] from configuration and
//! [`MetricKind::dispatch`] into generic code.
//!
//! # SIMD
//!
//! With the `simd` feature (default) the O(dim) inner loops run 4 lanes at a
//! time: SSE2 on x86_64, NEON on aarch64. Other targets, and builds without
//! the feature, use the portable loops in [`kernels`]. Both paths agree up to
//! summation-order rounding.
//!
//! # Preconditions
//!
//! All buffers passed to one call must have the same, non-zero length.
//! [`Metric::compare`] and [`Metric::project`] panic otherwise;
//! [`Metric::try_compare`] and [`Metric::try_project`] return a
//! [`MetricError`]. Degenerate geometry (zero-length segments, zero-norm
//! vectors) is never an error.
//!
//! # Example
//!
//! ```rust
//! use somdist::{Metric, SquaredEuclidean};
//!
//! let a = [0.0_f32, 0.0];
//! let b = [3.0_f32, 4.0];
//! assert_eq!(SquaredEuclidean.back(SquaredEuclidean.compare(&a, &b)), 5.0);
//!
//! // point (1, 5) projects onto the middle of segment (0,0) -> (2,0)
//! let proj = SquaredEuclidean.project(&[0.0, 0.0], &[2.0, 0.0], &[1.0, 5.0]);
//! assert_eq!((proj.scalar, proj.sqdist), (2.0, 4.0));
//! assert_eq!(proj.coefficient(), Some(0.5));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

#[cfg(feature = "simd")]
mod arch;
mod chebyshev;
mod cosine;
mod error;
mod euclidean;
pub mod kernels;
mod kind;
mod manhattan;
mod metric;

pub use chebyshev::Chebyshev;
pub use cosine::Cosine;
pub use error::{MetricError, Result};
pub use euclidean::SquaredEuclidean;
pub use kind::MetricKind;
pub use manhattan::Manhattan;
pub use metric::{Metric, MetricVisitor, Projection};

/// Width of the SIMD groups the vectorized kernels process.
pub const SIMD_LANES: usize = 4;

#[cfg(test)]
mod tests {
    use super::*;

    fn all_compare(a: &[f32], b: &[f32]) -> [f32; 4] {
        [
            SquaredEuclidean.compare(a, b),
            Manhattan.compare(a, b),
            Chebyshev.compare(a, b),
            Cosine.compare(a, b),
        ]
    }

    #[test]
    fn test_hand_computed_distances() {
        let d = all_compare(&[0.0, 0.0], &[3.0, 4.0]);
        assert_eq!(d[0], 25.0);
        assert_eq!(d[1], 7.0);
        assert_eq!(d[2], 4.0);
        // zero-norm origin
        assert_eq!(d[3], 0.0);
    }

    #[test]
    fn test_self_distance_is_zero() {
        let a = [1.5_f32, -2.0, 3.25, 0.0, 7.0];
        assert_eq!(all_compare(&a, &a)[..3], [0.0, 0.0, 0.0]);
        assert!(Cosine.compare(&a, &a) < 1e-6);
    }

    #[test]
    #[should_panic(expected = "dimension mismatch")]
    fn test_compare_panics_on_mismatch() {
        let _ = SquaredEuclidean.compare(&[1.0, 2.0], &[1.0]);
    }

    #[test]
    #[should_panic(expected = "empty input")]
    fn test_project_panics_on_empty() {
        let _ = Chebyshev.project(&[], &[], &[]);
    }

    #[test]
    fn test_try_project_reports_mismatch() {
        let err = Manhattan
            .try_project(&[1.0, 2.0], &[1.0, 2.0], &[1.0, 2.0, 3.0])
            .unwrap_err();
        assert_eq!(
            err,
            MetricError::DimensionMismatch {
                expected: 2,
                found: 3
            }
        );
    }
}
