//! Squared Euclidean metric.

use crate::kernels;
use crate::kind::MetricKind;
use crate::metric::{Metric, Projection};

/// Squared Euclidean distance `Σ(a[i] - b[i])²`.
///
/// Distances stay squared internally; [`Metric::back`] takes the square
/// root. Projection is the exact orthogonal projection scaled by the squared
/// segment length.
///
/// # Example
///
/// ```rust
/// use somdist::{Metric, SquaredEuclidean};
///
/// let d = SquaredEuclidean.compare(&[0.0, 0.0], &[3.0, 4.0]);
/// assert_eq!(d, 25.0);
/// assert_eq!(SquaredEuclidean.back(d), 5.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SquaredEuclidean;

impl Metric for SquaredEuclidean {
    const KIND: MetricKind = MetricKind::SquaredEuclidean;

    #[inline]
    fn back(&self, x: f32) -> f32 {
        x.sqrt()
    }

    #[inline]
    fn compare_unchecked(&self, a: &[f32], b: &[f32]) -> f32 {
        kernels::sq_euclidean(a, b)
    }

    /// `scalar = (b-a)·(p-a)`, `sqdist = |b-a|²`.
    #[inline]
    fn project_unchecked(&self, la: &[f32], lb: &[f32], p: &[f32]) -> Projection {
        let (scalar, sqdist) = kernels::segment_projection(la, lb, p);
        Projection::new(scalar, sqdist)
    }
}
