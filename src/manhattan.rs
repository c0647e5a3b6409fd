//! Manhattan (L1) metric.

use crate::kernels;
use crate::kind::MetricKind;
use crate::metric::{Metric, Projection};

/// Manhattan distance `Σ|a[i] - b[i]|`.
///
/// # Projection
///
/// Approximate: the segment is collapsed onto its dominant axis `k`, the
/// first coordinate with the largest `|b[k] - a[k]|`. The result is
/// `scalar = p[k] - a[k]`, `sqdist = b[k] - a[k]` (signed, so the ratio is
/// the position along that axis). When `a == b` the axis is `0` and
/// `sqdist` is `0`.
///
/// ```rust
/// use somdist::{Manhattan, Metric, Projection};
///
/// let proj = Manhattan.project(&[0.0, 0.0], &[1.0, -4.0], &[7.0, -1.0]);
/// assert_eq!(proj, Projection::new(-1.0, -4.0));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Manhattan;

impl Metric for Manhattan {
    const KIND: MetricKind = MetricKind::Manhattan;

    #[inline]
    fn back(&self, x: f32) -> f32 {
        x
    }

    #[inline]
    fn compare_unchecked(&self, a: &[f32], b: &[f32]) -> f32 {
        kernels::manhattan(a, b)
    }

    fn project_unchecked(&self, la: &[f32], lb: &[f32], p: &[f32]) -> Projection {
        let n = la.len().min(lb.len()).min(p.len());
        if n == 0 {
            return Projection::default();
        }

        let mut max = 0.0_f32;
        let mut axis = 0;
        for (i, (a, b)) in la[..n].iter().zip(&lb[..n]).enumerate() {
            let span = (b - a).abs();
            // strict: first axis wins ties
            if span > max {
                max = span;
                axis = i;
            }
        }

        Projection::new(p[axis] - la[axis], lb[axis] - la[axis])
    }
}
