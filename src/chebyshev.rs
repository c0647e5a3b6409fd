//! Chebyshev (L∞) metric.
//!
//! # Projection
//!
//! Under L∞ the direction that matters for a point is not fixed; it depends
//! on which pair of axes dominates locally. The projection therefore scans
//! every unordered axis pair `(i, j)`, `i < j`, and solves a 2D
//! sub-projection in each:
//!
//! ```text
//! a1 = a[i] - p[i]    d1 = b[i] - a[i]    (both negated if d1 < 0)
//! a2 = a[j] - p[j]    d2 = b[j] - a[j]    (both negated if d2 < 0)
//!
//! scalar = -(a1 + a2)
//! sqdist = d1 + d2                        (pair skipped if 0)
//! dev    = |a1 + scalar * d1 / sqdist|
//! ```
//!
//! The pair with the largest deviation wins; on ties the first pair in scan
//! order is kept. If no pair deviates (including `dim == 1`) the result is
//! `scalar = 0`, `sqdist = 1`.
//!
//! This is O(dim²) per call and has no SIMD path. Budget for it in
//! high-dimensional runs.

use crate::kernels;
use crate::kind::MetricKind;
use crate::metric::{Metric, Projection};

/// Chebyshev distance `max|a[i] - b[i]|`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Chebyshev;

/// Sign-normalizes an axis so its segment delta is non-negative.
#[inline(always)]
fn oriented(offset: f32, delta: f32) -> (f32, f32) {
    if delta < 0.0 {
        (-offset, -delta)
    } else {
        (offset, delta)
    }
}

impl Metric for Chebyshev {
    const KIND: MetricKind = MetricKind::Chebyshev;

    #[inline]
    fn back(&self, x: f32) -> f32 {
        x
    }

    #[inline]
    fn compare_unchecked(&self, a: &[f32], b: &[f32]) -> f32 {
        kernels::chebyshev(a, b)
    }

    fn project_unchecked(&self, la: &[f32], lb: &[f32], p: &[f32]) -> Projection {
        let n = la.len().min(lb.len()).min(p.len());
        let (la, lb, p) = (&la[..n], &lb[..n], &p[..n]);

        let mut best = Projection::new(0.0, 1.0);
        let mut best_dev = 0.0_f32;

        for i in 0..n {
            let (a1, d1) = oriented(la[i] - p[i], lb[i] - la[i]);
            for j in i + 1..n {
                let (a2, d2) = oriented(la[j] - p[j], lb[j] - la[j]);
                let sqdist = d1 + d2;
                if sqdist == 0.0 {
                    continue;
                }
                let scalar = -(a1 + a2);
                let dev = (a1 + scalar * d1 / sqdist).abs();
                if dev > best_dev {
                    best_dev = dev;
                    best = Projection::new(scalar, sqdist);
                }
            }
        }

        best
    }
}
