//! The metric capability contract and the projection result.
//!
//! A metric is a zero-sized strategy type. Callers pick one per embedding
//! run and stay generic over it, so every call is statically dispatched and
//! the inner loops inline into the caller.

use std::fmt;

use crate::error::{check_dims, Result};
use crate::kind::MetricKind;

/// Where a point falls relative to a landmark segment `a → b`.
///
/// The embedding caller interpolates `pos_a + (scalar / sqdist) * (pos_b - pos_a)`.
/// What `scalar` and `sqdist` mean exactly depends on the metric that
/// produced them; only their ratio is comparable across metrics.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Projection {
    /// Unnormalized position of the point along the segment.
    pub scalar: f32,
    /// Normalizer for `scalar` (the squared segment length for Euclidean).
    pub sqdist: f32,
}

impl Projection {
    /// Creates a projection from its two components.
    #[inline]
    #[must_use]
    pub const fn new(scalar: f32, sqdist: f32) -> Self {
        Self { scalar, sqdist }
    }

    /// The interpolation coefficient `scalar / sqdist`.
    ///
    /// `None` when the segment is degenerate (`sqdist == 0`).
    #[inline]
    #[must_use]
    pub fn coefficient(&self) -> Option<f32> {
        if self.sqdist == 0.0 {
            None
        } else {
            Some(self.scalar / self.sqdist)
        }
    }

    /// Writes `pos_a + coefficient * (pos_b - pos_a)` into `out`.
    ///
    /// A degenerate projection places the point at `pos_a`. The three
    /// buffers are embedding-space positions and must share a dimension.
    ///
    /// # Example
    ///
    /// ```rust
    /// use somdist::{Metric, SquaredEuclidean};
    ///
    /// let proj = SquaredEuclidean.project(&[0.0, 0.0], &[2.0, 0.0], &[1.0, 5.0]);
    /// let mut pos = [0.0_f32; 2];
    /// proj.interpolate(&[10.0, 10.0], &[20.0, 30.0], &mut pos).unwrap();
    /// assert_eq!(pos, [15.0, 20.0]);
    /// ```
    pub fn interpolate(&self, pos_a: &[f32], pos_b: &[f32], out: &mut [f32]) -> Result<()> {
        check_dims("interpolate", &[pos_a, pos_b, &*out])?;
        let c = self.coefficient().unwrap_or(0.0);
        for ((o, &x), &y) in out.iter_mut().zip(pos_a).zip(pos_b) {
            *o = x + c * (y - x);
        }
        Ok(())
    }
}

/// A distance metric usable by the landmark embedding.
///
/// Implementors provide the raw kernels; the checked entry points are
/// provided and validate that every buffer is non-empty and of equal
/// length before calling them.
pub trait Metric: Copy + Default + Send + Sync + fmt::Debug + 'static {
    /// Tag naming this metric.
    const KIND: MetricKind;

    /// Maps the internal distance representation to the natural distance.
    fn back(&self, x: f32) -> f32;

    /// Distance between `a` and `b` without length validation.
    ///
    /// Mismatched lengths are memory safe but the result is meaningless.
    fn compare_unchecked(&self, a: &[f32], b: &[f32]) -> f32;

    /// Projection of `p` onto the segment `la → lb` without length validation.
    fn project_unchecked(&self, la: &[f32], lb: &[f32], p: &[f32]) -> Projection;

    /// Distance between `a` and `b`, or an error for empty or mismatched input.
    #[inline]
    fn try_compare(&self, a: &[f32], b: &[f32]) -> Result<f32> {
        check_dims("compare", &[a, b])?;
        Ok(self.compare_unchecked(a, b))
    }

    /// Distance between `a` and `b`.
    ///
    /// # Panics
    ///
    /// Panics if either point is empty or their dimensions differ.
    #[inline]
    fn compare(&self, a: &[f32], b: &[f32]) -> f32 {
        match self.try_compare(a, b) {
            Ok(d) => d,
            Err(e) => panic!("{}::compare: {e}", Self::KIND),
        }
    }

    /// Projection of `p` onto `la → lb`, or an error for empty or mismatched input.
    #[inline]
    fn try_project(&self, la: &[f32], lb: &[f32], p: &[f32]) -> Result<Projection> {
        check_dims("project", &[la, lb, p])?;
        Ok(self.project_unchecked(la, lb, p))
    }

    /// Projection of `p` onto the segment `la → lb`.
    ///
    /// # Panics
    ///
    /// Panics if any buffer is empty or their dimensions differ.
    #[inline]
    fn project(&self, la: &[f32], lb: &[f32], p: &[f32]) -> Projection {
        match self.try_project(la, lb, p) {
            Ok(proj) => proj,
            Err(e) => panic!("{}::project: {e}", Self::KIND),
        }
    }
}

/// Visitor receiving the concrete metric selected by a [`MetricKind`].
///
/// Lets a caller write its embedding loop once, generic over `M: Metric`,
/// and still pick the metric from configuration at runtime.
pub trait MetricVisitor {
    /// Value produced by the visit.
    type Output;

    /// Runs with the selected metric.
    fn visit<M: Metric>(self, metric: M) -> Self::Output;
}
