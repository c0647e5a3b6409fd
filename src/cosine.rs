//! Cosine metric.

use crate::kernels;
use crate::kind::MetricKind;
use crate::metric::{Metric, Projection};

/// Cosine distance `1 - (a·b) / sqrt(|a|²·|b|²)`, in `[0, 2]`.
///
/// Returns `0` when either vector has zero norm.
///
/// # Projection
///
/// Approximate, tuned for near-neighbor cases: the squared-Euclidean
/// projection is applied to scaled copies of the inputs,
///
/// ```text
/// t      = b * inv_b - a * inv_a
/// sqdist = Σ t²
/// scalar = Σ t * (p * inv_p - a * inv_a)
/// ```
///
/// with `inv_a = 1/|a|`. Both `inv_b` and `inv_p` reuse `inv_a` (not
/// `1/|b|` and `1/|p|`), falling to `0` only when their own vector has zero
/// norm. For data that is not already unit-normalized the endpoints are not
/// unit vectors.
///
/// This is not the variant that scales `b` and `p` by `1 / inv_a`, i.e. by
/// `|a|`, or by `inf` when `|a| = 0` but `|b| > 0`. That variant gives
/// different coefficients, and layouts built with it will not be reproduced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Cosine;

impl Metric for Cosine {
    const KIND: MetricKind = MetricKind::Cosine;

    #[inline]
    fn back(&self, x: f32) -> f32 {
        x
    }

    #[inline]
    fn compare_unchecked(&self, a: &[f32], b: &[f32]) -> f32 {
        let (dot, sq_a, sq_b) = kernels::cosine_terms(a, b);
        let norms = sq_a * sq_b;
        if norms == 0.0 {
            return 0.0;
        }
        // rounding can push identical directions just below zero
        (1.0 - dot / norms.sqrt()).max(0.0)
    }

    // Callers wanting per-vector normalization should normalize their data
    // up front, which makes the two definitions coincide.
    fn project_unchecked(&self, la: &[f32], lb: &[f32], p: &[f32]) -> Projection {
        let norm_a = kernels::sum_squares(la).sqrt();
        let inv_a = if norm_a > 0.0 { 1.0 / norm_a } else { 0.0 };
        let inv_b = if kernels::sum_squares(lb) > 0.0 { inv_a } else { 0.0 };
        let inv_p = if kernels::sum_squares(p) > 0.0 { inv_a } else { 0.0 };

        let (scalar, sqdist) = la.iter().zip(lb).zip(p).fold(
            (0.0_f32, 0.0_f32),
            |(scalar, sqdist), ((&a, &b), &x)| {
                let origin = a * inv_a;
                let dir = b * inv_b - origin;
                (scalar + dir * (x * inv_p - origin), sqdist + dir * dir)
            },
        );
        Projection::new(scalar, sqdist)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compare_orthogonal_and_opposite() {
        assert_eq!(Cosine.compare(&[1.0, 0.0], &[0.0, 1.0]), 1.0);
        assert_eq!(Cosine.compare(&[1.0, 0.0], &[-3.0, 0.0]), 2.0);
    }

    #[test]
    fn test_compare_zero_vector_is_zero() {
        assert_eq!(Cosine.compare(&[0.0, 0.0], &[1.0, 2.0]), 0.0);
        assert_eq!(Cosine.compare(&[1.0, 2.0], &[0.0, 0.0]), 0.0);
    }

    #[test]
    fn test_compare_scale_invariant() {
        let d = Cosine.compare(&[1.0, 0.0], &[5.0, 0.0]);
        assert_eq!(d, 0.0);
    }

    #[test]
    fn test_project_unit_vectors_matches_euclidean() {
        // unit-norm inputs make the shared scale exact
        let a = [1.0_f32, 0.0];
        let b = [0.0_f32, 1.0];
        let p = [0.6_f32, 0.8];
        let proj = Cosine.project(&a, &b, &p);
        assert_eq!(proj.sqdist, 2.0);
        assert!((proj.scalar - 1.2).abs() < 1e-6);
    }

    #[test]
    fn test_project_reuses_a_scale() {
        // |a| = 2, so every vector is scaled by 1/2
        let a = [2.0_f32, 0.0];
        let b = [0.0_f32, 4.0];
        let p = [0.0_f32, 2.0];
        let proj = Cosine.project(&a, &b, &p);
        // t = (-1, 2), p' - a' = (-1, 1)
        assert_eq!(proj, Projection::new(3.0, 5.0));
    }

    #[test]
    fn test_project_differs_from_norm_scaled_variant() {
        let a = [2.0_f32, 0.0];
        let b = [0.0_f32, 4.0];
        let p = [0.0_f32, 2.0];

        // b and p scaled by |a| instead of 1/|a|
        let norm_a = 2.0_f32;
        let origin: Vec<f32> = a.iter().map(|x| x / norm_a).collect();
        let dir: Vec<f32> = b.iter().zip(&origin).map(|(x, o)| x * norm_a - o).collect();
        let scalar: f32 = dir
            .iter()
            .zip(p.iter().zip(&origin))
            .map(|(t, (x, o))| t * (x * norm_a - o))
            .sum();
        let sqdist: f32 = dir.iter().map(|t| t * t).sum();
        assert_eq!(Projection::new(scalar, sqdist), Projection::new(33.0, 65.0));

        let proj = Cosine.project(&a, &b, &p);
        assert_eq!(proj, Projection::new(3.0, 5.0));
        assert_ne!(proj.coefficient(), Projection::new(scalar, sqdist).coefficient());
    }

    #[test]
    fn test_project_zero_a_zeroes_everything() {
        let proj = Cosine.project(&[0.0, 0.0], &[1.0, 1.0], &[2.0, 2.0]);
        assert_eq!(proj, Projection::new(0.0, 0.0));
    }

    #[test]
    fn test_project_zero_point() {
        let a = [1.0_f32, 0.0];
        let b = [0.0_f32, 1.0];
        // p' = 0, so scalar = t·(-a') = (-1, 1)·(-1, 0) = 1
        let proj = Cosine.project(&a, &b, &[0.0, 0.0]);
        assert_eq!(proj, Projection::new(1.0, 2.0));
    }
}
