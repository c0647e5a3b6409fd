//! aarch64 SIMD kernels using NEON.
//!
//! NEON is always available on aarch64, so no runtime detection needed.
//! We still annotate with `target_feature` for consistency with x86_64.

use std::arch::aarch64::{
    float32x4_t, vabdq_f32, vaddq_f32, vaddvq_f32, vdupq_n_f32, vfmaq_f32, vld1q_f32,
    vmaxq_f32, vmaxvq_f32, vsubq_f32,
};

use crate::SIMD_LANES;

/// NEON squared Euclidean distance.
///
/// # Safety
///
/// NEON is always available on aarch64.
#[target_feature(enable = "neon")]
pub unsafe fn sq_euclidean_neon(a: &[f32], b: &[f32]) -> f32 {
    let n = a.len().min(b.len());
    let chunks = n / SIMD_LANES;
    let (a_ptr, b_ptr) = (a.as_ptr(), b.as_ptr());

    let mut acc: float32x4_t = vdupq_n_f32(0.0);
    for i in 0..chunks {
        let base = i * SIMD_LANES;
        let diff = vsubq_f32(vld1q_f32(a_ptr.add(base)), vld1q_f32(b_ptr.add(base)));
        acc = vfmaq_f32(acc, diff, diff);
    }

    let mut result = vaddvq_f32(acc);
    for i in chunks * SIMD_LANES..n {
        let diff = *a.get_unchecked(i) - *b.get_unchecked(i);
        result += diff * diff;
    }
    result
}

/// NEON Manhattan (L1) distance.
///
/// # Safety
///
/// NEON is always available on aarch64.
#[target_feature(enable = "neon")]
pub unsafe fn manhattan_neon(a: &[f32], b: &[f32]) -> f32 {
    let n = a.len().min(b.len());
    let chunks = n / SIMD_LANES;
    let (a_ptr, b_ptr) = (a.as_ptr(), b.as_ptr());

    let mut acc: float32x4_t = vdupq_n_f32(0.0);
    for i in 0..chunks {
        let base = i * SIMD_LANES;
        acc = vaddq_f32(acc, vabdq_f32(vld1q_f32(a_ptr.add(base)), vld1q_f32(b_ptr.add(base))));
    }

    let mut result = vaddvq_f32(acc);
    for i in chunks * SIMD_LANES..n {
        result += (*a.get_unchecked(i) - *b.get_unchecked(i)).abs();
    }
    result
}

/// NEON Chebyshev (L∞) distance.
///
/// # Safety
///
/// NEON is always available on aarch64.
#[target_feature(enable = "neon")]
pub unsafe fn chebyshev_neon(a: &[f32], b: &[f32]) -> f32 {
    let n = a.len().min(b.len());
    let chunks = n / SIMD_LANES;
    let (a_ptr, b_ptr) = (a.as_ptr(), b.as_ptr());

    let mut acc: float32x4_t = vdupq_n_f32(0.0);
    for i in 0..chunks {
        let base = i * SIMD_LANES;
        acc = vmaxq_f32(acc, vabdq_f32(vld1q_f32(a_ptr.add(base)), vld1q_f32(b_ptr.add(base))));
    }

    let mut result = vmaxvq_f32(acc);
    for i in chunks * SIMD_LANES..n {
        result = result.max((*a.get_unchecked(i) - *b.get_unchecked(i)).abs());
    }
    result
}

/// NEON single pass computing `(a·b, a·a, b·b)`.
///
/// # Safety
///
/// NEON is always available on aarch64.
#[target_feature(enable = "neon")]
pub unsafe fn cosine_terms_neon(a: &[f32], b: &[f32]) -> (f32, f32, f32) {
    let n = a.len().min(b.len());
    let chunks = n / SIMD_LANES;
    let (a_ptr, b_ptr) = (a.as_ptr(), b.as_ptr());

    let mut ab: float32x4_t = vdupq_n_f32(0.0);
    let mut aa: float32x4_t = vdupq_n_f32(0.0);
    let mut bb: float32x4_t = vdupq_n_f32(0.0);
    for i in 0..chunks {
        let base = i * SIMD_LANES;
        let va = vld1q_f32(a_ptr.add(base));
        let vb = vld1q_f32(b_ptr.add(base));
        ab = vfmaq_f32(ab, va, vb);
        aa = vfmaq_f32(aa, va, va);
        bb = vfmaq_f32(bb, vb, vb);
    }

    let (mut dot, mut sq_a, mut sq_b) = (vaddvq_f32(ab), vaddvq_f32(aa), vaddvq_f32(bb));
    for i in chunks * SIMD_LANES..n {
        let x = *a.get_unchecked(i);
        let y = *b.get_unchecked(i);
        dot += x * y;
        sq_a += x * x;
        sq_b += y * y;
    }
    (dot, sq_a, sq_b)
}

/// NEON segment projection returning `((b-a)·(p-a), |b-a|²)`.
///
/// # Safety
///
/// NEON is always available on aarch64.
#[target_feature(enable = "neon")]
pub unsafe fn segment_projection_neon(la: &[f32], lb: &[f32], p: &[f32]) -> (f32, f32) {
    let n = la.len().min(lb.len()).min(p.len());
    let chunks = n / SIMD_LANES;
    let (la_ptr, lb_ptr, p_ptr) = (la.as_ptr(), lb.as_ptr(), p.as_ptr());

    let mut sca: float32x4_t = vdupq_n_f32(0.0);
    let mut sqd: float32x4_t = vdupq_n_f32(0.0);
    for i in 0..chunks {
        let base = i * SIMD_LANES;
        let origin = vld1q_f32(la_ptr.add(base));
        let dir = vsubq_f32(vld1q_f32(lb_ptr.add(base)), origin);
        sqd = vfmaq_f32(sqd, dir, dir);
        sca = vfmaq_f32(sca, dir, vsubq_f32(vld1q_f32(p_ptr.add(base)), origin));
    }

    let (mut scalar, mut sqdist) = (vaddvq_f32(sca), vaddvq_f32(sqd));
    for i in chunks * SIMD_LANES..n {
        let origin = *la.get_unchecked(i);
        let dir = *lb.get_unchecked(i) - origin;
        sqdist += dir * dir;
        scalar += dir * (*p.get_unchecked(i) - origin);
    }
    (scalar, sqdist)
}

/// NEON sum of squares `v·v`.
///
/// # Safety
///
/// NEON is always available on aarch64.
#[target_feature(enable = "neon")]
pub unsafe fn sum_squares_neon(v: &[f32]) -> f32 {
    let n = v.len();
    let chunks = n / SIMD_LANES;
    let v_ptr = v.as_ptr();

    let mut acc: float32x4_t = vdupq_n_f32(0.0);
    for i in 0..chunks {
        let x = vld1q_f32(v_ptr.add(i * SIMD_LANES));
        acc = vfmaq_f32(acc, x, x);
    }

    let mut result = vaddvq_f32(acc);
    for i in chunks * SIMD_LANES..n {
        let x = *v.get_unchecked(i);
        result += x * x;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(size: usize, scale: f32, shift: f32) -> Vec<f32> {
        (0..size).map(|i| ((i as f32) * scale + shift).sin() * 3.0).collect()
    }

    fn close(actual: f32, expected: f32) -> bool {
        (actual - expected).abs() <= 1e-4 * expected.abs().max(1.0)
    }

    #[test]
    fn test_neon_kernels_match_scalar_loops() {
        for size in [1, 3, 4, 5, 7, 8, 9, 15, 16, 17, 33, 128] {
            let a = sample(size, 0.7, 0.1);
            let b = sample(size, 1.3, -0.4);
            let p = sample(size, 0.2, 2.0);

            let sq: f32 = a.iter().zip(&b).map(|(x, y)| (x - y) * (x - y)).sum();
            let l1: f32 = a.iter().zip(&b).map(|(x, y)| (x - y).abs()).sum();
            let linf = a.iter().zip(&b).fold(0.0_f32, |m, (x, y)| m.max((x - y).abs()));
            let dot: f32 = a.iter().zip(&b).map(|(x, y)| x * y).sum();
            let aa: f32 = a.iter().map(|x| x * x).sum();
            let sqdist: f32 = a.iter().zip(&b).map(|(x, y)| (y - x) * (y - x)).sum();
            let scalar: f32 = (0..size).map(|i| (b[i] - a[i]) * (p[i] - a[i])).sum();

            unsafe {
                assert!(close(sq_euclidean_neon(&a, &b), sq), "sqeuclidean size={size}");
                assert!(close(manhattan_neon(&a, &b), l1), "manhattan size={size}");
                assert_eq!(chebyshev_neon(&a, &b), linf, "chebyshev size={size}");

                let (d, sa, _) = cosine_terms_neon(&a, &b);
                assert!(close(d, dot), "cosine dot size={size}");
                assert!(close(sa, aa), "cosine norm size={size}");
                assert!(close(sum_squares_neon(&a), aa), "sum_squares size={size}");

                let (s, q) = segment_projection_neon(&a, &b, &p);
                assert!(close(s, scalar), "projection scalar size={size}");
                assert!(close(q, sqdist), "projection sqdist size={size}");
            }
        }
    }
}
