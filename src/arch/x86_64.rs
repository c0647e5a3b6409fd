//! x86_64 SIMD kernels using SSE2.
//!
//! SSE2 is part of the x86_64 baseline, so no runtime detection is needed.
//! Every kernel walks the input in 4-float groups with one accumulator
//! register, reduces lanes in order `0 + 1 + 2 + 3`, then finishes the
//! remainder with a scalar loop.
//!
//! Mismatched slice lengths are never read past: all kernels use the
//! shorter length.

use std::arch::x86_64::{
    __m128, _mm_add_ps, _mm_and_ps, _mm_castsi128_ps, _mm_loadu_ps, _mm_max_ps, _mm_mul_ps,
    _mm_set1_epi32, _mm_setzero_ps, _mm_srli_epi32, _mm_storeu_ps, _mm_sub_ps,
};

use crate::SIMD_LANES;

#[inline]
#[target_feature(enable = "sse2")]
unsafe fn lanes(v: __m128) -> [f32; SIMD_LANES] {
    let mut out = [0.0_f32; SIMD_LANES];
    _mm_storeu_ps(out.as_mut_ptr(), v);
    out
}

#[inline]
#[target_feature(enable = "sse2")]
unsafe fn hsum(v: __m128) -> f32 {
    let l = lanes(v);
    l[0] + l[1] + l[2] + l[3]
}

#[inline]
#[target_feature(enable = "sse2")]
unsafe fn hmax(v: __m128) -> f32 {
    let l = lanes(v);
    l[0].max(l[1].max(l[2].max(l[3])))
}

/// Clears the sign bit of every lane.
#[inline]
#[target_feature(enable = "sse2")]
unsafe fn abs_ps(v: __m128) -> __m128 {
    let mask = _mm_castsi128_ps(_mm_srli_epi32(_mm_set1_epi32(-1), 1));
    _mm_and_ps(mask, v)
}

/// SSE2 squared Euclidean distance.
///
/// # Safety
///
/// Requires SSE2, which every x86_64 CPU provides.
#[target_feature(enable = "sse2")]
pub unsafe fn sq_euclidean_sse2(a: &[f32], b: &[f32]) -> f32 {
    let n = a.len().min(b.len());
    let chunks = n / SIMD_LANES;
    let (a_ptr, b_ptr) = (a.as_ptr(), b.as_ptr());

    let mut acc = _mm_setzero_ps();
    for i in 0..chunks {
        let base = i * SIMD_LANES;
        let diff = _mm_sub_ps(_mm_loadu_ps(a_ptr.add(base)), _mm_loadu_ps(b_ptr.add(base)));
        acc = _mm_add_ps(_mm_mul_ps(diff, diff), acc);
    }

    let mut result = hsum(acc);
    for i in chunks * SIMD_LANES..n {
        let diff = *a.get_unchecked(i) - *b.get_unchecked(i);
        result += diff * diff;
    }
    result
}

/// SSE2 Manhattan (L1) distance.
///
/// # Safety
///
/// Requires SSE2, which every x86_64 CPU provides.
#[target_feature(enable = "sse2")]
pub unsafe fn manhattan_sse2(a: &[f32], b: &[f32]) -> f32 {
    let n = a.len().min(b.len());
    let chunks = n / SIMD_LANES;
    let (a_ptr, b_ptr) = (a.as_ptr(), b.as_ptr());

    let mut acc = _mm_setzero_ps();
    for i in 0..chunks {
        let base = i * SIMD_LANES;
        let diff = _mm_sub_ps(_mm_loadu_ps(a_ptr.add(base)), _mm_loadu_ps(b_ptr.add(base)));
        acc = _mm_add_ps(acc, abs_ps(diff));
    }

    let mut result = hsum(acc);
    for i in chunks * SIMD_LANES..n {
        result += (*a.get_unchecked(i) - *b.get_unchecked(i)).abs();
    }
    result
}

/// SSE2 Chebyshev (L∞) distance.
///
/// # Safety
///
/// Requires SSE2, which every x86_64 CPU provides.
#[target_feature(enable = "sse2")]
pub unsafe fn chebyshev_sse2(a: &[f32], b: &[f32]) -> f32 {
    let n = a.len().min(b.len());
    let chunks = n / SIMD_LANES;
    let (a_ptr, b_ptr) = (a.as_ptr(), b.as_ptr());

    let mut acc = _mm_setzero_ps();
    for i in 0..chunks {
        let base = i * SIMD_LANES;
        let diff = _mm_sub_ps(_mm_loadu_ps(a_ptr.add(base)), _mm_loadu_ps(b_ptr.add(base)));
        acc = _mm_max_ps(acc, abs_ps(diff));
    }

    let mut result = hmax(acc);
    for i in chunks * SIMD_LANES..n {
        result = result.max((*a.get_unchecked(i) - *b.get_unchecked(i)).abs());
    }
    result
}

/// SSE2 single pass computing `(a·b, a·a, b·b)`.
///
/// # Safety
///
/// Requires SSE2, which every x86_64 CPU provides.
#[target_feature(enable = "sse2")]
pub unsafe fn cosine_terms_sse2(a: &[f32], b: &[f32]) -> (f32, f32, f32) {
    let n = a.len().min(b.len());
    let chunks = n / SIMD_LANES;
    let (a_ptr, b_ptr) = (a.as_ptr(), b.as_ptr());

    let mut ab = _mm_setzero_ps();
    let mut aa = _mm_setzero_ps();
    let mut bb = _mm_setzero_ps();
    for i in 0..chunks {
        let base = i * SIMD_LANES;
        let va = _mm_loadu_ps(a_ptr.add(base));
        let vb = _mm_loadu_ps(b_ptr.add(base));
        ab = _mm_add_ps(ab, _mm_mul_ps(va, vb));
        aa = _mm_add_ps(aa, _mm_mul_ps(va, va));
        bb = _mm_add_ps(bb, _mm_mul_ps(vb, vb));
    }

    let (mut dot, mut sq_a, mut sq_b) = (hsum(ab), hsum(aa), hsum(bb));
    for i in chunks * SIMD_LANES..n {
        let x = *a.get_unchecked(i);
        let y = *b.get_unchecked(i);
        dot += x * y;
        sq_a += x * x;
        sq_b += y * y;
    }
    (dot, sq_a, sq_b)
}

/// SSE2 segment projection returning `((b-a)·(p-a), |b-a|²)`.
///
/// # Safety
///
/// Requires SSE2, which every x86_64 CPU provides.
#[target_feature(enable = "sse2")]
pub unsafe fn segment_projection_sse2(la: &[f32], lb: &[f32], p: &[f32]) -> (f32, f32) {
    let n = la.len().min(lb.len()).min(p.len());
    let chunks = n / SIMD_LANES;
    let (la_ptr, lb_ptr, p_ptr) = (la.as_ptr(), lb.as_ptr(), p.as_ptr());

    let mut sca = _mm_setzero_ps();
    let mut sqd = _mm_setzero_ps();
    for i in 0..chunks {
        let base = i * SIMD_LANES;
        let origin = _mm_loadu_ps(la_ptr.add(base));
        let dir = _mm_sub_ps(_mm_loadu_ps(lb_ptr.add(base)), origin);
        sqd = _mm_add_ps(sqd, _mm_mul_ps(dir, dir));
        sca = _mm_add_ps(
            sca,
            _mm_mul_ps(dir, _mm_sub_ps(_mm_loadu_ps(p_ptr.add(base)), origin)),
        );
    }

    let (mut scalar, mut sqdist) = (hsum(sca), hsum(sqd));
    for i in chunks * SIMD_LANES..n {
        let origin = *la.get_unchecked(i);
        let dir = *lb.get_unchecked(i) - origin;
        sqdist += dir * dir;
        scalar += dir * (*p.get_unchecked(i) - origin);
    }
    (scalar, sqdist)
}

/// SSE2 sum of squares `v·v`.
///
/// # Safety
///
/// Requires SSE2, which every x86_64 CPU provides.
#[target_feature(enable = "sse2")]
pub unsafe fn sum_squares_sse2(v: &[f32]) -> f32 {
    let n = v.len();
    let chunks = n / SIMD_LANES;
    let v_ptr = v.as_ptr();

    let mut acc = _mm_setzero_ps();
    for i in 0..chunks {
        let x = _mm_loadu_ps(v_ptr.add(i * SIMD_LANES));
        acc = _mm_add_ps(acc, _mm_mul_ps(x, x));
    }

    let mut result = hsum(acc);
    for i in chunks * SIMD_LANES..n {
        let x = *v.get_unchecked(i);
        result += x * x;
    }
    result
}
