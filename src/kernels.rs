//! Inner loops shared by the metrics.
//!
//! Each kernel has a `*_portable` scalar version, which is the reference
//! for correctness, and a dispatching version that uses the 4-lane SIMD
//! path when the `simd` feature is enabled on x86_64 (SSE2) or aarch64
//! (NEON). Both agree up to floating-point summation order.
//!
//! | Kernel | Portable | SIMD |
//! |--------|----------|------|
//! | [`sq_euclidean`] | yes | yes |
//! | [`manhattan`] | yes | yes |
//! | [`chebyshev`] | yes | yes |
//! | [`cosine_terms`] | yes | yes |
//! | [`segment_projection`] | yes | yes |
//! | [`sum_squares`] | yes | yes |
//!
//! Kernels never check lengths; mismatched slices use the shorter length.

#[cfg(all(feature = "simd", any(target_arch = "x86_64", target_arch = "aarch64")))]
use crate::arch;

/// Name of the instruction set the dispatching kernels use.
#[must_use]
pub const fn backend() -> &'static str {
    if cfg!(all(feature = "simd", target_arch = "x86_64")) {
        "sse2"
    } else if cfg!(all(feature = "simd", target_arch = "aarch64")) {
        "neon"
    } else {
        "portable"
    }
}

/// Squared Euclidean distance `Σ(a[i] - b[i])²`.
#[inline]
#[must_use]
pub fn sq_euclidean(a: &[f32], b: &[f32]) -> f32 {
    #[cfg(all(feature = "simd", target_arch = "x86_64"))]
    {
        // SAFETY: SSE2 is part of the x86_64 baseline.
        return unsafe { arch::x86_64::sq_euclidean_sse2(a, b) };
    }

    #[cfg(all(feature = "simd", target_arch = "aarch64"))]
    {
        // SAFETY: NEON is always available on aarch64.
        return unsafe { arch::aarch64::sq_euclidean_neon(a, b) };
    }

    #[allow(unreachable_code)]
    sq_euclidean_portable(a, b)
}

/// Portable squared Euclidean distance.
#[inline]
#[must_use]
pub fn sq_euclidean_portable(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let diff = x - y;
            diff * diff
        })
        .sum()
}

/// Manhattan distance `Σ|a[i] - b[i]|`.
#[inline]
#[must_use]
pub fn manhattan(a: &[f32], b: &[f32]) -> f32 {
    #[cfg(all(feature = "simd", target_arch = "x86_64"))]
    {
        // SAFETY: SSE2 is part of the x86_64 baseline.
        return unsafe { arch::x86_64::manhattan_sse2(a, b) };
    }

    #[cfg(all(feature = "simd", target_arch = "aarch64"))]
    {
        // SAFETY: NEON is always available on aarch64.
        return unsafe { arch::aarch64::manhattan_neon(a, b) };
    }

    #[allow(unreachable_code)]
    manhattan_portable(a, b)
}

/// Portable Manhattan distance.
#[inline]
#[must_use]
pub fn manhattan_portable(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| (x - y).abs()).sum()
}

/// Chebyshev distance `max|a[i] - b[i]|`, `0` for empty input.
#[inline]
#[must_use]
pub fn chebyshev(a: &[f32], b: &[f32]) -> f32 {
    #[cfg(all(feature = "simd", target_arch = "x86_64"))]
    {
        // SAFETY: SSE2 is part of the x86_64 baseline.
        return unsafe { arch::x86_64::chebyshev_sse2(a, b) };
    }

    #[cfg(all(feature = "simd", target_arch = "aarch64"))]
    {
        // SAFETY: NEON is always available on aarch64.
        return unsafe { arch::aarch64::chebyshev_neon(a, b) };
    }

    #[allow(unreachable_code)]
    chebyshev_portable(a, b)
}

/// Portable Chebyshev distance.
#[inline]
#[must_use]
pub fn chebyshev_portable(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b.iter())
        .fold(0.0_f32, |acc, (x, y)| acc.max((x - y).abs()))
}

/// One pass computing `(a·b, a·a, b·b)`.
#[inline]
#[must_use]
pub fn cosine_terms(a: &[f32], b: &[f32]) -> (f32, f32, f32) {
    #[cfg(all(feature = "simd", target_arch = "x86_64"))]
    {
        // SAFETY: SSE2 is part of the x86_64 baseline.
        return unsafe { arch::x86_64::cosine_terms_sse2(a, b) };
    }

    #[cfg(all(feature = "simd", target_arch = "aarch64"))]
    {
        // SAFETY: NEON is always available on aarch64.
        return unsafe { arch::aarch64::cosine_terms_neon(a, b) };
    }

    #[allow(unreachable_code)]
    cosine_terms_portable(a, b)
}

/// Portable `(a·b, a·a, b·b)`.
#[inline]
#[must_use]
pub fn cosine_terms_portable(a: &[f32], b: &[f32]) -> (f32, f32, f32) {
    a.iter()
        .zip(b.iter())
        .fold((0.0_f32, 0.0_f32, 0.0_f32), |(ab, aa, bb), (&x, &y)| {
            (ab + x * y, aa + x * x, bb + y * y)
        })
}

/// Projection of `p` onto the segment `la → lb`.
///
/// Returns `(scalar, sqdist)` with `scalar = (lb-la)·(p-la)` and
/// `sqdist = |lb-la|²`.
#[inline]
#[must_use]
pub fn segment_projection(la: &[f32], lb: &[f32], p: &[f32]) -> (f32, f32) {
    #[cfg(all(feature = "simd", target_arch = "x86_64"))]
    {
        // SAFETY: SSE2 is part of the x86_64 baseline.
        return unsafe { arch::x86_64::segment_projection_sse2(la, lb, p) };
    }

    #[cfg(all(feature = "simd", target_arch = "aarch64"))]
    {
        // SAFETY: NEON is always available on aarch64.
        return unsafe { arch::aarch64::segment_projection_neon(la, lb, p) };
    }

    #[allow(unreachable_code)]
    segment_projection_portable(la, lb, p)
}

/// Portable segment projection.
#[inline]
#[must_use]
pub fn segment_projection_portable(la: &[f32], lb: &[f32], p: &[f32]) -> (f32, f32) {
    la.iter()
        .zip(lb.iter())
        .zip(p.iter())
        .fold((0.0_f32, 0.0_f32), |(scalar, sqdist), ((&a, &b), &x)| {
            let dir = b - a;
            (scalar + dir * (x - a), sqdist + dir * dir)
        })
}

/// Sum of squares `v·v`.
#[inline]
#[must_use]
pub fn sum_squares(v: &[f32]) -> f32 {
    #[cfg(all(feature = "simd", target_arch = "x86_64"))]
    {
        // SAFETY: SSE2 is part of the x86_64 baseline.
        return unsafe { arch::x86_64::sum_squares_sse2(v) };
    }

    #[cfg(all(feature = "simd", target_arch = "aarch64"))]
    {
        // SAFETY: NEON is always available on aarch64.
        return unsafe { arch::aarch64::sum_squares_neon(v) };
    }

    #[allow(unreachable_code)]
    sum_squares_portable(v)
}

/// Portable sum of squares.
#[inline]
#[must_use]
pub fn sum_squares_portable(v: &[f32]) -> f32 {
    v.iter().map(|x| x * x).sum()
}
