//! Architecture-specific SIMD implementations.
//!
//! This module contains unsafe 4-lane SIMD code for different CPU
//! architectures. The safe dispatch in [`crate::kernels`] decides when to
//! call into it.

#[cfg(target_arch = "x86_64")]
pub mod x86_64;

#[cfg(target_arch = "aarch64")]
pub mod aarch64;
