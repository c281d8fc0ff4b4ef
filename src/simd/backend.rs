//! The internal low-level, primitive backend for register arithmetic.
//!
//! Every register type forwards `add`, `sub`, `mul` and `div` to one backend
//! chosen at compile time: an intrinsic backend when the target enables the
//! matching instruction set, otherwise a plain lane loop.

/// Arithmetic on lane arrays that are aligned to their full width.
///
/// These operations are more efficient than their unaligned counterpart, but
/// they often aren't as safe. If unaligned, these operations will cause a data
/// load fault.
pub trait AlignedSimdOps<A> {
    /// Adds `a + b` and copies them into the output.
    ///
    /// # Safety
    ///
    /// This function assumes proper alignment; it an immediate
    /// data load fault at the CPU level if called on unaligned
    /// input.
    #[must_use]
    unsafe fn simd_add(a: &A, b: &A) -> A;

    /// Subtracts `a - b` and copies them into the output.
    ///
    /// # Safety
    ///
    /// This function assumes proper alignment; it an immediate
    /// data load fault at the CPU level if called on unaligned
    /// input.
    #[must_use]
    unsafe fn simd_sub(a: &A, b: &A) -> A;

    /// Multiplies `a * b` and copies them into the output.
    ///
    /// # Safety
    ///
    /// This function assumes proper alignment; it an immediate
    /// data load fault at the CPU level if called on unaligned
    /// input.
    #[must_use]
    unsafe fn simd_mul(a: &A, b: &A) -> A;

    /// Divides `a / b` and copies them into the output.
    ///
    /// # Safety
    ///
    /// This function assumes proper alignment; it an immediate
    /// data load fault at the CPU level if called on unaligned
    /// input.
    #[must_use]
    unsafe fn simd_div(a: &A, b: &A) -> A;
}

macro_rules! impl_no_simd {
    ($name:ident, $type:ty, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug)]
        pub struct $name<const N: usize>;

        impl<const N: usize> $name<N> {
            /// Lane count of the vector.
            pub const SIZE: usize = N;
        }

        impl<const N: usize> AlignedSimdOps<[$type; N]> for $name<N> {
            #[inline(always)]
            unsafe fn simd_add(a: &[$type; N], b: &[$type; N]) -> [$type; N] {
                core::array::from_fn(|i| a[i] + b[i])
            }

            #[inline(always)]
            unsafe fn simd_sub(a: &[$type; N], b: &[$type; N]) -> [$type; N] {
                core::array::from_fn(|i| a[i] - b[i])
            }

            #[inline(always)]
            unsafe fn simd_mul(a: &[$type; N], b: &[$type; N]) -> [$type; N] {
                core::array::from_fn(|i| a[i] * b[i])
            }

            #[inline(always)]
            unsafe fn simd_div(a: &[$type; N], b: &[$type; N]) -> [$type; N] {
                core::array::from_fn(|i| a[i] / b[i])
            }
        }
    };
}

impl_no_simd!(
    SinglePrecisionNoSimd,
    f32,
    "Plain lane-loop backend for single precision floats."
);

impl_no_simd!(
    DoublePrecisionNoSimd,
    f64,
    "Plain lane-loop backend for double precision floats."
);

#[allow(unused_macros)]
macro_rules! simd_ops_internal {
    (@add [f32; 4], $a:ident, $b:ident) => {
        simd_ops_internal!(@(_mm_add_ps | vaddq_f32) [f32; 4], $a, $b)
    };

    (@add [f64; 2], $a:ident, $b:ident) => {
        simd_ops_internal!(@(_mm_add_pd | vaddq_f64) [f64; 2], $a, $b)
    };

    (@add [f32; 8], $a:ident, $b:ident) => {
        simd_ops_internal!(@(_mm256_add_ps) [f32; 8], $a, $b)
    };

    (@add [f64; 4], $a:ident, $b:ident) => {
        simd_ops_internal!(@(_mm256_add_pd) [f64; 4], $a, $b)
    };

    (@sub [f32; 4], $a:ident, $b:ident) => {
        simd_ops_internal!(@(_mm_sub_ps | vsubq_f32) [f32; 4], $a, $b)
    };

    (@sub [f64; 2], $a:ident, $b:ident) => {
        simd_ops_internal!(@(_mm_sub_pd | vsubq_f64) [f64; 2], $a, $b)
    };

    (@sub [f32; 8], $a:ident, $b:ident) => {
        simd_ops_internal!(@(_mm256_sub_ps) [f32; 8], $a, $b)
    };

    (@sub [f64; 4], $a:ident, $b:ident) => {
        simd_ops_internal!(@(_mm256_sub_pd) [f64; 4], $a, $b)
    };

    (@mul [f32; 4], $a:ident, $b:ident) => {
        simd_ops_internal!(@(_mm_mul_ps | vmulq_f32) [f32; 4], $a, $b)
    };

    (@mul [f64; 2], $a:ident, $b:ident) => {
        simd_ops_internal!(@(_mm_mul_pd | vmulq_f64) [f64; 2], $a, $b)
    };

    (@mul [f32; 8], $a:ident, $b:ident) => {
        simd_ops_internal!(@(_mm256_mul_ps) [f32; 8], $a, $b)
    };

    (@mul [f64; 4], $a:ident, $b:ident) => {
        simd_ops_internal!(@(_mm256_mul_pd) [f64; 4], $a, $b)
    };

    (@div [f32; 4], $a:ident, $b:ident) => {
        simd_ops_internal!(@(_mm_div_ps | vdivq_f32) [f32; 4], $a, $b)
    };

    (@div [f64; 2], $a:ident, $b:ident) => {
        simd_ops_internal!(@(_mm_div_pd | vdivq_f64) [f64; 2], $a, $b)
    };

    (@div [f32; 8], $a:ident, $b:ident) => {
        simd_ops_internal!(@(_mm256_div_ps) [f32; 8], $a, $b)
    };

    (@div [f64; 4], $a:ident, $b:ident) => {
        simd_ops_internal!(@(_mm256_div_pd) [f64; 4], $a, $b)
    };

    // f32x4
    (@($op1:ident | $op2:ident) [f32; 4], $a:ident, $b:ident) => {{
        #[cfg(all(target_arch = "x86_64", target_feature = "sse"))]
        unsafe {
            use core::arch::x86_64::*;
            let va = _mm_load_ps($a.as_ptr());
            let vb = _mm_load_ps($b.as_ptr());
            let mut out = [0f32; 4];
            _mm_storeu_ps(out.as_mut_ptr(), $op1(va, vb));
            out
        }
        #[cfg(all(target_arch = "aarch64", target_feature = "neon"))]
        unsafe {
            use core::arch::aarch64::*;
            let va = vld1q_f32($a.as_ptr());
            let vb = vld1q_f32($b.as_ptr());
            let mut out = [0f32; 4];
            vst1q_f32(out.as_mut_ptr(), $op2(va, vb));
            out
        }
    }};

    // f64x2
    (@($op1:ident | $op2:ident) [f64; 2], $a:ident, $b:ident) => {{
        #[cfg(all(target_arch = "x86_64", target_feature = "sse2"))]
        unsafe {
            use core::arch::x86_64::*;
            let va = _mm_load_pd($a.as_ptr());
            let vb = _mm_load_pd($b.as_ptr());
            let mut out = [0f64; 2];
            _mm_storeu_pd(out.as_mut_ptr(), $op1(va, vb));
            out
        }
        #[cfg(all(target_arch = "aarch64", target_feature = "neon"))]
        unsafe {
            use core::arch::aarch64::*;
            let va = vld1q_f64($a.as_ptr());
            let vb = vld1q_f64($b.as_ptr());
            let mut out = [0f64; 2];
            vst1q_f64(out.as_mut_ptr(), $op2(va, vb));
            out
        }
    }};

    // f32x8
    (@($op1:ident) [f32; 8], $a:ident, $b:ident) => {{
        #[cfg(all(target_arch = "x86_64", target_feature = "avx"))]
        unsafe {
            use core::arch::x86_64::*;
            let va = _mm256_load_ps($a.as_ptr());
            let vb = _mm256_load_ps($b.as_ptr());
            let mut out = [0f32; 8];
            _mm256_storeu_ps(out.as_mut_ptr(), $op1(va, vb));
            out
        }
    }};

    // f64x4
    (@($op1:ident) [f64; 4], $a:ident, $b:ident) => {{
        #[cfg(all(target_arch = "x86_64", target_feature = "avx"))]
        unsafe {
            use core::arch::x86_64::*;
            let va = _mm256_load_pd($a.as_ptr());
            let vb = _mm256_load_pd($b.as_ptr());
            let mut out = [0f64; 4];
            _mm256_storeu_pd(out.as_mut_ptr(), $op1(va, vb));
            out
        }
    }};
}

#[allow(unused_macros)]
macro_rules! impl_simd_ops {
    ($name:ident, [$type:ident; $len:tt], $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug)]
        pub struct $name;

        impl $name {
            /// Lane count of the vector.
            pub const SIZE: usize = $len;
        }

        impl AlignedSimdOps<[$type; $len]> for $name {
            #[inline(always)]
            unsafe fn simd_add(a: &[$type; $len], b: &[$type; $len]) -> [$type; $len] {
                simd_ops_internal!(@add [$type; $len], a, b)
            }

            #[inline(always)]
            unsafe fn simd_sub(a: &[$type; $len], b: &[$type; $len]) -> [$type; $len] {
                simd_ops_internal!(@sub [$type; $len], a, b)
            }

            #[inline(always)]
            unsafe fn simd_mul(a: &[$type; $len], b: &[$type; $len]) -> [$type; $len] {
                simd_ops_internal!(@mul [$type; $len], a, b)
            }

            #[inline(always)]
            unsafe fn simd_div(a: &[$type; $len], b: &[$type; $len]) -> [$type; $len] {
                simd_ops_internal!(@div [$type; $len], a, b)
            }
        }
    };
}

#[cfg(any(
    all(target_arch = "x86_64", target_feature = "sse"),
    all(target_arch = "aarch64", target_feature = "neon")
))]
impl_simd_ops!(
    F32x4Ops,
    [f32; 4],
    "
SSE or NEON arithmetic on 4 32-bit floating point lanes.

Only available on platforms that support SSE or NEON and consumes 128 bits (or 16 bytes) of memory.
"
);

#[cfg(any(
    all(target_arch = "x86_64", target_feature = "sse2"),
    all(target_arch = "aarch64", target_feature = "neon")
))]
impl_simd_ops!(
    F64x2Ops,
    [f64; 2],
    "
SSE2 or NEON arithmetic on 2 64-bit floating point lanes.

Only available on platforms that support SSE2 or NEON and consumes 128 bits (or 16 bytes) of memory.
"
);

#[cfg(all(target_arch = "x86_64", target_feature = "avx"))]
impl_simd_ops!(
    F32x8Ops,
    [f32; 8],
    "
AVX arithmetic on 8 32-bit floating point lanes.

Only available on platforms that support AVX and consumes 256 bits (or 32 bytes) of memory.
"
);

#[cfg(all(target_arch = "x86_64", target_feature = "avx"))]
impl_simd_ops!(
    F64x4Ops,
    [f64; 4],
    "
AVX arithmetic on 4 64-bit floating point lanes.

Only available on platforms that support AVX and consumes 256 bits (or 32 bytes) of memory.
"
);

/// Backend used by [`crate::simd::F32x4`].
#[cfg(any(
    all(target_arch = "x86_64", target_feature = "sse"),
    all(target_arch = "aarch64", target_feature = "neon")
))]
pub type F32x4Backend = F32x4Ops;
/// Backend used by [`crate::simd::F32x4`].
#[cfg(not(any(
    all(target_arch = "x86_64", target_feature = "sse"),
    all(target_arch = "aarch64", target_feature = "neon")
)))]
pub type F32x4Backend = SinglePrecisionNoSimd<4>;

/// Backend used by [`crate::simd::F64x2`].
#[cfg(any(
    all(target_arch = "x86_64", target_feature = "sse2"),
    all(target_arch = "aarch64", target_feature = "neon")
))]
pub type F64x2Backend = F64x2Ops;
/// Backend used by [`crate::simd::F64x2`].
#[cfg(not(any(
    all(target_arch = "x86_64", target_feature = "sse2"),
    all(target_arch = "aarch64", target_feature = "neon")
)))]
pub type F64x2Backend = DoublePrecisionNoSimd<2>;

/// Backend used by [`crate::simd::F32x8`].
#[cfg(all(target_arch = "x86_64", target_feature = "avx"))]
pub type F32x8Backend = F32x8Ops;
/// Backend used by [`crate::simd::F32x8`].
#[cfg(not(all(target_arch = "x86_64", target_feature = "avx")))]
pub type F32x8Backend = SinglePrecisionNoSimd<8>;

/// Backend used by [`crate::simd::F64x4`].
#[cfg(all(target_arch = "x86_64", target_feature = "avx"))]
pub type F64x4Backend = F64x4Ops;
/// Backend used by [`crate::simd::F64x4`].
#[cfg(not(all(target_arch = "x86_64", target_feature = "avx")))]
pub type F64x4Backend = DoublePrecisionNoSimd<4>;
