//! Slice-at-a-time helpers over packed quaternions.
//!
//! Each function walks its inputs in lockstep and panics when the slices
//! differ in length.

use super::{LaneLayout, Quaternion};
use crate::simd::{SimdFloat, SimdRegister};

/// Writes `a[n] * b[n]` (the Hamilton product) to `out[n]`.
///
/// # Panics
///
/// Panics if `a`, `b` and `out` are not all the same length.
#[inline]
pub fn multiply_slices<T: SimdFloat, W: LaneLayout<T>>(
    a: &[Quaternion<T, W>],
    b: &[Quaternion<T, W>],
    out: &mut [Quaternion<T, W>],
) {
    let len_cached = a.len();

    assert_eq!(len_cached, b.len(), "inputs must be the same size");
    assert_eq!(len_cached, out.len(), "output must be the same size as input");

    for ((out, &a), &b) in out.iter_mut().zip(a).zip(b) {
        *out = a * b;
    }
}

/// Scales every quaternion in `quaternions` to unit length in place.
///
/// No element may have a zero norm.
#[inline]
pub fn normalize_slice<T: SimdFloat, W: LaneLayout<T>>(quaternions: &mut [Quaternion<T, W>]) {
    for quaternion in quaternions {
        quaternion.assign_unit_with::<true>();
    }
}

/// Writes `a[n].lerp(b[n], t)` to `out[n]`.
///
/// # Panics
///
/// Panics if `a`, `b` and `out` are not all the same length.
#[inline]
pub fn lerp_slices<T: SimdFloat, W: LaneLayout<T>>(
    a: &[Quaternion<T, W>],
    b: &[Quaternion<T, W>],
    t: T,
    out: &mut [Quaternion<T, W>],
) {
    let len_cached = a.len();

    assert_eq!(len_cached, b.len(), "inputs must be the same size");
    assert_eq!(len_cached, out.len(), "output must be the same size as input");

    let t = W::Register::splat(t);
    for ((out, &a), &b) in out.iter_mut().zip(a).zip(b) {
        *out = a.lerp_fused(b, t);
    }
}

/// Writes `a[n].slerp(b[n], t)` to `out[n]`.
///
/// # Panics
///
/// Panics if `a`, `b` and `out` are not all the same length.
#[inline]
pub fn slerp_slices<T: SimdFloat, W: LaneLayout<T>>(
    a: &[Quaternion<T, W>],
    b: &[Quaternion<T, W>],
    t: T,
    out: &mut [Quaternion<T, W>],
) {
    let len_cached = a.len();

    assert_eq!(len_cached, b.len(), "inputs must be the same size");
    assert_eq!(len_cached, out.len(), "output must be the same size as input");

    for ((out, &a), &b) in out.iter_mut().zip(a).zip(b) {
        *out = a.slerp_fused(b, t);
    }
}
