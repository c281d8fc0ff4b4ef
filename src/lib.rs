//! Quaternion algebra packed into SIMD registers.
//!
//! A [`Quaternion`] keeps its four components `x, y, z, w` inside one or two
//! fixed-width registers, chosen at compile time from the scalar type and a
//! register width marker ([`Bits64`], [`Bits128`], [`Bits256`], [`Bits512`]).
//! Four lanes or more collapse into a single register (padding lanes are never
//! observed); two-lane registers split the quaternion into an `xy` and a `zw`
//! register. Every algorithm has exactly one code path per packing shape and
//! produces the same numbers as the textbook scalar formulas in
//! [`scalar::ScalarQuaternion`].
//!
//! With nothing but `core`, `num_traits` and `approx`, the crate is built to be
//! portable: every register type has a plain lane-loop backend, and SSE, AVX
//! or NEON backends are swapped in where the target enables them.

#![forbid(missing_docs)]
#![forbid(unsafe_op_in_unsafe_fn)]
#![no_std]

#[cfg(any(test, feature = "std"))]
extern crate std;

mod private {
    pub trait Internal {}
}

use crate::private::Internal;

pub mod quaternion;
pub mod scalar;
pub mod simd;

pub use quaternion::{
    Bits128, Bits256, Bits512, Bits64, Capacity, LaneLayout, NativeWidth, Pair, Quaternion,
    RegisterWidth, Shape, Single,
};
pub use scalar::ScalarQuaternion;

/// The largest size (in bytes) a SIMD type can have on the target.
///
/// A reflection of the largest contiguous array of bytes that can be stored in a
/// localized, singular, specialized SIMD register, as picked by [`NativeWidth`].
pub const MAX_SIMD_SIZE: usize = NativeWidth::BITS / 8;
