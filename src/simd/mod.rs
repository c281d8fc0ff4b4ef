//! Core traits and types that abstract usage of SIMD registers.

use approx::{AbsDiffEq, RelativeEq};
use core::fmt::Debug;
use num_traits::{Float, FloatConst};

use crate::scalar::Primitive;

pub mod backend;

mod register;
pub use register::SimdRegister;

mod aligned;
pub use aligned::{F32x16, F32x2, F32x4, F32x8, F64x2, F64x4, F64x8};

/// A marker trait for scalars that are feasible for use in SIMD.
pub trait SimdScalar:
    num_traits::NumAssign + num_traits::NumAssignOps + num_traits::NumCast
{
}

impl SimdScalar for f32 {}
impl SimdScalar for f64 {}

/// Represents a scalar that can be copied and is expected for a SIMD register.
pub trait SimdElement: SimdScalar + Copy + Default {}

impl<T: SimdScalar + Copy + Default> SimdElement for T {}

/// A floating point lane type that quaternion components can be stored as.
pub trait SimdFloat:
    SimdElement
    + Primitive
    + Float
    + FloatConst
    + AbsDiffEq<Epsilon = Self>
    + RelativeEq
    + Debug
    + 'static
{
    /// Floating point type results are reported in when no output type is requested.
    ///
    /// `f64` for scalars of 64 bits or more, `f32` otherwise.
    type Preferred: Float + Debug + 'static;

    /// Width of one lane in bits.
    const BITS: usize = core::mem::size_of::<Self>() * 8;

    /// Converts `self` to [`SimdFloat::Preferred`].
    fn to_preferred(self) -> Self::Preferred;
}

impl SimdFloat for f32 {
    type Preferred = f32;

    #[inline(always)]
    fn to_preferred(self) -> f32 {
        self
    }
}

impl SimdFloat for f64 {
    type Preferred = f64;

    #[inline(always)]
    fn to_preferred(self) -> f64 {
        self
    }
}
