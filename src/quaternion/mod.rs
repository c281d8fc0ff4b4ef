//! The register-packed quaternion and every operation on it.
//!
//! Each subsystem is a trait implemented twice, once for [`Single`] and once
//! for [`Pair`]. [`Quaternion`] methods forward to whichever shape
//! [`LaneLayout::Packing`] names, so the choice is made entirely by the type
//! checker.

use core::fmt;

use crate::simd::SimdFloat;

mod capacity;
pub use capacity::{Bits128, Bits256, Bits512, Bits64, Capacity, LaneLayout, NativeWidth, RegisterWidth};

mod packing;
pub use packing::{Packing, Pair, ScalarOf, Shape, Single, Storage};

mod arithmetic;
mod compare;
mod construct;
mod store;

mod hamilton;
pub use hamilton::HamiltonProduct;

mod norm;
pub use norm::Reduce;

mod interpolate;
pub use interpolate::{LerpFactor, LerpOperand};

mod unit;
pub use unit::Conjugate;

mod euler;
pub use euler::{EulerAngles, EulerPacking};

pub use compare::LaneCompare;

pub mod batch;

#[cfg(test)]
mod fixtures;

/// A quaternion `x i + y j + z k + w` packed into SIMD registers.
///
/// `T` is the component scalar and `W` the register width; together they pick
/// the register type and packing shape through [`LaneLayout`]. The default
/// width is the widest one the target enables.
///
/// ```
/// use quat_simd::{Bits128, Quaternion};
///
/// let i = Quaternion::<f64, Bits128>::new(1.0, 0.0, 0.0, 0.0);
/// let j = Quaternion::<f64, Bits128>::new(0.0, 1.0, 0.0, 0.0);
/// assert_eq!((i * j).to_array(), [0.0, 0.0, 1.0, 0.0]);
/// ```
pub struct Quaternion<T: SimdFloat, W: LaneLayout<T> = NativeWidth> {
    packed: W::Packing,
}

impl<T: SimdFloat, W: LaneLayout<T>> Clone for Quaternion<T, W> {
    #[inline(always)]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: SimdFloat, W: LaneLayout<T>> Copy for Quaternion<T, W> {}

impl<T: SimdFloat, W: LaneLayout<T>> fmt::Debug for Quaternion<T, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [x, y, z, w] = self.to_array();
        f.debug_struct("Quaternion")
            .field("x", &x)
            .field("y", &y)
            .field("z", &z)
            .field("w", &w)
            .finish()
    }
}

impl<T: SimdFloat, W: LaneLayout<T>> Quaternion<T, W> {
    /// Packing shape used at this scalar and width.
    pub const SHAPE: Shape = <W::Packing as Storage>::SHAPE;

    /// Register capacity at this scalar and width.
    pub const CAPACITY: Capacity = W::CAPACITY;

    /// The backing registers.
    #[inline(always)]
    pub const fn packed(&self) -> &W::Packing {
        &self.packed
    }

    /// Moves the backing registers out.
    #[inline(always)]
    pub const fn into_packed(self) -> W::Packing {
        self.packed
    }

    /// Copies the components out as `[x, y, z, w]`.
    #[inline(always)]
    pub fn to_array(self) -> [T; 4] {
        self.packed.to_array()
    }

    /// First imaginary component.
    #[inline(always)]
    pub fn x(self) -> T {
        self.to_array()[0]
    }

    /// Second imaginary component.
    #[inline(always)]
    pub fn y(self) -> T {
        self.to_array()[1]
    }

    /// Third imaginary component.
    #[inline(always)]
    pub fn z(self) -> T {
        self.to_array()[2]
    }

    /// Real component.
    #[inline(always)]
    pub fn w(self) -> T {
        self.to_array()[3]
    }
}
