use approx::{AbsDiffEq, RelativeEq};

use super::{LaneLayout, Pair, Quaternion, Single, Storage};
use crate::simd::{SimdFloat, SimdRegister};

/// Lane-wise comparisons reduced to a single answer.
pub trait LaneCompare: Storage {
    /// True when `cmp` sets the bit of every component lane.
    ///
    /// `cmp` receives matching registers of `self` and `rhs` and returns a
    /// lane bitmask, as [`SimdRegister::cmp_eq`] does. Bits of padding lanes
    /// are ignored.
    fn all_lanes(self, rhs: Self, cmp: impl Fn(Self::Register, Self::Register) -> u32) -> bool;
}

impl<R: SimdRegister> LaneCompare for Single<R> {
    #[inline(always)]
    fn all_lanes(self, rhs: Self, cmp: impl Fn(R, R) -> u32) -> bool {
        cmp(self.0, rhs.0) & 0b1111 == 0b1111
    }
}

impl<R: SimdRegister> LaneCompare for Pair<R> {
    #[inline(always)]
    fn all_lanes(self, rhs: Self, cmp: impl Fn(R, R) -> u32) -> bool {
        cmp(self.xy, rhs.xy) & cmp(self.zw, rhs.zw) & 0b11 == 0b11
    }
}

impl<T: SimdFloat, W: LaneLayout<T>> Quaternion<T, W> {
    /// True when every component differs from `rhs` by at most `epsilon`.
    #[inline(always)]
    pub fn near(self, rhs: Self, epsilon: T) -> bool {
        let epsilon = W::Register::splat(epsilon);
        self.packed.all_lanes(rhs.packed, |a, b| a.sub(b).abs().cmp_le(epsilon))
    }
}

impl<T: SimdFloat, W: LaneLayout<T>> PartialEq for Quaternion<T, W> {
    /// Exact comparison of the four components.
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        self.packed.all_lanes(other.packed, SimdRegister::cmp_eq)
    }
}

impl<T: SimdFloat, W: LaneLayout<T>> AbsDiffEq for Quaternion<T, W> {
    type Epsilon = T;

    #[inline]
    fn default_epsilon() -> T {
        T::default_epsilon()
    }

    #[inline]
    fn abs_diff_eq(&self, other: &Self, epsilon: T) -> bool {
        self.near(*other, epsilon)
    }
}

impl<T: SimdFloat, W: LaneLayout<T>> RelativeEq for Quaternion<T, W> {
    #[inline]
    fn default_max_relative() -> T {
        T::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: T, max_relative: T) -> bool {
        self.to_array()
            .iter()
            .zip(&other.to_array())
            .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}
