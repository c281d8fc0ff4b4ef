use core::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use super::{LaneLayout, Quaternion, Storage};
use crate::scalar::{AddByRef, DivByRef, MulByRef, SubByRef};
use crate::simd::{SimdFloat, SimdRegister};

impl<T: SimdFloat, W: LaneLayout<T>> Quaternion<T, W> {
    /// Multiplies every component by the scalar broadcast in `scale`.
    #[inline(always)]
    #[must_use]
    pub fn mul_broadcast(self, scale: W::Register) -> Self {
        Self::from_packed(self.packed.map(|register| register.mul(scale)))
    }

    /// Divides every component by the scalar broadcast in `divisor`.
    #[inline(always)]
    #[must_use]
    pub fn div_broadcast(self, divisor: W::Register) -> Self {
        Self::from_packed(self.packed.map(|register| register.div(divisor)))
    }

    /// In-place [`Quaternion::mul_broadcast`].
    #[inline(always)]
    pub fn mul_broadcast_assign(&mut self, scale: W::Register) {
        *self = self.mul_broadcast(scale);
    }

    /// In-place [`Quaternion::div_broadcast`].
    #[inline(always)]
    pub fn div_broadcast_assign(&mut self, divisor: W::Register) {
        *self = self.div_broadcast(divisor);
    }
}

impl<T: SimdFloat, W: LaneLayout<T>> Add for Quaternion<T, W> {
    type Output = Self;

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        Self::from_packed(self.packed.zip(rhs.packed, SimdRegister::add))
    }
}

impl<T: SimdFloat, W: LaneLayout<T>> Sub for Quaternion<T, W> {
    type Output = Self;

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        Self::from_packed(self.packed.zip(rhs.packed, SimdRegister::sub))
    }
}

impl<T: SimdFloat, W: LaneLayout<T>> Neg for Quaternion<T, W> {
    type Output = Self;

    #[inline(always)]
    fn neg(self) -> Self {
        Self::from_packed(self.packed.map(SimdRegister::neg))
    }
}

impl<T: SimdFloat, W: LaneLayout<T>> Mul<T> for Quaternion<T, W> {
    type Output = Self;

    #[inline(always)]
    fn mul(self, rhs: T) -> Self {
        self.mul_broadcast(W::Register::splat(rhs))
    }
}

impl<T: SimdFloat, W: LaneLayout<T>> Div<T> for Quaternion<T, W> {
    type Output = Self;

    #[inline(always)]
    fn div(self, rhs: T) -> Self {
        self.div_broadcast(W::Register::splat(rhs))
    }
}

macro_rules! impl_scalar_lhs {
    ($($scalar:ty),*) => {
        $(
            impl<W: LaneLayout<$scalar>> Mul<Quaternion<$scalar, W>> for $scalar {
                type Output = Quaternion<$scalar, W>;

                #[inline(always)]
                fn mul(self, rhs: Quaternion<$scalar, W>) -> Quaternion<$scalar, W> {
                    rhs * self
                }
            }
        )*
    };
}

impl_scalar_lhs!(f32, f64);

macro_rules! impl_assign {
    ($($tr:ident, $method:ident, $op_tr:ident, $op:ident, $rhs:ty;)*) => {
        $(
            impl<T: SimdFloat, W: LaneLayout<T>> $tr<$rhs> for Quaternion<T, W> {
                #[inline(always)]
                fn $method(&mut self, rhs: $rhs) {
                    *self = <Self as $op_tr<$rhs>>::$op(*self, rhs);
                }
            }
        )*
    };
}

impl_assign! {
    AddAssign, add_assign, Add, add, Self;
    SubAssign, sub_assign, Sub, sub, Self;
    MulAssign, mul_assign, Mul, mul, T;
    DivAssign, div_assign, Div, div, T;
}

macro_rules! impl_by_ref {
    ($($tr:ident, $as_op:ident, $into:ident, $op:tt;)*) => {
        $(
            impl<T: SimdFloat, W: LaneLayout<T>> $tr for Quaternion<T, W> {
                type Output = Self;

                #[inline(always)]
                fn $as_op(&self, rhs: &Self) -> Self {
                    *self $op *rhs
                }

                #[inline(always)]
                fn $into(&self, rhs: &Self, out: &mut Self) {
                    *out = *self $op *rhs;
                }
            }
        )*
    };
}

impl_by_ref! {
    AddByRef, as_add, add_into, +;
    SubByRef, as_sub, sub_into, -;
    MulByRef, as_mul, mul_into, *;
}

/// Componentwise division, `self[n] / rhs[n]`.
impl<T: SimdFloat, W: LaneLayout<T>> DivByRef for Quaternion<T, W> {
    type Output = Self;

    #[inline(always)]
    fn as_div(&self, rhs: &Self) -> Self {
        Self::from_packed(self.packed.zip(rhs.packed, SimdRegister::div))
    }

    #[inline(always)]
    fn div_into(&self, rhs: &Self, out: &mut Self) {
        *out = self.as_div(rhs);
    }
}
