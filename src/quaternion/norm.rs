use num_traits::{AsPrimitive, Float};

use super::{LaneLayout, Pair, Quaternion, ScalarOf, Single, Storage};
use crate::simd::{SimdFloat, SimdRegister};

/// Four-dimensional dot products reduced across lanes and registers.
///
/// Padding lanes never reach the sum.
pub trait Reduce: Storage {
    /// `x1 x2 + y1 y2 + z1 z2 + w1 w2`.
    fn dot(self, rhs: Self) -> ScalarOf<Self>;

    /// [`Reduce::dot`] broadcast to every lane of a register.
    fn dot_fill(self, rhs: Self) -> Self::Register;
}

impl<R: SimdRegister> Single<R> {
    #[inline(always)]
    fn products(self, rhs: Self) -> R {
        let products = self.0.mul(rhs.0);
        if R::LANES > 4 {
            products.and_index_mask::<0b1111>()
        } else {
            products
        }
    }
}

impl<R: SimdRegister> Reduce for Single<R> {
    #[inline(always)]
    fn dot(self, rhs: Self) -> R::Scalar {
        self.products(rhs).horizontal_sum()
    }

    #[inline(always)]
    fn dot_fill(self, rhs: Self) -> R {
        self.products(rhs).horizontal_sum_fill()
    }
}

impl<R: SimdRegister> Pair<R> {
    #[inline(always)]
    fn products(self, rhs: Self) -> R {
        self.zw.fmadd(rhs.zw, self.xy.mul(rhs.xy))
    }
}

impl<R: SimdRegister> Reduce for Pair<R> {
    #[inline(always)]
    fn dot(self, rhs: Self) -> R::Scalar {
        self.products(rhs).horizontal_sum()
    }

    #[inline(always)]
    fn dot_fill(self, rhs: Self) -> R {
        self.products(rhs).horizontal_sum_fill()
    }
}

impl<T: SimdFloat, W: LaneLayout<T>> Quaternion<T, W> {
    /// Four-dimensional dot product.
    #[inline(always)]
    pub fn dot(self, rhs: Self) -> T {
        self.packed.dot(rhs.packed)
    }

    /// Sum of the squared components, in [`SimdFloat::Preferred`].
    #[inline(always)]
    pub fn square_norm(self) -> T::Preferred {
        self.dot(self).to_preferred()
    }

    /// Sum of the squared components, converted to `U`.
    #[inline(always)]
    pub fn square_norm_as<U>(self) -> U
    where
        U: Float + 'static,
        T: AsPrimitive<U>,
    {
        self.dot(self).as_()
    }

    /// Sum of the squared components, broadcast to every lane.
    #[inline(always)]
    pub fn square_norm_register(self) -> W::Register {
        self.packed.dot_fill(self.packed)
    }

    /// Euclidean length, in [`SimdFloat::Preferred`].
    #[inline(always)]
    pub fn norm(self) -> T::Preferred {
        self.square_norm().sqrt()
    }

    /// Euclidean length, converted to `U` before the square root.
    #[inline(always)]
    pub fn norm_as<U>(self) -> U
    where
        U: Float + 'static,
        T: AsPrimitive<U>,
    {
        self.square_norm_as::<U>().sqrt()
    }

    /// Euclidean length, broadcast to every lane.
    #[inline(always)]
    pub fn norm_register(self) -> W::Register {
        self.square_norm_register().sqrt()
    }
}
