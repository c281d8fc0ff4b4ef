use super::{LaneLayout, Pair, Quaternion, Single, Storage};
use crate::simd::{SimdFloat, SimdRegister};

/// Negation of the imaginary components.
pub trait Conjugate: Storage {
    /// Computes `(-x, -y, -z, w)`.
    #[must_use]
    fn conjugate(self) -> Self;
}

impl<R: SimdRegister> Conjugate for Single<R> {
    #[inline(always)]
    fn conjugate(self) -> Self {
        Self(self.0.neg().blend::<0b1000>(self.0))
    }
}

impl<R: SimdRegister> Conjugate for Pair<R> {
    #[inline(always)]
    fn conjugate(self) -> Self {
        Self {
            xy: self.xy.neg(),
            zw: self.zw.neg().blend::<0b10>(self.zw),
        }
    }
}

impl<T: SimdFloat, W: LaneLayout<T>> Quaternion<T, W> {
    /// The conjugate `(-x, -y, -z, w)`.
    #[inline(always)]
    #[must_use]
    pub fn conjugate(self) -> Self {
        Self::from_packed(self.packed.conjugate())
    }

    /// The multiplicative inverse, `conjugate / square_norm`.
    ///
    /// The norm must not be zero.
    #[inline(always)]
    #[must_use]
    pub fn inverse(self) -> Self {
        self.inverse_with::<false>()
    }

    /// [`Quaternion::inverse`], dividing by the squared norm or, with
    /// `PREFER_MULTIPLIES`, multiplying by its reciprocal.
    ///
    /// The norm must not be zero.
    #[inline(always)]
    #[must_use]
    pub fn inverse_with<const PREFER_MULTIPLIES: bool>(self) -> Self {
        let square_norm = self.square_norm_register();
        debug_assert!(square_norm.lane(0) != T::zero(), "inverse of a zero quaternion");

        self.conjugate().scale_down::<PREFER_MULTIPLIES>(square_norm)
    }

    /// The quaternion scaled to unit length.
    ///
    /// The norm must not be zero.
    #[inline(always)]
    #[must_use]
    pub fn unit(self) -> Self {
        self.unit_with::<false>()
    }

    /// [`Quaternion::unit`], dividing by the norm or, with
    /// `PREFER_MULTIPLIES`, multiplying by its reciprocal.
    ///
    /// The norm must not be zero.
    #[inline(always)]
    #[must_use]
    pub fn unit_with<const PREFER_MULTIPLIES: bool>(self) -> Self {
        let norm = self.norm_register();
        debug_assert!(norm.lane(0) != T::zero(), "unit of a zero quaternion");

        self.scale_down::<PREFER_MULTIPLIES>(norm)
    }

    /// Normalises in place.
    #[inline(always)]
    pub fn assign_unit(&mut self) {
        *self = self.unit();
    }

    /// Normalises in place with the given division policy.
    #[inline(always)]
    pub fn assign_unit_with<const PREFER_MULTIPLIES: bool>(&mut self) {
        *self = self.unit_with::<PREFER_MULTIPLIES>();
    }

    #[inline(always)]
    fn scale_down<const PREFER_MULTIPLIES: bool>(self, divisor: W::Register) -> Self {
        if PREFER_MULTIPLIES {
            self.mul_broadcast(divisor.recip())
        } else {
            self.div_broadcast(divisor)
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::quaternion::fixtures::{cast, for_all_layouts, samples};
    use crate::quaternion::{Bits128, Bits256, LaneLayout, Quaternion};
    use crate::scalar::ScalarQuaternion;
    use crate::simd::SimdFloat;
    use approx::assert_relative_eq;

    fn conjugate_flips_imaginary_part<T: SimdFloat, W: LaneLayout<T>>() {
        for [x, y, z, w] in samples::<T>() {
            let q = Quaternion::<T, W>::new(x, y, z, w);
            assert_eq!(q.conjugate().to_array(), [-x, -y, -z, w]);
            assert_eq!(q.conjugate().conjugate(), q);
        }
    }

    fn inverse_cancels<T: SimdFloat, W: LaneLayout<T>>() {
        let tolerance = T::epsilon() * cast(16.0);
        let identity = Quaternion::<T, W>::identity();

        for sample in samples::<T>() {
            let q = Quaternion::<T, W>::from_array(sample);
            assert_relative_eq!(q * q.inverse(), identity, epsilon = tolerance);
            assert_relative_eq!(q.inverse() * q, identity, epsilon = tolerance);
            assert_relative_eq!(q * q.inverse_with::<true>(), identity, epsilon = tolerance);

            let expected = ScalarQuaternion::from_array(sample).inverse();
            assert_relative_eq!(q.inverse().to_scalar(), expected, epsilon = tolerance);
        }
    }

    fn unit_has_unit_norm<T: SimdFloat, W: LaneLayout<T>>() {
        let tolerance = T::epsilon() * cast(8.0);

        for sample in samples::<T>() {
            let q = Quaternion::<T, W>::from_array(sample);
            let divided = q.unit();
            let multiplied = q.unit_with::<true>();

            assert_relative_eq!(divided.dot(divided), T::one(), epsilon = tolerance);
            assert_relative_eq!(multiplied.dot(multiplied), T::one(), epsilon = tolerance);
            assert_relative_eq!(divided, multiplied, epsilon = tolerance);

            let mut in_place = q;
            in_place.assign_unit();
            assert_eq!(in_place, divided);
            in_place = q;
            in_place.assign_unit_with::<true>();
            assert_eq!(in_place, multiplied);
        }
    }

    mod layouts {
        use super::*;

        for_all_layouts!(conjugate_flips_imaginary_part, inverse_cancels, unit_has_unit_norm);
    }

    #[test]
    fn exact_norms_divide_exactly() {
        let q = Quaternion::<f64, Bits256>::new(3.0, 0.0, 4.0, 0.0);
        assert_eq!(q.unit().to_array(), [0.6, 0.0, 0.8, 0.0]);

        let q = Quaternion::<f32, Bits128>::new(1.0, 1.0, 1.0, 1.0);
        assert_eq!(q.unit_with::<true>().to_array(), [0.5; 4]);
    }
}
