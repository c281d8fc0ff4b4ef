use super::{LaneLayout, Pair, Quaternion, Reduce, Single, Storage};
use crate::scalar::{slerp_weights, SupersetOf};
use crate::simd::{SimdFloat, SimdRegister};

/// Values accepted as the far endpoint of [`Quaternion::lerp`].
///
/// Quaternions and packings pass through unchanged; a scalar is broadcast to
/// all four components; raw registers are taken as the packing they form.
pub trait LerpOperand<P: Storage> {
    /// Converts `self` to packed registers.
    fn into_operand(self) -> P;
}

impl<P: Storage> LerpOperand<P> for P {
    #[inline(always)]
    fn into_operand(self) -> P {
        self
    }
}

impl<T: SimdFloat, W: LaneLayout<T>> LerpOperand<W::Packing> for Quaternion<T, W> {
    #[inline(always)]
    fn into_operand(self) -> W::Packing {
        self.packed
    }
}

impl<R: SimdRegister> LerpOperand<Single<R>> for R {
    #[inline(always)]
    fn into_operand(self) -> Single<R> {
        Single(self)
    }
}

impl<R: SimdRegister> LerpOperand<Pair<R>> for [R; 2] {
    #[inline(always)]
    fn into_operand(self) -> Pair<R> {
        let [xy, zw] = self;
        Pair { xy, zw }
    }
}

/// Values accepted as the interpolation factor of [`Quaternion::lerp`].
///
/// A register is used lane by lane; a scalar is broadcast first.
pub trait LerpFactor<R: SimdRegister> {
    /// Converts `self` to a register.
    fn into_factor(self) -> R;
}

impl<R: SimdRegister> LerpFactor<R> for R {
    #[inline(always)]
    fn into_factor(self) -> R {
        self
    }
}

macro_rules! impl_scalar_coercions {
    ($($scalar:ty),*) => {
        $(
            impl<P: Storage> LerpOperand<P> for $scalar
            where
                P::Register: SupersetOf<$scalar>,
            {
                #[inline(always)]
                fn into_operand(self) -> P {
                    P::broadcast(<P::Register as SupersetOf<$scalar>>::from_subset(self))
                }
            }

            impl<R: SimdRegister + SupersetOf<$scalar>> LerpFactor<R> for $scalar {
                #[inline(always)]
                fn into_factor(self) -> R {
                    <R as SupersetOf<$scalar>>::from_subset(self)
                }
            }
        )*
    };
}

impl_scalar_coercions!(f32, f64);

impl<T: SimdFloat, W: LaneLayout<T>> Quaternion<T, W> {
    /// Linear interpolation, `self * (1 - t) + b * t` per component.
    ///
    /// Exact at both ends: `t = 0` yields `self` and `t = 1` yields `b`.
    #[inline]
    #[must_use]
    pub fn lerp(
        self,
        b: impl LerpOperand<W::Packing>,
        t: impl LerpFactor<W::Register>,
    ) -> Self {
        let (b, t) = (b.into_operand(), t.into_factor());
        let one_minus_t = W::Register::splat(T::one()).sub(t);

        Self::from_packed(self.packed.zip(b, |a, b| a.mul(one_minus_t).add(b.mul(t))))
    }

    /// [`Quaternion::lerp`] finished with one fused multiply-add per register.
    #[inline]
    #[must_use]
    pub fn lerp_fused(
        self,
        b: impl LerpOperand<W::Packing>,
        t: impl LerpFactor<W::Register>,
    ) -> Self {
        let (b, t) = (b.into_operand(), t.into_factor());
        let one_minus_t = W::Register::splat(T::one()).sub(t);

        Self::from_packed(self.packed.zip(b, |a, b| b.fmadd(t, a.mul(one_minus_t))))
    }

    /// Spherical linear interpolation along the shorter arc.
    ///
    /// If `self` and `b` lie in opposite hemispheres, `b` is negated first, so
    /// `t = 1` then yields `-b`, the same rotation. Nearly parallel endpoints
    /// are blended linearly and renormalised.
    #[inline]
    #[must_use]
    pub fn slerp(self, b: Self, t: T) -> Self {
        let (wa, wb) = self.slerp_weights(b, t);
        Self::from_packed(self.packed.zip(b.packed, |a, b| a.mul(wa).add(b.mul(wb))))
    }

    /// [`Quaternion::slerp`] finished with one fused multiply-add per register.
    #[inline]
    #[must_use]
    pub fn slerp_fused(self, b: Self, t: T) -> Self {
        let (wa, wb) = self.slerp_weights(b, t);
        Self::from_packed(self.packed.zip(b.packed, |a, b| b.fmadd(wb, a.mul(wa))))
    }

    #[inline(always)]
    fn slerp_weights(self, b: Self, t: T) -> (W::Register, W::Register) {
        let (wa, wb) = slerp_weights(self.packed.dot(b.packed), t);
        (W::Register::splat(wa), W::Register::splat(wb))
    }
}

#[cfg(test)]
mod tests {
    use crate::quaternion::fixtures::{cast, for_all_layouts, samples};
    use crate::quaternion::{Bits128, Bits256, Bits512, Bits64, LaneLayout, Quaternion};
    use crate::scalar::ScalarQuaternion;
    use crate::simd::{F32x2, F32x4, SimdFloat, SimdRegister};
    use approx::assert_relative_eq;

    fn lerp_hits_both_ends<T: SimdFloat, W: LaneLayout<T>>() {
        let (zero, one) = (W::Register::splat(T::zero()), W::Register::splat(T::one()));
        for a in samples::<T>() {
            for b in samples::<T>() {
                let qa = Quaternion::<T, W>::from_array(a);
                let qb = Quaternion::<T, W>::from_array(b);

                assert_eq!(qa.lerp(qb, zero).to_array(), a);
                assert_eq!(qa.lerp(qb, one).to_array(), b);
                assert_eq!(qa.lerp_fused(qb, zero).to_array(), a);
                assert_eq!(qa.lerp_fused(qb, one).to_array(), b);
            }
        }
    }

    fn lerp_midpoint<T: SimdFloat, W: LaneLayout<T>>() {
        let [a, b, ..] = samples::<T>();
        let half = W::Register::splat(cast(0.5));
        let expected =
            ScalarQuaternion::from_array(a).lerp(ScalarQuaternion::from_array(b), cast(0.5));

        let (qa, qb) = (Quaternion::<T, W>::from_array(a), Quaternion::<T, W>::from_array(b));
        assert_relative_eq!(qa.lerp(qb, half).to_scalar(), expected);
        assert_relative_eq!(
            qa.lerp_fused(qb, half).to_scalar(),
            expected,
            epsilon = T::epsilon() * cast(4.0)
        );
    }

    fn slerp_hits_both_ends<T: SimdFloat, W: LaneLayout<T>>() {
        let a = Quaternion::<T, W>::from_euler::<true, false>([cast(0.1), cast(0.2), cast(0.3)]);
        let b = Quaternion::<T, W>::from_euler::<true, false>([cast(-0.4), cast(0.5), cast(1.2)]);
        assert!(a.dot(b) > T::zero());

        assert_eq!(a.slerp(b, T::zero()), a);
        assert_eq!(a.slerp(b, T::one()), b);
        assert_eq!(a.slerp_fused(b, T::zero()), a);
        assert_eq!(a.slerp_fused(b, T::one()), b);
    }

    fn slerp_matches_scalar<T: SimdFloat, W: LaneLayout<T>>() {
        let a = Quaternion::<T, W>::from_euler::<true, false>([cast(0.3), cast(-0.2), cast(0.9)]);
        let b = Quaternion::<T, W>::from_euler::<true, false>([cast(1.1), cast(0.4), cast(-0.6)]);
        let tolerance = T::epsilon() * cast(32.0);

        for t in [0.25, 0.5, 0.75].map(cast::<T>) {
            let expected = a.to_scalar().slerp(b.to_scalar(), t);
            assert_relative_eq!(a.slerp(b, t).to_scalar(), expected, epsilon = tolerance);
            assert_relative_eq!(a.slerp_fused(b, t).to_scalar(), expected, epsilon = tolerance);
            let blended = a.slerp(b, t);
            assert_relative_eq!(blended.dot(blended), T::one(), epsilon = tolerance);
        }

        let expected = a.to_scalar().slerp((-b).to_scalar(), cast(0.5));
        assert_relative_eq!(a.slerp(-b, cast(0.5)).to_scalar(), expected, epsilon = tolerance);
        assert_relative_eq!(a.slerp(-b, cast(0.5)), a.slerp(b, cast(0.5)), epsilon = tolerance);
    }

    fn nearly_parallel_slerp_stays_unit<T: SimdFloat, W: LaneLayout<T>>() {
        let a = Quaternion::<T, W>::identity();
        let b = Quaternion::<T, W>::from_euler::<true, false>([T::zero(), T::zero(), cast(1e-3)]);
        let tolerance = T::epsilon() * cast(4.0);

        let half = a.slerp(b, cast(0.5));
        assert_relative_eq!(half.dot(half), T::one(), epsilon = tolerance);
        assert_relative_eq!(
            half.to_scalar(),
            a.to_scalar().slerp(b.to_scalar(), cast(0.5)),
            epsilon = tolerance
        );
    }

    mod layouts {
        use super::*;

        for_all_layouts!(
            lerp_hits_both_ends,
            lerp_midpoint,
            slerp_hits_both_ends,
            slerp_matches_scalar,
            nearly_parallel_slerp_stays_unit,
        );
    }

    #[test]
    fn scalar_operands_are_broadcast() {
        let a = Quaternion::<f32, Bits128>::new(0.0, 2.0, 4.0, 6.0);
        assert_eq!(a.lerp(2.0f32, 0.5f32).to_array(), [1.0, 2.0, 3.0, 4.0]);

        let b = Quaternion::<f64, Bits256>::new(8.0, 8.0, 8.0, 8.0);
        let a = Quaternion::<f64, Bits256>::default();
        assert_eq!(a.lerp(b, 0.25f64).to_array(), [2.0, 2.0, 2.0, 2.75]);
    }

    #[test]
    fn scalar_operands_with_any_width() {
        fn single<W: LaneLayout<f32>>() {
            let a = Quaternion::<f32, W>::new(0.0, 2.0, 4.0, 6.0);
            let b = Quaternion::<f32, W>::new(2.0, 2.0, 2.0, 2.0);
            assert_eq!(a.lerp(b, 0.5f32).to_array(), [1.0, 2.0, 3.0, 4.0]);
            assert_eq!(a.lerp_fused(2.0f32, 0.5f32).to_array(), [1.0, 2.0, 3.0, 4.0]);
        }

        fn double<W: LaneLayout<f64>>() {
            let a = Quaternion::<f64, W>::default();
            assert_eq!(a.lerp(8.0f64, 0.25f64).to_array(), [2.0, 2.0, 2.0, 2.75]);
        }

        single::<Bits64>();
        single::<Bits128>();
        single::<Bits256>();
        single::<Bits512>();
        double::<Bits128>();
        double::<Bits256>();
        double::<Bits512>();
    }

    #[test]
    fn register_operands() {
        let a = Quaternion::<f32, Bits128>::identity();
        let b = F32x4::setr(&[1.0, 1.0, 1.0, 1.0]);
        let t = F32x4::setr(&[0.0, 0.5, 1.0, 0.0]);
        assert_eq!(a.lerp(b, t).to_array(), [0.0, 0.5, 1.0, 1.0]);

        let a = Quaternion::<f32, Bits64>::identity();
        let b = [F32x2::splat(4.0), F32x2::splat(4.0)];
        assert_eq!(a.lerp_fused(b, 0.5f32).to_array(), [2.0, 2.0, 2.0, 2.5]);
    }
}
