use num_traits::{One, Zero};

use super::{LaneLayout, Pair, Quaternion, ScalarOf, Single, Storage};
use crate::simd::{SimdFloat, SimdRegister};

/// Rotation from half angles, evaluated in registers.
///
/// Roll, pitch and yaw are applied in intrinsic ZYX order.
pub trait EulerPacking: Storage {
    /// Builds the rotation whose roll, pitch and yaw halves are held in
    /// `half`, in the lanes `x`, `y` and `z` would occupy.
    #[must_use]
    fn from_half_angles(half: Self) -> Self;
}

impl<R: SimdRegister> EulerPacking for Single<R> {
    #[inline(always)]
    fn from_half_angles(half: Self) -> Self {
        let (s, c) = (half.0.sin(), half.0.cos());
        let (s0, c0) = (s.set_all_to_index::<0>(), c.set_all_to_index::<0>());
        let (s1, c1) = (s.set_all_to_index::<1>(), c.set_all_to_index::<1>());
        let (s2, c2) = (s.set_all_to_index::<2>(), c.set_all_to_index::<2>());

        // (sr cp cy, cr sp cy, cr cp sy, cr cp cy)
        let leading = c0
            .blend::<0b0001>(s0)
            .mul(c1.blend::<0b0010>(s1))
            .mul(c2.blend::<0b0100>(s2));

        // (cr sp sy, sr cp sy, sr sp cy, sr sp sy)
        let trailing = s0
            .blend::<0b0001>(c0)
            .mul(s1.blend::<0b0010>(c1))
            .mul(s2.blend::<0b0100>(c2));

        let one = <R::Scalar as One>::one();
        let sign = R::setr(&[-one, one, -one, one]);

        Self(trailing.fmadd(sign, leading))
    }
}

impl<R: SimdRegister> EulerPacking for Pair<R> {
    #[inline(always)]
    fn from_half_angles(half: Self) -> Self {
        let (s, c) = (half.xy.sin(), half.xy.cos());
        let yaw = half.zw.set_all_to_index::<0>();
        let (sy, cy) = (yaw.sin(), yaw.cos());

        let one = <R::Scalar as One>::one();
        let sign = R::setr(&[-one, one]);

        // (sr cp, sp cr) and (cr sp, cp sr)
        let sin_cos = s.mul(c.shuffle2::<1, 0>(c));
        let cos_sin = c.mul(s.shuffle2::<1, 0>(s));
        let xy = cos_sin.mul(sy).fmadd(sign, sin_cos.mul(cy));

        // (cr cp, cp cr) and (sr sp, sp sr)
        let cos_cos = c.mul(c.shuffle2::<1, 0>(c));
        let sin_sin = s.mul(s.shuffle2::<1, 0>(s));
        let zw = sin_sin
            .mul(cy.blend::<0b10>(sy))
            .fmadd(sign, cos_cos.mul(sy.blend::<0b10>(cy)));

        Self { xy, zw }
    }
}

/// Values accepted as `[roll, pitch, yaw]` by [`Quaternion::from_euler`].
///
/// Three scalars fit any packing. A register is taken as-is for a single
/// register packing, an array of two registers for a pair; lanes past the
/// third angle are ignored.
pub trait EulerAngles<P: Storage> {
    /// Places the angles in the `x, y, z` lanes of `P`.
    fn into_packed(self) -> P;
}

impl<P: Storage> EulerAngles<P> for [ScalarOf<P>; 3] {
    #[inline(always)]
    fn into_packed(self) -> P {
        let [roll, pitch, yaw] = self;
        P::from_array([roll, pitch, yaw, <ScalarOf<P> as Zero>::zero()])
    }
}

impl<R: SimdRegister> EulerAngles<Single<R>> for R {
    #[inline(always)]
    fn into_packed(self) -> Single<R> {
        Single(self)
    }
}

impl<R: SimdRegister> EulerAngles<Pair<R>> for [R; 2] {
    #[inline(always)]
    fn into_packed(self) -> Pair<R> {
        let [xy, zw] = self;
        Pair { xy, zw }
    }
}

impl<T: SimdFloat, W: LaneLayout<T>> Quaternion<T, W> {
    /// Builds a rotation from roll (`x`), pitch (`y`) and yaw (`z`) angles.
    ///
    /// Angles are applied in yaw, pitch, roll order (intrinsic ZYX). Set
    /// `RADIANS` to `false` to pass degrees, and `NORMALISE` to rescale the
    /// result to unit length.
    ///
    /// ```
    /// use quat_simd::{Bits128, Quaternion};
    ///
    /// let yaw = Quaternion::<f64, Bits128>::from_euler::<false, false>([0.0, 0.0, 90.0]);
    /// let [x, y, z] = yaw.rotate_vector([1.0, 0.0, 0.0]);
    /// assert!(x.abs() < 1e-12 && (y - 1.0).abs() < 1e-12 && z.abs() < 1e-12);
    /// ```
    #[inline]
    pub fn from_euler<const RADIANS: bool, const NORMALISE: bool>(
        angles: impl EulerAngles<W::Packing>,
    ) -> Self {
        let half = T::one() / (T::one() + T::one());
        let scale = if RADIANS { half } else { T::one().to_radians() * half };
        let scale = W::Register::splat(scale);

        let packed = angles.into_packed().map(|angles| angles.mul(scale));
        let rotation = Self::from_packed(W::Packing::from_half_angles(packed));

        if NORMALISE {
            rotation.unit()
        } else {
            rotation
        }
    }

    /// Converts a unit quaternion to `[roll, pitch, yaw]`.
    ///
    /// Pitch is pinned to `±π/2` once `|sin(pitch)|` is within `T::epsilon()`
    /// of one.
    #[inline]
    pub fn to_euler<const RADIANS: bool>(self) -> [T; 3] {
        self.to_euler_with::<RADIANS>(T::epsilon())
    }

    /// [`Quaternion::to_euler`] with an explicit gimbal lock band.
    #[inline]
    pub fn to_euler_with<const RADIANS: bool>(self, epsilon: T) -> [T; 3] {
        self.to_scalar().to_euler::<RADIANS>(epsilon)
    }

    /// [`Quaternion::to_euler_with`], converted to any type built from three angles.
    #[inline]
    pub fn to_euler_as<V: From<[T; 3]>, const RADIANS: bool>(self, epsilon: T) -> V {
        V::from(self.to_euler_with::<RADIANS>(epsilon))
    }
}

#[cfg(test)]
mod tests {
    use crate::quaternion::fixtures::{cast, for_all_layouts};
    use crate::quaternion::{Bits128, Bits256, Bits64, LaneLayout, Quaternion};
    use crate::scalar::ScalarQuaternion;
    use crate::simd::{F32x2, F32x4, SimdFloat, SimdRegister};
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn angle_sets<T: SimdFloat>() -> [[T; 3]; 4] {
        [
            [0.1, 0.2, 0.3],
            [-0.4, 0.5, 1.2],
            [2.5, -1.1, -2.9],
            [0.0, 0.0, 0.0],
        ]
        .map(|angles| angles.map(cast))
    }

    fn matches_scalar_construction<T: SimdFloat, W: LaneLayout<T>>() {
        let tolerance = T::epsilon() * cast(8.0);
        for angles in angle_sets::<T>() {
            let expected = ScalarQuaternion::from_euler::<true>(angles);
            let packed = Quaternion::<T, W>::from_euler::<true, false>(angles);
            assert_relative_eq!(packed.to_scalar(), expected, epsilon = tolerance);

            let degrees = angles.map(T::to_degrees);
            let expected = ScalarQuaternion::from_euler::<false>(degrees);
            let packed = Quaternion::<T, W>::from_euler::<false, false>(degrees);
            assert_relative_eq!(packed.to_scalar(), expected, epsilon = tolerance);
        }
    }

    fn round_trips<T: SimdFloat, W: LaneLayout<T>>() {
        let tolerance = T::epsilon() * cast(64.0);
        for angles in angle_sets::<T>() {
            let q = Quaternion::<T, W>::from_euler::<true, true>(angles);
            let back = q.to_euler::<true>();
            for (got, want) in back.into_iter().zip(angles) {
                assert_abs_diff_eq!(got, want, epsilon = tolerance);
            }

            let degrees = angles.map(T::to_degrees);
            let q = Quaternion::<T, W>::from_euler::<false, true>(degrees);
            let back = q.to_euler::<false>();
            for (got, want) in back.into_iter().zip(degrees) {
                assert_abs_diff_eq!(got, want, epsilon = tolerance * cast(180.0));
            }
        }
    }

    fn gimbal_lock_pins_pitch<T: SimdFloat, W: LaneLayout<T>>() {
        let q = Quaternion::<T, W>::from_euler::<true, true>([T::zero(), T::FRAC_PI_2(), T::zero()]);
        let [_, pitch, _] = q.to_euler_with::<true>(cast(1e-4));
        assert_eq!(pitch, T::FRAC_PI_2());
    }

    mod layouts {
        use super::*;

        for_all_layouts!(matches_scalar_construction, round_trips, gimbal_lock_pins_pitch);
    }

    #[test]
    fn register_angles() {
        let angles = [0.3f32, -0.7, 1.9];
        let expected = Quaternion::<f32, Bits128>::from_euler::<true, false>(angles);

        let register = F32x4::setr(&[0.3, -0.7, 1.9, 123.0]);
        let from_register = Quaternion::<f32, Bits128>::from_euler::<true, false>(register);
        assert_eq!(from_register, expected);

        let registers = [F32x2::setr(&[0.3, -0.7]), F32x2::setr(&[1.9, -5.0])];
        let from_pair = Quaternion::<f32, Bits64>::from_euler::<true, false>(registers);
        assert_relative_eq!(from_pair.to_width::<Bits128>(), expected, epsilon = 1e-6);
    }

    #[test]
    fn custom_output_type() {
        struct Angles {
            yaw: f64,
        }

        impl From<[f64; 3]> for Angles {
            fn from([_, _, yaw]: [f64; 3]) -> Self {
                Self { yaw }
            }
        }

        let q = Quaternion::<f64, Bits256>::from_euler::<false, true>([0.0, 0.0, 45.0]);
        let angles: Angles = q.to_euler_as::<Angles, false>(f64::EPSILON);
        assert_relative_eq!(angles.yaw, 45.0, epsilon = 1e-12);
    }
}
