use core::ops::{Mul, MulAssign};

use super::{LaneLayout, Pair, Quaternion, Single, Storage};
use crate::simd::{SimdFloat, SimdRegister};

/// The Hamilton product of two packed quaternions.
///
/// ```text
/// x = w1 x2 + x1 w2 + y1 z2 - z1 y2
/// y = w1 y2 - x1 z2 + y1 w2 + z1 x2
/// z = w1 z2 + x1 y2 - y1 x2 + z1 w2
/// w = w1 w2 - x1 x2 - y1 y2 - z1 z2
/// ```
pub trait HamiltonProduct: Storage {
    /// Computes `self * rhs`.
    #[must_use]
    fn hamilton(self, rhs: Self) -> Self;

    /// Replaces `self` with `self * rhs`.
    fn hamilton_assign(&mut self, rhs: Self);
}

impl<R: SimdRegister> Single<R> {
    /// Hamilton product of two single-register quaternions, registers only.
    ///
    /// Padding lanes of the result are unspecified.
    #[inline(always)]
    pub fn multiply_registers(lhs: R, rhs: R) -> R {
        // (y1 z2 - z1 y2, z1 x2 - x1 z2, x1 y2 - y1 x2)
        let cross = lhs.shuffle::<1, 2, 0, 3>().fmsub(
            rhs.shuffle::<2, 0, 1, 3>(),
            lhs.shuffle::<2, 0, 1, 3>().mul(rhs.shuffle::<1, 2, 0, 3>()),
        );

        let lhs_w = lhs.set_all_to_index::<3>();
        let rhs_w = rhs.set_all_to_index::<3>();

        let xyz = lhs_w.fmadd(rhs, cross);
        let xyz = lhs.fmadd(rhs_w, xyz);

        let dot = lhs.mul(rhs).and_index_mask::<0b0111>().horizontal_sum_fill();
        let w = lhs_w.fmsub(rhs_w, dot);

        xyz.blend::<0b1000>(w)
    }
}

impl<R: SimdRegister> HamiltonProduct for Single<R> {
    #[inline(always)]
    fn hamilton(self, rhs: Self) -> Self {
        Self(Self::multiply_registers(self.0, rhs.0))
    }

    #[inline(always)]
    fn hamilton_assign(&mut self, rhs: Self) {
        self.0 = Self::multiply_registers(self.0, rhs.0);
    }
}

impl<R: SimdRegister> HamiltonProduct for Pair<R> {
    #[inline(always)]
    fn hamilton(self, rhs: Self) -> Self {
        let Self { xy: lxy, zw: lzw } = self;
        let Self { xy: rxy, zw: rzw } = rhs;

        let lhs_w = lzw.set_all_to_index::<1>();
        let rhs_w = rzw.set_all_to_index::<1>();

        // (y1 z2 - z1 y2, z1 x2 - x1 z2)
        let cross = lxy.shuffle2::<1, 0>(lzw).fmsub(
            rzw.shuffle2::<0, 0>(rxy),
            lzw.shuffle2::<0, 0>(lxy).mul(rxy.shuffle2::<1, 0>(rzw)),
        );

        let xy = lxy.fmadd(rhs_w, cross);
        let xy = lhs_w.fmadd(rxy, xy);

        let sign = R::setr(&[
            <R::Scalar as num_traits::One>::one(),
            -<R::Scalar as num_traits::One>::one(),
        ]);

        // (x1 y2 - y1 x2, -x1 x2 - y1 y2)
        let swapped = lxy.mul(rxy.shuffle2::<1, 0>(rxy));
        let parallel = lxy.mul(rxy);
        let tail = swapped
            .shuffle2::<0, 0>(parallel)
            .fmsub(sign, swapped.shuffle2::<1, 1>(parallel));

        // (z1 w2, -z1 z2)
        let lhs_z = lzw.set_all_to_index::<0>();
        let head = lhs_z.mul(rzw.shuffle2::<1, 0>(rzw).mul(sign));

        let zw = lhs_w.fmadd(rzw, head).add(tail);

        Self { xy, zw }
    }

    #[inline(always)]
    fn hamilton_assign(&mut self, rhs: Self) {
        *self = self.hamilton(rhs);
    }
}

impl<T: SimdFloat, W: LaneLayout<T>> Mul for Quaternion<T, W> {
    type Output = Self;

    /// The Hamilton product.
    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        Self::from_packed(self.packed.hamilton(rhs.packed))
    }
}

impl<T: SimdFloat, W: LaneLayout<T>> MulAssign for Quaternion<T, W> {
    #[inline(always)]
    fn mul_assign(&mut self, rhs: Self) {
        self.packed.hamilton_assign(rhs.packed);
    }
}

impl<T: SimdFloat, W: LaneLayout<T>> Quaternion<T, W> {
    /// Rotates `vector` by this quaternion, `q v q*`.
    ///
    /// Only meaningful for unit quaternions.
    pub fn rotate_vector(self, [x, y, z]: [T; 3]) -> [T; 3] {
        let pure = Self::new(x, y, z, T::zero());
        let [x, y, z, _] = (self * pure * self.conjugate()).to_array();
        [x, y, z]
    }
}

#[cfg(test)]
mod tests {
    use crate::quaternion::fixtures::{cast, for_all_layouts, samples};
    use crate::quaternion::{Bits256, LaneLayout, Quaternion};
    use crate::scalar::ScalarQuaternion;
    use crate::simd::SimdFloat;
    use approx::assert_relative_eq;

    fn basis_identities<T: SimdFloat, W: LaneLayout<T>>() {
        let (o, l) = (T::zero(), T::one());
        let i = Quaternion::<T, W>::new(l, o, o, o);
        let j = Quaternion::<T, W>::new(o, l, o, o);
        let k = Quaternion::<T, W>::new(o, o, l, o);

        assert_eq!((i * j).to_array(), [o, o, l, o]);
        assert_eq!((j * k).to_array(), [l, o, o, o]);
        assert_eq!((k * i).to_array(), [o, l, o, o]);
        assert_eq!((j * i).to_array(), [o, o, -l, o]);
        assert_eq!((i * i).to_array(), [o, o, o, -l]);
    }

    fn identity_is_neutral<T: SimdFloat, W: LaneLayout<T>>() {
        let identity = Quaternion::<T, W>::identity();
        for sample in samples::<T>() {
            let q = Quaternion::<T, W>::from_array(sample);
            assert_eq!(q * identity, q);
            assert_eq!(identity * q, q);
        }
    }

    fn matches_scalar_product<T: SimdFloat, W: LaneLayout<T>>() {
        for a in samples::<T>() {
            for b in samples::<T>() {
                let packed = Quaternion::<T, W>::from_array(a) * Quaternion::<T, W>::from_array(b);
                let scalar = ScalarQuaternion::from_array(a) * ScalarQuaternion::from_array(b);
                assert_relative_eq!(
                    packed.to_scalar(),
                    scalar,
                    epsilon = T::epsilon() * cast(64.0),
                    max_relative = T::epsilon() * cast(16.0)
                );
            }
        }
    }

    fn assign_matches_product<T: SimdFloat, W: LaneLayout<T>>() {
        let [a, b, ..] = samples::<T>().map(Quaternion::<T, W>::from_array);
        let mut c = a;
        c *= b;
        assert_eq!(c, a * b);
    }

    mod layouts {
        use super::*;

        for_all_layouts!(
            basis_identities,
            identity_is_neutral,
            matches_scalar_product,
            assign_matches_product,
        );
    }

    #[test]
    fn rotates_vectors() {
        let quarter_turn = Quaternion::<f64, Bits256>::from_axis_angle(
            [0.0, 0.0, 1.0],
            core::f64::consts::FRAC_PI_2,
        );
        let [x, y, z] = quarter_turn.rotate_vector([1.0, 0.0, 0.0]);
        assert_relative_eq!(x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(y, 1.0, epsilon = 1e-12);
        assert_relative_eq!(z, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn register_fast_path() {
        use crate::quaternion::Single;
        use crate::simd::{F32x4, SimdRegister};

        let i = F32x4::setr(&[1.0, 0.0, 0.0, 0.0]);
        let j = F32x4::setr(&[0.0, 1.0, 0.0, 0.0]);
        assert_eq!(
            Single::multiply_registers(i, j).to_array(),
            [0.0, 0.0, 1.0, 0.0]
        );
    }
}
