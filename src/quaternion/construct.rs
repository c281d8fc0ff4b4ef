use core::array::TryFromSliceError;

use num_traits::AsPrimitive;

use super::{LaneLayout, Pair, Quaternion, Single, Storage};
use crate::scalar::ScalarQuaternion;
use crate::simd::SimdFloat;

impl<T: SimdFloat, W: LaneLayout<T>> Quaternion<T, W> {
    /// Packs `x i + y j + z k + w`.
    #[inline(always)]
    pub fn new(x: T, y: T, z: T, w: T) -> Self {
        Self::from_array([x, y, z, w])
    }

    /// The identity quaternion `(0, 0, 0, 1)`.
    #[inline(always)]
    pub fn identity() -> Self {
        Self::new(T::zero(), T::zero(), T::zero(), T::one())
    }

    /// Packs components of another numeric type, converting each with `as`.
    #[inline(always)]
    pub fn from_cast<U: AsPrimitive<T>>(x: U, y: U, z: U, w: U) -> Self {
        Self::new(x.as_(), y.as_(), z.as_(), w.as_())
    }

    /// Packs `[x, y, z, w]`.
    #[inline(always)]
    pub fn from_array(components: [T; 4]) -> Self {
        Self::from_packed(W::Packing::from_array(components))
    }

    /// Reads `[x, y, z, w]` from memory.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for reads of four consecutive `T`. It needs no
    /// alignment beyond that of `T` and nothing past the fourth scalar is read,
    /// whatever the register width.
    #[inline(always)]
    pub unsafe fn load(ptr: *const T) -> Self {
        // SAFETY: forwarded from the caller.
        Self::from_packed(unsafe { W::Packing::load(ptr) })
    }

    /// Wraps already packed registers.
    #[inline(always)]
    pub const fn from_packed(packed: W::Packing) -> Self {
        Self { packed }
    }

    /// Converts from the unpacked representation.
    #[inline(always)]
    pub fn from_scalar(quaternion: ScalarQuaternion<T>) -> Self {
        Self::from_array(quaternion.to_array())
    }

    /// Repacks the same components at another register width.
    #[inline(always)]
    pub fn to_width<V: LaneLayout<T>>(self) -> Quaternion<T, V> {
        Quaternion::from_array(self.to_array())
    }

    /// Rotation of `angle` radians about the unit vector `axis`.
    pub fn from_axis_angle([x, y, z]: [T; 3], angle: T) -> Self {
        let (sin, cos) = (angle / (T::one() + T::one())).sin_cos();
        Self::new(x * sin, y * sin, z * sin, cos)
    }
}

impl<T, W> Quaternion<T, W>
where
    T: SimdFloat,
    W: LaneLayout<T, Packing = Single<<W as LaneLayout<T>>::Register>>,
{
    /// Wraps a register holding `x, y, z, w` in lanes 0 to 3.
    ///
    /// Only exists where the quaternion fits one register; the register type
    /// must match the layout exactly.
    ///
    /// ```
    /// use quat_simd::{simd::{F32x8, SimdRegister}, Bits256, Quaternion};
    ///
    /// let q = Quaternion::<f32, Bits256>::from_register(F32x8::setr(&[1.0, 2.0, 3.0, 4.0]));
    /// assert_eq!(q.to_array(), [1.0, 2.0, 3.0, 4.0]);
    /// ```
    ///
    /// A register of another width is rejected:
    ///
    /// ```compile_fail
    /// use quat_simd::{simd::{F32x4, SimdRegister}, Bits256, Quaternion};
    ///
    /// let q = Quaternion::<f32, Bits256>::from_register(F32x4::splat(1.0));
    /// ```
    #[inline(always)]
    pub const fn from_register(register: W::Register) -> Self {
        Self::from_packed(Single(register))
    }
}

impl<T, W> Quaternion<T, W>
where
    T: SimdFloat,
    W: LaneLayout<T, Packing = Pair<<W as LaneLayout<T>>::Register>>,
{
    /// Wraps an `x, y` register and a `z, w` register.
    ///
    /// Only exists where the quaternion needs two registers.
    ///
    /// ```compile_fail
    /// use quat_simd::{simd::{F64x4, SimdRegister}, Bits256, Quaternion};
    ///
    /// let q = Quaternion::<f64, Bits256>::from_registers(F64x4::splat(1.0), F64x4::splat(1.0));
    /// ```
    #[inline(always)]
    pub const fn from_registers(xy: W::Register, zw: W::Register) -> Self {
        Self::from_packed(Pair { xy, zw })
    }
}

impl<T: SimdFloat, W: LaneLayout<T>> Default for Quaternion<T, W> {
    /// The identity quaternion.
    #[inline(always)]
    fn default() -> Self {
        Self::identity()
    }
}

impl<T: SimdFloat, W: LaneLayout<T>> From<[T; 4]> for Quaternion<T, W> {
    #[inline(always)]
    fn from(components: [T; 4]) -> Self {
        Self::from_array(components)
    }
}

impl<T: SimdFloat, W: LaneLayout<T>> From<ScalarQuaternion<T>> for Quaternion<T, W> {
    #[inline(always)]
    fn from(quaternion: ScalarQuaternion<T>) -> Self {
        Self::from_scalar(quaternion)
    }
}

impl<T: SimdFloat, W: LaneLayout<T>> TryFrom<&[T]> for Quaternion<T, W> {
    type Error = TryFromSliceError;

    /// Packs a slice of exactly four components.
    #[inline(always)]
    fn try_from(slice: &[T]) -> Result<Self, TryFromSliceError> {
        let components: [T; 4] = slice.try_into()?;
        Ok(Self::from_array(components))
    }
}
