use num_traits::AsPrimitive;

use super::{LaneLayout, Quaternion, Storage};
use crate::scalar::ScalarQuaternion;
use crate::simd::SimdFloat;

impl<T: SimdFloat, W: LaneLayout<T>> Quaternion<T, W> {
    /// Copies `[x, y, z, w]` into the front of `out`.
    ///
    /// Only the first `min(N, 4)` components are written; the rest of `out`
    /// is left as it was.
    #[inline(always)]
    pub fn store<const N: usize>(&self, out: &mut [T; N]) {
        let components = self.to_array();
        let len = N.min(4);
        out[..len].copy_from_slice(&components[..len]);
    }

    /// [`Quaternion::store`] converting each component with `as`.
    #[inline(always)]
    pub fn store_cast<U, const N: usize>(&self, out: &mut [U; N])
    where
        U: Copy + 'static,
        T: AsPrimitive<U>,
    {
        for (slot, component) in out.iter_mut().zip(self.to_array()) {
            *slot = component.as_();
        }
    }

    /// Writes `[x, y, z, w]` to memory.
    ///
    /// Registers of exactly four lanes, and register pairs, are stored
    /// directly. Padding lanes are never written, so nothing past the fourth
    /// scalar is touched.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for writes of four consecutive `T`.
    #[inline(always)]
    pub unsafe fn store_ptr(&self, ptr: *mut T) {
        // SAFETY: forwarded from the caller.
        unsafe { self.packed.store(ptr) }
    }

    /// Overwrites `out` with the components.
    #[inline(always)]
    pub fn store_scalar(&self, out: &mut ScalarQuaternion<T>) {
        // SAFETY: `ScalarQuaternion` is `repr(C)` over four `T`.
        unsafe { self.store_ptr(out.as_mut_ptr()) }
    }

    /// Unpacks into the plain scalar representation.
    #[inline(always)]
    pub fn to_scalar(self) -> ScalarQuaternion<T> {
        ScalarQuaternion::from_array(self.to_array())
    }
}

impl<T: SimdFloat, W: LaneLayout<T>> From<Quaternion<T, W>> for ScalarQuaternion<T> {
    #[inline(always)]
    fn from(quaternion: Quaternion<T, W>) -> Self {
        quaternion.to_scalar()
    }
}

impl<T: SimdFloat, W: LaneLayout<T>> From<Quaternion<T, W>> for [T; 4] {
    #[inline(always)]
    fn from(quaternion: Quaternion<T, W>) -> Self {
        quaternion.packed.to_array()
    }
}
