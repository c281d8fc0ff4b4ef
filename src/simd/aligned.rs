use super::backend::{
    AlignedSimdOps, DoublePrecisionNoSimd, F32x4Backend, F32x8Backend, F64x2Backend, F64x4Backend,
    SinglePrecisionNoSimd,
};
use super::SimdRegister;
use crate::scalar::SupersetOf;

macro_rules! impl_register {
    ($name:ident, [$type:ident; $lanes:literal], align($align:literal), $backend:ty, $doc:expr) => {
        #[doc = $doc]
        #[repr(C, align($align))]
        #[derive(Clone, Copy, Debug, PartialEq, Default)]
        pub struct $name([$type; $lanes]);

        impl $name {
            /// Builds a register from one element per lane.
            #[inline(always)]
            pub const fn new(lanes: [$type; $lanes]) -> Self {
                Self(lanes)
            }

            /// Borrows the lanes as a plain array.
            #[inline(always)]
            pub const fn as_array(&self) -> &[$type; $lanes] {
                &self.0
            }
        }

        impl crate::Internal for $name {}

        impl SimdRegister for $name {
            type Scalar = $type;
            type Array = [$type; $lanes];

            const LANES: usize = $lanes;

            #[inline(always)]
            fn from_array(array: [$type; $lanes]) -> Self {
                Self(array)
            }

            #[inline(always)]
            fn to_array(self) -> [$type; $lanes] {
                self.0
            }

            #[inline(always)]
            fn splat(value: $type) -> Self {
                Self([value; $lanes])
            }

            #[inline(always)]
            unsafe fn load(ptr: *const $type) -> Self {
                // SAFETY: the caller guarantees `LANES` readable scalars.
                Self(unsafe { ptr.cast::<[$type; $lanes]>().read_unaligned() })
            }

            #[inline(always)]
            unsafe fn store(self, ptr: *mut $type) {
                // SAFETY: the caller guarantees `LANES` writable scalars.
                unsafe { ptr.cast::<[$type; $lanes]>().write_unaligned(self.0) }
            }

            #[inline(always)]
            fn add(self, rhs: Self) -> Self {
                // SAFETY: both arrays sit at offset 0 of a full-width aligned register.
                Self(unsafe { <$backend as AlignedSimdOps<[$type; $lanes]>>::simd_add(&self.0, &rhs.0) })
            }

            #[inline(always)]
            fn sub(self, rhs: Self) -> Self {
                // SAFETY: both arrays sit at offset 0 of a full-width aligned register.
                Self(unsafe { <$backend as AlignedSimdOps<[$type; $lanes]>>::simd_sub(&self.0, &rhs.0) })
            }

            #[inline(always)]
            fn mul(self, rhs: Self) -> Self {
                // SAFETY: both arrays sit at offset 0 of a full-width aligned register.
                Self(unsafe { <$backend as AlignedSimdOps<[$type; $lanes]>>::simd_mul(&self.0, &rhs.0) })
            }

            #[inline(always)]
            fn div(self, rhs: Self) -> Self {
                // SAFETY: both arrays sit at offset 0 of a full-width aligned register.
                Self(unsafe { <$backend as AlignedSimdOps<[$type; $lanes]>>::simd_div(&self.0, &rhs.0) })
            }
        }

        impl SupersetOf<$type> for $name {
            #[inline(always)]
            fn from_subset(scalar: $type) -> Self {
                Self::splat(scalar)
            }

            #[inline(always)]
            fn into_subset(self) -> $type {
                self.0[0]
            }
        }

        impl From<[$type; $lanes]> for $name {
            #[inline(always)]
            fn from(lanes: [$type; $lanes]) -> Self {
                Self(lanes)
            }
        }

        impl From<$name> for [$type; $lanes] {
            #[inline(always)]
            fn from(register: $name) -> Self {
                register.0
            }
        }
    };
}

impl_register!(
    F32x2,
    [f32; 2],
    align(8),
    SinglePrecisionNoSimd<2>,
    "
A 64-bit register of 2 32-bit floating point lanes.

Always backed by the lane-loop backend.
"
);

impl_register!(
    F32x4,
    [f32; 4],
    align(16),
    F32x4Backend,
    "
A 128-bit register of 4 32-bit floating point lanes.

Uses SSE or NEON arithmetic when the target enables it.
"
);

impl_register!(
    F32x8,
    [f32; 8],
    align(32),
    F32x8Backend,
    "
A 256-bit register of 8 32-bit floating point lanes.

Uses AVX arithmetic when the target enables it.
"
);

impl_register!(
    F32x16,
    [f32; 16],
    align(64),
    SinglePrecisionNoSimd<16>,
    "A 512-bit register of 16 32-bit floating point lanes."
);

impl_register!(
    F64x2,
    [f64; 2],
    align(16),
    F64x2Backend,
    "
A 128-bit register of 2 64-bit floating point lanes.

Uses SSE2 or NEON arithmetic when the target enables it.
"
);

impl_register!(
    F64x4,
    [f64; 4],
    align(32),
    F64x4Backend,
    "
A 256-bit register of 4 64-bit floating point lanes.

Uses AVX arithmetic when the target enables it.
"
);

impl_register!(
    F64x8,
    [f64; 8],
    align(64),
    DoublePrecisionNoSimd<8>,
    "A 512-bit register of 8 64-bit floating point lanes."
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widths_and_alignment() {
        assert_eq!(F32x2::BITS, 64);
        assert_eq!(F32x4::BITS, 128);
        assert_eq!(F32x16::BITS, 512);
        assert_eq!(F64x2::BITS, 128);
        assert_eq!(F64x8::BITS, 512);

        assert_eq!(core::mem::align_of::<F32x8>(), 32);
        assert_eq!(core::mem::size_of::<F64x8>(), 64);
        assert_eq!(core::mem::align_of::<F32x2>(), 8);
    }

    #[test]
    fn set_orders() {
        let forward = F32x4::setr(&[1.0, 2.0, 3.0, 4.0]);
        let reversed = F32x4::set(&[4.0, 3.0, 2.0, 1.0]);
        assert_eq!(forward, reversed);
        assert_eq!(forward.to_array(), [1.0, 2.0, 3.0, 4.0]);

        let padded = F32x8::setr(&[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(padded.to_array(), [1.0, 2.0, 3.0, 4.0, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(F64x2::setr(&[5.0, 6.0, 7.0]).to_array(), [5.0, 6.0]);
    }

    #[test]
    fn load_and_store_unaligned() {
        let source = [0.0f64, 1.0, 2.0, 3.0, 4.0];
        let register = unsafe { F64x4::load(source.as_ptr().add(1)) };
        assert_eq!(register.to_array(), [1.0, 2.0, 3.0, 4.0]);

        let mut out = [9.0f64; 5];
        unsafe { register.store(out.as_mut_ptr().add(1)) };
        assert_eq!(out, [9.0, 1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn arithmetic_matches_lanes() {
        let a = F32x8::new([1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
        let b = F32x8::splat(2.0);
        assert_eq!(a.add(b).to_array(), [3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0]);
        assert_eq!(a.sub(b).lane(7), 6.0);
        assert_eq!(a.mul(b).lane(3), 8.0);
        assert_eq!(a.div(b).lane(0), 0.5);
        assert_eq!(b.recip().lane(5), 0.5);
        assert_eq!(a.neg().lane(1), -2.0);

        let c = F64x2::new([3.0, -4.0]);
        assert_eq!(c.fmadd(c, F64x2::splat(1.0)).to_array(), [10.0, 17.0]);
        assert_eq!(c.fmsub(c, F64x2::splat(1.0)).to_array(), [8.0, 15.0]);
        assert_eq!(c.abs().to_array(), [3.0, 4.0]);
        assert_eq!(F64x2::splat(16.0).sqrt().to_array(), [4.0, 4.0]);
    }

    #[test]
    fn shuffles_and_broadcasts() {
        let a = F32x4::new([1.0, 2.0, 3.0, 4.0]);
        assert_eq!(a.shuffle::<1, 2, 0, 3>().to_array(), [2.0, 3.0, 1.0, 4.0]);
        assert_eq!(a.shuffle::<2, 0, 1, 3>().to_array(), [3.0, 1.0, 2.0, 4.0]);
        assert_eq!(a.set_all_to_index::<3>().to_array(), [4.0; 4]);

        let wide = F32x8::new([1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
        assert_eq!(
            wide.shuffle::<3, 2, 1, 0>().to_array(),
            [4.0, 3.0, 2.0, 1.0, 5.0, 6.0, 7.0, 8.0]
        );

        let xy = F64x2::new([1.0, 2.0]);
        let zw = F64x2::new([3.0, 4.0]);
        assert_eq!(xy.shuffle2::<1, 0>(zw).to_array(), [2.0, 3.0]);
        assert_eq!(zw.shuffle2::<0, 0>(xy).to_array(), [3.0, 1.0]);
    }

    #[test]
    fn blend_and_mask() {
        let a = F32x4::splat(1.0);
        let b = F32x4::splat(2.0);
        assert_eq!(a.blend::<0b1000>(b).to_array(), [1.0, 1.0, 1.0, 2.0]);
        assert_eq!(a.blend::<0b0101>(b).to_array(), [2.0, 1.0, 2.0, 1.0]);

        let noisy = F32x8::new([1.0, 2.0, 3.0, 4.0, f32::NAN, f32::INFINITY, -1.0, 7.0]);
        assert_eq!(
            noisy.and_index_mask::<0b1111>().to_array(),
            [1.0, 2.0, 3.0, 4.0, 0.0, 0.0, 0.0, 0.0]
        );
    }

    #[test]
    fn horizontal_reduction() {
        let a = F64x4::new([1.0, 2.0, 3.0, 4.0]);
        assert_eq!(a.horizontal_sum(), 10.0);
        assert_eq!(a.horizontal_sum_fill().to_array(), [10.0; 4]);

        let padded = F32x16::setr(&[0.1, 0.2, 0.3, 0.4]);
        let exact = F32x4::new([0.1, 0.2, 0.3, 0.4]);
        assert_eq!(padded.horizontal_sum(), exact.horizontal_sum());

        assert_eq!(F32x2::splat(1.0).horizontal_sum(), 2.0);
        assert_eq!(F32x8::splat(1.0).horizontal_sum(), 8.0);
        assert_eq!(F32x16::splat(1.0).horizontal_sum(), 16.0);
        assert_eq!(F64x2::splat(1.0).horizontal_sum(), 2.0);
        assert_eq!(F64x8::splat(1.0).horizontal_sum(), 8.0);
    }

    #[test]
    fn comparisons() {
        let a = F32x4::new([1.0, 2.0, 3.0, 4.0]);
        let b = F32x4::new([1.0, 5.0, 3.0, 0.0]);
        assert_eq!(a.cmp_eq(b), 0b0101);
        assert_eq!(a.cmp_le(b), 0b0111);
        assert_eq!(F64x8::splat(f64::NAN).cmp_eq(F64x8::splat(f64::NAN)), 0);
    }

    #[test]
    fn superset_broadcast() {
        let register = F64x8::from_subset(2.5);
        assert_eq!(register, F64x8::splat(2.5));
        assert_eq!(register.into_subset(), 2.5);
    }
}
