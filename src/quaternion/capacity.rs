use core::fmt::Debug;

use super::packing::{Pair, Single, Storage};
use crate::simd::{F32x16, F32x2, F32x4, F32x8, F64x2, F64x4, F64x8, SimdFloat, SimdRegister};

/// How four quaternion components spread over registers of a given width.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Capacity {
    /// Lanes in one register.
    pub elements_per_register: usize,
    /// Whether the last register carries lanes no component lives in.
    pub requires_partial_register: bool,
    /// Registers needed to hold four components.
    pub num_registers: usize,
    /// Lanes allocated in total, padding included.
    pub full_width_size: usize,
}

impl Capacity {
    /// Capacity of `register_bits` wide registers holding `scalar_bits` wide scalars.
    ///
    /// # Panics
    ///
    /// Panics (at compile time, when used in a constant) if a register cannot
    /// hold a single scalar.
    pub const fn new(register_bits: usize, scalar_bits: usize) -> Self {
        assert!(
            scalar_bits > 0 && register_bits >= scalar_bits,
            "register narrower than its scalar"
        );

        let elements_per_register = register_bits / scalar_bits;
        let num_registers = 4usize.div_ceil(elements_per_register);

        Self {
            elements_per_register,
            requires_partial_register: 4 % elements_per_register != 0,
            num_registers,
            full_width_size: elements_per_register * num_registers,
        }
    }

    /// Capacity of a `W` register holding `T` lanes.
    pub const fn of<T: SimdFloat, W: RegisterWidth>() -> Self {
        Self::new(W::BITS, <T as SimdFloat>::BITS)
    }
}

/// Marker for a physical register width.
pub trait RegisterWidth: Copy + Debug + Default + crate::Internal {
    /// Data-path width in bits.
    const BITS: usize;
}

macro_rules! register_width {
    ($name:ident, $bits:literal, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
        pub struct $name;

        impl crate::Internal for $name {}

        impl RegisterWidth for $name {
            const BITS: usize = $bits;
        }
    };
}

register_width!(Bits64, 64, "64-bit registers, two `f32` lanes.");
register_width!(Bits128, 128, "128-bit registers, as SSE and NEON provide.");
register_width!(Bits256, 256, "256-bit registers, as AVX provides.");
register_width!(Bits512, 512, "512-bit registers, as AVX-512 provides.");

/// Binds a scalar and a register width to a concrete register and packing shape.
///
/// Implemented for every supported combination; any other combination is
/// rejected by the type checker.
///
/// | scalar | width | register | packing |
/// |--------|-------|----------|---------|
/// | `f32`  | 64    | [`F32x2`]  | [`Pair`]   |
/// | `f32`  | 128   | [`F32x4`]  | [`Single`] |
/// | `f32`  | 256   | [`F32x8`]  | [`Single`] |
/// | `f32`  | 512   | [`F32x16`] | [`Single`] |
/// | `f64`  | 128   | [`F64x2`]  | [`Pair`]   |
/// | `f64`  | 256   | [`F64x4`]  | [`Single`] |
/// | `f64`  | 512   | [`F64x8`]  | [`Single`] |
pub trait LaneLayout<T: SimdFloat>: RegisterWidth {
    /// Register type with `Self::BITS` bits of `T` lanes.
    type Register: SimdRegister<Scalar = T>;

    /// How the four components are packed into [`LaneLayout::Register`].
    type Packing: super::Packing<Register = Self::Register>;

    /// Capacity of this combination.
    const CAPACITY: Capacity = Capacity::of::<T, Self>();
}

macro_rules! impl_lane_layout {
    ($width:ty, $scalar:ty => $register:ty, $packing:ident) => {
        impl LaneLayout<$scalar> for $width {
            type Register = $register;
            type Packing = $packing<$register>;
        }

        const _: () = {
            let capacity = <$width as LaneLayout<$scalar>>::CAPACITY;
            assert!(
                <$register as SimdRegister>::LANES == capacity.elements_per_register,
                "register lane count disagrees with its width"
            );
            assert!(
                <$packing<$register> as Storage>::REGISTERS == capacity.num_registers,
                "packing shape disagrees with the register count"
            );
        };
    };
}

impl_lane_layout!(Bits64, f32 => F32x2, Pair);
impl_lane_layout!(Bits128, f32 => F32x4, Single);
impl_lane_layout!(Bits256, f32 => F32x8, Single);
impl_lane_layout!(Bits512, f32 => F32x16, Single);
impl_lane_layout!(Bits128, f64 => F64x2, Pair);
impl_lane_layout!(Bits256, f64 => F64x4, Single);
impl_lane_layout!(Bits512, f64 => F64x8, Single);

/// The widest register width the target enables, never below 128 bits.
#[cfg(all(target_arch = "x86_64", target_feature = "avx512f"))]
pub type NativeWidth = Bits512;
/// The widest register width the target enables, never below 128 bits.
#[cfg(all(
    target_arch = "x86_64",
    target_feature = "avx",
    not(target_feature = "avx512f")
))]
pub type NativeWidth = Bits256;
/// The widest register width the target enables, never below 128 bits.
#[cfg(not(all(target_arch = "x86_64", target_feature = "avx")))]
pub type NativeWidth = Bits128;
