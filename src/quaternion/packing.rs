use core::fmt::Debug;

use super::{Conjugate, EulerPacking, HamiltonProduct, LaneCompare, Reduce};
use crate::simd::SimdRegister;

/// Scalar held in the registers of a packing.
pub type ScalarOf<P> = <<P as Storage>::Register as SimdRegister>::Scalar;

/// The two ways four components can be laid out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Shape {
    /// `x, y, z, w` in lanes 0 to 3 of one register.
    Single,
    /// `x, y` in one register and `z, w` in another.
    Pair,
}

/// Register storage for the four components of a quaternion.
///
/// Implemented by [`Single`] and [`Pair`] only.
pub trait Storage: Copy + Debug + crate::Internal {
    /// The register components are stored in.
    type Register: SimdRegister;

    /// Layout tag.
    const SHAPE: Shape;

    /// Number of registers held.
    const REGISTERS: usize;

    /// Packs `[x, y, z, w]`; padding lanes are zero.
    fn from_array(components: [ScalarOf<Self>; 4]) -> Self;

    /// Unpacks `[x, y, z, w]`, dropping padding lanes.
    fn to_array(self) -> [ScalarOf<Self>; 4];

    /// Reads `[x, y, z, w]` from memory.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for reads of four consecutive scalars. Nothing past
    /// the fourth scalar is read.
    unsafe fn load(ptr: *const ScalarOf<Self>) -> Self;

    /// Writes `[x, y, z, w]` to memory.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for writes of four consecutive scalars. Nothing past
    /// the fourth scalar is written.
    unsafe fn store(self, ptr: *mut ScalarOf<Self>);

    /// Copies `register` into every register slot.
    fn broadcast(register: Self::Register) -> Self;

    /// Applies `op` to every register.
    #[must_use]
    fn map(self, op: impl Fn(Self::Register) -> Self::Register) -> Self;

    /// Applies `op` to matching registers of `self` and `rhs`.
    #[must_use]
    fn zip(self, rhs: Self, op: impl Fn(Self::Register, Self::Register) -> Self::Register)
        -> Self;
}

/// Everything a packing shape must implement to back a [`super::Quaternion`].
pub trait Packing: Storage + HamiltonProduct + Reduce + Conjugate + EulerPacking + LaneCompare {}

impl<P> Packing for P where
    P: Storage + HamiltonProduct + Reduce + Conjugate + EulerPacking + LaneCompare
{
}

/// All four components in one register of at least four lanes.
///
/// Lanes past index 3 are padding. They start out zero, may hold anything
/// after arithmetic, and are masked out of every reduction and comparison.
///
/// A register of fewer than four lanes is rejected at compile time:
///
/// ```compile_fail
/// use quat_simd::quaternion::Storage;
/// use quat_simd::simd::{F32x2, SimdRegister};
/// use quat_simd::Single;
///
/// let _ = Single(F32x2::splat(1.0)).to_array();
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Single<R>(pub R);

/// Components split over two 2-lane registers.
#[derive(Clone, Copy, Debug)]
pub struct Pair<R> {
    /// `x` in lane 0, `y` in lane 1.
    pub xy: R,
    /// `z` in lane 0, `w` in lane 1.
    pub zw: R,
}

impl<R> crate::Internal for Single<R> {}
impl<R> crate::Internal for Pair<R> {}

impl<R: SimdRegister> Storage for Single<R> {
    type Register = R;

    const SHAPE: Shape = Shape::Single;
    const REGISTERS: usize = 1;

    #[inline(always)]
    fn from_array(components: [R::Scalar; 4]) -> Self {
        const {
            assert!(R::LANES >= 4, "a single register needs at least four lanes");
        }

        Self(R::setr(&components))
    }

    #[inline(always)]
    fn to_array(self) -> [R::Scalar; 4] {
        const {
            assert!(R::LANES >= 4, "a single register needs at least four lanes");
        }

        let lanes = self.0.to_array();
        let lanes = lanes.as_ref();
        [lanes[0], lanes[1], lanes[2], lanes[3]]
    }

    #[inline(always)]
    unsafe fn load(ptr: *const R::Scalar) -> Self {
        if R::LANES == 4 {
            // SAFETY: four lanes, four readable scalars.
            Self(unsafe { R::load(ptr) })
        } else {
            // SAFETY: the caller guarantees four readable scalars.
            Self::from_array(unsafe { ptr.cast::<[R::Scalar; 4]>().read_unaligned() })
        }
    }

    #[inline(always)]
    unsafe fn store(self, ptr: *mut R::Scalar) {
        if R::LANES == 4 {
            // SAFETY: four lanes, four writable scalars.
            unsafe { self.0.store(ptr) }
        } else {
            // SAFETY: the caller guarantees four writable scalars.
            unsafe { ptr.cast::<[R::Scalar; 4]>().write_unaligned(self.to_array()) }
        }
    }

    #[inline(always)]
    fn broadcast(register: R) -> Self {
        Self(register)
    }

    #[inline(always)]
    fn map(self, op: impl Fn(R) -> R) -> Self {
        Self(op(self.0))
    }

    #[inline(always)]
    fn zip(self, rhs: Self, op: impl Fn(R, R) -> R) -> Self {
        Self(op(self.0, rhs.0))
    }
}

impl<R: SimdRegister> Storage for Pair<R> {
    type Register = R;

    const SHAPE: Shape = Shape::Pair;
    const REGISTERS: usize = 2;

    #[inline(always)]
    fn from_array([x, y, z, w]: [R::Scalar; 4]) -> Self {
        const {
            assert!(R::LANES == 2, "a register pair needs exactly two lanes each");
        }

        Self {
            xy: R::setr(&[x, y]),
            zw: R::setr(&[z, w]),
        }
    }

    #[inline(always)]
    fn to_array(self) -> [R::Scalar; 4] {
        [self.xy.lane(0), self.xy.lane(1), self.zw.lane(0), self.zw.lane(1)]
    }

    #[inline(always)]
    unsafe fn load(ptr: *const R::Scalar) -> Self {
        const {
            assert!(R::LANES == 2, "a register pair needs exactly two lanes each");
        }

        // SAFETY: the caller guarantees four readable scalars, two per register.
        unsafe {
            Self {
                xy: R::load(ptr),
                zw: R::load(ptr.add(2)),
            }
        }
    }

    #[inline(always)]
    unsafe fn store(self, ptr: *mut R::Scalar) {
        const {
            assert!(R::LANES == 2, "a register pair needs exactly two lanes each");
        }

        // SAFETY: the caller guarantees four writable scalars, two per register.
        unsafe {
            self.xy.store(ptr);
            self.zw.store(ptr.add(2));
        }
    }

    #[inline(always)]
    fn broadcast(register: R) -> Self {
        Self {
            xy: register,
            zw: register,
        }
    }

    #[inline(always)]
    fn map(self, op: impl Fn(R) -> R) -> Self {
        Self {
            xy: op(self.xy),
            zw: op(self.zw),
        }
    }

    #[inline(always)]
    fn zip(self, rhs: Self, op: impl Fn(R, R) -> R) -> Self {
        Self {
            xy: op(self.xy, rhs.xy),
            zw: op(self.zw, rhs.zw),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simd::{F32x2, F32x8, F64x4};

    #[test]
    fn single_keeps_padding_zeroed() {
        let packed = Single::<F32x8>::from_array([1.0, 2.0, 3.0, 4.0]);
        assert_eq!(packed.0.to_array(), [1.0, 2.0, 3.0, 4.0, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(packed.to_array(), [1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn pair_splits_components() {
        let packed = Pair::<F32x2>::from_array([1.0, 2.0, 3.0, 4.0]);
        assert_eq!(packed.xy.to_array(), [1.0, 2.0]);
        assert_eq!(packed.zw.to_array(), [3.0, 4.0]);
        assert_eq!(packed.to_array(), [1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn load_never_reads_past_four_scalars() {
        let memory = [1.0f32, 2.0, 3.0, 4.0];
        let wide = unsafe { Single::<F32x8>::load(memory.as_ptr()) };
        assert_eq!(wide.to_array(), memory);

        let pair = unsafe { Pair::<F32x2>::load(memory.as_ptr()) };
        assert_eq!(pair.to_array(), memory);

        let doubles = [5.0f64, 6.0, 7.0, 8.0];
        let exact = unsafe { Single::<F64x4>::load(doubles.as_ptr()) };
        assert_eq!(exact.to_array(), doubles);
    }

    #[test]
    fn store_never_writes_past_four_scalars() {
        let mut memory = [-1.0f32; 6];
        unsafe { Single::<F32x8>::from_array([1.0, 2.0, 3.0, 4.0]).store(memory.as_mut_ptr()) };
        assert_eq!(memory, [1.0, 2.0, 3.0, 4.0, -1.0, -1.0]);

        let mut memory = [-1.0f32; 6];
        unsafe { Pair::<F32x2>::from_array([1.0, 2.0, 3.0, 4.0]).store(memory.as_mut_ptr().add(1)) };
        assert_eq!(memory, [-1.0, 1.0, 2.0, 3.0, 4.0, -1.0]);

        let mut memory = [0.0f64; 5];
        unsafe { Single::<F64x4>::from_array([5.0, 6.0, 7.0, 8.0]).store(memory.as_mut_ptr()) };
        assert_eq!(memory, [5.0, 6.0, 7.0, 8.0, 0.0]);
    }

    #[test]
    fn map_and_zip_touch_every_register() {
        let a = Pair::<F32x2>::from_array([1.0, 2.0, 3.0, 4.0]);
        let b = Pair::<F32x2>::broadcast(F32x2::splat(10.0));
        assert_eq!(a.zip(b, SimdRegister::add).to_array(), [11.0, 12.0, 13.0, 14.0]);
        assert_eq!(a.map(SimdRegister::neg).to_array(), [-1.0, -2.0, -3.0, -4.0]);
    }
}
