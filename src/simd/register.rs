use core::fmt::Debug;

use num_traits::{Float, Zero};

use crate::scalar::{ArrayOf, SupersetOf};
use crate::simd::SimdFloat;

/// A single fixed-width vector register of floating point lanes.
///
/// This is the only surface quaternion code uses to touch register contents.
/// Implementors provide construction, memory transfer and the four basic
/// arithmetic operations; everything else is expressed lane by lane on top of
/// them and is free to be overridden by an accelerated backend.
///
/// Lane indices given as const parameters are checked at compile time, so a
/// shuffle or broadcast reaching past [`SimdRegister::LANES`] is a build error
/// rather than a runtime panic.
///
/// Every register can be built from its scalar by broadcast, so a bare
/// scalar is accepted wherever a register operand is.
pub trait SimdRegister:
    Copy + Debug + PartialEq + Default + SupersetOf<<Self as SimdRegister>::Scalar> + crate::Internal
{
    /// The scalar stored in every lane.
    type Scalar: SimdFloat;

    /// Plain array with exactly one element per lane.
    type Array: Copy
        + Debug
        + AsRef<[Self::Scalar]>
        + AsMut<[Self::Scalar]>
        + ArrayOf<Self::Scalar>;

    /// Number of lanes.
    const LANES: usize;

    /// Width of the register in bits.
    const BITS: usize = Self::LANES * <Self::Scalar as SimdFloat>::BITS;

    /// Builds a register from one element per lane.
    fn from_array(array: Self::Array) -> Self;

    /// Copies the lanes out into a plain array.
    fn to_array(self) -> Self::Array;

    /// Broadcasts `value` into every lane.
    fn splat(value: Self::Scalar) -> Self;

    /// Reads [`SimdRegister::LANES`] scalars starting at `ptr`.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for reads of `LANES` consecutive scalars. No
    /// alignment beyond that of the scalar is required.
    unsafe fn load(ptr: *const Self::Scalar) -> Self;

    /// Writes [`SimdRegister::LANES`] scalars starting at `ptr`.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for writes of `LANES` consecutive scalars. No
    /// alignment beyond that of the scalar is required.
    unsafe fn store(self, ptr: *mut Self::Scalar);

    /// Adds `self + rhs` lane by lane.
    #[must_use]
    fn add(self, rhs: Self) -> Self;

    /// Subtracts `self - rhs` lane by lane.
    #[must_use]
    fn sub(self, rhs: Self) -> Self;

    /// Multiplies `self * rhs` lane by lane.
    #[must_use]
    fn mul(self, rhs: Self) -> Self;

    /// Divides `self / rhs` lane by lane.
    #[must_use]
    fn div(self, rhs: Self) -> Self;

    /// A register with every lane set to zero.
    #[inline(always)]
    fn setzero() -> Self {
        Self::splat(<Self::Scalar as Zero>::zero())
    }

    /// Builds a register with `values[0]` in lane 0, `values[1]` in lane 1, etc.
    ///
    /// Lanes past the end of `values` are zero; values past the last lane are
    /// ignored.
    #[inline(always)]
    fn setr(values: &[Self::Scalar]) -> Self {
        Self::from_array(<Self::Array as ArrayOf<Self::Scalar>>::pad_to(values))
    }

    /// Builds a register with the *last* element of `values` in lane 0.
    ///
    /// Mirrors the argument order of the hardware `set` intrinsics.
    #[inline(always)]
    fn set(values: &[Self::Scalar]) -> Self {
        let mut array = <Self::Array as ArrayOf<Self::Scalar>>::pad_to(&[]);
        for (lane, &value) in array.as_mut().iter_mut().zip(values.iter().rev()) {
            *lane = value;
        }
        Self::from_array(array)
    }

    /// Reads the scalar held in lane `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= LANES`.
    #[inline(always)]
    fn lane(self, index: usize) -> Self::Scalar {
        self.to_array().as_ref()[index]
    }

    /// Computes `self * b + c` with a single rounding per lane.
    #[must_use]
    #[inline(always)]
    fn fmadd(self, b: Self, c: Self) -> Self {
        zip3(self, b, c, |a, b, c| a.mul_add(b, c))
    }

    /// Computes `self * b - c` with a single rounding per lane.
    #[must_use]
    #[inline(always)]
    fn fmsub(self, b: Self, c: Self) -> Self {
        zip3(self, b, c, |a, b, c| a.mul_add(b, -c))
    }

    /// Computes the negation of every lane.
    ///
    /// Formula: `-self`
    #[must_use]
    #[inline(always)]
    fn neg(self) -> Self {
        map(self, |lane| -lane)
    }

    /// Computes the multiplicative inverse of every lane.
    ///
    /// Formula: `1 / self`
    #[must_use]
    #[inline(always)]
    fn recip(self) -> Self {
        Self::splat(<Self::Scalar as num_traits::One>::one()).div(self)
    }

    /// Absolute value of every lane.
    #[must_use]
    #[inline(always)]
    fn abs(self) -> Self {
        map(self, Float::abs)
    }

    /// Square root of every lane.
    #[must_use]
    #[inline(always)]
    fn sqrt(self) -> Self {
        map(self, Float::sqrt)
    }

    /// Sine of every lane, in radians.
    #[must_use]
    #[inline(always)]
    fn sin(self) -> Self {
        map(self, Float::sin)
    }

    /// Cosine of every lane, in radians.
    #[must_use]
    #[inline(always)]
    fn cos(self) -> Self {
        map(self, Float::cos)
    }

    /// Reorders the first four lanes so that lane `n` holds `self[In]`.
    ///
    /// Lanes from index 4 onwards are left untouched. On registers with fewer
    /// than four lanes only the leading indices are used.
    #[must_use]
    #[inline(always)]
    fn shuffle<const I0: usize, const I1: usize, const I2: usize, const I3: usize>(self) -> Self {
        const {
            assert!(
                I0 < Self::LANES && I1 < Self::LANES && I2 < Self::LANES && I3 < Self::LANES,
                "shuffle index out of range for register"
            );
        }

        let source = self.to_array();
        let mut out = source;
        for (lane, index) in out.as_mut().iter_mut().zip([I0, I1, I2, I3]) {
            *lane = source.as_ref()[index];
        }
        Self::from_array(out)
    }

    /// Two-source shuffle: lane 0 takes `self[I0]`, lane 1 takes `other[I1]`.
    ///
    /// Remaining lanes are copied from `self`.
    #[must_use]
    #[inline(always)]
    fn shuffle2<const I0: usize, const I1: usize>(self, other: Self) -> Self {
        const {
            assert!(
                Self::LANES >= 2 && I0 < Self::LANES && I1 < Self::LANES,
                "shuffle index out of range for register"
            );
        }

        let (a, b) = (self.to_array(), other.to_array());
        let mut out = a;
        out.as_mut()[0] = a.as_ref()[I0];
        out.as_mut()[1] = b.as_ref()[I1];
        Self::from_array(out)
    }

    /// Selects lane `n` from `other` when bit `n` of `MASK` is set, else from `self`.
    #[must_use]
    #[inline(always)]
    fn blend<const MASK: u32>(self, other: Self) -> Self {
        let mut out = self.to_array();
        for (index, (lane, &replacement)) in out
            .as_mut()
            .iter_mut()
            .zip(other.to_array().as_ref())
            .enumerate()
        {
            if MASK & (1 << index) != 0 {
                *lane = replacement;
            }
        }
        Self::from_array(out)
    }

    /// Broadcasts the scalar held in lane `I` into every lane.
    #[must_use]
    #[inline(always)]
    fn set_all_to_index<const I: usize>(self) -> Self {
        const {
            assert!(I < Self::LANES, "broadcast index out of range for register");
        }

        Self::splat(self.to_array().as_ref()[I])
    }

    /// Keeps lane `n` when bit `n` of `MASK` is set and zeroes every other lane.
    ///
    /// Equivalent to a bitwise AND with an index mask of all-ones and all-zeros
    /// lanes, so a NaN in a masked lane still becomes `+0.0`.
    #[must_use]
    #[inline(always)]
    fn and_index_mask<const MASK: u32>(self) -> Self {
        let mut out = self.to_array();
        for (index, lane) in out.as_mut().iter_mut().enumerate() {
            if MASK & (1 << index) == 0 {
                *lane = <Self::Scalar as Zero>::zero();
            }
        }
        Self::from_array(out)
    }

    /// Sums every lane into a single scalar.
    ///
    /// The reduction is pairwise (`v[i] + v[i + LANES / 2]`, halving each step),
    /// so zeroed upper lanes never change the rounding of the lower ones.
    #[inline(always)]
    fn horizontal_sum(self) -> Self::Scalar {
        const {
            assert!(Self::LANES.is_power_of_two(), "pairwise sum needs a power of two lanes");
        }

        let mut lanes = self.to_array();
        let values = lanes.as_mut();
        let mut width = values.len();
        while width > 1 {
            width /= 2;
            for index in 0..width {
                values[index] = values[index] + values[index + width];
            }
        }
        values[0]
    }

    /// Sums every lane and broadcasts the total back into every lane.
    #[must_use]
    #[inline(always)]
    fn horizontal_sum_fill(self) -> Self {
        Self::splat(self.horizontal_sum())
    }

    /// Bitmask with bit `n` set where lane `n` of `self` equals lane `n` of `rhs`.
    #[inline(always)]
    fn cmp_eq(self, rhs: Self) -> u32 {
        compare(self, rhs, |a, b| a == b)
    }

    /// Bitmask with bit `n` set where lane `n` of `self` is `<=` lane `n` of `rhs`.
    #[inline(always)]
    fn cmp_le(self, rhs: Self) -> u32 {
        compare(self, rhs, |a, b| a <= b)
    }
}

#[inline(always)]
fn map<R: SimdRegister>(register: R, op: impl Fn(R::Scalar) -> R::Scalar) -> R {
    let mut lanes = register.to_array();
    for lane in lanes.as_mut() {
        *lane = op(*lane);
    }
    R::from_array(lanes)
}

#[inline(always)]
fn zip3<R: SimdRegister>(
    a: R,
    b: R,
    c: R,
    op: impl Fn(R::Scalar, R::Scalar, R::Scalar) -> R::Scalar,
) -> R {
    let mut lanes = a.to_array();
    let (b, c) = (b.to_array(), c.to_array());
    for (index, lane) in lanes.as_mut().iter_mut().enumerate() {
        *lane = op(*lane, b.as_ref()[index], c.as_ref()[index]);
    }
    R::from_array(lanes)
}

#[inline(always)]
fn compare<R: SimdRegister>(a: R, b: R, op: impl Fn(R::Scalar, R::Scalar) -> bool) -> u32 {
    let (a, b) = (a.to_array(), b.to_array());
    a.as_ref()
        .iter()
        .zip(b.as_ref())
        .enumerate()
        .fold(0, |mask, (index, (&a, &b))| {
            if op(a, b) {
                mask | (1 << index)
            } else {
                mask
            }
        })
}
