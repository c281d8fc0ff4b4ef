use core::ops::{Add, Mul, Neg, Sub};

use approx::{AbsDiffEq, RelativeEq};
use num_traits::{Float, FloatConst};

/// A quaternion stored as four plain scalar fields.
///
/// This is the interchange format between packed quaternions and code that
/// does not know about registers. The layout is guaranteed to be `x, y, z, w`
/// in memory, so [`ScalarQuaternion::as_ptr`] can be handed to anything that
/// reads four contiguous scalars.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ScalarQuaternion<T> {
    /// First imaginary component (`i`).
    pub x: T,
    /// Second imaginary component (`j`).
    pub y: T,
    /// Third imaginary component (`k`).
    pub z: T,
    /// Real component.
    pub w: T,
}

impl<T> ScalarQuaternion<T> {
    /// Builds a quaternion from its components.
    #[inline(always)]
    pub const fn new(x: T, y: T, z: T, w: T) -> Self {
        Self { x, y, z, w }
    }

    /// Pointer to the first of the four contiguous components.
    #[inline(always)]
    pub const fn as_ptr(&self) -> *const T {
        (self as *const Self).cast()
    }

    /// Mutable pointer to the first of the four contiguous components.
    #[inline(always)]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        (self as *mut Self).cast()
    }
}

impl<T: Copy> ScalarQuaternion<T> {
    /// Builds a quaternion from `[x, y, z, w]`.
    #[inline(always)]
    pub const fn from_array([x, y, z, w]: [T; 4]) -> Self {
        Self { x, y, z, w }
    }

    /// Copies the components out as `[x, y, z, w]`.
    #[inline(always)]
    pub const fn to_array(self) -> [T; 4] {
        [self.x, self.y, self.z, self.w]
    }
}

impl<T: Float> ScalarQuaternion<T> {
    /// The identity quaternion `(0, 0, 0, 1)`.
    #[inline(always)]
    pub fn identity() -> Self {
        Self::new(T::zero(), T::zero(), T::zero(), T::one())
    }

    /// Four-dimensional dot product.
    #[inline]
    pub fn dot(self, rhs: Self) -> T {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z + self.w * rhs.w
    }

    /// Negates the imaginary part.
    #[inline]
    #[must_use]
    pub fn conjugate(self) -> Self {
        Self::new(-self.x, -self.y, -self.z, self.w)
    }

    /// Sum of the squared components.
    #[inline]
    pub fn square_norm(self) -> T {
        self.dot(self)
    }

    /// Euclidean length.
    #[inline]
    pub fn norm(self) -> T {
        self.square_norm().sqrt()
    }

    /// Scales the quaternion to unit length.
    ///
    /// The result is NaN or infinite for a zero quaternion.
    #[inline]
    #[must_use]
    pub fn unit(self) -> Self {
        let norm = self.norm();
        Self::new(self.x / norm, self.y / norm, self.z / norm, self.w / norm)
    }

    /// Multiplicative inverse, the conjugate divided by the square norm.
    #[inline]
    #[must_use]
    pub fn inverse(self) -> Self {
        let square_norm = self.square_norm();
        let conjugate = self.conjugate();
        Self::new(
            conjugate.x / square_norm,
            conjugate.y / square_norm,
            conjugate.z / square_norm,
            conjugate.w / square_norm,
        )
    }

    /// Componentwise linear interpolation, `self * (1 - t) + rhs * t`.
    #[inline]
    #[must_use]
    pub fn lerp(self, rhs: Self, t: T) -> Self {
        self.weighted_sum(T::one() - t, rhs, t)
    }

    /// Spherical linear interpolation along the shorter arc.
    ///
    /// When the inputs point in opposite hemispheres `rhs` is negated first, so
    /// `t = 1` yields `-rhs` (the same rotation). Nearly parallel inputs use
    /// renormalised linear weights.
    #[inline]
    #[must_use]
    pub fn slerp(self, rhs: Self, t: T) -> Self {
        let (wa, wb) = slerp_weights(self.dot(rhs), t);
        self.weighted_sum(wa, rhs, wb)
    }

    #[inline(always)]
    fn weighted_sum(self, wa: T, rhs: Self, wb: T) -> Self {
        Self::new(
            self.x * wa + rhs.x * wb,
            self.y * wa + rhs.y * wb,
            self.z * wa + rhs.z * wb,
            self.w * wa + rhs.w * wb,
        )
    }
}

impl<T: Float + FloatConst> ScalarQuaternion<T> {
    /// Builds a rotation from roll (`x`), pitch (`y`) and yaw (`z`) angles.
    ///
    /// Angles are applied in yaw, pitch, roll order (intrinsic ZYX). Set
    /// `RADIANS` to `false` to pass degrees.
    pub fn from_euler<const RADIANS: bool>(angles: [T; 3]) -> Self {
        let two = T::one() + T::one();
        let [roll, pitch, yaw] = angles.map(|angle| {
            if RADIANS {
                angle / two
            } else {
                angle.to_radians() / two
            }
        });

        let (sr, cr) = roll.sin_cos();
        let (sp, cp) = pitch.sin_cos();
        let (sy, cy) = yaw.sin_cos();

        Self::new(
            sr * cp * cy - cr * sp * sy,
            cr * sp * cy + sr * cp * sy,
            cr * cp * sy - sr * sp * cy,
            cr * cp * cy + sr * sp * sy,
        )
    }

    /// Converts a unit quaternion to `[roll, pitch, yaw]`.
    ///
    /// `epsilon` widens the gimbal lock band: once `|sin(pitch)|` reaches
    /// `1 - epsilon` the pitch is pinned to `±π/2`.
    pub fn to_euler<const RADIANS: bool>(self, epsilon: T) -> [T; 3] {
        let (one, two) = (T::one(), T::one() + T::one());
        let Self { x, y, z, w } = self;

        let roll = (two * (w * x + y * z)).atan2(one - two * (x * x + y * y));

        let sin_pitch = two * (w * y - z * x);
        let pitch = if sin_pitch.abs() >= one - epsilon {
            T::FRAC_PI_2().copysign(sin_pitch)
        } else {
            sin_pitch.asin()
        };

        let yaw = (two * (w * z + x * y)).atan2(one - two * (y * y + z * z));

        let angles = [roll, pitch, yaw];
        if RADIANS {
            angles
        } else {
            angles.map(Float::to_degrees)
        }
    }
}

/// Interpolation weights `(for lhs, for rhs)` of a shortest-arc slerp.
///
/// `dot` is the four-dimensional dot product of the unit endpoints. The
/// weight of the far endpoint is negated when `dot < 0`. Above `1 - 1e-6` the
/// arc is too short for `sin` to be trusted, so linear weights are returned,
/// scaled so the blend keeps unit length.
#[inline]
pub(crate) fn slerp_weights<T: Float>(dot: T, t: T) -> (T, T) {
    let one = T::one();
    let cos = dot.abs();
    let threshold = one - T::from(1e-6).unwrap_or_else(T::epsilon);

    let (wa, wb) = if cos > threshold {
        let (wa, wb) = (one - t, t);
        // |wa a + wb b| for unit a and b
        let norm = (wa * wa + wb * wb + (wa + wa) * wb * cos).sqrt();
        (wa / norm, wb / norm)
    } else {
        let theta = cos.acos();
        let sin = theta.sin();
        (((one - t) * theta).sin() / sin, (t * theta).sin() / sin)
    };

    if dot < T::zero() {
        (wa, -wb)
    } else {
        (wa, wb)
    }
}

impl<T: Float> Default for ScalarQuaternion<T> {
    #[inline(always)]
    fn default() -> Self {
        Self::identity()
    }
}

impl<T: Copy> From<[T; 4]> for ScalarQuaternion<T> {
    #[inline(always)]
    fn from(array: [T; 4]) -> Self {
        Self::from_array(array)
    }
}

impl<T: Copy> From<ScalarQuaternion<T>> for [T; 4] {
    #[inline(always)]
    fn from(quaternion: ScalarQuaternion<T>) -> Self {
        quaternion.to_array()
    }
}

impl<T: Float> Add for ScalarQuaternion<T> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z, self.w + rhs.w)
    }
}

impl<T: Float> Sub for ScalarQuaternion<T> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z, self.w - rhs.w)
    }
}

impl<T: Float> Neg for ScalarQuaternion<T> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z, -self.w)
    }
}

impl<T: Float> Mul<T> for ScalarQuaternion<T> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: T) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs, self.w * rhs)
    }
}

/// The Hamilton product.
impl<T: Float> Mul for ScalarQuaternion<T> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        let (l, r) = (self, rhs);
        Self::new(
            l.w * r.x + l.x * r.w + l.y * r.z - l.z * r.y,
            l.w * r.y - l.x * r.z + l.y * r.w + l.z * r.x,
            l.w * r.z + l.x * r.y - l.y * r.x + l.z * r.w,
            l.w * r.w - l.x * r.x - l.y * r.y - l.z * r.z,
        )
    }
}

impl<T: AbsDiffEq> AbsDiffEq for ScalarQuaternion<T>
where
    T::Epsilon: Copy,
{
    type Epsilon = T::Epsilon;

    fn default_epsilon() -> T::Epsilon {
        T::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: T::Epsilon) -> bool {
        self.x.abs_diff_eq(&other.x, epsilon)
            && self.y.abs_diff_eq(&other.y, epsilon)
            && self.z.abs_diff_eq(&other.z, epsilon)
            && self.w.abs_diff_eq(&other.w, epsilon)
    }
}

impl<T: RelativeEq> RelativeEq for ScalarQuaternion<T>
where
    T::Epsilon: Copy,
{
    fn default_max_relative() -> T::Epsilon {
        T::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: T::Epsilon, max_relative: T::Epsilon) -> bool {
        self.x.relative_eq(&other.x, epsilon, max_relative)
            && self.y.relative_eq(&other.y, epsilon, max_relative)
            && self.z.relative_eq(&other.z, epsilon, max_relative)
            && self.w.relative_eq(&other.w, epsilon, max_relative)
    }
}
