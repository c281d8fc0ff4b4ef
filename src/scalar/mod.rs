//! Generic scalar traits and the canonical, unpacked quaternion.

mod quaternion;
pub use quaternion::ScalarQuaternion;
pub(crate) use quaternion::slerp_weights;

macro_rules! by_ref_trait {
    ($($(#[$doc:meta])* $name:ident, $op:literal, $as_op:ident, $into:ident;)*) => {
        $(
            $(#[$doc])*
            pub trait $name<Rhs: ?Sized = Self> {
                #[doc = concat!("The output type of `Self ", $op, " Rhs`.")]
                type Output: ?Sized;

                #[doc = concat!("Computes `self ", $op, " rhs` without consuming either side.")]
                #[must_use]
                fn $as_op(&self, rhs: &Rhs) -> Self::Output
                where
                    Self::Output: Sized;

                #[doc = concat!("Like [`", stringify!($name), "::", stringify!($as_op), "`], writing to `out`.")]
                fn $into(&self, rhs: &Rhs, out: &mut Self::Output);
            }
        )*
    };
}

by_ref_trait! {
    /// Addition through references.
    AddByRef, "+", as_add, add_into;
    /// Subtraction through references.
    SubByRef, "-", as_sub, sub_into;
    /// Multiplication through references.
    ///
    /// For quaternions this is the Hamilton product.
    MulByRef, "*", as_mul, mul_into;
    /// Division through references.
    DivByRef, "/", as_div, div_into;
}

/// A marker trait for plain floating point lane types.
pub trait Primitive {}

impl Primitive for f32 {}
impl Primitive for f64 {}

/// Trait that states `Self` can be built by repeating one `T`.
pub trait SupersetOf<T> {
    /// Copies `scalar` into every slot of `Self`.
    fn from_subset(scalar: T) -> Self;

    /// Reads the first slot of `self`.
    fn into_subset(self) -> T;
}

impl<T: Copy + Primitive, const N: usize> SupersetOf<T> for [T; N] {
    fn from_subset(scalar: T) -> Self {
        [scalar; N]
    }

    fn into_subset(self) -> T {
        self[0]
    }
}

/// Trait that states `Self` is a statically sized superset of `T`.
///
/// Register lane arrays are built through this trait whenever fewer scalars
/// than lanes are available, e.g. four quaternion components in an eight lane
/// register.
pub trait ArrayOf<T>: SupersetOf<T> {
    /// Pads or trims `slice` to the length of `Self`.
    fn pad_to(slice: &[T]) -> Self;
}

impl<T: Copy + Default + Primitive, const N: usize> ArrayOf<T> for [T; N] {
    fn pad_to(slice: &[T]) -> Self {
        let mut buffer = [T::default(); N];
        let len = slice.len().min(N);
        buffer[..len].copy_from_slice(&slice[..len]);
        buffer
    }
}
