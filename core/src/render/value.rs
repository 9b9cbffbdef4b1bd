//! Values passed into and out of shaders.
//!
//! Uniforms, vertex shader outputs, and the interpolated inputs of fragment
//! shaders are all sequences of [`ShaderValue`]s. Each value is one of a
//! fixed set of numeric shapes, and arithmetic is only defined between
//! values of the same shape.

use alloc::vec::Vec;
use core::fmt::{self, Display, Formatter};
use core::ops::{Add, AddAssign, Mul, MulAssign};

use crate::Error;
use crate::math::{ApproxEq, Mat3, Mat4, Vec2, Vec3, Vec4};

/// A scalar, vector, or matrix value used as a shader input or output.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ShaderValue {
    Scalar(f32),
    Vec2(Vec2),
    Vec3(Vec3),
    Vec4(Vec4),
    Mat3(Mat3),
    Mat4(Mat4),
}

/// The shape of a [`ShaderValue`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Kind {
    Scalar,
    Vec2,
    Vec3,
    Vec4,
    Mat3,
    Mat4,
}

/// The outputs of a vertex shader invocation.
///
/// By convention, the first element is always the clip-space position of
/// the vertex as a [`ShaderValue::Vec4`]. The rest are user-defined values
/// interpolated across each triangle for the fragment shader.
pub type Varyings = Vec<ShaderValue>;

/// Values that stay constant over all the vertices or fragments of a draw.
pub type Uniforms = Vec<ShaderValue>;

impl ShaderValue {
    /// Returns the zero value of the given kind.
    pub fn zero(kind: Kind) -> Self {
        match kind {
            Kind::Scalar => Self::Scalar(0.0),
            Kind::Vec2 => Self::Vec2(Vec2::zero()),
            Kind::Vec3 => Self::Vec3(Vec3::zero()),
            Kind::Vec4 => Self::Vec4(Vec4::zero()),
            Kind::Mat3 => Self::Mat3(Mat3::zero()),
            Kind::Mat4 => Self::Mat4(Mat4::zero()),
        }
    }

    /// Returns the kind of `self`.
    #[inline]
    pub fn kind(&self) -> Kind {
        match self {
            Self::Scalar(_) => Kind::Scalar,
            Self::Vec2(_) => Kind::Vec2,
            Self::Vec3(_) => Kind::Vec3,
            Self::Vec4(_) => Kind::Vec4,
            Self::Mat3(_) => Kind::Mat3,
            Self::Mat4(_) => Kind::Mat4,
        }
    }

    /// Returns the components of `self` as a flat slice.
    ///
    /// Matrices are flattened in row-major order.
    #[inline]
    pub fn components(&self) -> &[f32] {
        match self {
            Self::Scalar(s) => core::slice::from_ref(s),
            Self::Vec2(v) => v.as_slice(),
            Self::Vec3(v) => v.as_slice(),
            Self::Vec4(v) => v.as_slice(),
            Self::Mat3(m) => m.as_slice(),
            Self::Mat4(m) => m.as_slice(),
        }
    }

    /// Returns the components of `self` as a flat mutable slice.
    #[inline]
    pub fn components_mut(&mut self) -> &mut [f32] {
        match self {
            Self::Scalar(s) => core::slice::from_mut(s),
            Self::Vec2(v) => v.as_mut_slice(),
            Self::Vec3(v) => v.as_mut_slice(),
            Self::Vec4(v) => v.as_mut_slice(),
            Self::Mat3(m) => m.as_mut_slice(),
            Self::Mat4(m) => m.as_mut_slice(),
        }
    }

    /// Returns the element-wise sum of `self` and `other`.
    ///
    /// # Errors
    /// [`Error::TypeMismatch`] if `other` is of a different kind.
    pub fn try_add(&self, other: &Self) -> Result<Self, Error> {
        let mut res = *self;
        res.try_add_assign(other)?;
        Ok(res)
    }

    /// Adds `other` to `self` element-wise.
    ///
    /// # Errors
    /// [`Error::TypeMismatch`] if `other` is of a different kind. In that
    /// case `self` is not modified.
    pub fn try_add_assign(&mut self, other: &Self) -> Result<(), Error> {
        other.expect_kind(self.kind())?;
        for (a, b) in self.components_mut().iter_mut().zip(other.components())
        {
            *a += b;
        }
        Ok(())
    }

    /// Returns `Ok` if `self` is of kind `expected`, otherwise an error.
    #[inline]
    pub fn expect_kind(&self, expected: Kind) -> Result<(), Error> {
        let found = self.kind();
        if found == expected {
            Ok(())
        } else {
            Err(Error::TypeMismatch { expected, found })
        }
    }
}

impl Kind {
    /// Returns the number of `f32` components in a value of this kind.
    pub const fn len(self) -> usize {
        match self {
            Self::Scalar => 1,
            Self::Vec2 => 2,
            Self::Vec3 => 3,
            Self::Vec4 => 4,
            Self::Mat3 => 9,
            Self::Mat4 => 16,
        }
    }
}

impl Display for Kind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Scalar => "scalar",
            Self::Vec2 => "vec2",
            Self::Vec3 => "vec3",
            Self::Vec4 => "vec4",
            Self::Mat3 => "mat3",
            Self::Mat4 => "mat4",
        })
    }
}

//
// Arithmetic
//

impl AddAssign<&Self> for ShaderValue {
    /// Adds `rhs` to `self` element-wise.
    ///
    /// # Panics
    /// If `rhs` is of a different kind than `self`.
    #[inline]
    #[track_caller]
    fn add_assign(&mut self, rhs: &Self) {
        if let Err(e) = self.try_add_assign(rhs) {
            panic!("{e}");
        }
    }
}
impl AddAssign for ShaderValue {
    #[inline]
    #[track_caller]
    fn add_assign(&mut self, rhs: Self) {
        *self += &rhs;
    }
}
impl Add for ShaderValue {
    type Output = Self;
    /// Returns the element-wise sum of `self` and `rhs`.
    ///
    /// # Panics
    /// If `rhs` is of a different kind than `self`.
    #[inline]
    #[track_caller]
    fn add(mut self, rhs: Self) -> Self {
        self += &rhs;
        self
    }
}

impl MulAssign<f32> for ShaderValue {
    #[inline]
    fn mul_assign(&mut self, rhs: f32) {
        for a in self.components_mut() {
            *a *= rhs;
        }
    }
}
impl Mul<f32> for ShaderValue {
    type Output = Self;
    #[inline]
    fn mul(mut self, rhs: f32) -> Self {
        self *= rhs;
        self
    }
}

impl ApproxEq for ShaderValue {
    fn approx_eq_eps(&self, other: &Self, rel_eps: &f32) -> bool {
        self.kind() == other.kind()
            && self.components().approx_eq_eps(other.components(), rel_eps)
    }
    fn relative_epsilon() -> f32 {
        f32::relative_epsilon()
    }
}

//
// Conversions
//

macro_rules! impl_conversions {
    ($($ty:ty => $variant:ident),+ $(,)?) => {$(
        impl From<$ty> for ShaderValue {
            #[inline]
            fn from(v: $ty) -> Self {
                Self::$variant(v)
            }
        }
        impl TryFrom<&ShaderValue> for $ty {
            type Error = Error;
            #[inline]
            fn try_from(v: &ShaderValue) -> Result<Self, Error> {
                match v {
                    ShaderValue::$variant(v) => Ok(*v),
                    other => Err(Error::TypeMismatch {
                        expected: Kind::$variant,
                        found: other.kind(),
                    }),
                }
            }
        }
        impl TryFrom<ShaderValue> for $ty {
            type Error = Error;
            #[inline]
            fn try_from(v: ShaderValue) -> Result<Self, Error> {
                Self::try_from(&v)
            }
        }
    )+};
}

impl_conversions! {
    f32 => Scalar,
    Vec2 => Vec2,
    Vec3 => Vec3,
    Vec4 => Vec4,
    Mat3 => Mat3,
    Mat4 => Mat4,
}
