//! Matrices and linear transforms.
//!
//! Matrices are stored in row-major order and act on column vectors:
//! `m.apply(&v)` computes the product *Mv*.

use core::fmt::{self, Debug, Formatter};
use core::ops::{Add, AddAssign, Mul, MulAssign, Range};

use super::approx::ApproxEq;
use super::vec::{Vec3, Vector};

/// A square `N`×`N` real matrix.
#[repr(transparent)]
#[derive(Copy, Clone, PartialEq)]
pub struct Matrix<const N: usize>(pub [[f32; N]; N]);

/// A 3×3 matrix, eg. a normal transform.
pub type Mat3 = Matrix<3>;
/// A 4×4 matrix, eg. a modelview or projection transform.
pub type Mat4 = Matrix<4>;

impl<const N: usize> Matrix<N> {
    /// Returns the matrix with all elements zero.
    #[inline]
    pub const fn zero() -> Self {
        Self([[0.0; N]; N])
    }

    /// Returns the identity matrix.
    pub const fn identity() -> Self {
        let mut els = [[0.0; N]; N];
        let mut i = 0;
        while i < N {
            els[i][i] = 1.0;
            i += 1;
        }
        Self(els)
    }

    /// Returns the row with index `i` as a vector.
    #[inline]
    pub fn row_vec(&self, i: usize) -> Vector<N> {
        Vector(self.0[i])
    }
    /// Returns the column with index `i` as a vector.
    #[inline]
    pub fn col_vec(&self, i: usize) -> Vector<N> {
        Vector(core::array::from_fn(|j| self.0[j][i]))
    }

    /// Returns the elements of `self` as a flat row-major slice.
    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        self.0.as_flattened()
    }
    /// Returns the elements of `self` as a flat mutable row-major slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        self.0.as_flattened_mut()
    }

    /// Returns the transpose of `self`.
    pub fn transpose(&self) -> Self {
        Self(core::array::from_fn(|i| self.col_vec(i).0))
    }

    /// Returns the matrix product `self` · `other`.
    ///
    /// As a transform, the result applies `other` first, then `self`.
    pub fn compose(&self, other: &Self) -> Self {
        Self(core::array::from_fn(|i| {
            core::array::from_fn(|j| self.row_vec(i).dot(&other.col_vec(j)))
        }))
    }

    /// Returns the matrix product `other` · `self`.
    ///
    /// As a transform, the result applies `self` first, then `other`.
    #[inline]
    pub fn then(&self, other: &Self) -> Self {
        other.compose(self)
    }

    /// Returns the product of `self` and the column vector `v`.
    #[inline]
    pub fn apply(&self, v: &Vector<N>) -> Vector<N> {
        Vector(core::array::from_fn(|i| self.row_vec(i).dot(v)))
    }
}

/// Returns a matrix that translates by `(x, y, z)`.
#[rustfmt::skip]
pub const fn translate(x: f32, y: f32, z: f32) -> Mat4 {
    Matrix([
        [1.0, 0.0, 0.0,  x ],
        [0.0, 1.0, 0.0,  y ],
        [0.0, 0.0, 1.0,  z ],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

/// Returns a matrix that scales by the components of `s`.
#[rustfmt::skip]
pub const fn scale(s: Vec3) -> Mat4 {
    let [x, y, z] = s.0;
    Matrix([
        [ x , 0.0, 0.0, 0.0],
        [0.0,  y , 0.0, 0.0],
        [0.0, 0.0,  z , 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

/// Returns a perspective projection matrix.
///
/// The view space looks along the positive *z* axis. `focal_ratio` is the
/// reciprocal of the tangent of half the vertical field of view. Points
/// at the near and far planes are mapped to NDC depth −1 and 1.
///
/// # Panics
/// If `near` is not positive or `far <= near`.
#[rustfmt::skip]
pub fn perspective(
    focal_ratio: f32,
    aspect_ratio: f32,
    Range { start: near, end: far }: Range<f32>,
) -> Mat4 {
    assert!(near > 0.0, "near must be positive, was {near}");
    assert!(far > near, "far ({far}) must be greater than near ({near})");

    let f = focal_ratio;
    let a = (far + near) / (far - near);
    let b = -2.0 * far * near / (far - near);
    Matrix([
        [f / aspect_ratio, 0.0, 0.0, 0.0],
        [0.0,               f,  0.0, 0.0],
        [0.0,              0.0,  a,   b ],
        [0.0,              0.0, 1.0, 0.0],
    ])
}

//
// Foreign trait impls
//

impl<const N: usize> Default for Matrix<N> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<const N: usize> Debug for Matrix<N> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "Mat{N}[")?;
        for row in &self.0 {
            writeln!(f, "    {row:6.2?}")?;
        }
        write!(f, "]")
    }
}

impl<const N: usize> From<[[f32; N]; N]> for Matrix<N> {
    fn from(els: [[f32; N]; N]) -> Self {
        Self(els)
    }
}

impl<const N: usize> AddAssign for Matrix<N> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        for (a, b) in self.as_mut_slice().iter_mut().zip(rhs.as_slice()) {
            *a += b;
        }
    }
}
impl<const N: usize> MulAssign<f32> for Matrix<N> {
    #[inline]
    fn mul_assign(&mut self, rhs: f32) {
        for a in self.as_mut_slice() {
            *a *= rhs;
        }
    }
}
impl<const N: usize> Add for Matrix<N> {
    type Output = Self;
    #[inline]
    fn add(mut self, rhs: Self) -> Self {
        self += rhs;
        self
    }
}
impl<const N: usize> Mul<f32> for Matrix<N> {
    type Output = Self;
    #[inline]
    fn mul(mut self, rhs: f32) -> Self {
        self *= rhs;
        self
    }
}

impl<const N: usize> ApproxEq for Matrix<N> {
    fn approx_eq_eps(&self, other: &Self, rel_eps: &f32) -> bool {
        self.as_slice().approx_eq_eps(other.as_slice(), rel_eps)
    }
    fn relative_epsilon() -> f32 {
        f32::relative_epsilon()
    }
}
