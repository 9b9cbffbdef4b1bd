//! Real vectors.

use core::fmt::{Debug, Formatter};
use core::ops::{Add, AddAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub};

use super::approx::ApproxEq;

/// A vector of `N` real components.
#[repr(transparent)]
#[derive(Copy, Clone, PartialEq)]
pub struct Vector<const N: usize>(pub [f32; N]);

/// A 2-component vector, eg. a texture coordinate.
pub type Vec2 = Vector<2>;
/// A 3-component vector, eg. a position or an RGB color.
pub type Vec3 = Vector<3>;
/// A 4-component vector, eg. a homogeneous position or an RGBA color.
pub type Vec4 = Vector<4>;

/// Returns a 2-vector with components `x` and `y`.
#[inline]
pub const fn vec2(x: f32, y: f32) -> Vec2 {
    Vector([x, y])
}
/// Returns a 3-vector with components `x`, `y`, and `z`.
#[inline]
pub const fn vec3(x: f32, y: f32, z: f32) -> Vec3 {
    Vector([x, y, z])
}
/// Returns a 4-vector with components `x`, `y`, `z`, and `w`.
#[inline]
pub const fn vec4(x: f32, y: f32, z: f32, w: f32) -> Vec4 {
    Vector([x, y, z, w])
}
/// Returns a vector with every component equal to `s`.
#[inline]
pub const fn splat<const N: usize>(s: f32) -> Vector<N> {
    Vector([s; N])
}

impl<const N: usize> Vector<N> {
    /// The dimension of `self`.
    pub const DIM: usize = N;

    /// Returns the zero vector.
    #[inline]
    pub const fn zero() -> Self {
        Self([0.0; N])
    }

    /// Returns the components of `self` as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }
    /// Returns the components of `self` as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.0
    }

    /// Returns the dot product of `self` and `other`.
    #[inline]
    pub fn dot(&self, other: &Self) -> f32 {
        let mut res = 0.0;
        for i in 0..N {
            res += self.0[i] * other.0[i];
        }
        res
    }

    /// Returns the component-wise product of `self` and `other`.
    #[inline]
    pub fn mul_elem(&self, other: &Self) -> Self {
        Self(core::array::from_fn(|i| self.0[i] * other.0[i]))
    }

    /// Returns a vector with `f` applied to each component of `self`.
    #[inline]
    pub fn map(self, f: impl FnMut(f32) -> f32) -> Self {
        Self(self.0.map(f))
    }
}

impl Vec3 {
    /// Returns the cross product of `self` and `other`.
    pub fn cross(&self, other: &Self) -> Self {
        let [a, b, c] = self.0;
        let [d, e, f] = other.0;
        vec3(b * f - c * e, c * d - a * f, a * e - b * d)
    }
    /// Returns `self` extended into a 4-vector with the given `w`.
    #[inline]
    pub const fn to_vec4(self, w: f32) -> Vec4 {
        let [x, y, z] = self.0;
        vec4(x, y, z, w)
    }
}

impl Vec4 {
    /// Returns the first three components of `self`.
    #[inline]
    pub const fn xyz(&self) -> Vec3 {
        let [x, y, z, _] = self.0;
        vec3(x, y, z)
    }
}

macro_rules! accessors {
    ($n:literal: $($name:ident = $i:literal),+) => {
        impl Vector<$n> {
            $(
                #[inline]
                pub const fn $name(&self) -> f32 {
                    self.0[$i]
                }
            )+
        }
    };
}
accessors!(2: x = 0, y = 1);
accessors!(3: x = 0, y = 1, z = 2);
accessors!(4: x = 0, y = 1, z = 2, w = 3);

//
// Foreign trait impls
//

impl<const N: usize> Default for Vector<N> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<const N: usize> Debug for Vector<N> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "Vec{}{:?}", N, self.0)
    }
}

impl<const N: usize> From<[f32; N]> for Vector<N> {
    #[inline]
    fn from(els: [f32; N]) -> Self {
        Self(els)
    }
}

impl<const N: usize> Index<usize> for Vector<N> {
    type Output = f32;
    #[inline]
    fn index(&self, i: usize) -> &f32 {
        &self.0[i]
    }
}
impl<const N: usize> IndexMut<usize> for Vector<N> {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut f32 {
        &mut self.0[i]
    }
}

impl<const N: usize> AddAssign for Vector<N> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        for (a, b) in self.0.iter_mut().zip(rhs.0) {
            *a += b;
        }
    }
}
impl<const N: usize> MulAssign<f32> for Vector<N> {
    #[inline]
    fn mul_assign(&mut self, rhs: f32) {
        for a in &mut self.0 {
            *a *= rhs;
        }
    }
}

impl<const N: usize> Add for Vector<N> {
    type Output = Self;
    #[inline]
    fn add(mut self, rhs: Self) -> Self {
        self += rhs;
        self
    }
}
impl<const N: usize> Sub for Vector<N> {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        self + -rhs
    }
}
impl<const N: usize> Neg for Vector<N> {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        self.map(|a| -a)
    }
}
impl<const N: usize> Mul<f32> for Vector<N> {
    type Output = Self;
    #[inline]
    fn mul(mut self, rhs: f32) -> Self {
        self *= rhs;
        self
    }
}

impl<const N: usize> ApproxEq for Vector<N> {
    fn approx_eq_eps(&self, other: &Self, rel_eps: &f32) -> bool {
        self.0.approx_eq_eps(&other.0, rel_eps)
    }
    fn relative_epsilon() -> f32 {
        f32::relative_epsilon()
    }
}

#[cfg(test)]
mod tests {
    use alloc::format;

    use super::*;

    #[test]
    fn vector_addition() {
        assert_eq!(vec2(1.0, 2.0) + vec2(-2.0, 1.0), vec2(-1.0, 3.0));
        assert_eq!(
            vec3(1.0, 2.0, 0.0) + vec3(-2.0, 1.0, -1.0),
            vec3(-1.0, 3.0, -1.0)
        );
        assert_eq!(vec2(1.0, 2.0) - vec2(1.0, 3.0), vec2(0.0, -1.0));
    }

    #[test]
    fn scalar_multiplication() {
        assert_eq!(vec2(1.0, -2.0) * 0.0, vec2(0.0, -0.0));
        assert_eq!(vec3(1.0, -2.0, 3.0) * 3.0, vec3(3.0, -6.0, 9.0));
        assert_eq!(
            vec4(1.0, -2.0, 0.0, -3.0) * 3.0,
            vec4(3.0, -6.0, 0.0, -9.0)
        );
    }

    #[test]
    fn dot_product() {
        assert_eq!(vec2(0.5, 0.5).dot(&vec2(-2.0, 2.0)), 0.0);
        assert_eq!(vec2(3.0, 1.0).dot(&vec2(3.0, 1.0)), 10.0);
        assert_eq!(vec2(0.5, 0.5).dot(&vec2(-4.0, -4.0)), -4.0);
    }

    #[test]
    fn cross_product() {
        assert_eq!(
            vec3(1.0, 0.0, 0.0).cross(&vec3(0.0, 1.0, 0.0)),
            vec3(0.0, 0.0, 1.0)
        );
        assert_eq!(
            vec3(0.0, 0.0, 1.0).cross(&vec3(0.0, 1.0, 0.0)),
            vec3(-1.0, 0.0, 0.0)
        );
    }

    #[test]
    fn accessors() {
        let v = vec4(1.0, 2.0, 3.0, 4.0);
        assert_eq!([v.x(), v.y(), v.z(), v.w()], [1.0, 2.0, 3.0, 4.0]);
        assert_eq!(v.xyz(), vec3(1.0, 2.0, 3.0));
        assert_eq!(v.xyz().to_vec4(9.0), vec4(1.0, 2.0, 3.0, 9.0));
    }

    #[test]
    fn debug() {
        assert_eq!(format!("{:?}", vec2(1.0, -2.0)), "Vec2[1.0, -2.0]");
        assert_eq!(
            format!("{:?}", vec4(1.0, -2.0, 3.0, -4.0)),
            "Vec4[1.0, -2.0, 3.0, -4.0]"
        );
    }
}
