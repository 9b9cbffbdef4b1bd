//! Approximate equality of floating-point values.

use core::iter::zip;

/// Trait for testing approximate equality.
///
/// Rounding error makes exact comparison of computed floats brittle: the
/// rasterizer steps values incrementally across hundreds of pixels, so the
/// result at a given pixel differs from the closed-form value in the last
/// few bits. Two values are considered approximately equal if their absolute
/// difference is within an epsilon *relative* to their magnitude.
pub trait ApproxEq<Other: ?Sized = Self, Epsilon = f32> {
    /// Returns whether `self` and `other` are approximately equal,
    /// using [`Self::relative_epsilon`].
    fn approx_eq(&self, other: &Other) -> bool {
        self.approx_eq_eps(other, &Self::relative_epsilon())
    }

    /// Returns whether `self` and `other` are approximately equal,
    /// using the relative epsilon `rel_eps`.
    fn approx_eq_eps(&self, other: &Other, rel_eps: &Epsilon) -> bool;

    /// Returns the default relative epsilon.
    fn relative_epsilon() -> Epsilon;
}

impl ApproxEq for f32 {
    fn approx_eq_eps(&self, other: &Self, rel_eps: &f32) -> bool {
        let diff = abs(self - other);
        diff <= *rel_eps * abs(*self).max(1.0)
    }
    fn relative_epsilon() -> f32 {
        1e-6
    }
}

impl<T: ApproxEq> ApproxEq for [T] {
    fn approx_eq_eps(&self, other: &Self, rel_eps: &f32) -> bool {
        self.len() == other.len()
            && zip(self, other).all(|(s, o)| s.approx_eq_eps(o, rel_eps))
    }
    fn relative_epsilon() -> f32 {
        T::relative_epsilon()
    }
}

impl<T: ApproxEq, const N: usize> ApproxEq for [T; N] {
    fn approx_eq_eps(&self, other: &Self, rel_eps: &f32) -> bool {
        self.as_slice().approx_eq_eps(other, rel_eps)
    }
    fn relative_epsilon() -> f32 {
        T::relative_epsilon()
    }
}

#[inline]
fn abs(x: f32) -> f32 {
    if x < 0.0 { -x } else { x }
}

/// Asserts that two values are approximately equal.
///
/// Requires that the left operand has an applicable [`ApproxEq`] impl
/// and that both operands impl `Debug`. A custom relative epsilon can be
/// given with `eps = <literal>`.
///
/// # Panics
/// If the given values are not approximately equal.
///
/// # Examples
/// ```
/// # use rasterpipe_core::assert_approx_eq;
/// assert_ne!(0.1 + 0.2, 0.3);
/// assert_approx_eq!(0.1f32 + 0.2, 0.3);
/// assert_approx_eq!(100.0f32, 101.0, eps = 0.01);
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($a:expr, $b:expr) => {{
        use $crate::math::approx::ApproxEq;
        match (&$a, &$b) {
            (a, b) => assert!(
                ApproxEq::approx_eq(a, b),
                "assertion failed: `{a:?} ≅ {b:?}`"
            ),
        }
    }};
    ($a:expr, $b:expr, eps = $eps:literal) => {{
        use $crate::math::approx::ApproxEq;
        match (&$a, &$b) {
            (a, b) => assert!(
                ApproxEq::approx_eq_eps(a, b, &$eps),
                "assertion failed: `{a:?} ≅ {b:?}` (eps = {})",
                $eps
            ),
        }
    }};
}

#[cfg(test)]
mod tests {
    #[test]
    fn approx_eq_zero() {
        assert_approx_eq!(0.0f32, 0.0);
        assert_approx_eq!(-0.0f32, 0.0);
    }

    #[test]
    fn approx_eq_relative() {
        assert_approx_eq!(1.0f32, 1.0000001);
        assert_approx_eq!(1.0e10f32, 1.0000001e10);
        assert_approx_eq!(-1.0e10f32, -1.0000001e10);
    }

    #[test]
    fn approx_eq_custom_epsilon() {
        assert_approx_eq!(0.0f32, 0.001, eps = 0.01);
        assert_approx_eq!(100.0f32, 99.9, eps = 0.01);
    }

    #[test]
    fn approx_eq_arrays() {
        assert_approx_eq!([1.0f32, 2.0], [1.0000001, 2.0]);
    }

    #[test]
    #[should_panic]
    fn arrays_of_different_values_not_approx_eq() {
        assert_approx_eq!([1.0f32, 2.0], [1.0, 2.1]);
    }

    #[test]
    #[should_panic]
    fn nan_not_approx_eq_to_nan() {
        assert_approx_eq!(f32::NAN, f32::NAN);
    }
}
