//! Floating-point compatibility API.
//!
//! Rounding functions are unavailable in `core`. This module provides them
//! using either `std`, the `libm` crate, or the `micromath` crate, depending
//! on which feature is enabled. As a fallback, it also implements them in
//! terms of integer truncation if none of the features is enabled.

#[cfg(feature = "libm")]
pub mod libm {
    pub use libm::ceilf as ceil;
    pub use libm::floorf as floor;
    pub use libm::roundf as round;
}

#[cfg(feature = "mm")]
pub mod mm {
    use micromath::F32Ext as mm;

    #[inline]
    pub fn floor(x: f32) -> f32 {
        mm::floor(x)
    }
    #[inline]
    pub fn ceil(x: f32) -> f32 {
        mm::ceil(x)
    }
    #[inline]
    pub fn round(x: f32) -> f32 {
        mm::round(x)
    }
}

pub mod fallback {
    /// Returns the largest integer less than or equal to `x`.
    ///
    /// Only exact for `|x| < 2⁶³`.
    #[inline]
    pub fn floor(x: f32) -> f32 {
        let t = x as i64 as f32;
        t - (t > x) as i64 as f32
    }
    /// Returns the smallest integer greater than or equal to `x`.
    #[inline]
    pub fn ceil(x: f32) -> f32 {
        -floor(-x)
    }
    /// Returns the integer nearest to `x`, rounding half away from zero.
    #[inline]
    pub fn round(x: f32) -> f32 {
        if x < 0.0 {
            -floor(-x + 0.5)
        } else {
            floor(x + 0.5)
        }
    }
}

#[cfg(feature = "std")]
#[allow(non_camel_case_types)]
pub type f32 = core::primitive::f32;

#[cfg(all(feature = "libm", not(feature = "std")))]
pub use libm as f32;

#[cfg(all(feature = "mm", not(feature = "std"), not(feature = "libm")))]
pub use mm as f32;

#[cfg(not(feature = "fp"))]
pub use fallback as f32;
