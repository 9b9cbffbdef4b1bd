//! Linear interpolation across the screen-space plane of a triangle.
//!
//! Any quantity that varies linearly over a triangle in screen space is
//! fully described by its value at one point and its rate of change along
//! the *x* and *y* axes. The rasterizer uses this to step depth, 1/*w*,
//! and perspective-premultiplied varyings from pixel to pixel with a single
//! addition each, instead of recomputing barycentric weights per pixel.

use super::vec::Vec2;

/// Screen-space gradient of a linearly varying scalar: its partial
/// derivatives along *x* and *y*, plus its value at some origin point.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Grad {
    /// The value at the origin.
    pub origin: f32,
    /// Change per one pixel step to the right.
    pub dx: f32,
    /// Change per one pixel step up (increasing *y*).
    pub dy: f32,
}

/// Precomputed screen-space geometry of a triangle for solving gradients.
///
/// Solving a gradient for *n* quantities over the same triangle only needs
/// the edge vectors and the reciprocal of the doubled signed area once.
#[derive(Copy, Clone, Debug)]
pub struct Plane {
    p0: Vec2,
    e10: Vec2,
    e20: Vec2,
    recip_area: f32,
    origin: Vec2,
}

impl Plane {
    /// Returns a plane solver for the triangle `pts` with doubled signed
    /// area `area`, evaluating gradients relative to `origin`.
    ///
    /// `area` should equal the doubled signed area of `pts`, for example as
    /// computed by the rasterizer's exact coverage arithmetic. If it is
    /// zero, the gradients are non-finite.
    pub fn with_area([p0, p1, p2]: [Vec2; 3], area: f32, origin: Vec2) -> Self {
        Self {
            p0,
            e10: p1 - p0,
            e20: p2 - p0,
            recip_area: 1.0 / area,
            origin,
        }
    }

    /// Solves the gradient of a quantity having values `u` at the three
    /// vertices of this plane's triangle.
    ///
    /// The quantity spans a plane through (*x*ᵢ, *y*ᵢ, *u*ᵢ). With its normal
    /// (A, B, C), *du/dx* = −A/C and *du/dy* = −B/C.
    #[inline]
    pub fn solve(&self, [u0, u1, u2]: [f32; 3]) -> Grad {
        let (u10, u20) = (u1 - u0, u2 - u0);
        let (x10, y10) = (self.e10.x(), self.e10.y());
        let (x20, y20) = (self.e20.x(), self.e20.y());

        let a = y10 * u20 - u10 * y20;
        let b = u10 * x20 - x10 * u20;
        let dx = -a * self.recip_area;
        let dy = -b * self.recip_area;

        let origin = u0
            + dx * (self.origin.x() - self.p0.x())
            + dy * (self.origin.y() - self.p0.y());
        Grad { origin, dx, dy }
    }
}
