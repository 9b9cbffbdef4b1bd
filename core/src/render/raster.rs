//! Translation of triangles into discrete pixels in the framebuffer.
//!
//! Rasterization visits every pixel in the screen-space bounding box of a
//! triangle and evaluates three *edge functions* at the pixel center. Each
//! edge function is positive on the inner side of its edge, so a pixel is
//! covered iff all three are positive. The edge functions are evaluated in
//! 28.4 fixed point, which makes the coverage decision exact and lets
//! adjacent triangles share an edge without gaps or double coverage.
//! Triangles reaching farther than [`FIXED_RANGE`] from the origin, such as
//! those with a vertex close to the eye plane, are evaluated in `f64`
//! instead.
//!
//! Depth, the reciprocal of clip-space *w*, and the varyings premultiplied
//! by that reciprocal vary linearly across the triangle in screen space.
//! Their gradients are solved once per triangle and then stepped with one
//! addition per pixel. Dividing the stepped varyings by the stepped
//! reciprocal gives the perspective-correct value at each pixel.
//!
//! Covered fragments are depth tested against the depth buffer. For each
//! fragment that passes, the fragment shader computes a color that is
//! written to the color buffer, and the fragment's depth is written to the
//! depth buffer.

use alloc::vec::Vec;
use core::iter::zip;
use core::ops::{Add, AddAssign, Mul, Sub};

use crate::math::{Plane, Vec4, float, vec2, vec4};

use super::{
    ctx::Context,
    shader::{Frag, FragmentShader, Shader},
    stats::Throughput,
    target::{Framebuf, pack_color},
    value::{ShaderValue, Varyings},
};

/// Number of fractional bits in fixed-point window coordinates.
const SUBPIXEL_BITS: u32 = 4;

/// Triangles whose window coordinates are all at most this large in
/// magnitude are rasterized in 28.4 fixed point, where the edge function
/// products fit in `i64`. Larger triangles use `f64` edge functions.
pub const FIXED_RANGE: f32 = (1 << 24) as f32;

/// A function that rasterizes one triangle, such as [`tri_fill`].
///
/// Returns the number of fragments covered and the number written.
pub type Rasterizer = for<'a> fn(
    &Triangle,
    &Shader<dyn FragmentShader + 'a>,
    &Context,
    &mut Framebuf,
    &mut Scratch,
) -> Throughput;

/// A triangle ready for rasterization.
#[derive(Clone, Debug, PartialEq)]
pub struct Triangle {
    /// The window-space vertex positions.
    ///
    /// `x` and `y` are in pixels, `z` is the depth, and `w` holds the
    /// reciprocal of the clip-space *w* of the vertex.
    pub verts: [Vec4; 3],
    /// The vertex shader outputs of each vertex.
    ///
    /// Slot 0, the clip-space position, is not interpolated.
    pub varyings: [Varyings; 3],
}

/// Reusable interpolation buffers.
///
/// Each interpolated component has a gradient plus two running values: one
/// at the start of the current row and one at the current pixel. The first
/// two components are depth and 1/*w*; the rest are the flattened varyings
/// premultiplied by 1/*w*.
#[derive(Clone, Debug, Default)]
pub struct Scratch {
    dx: Vec<f32>,
    dy: Vec<f32>,
    row: Vec<f32>,
    cur: Vec<f32>,
    out: Varyings,
}

/// A half-plane bounded by one triangle edge.
#[derive(Copy, Clone, Debug)]
struct Edge<T> {
    /// Edge function value at the current sample.
    val: T,
    /// Change when moving one pixel right.
    step_x: T,
    /// Change when moving one pixel up.
    step_y: T,
    /// Whether samples exactly on the edge are inside.
    owns: bool,
}

/// Number type of the edge function arithmetic.
trait Coord:
    Copy
    + PartialOrd
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + AddAssign
{
    const ZERO: Self;
    /// The width of one pixel.
    const ONE: Self;

    /// Converts a window coordinate in pixels.
    fn from_window(c: f32) -> Self;
    /// Returns the center of the pixel with integer coordinate `i`.
    fn center(i: usize) -> Self;
    fn to_f32(self) -> f32;
}

impl Coord for i64 {
    const ZERO: Self = 0;
    const ONE: Self = 1 << SUBPIXEL_BITS;

    #[inline]
    fn from_window(c: f32) -> Self {
        float::f32::round(c * Self::ONE as f32) as i64
    }
    #[inline]
    fn center(i: usize) -> Self {
        ((i as i64) << SUBPIXEL_BITS) + Self::ONE / 2
    }
    #[inline]
    fn to_f32(self) -> f32 {
        self as f32
    }
}

impl Coord for f64 {
    const ZERO: Self = 0.0;
    const ONE: Self = 1.0;

    #[inline]
    fn from_window(c: f32) -> Self {
        c.into()
    }
    #[inline]
    fn center(i: usize) -> Self {
        i as f64 + 0.5
    }
    #[inline]
    fn to_f32(self) -> f32 {
        self as f32
    }
}

impl Scratch {
    /// Returns empty interpolation buffers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Solves the gradients of every interpolated component of `tri` and
    /// resets the running values to the plane origin.
    fn setup(&mut self, tri: &Triangle, plane: Plane) {
        let [v0, v1, v2] = &tri.varyings;
        for v in [v1, v2] {
            assert_eq!(
                v.len(),
                v0.len(),
                "varying layouts should match across vertices"
            );
            for (a, b) in zip(v0, v).skip(1) {
                if let Err(e) = b.expect_kind(a.kind()) {
                    panic!("varying layouts should match across vertices: {e}");
                }
            }
        }
        self.out.clear();
        self.out.extend_from_slice(v0.get(1..).unwrap_or_default());

        let [q0, q1, q2] = tri.verts.map(|v| v.w());
        let z = tri.verts.map(|v| v.z());
        let user = zip(zip(premul(v0, q0), premul(v1, q1)), premul(v2, q2))
            .map(|((a, b), c)| [a, b, c]);

        self.dx.clear();
        self.dy.clear();
        self.row.clear();
        for us in [z, [q0, q1, q2]].into_iter().chain(user) {
            let g = plane.solve(us);
            self.dx.push(g.dx);
            self.dy.push(g.dy);
            self.row.push(g.origin);
        }
        self.cur.clone_from(&self.row);
    }
}

/// Returns the components of the user varyings of `v` multiplied by `q`.
fn premul(v: &Varyings, q: f32) -> impl Iterator<Item = f32> + '_ {
    v.iter()
        .skip(1)
        .flat_map(ShaderValue::components)
        .map(move |c| c * q)
}

impl<T: Coord> Edge<T> {
    /// Returns the edge from `a` to `b`, evaluated at sample point `p`.
    ///
    /// An edge owns the samples lying exactly on it if the interior is
    /// above it or to its right when walked counter-clockwise. Of two
    /// triangles sharing an edge, exactly one owns it, so with exact
    /// arithmetic every sample on the edge is covered exactly once.
    fn new([ax, ay]: [T; 2], [bx, by]: [T; 2], [px, py]: [T; 2]) -> Self {
        let (dx, dy) = (bx - ax, by - ay);
        Self {
            val: dx * (py - ay) - dy * (px - ax),
            step_x: (ay - by) * T::ONE,
            step_y: dx * T::ONE,
            owns: dy < T::ZERO || (dy == T::ZERO && dx > T::ZERO),
        }
    }

    #[inline]
    fn covers(&self) -> bool {
        self.val > T::ZERO || (self.owns && self.val == T::ZERO)
    }
}

/// Rasterizes a triangle into `fb`, shading each covered and visible
/// fragment with `fs`.
///
/// The triangle must be counter-clockwise in window space (*y* up) to be
/// drawn; clockwise and degenerate triangles are culled, as are triangles
/// with non-finite coordinates. Coverage is computed exactly in fixed
/// point if all coordinates are within [`FIXED_RANGE`], and in `f64`
/// otherwise.
///
/// Returns the number of fragments covered by the triangle and the number
/// of fragments written.
///
/// # Panics
/// If the varyings of the three vertices do not have matching layouts.
pub fn tri_fill(
    tri: &Triangle,
    fs: &Shader<dyn FragmentShader + '_>,
    ctx: &Context,
    fb: &mut Framebuf,
    scratch: &mut Scratch,
) -> Throughput {
    let vs = &tri.verts;
    if !vs.iter().all(|v| v.0.iter().all(|c| c.is_finite())) {
        log::trace!("culled triangle with non-finite coordinates: {vs:?}");
        return Throughput::default();
    }
    let range = -FIXED_RANGE..=FIXED_RANGE;
    if vs.iter().all(|v| range.contains(&v.x()) && range.contains(&v.y())) {
        rasterize::<i64>(tri, fs, ctx, fb, scratch)
    } else {
        log::trace!("rasterizing large triangle in floating point: {vs:?}");
        rasterize::<f64>(tri, fs, ctx, fb, scratch)
    }
}

fn rasterize<T: Coord>(
    tri: &Triangle,
    fs: &Shader<dyn FragmentShader + '_>,
    ctx: &Context,
    fb: &mut Framebuf,
    scratch: &mut Scratch,
) -> Throughput {
    let mut frags = Throughput::default();
    let vs = &tri.verts;

    let pts = vs.map(|v| [T::from_window(v.x()), T::from_window(v.y())]);
    let [[x0, y0], [x1, y1], [x2, y2]] = pts;
    let area = (x1 - x0) * (y2 - y0) - (x2 - x0) * (y1 - y0);
    if area <= T::ZERO {
        log::trace!("culled back-facing or degenerate triangle: {vs:?}");
        return frags;
    }

    let Some([min_x, max_x, min_y, max_y]) = bounding_box(vs, fb) else {
        return frags;
    };

    let origin = vec2(min_x as f32 + 0.5, min_y as f32 + 0.5);
    let sample = [T::center(min_x), T::center(min_y)];
    let mut edges_row = [
        Edge::new(pts[0], pts[1], sample),
        Edge::new(pts[1], pts[2], sample),
        Edge::new(pts[2], pts[0], sample),
    ];

    // Gradients are solved on the snapped vertices with the same area as
    // the coverage test.
    let one = T::ONE.to_f32();
    let snapped = pts.map(|[x, y]| vec2(x.to_f32() / one, y.to_f32() / one));
    let area = area.to_f32() / (one * one);
    scratch.setup(tri, Plane::with_area(snapped, area, origin));

    let Scratch { dx, dy, row, cur, out } = scratch;
    for y in min_y..=max_y {
        let mut edges = edges_row;
        cur.copy_from_slice(row);

        for x in min_x..=max_x {
            if edges.iter().all(Edge::covers) {
                frags.i += 1;
                let (z, q) = (cur[0], cur[1]);

                if ctx.depth_test(z, fb.depth_at(x, y)) {
                    let w = 1.0 / q;
                    let comps = out.iter_mut().flat_map(|v| v.components_mut());
                    for (c, vq) in comps.zip(&cur[2..]) {
                        *c = vq * w;
                    }
                    let pos = vec4(x as f32 + 0.5, y as f32 + 0.5, z, q);

                    if let Some(col) = fs.shade_fragment(Frag { pos, var: out }) {
                        if ctx.color_write {
                            fb.set_color(x, y, pack_color(col));
                        }
                        if ctx.depth_write {
                            fb.set_depth(x, y, z);
                        }
                        frags.o += 1;
                    }
                }
            }
            for e in &mut edges {
                e.val += e.step_x;
            }
            for (c, d) in cur.iter_mut().zip(dx.iter()) {
                *c += d;
            }
        }
        for e in &mut edges_row {
            e.val += e.step_y;
        }
        for (r, d) in row.iter_mut().zip(dy.iter()) {
            *r += d;
        }
    }
    frags
}

/// Returns the inclusive pixel bounds `[min_x, max_x, min_y, max_y]` of the
/// triangle clamped to the framebuffer, or `None` if no pixel remains.
fn bounding_box(vs: &[Vec4; 3], fb: &Framebuf) -> Option<[usize; 4]> {
    let (w, h) = (fb.width(), fb.height());
    if w == 0 || h == 0 {
        return None;
    }
    let bounds = |c: fn(&Vec4) -> f32, dim: usize| {
        let lo = vs.iter().map(c).fold(f32::INFINITY, f32::min);
        let hi = vs.iter().map(c).fold(f32::NEG_INFINITY, f32::max);
        let lo = float::f32::floor(lo.max(0.0));
        let hi = float::f32::ceil(hi.min((dim - 1) as f32));
        (lo <= hi).then_some((lo as usize, hi as usize))
    };
    let (min_x, max_x) = bounds(Vec4::x, w)?;
    let (min_y, max_y) = bounds(Vec4::y, h)?;
    Some([min_x, max_x, min_y, max_y])
}
