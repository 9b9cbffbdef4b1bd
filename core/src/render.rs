//! Turning triangles into raster images.
//!
//! This module constitutes the rendering pipeline of `rasterpipe`. The
//! [`Renderer`] holds the render state: the [render target][target], the
//! [viewport][Viewport], the bound [shaders][shader] and
//! [attribute streams][attrib], and the [primitive topology][prim]. A draw
//! call runs the [pipeline] over a range of vertices, [rasterizing][raster]
//! each assembled triangle into the render target.
//!
//! # Examples
//! ```
//! use rasterpipe_core::prelude::*;
//!
//! let pos = [-1.0, -1.0, 1.0, -1.0, 0.0, 1.0];
//!
//! let vs = Shader::new(
//!     |i: usize, a: &Attribs, _: &[ShaderValue]| {
//!         vec![ShaderValue::from(a[0].vec4(i))]
//!     },
//!     vec![],
//! );
//! let fs = Shader::new(
//!     |_: Frag, _: &[ShaderValue]| vec4(1.0, 1.0, 1.0, 1.0),
//!     vec![],
//! );
//!
//! let mut r = Renderer::new();
//! r.set_framebuffer(64, 64, 4);
//! r.set_viewport(0, 0, 64, 64);
//! r.set_vertex_shader(&vs);
//! r.set_fragment_shader(&fs);
//! r.set_attribute(0, AttribStream::new(&pos, 2));
//! r.clear();
//! r.draw(0, 3);
//!
//! assert_eq!(r.stats().prims.o, 1);
//! assert_eq!(r.color_buf().pixel(32, 32), [0xFF; 4]);
//! ```

use attrib::{AttribStream, Attribs};
use ctx::Context;
use pipeline::Pipeline;
use prim::{Topology, Winding};
use raster::{Rasterizer, Scratch, tri_fill};
use shader::{FragmentShader, Shader, Stage, VertexShader};
use stats::Stats;
use target::Framebuf;

use crate::Error;
use crate::util::buf::PixelBuf;

pub mod attrib;
pub mod ctx;
pub mod pipeline;
pub mod prim;
pub mod raster;
pub mod shader;
pub mod stats;
pub mod target;
pub mod value;

/// The window-space rectangle and depth range that normalized device
/// coordinates are mapped to.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Viewport {
    /// Left edge in pixels.
    pub x: i32,
    /// Bottom edge in pixels.
    pub y: i32,
    pub width: u32,
    pub height: u32,
    /// Window-space depth of the near plane, in [0, 1].
    pub near: f32,
    /// Window-space depth of the far plane, in [0, 1].
    pub far: f32,
}

impl Viewport {
    /// Returns a viewport with the given rectangle and depth range [0, 1].
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height, near: 0.0, far: 1.0 }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(0, 0, 0, 0)
    }
}

/// The render state and draw entry point.
///
/// The renderer borrows its shaders and attribute data for `'a`; it never
/// copies them. It owns the render target, which is zero-filled when
/// allocated. Call [`clear`][Self::clear] to initialize it to the clear
/// values in [`ctx`][Self::ctx] before drawing.
///
/// Triangles are rasterized by [`tri_fill`] unless another
/// [rasterizer][Self::set_rasterizer] is bound.
#[derive(Debug)]
pub struct Renderer<'a> {
    /// Parameters controlling buffer clears and fragment writes.
    pub ctx: Context,
    fb: Framebuf,
    viewport: Viewport,
    vs: Option<&'a Shader<dyn VertexShader + 'a>>,
    fs: Option<&'a Shader<dyn FragmentShader + 'a>>,
    attribs: Attribs<'a>,
    topology: Topology,
    winding: Winding,
    raster: Rasterizer,
    scratch: Scratch,
    stats: Stats,
}

impl Default for Renderer<'_> {
    fn default() -> Self {
        Self {
            ctx: Context::default(),
            fb: Framebuf::default(),
            viewport: Viewport::default(),
            vs: None,
            fs: None,
            attribs: Attribs::new(),
            topology: Topology::default(),
            winding: Winding::default(),
            raster: tri_fill,
            scratch: Scratch::new(),
            stats: Stats::new(),
        }
    }
}

impl<'a> Renderer<'a> {
    /// Returns a renderer with an empty render target, an empty viewport,
    /// and nothing bound.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reallocates the render target as `w` × `h` pixels with
    /// `bytes_per_pixel` bytes of color per pixel.
    ///
    /// The previous contents are discarded, and the new buffers are
    /// zero-filled.
    ///
    /// # Panics
    /// If `w` or `h` is zero, or `bytes_per_pixel` is not in 1..=4.
    #[track_caller]
    pub fn set_framebuffer(&mut self, w: usize, h: usize, bytes_per_pixel: usize) {
        assert!(w > 0 && h > 0, "framebuffer size should be nonzero, got {w}×{h}");
        assert!(
            (1..=4).contains(&bytes_per_pixel),
            "bytes per pixel should be in 1..=4, got {bytes_per_pixel}"
        );
        log::debug!("allocating {w}×{h} framebuffer, {bytes_per_pixel} bytes per pixel");
        self.fb = Framebuf::new(w, h, bytes_per_pixel);
    }

    /// Sets the viewport rectangle, keeping the current depth range.
    pub fn set_viewport(&mut self, x: i32, y: i32, width: u32, height: u32) {
        self.viewport = Viewport { x, y, width, height, ..self.viewport };
    }

    /// Sets the depth range, clamping both values to [0, 1].
    pub fn set_depth_range(&mut self, near: f32, far: f32) {
        self.viewport.near = near.clamp(0.0, 1.0);
        self.viewport.far = far.clamp(0.0, 1.0);
    }

    /// Binds the vertex shader used by subsequent draws.
    pub fn set_vertex_shader(&mut self, vs: &'a Shader<dyn VertexShader + 'a>) {
        self.vs = Some(vs);
    }

    /// Binds the fragment shader used by subsequent draws.
    pub fn set_fragment_shader(&mut self, fs: &'a Shader<dyn FragmentShader + 'a>) {
        self.fs = Some(fs);
    }

    /// Binds an attribute stream to `slot`.
    ///
    /// # Panics
    /// If `slot` is not less than [`MAX_ATTRIBS`][attrib::MAX_ATTRIBS].
    #[track_caller]
    pub fn set_attribute(&mut self, slot: usize, stream: AttribStream<'a>) {
        self.attribs.bind(slot, stream);
    }

    /// Unbinds the attribute stream bound to `slot`, if any.
    ///
    /// # Panics
    /// If `slot` is not less than [`MAX_ATTRIBS`][attrib::MAX_ATTRIBS].
    #[track_caller]
    pub fn clear_attribute(&mut self, slot: usize) {
        self.attribs.unbind(slot);
    }

    /// Sets how vertices are assembled into triangles.
    pub fn set_topology(&mut self, topology: Topology) {
        self.topology = topology;
    }

    /// Sets the vertex order of front-facing triangles.
    pub fn set_winding(&mut self, winding: Winding) {
        self.winding = winding;
    }

    /// Sets the function that rasterizes each triangle of subsequent draws.
    ///
    /// The default is [`tri_fill`]. A replacement receives triangles in
    /// window space, counter-clockwise if front-facing, and is responsible
    /// for culling and for staying within the bounds of the render target.
    pub fn set_rasterizer(&mut self, raster: Rasterizer) {
        self.raster = raster;
    }

    /// Returns the color buffer.
    pub fn color_buf(&self) -> &PixelBuf {
        &self.fb.color
    }
    /// Returns the depth buffer.
    pub fn depth_buf(&self) -> &PixelBuf {
        &self.fb.depth
    }
    /// Returns the render target.
    pub fn framebuf(&self) -> &Framebuf {
        &self.fb
    }
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }
    pub fn topology(&self) -> Topology {
        self.topology
    }
    pub fn winding(&self) -> Winding {
        self.winding
    }
    /// Returns the bound attribute streams.
    pub fn attribs(&self) -> &Attribs<'a> {
        &self.attribs
    }

    /// Returns the statistics accumulated over all draws since creation
    /// or the last call to [`reset_stats`][Self::reset_stats].
    pub fn stats(&self) -> &Stats {
        &self.stats
    }
    /// Resets the accumulated statistics to zero.
    pub fn reset_stats(&mut self) {
        self.stats = Stats::new();
    }

    /// Fills the color and depth buffers with the clear values of
    /// [`ctx`][Self::ctx]. A buffer whose clear value is `None` is left
    /// untouched.
    pub fn clear(&mut self) {
        if let Some(c) = self.ctx.color_clear {
            self.fb.clear_color(c);
        }
        if let Some(z) = self.ctx.depth_clear {
            self.fb.clear_depth(z);
        }
    }

    /// Draws the triangles formed by vertices `start..start + count`.
    ///
    /// # Errors
    /// * [`Error::MissingShader`] if no vertex or fragment shader is bound.
    /// * [`Error::IndexOutOfBounds`] if `start + count` overflows.
    pub fn try_draw(&mut self, start: usize, count: usize) -> Result<(), Error> {
        if start.checked_add(count).is_none() {
            return Err(Error::IndexOutOfBounds { end: usize::MAX, len: usize::MAX });
        }
        self.run(start, count, |i| i)
    }

    /// Draws the triangles formed by vertices `start..start + count`.
    ///
    /// # Panics
    /// If [`try_draw`][Self::try_draw] would return an error, or if
    /// rendering panics. The latter happens if the vertex shader does not
    /// output a position, or outputs varyings of inconsistent kinds.
    #[track_caller]
    pub fn draw(&mut self, start: usize, count: usize) {
        if let Err(e) = self.try_draw(start, count) {
            panic!("{e}");
        }
    }

    /// Draws the triangles formed by the vertices whose indices are
    /// `indices[start..start + count]`.
    ///
    /// Primitive assembly works on positions of the index buffer; each
    /// position is then replaced by the vertex index stored there.
    ///
    /// # Errors
    /// * [`Error::MissingShader`] if no vertex or fragment shader is bound.
    /// * [`Error::IndexOutOfBounds`] if `start + count` exceeds the length
    ///   of `indices`.
    pub fn try_draw_indexed(
        &mut self,
        indices: &[usize],
        start: usize,
        count: usize,
    ) -> Result<(), Error> {
        let len = indices.len();
        match start.checked_add(count) {
            Some(end) if end <= len => self.run(start, count, |i| indices[i]),
            end => Err(Error::IndexOutOfBounds { end: end.unwrap_or(usize::MAX), len }),
        }
    }

    /// Draws the triangles formed by the vertices whose indices are
    /// `indices[start..start + count]`.
    ///
    /// # Panics
    /// If [`try_draw_indexed`][Self::try_draw_indexed] would return an
    /// error, or if rendering panics.
    #[track_caller]
    pub fn draw_indexed(&mut self, indices: &[usize], start: usize, count: usize) {
        if let Err(e) = self.try_draw_indexed(indices, start, count) {
            panic!("{e}");
        }
    }

    fn run(
        &mut self,
        start: usize,
        count: usize,
        index: impl Fn(usize) -> usize,
    ) -> Result<(), Error> {
        let vs = self.vs.ok_or(Error::MissingShader(Stage::Vertex))?;
        let fs = self.fs.ok_or(Error::MissingShader(Stage::Fragment))?;

        let mut stats = Stats::start();
        stats.calls = 1;

        let pipeline = Pipeline {
            vs,
            fs,
            attribs: &self.attribs,
            viewport: &self.viewport,
            ctx: &self.ctx,
            raster: self.raster,
        };
        let tris = self.topology.triangles(start, count, self.winding);
        pipeline.draw(tris, index, &mut self.fb, &mut self.scratch, &mut stats);

        let stats = stats.finish();
        log::debug!(
            "drew {:?} {start}..{}: {} triangles, {} fragments written",
            self.topology,
            start + count,
            stats.prims.o,
            stats.frags.o,
        );
        self.stats += stats;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use crate::math::vec4;

    use super::{value::ShaderValue, *};

    #[test]
    fn new_renderer_state() {
        let r = Renderer::new();
        assert!(r.color_buf().is_empty());
        assert_eq!(*r.viewport(), Viewport::new(0, 0, 0, 0));
        assert_eq!((r.viewport().near, r.viewport().far), (0.0, 1.0));
        assert_eq!(r.topology(), Topology::TriangleList);
        assert_eq!(r.winding(), Winding::CounterClockwise);
        assert_eq!(r.stats().calls, 0);
    }

    #[test]
    fn depth_range_is_clamped() {
        let mut r = Renderer::new();
        r.set_depth_range(-0.5, 2.0);
        assert_eq!((r.viewport().near, r.viewport().far), (0.0, 1.0));
        r.set_depth_range(0.75, 0.25);
        assert_eq!((r.viewport().near, r.viewport().far), (0.75, 0.25));
    }

    #[test]
    fn set_viewport_keeps_depth_range() {
        let mut r = Renderer::new();
        r.set_depth_range(0.1, 0.9);
        r.set_viewport(1, 2, 3, 4);
        assert_eq!(
            *r.viewport(),
            Viewport { x: 1, y: 2, width: 3, height: 4, near: 0.1, far: 0.9 }
        );
    }

    #[test]
    fn set_framebuffer_reallocates() {
        let mut r = Renderer::new();
        r.set_framebuffer(4, 2, 3);
        r.clear();
        assert_eq!(r.color_buf().pixel(3, 1), [0, 0, 0]);
        assert_eq!(r.depth_buf().pixel(3, 1), f32::INFINITY.to_ne_bytes());

        r.set_framebuffer(2, 2, 4);
        assert_eq!(r.color_buf().width(), 2);
        assert_eq!(r.color_buf().bytes_per_pixel(), 4);
        assert!(r.depth_buf().data().iter().all(|&b| b == 0));
    }

    #[test]
    #[should_panic = "bytes per pixel should be in 1..=4, got 5"]
    fn set_framebuffer_too_wide_pixels() {
        Renderer::new().set_framebuffer(1, 1, 5);
    }

    #[test]
    #[should_panic = "framebuffer size should be nonzero"]
    fn set_framebuffer_empty() {
        Renderer::new().set_framebuffer(0, 10, 4);
    }

    #[test]
    fn draw_without_shaders_is_an_error() {
        let fs = Shader::new(
            |_: shader::Frag, _: &[ShaderValue]| vec4(1.0, 1.0, 1.0, 1.0),
            vec![],
        );
        let mut r = Renderer::new();
        assert_eq!(r.try_draw(0, 3), Err(Error::MissingShader(Stage::Vertex)));
        r.set_fragment_shader(&fs);
        assert_eq!(r.try_draw(0, 3), Err(Error::MissingShader(Stage::Vertex)));
        assert_eq!(r.stats().calls, 0);
    }

    #[test]
    #[should_panic = "no fragment shader bound"]
    fn draw_without_fragment_shader_panics() {
        let vs = Shader::new(
            |_: usize, _: &Attribs, _: &[ShaderValue]| {
                vec![ShaderValue::from(vec4(0.0, 0.0, 0.0, 1.0))]
            },
            vec![],
        );
        let mut r = Renderer::new();
        r.set_vertex_shader(&vs);
        r.draw(0, 3);
    }

    fn mark_corner(
        _: &raster::Triangle,
        _: &Shader<dyn FragmentShader + '_>,
        _: &Context,
        fb: &mut Framebuf,
        _: &mut Scratch,
    ) -> stats::Throughput {
        fb.set_color(0, 0, 0xFF12_3456);
        stats::Throughput { i: 1, o: 1 }
    }

    #[test]
    fn custom_rasterizer_receives_every_triangle() {
        // Degenerate, so the default rasterizer would cull them
        let vs = Shader::new(
            |_: usize, _: &Attribs, _: &[ShaderValue]| {
                vec![ShaderValue::from(vec4(0.0, 0.0, 0.0, 1.0))]
            },
            vec![],
        );
        let fs = Shader::new(
            |_: shader::Frag, _: &[ShaderValue]| vec4(1.0, 1.0, 1.0, 1.0),
            vec![],
        );
        let mut r = Renderer::new();
        r.set_framebuffer(4, 4, 4);
        r.set_viewport(0, 0, 4, 4);
        r.set_vertex_shader(&vs);
        r.set_fragment_shader(&fs);
        r.clear();

        r.draw(0, 6);
        assert_eq!(r.stats().prims.o, 0);
        assert_eq!(r.framebuf().color_at(0, 0), 0xFF00_0000);

        r.set_rasterizer(mark_corner);
        r.draw(0, 6);
        assert_eq!(r.stats().prims.o, 2);
        assert_eq!(r.stats().frags, stats::Throughput { i: 2, o: 2 });
        assert_eq!(r.framebuf().color_at(0, 0), 0xFF12_3456);
    }

    #[test]
    fn indexed_draw_out_of_bounds() {
        let mut r = Renderer::new();
        assert_eq!(
            r.try_draw_indexed(&[0, 1, 2], 1, 3),
            Err(Error::IndexOutOfBounds { end: 4, len: 3 })
        );
    }

    #[test]
    fn draw_count_overflow() {
        let mut r = Renderer::new();
        assert!(matches!(
            r.try_draw(usize::MAX, 3),
            Err(Error::IndexOutOfBounds { .. })
        ));
    }
}
