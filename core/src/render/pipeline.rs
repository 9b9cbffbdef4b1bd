//! Vertex processing and primitive dispatch.
//!
//! For each triangle of a draw, the pipeline invokes the vertex shader on
//! the three vertices, projects the resulting clip-space positions to window
//! space, and hands the triangle to the bound [rasterizer][Rasterizer].
//!
//! There is no clipping stage. Vertices behind the eye or outside the view
//! volume are projected like any other; [`tri_fill`][super::raster::tri_fill]
//! culls triangles with non-finite window coordinates and clamps the rest to the bounds of the
//! render target.

use crate::math::{Vec4, vec4};

use super::{
    Viewport,
    attrib::Attribs,
    ctx::Context,
    raster::{Rasterizer, Scratch, Triangle},
    shader::{FragmentShader, Shader, VertexShader},
    stats::Stats,
    target::Framebuf,
    value::{ShaderValue, Varyings},
};

/// The state a draw call reads, borrowed from the renderer for the
/// duration of the call.
#[derive(Copy, Clone, Debug)]
pub struct Pipeline<'a> {
    pub vs: &'a Shader<dyn VertexShader + 'a>,
    pub fs: &'a Shader<dyn FragmentShader + 'a>,
    pub attribs: &'a Attribs<'a>,
    pub viewport: &'a Viewport,
    pub ctx: &'a Context,
    pub raster: Rasterizer,
}

impl Pipeline<'_> {
    /// Renders the triangles whose vertex positions are yielded by `tris`
    /// into `fb`, and records the work done to `stats`.
    ///
    /// Each position is mapped to a vertex index by `index` before being
    /// passed to the vertex shader.
    ///
    /// # Panics
    /// If the first output of the vertex shader is not a
    /// [`ShaderValue::Vec4`].
    pub fn draw(
        &self,
        tris: impl Iterator<Item = [usize; 3]>,
        index: impl Fn(usize) -> usize,
        fb: &mut Framebuf,
        scratch: &mut Scratch,
        stats: &mut Stats,
    ) {
        for positions in tris {
            let varyings = positions
                .map(|p| self.vs.shade_vertex(index(p), self.attribs));
            let verts = varyings.each_ref().map(|v| {
                to_screen(clip_position(v), self.viewport)
            });
            stats.prims.i += 1;
            stats.verts.i += 3;

            let tri = Triangle { verts, varyings };
            let frags = (self.raster)(&tri, self.fs, self.ctx, fb, scratch);
            if frags.i > 0 {
                stats.prims.o += 1;
                stats.verts.o += 3;
            }
            stats.frags += frags;
        }
    }
}

/// Maps a clip-space position to window space.
///
/// Performs the perspective divide, then maps *x* and *y* to the viewport
/// rectangle and *z* to the depth range. The reciprocal of the clip-space
/// *w* is kept as the fourth component for perspective correction.
///
/// # Examples
/// ```
/// use rasterpipe_core::{math::vec4, render::{Viewport, pipeline::to_screen}};
///
/// let vp = Viewport::new(0, 0, 640, 480);
/// let win = to_screen(vec4(0.5, -1.0, 0.0, 2.0), &vp);
/// assert_eq!(win, vec4(400.0, 120.0, 0.5, 0.5));
/// ```
pub fn to_screen(clip: Vec4, vp: &Viewport) -> Vec4 {
    let inv_w = 1.0 / clip.w();
    let [x, y, z] = clip.xyz().0.map(|c| c * inv_w);

    let (half_w, half_h) = (0.5 * vp.width as f32, 0.5 * vp.height as f32);
    vec4(
        half_w * x + vp.x as f32 + half_w,
        half_h * y + vp.y as f32 + half_h,
        0.5 * (vp.far - vp.near) * z + 0.5 * (vp.far + vp.near),
        inv_w,
    )
}

/// Returns the clip-space position of a vertex shader output.
#[track_caller]
fn clip_position(out: &Varyings) -> Vec4 {
    match out.first() {
        Some(ShaderValue::Vec4(pos)) => *pos,
        other => panic!(
            "vertex shader output 0 should be a vec4 position, got {:?}",
            other.map(ShaderValue::kind)
        ),
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use crate::assert_approx_eq;

    use super::*;

    fn vp() -> Viewport {
        Viewport::new(10, 20, 200, 100)
    }

    #[test]
    fn ndc_corners_map_to_viewport_corners() {
        let lo = to_screen(vec4(-1.0, -1.0, -1.0, 1.0), &vp());
        let hi = to_screen(vec4(1.0, 1.0, 1.0, 1.0), &vp());
        assert_eq!(lo, vec4(10.0, 20.0, 0.0, 1.0));
        assert_eq!(hi, vec4(210.0, 120.0, 1.0, 1.0));
    }

    #[test]
    fn perspective_divide_keeps_reciprocal_w() {
        let a = to_screen(vec4(1.0, 2.0, 3.0, 4.0), &vp());
        let b = to_screen(vec4(0.25, 0.5, 0.75, 1.0), &vp());
        assert_approx_eq!(a.xyz(), b.xyz());
        assert_eq!(a.w(), 0.25);
        assert_eq!(b.w(), 1.0);
    }

    #[test]
    fn depth_range_maps_ndc_z() {
        let mut vp = vp();
        vp.near = 0.25;
        vp.far = 0.75;
        assert_eq!(to_screen(vec4(0.0, 0.0, -1.0, 1.0), &vp).z(), 0.25);
        assert_eq!(to_screen(vec4(0.0, 0.0, 0.0, 1.0), &vp).z(), 0.5);
        assert_eq!(to_screen(vec4(0.0, 0.0, 1.0, 1.0), &vp).z(), 0.75);
    }

    #[test]
    fn clip_position_reads_slot_zero() {
        let out = vec![vec4(1.0, 2.0, 3.0, 4.0).into(), 1.0.into()];
        assert_eq!(clip_position(&out), vec4(1.0, 2.0, 3.0, 4.0));
    }

    #[test]
    #[should_panic = "vertex shader output 0 should be a vec4 position"]
    fn clip_position_of_wrong_kind_panics() {
        clip_position(&vec![ShaderValue::Scalar(1.0)]);
    }

    #[test]
    #[should_panic = "got None"]
    fn clip_position_of_empty_output_panics() {
        clip_position(&vec![]);
    }
}
