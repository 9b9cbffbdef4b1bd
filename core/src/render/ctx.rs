//! Rendering context and parameters.

/// Parameters controlling how fragments are written to the render target.
///
/// The renderer keeps its context in the public field
/// [`Renderer::ctx`][super::Renderer::ctx]; it can be modified freely
/// between draw calls.
#[derive(Clone, Debug, PartialEq)]
pub struct Context {
    /// The packed color with which to fill the color buffer to clear it,
    /// if any.
    ///
    /// The color is packed the same way as fragment shader output: the
    /// first component is the lowest byte. Only the low bytes fitting in a
    /// pixel are used. If rendered geometry always fills the entire frame,
    /// `color_clear` can be set to `None` to avoid redundant work.
    pub color_clear: Option<u32>,

    /// The value with which to fill the depth buffer to clear it, if any.
    pub depth_clear: Option<f32>,

    /// Whether to do depth testing.
    ///
    /// If `true`, a fragment passes the depth test *iff* its depth is less
    /// than or equal to the stored depth. If `false`, every fragment
    /// passes.
    pub depth_test: bool,

    /// Whether to write depth values.
    ///
    /// If `false`, other fragment processing is done but the depth buffer
    /// is left unmodified.
    pub depth_write: bool,

    /// Whether to write color values.
    ///
    /// If `false`, other fragment processing is done but there is no color
    /// output. Useful for a depth-only prepass.
    pub color_write: bool,
}

impl Context {
    /// Returns whether a fragment at depth `new` passes the depth test
    /// against the stored depth `curr`.
    #[inline]
    pub fn depth_test(&self, new: f32, curr: f32) -> bool {
        !self.depth_test || new <= curr
    }
}

impl Default for Context {
    /// Creates a rendering context with default settings.
    ///
    /// The default values are:
    /// * Color clear:   Opaque black
    /// * Depth clear:   Positive infinity
    /// * Depth testing: Pass if nearer or equal
    /// * Depth writes:  Enabled
    /// * Color writes:  Enabled
    fn default() -> Self {
        Self {
            color_clear: Some(0xFF_00_00_00),
            depth_clear: Some(f32::INFINITY),
            depth_test: true,
            depth_write: true,
            color_write: true,
        }
    }
}
