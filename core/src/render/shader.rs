//! Fragment and vertex shaders.
//!
//! Shaders are functions that are used to customize vertex and fragment
//! handling during rendering.
//!
//! A *vertex shader* is invoked once for each vertex of each triangle drawn.
//! It receives the index of the vertex and the bound attribute streams, and
//! outputs the clip-space position of the vertex followed by any number of
//! [varyings][Varyings] to be interpolated across the triangle.
//!
//! A *fragment shader* computes the color of each individual pixel, or
//! fragment, drawn. It receives the varyings interpolated to the fragment's
//! position with perspective correction.
//!
//! Both kinds of shader also receive the [uniforms][Uniforms] owned by the
//! [`Shader`] they are wrapped in.

use core::fmt::{self, Debug, Display, Formatter};

use crate::math::Vec4;

use super::{
    attrib::Attribs,
    value::{ShaderValue, Uniforms, Varyings},
};

/// Trait for vertex shaders, used to transform vertices and perform other
/// per-vertex computations.
pub trait VertexShader {
    /// Computes the outputs of the vertex with index `index`.
    ///
    /// The first output must be the clip-space position of the vertex as a
    /// [`ShaderValue::Vec4`].
    fn shade_vertex(
        &self,
        index: usize,
        attribs: &Attribs<'_>,
        uniforms: &[ShaderValue],
    ) -> Varyings;
}

/// Trait for fragment shaders, used to compute the color of each individual
/// pixel, or fragment, rendered.
pub trait FragmentShader {
    /// Computes the color of `frag` as RGBA components in the range [0, 1].
    /// Returns either `Some(color)`, or `None` if the fragment should be
    /// discarded.
    fn shade_fragment(
        &self,
        frag: Frag<'_>,
        uniforms: &[ShaderValue],
    ) -> Option<Vec4>;
}

/// A fragment, or a single "pixel" in a rasterized triangle.
#[derive(Copy, Clone, Debug)]
pub struct Frag<'a> {
    /// The window-space position of the fragment.
    ///
    /// `x` and `y` are the pixel center, `z` is the interpolated depth, and
    /// `w` is the interpolated reciprocal of the clip-space *w*.
    pub pos: Vec4,
    /// The interpolated varyings.
    ///
    /// These are the vertex shader outputs *after* the position, so
    /// `var[0]` corresponds to the second vertex shader output.
    pub var: &'a [ShaderValue],
}

/// The pipeline stage a shader runs at.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Stage {
    Vertex,
    Fragment,
}

/// A shader program together with the uniforms it reads.
///
/// The renderer binds `&Shader<dyn VertexShader>` and
/// `&Shader<dyn FragmentShader>` separately; any `&Shader<S>` where `S`
/// implements one of the traits coerces to the respective reference.
///
/// # Examples
/// ```
/// use rasterpipe_core::prelude::*;
///
/// let fs = Shader::new(
///     |_: Frag, uni: &[ShaderValue]| Vec4::try_from(&uni[0]).ok(),
///     vec![vec4(1.0, 0.0, 0.0, 1.0).into()],
/// );
/// let mut r = Renderer::new();
/// r.set_fragment_shader(&fs);
/// ```
#[derive(Clone)]
pub struct Shader<S: ?Sized> {
    /// The uniforms passed to each invocation of the program.
    pub uniforms: Uniforms,
    /// The shader function.
    pub program: S,
}

impl<S> Shader<S> {
    /// Returns a new shader with the given program and uniforms.
    pub fn new(program: S, uniforms: Uniforms) -> Self {
        Self { uniforms, program }
    }
}

impl<S: VertexShader + ?Sized> Shader<S> {
    /// Invokes the program for the vertex with index `index`.
    #[inline]
    pub fn shade_vertex(&self, index: usize, attribs: &Attribs<'_>) -> Varyings {
        self.program.shade_vertex(index, attribs, &self.uniforms)
    }
}

impl<S: FragmentShader + ?Sized> Shader<S> {
    /// Invokes the program for `frag`.
    #[inline]
    pub fn shade_fragment(&self, frag: Frag<'_>) -> Option<Vec4> {
        self.program.shade_fragment(frag, &self.uniforms)
    }
}

impl<F> VertexShader for F
where
    F: Fn(usize, &Attribs<'_>, &[ShaderValue]) -> Varyings,
{
    #[inline]
    fn shade_vertex(
        &self,
        index: usize,
        attribs: &Attribs<'_>,
        uniforms: &[ShaderValue],
    ) -> Varyings {
        self(index, attribs, uniforms)
    }
}

impl<F, Out> FragmentShader for F
where
    F: Fn(Frag<'_>, &[ShaderValue]) -> Out,
    Out: Into<Option<Vec4>>,
{
    #[inline]
    fn shade_fragment(
        &self,
        frag: Frag<'_>,
        uniforms: &[ShaderValue],
    ) -> Option<Vec4> {
        self(frag, uniforms).into()
    }
}

impl<S: ?Sized> Debug for Shader<S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shader")
            .field("uniforms", &self.uniforms)
            .finish_non_exhaustive()
    }
}

impl Display for Stage {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Vertex => "vertex",
            Self::Fragment => "fragment",
        })
    }
}
