//! Vectors, matrices, and the interpolation math used by the rasterizer.
//!
//! Vectors and matrices are plain fixed-size `f32` arrays with the usual
//! arithmetic. They are the payloads of [shader values][crate::render::value]
//! and the types vertex and fragment shaders compute with.

pub use {
    approx::ApproxEq,
    mat::{Mat3, Mat4, Matrix, perspective, scale, translate},
    vary::{Grad, Plane},
    vec::{Vec2, Vec3, Vec4, Vector, splat, vec2, vec3, vec4},
};

pub mod approx;
pub mod float;
pub mod mat;
pub mod vary;
pub mod vec;
