//! Core functionality of the `rasterpipe` project.
//!
//! A software triangle rendering pipeline with programmable shaders. The
//! caller binds vertex attribute streams, a vertex shader, and a fragment
//! shader to a [`Renderer`][render::Renderer], then issues draw calls that
//! fill a color buffer and a depth buffer without any GPU involvement.
//!
//! Includes a small math library with vectors and matrices, a dynamically
//! typed [shader value][render::value::ShaderValue] model for passing data
//! between shader stages, and an incremental fixed-point rasterizer with
//! perspective-correct interpolation.
//!
//! # Crate features
//!
//! * `std`:
//!   Uses the floating-point functions of `std` and makes available items
//!   requiring timekeeping, such as measuring the time spent in draw calls.
//!
//!   If this feature is disabled, the crate only depends on `alloc`.
//!
//! * `libm`:
//!   Provides software implementations of floating-point functions via the
//!   [libm](https://crates.io/crates/libm) crate.
//!
//! * `mm`:
//!   Provides fast approximate implementations of floating-point functions
//!   via the [micromath](https://crates.io/crates/micromath) crate.
//!
//! All features are disabled by default.

#![no_std]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;
extern crate core;

pub mod error;
pub mod math;
pub mod render;
pub mod util;

pub use error::Error;

pub mod prelude {
    pub use crate::Error;

    pub use crate::math::{
        Mat3, Mat4, Vec2, Vec3, Vec4, perspective, scale, translate, vec2,
        vec3, vec4,
    };

    pub use crate::render::{
        Renderer, Viewport,
        attrib::{AttribStream, Attribs},
        ctx::Context,
        prim::{Topology, Winding},
        shader::{Frag, FragmentShader, Shader, VertexShader},
        value::{Kind, ShaderValue, Uniforms, Varyings},
    };

    pub use crate::util::buf::PixelBuf;
}
