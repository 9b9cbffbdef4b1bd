//! Errors reported by the checked (`try_*`) rendering APIs.
//!
//! The unchecked counterparts of those APIs panic with the [`Display`]
//! text of the same error, as they are used in contexts where an error
//! can only result from a programming mistake.
//!
//! [`Display`]: core::fmt::Display

use crate::render::{shader::Stage, value::Kind};

/// An error in using the rendering pipeline.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    /// Two shader values of different kinds were combined, or a shader
    /// value was read as the wrong kind.
    #[error("shader value type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: Kind, found: Kind },

    /// A draw was issued with no shader bound for the given stage.
    #[error("no {0} shader bound")]
    MissingShader(Stage),

    /// A vertex shader read an attribute slot with no stream bound.
    #[error("no attribute stream bound to slot {0}")]
    UnboundAttrib(usize),

    /// A draw command referenced vertices past the end of an index buffer
    /// or past the addressable range.
    #[error("draw range ends at {end} but only {len} indices are available")]
    IndexOutOfBounds { end: usize, len: usize },
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn display() {
        let e = Error::TypeMismatch { expected: Kind::Vec4, found: Kind::Mat3 };
        assert_eq!(
            e.to_string(),
            "shader value type mismatch: expected vec4, found mat3"
        );
        assert_eq!(
            Error::MissingShader(Stage::Fragment).to_string(),
            "no fragment shader bound"
        );
        assert_eq!(
            Error::UnboundAttrib(3).to_string(),
            "no attribute stream bound to slot 3"
        );
    }
}
