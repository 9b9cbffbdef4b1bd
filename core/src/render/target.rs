//! Render targets such as framebuffers.
//!
//! The typical render target comprises a color buffer, a depth buffer,
//! and possible auxiliary buffers. Special render targets can be used,
//! for example, for visibility or occlusion computations.

use crate::math::Vec4;
use crate::util::buf::PixelBuf;

/// Size of a single depth buffer entry in bytes.
pub const DEPTH_BYTES: usize = size_of::<f32>();

/// A color buffer and a depth buffer of equal dimensions.
#[derive(Clone, Debug)]
pub struct Framebuf {
    /// The color buffer, packed 8-bit channels with the first channel in
    /// the lowest byte.
    pub color: PixelBuf,
    /// The depth buffer, one native-endian `f32` per pixel.
    pub depth: PixelBuf,
}

impl Framebuf {
    /// Returns a zero-filled framebuffer of `w` × `h` pixels with
    /// `bytes_per_pixel` bytes of color per pixel.
    pub fn new(w: usize, h: usize, bytes_per_pixel: usize) -> Self {
        Self {
            color: PixelBuf::new(w, h, bytes_per_pixel),
            depth: PixelBuf::new(w, h, DEPTH_BYTES),
        }
    }

    /// Returns the width of `self` in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.color.width()
    }
    /// Returns the height of `self` in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.color.height()
    }

    /// Returns the stored depth at (x, y).
    #[inline]
    pub fn depth_at(&self, x: usize, y: usize) -> f32 {
        let mut b = [0; DEPTH_BYTES];
        self.depth.get_pixel(x, y, &mut b);
        f32::from_ne_bytes(b)
    }

    /// Stores `z` as the depth at (x, y).
    #[inline]
    pub fn set_depth(&mut self, x: usize, y: usize, z: f32) {
        self.depth.set_pixel(x, y, &z.to_ne_bytes());
    }

    /// Stores a packed color at (x, y), truncated to the color pixel size.
    #[inline]
    pub fn set_color(&mut self, x: usize, y: usize, packed: u32) {
        let bpp = self.color.bytes_per_pixel();
        self.color.set_pixel(x, y, &packed.to_le_bytes()[..bpp]);
    }

    /// Returns the color at (x, y) as a packed value, the bytes beyond the
    /// color pixel size read as zero.
    pub fn color_at(&self, x: usize, y: usize) -> u32 {
        let mut b = [0; 4];
        let px = self.color.pixel(x, y);
        b[..px.len()].copy_from_slice(px);
        u32::from_le_bytes(b)
    }

    /// Fills the color buffer with a packed color.
    pub fn clear_color(&mut self, packed: u32) {
        let bpp = self.color.bytes_per_pixel();
        self.color.clear(&packed.to_le_bytes()[..bpp]);
    }

    /// Fills the depth buffer with `z`.
    pub fn clear_depth(&mut self, z: f32) {
        self.depth.clear(&z.to_ne_bytes());
    }
}

impl Default for Framebuf {
    /// Returns an empty framebuffer with four bytes of color per pixel.
    fn default() -> Self {
        Self::new(0, 0, 4)
    }
}

/// Packs a color with components in the range [0, 1] into 32 bits.
///
/// Each component is scaled by 255 and truncated to a byte, saturating
/// out-of-range values. The first component becomes the lowest byte.
///
/// # Examples
/// ```
/// # use rasterpipe_core::{math::vec4, render::target::pack_color};
/// assert_eq!(pack_color(vec4(1.0, 0.0, 0.5, 1.0)), 0xFF_7F_00_FF);
/// ```
#[inline]
pub fn pack_color(c: Vec4) -> u32 {
    let [r, g, b, a] = c.0.map(|ch| (ch * 255.0) as u8);
    u32::from_le_bytes([r, g, b, a])
}
