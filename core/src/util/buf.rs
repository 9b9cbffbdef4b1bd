//! Untyped two-dimensional pixel storage.

use alloc::{vec, vec::Vec};
use core::fmt::{self, Debug, Formatter};

/// A rectangular buffer of pixels, each an opaque run of bytes.
///
/// `PixelBuf` stores its pixels contiguously in row-major order, so that
/// the pixel at (x, y) occupies the bytes starting at offset
/// ```text
/// (y * width + x) * bytes_per_pixel
/// ```
/// of the backing store. The buffer does not interpret the bytes; the
/// color buffer of a render target holds packed 8-bit channels, the depth
/// buffer holds native-endian `f32`s.
///
/// All coordinate arguments must be within bounds; accessing a pixel
/// outside the buffer panics.
///
/// # Examples
/// ```
/// # use rasterpipe_core::util::buf::PixelBuf;
/// let mut buf = PixelBuf::new(4, 2, 3);
/// buf.set_pixel(1, 1, &[0xAA, 0xBB, 0xCC]);
/// assert_eq!(buf.pixel(1, 1), &[0xAA, 0xBB, 0xCC]);
/// assert_eq!(buf.pixel(0, 0), &[0, 0, 0]);
/// ```
#[derive(Clone, Default, Eq, PartialEq)]
pub struct PixelBuf {
    w: usize,
    h: usize,
    bpp: usize,
    data: Vec<u8>,
}

impl PixelBuf {
    /// Returns a zero-filled buffer of `w` × `h` pixels, each
    /// `bytes_per_pixel` bytes long.
    ///
    /// # Panics
    /// If the size of the buffer in bytes overflows `usize`.
    #[track_caller]
    pub fn new(w: usize, h: usize, bytes_per_pixel: usize) -> Self {
        let Some(len) = w
            .checked_mul(h)
            .and_then(|n| n.checked_mul(bytes_per_pixel))
        else {
            panic!("pixel buffer size overflows usize: {w}×{h}×{bytes_per_pixel}")
        };
        Self { w, h, bpp: bytes_per_pixel, data: vec![0; len] }
    }

    /// Returns the width of `self` in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.w
    }
    /// Returns the height of `self` in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.h
    }
    /// Returns the size of a single pixel in bytes.
    #[inline]
    pub fn bytes_per_pixel(&self) -> usize {
        self.bpp
    }
    /// Returns whether `self` has no pixels.
    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    /// Returns the raw bytes of `self`.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }
    /// Returns the raw bytes of `self` mutably.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Copies `pixel` to position (x, y).
    ///
    /// # Panics
    /// If (x, y) is out of bounds or `pixel.len()` is not the pixel size.
    #[inline]
    #[track_caller]
    pub fn set_pixel(&mut self, x: usize, y: usize, pixel: &[u8]) {
        let i = self.to_index(x, y);
        self.data[i..i + self.bpp].copy_from_slice(pixel);
    }

    /// Copies the pixel at position (x, y) to `out`.
    ///
    /// # Panics
    /// If (x, y) is out of bounds or `out.len()` is not the pixel size.
    #[inline]
    #[track_caller]
    pub fn get_pixel(&self, x: usize, y: usize, out: &mut [u8]) {
        out.copy_from_slice(self.pixel(x, y));
    }

    /// Returns the bytes of the pixel at position (x, y).
    ///
    /// # Panics
    /// If (x, y) is out of bounds.
    #[inline]
    #[track_caller]
    pub fn pixel(&self, x: usize, y: usize) -> &[u8] {
        let i = self.to_index(x, y);
        &self.data[i..i + self.bpp]
    }

    /// Returns the bytes of row `y`.
    ///
    /// # Panics
    /// If `y` is out of bounds.
    #[track_caller]
    pub fn row(&self, y: usize) -> &[u8] {
        let i = self.to_index(0, y);
        &self.data[i..i + self.row_len()]
    }

    /// Copies a whole scanline of pixels into row `y`.
    ///
    /// # Panics
    /// If `y` is out of bounds or `pixels.len()` is not the row size.
    #[track_caller]
    pub fn set_row(&mut self, y: usize, pixels: &[u8]) {
        let i = self.to_index(0, y);
        let n = self.row_len();
        self.data[i..i + n].copy_from_slice(pixels);
    }

    /// Fills every pixel with `value`.
    ///
    /// # Panics
    /// If `value.len()` is not the pixel size.
    pub fn clear(&mut self, value: &[u8]) {
        assert_eq!(
            value.len(),
            self.bpp,
            "clear value should be exactly one pixel long"
        );
        if self.bpp == 0 {
            return;
        }
        for px in self.data.chunks_exact_mut(self.bpp) {
            px.copy_from_slice(value);
        }
    }

    #[inline]
    fn row_len(&self) -> usize {
        self.w * self.bpp
    }

    #[inline]
    #[track_caller]
    fn to_index(&self, x: usize, y: usize) -> usize {
        if x >= self.w || y >= self.h {
            self.position_out_of_bounds(x, y);
        }
        (y * self.w + x) * self.bpp
    }

    #[cold]
    #[inline(never)]
    #[track_caller]
    fn position_out_of_bounds(&self, x: usize, y: usize) -> ! {
        panic!(
            "position (x={x}, y={y}) out of bounds (0..{}, 0..{})",
            self.w, self.h
        )
    }
}

impl Debug for PixelBuf {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("PixelBuf")
            .field("w", &self.w)
            .field("h", &self.h)
            .field("bpp", &self.bpp)
            .finish_non_exhaustive()
    }
}
