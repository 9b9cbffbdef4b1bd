//! Vertex attribute streams.
//!
//! An attribute stream is a borrowed view of caller-owned vertex data,
//! read by vertex shaders by vertex index. The pipeline never copies or
//! owns the data it views.

use core::ops::Index;

use crate::Error;
use crate::math::{Vec2, Vec3, Vec4, vec2, vec3, vec4};

/// The maximum number of attribute streams bound at once.
pub const MAX_ATTRIBS: usize = 10;

/// A strided view of per-vertex `f32` components.
///
/// Vertex *i* occupies `components` floats starting at offset
/// `offset + i * stride` of the underlying slice. A stride of zero means
/// the data is tightly packed, equivalent to a stride of `components`.
///
/// # Examples
/// ```
/// # use rasterpipe_core::render::attrib::AttribStream;
/// // Interleaved position (xy) and texcoord (uv)
/// let data = [0.0, 0.0, 0.1, 0.2, 1.0, 0.0, 0.3, 0.4];
/// let pos = AttribStream::new(&data, 2).with_stride(4);
/// let uv = AttribStream::new(&data, 2).with_stride(4).with_offset(2);
///
/// assert_eq!(pos.get(1), &[1.0, 0.0]);
/// assert_eq!(uv.get(1), &[0.3, 0.4]);
/// ```
#[derive(Copy, Clone, Debug)]
pub struct AttribStream<'a> {
    data: &'a [f32],
    components: usize,
    stride: usize,
    offset: usize,
}

impl<'a> AttribStream<'a> {
    /// Returns a tightly packed stream of `components`-element vertices.
    ///
    /// # Panics
    /// If `components` is zero.
    pub fn new(data: &'a [f32], components: usize) -> Self {
        assert!(components > 0, "component count should be nonzero");
        Self { data, components, stride: 0, offset: 0 }
    }

    /// Returns `self` with the given stride, in floats.
    ///
    /// # Panics
    /// If `stride` is nonzero but less than the component count.
    pub fn with_stride(self, stride: usize) -> Self {
        assert!(
            stride == 0 || stride >= self.components,
            "stride {stride} should be at least the component count {}",
            self.components
        );
        Self { stride, ..self }
    }

    /// Returns `self` with the first vertex starting `offset` floats into
    /// the data.
    pub fn with_offset(self, offset: usize) -> Self {
        Self { offset, ..self }
    }

    /// Returns the number of components per vertex.
    #[inline]
    pub fn components(&self) -> usize {
        self.components
    }

    /// Returns the distance between consecutive vertices, in floats.
    #[inline]
    pub fn stride(&self) -> usize {
        if self.stride == 0 {
            self.components
        } else {
            self.stride
        }
    }

    /// Returns the size of a single component in bytes.
    #[inline]
    pub const fn elem_size(&self) -> usize {
        size_of::<f32>()
    }

    /// Returns the number of complete vertices in `self`.
    pub fn len(&self) -> usize {
        let avail = self.data.len().saturating_sub(self.offset);
        if avail < self.components {
            0
        } else {
            (avail - self.components) / self.stride() + 1
        }
    }

    /// Returns whether `self` contains no complete vertices.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the components of vertex `i`, or `None` if out of range.
    #[inline]
    pub fn try_get(&self, i: usize) -> Option<&'a [f32]> {
        let start = i.checked_mul(self.stride())?.checked_add(self.offset)?;
        self.data.get(start..start.checked_add(self.components)?)
    }

    /// Returns the components of vertex `i`.
    ///
    /// # Panics
    /// If `i` is out of range.
    #[inline]
    #[track_caller]
    pub fn get(&self, i: usize) -> &'a [f32] {
        match self.try_get(i) {
            Some(v) => v,
            None => vertex_out_of_bounds(i, self.len()),
        }
    }

    /// Returns vertex `i` as a 2-vector, with missing components zero.
    #[track_caller]
    pub fn vec2(&self, i: usize) -> Vec2 {
        let [x, y, ..] = self.padded(i, 0.0);
        vec2(x, y)
    }
    /// Returns vertex `i` as a 3-vector, with missing components zero.
    #[track_caller]
    pub fn vec3(&self, i: usize) -> Vec3 {
        let [x, y, z, _] = self.padded(i, 0.0);
        vec3(x, y, z)
    }
    /// Returns vertex `i` as a 4-vector. Missing components are zero,
    /// except a missing *w* which is one.
    #[track_caller]
    pub fn vec4(&self, i: usize) -> Vec4 {
        let [x, y, z, w] = self.padded(i, 1.0);
        vec4(x, y, z, w)
    }

    #[track_caller]
    fn padded(&self, i: usize, w: f32) -> [f32; 4] {
        let mut res = [0.0, 0.0, 0.0, w];
        for (r, c) in res.iter_mut().zip(self.get(i)) {
            *r = *c;
        }
        res
    }
}

#[cold]
#[inline(never)]
#[track_caller]
fn vertex_out_of_bounds(i: usize, len: usize) -> ! {
    panic!("vertex index {i} out of bounds (0..{len})")
}

/// The attribute streams bound to a renderer, addressed by slot.
#[derive(Copy, Clone, Debug, Default)]
pub struct Attribs<'a> {
    slots: [Option<AttribStream<'a>>; MAX_ATTRIBS],
}

impl<'a> Attribs<'a> {
    /// Returns a set of attribute slots with nothing bound.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `stream` to `slot`, replacing any previous binding.
    ///
    /// # Panics
    /// If `slot >= MAX_ATTRIBS`.
    #[track_caller]
    pub fn bind(&mut self, slot: usize, stream: AttribStream<'a>) {
        self.slots[check_slot(slot)] = Some(stream);
    }

    /// Removes the binding of `slot`, if any.
    ///
    /// # Panics
    /// If `slot >= MAX_ATTRIBS`.
    #[track_caller]
    pub fn unbind(&mut self, slot: usize) {
        self.slots[check_slot(slot)] = None;
    }

    /// Returns the stream bound to `slot`, or `None` if the slot is empty
    /// or out of range.
    #[inline]
    pub fn get(&self, slot: usize) -> Option<&AttribStream<'a>> {
        self.slots.get(slot)?.as_ref()
    }

    /// Returns the stream bound to `slot`.
    ///
    /// # Errors
    /// [`Error::UnboundAttrib`] if the slot is empty or out of range.
    pub fn try_get(&self, slot: usize) -> Result<&AttribStream<'a>, Error> {
        self.get(slot).ok_or(Error::UnboundAttrib(slot))
    }

    /// Returns an iterator over the bound slots and their streams.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &AttribStream<'a>)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| Some((i, s.as_ref()?)))
    }
}

impl<'a> Index<usize> for Attribs<'a> {
    type Output = AttribStream<'a>;

    /// Returns the stream bound to `slot`.
    ///
    /// # Panics
    /// If no stream is bound to `slot`.
    #[track_caller]
    fn index(&self, slot: usize) -> &AttribStream<'a> {
        match self.try_get(slot) {
            Ok(s) => s,
            Err(e) => panic!("{e}"),
        }
    }
}

#[inline]
#[track_caller]
fn check_slot(slot: usize) -> usize {
    assert!(
        slot < MAX_ATTRIBS,
        "attribute slot {slot} out of bounds (0..{MAX_ATTRIBS})"
    );
    slot
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTERLEAVED: [f32; 12] = [
        0.0, 0.0, 0.0, 0.5, 0.5, //
        1.0, 0.0, 0.0, 0.6, 0.6, //
        0.0, 1.0,
    ];

    #[test]
    fn packed_stream() {
        let data = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let s = AttribStream::new(&data, 3);
        assert_eq!(s.stride(), 3);
        assert_eq!(s.len(), 2);
        assert_eq!(s.get(0), &[1.0, 2.0, 3.0]);
        assert_eq!(s.get(1), &[4.0, 5.0, 6.0]);
        assert_eq!(s.try_get(2), None);
        assert_eq!(s.elem_size(), 4);
    }

    #[test]
    fn strided_stream_with_offset() {
        let pos = AttribStream::new(&INTERLEAVED, 3).with_stride(5);
        let uv = AttribStream::new(&INTERLEAVED, 2)
            .with_stride(5)
            .with_offset(3);

        assert_eq!(pos.len(), 2);
        assert_eq!(pos.get(1), &[1.0, 0.0, 0.0]);
        assert_eq!(uv.len(), 2);
        assert_eq!(uv.get(1), &[0.6, 0.6]);
        assert_eq!(uv.try_get(2), None);
    }

    #[test]
    fn vector_reads_are_padded() {
        let data = [1.0, 2.0];
        let s = AttribStream::new(&data, 2);
        assert_eq!(s.vec2(0), vec2(1.0, 2.0));
        assert_eq!(s.vec3(0), vec3(1.0, 2.0, 0.0));
        assert_eq!(s.vec4(0), vec4(1.0, 2.0, 0.0, 1.0));
    }

    #[test]
    #[should_panic = "vertex index 2 out of bounds (0..2)"]
    fn get_out_of_bounds() {
        let data = [0.0; 4];
        let _ = AttribStream::new(&data, 2).get(2);
    }

    #[test]
    fn bind_and_unbind() {
        let data = [0.0; 4];
        let mut attrs = Attribs::new();
        assert!(attrs.get(0).is_none());

        attrs.bind(3, AttribStream::new(&data, 2));
        assert_eq!(attrs[3].components(), 2);
        assert_eq!(attrs.iter().map(|(i, _)| i).next(), Some(3));

        attrs.unbind(3);
        assert_eq!(attrs.try_get(3).err(), Some(Error::UnboundAttrib(3)));
        assert_eq!(attrs.iter().count(), 0);
    }

    #[test]
    #[should_panic = "no attribute stream bound to slot 1"]
    fn index_unbound_slot() {
        let _ = Attribs::new()[1];
    }

    #[test]
    #[should_panic = "attribute slot 10 out of bounds"]
    fn bind_out_of_range_slot() {
        let data = [0.0; 4];
        Attribs::new().bind(MAX_ATTRIBS, AttribStream::new(&data, 2));
    }
}
