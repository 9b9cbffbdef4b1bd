//! Primitive assembly.
//!
//! Turns a run of vertex positions into triangles according to the
//! configured [topology][Topology] and [winding order][Winding].

use core::iter::FusedIterator;

/// How consecutive vertices are grouped into triangles.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum Topology {
    /// Every three vertices form an independent triangle.
    #[default]
    TriangleList,
    /// Every vertex after the first two forms a triangle with the two
    /// vertices preceding it.
    TriangleStrip,
}

/// The vertex order of front-facing triangles in window space.
///
/// Triangles whose vertices appear in the opposite order are culled.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum Winding {
    Clockwise,
    #[default]
    CounterClockwise,
}

/// Iterator over the vertex positions of triangles, returned by
/// [`Topology::triangles`].
#[derive(Clone, Debug)]
pub struct Triangles {
    pos: usize,
    end: usize,
    step: usize,
    offsets: [[usize; 3]; 2],
    odd: bool,
}

impl Topology {
    /// Returns the number of positions between the first vertices of
    /// consecutive triangles.
    pub const fn step(self) -> usize {
        match self {
            Self::TriangleList => 3,
            Self::TriangleStrip => 1,
        }
    }

    /// Returns an iterator over the position triples of the triangles
    /// formed by positions `start..start + count`.
    ///
    /// Each triple is ordered so that a triangle facing the viewer is
    /// counter-clockwise. For strips, every other triangle has its last two
    /// positions swapped to keep the facing consistent. Positions left over
    /// after the last complete triangle are ignored.
    ///
    /// # Examples
    /// ```
    /// use rasterpipe_core::render::prim::{Topology, Winding};
    ///
    /// let tris: Vec<_> = Topology::TriangleStrip
    ///     .triangles(0, 5, Winding::CounterClockwise)
    ///     .collect();
    /// assert_eq!(tris, [[0, 1, 2], [1, 3, 2], [2, 3, 4]]);
    /// ```
    pub fn triangles(
        self,
        start: usize,
        count: usize,
        winding: Winding,
    ) -> Triangles {
        let mut offsets = match self {
            Self::TriangleList => [[0, 1, 2], [0, 1, 2]],
            Self::TriangleStrip => [[0, 1, 2], [0, 2, 1]],
        };
        if winding == Winding::Clockwise {
            for [_, b, c] in &mut offsets {
                core::mem::swap(b, c);
            }
        }
        Triangles {
            pos: start,
            end: start.saturating_add(count),
            step: self.step(),
            offsets,
            odd: false,
        }
    }
}

impl Iterator for Triangles {
    type Item = [usize; 3];

    #[inline]
    fn next(&mut self) -> Option<[usize; 3]> {
        if self.end.saturating_sub(self.pos) < 3 {
            return None;
        }
        let base = self.pos;
        let tri = self.offsets[self.odd as usize].map(|o| base + o);
        self.pos += self.step;
        self.odd = !self.odd;
        Some(tri)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = match self.end.saturating_sub(self.pos) {
            0..3 => 0,
            rem => (rem - 3) / self.step + 1,
        };
        (n, Some(n))
    }
}

impl ExactSizeIterator for Triangles {}
impl FusedIterator for Triangles {}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::{Topology::*, Winding::*, *};

    fn collect(t: Topology, start: usize, n: usize, w: Winding) -> Vec<[usize; 3]> {
        t.triangles(start, n, w).collect()
    }

    #[test]
    fn list_ccw() {
        assert_eq!(
            collect(TriangleList, 0, 6, CounterClockwise),
            [[0, 1, 2], [3, 4, 5]]
        );
    }

    #[test]
    fn list_cw_swaps_last_two() {
        assert_eq!(
            collect(TriangleList, 3, 6, Clockwise),
            [[3, 5, 4], [6, 8, 7]]
        );
    }

    #[test]
    fn list_ignores_trailing_vertices() {
        assert_eq!(collect(TriangleList, 0, 8, CounterClockwise).len(), 2);
        assert_eq!(collect(TriangleList, 0, 2, CounterClockwise), [] as [[usize; 3]; 0]);
        assert_eq!(TriangleList.triangles(0, 8, Clockwise).len(), 2);
    }

    #[test]
    fn strip_alternates_parity() {
        assert_eq!(
            collect(TriangleStrip, 0, 5, CounterClockwise),
            [[0, 1, 2], [1, 3, 2], [2, 3, 4]]
        );
        assert_eq!(
            collect(TriangleStrip, 0, 5, Clockwise),
            [[0, 2, 1], [1, 2, 3], [2, 4, 3]]
        );
    }

    #[test]
    fn strip_is_relative_to_start() {
        assert_eq!(
            collect(TriangleStrip, 10, 4, CounterClockwise),
            [[10, 11, 12], [11, 13, 12]]
        );
    }

    #[test]
    fn strip_size_hint_is_exact() {
        for n in 0..10 {
            let it = TriangleStrip.triangles(0, n, CounterClockwise);
            assert_eq!(it.len(), n.saturating_sub(2));
            assert_eq!(it.count(), n.saturating_sub(2));
        }
    }
}
