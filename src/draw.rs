//! Entry points for executing draw commands.
//!
//! With no element buffer bound, the offset handed to `glDrawElements` is read as a client
//! pointer rather than a byte offset. To rule that out, draw calls take compile-time proof
//! of the bindings they rely on.

use crate::slot;
use crate::slot::marker::NotDefault;

type ActiveProgram<'a> = slot::program::Active<'a, NotDefault>;
type ActiveVertexArray<'a> = slot::vertex_array::Active<'a, NotDefault>;
type ActiveElementArray<'a> = slot::buffer::Active<'a, slot::buffer::ElementArray, NotDefault>;

use super::{gl, GLEnum, NotSync};

#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topology {
    Points = gl::POINTS,
    LineStrip = gl::LINE_STRIP,
    LineLoop = gl::LINE_LOOP,
    Lines = gl::LINES,
    TriangleStrip = gl::TRIANGLE_STRIP,
    TriangleFan = gl::TRIANGLE_FAN,
    Triangles = gl::TRIANGLES,
}
// Safety: is repr(u32) enum.
unsafe impl GLEnum for Topology {}

/// Specifies the datatype of indices to fetch from the element array.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementType {
    U8 = gl::UNSIGNED_BYTE,
    U16 = gl::UNSIGNED_SHORT,
    U32 = gl::UNSIGNED_INT,
}
// Safety: is repr(u32) enum.
unsafe impl GLEnum for ElementType {}
impl ElementType {
    /// Size in bytes of one index.
    #[must_use]
    pub fn size_of(&self) -> usize {
        match self {
            Self::U8 => std::mem::size_of::<u8>(),
            Self::U16 => std::mem::size_of::<u16>(),
            Self::U32 => std::mem::size_of::<u32>(),
        }
    }
}

/// `(first, count)` of a draw range, or `None` if it draws nothing.
///
/// # Panics
/// If the range ends before it starts.
fn span(range: &std::ops::Range<usize>) -> Option<(usize, usize)> {
    let count = range
        .end
        .checked_sub(range.start)
        .expect("draw range end before start");
    (count != 0).then_some((range.start, count))
}

#[derive(Copy, Clone)]
pub struct ArraysState<'a> {
    pub vertex_array: &'a ActiveVertexArray<'a>,
    pub program: &'a ActiveProgram<'a>,
}

#[derive(Copy, Clone)]
pub struct ElementsState<'a> {
    pub elements: &'a ActiveElementArray<'a>,
    pub vertex_array: &'a ActiveVertexArray<'a>,
    pub program: &'a ActiveProgram<'a>,
}

/// Bindings to `glDraw*`
pub struct Draw(pub(crate) NotSync);

impl Draw {
    /// Draw consecutive vertices from the bound vertex array, using its enabled attributes.
    #[doc(alias = "glDrawArrays")]
    pub fn arrays(&self, mode: Topology, vertices: std::ops::Range<usize>, _state: ArraysState) {
        let Some((first, count)) = span(&vertices) else {
            return;
        };
        unsafe {
            gl::DrawArrays(
                mode.as_gl(),
                first.try_into().expect("first vertex overflows GLint"),
                count.try_into().expect("vertex count overflows GLsizei"),
            );
        }
    }
    /// Fetch indices from the bound element buffer, and use those to fetch vertices
    /// from the bound vertex array.
    #[doc(alias = "glDrawElements")]
    pub fn elements(
        &self,
        mode: Topology,
        element_type: ElementType,
        elements: std::ops::Range<usize>,
        _state: ElementsState,
    ) {
        let Some((first, count)) = span(&elements) else {
            return;
        };
        let byte_offset = first * element_type.size_of();
        unsafe {
            gl::DrawElements(
                mode.as_gl(),
                count.try_into().expect("element count overflows GLsizei"),
                element_type.as_gl(),
                // A byte offset into the element buffer `_state` proves is bound.
                byte_offset as *const std::ffi::c_void,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_range_draws_nothing() {
        assert_eq!(span(&(3..3)), None);
        assert_eq!(span(&(0..0)), None);
    }

    #[test]
    fn span_is_first_and_count() {
        assert_eq!(span(&(0..6)), Some((0, 6)));
        assert_eq!(span(&(2..5)), Some((2, 3)));
    }

    #[test]
    #[should_panic(expected = "draw range end before start")]
    fn reversed_range_panics() {
        #[allow(clippy::reversed_empty_ranges)]
        let _ = span(&(5..2));
    }

    #[test]
    fn element_sizes() {
        assert_eq!(ElementType::U8.size_of(), 1);
        assert_eq!(ElementType::U16.size_of(), 2);
        assert_eq!(ElementType::U32.size_of(), 4);
        assert_eq!(ElementType::U32.as_gl(), gl::UNSIGNED_INT);
        assert_eq!(Topology::Triangles.as_gl(), gl::TRIANGLES);
    }
}
