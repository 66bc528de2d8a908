//! The static shapes the lessons draw, and their upload into GL buffers.

use crate::{
    buffer::{usage, Buffer},
    draw::{ArraysState, ElementType, ElementsState, Topology},
    program::LinkedProgram,
    vertex_array::{Attribute, VertexArray},
    Gl,
};

/// One vertex: a position in normalized device coordinates.
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
pub struct Vertex {
    pub position: [f32; 3],
}
impl Vertex {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            position: [x, y, z],
        }
    }
}

pub const TRIANGLE: [Vertex; 3] = [
    Vertex::new(-0.5, -0.5, 0.0),
    Vertex::new(0.5, -0.5, 0.0),
    Vertex::new(0.0, 0.5, 0.0),
];

/// Corners of the rectangle: top right, bottom right, bottom left, top left.
pub const RECTANGLE: [Vertex; 4] = [
    Vertex::new(0.5, 0.5, 0.0),
    Vertex::new(0.5, -0.5, 0.0),
    Vertex::new(-0.5, -0.5, 0.0),
    Vertex::new(-0.5, 0.5, 0.0),
];

/// Two triangles sharing the bottom-right/top-left diagonal of [`RECTANGLE`].
pub const RECTANGLE_INDICES: [u32; 6] = [0, 1, 3, 1, 2, 3];

/// Vertex shader input location the position attribute is fed into.
pub const POSITION_LOCATION: u32 = 0;

/// Geometry resident on the GPU, ready for a single draw call.
#[derive(Debug)]
pub struct Mesh {
    vertex_array: VertexArray,
    // Only referenced through the vertex array's attribute state.
    vertex_buffer: Buffer,
    vertex_count: usize,
    elements: Option<(Buffer, usize)>,
}

impl Mesh {
    /// Upload `vertices` (and `indices`, if any) into fresh buffers and record the
    /// position layout in a fresh vertex array.
    pub fn upload(gl: &mut Gl, vertices: &[Vertex], indices: Option<&[u32]>) -> Self {
        let [vertex_array] = gl.new.vertex_arrays();
        let [vertex_buffer] = gl.new.buffers();

        let mut active_array = gl.vertex_array.bind(&vertex_array);
        let array = gl.buffer.array.bind(&vertex_buffer);
        array.data(
            bytemuck::cast_slice(vertices),
            usage::Frequency::Static,
            usage::Access::Draw,
        );
        active_array.attribute(
            &array,
            POSITION_LOCATION,
            Attribute::packed_vec3_f32(),
            Some(true),
        );

        // The element buffer binding is vertex array state, so this has to
        // happen while the vertex array is still bound.
        let elements = if let Some(indices) = indices {
            let [element_buffer] = gl.new.buffers();
            gl.buffer.element_array.bind(&element_buffer).data(
                bytemuck::cast_slice(indices),
                usage::Frequency::Static,
                usage::Access::Draw,
            );
            Some((element_buffer, indices.len()))
        } else {
            None
        };

        gl.vertex_array.unbind();
        gl.buffer.array.unbind();

        log::debug!(
            "uploaded {} vertices, {} indices",
            vertices.len(),
            elements.as_ref().map_or(0, |(_, count)| *count)
        );

        Self {
            vertex_array,
            vertex_buffer,
            vertex_count: vertices.len(),
            elements,
        }
    }

    /// Number of vertices a draw of this mesh processes.
    #[must_use]
    pub fn draw_count(&self) -> usize {
        self.elements
            .as_ref()
            .map_or(self.vertex_count, |(_, count)| *count)
    }

    /// Release the vertex array and its buffers.
    pub fn delete(self, gl: &mut Gl) {
        gl.vertex_array.delete([self.vertex_array]);
        gl.buffer.delete([self.vertex_buffer]);
        if let Some((element_buffer, _)) = self.elements {
            gl.buffer.delete([element_buffer]);
        }
    }

    /// Issue the single draw call for this mesh with `program`.
    pub fn draw(&self, gl: &mut Gl, program: &LinkedProgram) {
        let program = gl.program.bind(program);
        let vertex_array = gl.vertex_array.bind(&self.vertex_array);
        let count = self.draw_count();

        match &self.elements {
            Some((element_buffer, _)) => {
                let elements = gl.buffer.element_array.bind(element_buffer);
                gl.draw.elements(
                    Topology::Triangles,
                    ElementType::U32,
                    0..count,
                    ElementsState {
                        elements: &elements,
                        vertex_array: &vertex_array,
                        program: &program,
                    },
                );
            }
            None => gl.draw.arrays(
                Topology::Triangles,
                0..count,
                ArraysState {
                    vertex_array: &vertex_array,
                    program: &program,
                },
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_is_three_packed_floats() {
        assert_eq!(std::mem::size_of::<Vertex>(), 12);
        assert_eq!(
            std::mem::size_of::<Vertex>(),
            Attribute::packed_vec3_f32().effective_stride()
        );
        let bytes: &[u8] = bytemuck::cast_slice(&TRIANGLE);
        assert_eq!(bytes.len(), 36);
    }

    #[test]
    fn rectangle_indices_stay_in_bounds() {
        assert!(RECTANGLE_INDICES
            .iter()
            .all(|&index| (index as usize) < RECTANGLE.len()));
        assert_eq!(RECTANGLE_INDICES.len() % 3, 0);
    }

    #[test]
    fn rectangle_reuses_the_shared_diagonal() {
        let [first, second] = [&RECTANGLE_INDICES[..3], &RECTANGLE_INDICES[3..]];
        let shared: Vec<_> = first.iter().filter(|i| second.contains(i)).collect();
        assert_eq!(shared, [&1, &3]);
    }

    /// A mesh over made-up names. Only its bookkeeping is inspected, nothing reaches the GL.
    fn fake_mesh(vertex_count: usize, index_count: Option<usize>) -> Mesh {
        use crate::ThinGLObject;
        let name = |n| crate::NonZeroName::new(n).unwrap();
        unsafe {
            Mesh {
                vertex_array: VertexArray::from_name(name(1)),
                vertex_buffer: Buffer::from_name(name(2)),
                vertex_count,
                elements: index_count.map(|count| (Buffer::from_name(name(3)), count)),
            }
        }
    }

    #[test]
    fn triangle_draws_its_vertices() {
        assert_eq!(fake_mesh(TRIANGLE.len(), None).draw_count(), 3);
    }

    #[test]
    fn indexed_mesh_draws_its_indices() {
        let mesh = fake_mesh(RECTANGLE.len(), Some(RECTANGLE_INDICES.len()));
        assert_eq!(mesh.draw_count(), 6);
    }

    #[test]
    fn shapes_fit_in_clip_space() {
        for vertex in TRIANGLE.iter().chain(RECTANGLE.iter()) {
            assert!(vertex.position.iter().all(|c| (-1.0..=1.0).contains(c)));
            assert_eq!(vertex.position[2], 0.0);
        }
    }
}
