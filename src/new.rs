use crate::{
    buffer, gl, gl_gen_with, program, vertex_array, NonZeroName, NotSync,
    ThinGLObject,
};

/// Entry points for allocating GL objects, wrapping `glGen*` and `glCreate*`.
///
/// Usage:
/// ```no_run
/// # let gl : starting_gl::Gl = todo!();
/// let [vertex_buffer, element_buffer] = gl.new.buffers();
/// let [vao] = gl.new.vertex_arrays();
/// ```
pub struct New(pub(crate) NotSync);
impl New {
    /// Generate a set of new buffer objects.
    #[doc(alias = "glGenBuffers")]
    pub fn buffers<const N: usize>(&self) -> [buffer::Buffer; N] {
        unsafe { gl_gen_with(gl::GenBuffers) }
    }
    /// Generate a set of new vertex array objects.
    #[doc(alias = "glGenVertexArrays")]
    pub fn vertex_arrays<const N: usize>(&self) -> [vertex_array::VertexArray; N] {
        unsafe { gl_gen_with(gl::GenVertexArrays) }
    }
    /// Initialize a shader object of the given stage.
    #[doc(alias = "glCreateShader")]
    pub fn shader<Ty: program::Type>(&self) -> program::EmptyShader<Ty> {
        let name = unsafe { gl::CreateShader(Ty::TYPE) };
        let name = NonZeroName::new(name).expect("internal gl error while creating shader");
        unsafe { program::EmptyShader::from_name(name) }
    }
    /// Initialize a program object.
    #[doc(alias = "glCreateProgram")]
    pub fn program(&self) -> program::Program {
        let name = unsafe { gl::CreateProgram() };
        let name = NonZeroName::new(name).expect("internal gl error while creating program");
        unsafe { program::Program::from_name(name) }
    }
}
