use crate::{
    gl::{
        self,
        types::{GLchar, GLenum, GLint, GLsizei, GLuint},
    },
    program::{CompiledShader, EmptyShader, LinkedProgram, Program, ProgramShaders, Type},
    slot::marker::{IsDefault, NotDefault},
    NotSync, ThinGLObject,
};

/// Maximum number of bytes read back from a shader or program info log, nul included.
/// Longer logs are truncated.
pub const INFO_LOG_CAPACITY: usize = 512;

/// Turn the bytes written by `glGet*InfoLog` into text. `written` excludes the nul terminator.
fn decode_log(mut bytes: Vec<u8>, written: usize) -> String {
    bytes.truncate(written.min(bytes.len()));
    if let Some(nul) = bytes.iter().position(|&b| b == 0) {
        bytes.truncate(nul);
    }
    String::from_utf8_lossy(&bytes).trim_end().to_owned()
}

unsafe fn info_log(
    name: GLuint,
    fetch_log: unsafe fn(GLuint, GLsizei, *mut GLsizei, *mut GLchar),
) -> String {
    let mut bytes = vec![0u8; INFO_LOG_CAPACITY];
    let mut written: GLsizei = 0;
    fetch_log(
        name,
        // In param for max length, including the nul
        INFO_LOG_CAPACITY as GLsizei,
        // Out param for actual length, excluding the nul
        std::ptr::addr_of_mut!(written),
        bytes.as_mut_ptr().cast(),
    );
    decode_log(bytes, usize::try_from(written).unwrap_or(0))
}
unsafe fn shader_log(shader: GLuint) -> String {
    info_log(shader, gl::GetShaderInfoLog)
}
unsafe fn program_log(program: GLuint) -> String {
    info_log(program, gl::GetProgramInfoLog)
}
unsafe fn status(
    name: GLuint,
    get_iv: unsafe fn(GLuint, GLenum, *mut GLint),
    pname: GLenum,
) -> bool {
    let mut status = GLint::from(gl::FALSE);
    get_iv(name, pname, std::ptr::addr_of_mut!(status));
    status == GLint::from(gl::TRUE)
}

/// A shader failed to compile. Carries the shader back so it can be deleted.
#[derive(Debug)]
#[must_use = "dropping a gl handle leaks resources"]
pub struct CompileError<Ty: Type> {
    pub shader: EmptyShader<Ty>,
    /// Compiler diagnostics, at most [`INFO_LOG_CAPACITY`] bytes.
    pub log: String,
}
impl<Ty: Type> std::fmt::Display for CompileError<Ty> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ERROR::SHADER::{}::COMPILATION_FAILED\n{}", Ty::NAME, self.log)
    }
}

/// A program failed to link. Carries the program back so it can be deleted.
#[derive(Debug)]
#[must_use = "dropping a gl handle leaks resources"]
pub struct LinkError {
    pub program: Program,
    /// Linker diagnostics, at most [`INFO_LOG_CAPACITY`] bytes.
    pub log: String,
}
impl std::fmt::Display for LinkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ERROR::SHADER::PROGRAM::LINKING_FAILED\n{}", self.log)
    }
}

/// Proof of a `glUse`d program.
#[derive(Debug)]
pub struct Active<'slot, Kind>(
    std::marker::PhantomData<&'slot ()>,
    std::marker::PhantomData<Kind>,
);
pub struct Slot(pub(crate) NotSync);
impl Slot {
    /// `glUse` a linked program.
    #[doc(alias = "glUseProgram")]
    pub fn bind(&mut self, program: &LinkedProgram) -> Active<NotDefault> {
        unsafe {
            gl::UseProgram(program.name().get());
        }
        Active(std::marker::PhantomData, std::marker::PhantomData)
    }
    /// Make the used program slot empty.
    #[doc(alias = "glUseProgram")]
    pub fn unbind(&mut self) -> Active<IsDefault> {
        unsafe {
            gl::UseProgram(0);
        }
        Active(std::marker::PhantomData, std::marker::PhantomData)
    }
    /// Set the GLSL source code of a shader, then attempt to compile it.
    #[doc(alias = "glShaderSource")]
    #[doc(alias = "glCompileShader")]
    pub fn compile<Ty: Type>(
        &self,
        shader: EmptyShader<Ty>,
        source: &str,
    ) -> Result<CompiledShader<Ty>, CompileError<Ty>> {
        let sources = [source.as_ptr().cast::<GLchar>()];
        let lengths = [GLint::try_from(source.len()).expect("shader source too long")];

        let success = unsafe {
            gl::ShaderSource(shader.name().get(), 1, sources.as_ptr(), lengths.as_ptr());
            gl::CompileShader(shader.name().get());
            status(shader.name().get(), gl::GetShaderiv, gl::COMPILE_STATUS)
        };

        if success {
            // Safety: status was just checked.
            Ok(unsafe { shader.into_compiled_unchecked() })
        } else {
            Err(CompileError {
                log: unsafe { shader_log(shader.name().get()) },
                shader,
            })
        }
    }
    /// Link together compiled shaders into a [`LinkedProgram`]. The shaders are
    /// detached again afterwards, so deleting them frees them immediately.
    #[doc(alias = "glLinkProgram")]
    pub fn link(
        &self,
        program: Program,
        shaders: ProgramShaders,
    ) -> Result<LinkedProgram, LinkError> {
        let ProgramShaders::Graphics { vertex, fragment } = shaders;
        let success = unsafe {
            gl::AttachShader(program.name().get(), vertex.name().get());
            gl::AttachShader(program.name().get(), fragment.name().get());

            gl::LinkProgram(program.name().get());
            let linked = status(program.name().get(), gl::GetProgramiv, gl::LINK_STATUS);

            gl::DetachShader(program.name().get(), vertex.name().get());
            gl::DetachShader(program.name().get(), fragment.name().get());

            linked
        };

        if success {
            // Safety: status was just checked.
            Ok(unsafe { program.into_linked_unchecked() })
        } else {
            Err(LinkError {
                log: unsafe { program_log(program.name().get()) },
                program,
            })
        }
    }
    /// Delete a program. If the program is currently in use, it remains so
    /// and is deleted once it no longer is.
    ///
    /// To delete a [`LinkedProgram`], use [`Into::into`].
    #[doc(alias = "glDeleteProgram")]
    pub fn delete(&self, program: Program) {
        unsafe { gl::DeleteProgram(program.into_name().get()) }
    }
    /// Delete a shader. If the shader is attached to any program, it is deleted once it is detached.
    ///
    /// To delete a [`CompiledShader`], use [`Into::into`].
    #[doc(alias = "glDeleteShader")]
    pub fn delete_shader<Ty: Type>(&self, shader: EmptyShader<Ty>) {
        unsafe { gl::DeleteShader(shader.into_name().get()) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_stops_at_written_length() {
        let mut bytes = b"0:1(1): error: syntax error\0garbage".to_vec();
        bytes.resize(INFO_LOG_CAPACITY, 0);
        assert_eq!(decode_log(bytes, 27), "0:1(1): error: syntax error");
    }

    #[test]
    fn log_stops_at_nul_when_length_is_bogus() {
        let bytes = b"oops\0\0\0".to_vec();
        assert_eq!(decode_log(bytes, 400), "oops");
    }

    #[test]
    fn log_is_bounded_by_capacity() {
        let bytes = vec![b'x'; INFO_LOG_CAPACITY];
        let log = decode_log(bytes, 10_000);
        assert_eq!(log.len(), INFO_LOG_CAPACITY);
    }

    #[test]
    fn empty_log_decodes_to_empty_string() {
        assert_eq!(decode_log(vec![0; INFO_LOG_CAPACITY], 0), "");
    }

    #[test]
    fn diagnostics_name_the_failing_stage() {
        use crate::program::{Fragment, Vertex};
        let name = crate::NonZeroName::new(3).unwrap();
        let error = CompileError::<Fragment> {
            shader: unsafe { EmptyShader::from_name(name) },
            log: "0:4: 'FragColor' undeclared".into(),
        };
        assert_eq!(
            error.to_string(),
            "ERROR::SHADER::FRAGMENT::COMPILATION_FAILED\n0:4: 'FragColor' undeclared"
        );

        let error = CompileError::<Vertex> {
            shader: unsafe { EmptyShader::from_name(name) },
            log: String::new(),
        };
        assert!(error.to_string().starts_with("ERROR::SHADER::VERTEX::"));

        let error = LinkError {
            program: unsafe { Program::from_name(name) },
            log: "missing main".into(),
        };
        assert_eq!(
            error.to_string(),
            "ERROR::SHADER::PROGRAM::LINKING_FAILED\nmissing main"
        );
    }
}
