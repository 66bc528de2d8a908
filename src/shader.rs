//! The lessons' shader pair and the routine that builds it into a program.
//!
//! Build failures are logged and swallowed: a lesson with no program still clears
//! and presents every frame, it just draws nothing.

use std::borrow::Cow;

use crate::{
    program::{CompiledShader, Fragment, LinkedProgram, ProgramShaders, Type, Vertex},
    Gl,
};

/// Passes the position attribute straight through to clip space.
pub const VERTEX_SHADER_SOURCE: &str = r"#version 330 core
layout (location = 0) in vec3 aPos;

void main()
{
    gl_Position = vec4(aPos.x, aPos.y, aPos.z, 1.0);
}
";

/// Paints every fragment orange.
pub const FRAGMENT_SHADER_SOURCE: &str = r"#version 330 core
out vec4 FragColor;

void main()
{
    FragColor = vec4(1.0f, 0.5f, 0.2f, 1.0f);
}
";

/// GLSL for the two stages of a lesson's program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSources {
    pub vertex: Cow<'static, str>,
    pub fragment: Cow<'static, str>,
}

impl Default for ShaderSources {
    /// The embedded pair.
    fn default() -> Self {
        Self {
            vertex: Cow::Borrowed(VERTEX_SHADER_SOURCE),
            fragment: Cow::Borrowed(FRAGMENT_SHADER_SOURCE),
        }
    }
}

/// Compile both stages and link them. Every failing step is logged with its bounded
/// diagnostic and `None` is returned; shader objects are always deleted before returning.
pub fn build_program_from(
    gl: &Gl,
    vertex_source: &str,
    fragment_source: &str,
) -> Option<LinkedProgram> {
    let vertex = compile::<Vertex>(gl, vertex_source);
    let fragment = compile::<Fragment>(gl, fragment_source);

    let (vertex, fragment) = match (vertex, fragment) {
        (Some(vertex), Some(fragment)) => (vertex, fragment),
        (vertex, fragment) => {
            // Whatever did compile is useless without its partner.
            if let Some(vertex) = vertex {
                gl.program.delete_shader(vertex.into());
            }
            if let Some(fragment) = fragment {
                gl.program.delete_shader(fragment.into());
            }
            log::warn!("shader program not linked, draws will be skipped");
            return None;
        }
    };

    let program = gl.new.program();
    let linked = gl.program.link(
        program,
        ProgramShaders::Graphics {
            vertex: &vertex,
            fragment: &fragment,
        },
    );

    gl.program.delete_shader(vertex.into());
    gl.program.delete_shader(fragment.into());

    match linked {
        Ok(program) => {
            log::debug!("shader program linked");
            Some(program)
        }
        Err(err) => {
            log::error!("{err}");
            gl.program.delete(err.program);
            None
        }
    }
}

/// Create and compile one stage. On failure the diagnostic is logged and the shader deleted.
fn compile<Ty: Type>(gl: &Gl, source: &str) -> Option<CompiledShader<Ty>> {
    let shader = gl.new.shader::<Ty>();
    match gl.program.compile(shader, source) {
        Ok(shader) => Some(shader),
        Err(err) => {
            log::error!("{err}");
            gl.program.delete_shader(err.shader);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sources_target_gl_3_3_core() {
        for source in [VERTEX_SHADER_SOURCE, FRAGMENT_SHADER_SOURCE] {
            assert!(source.starts_with("#version 330 core\n"));
            assert!(source.contains("void main()"));
            assert!(!source.contains('\0'));
        }
    }

    #[test]
    fn default_sources_are_the_embedded_pair() {
        let sources = ShaderSources::default();
        assert_eq!(sources.vertex, VERTEX_SHADER_SOURCE);
        assert_eq!(sources.fragment, FRAGMENT_SHADER_SOURCE);
    }

    #[test]
    fn vertex_input_matches_the_position_attribute() {
        let location = crate::geometry::POSITION_LOCATION;
        assert!(VERTEX_SHADER_SOURCE.contains(&format!("layout (location = {location}) in vec3 aPos;")));
    }
}
