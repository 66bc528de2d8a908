//! A fragment stage that cannot compile must not stop the lesson: it keeps clearing and
//! presenting without a program. Set `STARTING_GL_SMOKE=1` to run it.

mod common;

use anyhow::ensure;
use starting_gl::{shader::ShaderSources, Lesson, RunConfig};

const UNDECLARED_OUTPUT: &str = r"#version 330 core

void main()
{
    FragColor = vec4(1.0f, 0.5f, 0.2f, 1.0f);
}
";

fn main() -> anyhow::Result<()> {
    if !common::enabled("smoke_broken_shader") {
        return Ok(());
    }

    let config = RunConfig {
        shaders: ShaderSources {
            fragment: UNDECLARED_OUTPUT.into(),
            ..ShaderSources::default()
        },
        ..Lesson::Rectangle.config()
    };
    let report = common::run_frames(config, 3)?;
    ensure!(!report.program_linked, "broken fragment stage linked anyway");
    ensure!(report.frames == 3, "rendered {} frames, wanted 3", report.frames);

    eprintln!("smoke_broken_shader: ok");
    Ok(())
}
