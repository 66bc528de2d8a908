//! The `glDrawArrays` lesson against a real driver. Set `STARTING_GL_SMOKE=1` to run it.

mod common;

use anyhow::ensure;
use starting_gl::{state::PolygonMode, Lesson};

fn main() -> anyhow::Result<()> {
    if !common::enabled("smoke_triangle") {
        return Ok(());
    }

    let report = common::run_frames(Lesson::Triangle.config(), 5)?;
    ensure!(report.program_linked, "embedded shaders failed to build");
    ensure!(report.frames == 5, "rendered {} frames, wanted 5", report.frames);
    ensure!(
        report.polygon_mode == PolygonMode::Fill,
        "triangle lesson ended in {:?}",
        report.polygon_mode
    );

    eprintln!("smoke_triangle: ok");
    Ok(())
}
