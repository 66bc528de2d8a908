//! Opens a real window, so it needs a display and a GL 3.3 driver.
//! Set `STARTING_GL_SMOKE=1` to run it.

mod common;

use anyhow::ensure;
use starting_gl::{state::PolygonMode, Lesson};

fn main() -> anyhow::Result<()> {
    if !common::enabled("smoke") {
        return Ok(());
    }

    let report = common::run_frames(Lesson::Wireframe.config(), 3)?;
    ensure!(report.program_linked, "embedded shaders failed to build");
    ensure!(report.frames == 3, "rendered {} frames, wanted 3", report.frames);
    // Read back from the driver at teardown.
    ensure!(
        report.polygon_mode == PolygonMode::Line,
        "wireframe lesson ended in {:?}",
        report.polygon_mode
    );

    eprintln!("smoke: ok");
    Ok(())
}
