//! Shared set-up for the windowed tests. Each one is its own `harness = false` binary:
//! winit wants the main thread and allows one event loop per process.

use anyhow::anyhow;
use starting_gl::{logging, RunConfig, RunReport};

/// Whether windowed tests were asked for. Prints a note and returns `false` if not.
pub fn enabled(name: &str) -> bool {
    if std::env::var_os("STARTING_GL_SMOKE").is_none() {
        eprintln!("{name}: skipped, set STARTING_GL_SMOKE=1 to open a window");
        return false;
    }
    logging::init_logging(logging::LoggingConfig::default());
    true
}

/// Run `config` for exactly `frames` frames.
pub fn run_frames(config: RunConfig, frames: u64) -> anyhow::Result<RunReport> {
    let lesson = config.lesson;
    let config = RunConfig {
        frame_limit: Some(frames),
        ..config
    };
    starting_gl::run(config).map_err(|err| anyhow!("running {lesson:?}: {err}"))
}
