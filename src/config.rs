//! Per-run settings. Every lesson starts from [`RunConfig::default`] and overrides
//! what it needs, see [`crate::Lesson::config`].

use winit::dpi::PhysicalSize;

use crate::{app::Lesson, shader::ShaderSources};

/// Window and loop settings for one lesson run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub lesson: Lesson,
    pub title: String,
    /// Initial inner size of the window, in physical pixels.
    pub size: PhysicalSize<u32>,
    /// Requested OpenGL version. The context is always a core profile.
    pub gl_version: (u8, u8),
    /// What the color buffer is cleared to at the start of every frame.
    pub clear_color: [f32; 4],
    /// Stop after this many frames, as if the window had been closed.
    pub frame_limit: Option<u64>,
    /// Compiled and linked by lessons that draw.
    pub shaders: ShaderSources,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            lesson: Lesson::Clear,
            title: "LearnOpenGL".to_owned(),
            size: PhysicalSize::new(800, 600),
            gl_version: (3, 3),
            clear_color: [0.2, 0.3, 0.3, 1.0],
            frame_limit: None,
            shaders: ShaderSources::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_request_gl_3_3_at_800x600() {
        let config = RunConfig::default();
        assert_eq!(config.gl_version, (3, 3));
        assert_eq!(config.size, PhysicalSize::new(800, 600));
        assert_eq!(config.clear_color, [0.2, 0.3, 0.3, 1.0]);
        assert_eq!(config.frame_limit, None);
    }
}
