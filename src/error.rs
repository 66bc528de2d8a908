//! Fatal start-up errors. Shader failures are not fatal and live in [`crate::slot::program`].

use std::fmt;

/// Creating the window, its GL context, or loading GL entry points failed.
#[derive(Debug)]
pub enum InitError {
    /// No display connection, or no config matching an OpenGL template.
    Display(Box<dyn std::error::Error>),
    /// The window itself could not be created.
    Window(winit::error::OsError),
    /// The window exists but exposes no native handle to render into.
    WindowHandle(winit::raw_window_handle::HandleError),
    /// The window came back with a zero width or height.
    ZeroSize { width: u32, height: u32 },
    /// The driver refused the requested context version or profile.
    Context(glutin::error::Error),
    /// The window surface could not be created.
    Surface(glutin::error::Error),
    /// The context could not be made current on the surface.
    MakeCurrent(glutin::error::Error),
    /// The function loader did not resolve a required entry point.
    Loader { missing: &'static str },
}

impl fmt::Display for InitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Display(err) => write!(f, "failed to open a display: {err}"),
            Self::Window(err) => write!(f, "failed to create window: {err}"),
            Self::WindowHandle(err) => write!(f, "window has no usable handle: {err}"),
            Self::ZeroSize { width, height } => {
                write!(f, "window has a zero-sized surface ({width}x{height})")
            }
            Self::Context(err) => write!(f, "failed to create OpenGL context: {err}"),
            Self::Surface(err) => write!(f, "failed to create window surface: {err}"),
            Self::MakeCurrent(err) => write!(f, "failed to make OpenGL context current: {err}"),
            Self::Loader { missing } => {
                write!(f, "failed to load OpenGL functions: `{missing}` is unavailable")
            }
        }
    }
}

impl std::error::Error for InitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Display(err) => Some(err.as_ref()),
            Self::Window(err) => Some(err),
            Self::WindowHandle(err) => Some(err),
            Self::Context(err) | Self::Surface(err) | Self::MakeCurrent(err) => Some(err),
            Self::ZeroSize { .. } | Self::Loader { .. } => None,
        }
    }
}

/// A lesson run ended abnormally.
#[derive(Debug)]
pub enum RunError {
    /// The event loop could not be created or failed while running.
    EventLoop(winit::error::EventLoopError),
    /// The window or context could not be set up.
    Init(InitError),
}

impl RunError {
    /// Process exit status for this error.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        crate::FAILURE_EXIT_CODE
    }
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EventLoop(err) => write!(f, "event loop error: {err}"),
            Self::Init(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for RunError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::EventLoop(err) => Some(err),
            Self::Init(err) => err.source(),
        }
    }
}

impl From<winit::error::EventLoopError> for RunError {
    fn from(err: winit::error::EventLoopError) -> Self {
        Self::EventLoop(err)
    }
}

impl From<InitError> for RunError {
    fn from(err: InitError) -> Self {
        Self::Init(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loader_failure_names_the_missing_function() {
        let err = RunError::from(InitError::Loader {
            missing: "glViewport",
        });
        assert_eq!(
            err.to_string(),
            "failed to load OpenGL functions: `glViewport` is unavailable"
        );
        assert_eq!(err.exit_code(), -1);
    }

    #[test]
    fn zero_size_reports_dimensions() {
        let err = InitError::ZeroSize {
            width: 0,
            height: 600,
        };
        assert_eq!(err.to_string(), "window has a zero-sized surface (0x600)");
        assert!(std::error::Error::source(&err).is_none());
    }

    #[test]
    fn display_errors_keep_their_source() {
        let err = InitError::Display("no X server".into());
        assert_eq!(err.to_string(), "failed to open a display: no X server");
        assert!(std::error::Error::source(&err).is_some());
    }
}
