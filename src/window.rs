//! Window, surface and OpenGL context creation.

use std::{ffi::CString, num::NonZeroU32};

use glutin::{display::GetGlDisplay, prelude::*};
use winit::{dpi::PhysicalSize, event_loop::ActiveEventLoop, raw_window_handle::HasWindowHandle};

use crate::{config::RunConfig, error::InitError, gl, Gl};

/// Entry points every lesson calls. If the loader cannot resolve these, nothing will work.
const REQUIRED_FUNCTIONS: [(&str, fn() -> bool); 4] = [
    ("glViewport", gl::Viewport::is_loaded),
    ("glClear", gl::Clear::is_loaded),
    ("glCreateShader", gl::CreateShader::is_loaded),
    ("glPolygonMode", gl::PolygonMode::is_loaded),
];

/// A window with a current OpenGL core context.
pub struct GlWindow {
    // Field order: context must drop before window.
    surface: glutin::surface::Surface<glutin::surface::WindowSurface>,
    context: glutin::context::PossiblyCurrentContext,
    window: winit::window::Window,
}

impl GlWindow {
    /// Create the window, make a core context of `config.gl_version` current on it, and load
    /// the GL function pointers. Any failure here is fatal for the lesson.
    pub fn new(event_loop: &ActiveEventLoop, config: &RunConfig) -> Result<Self, InitError> {
        let attributes = winit::window::WindowAttributes::default()
            .with_title(config.title.clone())
            .with_inner_size(config.size);

        let template = glutin::config::ConfigTemplateBuilder::new()
            .with_api(glutin::config::Api::OPENGL);
        let (window, gl_config) = glutin_winit::DisplayBuilder::new()
            .with_window_attributes(Some(attributes.clone()))
            .build(event_loop, template, |mut configs| {
                // Any config offering desktop GL will do.
                configs.next().expect("display returned an empty config list")
            })
            .map_err(InitError::Display)?;

        let window = match window {
            Some(window) => window,
            None => glutin_winit::finalize_window(event_loop, attributes, &gl_config)
                .map_err(InitError::Window)?,
        };

        let display = gl_config.display();
        let raw_handle = window
            .window_handle()
            .map_err(InitError::WindowHandle)?
            .as_raw();

        let (major, minor) = config.gl_version;
        let context_attributes = glutin::context::ContextAttributesBuilder::new()
            .with_profile(glutin::context::GlProfile::Core)
            .with_context_api(glutin::context::ContextApi::OpenGl(Some(
                glutin::context::Version::new(major, minor),
            )))
            .build(Some(raw_handle));
        // Safety: the handle belongs to `window`, which outlives the context.
        let context = unsafe { display.create_context(&gl_config, &context_attributes) }
            .map_err(InitError::Context)?;

        let size = window.inner_size();
        let (Some(width), Some(height)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
        else {
            return Err(InitError::ZeroSize {
                width: size.width,
                height: size.height,
            });
        };
        let surface_attributes =
            glutin::surface::SurfaceAttributesBuilder::<glutin::surface::WindowSurface>::new()
                .build(raw_handle, width, height);
        // Safety: as above, the window outlives the surface.
        let surface = unsafe { display.create_window_surface(&gl_config, &surface_attributes) }
            .map_err(InitError::Surface)?;

        let context = context
            .make_current(&surface)
            .map_err(InitError::MakeCurrent)?;
        log::info!("got context {:?}", context.context_api());

        if let Err(err) = surface.set_swap_interval(
            &context,
            glutin::surface::SwapInterval::Wait(NonZeroU32::MIN),
        ) {
            log::warn!("vsync unavailable: {err}");
        }

        // Load global proc addresses. This is only usable if there is ONE display in use for the lifetime of the program.
        gl::load_with(|symbol| match CString::new(symbol) {
            Ok(symbol) => display.get_proc_address(&symbol),
            Err(_) => std::ptr::null(),
        });
        if let Some((missing, _)) = REQUIRED_FUNCTIONS
            .iter()
            .find(|(_, is_loaded)| !is_loaded())
        {
            return Err(InitError::Loader { missing: *missing });
        }
        log_version();

        Ok(Self {
            surface,
            context,
            window,
        })
    }

    #[must_use]
    pub fn window(&self) -> &winit::window::Window {
        &self.window
    }

    #[must_use]
    pub fn size(&self) -> PhysicalSize<u32> {
        self.window.inner_size()
    }

    /// Resize the surface and viewport to follow the window. Zero-sized (minimized) windows
    /// are ignored and `false` is returned.
    pub fn resize(&self, gl: &Gl, size: PhysicalSize<u32>) -> bool {
        let (Some(width), Some(height)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
        else {
            return false;
        };
        self.surface.resize(&self.context, width, height);
        gl.state.viewport([0, 0], [size.width, size.height]);
        true
    }

    /// Show the frame that was just drawn. Failure is logged, the loop carries on.
    pub fn present(&self) {
        self.window.pre_present_notify();
        if let Err(err) = self.surface.swap_buffers(&self.context) {
            log::error!("failed to swap buffers: {err}");
        }
    }
}

fn log_version() {
    let (mut major, mut minor) = (0, 0);
    unsafe {
        gl::GetIntegerv(gl::MAJOR_VERSION, std::ptr::addr_of_mut!(major));
        gl::GetIntegerv(gl::MINOR_VERSION, std::ptr::addr_of_mut!(minor));
    }
    log::info!("OpenGL version {major}.{minor}");
}
