//! The lesson loop: process input, clear, draw, present, poll.

use winit::{
    application::ApplicationHandler,
    event::{KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::WindowId,
};

use crate::{
    config::RunConfig,
    error::{InitError, RunError},
    geometry::{self, Mesh},
    input::{Action, KeyBindings, LoopControl},
    logging::{init_logging, LoggingConfig},
    program::LinkedProgram,
    shader,
    state::{ClearMask, PolygonMode},
    window::GlWindow,
    Gl,
};

/// The four cumulative lessons. Each one adds a single concept to the one before.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lesson {
    /// A window cleared to a fixed color every frame.
    Clear,
    /// One triangle from a vertex buffer, drawn with `glDrawArrays`.
    Triangle,
    /// A rectangle from four vertices and an element buffer, drawn with `glDrawElements`.
    Rectangle,
    /// The rectangle in wireframe; Space flips between wireframe and filled.
    Wireframe,
}

impl Lesson {
    pub const ALL: [Lesson; 4] = [Self::Clear, Self::Triangle, Self::Rectangle, Self::Wireframe];

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Clear => "LearnOpenGL",
            Self::Triangle => "LearnOpenGL - Hello Triangle",
            Self::Rectangle => "LearnOpenGL - Hello Rectangle",
            Self::Wireframe => "LearnOpenGL - Wireframe",
        }
    }

    /// Vertices and optional indices to upload, or `None` for a clear-only lesson.
    #[must_use]
    pub fn geometry(self) -> Option<(&'static [geometry::Vertex], Option<&'static [u32]>)> {
        match self {
            Self::Clear => None,
            Self::Triangle => Some((&geometry::TRIANGLE[..], None)),
            Self::Rectangle | Self::Wireframe => Some((
                &geometry::RECTANGLE[..],
                Some(&geometry::RECTANGLE_INDICES[..]),
            )),
        }
    }

    /// Whether the lesson builds the shader program. Only lessons that draw need one.
    #[must_use]
    pub fn uses_shaders(self) -> bool {
        self.geometry().is_some()
    }

    #[must_use]
    pub fn initial_polygon_mode(self) -> PolygonMode {
        match self {
            Self::Wireframe => PolygonMode::Line,
            _ => PolygonMode::Fill,
        }
    }

    #[must_use]
    pub fn toggles_wireframe(self) -> bool {
        self == Self::Wireframe
    }

    #[must_use]
    pub fn config(self) -> RunConfig {
        RunConfig {
            lesson: self,
            title: self.title().to_owned(),
            ..RunConfig::default()
        }
    }
}

/// What happened during a run that ended normally.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub lesson: Lesson,
    /// Frames cleared and presented.
    pub frames: u64,
    /// Whether the shader program compiled and linked.
    pub program_linked: bool,
    /// Polygon mode in effect when the loop stopped.
    pub polygon_mode: PolygonMode,
}

/// GPU-side state of a lesson.
struct Scene {
    mesh: Option<Mesh>,
    program: Option<LinkedProgram>,
}

impl Scene {
    fn new(gl: &mut Gl, config: &RunConfig) -> Self {
        let lesson = config.lesson;
        let mesh = lesson
            .geometry()
            .map(|(vertices, indices)| Mesh::upload(gl, vertices, indices));
        let program = if lesson.uses_shaders() {
            shader::build_program_from(gl, &config.shaders.vertex, &config.shaders.fragment)
        } else {
            None
        };
        gl.state.set_polygon_mode(lesson.initial_polygon_mode());
        Self { mesh, program }
    }

    fn render(&self, gl: &mut Gl, clear_color: [f32; 4]) {
        gl.state.clear_color(clear_color).clear(ClearMask::COLOR);
        // Without a program the draw would be a no-op anyway.
        if let (Some(mesh), Some(program)) = (&self.mesh, &self.program) {
            mesh.draw(gl, program);
        }
    }

    fn delete(self, gl: &mut Gl) {
        if let Some(mesh) = self.mesh {
            mesh.delete(gl);
        }
        if let Some(program) = self.program {
            gl.program.delete(program.into());
        }
    }
}

struct Running {
    scene: Scene,
    window: GlWindow,
}

impl Running {
    /// Release the lesson's GL objects, then the context and window. Returns the
    /// polygon mode the context was left in.
    fn shut_down(self) -> PolygonMode {
        // Safety: the context owned by `window` is still current.
        let mut gl = unsafe { Gl::current() };
        let mode = gl.state.polygon_mode();
        self.scene.delete(&mut gl);
        mode
    }
}

/// The [`ApplicationHandler`] driving one lesson.
pub struct App {
    config: RunConfig,
    bindings: KeyBindings,
    control: LoopControl,
    polygon_mode: PolygonMode,
    running: Option<Running>,
    program_linked: bool,
    error: Option<InitError>,
}

impl App {
    #[must_use]
    pub fn new(config: RunConfig) -> Self {
        Self {
            bindings: KeyBindings::new(config.lesson.toggles_wireframe()),
            control: LoopControl::new(config.frame_limit),
            polygon_mode: config.lesson.initial_polygon_mode(),
            running: None,
            program_linked: false,
            error: None,
            config,
        }
    }

    fn start(&mut self, event_loop: &ActiveEventLoop) -> Result<(), InitError> {
        let window = GlWindow::new(event_loop, &self.config)?;
        // Safety: `GlWindow::new` left its context current with functions loaded.
        let mut gl = unsafe { Gl::current() };
        window.resize(&gl, window.size());

        let scene = Scene::new(&mut gl, &self.config);
        self.program_linked = scene.program.is_some();
        log::info!(
            "{:?} lesson ready ({})",
            self.config.lesson,
            if self.program_linked {
                "program linked"
            } else {
                "no program"
            }
        );
        self.running = Some(Running { scene, window });
        Ok(())
    }

    fn apply(&mut self, action: Action) {
        match action {
            Action::Close => self.control.request_close(),
            Action::ToggleWireframe => {
                if self.running.is_none() {
                    return;
                }
                // Safety: only reachable while the lesson's context is current.
                let gl = unsafe { Gl::current() };
                let mode = gl.state.polygon_mode().toggled();
                gl.state.set_polygon_mode(mode);
                self.polygon_mode = mode;
                log::info!("polygon mode: {mode:?}");
            }
        }
    }

    fn redraw(&mut self) {
        let Some(running) = &self.running else {
            return;
        };
        if !self.control.begin_frame() {
            return;
        }
        log::trace!("frame {}", self.control.frames());
        // Safety: `running` exists, so its context is current.
        let mut gl = unsafe { Gl::current() };
        running.scene.render(&mut gl, self.config.clear_color);
        running.window.present();
    }

    fn shut_down(&mut self) {
        if let Some(running) = self.running.take() {
            self.polygon_mode = running.shut_down();
        }
    }

    /// Tear down the window and turn the run into its result.
    pub fn finish(mut self) -> Result<RunReport, RunError> {
        self.shut_down();
        if let Some(err) = self.error.take() {
            return Err(err.into());
        }
        Ok(RunReport {
            lesson: self.config.lesson,
            frames: self.control.frames(),
            program_linked: self.program_linked,
            polygon_mode: self.polygon_mode,
        })
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.listen_device_events(winit::event_loop::DeviceEvents::Never);
        if self.running.is_some() || self.error.is_some() {
            return;
        }
        if let Err(err) = self.start(event_loop) {
            log::error!("{err}");
            self.error = Some(err);
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => self.control.request_close(),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state,
                        repeat,
                        ..
                    },
                ..
            } => {
                if let Some(action) = self.bindings.action(key, state, repeat) {
                    self.apply(action);
                }
            }
            WindowEvent::Resized(size) => {
                if let Some(running) = &self.running {
                    // Safety: as in `redraw`.
                    let gl = unsafe { Gl::current() };
                    running.window.resize(&gl, size);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(),
            _ => (),
        }
        if self.control.should_close() {
            event_loop.exit();
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.control.should_close() {
            event_loop.exit();
        } else if let Some(running) = &self.running {
            running.window.window().request_redraw();
        }
    }

    fn exiting(&mut self, _: &ActiveEventLoop) {
        self.shut_down();
    }
}

/// Run one lesson until its window is closed (or its frame limit is reached).
pub fn run(config: RunConfig) -> Result<RunReport, RunError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;
    app.finish()
}

/// Entry point shared by the lesson binaries: set up logging, run, and map the
/// outcome to a process exit status.
#[must_use]
pub fn launch(lesson: Lesson) -> i32 {
    init_logging(LoggingConfig::default());
    exit_status(&run(lesson.config()))
}

/// Log how a run ended and pick the process exit status for it.
fn exit_status(result: &Result<RunReport, RunError>) -> i32 {
    match result {
        Ok(report) => {
            log::info!(
                "{:?} finished after {} frames",
                report.lesson,
                report.frames
            );
            0
        }
        Err(err) => {
            log::error!("{err}");
            err.exit_code()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lessons_are_cumulative() {
        assert!(!Lesson::Clear.uses_shaders());
        let (vertices, indices) = Lesson::Triangle.geometry().unwrap();
        assert_eq!(vertices.len(), 3);
        assert!(indices.is_none());
        for lesson in [Lesson::Rectangle, Lesson::Wireframe] {
            let (vertices, indices) = lesson.geometry().unwrap();
            assert_eq!(vertices.len(), 4);
            assert_eq!(indices.map(<[u32]>::len), Some(6));
            assert!(lesson.uses_shaders());
        }
    }

    #[test]
    fn only_the_wireframe_lesson_starts_in_line_mode() {
        for lesson in Lesson::ALL {
            let expected = if lesson == Lesson::Wireframe {
                PolygonMode::Line
            } else {
                PolygonMode::Fill
            };
            assert_eq!(lesson.initial_polygon_mode(), expected);
            assert_eq!(lesson.toggles_wireframe(), lesson == Lesson::Wireframe);
        }
    }

    #[test]
    fn lesson_config_keeps_shared_defaults() {
        let config = Lesson::Rectangle.config();
        assert_eq!(config.lesson, Lesson::Rectangle);
        assert_eq!(config.title, "LearnOpenGL - Hello Rectangle");
        assert_eq!(config.gl_version, (3, 3));
    }

    #[test]
    fn escape_before_the_first_frame_renders_nothing() {
        let mut app = App::new(Lesson::Triangle.config());
        app.apply(Action::Close);
        app.redraw();
        let report = app.finish().unwrap();
        assert_eq!(report.frames, 0);
        assert!(!report.program_linked);
    }

    #[test]
    fn start_up_failure_exits_with_failure_code() {
        let mut app = App::new(Lesson::Clear.config());
        app.error = Some(InitError::Loader {
            missing: "glViewport",
        });
        let result = app.finish();
        match &result {
            Err(RunError::Init(InitError::Loader { missing })) => {
                assert_eq!(*missing, "glViewport");
            }
            other => panic!("expected a loader failure, got {other:?}"),
        }
        assert_eq!(exit_status(&result), crate::FAILURE_EXIT_CODE);
        assert_eq!(exit_status(&result), -1);
    }

    #[test]
    fn clean_close_exits_with_zero() {
        let mut app = App::new(Lesson::Clear.config());
        app.apply(Action::Close);
        assert_eq!(exit_status(&app.finish()), 0);
    }

    #[test]
    fn wireframe_toggle_without_a_window_is_ignored() {
        let mut app = App::new(Lesson::Wireframe.config());
        app.apply(Action::ToggleWireframe);
        assert_eq!(app.finish().unwrap().polygon_mode, PolygonMode::Line);
    }
}
