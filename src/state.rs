use super::{gl, GLEnum, NotSync};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}
impl From<[f32; 4]> for Color {
    fn from([r, g, b, a]: [f32; 4]) -> Self {
        Color { r, g, b, a }
    }
}

bitflags::bitflags! {
    /// Which buffers of the draw framebuffer a clear touches.
    #[repr(transparent)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ClearMask: gl::types::GLbitfield {
        const COLOR = gl::COLOR_BUFFER_BIT;
        const DEPTH = gl::DEPTH_BUFFER_BIT;
        const STENCIL = gl::STENCIL_BUFFER_BIT;
    }
}

/// How polygons are rasterized.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PolygonMode {
    /// Only the vertices.
    Point = gl::POINT,
    /// Only the edges, i.e. wireframe.
    Line = gl::LINE,
    /// The interior, the GL default.
    #[default]
    Fill = gl::FILL,
}
// Safety: is repr(u32) enum.
unsafe impl GLEnum for PolygonMode {}
impl PolygonMode {
    /// The wireframe toggle: `Line` becomes `Fill`, anything else becomes `Line`.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Line => Self::Fill,
            Self::Fill | Self::Point => Self::Line,
        }
    }
    /// Parse a value read back from `GL_POLYGON_MODE`.
    #[must_use]
    pub fn from_gl(value: gl::types::GLenum) -> Option<Self> {
        match value {
            gl::POINT => Some(Self::Point),
            gl::LINE => Some(Self::Line),
            gl::FILL => Some(Self::Fill),
            _ => None,
        }
    }
}

/// Read and write global state.
pub struct State(pub(crate) NotSync);
impl State {
    /// Set the color that [`Self::clear`] writes into color buffers.
    #[doc(alias = "glClearColor")]
    pub fn clear_color(&self, color: impl Into<Color>) -> &Self {
        let color = color.into();
        unsafe {
            gl::ClearColor(color.r, color.g, color.b, color.a);
        }
        self
    }
    /// Clear the selected buffers of the bound draw framebuffer to their clear values.
    #[doc(alias = "glClear")]
    pub fn clear(&self, mask: ClearMask) -> &Self {
        unsafe {
            gl::Clear(mask.bits());
        }
        self
    }
    /// Map normalized device coordinates onto the given window rectangle.
    #[doc(alias = "glViewport")]
    pub fn viewport(&self, min: [u32; 2], size: [u32; 2]) -> &Self {
        let [x, y] = min.map(|v| v.try_into().unwrap_or(i32::MAX));
        let [width, height] = size.map(|v| v.try_into().unwrap_or(i32::MAX));
        unsafe {
            gl::Viewport(x, y, width, height);
        }
        self
    }
    /// Rasterize both front and back faces with `mode`.
    #[doc(alias = "glPolygonMode")]
    pub fn set_polygon_mode(&self, mode: PolygonMode) -> &Self {
        unsafe {
            gl::PolygonMode(gl::FRONT_AND_BACK, mode.as_gl());
        }
        self
    }
    /// The current front-face polygon mode.
    #[doc(alias = "GL_POLYGON_MODE")]
    #[must_use]
    pub fn polygon_mode(&self) -> PolygonMode {
        // Some drivers still write front and back here.
        let mut modes = [0; 2];
        unsafe {
            gl::GetIntegerv(gl::POLYGON_MODE, modes.as_mut_ptr());
        }
        u32::try_from(modes[0])
            .ok()
            .and_then(PolygonMode::from_gl)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_flips_to_fill_and_back() {
        let mode = PolygonMode::Line;
        let once = mode.toggled();
        assert_eq!(once, PolygonMode::Fill);
        assert_eq!(once.toggled(), PolygonMode::Line);
    }

    #[test]
    fn point_toggles_into_wireframe() {
        assert_eq!(PolygonMode::Point.toggled(), PolygonMode::Line);
    }

    #[test]
    fn polygon_mode_round_trips_through_gl_values() {
        for mode in [PolygonMode::Point, PolygonMode::Line, PolygonMode::Fill] {
            assert_eq!(PolygonMode::from_gl(mode.as_gl()), Some(mode));
        }
        assert_eq!(PolygonMode::from_gl(0), None);
    }

    #[test]
    fn clear_mask_bits_are_gl_bits() {
        assert_eq!(ClearMask::COLOR.bits(), gl::COLOR_BUFFER_BIT);
        assert_eq!(
            (ClearMask::COLOR | ClearMask::DEPTH).bits(),
            gl::COLOR_BUFFER_BIT | gl::DEPTH_BUFFER_BIT
        );
    }
}
