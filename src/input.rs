//! Keyboard handling and the loop's close flag.

use winit::{event::ElementState, keyboard::KeyCode};

/// What a key press asks the lesson to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Set the close flag; the loop stops before the next frame.
    Close,
    /// Flip between wireframe and filled polygons.
    ToggleWireframe,
}

/// Which keys trigger which [`Action`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBindings {
    pub close: KeyCode,
    /// `None` for lessons without a wireframe toggle.
    pub toggle_wireframe: Option<KeyCode>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            close: KeyCode::Escape,
            toggle_wireframe: None,
        }
    }
}

impl KeyBindings {
    /// Escape to close, plus Space to toggle wireframe if `wireframe` is set.
    #[must_use]
    pub fn new(wireframe: bool) -> Self {
        Self {
            toggle_wireframe: wireframe.then_some(KeyCode::Space),
            ..Self::default()
        }
    }

    /// Map a key event to an action. Releases and auto-repeats map to nothing, so
    /// holding a key down triggers it once.
    #[must_use]
    pub fn action(&self, key: KeyCode, state: ElementState, repeat: bool) -> Option<Action> {
        if !state.is_pressed() || repeat {
            return None;
        }
        if key == self.close {
            Some(Action::Close)
        } else if Some(key) == self.toggle_wireframe {
            Some(Action::ToggleWireframe)
        } else {
            None
        }
    }
}

/// Decides, once per iteration, whether the loop renders another frame.
#[derive(Debug, Default)]
pub struct LoopControl {
    close_requested: bool,
    frames: u64,
    frame_limit: Option<u64>,
}

impl LoopControl {
    #[must_use]
    pub fn new(frame_limit: Option<u64>) -> Self {
        Self {
            frame_limit,
            ..Self::default()
        }
    }

    /// Set the close flag. It is never cleared.
    pub fn request_close(&mut self) {
        if !self.close_requested {
            log::debug!("close requested after {} frames", self.frames);
        }
        self.close_requested = true;
    }

    #[must_use]
    pub fn should_close(&self) -> bool {
        self.close_requested || self.frame_limit.is_some_and(|limit| self.frames >= limit)
    }

    /// Start a frame if the loop is still running. Returns `false` once closed.
    pub fn begin_frame(&mut self) -> bool {
        if self.should_close() {
            return false;
        }
        self.frames += 1;
        true
    }

    /// Frames started so far.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_closes_in_every_lesson() {
        for bindings in [KeyBindings::new(false), KeyBindings::new(true)] {
            assert_eq!(
                bindings.action(KeyCode::Escape, ElementState::Pressed, false),
                Some(Action::Close)
            );
        }
    }

    #[test]
    fn space_only_toggles_when_bound() {
        let press = |bindings: KeyBindings| bindings.action(KeyCode::Space, ElementState::Pressed, false);
        assert_eq!(press(KeyBindings::new(false)), None);
        assert_eq!(press(KeyBindings::new(true)), Some(Action::ToggleWireframe));
    }

    #[test]
    fn releases_and_repeats_are_ignored() {
        let bindings = KeyBindings::new(true);
        assert_eq!(bindings.action(KeyCode::Space, ElementState::Released, false), None);
        assert_eq!(bindings.action(KeyCode::Space, ElementState::Pressed, true), None);
        assert_eq!(bindings.action(KeyCode::KeyA, ElementState::Pressed, false), None);
    }

    #[test]
    fn close_flag_stops_the_next_iteration() {
        let mut control = LoopControl::new(None);
        assert!(control.begin_frame());
        assert!(control.begin_frame());
        control.request_close();
        assert!(!control.begin_frame());
        assert!(!control.begin_frame());
        assert_eq!(control.frames(), 2);
    }

    #[test]
    fn frame_limit_acts_like_close() {
        let mut control = LoopControl::new(Some(3));
        let rendered = std::iter::from_fn(|| control.begin_frame().then_some(())).count();
        assert_eq!(rendered, 3);
        assert!(control.should_close());
    }

    #[test]
    fn zero_frame_limit_renders_nothing() {
        let mut control = LoopControl::new(Some(0));
        assert!(!control.begin_frame());
    }
}
