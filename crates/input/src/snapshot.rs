use crate::action::Action;
use glam::Vec2;
use std::collections::BTreeSet;

/// Immutable view of input for one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputSnapshot {
    held: BTreeSet<Action>,
    /// Cursor motion since the previous frame, in pixels (x right, y down).
    pub mouse_delta: Vec2,
    /// Scroll wheel lines since the previous frame (positive is away from the user).
    pub scroll_delta: f32,
}

impl InputSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_held(mut self, action: Action) -> Self {
        self.held.insert(action);
        self
    }

    pub fn with_mouse_delta(mut self, dx: f32, dy: f32) -> Self {
        self.mouse_delta = Vec2::new(dx, dy);
        self
    }

    pub fn with_scroll(mut self, lines: f32) -> Self {
        self.scroll_delta = lines;
        self
    }

    pub fn is_held(&self, action: Action) -> bool {
        self.held.contains(&action)
    }

    /// -1, 0 or 1 for a pair of opposing actions. `negative` wins when both are held.
    pub fn axis(&self, negative: Action, positive: Action) -> f32 {
        if self.is_held(negative) {
            -1.0
        } else if self.is_held(positive) {
            1.0
        } else {
            0.0
        }
    }

    pub fn exit_requested(&self) -> bool {
        self.is_held(Action::Exit)
    }
}

/// Accumulates window and device events between frames.
#[derive(Debug, Default)]
pub struct InputState {
    held: BTreeSet<Action>,
    mouse_delta: Vec2,
    scroll_delta: f32,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, action: Action, pressed: bool) {
        if pressed {
            if self.held.insert(action) {
                tracing::trace!("pressed {action:?}");
            }
        } else if self.held.remove(&action) {
            tracing::trace!("released {action:?}");
        }
    }

    pub fn add_mouse_delta(&mut self, dx: f32, dy: f32) {
        self.mouse_delta += Vec2::new(dx, dy);
    }

    pub fn add_scroll(&mut self, lines: f32) {
        self.scroll_delta += lines;
    }

    /// Drop all held actions, e.g. when the window loses focus.
    pub fn release_all(&mut self) {
        self.held.clear();
    }

    /// Capture this frame's input and reset the accumulated deltas.
    pub fn snapshot(&mut self) -> InputSnapshot {
        InputSnapshot {
            held: self.held.clone(),
            mouse_delta: std::mem::take(&mut self.mouse_delta),
            scroll_delta: std::mem::take(&mut self.scroll_delta),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_resets_deltas_but_keeps_held() {
        let mut state = InputState::new();
        state.set(Action::MoveForward, true);
        state.add_mouse_delta(3.0, -2.0);
        state.add_mouse_delta(1.0, 1.0);
        state.add_scroll(1.5);

        let first = state.snapshot();
        assert!(first.is_held(Action::MoveForward));
        assert_eq!(first.mouse_delta, Vec2::new(4.0, -1.0));
        assert_eq!(first.scroll_delta, 1.5);

        let second = state.snapshot();
        assert!(second.is_held(Action::MoveForward));
        assert_eq!(second.mouse_delta, Vec2::ZERO);
        assert_eq!(second.scroll_delta, 0.0);
    }

    #[test]
    fn release_clears_action() {
        let mut state = InputState::new();
        state.set(Action::StrafeLeft, true);
        state.set(Action::StrafeLeft, false);
        assert!(!state.snapshot().is_held(Action::StrafeLeft));

        state.set(Action::Ascend, true);
        state.release_all();
        assert_eq!(state.snapshot(), InputSnapshot::new());
    }

    #[test]
    fn axis_prefers_negative() {
        let both = InputSnapshot::new()
            .with_held(Action::MoveBackward)
            .with_held(Action::MoveForward);
        assert_eq!(both.axis(Action::MoveBackward, Action::MoveForward), -1.0);

        let fwd = InputSnapshot::new().with_held(Action::MoveForward);
        assert_eq!(fwd.axis(Action::MoveBackward, Action::MoveForward), 1.0);

        assert_eq!(
            InputSnapshot::new().axis(Action::StrafeLeft, Action::StrafeRight),
            0.0
        );
    }

    #[test]
    fn exit_requested() {
        assert!(InputSnapshot::new().with_held(Action::Exit).exit_requested());
        assert!(!InputSnapshot::new().exit_requested());
    }
}
