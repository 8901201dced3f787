//! Polled input state. The host writes into an [`InputSnapshot`] between
//! ticks; the tick reads held keys as the latest known state and drains the
//! relative channels (mouse look, zoom) so they are applied exactly once.

use std::collections::BTreeSet;

pub const KEY_FORWARD: char = 'w';
pub const KEY_BACK: char = 's';
pub const KEY_LEFT: char = 'a';
pub const KEY_RIGHT: char = 'd';
pub const KEY_ACTIVATE: char = 'f';

/// One wheel notch. Scripts carry raw signed notch counts instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    /// Camera moves closer to the avatar.
    In,
    /// Camera moves farther from the avatar.
    Out,
}

impl ZoomDirection {
    pub fn notches(self) -> i32 {
        match self {
            ZoomDirection::In => -1,
            ZoomDirection::Out => 1,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct InputSnapshot {
    held: BTreeSet<char>,
    mouse_delta: (f32, f32),
    zoom_notches: i32,
    look_engaged: bool,
}

impl InputSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: char) {
        self.held.extend(key.to_lowercase());
    }

    pub fn release(&mut self, key: char) {
        for lower in key.to_lowercase() {
            self.held.remove(&lower);
        }
    }

    pub fn clear_keys(&mut self) {
        self.held.clear();
    }

    pub fn is_held(&self, key: char) -> bool {
        key.to_lowercase().all(|lower| self.held.contains(&lower))
    }

    pub fn held_keys(&self) -> impl Iterator<Item = char> + '_ {
        self.held.iter().copied()
    }

    /// Relative pointer motion, in raw device units. Ignored unless look mode
    /// is engaged.
    pub fn add_mouse_delta(&mut self, dx: f32, dy: f32) {
        if !self.look_engaged || !dx.is_finite() || !dy.is_finite() {
            return;
        }
        self.mouse_delta.0 += dx;
        self.mouse_delta.1 += dy;
    }

    pub fn take_mouse_delta(&mut self) -> (f32, f32) {
        std::mem::take(&mut self.mouse_delta)
    }

    pub fn add_zoom(&mut self, direction: ZoomDirection) {
        self.zoom_notches = self.zoom_notches.saturating_add(direction.notches());
    }

    pub fn add_zoom_notches(&mut self, notches: i32) {
        self.zoom_notches = self.zoom_notches.saturating_add(notches);
    }

    pub fn take_zoom(&mut self) -> i32 {
        std::mem::take(&mut self.zoom_notches)
    }

    pub fn look_engaged(&self) -> bool {
        self.look_engaged
    }

    /// Releasing look mode drops any motion captured while it was engaged.
    pub fn set_look_engaged(&mut self, engaged: bool) {
        self.look_engaged = engaged;
        if !engaged {
            self.mouse_delta = (0.0, 0.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_case_insensitive() {
        let mut input = InputSnapshot::new();
        input.press('W');
        assert!(input.is_held('w'));
        assert!(input.is_held('W'));
        input.release('w');
        assert!(!input.is_held('W'));
    }

    #[test]
    fn mouse_delta_requires_look_mode_and_drains() {
        let mut input = InputSnapshot::new();
        input.add_mouse_delta(10.0, 2.0);
        assert_eq!(input.take_mouse_delta(), (0.0, 0.0));

        input.set_look_engaged(true);
        input.add_mouse_delta(10.0, 2.0);
        input.add_mouse_delta(-4.0, 1.0);
        assert_eq!(input.take_mouse_delta(), (6.0, 3.0));
        assert_eq!(input.take_mouse_delta(), (0.0, 0.0));
    }

    #[test]
    fn zoom_notches_accumulate_with_sign() {
        let mut input = InputSnapshot::new();
        input.add_zoom(ZoomDirection::Out);
        input.add_zoom(ZoomDirection::Out);
        input.add_zoom(ZoomDirection::In);
        assert_eq!(input.take_zoom(), 1);
        assert_eq!(input.take_zoom(), 0);
    }

    #[test]
    fn wheel_and_scripted_notches_share_one_channel() {
        let mut input = InputSnapshot::new();
        input.add_zoom_notches(-3);
        input.add_zoom(ZoomDirection::Out);
        assert_eq!(ZoomDirection::In.notches(), -1);
        assert_eq!(input.take_zoom(), -2);
    }

    #[test]
    fn releasing_look_discards_pending_motion() {
        let mut input = InputSnapshot::new();
        input.set_look_engaged(true);
        input.add_mouse_delta(5.0, 5.0);
        input.set_look_engaged(false);
        assert_eq!(input.take_mouse_delta(), (0.0, 0.0));
    }
}
