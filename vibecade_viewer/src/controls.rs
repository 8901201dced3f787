//! Translation from winit events to the engine's polled input.

use vibecade_engine::{InputSnapshot, ZoomDirection};
use winit::{
    event::MouseScrollDelta,
    keyboard::Key,
    window::{CursorGrabMode, Window},
};

/// Single-character keys are tracked case-insensitively; anything else is
/// not part of the hub's control scheme.
pub fn key_char(key: &Key) -> Option<char> {
    let Key::Character(text) = key else {
        return None;
    };
    let mut chars = text.chars();
    let first = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    first.to_lowercase().next()
}

/// Scrolling up brings the camera in, scrolling down pushes it out.
pub fn zoom_from_scroll(delta: MouseScrollDelta) -> Option<ZoomDirection> {
    let y = match delta {
        MouseScrollDelta::LineDelta(_, y) => f64::from(y),
        MouseScrollDelta::PixelDelta(position) => position.y,
    };
    if y > 0.0 {
        Some(ZoomDirection::In)
    } else if y < 0.0 {
        Some(ZoomDirection::Out)
    } else {
        None
    }
}

pub fn engage_look(window: &Window, input: &mut InputSnapshot) {
    if input.look_engaged() {
        return;
    }
    let grabbed = window
        .set_cursor_grab(CursorGrabMode::Locked)
        .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined));
    if let Err(err) = grabbed {
        log::warn!("cursor grab unavailable: {err}");
    }
    window.set_cursor_visible(false);
    input.set_look_engaged(true);
    log::debug!("mouse look engaged");
}

pub fn release_look(window: &Window, input: &mut InputSnapshot) {
    if !input.look_engaged() {
        return;
    }
    let _ = window.set_cursor_grab(CursorGrabMode::None);
    window.set_cursor_visible(true);
    input.set_look_engaged(false);
    log::debug!("mouse look released");
}

#[cfg(test)]
mod tests {
    use winit::dpi::PhysicalPosition;
    use winit::keyboard::NamedKey;

    use super::*;

    #[test]
    fn letters_fold_to_lowercase() {
        assert_eq!(key_char(&Key::Character("W".into())), Some('w'));
        assert_eq!(key_char(&Key::Character("f".into())), Some('f'));
        assert_eq!(key_char(&Key::Character("ab".into())), None);
        assert_eq!(key_char(&Key::Named(NamedKey::Escape)), None);
    }

    #[test]
    fn scroll_direction_maps_to_zoom() {
        assert_eq!(
            zoom_from_scroll(MouseScrollDelta::LineDelta(0.0, 1.0)),
            Some(ZoomDirection::In)
        );
        assert_eq!(
            zoom_from_scroll(MouseScrollDelta::LineDelta(0.0, -2.0)),
            Some(ZoomDirection::Out)
        );
        assert_eq!(
            zoom_from_scroll(MouseScrollDelta::PixelDelta(PhysicalPosition::new(4.0, -12.0))),
            Some(ZoomDirection::Out)
        );
        assert_eq!(zoom_from_scroll(MouseScrollDelta::LineDelta(3.0, 0.0)), None);
    }
}
