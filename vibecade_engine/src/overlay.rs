//! Seam to the surface that displays a portal's page over the scene. The
//! engine only asks it to show or hide a locator; the gateway reports back
//! when the user closes it.

/// Host-provided full-screen overlay.
pub trait OverlayGateway {
    fn show(&mut self, locator: &str);

    fn hide(&mut self);

    /// Returns `true` once per user-initiated close since the last call.
    fn take_dismissal(&mut self) -> bool;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayEvent {
    Show(String),
    Hide,
}

/// In-memory gateway for headless runs and tests: records every request and
/// lets the caller stage a close.
#[derive(Debug, Default)]
pub struct RecordingOverlay {
    events: Vec<OverlayEvent>,
    showing: Option<String>,
    dismissal_pending: bool,
}

impl RecordingOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[OverlayEvent] {
        &self.events
    }

    pub fn showing(&self) -> Option<&str> {
        self.showing.as_deref()
    }

    pub fn show_count(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, OverlayEvent::Show(_)))
            .count()
    }

    /// Simulate the user pressing the overlay's close control.
    pub fn request_dismissal(&mut self) {
        if self.showing.is_some() {
            self.dismissal_pending = true;
        }
    }
}

impl OverlayGateway for RecordingOverlay {
    fn show(&mut self, locator: &str) {
        self.showing = Some(locator.to_string());
        self.events.push(OverlayEvent::Show(locator.to_string()));
    }

    fn hide(&mut self) {
        self.showing = None;
        self.dismissal_pending = false;
        self.events.push(OverlayEvent::Hide);
    }

    fn take_dismissal(&mut self) -> bool {
        std::mem::take(&mut self.dismissal_pending)
    }
}
