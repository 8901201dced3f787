use std::{io, sync::Arc};

use vibecade_engine::OverlayGateway;
use winit::window::Window;

/// Hands a game locator to something that can actually play it.
pub type GameLauncher = Box<dyn FnMut(&str) -> io::Result<()>>;

/// Opens the locator with the desktop's default handler (usually a browser).
pub fn system_launcher() -> GameLauncher {
    Box::new(|locator: &str| open::that_detached(locator))
}

/// Window-independent half of the overlay: which game is up, what the title
/// should read and whether the user asked to close it.
pub struct OverlaySession {
    base_title: String,
    showing: Option<String>,
    pending_dismissal: bool,
    launcher: Option<GameLauncher>,
}

impl OverlaySession {
    pub fn new(base_title: impl Into<String>, launcher: Option<GameLauncher>) -> Self {
        Self {
            base_title: base_title.into(),
            showing: None,
            pending_dismissal: false,
            launcher,
        }
    }

    pub fn showing(&self) -> Option<&str> {
        self.showing.as_deref()
    }

    /// Launches the game and returns the window title to display while it runs.
    /// A failed launch is logged; the in-hub overlay still opens so the user
    /// can close it.
    pub fn open(&mut self, locator: &str) -> String {
        log::info!("opening game overlay for {locator}");
        if let Some(launch) = self.launcher.as_mut() {
            if let Err(err) = launch(locator) {
                log::warn!("could not open {locator}: {err}");
            }
        }
        self.showing = Some(locator.to_string());
        self.pending_dismissal = false;
        format!("{} - {}", self.base_title, locator)
    }

    pub fn close(&mut self) -> &str {
        if let Some(locator) = self.showing.take() {
            log::info!("closing game overlay for {locator}");
        }
        self.pending_dismissal = false;
        &self.base_title
    }

    /// Queue a close; the world picks it up at the start of the next tick.
    pub fn request_dismissal(&mut self) {
        if self.showing.is_some() {
            self.pending_dismissal = true;
        }
    }

    pub fn take_dismissal(&mut self) -> bool {
        std::mem::take(&mut self.pending_dismissal)
    }
}

/// Shows a portal's game by launching its locator and retitling the window,
/// while the renderer draws the tinted overlay and close button on top of
/// the hub.
pub struct WindowOverlay {
    window: Arc<Window>,
    session: OverlaySession,
}

impl WindowOverlay {
    pub fn new(window: Arc<Window>, session: OverlaySession) -> Self {
        Self { window, session }
    }

    pub fn showing(&self) -> Option<&str> {
        self.session.showing()
    }

    pub fn request_dismissal(&mut self) {
        self.session.request_dismissal();
    }
}

impl OverlayGateway for WindowOverlay {
    fn show(&mut self, locator: &str) {
        let title = self.session.open(locator);
        self.window.set_title(&title);
    }

    fn hide(&mut self) {
        let title = self.session.close();
        self.window.set_title(title);
    }

    fn take_dismissal(&mut self) -> bool {
        self.session.take_dismissal()
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;

    fn recording_session(fail: bool) -> (OverlaySession, Rc<RefCell<Vec<String>>>) {
        let launched = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&launched);
        let launcher: GameLauncher = Box::new(move |locator: &str| {
            sink.borrow_mut().push(locator.to_string());
            if fail {
                Err(io::Error::new(io::ErrorKind::NotFound, "no browser"))
            } else {
                Ok(())
            }
        });
        (OverlaySession::new("Vibecade", Some(launcher)), launched)
    }

    #[test]
    fn opening_launches_the_locator() {
        let (mut session, launched) = recording_session(false);
        let title = session.open("https://example.invalid/game");

        assert_eq!(title, "Vibecade - https://example.invalid/game");
        assert_eq!(session.showing(), Some("https://example.invalid/game"));
        assert_eq!(*launched.borrow(), vec!["https://example.invalid/game".to_string()]);
    }

    #[test]
    fn failed_launch_still_shows_the_overlay() {
        let (mut session, launched) = recording_session(true);
        session.open("https://example.invalid/game");

        assert_eq!(launched.borrow().len(), 1);
        assert!(session.showing().is_some());
        session.request_dismissal();
        assert!(session.take_dismissal());
    }

    #[test]
    fn dismissal_only_queues_while_showing() {
        let mut session = OverlaySession::new("Vibecade", None);
        session.request_dismissal();
        assert!(!session.take_dismissal());

        session.open("https://example.invalid/game");
        session.request_dismissal();
        assert_eq!(session.close(), "Vibecade");
        assert!(!session.take_dismissal());
        assert_eq!(session.showing(), None);
    }
}
