//! Winner announcement: emits the win handoff payload to the host.

use event_emitter_rs::EventEmitter;
use tracing::warn;

use crate::session::WinnerAnnouncement;

/// Event the announcement payload is emitted under.
pub const WINNER_EVENT: &str = "winner";

/// Bridges the session's win handoff to host listeners. The payload is the
/// serialized [`WinnerAnnouncement`] (`{"playerName": ..., "date": ...}`).
pub struct WinnerAnnouncer {
    emitter: EventEmitter,
}

impl Default for WinnerAnnouncer {
    fn default() -> Self {
        Self::new()
    }
}

impl WinnerAnnouncer {
    pub fn new() -> Self {
        WinnerAnnouncer {
            emitter: EventEmitter::new(),
        }
    }

    /// Register a listener for winner announcements.
    pub fn on_winner<F>(&mut self, listener: F)
    where
        F: Fn(String) + Send + Sync + 'static,
    {
        self.emitter.on(WINNER_EVENT, listener);
    }

    pub fn announce(&mut self, announcement: &WinnerAnnouncement) {
        match serde_json::to_string(announcement) {
            Ok(payload) => {
                self.emitter.emit(WINNER_EVENT, payload);
            }
            Err(e) => warn!("winner announcement serialization failed: {e}"),
        }
    }
}
