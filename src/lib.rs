mod clock;
mod grid;
mod record;
mod session;
mod store;

#[cfg(feature = "announcer")]
mod announcer;

pub use clock::{Clock, SystemClock};
pub use grid::{
    apply_tap, reset, undo, Cell, Grid, GridError, History, Move, TapOutcome, CLOSED_TAPS,
    MAX_PLAYERS, MIN_PLAYERS, ROW_COUNT, ROW_LABELS,
};
pub use record::{Collection, GameRecord};
pub use session::{
    Confirmation, Session, SessionParams, SessionStatus, WinnerAnnouncement, DEFAULT_PLAYERS,
    RESET_PROMPT,
};
pub use store::{DurableStore, GameStore, InMemoryStore, StoreError};

#[cfg(feature = "announcer")]
pub use announcer::{WinnerAnnouncer, WINNER_EVENT};

// Re-export the EventEmitter from the event_emitter_rs crate
#[cfg(feature = "announcer")]
pub use event_emitter_rs::EventEmitter;
