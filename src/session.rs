//! Session: the state machine driving one active game.
//!
//! A session owns exactly one in-memory [`GameRecord`] and runs it through
//! `Active -> Won`. Every state-changing action persists the whole record;
//! saves are intentionally redundant and correctness rests on the store's
//! idempotent upsert-by-name, not on avoiding duplicate writes. Lifecycle
//! hooks (`on_session_resume`, `on_session_suspend`) are explicit methods
//! the host invokes; nothing here assumes automatic scheduling.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::clock::{Clock, SystemClock};
use crate::grid::{self, Grid, GridError, History, MAX_PLAYERS, MIN_PLAYERS};
use crate::record::{Collection, GameRecord};
use crate::store::{DurableStore, GameStore};

#[cfg(feature = "announcer")]
use crate::announcer::WinnerAnnouncer;

/// Players used when construction parameters are unusable.
pub const DEFAULT_PLAYERS: [&str; 2] = ["Player 1", "Player 2"];

/// Prompt passed to the confirmation capability before a board reset.
pub const RESET_PROMPT: &str = "Reset the board? All marks will be cleared.";

/// Confirmation capability for destructive actions, implemented by the
/// host (a dialog, a prompt). Declining leaves state fully unchanged.
pub trait Confirmation {
    fn confirm(&self, prompt: &str) -> bool;
}

/// Win handoff to the external announcement collaborator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WinnerAnnouncement {
    pub player_name: String,
    pub date: String,
}

/// Construction parameters handed over by the host's navigation layer.
/// `players` arrives as a serialized JSON list; `grid` and `history` are
/// serialized and optional (absent means a fresh board).
#[derive(Clone, Debug)]
pub struct SessionParams {
    pub game_name: String,
    pub players: String,
    pub grid: Option<String>,
    pub history: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionStatus {
    Active,
    /// Terminal. Entered exactly once, on the winning tap; further tap,
    /// undo and reset input is refused.
    Won { winner: String },
}

/// One active game against a durable store.
pub struct Session<S: DurableStore, C: Clock = SystemClock> {
    games: GameStore<S, C>,
    record: GameRecord,
    status: SessionStatus,
    changes_pending: bool,
    #[cfg(feature = "announcer")]
    announcer: WinnerAnnouncer,
}

impl<S: DurableStore> Session<S> {
    pub fn new(store: S, params: SessionParams) -> Self {
        Self::with_clock(store, params, SystemClock)
    }
}

impl<S: DurableStore, C: Clock> Session<S, C> {
    pub fn with_clock(store: S, params: SessionParams, clock: C) -> Self {
        let date = clock.date_string();
        let games = GameStore::with_clock(store, clock);

        let (players, grid, history) = match parse_seed(&params) {
            Ok(seed) => seed,
            Err(reason) => {
                // Never crash the scoreboard: unusable parameters start a
                // default two-player board instead.
                warn!(
                    game = %params.game_name,
                    "session parameters unusable ({reason}); starting with defaults"
                );
                default_seed()
            }
        };

        Session {
            games,
            record: GameRecord::new(params.game_name, players, grid, history, date),
            status: SessionStatus::Active,
            changes_pending: false,
            #[cfg(feature = "announcer")]
            announcer: WinnerAnnouncer::new(),
        }
    }

    pub fn record(&self) -> &GameRecord {
        &self.record
    }

    pub fn status(&self) -> &SessionStatus {
        &self.status
    }

    pub fn is_won(&self) -> bool {
        matches!(self.status, SessionStatus::Won { .. })
    }

    pub fn winner(&self) -> Option<&str> {
        match &self.status {
            SessionStatus::Won { winner } => Some(winner),
            SessionStatus::Active => None,
        }
    }

    pub fn changes_pending(&self) -> bool {
        self.changes_pending
    }

    /// Register a listener for the winner announcement event.
    #[cfg(feature = "announcer")]
    pub fn on_winner<F>(&mut self, listener: F)
    where
        F: Fn(String) + Send + Sync + 'static,
    {
        self.announcer.on_winner(listener);
    }

    /// Apply one tap. Persists the updated record, and on a winning tap
    /// migrates it to the completed collection and returns the win
    /// handoff. Refused (a no-op) once the game is won.
    ///
    /// Out-of-range coordinates are a programmer error; the host's input
    /// layer guarantees indices are in range.
    pub fn tap(&mut self, row: usize, col: usize) -> Result<Option<WinnerAnnouncement>, GridError> {
        if self.is_won() {
            debug!(game = %self.record.game_name, "tap refused: game already won");
            return Ok(None);
        }

        let outcome = grid::apply_tap(&self.record.grid, &self.record.history, row, col)?;
        self.record.grid = outcome.grid;
        self.record.history = outcome.history;
        self.changes_pending = true;
        self.games.upsert(Collection::InProgress, &self.record);

        let Some(winner_col) = outcome.winner else {
            return Ok(None);
        };

        // Column order equals player order, enforced at construction and
        // resume, so the winning column indexes straight into players.
        let winner = self.record.players[winner_col].clone();
        self.games.migrate_to_completed(&self.record, &winner);

        let announcement = WinnerAnnouncement {
            player_name: winner.clone(),
            date: self.record.date.clone(),
        };
        #[cfg(feature = "announcer")]
        self.announcer.announce(&announcement);

        self.status = SessionStatus::Won { winner };
        Ok(Some(announcement))
    }

    /// Reverse the most recent tap and persist. No-op when the history is
    /// empty or the game is won.
    pub fn undo(&mut self) {
        if self.is_won() || self.record.history.is_empty() {
            return;
        }

        let (new_grid, new_history) = grid::undo(&self.record.grid, &self.record.history);
        self.record.grid = new_grid;
        self.record.history = new_history;
        self.changes_pending = true;
        self.games.upsert(Collection::InProgress, &self.record);
    }

    /// Clear the board after confirmation. A declined confirmation changes
    /// nothing; a confirmed reset reinitializes grid and history and
    /// persists immediately. Disabled once the game is won. Returns
    /// whether the reset happened.
    pub fn reset(&mut self, confirmation: &dyn Confirmation) -> bool {
        if self.is_won() || !confirmation.confirm(RESET_PROMPT) {
            return false;
        }

        match grid::reset(self.record.players.len()) {
            Ok((new_grid, new_history)) => {
                self.record.grid = new_grid;
                self.record.history = new_history;
                self.changes_pending = true;
                self.games.upsert(Collection::InProgress, &self.record);
                true
            }
            Err(e) => {
                warn!(game = %self.record.game_name, "reset failed: {e}");
                false
            }
        }
    }

    /// Host hook: the session regained focus. Re-reads the in-progress
    /// collection and, when a record with this game's name exists, its
    /// grid and history overwrite the in-memory copy: durable state wins
    /// over unsaved local edits for cross-session consistency.
    pub fn on_session_resume(&mut self) {
        if self.is_won() {
            return;
        }

        let Some(durable) = self
            .games
            .list(Collection::InProgress)
            .into_iter()
            .find(|r| r.game_name == self.record.game_name)
        else {
            return;
        };

        if !durable.grid.is_well_formed()
            || durable.grid.player_count() != self.record.players.len()
        {
            warn!(
                game = %self.record.game_name,
                "durable record shape mismatch; keeping in-memory state"
            );
            return;
        }

        self.record.grid = durable.grid;
        self.record.history = durable.history;
    }

    /// Host hook: the session is ending without a win. Persists the
    /// current record when there are unsaved changes.
    pub fn on_session_suspend(&mut self) {
        if self.is_won() || !self.changes_pending {
            return;
        }
        self.games.upsert(Collection::InProgress, &self.record);
    }
}

fn parse_seed(params: &SessionParams) -> Result<(Vec<String>, Grid, History), String> {
    let players: Vec<String> =
        serde_json::from_str(&params.players).map_err(|e| format!("players: {e}"))?;
    if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&players.len()) {
        return Err(format!("player count {} unsupported", players.len()));
    }

    let grid = match &params.grid {
        Some(raw) => {
            let grid: Grid = serde_json::from_str(raw).map_err(|e| format!("grid: {e}"))?;
            if !grid.is_well_formed() || grid.player_count() != players.len() {
                return Err("grid shape does not match players".to_string());
            }
            grid
        }
        None => Grid::new(players.len()).map_err(|e| e.to_string())?,
    };

    let history = match &params.history {
        Some(raw) => serde_json::from_str(raw).map_err(|e| format!("history: {e}"))?,
        None => History::new(),
    };

    Ok((players, grid, history))
}

fn default_seed() -> (Vec<String>, Grid, History) {
    let players: Vec<String> = DEFAULT_PLAYERS.iter().map(|s| s.to_string()).collect();
    let grid = Grid::new(players.len()).expect("default player count is valid");
    (players, grid, History::new())
}
