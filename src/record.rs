//! Game records and the durable collections they live in.

use serde::{Deserialize, Serialize};

use crate::grid::{Grid, History};

/// The two durable partitions of game records, by lifecycle stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Collection {
    InProgress,
    Completed,
}

impl Collection {
    /// Durable-store key holding this collection's serialized record array.
    /// These names are fixed: existing saved data uses them.
    pub const fn key(self) -> &'static str {
        match self {
            Collection::InProgress => "inProgressGames",
            Collection::Completed => "completedGames",
        }
    }
}

/// One tracked game. `game_name` is the identity key within a collection:
/// upserts replace any record carrying the same name.
///
/// Field names are pinned to the wire format of existing saved data
/// (`gameName`, `players`, `grid`, `history`, `date`, `time`, `winner`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRecord {
    pub game_name: String,
    /// Column order on the grid follows this player order.
    pub players: Vec<String>,
    pub grid: Grid,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub history: History,
    pub date: String,
    /// Completion time; only present on completed records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    /// Winning player's name; only present on completed records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winner: Option<String>,
}

impl GameRecord {
    /// A fresh in-progress record.
    pub fn new(
        game_name: impl Into<String>,
        players: Vec<String>,
        grid: Grid,
        history: History,
        date: impl Into<String>,
    ) -> Self {
        GameRecord {
            game_name: game_name.into(),
            players,
            grid,
            history,
            date: date.into(),
            time: None,
            winner: None,
        }
    }

    /// The completed shape of this record: winner and time filled in,
    /// history dropped. Grid, players, name and date carry over.
    pub fn into_completed(self, winner: impl Into<String>, time: impl Into<String>) -> Self {
        GameRecord {
            history: History::new(),
            time: Some(time.into()),
            winner: Some(winner.into()),
            ..self
        }
    }
}
