//! Grid engine: pure state transitions over the Cricket scoring grid.
//!
//! No I/O here: every transition takes the current `(Grid, History)` and
//! returns replacement values. Persistence and win bookkeeping live in the
//! session layer.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Row order is fixed: 20 down to 15, then Bull.
pub const ROW_LABELS: [&str; 7] = ["20", "19", "18", "17", "16", "15", "Bull"];

/// Number of rows on the board.
pub const ROW_COUNT: usize = ROW_LABELS.len();

/// Taps needed to close a number.
pub const CLOSED_TAPS: u8 = 3;

pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    InvalidPlayerCount(usize),
    OutOfBounds { row: usize, col: usize },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::InvalidPlayerCount(count) => {
                write!(
                    f,
                    "player count {} outside supported range {}..={}",
                    count, MIN_PLAYERS, MAX_PLAYERS
                )
            }
            GridError::OutOfBounds { row, col } => {
                write!(f, "cell ({}, {}) outside the grid", row, col)
            }
        }
    }
}

impl std::error::Error for GridError {}

/// Mark count for one (row, player) intersection.
///
/// Cells are values: transitions replace them, never mutate in place.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub taps: u8,
}

/// The scoring grid: 7 rows × one column per player.
///
/// Serializes as a plain array of rows so durable records stay readable by
/// existing scoreboard data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Grid {
    rows: Vec<Vec<Cell>>,
}

impl Grid {
    /// Build a fresh grid with every cell at zero taps.
    pub fn new(player_count: usize) -> Result<Self, GridError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&player_count) {
            return Err(GridError::InvalidPlayerCount(player_count));
        }
        Ok(Grid {
            rows: vec![vec![Cell { taps: 0 }; player_count]; ROW_COUNT],
        })
    }

    pub fn player_count(&self) -> usize {
        self.rows.first().map(Vec::len).unwrap_or(0)
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn cell(&self, row: usize, col: usize) -> Result<Cell, GridError> {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(col))
            .copied()
            .ok_or(GridError::OutOfBounds { row, col })
    }

    /// A column is closed when all 7 of its cells are at the ceiling.
    pub fn is_column_closed(&self, col: usize) -> bool {
        self.rows.len() == ROW_COUNT
            && self
                .rows
                .iter()
                .all(|cells| cells.get(col).map(|c| c.taps == CLOSED_TAPS).unwrap_or(false))
    }

    /// Shape check for grids loaded from untrusted storage or parameters:
    /// exactly 7 rows, uniform supported width, no cell above the ceiling.
    pub fn is_well_formed(&self) -> bool {
        let width = self.player_count();
        self.rows.len() == ROW_COUNT
            && (MIN_PLAYERS..=MAX_PLAYERS).contains(&width)
            && self.rows.iter().all(|cells| {
                cells.len() == width && cells.iter().all(|c| c.taps <= CLOSED_TAPS)
            })
    }

    fn with_cell(&self, row: usize, col: usize, cell: Cell) -> Grid {
        let mut rows = self.rows.clone();
        rows[row][col] = cell;
        Grid { rows }
    }
}

/// One reversible tap event. `previous_taps` is the cell value before the
/// tap, which is all undo needs to restore it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Move {
    pub row_index: usize,
    pub col_index: usize,
    pub previous_taps: u8,
}

/// Ordered record of every tap applied. Undo pops the last entry.
pub type History = Vec<Move>;

/// Result of applying one tap.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TapOutcome {
    pub grid: Grid,
    pub history: History,
    /// Column index of the winner, when this tap closed the tapped column.
    pub winner: Option<usize>,
}

/// Apply one tap to `(grid, history)`.
///
/// Taps ceiling at 3; a tap on an already-closed cell still appends a Move
/// with `previous_taps == 3`. That matches the scoreboard data already in
/// the wild, so it stays.
pub fn apply_tap(
    grid: &Grid,
    history: &History,
    row: usize,
    col: usize,
) -> Result<TapOutcome, GridError> {
    let cell = grid.cell(row, col)?;

    let new_grid = grid.with_cell(
        row,
        col,
        Cell {
            taps: (cell.taps + 1).min(CLOSED_TAPS),
        },
    );

    let mut new_history = history.clone();
    new_history.push(Move {
        row_index: row,
        col_index: col,
        previous_taps: cell.taps,
    });

    let winner = new_grid.is_column_closed(col).then_some(col);

    Ok(TapOutcome {
        grid: new_grid,
        history: new_history,
        winner,
    })
}

/// Reverse the most recent tap. With an empty history this is a silent
/// no-op returning the inputs unchanged.
pub fn undo(grid: &Grid, history: &History) -> (Grid, History) {
    let mut new_history = history.clone();
    let Some(last) = new_history.pop() else {
        return (grid.clone(), new_history);
    };

    // Only the recorded cell is touched; earlier moves on the same cell
    // keep their own previous_taps for later undos.
    let new_grid = grid.with_cell(
        last.row_index,
        last.col_index,
        Cell {
            taps: last.previous_taps,
        },
    );

    (new_grid, new_history)
}

/// Full reset: fresh grid, empty history. There is no partial reset.
pub fn reset(player_count: usize) -> Result<(Grid, History), GridError> {
    Ok((Grid::new(player_count)?, History::new()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fresh(players: usize) -> (Grid, History) {
        (Grid::new(players).unwrap(), History::new())
    }

    #[test]
    fn new_grid_dimensions() {
        for players in MIN_PLAYERS..=MAX_PLAYERS {
            let grid = Grid::new(players).unwrap();
            assert_eq!(grid.rows().len(), ROW_COUNT);
            for row in grid.rows() {
                assert_eq!(row.len(), players);
                assert!(row.iter().all(|cell| cell.taps == 0));
            }
        }
    }

    #[test]
    fn new_grid_rejects_bad_player_counts() {
        for players in [0, 1, 5, 10] {
            assert_eq!(
                Grid::new(players).unwrap_err(),
                GridError::InvalidPlayerCount(players)
            );
        }
    }

    #[test]
    fn tap_increments_and_records_move() {
        let (grid, history) = fresh(2);
        let outcome = apply_tap(&grid, &history, 0, 1).unwrap();

        assert_eq!(outcome.grid.cell(0, 1).unwrap().taps, 1);
        assert_eq!(
            outcome.history,
            vec![Move {
                row_index: 0,
                col_index: 1,
                previous_taps: 0,
            }]
        );
        assert_eq!(outcome.winner, None);
        // inputs untouched
        assert_eq!(grid.cell(0, 1).unwrap().taps, 0);
        assert!(history.is_empty());
    }

    #[test]
    fn taps_ceiling_at_three() {
        let (mut grid, mut history) = fresh(2);
        for _ in 0..10 {
            let outcome = apply_tap(&grid, &history, 3, 0).unwrap();
            grid = outcome.grid;
            history = outcome.history;
            assert!(grid.cell(3, 0).unwrap().taps <= CLOSED_TAPS);
        }
        assert_eq!(grid.cell(3, 0).unwrap().taps, CLOSED_TAPS);
    }

    #[test]
    fn maxed_cell_tap_still_appends_move() {
        let (mut grid, mut history) = fresh(2);
        for _ in 0..4 {
            let outcome = apply_tap(&grid, &history, 0, 0).unwrap();
            grid = outcome.grid;
            history = outcome.history;
        }
        assert_eq!(history.len(), 4);
        assert_eq!(history[3].previous_taps, CLOSED_TAPS);
    }

    #[test]
    fn tap_out_of_bounds() {
        let (grid, history) = fresh(2);
        assert_eq!(
            apply_tap(&grid, &history, 7, 0).unwrap_err(),
            GridError::OutOfBounds { row: 7, col: 0 }
        );
        assert_eq!(
            apply_tap(&grid, &history, 0, 2).unwrap_err(),
            GridError::OutOfBounds { row: 0, col: 2 }
        );
    }

    #[test]
    fn undo_restores_exact_prior_state() {
        let (grid, history) = fresh(3);
        let outcome = apply_tap(&grid, &history, 2, 1).unwrap();
        let (undone_grid, undone_history) = undo(&outcome.grid, &outcome.history);

        assert_eq!(undone_grid, grid);
        assert_eq!(undone_history, history);
    }

    #[test]
    fn undo_on_empty_history_is_noop() {
        let (grid, history) = fresh(2);
        let (same_grid, same_history) = undo(&grid, &history);
        assert_eq!(same_grid, grid);
        assert!(same_history.is_empty());
    }

    #[test]
    fn undo_only_touches_recorded_cell() {
        let (grid, history) = fresh(2);
        let a = apply_tap(&grid, &history, 0, 0).unwrap();
        let b = apply_tap(&a.grid, &a.history, 0, 0).unwrap();
        let c = apply_tap(&b.grid, &b.history, 1, 1).unwrap();

        let (undone, _) = undo(&c.grid, &c.history);
        // (1,1) reverted, the doubly-tapped (0,0) untouched
        assert_eq!(undone.cell(1, 1).unwrap().taps, 0);
        assert_eq!(undone.cell(0, 0).unwrap().taps, 2);
    }

    #[test]
    fn winner_fires_exactly_on_twenty_first_tap() {
        let (mut grid, mut history) = fresh(2);
        let mut taps = 0;
        for row in 0..ROW_COUNT {
            for _ in 0..CLOSED_TAPS {
                let outcome = apply_tap(&grid, &history, row, 0).unwrap();
                grid = outcome.grid;
                history = outcome.history;
                taps += 1;
                if taps < 21 {
                    assert_eq!(outcome.winner, None, "premature win at tap {}", taps);
                } else {
                    assert_eq!(outcome.winner, Some(0));
                }
            }
        }
        assert_eq!(taps, 21);
    }

    #[test]
    fn closed_column_tap_does_not_signal_other_column() {
        let (mut grid, mut history) = fresh(2);
        for row in 0..ROW_COUNT {
            for _ in 0..CLOSED_TAPS {
                let outcome = apply_tap(&grid, &history, row, 0).unwrap();
                grid = outcome.grid;
                history = outcome.history;
            }
        }
        assert!(grid.is_column_closed(0));

        // Tapping inside the closed column re-reports that column, and a tap
        // in the open column reports nothing.
        let again = apply_tap(&grid, &history, 0, 0).unwrap();
        assert_eq!(again.winner, Some(0));
        let other = apply_tap(&grid, &history, 0, 1).unwrap();
        assert_eq!(other.winner, None);
    }

    #[test]
    fn reset_is_always_full() {
        let (mut grid, mut history) = fresh(2);
        for _ in 0..5 {
            let outcome = apply_tap(&grid, &history, 0, 0).unwrap();
            grid = outcome.grid;
            history = outcome.history;
        }

        let (reset_grid, reset_history) = reset(2).unwrap();
        assert_eq!(reset_grid, Grid::new(2).unwrap());
        assert!(reset_history.is_empty());
    }

    #[test]
    fn well_formed_checks_shape_and_ceiling() {
        let grid = Grid::new(2).unwrap();
        assert!(grid.is_well_formed());

        let mut short = grid.clone();
        short.rows.pop();
        assert!(!short.is_well_formed());

        let mut ragged = grid.clone();
        ragged.rows[3].pop();
        assert!(!ragged.is_well_formed());

        let mut overfull = grid;
        overfull.rows[0][0] = Cell { taps: 4 };
        assert!(!overfull.is_well_formed());
    }

    #[test]
    fn move_serializes_with_wire_field_names() {
        let mv = Move {
            row_index: 4,
            col_index: 1,
            previous_taps: 2,
        };
        let json = serde_json::to_string(&mv).unwrap();
        assert_eq!(json, r#"{"rowIndex":4,"colIndex":1,"previousTaps":2}"#);
    }

    #[test]
    fn grid_serializes_as_plain_rows() {
        let grid = Grid::new(2).unwrap();
        let json = serde_json::to_string(&grid).unwrap();
        assert!(json.starts_with(r#"[[{"taps":0}"#));
        let back: Grid = serde_json::from_str(&json).unwrap();
        assert_eq!(back, grid);
    }
}
