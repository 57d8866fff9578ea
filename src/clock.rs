//! Clock seam for the human-readable date/time strings stored on records.

use chrono::Local;

/// Supplies the `date` and `time` strings stamped onto game records.
/// Swappable so tests get deterministic timestamps.
pub trait Clock: Send + Sync {
    fn date_string(&self) -> String;
    fn time_string(&self) -> String;
}

/// Local-timezone system clock. Formats match the strings already present
/// in saved scoreboard data ("8/6/2026", "9:41:00 PM").
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn date_string(&self) -> String {
        Local::now().format("%-m/%-d/%Y").to_string()
    }

    fn time_string(&self) -> String {
        Local::now().format("%-I:%M:%S %p").to_string()
    }
}
