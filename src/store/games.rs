//! GameStore - the two durable game collections, keyed by game name.

use tracing::{debug, warn};

use crate::clock::{Clock, SystemClock};
use crate::record::{Collection, GameRecord};

use super::DurableStore;

/// Durable tracking of in-progress and completed games.
///
/// Every operation works on whole collections: read the JSON array, change
/// it in memory, write it back. Store failures are logged and swallowed;
/// a scoreboard must keep scoring even when persistence is broken, so
/// reads fall back to empty and failed writes leave state in memory for
/// the next save trigger to retry.
pub struct GameStore<S, C = SystemClock> {
    store: S,
    clock: C,
}

impl<S: DurableStore> GameStore<S> {
    pub fn new(store: S) -> Self {
        GameStore {
            store,
            clock: SystemClock,
        }
    }
}

impl<S: DurableStore, C: Clock> GameStore<S, C> {
    pub fn with_clock(store: S, clock: C) -> Self {
        GameStore { store, clock }
    }

    /// All records in a collection, in stored order. Absent key, read
    /// failure and parse failure all yield an empty list.
    pub fn list(&self, collection: Collection) -> Vec<GameRecord> {
        let raw = match self.store.read(collection.key()) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(key = collection.key(), "store read failed: {e}");
                return Vec::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(records) => records,
            Err(e) => {
                warn!(key = collection.key(), "stored collection unreadable: {e}");
                Vec::new()
            }
        }
    }

    /// Insert or replace by `game_name`: any existing record with the same
    /// name is removed, then the record is appended. Identity is the name
    /// alone, so two games given the same name collide.
    pub fn upsert(&self, collection: Collection, record: &GameRecord) {
        let mut records = self.list(collection);
        records.retain(|existing| existing.game_name != record.game_name);
        records.push(record.clone());
        self.write_collection(collection, &records);
    }

    /// Remove every record matching the predicate.
    pub fn remove<F>(&self, collection: Collection, predicate: F)
    where
        F: Fn(&GameRecord) -> bool,
    {
        let mut records = self.list(collection);
        records.retain(|record| !predicate(record));
        self.write_collection(collection, &records);
    }

    /// Move a finished game from in-progress to completed: remove it by
    /// name, stamp winner and completion time, drop the tap history, and
    /// upsert the completed shape.
    ///
    /// The two collection writes are independent; a crash in between can
    /// leave the record in neither or (until a later upsert) both. The
    /// storage is local and single-user, so that window is accepted rather
    /// than papered over with a transaction.
    pub fn migrate_to_completed(&self, record: &GameRecord, winner_name: &str) {
        self.remove(Collection::InProgress, |existing| {
            existing.game_name == record.game_name
        });

        let completed = record
            .clone()
            .into_completed(winner_name, self.clock.time_string());
        self.upsert(Collection::Completed, &completed);
        debug!(game = %record.game_name, winner = winner_name, "migrated to completed");
    }

    fn write_collection(&self, collection: Collection, records: &[GameRecord]) {
        let raw = match serde_json::to_string(records) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(key = collection.key(), "collection serialization failed: {e}");
                return;
            }
        };

        if let Err(e) = self.store.write(collection.key(), &raw) {
            warn!(key = collection.key(), "store write failed: {e}");
        }
    }
}
