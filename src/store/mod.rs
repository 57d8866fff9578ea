//! Storage: the durable key-value seam and the game record store on top.
//!
//! `DurableStore` is the abstract persistence mechanism (platform
//! key-value storage, a file, a test double). `GameStore` layers the two
//! game collections over it with name-keyed de-duplication.
//!
//! ## Example
//!
//! ```
//! use cricket_score::{Collection, GameRecord, GameStore, Grid, InMemoryStore};
//!
//! let store = GameStore::new(InMemoryStore::new());
//! let record = GameRecord::new(
//!     "friday night",
//!     vec!["Ann".to_string(), "Ben".to_string()],
//!     Grid::new(2).unwrap(),
//!     Vec::new(),
//!     "8/6/2026",
//! );
//! store.upsert(Collection::InProgress, &record);
//! assert_eq!(store.list(Collection::InProgress).len(), 1);
//! ```

mod games;
mod in_memory;

use std::fmt;

/// Error type for durable-store operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    LockPoisoned(&'static str),
    /// Backend-specific read/write failure.
    Backend(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::LockPoisoned(operation) => {
                write!(f, "store lock poisoned during {}", operation)
            }
            StoreError::Backend(msg) => write!(f, "store backend error: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

/// Abstract durable mapping from string key to serialized value.
///
/// Implementations only need get/set by key; collection layout, JSON
/// encoding and de-duplication all live in [`GameStore`].
pub trait DurableStore: Send + Sync {
    /// Read the value under `key`. Returns `None` when the key is absent.
    fn read(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write `value` under `key`, replacing any existing value.
    fn write(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

pub use games::GameStore;
pub use in_memory::InMemoryStore;
