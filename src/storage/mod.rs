/// Storage layer for persisting habit data
///
/// The store only ever sees an opaque key/value medium: a string key maps to
/// a string value. `PersistenceGateway` is that contract; SQLite backs it in
/// the binary and an in-memory map backs it in tests and embedders.

pub mod codec;
pub mod memory;
pub mod migrations;
pub mod sqlite;

// Re-export the main storage types
pub use codec::*;
pub use memory::*;
pub use sqlite::*;

use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database connection error: {0}")]
    Connection(String),

    #[error("Database query error: {0}")]
    Query(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Write rejected for key {key}: {reason}")]
    WriteRejected { key: String, reason: String },

    #[error("Migration error: {0}")]
    Migration(String),
}

/// Logical keys the tracker stores under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    /// JSON array of active habits
    Habits,
    /// JSON array of habit ids in display order
    Order,
    /// JSON array of archived habits
    Archived,
    /// Bare theme tag
    Theme,
}

impl StorageKey {
    pub const ALL: [StorageKey; 4] = [
        StorageKey::Habits,
        StorageKey::Order,
        StorageKey::Archived,
        StorageKey::Theme,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StorageKey::Habits => "habit-tracker-habits",
            StorageKey::Order => "habit-tracker-order",
            StorageKey::Archived => "habit-tracker-archived",
            StorageKey::Theme => "habit-tracker-theme",
        }
    }
}

/// Key/value persistence medium used by the habit store
///
/// Implementations must be synchronous; a write either lands before the call
/// returns or reports an error.
pub trait PersistenceGateway {
    /// Read the value stored under `key`, if any
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value
    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Forget `key`; removing a missing key is not an error
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

impl<G: PersistenceGateway + ?Sized> PersistenceGateway for Box<G> {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).read(key)
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).write(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}
