/// Public library interface for the Shamsi habit tracker
///
/// The library exposes the date engine, the habit store and its persistence
/// gateways, plus the JSON-RPC server the binary runs.

use std::path::PathBuf;
use thiserror::Error;

pub mod analytics;
pub mod domain;
pub mod mcp;
pub mod storage;
pub mod store;
pub mod tools;

pub use analytics::{AggregateStats, AnalyticsEngine, HabitOverview};
pub use domain::*;
pub use mcp::McpServer;
pub use storage::{MemoryGateway, PersistenceGateway, SqliteGateway, StorageError, StorageKey};
pub use store::{Clock, FixedClock, HabitStore, StoreError, SystemClock};

/// Errors that can stop the server
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Database error: {0}")]
    Database(#[from] storage::StorageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Habit tracker backed by a SQLite key/value file
pub struct HabitTrackerServer {
    store: HabitStore<SqliteGateway>,
}

impl HabitTrackerServer {
    /// Open (or create) the database at `db_path` and hydrate the store
    pub async fn new(db_path: PathBuf) -> Result<Self, ServerError> {
        tracing::info!("Initializing habit store with database: {:?}", db_path);

        let gateway = SqliteGateway::new(db_path)?;
        let store = HabitStore::open(gateway);

        Ok(Self { store })
    }

    /// Serve JSON-RPC requests over stdin/stdout until stdin closes
    pub async fn run(self) -> Result<(), ServerError> {
        let aggregate = self.store.aggregate_stats();
        tracing::info!(
            "Server started, {} active habit(s), {} archived",
            aggregate.active_count,
            self.store.archived_habits().len()
        );

        let mut mcp_server = McpServer::new(self.store);
        mcp_server.run().await?;

        Ok(())
    }

    pub fn store(&self) -> &HabitStore<SqliteGateway> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut HabitStore<SqliteGateway> {
        &mut self.store
    }
}
