/// Tools for the archive
///
/// This module implements habit_archive, habit_unarchive and habit_archived.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::storage::PersistenceGateway;
use crate::store::{HabitStore, StoreError};
use crate::tools::{parse_habit_id, Ack, HabitRef};

/// One archived habit as shown in the archive list
#[derive(Debug, Serialize)]
pub struct ArchivedSummary {
    pub habit_id: String,
    pub name: String,
    pub icon: String,
    pub completed_days: usize,
    pub archived_at: DateTime<Utc>,
}

/// Response from listing the archive
#[derive(Debug, Serialize)]
pub struct ArchivedListResponse {
    pub habits: Vec<ArchivedSummary>,
}

/// Move an active habit into the archive
pub fn archive_habit<G: PersistenceGateway>(
    store: &mut HabitStore<G>,
    params: HabitRef,
) -> Result<Ack, StoreError> {
    let habit_id = parse_habit_id(&params.habit_id)?;
    store.archive_habit(&habit_id)?;
    Ok(Ack::ok(format!("Archived habit {}", habit_id)))
}

/// Bring an archived habit back to the end of the active list
pub fn unarchive_habit<G: PersistenceGateway>(
    store: &mut HabitStore<G>,
    params: HabitRef,
) -> Result<Ack, StoreError> {
    let habit_id = parse_habit_id(&params.habit_id)?;
    store.unarchive_habit(&habit_id)?;
    Ok(Ack::ok(format!("Restored habit {}", habit_id)))
}

/// List archived habits, oldest archival first
pub fn list_archived<G: PersistenceGateway>(store: &HabitStore<G>) -> ArchivedListResponse {
    let habits = store
        .archived_habits()
        .iter()
        .map(|entry| ArchivedSummary {
            habit_id: entry.habit.id.to_string(),
            name: entry.habit.name.clone(),
            icon: entry.habit.icon.emoji().to_string(),
            completed_days: entry.habit.completed_dates.len(),
            archived_at: entry.archived_at,
        })
        .collect();

    ArchivedListResponse { habits }
}
