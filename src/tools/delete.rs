/// Tool for permanently deleting habits
///
/// This module implements the habit_delete tool. Deleted habits skip the
/// archive and cannot be restored.

use crate::storage::PersistenceGateway;
use crate::store::{HabitStore, StoreError};
use crate::tools::{parse_habit_id, Ack, HabitRef};

/// Delete an active habit from the store
pub fn delete_habit<G: PersistenceGateway>(
    store: &mut HabitStore<G>,
    params: HabitRef,
) -> Result<Ack, StoreError> {
    let habit_id = parse_habit_id(&params.habit_id)?;
    let name = store
        .get_habit(&habit_id)
        .map(|h| h.name.clone())
        .unwrap_or_default();

    store.delete_habit(&habit_id)?;

    Ok(Ack::ok(format!("Deleted habit '{}'", name)))
}
