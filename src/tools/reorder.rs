/// Tool for drag-and-drop reordering
///
/// This module implements the habit_reorder tool. The client sends the full
/// list of ids in their new display order.

use schemars::JsonSchema;
use serde::Deserialize;

use crate::domain::HabitId;
use crate::storage::PersistenceGateway;
use crate::store::{HabitStore, StoreError};
use crate::tools::Ack;

/// Parameters for reordering habits
#[derive(Debug, Deserialize, JsonSchema)]
pub struct ReorderParams {
    /// Habit ids in the desired display order
    pub habit_ids: Vec<String>,
}

/// Replace the display order
pub fn reorder_habits<G: PersistenceGateway>(
    store: &mut HabitStore<G>,
    params: ReorderParams,
) -> Result<Ack, StoreError> {
    let order: Vec<HabitId> = params
        .habit_ids
        .iter()
        .map(|id| id.trim())
        .filter(|id| !id.is_empty())
        .map(HabitId::from)
        .collect();

    let count = order.len();
    store.reorder_habits(order);

    Ok(Ack::ok(format!("Saved order of {} habit(s)", count)))
}
