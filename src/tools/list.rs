/// Tool for listing habits
///
/// This module implements the habit_list tool: every active habit in display
/// order with its derived view data, plus the aggregate header figures.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::analytics::{AggregateStats, HabitOverview};
use crate::storage::PersistenceGateway;
use crate::store::HabitStore;

/// Parameters for listing habits
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct ListHabitsParams {
    /// Include the per-day heatmap for the current month (default: true)
    pub include_heatmap: Option<bool>,
}

/// Response from listing habits
#[derive(Debug, Serialize)]
pub struct ListHabitsResponse {
    pub habits: Vec<HabitOverview>,
    pub summary: AggregateStats,
}

/// List active habits with their statistics
pub fn list_habits<G: PersistenceGateway>(
    store: &HabitStore<G>,
    params: ListHabitsParams,
) -> ListHabitsResponse {
    let mut habits = store.overviews();
    if !params.include_heatmap.unwrap_or(true) {
        for overview in habits.iter_mut() {
            overview.heatmap.clear();
        }
    }

    ListHabitsResponse {
        habits,
        summary: store.aggregate_stats(),
    }
}
