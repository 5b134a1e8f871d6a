/// Tool for aggregate statistics
///
/// This module implements the habit_stats tool.

use serde::Serialize;

use crate::analytics::AggregateStats;
use crate::domain::month_year_label;
use crate::storage::PersistenceGateway;
use crate::store::HabitStore;

/// Response from the stats tool
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub stats: AggregateStats,
    /// Today's solar Hijri month, e.g. "مهر ۱۴۰۵"
    pub month_label: Option<String>,
    pub message: String,
}

/// Totals across all active habits
pub fn habit_stats<G: PersistenceGateway>(store: &HabitStore<G>) -> StatsResponse {
    let stats = store.aggregate_stats();
    let message = format!(
        "{} active habit(s), {} completed day(s), best streak {}",
        stats.active_count, stats.total_completed_days, stats.longest_streak_across_all
    );

    StatsResponse {
        stats,
        month_label: month_year_label(store.today()).ok(),
        message,
    }
}
