/// Analytics engine for derived view data
///
/// Nothing here is cached: every overview and aggregate is recomputed from the
/// raw completion instants each time it is asked for.

use serde::Serialize;

use crate::domain::{
    longest_streak, month_year_label, DateDay, Habit, HabitColor, HabitIcon, HabitId, HabitStats,
    HeatmapDay,
};

/// Totals shown in the header of the habit list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateStats {
    /// Number of active (non-archived) habits
    pub active_count: usize,
    /// Completed days summed over all active habits
    pub total_completed_days: usize,
    /// Best streak of any active habit
    pub longest_streak_across_all: u32,
}

/// Everything a habit card needs to render
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitOverview {
    pub id: HabitId,
    pub name: String,
    pub color: HabitColor,
    pub icon: HabitIcon,
    pub icon_emoji: &'static str,
    pub target_days: u32,
    pub monthly_progress: u32,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub completed_today: bool,
    pub heatmap: Vec<HeatmapDay>,
    /// Solar Hijri month and year of the reference day, e.g. "مهر ۱۴۰۵"
    pub month_label: Option<String>,
}

/// Analytics engine evaluated against a fixed "today"
pub struct AnalyticsEngine {
    stats: HabitStats,
}

impl AnalyticsEngine {
    /// Create an engine for the current local day
    pub fn new() -> Self {
        Self::with_stats(HabitStats::today())
    }

    pub fn on(today: DateDay) -> Self {
        Self::with_stats(HabitStats::on(today))
    }

    pub fn with_stats(stats: HabitStats) -> Self {
        Self { stats }
    }

    pub fn stats(&self) -> &HabitStats {
        &self.stats
    }

    /// Derived view data for one habit
    pub fn overview(&self, habit: &Habit) -> HabitOverview {
        let days = habit.completed_days();
        let today = self.stats.reference_day();

        let month_label = match month_year_label(today) {
            Ok(label) => Some(label),
            Err(e) => {
                tracing::warn!("No solar Hijri label for {}: {}", today, e);
                None
            }
        };

        HabitOverview {
            id: habit.id.clone(),
            name: habit.name.clone(),
            color: habit.color,
            icon: habit.icon,
            icon_emoji: habit.icon.emoji(),
            target_days: habit.target_days,
            monthly_progress: self.stats.monthly_progress(&days, Some(habit.target_days)),
            current_streak: self.stats.current_streak(&days),
            longest_streak: longest_streak(&days),
            completed_today: self.stats.is_completed_today(&days),
            heatmap: self.stats.month_heatmap(&days),
            month_label,
        }
    }

    /// Totals over a set of active habits
    pub fn aggregate<'a, I>(&self, habits: I) -> AggregateStats
    where
        I: IntoIterator<Item = &'a Habit>,
    {
        habits
            .into_iter()
            .fold(AggregateStats::default(), |mut acc, habit| {
                let days = habit.completed_days();
                acc.active_count += 1;
                acc.total_completed_days += days.len();
                acc.longest_streak_across_all = acc.longest_streak_across_all.max(longest_streak(&days));
                acc
            })
    }
}

impl Default for AnalyticsEngine {
    fn default() -> Self {
        Self::new()
    }
}
