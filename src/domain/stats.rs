/// Streak and progress calculations
///
/// Every statistic is a pure function of a habit's completed days and the
/// day considered "today". `HabitStats` pins that day so callers (and tests)
/// get deterministic answers; `HabitStats::today()` uses the local clock.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::{days_of_month, DateDay};

/// One cell of the monthly heatmap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeatmapDay {
    pub day: DateDay,
    pub completed: bool,
}

/// Statistics evaluated relative to a fixed "today"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HabitStats {
    today: DateDay,
}

impl HabitStats {
    /// Statistics as of the current local day
    pub fn today() -> Self {
        Self::on(DateDay::today())
    }

    /// Statistics as of an explicit day
    pub fn on(today: DateDay) -> Self {
        Self { today }
    }

    pub fn reference_day(&self) -> DateDay {
        self.today
    }

    /// Percentage of the monthly goal reached so far, 0..=100
    ///
    /// Only days of the current month up to and including today count. The
    /// denominator is `target_days` when given, otherwise the number of days
    /// elapsed this month.
    pub fn monthly_progress(&self, completed: &BTreeSet<DateDay>, target_days: Option<u32>) -> u32 {
        let past_days: Vec<DateDay> = days_of_month(self.today)
            .into_iter()
            .filter(|day| *day <= self.today)
            .collect();

        let done = past_days.iter().filter(|day| completed.contains(day)).count() as u64;
        let total = match target_days {
            Some(target) => target as u64,
            None => past_days.len() as u64,
        };

        if total == 0 {
            return 0;
        }

        // round half up, as a percentage
        let percent = (200 * done + total) / (2 * total);
        percent.min(100) as u32
    }

    /// Consecutive completed days ending today or yesterday
    ///
    /// A streak survives until the end of the day after its last completion,
    /// so it is not reported as broken before the user has had a chance to
    /// act today.
    pub fn current_streak(&self, completed: &BTreeSet<DateDay>) -> u32 {
        let latest = match completed.iter().next_back() {
            Some(day) => *day,
            None => return 0,
        };

        if self.today.days_since(latest) > 1 {
            return 0;
        }

        let mut streak = 0;
        let mut expected = latest;
        for day in completed.iter().rev() {
            if *day != expected {
                break;
            }
            streak += 1;
            expected = expected.pred();
        }

        streak
    }

    /// Whether today is among the completed days
    pub fn is_completed_today(&self, completed: &BTreeSet<DateDay>) -> bool {
        completed.contains(&self.today)
    }

    /// Every day of the current month with its completion flag
    ///
    /// Days after today are never marked complete.
    pub fn month_heatmap(&self, completed: &BTreeSet<DateDay>) -> Vec<HeatmapDay> {
        days_of_month(self.today)
            .into_iter()
            .map(|day| HeatmapDay {
                day,
                completed: day <= self.today && completed.contains(&day),
            })
            .collect()
    }
}

/// Longest run of calendar-consecutive days over the whole history
pub fn longest_streak(completed: &BTreeSet<DateDay>) -> u32 {
    let mut days = completed.iter();
    let mut previous = match days.next() {
        Some(day) => *day,
        None => return 0,
    };

    let mut longest = 1;
    let mut current = 1;
    for day in days {
        if day.days_since(previous) == 1 {
            current += 1;
        } else {
            current = 1;
        }
        longest = longest.max(current);
        previous = *day;
    }

    longest
}
