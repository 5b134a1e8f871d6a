/// Basic unit tests for habits and statistics
use shamsi_habits::*;
use std::collections::BTreeSet;

#[cfg(test)]
mod basic_unit_tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    fn noon(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    fn day(y: i32, m: u32, d: u32) -> DateDay {
        DateDay::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn test_habit_creation_defaults() {
        let habit = Habit::new(NewHabit::named("Read"), noon(2024, 5, 1)).unwrap();

        assert_eq!(habit.name, "Read");
        assert_eq!(habit.target_days, DEFAULT_TARGET_DAYS);
        assert_eq!(habit.color, HabitColor::default());
        assert_eq!(habit.icon, HabitIcon::default());
        assert!(habit.completed_dates.is_empty());
        assert!(habit.id.as_str().starts_with("habit-"));
    }

    #[test]
    fn test_habit_requires_a_name() {
        assert!(Habit::new(NewHabit::named("   "), noon(2024, 5, 1)).is_err());
    }

    #[test]
    fn test_target_days_are_clamped() {
        let habit = Habit::new(NewHabit::named("Walk").target_days(90), noon(2024, 5, 1)).unwrap();
        assert_eq!(habit.target_days, MAX_TARGET_DAYS);

        let habit = Habit::new(NewHabit::named("Walk").target_days(0), noon(2024, 5, 1)).unwrap();
        assert_eq!(habit.target_days, MIN_TARGET_DAYS);
    }

    #[test]
    fn test_toggle_twice_restores_history() {
        let mut habit = Habit::new(NewHabit::named("Walk"), noon(2024, 5, 1)).unwrap();

        assert!(habit.toggle_completion(noon(2024, 5, 2)));
        assert!(habit.is_completed_on(DateDay::from_instant(&noon(2024, 5, 2))));
        assert!(!habit.toggle_completion(noon(2024, 5, 2)));
        assert!(habit.completed_dates.is_empty());
    }

    #[test]
    fn test_streaks_and_progress() {
        let stats = HabitStats::on(day(2024, 5, 10));
        let completed: BTreeSet<DateDay> = [1, 2, 3, 4, 8, 9]
            .iter()
            .map(|d| day(2024, 5, *d))
            .collect();

        // Today is not done yet, so yesterday's run still counts
        assert_eq!(stats.current_streak(&completed), 2);
        assert_eq!(longest_streak(&completed), 4);
        assert!(!stats.is_completed_today(&completed));

        // 6 of 10 days
        assert_eq!(stats.monthly_progress(&completed, None), 60);
        // 6 of a 12-day goal
        assert_eq!(stats.monthly_progress(&completed, Some(12)), 50);
        // capped
        assert_eq!(stats.monthly_progress(&completed, Some(3)), 100);
    }

    #[test]
    fn test_heatmap_covers_whole_month() {
        let stats = HabitStats::on(day(2024, 2, 10));
        let completed: BTreeSet<DateDay> = [day(2024, 2, 10), day(2024, 2, 20)].into_iter().collect();

        let heatmap = stats.month_heatmap(&completed);
        assert_eq!(heatmap.len(), 29);
        assert!(heatmap[9].completed);
        // future days never show as done
        assert!(!heatmap[19].completed);
    }

    #[test]
    fn test_aggregate_stats() {
        let engine = AnalyticsEngine::on(day(2024, 5, 10));
        let mut read = Habit::new(NewHabit::named("Read"), noon(2024, 5, 1)).unwrap();
        read.completed_dates = vec![noon(2024, 5, 1), noon(2024, 5, 2)];
        let mut walk = Habit::new(NewHabit::named("Walk"), noon(2024, 5, 1)).unwrap();
        walk.completed_dates = vec![noon(2024, 5, 5), noon(2024, 5, 6), noon(2024, 5, 7)];

        let stats = engine.aggregate(&[read, walk]);
        assert_eq!(stats.active_count, 2);
        assert_eq!(stats.total_completed_days, 5);
        assert_eq!(stats.longest_streak_across_all, 3);
    }

    #[test]
    fn test_tags_fall_back_to_defaults() {
        assert_eq!(HabitColor::from_tag("violet"), HabitColor::Violet);
        assert_eq!(HabitColor::from_tag("chartreuse"), HabitColor::default());
        assert_eq!(HabitIcon::from_tag("no-such-icon"), HabitIcon::default());
        assert_eq!(Theme::from_tag("DARK"), Theme::Dark);
        assert_eq!(Theme::from_tag(""), Theme::System);
    }
}
