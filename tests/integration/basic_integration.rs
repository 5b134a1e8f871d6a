/// Store workflows against a real SQLite file
use shamsi_habits::*;
use tempfile::TempDir;

#[cfg(test)]
mod basic_integration_tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn clock() -> FixedClock {
        FixedClock::new(Utc.with_ymd_and_hms(2024, 5, 10, 12, 0, 0).unwrap())
    }

    fn open(dir: &TempDir, clock: &FixedClock) -> HabitStore<SqliteGateway> {
        let gateway = SqliteGateway::new(dir.path().join("habits.db")).expect("Failed to open database");
        HabitStore::with_clock(gateway, Box::new(clock.clone()))
    }

    #[tokio::test]
    async fn test_server_opens_fresh_database() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let server = HabitTrackerServer::new(dir.path().join("habits.db"))
            .await
            .expect("Failed to create server");

        assert!(server.store().list_habits().is_empty());
        assert_eq!(server.store().theme(), Theme::System);
    }

    #[test]
    fn test_state_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let clock = clock();

        let (read, walk) = {
            let mut store = open(&dir, &clock);
            let read = store
                .add_habit(NewHabit::named("Read").color(HabitColor::Blue).target_days(20))
                .unwrap();
            let walk = store.add_habit(NewHabit::named("Walk")).unwrap();
            store.toggle_today(&read).unwrap();
            store.reorder_habits(vec![walk.clone(), read.clone()]);
            store.set_theme(Theme::Dark);
            (read, walk)
        };

        let store = open(&dir, &clock);
        let names: Vec<&str> = store.list_habits().iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, vec!["Walk", "Read"]);
        assert_eq!(store.order(), &[walk, read.clone()]);
        assert_eq!(store.theme(), Theme::Dark);

        let habit = store.get_habit(&read).unwrap();
        assert_eq!(habit.color, HabitColor::Blue);
        assert_eq!(habit.target_days, 20);
        assert_eq!(habit.completed_dates.len(), 1);
    }

    #[test]
    fn test_streak_follows_the_clock() {
        let dir = TempDir::new().unwrap();
        let clock = clock();
        let mut store = open(&dir, &clock);
        let id = store.add_habit(NewHabit::named("Meditate")).unwrap();

        for _ in 0..3 {
            store.toggle_today(&id).unwrap();
            clock.advance(Duration::days(1));
        }

        // 2024-05-13: nothing yet today, yesterday completes the run
        let overview = store.habit_overview(&id).unwrap();
        assert_eq!(overview.current_streak, 3);
        assert!(!overview.completed_today);

        clock.advance(Duration::days(1));
        let overview = store.habit_overview(&id).unwrap();
        assert_eq!(overview.current_streak, 0);
        assert_eq!(overview.longest_streak, 3);
        assert_eq!(store.aggregate_stats().longest_streak_across_all, 3);
    }

    #[test]
    fn test_archive_cycle_persists() {
        let dir = TempDir::new().unwrap();
        let clock = clock();

        let id = {
            let mut store = open(&dir, &clock);
            let id = store.add_habit(NewHabit::named("Journal")).unwrap();
            store.toggle_today(&id).unwrap();
            store.archive_habit(&id).unwrap();
            id
        };

        let mut store = open(&dir, &clock);
        assert!(store.list_habits().is_empty());
        assert!(store.order().is_empty());
        assert_eq!(store.archived_habits().len(), 1);
        assert_eq!(store.aggregate_stats().active_count, 0);

        store.unarchive_habit(&id).unwrap();
        assert!(store.archived_habits().is_empty());
        let habit = store.get_habit(&id).unwrap();
        assert_eq!(habit.name, "Journal");
        assert_eq!(habit.completed_dates.len(), 1);
    }

    #[test]
    fn test_delete_is_permanent() {
        let dir = TempDir::new().unwrap();
        let clock = clock();

        let id = {
            let mut store = open(&dir, &clock);
            let id = store.add_habit(NewHabit::named("Run")).unwrap();
            store.delete_habit(&id).unwrap();
            id
        };

        let mut store = open(&dir, &clock);
        assert!(store.get_habit(&id).is_none());
        assert!(matches!(
            store.unarchive_habit(&id),
            Err(StoreError::NotFound { .. })
        ));
    }

    #[test]
    fn test_keys_match_browser_layout() {
        let dir = TempDir::new().unwrap();
        let clock = clock();
        {
            let mut store = open(&dir, &clock);
            store.add_habit(NewHabit::named("Read")).unwrap();
            store.set_theme(Theme::Light);
        }

        let gateway = SqliteGateway::new(dir.path().join("habits.db")).unwrap();
        let raw = gateway
            .read(StorageKey::Habits.as_str())
            .unwrap()
            .expect("habits were written");
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let first = &value[0];
        assert_eq!(first["name"], "Read");
        assert_eq!(first["targetDays"], 14);
        assert!(first["completedDates"].is_array());
        assert!(first["createdAt"].is_string());

        assert_eq!(
            gateway.read(StorageKey::Theme.as_str()).unwrap().as_deref(),
            Some("light")
        );
    }
}
