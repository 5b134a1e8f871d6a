/// Tool for marking today's completion
///
/// This module implements the habit_toggle_today tool. Calling it twice on
/// the same day leaves the habit as it was.

use serde::Serialize;

use crate::storage::PersistenceGateway;
use crate::store::{HabitStore, StoreError};
use crate::tools::{parse_habit_id, HabitRef};

/// Response from toggling a habit
#[derive(Debug, Serialize)]
pub struct ToggleResponse {
    pub success: bool,
    pub completed_today: bool,
    pub current_streak: u32,
    pub monthly_progress: u32,
    pub message: String,
}

/// Flip today's completion for a habit
pub fn toggle_today<G: PersistenceGateway>(
    store: &mut HabitStore<G>,
    params: HabitRef,
) -> Result<ToggleResponse, StoreError> {
    let habit_id = parse_habit_id(&params.habit_id)?;
    let completed_today = store.toggle_today(&habit_id)?;
    let overview = store.habit_overview(&habit_id)?;

    let message = if completed_today {
        format!(
            "Marked '{}' done for today. Current streak: {} day{}",
            overview.name,
            overview.current_streak,
            if overview.current_streak == 1 { "" } else { "s" }
        )
    } else {
        format!("Unmarked '{}' for today", overview.name)
    };

    Ok(ToggleResponse {
        success: true,
        completed_today,
        current_streak: overview.current_streak,
        monthly_progress: overview.monthly_progress,
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NewHabit;
    use crate::storage::MemoryGateway;

    #[test]
    fn test_toggle_on_and_off() {
        let mut store = HabitStore::open(MemoryGateway::new());
        let id = store.add_habit(NewHabit::named("Walk")).unwrap();

        let on = toggle_today(&mut store, HabitRef { habit_id: id.to_string() }).unwrap();
        assert!(on.completed_today);
        assert_eq!(on.current_streak, 1);

        let off = toggle_today(&mut store, HabitRef { habit_id: id.to_string() }).unwrap();
        assert!(!off.completed_today);
        assert_eq!(off.current_streak, 0);
    }
}
