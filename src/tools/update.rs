/// Tool for updating existing habits
///
/// This module implements the habit_update tool. Only the fields present in
/// the request are changed; `completed_dates` replaces the whole history.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::HabitPatch;
use crate::storage::PersistenceGateway;
use crate::store::{HabitStore, StoreError};
use crate::tools::{
    parse_color, parse_habit_id, parse_icon, validate_name, validate_target_days,
};

/// Parameters for updating an existing habit
#[derive(Debug, Deserialize, JsonSchema)]
pub struct UpdateHabitParams {
    /// ID of the habit to update
    pub habit_id: String,
    pub name: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
    pub target_days: Option<u32>,
    /// Full replacement completion history as ISO-8601 instants
    pub completed_dates: Option<Vec<String>>,
}

/// Response from updating a habit
#[derive(Debug, Serialize)]
pub struct UpdateHabitResponse {
    pub success: bool,
    pub message: String,
}

/// Update an existing habit in the store
pub fn update_habit<G: PersistenceGateway>(
    store: &mut HabitStore<G>,
    params: UpdateHabitParams,
) -> Result<UpdateHabitResponse, StoreError> {
    let habit_id = parse_habit_id(&params.habit_id)?;

    let patch = HabitPatch {
        name: params.name.as_deref().map(validate_name).transpose()?,
        color: params.color.as_deref().map(parse_color).transpose()?,
        icon: params.icon.as_deref().map(parse_icon).transpose()?,
        target_days: params.target_days.map(validate_target_days).transpose()?,
        completed_dates: params
            .completed_dates
            .map(|dates| parse_instants(&dates))
            .transpose()?,
    };

    if patch.is_empty() {
        return Err(StoreError::InvalidInput("No fields to update".to_string()));
    }

    let habit = store.update_habit(&habit_id, patch)?;

    Ok(UpdateHabitResponse {
        success: true,
        message: format!("Updated habit '{}'", habit.name),
    })
}

fn parse_instants(raw: &[String]) -> Result<Vec<DateTime<Utc>>, StoreError> {
    raw.iter()
        .map(|s| {
            DateTime::parse_from_rfc3339(s.trim())
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|e| StoreError::InvalidInput(format!("Invalid instant '{}': {}", s, e)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{HabitColor, NewHabit};
    use crate::storage::MemoryGateway;

    fn params(habit_id: &str) -> UpdateHabitParams {
        UpdateHabitParams {
            habit_id: habit_id.to_string(),
            name: None,
            color: None,
            icon: None,
            target_days: None,
            completed_dates: None,
        }
    }

    #[test]
    fn test_update_habit_name_and_color() {
        let mut store = HabitStore::open(MemoryGateway::new());
        let id = store.add_habit(NewHabit::named("Old Name")).unwrap();

        let mut request = params(id.as_str());
        request.name = Some("New Name".to_string());
        request.color = Some("teal".to_string());

        let response = update_habit(&mut store, request).unwrap();
        assert!(response.message.contains("New Name"));

        let habit = store.get_habit(&id).unwrap();
        assert_eq!(habit.name, "New Name");
        assert_eq!(habit.color, HabitColor::Teal);
    }

    #[test]
    fn test_update_completed_dates() {
        let mut store = HabitStore::open(MemoryGateway::new());
        let id = store.add_habit(NewHabit::named("Walk")).unwrap();

        let mut request = params(id.as_str());
        request.completed_dates = Some(vec![
            "2024-05-01T08:00:00.000Z".to_string(),
            "2024-05-02T08:00:00Z".to_string(),
        ]);
        update_habit(&mut store, request).unwrap();
        assert_eq!(store.get_habit(&id).unwrap().completed_dates.len(), 2);

        let mut request = params(id.as_str());
        request.completed_dates = Some(vec!["yesterday".to_string()]);
        assert!(update_habit(&mut store, request).is_err());
    }

    #[test]
    fn test_update_nonexistent_habit() {
        let mut store = HabitStore::open(MemoryGateway::new());
        let mut request = params("nonexistent_id");
        request.name = Some("New Name".to_string());

        assert!(matches!(
            update_habit(&mut store, request),
            Err(StoreError::NotFound { .. })
        ));
    }

    #[test]
    fn test_empty_update_is_rejected() {
        let mut store = HabitStore::open(MemoryGateway::new());
        let id = store.add_habit(NewHabit::named("Walk")).unwrap();

        assert!(update_habit(&mut store, params(id.as_str())).is_err());
    }
}
