/// Tool for creating new habits
///
/// This module implements the habit_add tool.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::NewHabit;
use crate::storage::PersistenceGateway;
use crate::store::{HabitStore, StoreError};
use crate::tools::{parse_color, parse_icon, validate_name, validate_target_days};

/// Parameters for creating a new habit
#[derive(Debug, Deserialize, JsonSchema)]
pub struct CreateHabitParams {
    /// Name of the habit
    pub name: String,
    /// Card color: emerald, blue, violet, amber, rose, cyan, orange, teal
    pub color: Option<String>,
    /// Icon: book, sport, meditate, water, sleep, study, heart, star
    pub icon: Option<String>,
    /// Monthly goal in days (1-31, default 14)
    pub target_days: Option<u32>,
}

/// Response from creating a habit
#[derive(Debug, Serialize)]
pub struct CreateHabitResponse {
    pub success: bool,
    pub habit_id: Option<String>,
    pub message: String,
}

/// Create a new habit in the store
pub fn create_habit<G: PersistenceGateway>(
    store: &mut HabitStore<G>,
    params: CreateHabitParams,
) -> Result<CreateHabitResponse, StoreError> {
    let name = validate_name(&params.name)?;
    let color = params.color.as_deref().map(parse_color).transpose()?;
    let icon = params.icon.as_deref().map(parse_icon).transpose()?;
    let target_days = params.target_days.map(validate_target_days).transpose()?;

    let habit_id = store.add_habit(NewHabit {
        name: name.clone(),
        color,
        icon,
        target_days,
    })?;

    Ok(CreateHabitResponse {
        success: true,
        habit_id: Some(habit_id.to_string()),
        message: format!("Created habit '{}'", name),
    })
}
