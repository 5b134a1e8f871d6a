/// Tools exposed to the display client
///
/// Each tool takes a deserialized parameter struct, validates it at the
/// boundary, calls one store operation and returns a serializable response.
/// Store errors are returned as-is; the server turns them into error results.

pub mod archive;
pub mod create;
pub mod delete;
pub mod list;
pub mod reorder;
pub mod stats;
pub mod theme;
pub mod toggle;
pub mod update;

pub use archive::*;
pub use create::*;
pub use delete::*;
pub use list::*;
pub use reorder::*;
pub use stats::*;
pub use theme::*;
pub use toggle::*;
pub use update::*;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::{
    validate_habit_name, HabitColor, HabitIcon, HabitId, MAX_TARGET_DAYS, MIN_TARGET_DAYS,
};
use crate::store::StoreError;

/// Parameters naming a single habit
#[derive(Debug, Deserialize, JsonSchema)]
pub struct HabitRef {
    /// ID of the habit
    pub habit_id: String,
}

/// Plain acknowledgement
#[derive(Debug, Serialize)]
pub struct Ack {
    pub success: bool,
    pub message: String,
}

impl Ack {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

fn parse_habit_id(raw: &str) -> Result<HabitId, StoreError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(StoreError::InvalidInput("Habit ID cannot be empty".to_string()));
    }
    Ok(HabitId::from(trimmed))
}

fn validate_name(name: &str) -> Result<String, StoreError> {
    Ok(validate_habit_name(name)?)
}

fn validate_target_days(target_days: u32) -> Result<u32, StoreError> {
    if !(MIN_TARGET_DAYS..=MAX_TARGET_DAYS).contains(&target_days) {
        return Err(StoreError::InvalidInput(format!(
            "Target days must be between {} and {}, got {}",
            MIN_TARGET_DAYS, MAX_TARGET_DAYS, target_days
        )));
    }
    Ok(target_days)
}

fn parse_color(raw: &str) -> Result<HabitColor, StoreError> {
    let tag = raw.trim().to_lowercase();
    HabitColor::ALL
        .iter()
        .copied()
        .find(|c| c.tag() == tag)
        .ok_or_else(|| {
            let options: Vec<&str> = HabitColor::ALL.iter().map(|c| c.tag()).collect();
            StoreError::InvalidInput(format!(
                "Invalid color '{}'. Valid options: {}",
                raw,
                options.join(", ")
            ))
        })
}

fn parse_icon(raw: &str) -> Result<HabitIcon, StoreError> {
    let tag = raw.trim().to_lowercase();
    HabitIcon::ALL
        .iter()
        .copied()
        .find(|i| i.tag() == tag)
        .ok_or_else(|| {
            let options: Vec<&str> = HabitIcon::ALL.iter().map(|i| i.tag()).collect();
            StoreError::InvalidInput(format!(
                "Invalid icon '{}'. Valid options: {}",
                raw,
                options.join(", ")
            ))
        })
}
