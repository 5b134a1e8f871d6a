/// Habit entity and related functionality
///
/// A habit is something the user wants to do every day. Completions are kept
/// as instants for storage compatibility, but the domain treats them as a set
/// of calendar days: at most one instant per local day.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::domain::{DateDay, DomainError, HabitColor, HabitIcon, HabitId};

/// Smallest allowed monthly goal
pub const MIN_TARGET_DAYS: u32 = 1;
/// Largest allowed monthly goal
pub const MAX_TARGET_DAYS: u32 = 31;
/// Goal used when the caller does not pick one
pub const DEFAULT_TARGET_DAYS: u32 = 14;

/// A habit the user is tracking
///
/// Field names serialize in camelCase to stay compatible with data written
/// by the browser client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    /// Unique identifier for this habit
    pub id: HabitId,
    /// Display name (e.g., "Read", "Morning walk")
    pub name: String,
    #[serde(default)]
    pub color: HabitColor,
    #[serde(default)]
    pub icon: HabitIcon,
    /// Monthly completion goal, always within 1..=31
    #[serde(default = "default_target_days", deserialize_with = "lenient_target_days")]
    pub target_days: u32,
    /// Instants at which the habit was marked done, at most one per local day
    #[serde(default)]
    pub completed_dates: Vec<DateTime<Utc>>,
    /// When this habit was created (informational only)
    pub created_at: DateTime<Utc>,
}

fn default_target_days() -> u32 {
    DEFAULT_TARGET_DAYS
}

/// Accept whatever number the browser form stored
///
/// Fractions are rounded, out-of-range values clamped, numeric strings
/// parsed. Anything else (null, NaN, text) falls back to the default.
fn lenient_target_days<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    Ok(match raw {
        Some(v) if v.is_finite() => {
            v.round().clamp(MIN_TARGET_DAYS as f64, MAX_TARGET_DAYS as f64) as u32
        }
        _ => DEFAULT_TARGET_DAYS,
    })
}

/// A habit moved out of active tracking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchivedHabit {
    #[serde(flatten)]
    pub habit: Habit,
    pub archived_at: DateTime<Utc>,
}

/// Fields accepted when creating a habit
#[derive(Debug, Clone, Default)]
pub struct NewHabit {
    pub name: String,
    pub color: Option<HabitColor>,
    pub icon: Option<HabitIcon>,
    pub target_days: Option<u32>,
}

impl NewHabit {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn color(mut self, color: HabitColor) -> Self {
        self.color = Some(color);
        self
    }

    pub fn icon(mut self, icon: HabitIcon) -> Self {
        self.icon = Some(icon);
        self
    }

    pub fn target_days(mut self, target_days: u32) -> Self {
        self.target_days = Some(target_days);
        self
    }
}

/// Partial update for an existing habit; `None` leaves a field untouched
#[derive(Debug, Clone, Default)]
pub struct HabitPatch {
    pub name: Option<String>,
    pub color: Option<HabitColor>,
    pub icon: Option<HabitIcon>,
    pub target_days: Option<u32>,
    pub completed_dates: Option<Vec<DateTime<Utc>>>,
}

impl HabitPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.color.is_none()
            && self.icon.is_none()
            && self.target_days.is_none()
            && self.completed_dates.is_none()
    }
}

impl Habit {
    /// Create a new habit with validation
    ///
    /// The name is trimmed and must not be empty. Color and icon default when
    /// absent and the target is clamped into 1..=31.
    pub fn new(fields: NewHabit, created_at: DateTime<Utc>) -> Result<Self, DomainError> {
        let name = validate_habit_name(&fields.name)?;

        Ok(Self {
            id: HabitId::new(),
            name,
            color: fields.color.unwrap_or_default(),
            icon: fields.icon.unwrap_or_default(),
            target_days: clamp_target_days(fields.target_days.unwrap_or(DEFAULT_TARGET_DAYS)),
            completed_dates: Vec::new(),
            created_at,
        })
    }

    /// Merge a partial update into this habit
    ///
    /// Nothing is applied unless every provided field is valid.
    pub fn apply(&mut self, patch: HabitPatch) -> Result<(), DomainError> {
        let name = match patch.name {
            Some(ref name) => Some(validate_habit_name(name)?),
            None => None,
        };

        if let Some(name) = name {
            self.name = name;
        }
        if let Some(color) = patch.color {
            self.color = color;
        }
        if let Some(icon) = patch.icon {
            self.icon = icon;
        }
        if let Some(target_days) = patch.target_days {
            self.target_days = clamp_target_days(target_days);
        }
        if let Some(dates) = patch.completed_dates {
            self.completed_dates = dedupe_by_day(dates);
        }

        Ok(())
    }

    /// Completed calendar days in the local timezone
    pub fn completed_days(&self) -> BTreeSet<DateDay> {
        self.completed_dates.iter().map(DateDay::from_instant).collect()
    }

    pub fn is_completed_on(&self, day: DateDay) -> bool {
        self.completed_dates
            .iter()
            .any(|instant| DateDay::from_instant(instant) == day)
    }

    /// Flip completion for the day `now` falls on
    ///
    /// Returns `true` when the day is now marked complete, `false` when the
    /// existing mark for that day was removed.
    pub fn toggle_completion(&mut self, now: DateTime<Utc>) -> bool {
        let day = DateDay::from_instant(&now);
        if self.is_completed_on(day) {
            self.completed_dates
                .retain(|instant| DateDay::from_instant(instant) != day);
            false
        } else {
            self.completed_dates.push(now);
            true
        }
    }

    /// Restore invariants on data loaded from storage
    ///
    /// Returns `true` if anything had to change.
    pub fn normalize(&mut self) -> bool {
        let target = clamp_target_days(self.target_days);
        let before = self.completed_dates.len();
        self.completed_dates = dedupe_by_day(std::mem::take(&mut self.completed_dates));

        let changed = target != self.target_days || before != self.completed_dates.len();
        self.target_days = target;
        changed
    }

}

impl ArchivedHabit {
    pub fn new(habit: Habit, archived_at: DateTime<Utc>) -> Self {
        Self { habit, archived_at }
    }

    pub fn id(&self) -> &HabitId {
        &self.habit.id
    }

    /// Drop the archive stamp and hand back the habit
    pub fn restore(self) -> Habit {
        self.habit
    }
}

/// Trim a habit name; it must not be empty
pub fn validate_habit_name(name: &str) -> Result<String, DomainError> {
    let trimmed = name.trim();

    if trimmed.is_empty() {
        return Err(DomainError::InvalidHabitName(
            "Habit name cannot be empty".to_string(),
        ));
    }

    Ok(trimmed.to_string())
}

/// Clamp a monthly goal into the allowed range
pub fn clamp_target_days(target_days: u32) -> u32 {
    target_days.clamp(MIN_TARGET_DAYS, MAX_TARGET_DAYS)
}

/// Keep the first instant seen for each local calendar day
fn dedupe_by_day(dates: Vec<DateTime<Utc>>) -> Vec<DateTime<Utc>> {
    let mut seen = BTreeSet::new();
    dates
        .into_iter()
        .filter(|instant| seen.insert(DateDay::from_instant(instant)))
        .collect()
}
