/// Habit store: the single owner of habits, their order and the archive
///
/// Every mutation updates the in-memory collections first and then writes
/// the collections it touched through the persistence gateway. Writes are
/// best-effort: a rejected write is logged and the in-memory change stands.
/// Opening a store only reads; nothing is written until the first mutation.

pub mod clock;

pub use clock::*;

use std::collections::{HashMap, HashSet};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::analytics::{AggregateStats, AnalyticsEngine, HabitOverview};
use crate::domain::{ArchivedHabit, DateDay, DomainError, Habit, HabitId, HabitPatch, NewHabit, Theme};
use crate::storage::{load_collection, save_collection, PersistenceGateway, StorageKey};

/// Errors surfaced to callers of the store
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("Habit not found: {habit_id}")]
    NotFound { habit_id: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<DomainError> for StoreError {
    fn from(e: DomainError) -> Self {
        StoreError::InvalidInput(e.to_string())
    }
}

impl StoreError {
    fn not_found(id: &HabitId) -> Self {
        StoreError::NotFound {
            habit_id: id.to_string(),
        }
    }
}

pub struct HabitStore<G: PersistenceGateway> {
    gateway: G,
    clock: Box<dyn Clock>,
    habits: Vec<Habit>,
    order: Vec<HabitId>,
    archived: Vec<ArchivedHabit>,
    theme: Theme,
}

impl<G: PersistenceGateway> HabitStore<G> {
    /// Hydrate a store from the gateway using the system clock
    pub fn open(gateway: G) -> Self {
        Self::with_clock(gateway, Box::new(SystemClock))
    }

    /// Hydrate a store from the gateway with an explicit time source
    pub fn with_clock(gateway: G, clock: Box<dyn Clock>) -> Self {
        let mut habits: Vec<Habit> = load_collection(&gateway, StorageKey::Habits);
        let mut order: Vec<HabitId> = load_collection(&gateway, StorageKey::Order);
        let mut archived: Vec<ArchivedHabit> = load_collection(&gateway, StorageKey::Archived);

        let theme = match gateway.read(StorageKey::Theme.as_str()) {
            Ok(Some(tag)) => Theme::from_tag(&tag),
            Ok(None) => Theme::default(),
            Err(e) => {
                warn!("Failed to read theme preference: {}", e);
                Theme::default()
            }
        };

        let mut seen = HashSet::new();
        habits.retain(|habit| {
            let fresh = seen.insert(habit.id.clone());
            if !fresh {
                warn!("Dropping duplicate active habit {}", habit.id);
            }
            fresh
        });
        for habit in habits.iter_mut() {
            if habit.normalize() {
                debug!("Normalized stored habit {}", habit.id);
            }
        }

        archived.retain(|entry| {
            let fresh = seen.insert(entry.id().clone());
            if !fresh {
                warn!("Dropping archive entry {} that is already active or archived", entry.id());
            }
            fresh
        });
        for entry in archived.iter_mut() {
            entry.habit.normalize();
        }

        let mut ordered = HashSet::new();
        order.retain(|id| ordered.insert(id.clone()));

        info!(
            "Habit store opened: {} active, {} archived",
            habits.len(),
            archived.len()
        );

        Self {
            gateway,
            clock,
            habits,
            order,
            archived,
            theme,
        }
    }

    /// Create a habit and append it to the display order
    pub fn add_habit(&mut self, fields: NewHabit) -> Result<HabitId, StoreError> {
        let habit = Habit::new(fields, self.clock.now())?;
        let id = habit.id.clone();

        debug!("Adding habit {} ({})", habit.name, id);
        self.habits.push(habit);
        if !self.order.contains(&id) {
            self.order.push(id.clone());
        }

        self.persist(&[StorageKey::Habits, StorageKey::Order]);
        Ok(id)
    }

    /// Merge a partial update into an active habit
    pub fn update_habit(&mut self, id: &HabitId, patch: HabitPatch) -> Result<&Habit, StoreError> {
        let index = self.position(id)?;
        self.habits[index].apply(patch)?;

        debug!("Updated habit {}", id);
        self.persist(&[StorageKey::Habits]);
        Ok(&self.habits[index])
    }

    /// Permanently remove an active habit
    pub fn delete_habit(&mut self, id: &HabitId) -> Result<(), StoreError> {
        let index = self.position(id)?;
        let habit = self.habits.remove(index);
        self.order.retain(|o| o != id);

        debug!("Deleted habit {} ({})", habit.name, id);
        self.persist(&[StorageKey::Habits, StorageKey::Order]);
        Ok(())
    }

    /// Mark or unmark today for a habit
    ///
    /// Returns `true` if today is now marked complete.
    pub fn toggle_today(&mut self, id: &HabitId) -> Result<bool, StoreError> {
        let index = self.position(id)?;
        let now = self.clock.now();
        let completed = self.habits[index].toggle_completion(now);

        debug!(
            "Toggled {} for {}: {}",
            id,
            DateDay::from_instant(&now),
            if completed { "done" } else { "not done" }
        );
        self.persist(&[StorageKey::Habits]);
        Ok(completed)
    }

    /// Move an active habit into the archive
    pub fn archive_habit(&mut self, id: &HabitId) -> Result<(), StoreError> {
        let index = self.position(id)?;
        let habit = self.habits.remove(index);
        self.order.retain(|o| o != id);

        if self.archived.iter().any(|entry| entry.id() == id) {
            warn!("Habit {} was already archived; keeping the existing entry", id);
        } else {
            self.archived.push(ArchivedHabit::new(habit, self.clock.now()));
        }

        debug!("Archived habit {}", id);
        self.persist(&[StorageKey::Habits, StorageKey::Order, StorageKey::Archived]);
        Ok(())
    }

    /// Move an archived habit back to the end of the active list
    pub fn unarchive_habit(&mut self, id: &HabitId) -> Result<(), StoreError> {
        let index = self
            .archived
            .iter()
            .position(|entry| entry.id() == id)
            .ok_or_else(|| StoreError::not_found(id))?;
        let habit = self.archived.remove(index).restore();

        if self.habits.iter().any(|h| &h.id == id) {
            warn!("Habit {} is already active; discarding the archived copy", id);
        } else {
            self.habits.push(habit);
        }
        if !self.order.contains(id) {
            self.order.push(id.clone());
        }

        debug!("Unarchived habit {}", id);
        self.persist(&[StorageKey::Habits, StorageKey::Order, StorageKey::Archived]);
        Ok(())
    }

    /// Replace the display order wholesale
    ///
    /// Unknown ids are kept (they sort last and are harmless); repeated ids
    /// keep only their first position.
    pub fn reorder_habits(&mut self, new_order: Vec<HabitId>) {
        let mut seen = HashSet::new();
        self.order = new_order
            .into_iter()
            .filter(|id| seen.insert(id.clone()))
            .collect();

        debug!("Reordered {} habit(s)", self.order.len());
        self.persist(&[StorageKey::Order]);
    }

    /// Active habits in display order
    ///
    /// Habits missing from the order come after all ordered ones, in storage
    /// order.
    pub fn list_habits(&self) -> Vec<&Habit> {
        let rank: HashMap<&HabitId, usize> = self
            .order
            .iter()
            .enumerate()
            .map(|(i, id)| (id, i))
            .collect();

        let mut habits: Vec<&Habit> = self.habits.iter().collect();
        habits.sort_by_key(|habit| rank.get(&habit.id).copied().unwrap_or(usize::MAX));
        habits
    }

    pub fn get_habit(&self, id: &HabitId) -> Option<&Habit> {
        self.habits.iter().find(|habit| &habit.id == id)
    }

    /// Archived habits, oldest archival first
    pub fn archived_habits(&self) -> &[ArchivedHabit] {
        &self.archived
    }

    /// The raw display order, including ids that no longer exist
    pub fn order(&self) -> &[HabitId] {
        &self.order
    }

    /// Totals over all active habits
    pub fn aggregate_stats(&self) -> AggregateStats {
        self.analytics().aggregate(&self.habits)
    }

    /// Derived view data for one active habit
    pub fn habit_overview(&self, id: &HabitId) -> Result<HabitOverview, StoreError> {
        let habit = self.get_habit(id).ok_or_else(|| StoreError::not_found(id))?;
        Ok(self.analytics().overview(habit))
    }

    /// Derived view data for every active habit, in display order
    pub fn overviews(&self) -> Vec<HabitOverview> {
        let analytics = self.analytics();
        self.list_habits()
            .into_iter()
            .map(|habit| analytics.overview(habit))
            .collect()
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        self.persist(&[StorageKey::Theme]);
    }

    /// Today according to the store's clock
    pub fn today(&self) -> DateDay {
        DateDay::from_instant(&self.clock.now())
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    fn analytics(&self) -> AnalyticsEngine {
        AnalyticsEngine::on(self.today())
    }

    fn position(&self, id: &HabitId) -> Result<usize, StoreError> {
        self.habits
            .iter()
            .position(|habit| &habit.id == id)
            .ok_or_else(|| StoreError::not_found(id))
    }

    /// Write the given collections; failures are logged, never returned
    fn persist(&mut self, keys: &[StorageKey]) {
        for key in keys {
            let result = match key {
                StorageKey::Habits => save_collection(&mut self.gateway, *key, &self.habits),
                StorageKey::Order => save_collection(&mut self.gateway, *key, &self.order),
                StorageKey::Archived => save_collection(&mut self.gateway, *key, &self.archived),
                StorageKey::Theme => self.gateway.write(key.as_str(), self.theme.tag()),
            };

            match result {
                Ok(()) => debug!("Persisted {}", key.as_str()),
                Err(e) => warn!("Failed to persist {}: {}", key.as_str(), e),
            }
        }
    }
}
