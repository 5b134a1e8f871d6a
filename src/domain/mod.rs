/// Domain module containing core business logic and data types
///
/// This module defines the habit entity, the calendar-day value type, the
/// solar Hijri calendar math and the streak/progress statistics. Nothing in
/// here touches storage or the clock except through explicit arguments.

pub mod calendar;
pub mod day;
pub mod habit;
pub mod stats;
pub mod types;

// Re-export public types for easy access
pub use calendar::*;
pub use day::*;
pub use habit::*;
pub use stats::*;
pub use types::*;

use thiserror::Error;

/// Errors that can occur during domain operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Invalid habit name: {0}")]
    InvalidHabitName(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),
}
