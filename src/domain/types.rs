/// Core types used throughout the domain layer
///
/// Habit identifiers plus the closed tag sets (colors, icons, theme) that the
/// display layer picks from. Tags are stored as plain strings; an unknown tag
/// never survives parsing and falls back to the set's default instead.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a habit
///
/// Identifiers are opaque strings. Newly created habits get a
/// `habit-<uuid>` id, but anything already in storage is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct HabitId(pub String);

impl HabitId {
    /// Generate a fresh habit ID
    pub fn new() -> Self {
        Self(format!("habit-{}", Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for HabitId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for HabitId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for HabitId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for HabitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Accent color of a habit card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(from = "String", into = "String", rename_all = "lowercase")]
pub enum HabitColor {
    #[default]
    Emerald,
    Blue,
    Violet,
    Amber,
    Rose,
    Cyan,
    Orange,
    Teal,
}

impl HabitColor {
    pub const ALL: [HabitColor; 8] = [
        HabitColor::Emerald,
        HabitColor::Blue,
        HabitColor::Violet,
        HabitColor::Amber,
        HabitColor::Rose,
        HabitColor::Cyan,
        HabitColor::Orange,
        HabitColor::Teal,
    ];

    /// Tag used in storage and on the wire
    pub fn tag(&self) -> &'static str {
        match self {
            HabitColor::Emerald => "emerald",
            HabitColor::Blue => "blue",
            HabitColor::Violet => "violet",
            HabitColor::Amber => "amber",
            HabitColor::Rose => "rose",
            HabitColor::Cyan => "cyan",
            HabitColor::Orange => "orange",
            HabitColor::Teal => "teal",
        }
    }

    /// Parse a tag, falling back to the default color for anything unknown
    pub fn from_tag(tag: &str) -> Self {
        let tag = tag.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.tag().eq_ignore_ascii_case(tag))
            .unwrap_or_default()
    }
}

impl From<String> for HabitColor {
    fn from(s: String) -> Self {
        Self::from_tag(&s)
    }
}

impl From<HabitColor> for String {
    fn from(c: HabitColor) -> Self {
        c.tag().to_string()
    }
}

/// Icon shown next to a habit name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(from = "String", into = "String", rename_all = "lowercase")]
pub enum HabitIcon {
    Book,
    Sport,
    Meditate,
    Water,
    Sleep,
    Study,
    Heart,
    #[default]
    Star,
}

impl HabitIcon {
    pub const ALL: [HabitIcon; 8] = [
        HabitIcon::Book,
        HabitIcon::Sport,
        HabitIcon::Meditate,
        HabitIcon::Water,
        HabitIcon::Sleep,
        HabitIcon::Study,
        HabitIcon::Heart,
        HabitIcon::Star,
    ];

    pub fn tag(&self) -> &'static str {
        match self {
            HabitIcon::Book => "book",
            HabitIcon::Sport => "sport",
            HabitIcon::Meditate => "meditate",
            HabitIcon::Water => "water",
            HabitIcon::Sleep => "sleep",
            HabitIcon::Study => "study",
            HabitIcon::Heart => "heart",
            HabitIcon::Star => "star",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            HabitIcon::Book => "📚",
            HabitIcon::Sport => "🏃",
            HabitIcon::Meditate => "🧘",
            HabitIcon::Water => "💧",
            HabitIcon::Sleep => "😴",
            HabitIcon::Study => "✏️",
            HabitIcon::Heart => "❤️",
            HabitIcon::Star => "⭐",
        }
    }

    /// Parse a tag, falling back to the default icon for anything unknown
    pub fn from_tag(tag: &str) -> Self {
        let tag = tag.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|i| i.tag().eq_ignore_ascii_case(tag))
            .unwrap_or_default()
    }
}

impl From<String> for HabitIcon {
    fn from(s: String) -> Self {
        Self::from_tag(&s)
    }
}

impl From<HabitIcon> for String {
    fn from(i: HabitIcon) -> Self {
        i.tag().to_string()
    }
}

/// Display theme preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(from = "String", into = "String", rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

impl Theme {
    pub fn tag(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::System => "system",
        }
    }

    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_lowercase().as_str() {
            "light" => Theme::Light,
            "dark" => Theme::Dark,
            _ => Theme::System,
        }
    }
}

impl From<String> for Theme {
    fn from(s: String) -> Self {
        Self::from_tag(&s)
    }
}

impl From<Theme> for String {
    fn from(t: Theme) -> Self {
        t.tag().to_string()
    }
}
