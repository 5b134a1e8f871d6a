/// Tools for the theme preference
///
/// This module implements theme_get and theme_set.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::Theme;
use crate::storage::PersistenceGateway;
use crate::store::{HabitStore, StoreError};

/// Parameters for setting the theme
#[derive(Debug, Deserialize, JsonSchema)]
pub struct SetThemeParams {
    /// light, dark or system
    pub theme: String,
}

#[derive(Debug, Serialize)]
pub struct ThemeResponse {
    pub theme: Theme,
}

pub fn get_theme<G: PersistenceGateway>(store: &HabitStore<G>) -> ThemeResponse {
    ThemeResponse { theme: store.theme() }
}

pub fn set_theme<G: PersistenceGateway>(
    store: &mut HabitStore<G>,
    params: SetThemeParams,
) -> Result<ThemeResponse, StoreError> {
    let theme = match params.theme.trim().to_lowercase().as_str() {
        "light" => Theme::Light,
        "dark" => Theme::Dark,
        "system" => Theme::System,
        other => {
            return Err(StoreError::InvalidInput(format!(
                "Invalid theme '{}'. Valid options: light, dark, system",
                other
            )))
        }
    };

    store.set_theme(theme);
    Ok(ThemeResponse { theme })
}
