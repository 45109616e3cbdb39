// File: ./src/config.rs
// Handles configuration loading, saving, and the theme preference.
use crate::context::AppContext;
use crate::storage::LocalStorage;
use anyhow::Result;
use chrono::{Local, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use strum::EnumIter;

/// The two explicit display themes. The persisted preference is
/// `Option<Theme>`: `None` means automatic, resolved from the time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn opposite(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Light => write!(f, "Light"),
            Theme::Dark => write!(f, "Dark"),
        }
    }
}

/// Daytime hours get the light theme.
pub fn auto_theme_for_hour(hour: u32) -> Theme {
    if (6..18).contains(&hour) {
        Theme::Light
    } else {
        Theme::Dark
    }
}

#[derive(Deserialize, Serialize, Clone, Debug, Default)]
pub struct Config {
    /// Pinned theme; absent means automatic.
    #[serde(default)]
    pub theme: Option<Theme>,
    /// Overrides the built-in feed source URLs when non-empty.
    #[serde(default)]
    pub feed_urls: Vec<String>,
}

impl Config {
    /// Load the configuration from disk using an explicit context.
    /// Returns a contextualized error if reading or parsing fails.
    pub fn load(ctx: &dyn AppContext) -> Result<Self> {
        let path = ctx.get_config_file_path()?;

        if !path.exists() {
            return Err(anyhow::anyhow!("Config file not found"));
        }

        let contents = fs::read_to_string(&path).map_err(|e| {
            anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e)
        })?;

        let config: Config = toml::from_str(&contents).map_err(|e| {
            anyhow::anyhow!("Failed to parse config file '{}': {}", path.display(), e)
        })?;

        Ok(config)
    }

    /// Like `load`, but degrades to defaults: a missing file is the normal
    /// first-run state and a corrupt one must not block startup.
    pub fn load_or_default(ctx: &dyn AppContext) -> Self {
        match Self::load(ctx) {
            Ok(config) => config,
            Err(err) => {
                if !err.to_string().contains("not found") {
                    log::warn!("could not load config ({err}), using defaults");
                }
                Self::default()
            }
        }
    }

    /// Save configuration using an explicit context.
    pub fn save(&self, ctx: &dyn AppContext) -> Result<()> {
        let path = ctx.get_config_file_path()?;
        LocalStorage::with_lock(&path, || {
            let toml_str = toml::to_string_pretty(self)?;
            LocalStorage::atomic_write(&path, toml_str)?;
            Ok(())
        })?;
        Ok(())
    }

    /// The theme currently in effect, resolving the automatic mode against
    /// the local wall clock.
    pub fn effective_theme(&self) -> Theme {
        self.effective_theme_at(Local::now().hour())
    }

    /// Resolution against an explicit hour, for deterministic tests.
    pub fn effective_theme_at(&self, hour: u32) -> Theme {
        self.theme.unwrap_or_else(|| auto_theme_for_hour(hour))
    }

    /// Flips the theme. From automatic mode this pins the opposite of
    /// whatever is currently showing; from a pinned mode it pins the other
    /// one. Returns the new effective theme. The caller persists.
    pub fn toggle_theme(&mut self) -> Theme {
        let next = self.effective_theme().opposite();
        self.theme = Some(next);
        next
    }

    /// Back to automatic; the pinned preference is forgotten.
    pub fn reset_theme(&mut self) -> Theme {
        self.theme = None;
        self.effective_theme()
    }
}
