use crate::error::AppError;
use crate::model::Priority;
use crate::storage::json_store;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub store_path: Option<PathBuf>,
    #[serde(default)]
    pub default_priority: Option<Priority>,
    #[serde(default)]
    pub color: Option<bool>,
}

impl Config {
    /// Backing file, falling back to `./tasks.json`.
    pub fn store_path(&self) -> PathBuf {
        self.store_path
            .clone()
            .unwrap_or_else(json_store::default_store_path)
    }

    pub fn default_priority(&self) -> Priority {
        self.default_priority.unwrap_or_default()
    }

    pub fn color_enabled(&self) -> bool {
        self.color.unwrap_or(true)
    }
}

#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: Config,
    pub error: Option<AppError>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub store_path: Option<PathBuf>,
    pub default_priority: Option<Priority>,
    pub color: Option<bool>,
}

/// Loads the config at `path`, or defaults when no path was given.
///
/// A missing file yields defaults without an error; an unreadable or invalid
/// one yields defaults and carries the error so the caller can report it.
pub fn load_config_with_fallback(path: Option<&Path>) -> ConfigLoad {
    let Some(path) = path else {
        return ConfigLoad {
            config: Config::default(),
            error: None,
        };
    };

    if !path.exists() {
        log::debug!("config {} not found, using defaults", path.display());
        return ConfigLoad {
            config: Config::default(),
            error: None,
        };
    }

    match load_config_from_path(path) {
        Ok(config) => ConfigLoad {
            config,
            error: None,
        },
        Err(err) => ConfigLoad {
            config: Config::default(),
            error: Some(err),
        },
    }
}

pub fn load_config_from_path(path: &Path) -> Result<Config, AppError> {
    let content = std::fs::read_to_string(path)
        .map_err(|err| AppError::io(format!("{}: {}", path.display(), err)))?;
    serde_json::from_str(&content)
        .map_err(|err| AppError::invalid_data(format!("invalid JSON in {}: {}", path.display(), err)))
}

pub fn merge_overrides(base: &Config, overrides: &ConfigOverrides) -> Config {
    let mut merged = base.clone();
    if let Some(path) = overrides.store_path.as_ref() {
        merged.store_path = Some(path.clone());
    }
    if let Some(priority) = overrides.default_priority {
        merged.default_priority = Some(priority);
    }
    if let Some(color) = overrides.color {
        merged.color = Some(color);
    }
    merged
}
