//! Level catalog
//!
//! Per-level tuning (flock size, spawn range, sheep behavior) and the level
//! graph (which level follows which). Loaded from JSON and validated up front
//! so a bad catalog fails before any round starts.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::error::ConfigError;
use crate::sim::{Gaussian, SheepConfig};

/// One level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelConfig {
    pub id: String,
    /// Sheep to find
    pub total_sheep: u32,
    /// Spawn disc radius
    pub range: f32,
    /// Level loaded after a win
    pub next: String,
    /// Show the intro overlay before starting the clock
    #[serde(default)]
    pub intro: bool,
    #[serde(default)]
    pub sheep: SheepConfig,
}

impl LevelConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |reason: &str| ConfigError::InvalidLevel {
            level: self.id.clone(),
            reason: reason.to_string(),
        };

        if self.total_sheep == 0 {
            return Err(invalid("needs at least one sheep"));
        }
        if !self.range.is_finite() || self.range <= 0.0 {
            return Err(invalid("range must be positive"));
        }
        if !self.sheep.graze.is_valid() {
            return Err(invalid("graze needs a non-negative standard deviation"));
        }
        if !self.sheep.search.is_valid() {
            return Err(invalid("search needs a non-negative standard deviation"));
        }
        if !(self.sheep.speed.is_finite() && self.sheep.speed > 0.0) {
            return Err(invalid("speed must be positive"));
        }
        if !(self.sheep.mass.is_finite() && self.sheep.mass > 0.0) {
            return Err(invalid("mass must be positive"));
        }
        if !(self.sheep.radius.is_finite() && self.sheep.radius > 0.0) {
            return Err(invalid("radius must be positive"));
        }
        Ok(())
    }
}

/// The whole catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// First level of a session
    pub start_level: String,
    /// Level loaded after a loss
    pub restart_level: String,
    pub levels: Vec<LevelConfig>,
}

impl Default for GameConfig {
    fn default() -> Self {
        let level = |id: &str, total_sheep: u32, range: f32, next: &str, intro: bool| LevelConfig {
            id: id.to_string(),
            total_sheep,
            range,
            next: next.to_string(),
            intro,
            sheep: SheepConfig::default(),
        };

        let mut valley = level("valley", 12, 9.0, "meadow", false);
        // Skittish flock: shorter pauses, longer walks
        valley.sheep.graze = Gaussian::new(1.2, 0.4);
        valley.sheep.search = Gaussian::new(3.0, 0.8);
        valley.sheep.speed = 1.5;

        Self {
            start_level: "meadow".to_string(),
            restart_level: "meadow".to_string(),
            levels: vec![
                level("meadow", 3, 5.0, "hillside", true),
                level("hillside", 6, 7.0, "valley", false),
                valley,
            ],
        }
    }
}

impl GameConfig {
    /// Look up a level by id
    pub fn level(&self, id: &str) -> Option<&LevelConfig> {
        self.levels.iter().find(|l| l.id == id)
    }

    /// Check every level and every level reference
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.levels.is_empty() {
            return Err(ConfigError::NoLevels);
        }

        let mut ids = HashSet::new();
        for level in &self.levels {
            if !ids.insert(level.id.as_str()) {
                return Err(ConfigError::DuplicateLevel(level.id.clone()));
            }
            level.validate()?;
        }

        let references = [&self.start_level, &self.restart_level]
            .into_iter()
            .chain(self.levels.iter().map(|l| &l.next));
        for id in references {
            if !ids.contains(id.as_str()) {
                return Err(ConfigError::UnknownLevel(id.clone()));
            }
        }
        Ok(())
    }

    /// Parse and validate a JSON catalog
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read a JSON catalog from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!(
            "Loaded {} levels from {}",
            config.levels.len(),
            path.display()
        );
        Ok(config)
    }
}
