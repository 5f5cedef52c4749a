//! Runtime configuration, read from a JSON file.
//!
//! Every field is optional; missing fields fall back to the reference game.
//! The difficulty curve itself is fixed and lives in `constants`.

use super::constants::{
    BACKGROUND_SCROLL_SPEED, JUMP_SPEED, RUNNER_HEIGHT, RUNNER_WIDTH, RUNNER_X, SCREEN_HEIGHT,
    SCREEN_WIDTH, TICKS_PER_SECOND,
};
use super::error::GameError;
use crate::runner::obstacle_manager::ObstacleSpec;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = "config.json";
const MAX_TICKS_PER_SECOND: u32 = 240;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub screen_width: f64,
    pub screen_height: f64,
    pub ticks_per_second: u32,
    pub jump_speed: f64,
    pub background_scroll_speed: f64,
    /// RNG seed for reproducible obstacle placement (None = entropy).
    pub seed: Option<u64>,
    /// Starting obstacles. None = a bush and a rock just off-screen.
    pub obstacles: Option<Vec<ObstacleSpec>>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            ticks_per_second: TICKS_PER_SECOND,
            jump_speed: JUMP_SPEED,
            background_scroll_speed: BACKGROUND_SCROLL_SPEED,
            seed: None,
            obstacles: None,
        }
    }
}

/// Where the active configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Defaults,
    File(PathBuf),
}

impl GameConfig {
    /// Parse and validate a config file.
    pub fn load(path: &Path) -> Result<Self, GameError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn from_json(contents: &str) -> Result<Self, GameError> {
        let config: GameConfig = serde_json::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `explicit` if given, else from the per-user config file if
    /// one exists, else defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<(Self, ConfigSource), GameError> {
        if let Some(path) = explicit {
            return Ok((Self::load(path)?, ConfigSource::File(path.to_path_buf())));
        }
        match Self::default_path() {
            Some(path) if path.exists() => {
                let config = Self::load(&path)?;
                Ok((config, ConfigSource::File(path)))
            }
            _ => Ok((Self::default(), ConfigSource::Defaults)),
        }
    }

    /// Per-user config location, e.g. `~/.config/trex-run/config.json`.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "trex-run").map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    pub fn obstacle_specs(&self) -> Vec<ObstacleSpec> {
        self.obstacles
            .clone()
            .unwrap_or_else(|| ObstacleSpec::default_layout(self.screen_width))
    }

    /// Duration of one tick in milliseconds.
    pub fn tick_interval_ms(&self) -> u64 {
        1000 / self.ticks_per_second.max(1) as u64
    }

    pub fn validate(&self) -> Result<(), GameError> {
        if !(self.screen_width > 0.0 && self.screen_height > 0.0) {
            return Err(GameError::Config(format!(
                "screen must have positive dimensions, got {}x{}",
                self.screen_width, self.screen_height
            )));
        }
        if self.screen_width < RUNNER_X + RUNNER_WIDTH || self.screen_height < RUNNER_HEIGHT {
            return Err(GameError::Config(format!(
                "screen {}x{} is too small for the runner",
                self.screen_width, self.screen_height
            )));
        }
        if self.ticks_per_second == 0 || self.ticks_per_second > MAX_TICKS_PER_SECOND {
            return Err(GameError::Config(format!(
                "ticks_per_second must be in 1..={}, got {}",
                MAX_TICKS_PER_SECOND, self.ticks_per_second
            )));
        }
        if !(self.jump_speed > 0.0) {
            return Err(GameError::Config(format!(
                "jump_speed must be positive, got {}",
                self.jump_speed
            )));
        }
        if self.background_scroll_speed < 0.0 {
            return Err(GameError::Config(format!(
                "background_scroll_speed must not be negative, got {}",
                self.background_scroll_speed
            )));
        }

        let specs = self.obstacle_specs();
        if specs.is_empty() {
            return Err(GameError::Config(
                "at least one obstacle is required".to_string(),
            ));
        }
        for (i, spec) in specs.iter().enumerate() {
            if spec.kind.height() > self.screen_height {
                return Err(GameError::Config(format!(
                    "obstacle {} ({}) is taller than the screen",
                    i,
                    spec.kind.name()
                )));
            }
            if spec.initial_speed < 0.0 {
                return Err(GameError::Config(format!(
                    "obstacle {} has negative speed {}",
                    i, spec.initial_speed
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::obstacle::ObstacleKind;

    #[test]
    fn test_defaults_match_reference_game() {
        let config = GameConfig::default();
        assert_eq!(config.screen_width, 800.0);
        assert_eq!(config.screen_height, 400.0);
        assert_eq!(config.ticks_per_second, 30);
        assert_eq!(config.tick_interval_ms(), 33);
        assert!(config.validate().is_ok());

        let specs = config.obstacle_specs();
        assert_eq!(specs.len(), 2);
        assert_eq!(specs[0].initial_x, 850.0);
        assert_eq!(specs[1].initial_x, 1200.0);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = GameConfig::from_json(r#"{ "seed": 7, "ticks_per_second": 60 }"#).unwrap();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.ticks_per_second, 60);
        assert_eq!(config.screen_width, 800.0);
    }

    #[test]
    fn test_custom_obstacles() {
        let config = GameConfig::from_json(
            r#"{ "obstacles": [
                { "kind": "rock", "initial_x": 900.0 },
                { "kind": "bush", "initial_x": 1300.0, "initial_speed": 4.0 }
            ] }"#,
        )
        .unwrap();
        let specs = config.obstacle_specs();
        assert_eq!(specs[0].kind, ObstacleKind::Rock);
        assert_eq!(specs[1].initial_speed, 4.0);
    }

    #[test]
    fn test_rejects_empty_obstacles() {
        let err = GameConfig::from_json(r#"{ "obstacles": [] }"#).unwrap_err();
        assert!(matches!(err, GameError::Config(_)));
    }

    #[test]
    fn test_rejects_bad_values() {
        for json in [
            r#"{ "ticks_per_second": 0 }"#,
            r#"{ "ticks_per_second": 1000 }"#,
            r#"{ "jump_speed": 0.0 }"#,
            r#"{ "screen_width": -5.0 }"#,
            r#"{ "screen_height": 40.0 }"#,
            r#"{ "background_scroll_speed": -1.0 }"#,
        ] {
            assert!(
                matches!(GameConfig::from_json(json), Err(GameError::Config(_))),
                "accepted {}",
                json
            );
        }
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = GameConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, GameError::Parse(_)));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = GameConfig::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, GameError::Io(_)));
    }

    #[test]
    fn test_resolve_explicit_path() {
        let path = std::env::temp_dir().join(format!("trex-run-config-{}.json", std::process::id()));
        fs::write(&path, r#"{ "seed": 99 }"#).unwrap();
        let (config, source) = GameConfig::resolve(Some(&path)).unwrap();
        assert_eq!(config.seed, Some(99));
        assert_eq!(source, ConfigSource::File(path.clone()));
        fs::remove_file(&path).unwrap();
    }
}
