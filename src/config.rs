use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::coords::GridCoord;
use crate::generator::{self, PoolSizing};

pub const GRID_WIDTH: i32 = 20;
pub const GRID_HEIGHT: i32 = 13;
pub const INITIAL_FUEL: f64 = 1500.0;
pub const FUEL_DRAIN: f64 = 0.25;
pub const FUEL_DRAIN_FLYING: f64 = 2.0;
pub const DIG_FUEL_COST: f64 = 50.0;
pub const TICK_INTERVAL_MS: u64 = 300;
pub const SPAWN: GridCoord = GridCoord::new(1, 1);
/// Largest accepted grid side, in tiles.
pub const MAX_GRID_SIDE: i32 = 1024;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Game tuning. Missing JSON fields fall back to the reference values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub grid_width: i32,
    pub grid_height: i32,
    pub initial_fuel: f64,
    pub fuel_drain: f64,
    pub fuel_drain_flying: f64,
    pub dig_fuel_cost: f64,
    pub tick_interval_ms: u64,
    pub spawn: GridCoord,
    pub pool_sizing: PoolSizing,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: GRID_WIDTH,
            grid_height: GRID_HEIGHT,
            initial_fuel: INITIAL_FUEL,
            fuel_drain: FUEL_DRAIN,
            fuel_drain_flying: FUEL_DRAIN_FLYING,
            dig_fuel_cost: DIG_FUEL_COST,
            tick_interval_ms: TICK_INTERVAL_MS,
            spawn: SPAWN,
            pool_sizing: PoolSizing::default(),
        }
    }
}

impl GameConfig {
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_width > MAX_GRID_SIDE || self.grid_height > MAX_GRID_SIDE {
            return Err(ConfigError::Invalid(format!(
                "grid {}x{} exceeds the maximum side of {}",
                self.grid_width, self.grid_height, MAX_GRID_SIDE
            )));
        }
        if !generator::is_playable(self.grid_width, self.grid_height) {
            return Err(ConfigError::Invalid(format!(
                "grid {}x{} is below the minimum playable size",
                self.grid_width, self.grid_height
            )));
        }
        self.validate_tuning()?;
        if self.spawn.x < 0
            || self.spawn.y < 0
            || self.spawn.x >= self.grid_width
            || self.spawn.y >= self.grid_height
        {
            return Err(ConfigError::Invalid(format!(
                "spawn ({}, {}) is outside the grid",
                self.spawn.x, self.spawn.y
            )));
        }
        Ok(())
    }

    /// Checks the timing and fuel numbers, leaving grid shape aside.
    pub fn validate_tuning(&self) -> Result<(), ConfigError> {
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::Invalid("tick_interval_ms must be positive".into()));
        }
        if !(self.initial_fuel > 0.0) {
            return Err(ConfigError::Invalid("initial_fuel must be positive".into()));
        }
        for (name, v) in [
            ("fuel_drain", self.fuel_drain),
            ("fuel_drain_flying", self.fuel_drain_flying),
            ("dig_fuel_cost", self.dig_fuel_cost),
        ] {
            if !(v >= 0.0) {
                return Err(ConfigError::Invalid(format!("{name} must be non-negative")));
            }
        }
        Ok(())
    }
}
