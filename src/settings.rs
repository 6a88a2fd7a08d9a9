//! Simulation settings
//!
//! Process-wide construction parameters plus the starting values of the live
//! controls (gravity, mutation rate, population size, frame time, target).
//! Stored as JSON; missing fields fall back to the built-in defaults.

use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use crate::consts::*;
use crate::sim::{Bounds, TickInput};

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to access settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed settings: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid setting: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Live controls ===
    /// Population size to start with and refill toward
    pub population_size: usize,
    /// Chance that an offspring receives a mutation burst (0.0 - 1.0)
    pub mutation_rate: f64,
    /// Gravity strength
    pub gravity: f64,
    /// Seconds between ticks when pacing in real time
    pub frame_time: f64,
    pub target: DVec2,

    // === Construction ===
    /// Frames each rocket lives (genome length)
    pub lifespan: usize,
    pub spawn: DVec2,
    pub bounds: Bounds,
    /// Fixed run seed; random when absent
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            population_size: DEFAULT_POPULATION,
            mutation_rate: DEFAULT_MUTATION_RATE,
            gravity: DEFAULT_GRAVITY,
            frame_time: DEFAULT_FRAME_TIME,
            target: TARGET_POS,

            lifespan: LIFESPAN,
            spawn: SPAWN_POS,
            bounds: Bounds::default(),
            seed: None,
        }
    }
}

fn check_range(name: &str, value: f64, (lo, hi): (f64, f64)) -> Result<(), SettingsError> {
    if !(lo..=hi).contains(&value) {
        return Err(SettingsError::Invalid(format!(
            "{name} = {value} is outside {lo}..={hi}"
        )));
    }
    Ok(())
}

impl Settings {
    /// Check every value against its allowed range
    pub fn validate(&self) -> Result<(), SettingsError> {
        let (lo, hi) = POPULATION_RANGE;
        if !(lo..=hi).contains(&self.population_size) {
            return Err(SettingsError::Invalid(format!(
                "population_size = {} is outside {lo}..={hi}",
                self.population_size
            )));
        }
        check_range("mutation_rate", self.mutation_rate, (0.0, 1.0))?;
        check_range("gravity", self.gravity, GRAVITY_RANGE)?;
        check_range("frame_time", self.frame_time, FRAME_TIME_RANGE)?;
        if self.lifespan < 2 {
            return Err(SettingsError::Invalid(format!(
                "lifespan = {} must be at least 2",
                self.lifespan
            )));
        }
        let b = &self.bounds;
        if !(b.left < b.right && b.top < b.bottom) {
            return Err(SettingsError::Invalid(format!("bounds {b:?} are empty")));
        }
        if !b.contains(self.spawn) {
            return Err(SettingsError::Invalid(format!(
                "spawn {} lies outside the bounds",
                self.spawn
            )));
        }
        Ok(())
    }

    /// Load and validate settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let settings: Self = serde_json::from_str(&json)?;
        settings.validate()?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Write settings as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    /// Control values for the next tick
    pub fn tick_input(&self) -> TickInput {
        TickInput {
            gravity: self.gravity,
            mutation_rate: self.mutation_rate,
            target_size: self.population_size,
            target: self.target,
            bounds: self.bounds,
        }
    }

    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs_f64(self.frame_time.max(0.0))
    }
}
