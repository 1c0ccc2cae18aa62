//! Game configuration
//!
//! Read once at startup from a JSON file; every field is optional.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::TICK_RATE;
use crate::error::{GameError, Result};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "MUSOU_CONFIG";
const CONFIG_FILE_NAME: &str = ".musou_shooter.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Score the run starts with
    pub initial_score: i64,
    /// Ticks per second
    pub tick_rate: u32,
    /// Fixed RNG seed for reproducible runs
    pub seed: Option<u64>,
    /// JSON file of sprite glyph overrides
    pub sprite_sheet: Option<PathBuf>,
    /// Where log output goes while the terminal is in use
    pub log_file: Option<PathBuf>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            initial_score: 0,
            tick_rate: TICK_RATE,
            seed: None,
            sprite_sheet: None,
            log_file: None,
        }
    }
}

impl GameConfig {
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let display = path.display().to_string();
        let text = std::fs::read_to_string(path).map_err(|e| GameError::config(&display, e))?;
        Self::from_json(&text).map_err(|e| GameError::config(display, e))
    }

    /// `$MUSOU_CONFIG` if set, else `~/.musou_shooter.json` if it exists.
    pub fn locate() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        let path = PathBuf::from(home).join(CONFIG_FILE_NAME);
        path.exists().then_some(path)
    }

    pub fn load_or_default() -> Result<Self> {
        match Self::locate() {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }

    /// Wall-clock length of one tick. A zero tick rate falls back to the
    /// default rate.
    pub fn tick_duration(&self) -> Duration {
        let rate = if self.tick_rate == 0 {
            TICK_RATE
        } else {
            self.tick_rate
        };
        Duration::from_secs(1) / rate
    }
}
