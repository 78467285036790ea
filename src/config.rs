use std::fs;
use std::path::Path;

use log::{info, warn};
use serde::Deserialize;
use thiserror::Error;

/// Optional tuning file next to the binary. Read-only: the game never
/// writes it back.
pub const CONFIG_FILE: &str = "snake_arcade.json";

const DEFAULT_GRID_WIDTH: i32 = 30;
const DEFAULT_GRID_HEIGHT: i32 = 20;
const DEFAULT_TICK_MS: u64 = 100;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Read(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    pub grid_width: i32,
    pub grid_height: i32,
    pub tick_ms: u64,
    pub volume: f32,
    pub muted: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            grid_width: DEFAULT_GRID_WIDTH,
            grid_height: DEFAULT_GRID_HEIGHT,
            tick_ms: DEFAULT_TICK_MS,
            volume: 1.0,
            muted: false,
        }
    }
}

impl Config {
    /// Loads the config file if present, falling back to defaults on any
    /// read or parse failure.
    pub fn load() -> Self {
        if !Path::new(CONFIG_FILE).exists() {
            return Config::default();
        }
        match load_from(CONFIG_FILE) {
            Ok(config) => {
                info!("loaded {CONFIG_FILE}");
                config
            }
            Err(err) => {
                warn!("ignoring {CONFIG_FILE}: {err}");
                Config::default()
            }
        }
    }

    fn clamped(self) -> Self {
        Config {
            grid_width: self.grid_width.clamp(8, 120),
            grid_height: self.grid_height.clamp(8, 120),
            tick_ms: self.tick_ms.clamp(30, 1000),
            volume: self.volume.clamp(0.0, 1.0),
            muted: self.muted,
        }
    }
}

fn load_from(path: &str) -> Result<Config, ConfigError> {
    parse(&fs::read_to_string(path)?)
}

fn parse(text: &str) -> Result<Config, ConfigError> {
    let config: Config = serde_json::from_str(text)?;
    Ok(config.clamped())
}
