//! Application configuration
//!
//! Built once at startup (from a TOML file, defaults, and CLI overrides) and
//! handed explicitly to the components that need it.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::core::error::{LifeError, Result};
use crate::core::types::{Boundary, GameMode};
use crate::render::colors::Rgb;

/// Environment variable consulted when the config file carries no chat token
pub const TOKEN_ENV_VAR: &str = "CHAT_LIFE_TOKEN";

/// Widest border the renderer accepts, in terminal cells
pub const MAX_BORDER_SIZE: u16 = 64;

/// Top-level configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub display: DisplayConfig,
    pub simulation: SimulationConfig,
    pub chat: ChatConfig,
}

/// Colors and layout used by the renderer
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Color of live cells
    pub alive: Rgb,
    /// Color of dead cells
    pub background: Rgb,
    /// Color of the border around the board
    pub grid_color: Rgb,
    /// Color of the laboratory zone lines
    pub grid_color2: Rgb,
    /// Blank columns/rows kept between the terminal edge and the board
    pub border_size: u16,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            alive: Rgb::new(255, 255, 255),
            background: Rgb::new(10, 10, 40),
            grid_color: Rgb::new(40, 40, 40),
            grid_color2: Rgb::new(0, 128, 0),
            border_size: 1,
        }
    }
}

/// Board and clock settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Board width in cells
    pub width: usize,
    /// Board height in cells
    ///
    /// Laboratory zones are height / 8 cells wide on both axes, so a board
    /// twice as wide as it is tall shows the full 8 x 16 zone matrix.
    pub height: usize,
    /// Fixed delay between generations
    pub tick_interval_ms: u64,
    /// Neighbor counting policy at the board edges
    pub boundary: Boundary,
    /// Initial rule string
    pub rule: String,
    /// Mode the board starts in
    pub mode: GameMode,
    /// RNG seed; a random one is drawn when absent
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            width: 352,
            height: 176,
            tick_interval_ms: 400,
            boundary: Boundary::Toroidal,
            rule: "B3S23".into(),
            mode: GameMode::Laboratory,
            seed: None,
        }
    }
}

impl SimulationConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

/// IRC chat connection settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    pub enabled: bool,
    /// `host:port` of the IRC endpoint
    pub server: String,
    pub nick: String,
    /// OAuth token, without the `oauth:` prefix
    pub token: Option<String>,
    /// Channels to join, with or without a leading `#`
    pub channels: Vec<String>,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            server: "irc.chat.twitch.tv:6667".into(),
            nick: String::new(),
            token: None,
            channels: Vec::new(),
        }
    }
}

impl ChatConfig {
    /// Token from the config file, or from `CHAT_LIFE_TOKEN`
    pub fn resolved_token(&self) -> Option<String> {
        self.token
            .clone()
            .filter(|t| !t.is_empty())
            .or_else(|| std::env::var(TOKEN_ENV_VAR).ok())
    }
}

impl AppConfig {
    /// Load and validate a TOML config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| LifeError::Config(format!("Failed to read {}: {}", path.display(), e)))?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(content)?;
        config.validate().map_err(LifeError::Config)?;
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> std::result::Result<(), String> {
        let sim = &self.simulation;
        if sim.width == 0 || sim.height == 0 {
            return Err(format!(
                "board must be at least 1x1, got {}x{}",
                sim.width, sim.height
            ));
        }

        if sim.tick_interval_ms == 0 {
            return Err("tick_interval_ms must be positive".into());
        }

        if self.display.border_size > MAX_BORDER_SIZE {
            return Err(format!(
                "border_size must be at most {}, got {}",
                MAX_BORDER_SIZE, self.display.border_size
            ));
        }

        if self.chat.enabled {
            if self.chat.nick.is_empty() {
                return Err("chat.nick is required when chat is enabled".into());
            }
            if self.chat.channels.is_empty() {
                return Err("chat.channels must list at least one channel".into());
            }
            if self.chat.resolved_token().is_none() {
                return Err(format!(
                    "chat.token is required when chat is enabled (or set {})",
                    TOKEN_ENV_VAR
                ));
            }
        }

        Ok(())
    }
}
