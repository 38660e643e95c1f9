//! Environment configuration
//!
//! Everything the wrapper cannot learn from the engine lives here: where the
//! gateway listens, the board size to request, rendering scale and the action
//! codes agreed upon with the engine.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::render::SurfaceKind;

/// Address the reference gateway listens on
pub const DEFAULT_GATEWAY_ADDR: &str = "127.0.0.1:25333";

/// Codes the engine expects for turns relative to the current heading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelativeActionCodes {
    pub left: i32,
    pub straight: i32,
    pub right: i32,
}

impl Default for RelativeActionCodes {
    fn default() -> Self {
        Self {
            left: 0,
            straight: 1,
            right: 2,
        }
    }
}

/// Codes the engine expects for board-absolute directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbsoluteActionCodes {
    pub up: i32,
    pub right: i32,
    pub down: i32,
    pub left: i32,
}

impl Default for AbsoluteActionCodes {
    fn default() -> Self {
        Self {
            up: 0,
            right: 1,
            down: 2,
            left: 3,
        }
    }
}

/// Configuration for a snake environment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvConfig {
    /// `host:port` of the engine gateway
    pub gateway_addr: String,
    /// Width of the board requested from the engine
    pub grid_width: usize,
    /// Height of the board requested from the engine
    pub grid_height: usize,
    /// Whether `render` draws anything
    pub visualize: bool,
    /// Pixels per board cell
    pub cell_scale: usize,
    /// Where `render` shows frames when no surface was injected
    pub surface: SurfaceKind,
    /// Upper bound on an episode's return, used for normalization
    pub max_reward: f32,
    pub relative_actions: RelativeActionCodes,
    pub absolute_actions: AbsoluteActionCodes,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            gateway_addr: DEFAULT_GATEWAY_ADDR.to_string(),
            grid_width: 10,
            grid_height: 10,
            visualize: false,
            cell_scale: 20,
            surface: SurfaceKind::Window,
            max_reward: 150.0,
            relative_actions: RelativeActionCodes::default(),
            absolute_actions: AbsoluteActionCodes::default(),
        }
    }
}

impl EnvConfig {
    /// Create a configuration with a custom board size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Same configuration with rendering switched on or off
    pub fn with_visualize(mut self, visualize: bool) -> Self {
        self.visualize = visualize;
        self
    }

    /// Read a configuration from a JSON file; missing fields take defaults
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config in {:?}", path))
    }

    /// Write the configuration as pretty JSON, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }
        let json = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write config to {:?}", path))
    }
}
