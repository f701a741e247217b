//! HUD configuration.
//!
//! Loaded from TOML; every field is optional and falls back to [`HudConfig::default`].
//!
//! ```toml
//! width = 1024
//! height = 768
//! display_fps = true
//! fullscreen = false
//!
//! [[keymap]]
//! key = 27
//! command = "pause"
//! ```
//!
//! A `keymap` table replaces the default system keymap entirely.

use crate::error::Result;
use crate::system::SystemKeymap;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HudConfig {
    /// Screen width in pixels.
    pub width: u32,
    /// Screen height in pixels.
    pub height: u32,
    /// Draw the frame-rate counter.
    pub display_fps: bool,
    /// The host cursor is hidden for the HUD's lifetime when set.
    pub fullscreen: bool,
    /// Headless profiling run: no player input is routed.
    pub profile_mode: bool,
    pub keymap: SystemKeymap,
}

impl Default for HudConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            display_fps: false,
            fullscreen: false,
            profile_mode: false,
            keymap: SystemKeymap::default(),
        }
    }
}

impl HudConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let cfg = Self::from_toml_str(&text)?;
        tracing::debug!(
            width = cfg.width,
            height = cfg.height,
            fullscreen = cfg.fullscreen,
            "loaded HUD config from {}",
            path.as_ref().display()
        );
        Ok(cfg)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
