//! Error types for configuration and binding-profile loading.
//!
//! The per-frame core (routing and the message queue) is total and never
//! returns these; they only surface while reading config/profile files.

use crate::event::DeviceCoord;
use thiserror::Error;

/// Errors raised while loading or validating HUD configuration.
#[derive(Debug, Error)]
pub enum HudError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("player `{player}` binds {action} to out-of-range coordinate {coord}")]
    CoordOutOfRange {
        player: String,
        action: String,
        coord: DeviceCoord,
    },

    #[error("binding profile lists player `{0}` more than once")]
    DuplicatePlayer(String),
}

pub type Result<T> = std::result::Result<T, HudError>;
