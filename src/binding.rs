//! Logical kart actions and per-player device bindings.
//!
//! A [`BindingProfile`] is the serializable set of every configured player's
//! [`PlayerBindings`]. Profiles are plain TOML:
//!
//! ```toml
//! name = "default"
//!
//! [[players]]
//! name = "Player 1"
//! [players.inputs]
//! left  = { kind = "keyboard", id0 = 276 }
//! accel = { kind = "stick_motion", id0 = 0, id1 = 1, id2 = 0 }
//! ```
//!
//! Player order in the profile is the player index used by the race.

use crate::error::{HudError, Result};
use crate::event::{keys, DeviceCoord};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::path::Path;

/// Abstract kart command, independent of the device that triggered it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KartAction {
    Left,
    Right,
    Accel,
    Brake,
    Wheelie,
    Jump,
    Rescue,
    Fire,
}

impl KartAction {
    /// Every action a player can bind, in routing order.
    pub const ALL: [KartAction; 8] = [
        KartAction::Left,
        KartAction::Right,
        KartAction::Accel,
        KartAction::Brake,
        KartAction::Wheelie,
        KartAction::Jump,
        KartAction::Rescue,
        KartAction::Fire,
    ];
}

impl fmt::Display for KartAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            KartAction::Left => "left",
            KartAction::Right => "right",
            KartAction::Accel => "accel",
            KartAction::Brake => "brake",
            KartAction::Wheelie => "wheelie",
            KartAction::Jump => "jump",
            KartAction::Rescue => "rescue",
            KartAction::Fire => "fire",
        };
        f.write_str(s)
    }
}

/// One player's action → device coordinate map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerBindings {
    pub name: String,
    #[serde(default)]
    pub inputs: BTreeMap<KartAction, DeviceCoord>,
}

impl PlayerBindings {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            inputs: BTreeMap::new(),
        }
    }

    /// Builder-style bind.
    pub fn with(mut self, action: KartAction, coord: DeviceCoord) -> Self {
        self.bind(action, coord);
        self
    }

    pub fn bind(&mut self, action: KartAction, coord: DeviceCoord) {
        self.inputs.insert(action, coord);
    }

    /// Coordinate bound to `action`, if any.
    pub fn coord(&self, action: KartAction) -> Option<DeviceCoord> {
        self.inputs.get(&action).copied()
    }
}

/// Serializable profile of every player's bindings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BindingProfile {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub players: Vec<PlayerBindings>,
}

impl BindingProfile {
    /// Parse and validate a profile from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let profile: BindingProfile = toml::from_str(text)?;
        profile.validate()?;
        Ok(profile)
    }

    /// Read, parse and validate a profile file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let profile = Self::from_toml_str(&text)?;
        tracing::debug!(
            profile = %profile.name,
            players = profile.players.len(),
            "loaded binding profile from {}",
            path.as_ref().display()
        );
        Ok(profile)
    }

    /// Pretty JSON dump, for diagnostics.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject out-of-range coordinates and repeated player names.
    ///
    /// Routing treats coordinates as pre-validated, so this is the one place bad
    /// data from disk gets caught.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for player in &self.players {
            if !seen.insert(player.name.as_str()) {
                return Err(HudError::DuplicatePlayer(player.name.clone()));
            }
            for (action, coord) in &player.inputs {
                if !coord.in_bounds() {
                    return Err(HudError::CoordOutOfRange {
                        player: player.name.clone(),
                        action: action.to_string(),
                        coord: *coord,
                    });
                }
            }
        }
        Ok(())
    }

    /// Bindings for player `index`, if the profile configures that many players.
    pub fn player(&self, index: usize) -> Option<&PlayerBindings> {
        self.players.get(index)
    }

    /// Built-in four-player layout: two keyboard players, two stick players.
    pub fn default_profile() -> Self {
        use KartAction::*;

        let p1 = PlayerBindings::new("Player 1")
            .with(Left, DeviceCoord::key(keys::LEFT))
            .with(Right, DeviceCoord::key(keys::RIGHT))
            .with(Accel, DeviceCoord::key(keys::UP))
            .with(Brake, DeviceCoord::key(keys::DOWN))
            .with(Wheelie, DeviceCoord::key(keys::RSHIFT))
            .with(Jump, DeviceCoord::key(keys::RETURN))
            .with(Rescue, DeviceCoord::key(keys::BACKSPACE))
            .with(Fire, DeviceCoord::key(keys::RCTRL));

        let p2 = PlayerBindings::new("Player 2")
            .with(Left, DeviceCoord::key(keys::A))
            .with(Right, DeviceCoord::key(keys::D))
            .with(Accel, DeviceCoord::key(keys::W))
            .with(Brake, DeviceCoord::key(keys::S))
            .with(Wheelie, DeviceCoord::key(keys::LSHIFT))
            .with(Jump, DeviceCoord::key(keys::TAB))
            .with(Rescue, DeviceCoord::key(keys::Q))
            .with(Fire, DeviceCoord::key(keys::LCTRL));

        let pad = |name: &str, stick: u16| {
            PlayerBindings::new(name)
                .with(Left, DeviceCoord::stick_axis(stick, 0, false))
                .with(Right, DeviceCoord::stick_axis(stick, 0, true))
                .with(Accel, DeviceCoord::stick_axis(stick, 1, false))
                .with(Brake, DeviceCoord::stick_axis(stick, 1, true))
                .with(Wheelie, DeviceCoord::stick_button(stick, 2))
                .with(Jump, DeviceCoord::stick_button(stick, 3))
                .with(Rescue, DeviceCoord::stick_button(stick, 4))
                .with(Fire, DeviceCoord::stick_button(stick, 0))
        };

        Self {
            name: "default".into(),
            description: Some("Arrow keys, WASD, and two joysticks".into()),
            players: vec![p1, p2, pad("Player 3", 0), pad("Player 4", 1)],
        }
    }
}
