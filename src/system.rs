//! System-level keyboard commands.
//!
//! Keyboard events that no player binding claims fall through to a small fixed
//! command set (pause, toggles, saving the replay). Non-keyboard events never do.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::event::keys;

/// A global command reachable from the keyboard during a race.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SystemCommand {
    /// Pause and open the in-race menu.
    Pause,
    ToggleFps,
    ToggleWireframe,
    /// Toggle fullscreen, then pause like [`SystemCommand::Pause`].
    ToggleFullscreen,
    SaveReplay,
    /// Hand the single player a missile (testing aid).
    DebugGiveMissile,
}

/// Sink for the race history/replay.
pub trait ReplaySink {
    fn save(&mut self);
}

/// Host services the HUD needs from the game shell.
pub trait Platform {
    /// Freeze the simulation.
    fn pause_race(&mut self);
    fn open_race_menu(&mut self);
    fn toggle_fullscreen(&mut self);
    fn set_wireframe(&mut self, on: bool);
    fn set_cursor_visible(&mut self, visible: bool);
    /// Give the only player kart a missile.
    fn give_debug_missile(&mut self);
    fn history(&mut self) -> &mut dyn ReplaySink;
}

/// One keymap row as written in config files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyCommand {
    pub key: u16,
    pub command: SystemCommand,
}

/// Key code → system command table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<KeyCommand>", into = "Vec<KeyCommand>")]
pub struct SystemKeymap {
    keys: BTreeMap<u16, SystemCommand>,
}

impl From<Vec<KeyCommand>> for SystemKeymap {
    fn from(rows: Vec<KeyCommand>) -> Self {
        Self {
            keys: rows.into_iter().map(|r| (r.key, r.command)).collect(),
        }
    }
}

impl From<SystemKeymap> for Vec<KeyCommand> {
    fn from(map: SystemKeymap) -> Self {
        map.keys
            .into_iter()
            .map(|(key, command)| KeyCommand { key, command })
            .collect()
    }
}

impl Default for SystemKeymap {
    fn default() -> Self {
        let mut keymap = Self::empty();
        keymap.set(keys::ESCAPE, SystemCommand::Pause);
        keymap.set(keys::F12, SystemCommand::ToggleFps);
        keymap.set(keys::F11, SystemCommand::ToggleWireframe);
        keymap.set(keys::F9, SystemCommand::ToggleFullscreen);
        keymap.set(keys::F10, SystemCommand::SaveReplay);
        keymap.set(keys::F7, SystemCommand::DebugGiveMissile);
        keymap
    }
}

impl SystemKeymap {
    pub fn empty() -> Self {
        Self { keys: BTreeMap::new() }
    }

    pub fn set(&mut self, key: u16, command: SystemCommand) {
        self.keys.insert(key, command);
    }

    pub fn command(&self, key: u16) -> Option<SystemCommand> {
        self.keys.get(&key).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_keymap() {
        let km = SystemKeymap::default();
        assert_eq!(km.command(keys::ESCAPE), Some(SystemCommand::Pause));
        assert_eq!(km.command(keys::F10), Some(SystemCommand::SaveReplay));
        assert_eq!(km.command(keys::LEFT), None);
    }

    #[test]
    fn keymap_round_trips_through_json() {
        let km = SystemKeymap::default();
        let json = serde_json::to_string(&km).unwrap();
        assert!(json.contains("{\"key\":27,\"command\":\"pause\"}"));
        let back: SystemKeymap = serde_json::from_str(&json).unwrap();
        assert_eq!(back, km);
    }
}
