//! Device events and coordinates.
//!
//! The platform layer reports every physical input change as a [`DeviceEvent`]: a
//! [`DeviceCoord`] naming the source plus an integer value.
//!
//! ## Coordinate conventions
//! - **Keyboard:** `id0` = key code, `id1 = id2 = 0`.
//! - **Stick motion:** `id0` = stick index, `id1` = axis, `id2` = direction (`0` = negative, `1` = positive).
//! - **Stick button:** `id0` = stick index, `id1` = button, `id2 = 0`.
//! - **Stick hat:** `id0` = stick index, `id1` = hat, `id2` = direction.
//! - **Mouse motion / button:** `id0` = axis or button, `id1`/`id2` as for sticks.
//!
//! Every component is bounded by a compile-time constant ([`MAX_ID0`], [`MAX_ID1`],
//! [`MAX_ID2`]). The platform layer is expected to never emit anything outside those
//! bounds; see [`DeviceCoord::in_bounds`].
//!
//! ## Value conventions
//! - Buttons and keys: non-zero = pressed, `0` = released.
//! - Axes: magnitude in device units (the kart decides how to scale it).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Exclusive upper bound for `id0` (key codes, device instances).
pub const MAX_ID0: usize = 512;
/// Exclusive upper bound for `id1` (axes, buttons, hats).
pub const MAX_ID1: usize = 16;
/// Exclusive upper bound for `id2` (axis direction).
pub const MAX_ID2: usize = 2;

/// Category of a physical input source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputType {
    Keyboard,
    StickMotion,
    StickButton,
    StickHat,
    MouseMotion,
    MouseButton,
}

impl InputType {
    /// Number of input types; first dimension of the routing table.
    pub const COUNT: usize = 6;

    pub const ALL: [InputType; Self::COUNT] = [
        InputType::Keyboard,
        InputType::StickMotion,
        InputType::StickButton,
        InputType::StickHat,
        InputType::MouseMotion,
        InputType::MouseButton,
    ];

    /// Dense index in `0..COUNT`.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            InputType::Keyboard => "keyboard",
            InputType::StickMotion => "stick_motion",
            InputType::StickButton => "stick_button",
            InputType::StickHat => "stick_hat",
            InputType::MouseMotion => "mouse_motion",
            InputType::MouseButton => "mouse_button",
        }
    }
}

/// Identifies one physical input source: `(type, id0, id1, id2)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeviceCoord {
    pub kind: InputType,
    pub id0: u16,
    #[serde(default)]
    pub id1: u8,
    #[serde(default)]
    pub id2: u8,
}

impl DeviceCoord {
    pub const fn new(kind: InputType, id0: u16, id1: u8, id2: u8) -> Self {
        Self { kind, id0, id1, id2 }
    }

    pub const fn key(code: u16) -> Self {
        Self::new(InputType::Keyboard, code, 0, 0)
    }

    /// `positive` selects the axis half (`id2 = 1`).
    pub const fn stick_axis(stick: u16, axis: u8, positive: bool) -> Self {
        Self::new(InputType::StickMotion, stick, axis, positive as u8)
    }

    pub const fn stick_button(stick: u16, button: u8) -> Self {
        Self::new(InputType::StickButton, stick, button, 0)
    }

    pub const fn stick_hat(stick: u16, hat: u8, direction: u8) -> Self {
        Self::new(InputType::StickHat, stick, hat, direction)
    }

    pub const fn mouse_axis(axis: u16, positive: bool) -> Self {
        Self::new(InputType::MouseMotion, axis, 0, positive as u8)
    }

    pub const fn mouse_button(button: u16) -> Self {
        Self::new(InputType::MouseButton, button, 0, 0)
    }

    /// `true` when every component lies within the fixed table bounds.
    #[inline]
    pub const fn in_bounds(&self) -> bool {
        (self.id0 as usize) < MAX_ID0 && (self.id1 as usize) < MAX_ID1 && (self.id2 as usize) < MAX_ID2
    }
}

impl fmt::Display for DeviceCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({},{},{})", self.kind.as_str(), self.id0, self.id1, self.id2)
    }
}

/// One input change reported by the platform layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceEvent {
    pub coord: DeviceCoord,
    pub value: i32,
}

impl DeviceEvent {
    pub const fn new(coord: DeviceCoord, value: i32) -> Self {
        Self { coord, value }
    }

    #[inline]
    pub fn kind(&self) -> InputType {
        self.coord.kind
    }

    /// Button/key semantics: any non-zero value counts as pressed.
    #[inline]
    pub fn is_press(&self) -> bool {
        self.value != 0
    }
}

/// Keyboard codes used by the default bindings and the system keymap.
///
/// Values follow the classic SDL 1.2 keysym table so they fit below [`MAX_ID0`].
pub mod keys {
    pub const BACKSPACE: u16 = 8;
    pub const TAB: u16 = 9;
    pub const RETURN: u16 = 13;
    pub const ESCAPE: u16 = 27;
    pub const SPACE: u16 = 32;
    pub const A: u16 = 97;
    pub const D: u16 = 100;
    pub const Q: u16 = 113;
    pub const S: u16 = 115;
    pub const W: u16 = 119;
    pub const X: u16 = 120;
    pub const UP: u16 = 273;
    pub const DOWN: u16 = 274;
    pub const RIGHT: u16 = 275;
    pub const LEFT: u16 = 276;
    pub const F7: u16 = 288;
    pub const F9: u16 = 290;
    pub const F10: u16 = 291;
    pub const F11: u16 = 292;
    pub const F12: u16 = 293;
    pub const RSHIFT: u16 = 303;
    pub const LSHIFT: u16 = 304;
    pub const RCTRL: u16 = 305;
    pub const LCTRL: u16 = 306;
}
