//! racehud — in-race heads-up display core.
//!
//! Routes raw device events to the player karts that own them, falls back to
//! system keyboard commands, and keeps a queue of timed on-screen messages.
//! Drawing goes through the [`Renderer`] trait; race state is read through
//! [`RaceView`].

pub mod backends;
pub mod binding;
pub mod config;
pub mod device;
pub mod entity;
pub mod error;
pub mod event;
pub mod format;
pub mod gauges;
pub mod hud;
pub mod message;
pub mod render;
pub mod router;
pub mod system;
pub mod world;

pub use binding::*;
pub use config::HudConfig;
pub use device::*;
pub use entity::*;
pub use error::{HudError, Result};
pub use event::*;
pub use hud::*;
pub use message::*;
pub use render::*;
pub use router::*;
pub use system::*;
pub use world::*;
