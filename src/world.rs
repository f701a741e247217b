//! Read-only view of the race simulation.
//!
//! The HUD never owns or mutates race state. Everything it draws comes through
//! [`RaceView`], which the simulation implements.

use crate::entity::EntityId;
use crate::message::Rgb;
use crate::render::MaterialId;

/// Coarse race phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RacePhase {
    /// Karts placed, countdown not started.
    Setup,
    /// Ready/Set/Go countdown running.
    Start,
    Race,
    /// At least one player finished; others still driving.
    DelayFinish,
    Finish,
}

impl RacePhase {
    /// Phases in which per-player gauges, timer and minimap are drawn.
    pub fn is_racing(self) -> bool {
        matches!(self, RacePhase::Race | RacePhase::DelayFinish)
    }
}

/// Countdown stage shown in the center of the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Countdown {
    Ready,
    Set,
    Go,
}

/// Per-kart values the HUD reads each frame.
#[derive(Debug, Clone, PartialEq)]
pub struct KartStatus {
    pub id: EntityId,
    /// Race position, 1-based.
    pub position: u32,
    /// Completed laps; `-1` before crossing the start line the first time.
    pub lap: i32,
    /// Race clock value when the last lap was completed.
    pub time_at_lap: f32,
    /// Forward speed in world units per second (negative when reversing).
    pub speed: f32,
    pub max_speed: f32,
    pub wheelie_speed_ratio: f32,
    /// Steering in `[-1, 1]`.
    pub steer_percent: f32,
    pub on_ground: bool,
    /// Energy meter fill in `[0, 1]`.
    pub energy: f32,
    pub collectable_count: u32,
    /// Icon of the held collectable, `None` when empty-handed.
    pub collectable_icon: Option<MaterialId>,
    pub icon: MaterialId,
    pub color: Rgb,
    /// Drawn larger on the minimap and the position column.
    pub player_controlled: bool,
    pub early_start_penalty: bool,
}

/// Simulation accessor injected into the HUD.
pub trait RaceView {
    fn phase(&self) -> RacePhase;

    /// Current countdown stage, if one is showing.
    fn countdown(&self) -> Option<Countdown>;

    /// Race clock in seconds.
    fn clock(&self) -> f32;

    fn num_laps(&self) -> i32;

    fn num_players(&self) -> usize;

    /// Kart driven by player `index`.
    fn player_kart(&self, index: usize) -> Option<EntityId>;

    /// Every kart in the race, players and AI.
    fn karts(&self) -> &[KartStatus];

    fn kart(&self, id: EntityId) -> Option<&KartStatus> {
        self.karts().iter().find(|k| k.id == id)
    }

    /// Debug lines the simulation wants on screen.
    fn debug_text(&self) -> &[String] {
        &[]
    }

    /// Minimap position of a kart, in screen pixels relative to the map origin.
    fn minimap_point(&self, id: EntityId) -> Option<(f32, f32)>;
}
