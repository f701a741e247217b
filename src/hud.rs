//! Per-race HUD: input routing, message queue and the frame sequence.
//!
//! [`RaceHud`] lives for exactly one race. It owns the [`InputRouter`] and the
//! [`MessageQueue`]; the simulation, the renderer and the host platform are passed in
//! per call and never stored.
//!
//! # Frame sequence
//! ```text
//! pump/input  →  update(dt):  advance messages → draw → end render pass → cleanup
//! ```
//!
//! # Example
//! ```ignore
//! let mut hud = RaceHud::new(config, materials, &mut platform);
//! hud.rebuild_bindings(&world, &profile);
//! loop {
//!     hud.pump(&mut device, &mut karts, &mut platform);
//!     hud.update(dt, &world, &mut renderer);
//! }
//! hud.finish(&mut platform);
//! ```

use crate::binding::BindingProfile;
use crate::config::HudConfig;
use crate::device::EventSource;
use crate::entity::{EntityId, KartControls};
use crate::event::{DeviceEvent, InputType};
use crate::gauges::{self, HudMaterials};
use crate::message::{MessageQueue, Rgb};
use crate::render::{Align, Renderer, TextStyle, Viewport};
use crate::router::{InputRouter, PlayerSlot};
use crate::system::{Platform, SystemCommand};
use crate::world::{Countdown, RacePhase, RaceView};

/// Frames between frame-rate recomputations.
const FPS_SAMPLE_FRAMES: u32 = 50;
const MAX_DEBUG_LINES: usize = 10;

/// What happened to one device event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    /// Delivered to a player kart.
    Routed,
    /// Unbound keyboard press that triggered a system command.
    System(SystemCommand),
    /// Unbound and not a system command (or a non-keyboard event).
    Ignored,
}

/// Frame-rate counter refreshed every [`FPS_SAMPLE_FRAMES`] frames.
#[derive(Debug, Clone, Default)]
pub struct FpsCounter {
    frames: u32,
    elapsed: f32,
    text: String,
}

impl FpsCounter {
    pub fn reset(&mut self) {
        self.frames = 0;
        self.elapsed = 0.0;
    }

    /// Count one frame of `dt` seconds; returns the current label.
    pub fn tick(&mut self, dt: f32) -> &str {
        self.frames += 1;
        self.elapsed += dt;
        if self.frames >= FPS_SAMPLE_FRAMES {
            if self.elapsed > 0.0 {
                self.text = format!("{}", (self.frames as f32 / self.elapsed) as u32);
            }
            self.reset();
        }
        &self.text
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

pub struct RaceHud {
    config: HudConfig,
    materials: HudMaterials,
    router: InputRouter,
    messages: MessageQueue,
    fps: FpsCounter,
    wireframe: bool,
    players: usize,
    game_over_timer: f32,
}

impl RaceHud {
    /// Create the HUD for a new race. Hides the host cursor in fullscreen mode.
    pub fn new(config: HudConfig, materials: HudMaterials, platform: &mut dyn Platform) -> Self {
        if config.fullscreen {
            platform.set_cursor_visible(false);
        }
        Self {
            config,
            materials,
            router: InputRouter::new(),
            messages: MessageQueue::new(),
            fps: FpsCounter::default(),
            wireframe: false,
            players: 0,
            game_over_timer: 0.0,
        }
    }

    /// Tear down at race end; restores the cursor hidden by [`RaceHud::new`].
    pub fn finish(self, platform: &mut dyn Platform) {
        if self.config.fullscreen {
            platform.set_cursor_visible(true);
        }
        tracing::debug!(pending_messages = self.messages.len(), "race HUD torn down");
    }

    pub fn config(&self) -> &HudConfig {
        &self.config
    }

    pub fn router(&self) -> &InputRouter {
        &self.router
    }

    pub fn messages(&self) -> &MessageQueue {
        &self.messages
    }

    /// Rebuild the routing table from the world's player karts and `profile`.
    ///
    /// Player `i` drives `world.player_kart(i)` with `profile.player(i)`. Call whenever
    /// the player count changes. No-op in profile mode. Returns the number of players bound.
    pub fn rebuild_bindings(&mut self, world: &dyn RaceView, profile: &BindingProfile) -> usize {
        self.players = world.num_players();
        if self.config.profile_mode {
            self.router.clear();
            return 0;
        }

        let mut slots = Vec::with_capacity(self.players);
        for index in 0..self.players {
            match (world.player_kart(index), profile.player(index)) {
                (Some(entity), Some(bindings)) => slots.push(PlayerSlot { entity, bindings }),
                (None, _) => tracing::warn!(index, "world has no kart for player"),
                (_, None) => tracing::warn!(index, profile = %profile.name, "profile has no bindings for player"),
            }
        }
        self.router.rebuild(&slots);
        slots.len()
    }

    /// Route one device event.
    ///
    /// Player bindings win. An unbound keyboard press falls back to the system keymap;
    /// everything else unbound is dropped.
    pub fn input(
        &mut self,
        event: &DeviceEvent,
        karts: &mut dyn KartControls,
        platform: &mut dyn Platform,
    ) -> InputOutcome {
        if self.router.dispatch(event, karts) {
            return InputOutcome::Routed;
        }
        if event.kind() != InputType::Keyboard || !event.is_press() {
            return InputOutcome::Ignored;
        }
        match self.config.keymap.command(event.coord.id0) {
            Some(command) => {
                self.run_command(command, platform);
                InputOutcome::System(command)
            }
            None => InputOutcome::Ignored,
        }
    }

    /// Drain `source` through [`RaceHud::input`]. Returns how many events were routed to karts.
    pub fn pump(
        &mut self,
        source: &mut dyn EventSource,
        karts: &mut dyn KartControls,
        platform: &mut dyn Platform,
    ) -> usize {
        source
            .poll()
            .iter()
            .filter(|ev| self.input(ev, karts, platform) == InputOutcome::Routed)
            .count()
    }

    fn run_command(&mut self, command: SystemCommand, platform: &mut dyn Platform) {
        tracing::debug!(?command, "system command");
        match command {
            SystemCommand::Pause => {
                platform.pause_race();
                platform.open_race_menu();
            }
            SystemCommand::ToggleFps => {
                self.config.display_fps = !self.config.display_fps;
                if self.config.display_fps {
                    self.fps.reset();
                }
            }
            SystemCommand::ToggleWireframe => {
                self.wireframe = !self.wireframe;
                platform.set_wireframe(self.wireframe);
            }
            SystemCommand::ToggleFullscreen => {
                platform.toggle_fullscreen();
                platform.pause_race();
                platform.open_race_menu();
            }
            SystemCommand::SaveReplay => platform.history().save(),
            SystemCommand::DebugGiveMissile => {
                if self.players == 1 {
                    platform.give_debug_missile();
                }
            }
        }
    }

    /// Queue a HUD message (`duration < 0` = show once). See [`MessageQueue::add_message`].
    ///
    /// A show-once message addressed to a kart without a viewport (an AI kart, or a
    /// player the world cannot resolve) is discarded after the next racing frame
    /// without being drawn.
    pub fn add_message(
        &mut self,
        text: impl Into<String>,
        owner: Option<EntityId>,
        duration: f32,
        font_size: u32,
        color: Rgb,
    ) {
        self.messages.add_message(text, owner, duration, font_size, color);
    }

    /// Drop every binding and message referring to a kart that left the race.
    pub fn forget_entity(&mut self, entity: EntityId) {
        self.router.forget(entity);
        self.messages.forget_owner(entity);
    }

    /// Advance, draw and clean up one frame.
    pub fn update(&mut self, dt: f32, world: &dyn RaceView, renderer: &mut dyn Renderer) {
        self.messages.advance(dt);
        let drew_messages = self.draw_status_text(dt, world, renderer);
        // One-shot messages only count as shown once a racing frame actually drew them.
        if drew_messages {
            self.messages.end_render_pass();
        }
        let removed = self.messages.cleanup();
        if removed > 0 {
            tracing::trace!(removed, remaining = self.messages.len(), "expired messages cleaned up");
        }
    }

    /// Returns whether the message pass ran this frame.
    fn draw_status_text(&mut self, dt: f32, world: &dyn RaceView, r: &mut dyn Renderer) -> bool {
        let fps_text = if self.config.display_fps {
            Some(self.fps.tick(dt).to_string())
        } else {
            None
        };

        if let Some(stage) = world.countdown() {
            let (text, color) = match stage {
                Countdown::Ready => ("Ready!", Rgb::new(230, 170, 160)),
                Countdown::Set => ("Set!", Rgb::new(230, 230, 160)),
                Countdown::Go => ("Go!", Rgb::new(100, 210, 100)),
            };
            let style = TextStyle::shadowed(90)
                .color(color)
                .align(Align::CenterOfScreen, Align::CenterOfScreen);
            r.draw_text(text, 0, 0, style);
        }

        for (i, line) in world.debug_text().iter().take(MAX_DEBUG_LINES).enumerate() {
            if !line.is_empty() {
                let style = TextStyle::plain(20).color(Rgb::new(100, 210, 100));
                r.draw_text(line, 20, 200 - i as i32 * 20, style);
            }
        }

        let phase = world.phase();
        if phase == RacePhase::Start && self.any_penalty(world) {
            let style = TextStyle::shadowed(80)
                .color(Rgb::new(200, 10, 10))
                .align(Align::CenterOfScreen, Align::Start);
            r.draw_text("Penalty time!!", 0, 200, style);
        }

        if phase == RacePhase::Finish {
            self.draw_game_over(dt, world, r);
        }

        if !phase.is_racing() {
            return false;
        }

        let cfg = &self.config;
        let players = world.num_players();
        for index in 0..players {
            let Some(kart) = world.player_kart(index).and_then(|id| world.kart(id)) else {
                continue;
            };
            let vp = Viewport::split(players, index, cfg.width, cfg.height);
            gauges::draw_collectables(r, cfg, &vp, kart);
            gauges::draw_energy_meter(r, cfg, &vp, kart);
            gauges::draw_steering(r, cfg, &vp, &self.materials, kart);
            gauges::draw_position(r, cfg, &vp, kart);
            gauges::draw_speed(r, cfg, &vp, &self.materials, kart);
            gauges::draw_lap(r, &vp, kart, world.num_laps());
            gauges::draw_messages(r, cfg, &vp, &self.messages, Some(kart.id));
        }
        gauges::draw_timer(r, cfg, world.clock());
        gauges::draw_minimap(r, world);
        if let Some(text) = fps_text {
            gauges::draw_fps(r, cfg, &text);
        }
        gauges::draw_player_icons(r, cfg, world);
        true
    }

    fn any_penalty(&self, world: &dyn RaceView) -> bool {
        (0..world.num_players())
            .filter_map(|i| world.player_kart(i).and_then(|id| world.kart(id)))
            .any(|k| k.early_start_penalty)
    }

    fn draw_game_over(&mut self, dt: f32, world: &dyn RaceView, r: &mut dyn Renderer) {
        let t = self.game_over_timer;
        let pulse = |period: f32| (255.0 * ((t / period).sin() / 2.0 + 0.5)) as u8;
        let color = Rgb::new(pulse(5.1), pulse(6.3), pulse(7.2));
        self.game_over_timer += dt;

        let Some(kart) = world.player_kart(0).and_then(|id| world.kart(id)) else {
            return;
        };
        let style = TextStyle::shadowed(64).color(color);
        if kart.position > 1 {
            let text = format!(
                "YOU FINISHED {}{}",
                kart.position,
                crate::format::ordinal_suffix(kart.position)
            );
            r.draw_text(&text, 130, 300, style);
        } else {
            r.draw_text("CONGRATULATIONS", 130, 300, style);
            r.draw_text("YOU WON THE RACE!", 130, 210, style);
        }
    }
}
