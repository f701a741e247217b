//! Individual HUD widgets.
//!
//! Each function draws one widget through a [`Renderer`]. Per-player widgets take the
//! player's [`Viewport`]; positions are authored for the full screen and scaled by the
//! viewport ratios.

use crate::config::HudConfig;
use crate::entity::EntityId;
use crate::format::{lap_color, lap_counter, ordinal_suffix, time_to_string};
use crate::message::{MessageQueue, Rgb};
use crate::render::{Align, MaterialId, Rect, Renderer, TextStyle, Viewport};
use crate::world::{KartStatus, RaceView};

/// Textures owned by the HUD itself (kart icons come from [`KartStatus`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HudMaterials {
    pub steering_wheel: MaterialId,
    pub speed_back: MaterialId,
    pub speed_fore: MaterialId,
}

const ICON_WIDTH: i32 = 40;
const ICON_PLAYER_WIDTH: i32 = 50;
const MINIMAP_ORIGIN: (i32, i32) = (10, 10);
/// Seconds the split time stays next to a kart icon after crossing the line.
const SPLIT_DISPLAY_SECS: f32 = 5.0;
const MAX_COLLECTABLE_ICONS: u32 = 5;
/// m/s → km/h.
const KMH_PER_MS: f32 = 3.6;
const SPEEDOMETER_MAX_KMH: f32 = 110.0;

const METER_TOP: Rgb = Rgb::new(240, 0, 0);
const METER_BOTTOM: Rgb = Rgb::new(240, 200, 0);

fn scaled(size: f32, ratio: f32) -> u32 {
    (size * ratio).max(1.0) as u32
}

fn quad(x: i32, y: i32, w: i32, h: i32) -> [(i32, i32); 4] {
    [(x, y), (x + w, y), (x + w, y + h), (x, y + h)]
}

fn solid(r: &mut dyn Renderer, points: &[(i32, i32)], color: Rgb) {
    let colors = vec![color; points.len()];
    r.draw_filled_polygon(points, &colors);
}

/// Up to five copies of the held collectable's icon.
pub fn draw_collectables(r: &mut dyn Renderer, cfg: &HudConfig, vp: &Viewport, kart: &KartStatus) {
    let Some(icon) = kart.collectable_icon else {
        return;
    };
    let x1 = vp.x(cfg.width as f32 / 2.0 - 32.0);
    let y1 = vp.y(cfg.height as f32 * 5.0 / 6.0);
    let size = (64.0 * vp.min_ratio()) as i32;
    let n = kart.collectable_count.clamp(1, MAX_COLLECTABLE_ICONS) as i32;

    r.bind_material(icon, false);
    for i in 0..n {
        r.draw_textured_quad(icon, Rect::new(x1 + i * 30, y1, size, size), 0.0);
    }
}

fn frame(r: &mut dyn Renderer, x: i32, y: i32, w: i32, h: i32, wl: i32, color: Rgb) {
    solid(r, &quad(x - wl, y - wl, wl, h + 1 + wl), color);
    solid(r, &quad(x + w, y - wl, wl, h + 1 + wl), color);
    solid(r, &quad(x, y - wl, w, wl), color);
    solid(r, &quad(x, y + h, w, wl), color);
}

/// Vertical energy bar on the right edge: black/white double border, gradient fill.
pub fn draw_energy_meter(r: &mut dyn Renderer, cfg: &HudConfig, vp: &Viewport, kart: &KartStatus) {
    let state = kart.energy.clamp(0.0, 1.0);
    let x = vp.x(cfg.width as f32 - 24.0);
    let y = vp.y(250.0);
    let w = (16.0 * vp.ratio_x) as i32;
    let h = (cfg.height as f32 / 4.0 * vp.ratio_y) as i32;
    let wl = (vp.ratio_x as i32).max(1);

    frame(r, x - 1, y - 1, w, h, wl, Rgb::BLACK);
    frame(r, x, y, w, h, wl, Rgb::WHITE);

    let top = y + (state * h as f32) as i32;
    r.draw_filled_polygon(
        &[(x, y), (x + w, y), (x + w, top), (x, top)],
        &[METER_BOTTOM, METER_BOTTOM, METER_TOP, METER_TOP],
    );
}

/// Steering wheel icon, rotated up to 45° with the steer input.
pub fn draw_steering(r: &mut dyn Renderer, cfg: &HudConfig, vp: &Viewport, mats: &HudMaterials, kart: &KartStatus) {
    let size = (64.0 * vp.min_ratio()) as i32;
    let x = vp.x(cfg.width as f32 - 160.0) - size;
    let y = vp.y(6.0);
    let angle = 45.0 * kart.steer_percent;

    r.bind_material(mats.steering_wheel, true);
    r.draw_textured_quad(mats.steering_wheel, Rect::new(x, y, size, size), angle);
}

/// Large race position with its ordinal suffix.
pub fn draw_position(r: &mut dyn Renderer, cfg: &HudConfig, vp: &Viewport, kart: &KartStatus) {
    let x = vp.x(cfg.width as f32 - 110.0);
    let y = vp.y(140.0);
    r.draw_text(&kart.position.to_string(), x, y, TextStyle::shadowed(scaled(100.0, vp.ratio_y)));

    let sx = x + (50.0 * vp.ratio_x) as i32;
    let sy = y + (50.0 * vp.ratio_y) as i32;
    r.draw_text(
        ordinal_suffix(kart.position),
        sx,
        sy,
        TextStyle::shadowed(scaled(40.0, vp.ratio_y)),
    );
}

/// Fraction of the speedometer dial to fill, in `[0, 1]`.
pub fn speed_ratio(speed: f32) -> f32 {
    (speed * KMH_PER_MS / SPEEDOMETER_MAX_KMH).clamp(0.0, 1.0)
}

/// Speedometer dial with airborne, reverse and wheelie-speed markers.
pub fn draw_speed(r: &mut dyn Renderer, cfg: &HudConfig, vp: &Viewport, mats: &HudMaterials, kart: &KartStatus) {
    let min = vp.min_ratio();
    let size = (128.0 * min) as i32;
    let x = vp.x(cfg.width as f32 - 10.0) - size;
    let y = vp.y(10.0);
    let px = |v: f32| (v * min) as i32;

    r.bind_material(mats.speed_back, true);
    r.draw_textured_quad(mats.speed_back, Rect::new(x, y, size, size), 0.0);

    if !kart.on_ground {
        r.draw_text("!", x - px(30.0), y - px(10.0), TextStyle::shadowed(scaled(60.0, min)));
    }

    if kart.speed < 0.0 {
        r.draw_text("REV", x + px(40.0), y + px(10.0), TextStyle::shadowed(scaled(40.0, min)));
        return;
    }

    if kart.speed >= kart.max_speed * kart.wheelie_speed_ratio {
        r.draw_text("l", x + px(70.0), y, TextStyle::shadowed(scaled(60.0, min)));
        r.draw_text("^", x + px(65.0), y + px(7.0), TextStyle::shadowed(scaled(60.0, min)));
    }

    let ratio = speed_ratio(kart.speed);
    let mut points = vec![(x + size, y), (x, y)];
    if ratio < 0.5 {
        points.push((x, y + (size as f32 * ratio * 2.0) as i32));
    } else {
        points.push((x, y + size));
        points.push((x + (size as f32 * (ratio - 0.5) * 2.0) as i32, y + size));
    }
    r.bind_material(mats.speed_fore, true);
    solid(r, &points, Rgb::WHITE);
}

/// "Lap" over "n/N", or "Finished".
pub fn draw_lap(r: &mut dyn Renderer, vp: &Viewport, kart: &KartStatus, num_laps: i32) {
    let max = vp.max_ratio();
    let x = vp.offset_x + (120.0 * vp.ratio_x) as i32;
    let y = vp.offset_y + (50.0 * max) as i32;
    let style = TextStyle::shadowed(scaled(48.0, max));

    match lap_counter(kart.lap, num_laps) {
        None => r.draw_text("Finished", x, y, style),
        Some(counter) => {
            r.draw_text("Lap", x, y, style);
            r.draw_text(&counter, x, y - (50.0 * vp.ratio_y) as i32, style);
        }
    }
}

/// Messages visible to `viewer`, newest at the bottom. Returns how many were drawn.
pub fn draw_messages(
    r: &mut dyn Renderer,
    cfg: &HudConfig,
    vp: &Viewport,
    queue: &MessageQueue,
    viewer: Option<EntityId>,
) -> usize {
    let mut y = vp.y(cfg.height as f32 - 164.0);
    r.set_text_span(vp.offset_x, vp.offset_x + (cfg.width as f32 * vp.ratio_x) as i32);

    let mut drawn = 0;
    queue.for_each_visible(viewer, |m| {
        let size = scaled(m.font_size() as f32, vp.min_ratio());
        let style = TextStyle::plain(size)
            .color(m.color())
            .align(Align::CenterOfScreen, Align::Start);
        r.draw_text(m.text(), 0, y, style);
        // 20% of the font size between lines.
        y -= (size * 12 / 10) as i32;
        drawn += 1;
    });
    drawn
}

pub fn draw_timer(r: &mut dyn Renderer, cfg: &HudConfig, clock: f32) {
    r.draw_text(
        &time_to_string(clock),
        cfg.width as i32 - 260,
        cfg.height as i32 - 64,
        TextStyle::shadowed(60),
    );
}

/// Track overview plus one square per kart (player karts larger).
pub fn draw_minimap(r: &mut dyn Renderer, world: &dyn RaceView) {
    let (ox, oy) = MINIMAP_ORIGIN;
    r.draw_track_overview(ox, oy);
    for kart in world.karts() {
        let Some((mx, my)) = world.minimap_point(kart.id) else {
            continue;
        };
        let (x, y) = (ox + mx as i32, oy + my as i32);
        let points = if kart.player_controlled {
            quad(x - 2, y - 2, 5, 5)
        } else {
            quad(x - 1, y - 1, 3, 3)
        };
        solid(r, &points, kart.color);
    }
}

/// Leading lap count and the best time-at-lap among karts on that lap.
///
/// Not simply the kart in position 1: it may have been overtaken since crossing the line.
pub fn leader(karts: &[KartStatus]) -> Option<(i32, f32)> {
    karts.iter().fold(None, |best, k| match best {
        None => Some((k.lap, k.time_at_lap)),
        Some((laps, _)) if k.lap > laps => Some((k.lap, k.time_at_lap)),
        Some((laps, time)) if k.lap == laps => Some((laps, time.min(k.time_at_lap))),
        keep => keep,
    })
}

/// Split text next to a kart icon: lap time for the leader, `+gap` for everyone else.
///
/// Shown for a few seconds after crossing the line, and permanently while a lap behind.
/// Nothing is shown during the first lap.
pub fn split_label(kart: &KartStatus, leader: (i32, f32), clock: f32) -> Option<String> {
    let (leader_laps, leader_time) = leader;
    if leader_laps <= 0 {
        return None;
    }
    if clock - kart.time_at_lap >= SPLIT_DISPLAY_SECS && kart.lap == leader_laps {
        return None;
    }
    if kart.position == 1 {
        return Some(format!(" {}", time_to_string(kart.time_at_lap)));
    }
    let reference = if kart.lap == leader_laps { kart.time_at_lap } else { clock };
    Some(format!("+{}", time_to_string(reference - leader_time)))
}

/// Left-hand column of kart icons ordered by position, with split times.
pub fn draw_player_icons(r: &mut dyn Renderer, cfg: &HudConfig, world: &dyn RaceView) {
    let karts = world.karts();
    let Some(lead) = leader(karts) else {
        return;
    };
    let x = 5;
    let mut last_icon = None;

    for kart in karts {
        let y = cfg.height as i32 * 3 / 4 - 20 - (kart.position as i32 - 1) * (ICON_PLAYER_WIDTH + 2);

        if let Some(label) = split_label(kart, lead, world.clock()) {
            let style = TextStyle::shadowed(30).color(lap_color(kart.lap, world.num_laps()));
            r.draw_text(&label, ICON_PLAYER_WIDTH + x, y + 5, style);
        }

        // Re-binding the same material is a no-op for some backends unless forced.
        r.bind_material(kart.icon, last_icon == Some(kart.icon));
        last_icon = Some(kart.icon);
        let w = if kart.player_controlled { ICON_PLAYER_WIDTH } else { ICON_WIDTH };
        r.draw_textured_quad(kart.icon, Rect::new(x, y, w, w), 0.0);

        r.draw_text(&kart.position.to_string(), x - 7, y - 4, TextStyle::shadowed(33));
        r.draw_text(ordinal_suffix(kart.position), x + 10, y + 13, TextStyle::shadowed(13));
    }
}

pub fn draw_fps(r: &mut dyn Renderer, cfg: &HudConfig, text: &str) {
    r.draw_text(text, 0, cfg.height as i32 - 50, TextStyle::shadowed(48));
}
