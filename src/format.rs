//! Text helpers for HUD labels.

use crate::message::Rgb;

/// `M:SS:CC` (minutes, seconds, hundredths). Negative times clamp to zero.
pub fn time_to_string(seconds: f32) -> String {
    let centis = (seconds.max(0.0) * 100.0).floor() as u64;
    let min = centis / 6000;
    let sec = (centis / 100) % 60;
    let cc = centis % 100;
    format!("{min}:{sec:02}:{cc:02}")
}

/// English ordinal suffix for a race position.
pub fn ordinal_suffix(position: u32) -> &'static str {
    match (position % 10, position % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

/// `None` once the kart has finished, otherwise `"{current}/{total}"`.
pub fn lap_counter(lap: i32, num_laps: i32) -> Option<String> {
    if lap >= num_laps {
        return None;
    }
    let current = if lap < 0 { 0 } else { lap + 1 };
    Some(format!("{current}/{num_laps}"))
}

/// Position-column color: green when finished, fading from white to red as laps go by.
pub fn lap_color(lap: i32, num_laps: i32) -> Rgb {
    if lap >= num_laps {
        return Rgb::GREEN;
    }
    if lap >= 0 && num_laps > 1 {
        let fade = 255 - (lap as f32 / (num_laps as f32 - 1.0) * 255.0) as i32;
        let fade = fade.clamp(0, 255) as u8;
        return Rgb::new(255, fade, fade);
    }
    Rgb::WHITE
}
