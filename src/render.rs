//! Draw primitives consumed by the HUD.
//!
//! The HUD describes *what* to draw; a [`Renderer`] implementation owns fonts,
//! textures and the graphics API. Screen coordinates are in pixels with the
//! origin at the bottom-left corner.

use crate::message::Rgb;

/// Opaque handle to a texture/material owned by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaterialId(pub u32);

/// Per-axis text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    /// Coordinate is the left/bottom edge of the text.
    #[default]
    Start,
    /// Coordinate is ignored; text is centered in the current viewport.
    CenterOfScreen,
    /// Coordinate is the right/top edge of the text.
    End,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size: u32,
    pub color: Rgb,
    pub halign: Align,
    pub valign: Align,
    pub shadow: bool,
}

impl TextStyle {
    /// Left/bottom aligned shadowed white text.
    pub fn shadowed(size: u32) -> Self {
        Self {
            size,
            color: Rgb::WHITE,
            halign: Align::Start,
            valign: Align::Start,
            shadow: true,
        }
    }

    pub fn plain(size: u32) -> Self {
        Self {
            shadow: false,
            ..Self::shadowed(size)
        }
    }

    pub fn color(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }

    pub fn align(mut self, halign: Align, valign: Align) -> Self {
        self.halign = halign;
        self.valign = valign;
        self
    }
}

/// Axis-aligned pixel rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }
}

/// Drawing backend for the HUD.
pub trait Renderer {
    fn draw_text(&mut self, text: &str, x: i32, y: i32, style: TextStyle);

    /// Textured quad; `rotation_deg` rotates around the rect center.
    fn draw_textured_quad(&mut self, material: MaterialId, rect: Rect, rotation_deg: f32);

    /// Filled convex polygon, one color per vertex.
    fn draw_filled_polygon(&mut self, points: &[(i32, i32)], colors: &[Rgb]);

    /// Make `material` current. `force` re-applies state even if it is already bound
    /// (needed when the same icon is drawn several times in a row).
    fn bind_material(&mut self, material: MaterialId, force: bool);

    /// Restrict `Align::CenterOfScreen` text to a horizontal span. Default: no-op.
    fn set_text_span(&mut self, _x_min: i32, _x_max: i32) {}

    /// Draw the track's 2D overview with its origin at `(x, y)`. Default: no-op.
    fn draw_track_overview(&mut self, _x: i32, _y: i32) {}
}

/// One split-screen region: pixel offset plus scale relative to the full screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub offset_x: i32,
    pub offset_y: i32,
    pub ratio_x: f32,
    pub ratio_y: f32,
}

impl Viewport {
    pub const FULL: Viewport = Viewport {
        offset_x: 0,
        offset_y: 0,
        ratio_x: 1.0,
        ratio_y: 1.0,
    };

    /// Region for player `index` of `players` on a `width`×`height` screen.
    ///
    /// One player gets the whole screen; two split top/bottom (player 0 on top);
    /// three or four use quadrants (0 top-left, 1 top-right, 2 bottom-left, 3 bottom-right).
    pub fn split(players: usize, index: usize, width: u32, height: u32) -> Self {
        let (w, h) = (width as i32, height as i32);
        match players {
            0 | 1 => Self::FULL,
            2 => Viewport {
                offset_x: 0,
                offset_y: if index == 0 { h / 2 } else { 0 },
                ratio_x: 1.0,
                ratio_y: 0.5,
            },
            _ => Viewport {
                offset_x: if index % 2 == 1 { w / 2 } else { 0 },
                offset_y: if index < 2 { h / 2 } else { 0 },
                ratio_x: 0.5,
                ratio_y: 0.5,
            },
        }
    }

    /// Scale an x distance and shift into the viewport.
    #[inline]
    pub fn x(&self, px: f32) -> i32 {
        (px * self.ratio_x) as i32 + self.offset_x
    }

    #[inline]
    pub fn y(&self, px: f32) -> i32 {
        (px * self.ratio_y) as i32 + self.offset_y
    }

    pub fn min_ratio(&self) -> f32 {
        self.ratio_x.min(self.ratio_y)
    }

    pub fn max_ratio(&self) -> f32 {
        self.ratio_x.max(self.ratio_y)
    }
}
