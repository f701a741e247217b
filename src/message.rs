//! Timed on-screen messages.
//!
//! [`MessageQueue`] owns every pending [`TimedMessage`]. Callers add messages and read
//! them back through [`MessageQueue::visible`]; only the queue itself mutates them.
//!
//! ## Frame order
//! 1. [`MessageQueue::advance`] decays timed messages by the frame delta.
//! 2. The renderer walks [`MessageQueue::visible`] once per viewport.
//! 3. [`MessageQueue::end_render_pass`] marks one-shot messages as shown.
//! 4. [`MessageQueue::cleanup`] drops everything that is done.
//!
//! ## One-shot messages
//! A negative duration makes a message one-shot: it is visible for exactly one render
//! pass, however many viewports that pass draws. Its `done()` flips only when
//! `end_render_pass` runs, so an out-of-order `cleanup` can never drop it unseen.
//!
//! ## Ordering
//! `visible` yields newest first (reverse insertion). Renderers lay lines out upward
//! from a baseline, so chained `add_message` calls read top-to-bottom in call order.

use crate::entity::EntityId;
use serde::{Deserialize, Serialize};

/// 8-bit RGB text color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const RED: Rgb = Rgb::new(255, 0, 0);
    pub const GREEN: Rgb = Rgb::new(0, 255, 0);
    pub const YELLOW: Rgb = Rgb::new(255, 255, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// A queued HUD message.
#[derive(Debug, Clone, PartialEq)]
pub struct TimedMessage {
    text: String,
    owner: Option<EntityId>,
    remaining: f32,
    one_shot: bool,
    shown: bool,
    font_size: u32,
    color: Rgb,
}

impl TimedMessage {
    fn new(text: String, owner: Option<EntityId>, duration: f32, font_size: u32, color: Rgb) -> Self {
        // NaN never expires, so it is treated as show-once.
        let duration = if duration.is_nan() { -1.0 } else { duration };
        Self {
            text,
            owner,
            remaining: duration,
            one_shot: duration < 0.0,
            shown: false,
            font_size,
            color,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Kart the message is addressed to; `None` = broadcast.
    pub fn owner(&self) -> Option<EntityId> {
        self.owner
    }

    /// Seconds left. Negative for one-shot messages.
    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    pub fn font_size(&self) -> u32 {
        self.font_size
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn is_one_shot(&self) -> bool {
        self.one_shot
    }

    /// Expired (timed) or already rendered once (one-shot).
    pub fn done(&self) -> bool {
        if self.one_shot {
            self.shown
        } else {
            self.remaining <= 0.0
        }
    }

    /// Whether `viewer` should see this message.
    #[inline]
    pub fn visible_to(&self, viewer: Option<EntityId>) -> bool {
        match self.owner {
            None => true,
            Some(owner) => viewer == Some(owner),
        }
    }
}

/// Insertion-ordered collection of timed messages.
#[derive(Debug, Default, Clone)]
pub struct MessageQueue {
    messages: Vec<TimedMessage>,
}

impl MessageQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a message for `duration` seconds (`< 0` or NaN = show once).
    ///
    /// `owner = None` broadcasts to every viewport.
    pub fn add_message(
        &mut self,
        text: impl Into<String>,
        owner: Option<EntityId>,
        duration: f32,
        font_size: u32,
        color: Rgb,
    ) {
        let msg = TimedMessage::new(text.into(), owner, duration, font_size, color);
        tracing::trace!(text = %msg.text, owner = ?owner, duration, "message queued");
        self.messages.push(msg);
    }

    /// Decay every timed message by `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        for msg in self.messages.iter_mut().filter(|m| !m.one_shot && m.remaining > 0.0) {
            msg.remaining -= dt;
        }
    }

    /// Messages `viewer` can see, newest first.
    pub fn visible(&self, viewer: Option<EntityId>) -> impl Iterator<Item = &TimedMessage> + '_ {
        self.messages.iter().rev().filter(move |m| m.visible_to(viewer))
    }

    /// Callback form of [`MessageQueue::visible`].
    pub fn for_each_visible<F>(&self, viewer: Option<EntityId>, f: F)
    where
        F: FnMut(&TimedMessage),
    {
        self.visible(viewer).for_each(f);
    }

    /// Close the current render pass: every pending one-shot message counts as shown.
    ///
    /// This includes one-shots whose owner had no viewport in the pass; they are
    /// dropped unseen rather than kept waiting for a viewport that may never exist.
    pub fn end_render_pass(&mut self) {
        for msg in self.messages.iter_mut().filter(|m| m.one_shot) {
            msg.shown = true;
        }
    }

    /// Drop every message that is done. Returns how many were removed.
    pub fn cleanup(&mut self) -> usize {
        let before = self.messages.len();
        self.messages.retain(|m| !m.done());
        before - self.messages.len()
    }

    /// Drop every message addressed to `entity`.
    pub fn forget_owner(&mut self, entity: EntityId) -> usize {
        let before = self.messages.len();
        self.messages.retain(|m| m.owner != Some(entity));
        before - self.messages.len()
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// All messages in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &TimedMessage> + '_ {
        self.messages.iter()
    }
}
