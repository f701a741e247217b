//! Stable entity handles with liveness.
//!
//! Routing-table entries and HUD messages refer to karts by [`EntityId`], never by
//! reference. An id pairs a slot index with a generation; despawning a kart bumps the
//! slot's generation, so any stale id still held by the router or the message queue
//! is observably dead and gets skipped instead of acted upon.

use crate::binding::KartAction;
use std::fmt;

/// Generational handle to a kart (player- or AI-driven).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId {
    pub index: u32,
    pub generation: u32,
}

impl EntityId {
    pub const fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.index, self.generation)
    }
}

/// Receiver of routed kart actions.
///
/// Implemented by whatever owns the karts (the world/simulation side). The router
/// only ever reaches karts through this trait.
pub trait KartControls {
    /// Whether `id` still refers to a live kart.
    fn is_alive(&self, id: EntityId) -> bool;

    /// Apply a logical action to the kart. `value` is the raw device value.
    fn action(&mut self, id: EntityId, action: KartAction, value: i32);
}

#[derive(Debug, Clone, Copy)]
struct Slot {
    generation: u32,
    alive: bool,
}

/// Generational slot registry.
///
/// Freed slots are reused (LIFO) with a bumped generation.
#[derive(Debug, Default, Clone)]
pub struct EntitySlots {
    slots: Vec<Slot>,
    free: Vec<u32>,
    live: usize,
}

impl EntitySlots {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh id.
    pub fn spawn(&mut self) -> EntityId {
        self.live += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.alive = true;
            return EntityId::new(index, slot.generation);
        }
        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            alive: true,
        });
        EntityId::new(index, 0)
    }

    /// Release `id`. Returns `false` if it was already dead.
    pub fn despawn(&mut self, id: EntityId) -> bool {
        if !self.is_alive(id) {
            return false;
        }
        let slot = &mut self.slots[id.index as usize];
        slot.alive = false;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        self.live -= 1;
        true
    }

    #[inline]
    pub fn is_alive(&self, id: EntityId) -> bool {
        self.slots
            .get(id.index as usize)
            .is_some_and(|s| s.alive && s.generation == id.generation)
    }

    /// Number of live ids.
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }
}
