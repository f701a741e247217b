//! Input routing: device coordinate → (kart, action).
//!
//! [`InputRouter`] keeps a dense table indexed by `[type][id0][id1][id2]`. The table is
//! allocated once at construction and never resized, so [`InputRouter::dispatch`] is a
//! single indexed load with no allocation on the input path.
//!
//! # Lifecycle
//! - Call [`InputRouter::rebuild`] whenever the set of player karts changes (race start).
//!   It clears every entry before repopulating, so bindings from a previous player
//!   count never survive.
//! - Call [`InputRouter::forget`] when a kart is destroyed mid-race. Entries whose owner
//!   is no longer alive are skipped by `dispatch` regardless.
//!
//! Rebuild and dispatch run on the same frame loop; the router is not shared across
//! threads.

use crate::binding::{KartAction, PlayerBindings};
use crate::entity::{EntityId, KartControls};
use crate::event::{DeviceCoord, DeviceEvent, InputType, MAX_ID0, MAX_ID1, MAX_ID2};

const TABLE_LEN: usize = InputType::COUNT * MAX_ID0 * MAX_ID1 * MAX_ID2;

/// One routing-table slot. `owner == None` means unbound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BindingEntry {
    pub owner: Option<EntityId>,
    pub action: KartAction,
}

impl BindingEntry {
    const UNBOUND: BindingEntry = BindingEntry {
        owner: None,
        action: KartAction::Left,
    };

    #[inline]
    pub fn is_bound(&self) -> bool {
        self.owner.is_some()
    }
}

/// A controllable kart together with the bindings of the player driving it.
#[derive(Debug, Clone, Copy)]
pub struct PlayerSlot<'a> {
    pub entity: EntityId,
    pub bindings: &'a PlayerBindings,
}

/// Dense (type, id0, id1, id2) → (owner, action) lookup table.
pub struct InputRouter {
    table: Box<[BindingEntry]>,
    bound: usize,
}

impl Default for InputRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl InputRouter {
    /// Allocates the full table, every entry unbound.
    pub fn new() -> Self {
        Self {
            table: vec![BindingEntry::UNBOUND; TABLE_LEN].into_boxed_slice(),
            bound: 0,
        }
    }

    /// Table index of an in-bounds coordinate.
    #[inline]
    fn index_of(coord: DeviceCoord) -> usize {
        ((coord.kind.index() * MAX_ID0 + coord.id0 as usize) * MAX_ID1 + coord.id1 as usize) * MAX_ID2
            + coord.id2 as usize
    }

    /// Lookup-side index. Events reaching the router are expected to be in range.
    #[inline]
    fn slot(coord: DeviceCoord) -> Option<usize> {
        debug_assert!(coord.in_bounds(), "device coordinate {coord} outside routing table");
        coord.in_bounds().then(|| Self::index_of(coord))
    }

    /// Unbind every coordinate.
    pub fn clear(&mut self) {
        self.table.fill(BindingEntry::UNBOUND);
        self.bound = 0;
    }

    /// Clear the table, then bind every configured action of every player.
    ///
    /// When two players share a coordinate the later player wins; a warning is logged.
    pub fn rebuild(&mut self, players: &[PlayerSlot<'_>]) {
        self.clear();

        for player in players {
            for action in KartAction::ALL {
                let Some(coord) = player.bindings.coord(action) else {
                    continue;
                };
                // Bindings can come from unvalidated data, so skip rather than assert.
                if !coord.in_bounds() {
                    tracing::warn!(player = %player.bindings.name, %action, %coord, "binding outside routing table, ignored");
                    continue;
                }
                let entry = &mut self.table[Self::index_of(coord)];
                match entry.owner {
                    Some(prev) => tracing::warn!(
                        %coord,
                        previous = %prev,
                        previous_action = %entry.action,
                        owner = %player.entity,
                        %action,
                        "coordinate bound twice; later binding wins"
                    ),
                    None => self.bound += 1,
                }
                *entry = BindingEntry {
                    owner: Some(player.entity),
                    action,
                };
            }
        }

        tracing::debug!(players = players.len(), bound = self.bound, "input routing table rebuilt");
    }

    /// Entry at `coord`, or `None` for out-of-range coordinates.
    #[inline]
    pub fn entry(&self, coord: DeviceCoord) -> Option<BindingEntry> {
        Self::slot(coord).map(|idx| self.table[idx])
    }

    /// Route one event to its kart.
    ///
    /// Returns `true` when a live owner handled it, `false` when the coordinate is not a
    /// player control (the caller may then try system commands).
    #[inline]
    pub fn dispatch<K: KartControls + ?Sized>(&self, event: &DeviceEvent, karts: &mut K) -> bool {
        let Some(BindingEntry {
            owner: Some(owner),
            action,
        }) = self.entry(event.coord)
        else {
            return false;
        };

        if !karts.is_alive(owner) {
            return false;
        }

        #[cfg(feature = "debug-log")]
        tracing::trace!(coord = %event.coord, value = event.value, %owner, %action, "routed");

        karts.action(owner, action, event.value);
        true
    }

    /// Unbind every coordinate owned by `entity`. Returns how many were cleared.
    pub fn forget(&mut self, entity: EntityId) -> usize {
        let mut cleared = 0;
        for entry in self.table.iter_mut().filter(|e| e.owner == Some(entity)) {
            *entry = BindingEntry::UNBOUND;
            cleared += 1;
        }
        self.bound -= cleared;
        if cleared > 0 {
            tracing::debug!(%entity, cleared, "dropped bindings of removed kart");
        }
        cleared
    }

    /// Number of bound coordinates.
    pub fn bound_count(&self) -> usize {
        self.bound
    }
}
