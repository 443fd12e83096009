//! Cell-grid collision tracking and the per-tick update pipeline
//!
//! Based on Game Engine Architecture 3rd Edition:
//! - Section 13.3.2: Broad-phase spatial partitioning
//! - Section 16.6: Updating Game Objects in Real Time
//!
//! The grid owns every participant, the mapping from occupied coordinates to
//! pooled cells, and the participant→coordinates index. Registration and
//! removal requests only enqueue; they are applied at the top of the next
//! [`CollisionGrid::update`], so game logic spawning or despawning
//! participants mid-tick never mutates a collection the grid is iterating.
//!
//! Each tick runs three phases in a fixed order: apply pending requests,
//! advance every tracked participant and detect cell transitions, then
//! resolve enter/exit and collision started/ended notifications for
//! everything that moved.

use super::cell::{Cell, CellPool};
use super::collider::{ColliderId, GridCollider};
use super::coords::{CellCoords, CellSize};
use super::layers::CollisionLayers;
use log::{debug, info, trace, warn};
use slotmap::{SecondaryMap, SlotMap};
use std::any::Any;
use std::collections::{HashMap, HashSet};

/// Snapshot of grid occupancy counters, for instrumentation logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridStats {
    /// Participants currently tracked in a cell
    pub tracked: usize,
    /// Occupied cells currently in the map
    pub live_cells: usize,
    /// Idle cells waiting in the pool
    pub pooled_cells: usize,
    /// Registration requests queued for the next tick
    pub pending_adds: usize,
    /// Removal requests queued for the next tick
    pub pending_removes: usize,
}

/// One detected cell transition, recorded during the advance phase and
/// consumed by the resolve phase of the same tick
#[derive(Debug, Clone, Copy)]
struct MoveRecord {
    id: ColliderId,
    from: CellCoords,
    to: CellCoords,
}

/// Which side of a collision pairing is being dispatched
#[derive(Debug, Clone, Copy)]
enum PairEvent {
    Started,
    Ended,
}

/// Uniform spatial grid tracking which participant occupies which cell
///
/// Single-threaded, frame-driven: exactly one [`CollisionGrid::update`] call
/// per simulation tick, no internal locking. The grid is the sole owner of
/// its cells, its pool, and its participants; external code refers to
/// participants only through [`ColliderId`] handles.
pub struct CollisionGrid {
    cell_size: CellSize,

    /// Occupied coordinates only; a cell is released to the pool the moment
    /// its occupant set empties
    cells: HashMap<CellCoords, Cell>,

    /// Participant storage; the grid owns every tracked object
    colliders: SlotMap<ColliderId, Box<dyn GridCollider>>,

    /// Participant → current coordinates; the single source of truth for
    /// "where is this participant right now"
    tracked: SecondaryMap<ColliderId, CellCoords>,

    /// Registration requests deferred to the next tick
    pending_add: Vec<ColliderId>,

    /// Removal requests deferred to the next tick; removal wins over a
    /// same-tick add
    pending_remove: Vec<ColliderId>,

    /// Cell transitions detected this tick; cleared every tick
    move_register: Vec<MoveRecord>,

    /// Reusable iteration snapshot for the advance phase
    advance_scratch: Vec<ColliderId>,

    /// Reusable occupant snapshot for event dispatch
    occupant_scratch: Vec<ColliderId>,

    pool: CellPool,
}

impl CollisionGrid {
    /// Create a grid with the given fixed cell size
    ///
    /// The cell size is immutable for the grid's lifetime; changing it would
    /// require discarding and rebuilding the entire index.
    pub fn new(cell_size: CellSize) -> Self {
        debug!(
            "collision grid created, cell size {}x{}",
            cell_size.width, cell_size.height
        );
        Self {
            cell_size,
            cells: HashMap::new(),
            colliders: SlotMap::with_key(),
            tracked: SecondaryMap::new(),
            pending_add: Vec::new(),
            pending_remove: Vec::new(),
            move_register: Vec::new(),
            advance_scratch: Vec::new(),
            occupant_scratch: Vec::new(),
            pool: CellPool::new(),
        }
    }

    /// The fixed cell size supplied at construction
    pub fn cell_size(&self) -> CellSize {
        self.cell_size
    }

    /// Store a new participant and queue it for registration
    ///
    /// The participant is not tracked until the next [`CollisionGrid::update`]
    /// processes the queue. This is the normal spawn path; the returned
    /// handle stays valid until a removal for it is processed.
    pub fn insert(&mut self, collider: Box<dyn GridCollider>) -> ColliderId {
        let id = self.colliders.insert(collider);
        self.pending_add.push(id);
        trace!("collider {:?} stored and queued for registration", id);
        id
    }

    /// Queue an existing, unregistered participant for registration
    ///
    /// Returns `true` iff this is a new registration request. Rejected
    /// (`false`) when the handle is unknown, the participant is already
    /// tracked or already queued, or it is queued for removal this tick —
    /// removal takes precedence.
    pub fn add(&mut self, id: ColliderId) -> bool {
        if !self.colliders.contains_key(id) {
            return false;
        }
        if self.pending_remove.contains(&id) {
            trace!("add of {:?} rejected: queued for removal", id);
            return false;
        }
        if self.tracked.contains_key(id) || self.pending_add.contains(&id) {
            return false;
        }
        self.pending_add.push(id);
        true
    }

    /// Queue a participant for removal
    ///
    /// Cancels a same-tick pending add for the same participant. Returns
    /// `true` iff this was a new removal request; a redundant request is a
    /// no-op, not an error.
    pub fn remove(&mut self, id: ColliderId) -> bool {
        if !self.colliders.contains_key(id) {
            return false;
        }
        if let Some(queued) = self.pending_add.iter().position(|&pending| pending == id) {
            self.pending_add.remove(queued);
            trace!("pending add of {:?} cancelled by removal", id);
        }
        if self.pending_remove.contains(&id) {
            return false;
        }
        self.pending_remove.push(id);
        true
    }

    /// Run one simulation tick
    ///
    /// Phase order is fixed: process pending registrations/removals, advance
    /// every participant tracked *before* this tick and detect cell moves,
    /// then resolve notifications for everything that moved. A participant
    /// added this tick is placed but not advanced until the next tick.
    pub fn update(&mut self, dt: f32) {
        // Snapshot before pending processing so just-added participants sit
        // out the advance phase
        self.advance_scratch.clear();
        self.advance_scratch.extend(self.tracked.keys());

        self.process_pending();
        self.advance_participants(dt);
        self.resolve_moves();

        debug_assert!(self.move_register.is_empty());
        debug_assert!(self.cells.values().all(|cell| !cell.is_empty()));
    }

    /// Drop all state: pending queues are discarded unprocessed, every
    /// participant is dropped, and every live cell returns to the pool
    pub fn clear(&mut self) {
        self.pending_add.clear();
        self.pending_remove.clear();
        self.move_register.clear();
        for (_, cell) in self.cells.drain() {
            self.pool.give_back(cell);
        }
        self.tracked.clear();
        self.colliders.clear();
        info!("collision grid cleared");
    }

    /// Permanent teardown; the grid holds no unmanaged resources, so this is
    /// [`CollisionGrid::clear`] plus a log marker
    pub fn close(&mut self) {
        self.clear();
        info!("collision grid closed");
    }

    /// Type-filtered snapshot of all currently tracked participants
    ///
    /// Inserts matching handles into the caller-supplied set and returns how
    /// many were newly added; entries already present are not re-counted.
    pub fn collect_colliders<T: Any>(&self, result: &mut HashSet<ColliderId>) -> usize {
        let mut added = 0;
        for id in self.tracked.keys() {
            let Some(collider) = self.colliders.get(id) else {
                continue;
            };
            if collider.as_any().downcast_ref::<T>().is_some() && result.insert(id) {
                added += 1;
            }
        }
        added
    }

    /// Borrow a participant by handle
    pub fn get(&self, id: ColliderId) -> Option<&dyn GridCollider> {
        self.colliders.get(id).map(|boxed| &**boxed)
    }

    /// Mutably borrow a participant by handle
    pub fn get_mut(&mut self, id: ColliderId) -> Option<&mut dyn GridCollider> {
        self.colliders.get_mut(id).map(|boxed| &mut **boxed)
    }

    /// Borrow a participant downcast to its concrete type
    pub fn get_as<T: Any>(&self, id: ColliderId) -> Option<&T> {
        self.get(id)?.as_any().downcast_ref()
    }

    /// Current coordinates of a tracked participant
    pub fn coords_of(&self, id: ColliderId) -> Option<CellCoords> {
        self.tracked.get(id).copied()
    }

    /// Whether a participant is currently tracked in a cell
    pub fn is_tracked(&self, id: ColliderId) -> bool {
        self.tracked.contains_key(id)
    }

    /// Number of currently tracked participants
    pub fn tracked_count(&self) -> usize {
        self.tracked.len()
    }

    /// Number of occupied cells
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Append the occupants of one cell to `result`, returning how many were
    /// appended
    pub fn cell_occupants(&self, coords: CellCoords, result: &mut Vec<ColliderId>) -> usize {
        match self.cells.get(&coords) {
            Some(cell) => {
                result.extend(cell.iter());
                cell.len()
            }
            None => 0,
        }
    }

    /// Insert every participant occupying the coordinate range
    /// `[min, max]` (inclusive, component-wise) into `result`, returning how
    /// many were newly added
    pub fn query_region(
        &self,
        min: CellCoords,
        max: CellCoords,
        result: &mut HashSet<ColliderId>,
    ) -> usize {
        let mut added = 0;
        for (coords, cell) in &self.cells {
            let within = coords.x >= min.x
                && coords.x <= max.x
                && coords.y >= min.y
                && coords.y <= max.y;
            if !within {
                continue;
            }
            for id in cell.iter() {
                if result.insert(id) {
                    added += 1;
                }
            }
        }
        added
    }

    /// Iterate occupied cells as `(coordinates, occupant count)`
    ///
    /// Primarily intended for visualization and debugging.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (CellCoords, usize)> + '_ {
        self.cells.iter().map(|(&coords, cell)| (coords, cell.len()))
    }

    /// Current occupancy counters
    pub fn stats(&self) -> GridStats {
        GridStats {
            tracked: self.tracked.len(),
            live_cells: self.cells.len(),
            pooled_cells: self.pool.pooled(),
            pending_adds: self.pending_add.len(),
            pending_removes: self.pending_remove.len(),
        }
    }

    // --- Phase 1: pending registration/removal ---

    fn process_pending(&mut self) {
        for queued in 0..self.pending_add.len() {
            let id = self.pending_add[queued];
            self.apply_add(id);
        }
        self.pending_add.clear();

        for queued in 0..self.pending_remove.len() {
            let id = self.pending_remove[queued];
            self.apply_remove(id);
        }
        self.pending_remove.clear();
    }

    /// Place a queued participant at the coordinates its current position
    /// hashes into. Registration itself is silent: the participant starts
    /// receiving notifications from its first tracked tick onward.
    fn apply_add(&mut self, id: ColliderId) {
        let Some(collider) = self.colliders.get(id) else {
            return;
        };
        if self.tracked.contains_key(id) {
            return;
        }
        let coords = CellCoords::from_position(collider.position(), self.cell_size);
        let newly_occupied = occupy(&mut self.cells, &mut self.pool, coords, id);
        debug_assert!(newly_occupied, "unregistered collider already occupied a cell");
        self.tracked.insert(id, coords);
        trace!("collider {:?} registered at {}", id, coords);
    }

    /// Unregister a queued participant: vacate its cell, fire the exit and
    /// paired collision-ended notifications, then drop it from storage.
    fn apply_remove(&mut self, id: ColliderId) {
        let Some(coords) = self.tracked.remove(id) else {
            // Never tracked (a cancelled same-tick add); nothing to vacate
            self.colliders.remove(id);
            return;
        };

        if let Some(cell) = self.cells.get_mut(&coords) {
            cell.remove(id);
        }

        if let Some(collider) = self.colliders.get_mut(id) {
            collider.on_exit_cell(coords);
        }
        self.collect_occupants(coords, id);
        for index in 0..self.occupant_scratch.len() {
            let other = self.occupant_scratch[index];
            self.dispatch_pair(id, other, PairEvent::Ended);
        }

        release_if_empty(&mut self.cells, &mut self.pool, coords);
        self.colliders.remove(id);
        trace!("collider {:?} unregistered from {}", id, coords);
    }

    // --- Phase 2: advance participants, detect cell transitions ---

    fn advance_participants(&mut self, dt: f32) {
        for snapshot in 0..self.advance_scratch.len() {
            let id = self.advance_scratch[snapshot];
            // Skip participants removed during this tick's pending phase
            let Some(&old_coords) = self.tracked.get(id) else {
                continue;
            };
            let Some(collider) = self.colliders.get_mut(id) else {
                continue;
            };

            let new_position = collider.update(dt);
            let new_coords = CellCoords::from_position(new_position, self.cell_size);
            if new_coords == old_coords {
                continue;
            }

            if let Some(cell) = self.cells.get_mut(&old_coords) {
                cell.remove(id);
            }
            release_if_empty(&mut self.cells, &mut self.pool, old_coords);

            let newly_occupied = occupy(&mut self.cells, &mut self.pool, new_coords, id);
            self.tracked.insert(id, new_coords);

            if newly_occupied {
                self.move_register.push(MoveRecord {
                    id,
                    from: old_coords,
                    to: new_coords,
                });
            } else {
                // Invariant guard: the target cell should never already hold
                // the mover. Suppress the duplicate event; the index above is
                // already correct.
                warn!(
                    "collider {:?} already present in cell {}, move event suppressed",
                    id, new_coords
                );
            }
        }
    }

    // --- Phase 3: resolve enter/exit and collision notifications ---

    fn resolve_moves(&mut self) {
        for recorded in 0..self.move_register.len() {
            let MoveRecord { id, from, to } = self.move_register[recorded];

            if let Some(collider) = self.colliders.get_mut(id) {
                collider.on_exit_cell(from);
            }
            self.collect_occupants(from, id);
            for index in 0..self.occupant_scratch.len() {
                let other = self.occupant_scratch[index];
                self.dispatch_pair(id, other, PairEvent::Ended);
            }

            if let Some(collider) = self.colliders.get_mut(id) {
                collider.on_enter_cell(to);
            }
            self.collect_occupants(to, id);
            for index in 0..self.occupant_scratch.len() {
                let other = self.occupant_scratch[index];
                self.dispatch_pair(id, other, PairEvent::Started);
            }
        }
        self.move_register.clear();
    }

    /// Snapshot a cell's occupants into the scratch buffer, excluding the
    /// mover itself
    fn collect_occupants(&mut self, coords: CellCoords, exclude: ColliderId) {
        self.occupant_scratch.clear();
        if let Some(cell) = self.cells.get(&coords) {
            self.occupant_scratch
                .extend(cell.iter().filter(|&occupant| occupant != exclude));
        }
    }

    /// Apply the layer/mask filter to one pair and fire the corresponding
    /// notifications
    ///
    /// Both directions are evaluated independently: a one-way mask interest
    /// produces a one-way notification. Same-layer pairs are skipped
    /// entirely.
    fn dispatch_pair(&mut self, mover: ColliderId, other: ColliderId, event: PairEvent) {
        let (Some(moving), Some(occupant)) =
            (self.colliders.get(mover), self.colliders.get(other))
        else {
            return;
        };
        let (mover_layer, mover_mask) = (moving.layer(), moving.mask());
        let (other_layer, other_mask) = (occupant.layer(), occupant.mask());

        if !CollisionLayers::interacts(mover_layer, other_layer) {
            return;
        }

        if CollisionLayers::wants(mover_mask, other_layer) {
            if let Some(collider) = self.colliders.get_mut(mover) {
                match event {
                    PairEvent::Started => collider.on_collision_started(other),
                    PairEvent::Ended => collider.on_collision_ended(other),
                }
            }
        }
        if CollisionLayers::wants(other_mask, mover_layer) {
            if let Some(collider) = self.colliders.get_mut(other) {
                match event {
                    PairEvent::Started => collider.on_collision_started(mover),
                    PairEvent::Ended => collider.on_collision_ended(mover),
                }
            }
        }
    }
}

/// Insert an occupant at `coords`, renting a cell if the coordinate was
/// vacant. Returns `true` iff the occupant was newly added.
fn occupy(
    cells: &mut HashMap<CellCoords, Cell>,
    pool: &mut CellPool,
    coords: CellCoords,
    id: ColliderId,
) -> bool {
    cells
        .entry(coords)
        .or_insert_with(|| pool.rent())
        .insert(id)
}

/// Return the cell at `coords` to the pool if its occupant set emptied
fn release_if_empty(
    cells: &mut HashMap<CellCoords, Cell>,
    pool: &mut CellPool,
    coords: CellCoords,
) {
    if cells.get(&coords).is_some_and(Cell::is_empty) {
        if let Some(cell) = cells.remove(&coords) {
            pool.give_back(cell);
        }
    }
}
