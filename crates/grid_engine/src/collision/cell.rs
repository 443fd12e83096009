//! Pooled grid cells
//!
//! A cell is the set of participants currently occupying one grid
//! coordinate. Cells churn heavily as participants move, so emptied cells
//! are not dropped: they go back to a free list and are rented again the
//! next time any coordinate becomes occupied. Renting and returning is an
//! ownership transfer — the previous holder keeps nothing.

use super::collider::ColliderId;
use std::collections::HashSet;

/// Expected average occupancy; pre-sizing new cells to this keeps growth
/// reallocations rare in crowded scenes.
const CELL_START_CAPACITY: usize = 32;

/// Duplicate-free, unordered set of participants occupying one grid cell
#[derive(Debug, Default)]
pub struct Cell {
    occupants: HashSet<ColliderId>,
}

impl Cell {
    fn with_start_capacity() -> Self {
        Self {
            occupants: HashSet::with_capacity(CELL_START_CAPACITY),
        }
    }

    /// Add an occupant, returning `true` iff it was not already present
    pub fn insert(&mut self, id: ColliderId) -> bool {
        self.occupants.insert(id)
    }

    /// Remove an occupant, returning `true` iff it was present
    pub fn remove(&mut self, id: ColliderId) -> bool {
        self.occupants.remove(&id)
    }

    /// Whether an occupant is present
    pub fn contains(&self, id: ColliderId) -> bool {
        self.occupants.contains(&id)
    }

    /// True iff the occupant count is zero
    pub fn is_empty(&self) -> bool {
        self.occupants.is_empty()
    }

    /// Current occupant count
    pub fn len(&self) -> usize {
        self.occupants.len()
    }

    /// Iterate over the occupants (unordered)
    pub fn iter(&self) -> impl Iterator<Item = ColliderId> + '_ {
        self.occupants.iter().copied()
    }

    fn clear(&mut self) {
        self.occupants.clear();
    }
}

/// Free list of reusable [`Cell`] instances
///
/// The pool exclusively owns idle cells; the grid exclusively owns cells
/// currently in its map. Single-threaded use only — the grid never shares
/// the pool.
#[derive(Debug, Default)]
pub struct CellPool {
    free: Vec<Cell>,
}

impl CellPool {
    /// Create an empty pool
    pub fn new() -> Self {
        Self { free: Vec::new() }
    }

    /// Take a cleared cell from the pool, allocating if the pool is empty
    pub fn rent(&mut self) -> Cell {
        self.free.pop().unwrap_or_else(Cell::with_start_capacity)
    }

    /// Return a cell to the pool
    ///
    /// The cell is cleared on the way in; the caller must not retain any
    /// reference to it afterward (enforced by the move).
    pub fn give_back(&mut self, mut cell: Cell) {
        cell.clear();
        self.free.push(cell);
    }

    /// Number of idle cells available for rent
    pub fn pooled(&self) -> usize {
        self.free.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    fn make_ids(n: usize) -> Vec<ColliderId> {
        let mut map: SlotMap<ColliderId, ()> = SlotMap::with_key();
        (0..n).map(|_| map.insert(())).collect()
    }

    #[test]
    fn test_insert_is_duplicate_free() {
        let ids = make_ids(1);
        let mut cell = Cell::default();

        assert!(cell.insert(ids[0]));
        assert!(!cell.insert(ids[0]));
        assert_eq!(cell.len(), 1);
    }

    #[test]
    fn test_remove_reports_presence() {
        let ids = make_ids(2);
        let mut cell = Cell::default();
        cell.insert(ids[0]);

        assert!(cell.remove(ids[0]));
        assert!(!cell.remove(ids[1]));
        assert!(cell.is_empty());
    }

    #[test]
    fn test_pool_round_trip_clears() {
        let ids = make_ids(3);
        let mut pool = CellPool::new();

        let mut cell = pool.rent();
        for &id in &ids {
            cell.insert(id);
        }
        pool.give_back(cell);
        assert_eq!(pool.pooled(), 1);

        // A rented cell always comes back with zero occupants
        let cell = pool.rent();
        assert!(cell.is_empty());
        assert_eq!(pool.pooled(), 0);
    }

    #[test]
    fn test_pool_reuses_before_allocating() {
        let mut pool = CellPool::new();
        pool.give_back(pool_cell());
        pool.give_back(pool_cell());
        assert_eq!(pool.pooled(), 2);

        let _a = pool.rent();
        let _b = pool.rent();
        assert_eq!(pool.pooled(), 0);
    }

    fn pool_cell() -> Cell {
        Cell::with_start_capacity()
    }
}
