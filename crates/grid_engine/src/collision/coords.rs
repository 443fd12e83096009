//! Grid cell coordinates
//!
//! World positions hash into discrete cell coordinates by dividing through
//! the grid's fixed cell size and flooring. Flooring (rather than truncating
//! toward zero) is load-bearing: a position of -0.5 must land in cell -1,
//! not cell 0.

use crate::foundation::math::Vec2;
use std::fmt;

/// Fixed width and height of every grid cell, in world units
///
/// Supplied once at grid construction and immutable for the grid's lifetime;
/// changing it would invalidate every stored coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellSize {
    /// Cell width in world units
    pub width: f32,
    /// Cell height in world units
    pub height: f32,
}

impl CellSize {
    /// Create a new cell size
    ///
    /// Both extents must be strictly positive; this is a construction-time
    /// contract, not a runtime failure mode.
    pub fn new(width: f32, height: f32) -> Self {
        debug_assert!(
            width > 0.0 && height > 0.0,
            "cell size must be positive: {}x{}",
            width,
            height
        );
        Self { width, height }
    }
}

/// Discrete grid-cell index derived from a world position
///
/// Pure value type: equality, hashing, ordering, and component-wise min/max.
/// Immutable once computed; the grid recomputes it every tick per tracked
/// participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct CellCoords {
    /// Horizontal cell index
    pub x: i32,
    /// Vertical cell index
    pub y: i32,
}

impl CellCoords {
    /// Create coordinates from raw cell indices
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Hash a world position into cell coordinates
    pub fn from_position(position: Vec2, cell_size: CellSize) -> Self {
        Self {
            x: (position.x / cell_size.width).floor() as i32,
            y: (position.y / cell_size.height).floor() as i32,
        }
    }

    /// Component-wise minimum of two coordinates
    pub fn min(self, other: Self) -> Self {
        Self {
            x: self.x.min(other.x),
            y: self.y.min(other.y),
        }
    }

    /// Component-wise maximum of two coordinates
    pub fn max(self, other: Self) -> Self {
        Self {
            x: self.x.max(other.x),
            y: self.y.max(other.y),
        }
    }

    /// World-space position of this cell's minimum corner
    pub fn world_min(self, cell_size: CellSize) -> Vec2 {
        Vec2::new(self.x as f32 * cell_size.width, self.y as f32 * cell_size.height)
    }

    /// World-space position of this cell's center
    pub fn world_center(self, cell_size: CellSize) -> Vec2 {
        self.world_min(cell_size) + Vec2::new(cell_size.width * 0.5, cell_size.height * 0.5)
    }
}

impl fmt::Display for CellCoords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_from_position_basic() {
        let size = CellSize::new(100.0, 100.0);
        assert_eq!(
            CellCoords::from_position(Vec2::new(10.0, 10.0), size),
            CellCoords::new(0, 0)
        );
        assert_eq!(
            CellCoords::from_position(Vec2::new(150.0, 10.0), size),
            CellCoords::new(1, 0)
        );
    }

    #[test]
    fn test_from_position_floors_negative() {
        // Truncation would map all of these to cell 0; flooring must not
        let size = CellSize::new(100.0, 100.0);
        assert_eq!(
            CellCoords::from_position(Vec2::new(-0.5, -0.5), size),
            CellCoords::new(-1, -1)
        );
        assert_eq!(
            CellCoords::from_position(Vec2::new(-100.0, -1.0), size),
            CellCoords::new(-1, -1)
        );
        assert_eq!(
            CellCoords::from_position(Vec2::new(-100.5, 0.0), size),
            CellCoords::new(-2, 0)
        );
    }

    #[test]
    fn test_cell_boundary_is_inclusive_low() {
        let size = CellSize::new(100.0, 50.0);
        assert_eq!(
            CellCoords::from_position(Vec2::new(100.0, 50.0), size),
            CellCoords::new(1, 1)
        );
    }

    #[test]
    fn test_min_max_component_wise() {
        let a = CellCoords::new(-3, 7);
        let b = CellCoords::new(2, -5);
        assert_eq!(a.min(b), CellCoords::new(-3, -5));
        assert_eq!(a.max(b), CellCoords::new(2, 7));
    }

    #[test]
    fn test_world_center_round_trips() {
        let size = CellSize::new(32.0, 64.0);
        let coords = CellCoords::new(-2, 3);
        let center = coords.world_center(size);
        assert_relative_eq!(center.x, -48.0);
        assert_relative_eq!(center.y, 224.0);
        assert_eq!(CellCoords::from_position(center, size), coords);
    }
}
