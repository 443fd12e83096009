//! Grid-specific debug visualization
//!
//! Based on Game Engine Architecture 3rd Edition, Section 10.2:
//! "Debug drawing for collision detection typically includes visualizations
//! of bounding volumes, collision shapes, and query results."
//!
//! Draws the live state of a [`CollisionGrid`]: an outline per occupied
//! cell, a filled marker inside each occupied cell, and a bounding rectangle
//! spanning the minimum/maximum occupied coordinates. Purely observational.

use crate::collision::{CellCoords, CollisionGrid};
use crate::debug::draw::DebugDrawSystem;
use crate::foundation::math::{Vec2, Vec4};

/// Color scheme for grid visualization
#[derive(Clone, Debug)]
pub struct GridDebugColors {
    /// Color for cell outlines
    pub line: Vec4,

    /// Color for occupancy markers inside non-empty cells
    pub fill: Vec4,

    /// Color for the bounding rectangle around all occupied cells
    pub border: Vec4,
}

impl Default for GridDebugColors {
    fn default() -> Self {
        Self {
            line: Vec4::new(0.5, 0.8, 1.0, 0.4),   // Light blue
            fill: Vec4::new(0.0, 1.0, 0.0, 0.3),   // Green, semi-transparent
            border: Vec4::new(1.0, 0.8, 0.0, 0.8), // Amber
        }
    }
}

/// Grid debug visualizer
///
/// Integrates with [`DebugDrawSystem`] to show which cells are live and
/// where the occupied region of the grid currently is.
pub struct GridDebugVisualizer {
    debug_draw: DebugDrawSystem,
    colors: GridDebugColors,

    /// Show per-cell outlines
    pub show_cells: bool,

    /// Show occupancy markers
    pub show_occupancy: bool,

    /// Show the occupied-region bounding rectangle
    pub show_bounds: bool,
}

impl GridDebugVisualizer {
    /// Occupancy marker extent as a fraction of the cell extent
    const MARKER_SCALE: f32 = 0.25;

    /// Create a new grid debug visualizer
    pub fn new() -> Self {
        Self {
            debug_draw: DebugDrawSystem::new(),
            colors: GridDebugColors::default(),
            show_cells: true,
            show_occupancy: true,
            show_bounds: true,
        }
    }

    /// Set custom color scheme
    pub fn with_colors(mut self, colors: GridDebugColors) -> Self {
        self.colors = colors;
        self
    }

    /// Emit one frame's worth of shapes for the grid's current state
    ///
    /// Shapes live for a single frame; call once per rendered frame after
    /// the grid update.
    pub fn draw(&mut self, grid: &CollisionGrid) {
        let cell_size = grid.cell_size();
        let half_marker =
            Vec2::new(cell_size.width, cell_size.height) * (Self::MARKER_SCALE * 0.5);
        let mut bounds: Option<(CellCoords, CellCoords)> = None;

        for (coords, _occupants) in grid.occupied_cells() {
            let min = coords.world_min(cell_size);
            let max = min + Vec2::new(cell_size.width, cell_size.height);

            if self.show_cells {
                self.debug_draw.draw_rect(min, max, self.colors.line, 0.0);
            }
            if self.show_occupancy {
                let center = coords.world_center(cell_size);
                self.debug_draw.draw_rect_filled(
                    center - half_marker,
                    center + half_marker,
                    self.colors.fill,
                    0.0,
                );
            }

            bounds = Some(match bounds {
                Some((lo, hi)) => (lo.min(coords), hi.max(coords)),
                None => (coords, coords),
            });
        }

        if self.show_bounds {
            if let Some((lo, hi)) = bounds {
                let min = lo.world_min(cell_size);
                let max = hi.world_min(cell_size) + Vec2::new(cell_size.width, cell_size.height);
                self.debug_draw.draw_rect(min, max, self.colors.border, 0.0);
            }
        }
    }

    /// Update shape lifetimes (expire last frame's shapes)
    pub fn update(&mut self, delta_time: f32) {
        self.debug_draw.update(delta_time);
    }

    /// Clear all visualization
    pub fn clear(&mut self) {
        self.debug_draw.clear();
    }

    /// Enable/disable the entire debug system
    pub fn set_enabled(&mut self, enabled: bool) {
        self.debug_draw.enabled = enabled;
    }

    /// Check if the debug system is enabled
    pub fn is_enabled(&self) -> bool {
        self.debug_draw.enabled
    }

    /// Get reference to the underlying debug draw system
    pub fn debug_draw(&self) -> &DebugDrawSystem {
        &self.debug_draw
    }
}

impl Default for GridDebugVisualizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::{CellSize, CollisionLayers, GridCollider};
    use crate::debug::draw::DebugShape;

    struct Marker {
        position: Vec2,
    }

    impl GridCollider for Marker {
        fn update(&mut self, _dt: f32) -> Vec2 {
            self.position
        }

        fn position(&self) -> Vec2 {
            self.position
        }

        fn layer(&self) -> u32 {
            CollisionLayers::DEBRIS
        }

        fn mask(&self) -> u32 {
            CollisionLayers::NONE
        }

        fn as_any(&self) -> &dyn std::any::Any {
            self
        }
    }

    fn populated_grid() -> CollisionGrid {
        let mut grid = CollisionGrid::new(CellSize::new(100.0, 100.0));
        grid.insert(Box::new(Marker {
            position: Vec2::new(10.0, 10.0),
        }));
        grid.insert(Box::new(Marker {
            position: Vec2::new(250.0, 150.0),
        }));
        grid.update(1.0);
        grid
    }

    #[test]
    fn test_draw_emits_outline_marker_and_bounds() {
        let grid = populated_grid();
        let mut viz = GridDebugVisualizer::new();
        viz.draw(&grid);

        // Two occupied cells: 2 outlines + 2 occupancy markers + 1 bounding rect
        assert_eq!(viz.debug_draw().shape_count(), 5);

        let filled = viz
            .debug_draw()
            .shapes()
            .filter(|shape| matches!(shape, DebugShape::Rect { filled: true, .. }))
            .count();
        let outlines = viz
            .debug_draw()
            .shapes()
            .filter(|shape| matches!(shape, DebugShape::Rect { filled: false, .. }))
            .count();
        assert_eq!(filled, 2);
        assert_eq!(outlines, 3);
    }

    #[test]
    fn test_bounding_rect_spans_occupied_region() {
        let grid = populated_grid();
        let mut viz = GridDebugVisualizer::new();
        viz.show_cells = false;
        viz.show_occupancy = false;
        viz.draw(&grid);

        let shapes: Vec<_> = viz.debug_draw().shapes().collect();
        assert_eq!(shapes.len(), 1);
        match shapes[0] {
            DebugShape::Rect { min, max, .. } => {
                // Occupied cells (0,0) and (2,1) with 100x100 cells
                assert_eq!(*min, Vec2::new(0.0, 0.0));
                assert_eq!(*max, Vec2::new(300.0, 200.0));
            }
            other => panic!("expected bounding rect, got {:?}", other),
        }
    }

    #[test]
    fn test_shapes_expire_next_frame() {
        let grid = populated_grid();
        let mut viz = GridDebugVisualizer::new();
        viz.draw(&grid);
        assert!(viz.debug_draw().shape_count() > 0);

        viz.update(0.016);
        assert_eq!(viz.debug_draw().shape_count(), 0);
    }

    #[test]
    fn test_empty_grid_draws_nothing() {
        let grid = CollisionGrid::new(CellSize::new(100.0, 100.0));
        let mut viz = GridDebugVisualizer::new();
        viz.draw(&grid);
        assert_eq!(viz.debug_draw().shape_count(), 0);
    }
}
