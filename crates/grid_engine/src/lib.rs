//! # Grid Engine
//!
//! A 2D cell-grid broad-phase collision engine for real-time simulations.
//!
//! ## Features
//!
//! - **Uniform Spatial Grid**: World positions hash into integer cell
//!   coordinates; only occupied cells are stored
//! - **Deterministic Events**: Enter/exit-cell and collision started/ended
//!   notifications resolved in a fixed per-tick order
//! - **Layer Filtering**: Single-bit layers and bitmask interest filtering
//! - **Cell Pooling**: Emptied cells are recycled through a free list to
//!   keep per-frame allocation near zero
//! - **Deferred Registration**: Add/remove requests are queued and applied
//!   at a safe point in the next update, never mid-iteration
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use grid_engine::prelude::*;
//!
//! struct Probe {
//!     position: Vec2,
//! }
//!
//! impl GridCollider for Probe {
//!     fn update(&mut self, dt: f32) -> Vec2 {
//!         self.position.x += 10.0 * dt;
//!         self.position
//!     }
//!
//!     fn position(&self) -> Vec2 {
//!         self.position
//!     }
//!
//!     fn layer(&self) -> u32 {
//!         CollisionLayers::PLAYER
//!     }
//!
//!     fn mask(&self) -> u32 {
//!         CollisionLayers::ENEMY
//!     }
//!
//!     fn as_any(&self) -> &dyn std::any::Any {
//!         self
//!     }
//! }
//!
//! fn main() {
//!     let config = GridConfig::default();
//!     let mut grid = CollisionGrid::new(config.cell_size());
//!     let _probe = grid.insert(Box::new(Probe { position: Vec2::new(10.0, 10.0) }));
//!
//!     loop {
//!         grid.update(1.0 / 60.0);
//!     }
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod collision;
pub mod debug;
pub mod config;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        foundation::{
            math::{Vec2, Vec4},
            time::{FixedStep, Timer},
        },
        collision::{
            CellCoords, CellSize, CollisionGrid, CollisionLayers, ColliderId, GridCollider,
            GridStats,
        },
        debug::{DebugDrawSystem, GridDebugColors, GridDebugVisualizer},
        config::{Config, ConfigError, GridConfig},
    };
}
