//! Cell-based broad-phase collision system
//!
//! Based on Game Engine Architecture 3rd Edition, Section 13.3:
//! "The collision detection system is typically split into two phases:
//! broad-phase and narrow-phase."
//!
//! This module is the broad phase only: a uniform grid of pooled cells that
//! tracks which participant occupies which cell, detects cell transitions
//! frame-over-frame, and raises layer/mask-filtered enter/exit and
//! collision started/ended notifications. Precise shape-vs-shape tests are
//! a narrow-phase concern and live outside this crate.

pub mod cell;
pub mod collider;
pub mod coords;
pub mod grid;
pub mod layers;

pub use cell::{Cell, CellPool};
pub use collider::{ColliderId, GridCollider};
pub use coords::{CellCoords, CellSize};
pub use grid::{CollisionGrid, GridStats};
pub use layers::CollisionLayers;
