//! Debug visualization utilities
//!
//! Retained-mode debug drawing plus a grid-specific visualizer. Everything
//! here is purely observational; drawing never mutates grid state.

pub mod draw;
pub mod grid_debug;

pub use draw::{DebugDrawSystem, DebugShape};
pub use grid_debug::{GridDebugColors, GridDebugVisualizer};
