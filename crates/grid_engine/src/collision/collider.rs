//! Participant contract for grid-tracked colliders
//!
//! Based on Game Engine Architecture 3rd Edition:
//! - Section 13.3.10: Collision event callbacks
//! - Section 16.6: Updating Game Objects in Real Time
//!
//! Anything the grid tracks implements [`GridCollider`]. The grid owns its
//! participants and refers to them — in callbacks included — through stable
//! [`ColliderId`] handles, so a participant can be notified about another
//! without either side holding a reference into the grid's storage.

use crate::collision::coords::CellCoords;
use crate::foundation::math::Vec2;
use std::any::Any;

slotmap::new_key_type! {
    /// Stable handle for a participant tracked by the collision grid
    pub struct ColliderId;
}

/// Contract for objects tracked by the collision grid
///
/// The four notification hooks default to no-ops so participants only
/// override the events they care about. The grid invokes `update` exactly
/// once per tick for every participant that was already tracked when the
/// tick began — never in the same tick the participant was registered.
pub trait GridCollider: Any {
    /// Per-tick state advance; returns the participant's new world position
    fn update(&mut self, dt: f32) -> Vec2;

    /// Current world position, independent of [`GridCollider::update`]
    ///
    /// Used to place the participant when its queued registration is
    /// processed.
    fn position(&self) -> Vec2;

    /// Collision layer this participant sits on (exactly one bit set)
    fn layer(&self) -> u32;

    /// Bitmask of layers this participant wants notifications about
    fn mask(&self) -> u32;

    /// Called when the participant is placed into a grid cell
    fn on_enter_cell(&mut self, coords: CellCoords) {
        let _ = coords;
    }

    /// Called when the participant leaves a grid cell
    fn on_exit_cell(&mut self, coords: CellCoords) {
        let _ = coords;
    }

    /// Called when another participant starts sharing this one's cell
    ///
    /// Fired only when this participant's mask includes the other's layer.
    fn on_collision_started(&mut self, other: ColliderId) {
        let _ = other;
    }

    /// Called when a participant this one was colliding with leaves the cell
    /// (or is removed from the grid)
    fn on_collision_ended(&mut self, other: ColliderId) {
        let _ = other;
    }

    /// Downcast support for typed queries
    ///
    /// Implementations return `self`; the grid uses this to filter
    /// participants by concrete type in
    /// [`CollisionGrid::collect_colliders`](crate::collision::CollisionGrid::collect_colliders).
    fn as_any(&self) -> &dyn Any;
}
