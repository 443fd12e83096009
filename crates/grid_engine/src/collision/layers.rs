//! Collision layer system for filtering collision notifications
//!
//! Based on Game Engine Architecture 3rd Edition, Section 13.3.8:
//! "Most games need to filter collisions... This is typically done via
//! collision layers or groups."
//!
//! A participant sits on exactly one single-bit layer and carries a mask of
//! the layers it wants to hear about. Filtering is directional: each side's
//! mask is checked against the other side's layer independently, so a
//! one-way interest produces a one-way notification. Participants sharing a
//! layer never notify each other at all.

/// Collision layer definitions using plain bitmask constants
pub struct CollisionLayers;

impl CollisionLayers {
    /// No collision layer
    pub const NONE: u32 = 0;

    /// All collision layers
    pub const ALL: u32 = 0xFFFF_FFFF;

    // Standard game entity layers (bits 0-7)
    /// Player character layer
    pub const PLAYER: u32 = 1 << 0;

    /// Enemy character layer
    pub const ENEMY: u32 = 1 << 1;

    /// Projectiles (bullets, missiles, etc.)
    pub const PROJECTILE: u32 = 1 << 2;

    /// Static environment geometry
    pub const ENVIRONMENT: u32 = 1 << 3;

    /// Trigger volumes (no physical response)
    pub const TRIGGER: u32 = 1 << 4;

    /// Debris and small physics objects
    pub const DEBRIS: u32 = 1 << 5;

    /// Vehicles
    pub const VEHICLE: u32 = 1 << 6;

    /// Pickups and collectibles
    pub const PICKUP: u32 = 1 << 7;

    /// Check whether two participants interact at all
    ///
    /// Participants on the same layer are mutually invisible through this
    /// mechanism regardless of their masks.
    pub fn interacts(layer_a: u32, layer_b: u32) -> bool {
        debug_assert!(layer_a.count_ones() == 1, "layer must have exactly one bit set");
        debug_assert!(layer_b.count_ones() == 1, "layer must have exactly one bit set");
        layer_a != layer_b
    }

    /// Check whether a mask includes a layer
    ///
    /// Evaluated per direction: `wants(mask_a, layer_b)` decides only
    /// whether A is notified about B, never the reverse.
    pub fn wants(mask: u32, layer: u32) -> bool {
        (mask & layer) != 0
    }

    /// Helper to create a mask from multiple layers
    ///
    /// # Example
    /// ```
    /// use grid_engine::collision::CollisionLayers;
    ///
    /// let mask = CollisionLayers::mask(&[
    ///     CollisionLayers::PLAYER,
    ///     CollisionLayers::ENEMY,
    /// ]);
    /// assert_eq!(mask, CollisionLayers::PLAYER | CollisionLayers::ENEMY);
    /// ```
    pub fn mask(layers: &[u32]) -> u32 {
        layers.iter().fold(0, |acc, &layer| acc | layer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_layer_never_interacts() {
        // Masks are irrelevant when the layers match
        assert!(!CollisionLayers::interacts(
            CollisionLayers::ENEMY,
            CollisionLayers::ENEMY
        ));
    }

    #[test]
    fn test_different_layers_interact() {
        assert!(CollisionLayers::interacts(
            CollisionLayers::PLAYER,
            CollisionLayers::ENEMY
        ));
    }

    #[test]
    fn test_wants_is_directional() {
        let player_mask = CollisionLayers::mask(&[CollisionLayers::ENEMY]);
        let enemy_mask = CollisionLayers::mask(&[CollisionLayers::PROJECTILE]);

        // Player cares about enemies; the enemy does not care back
        assert!(CollisionLayers::wants(player_mask, CollisionLayers::ENEMY));
        assert!(!CollisionLayers::wants(enemy_mask, CollisionLayers::PLAYER));
    }

    #[test]
    fn test_mask_creation() {
        let mask = CollisionLayers::mask(&[
            CollisionLayers::PLAYER,
            CollisionLayers::ENEMY,
            CollisionLayers::ENVIRONMENT,
        ]);

        assert_eq!(
            mask,
            CollisionLayers::PLAYER | CollisionLayers::ENEMY | CollisionLayers::ENVIRONMENT
        );
    }
}
