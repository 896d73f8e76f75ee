//! Handles gravity

use std::collections::HashMap;

use bevy::prelude::*;

use crate::id::NamespacedId;

/// Downward acceleration on the default planet, in blocks per tick squared
pub const BASELINE_GRAVITY: f32 = 0.08;

/// The reserved modifier name planetary gravity is applied under
pub fn gravity_modifier_id() -> NamespacedId {
    NamespacedId::astrum("planet_gravity")
}

#[derive(Component, Debug, Clone)]
/// The downward acceleration the host applies to this entity each tick:
/// a base value plus named additive modifiers.
///
/// Setting a modifier replaces any prior value under the same name, so a
/// per-tick writer never stacks with itself.
pub struct GravityAttribute {
    base: f32,
    modifiers: HashMap<NamespacedId, f32>,
}

impl Default for GravityAttribute {
    fn default() -> Self {
        Self::new(BASELINE_GRAVITY)
    }
}

impl GravityAttribute {
    /// An attribute with the given base acceleration and no modifiers
    pub fn new(base: f32) -> Self {
        Self {
            base,
            modifiers: HashMap::new(),
        }
    }

    /// The effective downward acceleration (base + all modifiers)
    pub fn value(&self) -> f32 {
        self.base + self.modifiers.values().sum::<f32>()
    }

    /// Installs `value` under `id`, replacing any prior modifier with that id
    pub fn set_modifier(&mut self, id: NamespacedId, value: f32) {
        self.modifiers.insert(id, value);
    }

    /// Removes the modifier stored under `id`, if any. Returns whether one
    /// was present - calling this with no modifier installed is a no-op.
    pub fn remove_modifier(&mut self, id: &NamespacedId) -> bool {
        self.modifiers.remove(id).is_some()
    }

    /// The value currently stored under `id`
    pub fn modifier(&self, id: &NamespacedId) -> Option<f32> {
        self.modifiers.get(id).copied()
    }
}

/// The additive modifier that turns baseline gravity into this planet's
/// gravity: `baseline * (factor - 1)`, clamped to `-baseline` at factor <= 0
/// so the zero-gravity case never depends on exact float equality.
pub fn planet_gravity_delta(gravity_factor: f32) -> f32 {
    if gravity_factor <= 0.0 {
        -BASELINE_GRAVITY
    } else {
        BASELINE_GRAVITY * (gravity_factor - 1.0)
    }
}

/// Per-tick change to the vertical velocity of an entity that has no
/// [`GravityAttribute`], relative to the baseline pull the host already
/// applies. Zero-gravity planets cancel the host's pull entirely.
pub fn velocity_correction(gravity_factor: f32) -> f32 {
    let target = if gravity_factor <= 0.0 {
        0.0
    } else {
        -BASELINE_GRAVITY * gravity_factor
    };

    target - (-BASELINE_GRAVITY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delta_for_reduced_gravity() {
        let delta = planet_gravity_delta(0.38);
        assert!((delta - (0.08 * (0.38 - 1.0))).abs() < f32::EPSILON);
    }

    #[test]
    fn delta_clamps_at_zero_gravity() {
        assert_eq!(planet_gravity_delta(0.0), -BASELINE_GRAVITY);
        assert_eq!(planet_gravity_delta(-3.0), -BASELINE_GRAVITY);
    }

    #[test]
    fn velocity_correction_matches_mars_example() {
        // (-0.08 * 0.38) - (-0.08) = 0.0496 blocks/tick of lift vs baseline
        let correction = velocity_correction(0.38);
        assert!((correction - 0.0496).abs() < 1e-6);
    }

    #[test]
    fn velocity_correction_cancels_pull_in_zero_gravity() {
        assert_eq!(velocity_correction(0.0), BASELINE_GRAVITY);
    }

    #[test]
    fn repeated_set_does_not_stack() {
        let mut attribute = GravityAttribute::default();
        let id = gravity_modifier_id();

        attribute.set_modifier(id.clone(), planet_gravity_delta(0.38));
        attribute.set_modifier(id.clone(), planet_gravity_delta(0.38));

        assert!((attribute.value() - 0.08 * 0.38).abs() < 1e-6);
    }

    #[test]
    fn remove_modifier_is_idempotent() {
        let mut attribute = GravityAttribute::default();
        let id = gravity_modifier_id();

        attribute.set_modifier(id.clone(), -0.05);
        assert!(attribute.remove_modifier(&id));
        assert!(!attribute.remove_modifier(&id));
        assert_eq!(attribute.value(), BASELINE_GRAVITY);
    }
}
