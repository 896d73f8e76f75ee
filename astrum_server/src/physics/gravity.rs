//! Applies each planet's gravity to the entities inside it
//!
//! Runs every simulation tick. Entities in a catalogue-planet dimension get
//! the planet's pull installed as the reserved named modifier on their
//! gravity attribute (replacement, so ticks never stack); entities without
//! the attribute get the equivalent velocity correction directly. Leaving a
//! planet removes the modifier, restoring host-native gravity.

use astrum_core::{
    ecs::FixedUpdateSet,
    physics::{
        Grounded, GravityExempt, Submerged, Velocity,
        gravity::{GravityAttribute, gravity_modifier_id, planet_gravity_delta, velocity_correction},
    },
    state::GameState,
    world::WorldWithin,
};
use bevy::prelude::*;

use crate::world::PlanetWorlds;

fn planet_gravity(
    worlds: PlanetWorlds,
    mut q_entities: Query<(
        &WorldWithin,
        Option<&mut GravityAttribute>,
        Option<&mut Velocity>,
        Has<Grounded>,
        Has<Submerged>,
        Has<GravityExempt>,
    )>,
) {
    let modifier_id = gravity_modifier_id();

    for (world_within, attribute, velocity, grounded, submerged, exempt) in q_entities.iter_mut() {
        let planet_id = worlds.planet_of_world(world_within.0);

        let Some(planet) = worlds.catalog().get(&planet_id) else {
            // Back on the default planet (or somewhere unknown): restore
            // host-native gravity. No-op if no modifier was installed.
            if let Some(mut attribute) = attribute {
                attribute.remove_modifier(&modifier_id);
            }
            continue;
        };

        // The host's own physics governs these; fighting it causes jitter
        if grounded || submerged || exempt {
            continue;
        }

        let factor = planet.gravity_factor();

        if let Some(mut attribute) = attribute {
            attribute.set_modifier(modifier_id.clone(), planet_gravity_delta(factor));
        } else if let Some(mut velocity) = velocity {
            velocity.0.y += velocity_correction(factor);
        }
    }
}

pub(super) fn register(app: &mut App) {
    app.add_systems(
        FixedUpdate,
        planet_gravity
            .in_set(FixedUpdateSet::PrePhysics)
            .run_if(in_state(GameState::Playing)),
    );
}
