//! Movement domain: ground sensing, movement intent, and the physics boundary.

mod body;
mod bootstrap;
mod components;
mod intent;
mod resources;
mod sensor;
mod systems;


use bevy::prelude::*;

use crate::core::{FrameSystems, PhysicsStepSystems};

pub use body::{ForwardProbe, VelocitySink};
pub use bootstrap::spawn_foot_sensor;
pub use components::{Facing, FootSensor, GameLayer, Ground, Ladder, LadderClimb, Player, Wall};
pub use intent::MovementIntent;
pub use resources::PlayerInput;
pub use sensor::GroundSensor;

pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlayerInput>()
            .add_systems(
                Startup,
                (bootstrap::spawn_test_level, bootstrap::spawn_player),
            )
            .add_systems(
                RunFixedMainLoop,
                (
                    systems::read_input,
                    systems::track_ground_contacts,
                    systems::track_ladder_contacts,
                    systems::decay_ground_sensors,
                )
                    .chain()
                    .in_set(FrameSystems::Sense),
            )
            .add_systems(
                FixedUpdate,
                (systems::apply_player_gravity, systems::apply_climb)
                    .chain()
                    .in_set(PhysicsStepSystems::Actuate),
            );
    }
}
