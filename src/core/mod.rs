//! Core domain: frame scheduling, run configuration, and timed phases.

mod resources;
mod systems;
pub mod timers;


use bevy::app::{RunFixedMainLoop, RunFixedMainLoopSystems};
use bevy::prelude::*;

pub use resources::{AiRng, RunConfig};
pub use timers::{Phase, PhaseScheduler};

/// Per-frame work that runs before the fixed physics loop of the same frame,
/// so velocity commands written here are integrated this frame.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum FrameSystems {
    /// Input sampling, contact bookkeeping, sensor decay, probes.
    Sense,
    /// Controllers and their timers.
    Decide,
}

/// Work done once per fixed physics step, ahead of the physics solver.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum PhysicsStepSystems {
    Actuate,
}

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        let run_config = RunConfig::default();
        let rng = AiRng::from_seed(run_config.seed);

        app.insert_resource(run_config)
            .insert_resource(rng)
            .configure_sets(
                RunFixedMainLoop,
                (FrameSystems::Sense, FrameSystems::Decide)
                    .chain()
                    .in_set(RunFixedMainLoopSystems::BeforeFixedMainLoop),
            )
            .configure_sets(FixedUpdate, PhysicsStepSystems::Actuate)
            .add_systems(Startup, (systems::setup_camera, systems::announce_run));
    }
}
