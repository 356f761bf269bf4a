//! Core domain: camera and run setup.

use bevy::prelude::*;

use crate::core::resources::RunConfig;

/// World units are meters; this many pixels make one unit on screen.
pub const PIXELS_PER_UNIT: f32 = 48.0;

pub(crate) fn setup_camera(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        Projection::Orthographic(OrthographicProjection {
            scale: 1.0 / PIXELS_PER_UNIT,
            ..OrthographicProjection::default_2d()
        }),
    ));
}

pub(crate) fn announce_run(run_config: Res<RunConfig>) {
    info!("Starting run with seed: {}", run_config.seed);
}
