//! Debug tooling for fast iteration and testing.
//!
//! Features:
//! - F3: gizmo overlay (detection radius, patrol target, facing, grounded)
//! - F4: log the player's action flags
//! - F5: kill the player
//! - F6: spawn an enemy ahead of the player
//! - F7: text overlay with player state, enemy modes and run seed

mod state;
mod systems;
mod ui;


use bevy::prelude::*;

pub use state::DebugState;

pub struct DebugPlugin;

impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DebugState>()
            .add_systems(
                Update,
                (
                    systems::handle_debug_hotkeys,
                    systems::update_status_message,
                    ui::update_debug_info_overlay,
                )
                    .chain(),
            )
            .add_systems(
                Update,
                systems::draw_debug_gizmos.run_if(|state: Res<DebugState>| state.show_gizmos),
            );
    }
}
