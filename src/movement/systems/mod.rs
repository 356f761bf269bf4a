//! Movement domain: system modules for locomotion updates.

pub(crate) mod collisions;
pub(crate) mod input;
pub(crate) mod movement;

pub(crate) use collisions::{decay_ground_sensors, track_ground_contacts, track_ladder_contacts};
pub(crate) use input::read_input;
pub(crate) use movement::{apply_climb, apply_player_gravity};
