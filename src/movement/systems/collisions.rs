//! Movement domain: ground and ladder contact bookkeeping.

use avian2d::prelude::*;
use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::movement::{FootSensor, Ground, GroundSensor, Ladder, LadderClimb};

/// Feed foot-sensor contacts with ground colliders into the owners' sensors.
pub(crate) fn track_ground_contacts(
    mut started: MessageReader<CollisionStart>,
    mut ended: MessageReader<CollisionEnd>,
    feet: Query<&FootSensor>,
    grounds: Query<(), With<Ground>>,
    mut sensors: Query<&mut GroundSensor>,
) {
    let foot_owner = |a: Entity, b: Entity| -> Option<Entity> {
        let foot = feet.get(a).ok()?;
        grounds.contains(b).then_some(foot.owner)
    };

    let mut begins = Vec::new();
    for event in started.read() {
        let pairs = [
            (event.collider1, event.collider2),
            (event.collider2, event.collider1),
        ];
        begins.extend(pairs.into_iter().filter_map(|(a, b)| foot_owner(a, b)));
    }

    let mut ends = Vec::new();
    for event in ended.read() {
        let pairs = [
            (event.collider1, event.collider2),
            (event.collider2, event.collider1),
        ];
        ends.extend(pairs.into_iter().filter_map(|(a, b)| foot_owner(a, b)));
    }

    for owner in begins {
        if let Ok(mut sensor) = sensors.get_mut(owner) {
            sensor.register_contact_begin();
        }
    }
    for owner in ends {
        if let Ok(mut sensor) = sensors.get_mut(owner) {
            sensor.register_contact_end();
        }
    }
}

/// Count ladder volume overlaps for climbers.
pub(crate) fn track_ladder_contacts(
    mut started: MessageReader<CollisionStart>,
    mut ended: MessageReader<CollisionEnd>,
    ladders: Query<(), With<Ladder>>,
    mut climbers: Query<&mut LadderClimb>,
) {
    for event in started.read() {
        for (a, b) in [
            (event.collider1, event.collider2),
            (event.collider2, event.collider1),
        ] {
            if !ladders.contains(b) {
                continue;
            }
            if let Ok(mut climb) = climbers.get_mut(a) {
                let was_climbing = climb.is_climbing();
                climb.enter();
                if !was_climbing {
                    debug!("Started climbing");
                }
            }
        }
    }

    for event in ended.read() {
        for (a, b) in [
            (event.collider1, event.collider2),
            (event.collider2, event.collider1),
        ] {
            if !ladders.contains(b) {
                continue;
            }
            if let Ok(mut climb) = climbers.get_mut(a) {
                climb.exit();
                if !climb.is_climbing() {
                    debug!("Stopped climbing");
                }
            }
        }
    }
}

/// Decay every sensor's suppression timer by the frame delta.
pub(crate) fn decay_ground_sensors(time: Res<Time>, mut sensors: Query<&mut GroundSensor>) {
    let dt = time.delta_secs();
    for mut sensor in &mut sensors {
        sensor.tick(dt);
    }
}
