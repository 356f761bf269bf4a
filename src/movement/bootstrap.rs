//! Movement domain: player and test level bootstrap.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::combat::ActionStateMachine;
use crate::movement::{
    Facing, FootSensor, GameLayer, Ground, GroundSensor, Ladder, LadderClimb, Player, Wall,
};
use crate::sprites::{AfterimageEmitter, Animator};

/// Player body size in world units
pub const PLAYER_SIZE: Vec2 = Vec2::new(0.8, 1.6);

/// Foot sensor thickness in world units
const FOOT_SENSOR_HEIGHT: f32 = 0.1;

pub(crate) fn spawn_player(mut commands: Commands) {
    let player = commands
        .spawn((
            // Identity & actions
            (
                Player,
                ActionStateMachine::default(),
                GroundSensor::default(),
                LadderClimb::default(),
                Animator::default(),
                Facing::default(),
                AfterimageEmitter::default(),
            ),
            // Rendering
            Sprite {
                color: Color::srgb(0.9, 0.9, 0.9),
                custom_size: Some(PLAYER_SIZE),
                ..default()
            },
            Transform::from_xyz(0.0, 0.0, 1.0),
            // Physics
            (
                RigidBody::Dynamic,
                Collider::rectangle(PLAYER_SIZE.x, PLAYER_SIZE.y),
                LockedAxes::ROTATION_LOCKED,
                LinearVelocity::default(),
                GravityScale(0.0), // Gravity is applied by the movement systems
                Friction::new(0.0),
                CollisionLayers::new(
                    GameLayer::Player,
                    [GameLayer::Ground, GameLayer::Wall, GameLayer::Sensor],
                ),
            ),
        ))
        .id();

    spawn_foot_sensor(&mut commands, player, PLAYER_SIZE);
    info!("Spawned player {:?}", player);
}

/// Attach a thin sensor strip under the feet of `owner`, whose ground
/// contacts feed the owner's `GroundSensor`.
pub fn spawn_foot_sensor(commands: &mut Commands, owner: Entity, body_size: Vec2) -> Entity {
    commands
        .spawn((
            FootSensor { owner },
            Collider::rectangle(body_size.x * 0.9, FOOT_SENSOR_HEIGHT),
            Sensor,
            CollisionEventsEnabled,
            CollisionLayers::new(GameLayer::Probe, [GameLayer::Ground]),
            Transform::from_xyz(0.0, -body_size.y * 0.5, 0.0),
            ChildOf(owner),
        ))
        .id()
}

fn spawn_solid(
    commands: &mut Commands,
    center: Vec2,
    size: Vec2,
    layer: GameLayer,
    marker: impl Bundle,
) {
    commands.spawn((
        marker,
        Sprite {
            color: Color::srgb(0.3, 0.32, 0.38),
            custom_size: Some(size),
            ..default()
        },
        Transform::from_xyz(center.x, center.y, 0.0),
        RigidBody::Static,
        Collider::rectangle(size.x, size.y),
        CollisionLayers::new(
            layer,
            [GameLayer::Player, GameLayer::Enemy, GameLayer::Probe],
        ),
    ));
}

pub(crate) fn spawn_test_level(mut commands: Commands) {
    // Floor, top surface at y = -1
    spawn_solid(
        &mut commands,
        Vec2::new(0.0, -1.5),
        Vec2::new(40.0, 1.0),
        GameLayer::Ground,
        Ground,
    );
    // Platforms
    spawn_solid(
        &mut commands,
        Vec2::new(6.0, 1.5),
        Vec2::new(4.0, 0.4),
        GameLayer::Ground,
        Ground,
    );
    spawn_solid(
        &mut commands,
        Vec2::new(-3.0, 3.3),
        Vec2::new(3.0, 0.4),
        GameLayer::Ground,
        Ground,
    );
    // Boundary walls
    for x in [-20.0, 20.0] {
        spawn_solid(
            &mut commands,
            Vec2::new(x, 3.0),
            Vec2::new(1.0, 10.0),
            GameLayer::Wall,
            Wall,
        );
    }

    // Ladder up to the left platform
    commands.spawn((
        Ladder,
        Sprite {
            color: Color::srgba(0.6, 0.45, 0.2, 0.6),
            custom_size: Some(Vec2::new(0.8, 4.5)),
            ..default()
        },
        Transform::from_xyz(-3.0, 1.25, -0.5),
        RigidBody::Static,
        Collider::rectangle(0.8, 4.5),
        Sensor,
        CollisionEventsEnabled,
        CollisionLayers::new(GameLayer::Sensor, [GameLayer::Player]),
    ));

    info!("Test level spawned");
}
