//! Combat domain: enemy spawning.

use avian2d::prelude::*;
use bevy::prelude::*;
use rand::Rng;

use crate::combat::ai::{EnemyBehavior, PatrolBounds};
use crate::combat::components::{Enemy, Health};
use crate::combat::resources::EnemyTuning;
use crate::core::AiRng;
use crate::movement::{Facing, GameLayer, GroundSensor, spawn_foot_sensor};
use crate::sprites::Animator;

/// Enemy body size in world units
pub const ENEMY_SIZE: Vec2 = Vec2::new(0.8, 1.6);

/// Spawn points of the test level's enemies
const ENEMY_SPAWNS: [Vec2; 2] = [Vec2::new(3.0, 0.0), Vec2::new(-6.0, 0.0)];

/// Bundle for spawning a patrolling enemy
#[derive(Bundle)]
pub struct EnemyBundle {
    pub enemy: Enemy,
    pub behavior: EnemyBehavior,
    pub health: Health,
    pub sensor: GroundSensor,
    pub animator: Animator,
    pub facing: Facing,
    pub sprite: Sprite,
    pub transform: Transform,
    pub rigid_body: RigidBody,
    pub collider: Collider,
    pub collision_layers: CollisionLayers,
    pub velocity: LinearVelocity,
    pub locked_axes: LockedAxes,
    pub gravity_scale: GravityScale,
}

impl EnemyBundle {
    pub fn new(position: Vec2, tuning: &EnemyTuning, rng: &mut impl Rng) -> Self {
        let bounds = PatrolBounds::from_def(tuning.bounds, position.x);

        Self {
            enemy: Enemy,
            behavior: EnemyBehavior::new(position, bounds, tuning, rng),
            health: Health::new(tuning.max_health),
            sensor: GroundSensor::default(),
            animator: Animator::default(),
            facing: Facing::default(),
            sprite: Sprite {
                color: Color::srgb(0.75, 0.25, 0.3),
                custom_size: Some(ENEMY_SIZE),
                ..default()
            },
            transform: Transform::from_xyz(position.x, position.y, 0.0),
            rigid_body: RigidBody::Dynamic,
            collider: Collider::rectangle(ENEMY_SIZE.x, ENEMY_SIZE.y),
            collision_layers: CollisionLayers::new(
                GameLayer::Enemy,
                [GameLayer::Ground, GameLayer::Wall],
            ),
            velocity: LinearVelocity::default(),
            locked_axes: LockedAxes::ROTATION_LOCKED,
            gravity_scale: GravityScale(1.0),
        }
    }
}

pub fn spawn_enemy(
    commands: &mut Commands,
    position: Vec2,
    tuning: &EnemyTuning,
    rng: &mut impl Rng,
) -> Entity {
    let enemy = commands
        .spawn(EnemyBundle::new(position, tuning, rng))
        .id();
    spawn_foot_sensor(commands, enemy, ENEMY_SIZE);
    enemy
}

pub(crate) fn spawn_level_enemies(
    mut commands: Commands,
    tuning: Res<EnemyTuning>,
    mut rng: ResMut<AiRng>,
) {
    for position in ENEMY_SPAWNS {
        let enemy = spawn_enemy(&mut commands, position, &tuning, &mut rng.0);
        info!("Spawned enemy {:?} at {:?}", enemy, position);
    }
}
