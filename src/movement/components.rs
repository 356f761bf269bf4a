//! Movement domain: components and physics layers for locomotion.

use avian2d::prelude::*;
use bevy::prelude::*;

/// Physics layers for collision filtering
#[derive(PhysicsLayer, Clone, Copy, Debug, Default)]
pub enum GameLayer {
    #[default]
    Default,
    /// Ground surfaces (floors, platforms)
    Ground,
    /// Wall surfaces
    Wall,
    /// Player character
    Player,
    /// Enemy characters
    Enemy,
    /// Trigger volumes (ladders) - should not block movement
    Sensor,
    /// Foot probes that count ground contacts
    Probe,
}

#[derive(Component, Debug)]
pub struct Player;

/// Horizontal facing of an agent. Zero input never changes it.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

impl Facing {
    pub fn sign(self) -> f32 {
        match self {
            Facing::Right => 1.0,
            Facing::Left => -1.0,
        }
    }

    pub fn vector(self) -> Vec2 {
        Vec2::new(self.sign(), 0.0)
    }

    /// Facing implied by a horizontal value, `None` for zero.
    pub fn from_sign(x: f32) -> Option<Self> {
        if x > 0.0 {
            Some(Facing::Right)
        } else if x < 0.0 {
            Some(Facing::Left)
        } else {
            None
        }
    }
}

/// Marker for ground colliders
#[derive(Component, Debug)]
pub struct Ground;

/// Marker for wall colliders
#[derive(Component, Debug)]
pub struct Wall;

/// Marker for ladder trigger volumes
#[derive(Component, Debug)]
pub struct Ladder;

/// Sensor collider under an agent's feet; its contacts feed the owner's
/// `GroundSensor`.
#[derive(Component, Debug)]
pub struct FootSensor {
    pub owner: Entity,
}

/// Ladder overlap state. Overlapping ladders are counted like ground contacts.
#[derive(Component, Debug, Default)]
pub struct LadderClimb {
    overlaps: u32,
}

impl LadderClimb {
    pub fn enter(&mut self) {
        self.overlaps = self.overlaps.saturating_add(1);
    }

    pub fn exit(&mut self) {
        self.overlaps = self.overlaps.saturating_sub(1);
    }

    pub fn is_climbing(&self) -> bool {
        self.overlaps > 0
    }
}
