//! Animation parameter sink.
//!
//! Controllers describe what an agent is doing through named bool, integer
//! and trigger parameters. Clip selection lives with the renderer; this
//! module only records the parameters and publishes triggers once per frame.

use bevy::ecs::message::{Message, MessageWriter};
use bevy::prelude::*;
use std::collections::HashMap;

/// Parameter names shared by the controllers and the renderer.
pub mod params {
    pub const ANIMATION_STATE: &str = "AnimationState";
    pub const IS_GROUNDED: &str = "IsGrounded";
    pub const IDLE_BLOCK: &str = "idleBlock";
    pub const JUMP: &str = "Jump";
    pub const ROLL: &str = "Roll";
    pub const BLOCK: &str = "Block";
    pub const ATTACK_1: &str = "Attack1";
    pub const ATTACK_2: &str = "Attack2";
    pub const ATTACK_3: &str = "Attack3";

    pub const IS_WALKING: &str = "isWalking";
    pub const IS_ATTACKING: &str = "isAttacking";
    pub const ENEMY_ATTACK_1: &str = "Attack1Trigger";
    pub const ENEMY_ATTACK_2: &str = "Attack2Trigger";
    pub const TAKE_HIT: &str = "TakeHitTrigger";
    pub const SHIELD: &str = "ShieldTrigger";
    pub const DEATH: &str = "DeathTrigger";

    /// `AnimationState` values
    pub const STATE_IDLE: i32 = 0;
    pub const STATE_RUN: i32 = 1;
}

/// Fire-and-forget animation parameters.
pub trait AnimationSink {
    fn set_bool(&mut self, name: &'static str, value: bool);
    fn set_integer(&mut self, name: &'static str, value: i32);
    fn set_trigger(&mut self, name: &'static str);
    fn reset_trigger(&mut self, name: &'static str);
}

/// Per-agent record of animation parameters and pending triggers.
#[derive(Component, Debug, Default, Clone)]
pub struct Animator {
    bools: HashMap<&'static str, bool>,
    integers: HashMap<&'static str, i32>,
    pending: Vec<&'static str>,
}

impl Animator {
    pub fn bool(&self, name: &str) -> bool {
        self.bools.get(name).copied().unwrap_or(false)
    }

    pub fn integer(&self, name: &str) -> i32 {
        self.integers.get(name).copied().unwrap_or(0)
    }

    #[cfg(test)]
    pub fn is_pending(&self, name: &str) -> bool {
        self.pending.iter().any(|pending| *pending == name)
    }

    pub fn pending_triggers(&self) -> &[&'static str] {
        &self.pending
    }

    pub fn drain_triggers(&mut self) -> Vec<&'static str> {
        std::mem::take(&mut self.pending)
    }
}

impl AnimationSink for Animator {
    fn set_bool(&mut self, name: &'static str, value: bool) {
        self.bools.insert(name, value);
    }

    fn set_integer(&mut self, name: &'static str, value: i32) {
        self.integers.insert(name, value);
    }

    fn set_trigger(&mut self, name: &'static str) {
        if !self.pending.contains(&name) {
            self.pending.push(name);
        }
    }

    fn reset_trigger(&mut self, name: &'static str) {
        self.pending.retain(|pending| *pending != name);
    }
}

/// Message fired for each trigger an agent raised this frame.
#[derive(Debug)]
pub struct AnimationTriggered {
    pub entity: Entity,
    pub trigger: &'static str,
}

impl Message for AnimationTriggered {}

/// System that publishes and clears pending triggers.
pub fn flush_animation_triggers(
    mut query: Query<(Entity, &mut Animator)>,
    mut triggered: MessageWriter<AnimationTriggered>,
) {
    for (entity, mut animator) in &mut query {
        if animator.pending_triggers().is_empty() {
            continue;
        }
        for trigger in animator.drain_triggers() {
            trace!("{:?} animation trigger {}", entity, trigger);
            triggered.write(AnimationTriggered { entity, trigger });
        }
    }
}
