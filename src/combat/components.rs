//! Combat domain: components for damageable agents.

use bevy::prelude::*;

/// Marks a non-player agent driven by `EnemyBehavior`
#[derive(Component, Debug)]
pub struct Enemy;

/// Health component for damageable entities
#[derive(Component, Debug, Clone)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

impl Health {
    pub fn new(max: f32) -> Self {
        Self { current: max, max }
    }

    pub fn take_damage(&mut self, amount: f32) -> f32 {
        let actual = amount.max(0.0).min(self.current);
        self.current -= actual;
        actual
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0.0
    }
}

/// Defeated agent waiting to be removed
#[derive(Component, Debug)]
pub struct Corpse {
    pub remaining: f32,
}
