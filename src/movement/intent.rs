//! Movement domain: per-frame movement intent resolved from raw input.

use bevy::prelude::*;

use crate::movement::Facing;

/// Axis values closer to zero than this count as no input.
pub const AXIS_DEADZONE: f32 = 0.1;

/// Directional intent for one frame, each axis in [-1, 1].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MovementIntent {
    pub horizontal: f32,
    pub vertical: f32,
}

impl MovementIntent {
    pub const NONE: Self = Self {
        horizontal: 0.0,
        vertical: 0.0,
    };

    pub fn resolve(axis: Vec2) -> Self {
        Self {
            horizontal: resolve_axis(axis.x),
            vertical: resolve_axis(axis.y),
        }
    }

    /// Zero the horizontal axis when locked, so a stale sample cannot leak
    /// into the velocity.
    pub fn masked(self, locked: bool) -> Self {
        if locked {
            Self {
                horizontal: 0.0,
                ..self
            }
        } else {
            self
        }
    }

    pub fn is_moving(&self) -> bool {
        self.horizontal != 0.0
    }

    pub fn facing(&self) -> Option<Facing> {
        Facing::from_sign(self.horizontal)
    }
}

fn resolve_axis(value: f32) -> f32 {
    if !value.is_finite() || value.abs() < AXIS_DEADZONE {
        0.0
    } else {
        value.clamp(-1.0, 1.0)
    }
}
