//! Movement domain: physics boundary used by the controllers.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::{Facing, GameLayer};

/// Write target for a controller's velocity commands.
pub trait VelocitySink {
    fn velocity(&self) -> Vec2;
    fn set_velocity(&mut self, velocity: Vec2);

    fn set_horizontal(&mut self, vx: f32) {
        let current = self.velocity();
        self.set_velocity(Vec2::new(vx, current.y));
    }

    fn set_vertical(&mut self, vy: f32) {
        let current = self.velocity();
        self.set_velocity(Vec2::new(current.x, vy));
    }
}

impl VelocitySink for LinearVelocity {
    fn velocity(&self) -> Vec2 {
        self.0
    }

    fn set_velocity(&mut self, velocity: Vec2) {
        self.0 = velocity;
    }
}

impl VelocitySink for Vec2 {
    fn velocity(&self) -> Vec2 {
        *self
    }

    fn set_velocity(&mut self, velocity: Vec2) {
        *self = velocity;
    }
}

/// Short forward query for obstacles.
pub trait ForwardProbe {
    fn cast_forward(&self, origin: Vec2, facing: Facing, distance: f32) -> bool;
}

impl ForwardProbe for SpatialQuery<'_, '_> {
    fn cast_forward(&self, origin: Vec2, facing: Facing, distance: f32) -> bool {
        // Only solid level geometry blocks a patrol leg
        let filter = SpatialQueryFilter::from_mask([GameLayer::Ground, GameLayer::Wall]);
        let direction = match facing {
            Facing::Right => Dir2::X,
            Facing::Left => Dir2::NEG_X,
        };

        self.cast_ray(origin, direction, distance, true, &filter)
            .is_some()
    }
}
