//! Movement domain: debounced ground contact sensor.

use bevy::prelude::*;

/// Saturating contact counter plus a suppression timer.
///
/// While the timer runs the sensor reports "airborne" no matter how many
/// contacts are open.
#[derive(Component, Debug, Default, Clone)]
pub struct GroundSensor {
    collision_count: u32,
    disable_timer: f32,
}

impl GroundSensor {
    pub fn register_contact_begin(&mut self) {
        self.collision_count = self.collision_count.saturating_add(1);
        trace!("[GroundSensor] contact begin, total: {}", self.collision_count);
    }

    /// Unpaired ends are ignored rather than driving the count negative.
    pub fn register_contact_end(&mut self) {
        if self.collision_count == 0 {
            debug!("[GroundSensor] contact end without a matching begin, ignored");
            return;
        }
        self.collision_count -= 1;
        trace!("[GroundSensor] contact end, total: {}", self.collision_count);
    }

    pub fn disable(&mut self, duration: f32) {
        self.disable_timer = if duration.is_finite() {
            duration.max(0.0)
        } else {
            0.0
        };
        debug!("[GroundSensor] disabled for {:.2}s", self.disable_timer);
    }

    pub fn is_grounded(&self) -> bool {
        self.disable_timer <= 0.0 && self.collision_count > 0
    }

    /// Decay the suppression timer, floored at zero.
    pub fn tick(&mut self, dt: f32) {
        if self.disable_timer > 0.0 {
            self.disable_timer = (self.disable_timer - dt.max(0.0)).max(0.0);
        }
    }

    pub fn contact_count(&self) -> u32 {
        self.collision_count
    }

    pub fn disabled_for(&self) -> f32 {
        self.disable_timer
    }
}
