//! Combat domain: player action coordination.
//!
//! The player's behavior is a handful of independent flags rather than one
//! state enum, because blocking and the post-attack movement lockout overlap
//! freely with the other actions. Guards on each request keep the flags in a
//! valid combination: a dash and an attack are never active together, and no
//! attack starts in the air.
//!
//! Every timed sub-phase (attack windup, movement lockout, attack cooldown,
//! dash burst, dash recovery, dash cooldown, block recovery) is an entry in a
//! [`PhaseScheduler`], advanced by the frame delta.

use bevy::prelude::*;
use std::fmt;

use crate::combat::resources::PlayerTuning;
use crate::core::{Phase, PhaseScheduler};
use crate::movement::{Facing, GroundSensor, MovementIntent, VelocitySink};
use crate::sprites::{AnimationSink, params};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionPhase {
    /// Delay between the attack press and the strike
    AttackWindup,
    /// Post-strike movement lockout (grounded strikes only)
    MovementDelay,
    /// Trailing delay before the next attack may start
    AttackCooldown,
    DashActive,
    DashRecovery,
    DashCooldown,
    BlockRecovery,
}

/// Why a request was dropped. Never fatal; the caller only logs it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardRejection {
    Dead,
    Airborne,
    AlreadyAttacking,
    AlreadyDashing,
    DashOnCooldown,
    StandingStill,
    BlockRecovering,
}

impl fmt::Display for GuardRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            GuardRejection::Dead => "agent is dead",
            GuardRejection::Airborne => "not grounded",
            GuardRejection::AlreadyAttacking => "attack already in progress",
            GuardRejection::AlreadyDashing => "dash already in progress",
            GuardRejection::DashOnCooldown => "dash is on cooldown",
            GuardRejection::StandingStill => "cannot dash while standing still",
            GuardRejection::BlockRecovering => "block is recovering",
        };
        f.write_str(reason)
    }
}

/// Position in the three-strike combo. Only 0, 1 and 2 are representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ComboIndex(u8);

impl ComboIndex {
    pub const LEN: u8 = 3;

    pub fn new(index: u8) -> Self {
        Self(index % Self::LEN)
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn next(self) -> Self {
        Self::new(self.0 + 1)
    }

    /// Animation trigger for the strike at this index.
    pub fn trigger(self) -> &'static str {
        match self.0 {
            0 => params::ATTACK_1,
            1 => params::ATTACK_2,
            _ => params::ATTACK_3,
        }
    }
}

const ATTACK_TRIGGERS: [&str; 3] = [params::ATTACK_1, params::ATTACK_2, params::ATTACK_3];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActionFlags {
    pub is_dashing: bool,
    pub is_attacking: bool,
    pub is_movement_delayed: bool,
    /// Block button held this frame
    pub is_idle_blocking: bool,
    /// Recovery after a block press
    pub is_block_delayed: bool,
    pub is_dash_on_cooldown: bool,
}

impl ActionFlags {
    /// Whether player input is masked out of the horizontal velocity.
    pub fn movement_locked(&self) -> bool {
        self.is_attacking || self.is_movement_delayed || self.blocking_locked()
    }

    pub fn blocking_locked(&self) -> bool {
        self.is_idle_blocking || self.is_block_delayed
    }
}

/// Action buttons that went down this frame, plus the block level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActionRequests {
    pub jump: bool,
    pub dash: bool,
    pub attack: bool,
    pub block: bool,
    pub block_held: bool,
}

/// Everything the machine samples at the top of a frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameInput {
    pub dt: f32,
    pub intent: MovementIntent,
    pub requests: ActionRequests,
}

/// Noteworthy results of one update, for systems outside this layer.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameOutcome {
    pub jumped: bool,
    pub dash_started: bool,
    pub strike: Option<ComboIndex>,
}

#[derive(Component, Debug, Clone)]
pub struct ActionStateMachine {
    pub flags: ActionFlags,
    pub combo: ComboIndex,
    pub facing: Facing,
    intent: MovementIntent,
    dash_direction: f32,
    alive: bool,
    phases: PhaseScheduler<ActionPhase>,
}

impl Default for ActionStateMachine {
    fn default() -> Self {
        Self {
            flags: ActionFlags::default(),
            combo: ComboIndex::default(),
            facing: Facing::default(),
            intent: MovementIntent::NONE,
            dash_direction: 1.0,
            alive: true,
            phases: PhaseScheduler::default(),
        }
    }
}

impl ActionStateMachine {
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Intent after masking; this is what the physics step turns into velocity.
    pub fn intent(&self) -> MovementIntent {
        self.intent
    }

    /// True only during the forced-velocity burst, not the recovery slide.
    pub fn is_dash_active(&self) -> bool {
        self.phases.is_active(ActionPhase::DashActive)
    }

    pub fn phase_remaining(&self, phase: ActionPhase) -> Option<f32> {
        self.phases.remaining(phase)
    }

    /// Update phase: resolve expired timers, apply the block level, then
    /// handle this frame's requests.
    pub fn update(
        &mut self,
        frame: &FrameInput,
        tuning: &PlayerTuning,
        sensor: &mut GroundSensor,
        body: &mut impl VelocitySink,
        anim: &mut impl AnimationSink,
    ) -> FrameOutcome {
        let mut outcome = FrameOutcome::default();
        if !self.alive {
            self.intent = MovementIntent::NONE;
            return outcome;
        }

        self.advance_phases(frame.dt, tuning, sensor.is_grounded(), anim, &mut outcome);

        self.flags.is_idle_blocking = frame.requests.block_held;
        anim.set_bool(params::IDLE_BLOCK, self.flags.is_idle_blocking);

        self.apply_intent(frame.intent);

        let requests = frame.requests;
        // Dash first: a dash owns the vertical velocity, so a jump in the
        // same frame is rejected instead of being overwritten
        if requests.dash {
            match self.request_dash(tuning, body, anim) {
                Ok(()) => outcome.dash_started = true,
                Err(reason) => debug!("Dash rejected: {}", reason),
            }
        }
        if requests.jump {
            match self.request_jump(tuning, sensor, body, anim) {
                Ok(()) => outcome.jumped = true,
                Err(GuardRejection::Airborne) => {
                    warn!("Attempted to jump while not grounded!");
                }
                Err(reason) => debug!("Jump rejected: {}", reason),
            }
        }
        if requests.attack {
            if let Err(reason) = self.request_attack(tuning, sensor.is_grounded()) {
                debug!("Attack rejected: {}", reason);
            }
        }
        if requests.block {
            if let Err(reason) = self.request_block(tuning, anim) {
                debug!("Block rejected: {}", reason);
            }
        }

        // Requests may have locked movement for the rest of this frame
        self.apply_intent(frame.intent);
        let state = if self.intent.is_moving() {
            params::STATE_RUN
        } else {
            params::STATE_IDLE
        };
        anim.set_integer(params::ANIMATION_STATE, state);

        outcome
    }

    /// Physics phase: turn the current state into a horizontal velocity.
    pub fn physics_step(
        &mut self,
        tuning: &PlayerTuning,
        grounded: bool,
        body: &mut impl VelocitySink,
        anim: &mut impl AnimationSink,
    ) {
        anim.set_bool(params::IS_GROUNDED, grounded);
        if !self.alive {
            return;
        }

        if self.is_dash_active() {
            body.set_velocity(Vec2::new(self.dash_direction * tuning.dash_velocity(), 0.0));
        } else if self.flags.is_dashing {
            // Recovery slide keeps whatever momentum the dash left
        } else {
            body.set_horizontal(self.intent.horizontal * tuning.move_speed);
        }
    }

    pub fn request_jump(
        &mut self,
        tuning: &PlayerTuning,
        sensor: &mut GroundSensor,
        body: &mut impl VelocitySink,
        anim: &mut impl AnimationSink,
    ) -> Result<(), GuardRejection> {
        if !self.alive {
            return Err(GuardRejection::Dead);
        }
        if self.flags.is_dashing {
            return Err(GuardRejection::AlreadyDashing);
        }
        if !sensor.is_grounded() {
            return Err(GuardRejection::Airborne);
        }

        body.set_vertical(tuning.jump_force);
        sensor.disable(tuning.jump_sensor_suppression);
        anim.set_trigger(params::JUMP);
        debug!("Player jumped");
        Ok(())
    }

    /// Dash along the current facing. Needs nonzero (unmasked) input, so a
    /// standing or movement-locked player cannot dash.
    pub fn request_dash(
        &mut self,
        tuning: &PlayerTuning,
        body: &mut impl VelocitySink,
        anim: &mut impl AnimationSink,
    ) -> Result<(), GuardRejection> {
        if !self.alive {
            return Err(GuardRejection::Dead);
        }
        if self.flags.is_dashing {
            return Err(GuardRejection::AlreadyDashing);
        }
        if self.flags.is_dash_on_cooldown {
            return Err(GuardRejection::DashOnCooldown);
        }
        if self.flags.is_attacking {
            return Err(GuardRejection::AlreadyAttacking);
        }
        if !self.intent.is_moving() {
            return Err(GuardRejection::StandingStill);
        }

        self.flags.is_dashing = true;
        self.dash_direction = self.facing.sign();
        body.set_velocity(Vec2::new(self.dash_direction * tuning.dash_velocity(), 0.0));
        anim.set_trigger(params::ROLL);
        self.phases.start(ActionPhase::DashActive, tuning.dash_duration);
        debug!("Dash started towards {:?}", self.facing);
        Ok(())
    }

    /// Start the attack windup. The strike itself fires when the windup ends.
    pub fn request_attack(
        &mut self,
        tuning: &PlayerTuning,
        grounded: bool,
    ) -> Result<(), GuardRejection> {
        if !self.alive {
            return Err(GuardRejection::Dead);
        }
        if self.flags.is_attacking {
            return Err(GuardRejection::AlreadyAttacking);
        }
        if self.flags.is_dashing {
            return Err(GuardRejection::AlreadyDashing);
        }
        if !grounded {
            return Err(GuardRejection::Airborne);
        }

        self.flags.is_attacking = true;
        self.phases
            .start(ActionPhase::AttackWindup, tuning.initial_attack_delay);
        debug!("Attack started");
        Ok(())
    }

    /// Block press. Suppressed entirely while the previous block recovers.
    pub fn request_block(
        &mut self,
        tuning: &PlayerTuning,
        anim: &mut impl AnimationSink,
    ) -> Result<(), GuardRejection> {
        if !self.alive {
            return Err(GuardRejection::Dead);
        }
        if self.flags.is_block_delayed {
            return Err(GuardRejection::BlockRecovering);
        }

        anim.set_trigger(params::BLOCK);
        self.flags.is_block_delayed = true;
        self.phases
            .start(ActionPhase::BlockRecovery, tuning.block_recovery);
        debug!("Block activated");
        Ok(())
    }

    /// Terminal. Abandons every running phase and releases all locks.
    /// Returns false if the agent was already dead.
    pub fn kill(&mut self, body: &mut impl VelocitySink, anim: &mut impl AnimationSink) -> bool {
        if !self.alive {
            return false;
        }

        self.alive = false;
        let abandoned = self.phases.cancel_all();
        self.flags = ActionFlags::default();
        self.intent = MovementIntent::NONE;
        body.set_horizontal(0.0);
        anim.set_integer(params::ANIMATION_STATE, params::STATE_IDLE);
        anim.set_trigger(params::DEATH);
        info!("Player died, {} phases abandoned", abandoned);
        true
    }

    fn apply_intent(&mut self, raw: MovementIntent) {
        self.intent = raw.masked(self.flags.movement_locked());
        if self.flags.is_dashing {
            return;
        }
        if let Some(facing) = self.intent.facing() {
            self.facing = facing;
        }
    }

    fn advance_phases(
        &mut self,
        dt: f32,
        tuning: &PlayerTuning,
        grounded: bool,
        anim: &mut impl AnimationSink,
        outcome: &mut FrameOutcome,
    ) {
        let flags = &mut self.flags;
        let combo = &mut self.combo;

        self.phases.tick(dt, |phase| match phase {
            ActionPhase::AttackWindup => {
                *combo = combo.next();
                for trigger in ATTACK_TRIGGERS {
                    anim.reset_trigger(trigger);
                }
                anim.set_trigger(combo.trigger());
                outcome.strike = Some(*combo);
                debug!("Performing {}", combo.trigger());

                if grounded {
                    flags.is_movement_delayed = true;
                    Some(Phase::new(ActionPhase::MovementDelay, tuning.movement_delay))
                } else {
                    Some(Phase::new(ActionPhase::AttackCooldown, tuning.attack_delay))
                }
            }
            ActionPhase::MovementDelay => {
                flags.is_movement_delayed = false;
                Some(Phase::new(ActionPhase::AttackCooldown, tuning.attack_delay))
            }
            ActionPhase::AttackCooldown => {
                flags.is_attacking = false;
                debug!("Attack {} finished", combo.get() + 1);
                None
            }
            ActionPhase::DashActive => {
                Some(Phase::new(ActionPhase::DashRecovery, tuning.dash_recovery))
            }
            ActionPhase::DashRecovery => {
                flags.is_dashing = false;
                flags.is_dash_on_cooldown = true;
                debug!("Dash ended");
                Some(Phase::new(ActionPhase::DashCooldown, tuning.dash_cooldown))
            }
            ActionPhase::DashCooldown => {
                flags.is_dash_on_cooldown = false;
                debug!("Dash cooldown finished");
                None
            }
            ActionPhase::BlockRecovery => {
                flags.is_block_delayed = false;
                None
            }
        });
    }
}
