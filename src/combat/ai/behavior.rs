//! Combat domain: enemy patrol, detection and chase behavior.
//!
//! Like the player, the enemy keeps independent flags (`is_chasing`,
//! `is_waiting`, `is_attacking`) rather than one state enum, and the only
//! timed pieces (periodic re-target, idle pause, attack hold) run on a
//! [`PhaseScheduler`]. [`EnemyBehavior::mode`] derives a single readable mode
//! for logs and the debug overlay.

use bevy::prelude::*;
use rand::Rng;

use crate::combat::actions::GuardRejection;
use crate::combat::resources::{EnemyTuning, PatrolBoundsDef};
use crate::core::{Phase, PhaseScheduler};
use crate::movement::Facing;
use crate::sprites::{AnimationSink, params};

/// The re-target phase chains itself, so its interval must stay positive.
const MIN_RETARGET_INTERVAL: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyMode {
    Patrol,
    PatrolWaiting,
    Chasing,
    Dead,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyPhase {
    /// Unconditional periodic patrol re-target
    Retarget,
    /// Idle pause between patrol legs
    IdlePause,
    /// How long the "attacking" flag stays raised after an attack
    AttackHold,
}

/// Patrol range on the x axis. Always `min_x <= max_x`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PatrolBounds {
    pub min_x: f32,
    pub max_x: f32,
}

impl PatrolBounds {
    pub fn fixed(min_x: f32, max_x: f32) -> Self {
        if min_x <= max_x {
            Self { min_x, max_x }
        } else {
            Self {
                min_x: max_x,
                max_x: min_x,
            }
        }
    }

    pub fn around(spawn_x: f32, half_width: f32) -> Self {
        let half_width = half_width.abs();
        Self::fixed(spawn_x - half_width, spawn_x + half_width)
    }

    /// Computed once, at spawn.
    pub fn from_def(def: PatrolBoundsDef, spawn_x: f32) -> Self {
        match def {
            PatrolBoundsDef::Fixed { min_x, max_x } => Self::fixed(min_x, max_x),
            PatrolBoundsDef::AroundSpawn { half_width } => Self::around(spawn_x, half_width),
        }
    }

    #[cfg(test)]
    pub fn contains(&self, x: f32) -> bool {
        (self.min_x..=self.max_x).contains(&x)
    }

    pub fn roll(&self, rng: &mut impl Rng) -> f32 {
        if self.min_x < self.max_x {
            rng.random_range(self.min_x..=self.max_x)
        } else {
            self.min_x
        }
    }
}

/// Read-only snapshot taken at the start of the enemy's frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EnemySenses {
    pub position: Vec2,
    /// Tracked entity position, if there is one
    pub target: Option<Vec2>,
    /// Forward probe hit something solid within the raycast distance
    pub obstacle_ahead: bool,
}

#[derive(Component, Debug, Clone)]
pub struct EnemyBehavior {
    pub is_chasing: bool,
    pub is_waiting: bool,
    pub is_attacking: bool,
    pub target_position: Vec2,
    pub facing: Facing,
    pub bounds: PatrolBounds,
    pub detection_radius: f32,
    pub move_speed: f32,
    retarget_every: f32,
    alive: bool,
    phases: PhaseScheduler<EnemyPhase>,
}

impl EnemyBehavior {
    pub fn new(
        spawn: Vec2,
        bounds: PatrolBounds,
        tuning: &EnemyTuning,
        rng: &mut impl Rng,
    ) -> Self {
        let mut phases = PhaseScheduler::default();
        phases.start(
            EnemyPhase::Retarget,
            tuning.change_direction_time.max(MIN_RETARGET_INTERVAL),
        );

        Self {
            is_chasing: false,
            is_waiting: false,
            is_attacking: false,
            target_position: Vec2::new(bounds.roll(rng), spawn.y),
            facing: Facing::default(),
            bounds,
            detection_radius: tuning.detection_radius,
            move_speed: tuning.move_speed,
            retarget_every: tuning.change_direction_time.max(MIN_RETARGET_INTERVAL),
            alive: true,
            phases,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn mode(&self) -> EnemyMode {
        if !self.alive {
            EnemyMode::Dead
        } else if self.is_chasing {
            EnemyMode::Chasing
        } else if self.is_waiting {
            EnemyMode::PatrolWaiting
        } else {
            EnemyMode::Patrol
        }
    }

    pub fn phase_remaining(&self, phase: EnemyPhase) -> Option<f32> {
        self.phases.remaining(phase)
    }

    /// One frame of behavior. Returns the horizontal velocity to command.
    pub fn update(
        &mut self,
        dt: f32,
        senses: &EnemySenses,
        tuning: &EnemyTuning,
        rng: &mut impl Rng,
        anim: &mut impl AnimationSink,
    ) -> f32 {
        if !self.alive {
            return 0.0;
        }

        self.advance_phases(dt, senses.position.y, rng, anim);
        self.decide(senses, rng);

        let velocity = if self.is_chasing {
            self.chase(dt, senses)
        } else if self.is_waiting {
            0.0
        } else {
            self.patrol(dt, senses, tuning)
        };

        anim.set_bool(params::IS_WALKING, velocity != 0.0 && !self.is_waiting);
        velocity
    }

    pub fn apply_hit_reaction(&mut self, anim: &mut impl AnimationSink) -> Result<(), GuardRejection> {
        if !self.alive {
            return Err(GuardRejection::Dead);
        }
        anim.set_trigger(params::TAKE_HIT);
        Ok(())
    }

    pub fn apply_shield(&mut self, anim: &mut impl AnimationSink) -> Result<(), GuardRejection> {
        if !self.alive {
            return Err(GuardRejection::Dead);
        }
        anim.set_trigger(params::SHIELD);
        Ok(())
    }

    /// Chasing, not already attacking, and the target within `attack_range`.
    /// The attack itself arrives as an exposed action.
    pub fn wants_attack(&self, senses: &EnemySenses, tuning: &EnemyTuning) -> bool {
        if !self.alive || !self.is_chasing || self.is_attacking {
            return false;
        }
        senses
            .target
            .is_some_and(|target| target.distance(senses.position) <= tuning.attack_range)
    }

    /// Pick one of the two attack signals at random and hold the attacking
    /// flag. Movement is not gated here.
    pub fn perform_attack(
        &mut self,
        tuning: &EnemyTuning,
        rng: &mut impl Rng,
        anim: &mut impl AnimationSink,
    ) -> Result<(), GuardRejection> {
        if !self.alive {
            return Err(GuardRejection::Dead);
        }
        if self.is_attacking {
            return Err(GuardRejection::AlreadyAttacking);
        }

        self.is_attacking = true;
        anim.set_bool(params::IS_ATTACKING, true);
        let trigger = if rng.random_bool(0.5) {
            params::ENEMY_ATTACK_1
        } else {
            params::ENEMY_ATTACK_2
        };
        anim.set_trigger(trigger);
        self.phases
            .start(EnemyPhase::AttackHold, tuning.attack_hold_time);
        Ok(())
    }

    /// Terminal. Returns false if already dead.
    pub fn die(&mut self, anim: &mut impl AnimationSink) -> bool {
        if !self.alive {
            return false;
        }

        self.alive = false;
        self.phases.cancel_all();
        self.is_chasing = false;
        self.is_waiting = false;
        self.is_attacking = false;
        anim.set_bool(params::IS_WALKING, false);
        anim.set_bool(params::IS_ATTACKING, false);
        anim.set_trigger(params::DEATH);
        true
    }

    fn roll_target(&mut self, y: f32, rng: &mut impl Rng) {
        self.target_position = Vec2::new(self.bounds.roll(rng), y);
    }

    fn advance_phases(
        &mut self,
        dt: f32,
        y: f32,
        rng: &mut impl Rng,
        anim: &mut impl AnimationSink,
    ) {
        let retarget_every = self.retarget_every;
        let mut expired = Vec::new();
        self.phases.tick(dt, |phase| {
            expired.push(phase);
            match phase {
                EnemyPhase::Retarget => Some(Phase::new(EnemyPhase::Retarget, retarget_every)),
                _ => None,
            }
        });

        for phase in expired {
            match phase {
                EnemyPhase::Retarget => self.roll_target(y, rng),
                EnemyPhase::IdlePause => {
                    self.is_waiting = false;
                    self.roll_target(y, rng);
                    trace!("Idle pause over, next target x = {:.2}", self.target_position.x);
                }
                EnemyPhase::AttackHold => {
                    self.is_attacking = false;
                    anim.set_bool(params::IS_ATTACKING, false);
                }
            }
        }
    }

    fn decide(&mut self, senses: &EnemySenses, rng: &mut impl Rng) {
        let Some(target) = senses.target else {
            if self.is_chasing {
                self.stop_chasing(senses.position.y, rng);
            }
            return;
        };

        let to_target = target - senses.position;
        let distance = to_target.length();

        if self.is_chasing {
            if distance >= self.detection_radius {
                self.stop_chasing(senses.position.y, rng);
            }
        } else if distance < self.detection_radius && self.facing.vector().dot(to_target) > 0.0 {
            self.is_chasing = true;
            self.is_waiting = false;
            self.phases.cancel(EnemyPhase::IdlePause);
            debug!("Enemy spotted target at distance {:.2}", distance);
        }
    }

    fn stop_chasing(&mut self, y: f32, rng: &mut impl Rng) {
        self.is_chasing = false;
        self.roll_target(y, rng);
        debug!("Enemy lost target, patrolling to x = {:.2}", self.target_position.x);
    }

    fn chase(&mut self, dt: f32, senses: &EnemySenses) -> f32 {
        let Some(target) = senses.target else {
            return 0.0;
        };

        let dx = target.x - senses.position.x;
        if let Some(facing) = Facing::from_sign(dx) {
            self.facing = facing;
        }

        step_towards(dx, self.move_speed, dt)
    }

    fn patrol(&mut self, dt: f32, senses: &EnemySenses, tuning: &EnemyTuning) -> f32 {
        let dx = self.target_position.x - senses.position.x;
        if let Some(facing) = Facing::from_sign(dx) {
            self.facing = facing;
        }

        if senses.obstacle_ahead {
            self.start_waiting(tuning);
            return 0.0;
        }

        let velocity = step_towards(dx, self.move_speed, dt);
        let predicted = senses.position.x + velocity * dt.max(0.0);
        if (self.target_position.x - predicted).abs() < tuning.arrival_epsilon {
            self.start_waiting(tuning);
        }
        velocity
    }

    fn start_waiting(&mut self, tuning: &EnemyTuning) {
        if self.is_waiting {
            return;
        }
        self.is_waiting = true;
        self.phases.start(EnemyPhase::IdlePause, tuning.idle_time);
        trace!("Enemy waiting for {:.2}s", tuning.idle_time);
    }
}

/// Velocity that covers `dx` at no more than `speed`, without overshooting
/// within one frame of `dt`.
fn step_towards(dx: f32, speed: f32, dt: f32) -> f32 {
    if dx == 0.0 {
        return 0.0;
    }
    let max_speed = if dt > 0.0 {
        speed.min(dx.abs() / dt)
    } else {
        speed
    };
    dx.signum() * max_speed
}
