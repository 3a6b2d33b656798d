//! Baseline grounded locomotion.
//!
//! GroundControl drives the character's ground velocity toward an
//! input-derived target speed every fixed tick. It is also a seam for other
//! moves: its `deceleration` is externally mutable (rolling swaps it out and
//! restores the original), and `acceleration_locked` lets another move
//! suppress the acceleration arm while leaving braking live at the
//! substituted deceleration.

use bevy::prelude::*;

use crate::animator::AnimatorParams;
use crate::input::InputAxes;
use crate::math::approx_zero;
use crate::moves::{Move, MoveFx, MoveKind, MoveView};

/// Grounded acceleration/deceleration/top-speed driver.
#[derive(Component, Reflect, Debug, Clone)]
#[reflect(Component)]
pub struct GroundControl {
    /// Input axis polled for the movement direction.
    pub movement_axis: String,
    /// Negate the movement axis before use.
    pub invert_axis: bool,

    /// Acceleration toward the target speed, in units/s².
    pub acceleration: f32,
    /// Deceleration when reversing against current velocity, in units/s².
    /// Externally mutable: an override move may substitute its own value
    /// for the duration of its activity.
    pub deceleration: f32,
    /// Maximum driven ground speed, in units/s.
    pub top_speed: f32,
    /// Minimum ground speed for the host's slope gravity to apply, units/s.
    /// Consulted via [`slope_gravity_active`](Self::slope_gravity_active).
    pub min_slope_gravity_speed: f32,

    /// True while this tick's update accelerated toward the target.
    pub accelerating: bool,
    /// True while this tick's update decelerated against a reversal.
    pub braking: bool,
    /// When set, acceleration toward the target is suppressed. Braking
    /// against a reversal stays live, at whatever `deceleration` the
    /// locking move substituted.
    pub acceleration_locked: bool,

    /// Animator float fed the raw movement axis value. Empty = skip.
    pub input_axis_float: String,
    /// Animator bool fed whether movement input is active. Empty = skip.
    pub input_bool: String,
    /// Animator bool fed the accelerating flag. Empty = skip.
    pub accelerating_bool: String,
    /// Animator bool fed the braking flag. Empty = skip.
    pub braking_bool: String,
    /// Animator float fed `|ground velocity| / top speed`, clamped to
    /// `[0, 1]`. Empty = skip.
    pub top_speed_percent_float: String,
}

impl Default for GroundControl {
    fn default() -> Self {
        Self {
            movement_axis: "Horizontal".to_owned(),
            invert_axis: false,
            acceleration: 1.6875,
            deceleration: 18.0,
            top_speed: 3.6,
            min_slope_gravity_speed: 0.3,
            accelerating: false,
            braking: false,
            acceleration_locked: false,
            input_axis_float: String::new(),
            input_bool: String::new(),
            accelerating_bool: String::new(),
            braking_bool: String::new(),
            top_speed_percent_float: String::new(),
        }
    }
}

impl GroundControl {
    /// Create a ground control move with default tuning.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set the movement axis name.
    pub fn with_movement_axis(mut self, axis: impl Into<String>) -> Self {
        self.movement_axis = axis.into();
        self
    }

    /// Builder: set acceleration, deceleration, and top speed.
    pub fn with_tuning(mut self, acceleration: f32, deceleration: f32, top_speed: f32) -> Self {
        self.acceleration = acceleration;
        self.deceleration = deceleration;
        self.top_speed = top_speed;
        self
    }

    /// The signed movement input after the invert setting.
    fn movement_input(&self, input: &InputAxes) -> f32 {
        let value = input.axis(&self.movement_axis);
        if self.invert_axis {
            -value
        } else {
            value
        }
    }

    /// Whether the host's slope gravity should apply at the given ground
    /// velocity. Slow, driven characters stand firm on slopes.
    pub fn slope_gravity_active(&self, ground_velocity: f32) -> bool {
        ground_velocity.abs() >= self.min_slope_gravity_speed
    }
}

impl Move for GroundControl {
    const KIND: MoveKind = MoveKind::GroundControl;

    fn available(&self, view: &MoveView) -> bool {
        view.controller.grounded
    }

    fn should_perform(&self, view: &MoveView) -> bool {
        view.controller.grounded
    }

    fn should_end(&self, view: &MoveView) -> bool {
        !view.controller.grounded
    }

    fn on_active_fixed_update(&mut self, fx: &mut MoveFx) {
        self.accelerating = false;
        self.braking = false;

        let input = self.movement_input(fx.input);
        if approx_zero(input) {
            // No drive; the host's ground friction takes over.
            return;
        }

        let velocity = fx.controller.ground_velocity;
        let direction = input.signum();
        let target = input * self.top_speed;

        if velocity != 0.0 && velocity.signum() != direction {
            // Reversing against current motion. Braking stays live while
            // acceleration is locked; the locking move substitutes its own
            // deceleration value, so this applies that move's rate.
            self.braking = true;
            fx.controller.ground_velocity = velocity + self.deceleration * fx.dt * direction;
        } else if !self.acceleration_locked && (target - velocity) * direction > 0.0 {
            // Below the target speed in the driven direction.
            self.accelerating = true;
            let next = velocity + self.acceleration * fx.dt * direction;
            fx.controller.ground_velocity = if direction > 0.0 {
                next.min(target)
            } else {
                next.max(target)
            };
        }
    }

    fn on_active_exit(&mut self, _fx: &mut MoveFx) {
        self.accelerating = false;
        self.braking = false;
    }

    fn set_animator_parameters(&self, view: &MoveView, animator: &mut AnimatorParams) {
        let input = self.movement_input(view.input);

        if !self.input_axis_float.is_empty() {
            animator.set_float(self.input_axis_float.clone(), input);
        }
        if !self.input_bool.is_empty() {
            animator.set_bool(self.input_bool.clone(), !approx_zero(input));
        }
        if !self.accelerating_bool.is_empty() {
            animator.set_bool(self.accelerating_bool.clone(), self.accelerating);
        }
        if !self.braking_bool.is_empty() {
            animator.set_bool(self.braking_bool.clone(), self.braking);
        }
        if !self.top_speed_percent_float.is_empty() {
            let percent = if self.top_speed > 0.0 {
                (view.controller.ground_velocity.abs() / self.top_speed).clamp(0.0, 1.0)
            } else {
                0.0
            };
            animator.set_float(self.top_speed_percent_float.clone(), percent);
        }
    }
}
