//! Rolling.
//!
//! Rolling trades control for momentum: less slowdown uphill, more speed
//! downhill. While active it overrides the controller's ground friction and
//! slope gravity, borrows GroundControl's deceleration pipeline (substituting
//! its own value and locking acceleration), and shrinks the sensor hitbox.
//! Every override is snapshotted on entry and restored exactly on exit.

use bevy::prelude::*;

use crate::animator::AnimatorParams;
use crate::math::angle_in_range_deg;
use crate::moves::{Move, MoveFx, MoveKind, MoveView};

/// Rolling physics-override move.
#[derive(Component, Reflect, Debug, Clone)]
#[reflect(Component)]
pub struct Roll {
    /// Input axis polled for activation.
    pub activate_axis: String,
    /// Activate on negative axis input instead of positive (down on a
    /// vertical axis rather than up).
    pub require_negative: bool,
    /// Minimum ground speed required to start rolling, in units/s.
    /// Strict: exactly this speed does not qualify.
    pub min_activate_speed: f32,

    /// Change in sensor width (usually negative) while rolling, in units.
    pub width_change: f32,
    /// Change in sensor height (usually negative) while rolling, in units.
    /// Applied half to the top offset and half to the bottom offset so the
    /// ground sensors stay on the ground.
    pub height_change: f32,
    /// Slope gravity while rolling uphill, in units/s².
    pub uphill_gravity: f32,
    /// Slope gravity while rolling downhill, in units/s².
    pub downhill_gravity: f32,
    /// Deceleration substituted into GroundControl while rolling, units/s².
    pub deceleration: f32,
    /// Ground friction while rolling, in units/s².
    pub friction: f32,

    /// Animator bool fed the uphill flag. Empty = skip.
    pub uphill_bool: String,

    /// Whether the roll is currently classified as uphill. Reclassified each
    /// tick the ground velocity is nonzero; holds its value while stalled.
    pub uphill: bool,

    // Transient state, valid only while active.
    right_direction: bool,
    original_slope_gravity: f32,
    original_friction: f32,
    original_deceleration: f32,
}

impl Default for Roll {
    fn default() -> Self {
        Self {
            activate_axis: "Vertical".to_owned(),
            require_negative: true,
            min_activate_speed: 0.61875,
            width_change: -0.04,
            height_change: -0.10,
            uphill_gravity: 2.8125,
            downhill_gravity: 11.25,
            deceleration: 4.5,
            friction: 0.8451,
            uphill_bool: String::new(),
            uphill: false,
            right_direction: false,
            original_slope_gravity: 0.0,
            original_friction: 0.0,
            original_deceleration: 0.0,
        }
    }
}

impl Roll {
    /// Create a roll move with default tuning.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set the activation axis and polarity.
    pub fn with_activation(mut self, axis: impl Into<String>, require_negative: bool) -> Self {
        self.activate_axis = axis.into();
        self.require_negative = require_negative;
        self
    }

    /// Builder: set the uphill/downhill slope gravity pair.
    pub fn with_slope_gravity(mut self, uphill: f32, downhill: f32) -> Self {
        self.uphill_gravity = uphill;
        self.downhill_gravity = downhill;
        self
    }

    /// The direction recorded when the roll entered: true if moving in the
    /// positive tangent direction.
    pub fn right_direction(&self) -> bool {
        self.right_direction
    }
}

impl Move for Roll {
    const KIND: MoveKind = MoveKind::Roll;

    fn available(&self, view: &MoveView) -> bool {
        view.controller.grounded
            && view.controller.ground_velocity.abs() > self.min_activate_speed
    }

    fn should_perform(&self, view: &MoveView) -> bool {
        let axis = view.input.axis(&self.activate_axis);
        if self.require_negative {
            axis < 0.0
        } else {
            axis > 0.0
        }
    }

    fn should_end(&self, view: &MoveView) -> bool {
        // Never self-ends in the air; landing cancels the roll through the
        // manager's attach notification instead.
        if !view.controller.grounded {
            return false;
        }

        // Dead band around zero on the side matching the entry direction.
        // Zero itself belongs to whichever case matches, so the end condition
        // cannot oscillate at exactly zero speed.
        let velocity = view.controller.ground_velocity;
        (self.right_direction && velocity <= 0.0 && velocity > -self.min_activate_speed)
            || (!self.right_direction && velocity >= 0.0 && velocity < self.min_activate_speed)
    }

    fn on_active_enter(&mut self, fx: &mut MoveFx) {
        self.right_direction = fx.controller.ground_velocity > 0.0;

        // Snapshot the physics values this move overrides.
        self.original_slope_gravity = fx.controller.slope_gravity;
        self.original_friction = fx.controller.ground_friction;

        fx.controller.ground_friction = self.friction;

        if let Some(ground_control) = fx.ground_control.as_deref_mut() {
            self.original_deceleration = ground_control.deceleration;
            ground_control.acceleration_locked = true;
            ground_control.deceleration = self.deceleration;
        }

        let sensors = &mut fx.controller.sensors;
        sensors.top_offset += self.height_change / 2.0;
        sensors.bottom_offset -= self.height_change / 2.0;

        sensors.ledge_width += self.width_change;
        sensors.bottom_width += self.width_change;
        sensors.top_width += self.width_change;
    }

    fn on_active_fixed_update(&mut self, fx: &mut MoveFx) {
        let previous_uphill = self.uphill;
        let controller = &mut *fx.controller;

        if controller.ground_velocity > 0.0 {
            self.uphill = angle_in_range_deg(controller.relative_surface_angle, 0.0, 180.0);
        } else if controller.ground_velocity < 0.0 {
            self.uphill = angle_in_range_deg(controller.relative_surface_angle, 180.0, 360.0);
        }

        // If slope gravity is not the value this move set last tick, another
        // system changed it mid-roll; refresh the snapshot so exit restores
        // that value instead of the stale entry-time one. Exact comparison
        // is load-bearing here.
        let expected = if previous_uphill {
            self.uphill_gravity
        } else {
            self.downhill_gravity
        };
        if controller.slope_gravity != expected {
            self.original_slope_gravity = controller.slope_gravity;
        }

        controller.slope_gravity = if self.uphill {
            self.uphill_gravity
        } else {
            self.downhill_gravity
        };
    }

    fn on_active_exit(&mut self, fx: &mut MoveFx) {
        fx.controller.slope_gravity = self.original_slope_gravity;
        fx.controller.ground_friction = self.original_friction;

        if let Some(ground_control) = fx.ground_control.as_deref_mut() {
            ground_control.acceleration_locked = false;
            ground_control.deceleration = self.original_deceleration;
        }

        let sensors = &mut fx.controller.sensors;
        sensors.top_offset -= self.height_change / 2.0;
        sensors.bottom_offset += self.height_change / 2.0;

        sensors.ledge_width -= self.width_change;
        sensors.bottom_width -= self.width_change;
        sensors.top_width -= self.width_change;
    }

    fn set_animator_parameters(&self, _view: &MoveView, animator: &mut AnimatorParams) {
        if !self.uphill_bool.is_empty() {
            animator.set_bool(self.uphill_bool.clone(), self.uphill);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::PlatformerController;
    use crate::ground_control::GroundControl;
    use crate::input::InputAxes;
    use crate::moves::MoveStates;

    const DT: f32 = 1.0 / 60.0;

    fn rolling_controller(velocity: f32, surface_angle: f32) -> PlatformerController {
        let mut controller = PlatformerController::new().grounded_at(surface_angle);
        controller.ground_velocity = velocity;
        controller
    }

    fn view<'a>(
        controller: &'a PlatformerController,
        input: &'a InputAxes,
        states: &'a MoveStates,
    ) -> MoveView<'a> {
        MoveView {
            controller,
            input,
            ground_control: None,
            states,
        }
    }

    fn enter(
        roll: &mut Roll,
        controller: &mut PlatformerController,
        ground_control: &mut GroundControl,
    ) {
        let input = InputAxes::new();
        let mut fx = MoveFx {
            controller,
            ground_control: Some(ground_control),
            input: &input,
            dt: DT,
        };
        roll.on_active_enter(&mut fx);
    }

    fn update(roll: &mut Roll, controller: &mut PlatformerController) {
        let input = InputAxes::new();
        let mut fx = MoveFx {
            controller,
            ground_control: None,
            input: &input,
            dt: DT,
        };
        roll.on_active_fixed_update(&mut fx);
    }

    fn exit(
        roll: &mut Roll,
        controller: &mut PlatformerController,
        ground_control: &mut GroundControl,
    ) {
        let input = InputAxes::new();
        let mut fx = MoveFx {
            controller,
            ground_control: Some(ground_control),
            input: &input,
            dt: DT,
        };
        roll.on_active_exit(&mut fx);
    }

    #[test]
    fn available_requires_strictly_more_than_min_speed() {
        let roll = Roll::new();
        let input = InputAxes::new();
        let states = MoveStates::default();

        for velocity in [0.62, -0.62, 2.0, -2.0] {
            let controller = rolling_controller(velocity, 0.0);
            assert!(
                roll.available(&view(&controller, &input, &states)),
                "expected available at {velocity}"
            );
        }
        for velocity in [0.0, 0.61875, -0.61875, 0.5, -0.5] {
            let controller = rolling_controller(velocity, 0.0);
            assert!(
                !roll.available(&view(&controller, &input, &states)),
                "expected unavailable at {velocity}"
            );
        }
    }

    #[test]
    fn not_available_airborne() {
        let roll = Roll::new();
        let mut controller = rolling_controller(2.0, 0.0);
        controller.detach();
        let input = InputAxes::new();
        let states = MoveStates::default();

        assert!(!roll.available(&view(&controller, &input, &states)));
    }

    #[test]
    fn should_perform_respects_polarity() {
        let mut roll = Roll::new();
        let controller = rolling_controller(2.0, 0.0);
        let states = MoveStates::default();

        let mut input = InputAxes::new();
        input.set_axis("Vertical", -0.5);
        assert!(roll.should_perform(&view(&controller, &input, &states)));

        input.set_axis("Vertical", 0.5);
        assert!(!roll.should_perform(&view(&controller, &input, &states)));

        input.set_axis("Vertical", 0.0);
        assert!(!roll.should_perform(&view(&controller, &input, &states)));

        roll.require_negative = false;
        input.set_axis("Vertical", 0.5);
        assert!(roll.should_perform(&view(&controller, &input, &states)));
        input.set_axis("Vertical", -0.5);
        assert!(!roll.should_perform(&view(&controller, &input, &states)));
    }

    #[test]
    fn enter_exit_restores_sensor_geometry_exactly() {
        let mut roll = Roll::new();
        let mut controller = rolling_controller(2.0, 0.0);
        let mut ground_control = GroundControl::new();
        let before = controller.sensors;

        enter(&mut roll, &mut controller, &mut ground_control);
        assert_ne!(controller.sensors, before);
        assert_eq!(
            controller.sensors.top_offset,
            before.top_offset + roll.height_change / 2.0
        );
        assert_eq!(
            controller.sensors.bottom_offset,
            before.bottom_offset - roll.height_change / 2.0
        );
        assert_eq!(
            controller.sensors.ledge_width,
            before.ledge_width + roll.width_change
        );

        exit(&mut roll, &mut controller, &mut ground_control);
        assert_eq!(controller.sensors, before);
    }

    #[test]
    fn enter_exit_restores_physics_values() {
        let mut roll = Roll::new();
        let mut controller = rolling_controller(2.0, 0.0);
        let mut ground_control = GroundControl::new();

        let slope_gravity = controller.slope_gravity;
        let friction = controller.ground_friction;
        let deceleration = ground_control.deceleration;

        enter(&mut roll, &mut controller, &mut ground_control);
        assert_eq!(controller.ground_friction, roll.friction);
        assert_eq!(ground_control.deceleration, roll.deceleration);
        assert!(ground_control.acceleration_locked);

        update(&mut roll, &mut controller);
        assert_eq!(controller.slope_gravity, roll.uphill_gravity);

        exit(&mut roll, &mut controller, &mut ground_control);
        assert_eq!(controller.slope_gravity, slope_gravity);
        assert_eq!(controller.ground_friction, friction);
        assert_eq!(ground_control.deceleration, deceleration);
        assert!(!ground_control.acceleration_locked);
    }

    #[test]
    fn enter_records_direction_at_activation() {
        let mut ground_control = GroundControl::new();

        let mut roll = Roll::new();
        let mut controller = rolling_controller(2.0, 0.0);
        enter(&mut roll, &mut controller, &mut ground_control);
        assert!(roll.right_direction());

        let mut roll = Roll::new();
        let mut controller = rolling_controller(-2.0, 0.0);
        enter(&mut roll, &mut controller, &mut ground_control);
        assert!(!roll.right_direction());
    }

    #[test]
    fn uphill_classification_per_quadrant() {
        // Moving positive: uphill iff angle in [0, 180).
        for (angle, expected) in [(0.0, true), (45.0, true), (179.9, true), (180.0, false), (270.0, false)] {
            let mut roll = Roll::new();
            let mut controller = rolling_controller(2.0, angle);
            update(&mut roll, &mut controller);
            assert_eq!(roll.uphill, expected, "positive velocity at {angle}");
        }

        // Moving negative: uphill iff angle in [180, 360).
        for (angle, expected) in [(180.0, true), (270.0, true), (359.9, true), (0.0, false), (90.0, false)] {
            let mut roll = Roll::new();
            let mut controller = rolling_controller(-2.0, angle);
            update(&mut roll, &mut controller);
            assert_eq!(roll.uphill, expected, "negative velocity at {angle}");
        }
    }

    #[test]
    fn uphill_holds_while_stalled() {
        let mut roll = Roll::new();
        let mut controller = rolling_controller(2.0, 45.0);
        update(&mut roll, &mut controller);
        assert!(roll.uphill);

        // Momentarily stalled: classification must not flip.
        controller.ground_velocity = 0.0;
        controller.relative_surface_angle = 270.0;
        update(&mut roll, &mut controller);
        assert!(roll.uphill);
    }

    #[test]
    fn update_applies_uphill_and_downhill_gravity() {
        let mut roll = Roll::new();
        let mut controller = rolling_controller(2.0, 45.0);
        update(&mut roll, &mut controller);
        assert_eq!(controller.slope_gravity, roll.uphill_gravity);

        controller.relative_surface_angle = 225.0;
        update(&mut roll, &mut controller);
        assert_eq!(controller.slope_gravity, roll.downhill_gravity);
    }

    #[test]
    fn external_slope_gravity_change_survives_exit() {
        let mut roll = Roll::new();
        let mut controller = rolling_controller(2.0, 45.0);
        let mut ground_control = GroundControl::new();

        enter(&mut roll, &mut controller, &mut ground_control);
        update(&mut roll, &mut controller);
        assert_eq!(controller.slope_gravity, roll.uphill_gravity);

        // Another system rewrites slope gravity mid-roll.
        controller.slope_gravity = 7.25;
        update(&mut roll, &mut controller);
        assert_eq!(controller.slope_gravity, roll.uphill_gravity);

        // Exit restores the mid-roll external value, not the entry snapshot.
        exit(&mut roll, &mut controller, &mut ground_control);
        assert_eq!(controller.slope_gravity, 7.25);
    }

    #[test]
    fn unchanged_slope_gravity_restores_entry_snapshot() {
        let mut roll = Roll::new();
        let mut controller = rolling_controller(2.0, 45.0);
        let mut ground_control = GroundControl::new();
        let entry_gravity = controller.slope_gravity;

        enter(&mut roll, &mut controller, &mut ground_control);
        for _ in 0..5 {
            update(&mut roll, &mut controller);
        }
        exit(&mut roll, &mut controller, &mut ground_control);

        assert_eq!(controller.slope_gravity, entry_gravity);
    }

    #[test]
    fn never_self_ends_airborne() {
        let mut roll = Roll::new();
        let mut controller = rolling_controller(2.0, 0.0);
        let mut ground_control = GroundControl::new();
        enter(&mut roll, &mut controller, &mut ground_control);

        controller.detach();
        controller.ground_velocity = 0.0;
        let input = InputAxes::new();
        let states = MoveStates::default();
        assert!(!roll.should_end(&view(&controller, &input, &states)));
    }

    #[test]
    fn dead_band_triggers_at_first_qualifying_tick_moving_right() {
        let mut roll = Roll::new();
        let mut controller = rolling_controller(2.0, 0.0);
        let mut ground_control = GroundControl::new();
        enter(&mut roll, &mut controller, &mut ground_control);

        let input = InputAxes::new();
        let states = MoveStates::default();

        // Decay from positive speed through zero; the end condition fires at
        // the first velocity with 0 >= v > -min_activate_speed, never before.
        for velocity in [2.0, 1.0, 0.7, 0.62, 0.3, 0.001] {
            controller.ground_velocity = velocity;
            assert!(
                !roll.should_end(&view(&controller, &input, &states)),
                "must not end at {velocity}"
            );
        }
        for velocity in [0.0, -0.3, -0.61] {
            controller.ground_velocity = velocity;
            assert!(
                roll.should_end(&view(&controller, &input, &states)),
                "must end at {velocity}"
            );
        }
        // Past the far edge of the dead band: rolling backward fast enough
        // to keep going.
        controller.ground_velocity = -0.61875;
        assert!(!roll.should_end(&view(&controller, &input, &states)));
    }

    #[test]
    fn dead_band_mirrors_moving_left() {
        let mut roll = Roll::new();
        let mut controller = rolling_controller(-2.0, 0.0);
        let mut ground_control = GroundControl::new();
        enter(&mut roll, &mut controller, &mut ground_control);

        let input = InputAxes::new();
        let states = MoveStates::default();

        for velocity in [-2.0, -0.7, -0.001] {
            controller.ground_velocity = velocity;
            assert!(!roll.should_end(&view(&controller, &input, &states)));
        }
        for velocity in [0.0, 0.3, 0.61] {
            controller.ground_velocity = velocity;
            assert!(roll.should_end(&view(&controller, &input, &states)));
        }
        controller.ground_velocity = 0.61875;
        assert!(!roll.should_end(&view(&controller, &input, &states)));
    }

    #[test]
    fn zero_speed_is_claimed_by_exactly_one_direction_case() {
        let input = InputAxes::new();
        let states = MoveStates::default();
        let mut ground_control = GroundControl::new();

        // Entry moving right, now exactly stopped: right case claims zero.
        let mut roll = Roll::new();
        let mut controller = rolling_controller(2.0, 0.0);
        enter(&mut roll, &mut controller, &mut ground_control);
        controller.ground_velocity = 0.0;
        assert!(roll.should_end(&view(&controller, &input, &states)));

        // Entry moving left, same stop: left case claims zero too, so the
        // outcome is deterministic either way.
        let mut roll = Roll::new();
        let mut controller = rolling_controller(-2.0, 0.0);
        enter(&mut roll, &mut controller, &mut ground_control);
        controller.ground_velocity = 0.0;
        assert!(roll.should_end(&view(&controller, &input, &states)));
    }

    #[test]
    fn missing_ground_control_skips_deceleration_leg() {
        let mut roll = Roll::new();
        let mut controller = rolling_controller(2.0, 0.0);
        let before = controller.sensors;
        let friction = controller.ground_friction;
        let input = InputAxes::new();

        let mut fx = MoveFx {
            controller: &mut controller,
            ground_control: None,
            input: &input,
            dt: DT,
        };
        roll.on_active_enter(&mut fx);
        let mut fx = MoveFx {
            controller: &mut controller,
            ground_control: None,
            input: &input,
            dt: DT,
        };
        roll.on_active_exit(&mut fx);

        assert_eq!(controller.sensors, before);
        assert_eq!(controller.ground_friction, friction);
    }

    #[test]
    fn animator_uphill_bool_only_when_named() {
        let mut roll = Roll::new();
        roll.uphill = true;
        let controller = rolling_controller(2.0, 45.0);
        let input = InputAxes::new();
        let states = MoveStates::default();
        let mut animator = AnimatorParams::new();

        roll.set_animator_parameters(&view(&controller, &input, &states), &mut animator);
        assert_eq!(animator.get_bool("Uphill"), None);

        roll.uphill_bool = "Uphill".to_owned();
        roll.set_animator_parameters(&view(&controller, &input, &states), &mut animator);
        assert_eq!(animator.get_bool("Uphill"), Some(true));
    }
}
