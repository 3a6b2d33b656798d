//! Shared controller state.
//!
//! [`PlatformerController`] is the hub component every move reads and writes.
//! It holds the ground-relative kinematic state computed by the host's ground
//! sensing and the physics values (slope gravity, friction, sensor geometry)
//! that moves temporarily override.
//!
//! The host owns ground detection and velocity integration; this component is
//! the contract between that integration and the move system. Moves that
//! override a field here must restore the prior value on exit.

use bevy::prelude::*;

use crate::math::wrap_angle_deg;

/// Hitbox sensor geometry, in world units.
///
/// Offsets measure from the character origin to the top/bottom sensor rows;
/// widths are the horizontal extents of the ledge, bottom, and top sensor
/// pairs. Moves that change character shape (rolling, crouching) adjust these
/// and reverse the adjustment exactly on exit.
#[derive(Reflect, Debug, Clone, Copy, PartialEq)]
pub struct SensorRig {
    /// Distance from origin to the top sensor row.
    pub top_offset: f32,
    /// Distance from origin to the bottom sensor row.
    pub bottom_offset: f32,
    /// Width of the ledge sensor pair.
    pub ledge_width: f32,
    /// Width of the bottom sensor pair.
    pub bottom_width: f32,
    /// Width of the top sensor pair.
    pub top_width: f32,
}

impl Default for SensorRig {
    fn default() -> Self {
        Self {
            top_offset: 0.20,
            bottom_offset: 0.20,
            ledge_width: 0.16,
            bottom_width: 0.16,
            top_width: 0.16,
        }
    }
}

/// Ground-relative kinematic and physics state for one character.
///
/// Velocity and angle are expressed in the surface-relative frame: ground
/// velocity is signed speed along the surface tangent (positive = the
/// controller's forward direction) and the surface angle is in degrees,
/// `[0, 360)`, relative to the controller's reference orientation.
#[derive(Component, Reflect, Debug, Clone)]
#[reflect(Component)]
pub struct PlatformerController {
    /// Whether the character currently has ground contact.
    pub grounded: bool,
    /// Signed speed along the surface tangent, in units per second.
    pub ground_velocity: f32,
    /// Ground slope angle in degrees, `[0, 360)`.
    pub relative_surface_angle: f32,
    /// Acceleration applied along slopes by the host integration, units/s².
    /// Shared mutable: rolling swaps this for its uphill/downhill values.
    pub slope_gravity: f32,
    /// Ground friction applied when no move drives the velocity, units/s².
    /// Shared mutable: rolling substitutes its own friction.
    pub ground_friction: f32,
    /// Hitbox sensor geometry. Shared mutable.
    pub sensors: SensorRig,
    /// One-tick latch set by [`attach`](Self::attach), consumed by the move
    /// system to cancel moves that cannot survive a landing.
    pub(crate) just_attached: bool,
}

impl Default for PlatformerController {
    fn default() -> Self {
        Self {
            grounded: false,
            ground_velocity: 0.0,
            relative_surface_angle: 0.0,
            slope_gravity: 4.5,
            ground_friction: 1.6875,
            sensors: SensorRig::default(),
            just_attached: false,
        }
    }
}

impl PlatformerController {
    /// Create a controller with default physics values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: start grounded at the given surface angle (degrees).
    pub fn grounded_at(mut self, surface_angle: f32) -> Self {
        self.grounded = true;
        self.relative_surface_angle = wrap_angle_deg(surface_angle);
        self
    }

    /// Notify the controller that it attached to new ground.
    ///
    /// Called by the host when its ground sensing transitions from airborne
    /// to grounded. Sets the grounded flag, stores the wrapped surface angle,
    /// and latches the attach notification for the move system to consume on
    /// the next tick.
    pub fn attach(&mut self, surface_angle: f32) {
        self.grounded = true;
        self.relative_surface_angle = wrap_angle_deg(surface_angle);
        self.just_attached = true;
    }

    /// Notify the controller that it lost ground contact.
    pub fn detach(&mut self) {
        self.grounded = false;
    }

    /// Consume the attach latch, returning whether it was set.
    pub(crate) fn take_attach_notification(&mut self) -> bool {
        std::mem::take(&mut self.just_attached)
    }
}
