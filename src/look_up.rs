//! Looking up.
//!
//! A pure gating move: no physics side effects, just a pose the host's
//! animation graph keys off the active state. Its availability reads a
//! sibling move's runtime flags and the registry's "is a roll active" query,
//! so it only fires while the character is truly idle.

use bevy::prelude::*;

use crate::math::approx_zero;
use crate::moves::{Move, MoveKind, MoveView};

/// Standing look-up move.
#[derive(Component, Reflect, Debug, Clone)]
#[reflect(Component)]
pub struct LookUp {
    /// Input axis polled for activation; must be positive to activate.
    pub activate_axis: String,
}

impl Default for LookUp {
    fn default() -> Self {
        Self {
            activate_axis: "Vertical".to_owned(),
        }
    }
}

impl LookUp {
    /// Create a look-up move with the default activation axis.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set the activation axis name.
    pub fn with_activate_axis(mut self, axis: impl Into<String>) -> Self {
        self.activate_axis = axis.into();
        self
    }
}

impl Move for LookUp {
    const KIND: MoveKind = MoveKind::LookUp;

    fn available(&self, view: &MoveView) -> bool {
        // Near-zero check tolerates integrator residue; a missing
        // GroundControl counts as neither accelerating nor braking.
        view.controller.grounded
            && approx_zero(view.controller.ground_velocity)
            && view
                .ground_control
                .map_or(true, |gc| !gc.braking && !gc.accelerating)
            && !view.states.is_active(MoveKind::Roll)
    }

    fn should_perform(&self, view: &MoveView) -> bool {
        view.input.axis(&self.activate_axis) > 0.0
    }

    fn should_end(&self, view: &MoveView) -> bool {
        !self.available(view) || !self.should_perform(view)
    }
}
