//! # `platformer_moves`
//!
//! Ground-relative movement moves for Sonic-style 2D platformer characters.
//!
//! A character's kinematic state lives in a rotated, surface-relative frame:
//! signed speed along the surface tangent plus a wrapped slope angle in
//! degrees. On top of that shared state, a closed set of "moves" (the ground
//! locomotion driver, rolling, looking up) layer temporary physics overrides
//! with strict activation/deactivation ordering and exact save/restore of
//! everything they touch.
//!
//! This crate provides:
//! - A shared move lifecycle (`Inactive` → `Active` → back), polled once per
//!   fixed tick through `available` / `should_perform` / `should_end`
//!   predicates
//! - [`GroundControl`](ground_control::GroundControl): acceleration,
//!   braking, and top speed on the ground, with a deceleration seam other
//!   moves can borrow
//! - [`Roll`](roll::Roll): overrides friction, deceleration, slope gravity,
//!   and hitbox geometry while active, with angle-wrapped uphill/downhill
//!   classification
//! - [`LookUp`](look_up::LookUp): a gating pose coordinated against its
//!   sibling moves
//!
//! Ground sensing, velocity integration, rendering, and input devices stay
//! on the host side; the host writes [`InputAxes`](input::InputAxes) and the
//! controller's kinematic fields, and reads the
//! [`AnimatorParams`](animator::AnimatorParams) sink.
//!
//! ## Usage
//!
//! ```rust
//! use bevy::prelude::*;
//! use platformer_moves::prelude::*;
//!
//! // Components for a character that can run, roll, and look up.
//! let controller = PlatformerController::new();
//! let moves = (GroundControl::new(), Roll::new(), LookUp::new());
//! let states = MoveStates::default();
//!
//! // Spawn these together on one entity; the host drives InputAxes and the
//! // controller's grounded/velocity fields each tick.
//! ```

use bevy::prelude::*;

pub mod animator;
pub mod controller;
pub mod ground_control;
pub mod input;
pub mod look_up;
pub mod math;
pub mod moves;
pub mod roll;
pub mod systems;

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::animator::AnimatorParams;
    pub use crate::controller::{PlatformerController, SensorRig};
    pub use crate::ground_control::GroundControl;
    pub use crate::input::InputAxes;
    pub use crate::look_up::LookUp;
    pub use crate::moves::{Move, MoveFx, MoveKind, MoveState, MoveStates, MoveView};
    pub use crate::roll::Roll;
    pub use crate::PlatformerMovesPlugin;
}

/// Main plugin for the move system.
///
/// Registers the component types and runs the move state machine in
/// `FixedUpdate`: transitions and lifecycle hooks first, animator parameter
/// publication second, so every parameter reflects this tick's state.
///
/// # Examples
///
/// ```rust,no_run
/// use bevy::prelude::*;
/// use platformer_moves::prelude::*;
///
/// App::new()
///     .add_plugins(DefaultPlugins)
///     .add_plugins(PlatformerMovesPlugin)
///     .run();
/// ```
pub struct PlatformerMovesPlugin;

impl Plugin for PlatformerMovesPlugin {
    fn build(&self, app: &mut App) {
        // Register core types
        app.register_type::<controller::PlatformerController>();
        app.register_type::<input::InputAxes>();
        app.register_type::<animator::AnimatorParams>();
        app.register_type::<moves::MoveStates>();
        app.register_type::<ground_control::GroundControl>();
        app.register_type::<roll::Roll>();
        app.register_type::<look_up::LookUp>();

        app.add_systems(
            FixedUpdate,
            (systems::update_moves, systems::update_animator_parameters).chain(),
        );
    }
}
