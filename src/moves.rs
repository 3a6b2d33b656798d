//! Move state machine core.
//!
//! A *move* is a self-contained behavior with availability/activation/
//! termination predicates that may temporarily override shared controller
//! physics state while active. Moves form a closed set ([`MoveKind`]) and all
//! share one lifecycle:
//!
//! 1. `Inactive`, `available`, and `should_perform` → enter `Active`, run
//!    [`Move::on_active_enter`].
//! 2. `Active` → run [`Move::on_active_fixed_update`] every tick (including
//!    the entry tick, so overrides land before the host's physics
//!    integration reads them).
//! 3. `Active` and `should_end` → run [`Move::on_active_exit`], back to
//!    `Inactive`.
//!
//! Transitions are driven once per fixed tick by the manager system in
//! [`crate::systems`]; cross-move visibility goes through the [`MoveStates`]
//! registry rather than any global lookup.

use bevy::prelude::*;

use crate::animator::AnimatorParams;
use crate::controller::PlatformerController;
use crate::ground_control::GroundControl;
use crate::input::InputAxes;

/// The closed set of move behaviors.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKind {
    /// Baseline grounded locomotion driver.
    GroundControl,
    /// Rolling physics override.
    Roll,
    /// Standing look-up pose.
    LookUp,
}

impl MoveKind {
    pub(crate) const COUNT: usize = 3;

    #[inline]
    pub(crate) fn index(self) -> usize {
        match self {
            MoveKind::GroundControl => 0,
            MoveKind::Roll => 1,
            MoveKind::LookUp => 2,
        }
    }
}

/// Lifecycle state of a single move.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MoveState {
    /// Not running; polled for entry each tick.
    #[default]
    Inactive,
    /// Running; updated each tick and polled for exit.
    Active,
}

/// Registry of per-move lifecycle states for one character.
///
/// This is the arbitration surface other moves query for cross-move
/// exclusion ("is a roll active right now?"). Only the manager system
/// writes to it.
#[derive(Component, Reflect, Debug, Clone, Default)]
#[reflect(Component)]
pub struct MoveStates {
    states: [MoveState; MoveKind::COUNT],
}

impl MoveStates {
    /// Current lifecycle state of a move kind.
    #[inline]
    pub fn state(&self, kind: MoveKind) -> MoveState {
        self.states[kind.index()]
    }

    /// Whether any move of the given kind is currently active.
    #[inline]
    pub fn is_active(&self, kind: MoveKind) -> bool {
        self.state(kind) == MoveState::Active
    }

    #[inline]
    pub(crate) fn set(&mut self, kind: MoveKind, state: MoveState) {
        self.states[kind.index()] = state;
    }
}

/// Read-only view a move's predicates evaluate against.
///
/// `ground_control` is `None` when the move being evaluated *is* the
/// GroundControl component, or when the entity carries none.
pub struct MoveView<'a> {
    pub controller: &'a PlatformerController,
    pub input: &'a InputAxes,
    pub ground_control: Option<&'a GroundControl>,
    pub states: &'a MoveStates,
}

/// Mutable state a move's lifecycle hooks operate on.
///
/// As with [`MoveView`], `ground_control` is `None` while GroundControl
/// itself is being stepped.
pub struct MoveFx<'a> {
    pub controller: &'a mut PlatformerController,
    pub ground_control: Option<&'a mut GroundControl>,
    pub input: &'a InputAxes,
    /// Fixed timestep, in seconds.
    pub dt: f32,
}

/// Shared behavior contract for the closed move set.
///
/// Predicates are total boolean functions over current state with no error
/// returns. Lifecycle hooks default to no-ops; a move overrides exactly the
/// ones it needs. The animator hook runs once per tick regardless of state.
pub trait Move {
    /// The registry tag this move transitions under.
    const KIND: MoveKind;

    /// Preconditions independent of input.
    fn available(&self, view: &MoveView) -> bool;

    /// Input gate for entry, consulted only while inactive and available.
    fn should_perform(&self, view: &MoveView) -> bool;

    /// Exit condition, consulted only while active.
    fn should_end(&self, view: &MoveView) -> bool;

    /// Runs once on the tick the move becomes active.
    fn on_active_enter(&mut self, fx: &mut MoveFx) {
        let _ = fx;
    }

    /// Runs every tick while active, including the entry tick.
    fn on_active_fixed_update(&mut self, fx: &mut MoveFx) {
        let _ = fx;
    }

    /// Runs once on the tick the move deactivates, whether by its own end
    /// condition or a forced end from the manager.
    fn on_active_exit(&mut self, fx: &mut MoveFx) {
        let _ = fx;
    }

    /// Publish animator parameters. Called every tick regardless of state;
    /// implementations skip unconfigured (empty) parameter names.
    fn set_animator_parameters(&self, view: &MoveView, animator: &mut AnimatorParams) {
        let _ = (view, animator);
    }
}

/// Drive one move through the per-tick transition rules.
///
/// `ground_control` must be `None` exactly when `mv` is the GroundControl
/// component itself.
pub(crate) fn step_move<M: Move>(
    mv: &mut M,
    states: &mut MoveStates,
    controller: &mut PlatformerController,
    mut ground_control: Option<&mut GroundControl>,
    input: &InputAxes,
    dt: f32,
) {
    if states.state(M::KIND) == MoveState::Inactive {
        let enter = {
            let view = MoveView {
                controller: &*controller,
                input,
                ground_control: ground_control.as_deref(),
                states,
            };
            mv.available(&view) && mv.should_perform(&view)
        };
        if enter {
            states.set(M::KIND, MoveState::Active);
            let mut fx = MoveFx {
                controller: &mut *controller,
                ground_control: ground_control.as_deref_mut(),
                input,
                dt,
            };
            mv.on_active_enter(&mut fx);
        }
    }

    if states.state(M::KIND) == MoveState::Active {
        {
            let mut fx = MoveFx {
                controller: &mut *controller,
                ground_control: ground_control.as_deref_mut(),
                input,
                dt,
            };
            mv.on_active_fixed_update(&mut fx);
        }

        let end = {
            let view = MoveView {
                controller: &*controller,
                input,
                ground_control: ground_control.as_deref(),
                states,
            };
            mv.should_end(&view)
        };
        if end {
            let mut fx = MoveFx {
                controller: &mut *controller,
                ground_control: ground_control.as_deref_mut(),
                input,
                dt,
            };
            mv.on_active_exit(&mut fx);
            states.set(M::KIND, MoveState::Inactive);
        }
    }
}
