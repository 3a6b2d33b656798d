//! Move manager systems.
//!
//! [`update_moves`] arbitrates the whole move set once per fixed tick:
//! attach-notification handling first, then each move stepped through the
//! shared transition rules (GroundControl, Roll, LookUp). Mutual exclusion
//! between moves falls out of their predicates (LookUp refuses while a roll
//! is registered active; a move already active is never re-entered), so at
//! most one physics-override move writes a given shared field per tick.
//!
//! [`update_animator_parameters`] runs after the transitions and lets every
//! move publish its parameters regardless of state.

use bevy::prelude::*;

use crate::animator::AnimatorParams;
use crate::controller::PlatformerController;
use crate::ground_control::GroundControl;
use crate::input::InputAxes;
use crate::look_up::LookUp;
use crate::moves::{step_move, Move, MoveFx, MoveKind, MoveState, MoveStates, MoveView};
use crate::roll::Roll;

/// Drive every entity's move set through one fixed tick.
pub fn update_moves(
    time: Res<Time<Fixed>>,
    mut query: Query<(
        &mut PlatformerController,
        &mut MoveStates,
        Option<&mut GroundControl>,
        Option<&mut Roll>,
        Option<&mut LookUp>,
        &InputAxes,
    )>,
) {
    // Fallback for schedules driven manually in tests, where the fixed clock
    // has not been advanced.
    let dt = Some(time.delta_secs())
        .filter(|&dt| dt > 0.0)
        .unwrap_or(1.0 / 60.0);

    for (mut controller, mut states, mut ground_control, mut roll, mut look_up, input) in
        &mut query
    {
        // Landing always cancels a roll in progress, regardless of its own
        // end condition.
        if controller.take_attach_notification() && states.is_active(MoveKind::Roll) {
            if let Some(roll) = roll.as_deref_mut() {
                debug!("ground attach: force-ending active roll");
                let mut fx = MoveFx {
                    controller: &mut controller,
                    ground_control: ground_control.as_deref_mut(),
                    input,
                    dt,
                };
                roll.on_active_exit(&mut fx);
                states.set(MoveKind::Roll, MoveState::Inactive);
            }
        }

        if let Some(ground_control) = ground_control.as_deref_mut() {
            step_move(
                ground_control,
                &mut states,
                &mut controller,
                None,
                input,
                dt,
            );
        }
        if let Some(roll) = roll.as_deref_mut() {
            step_move(
                roll,
                &mut states,
                &mut controller,
                ground_control.as_deref_mut(),
                input,
                dt,
            );
        }
        if let Some(look_up) = look_up.as_deref_mut() {
            step_move(
                look_up,
                &mut states,
                &mut controller,
                ground_control.as_deref_mut(),
                input,
                dt,
            );
        }
    }
}

/// Let every present move publish its animator parameters for this tick.
pub fn update_animator_parameters(
    mut query: Query<(
        &PlatformerController,
        &MoveStates,
        Option<&GroundControl>,
        Option<&Roll>,
        Option<&LookUp>,
        &InputAxes,
        &mut AnimatorParams,
    )>,
) {
    for (controller, states, ground_control, roll, look_up, input, mut animator) in &mut query {
        let view = MoveView {
            controller,
            input,
            ground_control,
            states,
        };

        if let Some(ground_control) = ground_control {
            ground_control.set_animator_parameters(&view, &mut animator);
        }
        if let Some(roll) = roll {
            roll.set_animator_parameters(&view, &mut animator);
        }
        if let Some(look_up) = look_up {
            look_up.set_animator_parameters(&view, &mut animator);
        }
    }
}
