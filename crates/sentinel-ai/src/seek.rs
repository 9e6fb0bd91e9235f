//! Resumable move-to-point action.

use glam::Vec3;
use sentinel_bt::TreeStatus;
use tracing::debug;

use crate::context::{CombatWorld, EnemyContext, Navigator};
use crate::state::ActionState;

/// Walk toward `destination`, one step of the protocol per tick.
///
/// The first call issues the move command and returns `Running`. Later calls
/// never re-issue it; they watch the path instead:
/// - the reachable path end is `path_slack` or more from `destination`: give up
///   with `Failure`
/// - the agent is closer than `arrival_distance`: `Success`
/// - otherwise still `Running`
///
/// Both terminal outcomes put the enemy back to [`ActionState::Idle`].
pub fn seek<N: Navigator, W: CombatWorld>(
    ctx: &mut EnemyContext<N, W>,
    destination: Vec3,
) -> TreeStatus {
    if ctx.state.action_state == ActionState::Idle {
        ctx.nav.set_destination(destination);
        ctx.state.action_state = ActionState::Working;
        debug!(?destination, "seek started");
        return TreeStatus::Running;
    }

    if ctx.nav.path_end_position().distance(destination) >= ctx.config.path_slack {
        ctx.state.action_state = ActionState::Idle;
        debug!(?destination, "seek failed: destination unreachable");
        return TreeStatus::Failure;
    }

    if ctx.nav.transform().position.distance(destination) < ctx.config.arrival_distance {
        ctx.state.action_state = ActionState::Idle;
        debug!(?destination, "seek arrived");
        return TreeStatus::Success;
    }

    TreeStatus::Running
}
