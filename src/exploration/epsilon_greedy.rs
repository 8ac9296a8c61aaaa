use rand::{seq::SliceRandom, Rng};

use crate::{
    algo::QTable,
    env::{Action, StateIndex, StateIndexer},
    Result,
};

use super::Choice;

/// Pick an action for `state` and apply it
///
/// With probability `epsilon` any of the four actions is taken uniformly, including ones
/// that run into the edge of the grid and self-loop. Otherwise the action is drawn uniformly
/// from those with the highest value in `state`'s row of the table.
///
/// **Returns** `(next_state, action)`
///
/// **Errors** with [`Error::IndexOutOfRange`](crate::Error::IndexOutOfRange) if `state` is
/// not on the grid, before any random number is drawn
pub fn select_action<R: Rng + ?Sized>(
    q_table: &QTable,
    indexer: &StateIndexer,
    state: StateIndex,
    epsilon: f64,
    rng: &mut R,
) -> Result<(StateIndex, Action)> {
    indexer.decode(state)?;
    let action = match Choice::draw(epsilon, rng) {
        Choice::Explore => Action::random(rng),
        Choice::Exploit => match q_table.best_actions(state).as_slice() {
            [only] => *only,
            // an all-NaN row has no maximum, fall back to a random action
            tied => tied
                .choose(rng)
                .copied()
                .unwrap_or_else(|| Action::random(rng)),
        },
    };

    Ok((indexer.transition(state, action), action))
}
