use log::{debug, warn};
use thiserror::Error;

use crate::env::{Action, GridWorld, Position};

use super::{Path, QTable};

/// Why a greedy walk stopped before the goal
///
/// Both variants carry the route walked so far.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("no action leads anywhere from {at}")]
    NoAvailableAction { at: Position, partial: Path },

    #[error("greedy policy returns to {at} and would never reach the goal")]
    Cycle { at: Position, partial: Path },
}

impl PathError {
    /// Route and reward gathered before the walk stopped
    pub fn partial(&self) -> &Path {
        match self {
            PathError::NoAvailableAction { partial, .. } | PathError::Cycle { partial, .. } => {
                partial
            }
        }
    }

    pub fn into_partial(self) -> Path {
        match self {
            PathError::NoAvailableAction { partial, .. } | PathError::Cycle { partial, .. } => {
                partial
            }
        }
    }
}

/// Reads a route out of a trained [`QTable`]
///
/// From each cell it takes the highest-valued move that stays on the grid. Ties go to
/// the first action in [`Action`] order, so the result never
/// depends on a random source and repeated calls agree.
pub struct GreedyPathExtractor<'a> {
    world: &'a GridWorld,
    q_table: &'a QTable,
}

impl<'a> GreedyPathExtractor<'a> {
    pub fn new(world: &'a GridWorld, q_table: &'a QTable) -> Self {
        Self { world, q_table }
    }

    /// Walk greedily from the start to the goal
    ///
    /// The walk is deterministic, so revisiting a cell means it would loop forever;
    /// that is reported as [`PathError::Cycle`].
    pub fn extract(&self) -> Result<Path, PathError> {
        let indexer = self.world.indexer();
        let end = self.world.end_state();
        let mut state = self.world.start_state();
        let mut path = Path::starting_at(self.world.start());
        let mut visited = vec![false; indexer.num_states()];
        visited[state] = true;

        while state != end {
            let at = indexer.position_of(state);
            let mut best: Option<(Action, f64)> = None;
            for action in indexer.moves_from(state) {
                let value = self.q_table.get(state, action);
                if best.map_or(true, |(_, v)| value > v) {
                    best = Some((action, value));
                }
            }

            let Some((action, _)) = best else {
                warn!("greedy walk stuck at {at}");
                return Err(PathError::NoAvailableAction { at, partial: path });
            };

            state = indexer.transition(state, action);
            let next = indexer.position_of(state);
            if visited[state] {
                warn!("greedy walk loops back to {next}");
                return Err(PathError::Cycle {
                    at: next,
                    partial: path,
                });
            }
            visited[state] = true;
            path.push(next, self.world.entry_reward(state));
        }

        debug!("greedy path: {} steps, reward {}", path.steps(), path.reward);
        Ok(path)
    }
}
