mod action;
mod indexer;
mod terrain;

pub use action::Action;
pub use indexer::{Position, StateIndex, StateIndexer};
pub use terrain::{RewardTable, Terrain, TerrainModel, REFERENCE_MAP};

use crate::{Error, Result};

/// The environment the robot moves in: a terrain model with a fixed start and goal
///
/// Nothing here changes after construction. Rewards are earned on entering a
/// cell, and the goal is the only terminal state.
#[derive(Clone, Debug, PartialEq)]
pub struct GridWorld {
    terrain: TerrainModel,
    indexer: StateIndexer,
    start: Position,
    end: Position,
}

impl GridWorld {
    /// **Errors** with [`Error::InvalidStartOrEnd`] if `start == end` or either is off the grid
    pub fn new(terrain: TerrainModel, start: Position, end: Position) -> Result<Self> {
        let size = terrain.size();
        let indexer = StateIndexer::new(size);
        for (name, pos) in [("start", start), ("end", end)] {
            if !indexer.contains(pos) {
                return Err(Error::InvalidStartOrEnd(format!(
                    "{name} {pos} is outside the {size}x{size} grid"
                )));
            }
        }
        if start == end {
            return Err(Error::InvalidStartOrEnd(format!(
                "start and end are both {start}"
            )));
        }

        Ok(Self {
            terrain,
            indexer,
            start,
            end,
        })
    }

    /// The reference map, starting at `(0, 3)` with the exit at `(5, 0)`
    pub fn reference() -> Self {
        let terrain = TerrainModel::reference();
        Self {
            indexer: StateIndexer::new(terrain.size()),
            terrain,
            start: Position::new(0, 3),
            end: Position::new(5, 0),
        }
    }

    pub fn terrain(&self) -> &TerrainModel {
        &self.terrain
    }

    pub fn indexer(&self) -> &StateIndexer {
        &self.indexer
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn end(&self) -> Position {
        self.end
    }

    pub fn start_state(&self) -> StateIndex {
        self.indexer.index_of(self.start)
    }

    pub fn end_state(&self) -> StateIndex {
        self.indexer.index_of(self.end)
    }

    pub fn num_states(&self) -> usize {
        self.indexer.num_states()
    }

    /// Reward for entering `state`
    ///
    /// **Errors** with [`Error::IndexOutOfRange`] if `state >= num_states()`
    pub fn reward_of(&self, state: StateIndex) -> Result<i64> {
        Ok(self.terrain.reward(self.indexer.decode(state)?))
    }

    /// Unchecked [`reward_of`](Self::reward_of)
    pub(crate) fn entry_reward(&self, state: StateIndex) -> i64 {
        self.terrain.reward(self.indexer.position_of(state))
    }
}
