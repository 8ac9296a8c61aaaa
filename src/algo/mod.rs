pub mod greedy;
pub mod monte_carlo;
pub mod q_learning;
pub mod q_table;

pub use greedy::{GreedyPathExtractor, PathError};
pub use monte_carlo::MonteCarloExplorer;
pub use q_learning::{QLearningTrainer, TrainConfig, Transition};
pub use q_table::QTable;

use crate::env::Position;

/// Sequence of visited cells, beginning with the start cell
pub type Route = Vec<Position>;

/// A route together with the reward collected along it
///
/// The start cell's own reward is not part of `reward`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Path {
    pub route: Route,
    pub reward: i64,
}

impl Path {
    /// Path holding only the start cell
    pub fn starting_at(start: Position) -> Self {
        Self {
            route: vec![start],
            reward: 0,
        }
    }

    /// Append a cell and its reward
    pub fn push(&mut self, pos: Position, reward: i64) {
        self.route.push(pos);
        self.reward += reward;
    }

    /// Last cell of the route
    pub fn end(&self) -> Option<Position> {
        self.route.last().copied()
    }

    /// Number of moves taken
    pub fn steps(&self) -> usize {
        self.route.len().saturating_sub(1)
    }
}
