use std::ops::Index;

use strum::{EnumCount, VariantArray};

use crate::env::{Action, StateIndex};

/// Estimated value of taking each action in each state
///
/// One row per state, one column per [`Action`], all starting at `0`. Only the
/// [`QLearningTrainer`](super::QLearningTrainer) writes to it; everyone else reads
/// a shared reference or a cloned snapshot.
#[derive(Clone, Debug, PartialEq)]
pub struct QTable {
    values: Vec<[f64; Action::COUNT]>,
}

impl QTable {
    /// A zeroed table with `num_states` rows
    pub fn new(num_states: usize) -> Self {
        Self {
            values: vec![[0.0; Action::COUNT]; num_states],
        }
    }

    pub fn num_states(&self) -> usize {
        self.values.len()
    }

    pub fn get(&self, state: StateIndex, action: Action) -> f64 {
        self.values[state][action.index()]
    }

    pub fn row(&self, state: StateIndex) -> &[f64; Action::COUNT] {
        &self.values[state]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64; Action::COUNT]> {
        self.values.iter()
    }

    /// Highest value in `state`'s row, `0` for an empty row
    pub fn max_value(&self, state: StateIndex) -> f64 {
        self.values[state]
            .iter()
            .copied()
            .reduce(f64::max)
            .unwrap_or(0.0)
    }

    /// Every action attaining the row maximum, in action order
    pub fn best_actions(&self, state: StateIndex) -> Vec<Action> {
        let max = self.max_value(state);
        Action::VARIANTS
            .iter()
            .copied()
            .filter(|&a| self.get(state, a) == max)
            .collect()
    }

    pub(crate) fn set(&mut self, state: StateIndex, action: Action, value: f64) {
        self.values[state][action.index()] = value;
    }

    pub(crate) fn clear(&mut self) {
        self.values.fill([0.0; Action::COUNT]);
    }
}

impl Index<(StateIndex, Action)> for QTable {
    type Output = f64;

    fn index(&self, (state, action): (StateIndex, Action)) -> &Self::Output {
        &self.values[state][action.index()]
    }
}
