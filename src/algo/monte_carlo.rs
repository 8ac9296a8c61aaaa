use log::{debug, info, warn};
use rand::{seq::SliceRandom, Rng};

use crate::{env::GridWorld, util::check_positive, Error, Result};

use super::Path;

/// Random-walk baseline: wander from the start until the goal, keep the best walk
///
/// Nothing is learned. Each walk picks uniformly among the moves that stay on the
/// grid, so it terminates with probability 1 but has no length bound unless a
/// step limit is set.
pub struct MonteCarloExplorer<'a> {
    world: &'a GridWorld,
    step_limit: Option<usize>,
}

impl<'a> MonteCarloExplorer<'a> {
    pub fn new(world: &'a GridWorld) -> Self {
        Self {
            world,
            step_limit: None,
        }
    }

    /// Abandon any walk that has not reached the goal after `limit` moves
    pub fn with_step_limit(mut self, limit: Option<usize>) -> Self {
        self.step_limit = limit;
        self
    }

    /// Run `simulations` independent walks
    ///
    /// **Returns** the walk with the strictly highest reward; on ties the earliest wins
    ///
    /// **Errors** with [`Error::InvalidParameter`] if `simulations` is `0`, and with
    /// [`Error::NoRouteFound`] if a step limit cut off every walk
    pub fn explore<R: Rng + ?Sized>(&self, simulations: usize, rng: &mut R) -> Result<Path> {
        check_positive!(simulations);
        info!(
            "exploring {simulations} random walks from {} to {}",
            self.world.start(),
            self.world.end()
        );

        let mut best: Option<Path> = None;
        for i in 0..simulations {
            let Some(path) = self.walk(rng) else {
                continue;
            };
            if best.as_ref().map_or(true, |b| path.reward > b.reward) {
                debug!(
                    "walk {i}: new best reward {} in {} steps",
                    path.reward,
                    path.steps()
                );
                best = Some(path);
            }
        }

        best.ok_or(Error::NoRouteFound {
            simulations,
            step_limit: self.step_limit.unwrap_or(usize::MAX),
        })
    }

    /// One random walk, `None` if it was cut off before the goal
    fn walk<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Path> {
        let indexer = self.world.indexer();
        let end = self.world.end_state();
        let mut state = self.world.start_state();
        let mut path = Path::starting_at(self.world.start());

        while state != end {
            if self.step_limit.is_some_and(|limit| path.steps() >= limit) {
                warn!("random walk abandoned after {} steps", path.steps());
                return None;
            }

            let Some(&action) = indexer.moves_from(state).choose(rng) else {
                warn!("random walk stuck at {}", indexer.position_of(state));
                return None;
            };
            state = indexer.transition(state, action);
            path.push(indexer.position_of(state), self.world.entry_reward(state));
        }

        Some(path)
    }
}
