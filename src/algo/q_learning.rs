use log::{debug, info, trace};
use rand::Rng;

use crate::{
    env::{Action, GridWorld, StateIndex},
    exploration::select_action,
    util::{check_interval, check_positive},
    Error, Result,
};

use super::QTable;

/// Configuration for the [`QLearningTrainer`]
#[derive(Clone, Debug, PartialEq)]
pub struct TrainConfig {
    /// Number of episodes to run
    ///
    /// **Default**: `100`
    pub episodes: u32,
    /// Probability of taking a random action, in `[0,1]`
    ///
    /// **Default**: `0.5`
    pub epsilon: f64,
    /// Learning rate, in `(0,1]`
    ///
    /// **Default**: `0.9`
    pub alpha: f64,
    /// Discount factor, in `[0,1]`
    ///
    /// **Default**: `0.9`
    pub gamma: f64,
    /// Step limit of a single episode
    ///
    /// **Default**: `100`
    pub max_steps: usize,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            episodes: 100,
            epsilon: 0.5,
            alpha: 0.9,
            gamma: 0.9,
            max_steps: 100,
        }
    }
}

impl TrainConfig {
    /// **Errors** with [`Error::InvalidParameter`](crate::Error::InvalidParameter) on the first value out of range
    pub fn validate(&self) -> Result<()> {
        let Self {
            episodes,
            epsilon,
            alpha,
            gamma,
            max_steps,
        } = *self;
        check_positive!(episodes);
        check_interval!(epsilon, 0.0, 1.0);
        check_interval!(alpha, 0.0, 1.0, exclusive);
        check_interval!(gamma, 0.0, 1.0);
        check_positive!(max_steps);
        Ok(())
    }
}

/// A single observed move
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transition {
    pub state: StateIndex,
    pub action: Action,
    pub next_state: StateIndex,
    pub reward: f64,
}

/// Tabular Q-learning over a [`GridWorld`]
///
/// The trainer owns the value table and is the only thing that mutates it. Each update
/// follows
///
/// Q(s,a) ← Q(s,a) + α(r + γ max<sub>a'</sub> Q(s',a') - Q(s,a))
#[derive(Clone, Debug)]
pub struct QLearningTrainer {
    q_table: QTable,
}

impl QLearningTrainer {
    /// A trainer with a zeroed table sized for `world`
    pub fn new(world: &GridWorld) -> Self {
        Self {
            q_table: QTable::new(world.num_states()),
        }
    }

    pub fn q_table(&self) -> &QTable {
        &self.q_table
    }

    /// Forget everything learned so far
    pub fn reset(&mut self) {
        self.q_table.clear();
    }

    /// Apply the update rule for one transition
    ///
    /// **Errors** with [`Error::IndexOutOfRange`] if either state has no row in the table
    pub fn learn(&mut self, transition: Transition, alpha: f64, gamma: f64) -> Result<()> {
        let num_states = self.q_table.num_states();
        for index in [transition.state, transition.next_state] {
            if index >= num_states {
                return Err(Error::IndexOutOfRange { index, num_states });
            }
        }
        self.update(transition, alpha, gamma);
        Ok(())
    }

    fn update(&mut self, transition: Transition, alpha: f64, gamma: f64) {
        let Transition {
            state,
            action,
            next_state,
            reward,
        } = transition;

        let q_value = self.q_table.get(state, action);
        let max_next_q = self.q_table.max_value(next_state);
        let updated = q_value + alpha * (reward + gamma * max_next_q - q_value);
        self.q_table.set(state, action, updated);
    }

    /// Run `config.episodes` episodes, updating the table in place
    ///
    /// **Errors** if any value in `config` is out of range, before any episode runs
    pub fn train<R: Rng + ?Sized>(
        &mut self,
        world: &GridWorld,
        config: &TrainConfig,
        rng: &mut R,
    ) -> Result<()> {
        config.validate()?;
        info!(
            "training {} episodes (epsilon={}, alpha={}, gamma={}, max_steps={})",
            config.episodes,
            config.epsilon,
            config.alpha,
            config.gamma,
            config.max_steps
        );

        let mut reached = 0u32;
        for episode in 0..config.episodes {
            if self.episode(world, config, episode, rng)? {
                reached += 1;
            }
        }

        info!(
            "training done, {reached}/{} episodes reached the goal",
            config.episodes
        );
        Ok(())
    }

    /// Run one episode from a random non-goal state
    ///
    /// **Returns** whether the goal was reached within the step limit
    fn episode<R: Rng + ?Sized>(
        &mut self,
        world: &GridWorld,
        config: &TrainConfig,
        episode: u32,
        rng: &mut R,
    ) -> Result<bool> {
        let indexer = world.indexer();
        let end = world.end_state();

        // uniform over every state but the goal
        let mut state = rng.gen_range(0..world.num_states() - 1);
        if state >= end {
            state += 1;
        }
        let start = state;

        let mut steps = 0;
        while steps < config.max_steps && state != end {
            let (next_state, action) =
                select_action(&self.q_table, indexer, state, config.epsilon, rng)?;
            let reward = world.entry_reward(next_state) as f64;
            trace!("episode {episode}: {state} --{action}--> {next_state} ({reward})");

            self.update(
                Transition {
                    state,
                    action,
                    next_state,
                    reward,
                },
                config.alpha,
                config.gamma,
            );
            state = next_state;
            steps += 1;
        }

        let reached = state == end;
        debug!("episode {episode}: start {start}, {steps} steps, reached goal: {reached}");
        Ok(reached)
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use strum::EnumCount;

    use crate::env::{Position, RewardTable, Terrain, TerrainModel};

    use super::*;

    #[test]
    fn update_rule_is_exact() {
        let world = GridWorld::reference();
        let mut trainer = QLearningTrainer::new(&world);
        let (state, next_state) = (8, 9);
        let q_old = 4.25;
        trainer.q_table.set(state, Action::Right, q_old);
        trainer.q_table.set(next_state, Action::Down, 20.0);
        trainer.q_table.set(next_state, Action::Up, -7.0);

        trainer.learn(
            Transition {
                state,
                action: Action::Right,
                next_state,
                reward: 10.0,
            },
            0.5,
            0.9,
        )
        .unwrap();

        assert_eq!(
            trainer.q_table().get(state, Action::Right),
            q_old + 0.5 * (10.0 + 0.9 * 20.0 - q_old),
            "Q(s,a) moves toward the target by alpha"
        );
        assert_eq!(trainer.q_table().get(next_state, Action::Down), 20.0, "Only Q(s,a) changes");
        assert_eq!(trainer.q_table().get(state, Action::Up), 0.0, "Only Q(s,a) changes");
    }

    #[test]
    fn goal_values_are_never_updated() {
        let world = GridWorld::reference();
        let mut trainer = QLearningTrainer::new(&world);
        let config = TrainConfig {
            episodes: 500,
            ..Default::default()
        };
        trainer
            .train(&world, &config, &mut StdRng::seed_from_u64(1))
            .unwrap();

        assert_eq!(
            trainer.q_table().row(world.end_state()),
            &[0.0; Action::COUNT],
            "Episodes stop on reaching the goal"
        );
        assert!(
            trainer.q_table().rows().any(|r| r.iter().any(|&v| v != 0.0)),
            "Training changed the table"
        );
    }

    #[test]
    fn entering_the_goal_is_rewarded() {
        // 2x2 grid: goal in the corner, every other cell worthless
        let rewards = RewardTable::empty().with(Terrain::Exit, 100);
        let terrain = TerrainModel::parse(&["L L", "L E"], rewards).unwrap();
        let world = GridWorld::new(terrain, Position::new(0, 0), Position::new(1, 1)).unwrap();
        let mut trainer = QLearningTrainer::new(&world);
        let config = TrainConfig {
            episodes: 200,
            epsilon: 1.0,
            alpha: 1.0,
            gamma: 0.5,
            max_steps: 50,
        };
        trainer
            .train(&world, &config, &mut StdRng::seed_from_u64(5))
            .unwrap();

        let q = trainer.q_table();
        assert_eq!(q.get(1, Action::Down), 100.0, "Moving into the goal earns its reward");
        assert_eq!(q.get(2, Action::Right), 100.0, "Moving into the goal earns its reward");
        assert_eq!(q.get(0, Action::Down), 50.0, "Value one step away is discounted");
        assert_eq!(q.get(0, Action::Right), 50.0, "Value one step away is discounted");
    }

    #[test]
    fn parameters_are_validated() {
        let world = GridWorld::reference();
        let mut trainer = QLearningTrainer::new(&world);
        let mut rng = StdRng::seed_from_u64(0);

        let cases = [
            ("episodes", TrainConfig { episodes: 0, ..Default::default() }),
            ("epsilon", TrainConfig { epsilon: 1.5, ..Default::default() }),
            ("alpha", TrainConfig { alpha: 0.0, ..Default::default() }),
            ("alpha", TrainConfig { alpha: 1.1, ..Default::default() }),
            ("gamma", TrainConfig { gamma: -0.1, ..Default::default() }),
            ("max_steps", TrainConfig { max_steps: 0, ..Default::default() }),
        ];
        for (field, config) in cases {
            let err = trainer.train(&world, &config, &mut rng).unwrap_err();
            assert!(
                matches!(err, Error::InvalidParameter { name, .. } if name == field),
                "{field} rejected, got {err}"
            );
        }
        assert_eq!(
            trainer.q_table(),
            &QTable::new(world.num_states()),
            "Rejected calls do no work"
        );
    }

    #[test]
    fn learn_rejects_states_outside_the_table() {
        let world = GridWorld::reference();
        let mut trainer = QLearningTrainer::new(&world);
        let transition = Transition {
            state: 99,
            action: Action::Up,
            next_state: 0,
            reward: 1.0,
        };
        assert_eq!(
            trainer.learn(transition, 0.5, 0.9),
            Err(Error::IndexOutOfRange {
                index: 99,
                num_states: 36
            })
        );

        let transition = Transition {
            state: 0,
            next_state: 36,
            ..transition
        };
        assert!(trainer.learn(transition, 0.5, 0.9).is_err(), "Next state is checked too");
        assert_eq!(
            trainer.q_table(),
            &QTable::new(world.num_states()),
            "Rejected updates leave the table alone"
        );
    }

    #[test]
    fn reset_forgets_training() {
        let world = GridWorld::reference();
        let mut trainer = QLearningTrainer::new(&world);
        trainer
            .train(&world, &TrainConfig::default(), &mut StdRng::seed_from_u64(11))
            .unwrap();
        assert_ne!(trainer.q_table(), &QTable::new(world.num_states()));

        trainer.reset();
        assert_eq!(trainer.q_table(), &QTable::new(world.num_states()), "Reset zeroes the table");
    }
}
