use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
    algo::{
        GreedyPathExtractor, MonteCarloExplorer, Path, PathError, QLearningTrainer, QTable,
        TrainConfig,
    },
    env::GridWorld,
    Result,
};

/// A robot learning its way across one [`GridWorld`]
///
/// Owns the world, the trainer with its value table, and the single random source every
/// stochastic call draws from. Seed the source for reproducible runs.
///
/// ```
/// use terrain_rl::Navigator;
///
/// let mut robot = Navigator::reference(42);
/// let baseline = robot.monte_carlo_explore(100).unwrap();
/// robot.train(5000, 0.5, 0.9, 0.9, 100).unwrap();
/// let learned = robot.greedy_path().unwrap();
/// assert_eq!(baseline.end(), learned.end());
/// assert_eq!(learned.reward, 780);
/// ```
pub struct Navigator<R: Rng = StdRng> {
    world: GridWorld,
    trainer: QLearningTrainer,
    rng: R,
    walk_limit: Option<usize>,
}

impl Navigator<StdRng> {
    /// Navigator with a [`StdRng`] seeded from `seed`
    pub fn seeded(world: GridWorld, seed: u64) -> Self {
        Self::new(world, StdRng::seed_from_u64(seed))
    }

    /// Navigator on [`GridWorld::reference`]
    pub fn reference(seed: u64) -> Self {
        Self::seeded(GridWorld::reference(), seed)
    }
}

impl<R: Rng> Navigator<R> {
    pub fn new(world: GridWorld, rng: R) -> Self {
        let trainer = QLearningTrainer::new(&world);
        Self {
            world,
            trainer,
            rng,
            walk_limit: None,
        }
    }

    pub fn world(&self) -> &GridWorld {
        &self.world
    }

    /// Cap the length of each Monte Carlo walk, `None` for no cap
    pub fn set_walk_limit(&mut self, limit: Option<usize>) {
        self.walk_limit = limit;
    }

    /// Best of `simulations` random walks from start to goal
    pub fn monte_carlo_explore(&mut self, simulations: usize) -> Result<Path> {
        MonteCarloExplorer::new(&self.world)
            .with_step_limit(self.walk_limit)
            .explore(simulations, &mut self.rng)
    }

    /// Run Q-learning, updating the value table in place
    pub fn train(
        &mut self,
        episodes: u32,
        epsilon: f64,
        alpha: f64,
        gamma: f64,
        max_steps: usize,
    ) -> Result<()> {
        self.train_with(&TrainConfig {
            episodes,
            epsilon,
            alpha,
            gamma,
            max_steps,
        })
    }

    pub fn train_with(&mut self, config: &TrainConfig) -> Result<()> {
        self.trainer.train(&self.world, config, &mut self.rng)
    }

    pub fn reward_matrix(&self) -> &[Vec<i64>] {
        self.world.terrain().reward_matrix()
    }

    /// Copy of the value table as it stands
    pub fn q_table_snapshot(&self) -> QTable {
        self.trainer.q_table().clone()
    }

    /// Route read greedily from the current value table
    pub fn greedy_path(&self) -> std::result::Result<Path, PathError> {
        GreedyPathExtractor::new(&self.world, self.trainer.q_table()).extract()
    }
}
