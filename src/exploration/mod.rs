use rand::Rng;

/// Exploration policy result
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Choice {
    Explore,
    Exploit,
}

impl Choice {
    /// Explore with probability `epsilon`
    ///
    /// No random number is drawn when `epsilon` is `0`.
    pub fn draw<R: Rng + ?Sized>(epsilon: f64, rng: &mut R) -> Self {
        if epsilon > 0.0 && rng.gen::<f64>() < epsilon {
            Choice::Explore
        } else {
            Choice::Exploit
        }
    }
}

mod epsilon_greedy;

pub use epsilon_greedy::select_action;
