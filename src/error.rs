use thiserror::Error;

use crate::env::{Position, StateIndex};

/// Errors raised while building a world or validating a call
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("malformed grid: {0}")]
    MalformedGrid(String),

    #[error("invalid start or end: {0}")]
    InvalidStartOrEnd(String),

    #[error("position {position} is outside the {size}x{size} grid")]
    OutOfBounds { position: Position, size: usize },

    #[error("state index {index} is outside [0, {num_states})")]
    IndexOutOfRange { index: StateIndex, num_states: usize },

    #[error("invalid value for `{name}`: {value}, expected {expected}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        expected: &'static str,
    },

    #[error("none of {simulations} random walks reached the goal within {step_limit} steps")]
    NoRouteFound { simulations: usize, step_limit: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
