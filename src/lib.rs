/// Learning and search algorithms over the grid
pub mod algo;

/// Facade owning a world, a trainer and a random source
pub mod agent;

/// Terrain grid, state indexing and the start/goal pair
pub mod env;

/// Crate error types
pub mod error;

/// Exploration policies
pub mod exploration;

mod util;

pub use agent::Navigator;
pub use error::{Error, Result};
