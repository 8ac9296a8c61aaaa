use std::collections::HashMap;

use strum::{Display, EnumString};

use crate::{Error, Result};

use super::Position;

/// The kind of ground covering a cell
#[derive(Display, EnumString, Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum Terrain {
    #[strum(serialize = "L")]
    Land,
    #[strum(serialize = "M")]
    Mud,
    #[strum(serialize = "W")]
    Water,
    #[strum(serialize = "E")]
    Exit,
}

/// Reward for entering a cell of each terrain
///
/// Labels missing from the table are worth `0`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RewardTable {
    rewards: HashMap<Terrain, i64>,
}

impl RewardTable {
    /// A table in which every label is worth `0`
    pub fn empty() -> Self {
        Self {
            rewards: HashMap::new(),
        }
    }

    /// Set the reward for `label`
    pub fn with(mut self, label: Terrain, reward: i64) -> Self {
        self.rewards.insert(label, reward);
        self
    }

    pub fn reward(&self, label: Terrain) -> i64 {
        self.rewards.get(&label).copied().unwrap_or(0)
    }
}

impl Default for RewardTable {
    fn default() -> Self {
        Self::empty()
            .with(Terrain::Mud, -300)
            .with(Terrain::Water, -500)
            .with(Terrain::Land, 10)
            .with(Terrain::Exit, 1000)
    }
}

impl FromIterator<(Terrain, i64)> for RewardTable {
    fn from_iter<T: IntoIterator<Item = (Terrain, i64)>>(iter: T) -> Self {
        Self {
            rewards: iter.into_iter().collect(),
        }
    }
}

/// The reference map, start at row 0 column 3 and the exit at row 5 column 0
pub const REFERENCE_MAP: [&str; 6] = [
    "W M M L L W",
    "W W L M L L",
    "M L L M L M",
    "M L L L L L",
    "M L M L M L",
    "E W W W W W",
];

const REFERENCE_GRID: [[Terrain; 6]; 6] = {
    use Terrain::*;
    [
        [Water, Mud, Mud, Land, Land, Water],
        [Water, Water, Land, Mud, Land, Land],
        [Mud, Land, Land, Mud, Land, Mud],
        [Mud, Land, Land, Land, Land, Land],
        [Mud, Land, Mud, Land, Mud, Land],
        [Exit, Water, Water, Water, Water, Water],
    ]
};

/// An immutable square grid of terrain labels with a reward per cell
#[derive(Clone, Debug, PartialEq)]
pub struct TerrainModel {
    grid: Vec<Vec<Terrain>>,
    rewards: RewardTable,
    reward_matrix: Vec<Vec<i64>>,
}

impl TerrainModel {
    /// Build a model from rows of labels
    ///
    /// **Errors** with [`Error::MalformedGrid`] if the grid is empty, ragged or not square
    pub fn new(grid: Vec<Vec<Terrain>>, rewards: RewardTable) -> Result<Self> {
        let size = grid.len();
        if size == 0 {
            return Err(Error::MalformedGrid("grid has no rows".into()));
        }
        if let Some((i, row)) = grid.iter().enumerate().find(|(_, r)| r.len() != size) {
            return Err(Error::MalformedGrid(format!(
                "row {i} has {} cells, expected {size}",
                row.len()
            )));
        }

        Ok(Self::build(grid, rewards))
    }

    fn build(grid: Vec<Vec<Terrain>>, rewards: RewardTable) -> Self {
        let reward_matrix = grid
            .iter()
            .map(|row| row.iter().map(|&label| rewards.reward(label)).collect())
            .collect();

        Self {
            grid,
            rewards,
            reward_matrix,
        }
    }

    /// Build a model from rows of terrain symbols, ignoring whitespace
    ///
    /// **Errors** with [`Error::MalformedGrid`] on an unknown symbol or a badly shaped grid
    pub fn parse(rows: &[&str], rewards: RewardTable) -> Result<Self> {
        let grid = rows
            .iter()
            .map(|row| {
                row.chars()
                    .filter(|c| !c.is_whitespace())
                    .map(|symbol| {
                        let mut buf = [0; 4];
                        symbol.encode_utf8(&mut buf).parse::<Terrain>().map_err(|_| {
                            Error::MalformedGrid(format!("unknown terrain symbol `{symbol}`"))
                        })
                    })
                    .collect::<Result<Vec<_>>>()
            })
            .collect::<Result<Vec<_>>>()?;
        Self::new(grid, rewards)
    }

    /// [`REFERENCE_MAP`] with the default [`RewardTable`]
    pub fn reference() -> Self {
        let grid = REFERENCE_GRID.iter().map(|row| row.to_vec()).collect();
        Self::build(grid, RewardTable::default())
    }

    pub fn size(&self) -> usize {
        self.grid.len()
    }

    /// Label of an on-grid cell
    ///
    /// **Panics** if `pos` is off the grid
    pub fn label(&self, pos: Position) -> Terrain {
        self.grid[pos.row][pos.col]
    }

    /// Reward for entering an on-grid cell
    ///
    /// **Panics** if `pos` is off the grid
    pub fn reward(&self, pos: Position) -> i64 {
        self.reward_matrix[pos.row][pos.col]
    }

    pub fn reward_matrix(&self) -> &[Vec<i64>] {
        &self.reward_matrix
    }

    pub fn rewards(&self) -> &RewardTable {
        &self.rewards
    }
}
