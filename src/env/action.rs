use rand::Rng;
use strum::{Display, EnumCount, FromRepr, VariantArray};

/// A move of one cell in the grid
///
/// The discriminant is the action's column in the [`QTable`](crate::algo::QTable), and
/// [`EnumCount::COUNT`] the number of columns.
#[derive(VariantArray, EnumCount, FromRepr, Display, Clone, Copy, Debug, Hash, PartialEq, Eq)]
#[strum(serialize_all = "lowercase")]
pub enum Action {
    Up = 0,
    Down = 1,
    Left = 2,
    Right = 3,
}

impl Action {
    /// Column index of the action
    pub fn index(self) -> usize {
        self as usize
    }

    /// `(row, col)` offset of the move
    pub fn delta(self) -> (isize, isize) {
        match self {
            Action::Up => (-1, 0),
            Action::Down => (1, 0),
            Action::Left => (0, -1),
            Action::Right => (0, 1),
        }
    }

    /// Uniformly random action, including ones that would leave the grid
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::VARIANTS[rng.gen_range(0..Self::COUNT)]
    }
}
