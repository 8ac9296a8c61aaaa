use std::fmt;

use strum::VariantArray;

use crate::{Error, Result};

use super::Action;

/// Linear index of a cell, `row * size + col`
pub type StateIndex = usize;

/// A cell in the grid
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Bijection between positions on a `size x size` grid and state indices
///
/// Also owns the transition rule: a move that would leave the grid is a self-loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StateIndexer {
    size: usize,
}

impl StateIndexer {
    pub fn new(size: usize) -> Self {
        Self { size }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn num_states(&self) -> usize {
        self.size * self.size
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.size && pos.col < self.size
    }

    /// Encode a position as a state index
    ///
    /// **Errors** with [`Error::OutOfBounds`] if `pos` is not on the grid
    pub fn encode(&self, pos: Position) -> Result<StateIndex> {
        if !self.contains(pos) {
            return Err(Error::OutOfBounds {
                position: pos,
                size: self.size,
            });
        }
        Ok(self.index_of(pos))
    }

    /// Decode a state index back into a position
    ///
    /// **Errors** with [`Error::IndexOutOfRange`] if `state >= num_states()`
    pub fn decode(&self, state: StateIndex) -> Result<Position> {
        if state >= self.num_states() {
            return Err(Error::IndexOutOfRange {
                index: state,
                num_states: self.num_states(),
            });
        }
        Ok(self.position_of(state))
    }

    /// Unchecked encode for positions already known to be on the grid
    pub(crate) fn index_of(&self, pos: Position) -> StateIndex {
        pos.row * self.size + pos.col
    }

    /// Unchecked decode for states produced by this indexer
    pub(crate) fn position_of(&self, state: StateIndex) -> Position {
        Position::new(state / self.size, state % self.size)
    }

    /// Neighbouring cell in the direction of `action`, or `None` off the grid
    pub fn neighbor(&self, pos: Position, action: Action) -> Option<Position> {
        let (dr, dc) = action.delta();
        let row = pos.row.checked_add_signed(dr)?;
        let col = pos.col.checked_add_signed(dc)?;
        let next = Position::new(row, col);
        self.contains(next).then_some(next)
    }

    /// Apply `action` in `state`, staying put if the move leaves the grid
    ///
    /// **Errors** with [`Error::IndexOutOfRange`] if `state >= num_states()`
    pub fn step(&self, state: StateIndex, action: Action) -> Result<StateIndex> {
        self.decode(state)?;
        Ok(self.transition(state, action))
    }

    /// Actions from `state` that do not self-loop, in action order
    ///
    /// **Errors** with [`Error::IndexOutOfRange`] if `state >= num_states()`
    pub fn in_bounds_actions(&self, state: StateIndex) -> Result<Vec<Action>> {
        self.decode(state)?;
        Ok(self.moves_from(state))
    }

    /// Unchecked [`step`](Self::step)
    pub(crate) fn transition(&self, state: StateIndex, action: Action) -> StateIndex {
        self.neighbor(self.position_of(state), action)
            .map_or(state, |next| self.index_of(next))
    }

    /// Unchecked [`in_bounds_actions`](Self::in_bounds_actions)
    pub(crate) fn moves_from(&self, state: StateIndex) -> Vec<Action> {
        let pos = self.position_of(state);
        Action::VARIANTS
            .iter()
            .copied()
            .filter(|&a| self.neighbor(pos, a).is_some())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIZE: usize = 6;

    #[test]
    fn encode_decode_bijection() {
        let indexer = StateIndexer::new(SIZE);
        for row in 0..SIZE {
            for col in 0..SIZE {
                let pos = Position::new(row, col);
                let state = indexer.encode(pos).unwrap();
                assert_eq!(state, row * SIZE + col, "Encoding is row-major");
                assert_eq!(indexer.decode(state).unwrap(), pos, "decode(encode(p)) == p");
            }
        }
        for state in 0..indexer.num_states() {
            let pos = indexer.decode(state).unwrap();
            assert_eq!(indexer.encode(pos).unwrap(), state, "encode(decode(i)) == i");
        }
    }

    #[test]
    fn out_of_bounds_is_rejected() {
        let indexer = StateIndexer::new(SIZE);
        assert_eq!(
            indexer.encode(Position::new(SIZE, 0)),
            Err(Error::OutOfBounds {
                position: Position::new(SIZE, 0),
                size: SIZE
            })
        );
        assert!(indexer.encode(Position::new(0, SIZE)).is_err());
        assert_eq!(
            indexer.decode(SIZE * SIZE),
            Err(Error::IndexOutOfRange {
                index: SIZE * SIZE,
                num_states: SIZE * SIZE
            })
        );
    }

    #[test]
    fn transitions_stay_on_grid() {
        let indexer = StateIndexer::new(SIZE);
        for state in 0..indexer.num_states() {
            for &action in Action::VARIANTS {
                let next = indexer.decode(indexer.step(state, action).unwrap()).unwrap();
                assert!(next.row < SIZE && next.col < SIZE, "{action} from {state} stays on grid");
            }
        }
    }

    #[test]
    fn boundary_moves_self_loop() {
        let indexer = StateIndexer::new(SIZE);
        let origin = indexer.encode(Position::new(0, 0)).unwrap();
        assert_eq!(indexer.step(origin, Action::Up).unwrap(), origin, "Up from (0, 0) self-loops");
        assert_eq!(indexer.step(origin, Action::Left).unwrap(), origin, "Left from (0, 0) self-loops");
        assert_eq!(indexer.step(origin, Action::Down).unwrap(), SIZE, "Down from (0, 0) moves a row");
        assert_eq!(indexer.step(origin, Action::Right).unwrap(), 1, "Right from (0, 0) moves a column");

        let corner = indexer.encode(Position::new(SIZE - 1, SIZE - 1)).unwrap();
        assert_eq!(indexer.step(corner, Action::Down).unwrap(), corner);
        assert_eq!(indexer.step(corner, Action::Right).unwrap(), corner);
    }

    #[test]
    fn in_bounds_actions_keep_action_order() {
        let indexer = StateIndexer::new(SIZE);
        assert_eq!(
            indexer.in_bounds_actions(0).unwrap(),
            vec![Action::Down, Action::Right],
            "Corner has two moves"
        );
        let inner = indexer.encode(Position::new(2, 3)).unwrap();
        assert_eq!(indexer.in_bounds_actions(inner).unwrap(), Action::VARIANTS.to_vec());
        let edge = indexer.encode(Position::new(5, 2)).unwrap();
        assert_eq!(
            indexer.in_bounds_actions(edge).unwrap(),
            vec![Action::Up, Action::Left, Action::Right]
        );
    }

    #[test]
    fn state_indices_past_the_grid_are_rejected() {
        let indexer = StateIndexer::new(SIZE);
        let past = SIZE * SIZE;
        let err = Error::IndexOutOfRange {
            index: past,
            num_states: SIZE * SIZE,
        };
        assert_eq!(indexer.step(past, Action::Up), Err(err.clone()), "No valid-looking state");
        assert_eq!(indexer.in_bounds_actions(past), Err(err));
        assert!(indexer.step(past + 63, Action::Left).is_err());
        assert_eq!(indexer.step(past - 1, Action::Up), Ok(past - 1 - SIZE));
    }
}
