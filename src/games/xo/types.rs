//! Core domain types for the XO board.

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Number of marks that stay live on the board at once.
///
/// Placing a seventh mark evicts the oldest surviving one, turning the game
/// into a shifting-board variant rather than classic tic-tac-toe.
pub const WINDOW: usize = 6;

/// A player's mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    /// Mark X (moves first).
    X,
    /// Mark O (moves second).
    O,
}

impl Mark {
    /// Returns the opposing mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

/// A square on the XO board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Square {
    /// Empty square.
    Empty,
    /// Square occupied by a mark.
    Occupied(Mark),
}

impl Square {
    /// Returns the occupying mark, if any.
    pub fn mark(self) -> Option<Mark> {
        match self {
            Square::Empty => None,
            Square::Occupied(mark) => Some(mark),
        }
    }
}

/// Error placing a mark on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum PlaceError {
    /// The square is already occupied.
    #[display("square is already occupied")]
    SquareOccupied,
    /// The index is outside the 3x3 grid.
    #[display("position out of bounds (must be 0-8)")]
    OutOfBounds,
}

/// FIFO queue of occupied cell indices, oldest first.
///
/// Capacity is [`WINDOW`]; [`XoBoard::place`] consults it to evict the oldest
/// surviving mark once the board would exceed six live marks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Track {
    slots: VecDeque<usize>,
}

impl Track {
    /// Creates an empty track.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live marks recorded.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether no marks are recorded.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Indices currently occupied, oldest first.
    pub fn slots(&self) -> impl Iterator<Item = usize> + '_ {
        self.slots.iter().copied()
    }

    /// Records a newly occupied index; returns the evicted index once the
    /// window is exceeded.
    fn push(&mut self, idx: usize) -> Option<usize> {
        self.slots.push_back(idx);
        if self.slots.len() > WINDOW {
            self.slots.pop_front()
        } else {
            None
        }
    }
}

/// 3x3 XO board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "Vec<Option<Mark>>", try_from = "Vec<Option<Mark>>")]
pub struct XoBoard {
    squares: [Square; 9],
}

impl XoBoard {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self {
            squares: [Square::Empty; 9],
        }
    }

    /// Returns the square at the given position (0-8).
    pub fn get(&self, pos: usize) -> Option<Square> {
        self.squares.get(pos).copied()
    }

    /// Checks whether a square is empty.
    pub fn is_empty(&self, pos: usize) -> bool {
        matches!(self.get(pos), Some(Square::Empty))
    }

    /// Returns all squares as a slice.
    pub fn squares(&self) -> &[Square; 9] {
        &self.squares
    }

    /// Indices of all empty squares, ascending.
    pub fn empty_indices(&self) -> Vec<usize> {
        self.squares
            .iter()
            .enumerate()
            .filter(|(_, square)| **square == Square::Empty)
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Checks whether every square is occupied.
    pub fn is_full(&self) -> bool {
        self.squares.iter().all(|square| *square != Square::Empty)
    }

    /// Places `mark` at `idx`, enforcing the sliding-window invariant through
    /// `track`. Returns the evicted index, if the window overflowed.
    ///
    /// # Errors
    ///
    /// Returns [`PlaceError`] if the index is out of bounds or occupied.
    pub fn place(
        &mut self,
        idx: usize,
        mark: Mark,
        track: &mut Track,
    ) -> Result<Option<usize>, PlaceError> {
        if idx >= 9 {
            return Err(PlaceError::OutOfBounds);
        }
        if !self.is_empty(idx) {
            return Err(PlaceError::SquareOccupied);
        }
        self.squares[idx] = Square::Occupied(mark);
        let evicted = track.push(idx);
        if let Some(old) = evicted {
            self.squares[old] = Square::Empty;
        }
        Ok(evicted)
    }

    /// Places a mark without window bookkeeping. Used by the strategist's
    /// lookahead, which searches plain placements.
    pub(crate) fn place_unchecked(&mut self, idx: usize, mark: Mark) {
        self.squares[idx] = Square::Occupied(mark);
    }

    /// Clears a square. Counterpart to [`XoBoard::place_unchecked`] for
    /// backtracking search.
    pub(crate) fn clear(&mut self, idx: usize) {
        self.squares[idx] = Square::Empty;
    }
}

impl Default for XoBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl From<XoBoard> for Vec<Option<Mark>> {
    fn from(board: XoBoard) -> Self {
        board.squares.iter().map(|square| square.mark()).collect()
    }
}

impl TryFrom<Vec<Option<Mark>>> for XoBoard {
    type Error = PlaceError;

    fn try_from(cells: Vec<Option<Mark>>) -> Result<Self, Self::Error> {
        if cells.len() != 9 {
            return Err(PlaceError::OutOfBounds);
        }
        let mut squares = [Square::Empty; 9];
        for (idx, cell) in cells.into_iter().enumerate() {
            if let Some(mark) = cell {
                squares[idx] = Square::Occupied(mark);
            }
        }
        Ok(Self { squares })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_and_evict() {
        let mut board = XoBoard::new();
        let mut track = Track::new();

        // Six marks fit without eviction.
        for (move_no, idx) in [0, 1, 2, 3, 5, 6].into_iter().enumerate() {
            let mark = if move_no % 2 == 0 { Mark::X } else { Mark::O };
            assert_eq!(board.place(idx, mark, &mut track), Ok(None));
        }
        assert_eq!(track.len(), 6);

        // The seventh evicts the first.
        let evicted = board.place(7, Mark::X, &mut track).unwrap();
        assert_eq!(evicted, Some(0));
        assert!(board.is_empty(0));
        assert_eq!(track.len(), 6);
    }

    #[test]
    fn test_place_occupied() {
        let mut board = XoBoard::new();
        let mut track = Track::new();
        board.place(4, Mark::X, &mut track).unwrap();
        assert_eq!(
            board.place(4, Mark::O, &mut track),
            Err(PlaceError::SquareOccupied)
        );
    }

    #[test]
    fn test_place_out_of_bounds() {
        let mut board = XoBoard::new();
        let mut track = Track::new();
        assert_eq!(
            board.place(9, Mark::X, &mut track),
            Err(PlaceError::OutOfBounds)
        );
    }

    #[test]
    fn test_wire_roundtrip() {
        let mut board = XoBoard::new();
        let mut track = Track::new();
        board.place(0, Mark::X, &mut track).unwrap();
        board.place(4, Mark::O, &mut track).unwrap();

        let json = serde_json::to_string(&board).unwrap();
        assert_eq!(json, r#"["X",null,null,null,"O",null,null,null,null]"#);
        let back: XoBoard = serde_json::from_str(&json).unwrap();
        assert_eq!(back, board);
    }
}
