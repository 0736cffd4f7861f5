//! Win detection for the XO board.

use super::types::{Mark, XoBoard};

/// The eight winning lines of the 3x3 grid, as cell indices.
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8], // rows
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8], // columns
    [0, 4, 8],
    [2, 4, 6], // diagonals
];

/// Checks whether any line is held by a single mark.
///
/// Pure: same board always yields the same answer. A full board with no line
/// simply returns `None`.
pub fn winner(board: &XoBoard) -> Option<Mark> {
    for [a, b, c] in WINNING_LINES {
        let mark = board.get(a).and_then(|square| square.mark());
        if mark.is_some()
            && mark == board.get(b).and_then(|square| square.mark())
            && mark == board.get(c).and_then(|square| square.mark())
        {
            return mark;
        }
    }
    None
}
