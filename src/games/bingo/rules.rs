//! Winning-line detection for bingo.

use super::types::{BingoCard, MarkedNumbers};

/// The twelve winning lines of the 5x5 grid: five rows, five columns, and the
/// two diagonals, as cell indices.
pub const LINES: [[usize; 5]; 12] = [
    [0, 1, 2, 3, 4],
    [5, 6, 7, 8, 9],
    [10, 11, 12, 13, 14],
    [15, 16, 17, 18, 19],
    [20, 21, 22, 23, 24], // rows
    [0, 5, 10, 15, 20],
    [1, 6, 11, 16, 21],
    [2, 7, 12, 17, 22],
    [3, 8, 13, 18, 23],
    [4, 9, 14, 19, 24], // columns
    [0, 6, 12, 18, 24],
    [4, 8, 12, 16, 20], // diagonals
];

/// The center cell, which always counts as marked in win detection.
pub const FREE_CELL: usize = 12;

/// Returns every line currently complete on `card`, as the numbers along
/// each line in grid order.
///
/// Run after each new call; a player's progress is the count of complete
/// lines (the B/I/N/G/O ticks) and five complete lines is a full win. The
/// center cell bypasses the marked check. Pure: no hidden state.
pub fn find_winning_lines(card: &BingoCard, marked: &MarkedNumbers) -> Vec<[u8; 5]> {
    let mut complete = Vec::new();
    for line in LINES {
        let mut numbers = [0u8; 5];
        let mut all_marked = true;
        for (slot, &idx) in line.iter().enumerate() {
            let number = card.cells()[idx];
            numbers[slot] = number;
            if idx != FREE_CELL && !marked.contains(number) {
                all_marked = false;
                break;
            }
        }
        if all_marked {
            complete.push(numbers);
        }
    }
    complete
}
