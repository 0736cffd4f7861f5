//! Bot strategist for bingo.

use super::rules::{FREE_CELL, LINES};
use super::types::{BingoCard, MarkedNumbers, CARD_CELLS};
use crate::games::Difficulty;
use rand::seq::IndexedRandom;
use rand::Rng;
use tracing::debug;

/// Score for a cell by how many of a line through it is already marked.
const fn weight(marked_in_line: usize) -> u32 {
    match marked_in_line {
        4 => 1000,
        3 => 60,
        2 => 20,
        1 => 5,
        _ => 1,
    }
}

/// Bonus per line through a cell with three or more cells already marked.
const HOT_LINE_BONUS: u32 = 30;

/// Bonus for the center cell, which sits on four lines.
const CENTER_BONUS: u32 = 5;

/// Picks the next number for the bot to call, or `None` when every cell on
/// its card is marked.
///
/// The return value is a number, not an index: the move's semantics are
/// "call this number", matched against the cell holding it. Line counts use
/// the real marked set only; the free center applies to win detection, not
/// to the strategist's scoring.
pub fn choose_number<R: Rng + ?Sized>(
    card: &BingoCard,
    marked: &MarkedNumbers,
    difficulty: Difficulty,
    rng: &mut R,
) -> Option<u8> {
    let marked_cells: [bool; CARD_CELLS] =
        std::array::from_fn(|idx| marked.contains(card.cells()[idx]));
    let unmarked: Vec<usize> = (0..CARD_CELLS).filter(|&idx| !marked_cells[idx]).collect();
    if unmarked.is_empty() {
        return None;
    }

    let idx = match difficulty {
        Difficulty::Easy => *unmarked.choose(rng)?,
        Difficulty::Medium => line_completion_move(&marked_cells, &unmarked, rng),
        Difficulty::Hard => weighted_move(&marked_cells, &unmarked, rng),
    };
    let number = card.get(idx);
    debug!(%difficulty, idx, ?number, "bingo bot chose");
    number
}

fn count_marked_in_line(marked_cells: &[bool; CARD_CELLS], line: &[usize; 5]) -> usize {
    line.iter().filter(|&&idx| marked_cells[idx]).count()
}

/// Medium tier: pick the cell whose best line is closest to completion.
fn line_completion_move<R: Rng + ?Sized>(
    marked_cells: &[bool; CARD_CELLS],
    unmarked: &[usize],
    rng: &mut R,
) -> usize {
    let scores: Vec<(usize, usize)> = unmarked
        .iter()
        .map(|&idx| {
            let best = LINES
                .iter()
                .filter(|line| line.contains(&idx))
                .map(|line| count_marked_in_line(marked_cells, line))
                .max()
                .unwrap_or(0);
            (idx, best)
        })
        .collect();
    pick_best(&scores, rng)
}

/// Hard tier: complete a line outright when one is a single call away,
/// otherwise take the highest weighted score.
fn weighted_move<R: Rng + ?Sized>(
    marked_cells: &[bool; CARD_CELLS],
    unmarked: &[usize],
    rng: &mut R,
) -> usize {
    for &idx in unmarked {
        let wins = LINES
            .iter()
            .any(|line| line.contains(&idx) && count_marked_in_line(marked_cells, line) == 4);
        if wins {
            return idx;
        }
    }

    let scores: Vec<(usize, u32)> = unmarked
        .iter()
        .map(|&idx| {
            let mut score = 0;
            let mut hot_lines = 0;
            for line in &LINES {
                if !line.contains(&idx) {
                    continue;
                }
                let count = count_marked_in_line(marked_cells, line);
                score += weight(count);
                if count >= 3 {
                    hot_lines += 1;
                }
            }
            score += hot_lines * HOT_LINE_BONUS;
            if idx == FREE_CELL {
                score += CENTER_BONUS;
            }
            (idx, score)
        })
        .collect();
    pick_best(&scores, rng)
}

/// Max-score cell, uniform random among ties.
fn pick_best<S: Ord + Copy, R: Rng + ?Sized>(scores: &[(usize, S)], rng: &mut R) -> usize {
    let best = scores
        .iter()
        .map(|&(_, score)| score)
        .max()
        .expect("scores are non-empty for a card with unmarked cells");
    let candidates: Vec<usize> = scores
        .iter()
        .filter(|&&(_, score)| score == best)
        .map(|&(idx, _)| idx)
        .collect();
    *candidates.choose(rng).expect("candidates are non-empty")
}
