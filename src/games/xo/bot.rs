//! Bot strategist for XO.

use super::rules::winner;
use super::types::{Mark, XoBoard};
use crate::games::Difficulty;
use rand::seq::IndexedRandom;
use rand::Rng;
use tracing::debug;

/// Search horizon for the hard tier. The window evicts marks from move seven
/// onward, so deeper lookahead buys little and costs interactive latency.
const MAX_DEPTH: u8 = 3;

/// Picks the next cell for the bot holding `mark`, or `None` when the board
/// is full (the caller treats that as a draw condition, not an error).
///
/// Pure apart from the injected randomness; persistence belongs to the
/// coordinator.
pub fn choose_move<R: Rng + ?Sized>(
    board: &XoBoard,
    mark: Mark,
    difficulty: Difficulty,
    rng: &mut R,
) -> Option<usize> {
    let empty = board.empty_indices();
    if empty.is_empty() {
        return None;
    }
    let choice = match difficulty {
        Difficulty::Easy => empty.choose(rng).copied(),
        Difficulty::Medium => heuristic_move(board, mark, &empty, rng),
        Difficulty::Hard => Some(minimax_move(board, mark, &empty)),
    };
    debug!(?mark, %difficulty, ?choice, "xo bot chose");
    choice
}

/// Win if possible, block if necessary, otherwise play at random.
fn heuristic_move<R: Rng + ?Sized>(
    board: &XoBoard,
    mark: Mark,
    empty: &[usize],
    rng: &mut R,
) -> Option<usize> {
    if let Some(idx) = immediate_win(board, mark, empty) {
        return Some(idx);
    }
    if let Some(idx) = immediate_win(board, mark.opponent(), empty) {
        return Some(idx);
    }
    empty.choose(rng).copied()
}

/// First empty index that completes a line for `mark`, in index order.
fn immediate_win(board: &XoBoard, mark: Mark, empty: &[usize]) -> Option<usize> {
    let mut probe = board.clone();
    for &idx in empty {
        probe.place_unchecked(idx, mark);
        let won = winner(&probe) == Some(mark);
        probe.clear(idx);
        if won {
            return Some(idx);
        }
    }
    None
}

/// Depth-limited minimax over plain placements. Ties break toward the
/// first-found index so the hard tier is deterministic.
fn minimax_move(board: &XoBoard, mark: Mark, empty: &[usize]) -> usize {
    let mut probe = board.clone();
    let mut best_idx = empty[0];
    let mut best_score = i32::MIN;
    for &idx in empty {
        probe.place_unchecked(idx, mark);
        let score = minimax(&mut probe, mark, mark.opponent(), 1);
        probe.clear(idx);
        if score > best_score {
            best_score = score;
            best_idx = idx;
        }
    }
    best_idx
}

/// Scores the position after the previous ply: a bot win is worth `10 - depth`,
/// an opponent win `depth - 10`, and an exhausted search zero.
fn minimax(board: &mut XoBoard, bot: Mark, to_move: Mark, depth: u8) -> i32 {
    if let Some(mark) = winner(board) {
        return if mark == bot {
            10 - i32::from(depth)
        } else {
            i32::from(depth) - 10
        };
    }
    if depth >= MAX_DEPTH {
        return 0;
    }
    let empty = board.empty_indices();
    if empty.is_empty() {
        return 0;
    }

    let maximizing = to_move == bot;
    let mut best = if maximizing { i32::MIN } else { i32::MAX };
    for idx in empty {
        board.place_unchecked(idx, to_move);
        let score = minimax(board, bot, to_move.opponent(), depth + 1);
        board.clear(idx);
        best = if maximizing {
            best.max(score)
        } else {
            best.min(score)
        };
    }
    best
}
