//! Bingo: 5x5 cards, twelve lines, five lines to win.
//!
//! Every player holds a card of 25 unique numbers; calls are global and a
//! call marks the number on every card holding it. A player's progress is
//! their count of complete lines, and five complete lines wins outright.

mod bot;
mod rules;
mod types;

pub use bot::choose_number;
pub use rules::{find_winning_lines, FREE_CELL, LINES};
pub use types::{BingoCard, CardError, MarkedNumbers, CARD_CELLS, NUMBER_POOL};
