//! XO: the shifting tic-tac-toe variant.
//!
//! Classic 3x3 rules with one twist: only the six most recent marks stay
//! live. From the seventh move on, each placement evicts the oldest
//! surviving mark, so positions keep shifting instead of filling up.

mod bot;
mod rules;
mod types;

pub use bot::choose_move;
pub use rules::{winner, WINNING_LINES};
pub use types::{Mark, PlaceError, Square, Track, XoBoard, WINDOW};
