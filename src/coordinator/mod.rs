//! Turn/state coordination.
//!
//! The coordinator owns move application as a two-phase transition: staging
//! validates a move and computes the resulting patch and projected document
//! without touching the store; committing performs the single atomic write
//! that makes the transition real. A failed commit leaves the staged state
//! unconfirmed — the caller re-reads or re-watches the document instead of
//! trusting the projection.
//!
//! Bot turns run through the identical stage/commit path as human moves;
//! there is no special-cased bot transition logic.

mod bingo;
mod xo;

pub use bingo::{BingoCoordinator, PendingBingoCall, PendingBingoStart};
pub use xo::{PendingXoMove, XoCoordinator};

use crate::document::PlayerId;
use crate::games::xo::PlaceError;
use crate::store::StoreError;
use derive_more::{Display, Error, From};

/// A move rejected before any store write.
///
/// These are prevention-by-construction failures: the UI disables the
/// offending action, so surfacing one is a no-op for the user rather than a
/// crash.
#[derive(Debug, Clone, PartialEq, Display, Error)]
pub enum MoveError {
    /// The game has completed; terminal state is immutable.
    #[display("game is already over")]
    GameOver,
    /// The game has not been started yet (bingo staging phase).
    #[display("game has not started")]
    NotStarted,
    /// The game is already past the staging phase.
    #[display("game has already started")]
    AlreadyStarted,
    /// Someone else holds the turn.
    #[display("waiting for {expected} to move")]
    OutOfTurn {
        /// The player who may move.
        expected: PlayerId,
    },
    /// The acting player is not seated in this game.
    #[display("player '{player}' is not in this game")]
    UnknownPlayer {
        /// The unseated player.
        player: PlayerId,
    },
    /// The target square is occupied.
    #[display("square is already occupied")]
    SquareOccupied,
    /// The target index is outside the board.
    #[display("position out of bounds")]
    OutOfBounds,
    /// The number has already been called.
    #[display("number {number} was already called")]
    NumberAlreadyCalled {
        /// The repeated number.
        number: u8,
    },
    /// The number is not on the acting player's card.
    #[display("number {number} is not on this card")]
    NumberNotOnCard {
        /// The missing number.
        number: u8,
    },
}

impl From<PlaceError> for MoveError {
    fn from(err: PlaceError) -> Self {
        match err {
            PlaceError::SquareOccupied => MoveError::SquareOccupied,
            PlaceError::OutOfBounds => MoveError::OutOfBounds,
        }
    }
}

/// Error driving a bot turn end to end (stage, then commit).
#[derive(Debug, Clone, PartialEq, Display, Error, From)]
pub enum BotTurnError {
    /// The staged move was rejected locally.
    #[display("bot move rejected: {_0}")]
    Move(MoveError),
    /// The commit write failed; the transition did not happen.
    #[display("bot move not confirmed: {_0}")]
    Store(StoreError),
}
