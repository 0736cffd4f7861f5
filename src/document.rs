//! Store-facing game documents and merge patches.
//!
//! These are the shapes read from and written to the shared game store. Field
//! names mirror the hosted schema (camelCase, epoch-millisecond timestamps).
//! Patch types model the store's atomic merge-patch: only populated fields are
//! written, and a whole patch lands or none of it does.

use crate::games::bingo::{BingoCard, MarkedNumbers};
use crate::games::xo::{Mark, Track, XoBoard};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Unique identifier for a game document.
pub type GameId = String;

/// Unique identifier for a player (human or bot).
pub type PlayerId = String;

/// Whether a game was created against bot opponents or other users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum GameKind {
    /// Game against bot opponents.
    Bot,
    /// Game against other users.
    User,
}

/// Lifecycle status of a game document.
///
/// `Created` is the bingo board-shuffle staging phase; XO games begin in
/// `Playing`. `Completed` is terminal: a rematch creates a new document, a
/// finished one is never reset in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum GameStatus {
    /// Created but not yet started (bingo only).
    Created,
    /// Moves are being accepted.
    Playing,
    /// Terminal; no further moves.
    Completed,
}

/// An XO game document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct XoDocument {
    /// Document id.
    pub id: GameId,
    /// Bot or user opponents.
    #[serde(rename = "type")]
    pub kind: GameKind,
    /// Lifecycle status.
    pub status: GameStatus,
    /// The 9-cell board.
    pub board: XoBoard,
    /// Sliding-window move order (occupied indices, oldest first).
    pub track: Track,
    /// Accepted moves so far; 20 with no winner is a draw.
    pub move_count: u32,
    /// Player holding X.
    #[serde(rename = "playerXUserId")]
    pub player_x: PlayerId,
    /// Player holding O.
    #[serde(rename = "playerOUserId")]
    pub player_o: PlayerId,
    /// Whose move it is.
    pub current_turn: PlayerId,
    /// Winner, once completed. `None` on a completed game means a draw.
    pub won_by: Option<PlayerId>,
    /// Bot difficulty level (1..=3).
    pub level: u8,
    /// Last write time.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub updated_at: DateTime<Utc>,
}

impl XoDocument {
    /// Returns the mark held by `player`, if they are seated in this game.
    pub fn mark_of(&self, player: &str) -> Option<Mark> {
        if self.player_x == player {
            Some(Mark::X)
        } else if self.player_o == player {
            Some(Mark::O)
        } else {
            None
        }
    }

    /// Returns the player holding `mark`.
    pub fn player_for(&self, mark: Mark) -> &PlayerId {
        match mark {
            Mark::X => &self.player_x,
            Mark::O => &self.player_o,
        }
    }

    /// The seated player who is not `player`.
    pub fn opponent_of(&self, player: &str) -> Option<&PlayerId> {
        if self.player_x == player {
            Some(&self.player_o)
        } else if self.player_o == player {
            Some(&self.player_x)
        } else {
            None
        }
    }
}

/// Partial update to an [`XoDocument`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct XoPatch {
    /// New board contents.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub board: Option<XoBoard>,
    /// New move-order window.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track: Option<Track>,
    /// New move count.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub move_count: Option<u32>,
    /// New turn owner.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_turn: Option<PlayerId>,
    /// New lifecycle status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<GameStatus>,
    /// Winner to record; `Some(None)` records a draw.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub won_by: Option<Option<PlayerId>>,
    /// Write timestamp.
    #[serde(
        with = "chrono::serde::ts_milliseconds_option",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub updated_at: Option<DateTime<Utc>>,
}

impl XoPatch {
    /// Applies the populated fields to `doc`, leaving the rest untouched.
    pub fn apply(&self, doc: &mut XoDocument) {
        if let Some(board) = &self.board {
            doc.board = board.clone();
        }
        if let Some(track) = &self.track {
            doc.track = track.clone();
        }
        if let Some(move_count) = self.move_count {
            doc.move_count = move_count;
        }
        if let Some(current_turn) = &self.current_turn {
            doc.current_turn = current_turn.clone();
        }
        if let Some(status) = self.status {
            doc.status = status;
        }
        if let Some(won_by) = &self.won_by {
            doc.won_by = won_by.clone();
        }
        if let Some(updated_at) = self.updated_at {
            doc.updated_at = updated_at;
        }
    }
}

/// A bingo game document.
///
/// Per-player cards and winning lines live in [`BingoSeat`] records keyed by
/// the game id, matching the hosted schema's separate player collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BingoDocument {
    /// Document id.
    pub id: GameId,
    /// Bot or user opponents.
    #[serde(rename = "type")]
    pub kind: GameKind,
    /// Lifecycle status.
    pub status: GameStatus,
    /// Every number called so far, in call order.
    pub marked_numbers: MarkedNumbers,
    /// Turn rotation; the front id acts next and moves to the back after.
    pub order_of_turns: VecDeque<PlayerId>,
    /// Size of the number pool cards were dealt from.
    pub limit: u8,
    /// Winner, once completed.
    pub won_by: Option<PlayerId>,
    /// Creation time.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    /// Last write time.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub updated_at: DateTime<Utc>,
}

impl BingoDocument {
    /// The player whose turn it is.
    pub fn current_turn(&self) -> Option<&PlayerId> {
        self.order_of_turns.front()
    }
}

/// One player's seat in a bingo game: their card and accumulated lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BingoSeat {
    /// Seat record id.
    pub id: String,
    /// The seated player.
    pub user_id: PlayerId,
    /// The game this seat belongs to.
    #[serde(rename = "bingoId")]
    pub game_id: GameId,
    /// The player's 25-cell card.
    #[serde(rename = "board")]
    pub card: BingoCard,
    /// Complete lines accumulated so far; five is a full win, and the count
    /// drives the B/I/N/G/O progress ticks. Never shrinks.
    pub winning_array: Vec<[u8; 5]>,
}

impl BingoSeat {
    /// Progress toward a full win: complete lines out of five.
    pub fn progress(&self) -> usize {
        self.winning_array.len().min(5)
    }
}

/// Partial update to a [`BingoDocument`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BingoPatch {
    /// New called-number set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marked_numbers: Option<MarkedNumbers>,
    /// New turn rotation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_of_turns: Option<VecDeque<PlayerId>>,
    /// New lifecycle status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<GameStatus>,
    /// Winner to record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub won_by: Option<Option<PlayerId>>,
    /// Write timestamp.
    #[serde(
        with = "chrono::serde::ts_milliseconds_option",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub updated_at: Option<DateTime<Utc>>,
}

impl BingoPatch {
    /// Applies the populated fields to `doc`, leaving the rest untouched.
    pub fn apply(&self, doc: &mut BingoDocument) {
        if let Some(marked_numbers) = &self.marked_numbers {
            doc.marked_numbers = marked_numbers.clone();
        }
        if let Some(order_of_turns) = &self.order_of_turns {
            doc.order_of_turns = order_of_turns.clone();
        }
        if let Some(status) = self.status {
            doc.status = status;
        }
        if let Some(won_by) = &self.won_by {
            doc.won_by = won_by.clone();
        }
        if let Some(updated_at) = self.updated_at {
            doc.updated_at = updated_at;
        }
    }
}

/// Partial update to a [`BingoSeat`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatPatch {
    /// The seat to update.
    pub seat_id: String,
    /// New card arrangement (pre-start shuffle).
    #[serde(rename = "board", skip_serializing_if = "Option::is_none")]
    pub card: Option<BingoCard>,
    /// New accumulated winning lines.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winning_array: Option<Vec<[u8; 5]>>,
}

impl SeatPatch {
    /// Applies the populated fields to `seat`.
    pub fn apply(&self, seat: &mut BingoSeat) {
        if let Some(card) = &self.card {
            seat.card = card.clone();
        }
        if let Some(winning_array) = &self.winning_array {
            seat.winning_array = winning_array.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xo_document_wire_names() {
        let doc = XoDocument {
            id: "xo-1".into(),
            kind: GameKind::Bot,
            status: GameStatus::Playing,
            board: XoBoard::new(),
            track: Track::new(),
            move_count: 0,
            player_x: "alice".into(),
            player_o: "bot-nova".into(),
            current_turn: "alice".into(),
            won_by: None,
            level: 2,
            updated_at: DateTime::from_timestamp_millis(1_700_000_000_000).unwrap(),
        };
        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["type"], "bot");
        assert_eq!(value["status"], "playing");
        assert_eq!(value["playerXUserId"], "alice");
        assert_eq!(value["moveCount"], 0);
        assert_eq!(value["currentTurn"], "alice");
        assert_eq!(value["updatedAt"], 1_700_000_000_000i64);

        let back: XoDocument = serde_json::from_value(value).unwrap();
        assert_eq!(back, doc);
    }

    #[test]
    fn test_patch_applies_only_populated_fields() {
        let mut doc = XoDocument {
            id: "xo-1".into(),
            kind: GameKind::Bot,
            status: GameStatus::Playing,
            board: XoBoard::new(),
            track: Track::new(),
            move_count: 3,
            player_x: "alice".into(),
            player_o: "bot-nova".into(),
            current_turn: "alice".into(),
            won_by: None,
            level: 1,
            updated_at: Utc::now(),
        };
        let patch = XoPatch {
            move_count: Some(4),
            current_turn: Some("bot-nova".into()),
            ..Default::default()
        };
        patch.apply(&mut doc);
        assert_eq!(doc.move_count, 4);
        assert_eq!(doc.current_turn, "bot-nova");
        assert_eq!(doc.status, GameStatus::Playing);
    }

    #[test]
    fn test_draw_patch_clears_winner() {
        let patch = XoPatch {
            status: Some(GameStatus::Completed),
            won_by: Some(None),
            ..Default::default()
        };
        let value = serde_json::to_value(&patch).unwrap();
        assert_eq!(value["wonBy"], serde_json::Value::Null);
        assert_eq!(value["status"], "completed");
    }
}
