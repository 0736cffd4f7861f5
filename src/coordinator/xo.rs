//! XO move application and bot turns.

use super::{BotTurnError, MoveError};
use crate::config::EngineConfig;
use crate::document::{GameId, GameStatus, XoDocument, XoPatch};
use crate::games::xo;
use crate::games::Difficulty;
use crate::store::{GameStore, TurnGuard};
use chrono::Utc;
use rand::Rng;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// A validated XO move that has not been persisted yet.
///
/// Holds the merge-patch to write and the document as it will read once the
/// write lands. Nothing has happened until [`PendingXoMove::commit`]
/// succeeds.
#[derive(Debug, Clone)]
pub struct PendingXoMove {
    game_id: GameId,
    patch: XoPatch,
    projected: XoDocument,
    guard: TurnGuard,
}

impl PendingXoMove {
    /// The document as it will read after a successful commit.
    pub fn projected(&self) -> &XoDocument {
        &self.projected
    }

    /// The merge-patch this move will write.
    pub fn patch(&self) -> &XoPatch {
        &self.patch
    }

    /// Persists the transition as one guarded atomic write.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`](crate::store::StoreError) when the write fails
    /// or another client claimed the turn first; the move did not happen and
    /// the caller must not treat the projection as confirmed.
    pub async fn commit(
        self,
        store: &dyn GameStore,
    ) -> Result<XoDocument, crate::store::StoreError> {
        store
            .write_xo(&self.game_id, self.patch, Some(self.guard))
            .await?;
        debug!(game_id = %self.game_id, "xo move confirmed");
        Ok(self.projected)
    }
}

/// Applies XO rules: legality, the sliding window, win/draw detection, and
/// turn alternation.
#[derive(Debug, Clone, Default)]
pub struct XoCoordinator {
    config: EngineConfig,
}

impl XoCoordinator {
    /// Creates a coordinator with the given tunables.
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// The artificial thinking delay to schedule before a bot move.
    pub fn bot_delay(&self) -> Duration {
        self.config.xo_bot_delay()
    }

    /// Validates and stages a move by `player` at `idx`.
    ///
    /// On success the returned transition carries the board after placement
    /// (and window eviction), the incremented move count, and either the
    /// rotated turn or the terminal status: a winning line completes the
    /// game, and reaching the move cap with no winner records a draw
    /// (`wonBy` null).
    ///
    /// # Errors
    ///
    /// Returns [`MoveError`] without any store interaction when the game is
    /// not accepting moves, the player is unknown or out of turn, or the
    /// square is unplayable.
    #[instrument(skip(self, doc), fields(game_id = %doc.id))]
    pub fn stage_move(
        &self,
        doc: &XoDocument,
        player: &str,
        idx: usize,
    ) -> Result<PendingXoMove, MoveError> {
        match doc.status {
            GameStatus::Completed => return Err(MoveError::GameOver),
            GameStatus::Created => return Err(MoveError::NotStarted),
            GameStatus::Playing => {}
        }
        let mark = doc.mark_of(player).ok_or_else(|| MoveError::UnknownPlayer {
            player: player.to_string(),
        })?;
        if doc.current_turn != player {
            warn!(player, "move out of turn");
            return Err(MoveError::OutOfTurn {
                expected: doc.current_turn.clone(),
            });
        }

        let mut board = doc.board.clone();
        let mut track = doc.track.clone();
        let evicted = board.place(idx, mark, &mut track)?;
        if let Some(old) = evicted {
            debug!(old, "window evicted oldest mark");
        }
        let move_count = doc.move_count + 1;

        let mut patch = XoPatch {
            board: Some(board.clone()),
            track: Some(track),
            move_count: Some(move_count),
            updated_at: Some(Utc::now()),
            ..Default::default()
        };

        if let Some(winning_mark) = xo::winner(&board) {
            let winner = doc.player_for(winning_mark).clone();
            info!(%winner, "xo game won");
            patch.status = Some(GameStatus::Completed);
            patch.won_by = Some(Some(winner));
        } else if move_count >= self.config.xo_move_cap {
            info!(move_count, "xo move cap reached, draw");
            patch.status = Some(GameStatus::Completed);
            patch.won_by = Some(None);
        } else {
            patch.current_turn = Some(doc.player_for(mark.opponent()).clone());
        }

        let mut projected = doc.clone();
        patch.apply(&mut projected);
        Ok(PendingXoMove {
            game_id: doc.id.clone(),
            patch,
            projected,
            guard: TurnGuard::CurrentTurnIs(player.to_string()),
        })
    }

    /// Picks and stages the bot's move, through the same validation as a
    /// human move. Returns `Ok(None)` when the board has no empty square —
    /// a draw condition for the caller, not an error.
    pub fn stage_bot_move<R: Rng + ?Sized>(
        &self,
        doc: &XoDocument,
        bot: &str,
        rng: &mut R,
    ) -> Result<Option<PendingXoMove>, MoveError> {
        let mark = doc.mark_of(bot).ok_or_else(|| MoveError::UnknownPlayer {
            player: bot.to_string(),
        })?;
        let difficulty = Difficulty::from_level(doc.level);
        match xo::choose_move(&doc.board, mark, difficulty, rng) {
            Some(idx) => self.stage_move(doc, bot, idx).map(Some),
            None => Ok(None),
        }
    }

    /// Runs one full bot turn: read, pick, stage, commit.
    ///
    /// The thinking delay is the scheduler's concern; by the time this runs
    /// the turn may have moved on, in which case the stale move is rejected
    /// by staging (out of turn) or by the commit guard.
    ///
    /// # Errors
    ///
    /// Returns [`BotTurnError`] when the move is rejected or the write
    /// fails.
    #[instrument(skip(self, store, rng))]
    pub async fn drive_bot_turn<R: Rng + ?Sized>(
        &self,
        store: &dyn GameStore,
        game_id: &str,
        bot: &str,
        rng: &mut R,
    ) -> Result<Option<XoDocument>, BotTurnError> {
        let doc = store.read_xo(game_id).await.map_err(BotTurnError::Store)?;
        let Some(pending) = self.stage_bot_move(&doc, bot, rng)? else {
            return Ok(None);
        };
        let confirmed = pending.commit(store).await?;
        Ok(Some(confirmed))
    }
}
