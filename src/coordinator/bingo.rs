//! Bingo call application, game start, and bot turns.

use super::{BotTurnError, MoveError};
use crate::config::EngineConfig;
use crate::document::{
    BingoDocument, BingoPatch, BingoSeat, GameId, GameStatus, SeatPatch,
};
use crate::games::bingo::{self, BingoCard};
use crate::games::Difficulty;
use crate::store::{GameStore, TurnGuard};
use chrono::Utc;
use rand::Rng;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Lines needed for a full win.
const LINES_TO_WIN: usize = 5;

/// A staged `created → playing` transition.
///
/// Persists the starting player's (possibly reshuffled) card and flips the
/// status in one write.
#[derive(Debug, Clone)]
pub struct PendingBingoStart {
    game_id: GameId,
    patch: BingoPatch,
    seat_patch: SeatPatch,
    projected: BingoDocument,
}

impl PendingBingoStart {
    /// The document as it will read after a successful commit.
    pub fn projected(&self) -> &BingoDocument {
        &self.projected
    }

    /// Persists the transition.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`](crate::store::StoreError) when the write
    /// fails; the game stays in the staging phase.
    pub async fn commit(
        self,
        store: &dyn GameStore,
    ) -> Result<BingoDocument, crate::store::StoreError> {
        store
            .write_bingo(&self.game_id, self.patch, Some(self.seat_patch), None)
            .await?;
        info!(game_id = %self.game_id, "bingo game started");
        Ok(self.projected)
    }
}

/// A validated bingo call that has not been persisted yet.
#[derive(Debug, Clone)]
pub struct PendingBingoCall {
    game_id: GameId,
    patch: BingoPatch,
    seat_patch: SeatPatch,
    projected: BingoDocument,
    projected_seat: BingoSeat,
    guard: TurnGuard,
}

impl PendingBingoCall {
    /// The document as it will read after a successful commit.
    pub fn projected(&self) -> &BingoDocument {
        &self.projected
    }

    /// The acting player's seat as it will read after a successful commit.
    pub fn projected_seat(&self) -> &BingoSeat {
        &self.projected_seat
    }

    /// Persists the transition as one guarded atomic write covering the game
    /// document and the acting player's seat.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`](crate::store::StoreError) when the write fails
    /// or the rotation advanced first; nothing is recorded in that case.
    pub async fn commit(
        self,
        store: &dyn GameStore,
    ) -> Result<(BingoDocument, BingoSeat), crate::store::StoreError> {
        store
            .write_bingo(&self.game_id, self.patch, Some(self.seat_patch), Some(self.guard))
            .await?;
        debug!(game_id = %self.game_id, "bingo call confirmed");
        Ok((self.projected, self.projected_seat))
    }
}

/// Applies bingo rules: call legality, line accumulation, rotation, and the
/// five-line win.
#[derive(Debug, Clone, Default)]
pub struct BingoCoordinator {
    config: EngineConfig,
}

impl BingoCoordinator {
    /// Creates a coordinator with the given tunables.
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// The artificial thinking delay to schedule before a bot call.
    pub fn bot_delay(&self) -> Duration {
        self.config.bingo_bot_delay()
    }

    /// Stages the starting player's "start" action: persist their final card
    /// arrangement and open the game for calls.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError`] when the game is past staging or the seat does
    /// not belong to the player in front of the rotation.
    #[instrument(skip(self, doc, seat, card), fields(game_id = %doc.id))]
    pub fn stage_start(
        &self,
        doc: &BingoDocument,
        seat: &BingoSeat,
        card: BingoCard,
    ) -> Result<PendingBingoStart, MoveError> {
        match doc.status {
            GameStatus::Completed => return Err(MoveError::GameOver),
            GameStatus::Playing => return Err(MoveError::AlreadyStarted),
            GameStatus::Created => {}
        }
        if doc.current_turn() != Some(&seat.user_id) {
            return Err(MoveError::OutOfTurn {
                expected: doc.current_turn().cloned().unwrap_or_default(),
            });
        }

        let patch = BingoPatch {
            status: Some(GameStatus::Playing),
            updated_at: Some(Utc::now()),
            ..Default::default()
        };
        let seat_patch = SeatPatch {
            seat_id: seat.id.clone(),
            card: Some(card),
            ..Default::default()
        };
        let mut projected = doc.clone();
        patch.apply(&mut projected);
        Ok(PendingBingoStart {
            game_id: doc.id.clone(),
            patch,
            seat_patch,
            projected,
        })
    }

    /// Validates and stages a call of `number` by the player in `seat`.
    ///
    /// On success the staged transition appends the number to the marked
    /// set, replaces the seat's accumulated winning lines with every line
    /// now complete on that card, and rotates the acting player to the back
    /// of the turn order. Five complete lines end the game with that player
    /// as the winner.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError`] without any store interaction when the game is
    /// not accepting calls, the seat is out of turn, or the number is
    /// unplayable.
    #[instrument(skip(self, doc, seat), fields(game_id = %doc.id, player = %seat.user_id))]
    pub fn stage_call(
        &self,
        doc: &BingoDocument,
        seat: &BingoSeat,
        number: u8,
    ) -> Result<PendingBingoCall, MoveError> {
        match doc.status {
            GameStatus::Completed => return Err(MoveError::GameOver),
            GameStatus::Created => return Err(MoveError::NotStarted),
            GameStatus::Playing => {}
        }
        if doc.current_turn() != Some(&seat.user_id) {
            warn!(number, "call out of turn");
            return Err(MoveError::OutOfTurn {
                expected: doc.current_turn().cloned().unwrap_or_default(),
            });
        }
        if seat.card.position_of(number).is_none() {
            return Err(MoveError::NumberNotOnCard { number });
        }
        if doc.marked_numbers.contains(number) {
            return Err(MoveError::NumberAlreadyCalled { number });
        }

        let mut marked = doc.marked_numbers.clone();
        marked.push(number);
        let winning = bingo::find_winning_lines(&seat.card, &marked);

        let mut order = doc.order_of_turns.clone();
        if let Some(acting) = order.pop_front() {
            order.push_back(acting);
        }

        let mut patch = BingoPatch {
            marked_numbers: Some(marked),
            order_of_turns: Some(order),
            updated_at: Some(Utc::now()),
            ..Default::default()
        };
        if winning.len() >= LINES_TO_WIN {
            info!(winner = %seat.user_id, lines = winning.len(), "bingo won");
            patch.status = Some(GameStatus::Completed);
            patch.won_by = Some(Some(seat.user_id.clone()));
        }
        let seat_patch = SeatPatch {
            seat_id: seat.id.clone(),
            winning_array: Some(winning),
            ..Default::default()
        };

        let mut projected = doc.clone();
        patch.apply(&mut projected);
        let mut projected_seat = seat.clone();
        seat_patch.apply(&mut projected_seat);
        Ok(PendingBingoCall {
            game_id: doc.id.clone(),
            patch,
            seat_patch,
            projected,
            projected_seat,
            guard: TurnGuard::FrontOfOrderIs(seat.user_id.clone()),
        })
    }

    /// Picks and stages the bot's call, through the same validation as a
    /// human call. Returns `Ok(None)` when every cell on the bot's card is
    /// already marked.
    pub fn stage_bot_call<R: Rng + ?Sized>(
        &self,
        doc: &BingoDocument,
        seat: &BingoSeat,
        difficulty: Difficulty,
        rng: &mut R,
    ) -> Result<Option<PendingBingoCall>, MoveError> {
        match bingo::choose_number(&seat.card, &doc.marked_numbers, difficulty, rng) {
            Some(number) => self.stage_call(doc, seat, number).map(Some),
            None => Ok(None),
        }
    }

    /// Runs one full bot turn: read, pick, stage, commit.
    ///
    /// The thinking delay is the scheduler's concern; a stale invocation is
    /// rejected by staging or by the commit guard once the rotation has
    /// moved on.
    ///
    /// # Errors
    ///
    /// Returns [`BotTurnError`] when the call is rejected or the write
    /// fails.
    #[instrument(skip(self, store, rng))]
    pub async fn drive_bot_turn<R: Rng + ?Sized>(
        &self,
        store: &dyn GameStore,
        game_id: &str,
        bot: &str,
        difficulty: Difficulty,
        rng: &mut R,
    ) -> Result<Option<BingoDocument>, BotTurnError> {
        let doc = store
            .read_bingo(game_id)
            .await
            .map_err(BotTurnError::Store)?;
        let seats = store
            .read_seats(game_id)
            .await
            .map_err(BotTurnError::Store)?;
        let seat = seats
            .iter()
            .find(|seat| seat.user_id == bot)
            .ok_or_else(|| {
                BotTurnError::Move(MoveError::UnknownPlayer {
                    player: bot.to_string(),
                })
            })?;
        let Some(pending) = self.stage_bot_call(&doc, seat, difficulty, rng)? else {
            return Ok(None);
        };
        let (confirmed, _) = pending.commit(store).await?;
        Ok(Some(confirmed))
    }
}
