//! Matchmaking and session bootstrap: constructing valid new games.

use crate::config::EngineConfig;
use crate::document::{
    BingoDocument, BingoSeat, GameId, GameKind, GameStatus, PlayerId, XoDocument,
};
use crate::games::bingo::{BingoCard, MarkedNumbers};
use crate::games::xo::{Track, XoBoard};
use crate::games::Difficulty;
use crate::roster::BotRoster;
use crate::store::{fresh_id, GameStore, PresencePeer, PresenceRoom, StoreError};
use chrono::Utc;
use derive_more::{Display, Error, From};
use rand::Rng;
use std::collections::VecDeque;
use tracing::{info, instrument};

/// Number of bot opponents seated in a bot bingo game.
const BINGO_BOTS: usize = 3;

/// Error creating a new game.
#[derive(Debug, Clone, PartialEq, Display, Error, From)]
pub enum BootstrapError {
    /// The roster has no bot at the requested level.
    #[display("no bot available at level {level}")]
    #[from(ignore)]
    NoBotAvailable {
        /// The requested difficulty.
        level: Difficulty,
    },
    /// The initial insert failed; no game exists.
    #[display("game creation failed: {_0}")]
    Store(StoreError),
}

/// Creates game entities that are valid from their first read: well-formed
/// boards, unique card numbers, and a legal current turn.
#[derive(Debug, Clone, Default)]
pub struct Bootstrap {
    config: EngineConfig,
}

impl Bootstrap {
    /// Creates a bootstrap with the given tunables.
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Creates an XO game between two players with a random seat draw, and
    /// inserts it. XO games skip staging and start in `playing` with X to
    /// move.
    ///
    /// # Errors
    ///
    /// Returns [`BootstrapError::Store`] when the insert fails.
    #[instrument(skip(self, store, rng))]
    pub async fn new_xo_game<R: Rng + ?Sized>(
        &self,
        store: &dyn GameStore,
        first: PlayerId,
        second: PlayerId,
        kind: GameKind,
        level: Difficulty,
        rng: &mut R,
    ) -> Result<XoDocument, BootstrapError> {
        let (player_x, player_o) = if rng.random_bool(0.5) {
            (first, second)
        } else {
            (second, first)
        };
        let doc = XoDocument {
            id: fresh_id("xo", rng),
            kind,
            status: GameStatus::Playing,
            board: XoBoard::new(),
            track: Track::new(),
            move_count: 0,
            current_turn: player_x.clone(),
            player_x,
            player_o,
            won_by: None,
            level: level.level(),
            updated_at: Utc::now(),
        };
        store.create_xo(doc.clone()).await?;
        info!(game_id = %doc.id, "xo game created");
        Ok(doc)
    }

    /// Creates an XO bot game: draws a bot at `level` from the roster and
    /// seats it against `human`.
    ///
    /// # Errors
    ///
    /// Returns [`BootstrapError::NoBotAvailable`] when the roster has no bot
    /// at that level, or [`BootstrapError::Store`] when the insert fails.
    pub async fn new_xo_bot_game<R: Rng + ?Sized>(
        &self,
        store: &dyn GameStore,
        roster: &BotRoster,
        human: PlayerId,
        level: Difficulty,
        rng: &mut R,
    ) -> Result<XoDocument, BootstrapError> {
        let bot = roster
            .pick_bot(level, rng)
            .ok_or(BootstrapError::NoBotAvailable { level })?
            .id
            .clone();
        self.new_xo_game(store, human, bot, GameKind::Bot, level, rng)
            .await
    }

    /// Creates a brand-new XO game between the same two players as a
    /// finished one, with a fresh seat draw. Rematches never reset the old
    /// document.
    ///
    /// # Errors
    ///
    /// Returns [`BootstrapError::Store`] when the insert fails.
    pub async fn rematch_xo<R: Rng + ?Sized>(
        &self,
        store: &dyn GameStore,
        finished: &XoDocument,
        rng: &mut R,
    ) -> Result<XoDocument, BootstrapError> {
        self.new_xo_game(
            store,
            finished.player_x.clone(),
            finished.player_o.clone(),
            finished.kind,
            Difficulty::from_level(finished.level),
            rng,
        )
        .await
    }

    /// Creates a bingo game for `human` plus three roster bots, deals every
    /// seat a card of 25 unique numbers, and inserts it all at once. The
    /// rotation is insertion order with the human in front; the game waits
    /// in `created` for the human's start action.
    ///
    /// # Errors
    ///
    /// Returns [`BootstrapError::NoBotAvailable`] when the roster cannot
    /// seat three bots, or [`BootstrapError::Store`] when the insert fails.
    #[instrument(skip(self, store, roster, rng))]
    pub async fn new_bingo_game<R: Rng + ?Sized>(
        &self,
        store: &dyn GameStore,
        roster: &BotRoster,
        human: PlayerId,
        rng: &mut R,
    ) -> Result<(BingoDocument, Vec<BingoSeat>), BootstrapError> {
        let bots = roster.pick_bots(BINGO_BOTS, rng);
        if bots.len() < BINGO_BOTS {
            return Err(BootstrapError::NoBotAvailable {
                level: Difficulty::Easy,
            });
        }

        let mut players: Vec<PlayerId> = Vec::with_capacity(BINGO_BOTS + 1);
        players.push(human);
        players.extend(bots.into_iter().map(|bot| bot.id.clone()));

        let game_id: GameId = fresh_id("bingo", rng);
        let now = Utc::now();
        let doc = BingoDocument {
            id: game_id.clone(),
            kind: GameKind::Bot,
            status: GameStatus::Created,
            marked_numbers: MarkedNumbers::new(),
            order_of_turns: VecDeque::from(players.clone()),
            limit: self.config.bingo_pool,
            won_by: None,
            created_at: now,
            updated_at: now,
        };
        let seats: Vec<BingoSeat> = players
            .into_iter()
            .map(|user_id| BingoSeat {
                id: fresh_id("seat", rng),
                user_id,
                game_id: game_id.clone(),
                card: BingoCard::deal(self.config.bingo_pool, rng),
                winning_array: Vec::new(),
            })
            .collect();

        store.create_bingo(doc.clone(), seats.clone()).await?;
        info!(game_id = %doc.id, seats = seats.len(), "bingo game created");
        Ok((doc, seats))
    }

    /// Joins a matchmaking lobby, announcing the local player to its peers.
    ///
    /// Presence is ephemeral and matchmaking-only; the rules engine never
    /// reads it. Dropping the returned room leaves the lobby.
    ///
    /// # Errors
    ///
    /// Returns [`BootstrapError::Store`] when the store cannot join the room.
    pub async fn join_lobby(
        &self,
        store: &dyn GameStore,
        room: &str,
        peer: PresencePeer,
    ) -> Result<PresenceRoom, BootstrapError> {
        Ok(store.presence(room, peer).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use std::collections::HashSet;

    fn bootstrap() -> Bootstrap {
        Bootstrap::new(EngineConfig::default())
    }

    #[tokio::test]
    async fn test_new_xo_game_is_valid() {
        let store = MemoryStore::new();
        let mut rng = rand::rng();
        let doc = bootstrap()
            .new_xo_game(
                &store,
                "alice".into(),
                "bob".into(),
                GameKind::User,
                Difficulty::Medium,
                &mut rng,
            )
            .await
            .unwrap();

        assert_eq!(doc.status, GameStatus::Playing);
        assert_eq!(doc.current_turn, doc.player_x);
        assert!(doc.board.is_empty(0));
        assert_eq!(doc.move_count, 0);
        assert_eq!(store.read_xo(&doc.id).await.unwrap(), doc);
    }

    #[tokio::test]
    async fn test_xo_seats_are_the_two_players() {
        let store = MemoryStore::new();
        let mut rng = rand::rng();
        let doc = bootstrap()
            .new_xo_bot_game(
                &store,
                &BotRoster::builtin(),
                "alice".into(),
                Difficulty::Hard,
                &mut rng,
            )
            .await
            .unwrap();

        let seats: HashSet<&str> = [doc.player_x.as_str(), doc.player_o.as_str()].into();
        assert!(seats.contains("alice"));
        assert_eq!(seats.len(), 2);
        assert_eq!(doc.level, 3);
    }

    #[tokio::test]
    async fn test_rematch_creates_a_new_entity() {
        let store = MemoryStore::new();
        let mut rng = rand::rng();
        let bootstrap = bootstrap();
        let mut first = bootstrap
            .new_xo_game(
                &store,
                "alice".into(),
                "bob".into(),
                GameKind::User,
                Difficulty::Easy,
                &mut rng,
            )
            .await
            .unwrap();
        first.status = GameStatus::Completed;

        let rematch = bootstrap.rematch_xo(&store, &first, &mut rng).await.unwrap();
        assert_ne!(rematch.id, first.id);
        assert_eq!(rematch.status, GameStatus::Playing);
        // The finished game is untouched.
        let stored = store.read_xo(&first.id).await.unwrap();
        assert_eq!(stored.move_count, 0);
    }

    #[tokio::test]
    async fn test_lobby_peers_see_each_other() {
        let store = MemoryStore::new();
        let bootstrap = bootstrap();
        let alice = bootstrap
            .join_lobby(&store, "xo-lobby", PresencePeer::new("alice", "Alice"))
            .await
            .unwrap();
        let bob = bootstrap
            .join_lobby(&store, "xo-lobby", PresencePeer::new("bob", "Bob"))
            .await
            .unwrap();

        bob.publish(serde_json::json!({"lookingFor": "xo"}));
        let peers = alice.peers();
        assert_eq!(peers.len(), 1);
        assert_eq!(peers[0].id, "bob");

        drop(bob);
        assert!(alice.peers().is_empty());
    }

    #[tokio::test]
    async fn test_new_bingo_game_is_valid() {
        let store = MemoryStore::new();
        let mut rng = rand::rng();
        let (doc, seats) = bootstrap()
            .new_bingo_game(&store, &BotRoster::builtin(), "alice".into(), &mut rng)
            .await
            .unwrap();

        assert_eq!(doc.status, GameStatus::Created);
        assert_eq!(doc.order_of_turns.len(), 4);
        assert_eq!(doc.current_turn().map(String::as_str), Some("alice"));
        assert!(doc.marked_numbers.is_empty());

        // One seat per rotation entry, same ids, no duplicates.
        let rotation: HashSet<&String> = doc.order_of_turns.iter().collect();
        let seated: HashSet<&String> = seats.iter().map(|seat| &seat.user_id).collect();
        assert_eq!(rotation.len(), 4);
        assert_eq!(rotation, seated);

        for seat in &seats {
            let unique: HashSet<u8> = seat.card.cells().iter().copied().collect();
            assert_eq!(unique.len(), 25);
            assert!(seat.winning_array.is_empty());
        }
    }
}
