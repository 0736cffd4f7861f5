//! Playroom — turn-based arcade rules engine with bot opponents.
//!
//! The durable state of every game lives in an external real-time store;
//! this crate is the client-side core that decides what a legal move is, who
//! won, and what a bot plays next.
//!
//! # Architecture
//!
//! - **Games**: pure rule sets and bot strategists (shifting tic-tac-toe
//!   "XO" and 5x5 bingo)
//! - **Coordinator**: two-phase move application — stage locally, commit as
//!   one atomic store write
//! - **Store**: the injected game-store boundary, with an in-memory
//!   implementation for tests and local play
//! - **Bootstrap**: matchmaking and construction of valid new games
//! - **Scheduler**: cancellable bot thinking delays bound to turn versions
//!
//! # Example
//!
//! ```no_run
//! use playroom::{Bootstrap, BotRoster, Difficulty, EngineConfig, MemoryStore, XoCoordinator};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = MemoryStore::new();
//! let bootstrap = Bootstrap::new(EngineConfig::default());
//! let mut rng = rand::rng();
//!
//! let game = bootstrap
//!     .new_xo_bot_game(&store, &BotRoster::builtin(), "alice".into(), Difficulty::Hard, &mut rng)
//!     .await?;
//!
//! let coordinator = XoCoordinator::new(EngineConfig::default());
//! if game.current_turn == "alice" {
//!     let pending = coordinator.stage_move(&game, "alice", 4)?;
//!     let confirmed = pending.commit(&store).await?;
//!     assert_eq!(confirmed.move_count, 1);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod bootstrap;
mod config;
mod coordinator;
mod document;
mod games;
mod roster;
mod scheduler;
mod store;

// Crate-level exports - game rules and strategists
pub use games::bingo;
pub use games::bingo::{BingoCard, CardError, MarkedNumbers};
pub use games::xo;
pub use games::xo::{Mark, Square, Track, XoBoard};
pub use games::Difficulty;

// Crate-level exports - documents and wire shapes
pub use document::{
    BingoDocument, BingoPatch, BingoSeat, GameId, GameKind, GameStatus, PlayerId, SeatPatch,
    XoDocument, XoPatch,
};

// Crate-level exports - store boundary
pub use store::{
    GameStore, MemoryStore, PresencePeer, PresenceRoom, SharedStore, StoreError, TurnGuard,
};

// Crate-level exports - coordination
pub use coordinator::{
    BingoCoordinator, BotTurnError, MoveError, PendingBingoCall, PendingBingoStart, PendingXoMove,
    XoCoordinator,
};

// Crate-level exports - session bootstrap
pub use bootstrap::{Bootstrap, BootstrapError};

// Crate-level exports - bots and scheduling
pub use roster::{BotProfile, BotRoster};
pub use scheduler::BotScheduler;

// Crate-level exports - configuration
pub use config::EngineConfig;
