//! The shared game store boundary.
//!
//! All durable state lives in an external real-time store; this module
//! defines the contract the engine writes against and an in-memory
//! implementation for tests and local play. The store handle is injected
//! wherever persistence is needed — never reached through a global.

mod error;
mod memory;
mod presence;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use presence::{PresencePeer, PresenceRoom};

use crate::document::{
    BingoDocument, BingoPatch, BingoSeat, GameId, PlayerId, SeatPatch, XoDocument, XoPatch,
};
use async_trait::async_trait;
use tokio::sync::watch;

/// Compare-and-set precondition on a write, guarding the turn owner.
///
/// The store is last-writer-wins; a guarded write is the engine's defense
/// against two clients committing against the same turn slot. A failed guard
/// surfaces as [`StoreError::TurnConflict`] and nothing is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnGuard {
    /// The XO document's `currentTurn` must still be this player.
    CurrentTurnIs(PlayerId),
    /// The bingo document's rotation must still have this player in front.
    FrontOfOrderIs(PlayerId),
}

/// Contract for the shared game store.
///
/// Writes are atomic merge-patches with an awaited completion/failure signal:
/// a transition has not happened until its write succeeds, and the engine
/// never retries on its own. Subscriptions re-deliver the full document on
/// every remote change.
#[async_trait]
pub trait GameStore: Send + Sync {
    /// Inserts a new XO game document.
    async fn create_xo(&self, doc: XoDocument) -> Result<(), StoreError>;

    /// Reads an XO game document.
    async fn read_xo(&self, id: &str) -> Result<XoDocument, StoreError>;

    /// Applies a merge-patch to an XO game document, all-or-nothing.
    async fn write_xo(
        &self,
        id: &str,
        patch: XoPatch,
        guard: Option<TurnGuard>,
    ) -> Result<(), StoreError>;

    /// Subscribes to an XO game document; the receiver holds the latest
    /// version and wakes on every change.
    async fn watch_xo(&self, id: &str) -> Result<watch::Receiver<XoDocument>, StoreError>;

    /// Inserts a new bingo game document along with its seats.
    async fn create_bingo(
        &self,
        doc: BingoDocument,
        seats: Vec<BingoSeat>,
    ) -> Result<(), StoreError>;

    /// Reads a bingo game document.
    async fn read_bingo(&self, id: &str) -> Result<BingoDocument, StoreError>;

    /// Reads the seats of a bingo game, in join order.
    async fn read_seats(&self, game_id: &str) -> Result<Vec<BingoSeat>, StoreError>;

    /// Applies a merge-patch to a bingo document and optionally one seat, as
    /// a single all-or-nothing write.
    async fn write_bingo(
        &self,
        id: &str,
        patch: BingoPatch,
        seat_patch: Option<SeatPatch>,
        guard: Option<TurnGuard>,
    ) -> Result<(), StoreError>;

    /// Subscribes to a bingo game document.
    async fn watch_bingo(&self, id: &str) -> Result<watch::Receiver<BingoDocument>, StoreError>;

    /// Joins an ephemeral presence room, used by matchmaking only.
    async fn presence(&self, room: &str, self_peer: PresencePeer)
        -> Result<PresenceRoom, StoreError>;
}

/// Convenience alias for a shared store handle.
pub type SharedStore = std::sync::Arc<dyn GameStore>;

/// Generates a fresh document id with the given prefix.
pub(crate) fn fresh_id<R: rand::Rng + ?Sized>(prefix: &str, rng: &mut R) -> GameId {
    format!(
        "{prefix}-{:08x}{:08x}",
        rng.random::<u32>(),
        rng.random::<u32>()
    )
}
