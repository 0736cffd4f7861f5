//! In-memory game store for tests and local play.

use super::presence::{PresencePeer, PresenceRoom, RoomMap};
use super::{GameStore, StoreError, TurnGuard};
use crate::document::{BingoDocument, BingoPatch, BingoSeat, SeatPatch, XoDocument, XoPatch};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::watch;
use tracing::{debug, info, warn};

struct XoEntry {
    doc: XoDocument,
    tx: watch::Sender<XoDocument>,
}

struct BingoEntry {
    doc: BingoDocument,
    seats: Vec<BingoSeat>,
    tx: watch::Sender<BingoDocument>,
}

#[derive(Default)]
struct Inner {
    xo: HashMap<String, XoEntry>,
    bingo: HashMap<String, BingoEntry>,
    rooms: HashMap<String, RoomMap>,
}

/// Reference [`GameStore`] backed by process memory.
///
/// Mirrors the hosted store's semantics: last-writer-wins per document,
/// atomic merge-patch writes, and watch-based change fan-out. Guarded writes
/// check their [`TurnGuard`] under the same lock that applies the patch, so
/// a lost turn race is always reported, never silently merged.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().expect("memory store lock poisoned")
    }
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.lock();
        f.debug_struct("MemoryStore")
            .field("xo_games", &inner.xo.len())
            .field("bingo_games", &inner.bingo.len())
            .finish()
    }
}

fn check_xo_guard(doc: &XoDocument, guard: &TurnGuard) -> bool {
    match guard {
        TurnGuard::CurrentTurnIs(player) => doc.current_turn == *player,
        TurnGuard::FrontOfOrderIs(_) => false,
    }
}

fn check_bingo_guard(doc: &BingoDocument, guard: &TurnGuard) -> bool {
    match guard {
        TurnGuard::FrontOfOrderIs(player) => doc.current_turn() == Some(player),
        TurnGuard::CurrentTurnIs(_) => false,
    }
}

#[async_trait]
impl GameStore for MemoryStore {
    async fn create_xo(&self, doc: XoDocument) -> Result<(), StoreError> {
        let mut inner = self.lock();
        if inner.xo.contains_key(&doc.id) {
            return Err(StoreError::AlreadyExists { id: doc.id });
        }
        info!(game_id = %doc.id, "creating xo game");
        let (tx, _) = watch::channel(doc.clone());
        inner.xo.insert(doc.id.clone(), XoEntry { doc, tx });
        Ok(())
    }

    async fn read_xo(&self, id: &str) -> Result<XoDocument, StoreError> {
        self.lock()
            .xo
            .get(id)
            .map(|entry| entry.doc.clone())
            .ok_or_else(|| StoreError::not_found(id))
    }

    async fn write_xo(
        &self,
        id: &str,
        patch: XoPatch,
        guard: Option<TurnGuard>,
    ) -> Result<(), StoreError> {
        let mut inner = self.lock();
        let entry = inner.xo.get_mut(id).ok_or_else(|| StoreError::not_found(id))?;
        if let Some(guard) = &guard {
            if !check_xo_guard(&entry.doc, guard) {
                warn!(game_id = %id, "guarded xo write lost the turn race");
                return Err(StoreError::TurnConflict { id: id.to_string() });
            }
        }
        patch.apply(&mut entry.doc);
        debug!(game_id = %id, "xo document updated");
        let _ = entry.tx.send(entry.doc.clone());
        Ok(())
    }

    async fn watch_xo(&self, id: &str) -> Result<watch::Receiver<XoDocument>, StoreError> {
        self.lock()
            .xo
            .get(id)
            .map(|entry| entry.tx.subscribe())
            .ok_or_else(|| StoreError::not_found(id))
    }

    async fn create_bingo(
        &self,
        doc: BingoDocument,
        seats: Vec<BingoSeat>,
    ) -> Result<(), StoreError> {
        let mut inner = self.lock();
        if inner.bingo.contains_key(&doc.id) {
            return Err(StoreError::AlreadyExists { id: doc.id });
        }
        info!(game_id = %doc.id, seats = seats.len(), "creating bingo game");
        let (tx, _) = watch::channel(doc.clone());
        inner
            .bingo
            .insert(doc.id.clone(), BingoEntry { doc, seats, tx });
        Ok(())
    }

    async fn read_bingo(&self, id: &str) -> Result<BingoDocument, StoreError> {
        self.lock()
            .bingo
            .get(id)
            .map(|entry| entry.doc.clone())
            .ok_or_else(|| StoreError::not_found(id))
    }

    async fn read_seats(&self, game_id: &str) -> Result<Vec<BingoSeat>, StoreError> {
        self.lock()
            .bingo
            .get(game_id)
            .map(|entry| entry.seats.clone())
            .ok_or_else(|| StoreError::not_found(game_id))
    }

    async fn write_bingo(
        &self,
        id: &str,
        patch: BingoPatch,
        seat_patch: Option<SeatPatch>,
        guard: Option<TurnGuard>,
    ) -> Result<(), StoreError> {
        let mut inner = self.lock();
        let entry = inner
            .bingo
            .get_mut(id)
            .ok_or_else(|| StoreError::not_found(id))?;
        if let Some(guard) = &guard {
            if !check_bingo_guard(&entry.doc, guard) {
                warn!(game_id = %id, "guarded bingo write lost the turn race");
                return Err(StoreError::TurnConflict { id: id.to_string() });
            }
        }
        // Validate the seat before touching anything so the write stays
        // all-or-nothing.
        if let Some(seat_patch) = &seat_patch {
            let seat = entry
                .seats
                .iter_mut()
                .find(|seat| seat.id == seat_patch.seat_id)
                .ok_or_else(|| StoreError::SeatNotFound {
                    id: id.to_string(),
                    seat_id: seat_patch.seat_id.clone(),
                })?;
            seat_patch.apply(seat);
        }
        patch.apply(&mut entry.doc);
        debug!(game_id = %id, "bingo document updated");
        let _ = entry.tx.send(entry.doc.clone());
        Ok(())
    }

    async fn watch_bingo(&self, id: &str) -> Result<watch::Receiver<BingoDocument>, StoreError> {
        self.lock()
            .bingo
            .get(id)
            .map(|entry| entry.tx.subscribe())
            .ok_or_else(|| StoreError::not_found(id))
    }

    async fn presence(
        &self,
        room: &str,
        self_peer: PresencePeer,
    ) -> Result<PresenceRoom, StoreError> {
        let map = {
            let mut inner = self.lock();
            Arc::clone(inner.rooms.entry(room.to_string()).or_default())
        };
        Ok(PresenceRoom::join(room.to_string(), self_peer, map))
    }
}
