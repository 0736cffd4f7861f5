//! Ephemeral presence rooms for matchmaking.

use crate::document::PlayerId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::debug;

/// A peer visible in a presence room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresencePeer {
    /// The peer's player id.
    pub id: PlayerId,
    /// Display name.
    pub name: String,
    /// Arbitrary published payload (screen, readiness, and so on).
    #[serde(default)]
    pub data: serde_json::Value,
}

impl PresencePeer {
    /// Creates a peer with an empty payload.
    pub fn new(id: impl Into<PlayerId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            data: serde_json::Value::Null,
        }
    }
}

pub(crate) type RoomMap = Arc<Mutex<HashMap<PlayerId, PresencePeer>>>;

/// Handle into an ephemeral presence room.
///
/// Presence is best-effort and never durable: joining inserts the local peer,
/// dropping the handle removes it, and `publish` replaces the local payload.
/// Only matchmaking consumes this; the rules engine never does.
#[derive(Debug)]
pub struct PresenceRoom {
    room: String,
    self_id: PlayerId,
    peers: RoomMap,
}

impl PresenceRoom {
    pub(crate) fn join(room: String, peer: PresencePeer, peers: RoomMap) -> Self {
        let self_id = peer.id.clone();
        peers
            .lock()
            .expect("presence room lock poisoned")
            .insert(self_id.clone(), peer);
        debug!(room = %room, peer = %self_id, "joined presence room");
        Self {
            room,
            self_id,
            peers,
        }
    }

    /// The room name.
    pub fn room(&self) -> &str {
        &self.room
    }

    /// The local peer's id.
    pub fn self_id(&self) -> &PlayerId {
        &self.self_id
    }

    /// Replaces the local peer's published payload.
    pub fn publish(&self, data: serde_json::Value) {
        let mut peers = self.peers.lock().expect("presence room lock poisoned");
        if let Some(me) = peers.get_mut(&self.self_id) {
            me.data = data;
        }
    }

    /// Snapshot of the other peers currently in the room.
    pub fn peers(&self) -> Vec<PresencePeer> {
        self.peers
            .lock()
            .expect("presence room lock poisoned")
            .values()
            .filter(|peer| peer.id != self.self_id)
            .cloned()
            .collect()
    }
}

impl Drop for PresenceRoom {
    fn drop(&mut self) {
        if let Ok(mut peers) = self.peers.lock() {
            peers.remove(&self.self_id);
            debug!(room = %self.room, peer = %self.self_id, "left presence room");
        }
    }
}
