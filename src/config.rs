//! Engine configuration — tunables for timing and game caps.

use serde::Deserialize;
use std::time::Duration;

/// Tunable engine parameters with sensible defaults.
///
/// Hosts can deserialize this from their own configuration source; every
/// field falls back to the default when omitted.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Artificial "thinking" delay before an XO bot moves, in milliseconds.
    pub xo_bot_delay_ms: u64,
    /// Artificial "thinking" delay before a bingo bot calls, in milliseconds.
    pub bingo_bot_delay_ms: u64,
    /// Move cap for XO; reaching it with no winner ends the game in a draw.
    pub xo_move_cap: u32,
    /// Size of the number pool bingo cards are dealt from.
    pub bingo_pool: u8,
}

impl EngineConfig {
    /// Creates a config with the defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// XO bot thinking delay.
    pub fn xo_bot_delay(&self) -> Duration {
        Duration::from_millis(self.xo_bot_delay_ms)
    }

    /// Bingo bot thinking delay.
    pub fn bingo_bot_delay(&self) -> Duration {
        Duration::from_millis(self.bingo_bot_delay_ms)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            xo_bot_delay_ms: 800,
            bingo_bot_delay_ms: 3000,
            xo_move_cap: 20,
            bingo_pool: crate::games::bingo::NUMBER_POOL,
        }
    }
}
