//! Built-in bot opponents.

use crate::document::PlayerId;
use crate::games::Difficulty;
use rand::seq::{IndexedRandom, SliceRandom};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A bot opponent: identity plus the difficulty tier it plays at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BotProfile {
    /// The bot's player id.
    pub id: PlayerId,
    /// Display name.
    pub name: String,
    /// Difficulty tier this bot plays at.
    pub level: Difficulty,
}

/// The pool of bot opponents games draw from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotRoster {
    bots: Vec<BotProfile>,
}

impl BotRoster {
    /// Creates a roster from the given profiles.
    pub fn new(bots: Vec<BotProfile>) -> Self {
        Self { bots }
    }

    /// The built-in roster: two named bots per difficulty tier.
    pub fn builtin() -> Self {
        let profile = |id: &str, name: &str, level| BotProfile {
            id: id.into(),
            name: name.into(),
            level,
        };
        Self::new(vec![
            profile("bot-pixel", "Pixel", Difficulty::Easy),
            profile("bot-mango", "Mango", Difficulty::Easy),
            profile("bot-echo", "Echo", Difficulty::Medium),
            profile("bot-turbo", "Turbo", Difficulty::Medium),
            profile("bot-nova", "Nova", Difficulty::Hard),
            profile("bot-zed", "Zed", Difficulty::Hard),
        ])
    }

    /// All profiles.
    pub fn bots(&self) -> &[BotProfile] {
        &self.bots
    }

    /// Looks a bot up by player id.
    pub fn get(&self, id: &str) -> Option<&BotProfile> {
        self.bots.iter().find(|bot| bot.id == id)
    }

    /// The difficulty a bot plays at, if `id` names a bot.
    pub fn level_of(&self, id: &str) -> Option<Difficulty> {
        self.get(id).map(|bot| bot.level)
    }

    /// Whether `id` names a bot in this roster.
    pub fn is_bot(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Picks a random bot playing at `level`.
    pub fn pick_bot<R: Rng + ?Sized>(&self, level: Difficulty, rng: &mut R) -> Option<&BotProfile> {
        let at_level: Vec<&BotProfile> =
            self.bots.iter().filter(|bot| bot.level == level).collect();
        at_level.choose(rng).copied()
    }

    /// Picks up to `count` distinct random bots across all levels.
    pub fn pick_bots<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Vec<&BotProfile> {
        let mut all: Vec<&BotProfile> = self.bots.iter().collect();
        all.shuffle(rng);
        all.truncate(count);
        all
    }
}

impl Default for BotRoster {
    fn default() -> Self {
        Self::builtin()
    }
}
