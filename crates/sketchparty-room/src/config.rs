//! Room configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// The built-in prompt pool, used when a room is created without a
/// custom one. Twenty everyday things that are fun to draw badly.
pub const DEFAULT_PROMPTS: [&str; 20] = [
    "apple",
    "cat",
    "dog",
    "car",
    "airplane",
    "rabbit",
    "cherry blossom",
    "coffee",
    "umbrella",
    "octopus",
    "piano",
    "guitar",
    "egg",
    "tomato",
    "curry",
    "galaxy",
    "traffic light",
    "dinosaur",
    "rocket",
    "castle",
];

/// Configuration for rooms created by a registry.
///
/// One config is shared by every room the registry creates; per-room
/// variation (round count, prompt pool) comes in through
/// [`CreateRoomOptions`](crate::CreateRoomOptions) instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomConfig {
    /// Maximum players allowed in a room.
    pub max_players: usize,

    /// How long a round stays active before it expires. Expiry is
    /// detected lazily on the next operation touching the room, not by
    /// a timer.
    pub round_time_limit: Duration,

    /// Rounds per game when the creator doesn't ask for a count.
    pub default_round_count: usize,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            max_players: 4,
            round_time_limit: Duration::from_secs(30),
            default_round_count: 10,
        }
    }
}

impl RoomConfig {
    /// Fewest rounds a game can run.
    pub const MIN_ROUND_COUNT: usize = 1;

    /// Most rounds a game can run.
    pub const MAX_ROUND_COUNT: usize = 30;

    /// Clamp and fix any out-of-range values so the config is safe to use.
    ///
    /// Called automatically by [`RoomRegistry::new`](crate::RoomRegistry::new).
    /// Rules:
    /// - `max_players` is at least 1 (a room always holds its host).
    /// - `default_round_count` lands in
    ///   [`MIN_ROUND_COUNT`](Self::MIN_ROUND_COUNT)..=[`MAX_ROUND_COUNT`](Self::MAX_ROUND_COUNT).
    pub fn validated(mut self) -> Self {
        if self.max_players == 0 {
            tracing::warn!("max_players of 0 is unusable — clamping to 1");
            self.max_players = 1;
        }
        let clamped = self
            .default_round_count
            .clamp(Self::MIN_ROUND_COUNT, Self::MAX_ROUND_COUNT);
        if clamped != self.default_round_count {
            tracing::warn!(
                requested = self.default_round_count,
                clamped,
                "default_round_count out of range — clamping"
            );
            self.default_round_count = clamped;
        }
        self
    }

    /// Resolves a creator's requested round count against the config:
    /// defaulted when absent, clamped into the supported range.
    pub fn resolve_round_count(&self, requested: Option<usize>) -> usize {
        requested
            .unwrap_or(self.default_round_count)
            .clamp(Self::MIN_ROUND_COUNT, Self::MAX_ROUND_COUNT)
    }
}
