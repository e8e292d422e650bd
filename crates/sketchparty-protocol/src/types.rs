//! Identity tokens and the lifecycle state machines.
//!
//! The id types are "newtype wrappers": a `String` wrapped in a named
//! struct so a `RoomId` can never be passed where a [`PlayerId`] is
//! expected. The inner value is an opaque random token minted by the
//! registry — possession of a `PlayerId` is the only authentication this
//! core knows about.
//!
//! `#[serde(transparent)]` makes each id serialize as the bare string,
//! not as `{ "0": "..." }`, which is what clients expect.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// A unique, opaque identifier for a player.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub String);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P-{}", self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A unique, opaque identifier for a room (one game session).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(pub String);

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R-{}", self.0)
    }
}

impl From<&str> for RoomId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

// ---------------------------------------------------------------------------
// RoomStatus
// ---------------------------------------------------------------------------

/// The lifecycle state of a room.
///
/// Transitions are strictly ordered and monotonic — no regressions,
/// no skipping states:
///
/// ```text
/// Lobby → InRound → Finished
/// ```
///
/// - **Lobby**: Room exists, accepting joins. The game has not started.
/// - **InRound**: The game is running; exactly one round is active.
/// - **Finished**: Every round has finished. Terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomStatus {
    Lobby,
    InRound,
    Finished,
}

impl RoomStatus {
    /// Returns `true` if the room is accepting new players.
    pub fn is_joinable(&self) -> bool {
        matches!(self, Self::Lobby)
    }

    /// Returns `true` if the game is actively running.
    pub fn is_in_round(&self) -> bool {
        matches!(self, Self::InRound)
    }

    /// Attempts to transition to the next state.
    ///
    /// Returns `Some(next)` if a forward transition exists, `None` at the
    /// terminal state. This enforces the strict ordering of the machine.
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Lobby => Some(Self::InRound),
            Self::InRound => Some(Self::Finished),
            Self::Finished => None,
        }
    }

    /// Returns `true` if transitioning to `target` is valid.
    pub fn can_transition_to(self, target: Self) -> bool {
        self.next() == Some(target)
    }
}

impl fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lobby => write!(f, "lobby"),
            Self::InRound => write!(f, "in_round"),
            Self::Finished => write!(f, "finished"),
        }
    }
}

// ---------------------------------------------------------------------------
// RoundStatus
// ---------------------------------------------------------------------------

/// The lifecycle state of a single round.
///
/// ```text
/// Pending → Active → Finished
/// ```
///
/// A round is **Pending** from room creation until activation, **Active**
/// while players draw and the judge guesses, and **Finished** once a guess
/// matched or the time limit elapsed. Terminal — a finished round never
/// reopens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundStatus {
    Pending,
    Active,
    Finished,
}

impl RoundStatus {
    /// Returns `true` if the round is currently being played.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }

    /// Returns `true` if the round has ended.
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Finished)
    }

    /// Attempts to transition to the next state.
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Pending => Some(Self::Active),
            Self::Active => Some(Self::Finished),
            Self::Finished => None,
        }
    }

    /// Returns `true` if transitioning to `target` is valid.
    pub fn can_transition_to(self, target: Self) -> bool {
        self.next() == Some(target)
    }
}

impl fmt::Display for RoundStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Active => write!(f, "active"),
            Self::Finished => write!(f, "finished"),
        }
    }
}

// =========================================================================
// Tests
// =========================================================================
