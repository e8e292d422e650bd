//! The entity records and evaluation payloads.
//!
//! These are the structures callers receive: players, rounds, the
//! [`PublicRoom`] snapshot, and the judge's verdict types. Field names
//! serialize as camelCase and optional fields are omitted when unset,
//! matching the JSON contract clients parse.
//!
//! # Snapshot contract
//!
//! [`PublicRoom`] and [`GameRound`] values returned from the game core are
//! owned deep copies. Once a caller holds one, it never changes — the core
//! cannot be mutated through it and later transitions don't reach back
//! into it. Callers rely on this; treat it as part of the API, not an
//! implementation detail.

use serde::{Deserialize, Serialize};

use crate::{PlayerId, RoomId, RoomStatus, RoundStatus};

// ---------------------------------------------------------------------------
// Player
// ---------------------------------------------------------------------------

/// One participant in a room.
///
/// Created when the room is created (the host) or on join; never removed.
/// Only the scoring engine mutates a player, and only its `score`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    /// Opaque unique token. Possession of it is the player's credential.
    pub id: PlayerId,
    /// Display name, trimmed; defaulted when blank ("Player N").
    pub name: String,
    /// Rounds won so far. Starts at 0, only ever incremented.
    pub score: u32,
    /// Creation timestamp, milliseconds since the Unix epoch.
    pub joined_at: u64,
}

// ---------------------------------------------------------------------------
// GameRound
// ---------------------------------------------------------------------------

/// One prompt-guessing turn within a room.
///
/// `prompt` is the secret word for the round. `choices` is the full
/// candidate pool (shuffled, always containing `prompt`) handed to the
/// judge as its multiple-choice universe — it is fixed at creation and
/// read-only thereafter. The winner fields are set at most once, together
/// with the round's transition from active to finished.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRound {
    /// 0-based position in the room's round sequence. Immutable.
    pub index: usize,
    /// The secret word to draw this round.
    pub prompt: String,
    /// The full candidate pool shown to the judge, shuffled.
    pub choices: Vec<String>,
    /// Lifecycle state. Monotonic: pending → active → finished.
    pub status: RoundStatus,
    /// When the round was activated. Set once, never cleared.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<u64>,
    /// When the round finished. Set once, never cleared.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<u64>,
    /// The player whose submission won, if any. Set at most once.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner_player_id: Option<PlayerId>,
    /// The judge's guess that matched the prompt.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winning_guess: Option<String>,
    /// The judge's confidence in the winning guess.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winning_confidence: Option<f64>,
}

// ---------------------------------------------------------------------------
// PublicRoom
// ---------------------------------------------------------------------------

/// An immutable, caller-safe snapshot of a room.
///
/// Everything the room tracks except its prompt pool. Returned by value
/// from every game-core operation; see the module docs for the snapshot
/// contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicRoom {
    pub id: RoomId,
    /// The creating player. Never changes; only the host may start.
    pub host_player_id: PlayerId,
    pub status: RoomStatus,
    /// Player capacity. Fixed at creation.
    pub max_players: usize,
    /// How many rounds the game runs. Fixed at creation.
    pub target_round_count: usize,
    /// Index of the round currently (or most recently) in play.
    /// Advances forward only.
    pub current_round_index: usize,
    /// Join-ordered. Append-only, never longer than `max_players`.
    pub players: Vec<Player>,
    /// Fixed-length, sized to `target_round_count` at creation.
    pub rounds: Vec<GameRound>,
    pub created_at: u64,
    pub updated_at: u64,
}

// ---------------------------------------------------------------------------
// Evaluation payloads
// ---------------------------------------------------------------------------

/// Which judge produced a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EvaluationProvider {
    /// Random local judge — development and failure fallback.
    Mock,
    /// Gemini vision judge.
    GoogleLive,
    /// Image post-processing provider.
    #[serde(rename = "nanobanana")]
    NanoBanana,
}

/// A well-formed verdict from the judge: its best guess at what the
/// drawing depicts, drawn from the round's candidate choices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawingEvaluation {
    /// The judge's guess. Matched against the round prompt
    /// case-insensitively after trimming.
    pub guess: String,
    /// Confidence in `[0, 1]`.
    pub confidence: f64,
    /// Which provider produced this verdict.
    pub provider: EvaluationProvider,
    /// Optional short rationale from the provider.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// The result of applying a verdict to the active round.
///
/// `matched == false` with `correct_prompt` set means "the judge guessed
/// wrong, keep drawing"; `matched == false` without it means the round was
/// no longer active (already won or timed out) — the idempotency guard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationOutcome {
    /// Whether the guess matched the secret prompt and scored.
    pub matched: bool,
    /// The room state after the operation.
    pub room: PublicRoom,
    /// The true prompt, revealed on an active-round mismatch and on a win.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct_prompt: Option<String>,
}

// =========================================================================
// Tests
// =========================================================================
