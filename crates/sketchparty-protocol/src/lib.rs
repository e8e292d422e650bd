//! Shared types for the sketchparty game core.
//!
//! This crate defines every type that crosses the boundary between the
//! game core and its callers: identity tokens, the room/round lifecycle
//! state machines, the entity records, and the evaluation payloads.
//! Everything here serializes to the JSON shape clients consume —
//! camelCase field names, snake_case status strings — and the tests pin
//! those shapes, because a mismatch means the client can't parse us.
//!
//! # Key types
//!
//! - [`PlayerId`] / [`RoomId`] — opaque identity tokens
//! - [`RoomStatus`] / [`RoundStatus`] — monotonic lifecycle state machines
//! - [`Player`], [`GameRound`], [`PublicRoom`] — the entity model
//! - [`DrawingEvaluation`], [`EvaluationOutcome`] — judge verdicts and
//!   scoring results

mod model;
mod types;

pub use model::{
    DrawingEvaluation, EvaluationOutcome, EvaluationProvider, GameRound,
    Player, PublicRoom,
};
pub use types::{PlayerId, RoomId, RoomStatus, RoundStatus};
