//! Error types for the room layer.

use sketchparty_protocol::{PlayerId, RoomId};

/// Errors that can occur during room operations.
///
/// Every failure aborts the operation with zero partial mutation — the
/// room, if it exists, is exactly as it was before the call. The request
/// layer maps these to transport responses; this core never produces a
/// response format itself.
#[derive(Debug, thiserror::Error)]
pub enum RoomError {
    /// The room does not exist.
    #[error("room {0} not found")]
    NotFound(RoomId),

    /// The room has left the lobby — no further joins.
    #[error("room {0} has already started")]
    AlreadyStarted(RoomId),

    /// The room is full — no more player slots available.
    #[error("room {0} is full")]
    RoomFull(RoomId),

    /// Only the host may start the game.
    #[error("player {0} is not the host")]
    NotHost(PlayerId),

    /// The player does not belong to this room. Upstream auth should
    /// make this unreachable.
    #[error("player {0} not found in room")]
    PlayerNotFound(PlayerId),

    /// The room's command channel is full or closed.
    #[error("room {0} is unavailable")]
    Unavailable(RoomId),
}
