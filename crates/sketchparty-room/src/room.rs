//! Room actor: an isolated Tokio task that owns one game session.
//!
//! Each room runs in its own task, communicating with the outside world
//! through an mpsc channel. No shared mutable state, just message
//! passing — every operation on a room serializes through its channel,
//! which is what guarantees at-most-one state-changing transition per
//! logical event. Two near-simultaneous winning submissions become two
//! queued commands; the second one finds the round already finished.
//!
//! The actor never performs I/O: judge calls happen *before* a command
//! is sent, so the critical path here is pure in-memory transition.

use tokio::sync::{mpsc, oneshot};

use sketchparty_protocol::{
    DrawingEvaluation, EvaluationOutcome, GameRound, Player, PlayerId,
    PublicRoom, RoomId,
};

use crate::{GameRoom, RoomConfig, RoomError};

/// Commands sent to a room actor through its channel.
///
/// The `oneshot::Sender` in each variant is the reply channel — the
/// caller sends a command and waits for the response on it.
pub(crate) enum RoomCommand {
    /// Add a player to the room.
    Join {
        player_name: String,
        reply: oneshot::Sender<Result<(PublicRoom, Player), RoomError>>,
    },

    /// Start the game (host only; idempotent once started).
    Start {
        requested_by: PlayerId,
        reply: oneshot::Sender<Result<PublicRoom, RoomError>>,
    },

    /// Apply a judge verdict to the active round.
    ApplyEvaluation {
        player_id: PlayerId,
        evaluation: DrawingEvaluation,
        reply: oneshot::Sender<Result<EvaluationOutcome, RoomError>>,
    },

    /// Caller-triggered expiry nudge for a specific round index.
    TimeoutRound {
        round_index: usize,
        reply: oneshot::Sender<PublicRoom>,
    },

    /// Request the current public snapshot.
    Snapshot {
        reply: oneshot::Sender<PublicRoom>,
    },

    /// Request a copy of the current round.
    CurrentRound {
        reply: oneshot::Sender<Option<GameRound>>,
    },
}

/// Handle to a running room actor. Used to send commands to it.
///
/// Cheap to clone — it's just an `mpsc::Sender` wrapper. The
/// [`RoomRegistry`](crate::RoomRegistry) holds one per room.
#[derive(Clone)]
pub struct RoomHandle {
    room_id: RoomId,
    sender: mpsc::Sender<RoomCommand>,
}

impl RoomHandle {
    /// Returns the room's unique ID.
    pub fn room_id(&self) -> &RoomId {
        &self.room_id
    }

    /// Sends a join request to the room.
    pub async fn join(
        &self,
        player_name: &str,
    ) -> Result<(PublicRoom, Player), RoomError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(RoomCommand::Join {
                player_name: player_name.to_string(),
                reply: reply_tx,
            })
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id.clone()))?;
        reply_rx
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id.clone()))?
    }

    /// Asks the room to start the game.
    pub async fn start(
        &self,
        requested_by: PlayerId,
    ) -> Result<PublicRoom, RoomError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(RoomCommand::Start {
                requested_by,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id.clone()))?;
        reply_rx
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id.clone()))?
    }

    /// Submits a judge verdict for scoring.
    pub async fn apply_evaluation(
        &self,
        player_id: PlayerId,
        evaluation: DrawingEvaluation,
    ) -> Result<EvaluationOutcome, RoomError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(RoomCommand::ApplyEvaluation {
                player_id,
                evaluation,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id.clone()))?;
        reply_rx
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id.clone()))?
    }

    /// Nudges the room to expire `round_index` if its limit has elapsed.
    pub async fn timeout_round(
        &self,
        round_index: usize,
    ) -> Result<PublicRoom, RoomError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(RoomCommand::TimeoutRound {
                round_index,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id.clone()))?;
        reply_rx
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id.clone()))
    }

    /// Requests the current public snapshot.
    pub async fn snapshot(&self) -> Result<PublicRoom, RoomError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(RoomCommand::Snapshot { reply: reply_tx })
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id.clone()))?;
        reply_rx
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id.clone()))
    }

    /// Requests a copy of the current round.
    pub async fn current_round(
        &self,
    ) -> Result<Option<GameRound>, RoomError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(RoomCommand::CurrentRound { reply: reply_tx })
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id.clone()))?;
        reply_rx
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id.clone()))
    }
}

/// The internal room actor state. Runs inside a Tokio task.
struct RoomActor {
    room: GameRoom,
    config: RoomConfig,
    receiver: mpsc::Receiver<RoomCommand>,
}

impl RoomActor {
    /// Runs the actor loop, processing commands until every handle is
    /// dropped.
    ///
    /// Rooms are never explicitly destroyed — the task ends when the
    /// registry (and any cloned handles) go away.
    async fn run(mut self) {
        tracing::info!(room_id = %self.room.id, "room actor started");

        while let Some(cmd) = self.receiver.recv().await {
            // Detect-on-touch: every command, reads included, first
            // fast-forwards an expired round so nobody acts on stale
            // state.
            self.room.reconcile(self.config.round_time_limit);

            match cmd {
                RoomCommand::Join { player_name, reply } => {
                    let result = self
                        .room
                        .join(&player_name)
                        .map(|player| (self.room.to_public(), player));
                    let _ = reply.send(result);
                }
                RoomCommand::Start {
                    requested_by,
                    reply,
                } => {
                    let result = self
                        .room
                        .start(&requested_by)
                        .map(|()| self.room.to_public());
                    let _ = reply.send(result);
                }
                RoomCommand::ApplyEvaluation {
                    player_id,
                    evaluation,
                    reply,
                } => {
                    let result =
                        self.room.apply_evaluation(&player_id, &evaluation);
                    let _ = reply.send(result);
                }
                RoomCommand::TimeoutRound { round_index, reply } => {
                    self.room.timeout_round(
                        round_index,
                        self.config.round_time_limit,
                    );
                    let _ = reply.send(self.room.to_public());
                }
                RoomCommand::Snapshot { reply } => {
                    let _ = reply.send(self.room.to_public());
                }
                RoomCommand::CurrentRound { reply } => {
                    let _ = reply.send(self.room.current_round().cloned());
                }
            }
        }

        tracing::info!(room_id = %self.room.id, "room actor stopped");
    }
}

/// Spawns a room actor task and returns a handle to communicate with it.
///
/// `channel_size` controls backpressure — if the channel fills up,
/// senders wait (bounded channel).
pub(crate) fn spawn_room(
    room: GameRoom,
    config: RoomConfig,
    channel_size: usize,
) -> RoomHandle {
    let room_id = room.id.clone();
    let (tx, rx) = mpsc::channel(channel_size);

    let actor = RoomActor {
        room,
        config,
        receiver: rx,
    };

    tokio::spawn(actor.run());

    RoomHandle {
        room_id,
        sender: tx,
    }
}
