//! Room registry: creates and tracks rooms, routes operations to them.

use std::collections::HashMap;

use sketchparty_protocol::{
    DrawingEvaluation, EvaluationOutcome, GameRound, Player, PlayerId,
    PublicRoom, RoomId,
};

use crate::room::spawn_room;
use crate::{CreateRoomOptions, GameRoom, RoomConfig, RoomError, RoomHandle};

/// Default command channel size for room actors.
const DEFAULT_CHANNEL_SIZE: usize = 64;

/// The process-wide keyed store of rooms — the single point every
/// operation funnels through.
///
/// Constructed once at process start and injected into whatever serves
/// requests; never an ambient singleton. Each room behind it is an
/// isolated actor task, so per-room serialization comes from the command
/// channel, not from locks held here. These invariants hold within one
/// process only — running several instances without a shared backing
/// store splits the room space between them.
pub struct RoomRegistry {
    config: RoomConfig,
    /// Active rooms, keyed by room ID.
    rooms: HashMap<RoomId, RoomHandle>,
}

impl RoomRegistry {
    /// Creates an empty registry. The config is validated (clamped) once
    /// here and shared by every room it creates.
    pub fn new(config: RoomConfig) -> Self {
        Self {
            config: config.validated(),
            rooms: HashMap::new(),
        }
    }

    /// Creates a room with a fresh host player and returns the lobby
    /// snapshot plus the host's credentials.
    pub fn create_room(
        &mut self,
        options: CreateRoomOptions,
    ) -> (PublicRoom, Player) {
        let (room, host) = GameRoom::create(options, &self.config);
        let snapshot = room.to_public();
        let handle =
            spawn_room(room, self.config.clone(), DEFAULT_CHANNEL_SIZE);

        tracing::info!(
            room_id = %handle.room_id(),
            host = %host.id,
            rounds = snapshot.target_round_count,
            "room created"
        );
        self.rooms.insert(handle.room_id().clone(), handle);
        (snapshot, host)
    }

    /// Adds a player to a room.
    pub async fn join_room(
        &self,
        room_id: &RoomId,
        player_name: &str,
    ) -> Result<(PublicRoom, Player), RoomError> {
        self.handle(room_id)?.join(player_name).await
    }

    /// Starts a room's game on behalf of `requested_by`.
    pub async fn start_game(
        &self,
        room_id: &RoomId,
        requested_by: PlayerId,
    ) -> Result<PublicRoom, RoomError> {
        self.handle(room_id)?.start(requested_by).await
    }

    /// Applies a judge verdict to a room's active round.
    ///
    /// The verdict must already be in hand — the judge call happens
    /// before this, never inside the room's critical section.
    pub async fn apply_evaluation(
        &self,
        room_id: &RoomId,
        player_id: PlayerId,
        evaluation: DrawingEvaluation,
    ) -> Result<EvaluationOutcome, RoomError> {
        self.handle(room_id)?
            .apply_evaluation(player_id, evaluation)
            .await
    }

    /// Nudges a room to expire `round_index` if its limit has elapsed.
    /// Idempotent; a stale index returns the current state unchanged.
    pub async fn timeout_round(
        &self,
        room_id: &RoomId,
        round_index: usize,
    ) -> Result<PublicRoom, RoomError> {
        self.handle(room_id)?.timeout_round(round_index).await
    }

    /// Returns a room's public snapshot.
    pub async fn public_room(
        &self,
        room_id: &RoomId,
    ) -> Result<PublicRoom, RoomError> {
        self.handle(room_id)?.snapshot().await
    }

    /// Returns a copy of a room's current round.
    pub async fn current_round(
        &self,
        room_id: &RoomId,
    ) -> Result<Option<GameRound>, RoomError> {
        self.handle(room_id)?.current_round().await
    }

    /// Returns a cloned handle to a room.
    ///
    /// Useful when callers need to run async operations on a room
    /// without borrowing the registry — e.g. several request tasks
    /// submitting verdicts concurrently.
    pub fn room_handle(&self, room_id: &RoomId) -> Option<RoomHandle> {
        self.rooms.get(room_id).cloned()
    }

    /// Returns the number of active rooms.
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Lists all active room IDs.
    pub fn room_ids(&self) -> Vec<RoomId> {
        self.rooms.keys().cloned().collect()
    }

    fn handle(&self, room_id: &RoomId) -> Result<&RoomHandle, RoomError> {
        self.rooms
            .get(room_id)
            .ok_or_else(|| RoomError::NotFound(room_id.clone()))
    }
}

impl Default for RoomRegistry {
    fn default() -> Self {
        Self::new(RoomConfig::default())
    }
}
