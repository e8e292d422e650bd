//! The room state machine: one game session from lobby to finish.
//!
//! [`GameRoom`] is the aggregate the rest of the crate protects. Every
//! transition lives here as a plain synchronous method — joining,
//! starting, scoring a verdict, timing out a round — so the rules can be
//! unit-tested without an actor or a clock in the way. The actor in
//! [`room`](crate::room) owns one `GameRoom` and serializes access to it.
//!
//! # Timeouts are lazy
//!
//! No timer fires when a round's limit elapses. Instead, [`reconcile`]
//! runs before every operation (reads included) and fast-forwards an
//! expired round: finish it, advance, activate the next. A room nobody
//! touches sits in its expired-but-undetected state until the next
//! request — the poll loop clients run bounds that staleness.
//!
//! [`reconcile`]: GameRoom::reconcile

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use rand::Rng;

use sketchparty_protocol::{
    DrawingEvaluation, EvaluationOutcome, GameRound, Player, PlayerId,
    PublicRoom, RoomId, RoomStatus, RoundStatus,
};

use crate::{RoomConfig, RoomError, prompts::build_rounds};

/// Random bytes in a room id token (hex-encoded, so twice as many chars).
const ROOM_ID_BYTES: usize = 4;

/// Random bytes in a player id token.
const PLAYER_ID_BYTES: usize = 8;

/// Creation parameters for a room.
#[derive(Debug, Clone, Default)]
pub struct CreateRoomOptions {
    /// The host's display name. Trimmed; defaulted when blank.
    pub host_name: String,
    /// Rounds to play. Defaulted from config and clamped to 1–30.
    pub target_round_count: Option<usize>,
    /// Custom prompt pool. Falls back to the built-in pool when absent
    /// or empty.
    pub prompt_pool: Option<Vec<String>>,
}

/// One game session: up to `max_players` players and a fixed round
/// sequence.
///
/// The room exclusively owns its players and rounds; nothing is shared
/// across rooms. Mutated in place for its whole life, never destroyed.
/// Callers outside this crate only ever see [`PublicRoom`] snapshots.
#[derive(Debug, Clone)]
pub struct GameRoom {
    pub id: RoomId,
    /// The creating player. Never changes; only the host may start.
    pub host_player_id: PlayerId,
    pub status: RoomStatus,
    pub max_players: usize,
    pub target_round_count: usize,
    /// Advances forward only.
    pub current_round_index: usize,
    /// Immutable after creation. Not exposed in snapshots.
    pub prompt_pool: Vec<String>,
    /// Join-ordered, append-only.
    pub players: Vec<Player>,
    /// Fixed length, built at creation.
    pub rounds: Vec<GameRound>,
    pub created_at: u64,
    pub updated_at: u64,
}

impl GameRoom {
    /// Creates a room in the lobby with its host as the first player.
    ///
    /// The round sequence is built up front from the prompt pool, all
    /// rounds pending.
    pub fn create(
        options: CreateRoomOptions,
        config: &RoomConfig,
    ) -> (GameRoom, Player) {
        let host = Player {
            id: PlayerId(generate_token(PLAYER_ID_BYTES)),
            name: display_name(&options.host_name, 1),
            score: 0,
            joined_at: now_ms(),
        };

        let target_round_count =
            config.resolve_round_count(options.target_round_count);
        let prompt_pool = options
            .prompt_pool
            .filter(|pool| !pool.is_empty())
            .unwrap_or_else(|| {
                crate::config::DEFAULT_PROMPTS
                    .iter()
                    .map(|p| p.to_string())
                    .collect()
            });

        let now = now_ms();
        let room = GameRoom {
            id: RoomId(generate_token(ROOM_ID_BYTES)),
            host_player_id: host.id.clone(),
            status: RoomStatus::Lobby,
            max_players: config.max_players,
            target_round_count,
            current_round_index: 0,
            rounds: build_rounds(&prompt_pool, target_round_count),
            prompt_pool,
            players: vec![host.clone()],
            created_at: now,
            updated_at: now,
        };

        (room, host)
    }

    /// Appends a new player.
    ///
    /// # Errors
    /// - [`RoomError::AlreadyStarted`] — the room left the lobby
    /// - [`RoomError::RoomFull`] — all player slots taken
    pub fn join(&mut self, player_name: &str) -> Result<Player, RoomError> {
        if !self.status.is_joinable() {
            tracing::debug!(room_id = %self.id, "join rejected: already started");
            return Err(RoomError::AlreadyStarted(self.id.clone()));
        }
        if self.players.len() >= self.max_players {
            tracing::debug!(room_id = %self.id, "join rejected: room full");
            return Err(RoomError::RoomFull(self.id.clone()));
        }

        let player = Player {
            id: PlayerId(generate_token(PLAYER_ID_BYTES)),
            name: display_name(player_name, self.players.len() + 1),
            score: 0,
            joined_at: now_ms(),
        };
        self.players.push(player.clone());
        self.updated_at = now_ms();

        tracing::info!(
            room_id = %self.id,
            player_id = %player.id,
            players = self.players.len(),
            "player joined"
        );
        Ok(player)
    }

    /// Starts the game: status `in_round`, round 0 active.
    ///
    /// Idempotent once started — a second call returns `Ok` without
    /// touching anything, and the caller sees whatever the current state
    /// is (possibly already advanced past round 0 by reconciliation).
    ///
    /// # Errors
    /// [`RoomError::NotHost`] — only the host may start.
    pub fn start(&mut self, requested_by: &PlayerId) -> Result<(), RoomError> {
        if self.host_player_id != *requested_by {
            tracing::debug!(
                room_id = %self.id,
                player_id = %requested_by,
                "start rejected: not the host"
            );
            return Err(RoomError::NotHost(requested_by.clone()));
        }
        if self.status != RoomStatus::Lobby {
            return Ok(());
        }

        self.status = RoomStatus::InRound;
        self.current_round_index = 0;
        let now = now_ms();
        if let Some(round) = self.rounds.first_mut() {
            round.status = RoundStatus::Active;
            round.started_at = Some(now);
        }
        self.updated_at = now;

        tracing::info!(
            room_id = %self.id,
            players = self.players.len(),
            rounds = self.rounds.len(),
            "game started"
        );
        Ok(())
    }

    /// Detects and applies round expiry. Runs before every operation.
    ///
    /// No-op unless the room is in a round with an active current round.
    /// An active round missing its `started_at` gets stamped now (lazy
    /// activation guard). Once the limit has elapsed the round is
    /// finished, stamped, and the room advances — with no winner fields
    /// set.
    pub fn reconcile(&mut self, time_limit: Duration) {
        if self.status != RoomStatus::InRound {
            return;
        }
        let index = self.current_round_index;
        let Some(round) = self.rounds.get_mut(index) else {
            return;
        };
        if round.status != RoundStatus::Active {
            return;
        }

        let now = now_ms();
        let started_at = match round.started_at {
            Some(at) => at,
            None => {
                round.started_at = Some(now);
                self.updated_at = now;
                now
            }
        };

        if now.saturating_sub(started_at) < time_limit.as_millis() as u64 {
            return;
        }

        round.status = RoundStatus::Finished;
        round.ended_at = Some(now);
        tracing::info!(
            room_id = %self.id,
            round = index,
            "round expired without a winner"
        );
        self.advance_round();
    }

    /// Applies a judge verdict to the active round.
    ///
    /// Returns `matched = false` with no mutation when the room is not in
    /// a round or the current round is no longer active — the idempotency
    /// guard against double-scoring after a win or timeout. An
    /// active-round mismatch reveals the true prompt so callers can tell
    /// "judge guessed wrong, try again" from "round already over".
    ///
    /// A match finalizes the round (winner fields set exactly once),
    /// awards the submitting player one point, and advances.
    ///
    /// # Errors
    /// [`RoomError::PlayerNotFound`] — the matching submission came from
    /// an id that isn't in this room. Checked before any mutation.
    pub fn apply_evaluation(
        &mut self,
        player_id: &PlayerId,
        evaluation: &DrawingEvaluation,
    ) -> Result<EvaluationOutcome, RoomError> {
        if self.status != RoomStatus::InRound {
            return Ok(self.unmatched_outcome(None));
        }
        let index = self.current_round_index;
        let Some(round) = self.rounds.get(index) else {
            return Ok(self.unmatched_outcome(None));
        };
        if round.status != RoundStatus::Active {
            return Ok(self.unmatched_outcome(None));
        }

        let prompt = round.prompt.clone();
        if normalize(&evaluation.guess) != normalize(&prompt) {
            return Ok(self.unmatched_outcome(Some(prompt)));
        }

        // Matched. Resolve the player before mutating anything so a bad
        // id leaves the room untouched.
        let Some(player_index) =
            self.players.iter().position(|p| p.id == *player_id)
        else {
            tracing::debug!(
                room_id = %self.id,
                player_id = %player_id,
                "matching submission from a player not in this room"
            );
            return Err(RoomError::PlayerNotFound(player_id.clone()));
        };

        let now = now_ms();
        let round = &mut self.rounds[index];
        round.status = RoundStatus::Finished;
        round.ended_at = Some(now);
        round.winner_player_id = Some(player_id.clone());
        round.winning_guess = Some(evaluation.guess.clone());
        round.winning_confidence = Some(evaluation.confidence);
        self.players[player_index].score += 1;

        tracing::info!(
            room_id = %self.id,
            round = index,
            winner = %player_id,
            confidence = evaluation.confidence,
            "round won"
        );
        self.advance_round();

        Ok(EvaluationOutcome {
            matched: true,
            room: self.to_public(),
            correct_prompt: Some(prompt),
        })
    }

    /// Caller-triggered expiry nudge, equivalent to reconciliation.
    ///
    /// Ignored (current state returned unchanged) when `round_index`
    /// isn't the active round or the limit hasn't elapsed yet — a stale
    /// index just means the caller's poll lost a race that
    /// reconciliation already won.
    pub fn timeout_round(&mut self, round_index: usize, time_limit: Duration) {
        if self.status != RoomStatus::InRound {
            return;
        }
        let index = self.current_round_index;
        let Some(round) = self.rounds.get_mut(index) else {
            return;
        };
        if round.status != RoundStatus::Active || round.index != round_index {
            return;
        }

        let now = now_ms();
        let elapsed = now.saturating_sub(round.started_at.unwrap_or(0));
        if elapsed < time_limit.as_millis() as u64 {
            return;
        }

        round.status = RoundStatus::Finished;
        round.ended_at = Some(now);
        tracing::info!(
            room_id = %self.id,
            round = index,
            "round timed out on caller nudge"
        );
        self.advance_round();
    }

    /// The round at `current_round_index`.
    pub fn current_round(&self) -> Option<&GameRound> {
        self.rounds.get(self.current_round_index)
    }

    /// Builds the immutable caller-facing snapshot: everything except
    /// the prompt pool. A deep copy — later transitions never reach a
    /// snapshot already handed out.
    pub fn to_public(&self) -> PublicRoom {
        PublicRoom {
            id: self.id.clone(),
            host_player_id: self.host_player_id.clone(),
            status: self.status,
            max_players: self.max_players,
            target_round_count: self.target_round_count,
            current_round_index: self.current_round_index,
            players: self.players.clone(),
            rounds: self.rounds.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    /// Moves to the next round, or finishes the game past the last one.
    fn advance_round(&mut self) {
        let next_index = self.current_round_index + 1;
        let now = now_ms();

        if next_index >= self.rounds.len() {
            self.status = RoomStatus::Finished;
            self.updated_at = now;
            tracing::info!(room_id = %self.id, "game finished");
            return;
        }

        self.current_round_index = next_index;
        let round = &mut self.rounds[next_index];
        round.status = RoundStatus::Active;
        round.started_at = Some(now);
        self.updated_at = now;
        tracing::info!(room_id = %self.id, round = next_index, "round advanced");
    }

    fn unmatched_outcome(
        &self,
        correct_prompt: Option<String>,
    ) -> EvaluationOutcome {
        EvaluationOutcome {
            matched: false,
            room: self.to_public(),
            correct_prompt,
        }
    }
}

/// Guess/prompt comparison key: trimmed, lowercased.
fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Trims a requested display name, falling back to "Player N".
fn display_name(requested: &str, position: usize) -> String {
    let trimmed = requested.trim();
    if trimmed.is_empty() {
        format!("Player {position}")
    } else {
        trimmed.to_string()
    }
}

/// Milliseconds since the Unix epoch. Wall-clock, matching the
/// timestamps clients receive in snapshots.
fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or_default()
}

/// Generates a random lowercase-hex id token of `bytes * 2` characters.
fn generate_token(bytes: usize) -> String {
    let mut rng = rand::rng();
    let mut buf = vec![0u8; bytes];
    rng.fill(buf.as_mut_slice());
    buf.iter().map(|b| format!("{b:02x}")).collect()
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    //! Unit tests for the room state machine.
    //!
    //! # Testing time-dependent behavior
    //!
    //! Round expiry depends on elapsed time. Instead of sleeping, the
    //! tests pick the limit to force the branch they want:
    //!   - `Duration::ZERO` → the active round expires on the next touch
    //!   - one hour → the round never expires during the test

    use super::*;

    // -- Helpers ----------------------------------------------------------

    const NEVER: Duration = Duration::from_secs(3600);

    fn config() -> RoomConfig {
        RoomConfig::default()
    }

    fn pool(entries: &[&str]) -> Vec<String> {
        entries.iter().map(|e| e.to_string()).collect()
    }

    /// A started room with the given pool and round count; the judge's
    /// verdicts are built by hand in each test.
    fn started_room(
        prompts: &[&str],
        target_round_count: usize,
    ) -> (GameRoom, Player) {
        let (mut room, host) = GameRoom::create(
            CreateRoomOptions {
                host_name: "Ada".into(),
                target_round_count: Some(target_round_count),
                prompt_pool: Some(pool(prompts)),
            },
            &config(),
        );
        room.start(&host.id).expect("host can start");
        (room, host)
    }

    fn verdict(guess: &str) -> DrawingEvaluation {
        DrawingEvaluation {
            guess: guess.to_string(),
            confidence: 0.8,
            provider: sketchparty_protocol::EvaluationProvider::Mock,
            reason: None,
        }
    }

    /// The scenario invariant: total score equals rounds with a winner.
    fn assert_score_conservation(room: &GameRoom) {
        let total: u32 = room.players.iter().map(|p| p.score).sum();
        let winners = room
            .rounds
            .iter()
            .filter(|r| r.winner_player_id.is_some())
            .count() as u32;
        assert_eq!(total, winners, "score total must equal winner count");
    }

    // =====================================================================
    // create()
    // =====================================================================

    #[test]
    fn test_create_starts_in_lobby_with_host() {
        let (room, host) = GameRoom::create(
            CreateRoomOptions {
                host_name: "Ada".into(),
                target_round_count: Some(3),
                prompt_pool: None,
            },
            &config(),
        );

        assert_eq!(room.status, RoomStatus::Lobby);
        assert_eq!(room.host_player_id, host.id);
        assert_eq!(room.players.len(), 1);
        assert_eq!(room.players[0].name, "Ada");
        assert_eq!(room.players[0].score, 0);
        assert_eq!(room.max_players, 4);
        assert_eq!(room.target_round_count, 3);
        assert_eq!(room.rounds.len(), 3);
        assert!(room.rounds.iter().all(|r| r.status == RoundStatus::Pending));
    }

    #[test]
    fn test_create_blank_host_name_gets_default() {
        let (room, host) = GameRoom::create(
            CreateRoomOptions {
                host_name: "   ".into(),
                ..CreateRoomOptions::default()
            },
            &config(),
        );
        assert_eq!(host.name, "Player 1");
        assert_eq!(room.players[0].name, "Player 1");
    }

    #[test]
    fn test_create_trims_host_name() {
        let (_, host) = GameRoom::create(
            CreateRoomOptions {
                host_name: "  Ada  ".into(),
                ..CreateRoomOptions::default()
            },
            &config(),
        );
        assert_eq!(host.name, "Ada");
    }

    #[test]
    fn test_create_ids_are_unique() {
        let (room_a, host_a) =
            GameRoom::create(CreateRoomOptions::default(), &config());
        let (room_b, host_b) =
            GameRoom::create(CreateRoomOptions::default(), &config());
        assert_ne!(room_a.id, room_b.id);
        assert_ne!(host_a.id, host_b.id);
    }

    #[test]
    fn test_create_clamps_round_count() {
        let (room, _) = GameRoom::create(
            CreateRoomOptions {
                target_round_count: Some(99),
                ..CreateRoomOptions::default()
            },
            &config(),
        );
        assert_eq!(room.target_round_count, RoomConfig::MAX_ROUND_COUNT);
        assert_eq!(room.rounds.len(), RoomConfig::MAX_ROUND_COUNT);
    }

    // =====================================================================
    // join()
    // =====================================================================

    #[test]
    fn test_join_appends_players_in_order() {
        let (mut room, _) =
            GameRoom::create(CreateRoomOptions::default(), &config());

        let second = room.join("Grace").unwrap();
        let third = room.join("").unwrap();

        assert_eq!(room.players.len(), 3);
        assert_eq!(second.name, "Grace");
        assert_eq!(third.name, "Player 3");
        assert_eq!(room.players[1].id, second.id);
        assert_eq!(room.players[2].id, third.id);
    }

    #[test]
    fn test_join_fifth_player_is_rejected() {
        let (mut room, _) =
            GameRoom::create(CreateRoomOptions::default(), &config());
        room.join("b").unwrap();
        room.join("c").unwrap();
        room.join("d").unwrap();

        let result = room.join("e");

        assert!(matches!(result, Err(RoomError::RoomFull(_))));
        assert_eq!(room.players.len(), 4, "failed join must not mutate");
    }

    #[test]
    fn test_join_after_start_is_rejected() {
        let (mut room, _) = started_room(&["cat", "dog"], 1);
        let result = room.join("late");
        assert!(matches!(result, Err(RoomError::AlreadyStarted(_))));
        assert_eq!(room.players.len(), 1);
    }

    // =====================================================================
    // start()
    // =====================================================================

    #[test]
    fn test_start_activates_round_zero() {
        let (room, _) = started_room(&["cat", "dog"], 2);

        assert_eq!(room.status, RoomStatus::InRound);
        assert_eq!(room.current_round_index, 0);
        assert_eq!(room.rounds[0].status, RoundStatus::Active);
        assert!(room.rounds[0].started_at.is_some());
        assert_eq!(room.rounds[1].status, RoundStatus::Pending);
    }

    #[test]
    fn test_start_by_non_host_is_rejected() {
        let (mut room, _) =
            GameRoom::create(CreateRoomOptions::default(), &config());
        let joiner = room.join("Grace").unwrap();

        let result = room.start(&joiner.id);

        assert!(matches!(result, Err(RoomError::NotHost(p)) if p == joiner.id));
        assert_eq!(room.status, RoomStatus::Lobby);
    }

    #[test]
    fn test_start_twice_is_idempotent() {
        let (mut room, host) = started_room(&["cat", "dog"], 2);
        let started_at = room.rounds[0].started_at;

        room.start(&host.id).expect("second start is not an error");

        // Nothing re-activated, nothing re-stamped.
        assert_eq!(room.current_round_index, 0);
        assert_eq!(room.rounds[0].started_at, started_at);
    }

    // =====================================================================
    // reconcile()
    // =====================================================================

    #[test]
    fn test_reconcile_noop_in_lobby() {
        let (mut room, _) =
            GameRoom::create(CreateRoomOptions::default(), &config());
        let before = room.clone();

        room.reconcile(Duration::ZERO);

        assert_eq!(room.status, before.status);
        assert_eq!(room.updated_at, before.updated_at);
    }

    #[test]
    fn test_reconcile_within_limit_is_noop() {
        let (mut room, _) = started_room(&["cat", "dog"], 2);

        room.reconcile(NEVER);

        assert_eq!(room.current_round_index, 0);
        assert_eq!(room.rounds[0].status, RoundStatus::Active);
    }

    #[test]
    fn test_reconcile_expires_round_and_advances() {
        let (mut room, _) = started_room(&["cat", "dog"], 2);

        room.reconcile(Duration::ZERO);

        assert_eq!(room.rounds[0].status, RoundStatus::Finished);
        assert!(room.rounds[0].ended_at.is_some());
        assert!(room.rounds[0].winner_player_id.is_none());
        assert_eq!(room.current_round_index, 1);
        assert_eq!(room.rounds[1].status, RoundStatus::Active);
        assert_eq!(room.status, RoomStatus::InRound);
    }

    #[test]
    fn test_reconcile_expiry_on_last_round_finishes_game() {
        let (mut room, _) = started_room(&["cat", "dog"], 1);

        room.reconcile(Duration::ZERO);

        assert_eq!(room.status, RoomStatus::Finished);
        assert!(room.rounds.iter().all(|r| r.status == RoundStatus::Finished));
    }

    #[test]
    fn test_reconcile_stamps_missing_started_at() {
        let (mut room, _) = started_room(&["cat", "dog"], 1);
        // Simulate a round marked active without ever being started.
        room.rounds[0].started_at = None;

        room.reconcile(NEVER);

        assert!(room.rounds[0].started_at.is_some());
        assert_eq!(room.rounds[0].status, RoundStatus::Active);
    }

    #[test]
    fn test_reconcile_twice_is_idempotent() {
        let (mut room, _) = started_room(&["cat", "dog"], 2);

        room.reconcile(NEVER);
        let first = room.clone();
        room.reconcile(NEVER);

        assert_eq!(room.status, first.status);
        assert_eq!(room.current_round_index, first.current_round_index);
        assert_eq!(room.updated_at, first.updated_at);
        assert_eq!(room.rounds, first.rounds);
    }

    // =====================================================================
    // apply_evaluation()
    // =====================================================================

    #[test]
    fn test_apply_evaluation_match_scores_and_advances() {
        let (mut room, host) = started_room(&["cat"], 2);
        let prompt = room.rounds[0].prompt.clone();

        let outcome =
            room.apply_evaluation(&host.id, &verdict(&prompt)).unwrap();

        assert!(outcome.matched);
        assert_eq!(outcome.correct_prompt.as_deref(), Some(prompt.as_str()));
        assert_eq!(room.players[0].score, 1);
        assert_eq!(room.rounds[0].status, RoundStatus::Finished);
        assert_eq!(room.rounds[0].winner_player_id, Some(host.id.clone()));
        assert_eq!(room.rounds[0].winning_guess, Some(prompt));
        assert_eq!(room.rounds[0].winning_confidence, Some(0.8));
        assert_eq!(room.current_round_index, 1);
        assert_eq!(room.rounds[1].status, RoundStatus::Active);
        assert_score_conservation(&room);
    }

    #[test]
    fn test_apply_evaluation_match_on_last_round_finishes_game() {
        let (mut room, host) = started_room(&["cat"], 1);
        let prompt = room.rounds[0].prompt.clone();

        let outcome =
            room.apply_evaluation(&host.id, &verdict(&prompt)).unwrap();

        assert!(outcome.matched);
        assert_eq!(room.status, RoomStatus::Finished);
        assert_eq!(outcome.room.status, RoomStatus::Finished);
    }

    #[test]
    fn test_apply_evaluation_match_is_case_and_whitespace_insensitive() {
        let (mut room, host) = started_room(&["cat"], 1);

        let outcome =
            room.apply_evaluation(&host.id, &verdict("  CaT ")).unwrap();

        assert!(outcome.matched);
        // The winning guess is recorded as submitted, not normalized.
        assert_eq!(room.rounds[0].winning_guess.as_deref(), Some("  CaT "));
    }

    #[test]
    fn test_apply_evaluation_mismatch_reveals_prompt_without_mutation() {
        let (mut room, host) = started_room(&["cat"], 1);

        let outcome =
            room.apply_evaluation(&host.id, &verdict("dog")).unwrap();

        assert!(!outcome.matched);
        assert_eq!(outcome.correct_prompt.as_deref(), Some("cat"));
        assert_eq!(room.rounds[0].status, RoundStatus::Active);
        assert_eq!(room.players[0].score, 0);
        assert!(room.rounds[0].winner_player_id.is_none());
    }

    #[test]
    fn test_apply_evaluation_after_game_finished_is_guarded() {
        let (mut room, host) = started_room(&["cat"], 1);
        let prompt = room.rounds[0].prompt.clone();
        room.apply_evaluation(&host.id, &verdict(&prompt)).unwrap();
        assert_eq!(room.status, RoomStatus::Finished);

        let outcome =
            room.apply_evaluation(&host.id, &verdict(&prompt)).unwrap();

        // Guard: no correct_prompt hint, no extra score.
        assert!(!outcome.matched);
        assert!(outcome.correct_prompt.is_none());
        assert_eq!(room.players[0].score, 1);
        assert_score_conservation(&room);
    }

    #[test]
    fn test_apply_evaluation_won_round_never_scores_twice() {
        // Two-round game: after round 0 is won, a second matching
        // submission for it lands on round 1 and misses.
        let (mut room, host) = started_room(&["cat", "dog", "egg"], 2);
        let first_prompt = room.rounds[0].prompt.clone();
        room.apply_evaluation(&host.id, &verdict(&first_prompt)).unwrap();

        let replay =
            room.apply_evaluation(&host.id, &verdict(&first_prompt)).unwrap();

        assert_eq!(room.rounds[0].winner_player_id, Some(host.id.clone()));
        if replay.matched {
            // Legal only if round 1 happens to share the prompt
            // (repeats can occur with small pools).
            assert_eq!(room.rounds[1].prompt, first_prompt);
        } else {
            assert_eq!(room.players[0].score, 1);
        }
        assert_score_conservation(&room);
    }

    #[test]
    fn test_apply_evaluation_unknown_player_fails_without_mutation() {
        let (mut room, _) = started_room(&["cat"], 1);
        let stranger = PlayerId::from("not-a-member");
        let prompt = room.rounds[0].prompt.clone();

        let result = room.apply_evaluation(&stranger, &verdict(&prompt));

        assert!(matches!(result, Err(RoomError::PlayerNotFound(p)) if p == stranger));
        // Atomicity: the matching guess must not have finalized anything.
        assert_eq!(room.rounds[0].status, RoundStatus::Active);
        assert!(room.rounds[0].winner_player_id.is_none());
        assert_eq!(room.players[0].score, 0);
    }

    #[test]
    fn test_apply_evaluation_in_lobby_is_guarded() {
        let (mut room, host) =
            GameRoom::create(CreateRoomOptions::default(), &config());

        let outcome = room.apply_evaluation(&host.id, &verdict("cat")).unwrap();

        assert!(!outcome.matched);
        assert!(outcome.correct_prompt.is_none());
    }

    // =====================================================================
    // timeout_round()
    // =====================================================================

    #[test]
    fn test_timeout_round_expires_elapsed_round() {
        let (mut room, _) = started_room(&["cat", "dog"], 2);

        room.timeout_round(0, Duration::ZERO);

        assert_eq!(room.rounds[0].status, RoundStatus::Finished);
        assert!(room.rounds[0].winner_player_id.is_none());
        assert_eq!(room.current_round_index, 1);
    }

    #[test]
    fn test_timeout_round_ignores_stale_index() {
        let (mut room, _) = started_room(&["cat", "dog"], 2);

        room.timeout_round(5, Duration::ZERO);

        assert_eq!(room.rounds[0].status, RoundStatus::Active);
        assert_eq!(room.current_round_index, 0);
    }

    #[test]
    fn test_timeout_round_ignores_unelapsed_round() {
        let (mut room, _) = started_room(&["cat", "dog"], 2);

        room.timeout_round(0, NEVER);

        assert_eq!(room.rounds[0].status, RoundStatus::Active);
    }

    #[test]
    fn test_timeout_round_noop_when_finished() {
        let (mut room, _) = started_room(&["cat"], 1);
        room.reconcile(Duration::ZERO);
        assert_eq!(room.status, RoomStatus::Finished);
        let before = room.clone();

        room.timeout_round(0, Duration::ZERO);

        assert_eq!(room.updated_at, before.updated_at);
    }

    // =====================================================================
    // Monotonicity across mixed operations
    // =====================================================================

    #[test]
    fn test_current_round_index_never_decreases() {
        let (mut room, host) = started_room(&["cat", "dog", "egg"], 3);
        let mut last_index = room.current_round_index;

        let prompt = room.rounds[0].prompt.clone();
        room.apply_evaluation(&host.id, &verdict(&prompt)).unwrap();
        assert!(room.current_round_index >= last_index);
        last_index = room.current_round_index;

        room.reconcile(Duration::ZERO);
        assert!(room.current_round_index >= last_index);
        last_index = room.current_round_index;

        room.start(&host.id).unwrap();
        assert!(room.current_round_index >= last_index);
    }

    // =====================================================================
    // to_public()
    // =====================================================================

    #[test]
    fn test_to_public_is_a_detached_copy() {
        let (mut room, host) = started_room(&["cat"], 1);
        let snapshot = room.to_public();

        let prompt = room.rounds[0].prompt.clone();
        room.apply_evaluation(&host.id, &verdict(&prompt)).unwrap();

        // The snapshot taken before the win must not have changed.
        assert_eq!(snapshot.status, RoomStatus::InRound);
        assert_eq!(snapshot.rounds[0].status, RoundStatus::Active);
        assert_eq!(snapshot.players[0].score, 0);
    }

    #[test]
    fn test_token_generation_shape() {
        let token = generate_token(4);
        assert_eq!(token.len(), 8);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
