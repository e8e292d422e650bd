//! Room and round session state machine for sketchparty.
//!
//! This crate coordinates one drawing-and-guessing game per room: who is
//! in it, which round is active, when a round expires, and who scored.
//! Each room runs as an isolated Tokio task (actor model) owning its
//! [`GameRoom`]; the [`RoomRegistry`] creates rooms and routes every
//! operation through their command channels.
//!
//! # Key types
//!
//! - [`RoomRegistry`] — creates rooms, routes operations; the single
//!   mutation point
//! - [`RoomHandle`] — send commands to a running room actor
//! - [`GameRoom`] — the session aggregate and its transition rules
//! - [`RoomConfig`] — player limits, round time limit, round-count bounds
//! - [`RoomError`] — tagged failures, zero partial mutation
//!
//! # No background timers
//!
//! Round expiry is reconciled lazily on every operation that touches a
//! room (see [`GameRoom::reconcile`]); the registry exposes
//! [`timeout_round`](RoomRegistry::timeout_round) as a caller-triggered
//! nudge for polling clients. An implementation with real per-room
//! timers could upgrade this without changing the API contract.

mod config;
mod error;
mod game;
mod prompts;
mod registry;
mod room;

pub use config::{DEFAULT_PROMPTS, RoomConfig};
pub use error::RoomError;
pub use game::{CreateRoomOptions, GameRoom};
pub use prompts::build_rounds;
pub use registry::RoomRegistry;
pub use room::RoomHandle;
