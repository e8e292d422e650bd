//! The AI judge for sketchparty.
//!
//! Each round, players draw and an external judge looks at a drawing
//! snapshot and picks the candidate it believes the drawing depicts. This
//! crate defines that boundary:
//!
//! 1. **The contract** — the [`Evaluator`] trait: one async method from
//!    `(image, choices)` to a verdict. The game core never knows which
//!    provider is behind it.
//! 2. **Failure absorption** — [`evaluate_drawing`] wraps any provider
//!    failure into a non-matching placeholder verdict, so the room state
//!    machine only ever sees a well-formed verdict (or no call at all).
//! 3. **A local judge** — [`MockEvaluator`], a random guesser for
//!    development, tests, and games without a configured provider.
//! 4. **Output handling** — the [`verdict`] module: parsing and
//!    validating the loosely-structured text a vision model returns.
//!
//! # How it fits in the stack
//!
//! ```text
//! Request layer (above)   ← captures the drawing, calls evaluate_drawing
//!     ↕
//! Judge layer (this crate)  ← turns provider output into a clean verdict
//!     ↕
//! Room layer (below)  ← matches the verdict against the secret prompt
//! ```
//!
//! The evaluator is always invoked *before* the room layer is touched —
//! no provider I/O ever happens inside a room's critical section.

mod error;
mod evaluator;
mod mock;
pub mod verdict;

pub use error::JudgeError;
pub use evaluator::{Evaluator, evaluate_drawing, fallback_evaluation};
pub use mock::MockEvaluator;
