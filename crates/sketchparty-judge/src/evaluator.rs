//! The [`Evaluator`] trait — the seam between the game core and whatever
//! AI provider judges the drawings.
//!
//! sketchparty doesn't bake in a provider. Instead it defines a single
//! async contract: take a drawing snapshot and a candidate list, return a
//! verdict. You implement this trait with your provider of choice (a
//! Gemini vision call in production, [`MockEvaluator`](crate::MockEvaluator)
//! in development), and the request layer calls it through
//! [`evaluate_drawing`] before ever touching room state.
//!
//! # Why a trait?
//!
//! The same reasons the room core is provider-agnostic:
//! - Production uses a real vision model over the network
//! - Development runs without any API key
//! - Tests inject deterministic or deliberately-failing judges
//!
//! All without the state machine knowing the difference.

use sketchparty_protocol::{DrawingEvaluation, EvaluationProvider};

use crate::JudgeError;

/// Judges a drawing snapshot against a fixed candidate list.
///
/// # Trait bounds
///
/// - `Send + Sync` — the evaluator is shared across request tasks.
/// - `'static` — it lives as long as the process, not borrowed data.
pub trait Evaluator: Send + Sync + 'static {
    /// Produces a verdict for the given drawing.
    ///
    /// # Arguments
    /// - `image_data_url` — the drawing snapshot as a
    ///   `data:<mime>;base64,<payload>` URL
    /// - `choices` — the round's candidate universe; a well-behaved
    ///   verdict's `guess` is always one of these
    ///
    /// # Errors
    /// Any [`JudgeError`]: misconfiguration, a bad image, or output the
    /// [`verdict`](crate::verdict) module could not validate.
    fn evaluate(
        &self,
        image_data_url: &str,
        choices: &[String],
    ) -> impl std::future::Future<Output = Result<DrawingEvaluation, JudgeError>> + Send;

    /// Checks that the provider is usable before a game starts.
    ///
    /// Called by the request layer on game start so a room full of players
    /// doesn't discover a missing API key one round in. The default
    /// implementation accepts — local judges have nothing to validate.
    fn validate(
        &self,
    ) -> impl std::future::Future<Output = Result<(), JudgeError>> + Send {
        async { Ok(()) }
    }
}

/// The placeholder verdict substituted when a provider fails.
///
/// The empty guess can never equal a non-empty trimmed prompt, so an
/// absorbed failure can never score a round.
pub fn fallback_evaluation() -> DrawingEvaluation {
    DrawingEvaluation {
        guess: String::new(),
        confidence: 0.0,
        provider: EvaluationProvider::Mock,
        reason: Some("evaluator-failure".to_string()),
    }
}

/// Obtains a verdict, absorbing every provider failure.
///
/// This is the entry point the request layer uses. Whatever goes wrong
/// below — network, timeout, malformed model output, an out-of-choices
/// guess — the caller receives a well-formed, non-matching verdict and
/// the failure is logged. The room state machine never needs to
/// special-case provider outages.
pub async fn evaluate_drawing<E: Evaluator>(
    evaluator: &E,
    image_data_url: &str,
    choices: &[String],
) -> DrawingEvaluation {
    match evaluator.evaluate(image_data_url, choices).await {
        Ok(evaluation) => evaluation,
        Err(error) => {
            tracing::warn!(%error, "evaluator failed, substituting non-match");
            fallback_evaluation()
        }
    }
}

// =========================================================================
// Tests
// =========================================================================
