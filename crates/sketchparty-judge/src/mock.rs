//! A local random judge for development and tests.

use rand::Rng;
use rand::seq::IndexedRandom;

use sketchparty_protocol::{DrawingEvaluation, EvaluationProvider};

use crate::{Evaluator, JudgeError};

/// A judge that never looks at the drawing: it picks a uniformly random
/// candidate with a made-up confidence.
///
/// Useful for development without an API key, and as the stand-in judge
/// in tests that only care about the scoring protocol, not image
/// understanding.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockEvaluator;

impl Evaluator for MockEvaluator {
    fn evaluate(
        &self,
        _image_data_url: &str,
        choices: &[String],
    ) -> impl std::future::Future<Output = Result<DrawingEvaluation, JudgeError>> + Send
    {
        // The verdict is computed before the future so the returned
        // future stays Send (ThreadRng is thread-local).
        let verdict = random_verdict(choices);
        async move { verdict }
    }
}

fn random_verdict(
    choices: &[String],
) -> Result<DrawingEvaluation, JudgeError> {
    let mut rng = rand::rng();

    let guess = choices
        .choose(&mut rng)
        .ok_or(JudgeError::EmptyChoices)?
        .clone();

    // Confidence in [0.2, 0.9], two decimals — plausible-looking without
    // ever claiming certainty.
    let confidence: f64 = 0.2 + rng.random::<f64>() * 0.7;
    let confidence = (confidence * 100.0).round() / 100.0;

    Ok(DrawingEvaluation {
        guess,
        confidence,
        provider: EvaluationProvider::Mock,
        reason: Some("mock-evaluation".to_string()),
    })
}

// =========================================================================
// Tests
// =========================================================================
