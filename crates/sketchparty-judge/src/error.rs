//! Error types for the judge layer.

/// Errors that can occur while obtaining or validating a judge verdict.
///
/// None of these ever reach the room state machine: callers either absorb
/// them into a non-matching verdict via
/// [`evaluate_drawing`](crate::evaluate_drawing), or surface them before a
/// game starts (provider validation) so clients can distinguish "the AI is
/// misconfigured" from "the AI guessed wrong, try again".
#[derive(Debug, thiserror::Error)]
pub enum JudgeError {
    /// The candidate list handed to the judge was empty. The room layer
    /// always supplies the full prompt pool, so this indicates a caller bug.
    #[error("candidate choice list is empty")]
    EmptyChoices,

    /// The provider requires an API key and none is configured.
    #[error("evaluator API key is not configured")]
    MissingApiKey,

    /// The drawing snapshot was not a parseable data URL.
    #[error("invalid drawing image: {0}")]
    InvalidImage(String),

    /// The provider returned no usable text at all.
    #[error("evaluator returned an empty response")]
    EmptyResponse,

    /// The provider returned text that contains no JSON verdict.
    #[error("evaluator output is not a JSON verdict: {0}")]
    MalformedOutput(String),

    /// The provider guessed something outside the candidate list.
    /// Treated as a non-match by callers — never a scoring event.
    #[error("evaluator guessed outside the candidate list: {0:?}")]
    GuessNotInChoices(String),
}
