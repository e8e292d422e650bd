//! Parsing and validating provider output.
//!
//! Vision models return loosely-structured text: sometimes bare JSON,
//! sometimes a fenced code block, sometimes JSON buried in prose. This
//! module turns that text into a validated [`DrawingEvaluation`] or a
//! precise [`JudgeError`] — the judge contract promises the room layer a
//! well-formed verdict, and this is where that promise is enforced:
//!
//! - the guess must match one of the round's candidates
//!   (case-insensitively, after trimming) and is canonicalized to the
//!   candidate's exact spelling
//! - the confidence is clamped to `[0, 1]`, with a conservative default
//!   when the model produced something that isn't a number
//!
//! Provider HTTP clients live outside this crate; they feed their raw
//! response text through [`parse_verdict`].

use serde_json::{Map, Value};

use sketchparty_protocol::{DrawingEvaluation, EvaluationProvider};

use crate::JudgeError;

/// Confidence used when the model's confidence field is missing or not
/// a number.
const DEFAULT_CONFIDENCE: f64 = 0.3;

/// Splits a `data:<mime>;base64,<payload>` URL into its mime type and
/// base64 payload.
///
/// # Errors
/// [`JudgeError::InvalidImage`] when the scheme, separator, or either
/// component is missing.
pub fn parse_data_url(data_url: &str) -> Result<(String, String), JudgeError> {
    let rest = data_url.strip_prefix("data:").ok_or_else(|| {
        JudgeError::InvalidImage("missing data: scheme".to_string())
    })?;
    let (mime, payload) = rest.split_once(";base64,").ok_or_else(|| {
        JudgeError::InvalidImage("missing base64 payload".to_string())
    })?;
    if mime.is_empty() || payload.is_empty() {
        return Err(JudgeError::InvalidImage(
            "empty mime type or payload".to_string(),
        ));
    }
    Ok((mime.to_string(), payload.to_string()))
}

/// Pulls a JSON object out of model output text.
///
/// Tries, in order: the whole text as JSON, the first fenced code block
/// (with an optional `json` tag), and finally the outermost `{ ... }`
/// slice. Models drift between these formats; accepting all three keeps
/// a working provider working.
///
/// # Errors
/// - [`JudgeError::EmptyResponse`] when the text is blank
/// - [`JudgeError::MalformedOutput`] when no strategy yields an object
pub fn extract_json_object(
    text: &str,
) -> Result<Map<String, Value>, JudgeError> {
    if text.trim().is_empty() {
        return Err(JudgeError::EmptyResponse);
    }

    if let Some(object) = try_parse_object(text) {
        return Ok(object);
    }

    if let Some(block) = fenced_block(text) {
        if let Some(object) = try_parse_object(block) {
            return Ok(object);
        }
    }

    if let (Some(first), Some(last)) = (text.find('{'), text.rfind('}')) {
        if last > first {
            if let Some(object) = try_parse_object(&text[first..=last]) {
                return Ok(object);
            }
        }
    }

    Err(JudgeError::MalformedOutput(preview(text)))
}

/// Validates model output into a verdict for the given candidate list.
///
/// The guess is matched against `choices` case-insensitively after
/// trimming, and canonicalized to the candidate's exact spelling so the
/// scoring engine compares like with like.
///
/// # Errors
/// - [`JudgeError::EmptyChoices`] — nothing to guess from
/// - any [`extract_json_object`] error
/// - [`JudgeError::GuessNotInChoices`] — the model ignored the candidate
///   list; callers treat this as a non-match, never a score
pub fn parse_verdict(
    text: &str,
    choices: &[String],
    provider: EvaluationProvider,
) -> Result<DrawingEvaluation, JudgeError> {
    if choices.is_empty() {
        return Err(JudgeError::EmptyChoices);
    }

    let object = extract_json_object(text)?;

    let guess_raw = object
        .get("guess")
        .and_then(Value::as_str)
        .unwrap_or("")
        .trim();
    let reason = object
        .get("reason")
        .and_then(Value::as_str)
        .map(str::to_string);

    let guess = choices
        .iter()
        .find(|choice| normalize(choice) == normalize(guess_raw))
        .cloned()
        .ok_or_else(|| JudgeError::GuessNotInChoices(guess_raw.to_string()))?;

    let confidence = match object.get("confidence").and_then(as_number) {
        Some(value) if value.is_finite() => value.clamp(0.0, 1.0),
        _ => DEFAULT_CONFIDENCE,
    };
    let confidence = (confidence * 100.0).round() / 100.0;

    Ok(DrawingEvaluation {
        guess,
        confidence,
        provider,
        reason,
    })
}

fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Accepts a JSON number or a numeric string — models emit both.
fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

fn try_parse_object(text: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str::<Value>(text.trim()) {
        Ok(Value::Object(object)) => Some(object),
        _ => None,
    }
}

/// Returns the contents of the first ``` fenced block, if any.
fn fenced_block(text: &str) -> Option<&str> {
    let start = text.find("```")? + 3;
    let rest = &text[start..];
    let rest = match rest.get(..4) {
        Some(tag) if tag.eq_ignore_ascii_case("json") => &rest[4..],
        _ => rest,
    };
    let rest = rest.trim_start();
    let end = rest.find("```")?;
    Some(&rest[..end])
}

/// A short, char-boundary-safe slice of the offending text for error
/// messages.
fn preview(text: &str) -> String {
    text.chars().take(120).collect()
}

// =========================================================================
// Tests
// =========================================================================
