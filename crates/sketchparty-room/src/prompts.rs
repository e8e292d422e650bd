//! Prompt selection: building a room's round sequence from a prompt pool.

use rand::seq::SliceRandom;

use sketchparty_protocol::{GameRound, RoundStatus};

use crate::config::DEFAULT_PROMPTS;

/// Builds the ordered round sequence for a room.
///
/// The pool is shuffled once (unbiased Fisher–Yates, via `rand`). When it
/// holds at least `target_count` prompts, the first `target_count` are
/// taken with no repeats; a smaller pool is cycled by index modulo pool
/// length, so every round gets a prompt and repeats are expected. That
/// wraparound is policy, not a defect — small custom pools are allowed.
///
/// Every round's `choices` is an independent fresh shuffle of the *full*
/// pool: the judge always sees the complete candidate universe, however
/// few rounds were selected. An empty input pool falls back to
/// [`DEFAULT_PROMPTS`].
pub fn build_rounds(pool: &[String], target_count: usize) -> Vec<GameRound> {
    let base: Vec<String> = if pool.is_empty() {
        DEFAULT_PROMPTS.iter().map(|p| p.to_string()).collect()
    } else {
        pool.to_vec()
    };

    select_round_prompts(&base, target_count)
        .into_iter()
        .enumerate()
        .map(|(index, prompt)| GameRound {
            index,
            prompt,
            choices: shuffled(&base),
            status: RoundStatus::Pending,
            started_at: None,
            ended_at: None,
            winner_player_id: None,
            winning_guess: None,
            winning_confidence: None,
        })
        .collect()
}

/// Picks `target_count` prompts from a shuffled copy of the pool,
/// wrapping around when the pool is smaller than the target.
fn select_round_prompts(pool: &[String], target_count: usize) -> Vec<String> {
    let shuffled = shuffled(pool);
    if shuffled.len() >= target_count {
        return shuffled[..target_count].to_vec();
    }
    (0..target_count)
        .map(|i| shuffled[i % shuffled.len()].clone())
        .collect()
}

fn shuffled(pool: &[String]) -> Vec<String> {
    let mut next = pool.to_vec();
    next.shuffle(&mut rand::rng());
    next
}

// =========================================================================
// Tests
// =========================================================================
