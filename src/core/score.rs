//! Score formula for a finished game.

use num_traits::ToPrimitive;

use crate::core::config::GameConfig;

/// Points awarded per 100 units of range width.
pub const BASE_POINTS: f64 = 1000.0;
pub const ATTEMPT_PENALTY: f64 = 50.0;
pub const TIME_PENALTY_PER_SECOND: f64 = 5.0;
/// Multiplied by hints used and the difficulty's hint penalty rate.
pub const HINT_PENALTY_UNIT: f64 = 25.0;

/// Score a game.
///
/// The range factor is `(max_range - min_range) / 100`, without the `+1`
/// used for the range size. The result is floored and never negative;
/// absurdly large inputs saturate instead of wrapping.
pub fn calculate_score(
    attempts: u32,
    min_range: i64,
    max_range: i64,
    elapsed_seconds: f64,
    hints_used: u32,
    hint_penalty_rate: u32,
) -> u32 {
    let base = (max_range - min_range) as f64 * BASE_POINTS / 100.0;
    let attempt_penalty = attempts as f64 * ATTEMPT_PENALTY;
    let time_penalty = elapsed_seconds * TIME_PENALTY_PER_SECOND;
    let hint_penalty = hints_used as f64 * hint_penalty_rate as f64 * HINT_PENALTY_UNIT;

    let raw = base - attempt_penalty - time_penalty - hint_penalty;
    // NaN falls through here too.
    if !(raw > 0.0) {
        return 0;
    }
    libm::floor(raw).to_u32().unwrap_or(u32::MAX)
}

/// [`calculate_score`] with range and penalty rate taken from `config`.
pub fn score_for(config: &GameConfig, attempts: u32, elapsed_seconds: f64, hints_used: u32) -> u32 {
    calculate_score(
        attempts,
        config.min_range(),
        config.max_range(),
        elapsed_seconds,
        hints_used,
        config.hint_penalty_rate(),
    )
}
