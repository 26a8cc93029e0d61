use rand::{rngs::SmallRng, Rng};

use crate::core::{GameConfig, GameError, GuessReport, GuessResult, Hint, HintResponse};

use super::{Move, Player};

/// How a [`BotPlayer`] picks inside its remaining interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Always the midpoint.
    Bisect,
    /// Uniformly at random.
    Random,
}

/// Automated player that narrows an interval around the target. It can ask
/// for a number of hints before its first guess and uses the bracket hint to
/// tighten the interval.
pub struct BotPlayer {
    strategy: Strategy,
    hint_budget: u32,
    hints_taken: u32,
    lower: i64,
    upper: i64,
}

impl BotPlayer {
    pub fn new(strategy: Strategy) -> Self {
        Self::with_hints(strategy, 0)
    }

    pub fn with_hints(strategy: Strategy, hint_budget: u32) -> Self {
        Self {
            strategy,
            hint_budget,
            hints_taken: 0,
            lower: i64::MIN,
            upper: i64::MAX,
        }
    }

    /// Interval the bot still considers possible.
    pub fn interval(&self) -> (i64, i64) {
        (self.lower, self.upper)
    }
}

impl Player for BotPlayer {
    fn begin(&mut self, config: &GameConfig) {
        self.hints_taken = 0;
        self.lower = config.min_range();
        self.upper = config.max_range();
    }

    fn next_move(&mut self, rng: &mut SmallRng) -> Move {
        if self.hints_taken < self.hint_budget {
            self.hints_taken += 1;
            return Move::Hint;
        }
        if self.lower > self.upper {
            return Move::Quit;
        }
        let guess = match self.strategy {
            Strategy::Bisect => self.lower + (self.upper - self.lower) / 2,
            Strategy::Random => rng.random_range(self.lower..=self.upper),
        };
        Move::Guess(guess)
    }

    fn observe_guess(&mut self, value: i64, report: &GuessReport) {
        match report.result {
            GuessResult::TooLow => self.lower = self.lower.max(value + 1),
            GuessResult::TooHigh => self.upper = self.upper.min(value - 1),
            GuessResult::Correct => {}
        }
    }

    fn observe_hint(&mut self, response: &HintResponse) {
        match response {
            HintResponse::Hint {
                hint: Hint::Bracket { lower, upper },
                ..
            } => {
                self.lower = self.lower.max(*lower);
                self.upper = self.upper.min(*upper);
            }
            HintResponse::Hint { .. } => {}
            HintResponse::Exhausted => self.hint_budget = self.hints_taken,
        }
    }

    fn observe_error(&mut self, _error: &GameError) {
        // Out of sync with the game; stop spending hints.
        self.hint_budget = self.hints_taken;
    }
}
