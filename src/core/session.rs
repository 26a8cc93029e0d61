use alloc::vec::Vec;
use rand::Rng;

use crate::core::{
    common::{GameError, GuessResult, StateError},
    config::{AttemptLimit, GameConfig, MAX_HINTS},
    hint::{generate_hint, HintResponse},
    history::{HistoryEntry, PlayerRecord},
    score::score_for,
};

/// One submitted guess. Never modified after it is appended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct GuessRecord {
    pub attempt_number: u32,
    pub value: i64,
    pub result: GuessResult,
}

/// Current status of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum GameStatus {
    Active,
    Won,
    Lost,
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::Active)
    }
}

/// Outcome of [`GameSession::submit_guess`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct GuessReport {
    pub result: GuessResult,
    pub attempts_used: u32,
    /// `None` when attempts are unlimited.
    pub attempts_remaining: Option<u32>,
    pub status: GameStatus,
    /// Set once the game ended; zero for a loss.
    pub score: Option<u32>,
    pub elapsed_seconds: Option<f64>,
    /// Revealed once the game ended.
    pub target: Option<i64>,
    /// Whether this win raised the high score.
    pub new_high_score: bool,
}

impl GuessReport {
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}

/// Coarse share of attempts left, for colouring progress displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum AttemptBand {
    /// More than 60% left.
    Plenty,
    /// More than 30% left.
    Some,
    Few,
}

impl AttemptBand {
    pub fn classify(remaining: u32, max: u32) -> Self {
        let (remaining, max) = (remaining as u64 * 10, max as u64);
        if remaining > max * 6 {
            AttemptBand::Plenty
        } else if remaining > max * 3 {
            AttemptBand::Some
        } else {
            AttemptBand::Few
        }
    }
}

/// Read-only summary of a session for progress displays.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionProgress {
    pub min_range: i64,
    pub max_range: i64,
    pub attempts: u32,
    pub attempts_remaining: Option<u32>,
    pub band: Option<AttemptBand>,
    pub hints_used: u32,
    pub hints_remaining: u32,
    pub elapsed_seconds: f64,
    pub status: GameStatus,
}

/// State machine for one play-through.
///
/// Times are unix seconds supplied by the caller, so the session never
/// reads a clock itself.
#[derive(Debug, Clone)]
pub struct GameSession {
    config: GameConfig,
    target: i64,
    attempts: u32,
    hints_used: u32,
    guesses: Vec<GuessRecord>,
    start_time: f64,
    end_time: Option<f64>,
    status: GameStatus,
}

impl GameSession {
    /// Start a game with a target drawn uniformly from the configured range.
    pub fn start<R: Rng + ?Sized>(config: GameConfig, rng: &mut R, now: f64) -> Self {
        let target = rng.random_range(config.min_range()..=config.max_range());
        log::trace!("session target drawn: {}", target);
        Self::new(config, target, now)
    }

    /// Start a game with a known target, e.g. to replay a recorded game.
    pub fn with_target(config: GameConfig, target: i64, now: f64) -> Result<Self, GameError> {
        if !config.contains(target) {
            return Err(GameError::InvalidInput {
                value: target,
                min: config.min_range(),
                max: config.max_range(),
            });
        }
        Ok(Self::new(config, target, now))
    }

    fn new(config: GameConfig, target: i64, now: f64) -> Self {
        Self {
            config,
            target,
            attempts: 0,
            hints_used: 0,
            guesses: Vec::new(),
            start_time: now,
            end_time: None,
            status: GameStatus::Active,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn hints_used(&self) -> u32 {
        self.hints_used
    }

    pub fn guesses(&self) -> &[GuessRecord] {
        &self.guesses
    }

    pub fn start_time(&self) -> f64 {
        self.start_time
    }

    /// Seconds played so far, frozen once the game ends.
    pub fn elapsed(&self, now: f64) -> f64 {
        (self.end_time.unwrap_or(now) - self.start_time).max(0.0)
    }

    /// The target, only once the game has ended.
    pub fn revealed_target(&self) -> Option<i64> {
        self.status.is_terminal().then_some(self.target)
    }

    fn ensure_active(&self) -> Result<(), GameError> {
        if self.status.is_terminal() {
            return Err(GameError::InvalidState(StateError::SessionFinished));
        }
        Ok(())
    }

    /// Submit a guess. On a win or loss the finished game is written to
    /// `record`; rejected guesses leave everything untouched.
    pub fn submit_guess(
        &mut self,
        value: i64,
        now: f64,
        record: &mut PlayerRecord,
    ) -> Result<GuessReport, GameError> {
        self.ensure_active()?;
        if !self.config.contains(value) {
            return Err(GameError::InvalidInput {
                value,
                min: self.config.min_range(),
                max: self.config.max_range(),
            });
        }

        self.attempts += 1;
        let result = GuessResult::classify(value, self.target);
        self.guesses.push(GuessRecord {
            attempt_number: self.attempts,
            value,
            result,
        });
        debug_assert_eq!(self.guesses.len(), self.attempts as usize);

        let mut report = GuessReport {
            result,
            attempts_used: self.attempts,
            attempts_remaining: self.config.max_attempts().remaining(self.attempts),
            status: GameStatus::Active,
            score: None,
            elapsed_seconds: None,
            target: None,
            new_high_score: false,
        };

        if result == GuessResult::Correct {
            let elapsed = self.finish(GameStatus::Won, now);
            let score = score_for(&self.config, self.attempts, elapsed, self.hints_used);
            report.new_high_score = record.record_win(self.history_entry(score, elapsed, now));
            report.score = Some(score);
            report.elapsed_seconds = Some(elapsed);
        } else if self.config.max_attempts().is_exhausted(self.attempts) {
            let elapsed = self.finish(GameStatus::Lost, now);
            record.record_loss(self.history_entry(0, elapsed, now));
            report.score = Some(0);
            report.elapsed_seconds = Some(elapsed);
        }
        report.status = self.status;
        report.target = self.revealed_target();
        Ok(report)
    }

    /// Consume the next hint. A fourth request reports
    /// [`HintResponse::Exhausted`] without using anything up.
    pub fn request_hint<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<HintResponse, GameError> {
        self.ensure_active()?;
        if self.hints_used >= MAX_HINTS {
            return Ok(HintResponse::Exhausted);
        }
        self.hints_used += 1;
        let index = self.hints_used;
        match generate_hint(
            self.target,
            self.config.min_range(),
            self.config.max_range(),
            index,
            rng,
        ) {
            Some(hint) => Ok(HintResponse::Hint { index, hint }),
            None => unreachable!("hint index {} outside 1..={}", index, MAX_HINTS),
        }
    }

    pub fn progress(&self, now: f64) -> SessionProgress {
        let remaining = self.config.max_attempts().remaining(self.attempts);
        let band = match (remaining, self.config.max_attempts()) {
            (Some(left), AttemptLimit::Bounded(max)) => {
                Some(AttemptBand::classify(left, max))
            }
            _ => None,
        };
        SessionProgress {
            min_range: self.config.min_range(),
            max_range: self.config.max_range(),
            attempts: self.attempts,
            attempts_remaining: remaining,
            band,
            hints_used: self.hints_used,
            hints_remaining: MAX_HINTS - self.hints_used,
            elapsed_seconds: self.elapsed(now),
            status: self.status,
        }
    }

    fn finish(&mut self, status: GameStatus, now: f64) -> f64 {
        self.status = status;
        self.end_time = Some(now.max(self.start_time));
        self.elapsed(now)
    }

    fn history_entry(&self, score: u32, elapsed: f64, now: f64) -> HistoryEntry {
        let timestamp = if now > 0.0 { libm::floor(now) as u64 } else { 0 };
        HistoryEntry::new(
            &self.config,
            self.target,
            &self.guesses,
            self.hints_used,
            score,
            elapsed,
            timestamp,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{resolve_config, Difficulty};
    use crate::core::hint::Hint;
    use rand::{rngs::SmallRng, SeedableRng};

    fn medium_session(target: i64) -> GameSession {
        let config = resolve_config(1, 100, Difficulty::Medium).unwrap();
        GameSession::with_target(config, target, 1_000.0).unwrap()
    }

    #[test]
    fn reference_game_scores_690() {
        let mut session = medium_session(42);
        let mut record = PlayerRecord::new();
        let expected = [
            (50, GuessResult::TooHigh),
            (25, GuessResult::TooLow),
            (40, GuessResult::TooLow),
            (45, GuessResult::TooHigh),
        ];
        for (value, result) in expected {
            let report = session.submit_guess(value, 1_005.0, &mut record).unwrap();
            assert_eq!(report.result, result);
            assert!(!report.is_terminal());
            assert_eq!(report.score, None);
        }
        let report = session.submit_guess(42, 1_010.0, &mut record).unwrap();
        assert_eq!(report.result, GuessResult::Correct);
        assert_eq!(report.status, GameStatus::Won);
        assert_eq!(report.attempts_used, 5);
        assert_eq!(report.attempts_remaining, Some(15));
        assert_eq!(report.score, Some(690));
        assert_eq!(report.elapsed_seconds, Some(10.0));
        assert_eq!(report.target, Some(42));
        assert!(report.new_high_score);
        assert_eq!(record.high_score(), Some(690));
        assert_eq!(record.history().len(), 1);
        assert_eq!(record.history().all()[0].guesses.len(), 5);
    }

    #[test]
    fn expert_loss_after_cap() {
        let config = resolve_config(1, 50, Difficulty::Expert).unwrap();
        assert_eq!(config.max_attempts(), AttemptLimit::Bounded(2));
        let mut session = GameSession::with_target(config, 20, 0.0).unwrap();
        let mut record = PlayerRecord::new();

        let first = session.submit_guess(10, 1.0, &mut record).unwrap();
        assert_eq!(first.status, GameStatus::Active);
        assert_eq!(first.attempts_remaining, Some(1));

        let second = session.submit_guess(30, 2.0, &mut record).unwrap();
        assert_eq!(second.status, GameStatus::Lost);
        assert_eq!(second.score, Some(0));
        assert_eq!(second.target, Some(20));
        assert_eq!(record.history().len(), 1);
        assert_eq!(record.history().all()[0].score, 0);
        assert_eq!(record.high_score(), None);
    }

    #[test]
    fn rejected_guesses_have_no_effect() {
        let mut session = medium_session(42);
        let mut record = PlayerRecord::new();
        assert_eq!(
            session.submit_guess(101, 0.0, &mut record),
            Err(GameError::InvalidInput { value: 101, min: 1, max: 100 })
        );
        assert_eq!(session.attempts(), 0);
        assert!(session.guesses().is_empty());

        session.submit_guess(42, 1_001.0, &mut record).unwrap();
        assert_eq!(
            session.submit_guess(42, 1_002.0, &mut record),
            Err(GameError::InvalidState(StateError::SessionFinished))
        );
        assert_eq!(session.attempts(), 1);
        assert_eq!(record.history().len(), 1);
    }

    #[test]
    fn hints_run_out_after_three() {
        let mut session = medium_session(42);
        let mut rng = SmallRng::seed_from_u64(1);
        assert_eq!(
            session.request_hint(&mut rng),
            Ok(HintResponse::Hint { index: 1, hint: Hint::Parity(crate::core::hint::Parity::Even) })
        );
        assert_eq!(
            session.request_hint(&mut rng),
            Ok(HintResponse::Hint { index: 2, hint: Hint::DivisibleBy(3) })
        );
        assert!(matches!(
            session.request_hint(&mut rng),
            Ok(HintResponse::Hint { index: 3, hint: Hint::Bracket { .. } })
        ));
        assert_eq!(session.request_hint(&mut rng), Ok(HintResponse::Exhausted));
        assert_eq!(session.hints_used(), 3);
    }

    #[test]
    fn hints_refused_after_game_ends() {
        let mut session = medium_session(42);
        let mut record = PlayerRecord::new();
        let mut rng = SmallRng::seed_from_u64(1);
        session.submit_guess(42, 1_000.0, &mut record).unwrap();
        assert_eq!(
            session.request_hint(&mut rng),
            Err(GameError::InvalidState(StateError::SessionFinished))
        );
        assert_eq!(session.hints_used(), 0);
    }

    #[test]
    fn hints_lower_the_score() {
        let mut session = medium_session(42);
        let mut record = PlayerRecord::new();
        let mut rng = SmallRng::seed_from_u64(1);
        session.request_hint(&mut rng).unwrap();
        let report = session.submit_guess(42, 1_000.0, &mut record).unwrap();
        // 990 - 50 - 1 * 2 * 25
        assert_eq!(report.score, Some(890));
        assert_eq!(record.history().all()[0].hints_used, 1);
    }

    #[test]
    fn progress_bands() {
        let config = resolve_config(1, 100, Difficulty::Hard).unwrap();
        let mut session = GameSession::with_target(config, 99, 0.0).unwrap();
        let mut record = PlayerRecord::new();
        assert_eq!(session.progress(0.0).band, Some(AttemptBand::Plenty));
        for value in 1..=4 {
            session.submit_guess(value, 1.0, &mut record).unwrap();
        }
        assert_eq!(session.progress(2.0).band, Some(AttemptBand::Some));
        for value in 5..=7 {
            session.submit_guess(value, 3.0, &mut record).unwrap();
        }
        let progress = session.progress(4.0);
        assert_eq!(progress.band, Some(AttemptBand::Few));
        assert_eq!(progress.attempts_remaining, Some(3));
        assert_eq!(progress.elapsed_seconds, 4.0);
    }

    #[test]
    fn elapsed_freezes_at_end() {
        let mut session = medium_session(42);
        let mut record = PlayerRecord::new();
        session.submit_guess(42, 1_030.0, &mut record).unwrap();
        assert_eq!(session.elapsed(5_000.0), 30.0);
    }

    #[test]
    fn with_target_outside_range() {
        let config = resolve_config(1, 10, Difficulty::Easy).unwrap();
        assert!(GameSession::with_target(config, 11, 0.0).is_err());
    }
}
