//! Common types for Number Master: guess classification and game errors.

/// Classification of a guess against the hidden target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum GuessResult {
    /// Guess was below the target.
    TooLow,
    /// Guess was above the target.
    TooHigh,
    /// Guess matched the target.
    Correct,
}

impl GuessResult {
    /// Compare `value` against `target`.
    pub fn classify(value: i64, target: i64) -> Self {
        match value.cmp(&target) {
            core::cmp::Ordering::Less => GuessResult::TooLow,
            core::cmp::Ordering::Greater => GuessResult::TooHigh,
            core::cmp::Ordering::Equal => GuessResult::Correct,
        }
    }
}

impl core::fmt::Display for GuessResult {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            GuessResult::TooLow => write!(f, "too low"),
            GuessResult::TooHigh => write!(f, "too high"),
            GuessResult::Correct => write!(f, "correct"),
        }
    }
}

/// Why an operation was refused for the session it targeted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum StateError {
    /// The session already ended in a win or a loss.
    SessionFinished,
    /// No session is registered under this id.
    UnknownSession(u64),
}

/// Errors returned by game operations. None of them alter state.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum GameError {
    /// Range rejected before any session exists.
    InvalidRange { min: i64, max: i64 },
    /// Guess lies outside the configured range.
    InvalidInput { value: i64, min: i64, max: i64 },
    /// Operation attempted on a finished or missing session.
    InvalidState(StateError),
    /// Statistics requested over an empty history.
    NoData,
}

impl core::fmt::Display for GameError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            GameError::InvalidRange { min, max } => write!(
                f,
                "Invalid range {}..={}: minimum must be less than maximum and both within {}..={}",
                min,
                max,
                crate::core::config::MIN_VALUE,
                crate::core::config::MAX_VALUE
            ),
            GameError::InvalidInput { value, min, max } => {
                write!(f, "Guess {} is outside the range {}..={}", value, min, max)
            }
            GameError::InvalidState(StateError::SessionFinished) => {
                write!(f, "The game is over; start a new game to keep playing")
            }
            GameError::InvalidState(StateError::UnknownSession(id)) => {
                write!(f, "No game session with id {}", id)
            }
            GameError::NoData => write!(f, "No games played yet"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for GameError {}
