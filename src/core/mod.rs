//! Core number-guessing engine (no_std compatible)
//!
//! This module contains the pure game logic: configuration, the session state
//! machine, scoring, hints and history statistics. It needs only `alloc`,
//! rand, libm and num-traits, never reads a clock and never touches global
//! random state; callers pass both in.

pub mod common;
pub mod config;
pub mod hint;
pub mod history;
pub mod score;
pub mod session;
pub mod stats;

// Re-export commonly used types
pub use common::{GameError, GuessResult, StateError};
pub use config::*;
pub use hint::{generate_hint, Hint, HintResponse, Parity};
pub use history::{HighScore, HistoryEntry, HistoryFilter, HistoryOrder, HistoryStore, PlayerRecord};
pub use score::{calculate_score, score_for};
pub use session::{AttemptBand, GameSession, GameStatus, GuessRecord, GuessReport, SessionProgress};
pub use stats::{achievements, compute_stats, moving_average, moving_average_attempts, Achievement, DifficultySummary, Stats};
