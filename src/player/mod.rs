//! Player trait and implementations
//!
//! This module defines the Player trait and provides concrete implementations:
//! - BotPlayer: bisecting guesser that can spend hints first
//! - CliPlayer: Interactive command-line player
//! - PlayerNode: Orchestrator combining a Player with a GameApi

use rand::rngs::SmallRng;

use crate::core::{GameConfig, GameError, GuessReport, HintResponse, SessionProgress};

/// What a player wants to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    Guess(i64),
    Hint,
    /// Ask how the game stands without spending an attempt.
    Progress,
    /// Abandon the game; nothing is recorded.
    Quit,
}

/// Interface implemented by different player types.
///
/// A Player is responsible for:
/// - Choosing guesses or asking for hints
/// - Handling feedback from the game
pub trait Player: Send {
    /// Called once before the first move of a game.
    fn begin(&mut self, _config: &GameConfig) {}

    /// Choose the next move.
    fn next_move(&mut self, rng: &mut SmallRng) -> Move;

    /// Inform the player of the result of its last guess.
    fn observe_guess(&mut self, _value: i64, _report: &GuessReport) {}

    /// Inform the player of the answer to a hint request.
    fn observe_hint(&mut self, _response: &HintResponse) {}

    fn observe_progress(&mut self, _progress: &SessionProgress) {}

    /// Inform the player that its last move was rejected.
    fn observe_error(&mut self, _error: &GameError) {}
}

pub mod bot;
pub use bot::{BotPlayer, Strategy};

pub mod cli;
pub use cli::CliPlayer;

pub mod node;
pub use node::PlayerNode;
