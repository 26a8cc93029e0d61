//! Append-only record of finished games and the player's high score.

use alloc::vec::Vec;

use crate::core::{
    config::{AttemptLimit, Difficulty, GameConfig},
    session::GuessRecord,
};

/// Immutable snapshot of one finished game.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct HistoryEntry {
    pub min_range: i64,
    pub max_range: i64,
    pub difficulty: Difficulty,
    pub max_attempts: AttemptLimit,
    pub hint_penalty_rate: u32,
    pub attempts: u32,
    /// Zero for lost games.
    pub score: u32,
    pub elapsed_seconds: f64,
    pub hints_used: u32,
    pub target: i64,
    /// Unix seconds at which the game ended.
    pub timestamp: u64,
    pub guesses: Vec<GuessRecord>,
}

impl HistoryEntry {
    pub(crate) fn new(
        config: &GameConfig,
        target: i64,
        guesses: &[GuessRecord],
        hints_used: u32,
        score: u32,
        elapsed_seconds: f64,
        timestamp: u64,
    ) -> Self {
        Self {
            min_range: config.min_range(),
            max_range: config.max_range(),
            difficulty: config.difficulty(),
            max_attempts: config.max_attempts(),
            hint_penalty_rate: config.hint_penalty_rate(),
            attempts: guesses.len() as u32,
            score,
            elapsed_seconds,
            hints_used,
            target,
            timestamp,
            guesses: guesses.to_vec(),
        }
    }

    /// A game counts as won when it scored.
    pub fn is_win(&self) -> bool {
        self.score > 0
    }
}

/// Which entries a history view keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HistoryFilter {
    #[default]
    All,
    Difficulty(Difficulty),
}

/// Ordering of a history view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HistoryOrder {
    #[default]
    MostRecent,
    HighestScore,
    FewestAttempts,
}

/// Ordered log of finished games, oldest first.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct HistoryStore {
    entries: Vec<HistoryEntry>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }

    pub fn all(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    /// Filtered, sorted view for display. Ties keep the most recent game first.
    pub fn view(&self, filter: HistoryFilter, order: HistoryOrder) -> Vec<&HistoryEntry> {
        let mut view: Vec<&HistoryEntry> = self
            .entries
            .iter()
            .rev()
            .filter(|e| match filter {
                HistoryFilter::All => true,
                HistoryFilter::Difficulty(d) => e.difficulty == d,
            })
            .collect();
        match order {
            HistoryOrder::MostRecent => {}
            HistoryOrder::HighestScore => view.sort_by(|a, b| b.score.cmp(&a.score)),
            HistoryOrder::FewestAttempts => view.sort_by_key(|e| e.attempts),
        }
        view
    }
}

impl FromIterator<HistoryEntry> for HistoryStore {
    fn from_iter<I: IntoIterator<Item = HistoryEntry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Best score of any won game; `None` until the first win.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct HighScore(Option<u32>);

impl HighScore {
    pub fn get(&self) -> Option<u32> {
        self.0
    }

    /// Raise the high score to `score` if it beats the current one. Returns
    /// `true` when it changed.
    pub fn offer(&mut self, score: u32) -> bool {
        match self.0 {
            Some(current) if current >= score => false,
            _ => {
                self.0 = Some(score);
                true
            }
        }
    }
}

/// Everything a player keeps across games: the history log and high score.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerRecord {
    history: HistoryStore,
    high_score: HighScore,
}

impl PlayerRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn high_score(&self) -> Option<u32> {
        self.high_score.get()
    }

    pub(crate) fn record_win(&mut self, entry: HistoryEntry) -> bool {
        let improved = self.high_score.offer(entry.score);
        self.history.append(entry);
        improved
    }

    pub(crate) fn record_loss(&mut self, entry: HistoryEntry) {
        self.history.append(entry);
    }
}
