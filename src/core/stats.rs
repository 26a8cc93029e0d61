//! Aggregate statistics and achievements over a player's history.
//!
//! Everything here is recomputed on demand from the ordered history.

use alloc::{collections::BTreeMap, vec::Vec};

use crate::core::{
    common::GameError,
    config::{Difficulty, RECENT_WINDOW},
    history::HistoryEntry,
};

/// Games needed before most achievements are evaluated.
pub const ACHIEVEMENT_MIN_GAMES: usize = 3;

/// Named milestone shown to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Achievement {
    /// Played 10 or more games.
    DedicatedPlayer,
    /// Won 5 or more games.
    Winner,
    /// Win rate of at least 70%.
    MasterGuesser,
    /// Some game took 3 or fewer attempts.
    SharpEye,
    /// Scored 500 or more in a single game.
    HighScorer,
    /// Won a game without hints.
    PureSkill,
    /// Placeholder when nothing is unlocked yet.
    KeepPlaying,
}

impl core::fmt::Display for Achievement {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let text = match self {
            Achievement::DedicatedPlayer => "Dedicated Player: Played 10+ games",
            Achievement::Winner => "Winner: Won 5+ games",
            Achievement::MasterGuesser => "Master Guesser: 70%+ win rate",
            Achievement::SharpEye => "Sharp Eye: Guessed correctly in 3 or fewer attempts",
            Achievement::HighScorer => "High Scorer: Scored 500+ points in a single game",
            Achievement::PureSkill => "Pure Skill: Won a game without using hints",
            Achievement::KeepPlaying => "Keep playing to unlock achievements!",
        };
        f.write_str(text)
    }
}

/// Score summary for the games of one difficulty.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct DifficultySummary {
    pub difficulty: Difficulty,
    pub games: usize,
    pub wins: usize,
    pub min_score: u32,
    pub max_score: u32,
    pub mean_score: f64,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Stats {
    pub total_games: usize,
    pub wins: usize,
    /// Percentage in `0.0..=100.0`.
    pub win_rate: f64,
    pub avg_attempts: f64,
    pub min_attempts: u32,
    pub max_attempts: u32,
    pub high_score: u32,
    pub avg_score: f64,
    pub total_points: u64,
    /// Mean score of the last `min(5, total_games)` games.
    pub recent_average: f64,
    pub moving_average_window: usize,
    /// One slot per game; `None` until a full window is available.
    pub moving_average_attempts: Vec<Option<f64>>,
    /// Attempt count mapped to the number of games that took it.
    pub attempts_histogram: BTreeMap<u32, usize>,
    pub by_difficulty: Vec<DifficultySummary>,
    pub achievements: Vec<Achievement>,
}

fn mean<I: IntoIterator<Item = f64>>(values: I) -> f64 {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

/// Trailing rolling mean with leading gaps: slot `i` averages
/// `values[i + 1 - window..=i]` and is `None` while fewer than `window`
/// values are available. A zero window yields all gaps.
pub fn moving_average(values: &[f64], window: usize) -> Vec<Option<f64>> {
    (0..values.len())
        .map(|i| {
            if window == 0 || i + 1 < window {
                None
            } else {
                Some(mean(values[i + 1 - window..=i].iter().copied()))
            }
        })
        .collect()
}

/// Moving average of attempts per game with the given window.
pub fn moving_average_attempts(entries: &[HistoryEntry], window: usize) -> Vec<Option<f64>> {
    let attempts: Vec<f64> = entries.iter().map(|e| e.attempts as f64).collect();
    moving_average(&attempts, window)
}

/// Compute every aggregate over `entries` (oldest first).
pub fn compute_stats(entries: &[HistoryEntry]) -> Result<Stats, GameError> {
    if entries.is_empty() {
        return Err(GameError::NoData);
    }
    let total_games = entries.len();
    let wins = entries.iter().filter(|e| e.is_win()).count();
    let win_rate = wins as f64 / total_games as f64 * 100.0;

    let attempts = entries.iter().map(|e| e.attempts);
    let min_attempts = attempts.clone().min().unwrap_or(0);
    let max_attempts = attempts.clone().max().unwrap_or(0);
    let avg_attempts = mean(attempts.map(f64::from));

    let high_score = entries.iter().map(|e| e.score).max().unwrap_or(0);
    let total_points = entries.iter().map(|e| e.score as u64).sum();
    let avg_score = mean(entries.iter().map(|e| e.score as f64));

    let recent = RECENT_WINDOW.min(total_games);
    let recent_average = mean(entries[total_games - recent..].iter().map(|e| e.score as f64));

    let mut attempts_histogram = BTreeMap::new();
    for e in entries {
        *attempts_histogram.entry(e.attempts).or_insert(0) += 1;
    }

    let mut stats = Stats {
        total_games,
        wins,
        win_rate,
        avg_attempts,
        min_attempts,
        max_attempts,
        high_score,
        avg_score,
        total_points,
        recent_average,
        moving_average_window: recent,
        moving_average_attempts: moving_average_attempts(entries, recent),
        attempts_histogram,
        by_difficulty: by_difficulty(entries),
        achievements: Vec::new(),
    };
    stats.achievements = achievements(&stats, entries);
    Ok(stats)
}

fn by_difficulty(entries: &[HistoryEntry]) -> Vec<DifficultySummary> {
    Difficulty::ALL
        .iter()
        .filter_map(|&difficulty| {
            let scores: Vec<u32> = entries
                .iter()
                .filter(|e| e.difficulty == difficulty)
                .map(|e| e.score)
                .collect();
            if scores.is_empty() {
                return None;
            }
            Some(DifficultySummary {
                difficulty,
                games: scores.len(),
                wins: scores.iter().filter(|&&s| s > 0).count(),
                min_score: scores.iter().copied().min().unwrap_or(0),
                max_score: scores.iter().copied().max().unwrap_or(0),
                mean_score: mean(scores.iter().map(|&s| s as f64)),
            })
        })
        .collect()
}

/// Unlocked achievements, or a single [`Achievement::KeepPlaying`].
pub fn achievements(stats: &Stats, entries: &[HistoryEntry]) -> Vec<Achievement> {
    let mut unlocked = Vec::new();
    if stats.total_games >= 10 {
        unlocked.push(Achievement::DedicatedPlayer);
    }
    if stats.wins >= 5 {
        unlocked.push(Achievement::Winner);
    }
    if stats.total_games >= ACHIEVEMENT_MIN_GAMES {
        if stats.win_rate >= 70.0 {
            unlocked.push(Achievement::MasterGuesser);
        }
        if stats.min_attempts <= 3 {
            unlocked.push(Achievement::SharpEye);
        }
        if stats.high_score >= 500 {
            unlocked.push(Achievement::HighScorer);
        }
        if entries.iter().any(|e| e.is_win() && e.hints_used == 0) {
            unlocked.push(Achievement::PureSkill);
        }
    }
    if unlocked.is_empty() {
        unlocked.push(Achievement::KeepPlaying);
    }
    unlocked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::resolve_config;
    use alloc::vec;

    fn game(attempts: u32, score: u32, hints_used: u32) -> HistoryEntry {
        let config = resolve_config(1, 100, Difficulty::Medium).unwrap();
        let mut e = HistoryEntry::new(&config, 50, &[], hints_used, score, 5.0, 0);
        e.attempts = attempts;
        e
    }

    #[test]
    fn empty_history_has_no_data() {
        assert_eq!(compute_stats(&[]), Err(GameError::NoData));
    }

    #[test]
    fn single_win() {
        let stats = compute_stats(&[game(4, 300, 1)]).unwrap();
        assert_eq!(stats.total_games, 1);
        assert_eq!(stats.high_score, 300);
        assert_eq!(stats.win_rate, 100.0);
        assert_eq!(stats.recent_average, 300.0);
        assert_eq!(stats.moving_average_window, 1);
        assert_eq!(stats.moving_average_attempts, vec![Some(4.0)]);
        assert_eq!(stats.achievements, vec![Achievement::KeepPlaying]);
    }

    #[test]
    fn aggregates() {
        let entries = [game(2, 800, 0), game(10, 0, 3), game(6, 400, 1), game(4, 600, 2)];
        let stats = compute_stats(&entries).unwrap();
        assert_eq!(stats.wins, 3);
        assert_eq!(stats.win_rate, 75.0);
        assert_eq!(stats.avg_attempts, 5.5);
        assert_eq!(stats.min_attempts, 2);
        assert_eq!(stats.max_attempts, 10);
        assert_eq!(stats.total_points, 1800);
        assert_eq!(stats.avg_score, 450.0);
        assert_eq!(stats.recent_average, 450.0);
        assert_eq!(stats.attempts_histogram.get(&10), Some(&1));
        assert_eq!(stats.by_difficulty.len(), 1);
        assert_eq!(stats.by_difficulty[0].wins, 3);
        assert_eq!(
            stats.achievements,
            vec![
                Achievement::MasterGuesser,
                Achievement::SharpEye,
                Achievement::HighScorer,
                Achievement::PureSkill,
            ]
        );
    }

    #[test]
    fn recent_average_uses_last_five() {
        let entries: Vec<HistoryEntry> = (1..=7).map(|i| game(5, i * 100, 1)).collect();
        let stats = compute_stats(&entries).unwrap();
        // 300 + 400 + 500 + 600 + 700
        assert_eq!(stats.recent_average, 500.0);
        assert_eq!(stats.moving_average_window, 5);
    }

    #[test]
    fn moving_average_has_leading_gaps() {
        let averages = moving_average(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 3);
        assert_eq!(averages, vec![None, None, Some(2.0), Some(3.0), Some(4.0), Some(5.0)]);
        assert_eq!(moving_average(&[1.0], 0), vec![None]);
    }

    #[test]
    fn pure_skill_needs_a_win() {
        let entries = [game(9, 0, 0), game(9, 0, 0), game(9, 100, 2)];
        let stats = compute_stats(&entries).unwrap();
        assert!(!stats.achievements.contains(&Achievement::PureSkill));
    }

    #[test]
    fn dedicated_and_winner() {
        let entries: Vec<HistoryEntry> = (0..10).map(|i| game(8, if i < 5 { 100 } else { 0 }, 1)).collect();
        let stats = compute_stats(&entries).unwrap();
        assert_eq!(stats.achievements, vec![Achievement::DedicatedPlayer, Achievement::Winner]);
    }
}
