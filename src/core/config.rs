use crate::core::common::GameError;

/// Smallest value a range may start at.
pub const MIN_VALUE: i64 = 1;
/// Largest value a range may end at.
pub const MAX_VALUE: i64 = 10_000;
/// Hints available per session.
pub const MAX_HINTS: u32 = 3;
/// Divisors tried, in order, by the second hint.
pub const HINT_DIVISORS: [i64; 3] = [3, 5, 7];
/// Number of trailing games used for recent averages.
pub const RECENT_WINDOW: usize = 5;

/// Named preset controlling the attempt cap and the hint penalty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Expert,
    Unlimited,
}

impl Difficulty {
    pub const ALL: [Difficulty; 5] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Expert,
        Difficulty::Unlimited,
    ];

    /// Share of the range size granted as attempts, in percent. `None` means
    /// no cap.
    pub const fn attempt_percent(self) -> Option<i64> {
        match self {
            Difficulty::Easy => Some(30),
            Difficulty::Medium => Some(20),
            Difficulty::Hard => Some(10),
            Difficulty::Expert => Some(5),
            Difficulty::Unlimited => None,
        }
    }

    pub const fn hint_penalty_rate(self) -> u32 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 2,
            Difficulty::Hard => 3,
            Difficulty::Expert => 4,
            Difficulty::Unlimited => 2,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::Expert => "Expert",
            Difficulty::Unlimited => "Unlimited",
        }
    }
}

impl core::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.pad(self.label())
    }
}

/// Returned when a difficulty label is not recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDifficultyError;

impl core::fmt::Display for ParseDifficultyError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "expected one of easy, medium, hard, expert, unlimited")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseDifficultyError {}

impl core::str::FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::ALL
            .into_iter()
            .find(|d| d.label().eq_ignore_ascii_case(s.trim()))
            .ok_or(ParseDifficultyError)
    }
}

/// Attempt cap of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum AttemptLimit {
    Bounded(u32),
    Unbounded,
}

impl AttemptLimit {
    /// Attempts left after `used` attempts, `None` when uncapped.
    pub fn remaining(self, used: u32) -> Option<u32> {
        match self {
            AttemptLimit::Bounded(max) => Some(max.saturating_sub(used)),
            AttemptLimit::Unbounded => None,
        }
    }

    pub fn is_exhausted(self, used: u32) -> bool {
        match self {
            AttemptLimit::Bounded(max) => used >= max,
            AttemptLimit::Unbounded => false,
        }
    }
}

impl core::fmt::Display for AttemptLimit {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            AttemptLimit::Bounded(n) => write!(f, "{}", n),
            AttemptLimit::Unbounded => write!(f, "unlimited"),
        }
    }
}

/// Resolved settings for one game. Only [`resolve_config`] builds these, so
/// `min_range < max_range` always holds. Deserializing goes through
/// [`resolve_config`] as well; the cap and penalty rate on the wire are
/// recomputed rather than trusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "std",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "WireConfig")
)]
pub struct GameConfig {
    min_range: i64,
    max_range: i64,
    difficulty: Difficulty,
    max_attempts: AttemptLimit,
    hint_penalty_rate: u32,
}

impl GameConfig {
    pub fn min_range(&self) -> i64 {
        self.min_range
    }

    pub fn max_range(&self) -> i64 {
        self.max_range
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn max_attempts(&self) -> AttemptLimit {
        self.max_attempts
    }

    pub fn hint_penalty_rate(&self) -> u32 {
        self.hint_penalty_rate
    }

    /// Number of integers in the inclusive range.
    pub fn range_size(&self) -> i64 {
        self.max_range - self.min_range + 1
    }

    pub fn contains(&self, value: i64) -> bool {
        (self.min_range..=self.max_range).contains(&value)
    }
}

/// Field-for-field image of [`GameConfig`] as it arrives off the wire.
#[cfg(feature = "std")]
#[derive(serde::Deserialize)]
struct WireConfig {
    min_range: i64,
    max_range: i64,
    difficulty: Difficulty,
    #[allow(dead_code)]
    max_attempts: AttemptLimit,
    #[allow(dead_code)]
    hint_penalty_rate: u32,
}

#[cfg(feature = "std")]
impl TryFrom<WireConfig> for GameConfig {
    type Error = GameError;

    fn try_from(wire: WireConfig) -> Result<Self, Self::Error> {
        resolve_config(wire.min_range, wire.max_range, wire.difficulty)
    }
}

/// Map a requested range and difficulty to a concrete [`GameConfig`].
///
/// The attempt cap is `floor(range_size * percent / 100)`, raised to one so a
/// capped game always allows at least a single guess.
pub fn resolve_config(
    min_range: i64,
    max_range: i64,
    difficulty: Difficulty,
) -> Result<GameConfig, GameError> {
    if min_range >= max_range || min_range < MIN_VALUE || max_range > MAX_VALUE {
        return Err(GameError::InvalidRange {
            min: min_range,
            max: max_range,
        });
    }
    let range_size = max_range - min_range + 1;
    let max_attempts = match difficulty.attempt_percent() {
        Some(percent) => {
            let cap = (range_size * percent / 100).max(1);
            AttemptLimit::Bounded(u32::try_from(cap).unwrap_or(u32::MAX))
        }
        None => AttemptLimit::Unbounded,
    };
    Ok(GameConfig {
        min_range,
        max_range,
        difficulty,
        max_attempts,
        hint_penalty_rate: difficulty.hint_penalty_rate(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn medium_on_hundred() {
        let config = resolve_config(1, 100, Difficulty::Medium).unwrap();
        assert_eq!(config.range_size(), 100);
        assert_eq!(config.max_attempts(), AttemptLimit::Bounded(20));
        assert_eq!(config.hint_penalty_rate(), 2);
    }

    #[test]
    fn difficulty_table() {
        let expected = [
            (Difficulty::Easy, AttemptLimit::Bounded(30), 1),
            (Difficulty::Medium, AttemptLimit::Bounded(20), 2),
            (Difficulty::Hard, AttemptLimit::Bounded(10), 3),
            (Difficulty::Expert, AttemptLimit::Bounded(5), 4),
            (Difficulty::Unlimited, AttemptLimit::Unbounded, 2),
        ];
        for (difficulty, attempts, rate) in expected {
            let config = resolve_config(1, 100, difficulty).unwrap();
            assert_eq!(config.max_attempts(), attempts, "{}", difficulty);
            assert_eq!(config.hint_penalty_rate(), rate, "{}", difficulty);
        }
    }

    #[test]
    fn floors_fractional_caps() {
        // 37 * 0.3 = 11.1, 37 * 0.05 = 1.85
        let easy = resolve_config(1, 37, Difficulty::Easy).unwrap();
        assert_eq!(easy.max_attempts(), AttemptLimit::Bounded(11));
        let expert = resolve_config(1, 37, Difficulty::Expert).unwrap();
        assert_eq!(expert.max_attempts(), AttemptLimit::Bounded(1));
    }

    #[test]
    fn tiny_range_still_allows_one_guess() {
        let config = resolve_config(1, 5, Difficulty::Expert).unwrap();
        assert_eq!(config.max_attempts(), AttemptLimit::Bounded(1));
    }

    #[test]
    fn rejects_bad_ranges() {
        for (min, max) in [(10, 10), (50, 5), (0, 10), (1, MAX_VALUE + 1)] {
            assert_eq!(
                resolve_config(min, max, Difficulty::Easy),
                Err(GameError::InvalidRange { min, max })
            );
        }
    }

    #[test]
    fn parses_labels() {
        assert_eq!("hard".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert_eq!(" Unlimited ".parse::<Difficulty>(), Ok(Difficulty::Unlimited));
        assert!("nightmare".parse::<Difficulty>().is_err());
    }

    #[cfg(feature = "std")]
    #[test]
    fn deserializing_revalidates() {
        let forged = r#"{"min_range":50,"max_range":10,"difficulty":"Easy","max_attempts":{"Bounded":3},"hint_penalty_rate":1}"#;
        assert!(serde_json::from_str::<GameConfig>(forged).is_err());

        let tampered = r#"{"min_range":1,"max_range":100,"difficulty":"Expert","max_attempts":"Unbounded","hint_penalty_rate":0}"#;
        let config: GameConfig = serde_json::from_str(tampered).unwrap();
        assert_eq!(config, resolve_config(1, 100, Difficulty::Expert).unwrap());
    }

    #[test]
    fn remaining_attempts() {
        assert_eq!(AttemptLimit::Bounded(3).remaining(1), Some(2));
        assert_eq!(AttemptLimit::Bounded(3).remaining(5), Some(0));
        assert_eq!(AttemptLimit::Unbounded.remaining(100), None);
        assert!(AttemptLimit::Bounded(2).is_exhausted(2));
        assert!(!AttemptLimit::Unbounded.is_exhausted(u32::MAX));
    }
}
