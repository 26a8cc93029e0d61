//! Progressive hints about the hidden target.
//!
//! Hint 1 reveals parity, hint 2 the first of [`HINT_DIVISORS`] dividing the
//! target, hint 3 a randomised bracket around it. The generator is stateless;
//! the session decides which index is next.

use rand::Rng;

use crate::core::config::HINT_DIVISORS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Parity {
    Even,
    Odd,
}

/// A single disclosure about the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Hint {
    Parity(Parity),
    DivisibleBy(i64),
    NotDivisible,
    /// Inclusive bounds known to contain the target.
    Bracket { lower: i64, upper: i64 },
}

impl core::fmt::Display for Hint {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Hint::Parity(Parity::Even) => write!(f, "The number is even."),
            Hint::Parity(Parity::Odd) => write!(f, "The number is odd."),
            Hint::DivisibleBy(d) => write!(f, "The number is divisible by {}.", d),
            Hint::NotDivisible => write!(f, "The number is not divisible by 3, 5, or 7."),
            Hint::Bracket { lower, upper } => {
                write!(f, "The number is between {} and {}.", lower, upper)
            }
        }
    }
}

/// Outcome of asking a session for a hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum HintResponse {
    /// `index` is 1-based and counts hints consumed so far.
    Hint { index: u32, hint: Hint },
    /// Every hint of the session has already been used.
    Exhausted,
}

impl core::fmt::Display for HintResponse {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            HintResponse::Hint { index, hint } => write!(f, "Hint #{}: {}", index, hint),
            HintResponse::Exhausted => write!(f, "You've used all your hints!"),
        }
    }
}

/// Produce hint number `index` (1..=3) for `target`. Other indices yield `None`.
///
/// Only index 3 draws from `rng`.
pub fn generate_hint<R: Rng + ?Sized>(
    target: i64,
    min_range: i64,
    max_range: i64,
    index: u32,
    rng: &mut R,
) -> Option<Hint> {
    match index {
        1 => Some(parity_hint(target)),
        2 => Some(divisor_hint(target)),
        3 => Some(bracket_hint(target, min_range, max_range, rng)),
        _ => None,
    }
}

fn parity_hint(target: i64) -> Hint {
    if target.rem_euclid(2) == 0 {
        Hint::Parity(Parity::Even)
    } else {
        Hint::Parity(Parity::Odd)
    }
}

fn divisor_hint(target: i64) -> Hint {
    HINT_DIVISORS
        .iter()
        .copied()
        .find(|d| target % d == 0)
        .map(Hint::DivisibleBy)
        .unwrap_or(Hint::NotDivisible)
}

fn bracket_hint<R: Rng + ?Sized>(target: i64, min_range: i64, max_range: i64, rng: &mut R) -> Hint {
    // Narrow ranges would give an empty draw; widen to one step.
    let window = ((max_range - min_range) / 4).max(1);
    let lower = target - rng.random_range(1..=window);
    let upper = target + rng.random_range(1..=window);
    Hint::Bracket {
        lower: lower.max(min_range),
        upper: upper.min(max_range),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::SmallRng, SeedableRng};

    #[test]
    fn parity() {
        let mut rng = SmallRng::seed_from_u64(0);
        assert_eq!(generate_hint(42, 1, 100, 1, &mut rng), Some(Hint::Parity(Parity::Even)));
        assert_eq!(generate_hint(7, 1, 100, 1, &mut rng), Some(Hint::Parity(Parity::Odd)));
    }

    #[test]
    fn divisors_checked_in_order() {
        let mut rng = SmallRng::seed_from_u64(0);
        assert_eq!(generate_hint(15, 1, 100, 2, &mut rng), Some(Hint::DivisibleBy(3)));
        assert_eq!(generate_hint(35, 1, 100, 2, &mut rng), Some(Hint::DivisibleBy(5)));
        assert_eq!(generate_hint(49, 1, 100, 2, &mut rng), Some(Hint::DivisibleBy(7)));
        assert_eq!(generate_hint(43, 1, 100, 2, &mut rng), Some(Hint::NotDivisible));
    }

    #[test]
    fn bracket_is_clamped_at_edges() {
        let mut rng = SmallRng::seed_from_u64(9);
        for _ in 0..50 {
            match generate_hint(1, 1, 100, 3, &mut rng) {
                Some(Hint::Bracket { lower, upper }) => {
                    assert_eq!(lower, 1);
                    assert!(upper > 1 && upper <= 25);
                }
                other => panic!("unexpected hint {:?}", other),
            }
        }
    }

    #[test]
    fn bracket_on_narrow_range() {
        let mut rng = SmallRng::seed_from_u64(3);
        assert_eq!(
            generate_hint(2, 1, 3, 3, &mut rng),
            Some(Hint::Bracket { lower: 1, upper: 3 })
        );
    }

    #[test]
    fn out_of_sequence_index() {
        let mut rng = SmallRng::seed_from_u64(0);
        assert_eq!(generate_hint(10, 1, 100, 0, &mut rng), None);
        assert_eq!(generate_hint(10, 1, 100, 4, &mut rng), None);
    }

    #[test]
    fn hint_text() {
        let response = HintResponse::Hint {
            index: 2,
            hint: Hint::DivisibleBy(3),
        };
        assert_eq!(alloc::format!("{}", response), "Hint #2: The number is divisible by 3.");
    }
}
