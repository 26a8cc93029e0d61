use number_master::{calculate_score, score_for, resolve_config, Difficulty};
use proptest::prelude::*;

#[test]
fn reference_scores() {
    assert_eq!(calculate_score(5, 1, 100, 10.0, 0, 2), 690);
    assert_eq!(calculate_score(5, 1, 100, 10.0, 3, 2), 540);
    assert_eq!(calculate_score(20, 1, 100, 200.0, 0, 2), 0);
    let config = resolve_config(1, 100, Difficulty::Expert).unwrap();
    assert_eq!(score_for(&config, 1, 0.0, 1), 840);
}

proptest! {
    #[test]
    fn score_is_bounded_by_base(
        attempts in 1u32..500,
        min in 1i64..5000,
        width in 1i64..5000,
        elapsed in 0.0f64..10_000.0,
        hints in 0u32..=3,
        rate in 1u32..=4,
    ) {
        let score = calculate_score(attempts, min, min + width, elapsed, hints, rate);
        let base = (width * 10) as u32;
        prop_assert!(score <= base);
    }

    #[test]
    fn more_attempts_never_score_higher(
        attempts in 1u32..200,
        elapsed in 0.0f64..500.0,
        hints in 0u32..=3,
    ) {
        let fewer = calculate_score(attempts, 1, 1000, elapsed, hints, 2);
        let more = calculate_score(attempts + 1, 1, 1000, elapsed, hints, 2);
        prop_assert!(more <= fewer);
    }

    #[test]
    fn slower_games_never_score_higher(elapsed in 0.0f64..500.0, extra in 0.0f64..100.0) {
        let fast = calculate_score(3, 1, 1000, elapsed, 0, 2);
        let slow = calculate_score(3, 1, 1000, elapsed + extra, 0, 2);
        prop_assert!(slow <= fast);
    }
}
