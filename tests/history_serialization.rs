use number_master::{
    resolve_config, seeded_rng, Difficulty, GameService, HistoryEntry, HistoryStore, ManualClock,
};

fn played_history() -> HistoryStore {
    let mut service = GameService::with_clock(seeded_rng(Some(11)), ManualClock::ticking(1_700_000_000.0, 3.0));
    let config = resolve_config(1, 100, Difficulty::Hard).unwrap();
    let id = service.start_session_with_target(config, 64).unwrap();
    service.request_hint(id).unwrap();
    for guess in [50, 75, 62, 64] {
        service.submit_guess(id, guess).unwrap();
    }
    let id = service.start_session_with_target(config, 3).unwrap();
    for _ in 0..10 {
        service.submit_guess(id, 100).unwrap();
    }
    service.history_store().clone()
}

#[test]
fn history_survives_bincode() {
    let history = played_history();
    assert_eq!(history.len(), 2);
    let bytes = bincode::serialize(&history).unwrap();
    let decoded: HistoryStore = bincode::deserialize(&bytes).unwrap();
    assert_eq!(decoded, history);
}

#[test]
fn history_survives_json() {
    let history = played_history();
    let text = serde_json::to_string(history.all()).unwrap();
    let decoded: Vec<HistoryEntry> = serde_json::from_str(&text).unwrap();
    assert_eq!(decoded.as_slice(), history.all());
    let first = &decoded[0];
    assert_eq!(first.attempts, 4);
    assert_eq!(first.guesses.len(), 4);
    assert_eq!(first.hints_used, 1);
    assert_eq!(first.timestamp, 1_700_000_012);
    assert_eq!(first.elapsed_seconds, 12.0);
    assert_eq!(first.score, 655);
    assert_eq!(decoded[1].score, 0);
}
