#![cfg(feature = "std")]

//! In-process game service: the session store for one player plus a registry
//! that keeps players apart.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex as StdMutex, PoisonError};
use std::time::{SystemTime, UNIX_EPOCH};

use log::{debug, info, warn};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tokio::sync::Mutex;

use crate::core::{
    compute_stats, resolve_config, Difficulty, GameConfig, GameError, GameSession, GuessReport,
    HintResponse, HistoryEntry, HistoryStore, PlayerRecord, SessionProgress, StateError, Stats,
};
use crate::protocol::GameApi;

/// Identifier of a session within one player's service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct SessionId(pub u64);

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Source of the current time in unix seconds.
pub trait Clock: Send + Sync {
    fn now(&self) -> f64;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> f64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs_f64())
            .unwrap_or(0.0)
    }
}

/// Clock moved by hand. Clones share the same time. With a non-zero step
/// every reading advances the clock by that many seconds afterwards.
#[derive(Debug, Clone)]
pub struct ManualClock {
    bits: Arc<AtomicU64>,
    step: f64,
}

impl ManualClock {
    pub fn new(start: f64) -> Self {
        Self::ticking(start, 0.0)
    }

    pub fn ticking(start: f64, step: f64) -> Self {
        Self {
            bits: Arc::new(AtomicU64::new(start.to_bits())),
            step,
        }
    }

    pub fn set(&self, now: f64) {
        self.bits.store(now.to_bits(), Ordering::SeqCst);
    }

    pub fn advance(&self, seconds: f64) {
        self.set(self.peek() + seconds);
    }

    /// Current time without ticking.
    pub fn peek(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::SeqCst))
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        let now = self.peek();
        if self.step != 0.0 {
            self.set(now + self.step);
        }
        now
    }
}

/// RNG seeded from `seed`, or from the thread RNG when no seed is given.
pub fn seeded_rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(s) => SmallRng::seed_from_u64(s),
        None => {
            let mut seed_rng = rand::rng();
            SmallRng::from_rng(&mut seed_rng)
        }
    }
}

/// One player's games: open sessions, finished-game history and high score.
pub struct GameService<C: Clock = SystemClock> {
    rng: SmallRng,
    clock: C,
    sessions: HashMap<SessionId, GameSession>,
    next_id: u64,
    record: PlayerRecord,
}

impl GameService<SystemClock> {
    pub fn new(rng: SmallRng) -> Self {
        Self::with_clock(rng, SystemClock)
    }
}

impl<C: Clock> GameService<C> {
    pub fn with_clock(rng: SmallRng, clock: C) -> Self {
        Self {
            rng,
            clock,
            sessions: HashMap::new(),
            next_id: 0,
            record: PlayerRecord::new(),
        }
    }

    pub fn resolve_config(
        &self,
        min_range: i64,
        max_range: i64,
        difficulty: Difficulty,
    ) -> Result<GameConfig, GameError> {
        resolve_config(min_range, max_range, difficulty).map_err(|e| {
            warn!("config rejected: {}", e);
            e
        })
    }

    /// Start a game with a random target.
    pub fn start_session(&mut self, config: GameConfig) -> SessionId {
        let session = GameSession::start(config, &mut self.rng, self.clock.now());
        self.insert(session)
    }

    /// Start a game whose target is already known.
    pub fn start_session_with_target(
        &mut self,
        config: GameConfig,
        target: i64,
    ) -> Result<SessionId, GameError> {
        let session = GameSession::with_target(config, target, self.clock.now())?;
        Ok(self.insert(session))
    }

    fn insert(&mut self, session: GameSession) -> SessionId {
        // Finished games are already in the history; keep only open ones.
        let before = self.sessions.len();
        self.sessions.retain(|_, s| !s.status().is_terminal());
        if self.sessions.len() < before {
            debug!("dropped {} finished sessions", before - self.sessions.len());
        }
        let id = SessionId(self.next_id);
        self.next_id += 1;
        let config = session.config();
        info!(
            "session {} started: {}..={} on {} ({} attempts)",
            id,
            config.min_range(),
            config.max_range(),
            config.difficulty(),
            config.max_attempts()
        );
        self.sessions.insert(id, session);
        id
    }

    pub fn session(&self, id: SessionId) -> Option<&GameSession> {
        self.sessions.get(&id)
    }

    /// Number of sessions currently held, finished or not.
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    fn unknown(id: SessionId) -> GameError {
        warn!("no session {}", id);
        GameError::InvalidState(StateError::UnknownSession(id.0))
    }

    pub fn submit_guess(&mut self, id: SessionId, value: i64) -> Result<GuessReport, GameError> {
        let now = self.clock.now();
        let session = self.sessions.get_mut(&id).ok_or_else(|| Self::unknown(id))?;
        let report = session.submit_guess(value, now, &mut self.record).map_err(|e| {
            warn!("guess {} on session {} rejected: {}", value, id, e);
            e
        })?;
        if report.is_terminal() {
            info!(
                "session {} {:?} after {} attempts, score {}",
                id,
                report.status,
                report.attempts_used,
                report.score.unwrap_or(0)
            );
        }
        Ok(report)
    }

    pub fn request_hint(&mut self, id: SessionId) -> Result<HintResponse, GameError> {
        let session = self.sessions.get_mut(&id).ok_or_else(|| Self::unknown(id))?;
        let response = session.request_hint(&mut self.rng).map_err(|e| {
            warn!("hint on session {} rejected: {}", id, e);
            e
        })?;
        debug!("session {} hint: {:?}", id, response);
        Ok(response)
    }

    pub fn progress(&self, id: SessionId) -> Result<SessionProgress, GameError> {
        let session = self.sessions.get(&id).ok_or_else(|| Self::unknown(id))?;
        Ok(session.progress(self.clock.now()))
    }

    /// Drop a session. An unfinished game is discarded without history.
    pub fn reset(&mut self, id: SessionId) -> Result<(), GameError> {
        match self.sessions.remove(&id) {
            Some(session) => {
                debug!("session {} reset in state {:?}", id, session.status());
                Ok(())
            }
            None => Err(Self::unknown(id)),
        }
    }

    pub fn history(&self) -> &[HistoryEntry] {
        self.record.history().all()
    }

    pub fn history_store(&self) -> &HistoryStore {
        self.record.history()
    }

    pub fn stats(&self) -> Result<Stats, GameError> {
        compute_stats(self.history())
    }

    pub fn high_score(&self) -> Option<u32> {
        self.record.high_score()
    }
}

#[async_trait::async_trait]
impl<C: Clock> GameApi for GameService<C> {
    async fn resolve_config(
        &mut self,
        min_range: i64,
        max_range: i64,
        difficulty: Difficulty,
    ) -> anyhow::Result<GameConfig> {
        Ok(GameService::resolve_config(self, min_range, max_range, difficulty)?)
    }

    async fn start_session(&mut self, config: GameConfig) -> anyhow::Result<SessionId> {
        Ok(GameService::start_session(self, config))
    }

    async fn submit_guess(&mut self, session: SessionId, value: i64) -> anyhow::Result<GuessReport> {
        Ok(GameService::submit_guess(self, session, value)?)
    }

    async fn request_hint(&mut self, session: SessionId) -> anyhow::Result<HintResponse> {
        Ok(GameService::request_hint(self, session)?)
    }

    async fn progress(&mut self, session: SessionId) -> anyhow::Result<SessionProgress> {
        Ok(GameService::progress(self, session)?)
    }

    async fn reset(&mut self, session: SessionId) -> anyhow::Result<()> {
        Ok(GameService::reset(self, session)?)
    }

    async fn history(&mut self) -> anyhow::Result<Vec<HistoryEntry>> {
        Ok(GameService::history(self).to_vec())
    }

    async fn stats(&mut self) -> anyhow::Result<Stats> {
        Ok(GameService::stats(self)?)
    }

    async fn high_score(&mut self) -> anyhow::Result<Option<u32>> {
        Ok(GameService::high_score(self))
    }
}

/// A player's service shared between connections. The lock serializes every
/// call for that player.
pub type SharedService<C = SystemClock> = Arc<Mutex<GameService<C>>>;

#[async_trait::async_trait]
impl<C: Clock> GameApi for SharedService<C> {
    async fn resolve_config(
        &mut self,
        min_range: i64,
        max_range: i64,
        difficulty: Difficulty,
    ) -> anyhow::Result<GameConfig> {
        Ok(self.lock().await.resolve_config(min_range, max_range, difficulty)?)
    }

    async fn start_session(&mut self, config: GameConfig) -> anyhow::Result<SessionId> {
        Ok(self.lock().await.start_session(config))
    }

    async fn submit_guess(&mut self, session: SessionId, value: i64) -> anyhow::Result<GuessReport> {
        Ok(self.lock().await.submit_guess(session, value)?)
    }

    async fn request_hint(&mut self, session: SessionId) -> anyhow::Result<HintResponse> {
        Ok(self.lock().await.request_hint(session)?)
    }

    async fn progress(&mut self, session: SessionId) -> anyhow::Result<SessionProgress> {
        Ok(self.lock().await.progress(session)?)
    }

    async fn reset(&mut self, session: SessionId) -> anyhow::Result<()> {
        Ok(self.lock().await.reset(session)?)
    }

    async fn history(&mut self) -> anyhow::Result<Vec<HistoryEntry>> {
        Ok(self.lock().await.history().to_vec())
    }

    async fn stats(&mut self) -> anyhow::Result<Stats> {
        Ok(self.lock().await.stats()?)
    }

    async fn high_score(&mut self) -> anyhow::Result<Option<u32>> {
        Ok(self.lock().await.high_score())
    }
}

/// Maps player names to their own [`GameService`], so no state is shared
/// between players.
pub struct PlayerRegistry<C: Clock + Clone = SystemClock> {
    players: StdMutex<HashMap<String, SharedService<C>>>,
    rng: StdMutex<SmallRng>,
    clock: C,
}

impl PlayerRegistry<SystemClock> {
    pub fn new(seed: Option<u64>) -> Self {
        Self::with_clock(seed, SystemClock)
    }
}

impl<C: Clock + Clone> PlayerRegistry<C> {
    pub fn with_clock(seed: Option<u64>, clock: C) -> Self {
        Self {
            players: StdMutex::new(HashMap::new()),
            rng: StdMutex::new(seeded_rng(seed)),
            clock,
        }
    }

    /// The player's service, created on first use.
    pub fn player(&self, name: &str) -> SharedService<C> {
        let mut players = self.players.lock().unwrap_or_else(PoisonError::into_inner);
        players
            .entry(name.to_string())
            .or_insert_with(|| {
                info!("new player '{}'", name);
                let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
                let player_rng = SmallRng::from_rng(&mut *rng);
                Arc::new(Mutex::new(GameService::with_clock(player_rng, self.clock.clone())))
            })
            .clone()
    }

    pub fn len(&self) -> usize {
        self.players.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> GameService<ManualClock> {
        GameService::with_clock(SmallRng::seed_from_u64(7), ManualClock::new(100.0))
    }

    #[test]
    fn unknown_session_is_invalid_state() {
        let mut service = service();
        assert_eq!(
            service.submit_guess(SessionId(9), 5),
            Err(GameError::InvalidState(StateError::UnknownSession(9)))
        );
        assert!(service.request_hint(SessionId(9)).is_err());
        assert!(service.reset(SessionId(9)).is_err());
    }

    #[test]
    fn reset_discards_without_history() {
        let mut service = service();
        let config = service.resolve_config(1, 100, Difficulty::Easy).unwrap();
        let id = service.start_session_with_target(config, 50).unwrap();
        service.submit_guess(id, 1).unwrap();
        service.reset(id).unwrap();
        assert!(service.session(id).is_none());
        assert!(service.history().is_empty());
    }

    #[test]
    fn finished_sessions_dropped_on_next_start() {
        let mut service = service();
        let config = service.resolve_config(1, 10, Difficulty::Easy).unwrap();
        let won = service.start_session_with_target(config, 3).unwrap();
        service.submit_guess(won, 3).unwrap();
        let open = service.start_session(config);
        assert!(service.session(won).is_none());
        assert!(service.session(open).is_some());
        assert_eq!(service.session_count(), 1);
        assert_eq!(service.history().len(), 1);
    }

    #[test]
    fn ids_are_distinct() {
        let mut service = service();
        let config = service.resolve_config(1, 10, Difficulty::Unlimited).unwrap();
        let a = service.start_session(config);
        let b = service.start_session(config);
        assert_ne!(a, b);
    }

    #[test]
    fn ticking_clock() {
        let clock = ManualClock::ticking(10.0, 2.0);
        assert_eq!(clock.now(), 10.0);
        assert_eq!(clock.now(), 12.0);
        let shared = clock.clone();
        shared.advance(5.0);
        assert_eq!(clock.peek(), 19.0);
    }

    #[test]
    fn registry_isolates_players() {
        let registry = PlayerRegistry::with_clock(Some(1), ManualClock::new(0.0));
        let alice = registry.player("alice");
        let again = registry.player("alice");
        let bob = registry.player("bob");
        assert!(Arc::ptr_eq(&alice, &again));
        assert!(!Arc::ptr_eq(&alice, &bob));
        assert_eq!(registry.len(), 2);
    }
}
