#![cfg(feature = "std")]

//! Wire protocol between a game client and a game server.
//!
//! Every request is answered by exactly one reply. Game-level failures travel
//! back as [`Message::Error`] so the client can rebuild the same
//! [`GameError`].

use crate::core::{
    Difficulty, GameConfig, GameError, GuessReport, HintResponse, HistoryEntry, SessionProgress,
    Stats,
};
use crate::service::SessionId;

/// Current protocol version.
pub const PROTOCOL_VERSION: u32 = 1;

/// Messages exchanged between a [`crate::Stub`] and a [`crate::Skeleton`].
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub enum Message {
    /// Opens a connection on behalf of a named player.
    Handshake { version: u32, player: String },
    HandshakeAck { version: u32 },

    ResolveConfig {
        min_range: i64,
        max_range: i64,
        difficulty: Difficulty,
    },
    StartSession { config: GameConfig },
    Guess { session: SessionId, value: i64 },
    HintReq { session: SessionId },
    ProgressReq { session: SessionId },
    Reset { session: SessionId },
    HistoryReq,
    StatsReq,
    HighScoreReq,

    Config(GameConfig),
    Started(SessionId),
    GuessResp(GuessReport),
    HintResp(HintResponse),
    ProgressResp(SessionProgress),
    HistoryResp(Vec<HistoryEntry>),
    StatsResp(Stats),
    HighScoreResp(Option<u32>),
    /// Generic acknowledgement.
    Ack,
    Error(GameError),
}

/// Operations a front end can perform against a player's games, whether the
/// games live in-process or behind a transport.
///
/// Game-level failures are returned as a [`GameError`] inside the
/// `anyhow::Error` and can be recovered with `downcast_ref`.
#[async_trait::async_trait]
pub trait GameApi: Send {
    async fn resolve_config(
        &mut self,
        min_range: i64,
        max_range: i64,
        difficulty: Difficulty,
    ) -> anyhow::Result<GameConfig>;
    async fn start_session(&mut self, config: GameConfig) -> anyhow::Result<SessionId>;
    async fn submit_guess(&mut self, session: SessionId, value: i64) -> anyhow::Result<GuessReport>;
    async fn request_hint(&mut self, session: SessionId) -> anyhow::Result<HintResponse>;
    async fn progress(&mut self, session: SessionId) -> anyhow::Result<SessionProgress>;
    async fn reset(&mut self, session: SessionId) -> anyhow::Result<()>;
    async fn history(&mut self) -> anyhow::Result<Vec<HistoryEntry>>;
    async fn stats(&mut self) -> anyhow::Result<Stats>;
    async fn high_score(&mut self) -> anyhow::Result<Option<u32>>;
}

/// The [`GameError`] carried by `err`, if any.
pub fn game_error(err: &anyhow::Error) -> Option<&GameError> {
    err.downcast_ref::<GameError>()
}
