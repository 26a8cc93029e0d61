#![cfg(feature = "std")]

use anyhow::anyhow;

use crate::core::{Difficulty, GameConfig, GuessReport, HintResponse, HistoryEntry, SessionProgress, Stats};
use crate::protocol::{GameApi, Message, PROTOCOL_VERSION};
use crate::service::SessionId;
use crate::transport::Transport;

/// Client side of the protocol: a [`GameApi`] whose games live on a server.
pub struct Stub<T: Transport> {
    transport: T,
    player: String,
    handshaken: bool,
}

fn unexpected(expected: &str, got: Message) -> anyhow::Error {
    anyhow!("Expected {}, got unexpected message: {:?}", expected, got)
}

impl<T: Transport> Stub<T> {
    /// Wrap `transport`; the handshake for `player` happens on first use.
    pub fn new(transport: T, player: impl Into<String>) -> Self {
        Self {
            transport,
            player: player.into(),
            handshaken: false,
        }
    }

    async fn ensure_handshake(&mut self) -> anyhow::Result<()> {
        if self.handshaken {
            return Ok(());
        }
        self.transport
            .send(Message::Handshake {
                version: PROTOCOL_VERSION,
                player: self.player.clone(),
            })
            .await?;
        match self.transport.recv().await? {
            Message::HandshakeAck { version } if version == PROTOCOL_VERSION => {
                self.handshaken = true;
                Ok(())
            }
            Message::HandshakeAck { version } => Err(anyhow!(
                "Protocol version mismatch in HandshakeAck: expected {}, got {}",
                PROTOCOL_VERSION,
                version
            )),
            other => Err(unexpected("HandshakeAck", other)),
        }
    }

    /// Send one request and wait for its reply, turning `Message::Error`
    /// back into the game error the server raised.
    async fn call(&mut self, msg: Message) -> anyhow::Result<Message> {
        self.ensure_handshake().await?;
        self.transport.send(msg).await?;
        match self.transport.recv().await? {
            Message::Error(e) => Err(e.into()),
            reply => Ok(reply),
        }
    }
}

#[async_trait::async_trait]
impl<T: Transport> GameApi for Stub<T> {
    async fn resolve_config(
        &mut self,
        min_range: i64,
        max_range: i64,
        difficulty: Difficulty,
    ) -> anyhow::Result<GameConfig> {
        match self
            .call(Message::ResolveConfig {
                min_range,
                max_range,
                difficulty,
            })
            .await?
        {
            Message::Config(config) => Ok(config),
            other => Err(unexpected("Config", other)),
        }
    }

    async fn start_session(&mut self, config: GameConfig) -> anyhow::Result<SessionId> {
        match self.call(Message::StartSession { config }).await? {
            Message::Started(id) => Ok(id),
            other => Err(unexpected("Started", other)),
        }
    }

    async fn submit_guess(&mut self, session: SessionId, value: i64) -> anyhow::Result<GuessReport> {
        match self.call(Message::Guess { session, value }).await? {
            Message::GuessResp(report) => Ok(report),
            other => Err(unexpected("GuessResp", other)),
        }
    }

    async fn request_hint(&mut self, session: SessionId) -> anyhow::Result<HintResponse> {
        match self.call(Message::HintReq { session }).await? {
            Message::HintResp(hint) => Ok(hint),
            other => Err(unexpected("HintResp", other)),
        }
    }

    async fn progress(&mut self, session: SessionId) -> anyhow::Result<SessionProgress> {
        match self.call(Message::ProgressReq { session }).await? {
            Message::ProgressResp(progress) => Ok(progress),
            other => Err(unexpected("ProgressResp", other)),
        }
    }

    async fn reset(&mut self, session: SessionId) -> anyhow::Result<()> {
        match self.call(Message::Reset { session }).await? {
            Message::Ack => Ok(()),
            other => Err(unexpected("Ack", other)),
        }
    }

    async fn history(&mut self) -> anyhow::Result<Vec<HistoryEntry>> {
        match self.call(Message::HistoryReq).await? {
            Message::HistoryResp(entries) => Ok(entries),
            other => Err(unexpected("HistoryResp", other)),
        }
    }

    async fn stats(&mut self) -> anyhow::Result<Stats> {
        match self.call(Message::StatsReq).await? {
            Message::StatsResp(stats) => Ok(stats),
            other => Err(unexpected("StatsResp", other)),
        }
    }

    async fn high_score(&mut self) -> anyhow::Result<Option<u32>> {
        match self.call(Message::HighScoreReq).await? {
            Message::HighScoreResp(score) => Ok(score),
            other => Err(unexpected("HighScoreResp", other)),
        }
    }
}
