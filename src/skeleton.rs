#![cfg(feature = "std")]

use anyhow::anyhow;
use log::{debug, info, warn};

use crate::protocol::{GameApi, Message, PROTOCOL_VERSION};
use crate::service::{Clock, PlayerRegistry, SessionId};
use crate::transport::Transport;

/// Server side of the protocol: answers each request from the transport by
/// calling into a [`GameApi`].
pub struct Skeleton<E: GameApi, T: Transport> {
    engine: E,
    transport: T,
    /// Sessions started over this connection that have not ended yet.
    open: Vec<SessionId>,
}

impl<E: GameApi, T: Transport> Skeleton<E, T> {
    pub fn new(engine: E, transport: T) -> Self {
        Self {
            engine,
            transport,
            open: Vec::new(),
        }
    }

    /// Serve requests until the peer goes away. Games the peer left
    /// unfinished are then reset, so they record nothing and free their slot.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        let result = self.serve().await;
        for session in std::mem::take(&mut self.open) {
            debug!("[Skeleton] resetting abandoned session {}", session);
            if let Err(e) = self.engine.reset(session).await {
                warn!("[Skeleton] could not reset session {}: {}", session, e);
            }
        }
        result
    }

    async fn serve(&mut self) -> anyhow::Result<()> {
        while let Ok(msg) = self.transport.recv().await {
            let reply = self.dispatch(msg).await?;
            self.transport.send(reply).await?;
        }
        Ok(())
    }

    fn close(&mut self, session: SessionId) {
        self.open.retain(|&id| id != session);
    }

    async fn dispatch(&mut self, msg: Message) -> anyhow::Result<Message> {
        let result = match msg {
            Message::ResolveConfig {
                min_range,
                max_range,
                difficulty,
            } => self
                .engine
                .resolve_config(min_range, max_range, difficulty)
                .await
                .map(Message::Config),
            Message::StartSession { config } => {
                let started = self.engine.start_session(config).await;
                if let Ok(id) = &started {
                    self.open.push(*id);
                }
                started.map(Message::Started)
            }
            Message::Guess { session, value } => {
                let report = self.engine.submit_guess(session, value).await;
                if matches!(&report, Ok(r) if r.is_terminal()) {
                    self.close(session);
                }
                report.map(Message::GuessResp)
            }
            Message::HintReq { session } => {
                self.engine.request_hint(session).await.map(Message::HintResp)
            }
            Message::ProgressReq { session } => {
                self.engine.progress(session).await.map(Message::ProgressResp)
            }
            Message::Reset { session } => {
                self.close(session);
                self.engine.reset(session).await.map(|()| Message::Ack)
            }
            Message::HistoryReq => self.engine.history().await.map(Message::HistoryResp),
            Message::StatsReq => self.engine.stats().await.map(Message::StatsResp),
            Message::HighScoreReq => self.engine.high_score().await.map(Message::HighScoreResp),
            other => {
                warn!("[Skeleton] ignoring unexpected message: {:?}", other);
                Ok(Message::Ack)
            }
        };
        match result {
            Ok(reply) => Ok(reply),
            Err(e) => e.downcast().map(Message::Error),
        }
    }
}

/// Perform the server half of the handshake, then serve the named player's
/// games over `transport` until the peer disconnects.
pub async fn serve_player<C, T>(registry: &PlayerRegistry<C>, mut transport: T) -> anyhow::Result<()>
where
    C: Clock + Clone + 'static,
    T: Transport,
{
    let player = match transport.recv().await? {
        Message::Handshake { version, player } if version == PROTOCOL_VERSION => player,
        Message::Handshake { version, .. } => {
            return Err(anyhow!(
                "Protocol version mismatch in Handshake: expected {}, got {}",
                PROTOCOL_VERSION,
                version
            ))
        }
        other => {
            return Err(anyhow!(
                "Expected Handshake, got unexpected message: {:?}",
                other
            ))
        }
    };
    transport
        .send(Message::HandshakeAck {
            version: PROTOCOL_VERSION,
        })
        .await?;
    info!("player '{}' connected", player);

    let mut skeleton = Skeleton::new(registry.player(&player), transport);
    skeleton.run().await?;
    info!("player '{}' disconnected", player);
    Ok(())
}
