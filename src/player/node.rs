use alloc::boxed::Box;
use log::debug;
use rand::rngs::SmallRng;

use crate::core::{GameConfig, GameError, GuessReport};
use crate::protocol::GameApi;

use super::{Move, Player};

/// Drives one [`Player`] through games against any [`GameApi`], local or
/// remote.
pub struct PlayerNode {
    player: Box<dyn Player>,
    api: Box<dyn GameApi>,
}

impl PlayerNode {
    pub fn new(player: Box<dyn Player>, api: Box<dyn GameApi>) -> Self {
        Self { player, api }
    }

    /// The API the node plays against, for history and stats queries.
    pub fn api_mut(&mut self) -> &mut dyn GameApi {
        self.api.as_mut()
    }

    /// Play one game with `config`.
    ///
    /// Returns the final report, or `None` when the player quit. Out-of-range
    /// guesses are reported back to the player and the game continues.
    pub async fn play(
        &mut self,
        rng: &mut SmallRng,
        config: GameConfig,
    ) -> anyhow::Result<Option<GuessReport>> {
        let session = self.api.start_session(config).await?;
        debug!("[PlayerNode] started session {}", session);
        self.player.begin(&config);

        loop {
            match self.player.next_move(rng) {
                Move::Guess(value) => match self.api.submit_guess(session, value).await {
                    Ok(report) => {
                        self.player.observe_guess(value, &report);
                        if report.is_terminal() {
                            return Ok(Some(report));
                        }
                    }
                    Err(e) => match e.downcast::<GameError>() {
                        Ok(err @ GameError::InvalidInput { .. }) => self.player.observe_error(&err),
                        Ok(err) => return Err(err.into()),
                        Err(e) => return Err(e),
                    },
                },
                Move::Hint => {
                    let response = self.api.request_hint(session).await?;
                    self.player.observe_hint(&response);
                }
                Move::Progress => {
                    let progress = self.api.progress(session).await?;
                    self.player.observe_progress(&progress);
                }
                Move::Quit => {
                    debug!("[PlayerNode] player quit session {}", session);
                    self.api.reset(session).await?;
                    return Ok(None);
                }
            }
        }
    }
}
