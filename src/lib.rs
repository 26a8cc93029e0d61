#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod core;
#[cfg(feature = "std")]
mod logging;
#[cfg(feature = "std")]
pub mod player;
#[cfg(feature = "std")]
pub mod protocol;
#[cfg(feature = "std")]
pub mod service;
#[cfg(feature = "std")]
pub mod skeleton;
#[cfg(feature = "std")]
pub mod stub;
#[cfg(feature = "std")]
pub mod transport;
#[cfg(feature = "std")]
pub mod ui;

pub use crate::core::*;
#[cfg(feature = "std")]
pub use logging::{init_logging, LOG_ENV};
#[cfg(feature = "std")]
pub use player::{BotPlayer, CliPlayer, Move, Player, PlayerNode, Strategy};
#[cfg(feature = "std")]
pub use protocol::{game_error, GameApi, Message, PROTOCOL_VERSION};
#[cfg(feature = "std")]
pub use service::{
    seeded_rng, Clock, GameService, ManualClock, PlayerRegistry, SessionId, SharedService,
    SystemClock,
};
#[cfg(feature = "std")]
pub use skeleton::{serve_player, Skeleton};
#[cfg(feature = "std")]
pub use stub::Stub;
#[cfg(feature = "std")]
pub use transport::{in_memory::InMemoryTransport, tcp::TcpTransport, Transport};
