//! Game engine logic and state management.
//!
//! This module drives the core data structures to implement a falling-block game:
//!
//! - [`Engine`] - Session state machine (grid, active and next piece, gravity, commands)
//! - [`EngineConfig`] - Grid dimensions and fall-speed settings
//! - [`GameStats`] - Score, cleared lines, level, and line clear distribution
//! - [`PieceSource`] - Injectable supply of piece kinds ([`RandomPieceSource`], [`SequencePieceSource`])
//! - [`Command`] - Discrete input commands forwarded by a driver
//! - [`Snapshot`] - Owned copy of everything a renderer needs
//!
//! # Game Flow
//!
//! 1. Create an [`Engine`] from an [`EngineConfig`] and a piece source
//! 2. The driver calls [`Engine::tick`] with the elapsed time every frame
//! 3. Input is forwarded with [`Engine::apply`]
//! 4. When a piece lands it is locked, full lines are cleared and scored, and the
//!    next piece spawns
//! 5. The game ends when a freshly spawned piece collides
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//!
//! use quadris_engine::{Command, Engine, EngineConfig};
//!
//! let mut engine = Engine::new(EngineConfig::default()).unwrap();
//!
//! engine.apply(Command::MoveLeft);
//! engine.apply(Command::Rotate);
//! engine.tick(Duration::from_millis(16));
//! engine.apply(Command::HardDrop);
//!
//! let snapshot = engine.snapshot();
//! assert_eq!(snapshot.stats.completed_pieces(), 1);
//! ```

pub use self::{
    command::*, config::*, game_engine::*, game_stats::*, piece_source::*, snapshot::*,
};

mod command;
mod config;
mod game_engine;
mod game_stats;
mod piece_source;
mod snapshot;
