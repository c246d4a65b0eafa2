//! Pipe Runner: a side-scrolling reflex game.
//!
//! Core modules:
//! - `config`: tunables and startup validation
//! - `entities`: the bird, obstacles and obstacle pairs
//! - `stream`: spawning and recycling of obstacle pairs
//! - `compute`: collision and scoring geometry
//! - `score`: current and session-best score
//! - `session`: per-tick update order and the menu/playing/game-over machine
//! - `input`: key bindings for each state

pub mod compute;
pub mod config;
pub mod entities;
pub mod input;
pub mod score;
pub mod session;
pub mod stream;

pub use config::{ConfigError, GameConfig};
pub use session::{Command, GameStatus, Session, TickOutcome};
