#![warn(clippy::all, missing_docs)]

//! Core game logic for Tides of Manila, a turn-based trading game.
//!
//! This crate hosts the game state and its transitions, the per-port price
//! table, the validators gating every player decision, the prompt loops built
//! on top of them, and configuration handling used by the console front-end.

pub mod config;
pub mod errors;
pub mod market;
pub mod models;
pub mod prompt;
pub mod screen;
pub mod session;
pub mod state;
pub mod validation;

pub use config::AppConfig;
pub use errors::GameError;
pub use market::Market;
pub use models::{Action, Cargo, Port, Tier, TradeKind, Upgrade};
pub use prompt::{InputSource, LineReader, Prompter, ScriptedInput};
pub use screen::{GameSummary, Prompt, Renderer, Screen};
pub use session::GameSession;
pub use state::GameState;
pub use validation::Rejection;
