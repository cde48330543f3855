use std::io;

use thiserror::Error;

use crate::{models::Port, validation::Rejection};

/// Errors that end or abort a game session.
#[derive(Debug, Error)]
pub enum GameError {
    /// Reading input or writing a screen failed.
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    /// The input source ran dry while a prompt was waiting for an answer.
    #[error("input closed while waiting for a response")]
    InputClosed,

    /// Attempted to sail to the port the ship is already docked at.
    #[error("already docked at {0}")]
    AlreadyDocked(Port),

    /// Setup values that would never pass the prompt validators.
    #[error("invalid game setup: {0}")]
    InvalidSetup(#[from] Rejection),
}
