use thiserror::Error;

use super::{GameStatus, MAX_PLAYERS, MIN_PLAYERS};

/// Reasons a session action can be refused
///
/// Every action on [`GameSession`](super::GameSession) either applies fully or
/// returns one of these and leaves the session untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("Cannot move from {from} to {to}")]
    InvalidTransition { from: GameStatus, to: GameStatus },

    #[error("Need at least {min} players, got {0}", min = MIN_PLAYERS)]
    NotEnoughPlayers(usize),

    #[error("At most {max} players allowed", max = MAX_PLAYERS)]
    TooManyPlayers,

    #[error("Impostor count must be between 1 and {max}, got {requested}")]
    InvalidImpostorCount { requested: usize, max: usize },

    #[error("Players cannot be changed once the game has started")]
    RosterLocked,

    #[error("No player at position {0}")]
    UnknownPlayer(usize),

    #[error("Invalid player name: {0}")]
    InvalidName(String),

    #[error("The word is only disclosed once every player has seen their card")]
    WordHidden,
}

impl GameError {
    /// Whether the error comes from the current status rather than the input
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            GameError::InvalidTransition { .. } | GameError::RosterLocked | GameError::WordHidden
        )
    }
}
