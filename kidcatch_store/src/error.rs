// Error type for game persistence.

use thiserror::Error;

use kidcatch_protocol::{GameId, UserId};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("game {0} not found")]
    NotFound(GameId),

    #[error("user {user} is not the creator of game {id}")]
    Forbidden { id: GameId, user: UserId },

    #[error("store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("store serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("store lock poisoned")]
    Poisoned,
}

pub type Result<T> = std::result::Result<T, StoreError>;
