use thiserror::Error;

/// Contract violations rejected by the session reducer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("slot index {index} is out of range for a word of {len} letters")]
    SlotOutOfRange { index: usize, len: usize },

    #[error("no round is in progress")]
    NoActiveRound,

    #[error("the session is over, every word has been used")]
    SessionOver,
}

pub type GameResult<T> = Result<T, GameError>;
