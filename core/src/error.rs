use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
    #[error("Cell belongs to the original puzzle and cannot be changed")]
    FixedCell,
    #[error("Digit {0} is outside of 1-9")]
    InvalidDigit(u8),
    #[error("Tile value {0} is not a power of two up to 131072")]
    InvalidTile(u32),
    #[error("Board size {0} is not supported")]
    UnsupportedSize(u8),
    #[error("Unknown difficulty, expected easy, medium or hard")]
    UnknownDifficulty,
    #[error("Unknown direction, expected up, down, left or right")]
    UnknownDirection,
    #[error("Deck ran out, the round was settled on current totals")]
    DeckExhausted,
}

pub type Result<T> = core::result::Result<T, GameError>;
