use thiserror::Error;

use crate::types::Coord;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong inside the rules engine.
///
/// An ordinary illegal move attempt is not an error: `Game::try_move` reports
/// it as `Ok(false)`.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// Home rows of the two players would touch or overlap.
    #[error("invalid home size {home_size} for board height {height}")]
    InvalidHomeSize { home_size: u8, height: u8 },

    /// The board must have between 1 and 26 columns and at least one row.
    #[error("invalid board dimensions {width}x{height}")]
    InvalidDimensions { width: u8, height: u8 },

    /// The draw countdown needs at least one king move.
    #[error("moves to draw must be at least 1")]
    InvalidMovesToDraw,

    /// The game entered a capture streak from which no capture continues.
    #[error("no capture continues the streak from {origin}")]
    NoStreakContinuation { origin: Coord },

    /// A caller asked to play a move that is not legal in the current position.
    #[error("illegal move {from} to {to}")]
    IllegalMove { from: Coord, to: Coord },

    /// A move selector returned nothing while legal moves exist.
    #[error("move selector did not pick a move")]
    NoSelection,

    /// The game has already ended.
    #[error("game is already over")]
    GameOver,

    /// A coordinate lies outside the board.
    #[error("square {pos} is outside the board")]
    OutOfBounds { pos: Coord },

    /// Pieces can only stand on playable squares.
    #[error("square {pos} is not playable")]
    UnplayableSquare { pos: Coord },

    /// Player ids are 1 and 2.
    #[error("invalid player id {0}")]
    InvalidPlayer(u8),

    /// The string is not a square such as `c3`.
    #[error("invalid square: {0}")]
    InvalidSquare(String),

    /// The string is not a move such as `c3-d4` or `c3:e5:g7`.
    #[error("invalid move notation: {0}")]
    InvalidNotation(String),
}

impl Error {
    /// Construction-time errors; a session is never created after one of these.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::InvalidHomeSize { .. } | Self::InvalidDimensions { .. } | Self::InvalidMovesToDraw
        )
    }
}
