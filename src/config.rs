use serde::Deserialize;

use crate::error::{Error, Result};

pub const DEFAULT_BOARD_SIZE: u8 = 8;
pub const DEFAULT_HOME_SIZE: u8 = 3;
/// Consecutive non-capturing king moves that end the game in a draw.
pub const MOVES_TO_DRAW: u32 = 6;
/// One column letter per file, `a` to `z`.
pub const MAX_WIDTH: u8 = 26;

/// Session parameters. Missing fields fall back to the standard 8x8 game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub width: u8,
    pub height: u8,
    pub home_size: u8,
    pub moves_to_draw: u32,
}

impl GameConfig {
    pub fn new(width: u8, height: u8, home_size: u8) -> Self {
        Self {
            width,
            height,
            home_size,
            moves_to_draw: MOVES_TO_DRAW,
        }
    }

    pub fn with_moves_to_draw(mut self, moves: u32) -> Self {
        self.moves_to_draw = moves;
        self
    }

    pub fn validate(&self) -> Result<()> {
        validate_dimensions(self.width, self.height)?;
        if self.home_size >= self.height / 2 {
            return Err(Error::InvalidHomeSize {
                home_size: self.home_size,
                height: self.height,
            });
        }
        if self.moves_to_draw == 0 {
            return Err(Error::InvalidMovesToDraw);
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BOARD_SIZE, DEFAULT_BOARD_SIZE, DEFAULT_HOME_SIZE)
    }
}

pub(crate) fn validate_dimensions(width: u8, height: u8) -> Result<()> {
    if width == 0 || width > MAX_WIDTH || height == 0 {
        return Err(Error::InvalidDimensions { width, height });
    }
    Ok(())
}
