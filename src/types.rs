use serde::Serialize;

use crate::error::Error;

/// One of the two sides. Player one starts at the low rows and moves towards
/// larger `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    One = 1,
    Two = 2,
}

impl Player {
    pub fn id(self) -> u8 {
        self as u8
    }

    pub fn opponent(self) -> Self {
        match self {
            Self::One => Self::Two,
            Self::Two => Self::One,
        }
    }

    /// Vertical direction a man of this side walks in.
    pub fn forward(self) -> i8 {
        match self {
            Self::One => 1,
            Self::Two => -1,
        }
    }

    /// Row on which a man of this side is crowned.
    pub fn promotion_row(self, height: u8) -> u8 {
        match self {
            Self::One => height - 1,
            Self::Two => 0,
        }
    }
}

impl TryFrom<u8> for Player {
    type Error = Error;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        match id {
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            _ => Err(Error::InvalidPlayer(id)),
        }
    }
}

/// A board coordinate, `x` is the column and `y` the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Coord {
    pub x: u8,
    pub y: u8,
}

impl Coord {
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// Moves by `(dx, dy)`; `None` when the result would be negative.
    /// The upper bound is the board's business.
    pub fn offset(self, dx: i8, dy: i8) -> Option<Self> {
        Some(Self {
            x: self.x.checked_add_signed(dx)?,
            y: self.y.checked_add_signed(dy)?,
        })
    }

    /// Unit diagonal step from `self` towards `to`.
    pub fn direction_to(self, to: Coord) -> (i8, i8) {
        (sign(self.x, to.x), sign(self.y, to.y))
    }
}

fn sign(from: u8, to: u8) -> i8 {
    match to.cmp(&from) {
        std::cmp::Ordering::Less => -1,
        std::cmp::Ordering::Equal => 0,
        std::cmp::Ordering::Greater => 1,
    }
}

/// Contents of one board square.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub passable: bool,
    pub king: bool,
    pub owner: Option<Player>,
}

impl Cell {
    pub(crate) fn empty(passable: bool) -> Self {
        Self {
            passable,
            king: false,
            owner: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.owner.is_none()
    }

    /// 0 = empty, 1/2 = man, 3/4 = king of player 1/2.
    pub fn code(&self) -> u8 {
        match self.owner {
            None => 0,
            Some(player) if self.king => player.id() + 2,
            Some(player) => player.id(),
        }
    }
}

/// A single step of play. `capture` is set when the move jumps an enemy piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Move {
    pub from: Coord,
    pub to: Coord,
    pub capture: bool,
}

impl Move {
    pub fn new(from: Coord, to: Coord, capture: bool) -> Self {
        Self { from, to, capture }
    }
}

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Draw,
    Winner(Player),
}

impl Outcome {
    /// 0 for a draw, otherwise the winning player's id.
    pub fn id(self) -> u8 {
        match self {
            Self::Draw => 0,
            Self::Winner(player) => player.id(),
        }
    }
}

/// Where the game is in its turn cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// The current player may move any piece.
    Turn,
    /// The piece on `origin` just captured and must keep capturing.
    Streak { origin: Coord },
    Ended { outcome: Outcome },
}

impl Phase {
    pub fn name(self) -> &'static str {
        match self {
            Self::Turn => "turn",
            Self::Streak { .. } => "streak",
            Self::Ended { .. } => "ended",
        }
    }
}

/// Public game state returned from WASM APIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    pub width: u8,
    pub height: u8,
    /// Row-major `Cell::code` of every square.
    pub board: Vec<u8>,
    pub current_player: u8,
    pub player_one_count: u32,
    pub player_two_count: u32,
    pub phase: &'static str,
    pub streak_origin: Option<Coord>,
    /// Contract:
    /// - `None` while the game is running.
    /// - `Some(0)` for a draw, `Some(player)` for a win.
    pub winner: Option<u8>,
    pub moves_until_draw: u32,
    pub notation: Vec<String>,
}
