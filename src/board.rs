use crate::config::{GameConfig, validate_dimensions};
use crate::error::{Error, Result};
use crate::types::{Cell, Coord, Move, Player};

const DIRECTIONS: [(i8, i8); 4] = [(-1, -1), (1, -1), (-1, 1), (1, 1)];

/// Draughts board: a row-major grid of cells.
///
/// Only squares with `x % 2 == y % 2` are playable; the rest stay empty for
/// the lifetime of the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: u8,
    height: u8,
    cells: Vec<Cell>,
}

impl Board {
    /// Creates the starting position: the first `home_size` rows belong to
    /// player one, the last `home_size` rows to player two.
    pub fn new(width: u8, height: u8, home_size: u8) -> Result<Self> {
        GameConfig::new(width, height, home_size).validate()?;

        let mut board = Self::empty(width, height)?;
        for y in 0..height {
            let owner = if y < home_size {
                Some(Player::One)
            } else if y >= height - home_size {
                Some(Player::Two)
            } else {
                None
            };
            for x in 0..width {
                let idx = board.index(Coord::new(x, y));
                if board.cells[idx].passable {
                    board.cells[idx].owner = owner;
                }
            }
        }

        Ok(board)
    }

    /// Creates a board without any pieces, for setting up positions by hand.
    pub fn empty(width: u8, height: u8) -> Result<Self> {
        validate_dimensions(width, height)?;

        let mut cells = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                cells.push(Cell::empty(is_playable(Coord::new(x, y))));
            }
        }

        Ok(Self {
            width,
            height,
            cells,
        })
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    pub fn contains(&self, pos: Coord) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    pub fn cell(&self, pos: Coord) -> Option<Cell> {
        self.contains(pos).then(|| self.cells[self.index(pos)])
    }

    /// Puts a piece on a playable square, replacing whatever stood there.
    pub fn place(&mut self, pos: Coord, player: Player, king: bool) -> Result<()> {
        let idx = self.playable_index(pos)?;
        self.cells[idx].owner = Some(player);
        self.cells[idx].king = king;
        Ok(())
    }

    pub fn clear(&mut self, pos: Coord) -> Result<()> {
        let idx = self.playable_index(pos)?;
        self.cells[idx] = Cell::empty(true);
        Ok(())
    }

    pub fn has_pieces(&self, player: Player) -> bool {
        self.cells.iter().any(|cell| cell.owner == Some(player))
    }

    pub fn count(&self, player: Player) -> usize {
        self.cells
            .iter()
            .filter(|cell| cell.owner == Some(player))
            .count()
    }

    /// Every move available to `player`, before the mandatory-capture filter.
    pub fn candidate_moves(&self, player: Player) -> Vec<Move> {
        let mut moves = Vec::new();
        for y in 0..self.height {
            for x in 0..self.width {
                let pos = Coord::new(x, y);
                if self.cells[self.index(pos)].owner == Some(player) {
                    self.collect_moves(pos, &mut moves);
                }
            }
        }
        moves
    }

    /// Moves of the piece standing on `pos`; empty when the square is empty.
    pub fn moves_from(&self, pos: Coord) -> Vec<Move> {
        let mut moves = Vec::new();
        if self.contains(pos) {
            self.collect_moves(pos, &mut moves);
        }
        moves
    }

    /// Converts the board to row-major `Cell::code`s.
    pub fn to_codes(&self) -> Vec<u8> {
        self.cells.iter().map(Cell::code).collect()
    }

    /// Moves the piece and empties every square it passed over.
    /// Returns the piece as it was before the move.
    pub(crate) fn relocate(&mut self, mv: Move) -> Cell {
        let from = self.index(mv.from);
        let piece = self.cells[from];
        self.cells[from] = Cell::empty(true);

        let (dx, dy) = mv.from.direction_to(mv.to);
        let mut pos = mv.from;
        while let Some(next) = self.step(pos, dx, dy) {
            if next == mv.to {
                break;
            }
            let idx = self.index(next);
            self.cells[idx] = Cell::empty(true);
            pos = next;
        }

        let to = self.index(mv.to);
        self.cells[to] = piece;
        piece
    }

    pub(crate) fn crown(&mut self, pos: Coord) {
        let idx = self.index(pos);
        self.cells[idx].king = true;
    }

    fn collect_moves(&self, pos: Coord, out: &mut Vec<Move>) {
        let piece = self.cells[self.index(pos)];
        let Some(player) = piece.owner else {
            return;
        };
        let max_steps = if piece.king { usize::MAX } else { 1 };

        for (dx, dy) in DIRECTIONS {
            let mut enemies = 0;
            let mut steps = 0;
            let mut square = pos;

            while let Some(next) = self.step(square, dx, dy) {
                square = next;
                match self.cells[self.index(square)].owner {
                    None => {
                        steps += 1;
                        if piece.king || enemies > 0 || dy == player.forward() {
                            out.push(Move::new(pos, square, enemies > 0));
                        }
                    }
                    Some(owner) if owner == player => break,
                    Some(_) => {
                        enemies += 1;
                        // Only one enemy may be jumped per run.
                        if enemies > 1 {
                            break;
                        }
                    }
                }
                if steps >= max_steps {
                    break;
                }
            }
        }
    }

    fn step(&self, pos: Coord, dx: i8, dy: i8) -> Option<Coord> {
        pos.offset(dx, dy).filter(|next| self.contains(*next))
    }

    fn playable_index(&self, pos: Coord) -> Result<usize> {
        if !self.contains(pos) {
            return Err(Error::OutOfBounds { pos });
        }
        if !is_playable(pos) {
            return Err(Error::UnplayableSquare { pos });
        }
        Ok(self.index(pos))
    }

    fn index(&self, pos: Coord) -> usize {
        pos.y as usize * self.width as usize + pos.x as usize
    }
}

pub fn is_playable(pos: Coord) -> bool {
    pos.x % 2 == pos.y % 2
}
