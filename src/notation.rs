//! Textual move notation.
//!
//! A square is its column letter followed by its 1-based row, so `(0, 0)` is
//! `a1`. A simple move is written `c3-d4`, a capture `c3:e5`, and a capture
//! chain keeps appending landing squares: `c3:e5:g7`.

use std::fmt;
use std::str::FromStr;

use crate::config::MAX_WIDTH;
use crate::error::{Error, Result};
use crate::types::{Coord, Move};

const ASCII_LOWER_A: u8 = b'a';
const SIMPLE_SEPARATOR: char = '-';
const CAPTURE_SEPARATOR: char = ':';

impl fmt::Display for Coord {
    /// Columns past `z` only show up in errors about off-board squares; they
    /// print as `#<column>` instead of a letter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.x < MAX_WIDTH {
            write!(f, "{}", (ASCII_LOWER_A + self.x) as char)?;
        } else {
            write!(f, "#{}", self.x)?;
        }
        write!(f, "{}", self.y as u32 + 1)
    }
}

impl FromStr for Coord {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidSquare(s.to_string());

        let mut chars = s.chars();
        let file = chars.next().ok_or_else(invalid)?;
        if !file.is_ascii_lowercase() {
            return Err(invalid());
        }
        let x = file as u8 - ASCII_LOWER_A;
        if x >= MAX_WIDTH {
            return Err(invalid());
        }

        let rank = chars.as_str();
        if rank.is_empty() || !rank.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let row: u16 = rank.parse().map_err(|_| invalid())?;
        if row == 0 || row > u8::MAX as u16 + 1 {
            return Err(invalid());
        }

        Ok(Coord::new(x, (row - 1) as u8))
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let separator = if self.capture {
            CAPTURE_SEPARATOR
        } else {
            SIMPLE_SEPARATOR
        };
        write!(f, "{}{}{}", self.from, separator, self.to)
    }
}

impl FromStr for Move {
    type Err = Error;

    /// Parses a single move. Use [`parse_entry`] for capture chains.
    fn from_str(s: &str) -> Result<Self> {
        match parse_entry(s)?.as_slice() {
            [mv] => Ok(*mv),
            _ => Err(Error::InvalidNotation(s.to_string())),
        }
    }
}

/// Parses one log entry into the moves it records: one move for `c3-d4` or
/// `c3:e5`, one capture per hop for `c3:e5:g7`.
pub fn parse_entry(s: &str) -> Result<Vec<Move>> {
    let invalid = || Error::InvalidNotation(s.to_string());

    if let Some((from, to)) = s.split_once(SIMPLE_SEPARATOR) {
        if to.contains(SIMPLE_SEPARATOR) || s.contains(CAPTURE_SEPARATOR) {
            return Err(invalid());
        }
        let from: Coord = from.parse().map_err(|_| invalid())?;
        let to: Coord = to.parse().map_err(|_| invalid())?;
        return Ok(vec![Move::new(from, to, false)]);
    }

    let squares = s
        .split(CAPTURE_SEPARATOR)
        .map(|part| part.parse::<Coord>().map_err(|_| invalid()))
        .collect::<Result<Vec<_>>>()?;
    if squares.len() < 2 {
        return Err(invalid());
    }

    Ok(squares
        .windows(2)
        .map(|hop| Move::new(hop[0], hop[1], true))
        .collect())
}

/// Renders consecutive moves of one piece as a single entry.
/// Returns `None` for an empty chain or one whose hops are not connected.
pub fn format_chain(moves: &[Move]) -> Option<String> {
    let (first, rest) = moves.split_first()?;
    if !rest.is_empty() && !first.capture {
        return None;
    }
    let mut out = first.to_string();
    let mut at = first.to;
    for mv in rest {
        if mv.from != at || !mv.capture {
            return None;
        }
        out.push(CAPTURE_SEPARATOR);
        out.push_str(&mv.to.to_string());
        at = mv.to;
    }
    Some(out)
}

/// Append-only record of the game in notation form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveLog {
    entries: Vec<String>,
}

impl MoveLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub(crate) fn record(&mut self, mv: Move) {
        self.entries.push(mv.to_string());
    }

    /// Extends the last entry with another landing square of a capture chain.
    /// A chain always starts with a recorded capture, so an empty log is left alone.
    pub(crate) fn extend_chain(&mut self, to: Coord) {
        if let Some(last) = self.entries.last_mut() {
            last.push(CAPTURE_SEPARATOR);
            last.push_str(&to.to_string());
        }
    }
}
