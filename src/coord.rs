use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{GameError, GameResult};
use crate::piece::Side;

pub const BOARD_SIZE: usize = 8;

/// A square on the board in index form.
///
/// Column 0 is file `a`, row 0 is rank 8, so `(0, 0)` reads as `"a8"` and
/// `(7, 7)` as `"h1"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub col: usize,
    pub row: usize,
}

impl Coord {
    pub fn new(col: usize, row: usize) -> GameResult<Coord> {
        if col < BOARD_SIZE && row < BOARD_SIZE {
            Ok(Coord { col, row })
        } else {
            Err(GameError::OutOfBounds { col, row })
        }
    }

    /// Step by a signed offset, returning `None` once it leaves the board.
    pub fn offset(self, dcol: i32, drow: i32) -> Option<Coord> {
        let col = self.col as i32 + dcol;
        let row = self.row as i32 + drow;
        if (0..BOARD_SIZE as i32).contains(&col) && (0..BOARD_SIZE as i32).contains(&row) {
            Some(Coord {
                col: col as usize,
                row: row as usize,
            })
        } else {
            None
        }
    }

    /// All 64 squares, row by row.
    pub fn all() -> impl Iterator<Item = Coord> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| Coord { col, row }))
    }

    /// Readable notation, e.g. "e4".
    pub fn to_readable(self) -> String {
        let file = (b'a' + self.col as u8) as char;
        let rank = BOARD_SIZE - self.row;
        format!("{file}{rank}")
    }

    /// Parse readable notation. Exactly one file letter `a`-`h` followed by
    /// one rank digit `1`-`8`.
    pub fn from_readable(text: &str) -> GameResult<Coord> {
        let format_error = || GameError::Format {
            input: text.to_string(),
        };
        let bytes = text.trim().as_bytes();
        if bytes.len() != 2 {
            return Err(format_error());
        }
        let (file, rank) = (bytes[0], bytes[1]);
        if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
            return Err(format_error());
        }
        Ok(Coord {
            col: (file - b'a') as usize,
            row: BOARD_SIZE - (rank - b'0') as usize,
        })
    }

    /// Map a square as seen by `viewer` into the canonical orientation.
    ///
    /// Side 0 sees the board turned half a revolution so its own pieces sit
    /// at the bottom of the screen; side 1 sees it unrotated.
    pub fn from_view(self, viewer: Side) -> Coord {
        match viewer {
            Side::Blue => Coord {
                col: BOARD_SIZE - 1 - self.col,
                row: BOARD_SIZE - 1 - self.row,
            },
            Side::Red => self,
        }
    }

    /// Inverse of [`Coord::from_view`]. The rotation is its own inverse.
    pub fn to_view(self, viewer: Side) -> Coord {
        self.from_view(viewer)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_readable())
    }
}

impl FromStr for Coord {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Coord::from_readable(s)
    }
}
