use std::fmt;

use serde::{Deserialize, Serialize};

use crate::coord::BOARD_SIZE;
use crate::error::{GameError, GameResult};

/// One of the two players. `Blue` is side 0 and moves first; `Red` is side 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Blue,
    Red,
}

impl Side {
    pub fn index(self) -> usize {
        match self {
            Side::Blue => 0,
            Side::Red => 1,
        }
    }

    pub fn from_index(index: usize) -> Option<Side> {
        match index {
            0 => Some(Side::Blue),
            1 => Some(Side::Red),
            _ => None,
        }
    }

    pub fn opposite(self) -> Side {
        match self {
            Side::Blue => Side::Red,
            Side::Red => Side::Blue,
        }
    }

    /// The row this side's pieces start on. The same row is the target of the
    /// opponent's win condition and is covered by this side's immunity.
    pub fn home_row(self) -> usize {
        match self {
            Side::Blue => 0,
            Side::Red => BOARD_SIZE - 1,
        }
    }

    /// Row delta pointing away from the home row.
    pub fn forward(self) -> i32 {
        match self {
            Side::Blue => 1,
            Side::Red => -1,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Blue => f.write_str("Blue"),
            Side::Red => f.write_str("Red"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceClass {
    Assassin,
    Sniper,
    Warrior,
    Defender,
}

impl PieceClass {
    pub const ALL: [PieceClass; 4] = [
        PieceClass::Assassin,
        PieceClass::Sniper,
        PieceClass::Warrior,
        PieceClass::Defender,
    ];

    pub fn code(self) -> char {
        match self {
            PieceClass::Assassin => 'a',
            PieceClass::Sniper => 's',
            PieceClass::Warrior => 'w',
            PieceClass::Defender => 'd',
        }
    }

    pub fn from_code(code: char) -> Option<PieceClass> {
        match code {
            'a' => Some(PieceClass::Assassin),
            's' => Some(PieceClass::Sniper),
            'w' => Some(PieceClass::Warrior),
            'd' => Some(PieceClass::Defender),
            _ => None,
        }
    }

    /// Assassins and snipers may move onto a friendly piece and trade places
    /// with it.
    pub fn can_swap(self) -> bool {
        matches!(self, PieceClass::Assassin | PieceClass::Sniper)
    }

    pub fn name(self) -> &'static str {
        match self {
            PieceClass::Assassin => "assassin",
            PieceClass::Sniper => "sniper",
            PieceClass::Warrior => "warrior",
            PieceClass::Defender => "defender",
        }
    }
}

/// Transcript marker for an empty square.
pub const EMPTY_CODE: &str = "n";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub class: PieceClass,
    pub side: Side,
}

impl Piece {
    pub fn new(class: PieceClass, side: Side) -> Self {
        Piece { class, side }
    }

    /// Two-character code: class letter then side digit, e.g. "a0", "w1".
    pub fn code(self) -> String {
        format!("{}{}", self.class.code(), self.side.index())
    }

    pub fn from_code(code: &str) -> GameResult<Piece> {
        let invalid = || GameError::InvalidPieceCode {
            code: code.to_string(),
        };
        let mut chars = code.chars();
        let (Some(class), Some(side), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(invalid());
        };
        let class = PieceClass::from_code(class).ok_or_else(invalid)?;
        let side = side
            .to_digit(10)
            .and_then(|d| Side::from_index(d as usize))
            .ok_or_else(invalid)?;
        Ok(Piece { class, side })
    }

    /// Code for an optional occupant, with `"n"` standing for empty.
    pub fn square_code(occupant: Option<Piece>) -> String {
        occupant.map_or_else(|| EMPTY_CODE.to_string(), Piece::code)
    }

    /// Inverse of [`Piece::square_code`].
    pub fn from_square_code(code: &str) -> GameResult<Option<Piece>> {
        if code == EMPTY_CODE {
            Ok(None)
        } else {
            Piece::from_code(code).map(Some)
        }
    }
}

// =============================================================================
// Movement profiles
// =============================================================================

/// Set of relative directions around a piece, as a 3x3 matrix.
///
/// Matrix rows are up / level / down (row delta -1, 0, +1) and columns are
/// left / centre / right (column delta -1, 0, +1). The centre cell is never
/// set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectionSet(pub [[bool; 3]; 3]);

impl DirectionSet {
    pub const EMPTY: DirectionSet = DirectionSet([[false; 3]; 3]);

    pub const DIAGONAL: DirectionSet = DirectionSet([
        [true, false, true],
        [false, false, false],
        [true, false, true],
    ]);

    pub const ORTHOGONAL: DirectionSet = DirectionSet([
        [false, true, false],
        [true, false, true],
        [false, true, false],
    ]);

    pub const ALL: DirectionSet = DirectionSet([
        [true, true, true],
        [true, false, true],
        [true, true, true],
    ]);

    /// Left and right along the current row.
    pub const LATERAL: DirectionSet = DirectionSet([
        [false, false, false],
        [true, false, true],
        [false, false, false],
    ]);

    /// The three squares ahead of `side`: forward-left, forward, forward-right.
    pub fn forward(side: Side) -> DirectionSet {
        let mut set = DirectionSet::EMPTY;
        let ahead = (side.forward() + 1) as usize;
        set.0[ahead] = [true, true, true];
        set
    }

    pub fn contains(&self, dcol: i32, drow: i32) -> bool {
        if (dcol == 0 && drow == 0) || dcol.abs() > 1 || drow.abs() > 1 {
            return false;
        }
        self.0[(drow + 1) as usize][(dcol + 1) as usize]
    }

    /// Flagged directions as `(dcol, drow)` unit offsets.
    pub fn directions(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        (-1..=1)
            .flat_map(|drow| (-1..=1).map(move |dcol| (dcol, drow)))
            .filter(move |&(dcol, drow)| self.contains(dcol, drow))
    }

    pub fn is_empty(&self) -> bool {
        self.directions().next().is_none()
    }

    pub fn intersects(&self, other: &DirectionSet) -> bool {
        self.directions().any(|(dcol, drow)| other.contains(dcol, drow))
    }
}

/// How a piece moves: one square in each `step` direction, or any distance
/// in each `slide` direction until blocked.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementProfile {
    pub step: DirectionSet,
    pub slide: DirectionSet,
}

impl MovementProfile {
    pub const NONE: MovementProfile = MovementProfile {
        step: DirectionSet::EMPTY,
        slide: DirectionSet::EMPTY,
    };

    pub const fn stepping(step: DirectionSet) -> Self {
        MovementProfile {
            step,
            slide: DirectionSet::EMPTY,
        }
    }

    pub const fn sliding(slide: DirectionSet) -> Self {
        MovementProfile {
            step: DirectionSet::EMPTY,
            slide,
        }
    }
}
