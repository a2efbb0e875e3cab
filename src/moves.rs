use std::fmt;

use serde::{Deserialize, Serialize};

use crate::coord::Coord;
use crate::error::{GameError, GameResult};
use crate::piece::{Piece, Side};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Coord,
    pub to: Coord,
}

impl Move {
    pub fn new(from: Coord, to: Coord) -> Self {
        Move { from, to }
    }

    /// Readable start followed by readable end, e.g. "b8c7".
    pub fn to_notation(&self) -> String {
        format!("{}{}", self.from, self.to)
    }

    /// Parse from notation produced by [`Move::to_notation`].
    pub fn from_notation(s: &str) -> GameResult<Move> {
        let s = s.trim();
        if s.len() != 4 || !s.is_ascii() {
            return Err(GameError::Format {
                input: s.to_string(),
            });
        }
        Ok(Move {
            from: Coord::from_readable(&s[..2])?,
            to: Coord::from_readable(&s[2..])?,
        })
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

/// What a move does to the destination square.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Destination was empty.
    Move,
    /// Destination held a friendly piece, which moves to the start square.
    Swap,
    /// Destination held an enemy piece, which is removed.
    Capture,
}

impl Action {
    /// Classify a move by `mover` onto a square holding `occupant`.
    ///
    /// This is the only place the empty / friendly / enemy distinction is
    /// made; the legality engine and move execution both go through it.
    pub fn classify(mover: Side, occupant: Option<Piece>) -> Action {
        match occupant {
            None => Action::Move,
            Some(p) if p.side == mover => Action::Swap,
            Some(_) => Action::Capture,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Action::Move => "move",
            Action::Swap => "swap",
            Action::Capture => "capture",
        }
    }

    pub fn from_name(name: &str) -> Option<Action> {
        match name {
            "move" => Some(Action::Move),
            "swap" => Some(Action::Swap),
            "capture" => Some(Action::Capture),
            _ => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One applied move, with enough recorded to reverse it exactly.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub from: Coord,
    pub to: Coord,
    pub piece: Piece,
    /// Occupant of `to` before the move: the swapped friend or the captured
    /// enemy.
    pub displaced: Option<Piece>,
    pub action: Action,
    /// Winner flag as it stood before this move.
    pub prior_winner: Option<Side>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::PieceClass;

    #[test]
    fn notation_round_trip() {
        let mv = Move::from_notation("b8c7").unwrap();
        assert_eq!(mv.from, Coord { col: 1, row: 0 });
        assert_eq!(mv.to, Coord { col: 2, row: 1 });
        assert_eq!(mv.to_notation(), "b8c7");
        assert_eq!(mv.to_string(), "b8c7");
    }

    #[test]
    fn bad_notation_is_a_format_error() {
        for bad in ["", "b8", "b8c", "b8c9", "z1a1", "b8c7d"] {
            assert!(
                matches!(Move::from_notation(bad), Err(GameError::Format { .. })),
                "{bad:?}"
            );
        }
    }

    #[test]
    fn classification_follows_the_occupant() {
        let friend = Piece::new(PieceClass::Warrior, Side::Blue);
        let enemy = Piece::new(PieceClass::Warrior, Side::Red);
        assert_eq!(Action::classify(Side::Blue, None), Action::Move);
        assert_eq!(Action::classify(Side::Blue, Some(friend)), Action::Swap);
        assert_eq!(Action::classify(Side::Blue, Some(enemy)), Action::Capture);
        assert_eq!(Action::classify(Side::Red, Some(friend)), Action::Capture);
    }

    #[test]
    fn action_names_match_serde() {
        for action in [Action::Move, Action::Swap, Action::Capture] {
            let json = serde_json::to_string(&action).unwrap();
            assert_eq!(json, format!("\"{}\"", action.name()));
            assert_eq!(Action::from_name(action.name()), Some(action));
        }
    }
}
