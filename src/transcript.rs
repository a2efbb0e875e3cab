//! Game transcripts.
//!
//! A transcript is a read-only export of a board's move history in readable
//! notation, suitable for download and for replaying the game later.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::coord::Coord;
use crate::engine::RulesConfig;
use crate::error::{GameError, GameResult};
use crate::moves::{Action, HistoryEntry};
use crate::piece::{Piece, PieceClass, Side, EMPTY_CODE};

/// One ply: `[start, end, piece, target, action]`.
///
/// `piece` is the moved piece's code ("a0"); `target` is the code of whatever
/// stood on `end` beforehand, or "n" if it was empty.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry(pub String, pub String, pub String, pub String, pub Action);

impl From<&HistoryEntry> for LogEntry {
    fn from(entry: &HistoryEntry) -> Self {
        LogEntry(
            entry.from.to_readable(),
            entry.to.to_readable(),
            entry.piece.code(),
            Piece::square_code(entry.displaced),
            entry.action,
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptMeta {
    pub description: String,
    /// Piece and side codes used in the log.
    pub legend: BTreeMap<String, String>,
    pub rules: RulesConfig,
    pub plies: usize,
    pub to_move: Side,
    pub winner: Option<Side>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    pub meta: TranscriptMeta,
    pub game_log: Vec<LogEntry>,
}

fn legend() -> BTreeMap<String, String> {
    let mut legend: BTreeMap<String, String> = PieceClass::ALL
        .iter()
        .map(|class| (class.code().to_string(), class.name().to_string()))
        .collect();
    legend.insert(EMPTY_CODE.to_string(), "empty square".to_string());
    legend.insert("0".to_string(), format!("side 0 ({})", Side::Blue));
    legend.insert("1".to_string(), format!("side 1 ({})", Side::Red));
    legend
}

impl Transcript {
    pub fn from_board(board: &Board) -> Self {
        Transcript {
            meta: TranscriptMeta {
                description: "Game log".to_string(),
                legend: legend(),
                rules: board.rules().clone(),
                plies: board.history().len(),
                to_move: board.current_turn(),
                winner: board.winner(),
            },
            game_log: board.history().iter().map(LogEntry::from).collect(),
        }
    }

    /// Compact JSON.
    pub fn to_json(&self) -> GameResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> GameResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Rebuild the game by applying every logged ply to a fresh board under
    /// the recorded rules.
    ///
    /// Each ply must name the piece actually standing on its start square,
    /// the actual occupant of its end square, and the action the engine
    /// performs.
    pub fn replay(&self) -> GameResult<Board> {
        let mut board = Board::with_rules(self.meta.rules.clone());
        for (index, LogEntry(start, end, piece, target, action)) in self.game_log.iter().enumerate() {
            let ply = index + 1;
            let mismatch = |message: String| GameError::TranscriptMismatch { ply, message };

            let from = Coord::from_readable(start)?;
            let to = Coord::from_readable(end)?;
            let piece = Piece::from_code(piece)?;
            let target = Piece::from_square_code(target)?;

            if board.piece_at(from) != Some(piece) {
                return Err(mismatch(format!(
                    "expected {} on {from}, found {}",
                    piece.code(),
                    Piece::square_code(board.piece_at(from))
                )));
            }
            if board.piece_at(to) != target {
                return Err(mismatch(format!(
                    "expected {} on {to}, found {}",
                    Piece::square_code(target),
                    Piece::square_code(board.piece_at(to))
                )));
            }
            let outcome = board
                .apply_move(from, to)
                .map_err(|e| mismatch(e.to_string()))?;
            if outcome.action != *action {
                return Err(mismatch(format!(
                    "logged as {action}, engine performed {}",
                    outcome.action
                )));
            }
        }
        Ok(board)
    }
}
