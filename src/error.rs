//! Error types for the game engine.
//!
//! Every failure the engine can report is a `GameError` value. Failed
//! operations leave the board exactly as it was.

use crate::coord::Coord;
use crate::piece::Side;

#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// The queried square holds no piece.
    #[error("no piece at {at}")]
    NoPiece { at: Coord },

    /// The piece on the square belongs to the side not on move.
    #[error("piece at {at} does not belong to {to_move}, who is to move")]
    WrongTurn { at: Coord, to_move: Side },

    /// The piece belongs to the mover but has nowhere to go.
    #[error("piece at {at} has no legal moves")]
    NoLegalMoves { at: Coord },

    #[error("{to} is not a legal destination for the piece at {from}")]
    IllegalDestination { from: Coord, to: Coord },

    #[error("no moves to undo")]
    EmptyHistory,

    /// Text that is not a readable square such as "e4".
    #[error("malformed square notation: {input:?}")]
    Format { input: String },

    #[error("square ({col}, {row}) is off the board")]
    OutOfBounds { col: usize, row: usize },

    #[error("unknown piece code: {code:?}")]
    InvalidPieceCode { code: String },

    /// A transcript entry disagrees with what the engine does at that ply.
    #[error("transcript diverges at ply {ply}: {message}")]
    TranscriptMismatch { ply: usize, message: String },

    #[error("transcript JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for engine operations
pub type GameResult<T> = Result<T, GameError>;
