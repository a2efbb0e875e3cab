use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use crate::coord::{Coord, BOARD_SIZE};
use crate::engine::{legal_destinations, MoveGrid, MoveQuery, MoveStatus, RulesConfig};
use crate::error::{GameError, GameResult};
use crate::moves::{Action, HistoryEntry, Move};
use crate::piece::{Piece, PieceClass, Side};

/// Columns of each piece class in a side's starting layout. The home row holds
/// assassins and snipers; the row in front of it holds defenders and warriors.
const HOME_ROW_LAYOUT: [(usize, PieceClass); 4] = [
    (1, PieceClass::Assassin),
    (2, PieceClass::Sniper),
    (5, PieceClass::Sniper),
    (6, PieceClass::Assassin),
];
const FRONT_ROW_LAYOUT: [(usize, PieceClass); 8] = [
    (0, PieceClass::Warrior),
    (1, PieceClass::Warrior),
    (2, PieceClass::Defender),
    (3, PieceClass::Warrior),
    (4, PieceClass::Warrior),
    (5, PieceClass::Defender),
    (6, PieceClass::Warrior),
    (7, PieceClass::Warrior),
];

/// Result of a successfully applied move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    pub action: Action,
    /// The mover, if this move completed a win for them.
    pub winner: Option<Side>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// Occupants indexed `[row][col]`.
    pub squares: [[Option<Piece>; BOARD_SIZE]; BOARD_SIZE],
    pub current_turn: Side,
    history: Vec<HistoryEntry>,
    winner: Option<Side>,
    rules: RulesConfig,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Create an empty board with no pieces, side 0 to move. Useful for
    /// setting up test positions.
    pub fn empty() -> Self {
        Self::empty_with_rules(RulesConfig::standard())
    }

    pub fn empty_with_rules(rules: RulesConfig) -> Self {
        Board {
            squares: [[None; BOARD_SIZE]; BOARD_SIZE],
            current_turn: Side::Blue,
            history: Vec::new(),
            winner: None,
            rules,
        }
    }

    /// Standard starting layout under the standard rules.
    pub fn new() -> Self {
        Self::with_rules(RulesConfig::standard())
    }

    /// Standard starting layout, side 0 to move. Side 1's layout mirrors
    /// side 0's across the middle of the board.
    pub fn with_rules(rules: RulesConfig) -> Self {
        let mut board = Board::empty_with_rules(rules);
        for side in [Side::Blue, Side::Red] {
            let home = side.home_row();
            let front = (home as i32 + side.forward()) as usize;
            for (col, class) in HOME_ROW_LAYOUT {
                board.squares[home][col] = Some(Piece::new(class, side));
            }
            for (col, class) in FRONT_ROW_LAYOUT {
                board.squares[front][col] = Some(Piece::new(class, side));
            }
        }
        board
    }

    /// Replace the game with a fresh one under the same rules.
    pub fn new_game(&mut self) {
        *self = Self::with_rules(self.rules.clone());
        debug!("new game");
    }

    pub fn rules(&self) -> &RulesConfig {
        &self.rules
    }

    pub fn piece_at(&self, at: Coord) -> Option<Piece> {
        self.squares[at.row][at.col]
    }

    /// Put `piece` (or nothing) on a square. Editing the position this way
    /// forgets the move history and any recorded winner.
    pub fn place(&mut self, at: Coord, piece: Option<Piece>) {
        self.squares[at.row][at.col] = piece;
        self.history.clear();
        self.winner = None;
    }

    pub fn current_turn(&self) -> Side {
        self.current_turn
    }

    /// Applied moves, oldest first.
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    pub fn is_win(&self) -> bool {
        self.winner.is_some()
    }

    /// Every occupied square with its piece, row by row.
    pub fn occupants(&self) -> impl Iterator<Item = (Coord, Piece)> + '_ {
        Coord::all().filter_map(move |c| self.piece_at(c).map(|p| (c, p)))
    }

    // =========================================================================
    // Legality
    // =========================================================================

    /// Legal destinations for the piece on `from`.
    ///
    /// Fails with `NoPiece` if the square is empty, `WrongTurn` if the piece
    /// belongs to the side not on move, and `NoLegalMoves` if it has nowhere
    /// to go, in that order.
    pub fn legal_moves(&self, from: Coord) -> GameResult<MoveGrid> {
        let piece = self.piece_at(from).ok_or(GameError::NoPiece { at: from })?;
        if piece.side != self.current_turn {
            return Err(GameError::WrongTurn {
                at: from,
                to_move: self.current_turn,
            });
        }
        let grid = legal_destinations(self, from, piece, &self.rules.profile(piece));
        trace!(square = %from, destinations = grid.count(), "legal moves");
        if grid.any() {
            Ok(grid)
        } else {
            Err(GameError::NoLegalMoves { at: from })
        }
    }

    /// [`Board::legal_moves`] flattened into a status code and a grid that is
    /// all false on failure.
    pub fn query_moves(&self, from: Coord) -> MoveQuery {
        let status = match self.legal_moves(from) {
            Ok(grid) => {
                return MoveQuery {
                    status: MoveStatus::Ok,
                    grid,
                }
            }
            Err(GameError::NoPiece { .. }) => MoveStatus::NoPiece,
            Err(GameError::WrongTurn { .. }) => MoveStatus::WrongTurn,
            Err(_) => MoveStatus::NoLegalMoves,
        };
        MoveQuery {
            status,
            grid: MoveGrid::new(),
        }
    }

    /// Every legal move for the side to move.
    pub fn all_legal_moves(&self) -> Vec<Move> {
        let mut moves = Vec::new();
        for (from, piece) in self.occupants() {
            if piece.side != self.current_turn {
                continue;
            }
            let grid = legal_destinations(self, from, piece, &self.rules.profile(piece));
            moves.extend(grid.iter().map(|to| Move::new(from, to)));
        }
        moves
    }

    // =========================================================================
    // Execution
    // =========================================================================

    /// Move the piece on `from` to `to`.
    ///
    /// `to` must be in the piece's legal grid. Landing on a friend swaps the
    /// two pieces; landing on an enemy removes it. The mover's win is checked
    /// before the turn passes. On any error the board is untouched.
    pub fn apply_move(&mut self, from: Coord, to: Coord) -> GameResult<MoveOutcome> {
        let piece = self.piece_at(from).ok_or(GameError::NoPiece { at: from })?;
        let mover = self.current_turn;
        if piece.side != mover {
            debug!(from = %from, to = %to, "rejected move: wrong turn");
            return Err(GameError::WrongTurn {
                at: from,
                to_move: mover,
            });
        }
        let grid = legal_destinations(self, from, piece, &self.rules.profile(piece));
        if !grid.get(to) {
            debug!(from = %from, to = %to, "rejected move: illegal destination");
            return Err(GameError::IllegalDestination { from, to });
        }

        let displaced = self.piece_at(to);
        let action = Action::classify(mover, displaced);
        self.squares[to.row][to.col] = Some(piece);
        self.squares[from.row][from.col] = match action {
            Action::Swap => displaced,
            Action::Move | Action::Capture => None,
        };
        self.history.push(HistoryEntry {
            from,
            to,
            piece,
            displaced,
            action,
            prior_winner: self.winner,
        });

        let won = self.check_win(mover);
        if won && self.winner.is_none() {
            self.winner = Some(mover);
            info!(winner = %mover, plies = self.history.len(), "game won");
        }
        self.current_turn = mover.opposite();
        debug!(from = %from, to = %to, piece = %piece.code(), action = %action, "applied move");

        Ok(MoveOutcome {
            action,
            winner: won.then_some(mover),
        })
    }

    /// Take back the most recent move. Single step; there is no redo.
    pub fn undo(&mut self) -> GameResult<HistoryEntry> {
        let entry = self.history.pop().ok_or(GameError::EmptyHistory)?;
        self.squares[entry.from.row][entry.from.col] = Some(entry.piece);
        self.squares[entry.to.row][entry.to.col] = entry.displaced;
        self.current_turn = entry.piece.side;
        self.winner = entry.prior_winner;
        debug!(from = %entry.from, to = %entry.to, action = %entry.action, "undid move");
        Ok(entry)
    }

    // =========================================================================
    // Win detection
    // =========================================================================

    /// True once `side` has at least two pieces on the opponent's home row.
    pub fn check_win(&self, side: Side) -> bool {
        let row = side.opposite().home_row();
        let mut count = 0;
        for col in 0..BOARD_SIZE {
            if self.squares[row][col].is_some_and(|p| p.side == side) {
                count += 1;
                if count == 2 {
                    return true;
                }
            }
        }
        false
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, cells) in self.squares.iter().enumerate() {
            write!(f, "{} |", BOARD_SIZE - row)?;
            for cell in cells {
                match cell {
                    Some(p) => write!(f, " {}", p.code())?,
                    None => write!(f, " ..")?,
                }
            }
            writeln!(f)?;
        }
        write!(f, "   ")?;
        for col in 0..BOARD_SIZE {
            write!(f, "  {}", (b'a' + col as u8) as char)?;
        }
        writeln!(f)
    }
}
