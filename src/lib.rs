pub mod board;
pub mod coord;
pub mod engine;
pub mod error;
pub mod moves;
pub mod piece;
pub mod transcript;

#[cfg(target_arch = "wasm32")]
mod wasm_api;

pub use board::{Board, MoveOutcome};
pub use coord::Coord;
pub use engine::{DefenderMovement, MoveGrid, MoveQuery, MoveStatus, RulesConfig};
pub use error::{GameError, GameResult};
pub use moves::{Action, HistoryEntry, Move};
pub use piece::{Piece, PieceClass, Side};
pub use transcript::Transcript;
