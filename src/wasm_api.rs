use crate::board::Board;
use crate::coord::Coord;
use crate::engine::MoveStatus;
use crate::piece::Side;
use crate::transcript::Transcript;
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[derive(Serialize)]
struct SquarePiece {
    pos: [usize; 2],
    side: usize,
    class: String,
}

#[derive(Serialize)]
struct BoardState {
    pieces: Vec<SquarePiece>,
    current_turn: usize,
    is_win: bool,
    winner: Option<usize>,
    plies: usize,
}

#[derive(Serialize)]
struct SelectResult {
    valid: bool,
    status: u8,
    valid_moves: Vec<[usize; 2]>,
    message: String,
}

#[derive(Serialize)]
struct MoveResult {
    success: bool,
    #[serde(flatten)]
    board_state: Option<BoardState>,
    error: Option<String>,
}

fn to_js<T: Serialize>(value: &T) -> JsValue {
    serde_wasm_bindgen::to_value(value).unwrap_or(JsValue::NULL)
}

/// Positions are `[col, row]` in the viewer's orientation.
fn view_pos(c: Coord, viewer: Side) -> [usize; 2] {
    let v = c.to_view(viewer);
    [v.col, v.row]
}

fn build_board_state(board: &Board, viewer: Side) -> BoardState {
    BoardState {
        pieces: board
            .occupants()
            .map(|(c, p)| SquarePiece {
                pos: view_pos(c, viewer),
                side: p.side.index(),
                class: p.class.name().to_string(),
            })
            .collect(),
        current_turn: board.current_turn().index(),
        is_win: board.is_win(),
        winner: board.winner().map(Side::index),
        plies: board.history().len(),
    }
}

#[wasm_bindgen]
pub struct Game {
    board: Board,
    viewer: Side,
}

impl Game {
    fn canonical(&self, col: usize, row: usize) -> Result<Coord, String> {
        Coord::new(col, row)
            .map(|c| c.from_view(self.viewer))
            .map_err(|e| e.to_string())
    }
}

#[wasm_bindgen]
impl Game {
    /// `viewer` is the side (0 or 1) whose orientation coordinates use.
    #[wasm_bindgen(constructor)]
    pub fn new(viewer: usize) -> Game {
        Game {
            board: Board::new(),
            viewer: Side::from_index(viewer).unwrap_or(Side::Blue),
        }
    }

    pub fn new_game(&mut self) -> JsValue {
        self.board.new_game();
        self.get_board_state()
    }

    pub fn get_board_state(&self) -> JsValue {
        to_js(&build_board_state(&self.board, self.viewer))
    }

    pub fn select(&self, col: usize, row: usize) -> JsValue {
        let from = match self.canonical(col, row) {
            Ok(c) => c,
            Err(message) => {
                return to_js(&SelectResult {
                    valid: false,
                    status: MoveStatus::NoPiece.code(),
                    valid_moves: Vec::new(),
                    message,
                })
            }
        };
        let query = self.board.query_moves(from);
        to_js(&SelectResult {
            valid: query.status == MoveStatus::Ok,
            status: query.status.code(),
            valid_moves: query.grid.iter().map(|c| view_pos(c, self.viewer)).collect(),
            message: query.status.message().to_string(),
        })
    }

    pub fn make_move(&mut self, from_col: usize, from_row: usize, to_col: usize, to_row: usize) -> JsValue {
        let failure = |error: String| MoveResult {
            success: false,
            board_state: None,
            error: Some(error),
        };
        if self.board.is_win() {
            return to_js(&failure("Game is already over".to_string()));
        }
        let (from, to) = match (self.canonical(from_col, from_row), self.canonical(to_col, to_row)) {
            (Ok(from), Ok(to)) => (from, to),
            (Err(e), _) | (_, Err(e)) => return to_js(&failure(e)),
        };
        match self.board.apply_move(from, to) {
            Ok(_) => to_js(&MoveResult {
                success: true,
                board_state: Some(build_board_state(&self.board, self.viewer)),
                error: None,
            }),
            Err(e) => to_js(&failure(e.to_string())),
        }
    }

    pub fn undo(&mut self) -> JsValue {
        match self.board.undo() {
            Ok(_) => to_js(&MoveResult {
                success: true,
                board_state: Some(build_board_state(&self.board, self.viewer)),
                error: None,
            }),
            Err(e) => to_js(&MoveResult {
                success: false,
                board_state: None,
                error: Some(e.to_string()),
            }),
        }
    }

    /// Transcript JSON, or an empty string if serialization fails.
    pub fn download_log(&self) -> String {
        Transcript::from_board(&self.board).to_json().unwrap_or_default()
    }
}
