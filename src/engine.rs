// =============================================================================
// Move legality engine
//
// Computes the legal-destination grid for one piece. The base geometry comes
// from the piece's movement profile (single steps and unbounded slides), then
// two board-specific rules are layered on top:
//
//   - a piece standing on its own home row may also slide left/right along it;
//   - an opponent piece standing on the opponent's home row can never be
//     taken, whatever the geometry says.
//
// Coordinate system: row 0 = rank 8, col 0 = file a. Side 0 starts on row 0.
// =============================================================================

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::coord::{Coord, BOARD_SIZE};
use crate::moves::Action;
use crate::piece::{DirectionSet, MovementProfile, Piece, PieceClass};

// =============================================================================
// Configuration
// =============================================================================

/// How the defender moves. Both variants cover all eight directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DefenderMovement {
    /// One square at a time.
    Step,
    /// Any distance until blocked.
    Slide,
}

/// Rule knobs that vary between variants of the game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesConfig {
    pub defender: DefenderMovement,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self::standard()
    }
}

impl RulesConfig {
    pub fn new(defender: DefenderMovement) -> Self {
        RulesConfig { defender }
    }

    /// Stepping defenders.
    pub fn standard() -> Self {
        Self::new(DefenderMovement::Step)
    }

    /// Movement profile for a piece. Depends only on class and side (side
    /// only matters for the warrior's forward direction).
    pub fn profile(&self, piece: Piece) -> MovementProfile {
        match piece.class {
            PieceClass::Assassin => MovementProfile::sliding(DirectionSet::DIAGONAL),
            PieceClass::Sniper => MovementProfile::sliding(DirectionSet::ORTHOGONAL),
            PieceClass::Warrior => MovementProfile::stepping(DirectionSet::forward(piece.side)),
            PieceClass::Defender => match self.defender {
                DefenderMovement::Step => MovementProfile::stepping(DirectionSet::ALL),
                DefenderMovement::Slide => MovementProfile::sliding(DirectionSet::ALL),
            },
        }
    }
}

// =============================================================================
// Legal-destination grid
// =============================================================================

/// Boolean mask over the board, indexed `[row][col]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveGrid(pub [[bool; BOARD_SIZE]; BOARD_SIZE]);

impl MoveGrid {
    pub fn new() -> Self {
        MoveGrid::default()
    }

    pub fn get(&self, at: Coord) -> bool {
        self.0[at.row][at.col]
    }

    pub fn set(&mut self, at: Coord, legal: bool) {
        self.0[at.row][at.col] = legal;
    }

    pub fn any(&self) -> bool {
        self.0.iter().flatten().any(|&b| b)
    }

    pub fn count(&self) -> usize {
        self.0.iter().flatten().filter(|&&b| b).count()
    }

    /// Marked squares, row by row.
    pub fn iter(&self) -> impl Iterator<Item = Coord> + '_ {
        Coord::all().filter(move |&c| self.get(c))
    }
}

/// Outcome of a legality query, in the numeric form transport code reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveStatus {
    Ok,
    NoPiece,
    WrongTurn,
    NoLegalMoves,
}

impl MoveStatus {
    pub fn code(self) -> u8 {
        match self {
            MoveStatus::Ok => 0,
            MoveStatus::NoPiece => 1,
            MoveStatus::WrongTurn => 2,
            MoveStatus::NoLegalMoves => 3,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            MoveStatus::Ok => "",
            MoveStatus::NoPiece => "No piece exists at the given position.",
            MoveStatus::WrongTurn => "The piece does not belong to the current player.",
            MoveStatus::NoLegalMoves => "The piece has no legal moves.",
        }
    }
}

/// Status plus grid. The grid is all false unless the status is `Ok`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveQuery {
    pub status: MoveStatus,
    pub grid: MoveGrid,
}

// =============================================================================
// Geometry
// =============================================================================

/// Whether `piece` may finish its move on a square holding `occupant`.
fn can_enter(piece: Piece, occupant: Option<Piece>) -> bool {
    match Action::classify(piece.side, occupant) {
        Action::Move | Action::Capture => true,
        Action::Swap => piece.class.can_swap(),
    }
}

/// Mark squares along one direction until the edge or the first occupant.
/// The occupied square itself is marked only if the piece may enter it.
fn slide(board: &Board, from: Coord, piece: Piece, (dcol, drow): (i32, i32), grid: &mut MoveGrid) {
    for distance in 1..BOARD_SIZE as i32 {
        let Some(to) = from.offset(dcol * distance, drow * distance) else {
            break;
        };
        match board.piece_at(to) {
            None => grid.set(to, true),
            occupant => {
                if can_enter(piece, occupant) {
                    grid.set(to, true);
                }
                break;
            }
        }
    }
}

/// Legal destinations for `piece` standing on `from`, moving by `profile`.
///
/// Does not look at whose turn it is; see [`Board::legal_moves`] for the
/// checked query.
pub fn legal_destinations(
    board: &Board,
    from: Coord,
    piece: Piece,
    profile: &MovementProfile,
) -> MoveGrid {
    let mut grid = MoveGrid::new();

    for (dcol, drow) in profile.step.directions() {
        if let Some(to) = from.offset(dcol, drow) {
            if can_enter(piece, board.piece_at(to)) {
                grid.set(to, true);
            }
        }
    }

    for dir in profile.slide.directions() {
        slide(board, from, piece, dir, &mut grid);
    }

    // Home row: extra sideways slide.
    if from.row == piece.side.home_row() {
        for dir in DirectionSet::LATERAL.directions() {
            slide(board, from, piece, dir, &mut grid);
        }
    }

    // Opponent's home row: their pieces there are untouchable. Applied last so
    // it overrides everything above.
    let guarded = piece.side.opposite();
    let row = guarded.home_row();
    for col in 0..BOARD_SIZE {
        let at = Coord { col, row };
        if board.piece_at(at).is_some_and(|p| p.side == guarded) {
            grid.set(at, false);
        }
    }

    grid
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::Side;

    fn at(text: &str) -> Coord {
        Coord::from_readable(text).unwrap()
    }

    fn marked(grid: &MoveGrid) -> Vec<String> {
        let mut squares: Vec<String> = grid.iter().map(|c| c.to_readable()).collect();
        squares.sort();
        squares
    }

    fn board_with(pieces: &[(&str, PieceClass, Side)]) -> Board {
        let mut board = Board::empty();
        for &(sq, class, side) in pieces {
            board.place(at(sq), Some(Piece::new(class, side)));
        }
        board
    }

    #[test]
    fn profile_table_matches_piece_roles() {
        let rules = RulesConfig::standard();
        let assassin = rules.profile(Piece::new(PieceClass::Assassin, Side::Red));
        assert_eq!(assassin, MovementProfile::sliding(DirectionSet::DIAGONAL));
        let sniper = rules.profile(Piece::new(PieceClass::Sniper, Side::Blue));
        assert_eq!(sniper, MovementProfile::sliding(DirectionSet::ORTHOGONAL));
        let defender = rules.profile(Piece::new(PieceClass::Defender, Side::Blue));
        assert_eq!(defender, MovementProfile::stepping(DirectionSet::ALL));

        let sliding = RulesConfig::new(DefenderMovement::Slide);
        let defender = sliding.profile(Piece::new(PieceClass::Defender, Side::Red));
        assert_eq!(defender, MovementProfile::sliding(DirectionSet::ALL));
    }

    #[test]
    fn step_and_slide_sets_are_disjoint() {
        for rules in [RulesConfig::standard(), RulesConfig::new(DefenderMovement::Slide)] {
            for class in PieceClass::ALL {
                for side in [Side::Blue, Side::Red] {
                    let p = rules.profile(Piece::new(class, side));
                    assert!(!p.step.intersects(&p.slide), "{class:?} {side:?}");
                }
            }
        }
    }

    #[test]
    fn warrior_profile_depends_on_side() {
        let rules = RulesConfig::standard();
        let blue = rules.profile(Piece::new(PieceClass::Warrior, Side::Blue));
        let red = rules.profile(Piece::new(PieceClass::Warrior, Side::Red));
        assert_ne!(blue, red);
        assert!(blue.step.contains(0, 1));
        assert!(red.step.contains(0, -1));
    }

    #[test]
    fn empty_profile_off_home_row_has_no_moves() {
        let board = board_with(&[("d4", PieceClass::Sniper, Side::Blue)]);
        let piece = Piece::new(PieceClass::Sniper, Side::Blue);
        let grid = legal_destinations(&board, at("d4"), piece, &MovementProfile::NONE);
        assert!(!grid.any());
    }

    #[test]
    fn empty_profile_on_home_row_gets_only_lateral_bonus() {
        // Blue's home row is rank 8.
        let board = board_with(&[
            ("d8", PieceClass::Warrior, Side::Blue),
            ("b8", PieceClass::Warrior, Side::Red),
            ("g8", PieceClass::Defender, Side::Blue),
        ]);
        let piece = Piece::new(PieceClass::Warrior, Side::Blue);
        let grid = legal_destinations(&board, at("d8"), piece, &MovementProfile::NONE);
        // Left: c8 empty, b8 enemy (capture). Right: e8, f8 empty, g8 friendly
        // non-swapper blocks.
        assert_eq!(marked(&grid), vec!["b8", "c8", "e8", "f8"]);
    }

    #[test]
    fn slide_stops_at_first_occupant() {
        let board = board_with(&[
            ("a1", PieceClass::Sniper, Side::Red),
            ("a4", PieceClass::Warrior, Side::Blue),
            ("a6", PieceClass::Warrior, Side::Blue),
            ("d1", PieceClass::Warrior, Side::Red),
        ]);
        let piece = Piece::new(PieceClass::Sniper, Side::Red);
        let profile = RulesConfig::standard().profile(piece);
        let grid = legal_destinations(&board, at("a1"), piece, &profile);
        // Up the a-file: a2, a3 empty, a4 enemy capture, a6 never reached.
        // Along rank 1: b1, c1 empty, then the friendly warrior on d1 is a
        // swap target and ends the scan.
        assert_eq!(marked(&grid), vec!["a2", "a3", "a4", "b1", "c1", "d1"]);
        assert!(!grid.get(at("e1")));
        assert!(!grid.get(at("a6")));
    }

    #[test]
    fn swapper_may_land_on_friend_but_warrior_may_not() {
        let board = board_with(&[
            ("d4", PieceClass::Assassin, Side::Blue),
            ("e5", PieceClass::Warrior, Side::Blue),
            ("c3", PieceClass::Warrior, Side::Blue),
        ]);
        let assassin = Piece::new(PieceClass::Assassin, Side::Blue);
        let grid = legal_destinations(
            &board,
            at("d4"),
            assassin,
            &RulesConfig::standard().profile(assassin),
        );
        assert!(grid.get(at("e5")));
        assert!(!grid.get(at("f6")));

        let warrior = Piece::new(PieceClass::Warrior, Side::Blue);
        let grid = legal_destinations(
            &board,
            at("c3"),
            warrior,
            &RulesConfig::standard().profile(warrior),
        );
        // Blue warriors step towards rank 1: b2, c2, d2.
        assert_eq!(marked(&grid), vec!["b2", "c2", "d2"]);
    }

    #[test]
    fn opponent_home_row_pieces_are_immune() {
        // Red's home row is rank 1; Blue cannot take a Red piece there.
        let board = board_with(&[
            ("c3", PieceClass::Sniper, Side::Blue),
            ("c1", PieceClass::Warrior, Side::Red),
            ("d2", PieceClass::Warrior, Side::Red),
        ]);
        let sniper = Piece::new(PieceClass::Sniper, Side::Blue);
        let grid = legal_destinations(
            &board,
            at("c3"),
            sniper,
            &RulesConfig::standard().profile(sniper),
        );
        assert!(grid.get(at("c2")));
        assert!(!grid.get(at("c1")), "piece on its own home row must be immune");

        let defender = Piece::new(PieceClass::Defender, Side::Blue);
        let mut board = board.clone();
        board.place(at("c3"), None);
        board.place(at("c2"), Some(defender));
        let grid = legal_destinations(
            &board,
            at("c2"),
            defender,
            &RulesConfig::standard().profile(defender),
        );
        // b1 and d1 are empty and stay legal; c1 is guarded; d2 is off the
        // guarded row and can be captured.
        assert!(grid.get(at("b1")));
        assert!(grid.get(at("d1")));
        assert!(!grid.get(at("c1")));
        assert!(grid.get(at("d2")));
    }

    #[test]
    fn own_home_row_pieces_are_not_immune() {
        // Blue attacking a Red piece that happens to stand on Blue's home row.
        let board = board_with(&[
            ("a8", PieceClass::Sniper, Side::Blue),
            ("d8", PieceClass::Warrior, Side::Red),
        ]);
        let sniper = Piece::new(PieceClass::Sniper, Side::Blue);
        let grid = legal_destinations(
            &board,
            at("a8"),
            sniper,
            &RulesConfig::standard().profile(sniper),
        );
        assert!(grid.get(at("d8")));
    }

    #[test]
    fn sliding_defender_reaches_further() {
        let board = board_with(&[("d4", PieceClass::Defender, Side::Red)]);
        let defender = Piece::new(PieceClass::Defender, Side::Red);
        let step = legal_destinations(
            &board,
            at("d4"),
            defender,
            &RulesConfig::new(DefenderMovement::Step).profile(defender),
        );
        let slide = legal_destinations(
            &board,
            at("d4"),
            defender,
            &RulesConfig::new(DefenderMovement::Slide).profile(defender),
        );
        assert_eq!(step.count(), 8);
        // Queen-like reach from d4 on an empty board.
        assert_eq!(slide.count(), 27);
        assert!(step.iter().all(|c| slide.get(c)));
    }

    #[test]
    fn status_codes_are_stable() {
        assert_eq!(MoveStatus::Ok.code(), 0);
        assert_eq!(MoveStatus::NoPiece.code(), 1);
        assert_eq!(MoveStatus::WrongTurn.code(), 2);
        assert_eq!(MoveStatus::NoLegalMoves.code(), 3);
    }
}
