use std::fmt;

use crate::board::Board;
use crate::checks::square_attacked;
use crate::types::{Color, Direction, Move, Piece, PieceType, Square};

/// File the king starts on
const KING_HOME_COL: u8 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastleSide {
    Kingside,
    Queenside,
}

impl CastleSide {
    pub const BOTH: [CastleSide; 2] = [CastleSide::Kingside, CastleSide::Queenside];

    fn rook_col(&self) -> u8 {
        match self {
            Self::Kingside => 7,
            Self::Queenside => 0,
        }
    }

    /// Column step from the king toward the rook
    fn step(&self) -> i8 {
        match self {
            Self::Kingside => 1,
            Self::Queenside => -1,
        }
    }

    /// Squares (counted from the king) that must be empty
    fn empty_span(&self) -> i8 {
        match self {
            Self::Kingside => 2,
            Self::Queenside => 3,
        }
    }
}

pub fn king_home(color: Color) -> Square {
    Square::new(color.back_row(), KING_HOME_COL)
}

pub fn rook_home(color: Color, side: CastleSide) -> Square {
    Square::new(color.back_row(), side.rook_col())
}

/// Castling eligibility per color and side. Rights are only ever revoked by
/// moves; `undo_move` restores them from the history log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CastlingRights {
    pub white_kingside: bool,
    pub white_queenside: bool,
    pub black_kingside: bool,
    pub black_queenside: bool,
}

impl Default for CastlingRights {
    fn default() -> Self {
        Self::ALL
    }
}

impl CastlingRights {
    pub const ALL: CastlingRights = CastlingRights {
        white_kingside: true,
        white_queenside: true,
        black_kingside: true,
        black_queenside: true,
    };

    pub const NONE: CastlingRights = CastlingRights {
        white_kingside: false,
        white_queenside: false,
        black_kingside: false,
        black_queenside: false,
    };

    pub fn has(&self, color: Color, side: CastleSide) -> bool {
        match (color, side) {
            (Color::White, CastleSide::Kingside) => self.white_kingside,
            (Color::White, CastleSide::Queenside) => self.white_queenside,
            (Color::Black, CastleSide::Kingside) => self.black_kingside,
            (Color::Black, CastleSide::Queenside) => self.black_queenside,
        }
    }

    pub fn revoke(&mut self, color: Color, side: CastleSide) {
        let right = match (color, side) {
            (Color::White, CastleSide::Kingside) => &mut self.white_kingside,
            (Color::White, CastleSide::Queenside) => &mut self.white_queenside,
            (Color::Black, CastleSide::Kingside) => &mut self.black_kingside,
            (Color::Black, CastleSide::Queenside) => &mut self.black_queenside,
        };
        *right = false;
    }

    /// True if every right held here is also held by `other`
    pub fn is_subset_of(&self, other: &CastlingRights) -> bool {
        [Color::White, Color::Black].into_iter().all(|color| {
            CastleSide::BOTH
                .into_iter()
                .all(|side| !self.has(color, side) || other.has(color, side))
        })
    }

    /// Rights left after `mv` is played.
    ///
    /// A king move drops both rights of its color, a rook leaving its home
    /// corner drops that side, and a rook captured on its home corner drops the
    /// owner's right on that side, whoever captured it.
    pub fn after_move(&self, mv: &Move) -> CastlingRights {
        let mut rights = *self;
        let mover = mv.piece_moved;
        match mover.piece_type {
            PieceType::King => {
                rights.revoke(mover.color, CastleSide::Kingside);
                rights.revoke(mover.color, CastleSide::Queenside);
            }
            PieceType::Rook => {
                if let Some(side) = home_rook_side(mover.color, mv.start) {
                    rights.revoke(mover.color, side);
                }
            }
            _ => {}
        }
        if let Some(captured) = mv.piece_captured {
            if captured.piece_type == PieceType::Rook {
                if let Some(side) = home_rook_side(captured.color, mv.end) {
                    rights.revoke(captured.color, side);
                }
            }
        }
        rights
    }

    /// Drop the rights whose king or rook is not standing on its home square
    pub fn restricted_to(&self, board: &Board) -> CastlingRights {
        let mut rights = *self;
        for color in [Color::White, Color::Black] {
            let king_home = board
                .piece_at(king_home(color))
                .is_some_and(|p| p.is(color, PieceType::King));
            for side in CastleSide::BOTH {
                let rook_home = board
                    .piece_at(rook_home(color, side))
                    .is_some_and(|p| p.is(color, PieceType::Rook));
                if !(king_home && rook_home) {
                    rights.revoke(color, side);
                }
            }
        }
        rights
    }
}

impl fmt::Display for CastlingRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flags = [
            (self.white_kingside, 'K'),
            (self.white_queenside, 'Q'),
            (self.black_kingside, 'k'),
            (self.black_queenside, 'q'),
        ];
        let held: String = flags.iter().filter(|(on, _)| *on).map(|(_, c)| c).collect();
        if held.is_empty() {
            write!(f, "-")
        } else {
            write!(f, "{}", held)
        }
    }
}

fn home_rook_side(color: Color, square: Square) -> Option<CastleSide> {
    CastleSide::BOTH
        .into_iter()
        .find(|side| rook_home(color, *side) == square)
}

/// Rook start and end squares for a castle move
pub fn rook_squares(mv: &Move) -> (Square, Square) {
    let row = mv.end.row;
    if mv.end.col > mv.start.col {
        (Square::new(row, mv.end.col + 1), Square::new(row, mv.end.col - 1))
    } else {
        (Square::new(row, mv.end.col - 2), Square::new(row, mv.end.col + 1))
    }
}

/// Append the castle moves available to the king of `color` standing on `king`.
///
/// Nothing is offered while the king is attacked. Every square between king
/// and rook must be empty, and the squares the king crosses or lands on must
/// not be attacked.
pub fn castle_moves(
    board: &Board,
    king: Square,
    color: Color,
    rights: CastlingRights,
    moves: &mut Vec<Move>,
) {
    if king != king_home(color) || square_attacked(board, king, color) {
        return;
    }
    let king_piece = Piece::new(color, PieceType::King);
    for side in CastleSide::BOTH {
        if !rights.has(color, side) || !side_is_open(board, king, color, side) {
            continue;
        }
        if let Some(end) = king.offset(Direction::new(0, 2 * side.step())) {
            moves.push(Move::new_castle(king, end, king_piece));
        }
    }
}

fn side_is_open(board: &Board, king: Square, color: Color, side: CastleSide) -> bool {
    let rook_in_place = board
        .piece_at(rook_home(color, side))
        .is_some_and(|p| p.is(color, PieceType::Rook));
    if !rook_in_place {
        return false;
    }
    let along = |n: i8| king.offset(Direction::new(0, n * side.step()));
    let empty = (1..=side.empty_span()).all(|n| along(n).is_some_and(|sq| board.is_empty(sq)));
    // the king only ever crosses two squares, b1/b8 may be attacked
    empty && (1..=2).all(|n| along(n).is_some_and(|sq| !square_attacked(board, sq, color)))
}
