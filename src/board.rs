use std::fmt;

use itertools::Itertools;

use crate::error::ChessError;
use crate::types::{Color, Piece, PieceType, Square};

/// Starting layout, row 0 (black's back rank) first.
pub const STARTING_LAYOUT: [&str; 8] = [
    "bR bN bB bQ bK bB bN bR",
    "bp bp bp bp bp bp bp bp",
    "-- -- -- -- -- -- -- --",
    "-- -- -- -- -- -- -- --",
    "-- -- -- -- -- -- -- --",
    "-- -- -- -- -- -- -- --",
    "wp wp wp wp wp wp wp wp",
    "wR wN wB wQ wK wB wN wR",
];

const BACK_RANK: [PieceType; 8] = [
    PieceType::Rook,
    PieceType::Knight,
    PieceType::Bishop,
    PieceType::Queen,
    PieceType::King,
    PieceType::Bishop,
    PieceType::Knight,
    PieceType::Rook,
];

const EMPTY_CODE: &str = "--";

/// 8x8 grid of pieces, indexed `[row][col]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    squares: [[Option<Piece>; 8]; 8],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Board in the starting position
    pub fn new() -> Self {
        let mut board = Self::empty();
        for (col, piece_type) in BACK_RANK.iter().enumerate() {
            let col = col as u8;
            for color in [Color::White, Color::Black] {
                board.set(
                    Square::new(color.back_row(), col),
                    Some(Piece::new(color, *piece_type)),
                );
                board.set(
                    Square::new(color.pawn_start_row(), col),
                    Some(Piece::new(color, PieceType::Pawn)),
                );
            }
        }
        board
    }

    pub fn empty() -> Self {
        Self {
            squares: [[None; 8]; 8],
        }
    }

    /// Parse a layout of 8 rows, each holding 8 whitespace separated piece codes
    /// (`--` for an empty square). Row 0 is black's back rank.
    pub fn from_rows(rows: &[&str]) -> Result<Self, ChessError> {
        if rows.len() != 8 {
            return Err(ChessError::WrongRowCount(rows.len()));
        }
        let mut board = Self::empty();
        for (row, line) in rows.iter().enumerate() {
            let codes: Vec<&str> = line.split_whitespace().collect();
            if codes.len() != 8 {
                return Err(ChessError::WrongRowLength {
                    row,
                    found: codes.len(),
                });
            }
            for (col, code) in codes.into_iter().enumerate() {
                if code != EMPTY_CODE {
                    board.squares[row][col] = Some(Piece::from_code(code)?);
                }
            }
        }
        Ok(board)
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.squares[square.row as usize][square.col as usize]
    }

    pub fn is_empty(&self, square: Square) -> bool {
        self.piece_at(square).is_none()
    }

    pub fn set(&mut self, square: Square, piece: Option<Piece>) {
        self.squares[square.row as usize][square.col as usize] = piece;
    }

    /// All occupied squares in row-major order
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        (0..8u8)
            .cartesian_product(0..8u8)
            .filter_map(|(row, col)| {
                let square = Square::new(row, col);
                self.piece_at(square).map(|piece| (square, piece))
            })
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces().filter(move |(_, piece)| piece.color == color)
    }

    /// Every square holding a king of `color`
    pub fn kings(&self, color: Color) -> Vec<Square> {
        self.pieces()
            .filter(|(_, piece)| piece.is(color, PieceType::King))
            .map(|(square, _)| square)
            .collect()
    }

    /// Piece codes, one row per line, in the format read by [`Board::from_rows`]
    pub fn to_layout(&self) -> String {
        self.squares
            .iter()
            .map(|row| {
                row.iter()
                    .map(|square| match square {
                        Some(piece) => piece.to_string(),
                        None => EMPTY_CODE.to_string(),
                    })
                    .join(" ")
            })
            .join("\n")
    }

    pub fn draw_board(&self) -> String {
        let mut string = String::new();
        for (row, squares) in self.squares.iter().enumerate() {
            let line = squares
                .iter()
                .map(|square| match square {
                    Some(piece) => piece.to_symbol(),
                    None => ".",
                })
                .join(" ");
            string.push_str(&format!("{} {}\n", 8 - row, line));
        }
        string.push_str("  a b c d e f g h\n");
        string
    }

    pub fn draw_to_terminal(&self) {
        println!("{}", self.draw_board());
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_layout())
    }
}
