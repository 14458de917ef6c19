use std::fmt;
use std::str::FromStr;

use crate::board::Board;
use crate::error::ChessError;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn from_char(c: char) -> Option<Color> {
        match c {
            'w' => Some(Color::White),
            'b' => Some(Color::Black),
            _ => None,
        }
    }

    pub fn to_char(&self) -> char {
        match self {
            Self::White => 'w',
            Self::Black => 'b',
        }
    }

    pub fn other_color(&self) -> Color {
        if *self == Color::White {
            Color::Black
        } else {
            Color::White
        }
    }

    pub fn to_human(&self) -> &str {
        match self {
            Self::White => "white",
            Self::Black => "black",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Self::White => 0,
            Self::Black => 1,
        }
    }

    /// Row step of a pawn push. White moves toward row 0.
    pub fn forward(&self) -> i8 {
        match self {
            Self::White => -1,
            Self::Black => 1,
        }
    }

    /// Row the pawns start on, where a double push is allowed
    pub fn pawn_start_row(&self) -> u8 {
        match self {
            Self::White => 6,
            Self::Black => 1,
        }
    }

    /// Row a pawn promotes on
    pub fn promotion_row(&self) -> u8 {
        match self {
            Self::White => 0,
            Self::Black => 7,
        }
    }

    /// Home row of the king and rooks
    pub fn back_row(&self) -> u8 {
        match self {
            Self::White => 7,
            Self::Black => 0,
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum PieceType {
    Pawn,
    Rook,
    Knight,
    Bishop,
    Queen,
    King,
}

impl PieceType {
    /// Parse the kind letter of a piece code. Pawns are the only lowercase kind.
    pub fn from_char(c: char) -> Option<PieceType> {
        match c {
            'p' => Some(PieceType::Pawn),
            'R' => Some(PieceType::Rook),
            'N' => Some(PieceType::Knight),
            'B' => Some(PieceType::Bishop),
            'Q' => Some(PieceType::Queen),
            'K' => Some(PieceType::King),
            _ => None,
        }
    }

    pub fn to_char(&self) -> char {
        match self {
            Self::Pawn => 'p',
            Self::Rook => 'R',
            Self::Knight => 'N',
            Self::Bishop => 'B',
            Self::Queen => 'Q',
            Self::King => 'K',
        }
    }

    /// Is the piece a sliding piece (one which can move multiple square in a given direction)
    pub fn is_sliding(&self) -> bool {
        matches!(self, PieceType::Rook | PieceType::Bishop | PieceType::Queen)
    }

    pub fn to_human(&self) -> &str {
        match self {
            Self::Pawn => "pawn",
            Self::Rook => "rook",
            Self::Knight => "knight",
            Self::Bishop => "bishop",
            Self::Queen => "queen",
            Self::King => "king",
        }
    }
}

/// A colored piece, written as a two character code such as `wp` or `bQ`.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Piece {
    pub color: Color,
    pub piece_type: PieceType,
}

impl Piece {
    pub fn new(color: Color, piece_type: PieceType) -> Self {
        Self { color, piece_type }
    }

    pub fn from_code(code: &str) -> Result<Piece, ChessError> {
        let mut chars = code.chars();
        let parsed = match (chars.next(), chars.next(), chars.next()) {
            (Some(c), Some(k), None) => Color::from_char(c)
                .zip(PieceType::from_char(k))
                .map(|(color, piece_type)| Piece { color, piece_type }),
            _ => None,
        };
        parsed.ok_or_else(|| ChessError::InvalidPieceCode(code.to_string()))
    }

    pub fn is(&self, color: Color, piece_type: PieceType) -> bool {
        self.color == color && self.piece_type == piece_type
    }

    pub fn to_symbol(&self) -> &str {
        let is_white = self.color == Color::White;
        match self.piece_type {
            PieceType::Pawn => {
                if is_white {
                    "♙"
                } else {
                    "♟︎"
                }
            }
            PieceType::Rook => {
                if is_white {
                    "♖"
                } else {
                    "♜"
                }
            }
            PieceType::Knight => {
                if is_white {
                    "♘"
                } else {
                    "♞"
                }
            }
            PieceType::Bishop => {
                if is_white {
                    "♗"
                } else {
                    "♝"
                }
            }
            PieceType::Queen => {
                if is_white {
                    "♕"
                } else {
                    "♛"
                }
            }
            PieceType::King => {
                if is_white {
                    "♔"
                } else {
                    "♚"
                }
            }
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.color.to_char(), self.piece_type.to_char())
    }
}

/// Step between two neighbouring squares along a ray, or a knight jump.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Direction {
    pub d_row: i8,
    pub d_col: i8,
}

impl Direction {
    pub const fn new(d_row: i8, d_col: i8) -> Self {
        Self { d_row, d_col }
    }

    pub fn opposite(&self) -> Direction {
        Direction::new(-self.d_row, -self.d_col)
    }

    pub fn is_orthogonal(&self) -> bool {
        (self.d_row == 0) != (self.d_col == 0)
    }

    pub fn is_diagonal(&self) -> bool {
        self.d_row != 0 && self.d_row.abs() == self.d_col.abs()
    }

    /// Same line as `other`, pointing either way
    pub fn is_parallel_to(&self, other: Direction) -> bool {
        *self == other || *self == other.opposite()
    }
}

pub const ORTHOGONAL: [Direction; 4] = [
    Direction::new(-1, 0),
    Direction::new(0, -1),
    Direction::new(1, 0),
    Direction::new(0, 1),
];

pub const DIAGONAL: [Direction; 4] = [
    Direction::new(-1, -1),
    Direction::new(-1, 1),
    Direction::new(1, -1),
    Direction::new(1, 1),
];

pub const KING_STEPS: [Direction; 8] = [
    Direction::new(-1, -1),
    Direction::new(-1, 0),
    Direction::new(-1, 1),
    Direction::new(0, -1),
    Direction::new(0, 1),
    Direction::new(1, -1),
    Direction::new(1, 0),
    Direction::new(1, 1),
];

pub const KNIGHT_JUMPS: [Direction; 8] = [
    Direction::new(-2, -1),
    Direction::new(-2, 1),
    Direction::new(-1, -2),
    Direction::new(-1, 2),
    Direction::new(1, -2),
    Direction::new(1, 2),
    Direction::new(2, -1),
    Direction::new(2, 1),
];

/// A square on the grid. Row 0 is black's back rank (rank 8), column 0 is file a.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Square {
    pub row: u8,
    pub col: u8,
}

impl Square {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Neighbour in `direction`, or `None` past the edge of the board
    pub fn offset(&self, direction: Direction) -> Option<Square> {
        let row = self.row as i8 + direction.d_row;
        let col = self.col as i8 + direction.d_col;
        if (0..8).contains(&row) && (0..8).contains(&col) {
            Some(Square::new(row as u8, col as u8))
        } else {
            None
        }
    }

    pub fn from_algebraic(s: &str) -> Result<Square, ChessError> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 || !(b'a'..=b'h').contains(&bytes[0]) || !(b'1'..=b'8').contains(&bytes[1])
        {
            return Err(ChessError::InvalidSquare(s.to_string()));
        }
        Ok(Square::new(b'8' - bytes[1], bytes[0] - b'a'))
    }

    pub fn file_char(&self) -> char {
        (b'a' + self.col) as char
    }

    pub fn rank_char(&self) -> char {
        (b'8' - self.row) as char
    }

    pub fn to_algebraic(&self) -> String {
        format!("{}{}", self.file_char(), self.rank_char())
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}

impl FromStr for Square {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Square::from_algebraic(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveFlag {
    Regular,
    /// Pawn reaching the far rank. Always promotes to a queen.
    Promotion,
    /// The captured pawn sits beside the start square, not on the end square
    EnPassantCapture,
    /// King moving two files; the rook is relocated alongside it
    Castle,
}

/// A move, with the moved and captured pieces read off the board it was built against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub start: Square,
    pub end: Square,
    pub piece_moved: Piece,
    pub piece_captured: Option<Piece>,
    pub move_flag: MoveFlag,
}

impl Move {
    /// Plain move or capture of `piece_moved`. A pawn landing on its far rank is
    /// always flagged as a promotion.
    pub fn new(start: Square, end: Square, piece_moved: Piece, board: &Board) -> Self {
        let promotes = piece_moved.piece_type == PieceType::Pawn
            && end.row == piece_moved.color.promotion_row();
        Self {
            start,
            end,
            piece_moved,
            piece_captured: board.piece_at(end),
            move_flag: if promotes {
                MoveFlag::Promotion
            } else {
                MoveFlag::Regular
            },
        }
    }

    /// En passant capture. The end square is empty, the captured piece is the
    /// opposing pawn.
    pub fn new_en_passant(start: Square, end: Square, piece_moved: Piece) -> Self {
        Self {
            start,
            end,
            piece_moved,
            piece_captured: Some(Piece::new(
                piece_moved.color.other_color(),
                PieceType::Pawn,
            )),
            move_flag: MoveFlag::EnPassantCapture,
        }
    }

    pub fn new_castle(start: Square, end: Square, piece_moved: Piece) -> Self {
        Self {
            start,
            end,
            piece_moved,
            piece_captured: None,
            move_flag: MoveFlag::Castle,
        }
    }

    pub fn is_en_passant(&self) -> bool {
        self.move_flag == MoveFlag::EnPassantCapture
    }

    pub fn is_promotion(&self) -> bool {
        self.move_flag == MoveFlag::Promotion
    }

    pub fn is_castle(&self) -> bool {
        self.move_flag == MoveFlag::Castle
    }

    pub fn is_capture(&self) -> bool {
        self.piece_captured.is_some()
    }

    /// Square the captured piece stood on. Differs from `end` for en passant.
    pub fn capture_square(&self) -> Option<Square> {
        match self.move_flag {
            MoveFlag::EnPassantCapture => Some(Square::new(self.start.row, self.end.col)),
            _ => self.piece_captured.map(|_| self.end),
        }
    }

    /// Start and end squares, e.g. `e2e4`
    pub fn to_coordinate(&self) -> String {
        format!("{}{}", self.start, self.end)
    }

    pub fn to_human(&self) -> String {
        let color = self.piece_moved.color.to_human();
        if self.is_castle() {
            let side = if self.end.col > self.start.col {
                "kingside"
            } else {
                "queenside"
            };
            return format!("{} castles {}", color, side);
        }
        let maybe_capture_str = match (self.piece_captured, self.capture_square()) {
            (Some(p), Some(at)) => format!(
                " capturing {} {} at {}",
                p.color.to_human(),
                p.piece_type.to_human(),
                at
            ),
            _ => "".to_string(),
        };
        let maybe_promotion_str = if self.is_promotion() {
            " promoting to queen"
        } else {
            ""
        };
        format!(
            "{} moves {} from {} to {}{}{}",
            color,
            self.piece_moved.piece_type.to_human(),
            self.start,
            self.end,
            maybe_capture_str,
            maybe_promotion_str,
        )
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_castle() {
            return if self.end.col > self.start.col {
                write!(f, "O-O")
            } else {
                write!(f, "O-O-O")
            };
        }
        match self.piece_moved.piece_type {
            PieceType::Pawn if self.is_capture() => {
                write!(f, "{}x{}", self.start.file_char(), self.end)?
            }
            PieceType::Pawn => write!(f, "{}", self.end)?,
            other => {
                let capture = if self.is_capture() { "x" } else { "" };
                write!(f, "{}{}{}", other.to_char(), capture, self.end)?
            }
        }
        if self.is_promotion() {
            write!(f, "=Q")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ongoing,
    /// Contains the winning side
    Checkmate(Color),
    Stalemate,
}
