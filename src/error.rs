use thiserror::Error;

use crate::types::{Color, Square};

/// Errors raised while building positions or reading user input.
///
/// The rules engine itself never fails: every move handed to
/// [`GameState::make_move`](crate::game::GameState::make_move) is expected to
/// come out of `legal_moves()`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChessError {
    #[error("invalid square `{0}`, expected a file a-h followed by a rank 1-8")]
    InvalidSquare(String),

    #[error("invalid piece code `{0}`")]
    InvalidPieceCode(String),

    #[error("board layout must have 8 rows, found {0}")]
    WrongRowCount(usize),

    #[error("row {row} of the board layout must have 8 squares, found {found}")]
    WrongRowLength { row: usize, found: usize },

    #[error("the {} king is missing", .0.to_human())]
    MissingKing(Color),

    #[error("there is more than one {} king", .0.to_human())]
    ExtraKing(Color),

    #[error("invalid move `{0}`, expected coordinates such as `e2e4`")]
    InvalidMoveText(String),

    #[error("no legal move from {from} to {to}")]
    IllegalMove { from: Square, to: Square },
}
