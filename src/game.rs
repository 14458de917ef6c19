use crate::board::Board;
use crate::castling::{castle_moves, king_home, rook_squares, CastlingRights};
use crate::checks::{find_pins_and_checks, square_attacked, Check, PinsAndChecks};
use crate::error::ChessError;
use crate::movegen::MoveGenerator;
use crate::types::*;

/// Full state of one game: the position plus the logs `undo_move` rewinds.
///
/// `en_passant_history` and `castling_rights_history` are seeded with the
/// starting values, so each is always one longer than `move_history`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    side_to_move: Color,
    kings: [Square; 2],
    castling_rights: CastlingRights,
    en_passant_target: Option<Square>,
    move_history: Vec<Move>,
    en_passant_history: Vec<Option<Square>>,
    castling_rights_history: Vec<CastlingRights>,
    checkmate: bool,
    stalemate: bool,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Game at the starting position, white to move
    pub fn new() -> Self {
        Self::with_kings(
            Board::new(),
            Color::White,
            [king_home(Color::White), king_home(Color::Black)],
            CastlingRights::ALL,
            None,
        )
    }

    /// Game from an arbitrary position.
    ///
    /// Each side needs exactly one king. Castling rights whose king or rook is
    /// off its home square are dropped.
    pub fn from_board(
        board: Board,
        side_to_move: Color,
        castling_rights: CastlingRights,
        en_passant_target: Option<Square>,
    ) -> Result<Self, ChessError> {
        let kings = [
            single_king(&board, Color::White)?,
            single_king(&board, Color::Black)?,
        ];
        let castling_rights = castling_rights.restricted_to(&board);
        Ok(Self::with_kings(
            board,
            side_to_move,
            kings,
            castling_rights,
            en_passant_target,
        ))
    }

    fn with_kings(
        board: Board,
        side_to_move: Color,
        kings: [Square; 2],
        castling_rights: CastlingRights,
        en_passant_target: Option<Square>,
    ) -> Self {
        Self {
            board,
            side_to_move,
            kings,
            castling_rights,
            en_passant_target,
            move_history: Vec::new(),
            en_passant_history: vec![en_passant_target],
            castling_rights_history: vec![castling_rights],
            checkmate: false,
            stalemate: false,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn king_square(&self, color: Color) -> Square {
        self.kings[color.index()]
    }

    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    pub fn en_passant_target(&self) -> Option<Square> {
        self.en_passant_target
    }

    pub fn move_history(&self) -> &[Move] {
        &self.move_history
    }

    pub fn en_passant_history(&self) -> &[Option<Square>] {
        &self.en_passant_history
    }

    pub fn castling_rights_history(&self) -> &[CastlingRights] {
        &self.castling_rights_history
    }

    /// Set by the last `legal_moves` call, cleared by any move or undo
    pub fn is_checkmate(&self) -> bool {
        self.checkmate
    }

    pub fn is_stalemate(&self) -> bool {
        self.stalemate
    }

    /// Pins and checks against the king of the side to move
    pub fn pins_and_checks(&self) -> PinsAndChecks {
        let color = self.side_to_move;
        find_pins_and_checks(&self.board, self.king_square(color), color)
    }

    pub fn in_check(&self) -> bool {
        self.king_attacked(self.side_to_move)
    }

    fn king_attacked(&self, color: Color) -> bool {
        square_attacked(&self.board, self.king_square(color), color)
    }

    /// Legal moves of the side to move, in generation order.
    ///
    /// Pseudo-legal moves are first pruned by the check count: under a single
    /// check only king moves and moves that block or capture the checker
    /// remain, under double check only king moves. Castles are appended after
    /// that. Every survivor is then played and taken back, and dropped if it
    /// left the mover's king attacked.
    ///
    /// Updates the checkmate and stalemate flags.
    pub fn legal_moves(&mut self) -> Vec<Move> {
        let color = self.side_to_move;
        let king = self.king_square(color);
        let pins_and_checks = self.pins_and_checks();

        let mut moves = {
            let mut generator = MoveGenerator::new(
                &self.board,
                color,
                king,
                self.en_passant_target,
                &pins_and_checks,
            );
            match pins_and_checks.checks.as_slice() {
                [] => generator.collect(),
                [check] => {
                    let targets = block_squares(&self.board, king, check);
                    let mut moves = generator.collect();
                    moves.retain(|mv| {
                        mv.piece_moved.piece_type == PieceType::King
                            || targets.contains(&mv.end)
                            || (mv.is_en_passant() && mv.capture_square() == Some(check.square))
                    });
                    moves
                }
                _ => generator.collect_king_moves(),
            }
        };
        castle_moves(&self.board, king, color, self.castling_rights, &mut moves);

        moves.retain(|mv| {
            self.make_move(mv);
            let safe = !self.king_attacked(color);
            self.undo_move();
            safe
        });

        let in_check = pins_and_checks.in_check;
        self.checkmate = moves.is_empty() && in_check;
        self.stalemate = moves.is_empty() && !in_check;
        moves
    }

    /// Play `mv`, which must be one of the current legal moves.
    pub fn make_move(&mut self, mv: &Move) {
        let mover = mv.piece_moved;

        self.board.set(mv.start, None);
        let landed = if mv.is_promotion() {
            Piece::new(mover.color, PieceType::Queen)
        } else {
            mover
        };
        self.board.set(mv.end, Some(landed));

        if mv.is_en_passant() {
            if let Some(captured) = mv.capture_square() {
                self.board.set(captured, None);
            }
        }
        if mv.is_castle() {
            let (rook_from, rook_to) = rook_squares(mv);
            let rook = self.board.piece_at(rook_from);
            self.board.set(rook_from, None);
            self.board.set(rook_to, rook);
        }
        if mover.piece_type == PieceType::King {
            self.kings[mover.color.index()] = mv.end;
        }

        self.en_passant_target = skipped_square(mv);
        self.castling_rights = self.castling_rights.after_move(mv);

        self.move_history.push(*mv);
        self.en_passant_history.push(self.en_passant_target);
        self.castling_rights_history.push(self.castling_rights);

        self.side_to_move = self.side_to_move.other_color();
        self.checkmate = false;
        self.stalemate = false;
    }

    /// Take back the last move. Does nothing when no move has been played.
    pub fn undo_move(&mut self) {
        let Some(mv) = self.move_history.pop() else {
            return;
        };
        self.en_passant_history.pop();
        self.castling_rights_history.pop();

        self.board.set(mv.start, Some(mv.piece_moved));
        if mv.is_en_passant() {
            self.board.set(mv.end, None);
            if let Some(captured) = mv.capture_square() {
                self.board.set(captured, mv.piece_captured);
            }
        } else {
            self.board.set(mv.end, mv.piece_captured);
        }
        if mv.is_castle() {
            let (rook_from, rook_to) = rook_squares(&mv);
            let rook = self.board.piece_at(rook_to);
            self.board.set(rook_to, None);
            self.board.set(rook_from, rook);
        }
        if mv.piece_moved.piece_type == PieceType::King {
            self.kings[mv.piece_moved.color.index()] = mv.start;
        }

        self.en_passant_target = self.en_passant_history.last().copied().flatten();
        if let Some(&rights) = self.castling_rights_history.last() {
            self.castling_rights = rights;
        }

        self.side_to_move = self.side_to_move.other_color();
        self.checkmate = false;
        self.stalemate = false;
    }

    /// The legal move from `start` to `end`, if there is one.
    ///
    /// Picked squares must be resolved here rather than with `Move::new`: only
    /// the legal set knows whether a king's two-file step is a castle or a
    /// diagonal pawn step onto an empty square is en passant.
    pub fn find_legal_move(&mut self, start: Square, end: Square) -> Option<Move> {
        self.legal_moves()
            .into_iter()
            .find(|mv| mv.start == start && mv.end == end)
    }

    /// Play a move given in coordinate form such as `e2e4` or `e1g1`
    pub fn play_coordinate(&mut self, text: &str) -> Result<Move, ChessError> {
        let (start, end) = parse_coordinate(text)?;
        let mv = self
            .find_legal_move(start, end)
            .ok_or(ChessError::IllegalMove {
                from: start,
                to: end,
            })?;
        self.make_move(&mv);
        Ok(mv)
    }

    pub fn status(&mut self) -> Status {
        self.legal_moves();
        if self.checkmate {
            Status::Checkmate(self.side_to_move.other_color())
        } else if self.stalemate {
            Status::Stalemate
        } else {
            Status::Ongoing
        }
    }
}

fn single_king(board: &Board, color: Color) -> Result<Square, ChessError> {
    match board.kings(color).as_slice() {
        [] => Err(ChessError::MissingKing(color)),
        [king] => Ok(*king),
        _ => Err(ChessError::ExtraKing(color)),
    }
}

/// Squares a non-king move must land on to answer `check`: the checker's own
/// square unless it is a slider, otherwise the ray from the king up to the checker.
fn block_squares(board: &Board, king: Square, check: &Check) -> Vec<Square> {
    let by_slider = board
        .piece_at(check.square)
        .is_some_and(|p| p.piece_type.is_sliding());
    if !by_slider {
        return vec![check.square];
    }
    let mut squares = Vec::new();
    let mut square = king;
    while let Some(next) = square.offset(check.direction) {
        square = next;
        squares.push(square);
        if square == check.square {
            break;
        }
    }
    squares
}

/// Square a pawn skipped over with a two-square push
fn skipped_square(mv: &Move) -> Option<Square> {
    let double_push = mv.piece_moved.piece_type == PieceType::Pawn
        && mv.start.row.abs_diff(mv.end.row) == 2;
    double_push.then(|| Square::new((mv.start.row + mv.end.row) / 2, mv.start.col))
}

fn parse_coordinate(text: &str) -> Result<(Square, Square), ChessError> {
    let invalid = || ChessError::InvalidMoveText(text.to_string());
    let text = text.trim();
    if text.len() != 4 || !text.is_ascii() {
        return Err(invalid());
    }
    let start = Square::from_algebraic(&text[..2]).map_err(|_| invalid())?;
    let end = Square::from_algebraic(&text[2..]).map_err(|_| invalid())?;
    Ok((start, end))
}
