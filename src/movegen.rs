use crate::board::Board;
use crate::checks::{square_attacked, PinsAndChecks};
use crate::types::*;

const MAX_MOVES: usize = 218;

/// Pseudo-legal move generation for the side to move.
///
/// Moves ignore whether the mover's king is left attacked, with three
/// exceptions: pinned pieces keep to their pin line, the king never steps onto
/// an attacked square, and an en passant capture that would open the king's
/// rank to an enemy rook or queen is not offered.
pub struct MoveGenerator<'a> {
    board: &'a Board,
    color: Color,
    king: Square,
    en_passant_target: Option<Square>,
    pins: &'a PinsAndChecks,
    moves: Vec<Move>,
}

impl<'a> MoveGenerator<'a> {
    pub fn new(
        board: &'a Board,
        color: Color,
        king: Square,
        en_passant_target: Option<Square>,
        pins: &'a PinsAndChecks,
    ) -> Self {
        Self {
            board,
            color,
            king,
            en_passant_target,
            pins,
            moves: Vec::with_capacity(MAX_MOVES),
        }
    }

    /// Moves of every piece of the side to move, in board order
    pub fn collect(&mut self) -> Vec<Move> {
        let board = self.board;
        for (square, piece) in board.pieces_of(self.color) {
            self.generate_piece_moves(square, piece);
        }
        std::mem::take(&mut self.moves)
    }

    /// Moves of the king alone, as needed under double check
    pub fn collect_king_moves(&mut self) -> Vec<Move> {
        if let Some(king) = self.board.piece_at(self.king) {
            self.generate_king_moves(self.king, king);
        }
        std::mem::take(&mut self.moves)
    }

    fn generate_piece_moves(&mut self, from: Square, piece: Piece) {
        match piece.piece_type {
            PieceType::Pawn => self.generate_pawn_moves(from, piece),
            PieceType::Rook => self.generate_sliding_moves(from, piece, &ORTHOGONAL),
            PieceType::Bishop => self.generate_sliding_moves(from, piece, &DIAGONAL),
            PieceType::Queen => {
                self.generate_sliding_moves(from, piece, &ORTHOGONAL);
                self.generate_sliding_moves(from, piece, &DIAGONAL);
            }
            PieceType::Knight => self.generate_knight_moves(from, piece),
            PieceType::King => self.generate_king_moves(from, piece),
        }
    }

    /// Can the piece on `from` step in `direction` without leaving its pin line?
    fn allowed_by_pin(&self, from: Square, direction: Direction) -> bool {
        self.pins
            .pin_direction_for(from)
            .map_or(true, |pin| direction.is_parallel_to(pin))
    }

    fn generate_sliding_moves(&mut self, from: Square, piece: Piece, directions: &[Direction]) {
        for &direction in directions {
            if !self.allowed_by_pin(from, direction) {
                continue;
            }
            let mut to = from;
            while let Some(next) = to.offset(direction) {
                to = next;
                match self.board.piece_at(to) {
                    None => self.moves.push(Move::new(from, to, piece, self.board)),
                    Some(other) => {
                        if other.color != self.color {
                            self.moves.push(Move::new(from, to, piece, self.board));
                        }
                        break;
                    }
                }
            }
        }
    }

    fn generate_knight_moves(&mut self, from: Square, piece: Piece) {
        // no knight jump stays on a line through the king
        if self.pins.pin_direction_for(from).is_some() {
            return;
        }
        for jump in KNIGHT_JUMPS {
            if let Some(to) = from.offset(jump) {
                if self.board.piece_at(to).map_or(true, |p| p.color != self.color) {
                    self.moves.push(Move::new(from, to, piece, self.board));
                }
            }
        }
    }

    /// King steps onto squares that would not be attacked once it stands there
    fn generate_king_moves(&mut self, from: Square, piece: Piece) {
        for step in KING_STEPS {
            let Some(to) = from.offset(step) else {
                continue;
            };
            if self.board.piece_at(to).is_some_and(|p| p.color == self.color) {
                continue;
            }
            if !square_attacked(self.board, to, self.color) {
                self.moves.push(Move::new(from, to, piece, self.board));
            }
        }
    }

    fn generate_pawn_moves(&mut self, from: Square, piece: Piece) {
        let forward = self.color.forward();
        let push = Direction::new(forward, 0);

        if let Some(one_step) = from.offset(push) {
            if self.board.is_empty(one_step) && self.allowed_by_pin(from, push) {
                self.moves.push(Move::new(from, one_step, piece, self.board));

                if from.row == self.color.pawn_start_row() {
                    if let Some(two_step) = one_step.offset(push) {
                        if self.board.is_empty(two_step) {
                            self.moves.push(Move::new(from, two_step, piece, self.board));
                        }
                    }
                }
            }
        }

        for d_col in [-1, 1] {
            let diagonal = Direction::new(forward, d_col);
            if !self.allowed_by_pin(from, diagonal) {
                continue;
            }
            let Some(to) = from.offset(diagonal) else {
                continue;
            };
            match self.board.piece_at(to) {
                Some(other) if other.color != self.color => {
                    self.moves.push(Move::new(from, to, piece, self.board));
                }
                None if self.en_passant_target == Some(to)
                    && self.en_passant_keeps_rank_closed(from, to) =>
                {
                    self.moves.push(Move::new_en_passant(from, to, piece));
                }
                _ => {}
            }
        }
    }

    /// En passant empties two squares of the capturing pawn's rank at once,
    /// which the single-piece pin scan cannot see. With the king on that rank,
    /// the capture is refused when nothing stands between the king and the
    /// two pawns and the first piece beyond them is an enemy rook or queen.
    fn en_passant_keeps_rank_closed(&self, from: Square, to: Square) -> bool {
        if self.king.row != from.row {
            return true;
        }
        let captured = Square::new(from.row, to.col);
        let toward_pawns = if self.king.col < from.col {
            Direction::new(0, 1)
        } else {
            Direction::new(0, -1)
        };

        let mut square = self.king;
        while let Some(next) = square.offset(toward_pawns) {
            square = next;
            if square == from || square == captured {
                break;
            }
            if !self.board.is_empty(square) {
                return true;
            }
        }

        // `square` is the nearer of the two pawns, skip past the other
        let Some(mut square) = square.offset(toward_pawns) else {
            return true;
        };
        while let Some(next) = square.offset(toward_pawns) {
            square = next;
            if let Some(piece) = self.board.piece_at(square) {
                let opens_rank = piece.color != self.color
                    && matches!(piece.piece_type, PieceType::Rook | PieceType::Queen);
                return !opens_rank;
            }
        }
        true
    }
}
