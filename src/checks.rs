use crate::board::Board;
use crate::types::{Color, Direction, Piece, PieceType, Square, DIAGONAL, KNIGHT_JUMPS, ORTHOGONAL};

/// An allied piece standing between its king and an enemy slider.
///
/// `direction` points from the king through the pinned piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pin {
    pub square: Square,
    pub direction: Direction,
}

/// An enemy piece attacking the king.
///
/// `direction` points from the king to the checker. For knight checks it is the
/// knight jump itself and does not describe a ray.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Check {
    pub square: Square,
    pub direction: Direction,
}

/// Snapshot of the threats against one king square.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PinsAndChecks {
    pub in_check: bool,
    pub pins: Vec<Pin>,
    pub checks: Vec<Check>,
}

impl PinsAndChecks {
    /// Pin axis of the piece on `square`, if it is pinned.
    pub fn pin_direction_for(&self, square: Square) -> Option<Direction> {
        self.pins
            .iter()
            .find(|pin| pin.square == square)
            .map(|pin| pin.direction)
    }

    pub fn is_double_check(&self) -> bool {
        self.checks.len() > 1
    }
}

/// Scan outward from `king` for checks and pins against the side `ally`.
///
/// `king` need not hold the king: the king move generator and the castling
/// code ask about squares the king would move to. Allied kings are looked
/// through, so a king stepping back along a checking ray is still seen as
/// attacked.
pub fn find_pins_and_checks(board: &Board, king: Square, ally: Color) -> PinsAndChecks {
    let mut result = PinsAndChecks::default();

    for direction in ORTHOGONAL.into_iter().chain(DIAGONAL) {
        let mut possible_pin: Option<Pin> = None;
        let mut square = king;
        let mut distance = 0;
        while let Some(next) = square.offset(direction) {
            square = next;
            distance += 1;
            let piece = match board.piece_at(square) {
                Some(piece) => piece,
                None => continue,
            };
            if piece.color == ally {
                if piece.piece_type == PieceType::King {
                    continue;
                }
                if possible_pin.is_some() {
                    // two of our own pieces on the ray, nothing gets through
                    break;
                }
                possible_pin = Some(Pin { square, direction });
                continue;
            }
            if attacks_along(piece, direction, distance) {
                match possible_pin {
                    Some(pin) => result.pins.push(pin),
                    None => {
                        result.in_check = true;
                        result.checks.push(Check { square, direction });
                    }
                }
            }
            break;
        }
    }

    for jump in KNIGHT_JUMPS {
        if let Some(square) = king.offset(jump) {
            if board
                .piece_at(square)
                .is_some_and(|p| p.is(ally.other_color(), PieceType::Knight))
            {
                result.in_check = true;
                result.checks.push(Check {
                    square,
                    direction: jump,
                });
            }
        }
    }

    result
}

/// Is `square` attacked by the opponents of `defender`?
pub fn square_attacked(board: &Board, square: Square, defender: Color) -> bool {
    find_pins_and_checks(board, square, defender).in_check
}

/// Can `piece` attack along `direction` (seen from the target) from `distance` away?
fn attacks_along(piece: Piece, direction: Direction, distance: u8) -> bool {
    match piece.piece_type {
        PieceType::Rook => direction.is_orthogonal(),
        PieceType::Bishop => direction.is_diagonal(),
        PieceType::Queen => true,
        PieceType::King => distance == 1,
        // a pawn attacks the target from behind it, relative to its own movement
        PieceType::Pawn => {
            distance == 1 && direction.is_diagonal() && direction.d_row == -piece.color.forward()
        }
        PieceType::Knight => false,
    }
}
