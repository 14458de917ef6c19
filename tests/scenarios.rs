//! Whole-game scenarios played through the public API
//!
//! Run with: cargo test --test scenarios

use pretty_assertions::assert_eq;

use rust_chess_rules::board::Board;
use rust_chess_rules::castling::CastlingRights;
use rust_chess_rules::game::GameState;
use rust_chess_rules::types::{Color, PieceType, Square, Status};

fn sq(s: &str) -> Square {
    Square::from_algebraic(s).unwrap()
}

fn play_all(game: &mut GameState, moves: &[&str]) {
    for text in moves {
        game.play_coordinate(text)
            .unwrap_or_else(|e| panic!("{} should be legal: {}", text, e));
    }
}

fn coordinates(game: &mut GameState) -> Vec<String> {
    let mut names: Vec<String> = game
        .legal_moves()
        .iter()
        .map(|m| m.to_coordinate())
        .collect();
    names.sort();
    names
}

#[test]
fn scholars_mate() {
    let mut game = GameState::new();
    play_all(
        &mut game,
        &["e2e4", "e7e5", "f1c4", "b8c6", "d1h5", "g8f6", "h5f7"],
    );
    assert!(game.in_check());
    assert!(game.legal_moves().is_empty());
    assert!(game.is_checkmate());
    assert!(!game.is_stalemate());
    assert_eq!(game.status(), Status::Checkmate(Color::White));

    let last = game.move_history().last().unwrap();
    assert_eq!(last.to_string(), "Qxf7");
    assert_eq!(last.piece_captured.map(|p| p.piece_type), Some(PieceType::Pawn));
}

#[test]
fn en_passant_only_on_the_next_move() {
    let mut game = GameState::new();
    play_all(&mut game, &["a2a3", "d7d5", "a3a4", "d5d4", "e2e4"]);
    assert_eq!(game.en_passant_target(), Some(sq("e3")));

    let capture = game.find_legal_move(sq("d4"), sq("e3")).unwrap();
    assert!(capture.is_en_passant());

    // black waits a move, the window closes
    play_all(&mut game, &["h7h6", "g1f3"]);
    assert_eq!(game.en_passant_target(), None);
    assert_eq!(game.find_legal_move(sq("d4"), sq("e3")), None);
    assert_eq!(
        game.find_legal_move(sq("d4"), sq("d3")).map(|m| m.to_string()),
        Some("d3".to_string())
    );
}

#[test]
fn en_passant_removes_the_pawn_beside() {
    let mut game = GameState::new();
    play_all(&mut game, &["e2e4", "a7a6", "e4e5", "f7f5", "e5f6"]);
    assert!(game.board().is_empty(sq("f5")));
    assert_eq!(
        game.board().piece_at(sq("f6")).map(|p| p.piece_type),
        Some(PieceType::Pawn)
    );
    let last = game.move_history().last().unwrap();
    assert!(last.is_en_passant());
    assert_eq!(last.capture_square(), Some(sq("f5")));
}

#[test]
fn en_passant_refused_when_it_opens_a_diagonal() {
    // d5 is the only piece between the f7 bishop and the king on b3
    let board = Board::from_rows(&[
        "-- -- -- -- bK -- -- --",
        "-- -- -- -- -- bB -- --",
        "-- -- -- -- -- -- -- --",
        "-- -- -- bp wp -- -- --",
        "-- -- -- -- -- -- -- --",
        "-- wK -- -- -- -- -- --",
        "-- -- -- -- -- -- -- --",
        "-- -- -- -- -- -- -- --",
    ])
    .unwrap();
    let mut game =
        GameState::from_board(board, Color::White, CastlingRights::NONE, Some(sq("d6")))
            .unwrap();
    assert!(!game.in_check());

    let moves = game.legal_moves();
    assert!(!moves.iter().any(|m| m.is_en_passant()));
    assert_eq!(game.find_legal_move(sq("e5"), sq("d6")), None);
    assert!(game.find_legal_move(sq("e5"), sq("e6")).is_some());
}

#[test]
fn queen_move_stalemates() {
    // black king a8, white king c7, white queen b1
    let board = Board::from_rows(&[
        "bK -- -- -- -- -- -- --",
        "-- -- wK -- -- -- -- --",
        "-- -- -- -- -- -- -- --",
        "-- -- -- -- -- -- -- --",
        "-- -- -- -- -- -- -- --",
        "-- -- -- -- -- -- -- --",
        "-- -- -- -- -- -- -- --",
        "-- wQ -- -- -- -- -- --",
    ])
    .unwrap();
    let mut game =
        GameState::from_board(board, Color::White, CastlingRights::NONE, None).unwrap();
    assert_eq!(game.status(), Status::Ongoing);

    play_all(&mut game, &["b1b6"]);
    assert!(!game.in_check());
    assert!(game.legal_moves().is_empty());
    assert!(game.is_stalemate());
    assert!(!game.is_checkmate());
    assert_eq!(game.status(), Status::Stalemate);

    game.undo_move();
    assert!(!game.is_stalemate());
    assert_eq!(game.side_to_move(), Color::White);
}

#[test]
fn discovered_double_check() {
    let board = Board::from_rows(&[
        "-- -- -- -- bK -- -- --",
        "-- -- -- -- -- -- -- --",
        "-- -- -- -- -- -- -- bR",
        "-- -- -- -- -- -- -- --",
        "-- -- -- -- wN -- -- --",
        "-- -- -- -- -- -- -- --",
        "-- -- -- -- -- -- -- --",
        "wK -- -- -- wR -- -- --",
    ])
    .unwrap();
    let mut game =
        GameState::from_board(board, Color::White, CastlingRights::NONE, None).unwrap();
    play_all(&mut game, &["e4d6"]);

    assert!(game.pins_and_checks().is_double_check());
    // the rook could take the knight or block the file, but not both
    assert_eq!(coordinates(&mut game), vec!["e8d7", "e8d8", "e8f8"]);
}

#[test]
fn castling_after_development() {
    let mut game = GameState::new();
    play_all(
        &mut game,
        &["e2e4", "e7e5", "g1f3", "g8f6", "f1c4", "f8c5"],
    );
    let castle = game.find_legal_move(sq("e1"), sq("g1")).unwrap();
    assert!(castle.is_castle());
    game.make_move(&castle);
    assert_eq!(game.castling_rights().to_string(), "kq");
    assert_eq!(game.king_square(Color::White), sq("g1"));
    assert_eq!(
        game.board().piece_at(sq("f1")).map(|p| p.piece_type),
        Some(PieceType::Rook)
    );

    // black can castle too; queenside is still blocked
    assert!(game.find_legal_move(sq("e8"), sq("g8")).is_some());
    assert!(game.find_legal_move(sq("e8"), sq("c8")).is_none());
}

#[test]
fn king_walk_forfeits_castling() {
    let mut game = GameState::new();
    play_all(
        &mut game,
        &["e2e4", "e7e5", "g1f3", "b8c6", "f1c4", "f8c5", "e1e2", "g8f6", "e2e1", "d7d6"],
    );
    assert_eq!(game.castling_rights().to_string(), "kq");
    assert!(game.find_legal_move(sq("e1"), sq("g1")).is_none());

    // undo restores the right the king walk cleared
    for _ in 0..4 {
        game.undo_move();
    }
    assert_eq!(game.castling_rights(), CastlingRights::ALL);
    assert!(game.find_legal_move(sq("e1"), sq("g1")).is_some());
}

#[test]
fn capturing_a_home_rook_clears_its_right() {
    let board = Board::from_rows(&[
        "bR -- -- -- bK -- -- bR",
        "-- -- -- -- -- -- -- --",
        "-- -- -- -- -- -- -- --",
        "-- -- -- -- -- -- -- --",
        "-- -- -- -- -- -- -- --",
        "-- -- -- -- -- -- -- --",
        "-- -- -- -- -- -- -- --",
        "wB -- -- -- wK -- -- --",
    ])
    .unwrap();
    let mut game =
        GameState::from_board(board, Color::White, CastlingRights::ALL, None).unwrap();
    assert_eq!(game.castling_rights().to_string(), "kq");

    play_all(&mut game, &["a1h8"]);
    assert_eq!(game.castling_rights().to_string(), "q");
    assert!(game.find_legal_move(sq("e8"), sq("g8")).is_none());

    game.undo_move();
    assert_eq!(game.castling_rights().to_string(), "kq");
}

#[test]
fn no_castling_out_of_or_through_check() {
    let board = Board::from_rows(&[
        "-- -- -- -- bK -- -- --",
        "-- -- -- -- -- -- -- --",
        "-- -- -- -- -- -- -- --",
        "-- -- -- -- -- -- -- --",
        "-- -- -- -- -- -- -- --",
        "-- -- -- -- -- -- -- bB",
        "-- -- -- -- -- -- -- --",
        "wR -- -- -- wK -- -- wR",
    ])
    .unwrap();
    // the bishop on h3 covers f1
    let mut game =
        GameState::from_board(board, Color::White, CastlingRights::ALL, None).unwrap();
    assert!(game.find_legal_move(sq("e1"), sq("g1")).is_none());
    assert!(game.find_legal_move(sq("e1"), sq("c1")).is_some());

    // a rook on e8 checks the king, no castling either way
    let board = Board::from_rows(&[
        "-- -- -- -- bR -- -- bK",
        "-- -- -- -- -- -- -- --",
        "-- -- -- -- -- -- -- --",
        "-- -- -- -- -- -- -- --",
        "-- -- -- -- -- -- -- --",
        "-- -- -- -- -- -- -- --",
        "-- -- -- -- -- -- -- --",
        "wR -- -- -- wK -- -- wR",
    ])
    .unwrap();
    let mut game =
        GameState::from_board(board, Color::White, CastlingRights::ALL, None).unwrap();
    assert!(game.in_check());
    assert!(game.legal_moves().iter().all(|m| !m.is_castle()));
}

#[test]
fn promotion_always_queens() {
    let board = Board::from_rows(&[
        "-- -- -- -- -- -- -- --",
        "-- -- -- -- -- -- -- --",
        "-- -- -- -- -- -- -- --",
        "-- -- -- -- -- -- -- --",
        "-- -- -- -- -- -- -- wK",
        "-- -- -- -- -- -- -- --",
        "-- -- -- -- -- bp -- --",
        "bK -- -- -- -- -- wN --",
    ])
    .unwrap();
    let mut game =
        GameState::from_board(board, Color::Black, CastlingRights::NONE, None).unwrap();
    let promotions: Vec<String> = game
        .legal_moves()
        .iter()
        .filter(|m| m.is_promotion())
        .map(|m| m.to_string())
        .collect();
    assert_eq!(promotions, vec!["f1=Q", "fxg1=Q"]);

    play_all(&mut game, &["f2g1"]);
    assert_eq!(
        game.board().piece_at(sq("g1")).map(|p| p.piece_type),
        Some(PieceType::Queen)
    );
}
