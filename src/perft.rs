use rayon::prelude::*;

use crate::game::GameState;
use crate::types::Move;

/// Count the leaf nodes of the legal move tree, `depth` plies deep.
///
/// The game is walked with `make_move`/`undo_move` and left as it was found.
///
/// https://www.chessprogramming.org/Perft_Results
///
/// | Depth | Start position | Kiwipete | Position 3 |
/// | ----- | -------------- | -------- | ---------- |
/// | 1     | 20             | 48       | 14         |
/// | 2     | 400            | 2,039    | 191        |
/// | 3     | 8,902          | 97,862   | 2,812      |
/// | 4     | 197,281        |          | 43,238     |
pub fn perft(game: &mut GameState, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = game.legal_moves();
    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0;
    for mv in moves {
        game.make_move(&mv);
        nodes += perft(game, depth - 1);
        game.undo_move();
    }
    nodes
}

/// Node count below each root move
pub fn perft_divide(game: &mut GameState, depth: u8) -> Vec<(Move, u64)> {
    if depth == 0 {
        return Vec::new();
    }
    game.legal_moves()
        .into_iter()
        .map(|mv| {
            game.make_move(&mv);
            let nodes = perft(game, depth - 1);
            game.undo_move();
            (mv, nodes)
        })
        .collect()
}

/// Same count as [`perft`], with each root move searched on its own copy of
/// the game across the rayon thread pool.
pub fn perft_parallel(game: &GameState, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }
    let mut root = game.clone();
    let moves = root.legal_moves();
    moves
        .par_iter()
        .map(|mv| {
            let mut worker = root.clone();
            worker.make_move(mv);
            perft(&mut worker, depth - 1)
        })
        .sum()
}
