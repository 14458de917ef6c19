use std::time::Instant;

use chrono::prelude::*;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::game::GameState;
use crate::types::*;

/// Pick one move uniformly at random
pub fn random_move<R: Rng + ?Sized>(moves: &[Move], rng: &mut R) -> Option<Move> {
    moves.choose(rng).copied()
}

/// Self-play where both sides pick uniformly among their legal moves.
///
/// Seeded, so the same seed from the same position plays the same game.
pub struct RandomGame {
    state: GameState,
    rng: StdRng,
    seed: u64,
    game_start_time: DateTime<Local>,
    silent: bool,
}

impl RandomGame {
    pub fn new(seed: u64) -> Self {
        Self::from_state(GameState::new(), seed, false)
    }

    pub fn new_silent(seed: u64) -> Self {
        Self::from_state(GameState::new(), seed, true)
    }

    pub fn from_state(state: GameState, seed: u64, silent: bool) -> Self {
        Self {
            state,
            rng: StdRng::seed_from_u64(seed),
            seed,
            game_start_time: Local::now(),
            silent,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn into_state(self) -> GameState {
        self.state
    }

    /// Play until the game ends or `max_plies` moves have been made
    pub fn play(&mut self, max_plies: usize) -> Status {
        for _ in 0..max_plies {
            let now = Instant::now();
            let moves = self.state.legal_moves();
            let Some(selected_move) = random_move(&moves, &mut self.rng) else {
                break;
            };
            let elapsed = now.elapsed().as_secs_f32();

            if !self.silent {
                println!(
                    "move {}: {} ({} - {} legal, elapsed: {:.6}s)",
                    self.move_number(),
                    selected_move.to_human(),
                    selected_move,
                    moves.len(),
                    elapsed
                );
            }
            self.state.make_move(&selected_move);
            if !self.silent {
                self.state.board().draw_to_terminal();
                println!();
            }
        }

        let status = self.state.status();
        if !self.silent {
            let result = match status {
                Status::Checkmate(winner) => format!("{} wins by checkmate", winner.to_human()),
                Status::Stalemate => "draw by stalemate".to_string(),
                Status::Ongoing => "unfinished".to_string(),
            };
            println!(
                "game started {} with seed {}: {} after {} plies",
                self.game_start_time.format("%Y.%m.%d %H:%M:%S"),
                self.seed,
                result,
                self.state.move_history().len()
            );
        }
        status
    }

    /// Number of the full move the side to move is about to play
    pub fn move_number(&self) -> usize {
        self.state.move_history().len() / 2 + 1
    }

    /// Numbered move list, e.g. `1. e4 e5 2. Nf3 Nc6`
    pub fn transcript(&self) -> String {
        let mut transcript = String::new();
        for (i, m) in self.state.move_history().iter().enumerate() {
            if i % 2 == 0 {
                transcript.push_str(&format!("{}. ", (i + 2) / 2));
            }
            transcript.push_str(&m.to_string());
            transcript.push(' ');
        }
        transcript.trim_end().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_game() {
        let mut first = RandomGame::new_silent(7);
        let mut second = RandomGame::new_silent(7);
        assert_eq!(first.play(40), second.play(40));
        assert_eq!(first.transcript(), second.transcript());
        assert_eq!(first.state(), second.state());
    }

    #[test]
    fn stops_at_ply_limit() {
        let mut game = RandomGame::new_silent(1);
        game.play(6);
        assert_eq!(game.state().move_history().len(), 6);
        assert!(game.transcript().starts_with("1. "));
        assert_eq!(game.transcript().split(' ').filter(|t| t.ends_with('.')).count(), 3);
    }

    #[test]
    fn finished_game_plays_no_more() {
        let mut state = GameState::new();
        for text in ["f2f3", "e7e5", "g2g4", "d8h4"] {
            state.play_coordinate(text).unwrap();
        }
        let mut game = RandomGame::from_state(state, 3, true);
        assert_eq!(game.play(10), Status::Checkmate(Color::Black));
        assert_eq!(game.state().move_history().len(), 4);
        assert_eq!(game.transcript(), "1. f3 e5 2. g4 Qh4");
    }

    #[test]
    fn move_numbers_continue_from_the_given_state() {
        let mut state = GameState::new();
        state.play_coordinate("e2e4").unwrap();
        let mut game = RandomGame::from_state(state, 11, true);
        assert_eq!(game.move_number(), 1);
        game.play(1);
        assert_eq!(game.move_number(), 2);
        game.play(2);
        assert_eq!(game.move_number(), 3);
        assert!(game.transcript().starts_with("1. e4 "));
    }

    #[test]
    fn random_move_from_empty_list() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(random_move(&[], &mut rng), None);
        let moves = GameState::new().legal_moves();
        let picked = random_move(&moves, &mut rng).unwrap();
        assert!(moves.contains(&picked));
    }
}
