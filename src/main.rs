//! Rules engine command line.
//!
//! Usage: cargo run --release -- perft --depth 4 --parallel
//!        cargo run --release -- show --moves e2e4 e7e5 g1f3
//!        cargo run --release -- random --plies 80 --seed 42

use std::time::Instant;

use clap::{Parser, Subcommand};
use itertools::Itertools;

use rust_chess_rules::game::GameState;
use rust_chess_rules::perft::{perft, perft_divide, perft_parallel};
use rust_chess_rules::playout::RandomGame;
use rust_chess_rules::types::Status;

#[derive(Parser, Debug)]
#[command(name = "rust_chess_rules")]
#[command(about = "Legal move generation, perft and random self-play")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Count leaf nodes of the legal move tree
    Perft {
        #[arg(short, long, default_value_t = 4)]
        depth: u8,

        /// Print the node count below each root move
        #[arg(long)]
        divide: bool,

        /// Split the root moves across threads
        #[arg(long, conflicts_with = "divide")]
        parallel: bool,

        /// Coordinate moves to play from the start position first
        #[arg(long, num_args = 1..)]
        moves: Vec<String>,
    },

    /// Print the position reached after some moves, and its legal moves
    Show {
        #[arg(long, num_args = 1..)]
        moves: Vec<String>,
    },

    /// Play a game of uniformly random moves
    Random {
        #[arg(short, long, default_value_t = 200)]
        plies: usize,

        #[arg(short, long, default_value_t = 0)]
        seed: u64,

        #[arg(long)]
        silent: bool,
    },
}

fn replay(moves: &[String]) -> color_eyre::Result<GameState> {
    let mut game = GameState::new();
    for text in moves {
        game.play_coordinate(text)?;
    }
    Ok(game)
}

fn run_perft(moves: &[String], depth: u8, divide: bool, parallel: bool) -> color_eyre::Result<()> {
    let mut game = replay(moves)?;
    let now = Instant::now();
    let nodes = if divide {
        let divided = perft_divide(&mut game, depth);
        for (mv, nodes) in &divided {
            println!("{}: {}", mv.to_coordinate(), nodes);
        }
        println!();
        divided.iter().map(|(_, nodes)| nodes).sum()
    } else if parallel {
        perft_parallel(&game, depth)
    } else {
        perft(&mut game, depth)
    };
    let elapsed = now.elapsed().as_secs_f64();
    println!(
        "perft {}: {} nodes in {:.3}s ({:.0} nodes/s)",
        depth,
        nodes,
        elapsed,
        nodes as f64 / elapsed.max(f64::EPSILON)
    );
    Ok(())
}

fn show(moves: &[String]) -> color_eyre::Result<()> {
    let mut game = replay(moves)?;
    game.board().draw_to_terminal();

    let legal_moves = game.legal_moves();
    println!("side to move: {}", game.side_to_move().to_human());
    println!("castling: {}", game.castling_rights());
    println!(
        "en passant: {}",
        game.en_passant_target()
            .map_or("-".to_string(), |square| square.to_string())
    );
    let status = match game.status() {
        Status::Ongoing if game.in_check() => "check".to_string(),
        Status::Ongoing => "ongoing".to_string(),
        Status::Checkmate(winner) => format!("checkmate, {} wins", winner.to_human()),
        Status::Stalemate => "stalemate".to_string(),
    };
    println!("status: {}", status);
    println!(
        "{} legal moves: {}",
        legal_moves.len(),
        legal_moves.iter().join(" ")
    );
    Ok(())
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    match args.command {
        Command::Perft {
            depth,
            divide,
            parallel,
            moves,
        } => run_perft(&moves, depth, divide, parallel)?,
        Command::Show { moves } => show(&moves)?,
        Command::Random {
            plies,
            seed,
            silent,
        } => {
            let mut game = if silent {
                RandomGame::new_silent(seed)
            } else {
                RandomGame::new(seed)
            };
            let status = game.play(plies);
            println!("{}", game.transcript());
            println!("{:?}", status);
        }
    }
    Ok(())
}
