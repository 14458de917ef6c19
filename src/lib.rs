pub mod types;
pub mod error;
pub mod board;
pub mod checks;
pub mod movegen;
pub mod castling;
pub mod game;
pub mod perft;
pub mod playout;
