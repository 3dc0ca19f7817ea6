#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]

pub mod analysis;
pub mod board;
pub mod board_display;
pub mod castling_right;
pub mod color;
pub mod coord;
pub mod end_state;
pub mod fen;
pub mod fuzz;
pub mod movegen;
pub mod moves;
pub mod piece;
pub mod position;
