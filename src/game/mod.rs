//! Core Connect Four game logic: board and squares, players, win scans, and
//! the game session that ties them together.

mod board;
mod player;
mod state;

pub use board::{Board, Coordinate, Direction, Square, COLUMNS, COMBINATION_LENGTH, ROWS};
pub use player::{Player, PlayerId};
pub use state::{GameOutcome, GameState};
pub use crate::error::MoveError;
