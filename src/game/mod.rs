//! Core Connect Four rules: the grid, the two players, turn rotation and
//! four-in-a-row detection.

mod board;
mod player;
mod state;

pub use board::{Board, COLUMNS, ROWS, RUN};
pub use player::{Player, PlayerColor};
pub use state::GameState;
