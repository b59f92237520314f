mod board;
mod game_state;
mod player;

pub use board::{Board, BoardPosition, Cell, DropError, COLS, ROWS};
pub use game_state::{GameState, GameView, InvalidMove, InvalidMoveReason, Status};
pub use player::PlayerNum;
