pub mod connect_four;
pub mod messages;

pub use connect_four::{
    Board, BoardPosition, Cell, DropError, GameState, GameView, InvalidMove, InvalidMoveReason,
    PlayerNum, Status, COLS, ROWS,
};
