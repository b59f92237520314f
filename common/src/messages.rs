use crate::connect_four::{GameView, InvalidMove};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct PlayRequest {
    pub col: i32,
}

#[derive(Serialize, Deserialize, Copy, Clone, Debug, Default, PartialEq)]
pub struct Scores {
    pub player1: u32,
    pub player2: u32,
}

#[derive(Serialize, Debug)]
pub struct StateResponse {
    #[serde(flatten)]
    pub game: GameView,
    pub scores: Scores,
}

#[derive(Serialize, Debug)]
pub struct ErrorResponse {
    pub error: String,
    pub column: i32,
}

impl From<InvalidMove> for ErrorResponse {
    fn from(err: InvalidMove) -> Self {
        ErrorResponse {
            error: err.to_string(),
            column: err.column,
        }
    }
}
