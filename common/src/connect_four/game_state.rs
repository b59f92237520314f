use crate::connect_four::board::{Board, DropError, COLS, ROWS};
use crate::connect_four::player::PlayerNum;
use serde::{Serialize, Serializer};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum InvalidMoveReason {
    OutOfRange,
    ColumnFull,
    GameOver,
}

impl fmt::Display for InvalidMoveReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidMoveReason::OutOfRange => write!(f, "is outside of the board"),
            InvalidMoveReason::ColumnFull => write!(f, "is full"),
            InvalidMoveReason::GameOver => write!(f, "cannot be played, the game is over"),
        }
    }
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
#[error("Column {column} {reason}")]
pub struct InvalidMove {
    pub column: i32,
    pub reason: InvalidMoveReason,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Status {
    InProgress,
    Win(PlayerNum),
    Draw,
}

impl Status {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Status::InProgress)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::InProgress => write!(f, "InProgress"),
            Status::Win(player_num) => write!(f, "Win:{}", player_num.number()),
            Status::Draw => write!(f, "Draw"),
        }
    }
}

impl Serialize for Status {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Read-only snapshot of a game, taken in one piece so that the grid, the
/// active player and the status always agree with each other.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct GameView {
    pub grid: [[u8; COLS]; ROWS],
    pub active_player: PlayerNum,
    pub status: Status,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    board: Board,
    active_player: PlayerNum,
    status: Status,
}

impl Default for GameState {
    fn default() -> Self {
        GameState {
            board: Board::new(),
            active_player: PlayerNum::P1,
            status: Status::InProgress,
        }
    }
}

impl GameState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active_player(&self) -> PlayerNum {
        self.active_player
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    pub fn moves_played(&self) -> usize {
        self.board.piece_count()
    }

    /// Drops the active player's piece into `column` and returns the new
    /// status. A rejected move leaves the game untouched.
    ///
    /// The active player only changes hands while the game is still in
    /// progress, so after a win it still names the winner.
    pub fn play_move(&mut self, column: i32) -> Result<Status, InvalidMove> {
        let invalid = |reason| InvalidMove { column, reason };
        if self.is_terminal() {
            return Err(invalid(InvalidMoveReason::GameOver));
        }
        let col = usize::try_from(column).map_err(|_| invalid(InvalidMoveReason::OutOfRange))?;
        let pos = self
            .board
            .drop_piece(col, self.active_player)
            .map_err(|err| match err {
                DropError::OutOfBounds(_) => invalid(InvalidMoveReason::OutOfRange),
                DropError::ColumnFull(_) => invalid(InvalidMoveReason::ColumnFull),
            })?;

        // A winning move that also fills the board is still a win
        self.status = if self.board.is_win(pos) {
            Status::Win(self.active_player)
        } else if self.board.is_full() {
            Status::Draw
        } else {
            Status::InProgress
        };
        if !self.is_terminal() {
            self.active_player = self.active_player.other();
        }
        Ok(self.status)
    }

    pub fn view(&self) -> GameView {
        GameView {
            grid: self.board.grid(),
            active_player: self.active_player,
            status: self.status,
        }
    }

    pub fn reset(&mut self) {
        *self = GameState::default();
    }
}
