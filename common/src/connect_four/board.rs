use crate::connect_four::player::PlayerNum;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const ROWS: usize = 6;
pub const COLS: usize = 7;

// Number of aligned pieces needed to win
const LINE_LENGTH: usize = 4;

// Row and column steps for the horizontal, vertical and both diagonal axes.
// Each axis is walked in both directions.
const AXES: [(i32, i32); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

#[derive(Error, Debug, PartialEq)]
pub enum DropError {
    #[error("Column {0} is outside of the board")]
    OutOfBounds(usize),
    #[error("Column {0} is full")]
    ColumnFull(usize),
}

#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq)]
#[serde(into = "u8", from = "PlayerCell")]
pub enum Cell {
    Empty,
    Player1,
    Player2,
}

impl Cell {
    pub fn owner(self) -> Option<PlayerNum> {
        match self {
            Cell::Empty => None,
            Cell::Player1 => Some(PlayerNum::P1),
            Cell::Player2 => Some(PlayerNum::P2),
        }
    }

    pub fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }
}

impl From<PlayerNum> for Cell {
    fn from(player_num: PlayerNum) -> Self {
        match player_num {
            PlayerNum::P1 => Cell::Player1,
            PlayerNum::P2 => Cell::Player2,
        }
    }
}

// 0 is empty, 1 and 2 are the players' pieces
impl From<Cell> for u8 {
    fn from(cell: Cell) -> Self {
        cell.owner().map_or(0, PlayerNum::number)
    }
}

// Deserialization helper: anything that is not a valid player number reads as empty
#[derive(Deserialize)]
struct PlayerCell(u8);

impl From<PlayerCell> for Cell {
    fn from(cell: PlayerCell) -> Self {
        PlayerNum::try_from(cell.0).map_or(Cell::Empty, Cell::from)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BoardPosition {
    row: usize,
    col: usize,
}

impl BoardPosition {
    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }
}

/// A 6x7 Connect Four grid. Row 0 is the top of the board and pieces fall
/// towards row `ROWS - 1`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Board([[Cell; COLS]; ROWS]);

impl Default for Board {
    fn default() -> Self {
        Board([[Cell::Empty; COLS]; ROWS])
    }
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        self.0.get(row)?.get(col).copied()
    }

    // Signed so that the win check can step past the edges of the board
    fn get_space(&self, row: i32, col: i32) -> Option<Cell> {
        let row = usize::try_from(row).ok()?;
        let col = usize::try_from(col).ok()?;
        self.get(row, col)
    }

    pub fn is_column_full(&self, col: usize) -> bool {
        self.get(0, col).map_or(true, |top| !top.is_empty())
    }

    pub fn legal_columns(&self) -> Vec<usize> {
        (0..COLS).filter(|&col| !self.is_column_full(col)).collect()
    }

    /// Drops a piece into `col`. The piece lands in the lowest empty row of
    /// that column. Nothing is written when the drop is rejected.
    pub fn drop_piece(
        &mut self,
        col: usize,
        player_num: PlayerNum,
    ) -> Result<BoardPosition, DropError> {
        if col >= COLS {
            return Err(DropError::OutOfBounds(col));
        }
        let row = (0..ROWS)
            .rev()
            .find(|&row| self.0[row][col].is_empty())
            .ok_or(DropError::ColumnFull(col))?;
        self.0[row][col] = Cell::from(player_num);
        Ok(BoardPosition { row, col })
    }

    /// Checks whether the piece at `pos` is part of a line of four or more.
    /// Only the lines passing through `pos` are inspected, so this must be
    /// called with the position of the most recent drop.
    pub fn is_win(&self, pos: BoardPosition) -> bool {
        let cell = match self.get(pos.row, pos.col) {
            Some(cell) if !cell.is_empty() => cell,
            _ => return false,
        };
        AXES.iter().any(|&(d_row, d_col)| {
            let forward = self.count_in_direction(pos, d_row, d_col, cell);
            let backward = self.count_in_direction(pos, -d_row, -d_col, cell);
            1 + forward + backward >= LINE_LENGTH
        })
    }

    // Count consecutive `cell`s starting next to `pos` and stepping by (d_row, d_col)
    fn count_in_direction(
        &self,
        pos: BoardPosition,
        d_row: i32,
        d_col: i32,
        cell: Cell,
    ) -> usize {
        let mut row = pos.row as i32 + d_row;
        let mut col = pos.col as i32 + d_col;
        let mut count = 0;
        while self.get_space(row, col) == Some(cell) {
            count += 1;
            row += d_row;
            col += d_col;
        }
        count
    }

    pub fn is_full(&self) -> bool {
        (0..COLS).all(|col| self.is_column_full(col))
    }

    pub fn piece_count(&self) -> usize {
        self.0
            .iter()
            .flatten()
            .filter(|cell| !cell.is_empty())
            .count()
    }

    pub fn grid(&self) -> [[u8; COLS]; ROWS] {
        self.0.map(|row| row.map(u8::from))
    }
}
