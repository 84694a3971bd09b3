use std::fmt;

use arrayvec::ArrayVec;

use super::player::Player;
use crate::error::{BoardError, MoveError};

pub const ROWS: usize = 6;
pub const COLS: usize = 7;
pub const WIN_LENGTH: usize = 4;
pub const CENTER_COL: usize = COLS / 2;

/// Legal columns, in ascending order unless reordered by the caller.
pub type LegalMoves = ArrayVec<usize, COLS>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Red,
    Yellow,
}

impl Cell {
    /// Flat encoding: 0 empty, 1 Red, 2 Yellow.
    pub fn code(self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::Red => 1,
            Cell::Yellow => 2,
        }
    }

    pub fn from_code(code: u8) -> Option<Cell> {
        match code {
            0 => Some(Cell::Empty),
            1 => Some(Cell::Red),
            2 => Some(Cell::Yellow),
            _ => None,
        }
    }

    /// The player owning this cell, if any.
    pub fn owner(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Red => Some(Player::Red),
            Cell::Yellow => Some(Player::Yellow),
        }
    }
}

/// Coordinates (row, col) of one 4-cell window.
pub type Window = [(usize, usize); WIN_LENGTH];

const HORIZONTAL_WINDOWS: usize = ROWS * (COLS - WIN_LENGTH + 1);
const VERTICAL_WINDOWS: usize = COLS * (ROWS - WIN_LENGTH + 1);
const DIAGONAL_WINDOWS: usize = (ROWS - WIN_LENGTH + 1) * (COLS - WIN_LENGTH + 1);
pub const WINDOW_COUNT: usize = HORIZONTAL_WINDOWS + VERTICAL_WINDOWS + 2 * DIAGONAL_WINDOWS;

/// Every window on the board, in scan order: horizontal (row-major), vertical
/// (column-major), `\` diagonals, then `/` diagonals.
pub static WINDOWS: [Window; WINDOW_COUNT] = build_windows();

const fn build_windows() -> [Window; WINDOW_COUNT] {
    let mut out = [[(0, 0); WIN_LENGTH]; WINDOW_COUNT];
    let mut n = 0;

    // Horizontal
    let mut row = 0;
    while row < ROWS {
        let mut col = 0;
        while col + WIN_LENGTH <= COLS {
            let mut i = 0;
            while i < WIN_LENGTH {
                out[n][i] = (row, col + i);
                i += 1;
            }
            n += 1;
            col += 1;
        }
        row += 1;
    }

    // Vertical
    let mut col = 0;
    while col < COLS {
        let mut row = 0;
        while row + WIN_LENGTH <= ROWS {
            let mut i = 0;
            while i < WIN_LENGTH {
                out[n][i] = (row + i, col);
                i += 1;
            }
            n += 1;
            row += 1;
        }
        col += 1;
    }

    // Diagonal (top-left to bottom-right, \)
    let mut row = 0;
    while row + WIN_LENGTH <= ROWS {
        let mut col = 0;
        while col + WIN_LENGTH <= COLS {
            let mut i = 0;
            while i < WIN_LENGTH {
                out[n][i] = (row + i, col + i);
                i += 1;
            }
            n += 1;
            col += 1;
        }
        row += 1;
    }

    // Diagonal (bottom-left to top-right, /)
    let mut row = WIN_LENGTH - 1;
    while row < ROWS {
        let mut col = 0;
        while col + WIN_LENGTH <= COLS {
            let mut i = 0;
            while i < WIN_LENGTH {
                out[n][i] = (row - i, col + i);
                i += 1;
            }
            n += 1;
            col += 1;
        }
        row += 1;
    }

    out
}

/// A Connect Four position. `Copy`, so every transition yields a fresh value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(into = "Vec<u8>", try_from = "Vec<u8>")]
pub struct Board {
    cells: [[Cell; COLS]; ROWS],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Board {
            cells: [[Cell::Empty; COLS]; ROWS],
        }
    }

    /// Get the cell at a specific position
    /// Row 0 is the top, row 5 is the bottom
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    /// Check if a column is full (out-of-range columns count as full)
    pub fn is_column_full(&self, col: usize) -> bool {
        if col >= COLS {
            return true;
        }
        self.cells[0][col] != Cell::Empty
    }

    /// Columns whose top cell is empty, ascending.
    pub fn legal_moves(&self) -> LegalMoves {
        (0..COLS).filter(|&col| !self.is_column_full(col)).collect()
    }

    /// Lowest empty row in `col`, if the column has room.
    pub fn landing_row(&self, col: usize) -> Option<usize> {
        if col >= COLS {
            return None;
        }
        (0..ROWS).rev().find(|&row| self.cells[row][col] == Cell::Empty)
    }

    /// Number of pieces stacked in `col` (0 for out-of-range columns).
    pub fn column_height(&self, col: usize) -> usize {
        if col >= COLS {
            return 0;
        }
        (0..ROWS)
            .filter(|&row| self.cells[row][col] != Cell::Empty)
            .count()
    }

    /// Drop `player`'s piece into `col` and return the resulting board.
    /// `self` is left untouched.
    pub fn apply_move(&self, col: usize, player: Player) -> Result<Board, MoveError> {
        if col >= COLS {
            return Err(MoveError::OutOfRange { column: col });
        }
        let row = self
            .landing_row(col)
            .ok_or(MoveError::ColumnFull { column: col })?;

        let mut next = *self;
        next.cells[row][col] = player.to_cell();
        Ok(next)
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        (0..COLS).all(|col| self.is_column_full(col))
    }

    pub fn piece_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|&&cell| cell != Cell::Empty)
            .count()
    }

    /// The contents of every window, in [`WINDOWS`] order.
    pub fn windows(&self) -> impl Iterator<Item = [Cell; WIN_LENGTH]> + '_ {
        WINDOWS
            .iter()
            .map(move |&window| window.map(|(row, col)| self.cells[row][col]))
    }

    /// Owner of the first complete window found in scan order.
    pub fn winner(&self) -> Option<Player> {
        self.windows().find_map(|window| {
            let first = window[0];
            if first != Cell::Empty && window.iter().all(|&cell| cell == first) {
                first.owner()
            } else {
                None
            }
        })
    }

    /// True once someone has won or no column has room.
    pub fn is_terminal(&self) -> bool {
        self.winner().is_some() || self.legal_moves().is_empty()
    }

    /// Exact outcome of a terminal board: +1 win, -1 loss, 0 draw.
    pub fn utility(&self, perspective: Player) -> i32 {
        match self.winner() {
            Some(winner) if winner == perspective => 1,
            Some(_) => -1,
            None => 0,
        }
    }

    /// Whether every column is stacked from the bottom with no gaps.
    pub fn has_gravity(&self) -> bool {
        self.floating_piece().is_none()
    }

    fn floating_piece(&self) -> Option<(usize, usize)> {
        for col in 0..COLS {
            for row in 0..ROWS - 1 {
                if self.cells[row][col] != Cell::Empty && self.cells[row + 1][col] == Cell::Empty {
                    return Some((row, col));
                }
            }
        }
        None
    }

    /// Row-major cell codes, row 0 first.
    pub fn to_flat(&self) -> [u8; ROWS * COLS] {
        let mut flat = [0u8; ROWS * COLS];
        for (idx, cell) in self.cells.iter().flatten().enumerate() {
            flat[idx] = cell.code();
        }
        flat
    }

    /// Rebuild a board from [`Board::to_flat`] output.
    pub fn from_flat(flat: &[u8]) -> Result<Board, BoardError> {
        if flat.len() != ROWS * COLS {
            return Err(BoardError::WrongLength(flat.len()));
        }

        let mut board = Board::new();
        for (index, &value) in flat.iter().enumerate() {
            let cell = Cell::from_code(value).ok_or(BoardError::InvalidCell { index, value })?;
            board.cells[index / COLS][index % COLS] = cell;
        }

        if let Some((row, col)) = board.floating_piece() {
            return Err(BoardError::FloatingPiece { row, col });
        }
        Ok(board)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Board> for Vec<u8> {
    fn from(board: Board) -> Self {
        board.to_flat().to_vec()
    }
}

impl TryFrom<Vec<u8>> for Board {
    type Error = BoardError;

    fn try_from(flat: Vec<u8>) -> Result<Self, Self::Error> {
        Board::from_flat(&flat)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            let line: String = row
                .iter()
                .map(|cell| match cell {
                    Cell::Empty => '.',
                    Cell::Red => 'X',
                    Cell::Yellow => 'O',
                })
                .collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
