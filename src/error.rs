use std::path::PathBuf;

use crate::game::{COLS, ROWS};

/// A column that cannot take a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("column {column} is out of range (0-{})", COLS - 1)]
    OutOfRange { column: usize },

    #[error("column {column} is full")]
    ColumnFull { column: usize },
}

/// Errors when rebuilding a board from its flat encoding.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("expected {expected} cells, got {0}", expected = ROWS * COLS)]
    WrongLength(usize),

    #[error("invalid cell value {value} at index {index} (expected 0, 1 or 2)")]
    InvalidCell { index: usize, value: u8 },

    #[error("piece at row {row}, column {col} has an empty cell below it")]
    FloatingPiece { row: usize, col: usize },
}

/// Errors from advancing a game.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlayError {
    #[error("the game is already over")]
    GameOver,

    #[error(transparent)]
    Move(#[from] MoveError),
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
