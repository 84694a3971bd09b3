use super::{Board, LegalMoves, Player};
use crate::error::PlayError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum GameOutcome {
    Winner(Player),
    Draw,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameState {
    board: Board,
    current_player: Player,
    outcome: Option<GameOutcome>,
    moves_played: usize,
}

impl GameState {
    /// Create initial game state
    pub fn initial() -> Self {
        GameState {
            board: Board::new(),
            current_player: Player::Red, // Red starts
            outcome: None,
            moves_played: 0,
        }
    }

    /// Resume from an arbitrary board with `to_move` on turn.
    pub fn from_board(board: Board, to_move: Player) -> Self {
        GameState {
            board,
            current_player: to_move,
            outcome: Self::outcome_of(&board),
            moves_played: board.piece_count(),
        }
    }

    /// Get current player
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Get reference to board
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Get game outcome if game is over
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    pub fn moves_played(&self) -> usize {
        self.moves_played
    }

    /// Check if game is over
    pub fn is_terminal(&self) -> bool {
        self.outcome.is_some()
    }

    /// Get list of legal columns (not full)
    pub fn legal_moves(&self) -> LegalMoves {
        if self.is_terminal() {
            return LegalMoves::new();
        }
        self.board.legal_moves()
    }

    /// Apply a move and return new state (immutable)
    pub fn apply_move(&self, column: usize) -> Result<GameState, PlayError> {
        if self.is_terminal() {
            return Err(PlayError::GameOver);
        }

        let board = self.board.apply_move(column, self.current_player)?;

        Ok(GameState {
            board,
            current_player: self.current_player.other(),
            outcome: Self::outcome_of(&board),
            moves_played: self.moves_played + 1,
        })
    }

    fn outcome_of(board: &Board) -> Option<GameOutcome> {
        if let Some(winner) = board.winner() {
            Some(GameOutcome::Winner(winner))
        } else if board.is_full() {
            Some(GameOutcome::Draw)
        } else {
            None
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::initial()
    }
}
