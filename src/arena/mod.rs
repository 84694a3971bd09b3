//! Headless play between agents: single games with per-side search
//! statistics, and win/draw tallies over a match.

mod tally;

pub use tally::MatchTally;

use tracing::info;

use crate::ai::{Agent, SessionStats};
use crate::error::PlayError;
use crate::game::{Board, GameOutcome, GameState, Player};

/// Everything worth keeping from one finished game.
#[derive(Debug, Clone, serde::Serialize)]
pub struct GameRecord {
    pub moves: Vec<usize>,
    pub outcome: GameOutcome,
    pub red: SessionStats,
    pub yellow: SessionStats,
    pub final_board: Board,
}

impl GameRecord {
    pub fn winner(&self) -> Option<Player> {
        match self.outcome {
            GameOutcome::Winner(player) => Some(player),
            GameOutcome::Draw => None,
        }
    }

    pub fn stats_for(&self, player: Player) -> &SessionStats {
        match player {
            Player::Red => &self.red,
            Player::Yellow => &self.yellow,
        }
    }
}

/// Play one game to the end. Red moves first.
///
/// An illegal choice by either agent aborts the game with the error.
pub fn play_game(red: &mut dyn Agent, yellow: &mut dyn Agent) -> Result<GameRecord, PlayError> {
    let mut state = GameState::initial();
    let mut moves = Vec::new();
    let mut red_stats = SessionStats::new();
    let mut yellow_stats = SessionStats::new();

    let outcome = loop {
        if let Some(outcome) = state.outcome() {
            break outcome;
        }

        let action = match state.current_player() {
            Player::Red => take_turn(red, &mut red_stats, &state),
            Player::Yellow => take_turn(yellow, &mut yellow_stats, &state),
        };
        state = state.apply_move(action)?;
        moves.push(action);
    };

    info!(
        red = red.name(),
        yellow = yellow.name(),
        ?outcome,
        moves = moves.len(),
        "game finished"
    );

    Ok(GameRecord {
        moves,
        outcome,
        red: red_stats,
        yellow: yellow_stats,
        final_board: *state.board(),
    })
}

fn take_turn(agent: &mut dyn Agent, session: &mut SessionStats, state: &GameState) -> usize {
    let action = agent.select_action(state);
    if let Some(stats) = agent.last_search() {
        session.record(&stats);
    }
    action
}
