use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{backend::Backend, Terminal};
use tracing::info;

use crate::ai::{Agent, MinimaxAgent, SearchStats, SessionStats};
use crate::config::{AppConfig, Difficulty, DifficultyConfig};
use crate::error::{MoveError, PlayError};
use crate::game::{GameOutcome, GameState, Player, CENTER_COL, COLS};

use super::game_view::{self, GameView};

/// The AI's most recent move and the search that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AiMove {
    pub column: usize,
    pub stats: SearchStats,
}

pub struct App {
    game_state: GameState,
    human: Player,
    ai: MinimaxAgent,
    difficulty: Difficulty,
    depths: DifficultyConfig,
    /// Fixed depth from the command line; picking a difficulty clears it.
    depth_override: Option<usize>,
    selected_column: usize,
    should_quit: bool,
    message: Option<String>,
    last_ai_move: Option<AiMove>,
    session: SessionStats,
}

impl App {
    pub fn new(config: &AppConfig) -> Self {
        let difficulty = config.game.difficulty;
        let human = if config.game.human_first {
            Player::Red
        } else {
            Player::Yellow
        };

        App {
            game_state: GameState::initial(),
            human,
            ai: MinimaxAgent::new(config.difficulty.depth(difficulty)),
            difficulty,
            depths: config.difficulty.clone(),
            depth_override: None,
            selected_column: CENTER_COL,
            should_quit: false,
            message: None,
            last_ai_move: None,
            session: SessionStats::new(),
        }
    }

    /// Search at a fixed depth instead of the difficulty preset.
    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth_override = Some(depth);
        self.ai.set_depth(depth);
        self
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal
                .draw(|f| self.render(f))
                .map_err(|e| io::Error::other(e.to_string()))?;

            if self.should_quit {
                break;
            }

            // The frame just drawn shows the thinking indicator
            if self.ai_to_move() {
                self.play_ai_move();
                continue;
            }

            self.handle_events()?;
        }
        Ok(())
    }

    fn ai_to_move(&self) -> bool {
        !self.game_state.is_terminal() && self.game_state.current_player() != self.human
    }

    /// Handle keyboard events
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    /// Handle key press
    fn handle_key(&mut self, key: KeyEvent) {
        // Clear message on any key press
        self.message = None;

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Left => {
                self.selected_column = self.selected_column.saturating_sub(1);
            }
            KeyCode::Right => {
                if self.selected_column < COLS - 1 {
                    self.selected_column += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.drop_piece();
            }
            KeyCode::Char('1') => self.set_difficulty(Difficulty::Easy),
            KeyCode::Char('2') => self.set_difficulty(Difficulty::Medium),
            KeyCode::Char('3') => self.set_difficulty(Difficulty::Hard),
            KeyCode::Char('s') => {
                self.human = self.human.other();
                self.restart();
                self.message = Some(format!(
                    "You now play {} ({})",
                    self.human.name(),
                    if self.human == Player::Red { "first" } else { "second" }
                ));
            }
            KeyCode::Char('r') => {
                self.restart();
                self.message = Some("New game started!".to_string());
            }
            _ => {}
        }
    }

    /// Drop the human's piece in the selected column
    fn drop_piece(&mut self) {
        if self.game_state.is_terminal() {
            self.message = Some("Game over! Press 'r' to restart.".to_string());
            return;
        }
        if self.ai_to_move() {
            return;
        }
        self.play(self.selected_column);
    }

    fn play_ai_move(&mut self) {
        let column = self.ai.select_action(&self.game_state);
        if let Some(stats) = self.ai.last_search() {
            self.session.record(&stats);
            self.last_ai_move = Some(AiMove { column, stats });
        }
        self.play(column);
    }

    fn play(&mut self, column: usize) {
        match self.game_state.apply_move(column) {
            Ok(next) => {
                self.game_state = next;
                if let Some(outcome) = next.outcome() {
                    self.finish(outcome);
                }
            }
            Err(PlayError::GameOver) => {
                self.message = Some("Game is over!".to_string());
            }
            Err(PlayError::Move(MoveError::ColumnFull { column })) => {
                self.message = Some(format!("Column {} is full!", column + 1));
            }
            Err(PlayError::Move(MoveError::OutOfRange { .. })) => {
                self.message = Some("Invalid column!".to_string());
            }
        }
    }

    fn finish(&mut self, outcome: GameOutcome) {
        let text = match outcome {
            GameOutcome::Winner(player) if player == self.human => "You win!",
            GameOutcome::Winner(_) => "The AI wins!",
            GameOutcome::Draw => "It's a draw!",
        };
        self.message = Some(format!("{text} Press 'r' to play again."));

        info!(
            ?outcome,
            human = self.human.name(),
            depth = self.ai.depth(),
            ai_moves = self.session.moves,
            total_nodes = self.session.total_nodes,
            total_seconds = self.session.total_seconds,
            "game finished"
        );
    }

    fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
        self.depth_override = None;
        self.ai.set_depth(self.depths.depth(difficulty));
        self.message = Some(format!("Difficulty: {}", self.depth_label()));
    }

    fn restart(&mut self) {
        self.game_state = GameState::initial();
        self.selected_column = CENTER_COL;
        self.last_ai_move = None;
        self.session = SessionStats::new();
    }

    fn depth_label(&self) -> String {
        match self.depth_override {
            Some(depth) => format!("Custom (depth {depth})"),
            None => format!("{} (depth {})", self.difficulty, self.ai.depth()),
        }
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        let view = GameView {
            state: &self.game_state,
            selected_column: self.selected_column,
            message: self.message.as_deref(),
            human: self.human,
            depth_label: self.depth_label(),
            thinking: self.ai_to_move(),
            last_ai_move: self.last_ai_move,
            session: &self.session,
        };
        game_view::render(frame, &view);
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(&AppConfig::default())
    }
}
