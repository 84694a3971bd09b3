use crate::ai::SessionStats;
use crate::game::{Board, Cell, GameOutcome, GameState, Player, COLS, ROWS};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::app::AiMove;

/// Everything one frame needs, borrowed from the app.
pub struct GameView<'a> {
    pub state: &'a GameState,
    pub selected_column: usize,
    pub message: Option<&'a str>,
    pub human: Player,
    pub depth_label: String,
    pub thinking: bool,
    pub last_ai_move: Option<AiMove>,
    pub session: &'a SessionStats,
}

pub fn render(frame: &mut Frame, view: &GameView) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(12),   // Board + stats
            Constraint::Length(3), // Message
            Constraint::Length(4), // Controls
        ])
        .split(frame.area());

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(30), Constraint::Length(36)])
        .split(chunks[1]);

    render_header(frame, view, chunks[0]);
    render_board(frame, view.state.board(), view.selected_column, body[0]);
    render_stats(frame, view, body[1]);
    render_message(frame, view.message, chunks[2]);
    render_controls(frame, chunks[3]);
}

fn player_color(player: Player) -> Color {
    match player {
        Player::Red => Color::Red,
        Player::Yellow => Color::Yellow,
    }
}

fn render_header(frame: &mut Frame, view: &GameView, area: Rect) {
    let current = view.state.current_player();
    let status = match view.state.outcome() {
        Some(GameOutcome::Winner(player)) => format!("Game Over: {} wins", player.name()),
        Some(GameOutcome::Draw) => "Game Over: draw".to_string(),
        None if view.thinking => format!(
            "AI (Player {}, {}) is thinking...",
            current.number(),
            current.name()
        ),
        None => format!("Your turn (Player {}, {})", current.number(), current.name()),
    };
    let status = format!("{status}  |  AI: {}", view.depth_label);

    let header = Paragraph::new(status)
        .style(
            Style::default()
                .fg(player_color(current))
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Connect Four"),
        );

    frame.render_widget(header, area);
}

fn render_board(frame: &mut Frame, board: &Board, selected_column: usize, area: Rect) {
    let mut lines = Vec::new();
    let border = "═".repeat(COLS * 3 + 1);

    // Column numbers with selection indicator
    let mut col_line = vec![Span::raw("   ")];
    for col in 0..COLS {
        let label = format!(" {} ", col + 1);
        if col == selected_column {
            col_line.push(Span::styled(
                label,
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            ));
        } else {
            col_line.push(Span::raw(label));
        }
    }
    col_line.push(Span::raw("  "));
    lines.push(Line::from(col_line));

    lines.push(Line::from(format!("  ╔{border}╗")));

    for row in 0..ROWS {
        let mut row_spans = vec![Span::raw("  ║")];
        for col in 0..COLS {
            let (symbol, color) = match board.get(row, col) {
                Cell::Empty => (" . ", Color::DarkGray),
                Cell::Red => (" ● ", Color::Red),
                Cell::Yellow => (" ● ", Color::Yellow),
            };
            row_spans.push(Span::styled(symbol, Style::default().fg(color)));
        }
        row_spans.push(Span::raw(" ║"));
        lines.push(Line::from(row_spans));
    }

    lines.push(Line::from(format!("  ╚{border}╝")));

    let mut indicator_line = vec![Span::raw("   ")];
    for col in 0..COLS {
        if col == selected_column {
            indicator_line.push(Span::styled(" ▲ ", Style::default().fg(Color::Cyan)));
        } else {
            indicator_line.push(Span::raw("   "));
        }
    }
    indicator_line.push(Span::raw("  "));
    lines.push(Line::from(indicator_line));

    let board_widget = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(board_widget, area);
}

fn render_stats(frame: &mut Frame, view: &GameView, area: Rect) {
    let title = Style::default().add_modifier(Modifier::BOLD);
    let mut lines = vec![Line::from(Span::styled("Last AI move", title))];

    match view.last_ai_move {
        Some(AiMove { column, stats }) => {
            lines.push(Line::from(format!("  Column        : {}", column + 1)));
            lines.push(Line::from(format!(
                "  Nodes expanded: {}",
                group_thousands(stats.nodes_expanded)
            )));
            lines.push(Line::from(format!("  Search depth  : {}", stats.depth)));
            lines.push(Line::from(format!(
                "  Time taken    : {:.3}s",
                stats.time_seconds
            )));
        }
        None => lines.push(Line::from("  (none yet)")),
    }

    let session = view.session;
    let summary = if view.state.is_terminal() {
        "AI performance summary"
    } else {
        "AI this game"
    };
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(summary, title)));
    lines.push(Line::from(format!("  AI moves      : {}", session.moves)));
    lines.push(Line::from(format!(
        "  Total nodes   : {}",
        group_thousands(session.total_nodes)
    )));
    lines.push(Line::from(format!(
        "  Avg nodes/move: {}",
        group_thousands(session.average_nodes())
    )));
    lines.push(Line::from(format!(
        "  Thinking time : {:.3}s",
        session.total_time().as_secs_f64()
    )));

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::raw("  You: "),
        Span::styled(
            format!("Player {} ({})", view.human.number(), view.human.name()),
            Style::default()
                .fg(player_color(view.human))
                .add_modifier(Modifier::BOLD),
        ),
    ]));

    let stats = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("AI Stats"));
    frame.render_widget(stats, area);
}

fn render_message(frame: &mut Frame, message: Option<&str>, area: Rect) {
    let msg_widget = Paragraph::new(message.unwrap_or(""))
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(msg_widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let line1 = Line::from("←/→: Move  |  Enter: Drop  |  R: Restart  |  Q: Quit");
    let line2 = Line::from("1/2/3: Easy/Medium/Hard  |  S: Swap who goes first");

    let controls = Paragraph::new(vec![line1, line2])
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Controls"),
        );

    frame.render_widget(controls, area);
}

/// `1234567` -> `1,234,567`
fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
