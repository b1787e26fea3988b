use std::str::FromStr;

use crate::game::{GameOutcome, GameState, Player, PlayerId, COLUMNS, ROWS};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(frame: &mut Frame, game_state: &GameState, selected_column: usize, message: &str) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(ROWS as u16 + 4), // Board
            Constraint::Length(3), // Message
            Constraint::Length(3), // Controls
        ])
        .split(frame.area());

    render_header(frame, game_state, chunks[0]);
    render_board(frame, game_state, selected_column, chunks[1]);
    render_message(frame, game_state, message, chunks[2]);
    render_controls(frame, chunks[3]);
}

/// Terminal colour for a player's configured colour name
fn player_color(player: &Player) -> Color {
    Color::from_str(player.colour()).unwrap_or(Color::White)
}

fn piece_color(game_state: &GameState, piece: PlayerId) -> Color {
    game_state
        .players()
        .iter()
        .find(|p| p.id() == piece)
        .map(player_color)
        .unwrap_or(Color::White)
}

fn render_header(frame: &mut Frame, game_state: &GameState, area: Rect) {
    let (status, color) = match game_state.outcome() {
        Some(GameOutcome::Winner(player)) => (format!("{player} wins!"), player_color(&player)),
        Some(GameOutcome::Tie) => ("Tie".to_string(), Color::Gray),
        None => {
            let player = game_state.current_player();
            (format!("Current: {player}"), player_color(player))
        }
    };

    let header = Paragraph::new(status)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Connect Four"));

    frame.render_widget(header, area);
}

fn render_board(frame: &mut Frame, game_state: &GameState, selected_column: usize, area: Rect) {
    let board = game_state.board();
    let winning = game_state.winning_coordinates();
    let mut lines = Vec::new();

    // Column numbers with selection indicator
    let mut col_line = vec![Span::raw("   ")]; // Padding (3 chars to match "  ║")
    for col in 0..COLUMNS {
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
    col_line.push(Span::raw("  ")); // Suffix padding to match " ║"
    lines.push(Line::from(col_line));

    let rule = "═".repeat(COLUMNS * 3 + 1);
    lines.push(Line::from(format!("  ╔{rule}╗")));

    // Row 0 is the bottom of the board, so draw from the top row down
    for row in (0..ROWS).rev() {
        let mut row_spans = vec![Span::raw("  ║")];

        for col in 0..COLUMNS {
            let span = match board.square(row, col).piece() {
                None => Span::styled(" . ", Style::default().fg(Color::DarkGray)),
                Some(piece) => {
                    let mut style = Style::default().fg(piece_color(game_state, piece));
                    if winning.contains(&(row, col)) {
                        style = style.add_modifier(Modifier::REVERSED | Modifier::BOLD);
                    }
                    Span::styled(" ● ", style)
                }
            };
            row_spans.push(span);
        }

        row_spans.push(Span::raw(" ║"));
        lines.push(Line::from(row_spans));
    }

    lines.push(Line::from(format!("  ╚{rule}╝")));

    let board_widget = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(board_widget, area);
}

fn render_message(frame: &mut Frame, game_state: &GameState, message: &str, area: Rect) {
    let color = match game_state.outcome() {
        Some(GameOutcome::Tie) => Color::Gray,
        Some(GameOutcome::Winner(player)) => player_color(&player),
        None => player_color(game_state.current_player()),
    };
    let msg_widget = Paragraph::new(message)
        .style(Style::default().fg(color))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(msg_widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let controls = Paragraph::new("←/→: Move  |  Enter/1-7: Drop  |  R: New game  |  Q: Quit")
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Controls"));

    frame.render_widget(controls, area);
}
