use crate::game::{GameOutcome, GameState, MoveError, COLUMNS};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{backend::Backend, Terminal};
use std::io;
use tracing::debug;

pub struct App {
    game_state: GameState,
    selected_column: usize,
    should_quit: bool,
    message: String,
}

impl App {
    pub fn new(game_state: GameState) -> Self {
        let message = opening_message(&game_state);
        App {
            game_state,
            selected_column: COLUMNS / 2, // Start in middle
            should_quit: false,
            message,
        }
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            self.handle_events()?;
        }
        Ok(())
    }

    pub fn game_state(&self) -> &GameState {
        &self.game_state
    }

    /// Handle keyboard events
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(std::time::Duration::from_millis(100))? {
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
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Left => {
                self.selected_column = self.selected_column.saturating_sub(1);
            }
            KeyCode::Right => {
                if self.selected_column + 1 < COLUMNS {
                    self.selected_column += 1;
                }
            }
            KeyCode::Char(c @ '1'..='9') => {
                let column = c as usize - '1' as usize;
                if column < COLUMNS {
                    self.selected_column = column;
                    self.drop_piece();
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.drop_piece();
            }
            KeyCode::Char('r') => {
                self.game_state.new_game();
                self.selected_column = COLUMNS / 2;
                self.message = opening_message(&self.game_state);
            }
            _ => {}
        }
    }

    /// Drop piece in selected column
    fn drop_piece(&mut self) {
        let column = self.selected_column;
        if !self.game_state.is_valid_move(column) {
            debug!(column, "ignoring invalid column");
            if self.game_state.outcome().is_some() {
                self.message = "Game over! Press 'r' to start a new game.".to_string();
            }
            return;
        }

        match self.game_state.handle_move(column) {
            Ok(_) => {
                self.message = match self.game_state.outcome() {
                    Some(GameOutcome::Tie) => "The game has ended in a tie.".to_string(),
                    Some(GameOutcome::Winner(player)) => format!("{player} wins!"),
                    None => format!("{}'s turn.", self.game_state.current_player()),
                };
            }
            Err(MoveError::ColumnFull(_)) => {
                self.message = "Column is full!".to_string();
            }
            Err(MoveError::InvalidColumn(_)) => {
                self.message = "Invalid column!".to_string();
            }
            Err(MoveError::GameOver) => {
                self.message = "Game is over!".to_string();
            }
        }
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        super::game_view::render(frame, &self.game_state, self.selected_column, &self.message);
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(GameState::default())
    }
}

fn opening_message(game_state: &GameState) -> String {
    format!("{}, make the first move!", game_state.current_player())
}
