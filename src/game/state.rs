use std::collections::HashSet;

use tracing::{debug, info, instrument, warn};

use super::board::{Board, Coordinate, Square, COLUMNS};
use super::player::Player;
use crate::error::{GameError, MoveError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameOutcome {
    Winner(Player),
    Tie,
}

/// A game session: the board, the player rotation and the result so far.
///
/// Moves are applied in place. After a winning move the current player stays
/// the winner and the board accepts no further moves until a reset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    players: Vec<Player>,
    current: usize,
    has_winner: bool,
    winning_coordinates: Vec<Coordinate>,
}

impl GameState {
    /// Create a game for the given players. The first player moves first.
    pub fn new(players: Vec<Player>) -> Result<Self, GameError> {
        if players.len() < 2 {
            return Err(GameError::TooFewPlayers(players.len()));
        }
        let mut seen = HashSet::new();
        for player in &players {
            if !seen.insert(player.id()) {
                return Err(GameError::DuplicateId(player.id().get()));
            }
        }

        Ok(GameState {
            board: Board::new(),
            players,
            current: 0,
            has_winner: false,
            winning_coordinates: Vec::new(),
        })
    }

    /// Clear the board and the result. The rotation is left where it is, so
    /// whoever is next in line starts.
    pub fn reset(&mut self) {
        self.board = Board::new();
        self.has_winner = false;
        self.winning_coordinates.clear();
    }

    /// Start another game. After a decisive game (won or tied) the rotation
    /// advances once, so after a win the player following the winner opens;
    /// an unfinished game is simply cleared.
    pub fn new_game(&mut self) {
        if self.outcome().is_some() {
            self.switch_to_next_player();
        }
        self.reset();
        info!(starter = %self.current_player(), "new game");
    }

    /// Pass the turn to the next player in rotation
    pub fn switch_to_next_player(&mut self) {
        self.current = (self.current + 1) % self.players.len();
    }

    /// Whose turn it is, or the winner once the game is won
    pub fn current_player(&self) -> &Player {
        &self.players[self.current]
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Get reference to board
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn has_winner(&self) -> bool {
        self.has_winner
    }

    /// The four squares of the winning line, empty while nobody has won
    pub fn winning_coordinates(&self) -> &[Coordinate] {
        &self.winning_coordinates
    }

    /// No winner and a full top row
    pub fn is_tied(&self) -> bool {
        !self.has_winner && self.board.is_full()
    }

    /// Get game outcome if game is over
    pub fn outcome(&self) -> Option<GameOutcome> {
        if self.has_winner {
            Some(GameOutcome::Winner(self.current_player().clone()))
        } else if self.is_tied() {
            Some(GameOutcome::Tie)
        } else {
            None
        }
    }

    pub fn first_empty_square_in_column(&self, column: usize) -> Option<Square> {
        self.board.first_empty_square_in_column(column)
    }

    /// A move is valid when the column has room and nobody has won yet.
    /// Columns outside the board are never valid.
    pub fn is_valid_move(&self, column: usize) -> bool {
        !self.has_winner && self.first_empty_square_in_column(column).is_some()
    }

    /// Columns the current player may drop into
    pub fn legal_columns(&self) -> Vec<usize> {
        (0..COLUMNS).filter(|&c| self.is_valid_move(c)).collect()
    }

    /// Drop the current player's piece into `column`.
    ///
    /// Returns the square the piece landed in. If the piece completes a line
    /// the game is won and the current player is kept as the winner,
    /// otherwise the turn passes on. An invalid move changes nothing.
    #[instrument(skip(self))]
    pub fn handle_move(&mut self, column: usize) -> Result<Square, MoveError> {
        if self.has_winner {
            warn!("move rejected: game already won");
            return Err(MoveError::GameOver);
        }

        let player = self.current_player();
        let piece = player.id();
        let combination = player.winning_combination();
        let square = self.board.drop_piece(column, piece).inspect_err(|e| {
            warn!(error = %e, "move rejected");
        })?;
        debug!(player = %piece, row = square.row(), column, "piece placed");

        match self.board.find_win(square.row(), square.column(), &combination) {
            Some((direction, coordinates)) => {
                self.has_winner = true;
                self.winning_coordinates = coordinates.to_vec();
                info!(
                    winner = %self.current_player(),
                    ?direction,
                    coordinates = ?self.winning_coordinates,
                    "game won"
                );
            }
            None => {
                self.switch_to_next_player();
                if self.is_tied() {
                    info!("game tied");
                }
            }
        }

        Ok(square)
    }
}

impl Default for GameState {
    fn default() -> Self {
        GameState {
            board: Board::new(),
            players: Player::default_pair(),
            current: 0,
            has_winner: false,
            winning_coordinates: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{PlayerId, ROWS};

    fn play(state: &mut GameState, columns: &[usize]) {
        for &column in columns {
            state.handle_move(column).unwrap();
        }
    }

    fn id(n: u8) -> PlayerId {
        PlayerId::new(n).unwrap()
    }

    /// Moves that fill the board without any line of four. Even columns end
    /// up as 1,2,2,1,1,2 from the bottom and odd columns as 2,1,1,2,2,1.
    fn tie_sequence() -> Vec<usize> {
        let mut moves = Vec::new();
        for pair in [0, 2] {
            moves.extend([0, 1, 1, 0, 1, 0, 0, 1, 0, 1, 1, 0].map(|offset| pair + offset));
        }
        moves.extend([4, 4, 6, 4, 4, 5, 4, 4, 5, 6, 5, 6, 6, 5, 6, 5, 5, 6]);
        moves
    }

    #[test]
    fn test_initial_state() {
        let state = GameState::default();
        assert_eq!(state.current_player().id(), id(1));
        assert!(!state.has_winner());
        assert!(!state.is_tied());
        assert!(state.winning_coordinates().is_empty());
        assert_eq!(state.outcome(), None);
        assert_eq!(state.legal_columns(), (0..COLUMNS).collect::<Vec<_>>());
    }

    #[test]
    fn test_new_rejects_bad_player_sets() {
        let one = vec![Player::new(1, "red").unwrap()];
        assert_eq!(GameState::new(one), Err(GameError::TooFewPlayers(1)));

        let duplicate = vec![
            Player::new(3, "red").unwrap(),
            Player::new(3, "yellow").unwrap(),
        ];
        assert_eq!(GameState::new(duplicate), Err(GameError::DuplicateId(3)));
    }

    #[test]
    fn test_handle_move_alternates_players() {
        let mut state = GameState::default();
        let square = state.handle_move(3).unwrap();

        assert_eq!(square.coordinate(), (0, 3));
        assert_eq!(state.board().square(0, 3).piece(), Some(id(1)));
        assert_eq!(state.current_player().id(), id(2));

        state.handle_move(3).unwrap();
        assert_eq!(state.board().square(1, 3).piece(), Some(id(2)));
        assert_eq!(state.current_player().id(), id(1));
    }

    #[test]
    fn test_fill_column() {
        for column in 0..COLUMNS {
            let mut state = GameState::default();
            for row in 0..ROWS {
                assert_eq!(
                    state.first_empty_square_in_column(column),
                    Some(Square::empty(row, column))
                );
                state.handle_move(column).unwrap();
            }
            assert_eq!(state.first_empty_square_in_column(column), None);
            assert!(!state.is_valid_move(column));
            assert_eq!(
                state.handle_move(column),
                Err(MoveError::ColumnFull(column))
            );
            assert!(!state.has_winner());
        }
    }

    #[test]
    fn test_out_of_range_column() {
        let mut state = GameState::default();
        assert!(!state.is_valid_move(COLUMNS));
        assert_eq!(state.first_empty_square_in_column(COLUMNS), None);

        let before = state.clone();
        assert_eq!(
            state.handle_move(COLUMNS),
            Err(MoveError::InvalidColumn(COLUMNS))
        );
        assert_eq!(state, before);
    }

    #[test]
    fn test_row_win() {
        let mut state = GameState::default();
        // Player 1 along row 0, player 2 stacks on top
        play(&mut state, &[0, 0, 1, 1, 2, 2, 3]);

        assert!(state.has_winner());
        assert!(!state.is_tied());
        assert_eq!(state.current_player().id(), id(1));
        assert_eq!(
            state.winning_coordinates(),
            &[(0, 0), (0, 1), (0, 2), (0, 3)]
        );
        assert_eq!(
            state.outcome(),
            Some(GameOutcome::Winner(Player::new(1, "red").unwrap()))
        );
    }

    #[test]
    fn test_column_win() {
        let mut state = GameState::default();
        play(&mut state, &[0, 1, 0, 1, 0, 1, 0]);

        assert!(state.has_winner());
        assert_eq!(state.current_player().id(), id(1));
        assert_eq!(
            state.winning_coordinates(),
            &[(0, 0), (1, 0), (2, 0), (3, 0)]
        );
    }

    #[test]
    fn test_ascending_diagonal_win() {
        let mut state = GameState::default();
        play(&mut state, &[2, 0, 3, 1, 2, 1, 3, 2, 3, 3]);

        assert!(state.has_winner());
        assert_eq!(state.current_player().id(), id(2));
        assert_eq!(
            state.winning_coordinates(),
            &[(0, 0), (1, 1), (2, 2), (3, 3)]
        );
    }

    #[test]
    fn test_descending_diagonal_win() {
        let mut state = GameState::default();
        play(&mut state, &[0, 2, 1, 3, 0, 2, 1, 1, 0, 0]);

        assert!(state.has_winner());
        assert_eq!(state.current_player().id(), id(2));
        assert_eq!(
            state.winning_coordinates(),
            &[(3, 0), (2, 1), (1, 2), (0, 3)]
        );
    }

    #[test]
    fn test_row_reported_before_column() {
        let mut state = GameState::default();
        // Dropping into column 3 lands on (3,3), completing row 3 and
        // column 3 at once.
        let p1 = Some(id(1));
        let p2 = Some(id(2));
        for column in 0..3 {
            for row in 0..3 {
                state.board.set(row, column, p2);
            }
            state.board.set(3, column, p1);
        }
        for row in 0..3 {
            state.board.set(row, 3, p1);
        }

        state.handle_move(3).unwrap();
        assert!(state.has_winner());
        assert_eq!(
            state.winning_coordinates(),
            &[(3, 0), (3, 1), (3, 2), (3, 3)]
        );
    }

    #[test]
    fn test_no_moves_after_win() {
        let mut state = GameState::default();
        play(&mut state, &[0, 1, 0, 1, 0, 1, 0]);

        assert!(!state.is_valid_move(4));
        assert!(state.legal_columns().is_empty());
        let before = state.clone();
        assert_eq!(state.handle_move(4), Err(MoveError::GameOver));
        assert_eq!(state, before);
    }

    #[test]
    fn test_tie() {
        let mut state = GameState::default();
        for column in tie_sequence() {
            assert!(!state.is_tied());
            state.handle_move(column).unwrap();
            assert!(!state.has_winner(), "unexpected win after column {column}");
        }

        assert!(state.board().is_full());
        assert!(state.is_tied());
        assert!(!state.has_winner());
        assert!(state.winning_coordinates().is_empty());
        assert_eq!(state.outcome(), Some(GameOutcome::Tie));
        assert!(state.legal_columns().is_empty());
    }

    #[test]
    fn test_replay_is_deterministic() {
        let moves = [3, 3, 4, 2, 5, 6, 1, 0, 2, 4, 4, 5];
        let mut first = GameState::default();
        let mut second = GameState::default();
        for &column in &moves {
            let a = first.handle_move(column);
            let b = second.handle_move(column);
            assert_eq!(a, b);
        }
        assert_eq!(first, second);
    }

    #[test]
    fn test_reset_keeps_rotation() {
        let mut state = GameState::default();
        play(&mut state, &[0]);
        assert_eq!(state.current_player().id(), id(2));

        state.reset();
        assert_eq!(state.board(), &Board::new());
        assert_eq!(state.current_player().id(), id(2));
    }

    #[test]
    fn test_new_game_after_win_switches_starter() {
        let mut state = GameState::default();
        // Player 1 starts and wins
        play(&mut state, &[0, 1, 0, 1, 0, 1, 0]);
        state.new_game();
        assert!(!state.has_winner());
        assert!(state.winning_coordinates().is_empty());
        assert_eq!(state.current_player().id(), id(2));

        // Player 2 starts and loses; the loser opens again
        play(&mut state, &[6, 0, 6, 0, 5, 0, 6, 0]);
        assert!(state.has_winner());
        assert_eq!(state.current_player().id(), id(1));
        state.new_game();
        assert_eq!(state.current_player().id(), id(2));
    }

    #[test]
    fn test_new_game_after_starter_loses() {
        let mut state = GameState::default();
        // Player 1 starts, player 2 wins in column 1
        play(&mut state, &[0, 1, 0, 1, 2, 1, 6, 1]);
        assert!(state.has_winner());
        assert_eq!(state.current_player().id(), id(2));
        assert_eq!(
            state.winning_coordinates(),
            &[(0, 1), (1, 1), (2, 1), (3, 1)]
        );

        state.new_game();
        assert_eq!(state.current_player().id(), id(1));
        assert_eq!(state.board(), &Board::new());
    }

    #[test]
    fn test_new_game_after_tie_switches_starter() {
        let mut state = GameState::default();
        play(&mut state, &tie_sequence());
        assert!(state.is_tied());

        state.new_game();
        assert!(!state.is_tied());
        assert_eq!(state.current_player().id(), id(2));
    }

    #[test]
    fn test_new_game_mid_game_keeps_rotation() {
        let mut state = GameState::default();
        play(&mut state, &[2, 2, 2]);
        state.new_game();
        assert_eq!(state.current_player().id(), id(2));
        assert_eq!(state.board(), &Board::new());
    }

    #[test]
    fn test_three_player_rotation() {
        let players = vec![
            Player::new(1, "red").unwrap(),
            Player::new(2, "yellow").unwrap(),
            Player::new(3, "green").unwrap(),
        ];
        let mut state = GameState::new(players).unwrap();
        play(&mut state, &[0, 1, 2]);
        assert_eq!(state.current_player().id(), id(1));
        assert_eq!(state.board().square(0, 2).piece(), Some(id(3)));
    }
}
