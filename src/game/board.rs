use super::player::PlayerId;
use crate::error::MoveError;

pub const ROWS: usize = 6;
pub const COLUMNS: usize = 7;
/// Number of consecutive pieces needed to win
pub const COMBINATION_LENGTH: usize = 4;

/// A `(row, column)` position on the board. Row 0 is the bottom row.
pub type Coordinate = (usize, usize);

/// One cell of the board: a fixed position plus its occupant, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Square {
    row: usize,
    column: usize,
    piece: Option<PlayerId>,
}

impl Square {
    pub fn empty(row: usize, column: usize) -> Self {
        Square {
            row,
            column,
            piece: None,
        }
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn column(&self) -> usize {
        self.column
    }

    pub fn coordinate(&self) -> Coordinate {
        (self.row, self.column)
    }

    /// Id of the player whose piece sits here, `None` when unoccupied
    pub fn piece(&self) -> Option<PlayerId> {
        self.piece
    }

    pub fn is_empty(&self) -> bool {
        self.piece.is_none()
    }
}

/// The four lines a winning combination can lie on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Row,
    Column,
    /// Row and column increase together (`/`)
    AscendingDiagonal,
    /// Row decreases as column increases (`\`)
    DescendingDiagonal,
}

impl Direction {
    /// Order in which lines are checked after a move. When a move completes
    /// several lines at once, the first one in this order is reported.
    pub const SCAN_ORDER: [Direction; 4] = [
        Direction::Row,
        Direction::Column,
        Direction::AscendingDiagonal,
        Direction::DescendingDiagonal,
    ];
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    squares: [[Square; COLUMNS]; ROWS],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Board {
            squares: std::array::from_fn(|row| {
                std::array::from_fn(|column| Square::empty(row, column))
            }),
        }
    }

    /// Get the square at a specific position
    /// Row 0 is the bottom, row 5 is the top
    pub fn square(&self, row: usize, column: usize) -> Square {
        self.squares[row][column]
    }

    /// Lowest unoccupied square of a column, or `None` if the column is full
    /// or outside the board.
    pub fn first_empty_square_in_column(&self, column: usize) -> Option<Square> {
        if column >= COLUMNS {
            return None;
        }
        (0..ROWS)
            .map(|row| self.squares[row][column])
            .find(Square::is_empty)
    }

    /// Drop a piece in a column, returns the square where it landed
    pub fn drop_piece(&mut self, column: usize, piece: PlayerId) -> Result<Square, MoveError> {
        if column >= COLUMNS {
            return Err(MoveError::InvalidColumn(column));
        }
        let (row, column) = self
            .first_empty_square_in_column(column)
            .ok_or(MoveError::ColumnFull(column))?
            .coordinate();

        let square = &mut self.squares[row][column];
        square.piece = Some(piece);
        Ok(*square)
    }

    /// Check if every square of a row is occupied
    pub fn is_row_full(&self, row: usize) -> bool {
        self.squares[row].iter().all(|square| !square.is_empty())
    }

    /// Pieces stack from row 0, so a full top row means a full board.
    pub fn is_full(&self) -> bool {
        self.is_row_full(ROWS - 1)
    }

    /// Every coordinate of the line running in `direction` through
    /// `(row, column)`, ordered from the line's origin to its far end.
    ///
    /// Rows start at column 0 and columns at row 0. The ascending diagonal
    /// starts where walking down-left from the point hits an edge; the
    /// descending diagonal starts where walking up-left hits one.
    pub fn line_through(&self, row: usize, column: usize, direction: Direction) -> Vec<Coordinate> {
        match direction {
            Direction::Row => (0..COLUMNS).map(|c| (row, c)).collect(),
            Direction::Column => (0..ROWS).map(|r| (r, column)).collect(),
            Direction::AscendingDiagonal => {
                let steps = row.min(column);
                let (origin_row, origin_column) = (row - steps, column - steps);
                let length = (ROWS - origin_row).min(COLUMNS - origin_column);
                (0..length)
                    .map(|i| (origin_row + i, origin_column + i))
                    .collect()
            }
            Direction::DescendingDiagonal => {
                let steps = (ROWS - 1 - row).min(column);
                let (origin_row, origin_column) = (row + steps, column - steps);
                let length = (origin_row + 1).min(COLUMNS - origin_column);
                (0..length)
                    .map(|i| (origin_row - i, origin_column + i))
                    .collect()
            }
        }
    }

    /// First window of `COMBINATION_LENGTH` consecutive squares along `line`
    /// whose pieces match `combination`.
    fn find_combination(
        &self,
        line: &[Coordinate],
        combination: &[PlayerId; COMBINATION_LENGTH],
    ) -> Option<[Coordinate; COMBINATION_LENGTH]> {
        line.windows(COMBINATION_LENGTH)
            .find(|window| {
                window
                    .iter()
                    .zip(combination)
                    .all(|(&(row, column), &id)| self.squares[row][column].piece == Some(id))
            })
            .and_then(|window| window.try_into().ok())
    }

    /// Search the lines through `(row, column)` for a player's winning
    /// combination (see [`Player::winning_combination`]).
    ///
    /// Lines are scanned in [`Direction::SCAN_ORDER`] and the first match is
    /// returned. Only the first `COMBINATION_LENGTH` coordinates of a longer
    /// run are reported.
    ///
    /// [`Player::winning_combination`]: super::Player::winning_combination
    pub fn find_win(
        &self,
        row: usize,
        column: usize,
        combination: &[PlayerId; COMBINATION_LENGTH],
    ) -> Option<(Direction, [Coordinate; COMBINATION_LENGTH])> {
        Direction::SCAN_ORDER.into_iter().find_map(|direction| {
            let line = self.line_through(row, column, direction);
            self.find_combination(&line, combination)
                .map(|coordinates| (direction, coordinates))
        })
    }

    #[cfg(test)]
    pub(crate) fn set(&mut self, row: usize, column: usize, piece: Option<PlayerId>) {
        self.squares[row][column].piece = piece;
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
