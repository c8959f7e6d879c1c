//! Board representation and the rules of play

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::lines::LineAnalyzer;

/// A cell on the 3x3 board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    X,
    O,
}

impl Cell {
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }

    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '.' | ' ' => Some(Cell::Empty),
            'X' | 'x' => Some(Cell::X),
            'O' | 'o' | '0' => Some(Cell::O),
            _ => None,
        }
    }

    pub fn to_player(self) -> Option<Player> {
        match self {
            Cell::X => Some(Player::X),
            Cell::O => Some(Player::O),
            Cell::Empty => None,
        }
    }
}

/// A player in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Get the opponent player
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Convert player to the mark they place
    pub fn mark(self) -> Cell {
        match self {
            Player::X => Cell::X,
            Player::O => Cell::O,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::X => write!(f, "X"),
            Player::O => write!(f, "O"),
        }
    }
}

/// A move target, addressed by zero-based (row, column)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Action {
    pub row: usize,
    pub col: usize,
}

impl Action {
    pub fn new(row: usize, col: usize) -> Self {
        Action { row, col }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The 3x3 grid of cells.
///
/// Boards are plain values: `apply` returns a new board and never touches
/// the receiver, so tree branches can hold earlier positions without any
/// aliasing concerns. Whose turn it is follows from the mark counts alone
/// (X always opens, turns alternate), so the board stores nothing but its
/// cells.
///
/// This type implements `Copy` since it is only 9 bytes of payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    pub cells: [[Cell; 3]; 3],
}

/// Count of each mark on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct MarkCount {
    x: usize,
    o: usize,
}

impl Board {
    /// Create a new empty board, X to move
    pub fn new() -> Self {
        Board {
            cells: [[Cell::Empty; 3]; 3],
        }
    }

    /// Create a board from a string representation.
    ///
    /// The string should contain 9 cell characters in row-major order
    /// (whitespace is filtered out), using `.` for empty cells.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - There are not exactly 9 non-whitespace characters
    /// - Any character is not a valid cell representation
    /// - The mark counts are impossible under X-first alternation
    ///
    /// # Examples
    ///
    /// ```
    /// use oxo::{Board, Player};
    ///
    /// let board = Board::from_string("XOX .O. ...").unwrap();
    /// assert_eq!(board.active_player(), Player::X);
    /// ```
    pub fn from_string(s: &str) -> Result<Self, crate::Error> {
        let chars: Vec<char> = s.chars().filter(|c| !c.is_whitespace()).collect();
        if chars.len() != 9 {
            return Err(crate::Error::InvalidBoardLength {
                expected: 9,
                got: chars.len(),
            });
        }

        let mut board = Board::new();
        for (i, &c) in chars.iter().enumerate() {
            board.cells[i / 3][i % 3] =
                Cell::from_char(c).ok_or(crate::Error::InvalidCellCharacter {
                    character: c,
                    position: i,
                })?;
        }

        let count = board.mark_count();
        if !(count.x == count.o || count.x == count.o + 1) {
            return Err(crate::Error::InvalidMarkCounts {
                x_count: count.x,
                o_count: count.o,
            });
        }

        Ok(board)
    }

    fn mark_count(&self) -> MarkCount {
        let mut count = MarkCount { x: 0, o: 0 };
        for row in &self.cells {
            for cell in row {
                match cell {
                    Cell::X => count.x += 1,
                    Cell::O => count.o += 1,
                    Cell::Empty => {}
                }
            }
        }
        count
    }

    /// Get cell at (row, col)
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    /// The player whose turn it is, derived from the mark counts.
    ///
    /// X moves first, so X is active whenever the counts are equal. The
    /// result is still well-defined on terminal boards, where no caller
    /// consults it.
    pub fn active_player(&self) -> Player {
        let count = self.mark_count();
        if count.x == count.o {
            Player::X
        } else {
            Player::O
        }
    }

    /// All actions targeting an empty cell, in row-major order.
    ///
    /// The vector is empty exactly when the board is full. Callers must not
    /// depend on the enumeration order.
    pub fn legal_actions(&self) -> Vec<Action> {
        let mut actions = Vec::new();
        for row in 0..3 {
            for col in 0..3 {
                if self.cells[row][col] == Cell::Empty {
                    actions.push(Action { row, col });
                }
            }
        }
        actions
    }

    /// Check if every cell is occupied
    pub fn is_full(&self) -> bool {
        self.cells
            .iter()
            .all(|row| row.iter().all(|&cell| cell != Cell::Empty))
    }

    /// Place the active player's mark and return the resulting board.
    ///
    /// # Errors
    ///
    /// Returns error if the action is outside the grid or targets an
    /// occupied cell. The receiver is never modified.
    ///
    /// # Examples
    ///
    /// ```
    /// use oxo::{Action, Board, Cell};
    ///
    /// let board = Board::new();
    /// let next = board.apply(Action::new(1, 1)).unwrap();
    /// assert_eq!(next.get(1, 1), Cell::X);
    /// assert_eq!(board.get(1, 1), Cell::Empty);
    /// ```
    #[must_use = "apply returns a new board; the original is unchanged"]
    pub fn apply(&self, action: Action) -> Result<Board, crate::Error> {
        let Action { row, col } = action;
        if row >= 3 || col >= 3 {
            return Err(crate::Error::OutOfBounds { row, col });
        }
        if self.cells[row][col] != Cell::Empty {
            return Err(crate::Error::CellOccupied { row, col });
        }

        let mut next = *self;
        next.cells[row][col] = self.active_player().mark();
        Ok(next)
    }

    /// Check if a player has completed a winning line
    pub fn has_won(&self, player: Player) -> bool {
        LineAnalyzer::has_won(self, player)
    }

    /// Get the winner if there is one
    pub fn winner(&self) -> Option<Player> {
        LineAnalyzer::winner(self)
    }

    /// Check if the game is over (win or full board)
    pub fn is_terminal(&self) -> bool {
        self.winner().is_some() || self.is_full()
    }

    /// Terminal utility: +1 if X has won, -1 if O has won, 0 otherwise.
    ///
    /// Only meaningful once `is_terminal` holds; on a live position it
    /// reports 0 rather than failing.
    pub fn score(&self) -> i32 {
        match self.winner() {
            Some(Player::X) => 1,
            Some(Player::O) => -1,
            None => 0,
        }
    }

    /// Check if the board is reachable through legal X-first play:
    /// mark counts consistent with alternation, at most one winner, and the
    /// winner's count consistent with having moved last.
    pub fn is_valid(&self) -> bool {
        let count = self.mark_count();
        if !(count.x == count.o || count.x == count.o + 1) {
            return false;
        }

        let x_wins = self.has_won(Player::X);
        let o_wins = self.has_won(Player::O);

        if x_wins && o_wins {
            return false;
        }
        // The winner placed the last mark
        if x_wins && count.x != count.o + 1 {
            return false;
        }
        if o_wins && count.x != count.o {
            return false;
        }

        true
    }

    /// Row-major string encoding, the inverse of [`Board::from_string`]
    pub fn encode(&self) -> String {
        self.cells
            .iter()
            .flat_map(|row| row.iter().map(|&cell| cell.to_char()))
            .collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.iter().enumerate() {
            for cell in row {
                write!(f, "{}", cell.to_char())?;
            }
            if i < 2 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
