//! High-level game management for drivers

use serde::{Deserialize, Serialize};

use crate::board::{Action, Board, Player};

/// A move in a played game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub action: Action,
    pub player: Player,
}

/// Outcome of a concluded game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    Win(Player),
    Draw,
}

/// A game in progress or concluded, with its move history.
///
/// A game starts on the empty board and transitions only through [`play`];
/// `outcome` is `None` while in progress and becomes `Win` or `Draw`
/// exactly when the board turns terminal, after which further play is
/// rejected.
///
/// [`play`]: Game::play
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    pub board: Board,
    pub moves: Vec<Move>,
    pub outcome: Option<GameOutcome>,
}

impl Game {
    /// Create a new game on the empty board
    pub fn new() -> Self {
        Game {
            board: Board::new(),
            moves: Vec::new(),
            outcome: None,
        }
    }

    /// Play a move for the active player
    ///
    /// # Errors
    ///
    /// Returns error if the game has concluded or the action is illegal on
    /// the current board.
    pub fn play(&mut self, action: Action) -> Result<(), crate::Error> {
        if self.outcome.is_some() {
            return Err(crate::Error::GameOver);
        }

        let player = self.board.active_player();
        let next = self.board.apply(action)?;

        self.moves.push(Move { action, player });
        self.board = next;

        if next.is_terminal() {
            self.outcome = Some(if let Some(winner) = next.winner() {
                GameOutcome::Win(winner)
            } else {
                GameOutcome::Draw
            });
        }

        Ok(())
    }

    /// Get the sequence of board states, from the empty board to the
    /// current one, by replaying the history.
    ///
    /// # Errors
    ///
    /// Returns error if any move in the history is invalid for its board.
    /// This indicates corrupted game data.
    pub fn state_sequence(&self) -> Result<Vec<Board>, crate::Error> {
        let mut states = Vec::with_capacity(self.moves.len() + 1);
        let mut state = Board::new();
        states.push(state);

        for m in &self.moves {
            state = state.apply(m.action)?;
            states.push(state);
        }

        Ok(states)
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_play_records_history() {
        let mut game = Game::new();
        game.play(Action::new(1, 1)).unwrap();
        game.play(Action::new(0, 0)).unwrap();

        assert_eq!(game.moves.len(), 2);
        assert_eq!(game.moves[0].player, Player::X);
        assert_eq!(game.moves[1].player, Player::O);
        assert_eq!(game.outcome, None);
    }

    #[test]
    fn test_win_concludes_game() {
        let mut game = Game::new();
        for action in [
            Action::new(0, 0), // X
            Action::new(1, 0), // O
            Action::new(0, 1), // X
            Action::new(1, 1), // O
            Action::new(0, 2), // X wins the top row
        ] {
            game.play(action).unwrap();
        }

        assert_eq!(game.outcome, Some(GameOutcome::Win(Player::X)));
        assert!(matches!(
            game.play(Action::new(2, 2)),
            Err(crate::Error::GameOver)
        ));
    }

    #[test]
    fn test_draw_outcome() {
        let mut game = Game::new();
        for action in [
            Action::new(0, 0), // X
            Action::new(0, 1), // O
            Action::new(0, 2), // X
            Action::new(1, 1), // O
            Action::new(1, 0), // X
            Action::new(2, 0), // O
            Action::new(1, 2), // X
            Action::new(2, 2), // O
            Action::new(2, 1), // X
        ] {
            game.play(action).unwrap();
        }

        assert_eq!(game.outcome, Some(GameOutcome::Draw));
    }

    #[test]
    fn test_illegal_move_leaves_game_unchanged() {
        let mut game = Game::new();
        game.play(Action::new(0, 0)).unwrap();

        assert!(game.play(Action::new(0, 0)).is_err());
        assert_eq!(game.moves.len(), 1);
        assert_eq!(game.outcome, None);
    }

    #[test]
    fn test_state_sequence_replays_to_current_board() {
        let mut game = Game::new();
        game.play(Action::new(1, 1)).unwrap();
        game.play(Action::new(0, 0)).unwrap();
        game.play(Action::new(2, 2)).unwrap();

        let states = game.state_sequence().unwrap();
        assert_eq!(states.len(), 4);
        assert_eq!(states[0], Board::new());
        assert_eq!(states[3], game.board);
    }
}
