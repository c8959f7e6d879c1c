//! Winning line analysis for the 3x3 board

use std::collections::HashSet;

use crate::board::{Action, Board, Cell, Player};

/// The 8 winning lines, as (row, col) triples
pub const WINNING_LINES: [[(usize, usize); 3]; 8] = [
    [(0, 0), (0, 1), (0, 2)],
    [(1, 0), (1, 1), (1, 2)],
    [(2, 0), (2, 1), (2, 2)], // rows
    [(0, 0), (1, 0), (2, 0)],
    [(0, 1), (1, 1), (2, 1)],
    [(0, 2), (1, 2), (2, 2)], // columns
    [(0, 0), (1, 1), (2, 2)],
    [(0, 2), (1, 1), (2, 0)], // diagonals
];

/// Utility for analyzing winning lines
pub struct LineAnalyzer;

impl LineAnalyzer {
    /// Check if a player has won by having three in a line
    pub fn has_won(board: &Board, player: Player) -> bool {
        let target = player.mark();
        WINNING_LINES
            .iter()
            .any(|line| line.iter().all(|&(row, col)| board.get(row, col) == target))
    }

    /// The winner, if any line is complete.
    ///
    /// Lines are scanned in a fixed order; on hand-built boards where both
    /// players hold a complete line (unreachable through legal play) the
    /// first complete line found decides.
    pub fn winner(board: &Board) -> Option<Player> {
        WINNING_LINES.iter().find_map(|line| {
            let first = board.get(line[0].0, line[0].1);
            if first != Cell::Empty
                && line.iter().all(|&(row, col)| board.get(row, col) == first)
            {
                first.to_player()
            } else {
                None
            }
        })
    }

    /// Find all actions that would immediately complete a line for the player
    pub fn winning_actions(board: &Board, player: Player) -> HashSet<Action> {
        let mut actions = HashSet::new();
        for line in &WINNING_LINES {
            if let Some(action) = Self::winning_action_in_line(board, player, line) {
                actions.insert(action);
            }
        }
        actions
    }

    /// Check if a player has an immediate winning action (2 in a line with 1 empty)
    pub fn has_immediate_win(board: &Board, player: Player) -> bool {
        WINNING_LINES
            .iter()
            .any(|line| Self::winning_action_in_line(board, player, line).is_some())
    }

    /// Find the completing action in a specific line, if one exists
    fn winning_action_in_line(
        board: &Board,
        player: Player,
        line: &[(usize, usize); 3],
    ) -> Option<Action> {
        let target = player.mark();
        let mut count = 0;
        let mut empty_action = None;

        for &(row, col) in line {
            match board.get(row, col) {
                Cell::Empty => {
                    if empty_action.is_some() {
                        // More than one empty cell, not a winning action
                        return None;
                    }
                    empty_action = Some(Action { row, col });
                }
                c if c == target => count += 1,
                _ => return None, // Opponent mark in line
            }
        }

        if count == 2 { empty_action } else { None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_won_row() {
        let board = Board::from_string("XXX OO. ...").unwrap();
        assert!(LineAnalyzer::has_won(&board, Player::X));
        assert!(!LineAnalyzer::has_won(&board, Player::O));
    }

    #[test]
    fn test_has_won_column() {
        let board = Board::from_string("OX. OXX O..").unwrap();
        assert!(LineAnalyzer::has_won(&board, Player::O));
        assert!(!LineAnalyzer::has_won(&board, Player::X));
    }

    #[test]
    fn test_has_won_diagonals_for_either_player() {
        let main = Board::from_string("X.O .XO ..X").unwrap();
        assert_eq!(LineAnalyzer::winner(&main), Some(Player::X));

        let anti = Board::from_string("X.O XO. O.X").unwrap();
        assert_eq!(LineAnalyzer::winner(&anti), Some(Player::O));
    }

    #[test]
    fn test_no_winner() {
        assert_eq!(LineAnalyzer::winner(&Board::new()), None);
        let board = Board::from_string("XO. OX. ...").unwrap();
        assert_eq!(LineAnalyzer::winner(&board), None);
    }

    #[test]
    fn test_winning_actions() {
        // X.X on the top row completes at (0, 1)
        let board = Board::from_string("X.X .O. .O.").unwrap();
        let actions = LineAnalyzer::winning_actions(&board, Player::X);
        assert_eq!(actions.len(), 1);
        assert!(actions.contains(&Action::new(0, 1)));
    }

    #[test]
    fn test_winning_actions_multiple() {
        // XX. / X.. threatens both the top row and the left column
        let board = Board::from_string("XX. X.. .OO").unwrap();
        let actions = LineAnalyzer::winning_actions(&board, Player::X);
        assert_eq!(actions.len(), 2);
        assert!(actions.contains(&Action::new(0, 2)));
        assert!(actions.contains(&Action::new(2, 0)));
    }

    #[test]
    fn test_has_immediate_win() {
        let board = Board::from_string("XX. .O. ...").unwrap();
        assert!(LineAnalyzer::has_immediate_win(&board, Player::X));
        assert!(!LineAnalyzer::has_immediate_win(&board, Player::O));
    }

    #[test]
    fn test_blocked_line_is_not_a_win() {
        let board = Board::from_string("XXO .O. ...").unwrap();
        assert!(!LineAnalyzer::has_immediate_win(&board, Player::X));
    }
}
