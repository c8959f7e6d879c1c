//! Exhaustive minimax search over the game tree.
//!
//! The tree is small enough (fewer than 9! nodes, far fewer in practice
//! thanks to early termination) that brute force is exact and instant, so
//! there is no pruning, no heuristic evaluation, and no caching of
//! previously seen positions.

use serde::Serialize;

use crate::{
    board::{Action, Board, Player},
    error::{Error, Result},
};

/// Game-theoretic value of a position under optimal play by both sides.
///
/// Terminal positions report their score directly (+1 X win, -1 O win,
/// 0 draw); live positions recurse full-depth and full-width, maximizing
/// when X is to move and minimizing when O is.
pub fn evaluate(board: &Board) -> i32 {
    if board.is_terminal() {
        return board.score();
    }

    let maximizing = board.active_player() == Player::X;
    let mut best = if maximizing { i32::MIN } else { i32::MAX };

    for action in board.legal_actions() {
        let child = board
            .apply(action)
            .expect("legal action generation should not fail");
        let value = evaluate(&child);
        best = if maximizing {
            best.max(value)
        } else {
            best.min(value)
        };
    }

    best
}

/// The optimal action for the active player.
///
/// Among equally good actions the first one encountered in enumeration
/// order wins the tie; callers may rely only on the optimality of the
/// returned action's score, not on which optimal action is chosen.
///
/// # Errors
///
/// Returns [`Error::NoMovesAvailable`] if the position is terminal.
pub fn best_action(board: &Board) -> Result<Action> {
    if board.is_terminal() {
        return Err(Error::NoMovesAvailable);
    }

    let maximizing = board.active_player() == Player::X;
    let mut best_score = if maximizing { i32::MIN } else { i32::MAX };
    let mut best = None;

    for action in board.legal_actions() {
        let child = board
            .apply(action)
            .expect("legal action generation should not fail");
        let value = evaluate(&child);

        let improves = if maximizing {
            value > best_score
        } else {
            value < best_score
        };
        if improves {
            best_score = value;
            best = Some(action);
        }
    }

    best.ok_or(Error::NoMovesAvailable)
}

/// Full minimax analysis of a position: its value and every optimal action
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub value: i32,
    pub optimal: Vec<Action>,
}

/// Compute the position's value together with all actions achieving it.
///
/// [`best_action`] always returns a member of the `optimal` set.
///
/// # Errors
///
/// Returns [`Error::NoMovesAvailable`] if the position is terminal.
pub fn analyze(board: &Board) -> Result<Analysis> {
    if board.is_terminal() {
        return Err(Error::NoMovesAvailable);
    }

    let maximizing = board.active_player() == Player::X;
    let mut value = if maximizing { i32::MIN } else { i32::MAX };
    let mut optimal: Vec<Action> = Vec::new();

    for action in board.legal_actions() {
        let child = board
            .apply(action)
            .expect("legal action generation should not fail");
        let child_value = evaluate(&child);

        let improves = if maximizing {
            child_value > value
        } else {
            child_value < value
        };
        if improves {
            value = child_value;
            optimal.clear();
            optimal.push(action);
        } else if child_value == value {
            optimal.push(action);
        }
    }

    Ok(Analysis { value, optimal })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_positions_evaluate_to_their_score() {
        let x_win = Board::from_string("XXX OO. ...").unwrap();
        assert_eq!(evaluate(&x_win), 1);

        let o_win = Board::from_string("XX. OOO X..").unwrap();
        assert_eq!(evaluate(&o_win), -1);

        let draw = Board::from_string("XOX XXO OXO").unwrap();
        assert_eq!(evaluate(&draw), 0);
    }

    #[test]
    fn test_immediate_win_is_taken() {
        // X to move completes the top row
        let board = Board::from_string("XX. OO. ...").unwrap();
        assert_eq!(evaluate(&board), 1);
        assert_eq!(best_action(&board).unwrap(), Action::new(0, 2));
    }

    #[test]
    fn test_best_action_fails_on_terminal_board() {
        let board = Board::from_string("XXX OO. ...").unwrap();
        assert!(matches!(
            best_action(&board),
            Err(Error::NoMovesAvailable)
        ));
        assert!(analyze(&board).is_err());
    }

    #[test]
    fn test_best_action_is_among_optimal() {
        let board = Board::from_string("X.. .O. ...").unwrap();
        let analysis = analyze(&board).unwrap();
        let action = best_action(&board).unwrap();
        assert!(analysis.optimal.contains(&action));
    }

    #[test]
    fn test_last_cell_forced() {
        // One empty cell left, filling it draws
        let board = Board::from_string("XOX OOX X.O").unwrap();
        assert_eq!(best_action(&board).unwrap(), Action::new(2, 1));
        assert_eq!(evaluate(&board), 0);
    }
}
