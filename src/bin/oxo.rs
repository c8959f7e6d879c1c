//! oxo CLI - solve tic-tac-toe positions with the perfect-play engine
//!
//! This binary is a thin driver over the library interface: it parses a
//! position, reports the engine's analysis, plays the engine against
//! itself, and enumerates the state space.

use anyhow::{Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::Serialize;

use oxo::{Action, Board, Game, GameOutcome, LineAnalyzer, Player, analyze, best_action};

#[derive(Parser)]
#[command(name = "oxo")]
#[command(version, about = "Perfect-play tic-tac-toe solver", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a position and report the optimal move
    Solve {
        /// Nine cells in row-major order over `.XO` (defaults to the empty board)
        board: Option<String>,

        /// Emit the analysis as JSON
        #[arg(long)]
        json: bool,
    },

    /// Play the engine against itself
    Selfplay {
        /// Side played by a uniform-random opponent instead of the engine
        #[arg(long, value_enum)]
        random: Option<Side>,

        /// Seed for the random opponent
        #[arg(long, default_value_t = 0)]
        seed: u64,
    },

    /// Enumerate the reachable state space
    Stats,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum Side {
    X,
    O,
}

impl Side {
    fn player(self) -> Player {
        match self {
            Side::X => Player::X,
            Side::O => Player::O,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Solve { board, json } => solve(board, json),
        Commands::Selfplay { random, seed } => selfplay(random.map(Side::player), seed),
        Commands::Stats => stats(),
    }
}

#[derive(Serialize)]
struct SolveReport {
    board: String,
    to_move: Player,
    value: i32,
    engine_move: Action,
    optimal: Vec<Action>,
}

fn solve(board: Option<String>, json: bool) -> Result<()> {
    let board = match board {
        Some(s) => Board::from_string(&s)?,
        None => Board::new(),
    };

    if !board.is_valid() {
        bail!("position is not reachable through legal play: {}", board.encode());
    }

    if board.is_terminal() {
        println!("{board}\n");
        match board.winner() {
            Some(winner) => println!("Game over: {winner} has won"),
            None => println!("Game over: draw"),
        }
        return Ok(());
    }

    let analysis = analyze(&board)?;
    let engine_move = best_action(&board)?;

    if json {
        let report = SolveReport {
            board: board.encode(),
            to_move: board.active_player(),
            value: analysis.value,
            engine_move,
            optimal: analysis.optimal,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{board}\n");
    println!("To move: {}", board.active_player());
    println!("Game value: {} ({})", analysis.value, describe_value(analysis.value));

    for player in [Player::X, Player::O] {
        let mut threats: Vec<Action> =
            LineAnalyzer::winning_actions(&board, player).into_iter().collect();
        if !threats.is_empty() {
            threats.sort_by_key(|a| (a.row, a.col));
            let listed: Vec<String> = threats.iter().map(|a| a.to_string()).collect();
            println!("Immediate wins for {player}: {}", listed.join(", "));
        }
    }

    println!("Engine move: {engine_move}");
    let listed: Vec<String> = analysis.optimal.iter().map(|a| a.to_string()).collect();
    println!("Optimal moves: {}", listed.join(", "));

    Ok(())
}

fn selfplay(random_side: Option<Player>, seed: u64) -> Result<()> {
    let mut game = Game::new();
    let mut rng = StdRng::seed_from_u64(seed);

    match random_side {
        Some(side) => println!("=== Self-play: engine vs random {side} (seed {seed}) ===\n"),
        None => println!("=== Self-play: engine vs engine ===\n"),
    }

    while game.outcome.is_none() {
        let board = game.board;
        let mover = board.active_player();

        let action = if random_side == Some(mover) {
            let actions = board.legal_actions();
            actions[rng.random_range(0..actions.len())]
        } else {
            best_action(&board)?
        };

        game.play(action)?;
        println!("Ply {}: {mover} plays {action}", game.moves.len());
        println!("{}\n", game.board);
    }

    match game.outcome {
        Some(GameOutcome::Win(winner)) => println!("Result: {winner} wins"),
        Some(GameOutcome::Draw) => println!("Result: draw"),
        None => unreachable!("loop exits only once the game concludes"),
    }

    Ok(())
}

fn stats() -> Result<()> {
    use std::collections::{HashSet, VecDeque};

    let mut visited = HashSet::new();
    let mut queue = VecDeque::new();
    queue.push_back(Board::new());
    visited.insert(Board::new());

    let mut terminal = 0usize;
    let mut x_wins = 0usize;
    let mut o_wins = 0usize;
    let mut draws = 0usize;

    while let Some(board) = queue.pop_front() {
        if board.is_terminal() {
            terminal += 1;
            match board.winner() {
                Some(Player::X) => x_wins += 1,
                Some(Player::O) => o_wins += 1,
                None => draws += 1,
            }
            continue;
        }

        for action in board.legal_actions() {
            let next = board.apply(action)?;
            if visited.insert(next) {
                queue.push_back(next);
            }
        }
    }

    println!("=== State Space ===\n");
    println!("Reachable positions: {}", visited.len());
    println!("Terminal positions: {terminal}");
    println!("  X wins: {x_wins}");
    println!("  O wins: {o_wins}");
    println!("  Draws: {draws}");

    let value = oxo::evaluate(&Board::new());
    println!("\nInitial position value: {} ({})", value, describe_value(value));

    Ok(())
}

fn describe_value(value: i32) -> &'static str {
    match value {
        1 => "X wins with best play",
        -1 => "O wins with best play",
        _ => "draw with best play",
    }
}
