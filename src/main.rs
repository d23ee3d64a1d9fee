//! Interactive front end: reads move text from stdin and plays it.
//!
//! Each input line may hold one move or a whole sequence (`1. e4 e5 2. Nf3`).
//! The board and status are printed after every line; `pgn` prints the game
//! record, `fen` the current position and `quit` exits.

use std::io::{self, BufRead, Write};

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use san_chess::chess_errors::ChessErrors;
use san_chess::game_state::chess_rules::{RepetitionRule, RuleSet};
use san_chess::game_state::game::Game;
use san_chess::utils::pgn::{write_pgn, PgnHeaders};
use san_chess::utils::render_game_state::render_board;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum RepetitionArg {
    /// Distinct move texts in a trailing window.
    MoveText,
    /// Exact position counting.
    Position,
}

#[derive(Debug, Parser)]
#[command(name = "san_chess", version, about = "Play chess by typing algebraic notation")]
struct Args {
    /// Start from this FEN position instead of the standard setup.
    #[arg(long)]
    fen: Option<String>,

    /// How forced repetition draws are detected.
    #[arg(long, value_enum, default_value_t = RepetitionArg::MoveText)]
    repetition: RepetitionArg,

    /// Moves to play before reading stdin.
    #[arg(long)]
    moves: Option<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let repetition = match args.repetition {
        RepetitionArg::MoveText => RepetitionRule::MoveTextWindow,
        RepetitionArg::Position => RepetitionRule::PositionKey,
    };
    let rules = RuleSet::default().with_repetition(repetition);
    let mut game = match &args.fen {
        Some(fen) => Game::from_fen(fen)?,
        None => Game::new(),
    }
    .with_rules(rules);

    if let Some(moves) = &args.moves {
        play_line(&mut game, moves);
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    print_position(&mut out, &game)?;

    for line in io::stdin().lock().lines() {
        let line = line?;
        match line.trim() {
            "" => continue,
            "quit" | "exit" => break,
            "pgn" => writeln!(out, "{}", write_pgn(&game, &PgnHeaders::default()))?,
            "fen" => writeln!(out, "{}", game.to_fen())?,
            text => {
                play_line(&mut game, text);
                print_position(&mut out, &game)?;
            }
        }
        if game.status().is_terminal() {
            break;
        }
    }

    Ok(())
}

fn play_line(game: &mut Game, text: &str) {
    if let Err(err) = game.try_play_move_sequence(text) {
        match err {
            ChessErrors::AmbiguousOrigin { .. } => {
                eprintln!("{err}; add the origin file or rank")
            }
            _ => eprintln!("{err}"),
        }
    }
}

fn print_position(out: &mut impl Write, game: &Game) -> io::Result<()> {
    writeln!(out, "{}", render_board(game.board()))?;
    if let Some(last) = game.last_move() {
        writeln!(out, "last move: {}", last.resolved)?;
    }
    if game.status().is_terminal() {
        writeln!(out, "game over: {}", game.status())
    } else {
        writeln!(out, "{} to move", game.turn())
    }
}
