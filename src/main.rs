//! gogame: play Go-like games in the terminal.
//!
//! ## Usage
//!
//! - `gogame` - Show a demo
//! - `gogame play` - Let random players fight on a configurable board
//! - `gogame interactive` - Play against a random player

use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use gogame::board::Board;
use gogame::color::Color;
use gogame::constants::{DEFAULT_MAX_TURNS, DEFAULT_SIZE};
use gogame::game::{GameLimits, run_game};
use gogame::player::{InteractivePlayer, RandomPlayer};

/// gogame: a Go-like board game engine
#[derive(Parser)]
#[command(name = "gogame")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log moves, merges and captures (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct BoardArgs {
    /// Side of a square board
    #[arg(long, default_value_t = DEFAULT_SIZE)]
    size: usize,
    /// Number of rows, overrides --size
    #[arg(long)]
    height: Option<usize>,
    /// Number of columns, overrides --size
    #[arg(long)]
    width: Option<usize>,
    /// Wall off everything outside the inscribed ellipse
    #[arg(long)]
    circular: bool,
}

impl BoardArgs {
    fn build(&self) -> Result<Board> {
        let height = self.height.unwrap_or(self.size);
        let width = self.width.unwrap_or(self.size);
        let board = if self.circular {
            Board::circular(height, width)
        } else {
            Board::with_size(height, width)
        };
        board.context("cannot create the board")
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a short scripted game with a capture
    Demo,
    /// Run a game between random players
    Play {
        #[command(flatten)]
        board: BoardArgs,
        /// Number of players
        #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u8).range(2..=8))]
        players: u8,
        /// Stop after this many turns (0 for no limit)
        #[arg(long, default_value_t = DEFAULT_MAX_TURNS)]
        max_turns: usize,
        /// Stop after this many seconds
        #[arg(long)]
        max_seconds: Option<u64>,
        /// Seed for reproducible games
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Play against a random player, entering moves as `x y` or `pass`
    Interactive {
        #[command(flatten)]
        board: BoardArgs,
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(io::stderr)
        .init();

    match cli.command {
        Some(Commands::Play {
            board,
            players,
            max_turns,
            max_seconds,
            seed,
        }) => {
            let mut board = board.build()?;
            for i in 0..players {
                let name = format!("random-{}", i + 1);
                let player = match seed {
                    Some(s) => RandomPlayer::with_seed(name, s.wrapping_add(u64::from(i))),
                    None => RandomPlayer::new(name),
                };
                board.join(Box::new(player))?;
            }
            let limits = GameLimits {
                max_turns: (max_turns > 0).then_some(max_turns),
                max_duration: max_seconds.map(Duration::from_secs),
            };
            let winner = run_game(&mut board, &limits)?;
            report(&board, winner);
        }
        Some(Commands::Interactive { board, seed }) => {
            let mut board = board.build()?;
            let human = InteractivePlayer::new("you", io::stdin().lock(), io::stdout());
            board.join(Box::new(human))?;
            let bot = match seed {
                Some(s) => RandomPlayer::with_seed("random", s),
                None => RandomPlayer::new("random"),
            };
            board.join(Box::new(bot))?;
            let winner = run_game(&mut board, &GameLimits::default())?;
            report(&board, winner);
        }
        Some(Commands::Demo) | None => run_demo()?,
    }
    Ok(())
}

fn report(board: &Board, winner: Color) {
    println!("{board}");
    for color in board.players() {
        println!(
            "{color}: {} ({} prisoners)",
            board.score(color),
            board.prisoners(color)
        );
    }
    let name = board.player(winner).map_or("?", |p| p.name());
    println!("Winner: {name} ({winner})");
}

fn run_demo() -> Result<()> {
    println!("gogame: a Go-like board game engine\n");

    let mut board = Board::new(9)?;
    let moves = [
        (4, 5, Color::Black),
        (5, 5, Color::White),
        (6, 5, Color::Black),
        (0, 0, Color::White),
        (5, 4, Color::Black),
        (1, 0, Color::White),
        (5, 6, Color::Black),
    ];
    for (x, y, color) in moves {
        board.play(x, y, color)?;
        println!("{color} at ({x}, {y})");
    }
    println!("\n{board}");
    println!(
        "Black: {} ({} prisoners), White: {} ({} prisoners)",
        board.score(Color::Black),
        board.prisoners(Color::Black),
        board.score(Color::White),
        board.prisoners(Color::White)
    );
    println!("Territories: {}", board.territories(None).count());
    Ok(())
}
