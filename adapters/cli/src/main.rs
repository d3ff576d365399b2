#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter for playing and inspecting Gridwalk boards.

mod session;
mod setup;

use std::{
    io::{self, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use gridwalk_store::GameStore;
use gridwalk_system_generation::DEFAULT_SOLVABLE_ATTEMPTS;
use session::Format;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "gridwalk",
    version,
    about = "Navigate a grid from start to end before moves or health run out"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Play a game, reading one command per line from stdin
    Play(GameArgs),
    /// Report whether the board can be won and print the route
    Solve(GameArgs),
    /// Print the board as an ASCII layout
    Show(GameArgs),
}

/// Options shared by every subcommand for building the board and rules.
#[derive(Clone, Debug, Args)]
pub(crate) struct GameArgs {
    /// Seed for board generation; random when omitted
    #[arg(long)]
    pub(crate) seed: Option<u64>,
    /// ASCII layout file to load instead of generating a board
    #[arg(
        long,
        value_name = "FILE",
        conflicts_with_all = ["seed", "generation", "width", "height", "solvable"]
    )]
    pub(crate) board: Option<PathBuf>,
    /// JSON file overriding the game rules
    #[arg(long, value_name = "FILE")]
    pub(crate) rules: Option<PathBuf>,
    /// JSON file overriding board generation parameters
    #[arg(long, value_name = "FILE")]
    pub(crate) generation: Option<PathBuf>,
    /// Generated board width
    #[arg(long)]
    pub(crate) width: Option<u32>,
    /// Generated board height
    #[arg(long)]
    pub(crate) height: Option<u32>,
    /// Re-roll generated boards until one can be won
    #[arg(long)]
    pub(crate) solvable: bool,
    /// Re-rolls allowed when `--solvable` is set
    #[arg(long, default_value_t = DEFAULT_SOLVABLE_ATTEMPTS)]
    pub(crate) attempts: u32,
    /// Emit JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

impl GameArgs {
    fn format(&self) -> Format {
        if self.json {
            Format::Json
        } else {
            Format::Text
        }
    }
}

/// Entry point for the Gridwalk command-line interface.
fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Play(args) => play(&args),
        Command::Solve(args) => solve(&args),
        Command::Show(args) => show(&args),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn play(args: &GameArgs) -> Result<()> {
    let rules = setup::load_rules(args.rules.as_deref())?;
    let board = setup::load_board(args, &rules)?;
    let store = GameStore::new(rules);
    let id = store.create_game(board).context("create game")?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let status = session::run(&store, id, stdin.lock(), stdout.lock(), args.format())?;
    tracing::info!(%id, %status, "session ended");
    Ok(())
}

fn solve(args: &GameArgs) -> Result<()> {
    let rules = setup::load_rules(args.rules.as_deref())?;
    let board = setup::load_board(args, &rules)?;
    let store = GameStore::new(rules);
    let id = store.create_game(board).context("create game")?;

    let route = store.winning_path(id).context("search winning path")?;
    let mut stdout = io::stdout().lock();
    session::write_route(&mut stdout, route.as_deref(), args.format())?;
    stdout.flush().context("flush output")
}

fn show(args: &GameArgs) -> Result<()> {
    let rules = setup::load_rules(args.rules.as_deref())?;
    let board = setup::load_board(args, &rules)?;
    let mut stdout = io::stdout().lock();

    if args.json {
        let store = GameStore::new(rules);
        let id = store.create_game(board).context("create game")?;
        let snapshot = store.snapshot(id).context("capture snapshot")?;
        session::write_snapshot(&mut stdout, &snapshot, Format::Json)?;
    } else {
        stdout
            .write_all(board.to_ascii().as_bytes())
            .context("write board")?;
    }
    stdout.flush().context("flush output")
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn board_file_conflicts_with_generation_flags() {
        let parsed = Cli::try_parse_from(["gridwalk", "play", "--board", "board.txt", "--seed", "4"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn generation_flags_parse() {
        let cli = Cli::try_parse_from([
            "gridwalk",
            "solve",
            "--seed",
            "4",
            "--width",
            "12",
            "--solvable",
            "--json",
        ])
        .expect("arguments parse");

        let Command::Solve(args) = cli.command else {
            panic!("expected solve subcommand");
        };
        assert_eq!(args.seed, Some(4));
        assert_eq!(args.width, Some(12));
        assert_eq!(args.height, None);
        assert!(args.solvable);
        assert_eq!(args.attempts, DEFAULT_SOLVABLE_ATTEMPTS);
        assert_eq!(args.format(), Format::Json);
    }
}
