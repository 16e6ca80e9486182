//! Connections - CLI
//!
//! Word-grouping puzzle with TUI and line modes, plus a self-play simulation.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use connections::{
    catalog::{
        Catalog,
        loader::{load_from_file, to_json},
    },
    commands::{SimulationConfig, print_simulation_statistics, run_simple, run_simulation},
    core::Session,
    output::print_catalog,
};
use rand::Rng;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser)]
#[command(
    name = "connections",
    about = "Find four groups of four hidden among sixteen words",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Puzzle file (JSON); the built-in puzzle when omitted
    #[arg(short, long, global = true)]
    puzzle: Option<PathBuf>,

    /// Seed for the board shuffle
    #[arg(short, long, global = true)]
    seed: Option<u64>,

    /// Write logs to this file (the TUI logs nothing without it)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive TUI mode (default)
    Play,

    /// Simple line mode without the TUI
    Simple,

    /// Play random games and report win rate
    Simulate {
        /// Number of games to play
        #[arg(short = 'n', long, default_value = "1000")]
        games: usize,
    },

    /// Validate a puzzle and print a summary
    Check {
        /// Show every group (spoilers)
        #[arg(short, long)]
        reveal: bool,

        /// Print the puzzle as JSON instead of a summary
        #[arg(short, long, conflicts_with = "reveal")]
        export: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Default to Play mode if no command given
    let command = cli.command.unwrap_or(Commands::Play);

    let log_to_stderr = !matches!(command, Commands::Play);
    init_tracing(cli.log_file.as_deref(), log_to_stderr)?;

    let catalog = load_catalog(cli.puzzle.as_deref())?;

    match command {
        Commands::Play => run_play_command(&catalog, cli.seed),
        Commands::Simple => run_simple_command(&catalog, cli.seed),
        Commands::Simulate { games } => {
            run_simulate_command(&catalog, games, cli.seed);
            Ok(())
        }
        Commands::Check { reveal, export } => {
            if export {
                println!("{}", to_json(&catalog)?);
            } else {
                print_catalog(&catalog, reveal);
            }
            Ok(())
        }
    }
}

/// Install the global subscriber
///
/// Logs go to `log_file` when given, otherwise to stderr if `to_stderr`,
/// otherwise nowhere.
fn init_tracing(log_file: Option<&Path>, to_stderr: bool) -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("connections=info"));

    if let Some(path) = log_file {
        let file = File::create(path)
            .with_context(|| format!("failed to create log file {}", path.display()))?;

        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init();
    } else if to_stderr {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init();
    }

    Ok(())
}

fn load_catalog(path: Option<&Path>) -> Result<Catalog> {
    let Some(path) = path else {
        return Ok(Catalog::default_puzzle());
    };

    match load_from_file(path) {
        Ok(catalog) => {
            tracing::info!(path = %path.display(), groups = catalog.groups().len(), "puzzle loaded");
            Ok(catalog)
        }
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "puzzle rejected");
            Err(err).with_context(|| format!("failed to load puzzle {}", path.display()))
        }
    }
}

fn new_session(catalog: &Catalog, seed: Option<u64>) -> Session<'_> {
    match seed {
        Some(seed) => Session::seeded(catalog, seed),
        None => Session::from_entropy(catalog),
    }
}

fn run_play_command(catalog: &Catalog, seed: Option<u64>) -> Result<()> {
    use connections::interactive::{App, run_tui};

    let app = App::new(new_session(catalog, seed));
    run_tui(app)
}

fn run_simple_command(catalog: &Catalog, seed: Option<u64>) -> Result<()> {
    let mut session = new_session(catalog, seed);
    let stdin = std::io::stdin();
    run_simple(&mut session, stdin.lock(), std::io::stdout())
}

fn run_simulate_command(catalog: &Catalog, games: usize, seed: Option<u64>) {
    let seed = seed.unwrap_or_else(|| rand::rng().random());

    println!("\n{}", "═".repeat(70));
    println!(" Connections Self-Play Simulation ");
    println!("{}", "═".repeat(70));
    println!("\nPlaying {games} random games (seed {seed})\n");

    let config = SimulationConfig::new(games, seed);
    let stats = run_simulation(catalog, &config);
    print_simulation_statistics(&stats);
}
