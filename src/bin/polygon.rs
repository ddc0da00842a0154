//! Polygon area game solver CLI

use anyhow::Result;
use clap::{Parser, Subcommand};
use polygon_game::cli::commands::{moves, solve};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "polygon")]
#[command(version, about = "Solve the polygon area game", long_about = None)]
struct Cli {
    /// Log search progress (RUST_LOG takes precedence)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decide the winner for n points and k counters
    Solve(solve::SolveArgs),

    /// List the legal moves from a position
    Moves(moves::MovesArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Solve(args) => solve::execute(args),
        Commands::Moves(args) => moves::execute(args),
    }
}
