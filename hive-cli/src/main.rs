//! Hive CLI - Command-line interface
//!
//! Commands:
//! - selfplay: Play random games and report outcome statistics
//! - perft: Count legal move sequences to a fixed depth
//! - show: Print the board and legal moves of a position

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod perft;
mod selfplay;
mod show;

#[derive(Parser)]
#[command(name = "hive")]
#[command(about = "Hive rules engine tools")]
struct Cli {
    /// Random seed for reproducibility
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play uniformly random games and report statistics
    Selfplay(selfplay::SelfplayArgs),
    /// Count leaf nodes of the legal move tree
    Perft(perft::PerftArgs),
    /// Print the board, game string and legal moves
    Show(show::ShowArgs),
}

fn main() -> anyhow::Result<()> {
    // Initialize logging (RUST_LOG overrides the default level)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Selfplay(args) => selfplay::run(args, cli.seed),
        Commands::Perft(args) => perft::run(args),
        Commands::Show(args) => show::run(args),
    }
}
