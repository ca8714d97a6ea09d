mod bench;
mod oracle;
mod pattern;
mod play;
mod verify;

use anyhow::Result;
use clap::{Parser, Subcommand};
use reversi_flip::square::Square;
use tracing_subscriber::EnvFilter;

use crate::pattern::Transform;

#[derive(Parser, Debug)]
#[command(about = "Checks and exercises the bitboard flip kernels")]
struct Cli {
    #[command(subcommand)]
    command: SubCommands,
}

#[derive(Debug, Subcommand)]
enum SubCommands {
    /// Print the strategies compiled into this build.
    Info,
    /// Compare the kernels with a direction-walking reference on random positions.
    Verify {
        #[arg(long, default_value = "100000")]
        positions: u64,

        #[arg(long, default_value = "0")]
        seed: u64,
    },
    /// Print a hex pattern as a grid.
    Dump {
        pattern: String,

        #[arg(long, value_enum, default_value_t = Transform::None)]
        transform: Transform,
    },
    /// Show the discs flipped by a move.
    Play {
        square: Square,
        mover: String,
        opponent: String,
    },
    /// Measure flip and last-flip throughput.
    Bench {
        #[arg(long, default_value = "10000000")]
        iterations: u64,

        #[arg(long, default_value = "0")]
        seed: u64,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Cli::parse();
    let strategies = reversi_flip::target::strategies();
    tracing::info!(
        flip = strategies.flip,
        count_last_flip = strategies.count_last_flip,
        popcount = strategies.popcount,
        "strategies selected"
    );

    match args.command {
        SubCommands::Info => {
            println!("{strategies}");
            Ok(())
        }
        SubCommands::Verify { positions, seed } => verify::execute(positions, seed),
        SubCommands::Dump { pattern, transform } => pattern::dump(&pattern, transform),
        SubCommands::Play {
            square,
            mover,
            opponent,
        } => play::execute(square, &mover, &opponent),
        SubCommands::Bench { iterations, seed } => bench::execute(iterations, seed),
    }
}
