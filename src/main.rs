//! Fairdraw CLI
//!
//! Replays provably-fair betting rounds from exported public data.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::verify::Algorithm;

#[derive(Parser)]
#[command(name = "fairdraw")]
#[command(about = "Verify provably-fair stake-weighted draws")]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a round and check the seed against its commitment
    Verify {
        /// 64-char hex seed revealed after the round
        #[arg(long)]
        seed: String,

        /// 64-char hex SHA-256 commitment published before the round
        #[arg(long = "hash")]
        commitment: String,

        /// Path to the stakes JSON exported from the round
        #[arg(long = "bets")]
        stakes: PathBuf,

        /// Randomness derivation used by the round
        #[arg(long, value_enum, default_value_t = Algorithm::V1)]
        algorithm: Algorithm,
    },

    /// Compute the commitment hash for a seed
    Commitment {
        /// 64-char hex seed
        #[arg(long)]
        seed: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let result = match cli.command {
        Commands::Verify {
            seed,
            commitment,
            stakes,
            algorithm,
        } => commands::verify::run(&seed, &commitment, &stakes, algorithm),
        Commands::Commitment { seed } => commands::commitment::run(&seed),
    };

    match result {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
