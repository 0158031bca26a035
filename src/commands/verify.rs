//! The `verify` subcommand: replay a round and report the outcome.

use std::{collections::BTreeMap, path::Path, process::ExitCode};

use anyhow::{Context, Result};
use clap::ValueEnum;
use tracing::debug;

use fairdraw::{verify_round, DrawAlgorithm, RawStake, VerifyError};

/// CLI-facing name for the randomness derivation.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Algorithm {
    /// SHA-256 of the seed, interpreted big-endian
    V1,
    /// Seed bytes interpreted big-endian
    V2,
}

impl From<Algorithm> for DrawAlgorithm {
    fn from(algorithm: Algorithm) -> Self {
        match algorithm {
            Algorithm::V1 => DrawAlgorithm::V1,
            Algorithm::V2 => DrawAlgorithm::V2,
        }
    }
}

pub fn run(
    seed_hex: &str,
    commitment_hex: &str,
    stakes_path: &Path,
    algorithm: Algorithm,
) -> Result<ExitCode> {
    let raw = load_stakes(stakes_path)?;
    debug!(entries = raw.len(), path = %stakes_path.display(), "loaded stakes");

    let outcome = match verify_round(seed_hex, commitment_hex, raw, algorithm.into()) {
        Ok(outcome) => outcome,
        // tamper gets its own exit code so scripts can tell it apart
        // from malformed input
        Err(err @ VerifyError::CommitmentMismatch { .. }) => {
            eprintln!("TAMPERED: {err}");
            return Ok(ExitCode::from(2));
        }
        Err(err) => return Err(err.into()),
    };

    println!("Round verified as provably fair");
    println!();
    println!("Hash    : {commitment_hex}");
    println!("Seed    : {seed_hex}");
    println!(
        "Stakes  : {} ({} players, {} tickets)",
        stakes_path.display(),
        outcome.stakes.len(),
        outcome.total_tickets
    );
    println!(
        "Ticket  : {} (range 0..={})",
        outcome.ticket,
        outcome.total_tickets - 1
    );
    if outcome.winner_name.is_empty() {
        println!("Winner  : {}", outcome.winner);
    } else {
        println!("Winner  : {} (@{})", outcome.winner, outcome.winner_name);
    }

    Ok(ExitCode::SUCCESS)
}

fn load_stakes(path: &Path) -> Result<BTreeMap<String, RawStake>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read stakes file '{}'", path.display()))?;
    serde_json::from_str(&text).with_context(|| {
        format!(
            "stakes file '{}' must be a JSON object mapping participant ids to stakes",
            path.display()
        )
    })
}
