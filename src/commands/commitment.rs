//! The `commitment` subcommand: print the SHA-256 commitment for a seed.

use std::process::ExitCode;

use anyhow::Result;

use fairdraw::Seed;

pub fn run(seed_hex: &str) -> Result<ExitCode> {
    let seed = Seed::from_hex(seed_hex)?;
    println!("{}", hex::encode(seed.commitment()));
    Ok(ExitCode::SUCCESS)
}
