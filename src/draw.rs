//! Commitment checking and the winner draw.
//!
//! The seed is committed to before the round as its SHA-256 hash. After the
//! round, anyone holding the revealed seed can check the commitment and
//! re-run the draw: interpret the seed-derived digest as a 256-bit
//! big-endian integer, reduce it modulo the total ticket count, and walk
//! the canonical ticket sequence to the covering participant.

use sha2::{Digest, Sha256};

use crate::{
    error::{VerifyError, VerifyResult},
    stakes::ParticipantId,
    tickets::TicketPool,
};

/// Seed length in bytes (64 hex characters).
pub const SEED_LEN: usize = 32;

/// The revealed round seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Seed([u8; SEED_LEN]);

impl Seed {
    /// Decode a seed from its 64-character hex form.
    pub fn from_hex(seed_hex: &str) -> VerifyResult<Seed> {
        if seed_hex.len() != SEED_LEN * 2 {
            return Err(VerifyError::MalformedSeed {
                reason: format!(
                    "expected {} hex characters, got {}",
                    SEED_LEN * 2,
                    seed_hex.len()
                ),
            });
        }
        let mut bytes = [0u8; SEED_LEN];
        hex::decode_to_slice(seed_hex, &mut bytes).map_err(|_| VerifyError::MalformedSeed {
            reason: "not valid hexadecimal".into(),
        })?;
        Ok(Seed(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; SEED_LEN] {
        &self.0
    }

    /// The SHA-256 commitment for this seed.
    pub fn commitment(&self) -> [u8; 32] {
        Sha256::digest(self.0).into()
    }

    /// Check this seed against the commitment hash published before the
    /// round. Hex comparison is case-insensitive.
    pub fn verify_commitment(&self, commitment_hex: &str) -> VerifyResult<()> {
        let computed = hex::encode(self.commitment());
        if !computed.eq_ignore_ascii_case(commitment_hex) {
            return Err(VerifyError::CommitmentMismatch {
                published: commitment_hex.to_string(),
                computed,
            });
        }
        Ok(())
    }
}

/// Which randomness derivation the round used.
///
/// The commitment check is identical for both; only the integer fed into
/// the modulo reduction differs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DrawAlgorithm {
    /// `SHA-256(seed)` interpreted as a big-endian integer.
    #[default]
    V1,
    /// The seed bytes themselves interpreted as a big-endian integer.
    V2,
}

/// Outcome of a draw: the winner and the exact ticket drawn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DrawResult {
    pub winner: ParticipantId,
    /// Index of the drawn ticket, in `[0, total_tickets - 1]`.
    pub ticket: u64,
}

/// Re-run the draw for a round.
///
/// Deterministic: the same pool, seed and algorithm always yield the same
/// result. The winner is the first participant whose cumulative ticket
/// count exceeds the drawn index, so each participant covers a contiguous
/// range exactly as wide as their ticket count.
pub fn draw_winner(
    pool: &TicketPool,
    seed: &Seed,
    algorithm: DrawAlgorithm,
) -> VerifyResult<DrawResult> {
    if pool.total() == 0 {
        return Err(VerifyError::EmptyPool);
    }

    let ticket = match algorithm {
        DrawAlgorithm::V1 => reduce_mod(&seed.commitment(), pool.total()),
        DrawAlgorithm::V2 => reduce_mod(seed.as_bytes(), pool.total()),
    };

    let mut cumulative = 0u64;
    for record in pool.records() {
        cumulative += record.tickets;
        if ticket < cumulative {
            return Ok(DrawResult {
                winner: record.participant.clone(),
                ticket,
            });
        }
    }

    // unreachable while ticket < total and the records sum to total
    Err(VerifyError::DrawInvariant {
        ticket,
        total: pool.total(),
    })
}

/// Reduce a 256-bit big-endian integer modulo `total`.
///
/// Folds one byte at a time so intermediates stay within `u128`; exact for
/// any `total` that fits in `u64`.
fn reduce_mod(bytes: &[u8; 32], total: u64) -> u64 {
    debug_assert!(total > 0);
    let modulus = u128::from(total);
    let mut acc: u128 = 0;
    for &byte in bytes {
        acc = ((acc << 8) | u128::from(byte)) % modulus;
    }
    acc as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stakes::{RawStake, StakePool};
    use serde_json::json;

    const ZERO_SEED: &str = "0000000000000000000000000000000000000000000000000000000000000000";
    // SHA-256 of 32 zero bytes
    const ZERO_SEED_COMMITMENT: &str =
        "66687aadf862bd776c8fc18b8e9f8e20089714856ee233b3902a591d0d5f2925";

    fn ticket_pool(entries: Vec<(&str, serde_json::Value)>) -> TicketPool {
        let stakes = StakePool::normalize(entries.into_iter().map(|(id, v)| {
            (
                id.to_string(),
                serde_json::from_value::<RawStake>(v).unwrap(),
            )
        }))
        .unwrap();
        TicketPool::allocate(&stakes).unwrap()
    }

    #[test]
    fn seed_roundtrips_through_hex() {
        let seed = Seed::from_hex(ZERO_SEED).unwrap();
        assert_eq!(seed.as_bytes(), &[0u8; 32]);

        let mixed_case = "ABCDEF0123456789abcdef0123456789ABCDEF0123456789abcdef0123456789";
        assert!(Seed::from_hex(mixed_case).is_ok());
    }

    #[test]
    fn seed_length_is_enforced() {
        let too_long = format!("{ZERO_SEED}00");
        for bad in ["", "00", &ZERO_SEED[..63], too_long.as_str()] {
            let err = Seed::from_hex(bad).unwrap_err();
            assert!(matches!(err, VerifyError::MalformedSeed { .. }), "{bad:?}");
        }
    }

    #[test]
    fn seed_must_be_hex() {
        let bad = format!("zz{}", &ZERO_SEED[2..]);
        let err = Seed::from_hex(&bad).unwrap_err();
        assert!(matches!(err, VerifyError::MalformedSeed { .. }));
    }

    #[test]
    fn commitment_check_is_case_insensitive() {
        let seed = Seed::from_hex(ZERO_SEED).unwrap();
        assert_eq!(hex::encode(seed.commitment()), ZERO_SEED_COMMITMENT);

        seed.verify_commitment(ZERO_SEED_COMMITMENT).unwrap();
        seed.verify_commitment(&ZERO_SEED_COMMITMENT.to_uppercase())
            .unwrap();
    }

    #[test]
    fn tampered_commitment_is_detected() {
        let seed = Seed::from_hex(ZERO_SEED).unwrap();
        // flip one hex character
        let tampered = format!("7{}", &ZERO_SEED_COMMITMENT[1..]);
        let err = seed.verify_commitment(&tampered).unwrap_err();
        assert!(err.is_tamper_signal());
        assert!(matches!(err, VerifyError::CommitmentMismatch { .. }));
    }

    #[test]
    fn reduce_mod_matches_bignum_reference() {
        // SHA-256(32 zero bytes) as a big-endian integer, reduced by an
        // independent bignum implementation
        let digest = Seed::from_hex(ZERO_SEED).unwrap().commitment();
        assert_eq!(reduce_mod(&digest, 1000), 981);
        assert_eq!(reduce_mod(&digest, 500), 481);
        assert_eq!(reduce_mod(&digest, 97), 42);
        assert_eq!(reduce_mod(&digest, 7), 4);
        assert_eq!(reduce_mod(&digest, 1), 0);
    }

    #[test]
    fn v2_reads_the_seed_directly() {
        let seed = Seed::from_hex(ZERO_SEED).unwrap();
        let pool = ticket_pool(vec![("alice", json!(3.0)), ("bob", json!(7.0))]);

        // zero integer mod anything is ticket 0, the first of alice's range
        let result = draw_winner(&pool, &seed, DrawAlgorithm::V2).unwrap();
        assert_eq!(result.winner, "alice");
        assert_eq!(result.ticket, 0);
    }

    #[test]
    fn v1_hashes_the_seed_first() {
        let seed = Seed::from_hex(ZERO_SEED).unwrap();
        let pool = ticket_pool(vec![("alice", json!(3.0)), ("bob", json!(7.0))]);

        // 981 falls past alice's 300 tickets, into bob's range
        let result = draw_winner(&pool, &seed, DrawAlgorithm::V1).unwrap();
        assert_eq!(result.winner, "bob");
        assert_eq!(result.ticket, 981);
    }

    #[test]
    fn walk_respects_range_boundaries() {
        // seed value 1 under V2 draws ticket 1: the last of a's two
        // tickets, not yet b's range
        let one = format!("{}01", &ZERO_SEED[..62]);
        let seed = Seed::from_hex(&one).unwrap();
        let pool = ticket_pool(vec![("a", json!(0.02)), ("b", json!(0.02))]);

        let result = draw_winner(&pool, &seed, DrawAlgorithm::V2).unwrap();
        assert_eq!(result.winner, "a");
        assert_eq!(result.ticket, 1);

        // seed value 2 crosses into b's range
        let two = format!("{}02", &ZERO_SEED[..62]);
        let seed = Seed::from_hex(&two).unwrap();
        let result = draw_winner(&pool, &seed, DrawAlgorithm::V2).unwrap();
        assert_eq!(result.winner, "b");
        assert_eq!(result.ticket, 2);
    }

    #[test]
    fn draw_is_deterministic() {
        let seed = Seed::from_hex(ZERO_SEED).unwrap();
        let pool = ticket_pool(vec![("alice", json!(1.23)), ("bob", json!(45.6))]);

        let first = draw_winner(&pool, &seed, DrawAlgorithm::V1).unwrap();
        let second = draw_winner(&pool, &seed, DrawAlgorithm::V1).unwrap();
        assert_eq!(first, second);
    }
}
