//! Error types for round verification.

use thiserror::Error;

/// Errors surfaced by round verification.
///
/// Every error is terminal for the run: verification is deterministic, so
/// retrying the same inputs cannot change the outcome. The library never
/// logs or partially succeeds; callers decide how to report.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum VerifyError {
    /// A stake value could not be parsed as a number.
    #[error("stake '{value}' for participant '{participant}' is not a valid number")]
    InvalidAmount { participant: String, value: String },

    /// A stake quantized to zero or negative.
    #[error("stake for participant '{participant}' must be positive")]
    NonPositiveStake { participant: String },

    /// The round contains no tickets; nothing to draw from.
    #[error("the round contains no tickets, nothing to verify")]
    EmptyPool,

    /// The revealed seed is not 64 hex characters.
    #[error("malformed seed: {reason}")]
    MalformedSeed { reason: String },

    /// SHA-256 of the seed does not match the published commitment.
    ///
    /// This is the tamper signal, not an input mistake: the seed the server
    /// revealed is not the one it committed to before the round.
    #[error("commitment mismatch: published {published}, computed {computed}")]
    CommitmentMismatch { published: String, computed: String },

    /// The weighted walk failed to land on a winner even though the drawn
    /// ticket was in range. Indicates a bug in the draw itself.
    #[error("draw invariant violated: ticket {ticket} not covered by pool of {total}")]
    DrawInvariant { ticket: u64, total: u64 },
}

impl VerifyError {
    /// True for the security-relevant failure (a tampered seed) as opposed
    /// to malformed input data.
    pub fn is_tamper_signal(&self) -> bool {
        matches!(self, VerifyError::CommitmentMismatch { .. })
    }
}

pub type VerifyResult<T> = Result<T, VerifyError>;
