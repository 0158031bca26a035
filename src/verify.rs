//! End-to-end round verification.

use crate::{
    draw::{draw_winner, DrawAlgorithm, Seed},
    error::VerifyResult,
    stakes::{ParticipantId, RawStake, StakePool},
    tickets::TicketPool,
};

/// Everything a reporter needs about a successfully verified round.
#[derive(Clone, Debug)]
pub struct RoundVerification {
    /// The recomputed winner.
    pub winner: ParticipantId,
    /// The winner's display name; empty if the export carried none.
    pub winner_name: String,
    /// Index of the drawn ticket, in `[0, total_tickets - 1]`.
    pub ticket: u64,
    /// Total tickets in the round.
    pub total_tickets: u64,
    /// The normalized stakes, for per-participant reporting.
    pub stakes: StakePool,
}

/// Replay a round from its public data.
///
/// The seed is checked against the published commitment before anything is
/// drawn; a mismatch means the draw result cannot be trusted, regardless of
/// the stakes. All-or-nothing: any failure leaves no partial result, and
/// rerunning with the same inputs yields the identical outcome.
pub fn verify_round<I>(
    seed_hex: &str,
    commitment_hex: &str,
    raw_stakes: I,
    algorithm: DrawAlgorithm,
) -> VerifyResult<RoundVerification>
where
    I: IntoIterator<Item = (ParticipantId, RawStake)>,
{
    let seed = Seed::from_hex(seed_hex)?;
    seed.verify_commitment(commitment_hex)?;

    let stakes = StakePool::normalize(raw_stakes)?;
    let tickets = TicketPool::allocate(&stakes)?;
    let result = draw_winner(&tickets, &seed, algorithm)?;

    let winner_name = stakes
        .get(&result.winner)
        .map(|stake| stake.display_name.clone())
        .unwrap_or_default();

    Ok(RoundVerification {
        winner: result.winner,
        winner_name,
        ticket: result.ticket,
        total_tickets: tickets.total(),
        stakes,
    })
}
