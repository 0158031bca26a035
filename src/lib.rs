//! Provably-fair verification for stake-weighted betting rounds.
//!
//! Replays a finished round from public data only: the seed revealed after
//! the round, the SHA-256 commitment published before it, and the exported
//! per-participant stakes. Anyone can reproduce the server's winner
//! selection bit-for-bit and detect a tampered seed.
//!
//! ## Pipeline
//!
//! ```text
//! raw stakes ──> StakePool ──> TicketPool ──┐
//!                                           ├──> DrawResult
//! seed + commitment ──> Seed (verified) ────┘
//! ```
//!
//! One ticket equals one cent of stake. The winning ticket is the
//! seed-derived 256-bit integer reduced modulo the total ticket count, and
//! the winner is found by walking the canonical (participant-ascending)
//! ticket sequence.
//!
//! The library is pure: no I/O, no logging, no global state. Every failure
//! surfaces as a [`VerifyError`] with enough detail for the caller to
//! render a message.

pub mod amount;
pub mod draw;
pub mod error;
pub mod stakes;
pub mod tickets;
pub mod verify;

pub use amount::Amount;
pub use draw::{draw_winner, DrawAlgorithm, DrawResult, Seed};
pub use error::{VerifyError, VerifyResult};
pub use stakes::{ParticipantId, RawStake, Stake, StakePool};
pub use tickets::{TicketPool, TicketRecord};
pub use verify::{verify_round, RoundVerification};
