//! Stake ingestion and normalization.
//!
//! Raw round exports map a participant id to either a bare numeric value or
//! a record carrying the amount and an optional display name. Normalization
//! quantizes each raw entry to cents (half-up) and merges repeated entries
//! for the same participant by summation.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::{
    amount::{Amount, AmountError},
    error::{VerifyError, VerifyResult},
};

/// Opaque participant identifier.
///
/// Lexicographic byte-wise order on this string defines the canonical
/// ticket ordering shared with the server.
pub type ParticipantId = String;

/// A stake amount as the export carries it: JSON number or numeric string.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum StakeValue {
    Number(serde_json::Number),
    Text(String),
}

impl StakeValue {
    /// Decimal text form fed to the exact parser. Numbers go through their
    /// shortest round-trip representation, which is the literal the export
    /// was written with for anything a JSON writer produces.
    fn as_decimal_text(&self) -> String {
        match self {
            StakeValue::Number(n) => n.to_string(),
            StakeValue::Text(s) => s.clone(),
        }
    }
}

/// One raw stake entry.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum RawStake {
    /// `{"amount": 3.5, "username": "alice"}`-style record.
    Detailed {
        amount: Option<StakeValue>,
        username: Option<String>,
    },
    /// Bare value: `3.5` or `"3.5"`.
    Bare(StakeValue),
}

/// A participant's normalized stake.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Stake {
    /// Total staked amount, quantized to cents.
    pub amount: Amount,
    /// Cosmetic display name; empty if the export carried none.
    pub display_name: String,
}

/// Normalized stakes keyed by participant id.
///
/// Iteration order is the canonical ordering (ascending participant id).
#[derive(Clone, Debug, Default)]
pub struct StakePool {
    entries: BTreeMap<ParticipantId, Stake>,
}

impl StakePool {
    /// Normalize raw stake entries into per-participant totals.
    ///
    /// Each raw entry is rounded to cents individually *before* being added
    /// to the participant's running total; this matches the server's
    /// historical behavior and must not be reordered. When a participant
    /// appears several times with different display names, the last
    /// non-empty name wins.
    pub fn normalize<I>(raw: I) -> VerifyResult<StakePool>
    where
        I: IntoIterator<Item = (ParticipantId, RawStake)>,
    {
        let mut entries: BTreeMap<ParticipantId, Stake> = BTreeMap::new();

        for (participant, stake) in raw {
            let (value, username) = match stake {
                RawStake::Bare(value) => (Some(value), None),
                RawStake::Detailed { amount, username } => (amount, username),
            };
            let text = value
                .as_ref()
                .map(StakeValue::as_decimal_text)
                .unwrap_or_else(|| "null".into());

            let amount = Amount::parse(&text).map_err(|err| match err {
                AmountError::NotANumber => VerifyError::InvalidAmount {
                    participant: participant.clone(),
                    value: text.clone(),
                },
                AmountError::NotPositive => VerifyError::NonPositiveStake {
                    participant: participant.clone(),
                },
            })?;

            let entry = entries.entry(participant.clone()).or_default();
            entry.amount =
                entry
                    .amount
                    .checked_add(amount)
                    .ok_or(VerifyError::InvalidAmount {
                        participant,
                        value: text,
                    })?;
            match username {
                Some(name) if !name.is_empty() => entry.display_name = name,
                _ => {}
            }
        }

        Ok(StakePool { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, participant: &str) -> Option<&Stake> {
        self.entries.get(participant)
    }

    /// Entries in canonical (ascending participant id) order.
    pub fn iter(&self) -> impl Iterator<Item = (&ParticipantId, &Stake)> {
        self.entries.iter()
    }
}
