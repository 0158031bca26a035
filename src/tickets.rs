//! Ticket allocation.
//!
//! One ticket per cent of stake. Amounts are already integer cents, so the
//! conversion is exact by construction. The record order is the canonical
//! ordering (ascending participant id) and must match the server's exactly;
//! it is the sole source of reproducibility beyond the hash itself.

use crate::{
    error::{VerifyError, VerifyResult},
    stakes::{ParticipantId, StakePool},
};

/// One participant's slice of the ticket pool.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TicketRecord {
    pub participant: ParticipantId,
    pub tickets: u64,
}

/// The full ticket pool in canonical order.
#[derive(Clone, Debug)]
pub struct TicketPool {
    records: Vec<TicketRecord>,
    total: u64,
}

impl TicketPool {
    /// Allocate tickets from normalized stakes.
    ///
    /// Order is inherited from the stake pool's sorted keys; no further
    /// sorting happens here.
    pub fn allocate(stakes: &StakePool) -> VerifyResult<TicketPool> {
        let mut records = Vec::with_capacity(stakes.len());
        let mut total: u64 = 0;

        for (participant, stake) in stakes.iter() {
            let tickets = stake.amount.cents();
            total = total
                .checked_add(tickets)
                .ok_or_else(|| VerifyError::InvalidAmount {
                    participant: participant.clone(),
                    value: stake.amount.to_string(),
                })?;
            records.push(TicketRecord {
                participant: participant.clone(),
                tickets,
            });
        }

        if total == 0 {
            return Err(VerifyError::EmptyPool);
        }
        Ok(TicketPool { records, total })
    }

    /// Total ticket count; always greater than zero.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Records in canonical order.
    pub fn records(&self) -> &[TicketRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stakes::{RawStake, StakePool};
    use serde_json::json;

    fn pool_of(entries: Vec<(&str, serde_json::Value)>) -> StakePool {
        StakePool::normalize(entries.into_iter().map(|(id, v)| {
            (
                id.to_string(),
                serde_json::from_value::<RawStake>(v).unwrap(),
            )
        }))
        .unwrap()
    }

    #[test]
    fn one_ticket_per_cent() {
        let stakes = pool_of(vec![("alice", json!(3.0)), ("bob", json!(7.0))]);
        let pool = TicketPool::allocate(&stakes).unwrap();

        assert_eq!(pool.total(), 1000);
        assert_eq!(
            pool.records(),
            [
                TicketRecord {
                    participant: "alice".into(),
                    tickets: 300
                },
                TicketRecord {
                    participant: "bob".into(),
                    tickets: 700
                },
            ]
        );
    }

    #[test]
    fn order_is_canonical_regardless_of_input_order() {
        let forward = pool_of(vec![("a", json!(1)), ("b", json!(2)), ("c", json!(3))]);
        let reverse = pool_of(vec![("c", json!(3)), ("b", json!(2)), ("a", json!(1))]);

        let forward = TicketPool::allocate(&forward).unwrap();
        let reverse = TicketPool::allocate(&reverse).unwrap();
        assert_eq!(forward.records(), reverse.records());
        assert_eq!(forward.total(), reverse.total());
    }

    #[test]
    fn empty_pool_is_rejected() {
        let err = TicketPool::allocate(&StakePool::default()).unwrap_err();
        assert_eq!(err, VerifyError::EmptyPool);
    }

    #[test]
    fn ranges_partition_the_total() {
        let stakes = pool_of(vec![
            ("a", json!(0.01)),
            ("b", json!(1.5)),
            ("c", json!(12.34)),
        ]);
        let pool = TicketPool::allocate(&stakes).unwrap();
        let sum: u64 = pool.records().iter().map(|r| r.tickets).sum();
        assert_eq!(sum, pool.total());
        assert_eq!(pool.total(), 1 + 150 + 1234);
    }
}
