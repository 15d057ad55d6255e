//! Property tests for the vote tally invariants (pure domain, no stores).
//!
//! Invariants under any op sequence:
//! - every entry's count equals its voter list length
//! - voters are unique within an entry
//! - a voter is attached to at most one entry

use std::collections::HashSet;

use proptest::prelude::*;
use uuid::Uuid;

use crate::domain::player::PlayerId;
use crate::domain::votes::{apply_vote_op, VoteEntry, VoteOp};

const POOL: usize = 6;

fn pool_id(i: usize) -> PlayerId {
    PlayerId(Uuid::from_u128(i as u128 + 1))
}

fn arb_op() -> impl Strategy<Value = VoteOp> {
    prop_oneof![
        (0..POOL, 0..POOL).prop_map(|(v, t)| VoteOp::Cast {
            voter: pool_id(v),
            target: pool_id(t),
        }),
        (0..POOL).prop_map(|v| VoteOp::Abstain { voter: pool_id(v) }),
    ]
}

fn assert_invariants(entries: &[VoteEntry]) -> Result<(), TestCaseError> {
    let mut seen: HashSet<PlayerId> = HashSet::new();
    for entry in entries {
        prop_assert_eq!(
            entry.count as usize,
            entry.voters.len(),
            "count must equal voter list length"
        );
        prop_assert!(entry.count > 0, "zero entries must be dropped");
        for voter in &entry.voters {
            prop_assert!(
                seen.insert(*voter),
                "voter attached to more than one entry"
            );
        }
    }
    Ok(())
}

proptest! {
    /// Invariants hold after every single op in any sequence.
    #[test]
    fn prop_tally_invariants_hold(ops in proptest::collection::vec(arb_op(), 1..60)) {
        let mut entries = Vec::new();
        for op in &ops {
            apply_vote_op(&mut entries, op);
            assert_invariants(&entries)?;
        }
    }

    /// Total attached voters never exceeds the voter pool.
    #[test]
    fn prop_attached_voters_bounded_by_pool(ops in proptest::collection::vec(arb_op(), 1..60)) {
        let mut entries = Vec::new();
        for op in &ops {
            apply_vote_op(&mut entries, op);
        }
        let total: usize = entries.iter().map(|e| e.voters.len()).sum();
        prop_assert!(total <= POOL);
    }

    /// A cast immediately followed by an abstain leaves the voter detached.
    #[test]
    fn prop_abstain_always_detaches(v in 0..POOL, t in 0..POOL) {
        let voter = pool_id(v);
        let mut entries = Vec::new();
        apply_vote_op(&mut entries, &VoteOp::Cast { voter, target: pool_id(t) });
        apply_vote_op(&mut entries, &VoteOp::Abstain { voter });
        prop_assert!(entries.iter().all(|e| !e.voters.contains(&voter)));
    }
}
