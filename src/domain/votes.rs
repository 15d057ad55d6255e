//! Vote aggregates for one voting window and the pure ops that mutate them.
//!
//! All mutation flows through [`apply_vote_op`], which the store applies
//! under its entry lock; no caller ever rewrites the whole entry list from a
//! stale read.

use serde::{Deserialize, Serialize};

use crate::domain::player::PlayerId;

/// Per-target vote aggregate.
///
/// Invariants: `count == voters.len()`, voters are unique, and a voter
/// appears in at most one entry across the collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteEntry {
    pub target: PlayerId,
    pub count: u32,
    pub voters: Vec<PlayerId>,
}

/// A scoped mutation of the vote collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteOp {
    /// Attach the voter to `target`, detaching from any prior entry first.
    Cast { voter: PlayerId, target: PlayerId },
    /// Abstain: detach the voter without attaching anywhere.
    Abstain { voter: PlayerId },
}

/// Apply one vote op to the collection, maintaining the entry invariants.
pub fn apply_vote_op(entries: &mut Vec<VoteEntry>, op: &VoteOp) {
    let voter = match op {
        VoteOp::Cast { voter, .. } | VoteOp::Abstain { voter } => *voter,
    };

    // Detach from any prior entry; drop entries that reach zero.
    for entry in entries.iter_mut() {
        if let Some(pos) = entry.voters.iter().position(|v| *v == voter) {
            entry.voters.remove(pos);
            entry.count = entry.voters.len() as u32;
        }
    }
    entries.retain(|e| e.count > 0);

    if let VoteOp::Cast { target, .. } = op {
        match entries.iter_mut().find(|e| e.target == *target) {
            Some(entry) => {
                entry.voters.push(voter);
                entry.count = entry.voters.len() as u32;
            }
            None => entries.push(VoteEntry {
                target: *target,
                count: 1,
                voters: vec![voter],
            }),
        }
    }
}

/// Strict plurality winner of the window; `None` on a tie or an empty board.
pub fn leading_target(entries: &[VoteEntry]) -> Option<PlayerId> {
    let max = entries.iter().map(|e| e.count).max()?;
    let mut leaders = entries.iter().filter(|e| e.count == max);
    let leader = leaders.next()?;
    if leaders.next().is_some() {
        return None;
    }
    Some(leader.target)
}
