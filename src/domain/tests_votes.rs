use crate::domain::player::PlayerId;
use crate::domain::votes::{apply_vote_op, leading_target, VoteEntry, VoteOp};

fn ids(n: usize) -> Vec<PlayerId> {
    (0..n).map(|_| PlayerId::new()).collect()
}

#[test]
fn first_cast_creates_an_entry() {
    let p = ids(2);
    let mut entries = Vec::new();
    apply_vote_op(
        &mut entries,
        &VoteOp::Cast {
            voter: p[0],
            target: p[1],
        },
    );
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].target, p[1]);
    assert_eq!(entries[0].count, 1);
    assert_eq!(entries[0].voters, vec![p[0]]);
}

#[test]
fn recast_detaches_before_attaching() {
    let p = ids(3);
    let mut entries = Vec::new();
    apply_vote_op(&mut entries, &VoteOp::Cast { voter: p[0], target: p[1] });
    apply_vote_op(&mut entries, &VoteOp::Cast { voter: p[0], target: p[2] });

    // The old entry reached zero and was dropped.
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].target, p[2]);
    assert_eq!(entries[0].count, 1);
}

#[test]
fn abstain_removes_prior_vote_without_adding() {
    let p = ids(2);
    let mut entries = Vec::new();
    apply_vote_op(&mut entries, &VoteOp::Cast { voter: p[0], target: p[1] });
    apply_vote_op(&mut entries, &VoteOp::Abstain { voter: p[0] });
    assert!(entries.is_empty());
}

#[test]
fn duplicate_cast_for_same_target_does_not_double_count() {
    let p = ids(2);
    let mut entries = Vec::new();
    apply_vote_op(&mut entries, &VoteOp::Cast { voter: p[0], target: p[1] });
    apply_vote_op(&mut entries, &VoteOp::Cast { voter: p[0], target: p[1] });
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].count, 1);
}

#[test]
fn leading_target_picks_strict_plurality() {
    let p = ids(4);
    let mut entries = Vec::new();
    apply_vote_op(&mut entries, &VoteOp::Cast { voter: p[0], target: p[3] });
    apply_vote_op(&mut entries, &VoteOp::Cast { voter: p[1], target: p[3] });
    apply_vote_op(&mut entries, &VoteOp::Cast { voter: p[2], target: p[0] });
    assert_eq!(leading_target(&entries), Some(p[3]));
}

#[test]
fn tie_has_no_leader() {
    let p = ids(4);
    let mut entries = Vec::new();
    apply_vote_op(&mut entries, &VoteOp::Cast { voter: p[0], target: p[2] });
    apply_vote_op(&mut entries, &VoteOp::Cast { voter: p[1], target: p[3] });
    assert_eq!(leading_target(&entries), None);
}

#[test]
fn empty_board_has_no_leader() {
    assert_eq!(leading_target(&[]), None);
}

#[test]
fn entry_counts_track_voter_lists() {
    let p = ids(5);
    let mut entries: Vec<VoteEntry> = Vec::new();
    for voter in &p[..4] {
        apply_vote_op(
            &mut entries,
            &VoteOp::Cast {
                voter: *voter,
                target: p[4],
            },
        );
    }
    assert_eq!(entries[0].count, 4);
    assert_eq!(entries[0].voters.len(), 4);
}
