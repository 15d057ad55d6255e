use std::collections::HashSet;

use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;

use crate::domain::assignment::{
    alignment_deck, assign_players, default_role_slots, RoleSlot,
};
use crate::domain::roles::{capabilities_for, Alignment, Role};

fn names(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("player-{i}")).collect()
}

#[test]
fn small_rosters_get_core_roles_only() {
    let slots = default_role_slots(3);
    assert_eq!(slots.len(), 3);
    assert!(slots.iter().all(|s| matches!(s, RoleSlot::Fixed(_))));
}

#[test]
fn large_rosters_get_fillers() {
    let slots = default_role_slots(10);
    let fillers = slots.iter().filter(|s| matches!(s, RoleSlot::Filler)).count();
    assert_eq!(fillers, 3);
}

#[test]
fn alignment_deck_always_has_at_least_one_bad() {
    for n in 1..=12 {
        let deck = alignment_deck(n);
        assert_eq!(deck.len(), n);
        assert!(deck.iter().any(|a| *a == Alignment::Bad), "n = {n}");
    }
}

#[test]
fn alignment_deck_adds_mad_from_six_players() {
    assert!(!alignment_deck(5).contains(&Alignment::Mad));
    assert!(alignment_deck(6).contains(&Alignment::Mad));
}

#[test]
fn fillers_become_villagers() {
    let mut rng = ChaCha12Rng::seed_from_u64(7);
    let players = assign_players(&names(10), &mut rng);
    let villagers = players.iter().filter(|p| p.role == Role::Villager).count();
    assert_eq!(villagers, 3);
}

#[test]
fn every_player_gets_a_unique_id_and_table_stats() {
    let mut rng = ChaCha12Rng::seed_from_u64(42);
    let players = assign_players(&names(8), &mut rng);

    let ids: HashSet<_> = players.iter().map(|p| p.id).collect();
    assert_eq!(ids.len(), 8);

    for p in &players {
        let caps = capabilities_for(p.role, p.alignment);
        assert_eq!(p.priority, caps.priority);
        assert_eq!(p.remaining_uses, caps.budget);
        assert!(p.is_alive);
        assert!(p.effects.is_empty());
    }
}

#[test]
fn assignment_is_deterministic_for_a_seed() {
    let roster = names(8);
    let a = assign_players(&roster, &mut ChaCha12Rng::seed_from_u64(11));
    let b = assign_players(&roster, &mut ChaCha12Rng::seed_from_u64(11));
    let a_pairs: Vec<_> = a.iter().map(|p| (p.name.clone(), p.role, p.alignment)).collect();
    let b_pairs: Vec<_> = b.iter().map(|p| (p.name.clone(), p.role, p.alignment)).collect();
    assert_eq!(a_pairs, b_pairs);
}

#[test]
fn roles_and_alignments_shuffle_independently() {
    // With independent shuffles, different seeds must be able to pair the
    // same role with different alignments for a fixed roster.
    let roster = names(8);
    let mut pairings = HashSet::new();
    for seed in 0..32 {
        let players = assign_players(&roster, &mut ChaCha12Rng::seed_from_u64(seed));
        let reaper = players.iter().find(|p| p.role == Role::Reaper).unwrap();
        pairings.insert(reaper.alignment);
    }
    assert!(pairings.len() > 1, "reaper alignment never varied");
}
