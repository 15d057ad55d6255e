use crate::domain::action::{updates_for, ActionName};
use crate::domain::player::{Effect, PlayerUpdate};
use crate::domain::roles::{Alignment, Role};
use crate::domain::test_helpers::make_player;

#[test]
fn kill_against_unprotected_target_sets_dead() {
    let target = make_player("t", Role::Villager, Alignment::Good);
    let updates = updates_for(ActionName::Kill, &target);
    assert_eq!(updates, vec![PlayerUpdate::SetAlive(false)]);
}

#[test]
fn kill_against_protected_target_is_a_noop() {
    let mut target = make_player("t", Role::Villager, Alignment::Good);
    target.add_effect(Effect::Protected);
    let updates = updates_for(ActionName::Kill, &target);
    assert!(updates.is_empty());

    // Applying nothing leaves the target alive.
    assert!(target.is_alive);
}

#[test]
fn poison_sets_effect_and_counter() {
    let mut target = make_player("t", Role::Villager, Alignment::Good);
    for update in updates_for(ActionName::Poison, &target.clone()) {
        target.apply(&update);
    }
    assert!(target.has_effect(Effect::Poisoned));
    assert_eq!(target.poison_days_remaining, 2);
}

#[test]
fn detox_lifts_poison_and_paralysis() {
    let mut target = make_player("t", Role::Villager, Alignment::Good);
    target.add_effect(Effect::Poisoned);
    target.add_effect(Effect::Paralyzed);
    target.poison_days_remaining = 2;
    for update in updates_for(ActionName::Detox, &target.clone()) {
        target.apply(&update);
    }
    assert!(!target.has_effect(Effect::Poisoned));
    assert!(!target.has_effect(Effect::Paralyzed));
    assert_eq!(target.poison_days_remaining, 0);
}

#[test]
fn cure_lifts_poison_only() {
    let mut target = make_player("t", Role::Villager, Alignment::Good);
    target.add_effect(Effect::Poisoned);
    target.add_effect(Effect::Paralyzed);
    for update in updates_for(ActionName::Cure, &target.clone()) {
        target.apply(&update);
    }
    assert!(!target.has_effect(Effect::Poisoned));
    assert!(target.has_effect(Effect::Paralyzed));
}

#[test]
fn save_revives() {
    let mut target = make_player("t", Role::Villager, Alignment::Good);
    target.is_alive = false;
    for update in updates_for(ActionName::Save, &target.clone()) {
        target.apply(&update);
    }
    assert!(target.is_alive);
}

#[test]
fn effect_application_is_idempotent() {
    let mut target = make_player("t", Role::Villager, Alignment::Good);
    target.apply(&PlayerUpdate::AddEffect(Effect::Blocked));
    target.apply(&PlayerUpdate::AddEffect(Effect::Blocked));
    assert_eq!(target.effects, vec![Effect::Blocked]);
}
