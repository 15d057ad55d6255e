use crate::domain::action::{updates_for, ActionName};
use crate::domain::player::Effect;
use crate::domain::resolution::resolve_overnight;
use crate::domain::roles::{Alignment, Role};
use crate::domain::test_helpers::{make_player, make_session};

#[test]
fn poison_kills_on_exactly_the_second_day_resolution() {
    let victim = make_player("victim", Role::Villager, Alignment::Good);
    let victim_id = victim.id;
    let mut session = make_session(vec![victim]);

    // One poison action, then two day resolutions.
    {
        let target = session.player(victim_id).unwrap().clone();
        let updates = updates_for(ActionName::Poison, &target);
        let target = session.player_mut(victim_id).unwrap();
        for update in &updates {
            target.apply(update);
        }
    }

    let roster = vec![victim_id];
    let first = resolve_overnight(&mut session, &roster);
    assert!(first.deaths.is_empty());
    assert_eq!(first.poison_notices, vec!["victim".to_string()]);
    assert!(session.player(victim_id).unwrap().is_alive);
    assert_eq!(session.player(victim_id).unwrap().poison_days_remaining, 1);

    let second = resolve_overnight(&mut session, &roster);
    assert_eq!(second.deaths, vec!["victim".to_string()]);
    assert!(!session.player(victim_id).unwrap().is_alive);
    assert_eq!(session.player(victim_id).unwrap().poison_days_remaining, 0);
}

#[test]
fn overnight_kill_appears_in_death_report() {
    let a = make_player("a", Role::Villager, Alignment::Good);
    let b = make_player("b", Role::Villager, Alignment::Good);
    let (a_id, b_id) = (a.id, b.id);
    let mut session = make_session(vec![a, b]);
    let roster = vec![a_id, b_id];

    session.player_mut(b_id).unwrap().is_alive = false;
    let report = resolve_overnight(&mut session, &roster);
    assert_eq!(report.deaths, vec!["b".to_string()]);
}

#[test]
fn protected_target_produces_no_death_notice() {
    let a = make_player("a", Role::Villager, Alignment::Good);
    let a_id = a.id;
    let mut session = make_session(vec![a]);

    // Protect, then a kill that no-ops against it.
    session
        .player_mut(a_id)
        .unwrap()
        .add_effect(Effect::Protected);
    {
        let target = session.player(a_id).unwrap().clone();
        let updates = updates_for(ActionName::Kill, &target);
        assert!(updates.is_empty());
    }

    let report = resolve_overnight(&mut session, &[a_id]);
    assert!(report.deaths.is_empty());
    assert!(session.player(a_id).unwrap().is_alive);
}

#[test]
fn night_scoped_effects_expire_at_day() {
    let mut a = make_player("a", Role::Villager, Alignment::Good);
    a.add_effect(Effect::Blocked);
    a.add_effect(Effect::Protected);
    a.add_effect(Effect::Watched);
    a.add_effect(Effect::Paralyzed);
    let a_id = a.id;
    let mut session = make_session(vec![a]);

    resolve_overnight(&mut session, &[a_id]);
    let player = session.player(a_id).unwrap();
    assert!(!player.has_effect(Effect::Blocked));
    assert!(!player.has_effect(Effect::Protected));
    assert!(!player.has_effect(Effect::Watched));
    // Paralysis persists through the coming vote.
    assert!(player.has_effect(Effect::Paralyzed));
}

#[test]
fn dead_players_do_not_tick_poison() {
    let mut a = make_player("a", Role::Villager, Alignment::Good);
    a.is_alive = false;
    a.add_effect(Effect::Poisoned);
    a.poison_days_remaining = 2;
    let a_id = a.id;
    let mut session = make_session(vec![a]);

    resolve_overnight(&mut session, &[]);
    assert_eq!(session.player(a_id).unwrap().poison_days_remaining, 2);
}
